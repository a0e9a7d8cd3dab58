//! Typed failures raised while digesting and emitting spec records.
//!
//! Every variant carries enough context (category, option name, offending
//! value) to point back at the source row. Any of these aborts the whole
//! run; there is no per-record recovery.

use thiserror::Error;

use crate::model::Category;

#[derive(Debug, Error)]
pub enum SpecError {
    /// A column header did not match any registered option alias.
    #[error("unknown option {column:?} in {category} specs")]
    UnknownOption { category: Category, column: String },

    /// A mandatory option was absent (or transformed to nothing) after all
    /// columns of a row were processed.
    #[error("{option} is missing from {category} spec row {row}")]
    MissingMandatoryOption {
        category: Category,
        row: usize,
        option: &'static str,
    },

    /// An `alloc` value that is neither a recognized true nor false token.
    #[error("unrecognized logical: {value:?}")]
    InvalidBooleanLiteral { value: String },

    /// A forbidden combination of attribute values.
    #[error("{category} spec {name}: {message}")]
    RuleViolation {
        category: Category,
        name: String,
        message: String,
    },

    /// A rule was constructed with an unsupported joiner. Unreachable while
    /// `Joiner` stays a closed enum; kept so the failure has a name if the
    /// rule set ever becomes data-driven.
    #[error("invalid rule joiner: {joiner}")]
    InvalidJoinerKind { joiner: String },
}
