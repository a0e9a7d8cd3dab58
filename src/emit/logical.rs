//! Canonicalization of logical tokens into Fortran literals.

use crate::error::SpecError;

pub const TRUE_LITERAL: &str = ".true.";
pub const FALSE_LITERAL: &str = ".false.";

const TRUE_TOKENS: &[&str] = &[TRUE_LITERAL, "t", "true", ".t.", "yes", "y", "si", "oui", "sim"];
const FALSE_TOKENS: &[&str] = &[FALSE_LITERAL, "f", "false", ".f.", "no", "n", "non", "nao"];

/// Map a yes/no token (case-insensitive) to `.true.` / `.false.`.
/// Anything outside both token sets is a hard error.
pub fn canonicalize(raw: &str) -> Result<&'static str, SpecError> {
    let token = raw.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Ok(TRUE_LITERAL)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Ok(FALSE_LITERAL)
    } else {
        Err(SpecError::InvalidBooleanLiteral {
            value: raw.to_string(),
        })
    }
}
