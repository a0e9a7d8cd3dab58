//! Emission: render validated records into code fragments.
//!
//! Three independent fragments per record: the registration call, the
//! pointer declaration, and the runtime pointer retrieval. Indentation is
//! threaded through every helper as an explicit value; whatever a helper
//! adds it must remove, so each fragment leaves the level exactly where it
//! found it whether or not a guard was opened.

pub mod logical;

use crate::error::SpecError;
use crate::model::SpecRecord;
use crate::schema::AttrId;

/// Columns of leading indentation for every fragment.
pub const BASE_INDENT: usize = 3;
/// Extra indentation inside an `if` guard.
const GUARD_STEP: usize = 3;
/// Extra indentation for continuation lines of a call block.
const CONTINUATION_STEP: usize = 5;

const DELIMITER: &str = ", ";
const TERMINATOR: &str = "_RC)";

fn newline(indent: usize) -> String {
    format!("\n{}", " ".repeat(indent))
}

fn continuation(indent: usize) -> String {
    format!("&{}& ", newline(indent))
}

/// Start the fragment and, when the record carries a condition, open its
/// guard. Returns the indent the body must use.
fn open_guard(text: &mut String, condition: Option<&str>, indent: usize) -> usize {
    text.push_str(&newline(indent));
    match condition {
        Some(condition) => {
            let indent = indent + GUARD_STEP;
            text.push_str("if (");
            text.push_str(condition);
            text.push_str(") then");
            text.push_str(&newline(indent));
            indent
        }
        None => indent,
    }
}

/// Close the guard opened by `open_guard`, optionally nullifying the
/// pointer on the `else` path. Returns the restored indent.
fn close_guard(text: &mut String, record: &SpecRecord, indent: usize, nullify: bool) -> usize {
    match record.condition() {
        Some(_) => {
            let indent = indent - GUARD_STEP;
            text.push_str(&newline(indent));
            if nullify {
                text.push_str("else");
                text.push_str(&newline(indent));
                text.push_str("   nullify(");
                text.push_str(record.internal_name());
                text.push(')');
                text.push_str(&newline(indent));
            }
            text.push_str("endif");
            text.push_str(&newline(indent));
            indent
        }
        None => {
            text.push_str(&newline(indent));
            indent
        }
    }
}

/// Registration call: one named argument per output attribute that carries
/// a value, each followed by a line continuation, guarded when the record
/// has a condition (no `else` branch).
pub fn registration_fragment(record: &SpecRecord) -> String {
    let mut text = String::new();
    let indent = open_guard(&mut text, record.condition(), BASE_INDENT);

    let indent = indent + CONTINUATION_STEP;
    text.push_str("call ");
    text.push_str(record.category.add_spec_call());
    text.push_str("(gc,");
    text.push_str(&continuation(indent));
    for (name_key, value) in record.output_args() {
        text.push_str(name_key);
        text.push('=');
        text.push_str(value);
        text.push_str(DELIMITER);
        text.push_str(&continuation(indent));
    }
    text.push_str(TERMINATOR);
    text.push_str(&newline(indent));
    let indent = indent - CONTINUATION_STEP;

    let indent = close_guard(&mut text, record, indent, false);
    debug_assert_eq!(indent, BASE_INDENT);
    text
}

/// Pointer declaration. Never guarded: a deactivated pointer must not be
/// referenced, but the section that would reference it still has to
/// compile.
pub fn declare_pointers_fragment(record: &SpecRecord) -> String {
    let rank = record.rank() as usize;
    let dimension = format!("dimension(:{})", ",:".repeat(rank.saturating_sub(1)));

    let mut text = newline(BASE_INDENT);
    text.push_str("real");
    if let Some(kind) = record.get(AttrId::Precision) {
        text.push_str("(kind=");
        text.push_str(kind);
        text.push(')');
    }
    text.push_str(", pointer, ");
    text.push_str(&dimension);
    text.push_str(" :: ");
    text.push_str(record.internal_name());
    text
}

/// Runtime pointer retrieval, guarded when the record has a condition,
/// with an `else` branch that nullifies the pointer.
pub fn get_pointers_fragment(record: &SpecRecord) -> Result<String, SpecError> {
    let mut text = String::new();
    let indent = open_guard(&mut text, record.condition(), BASE_INDENT);

    let mut parts = vec![
        format!("call MAPL_GetPointer({}", record.category.state_name()),
        record.internal_name().to_string(),
        record.mangled_name().to_string(),
    ];
    if let Some(value) = record.get(AttrId::Alloc) {
        parts.push(format!("alloc={}", logical::canonicalize(value)?));
    }
    parts.push(TERMINATOR.to_string());
    text.push_str(&parts.join(DELIMITER));

    let indent = close_guard(&mut text, record, indent, true);
    debug_assert_eq!(indent, BASE_INDENT);
    Ok(text)
}
