//! Option schema: canonical attribute identities plus the static table of
//! recognized column aliases, emission transforms, and mandatory/output
//! flags.

pub mod attr;
pub mod options;

pub use attr::AttrId;
pub use options::{Emit, OptionDef, WILDCARD, base_rank, def, find, mandatory_options};
