//! Static option table: recognized column aliases, emission transforms,
//! mandatory/output flags.
//!
//! Built once at startup and read-only afterwards. Column names are
//! case-insensitive identifiers in the spec file, so the alias map is keyed
//! uppercase and every lookup normalizes before probing.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::attr::AttrId;

/// Wildcard in a short name, substituted per component instance.
pub const WILDCARD: char = '*';

/// Spliced in place of the wildcard inside a quoted generated name.
const COMP_NAME_SPLICE: &str = "'//trim(comp_name)//'";

/// How a raw cell value becomes an emitted attribute value. Every transform
/// maps an empty cell to an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Raw value unchanged.
    Identity,
    /// `value` -> `'value'`.
    Quoted,
    /// Comma-separated `a,b` -> `[a,b]`.
    Bracketed,
    /// Short code -> canonical token; unrecognized codes emit nothing.
    Lookup(&'static [(&'static str, &'static str)]),
    /// Substitute the wildcard with the component-name splice, then quote.
    MangleName,
    /// Strip the wildcard, leaving a plain identifier.
    BareName,
}

impl Emit {
    pub fn apply(self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self {
            Emit::Identity => Some(raw.to_string()),
            Emit::Quoted => Some(format!("'{raw}'")),
            Emit::Bracketed => Some(format!("[{raw}]")),
            Emit::Lookup(table) => table
                .iter()
                .find(|(code, _)| *code == raw)
                .map(|(_, token)| (*token).to_string()),
            Emit::MangleName => Some(format!(
                "'{}'",
                raw.replace(WILDCARD, COMP_NAME_SPLICE)
            )),
            Emit::BareName => Some(raw.replace(WILDCARD, "")),
        }
    }
}

const DIMS_EMIT: &[(&str, &str)] = &[
    ("z", "MAPL_DimsVertOnly"),
    ("xy", "MAPL_DimsHorzOnly"),
    ("xyz", "MAPL_DimsHorzVert"),
];

const VLOCATION_EMIT: &[(&str, &str)] = &[
    ("C", "MAPL_VlocationCenter"),
    ("E", "MAPL_VlocationEdge"),
    ("N", "MAPL_VlocationNone"),
];

const RESTART_EMIT: &[(&str, &str)] = &[
    ("OPT", "MAPL_RestartOptional"),
    ("SKIP", "MAPL_RestartSkip"),
    ("REQ", "MAPL_RestartRequired"),
    ("BOOT", "MAPL_RestartBoot"),
    ("SKIPI", "MAPL_RestartSkipInitial"),
];

const ADD2EXPORT_EMIT: &[(&str, &str)] = &[("T", ".true."), ("F", ".false.")];

/// Grid dimensionality of each dims token.
pub fn base_rank(dims: &str) -> Option<u32> {
    match dims {
        "MAPL_DimsVertOnly" => Some(1),
        "MAPL_DimsHorzOnly" => Some(2),
        "MAPL_DimsHorzVert" => Some(3),
        _ => None,
    }
}

/// Immutable metadata for one canonical attribute.
#[derive(Debug, Clone, Copy)]
pub struct OptionDef {
    pub id: AttrId,
    pub emit: Emit,
    /// Must be present (and non-absent) on every digested record.
    pub mandatory: bool,
    /// Appears as a named argument in the registration call.
    pub output: bool,
}

const fn def_entry(id: AttrId, emit: Emit, mandatory: bool, output: bool) -> OptionDef {
    OptionDef {
        id,
        emit,
        mandatory,
        output,
    }
}

/// One definition per canonical attribute, indexed by `AttrId`
/// discriminant (checked by test).
static DEFS: &[OptionDef] = &[
    def_entry(AttrId::ShortName, Emit::MangleName, true, true),
    def_entry(AttrId::LongName, Emit::Quoted, true, true),
    def_entry(AttrId::Units, Emit::Quoted, true, true),
    def_entry(AttrId::Dims, Emit::Lookup(DIMS_EMIT), true, true),
    def_entry(AttrId::Vlocation, Emit::Lookup(VLOCATION_EMIT), false, true),
    def_entry(AttrId::Add2Export, Emit::Lookup(ADD2EXPORT_EMIT), false, true),
    def_entry(AttrId::Restart, Emit::Lookup(RESTART_EMIT), false, true),
    def_entry(AttrId::Ungridded, Emit::Bracketed, false, true),
    def_entry(AttrId::FriendlyTo, Emit::Quoted, false, true),
    def_entry(AttrId::Precision, Emit::Identity, false, true),
    def_entry(AttrId::NumSubtiles, Emit::Identity, false, true),
    def_entry(AttrId::AveragingInterval, Emit::Identity, false, true),
    def_entry(AttrId::RefreshInterval, Emit::Identity, false, true),
    def_entry(AttrId::HaloWidth, Emit::Identity, false, true),
    def_entry(AttrId::Default, Emit::Identity, false, true),
    def_entry(AttrId::FieldType, Emit::Identity, false, true),
    def_entry(AttrId::Staggering, Emit::Identity, false, true),
    def_entry(AttrId::Rotation, Emit::Identity, false, true),
    def_entry(AttrId::Datatype, Emit::Identity, false, true),
    def_entry(AttrId::AttrINames, Emit::Identity, false, true),
    def_entry(AttrId::AttRNames, Emit::Identity, false, true),
    def_entry(AttrId::AttrIValues, Emit::Identity, false, true),
    def_entry(AttrId::AttrRValues, Emit::Identity, false, true),
    def_entry(AttrId::UngriddedName, Emit::Identity, false, true),
    def_entry(AttrId::UngriddedUnit, Emit::Identity, false, true),
    def_entry(AttrId::UngriddedCoords, Emit::Identity, false, true),
    def_entry(AttrId::Condition, Emit::Identity, false, false),
    def_entry(AttrId::Alloc, Emit::Identity, false, false),
    def_entry(AttrId::MangledName, Emit::MangleName, false, false),
    def_entry(AttrId::InternalName, Emit::BareName, false, false),
    def_entry(AttrId::Rank, Emit::Identity, false, false),
];

/// Input-facing aliases, uppercase. The derived attributes (mangled name,
/// internal name, rank) are deliberately absent: they are computed during
/// digestion, never supplied as columns.
static ALIAS_TABLE: &[(&str, AttrId)] = &[
    ("SHORT_NAME", AttrId::ShortName),
    ("NAME", AttrId::ShortName),
    ("LONG_NAME", AttrId::LongName),
    ("LONG NAME", AttrId::LongName),
    ("UNITS", AttrId::Units),
    ("DIMS", AttrId::Dims),
    ("VLOCATION", AttrId::Vlocation),
    ("VLOC", AttrId::Vlocation),
    ("ADD2EXPORT", AttrId::Add2Export),
    ("ADDEXP", AttrId::Add2Export),
    ("RESTART", AttrId::Restart),
    ("UNGRIDDED", AttrId::Ungridded),
    ("UNGRID", AttrId::Ungridded),
    ("FRIENDLYTO", AttrId::FriendlyTo),
    ("FRIEND2", AttrId::FriendlyTo),
    ("PRECISION", AttrId::Precision),
    ("PREC", AttrId::Precision),
    ("NUM_SUBTILES", AttrId::NumSubtiles),
    ("NUMSUBS", AttrId::NumSubtiles),
    ("AVERAGING_INTERVAL", AttrId::AveragingInterval),
    ("AVINT", AttrId::AveragingInterval),
    ("REFRESH_INTERVAL", AttrId::RefreshInterval),
    ("HALOWIDTH", AttrId::HaloWidth),
    ("DEFAULT", AttrId::Default),
    ("FIELD_TYPE", AttrId::FieldType),
    ("STAGGERING", AttrId::Staggering),
    ("ROTATION", AttrId::Rotation),
    ("DATATYPE", AttrId::Datatype),
    ("ATTR_INAMES", AttrId::AttrINames),
    ("ATT_RNAMES", AttrId::AttRNames),
    ("ATTR_IVALUES", AttrId::AttrIValues),
    ("ATTR_RVALUES", AttrId::AttrRValues),
    ("UNGRIDDED_NAME", AttrId::UngriddedName),
    ("UNGRIDDED_UNIT", AttrId::UngriddedUnit),
    ("UNGRIDDED_COORDS", AttrId::UngriddedCoords),
    ("CONDITION", AttrId::Condition),
    ("COND", AttrId::Condition),
    ("ALLOC", AttrId::Alloc),
];

static ALIASES: LazyLock<BTreeMap<&'static str, AttrId>> =
    LazyLock::new(|| ALIAS_TABLE.iter().copied().collect());

/// Definition for a canonical attribute.
pub fn def(id: AttrId) -> &'static OptionDef {
    &DEFS[id as usize]
}

/// Resolve a column name (any case) to its definition.
pub fn find(column: &str) -> Option<&'static OptionDef> {
    ALIASES
        .get(column.trim().to_uppercase().as_str())
        .map(|id| def(*id))
}

/// Definitions every digested record must carry a value for.
pub fn mandatory_options() -> impl Iterator<Item = &'static OptionDef> {
    DEFS.iter().filter(|d| d.mandatory)
}
