//! Canonical attribute identities.
//!
//! Several input aliases can resolve to one `AttrId` (e.g. `NAME` and
//! `SHORT_NAME`); the `name_key` is the single spelling used as the
//! generated call's argument keyword and in rule messages.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrId {
    ShortName,
    LongName,
    Units,
    Dims,
    Vlocation,
    Add2Export,
    Restart,
    Ungridded,
    FriendlyTo,
    Precision,
    NumSubtiles,
    AveragingInterval,
    RefreshInterval,
    HaloWidth,
    Default,
    FieldType,
    Staggering,
    Rotation,
    Datatype,
    AttrINames,
    AttRNames,
    AttrIValues,
    AttrRValues,
    UngriddedName,
    UngriddedUnit,
    UngriddedCoords,
    Condition,
    Alloc,
    MangledName,
    InternalName,
    Rank,
}

impl AttrId {
    /// Every identity, in definition-table order.
    pub const ALL: [AttrId; 31] = [
        AttrId::ShortName,
        AttrId::LongName,
        AttrId::Units,
        AttrId::Dims,
        AttrId::Vlocation,
        AttrId::Add2Export,
        AttrId::Restart,
        AttrId::Ungridded,
        AttrId::FriendlyTo,
        AttrId::Precision,
        AttrId::NumSubtiles,
        AttrId::AveragingInterval,
        AttrId::RefreshInterval,
        AttrId::HaloWidth,
        AttrId::Default,
        AttrId::FieldType,
        AttrId::Staggering,
        AttrId::Rotation,
        AttrId::Datatype,
        AttrId::AttrINames,
        AttrId::AttRNames,
        AttrId::AttrIValues,
        AttrId::AttrRValues,
        AttrId::UngriddedName,
        AttrId::UngriddedUnit,
        AttrId::UngriddedCoords,
        AttrId::Condition,
        AttrId::Alloc,
        AttrId::MangledName,
        AttrId::InternalName,
        AttrId::Rank,
    ];

    pub fn name_key(self) -> &'static str {
        match self {
            AttrId::ShortName => "short_name",
            AttrId::LongName => "long_name",
            AttrId::Units => "units",
            AttrId::Dims => "dims",
            AttrId::Vlocation => "vlocation",
            AttrId::Add2Export => "add2export",
            AttrId::Restart => "restart",
            AttrId::Ungridded => "ungridded",
            AttrId::FriendlyTo => "friendlyto",
            AttrId::Precision => "precision",
            AttrId::NumSubtiles => "num_subtiles",
            AttrId::AveragingInterval => "averaging_interval",
            AttrId::RefreshInterval => "refresh_interval",
            AttrId::HaloWidth => "halowidth",
            AttrId::Default => "default",
            AttrId::FieldType => "field_type",
            AttrId::Staggering => "staggering",
            AttrId::Rotation => "rotation",
            AttrId::Datatype => "datatype",
            AttrId::AttrINames => "attr_inames",
            AttrId::AttRNames => "att_rnames",
            AttrId::AttrIValues => "attr_ivalues",
            AttrId::AttrRValues => "attr_rvalues",
            AttrId::UngriddedName => "ungridded_name",
            AttrId::UngriddedUnit => "ungridded_unit",
            AttrId::UngriddedCoords => "ungridded_coords",
            AttrId::Condition => "condition",
            AttrId::Alloc => "alloc",
            AttrId::MangledName => "mangled_name",
            AttrId::InternalName => "internal_name",
            AttrId::Rank => "rank",
        }
    }
}
