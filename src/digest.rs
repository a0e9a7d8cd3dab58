//! Digestion: turn raw key/value rows into validated spec records.
//!
//! Fail-fast: the first bad column, missing mandatory option, or rule
//! violation aborts the whole run with no partial result.

use std::collections::BTreeMap;

use crate::error::SpecError;
use crate::model::{Category, SpecRecord};
use crate::reader::{CategoryBlock, RawRow};
use crate::rules::{Rule, standard_rules};
use crate::schema::{self, AttrId, Emit};

/// Digest every category block, preserving input row order per category.
pub fn digest(
    blocks: &[CategoryBlock],
) -> Result<BTreeMap<Category, Vec<SpecRecord>>, SpecError> {
    let rules = standard_rules();
    let mut digested: BTreeMap<Category, Vec<SpecRecord>> = BTreeMap::new();
    for block in blocks {
        let records = digested.entry(block.category).or_default();
        for (index, row) in block.rows.iter().enumerate() {
            records.push(digest_row(block.category, index + 1, row, &rules)?);
        }
    }
    Ok(digested)
}

fn digest_row(
    category: Category,
    row: usize,
    columns: &RawRow,
    rules: &[Rule],
) -> Result<SpecRecord, SpecError> {
    let mut record = SpecRecord::new(category);

    for (column, cell) in columns {
        let def = schema::find(column).ok_or_else(|| SpecError::UnknownOption {
            category,
            column: column.clone(),
        })?;
        record.set(def.id, def.emit.apply(cell));
        if def.id == AttrId::ShortName {
            // The mangled and internal spellings derive from the raw short
            // name, not from its emitted (already mangled) value.
            record.set(AttrId::MangledName, Emit::MangleName.apply(cell));
            record.set(AttrId::InternalName, Emit::BareName.apply(cell));
        }
    }

    for def in schema::mandatory_options() {
        if record.get(def.id).is_none() {
            return Err(SpecError::MissingMandatoryOption {
                category,
                row,
                option: def.id.name_key(),
            });
        }
    }

    let rank = {
        let dims = record
            .get(AttrId::Dims)
            .expect("mandatory check guarantees dims");
        compute_rank(dims, record.get(AttrId::Ungridded))
    };
    record.set_rank(rank);

    for rule in rules {
        rule.check(&record)?;
    }

    Ok(record)
}

/// Storage dimensionality: the grid rank of the dims token plus one per
/// ungridded extra dimension.
fn compute_rank(dims: &str, ungridded: Option<&str>) -> u32 {
    let extra = ungridded
        .map(|list| list.trim_matches(['[', ']']).split(',').count() as u32)
        .unwrap_or(0);
    let base = schema::base_rank(dims).expect("dims token comes from the dims table");
    base + extra
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(column, cell)| (column.to_string(), cell.to_string()))
            .collect()
    }

    fn full_row() -> Vec<(&'static str, &'static str)> {
        vec![
            ("NAME", "DU*"),
            ("LONG_NAME", "dust mixing ratio"),
            ("UNITS", "kg kg-1"),
            ("DIMS", "xyz"),
            ("VLOC", "C"),
        ]
    }

    fn digest_one(category: Category, pairs: &[(&str, &str)]) -> Result<SpecRecord, SpecError> {
        digest_row(category, 1, &raw_row(pairs), &standard_rules())
    }

    #[test]
    fn digests_a_complete_row() {
        let record = digest_one(Category::Import, &full_row()).unwrap();
        assert_eq!(
            record.get(AttrId::ShortName),
            Some("'DU'//trim(comp_name)//''")
        );
        assert_eq!(record.mangled_name(), "'DU'//trim(comp_name)//''");
        assert_eq!(record.internal_name(), "DU");
        assert_eq!(record.get(AttrId::LongName), Some("'dust mixing ratio'"));
        assert_eq!(record.get(AttrId::Units), Some("'kg kg-1'"));
        assert_eq!(record.get(AttrId::Dims), Some("MAPL_DimsHorzVert"));
        assert_eq!(record.get(AttrId::Vlocation), Some("MAPL_VlocationCenter"));
        assert_eq!(record.rank(), 3);
    }

    #[test]
    fn either_alias_spelling_digests_identically() {
        let via_short = digest_one(Category::Import, &full_row()).unwrap();
        let mut renamed = full_row();
        renamed[0] = ("SHORT_NAME", "DU*");
        renamed[1] = ("LONG NAME", "dust mixing ratio");
        let via_long = digest_one(Category::Import, &renamed).unwrap();

        assert_eq!(
            via_short.get(AttrId::ShortName),
            via_long.get(AttrId::ShortName)
        );
        assert_eq!(via_short.get(AttrId::LongName), via_long.get(AttrId::LongName));
    }

    #[test]
    fn unknown_column_is_rejected() {
        let mut row = full_row();
        row.push(("FLAVOR", "salty"));
        let err = digest_one(Category::Export, &row).unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnknownOption { category: Category::Export, ref column } if column == "FLAVOR"
        ));
    }

    #[test]
    fn missing_units_is_reported_by_name() {
        let row: Vec<_> = full_row()
            .into_iter()
            .filter(|(column, _)| *column != "UNITS")
            .collect();
        let err = digest_one(Category::Import, &row).unwrap_err();
        assert!(matches!(
            err,
            SpecError::MissingMandatoryOption { option: "units", row: 1, .. }
        ));
    }

    #[test]
    fn unrecognized_dims_code_fails_the_mandatory_check() {
        let mut row = full_row();
        row[3] = ("DIMS", "q");
        let err = digest_one(Category::Import, &row).unwrap_err();
        assert!(matches!(
            err,
            SpecError::MissingMandatoryOption { option: "dims", .. }
        ));
    }

    #[test]
    fn rank_adds_ungridded_extra_dimensions() {
        assert_eq!(compute_rank("MAPL_DimsHorzVert", None), 3);
        assert_eq!(compute_rank("MAPL_DimsVertOnly", Some("[a,b]")), 3);
        assert_eq!(compute_rank("MAPL_DimsHorzOnly", Some("[5]")), 3);

        let mut row = full_row();
        row[3] = ("DIMS", "z");
        row.push(("UNGRIDDED", "2,3"));
        let record = digest_one(Category::Import, &row).unwrap();
        assert_eq!(record.rank(), 3);
    }

    #[test]
    fn full_volume_with_no_vertical_location_violates_a_rule() {
        let mut row = full_row();
        row[4] = ("VLOC", "N");
        let err = digest_one(Category::Import, &row).unwrap_err();
        assert!(err.to_string().contains(" and "));
        assert!(matches!(err, SpecError::RuleViolation { .. }));
    }

    #[test]
    fn horizontal_only_with_edge_location_violates_a_rule() {
        let mut row = full_row();
        row[3] = ("DIMS", "xy");
        row[4] = ("VLOC", "E");
        let err = digest_one(Category::Import, &row).unwrap_err();
        assert!(matches!(err, SpecError::RuleViolation { .. }));
    }

    #[test]
    fn digest_preserves_row_order_within_a_category() {
        let blocks = vec![CategoryBlock {
            category: Category::Export,
            rows: vec![
                raw_row(&[
                    ("NAME", "B"),
                    ("LONG_NAME", "b"),
                    ("UNITS", "1"),
                    ("DIMS", "xy"),
                ]),
                raw_row(&[
                    ("NAME", "A"),
                    ("LONG_NAME", "a"),
                    ("UNITS", "1"),
                    ("DIMS", "xy"),
                ]),
            ],
        }];
        let digested = digest(&blocks).unwrap();
        let names: Vec<_> = digested[&Category::Export]
            .iter()
            .map(|r| r.internal_name().to_string())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
