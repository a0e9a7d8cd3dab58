//! End-to-end: spec text through the reader, digestion, and emission.

use pretty_assertions::assert_eq;

use gridcomp_specgen::digest::digest;
use gridcomp_specgen::emit;
use gridcomp_specgen::error::SpecError;
use gridcomp_specgen::model::Category;
use gridcomp_specgen::reader::parse_specs;

const SAMPLE: &str = "\
schema_version: 2.0.0
component: DU

category: IMPORT
#  VARIABLE  | DESCRIPTION |         |      |      |        |
 NAME | LONG NAME | UNITS   | DIMS | VLOC | COND   | ALLOC
 DU*  | dust      | kg kg-1 | xyz  | C    | USE_DU | T
 ZLE  | height    | m       | xyz  | E    |        |

category: EXPORT
 NAME | LONG_NAME | UNITS | DIMS | UNGRID
 AREA | cell area | m+2   | xy   | 2,3
";

#[test]
fn digests_all_categories_in_order() {
    let parsed = parse_specs(SAMPLE, '|').unwrap();
    assert_eq!(parsed.schema_version, "2.0.0");
    assert_eq!(parsed.component, "DU");

    let digested = digest(&parsed.blocks).unwrap();
    let imports = &digested[&Category::Import];
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].internal_name(), "DU");
    assert_eq!(imports[0].rank(), 3);
    assert_eq!(imports[1].internal_name(), "ZLE");

    let exports = &digested[&Category::Export];
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].rank(), 4);
}

#[test]
fn emits_a_guarded_registration_block() {
    let parsed = parse_specs(SAMPLE, '|').unwrap();
    let digested = digest(&parsed.blocks).unwrap();
    let du = &digested[&Category::Import][0];

    let expected = "\n   \
         if (USE_DU) then\n      \
         call MAPL_AddImportSpec(gc,&\n           \
         & short_name='DU'//trim(comp_name)//'', &\n           \
         & long_name='dust', &\n           \
         & units='kg kg-1', &\n           \
         & dims=MAPL_DimsHorzVert, &\n           \
         & vlocation=MAPL_VlocationCenter, &\n           \
         & _RC)\n           \n   \
         endif\n   ";
    assert_eq!(emit::registration_fragment(du), expected);
}

#[test]
fn emits_an_unguarded_registration_block() {
    let parsed = parse_specs(SAMPLE, '|').unwrap();
    let digested = digest(&parsed.blocks).unwrap();
    let area = &digested[&Category::Export][0];

    let expected = "\n   \
         call MAPL_AddExportSpec(gc,&\n        \
         & short_name='AREA', &\n        \
         & long_name='cell area', &\n        \
         & units='m+2', &\n        \
         & dims=MAPL_DimsHorzOnly, &\n        \
         & ungridded=[2,3], &\n        \
         & _RC)\n        \n   ";
    assert_eq!(emit::registration_fragment(area), expected);
}

#[test]
fn emits_pointer_declarations_for_every_rank() {
    let parsed = parse_specs(SAMPLE, '|').unwrap();
    let digested = digest(&parsed.blocks).unwrap();

    assert_eq!(
        emit::declare_pointers_fragment(&digested[&Category::Import][0]),
        "\n   real, pointer, dimension(:,:,:) :: DU"
    );
    assert_eq!(
        emit::declare_pointers_fragment(&digested[&Category::Export][0]),
        "\n   real, pointer, dimension(:,:,:,:) :: AREA"
    );
}

#[test]
fn emits_pointer_retrievals_with_and_without_guards() {
    let parsed = parse_specs(SAMPLE, '|').unwrap();
    let digested = digest(&parsed.blocks).unwrap();

    let guarded = emit::get_pointers_fragment(&digested[&Category::Import][0]).unwrap();
    assert_eq!(
        guarded,
        "\n   if (USE_DU) then\n      \
         call MAPL_GetPointer(import, DU, 'DU'//trim(comp_name)//'', alloc=.true., _RC)\
         \n   else\n      nullify(DU)\n   endif\n   "
    );

    let plain = emit::get_pointers_fragment(&digested[&Category::Import][1]).unwrap();
    assert_eq!(plain, "\n   call MAPL_GetPointer(import, ZLE, 'ZLE', _RC)\n   ");
}

#[test]
fn missing_mandatory_column_fails_the_whole_digest() {
    let text = "\
schema_version: 2.0.0
component: X

category: IMPORT
 NAME | LONG_NAME | DIMS
 DU   | dust      | xyz
";
    let parsed = parse_specs(text, '|').unwrap();
    let err = digest(&parsed.blocks).unwrap_err();
    assert!(matches!(
        err,
        SpecError::MissingMandatoryOption { option: "units", .. }
    ));
}

#[test]
fn forbidden_dims_vlocation_combination_fails_the_whole_digest() {
    let text = "\
schema_version: 2.0.0
component: X

category: IMPORT
 NAME | LONG_NAME | UNITS | DIMS | VLOC
 DU   | dust      | kg    | xyz  | N
";
    let parsed = parse_specs(text, '|').unwrap();
    let err = digest(&parsed.blocks).unwrap_err();
    let message = err.to_string();
    assert!(message.contains(
        "dims is equal to MAPL_DimsHorzVert and vlocation is equal to MAPL_VlocationNone"
    ));
}
