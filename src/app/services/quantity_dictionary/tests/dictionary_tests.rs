//! Tests for dictionary lookups and reverse representation resolution

use super::*;
use crate::app::services::quantity_dictionary::RepresentationKind;
use crate::constants::ddi;

#[test]
fn test_builtin_lookup_by_ddi() {
    let dictionary = create_builtin_dictionary();

    let total_area = dictionary.lookup(ddi::TOTAL_AREA).unwrap();
    assert_eq!(total_area.kind, RepresentationKind::Numeric);
    assert_eq!(total_area.unit.as_deref(), Some("m2"));
    assert_eq!(dictionary.unit_for(ddi::TOTAL_AREA), Some("m2"));
    assert!(dictionary.lookup(0xDFFF).is_none());
}

#[test]
fn test_lookup_code_accepts_either_case() {
    let dictionary = create_builtin_dictionary();

    assert!(dictionary.lookup_code("008D").is_some());
    assert!(dictionary.lookup_code("008d").is_some());
    assert!(dictionary.lookup_code("8D").is_none());
    assert!(dictionary.lookup_code("XYZ1").is_none());
}

#[test]
fn test_enumerated_entries_have_no_unit() {
    let dictionary = create_builtin_dictionary();

    assert_eq!(
        dictionary.lookup(ddi::ACTUAL_WORK_STATE).unwrap().kind,
        RepresentationKind::Enumerated
    );
    assert_eq!(dictionary.unit_for(ddi::ACTUAL_WORK_STATE), None);
}

#[test]
fn test_resolve_representation_by_code_and_ddi() {
    let dictionary = create_builtin_dictionary();

    assert_eq!(
        dictionary.resolve_representation(&Representation::new("vrTotalAreaCovered")),
        Some(ddi::TOTAL_AREA)
    );
    assert_eq!(
        dictionary.resolve_representation(&Representation::new("0074")),
        Some(ddi::TOTAL_AREA)
    );
    // Well-formed but undefined DDI codes do not resolve
    assert_eq!(
        dictionary.resolve_representation(&Representation::new("ABCD")),
        None
    );
    assert_eq!(
        dictionary.resolve_representation(&Representation::new("vrUnknown")),
        None
    );
}

#[test]
fn test_representation_falls_back_to_ddi_code() {
    let mut dictionary = QuantityDictionary::new();
    dictionary.insert(QuantityDefinition::numeric(0x1234, "Custom", "g", 1.0));

    let representation = dictionary.representation_for(0x1234).unwrap();
    assert_eq!(representation.code, "1234");
    assert_eq!(representation.description, "Custom");
}

#[test]
fn test_replacement_keeps_representation_code() {
    let mut dictionary = create_builtin_dictionary();
    let before = dictionary.len();

    dictionary.insert(QuantityDefinition::numeric(
        ddi::TOTAL_AREA,
        "Total Area",
        "m2",
        0.1,
    ));

    assert_eq!(dictionary.len(), before);
    assert_eq!(dictionary.lookup(ddi::TOTAL_AREA).unwrap().resolution, 0.1);
    assert_eq!(
        dictionary.resolve_representation(&Representation::new("vrTotalAreaCovered")),
        Some(ddi::TOTAL_AREA)
    );
}

#[test]
fn test_replacement_with_new_code_drops_old_code() {
    let mut dictionary = create_builtin_dictionary();

    dictionary.insert(
        QuantityDefinition::numeric(ddi::TOTAL_AREA, "Total Area", "m2", 1.0)
            .with_representation("vrAreaTotal"),
    );

    assert_eq!(
        dictionary.resolve_representation(&Representation::new("vrAreaTotal")),
        Some(ddi::TOTAL_AREA)
    );
    assert_eq!(
        dictionary.resolve_representation(&Representation::new("vrTotalAreaCovered")),
        None
    );
}

#[test]
fn test_ddis_are_sorted() {
    let dictionary = create_builtin_dictionary();
    let ddis = dictionary.ddis();

    assert_eq!(ddis.len(), dictionary.len());
    assert!(ddis.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(!dictionary.is_empty());
}
