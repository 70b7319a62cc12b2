//! Shared test utilities and fixtures for quantity dictionary tests

use super::{QuantityDefinition, QuantityDictionary};
use crate::app::models::canonical::{NumericRepresentationValue, Representation};

pub mod dictionary_tests;

/// Sample DDI export with a rate, a total and an enumerated state
pub const SAMPLE_DDI_EXPORT: &str = "\
DD Entity: 1 Setpoint Volume Per Area Application Rate as [mm³/m²]
Definition: Setpoint Application Rate specified as volume per area
Unit: mm³/m² - Capacity per area unit
Resolution: 0,01
Range: 0 - 2147483647

DD Entity: 116 Total Area
Definition: Accumulated Area
Unit: m² - Area
Resolution: 1

DD Entity: 141 Actual Work State
Definition: Actual Work State, 2 bits defined as 00=disabled/off, 01=enabled/on
Unit: n.a. -
Resolution: 1

DD Entity: 57344 Proprietary Rate
Unit: g - Mass
Resolution: 0.5
";

/// Dictionary with the built-in entries only
pub fn create_builtin_dictionary() -> QuantityDictionary {
    QuantityDictionary::builtin()
}

/// Numeric value carrying the given representation code
pub fn numeric_value(code: &str, unit: &str, value: f64) -> NumericRepresentationValue {
    NumericRepresentationValue {
        representation: Representation::new(code),
        unit: unit.to_string(),
        value,
    }
}
