//! Numeric codec between raw logged integers and physical values
//!
//! A raw value `r` logged under a DDI with resolution `s` denotes the physical
//! value `r * s`. Encoding divides by the resolution and truncates toward
//! zero, except that quotients within floating-point noise of an integer snap
//! to that integer so values produced by decoding encode back unchanged.

use super::QuantityDictionary;
use crate::app::models::canonical::NumericRepresentationValue;
use crate::constants::{DDI_CODE_LENGTH, SCALE_SNAP_TOLERANCE, format_ddi};
use tracing::debug;

/// A value ready to be written into a data log value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedValue {
    /// 4-character DDI code
    pub ddi: String,
    /// Raw logged integer
    pub raw: i64,
}

/// Resolution used for scaling; zero or non-finite resolutions count as 1
pub fn effective_resolution(resolution: f64) -> f64 {
    if resolution == 0.0 || !resolution.is_finite() {
        1.0
    } else {
        resolution
    }
}

/// Physical value of a raw integer
pub fn decode_scaled(raw: i64, resolution: f64) -> f64 {
    raw as f64 * effective_resolution(resolution)
}

/// Raw integer for a physical value
pub fn encode_scaled(value: f64, resolution: f64) -> i64 {
    let scaled = value / effective_resolution(resolution);
    let nearest = scaled.round();
    if (scaled - nearest).abs() <= SCALE_SNAP_TOLERANCE * nearest.abs().max(1.0) {
        nearest as i64
    } else {
        scaled.trunc() as i64
    }
}

impl QuantityDictionary {
    /// Encode a canonical numeric value for a data log value
    ///
    /// Representations known to the dictionary are scaled by their DDI's
    /// resolution. A representation whose code is itself exactly four
    /// characters long is written under that code with the value truncated but
    /// not scaled. Anything else cannot be encoded.
    pub fn encode_value(&self, value: &NumericRepresentationValue) -> Option<EncodedValue> {
        if let Some(ddi) = self.resolve_representation(&value.representation) {
            let resolution = self.lookup(ddi).map_or(1.0, |d| d.resolution);
            return Some(EncodedValue {
                ddi: format_ddi(ddi),
                raw: encode_scaled(value.value, resolution),
            });
        }

        let code = &value.representation.code;
        if code.chars().count() == DDI_CODE_LENGTH {
            debug!("Writing unknown representation '{}' unscaled", code);
            return Some(EncodedValue {
                ddi: code.clone(),
                raw: value.value.trunc() as i64,
            });
        }

        debug!("Representation '{}' has no DDI", code);
        None
    }

    /// Decode a raw logged integer into a canonical numeric value
    ///
    /// Returns `None` for malformed codes, DDIs missing from the dictionary and
    /// DDIs without a unit.
    pub fn decode_value(&self, code: &str, raw: i64) -> Option<NumericRepresentationValue> {
        let definition = self.lookup_code(code)?;
        let unit = definition.unit.clone()?;

        Some(NumericRepresentationValue {
            representation: definition.representation(),
            unit,
            value: decode_scaled(raw, definition.resolution),
        })
    }
}
