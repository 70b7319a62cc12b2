//! Canonical summary -> time entries

use crate::app::models::canonical::{DateContext, RepresentationValue, Summary};
use crate::app::models::document::{IsoDataLogValue, IsoTime, IsoTimeType};
use crate::app::services::quantity_dictionary::QuantityDictionary;
use tracing::debug;

/// Build one time entry per stamped value set of a summary
///
/// Numeric values are encoded through the dictionary; values that cannot be
/// encoded are left out. Enumerated values are not written to summaries.
pub fn export_summary(summary: &Summary, dictionary: &QuantityDictionary) -> Vec<IsoTime> {
    summary
        .summary_data
        .iter()
        .map(|stamped| {
            let stamp = &stamped.stamp;
            let time_type = match stamp.date_context {
                DateContext::ProposedStart => IsoTimeType::Planned,
                _ => IsoTimeType::Effective,
            };

            let data_log_values = stamped
                .values
                .iter()
                .filter_map(|metered| match &metered.value {
                    RepresentationValue::Numeric(numeric) => dictionary.encode_value(numeric),
                    RepresentationValue::Enumerated(_) => None,
                })
                .map(|encoded| IsoDataLogValue {
                    process_data_ddi: Some(encoded.ddi),
                    process_data_value: Some(encoded.raw),
                    device_element_id_ref: None,
                })
                .collect::<Vec<_>>();

            if data_log_values.len() < stamped.values.len() {
                debug!(
                    "Omitted {} summary values without a DDI",
                    stamped.values.len() - data_log_values.len()
                );
            }

            IsoTime {
                start: stamp.time_stamp1,
                stop: stamp.time_stamp2,
                duration: stamp.duration.map(|d| d.num_seconds()),
                time_type: Some(time_type),
                data_log_values,
            }
        })
        .collect()
}
