//! Time entries -> stamped metered values

use crate::app::models::canonical::{
    DateContext, MeteredValue, RepresentationValue, StampedMeteredValues, TimeScope,
};
use crate::app::models::document::{IsoTime, IsoTimeType};
use crate::app::services::quantity_dictionary::QuantityDictionary;
use chrono::TimeDelta;
use tracing::{debug, warn};

/// Whether a time entry has the start, stop-or-duration and type needed to
/// contribute to a summary
pub fn is_summary_candidate(time: &IsoTime) -> bool {
    time.start.is_some()
        && (time.stop.is_some() || time.duration.is_some())
        && time.time_type.is_some()
}

/// Build the stamped value sets of a summary from a task's time entries
///
/// Entries lacking a start, a stop or duration, or a type are skipped. Returns
/// `None` when no entry qualifies or when any data log value of a qualifying
/// entry cannot be decoded.
pub fn import_summary_data(
    times: &[IsoTime],
    dictionary: &QuantityDictionary,
) -> Option<Vec<StampedMeteredValues>> {
    let mut stamped = Vec::new();

    for time in times.iter().filter(|t| is_summary_candidate(t)) {
        let Some(stamp) = time_scope(time) else {
            debug!("Skipping time entry with unrepresentable interval");
            continue;
        };

        let mut values = Vec::with_capacity(time.data_log_values.len());
        for dlv in &time.data_log_values {
            let Some(code) = dlv.process_data_ddi.as_deref() else {
                warn!("Discarding summary: data log value without DDI");
                return None;
            };

            let raw = dlv.process_data_value.unwrap_or(0);
            let Some(value) = dictionary.decode_value(code, raw) else {
                warn!("Discarding summary: DDI '{}' cannot be decoded", code);
                return None;
            };

            values.push(MeteredValue {
                value: RepresentationValue::Numeric(value),
            });
        }

        stamped.push(StampedMeteredValues { stamp, values });
    }

    if stamped.is_empty() {
        return None;
    }

    debug!("Imported {} stamped value sets", stamped.len());
    Some(stamped)
}

fn time_scope(time: &IsoTime) -> Option<TimeScope> {
    let start = time.start?;
    let stop = match (time.stop, time.duration) {
        (Some(stop), _) => stop,
        (None, Some(seconds)) => start.checked_add_signed(TimeDelta::try_seconds(seconds)?)?,
        (None, None) => return None,
    };

    let date_context = match time.time_type {
        Some(IsoTimeType::Planned) => DateContext::ProposedStart,
        _ => DateContext::ActualStart,
    };

    Some(TimeScope {
        time_stamp1: Some(start),
        time_stamp2: Some(stop),
        duration: Some(stop - start),
        date_context,
    })
}
