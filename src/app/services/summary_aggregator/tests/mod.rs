//! Shared test utilities and fixtures for summary aggregation tests

use crate::app::models::document::{IsoDataLogValue, IsoTime, IsoTimeType};
use crate::app::services::quantity_dictionary::QuantityDictionary;
use chrono::{DateTime, TimeZone, Utc};


/// Fixed start time used by the fixtures
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 8, 0, 0).unwrap()
}

/// Data log value with a DDI code and raw value
pub fn dlv(code: &str, raw: i64) -> IsoDataLogValue {
    IsoDataLogValue {
        process_data_ddi: Some(code.to_string()),
        process_data_value: Some(raw),
        device_element_id_ref: None,
    }
}

/// Effective time entry lasting one hour
pub fn effective_time(values: Vec<IsoDataLogValue>) -> IsoTime {
    IsoTime {
        start: Some(start_time()),
        stop: Some(start_time() + chrono::TimeDelta::hours(1)),
        duration: None,
        time_type: Some(IsoTimeType::Effective),
        data_log_values: values,
    }
}

pub fn dictionary() -> QuantityDictionary {
    QuantityDictionary::builtin()
}
