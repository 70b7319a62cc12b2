//! Parsed ISO 11783-10 TaskData elements
//!
//! These structures mirror the subset of the TaskData XML tree the task mapper
//! consumes and produces. XML parsing and serialization live outside this crate;
//! the element tree arrives already materialized as these records.

use crate::constants::{task_status, time_type};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Task Data Root
// =============================================================================

/// Root TaskData document (TASKDATA.XML) restricted to its task elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoTaskData {
    /// Task elements in document order
    #[serde(default)]
    pub tasks: Vec<IsoTask>,
}

// =============================================================================
// Task (TSK)
// =============================================================================

/// Task element (TSK) with its nested child elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoTask {
    /// TSK.A task identifier
    pub task_id: String,

    /// TSK.B task designator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_designator: Option<String>,

    /// TSK.C customer reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id_ref: Option<String>,

    /// TSK.D farm reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_id_ref: Option<String>,

    /// TSK.E partfield reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partfield_id_ref: Option<String>,

    /// TSK.F responsible worker reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_worker_id_ref: Option<String>,

    /// TSK.G task status
    pub task_status: IsoTaskStatus,

    /// TSK.H default treatment zone code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_treatment_zone_code: Option<u8>,

    /// TIM children
    #[serde(default)]
    pub times: Vec<IsoTime>,

    /// TLG children
    #[serde(default)]
    pub time_logs: Vec<IsoTimeLog>,

    /// CAN children
    #[serde(default)]
    pub comment_allocations: Vec<IsoCommentAllocation>,

    /// WAN children
    #[serde(default)]
    pub worker_allocations: Vec<IsoWorkerAllocation>,

    /// GAN children
    #[serde(default)]
    pub guidance_allocations: Vec<IsoGuidanceAllocation>,

    /// TZN children
    #[serde(default)]
    pub treatment_zones: Vec<IsoTreatmentZone>,

    /// GRD child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<IsoGrid>,
}

impl IsoTask {
    /// Create an empty task with the given identifier and status
    pub fn new(task_id: impl Into<String>, task_status: IsoTaskStatus) -> Self {
        Self {
            task_id: task_id.into(),
            task_status,
            ..Default::default()
        }
    }

    /// A task carries a prescription when it has a grid or treatment zones
    pub fn has_prescription(&self) -> bool {
        self.grid.is_some() || !self.treatment_zones.is_empty()
    }

    /// A task describes planned work when it carries a prescription or is
    /// still in a planning status
    pub fn is_work_order(&self) -> bool {
        self.has_prescription()
            || matches!(
                self.task_status,
                IsoTaskStatus::Planned | IsoTaskStatus::Template
            )
    }

    /// A task describes logged work when it references time logs or
    /// records effective time
    pub fn is_logged_record(&self) -> bool {
        !self.time_logs.is_empty()
            || self
                .times
                .iter()
                .any(|time| time.time_type == Some(IsoTimeType::Effective))
    }
}

/// TSK.G task status
///
/// Serialized as its numeric document code. Codes outside the ISO 11783-10
/// range are preserved as [`IsoTaskStatus::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum IsoTaskStatus {
    #[default]
    Planned,
    Running,
    Paused,
    Completed,
    Template,
    Canceled,
    Unknown(u8),
}

impl From<u8> for IsoTaskStatus {
    fn from(code: u8) -> Self {
        match code {
            task_status::PLANNED => Self::Planned,
            task_status::RUNNING => Self::Running,
            task_status::PAUSED => Self::Paused,
            task_status::COMPLETED => Self::Completed,
            task_status::TEMPLATE => Self::Template,
            task_status::CANCELED => Self::Canceled,
            other => Self::Unknown(other),
        }
    }
}

impl From<IsoTaskStatus> for u8 {
    fn from(status: IsoTaskStatus) -> Self {
        match status {
            IsoTaskStatus::Planned => task_status::PLANNED,
            IsoTaskStatus::Running => task_status::RUNNING,
            IsoTaskStatus::Paused => task_status::PAUSED,
            IsoTaskStatus::Completed => task_status::COMPLETED,
            IsoTaskStatus::Template => task_status::TEMPLATE,
            IsoTaskStatus::Canceled => task_status::CANCELED,
            IsoTaskStatus::Unknown(code) => code,
        }
    }
}

// =============================================================================
// Time (TIM) and Data Log Value (DLV)
// =============================================================================

/// Time element (TIM)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoTime {
    /// TIM.A start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    /// TIM.B stop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<DateTime<Utc>>,

    /// TIM.C duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    /// TIM.D type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_type: Option<IsoTimeType>,

    /// DLV children
    #[serde(default)]
    pub data_log_values: Vec<IsoDataLogValue>,
}

/// TIM.D time type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum IsoTimeType {
    Planned,
    Preliminary,
    Effective,
    Ineffective,
    Repair,
    Clearing,
    PoweredDown,
    Unknown(u8),
}

impl From<u8> for IsoTimeType {
    fn from(code: u8) -> Self {
        match code {
            time_type::PLANNED => Self::Planned,
            time_type::PRELIMINARY => Self::Preliminary,
            time_type::EFFECTIVE => Self::Effective,
            time_type::INEFFECTIVE => Self::Ineffective,
            time_type::REPAIR => Self::Repair,
            time_type::CLEARING => Self::Clearing,
            time_type::POWERED_DOWN => Self::PoweredDown,
            other => Self::Unknown(other),
        }
    }
}

impl From<IsoTimeType> for u8 {
    fn from(time_type: IsoTimeType) -> Self {
        match time_type {
            IsoTimeType::Planned => time_type::PLANNED,
            IsoTimeType::Preliminary => time_type::PRELIMINARY,
            IsoTimeType::Effective => time_type::EFFECTIVE,
            IsoTimeType::Ineffective => time_type::INEFFECTIVE,
            IsoTimeType::Repair => time_type::REPAIR,
            IsoTimeType::Clearing => time_type::CLEARING,
            IsoTimeType::PoweredDown => time_type::POWERED_DOWN,
            IsoTimeType::Unknown(code) => code,
        }
    }
}

/// Data log value element (DLV)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoDataLogValue {
    /// DLV.A process data DDI as 4 hexadecimal digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_data_ddi: Option<String>,

    /// DLV.B raw process data value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_data_value: Option<i64>,

    /// DLV.C device element reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_element_id_ref: Option<String>,
}

// =============================================================================
// Time Log (TLG)
// =============================================================================

/// Time log element (TLG) referencing a binary TLG file pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoTimeLog {
    /// TLG.A file name without extension
    pub filename: String,

    /// TLG.B file length in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filelength: Option<u64>,

    /// TLG.C time log type
    pub time_log_type: u8,
}

// =============================================================================
// Allocations (ASP, CAN, WAN, GAN)
// =============================================================================

/// Allocation stamp element (ASP)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoAllocationStamp {
    /// ASP.A start
    pub start: Option<DateTime<Utc>>,

    /// ASP.B stop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<DateTime<Utc>>,

    /// ASP.C duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

/// Comment allocation element (CAN)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoCommentAllocation {
    /// CAN.A coded comment reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coded_comment_id_ref: Option<String>,

    /// CAN.B coded comment list value reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coded_comment_list_value_id_ref: Option<String>,

    /// CAN.C free comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_comment_text: Option<String>,

    /// ASP child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_stamp: Option<IsoAllocationStamp>,
}

/// Worker allocation element (WAN)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoWorkerAllocation {
    /// WAN.A worker reference
    pub worker_id_ref: String,

    /// ASP child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_stamp: Option<IsoAllocationStamp>,
}

/// Guidance allocation element (GAN)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoGuidanceAllocation {
    /// GAN.A guidance group reference
    pub guidance_group_id_ref: String,

    /// ASP child
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_stamp: Option<IsoAllocationStamp>,
}

// =============================================================================
// Prescription Content (TZN, PDV, GRD)
// =============================================================================

/// Treatment zone element (TZN)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoTreatmentZone {
    /// TZN.A treatment zone code
    pub code: u8,

    /// TZN.B designator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designator: Option<String>,

    /// PDV children
    #[serde(default)]
    pub process_data_variables: Vec<IsoProcessDataVariable>,
}

/// Process data variable element (PDV)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoProcessDataVariable {
    /// PDV.A process data DDI as 4 hexadecimal digits
    pub process_data_ddi: String,

    /// PDV.B raw process data value
    pub process_data_value: i64,
}

/// Grid element (GRD); the binary cell file itself is out of scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsoGrid {
    /// GRD.A minimum north position
    pub minimum_north: f64,

    /// GRD.B minimum east position
    pub minimum_east: f64,

    /// GRD.C cell north size in degrees
    pub cell_north_size: f64,

    /// GRD.D cell east size in degrees
    pub cell_east_size: f64,

    /// GRD.E maximum column
    pub maximum_column: u32,

    /// GRD.F maximum row
    pub maximum_row: u32,

    /// GRD.G binary file name
    pub filename: String,

    /// GRD.I grid type
    pub grid_type: u8,

    /// GRD.J treatment zone code for type 2 grids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_zone_code: Option<u8>,
}
