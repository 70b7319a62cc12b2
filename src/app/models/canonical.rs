//! Canonical agricultural operations model
//!
//! The catalog is an arena of entities addressed by numeric reference ids.
//! Work items and logged data reference catalog entities by id only; the
//! lists that own those entities live in [`Catalog`] and [`Documents`].

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Numeric canonical reference identifier
pub type ReferenceId = i32;

// =============================================================================
// Identifiers
// =============================================================================

/// Reference id plus the external unique ids known for an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundIdentifier {
    /// Session-local reference id
    pub reference_id: ReferenceId,

    /// Identifiers of the same entity in external systems
    #[serde(default)]
    pub unique_ids: Vec<UniqueId>,
}

impl CompoundIdentifier {
    /// Create an identifier with no unique ids
    pub fn new(reference_id: ReferenceId) -> Self {
        Self {
            reference_id,
            unique_ids: Vec::new(),
        }
    }

    /// Find the unique id recorded for the given source
    pub fn find_unique_id(&self, source: &str) -> Option<&str> {
        self.unique_ids
            .iter()
            .find(|unique_id| unique_id.source == source)
            .map(|unique_id| unique_id.id.as_str())
    }
}

/// Identifier of an entity in an external system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueId {
    pub id: String,
    pub source: String,
}

// =============================================================================
// Data Model Root
// =============================================================================

/// Canonical data model: catalog entities plus operational documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub documents: Documents,
}

impl DataModel {
    /// Every reference id used by an entity of the model
    pub fn reference_ids(&self) -> Vec<ReferenceId> {
        let catalog = &self.catalog;
        let documents = &self.documents;

        let mut ids = Vec::new();
        ids.extend(catalog.growers.iter().map(|e| e.id.reference_id));
        ids.extend(catalog.farms.iter().map(|e| e.id.reference_id));
        ids.extend(catalog.fields.iter().map(|e| e.id.reference_id));
        ids.extend(catalog.crop_zones.iter().map(|e| e.id.reference_id));
        ids.extend(catalog.persons.iter().map(|e| e.id.reference_id));
        ids.extend(catalog.person_roles.iter().map(|e| e.id.reference_id));
        ids.extend(catalog.prescriptions.iter().map(|e| e.id.reference_id));
        ids.extend(documents.work_items.iter().map(|e| e.id.reference_id));
        ids.extend(documents.work_item_operations.iter().map(|e| e.id.reference_id));
        ids.extend(documents.summaries.iter().map(|e| e.id.reference_id));
        ids.extend(documents.guidance_allocations.iter().map(|e| e.id.reference_id));
        for record in &documents.logged_data {
            ids.push(record.id.reference_id);
            ids.extend(record.operation_data.iter().map(|e| e.id.reference_id));
        }
        ids
    }
}

/// Reference entities shared by work items and logged data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub growers: Vec<Grower>,
    pub farms: Vec<Farm>,
    pub fields: Vec<Field>,
    pub crop_zones: Vec<CropZone>,
    pub persons: Vec<Person>,
    pub person_roles: Vec<PersonRole>,
    pub prescriptions: Vec<Prescription>,
}

impl Catalog {
    /// Whether a crop zone with this reference id exists
    pub fn has_crop_zone(&self, id: ReferenceId) -> bool {
        self.crop_zones.iter().any(|c| c.id.reference_id == id)
    }

    /// Find a person role by reference id
    pub fn person_role(&self, id: ReferenceId) -> Option<&PersonRole> {
        self.person_roles.iter().find(|p| p.id.reference_id == id)
    }

    /// Find a prescription by reference id
    pub fn prescription(&self, id: ReferenceId) -> Option<&Prescription> {
        self.prescriptions.iter().find(|p| p.id.reference_id == id)
    }
}

/// Operational records and the document-scoped entities they reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Documents {
    pub work_items: Vec<WorkItem>,
    pub work_item_operations: Vec<WorkItemOperation>,
    pub logged_data: Vec<LoggedData>,
    pub summaries: Vec<Summary>,
    pub guidance_allocations: Vec<GuidanceAllocation>,
}

impl Documents {
    /// Find a work item operation by reference id
    pub fn work_item_operation(&self, id: ReferenceId) -> Option<&WorkItemOperation> {
        self.work_item_operations
            .iter()
            .find(|o| o.id.reference_id == id)
    }

    /// Find a summary by reference id
    pub fn summary(&self, id: ReferenceId) -> Option<&Summary> {
        self.summaries.iter().find(|s| s.id.reference_id == id)
    }

    /// Find a guidance allocation by reference id
    pub fn guidance_allocation(&self, id: ReferenceId) -> Option<&GuidanceAllocation> {
        self.guidance_allocations
            .iter()
            .find(|g| g.id.reference_id == id)
    }
}

// =============================================================================
// Catalog Entities
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grower {
    pub id: CompoundIdentifier,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: CompoundIdentifier,
    pub description: String,
    #[serde(default)]
    pub grower_id: Option<ReferenceId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: CompoundIdentifier,
    pub description: String,
    #[serde(default)]
    pub farm_id: Option<ReferenceId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropZone {
    pub id: CompoundIdentifier,
    pub description: String,
    pub field_id: ReferenceId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: CompoundIdentifier,
    pub last_name: String,
}

/// A person acting in a role on a work item or logged data record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRole {
    pub id: CompoundIdentifier,
    pub person_id: ReferenceId,
    #[serde(default)]
    pub time_scopes: Vec<TimeScope>,
}

/// Association of a guidance group with an operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceAllocation {
    pub id: CompoundIdentifier,
    pub guidance_group_id: ReferenceId,
    #[serde(default)]
    pub time_scopes: Vec<TimeScope>,
}

/// Zone-based rate prescription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: CompoundIdentifier,
    pub description: String,
    #[serde(default)]
    pub field_id: Option<ReferenceId>,
    #[serde(default)]
    pub crop_zone_id: Option<ReferenceId>,
    /// Rates per treatment zone
    #[serde(default)]
    pub rates: Vec<PrescriptionRate>,
    /// Raster layout when the prescription is delivered as a grid
    #[serde(default)]
    pub grid: Option<GridDefinition>,
}

/// One prescribed rate inside a treatment zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionRate {
    pub zone_code: u8,
    #[serde(default)]
    pub zone_name: Option<String>,
    pub rate: NumericRepresentationValue,
}

/// Raster layout of a gridded prescription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridDefinition {
    pub minimum_north: f64,
    pub minimum_east: f64,
    pub cell_north_size: f64,
    pub cell_east_size: f64,
    pub columns: u32,
    pub rows: u32,
}

// =============================================================================
// Work Items
// =============================================================================

/// Planned unit of work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkItem {
    pub id: CompoundIdentifier,
    pub description: Option<String>,
    pub grower_id: Option<ReferenceId>,
    pub farm_id: Option<ReferenceId>,
    pub field_id: Option<ReferenceId>,
    pub crop_zone_id: Option<ReferenceId>,
    pub status_updates: Vec<StatusUpdate>,
    pub people_role_ids: Vec<ReferenceId>,
    pub guidance_allocation_ids: Vec<ReferenceId>,
    pub work_item_operation_ids: Vec<ReferenceId>,
}

/// Operation planned inside a work item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItemOperation {
    pub id: CompoundIdentifier,
    #[serde(default)]
    pub prescription_id: Option<ReferenceId>,
}

/// Status snapshot of a work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: WorkStatus,
    #[serde(default)]
    pub time_stamp: Option<DateTime<Utc>>,
}

/// Canonical work status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkStatus {
    Scheduled,
    InProgress,
    Paused,
    Completed,
    Cancelled,
}

// =============================================================================
// Logged Data
// =============================================================================

/// Record of completed field work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggedData {
    pub id: CompoundIdentifier,
    pub description: Option<String>,
    pub grower_id: Option<ReferenceId>,
    pub farm_id: Option<ReferenceId>,
    pub field_id: Option<ReferenceId>,
    pub crop_zone_id: Option<ReferenceId>,
    pub summary_id: Option<ReferenceId>,
    pub person_role_ids: Vec<ReferenceId>,
    pub guidance_allocation_ids: Vec<ReferenceId>,
    pub notes: Vec<Note>,
    pub operation_data: Vec<OperationData>,
}

/// Free or coded comment attached to a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub description: Option<String>,
    pub coded_comment_id: Option<ReferenceId>,
    pub coded_value_id: Option<ReferenceId>,
    pub time_stamp: Option<TimeScope>,
}

/// Handle to one machine time series; the samples themselves are owned by the
/// time log collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationData {
    pub id: CompoundIdentifier,
    pub time_log_name: Option<String>,
    pub max_depth: u32,
    pub spatial_record_count: u64,
}

// =============================================================================
// Summaries
// =============================================================================

/// Aggregated totals for a logged data record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: CompoundIdentifier,
    #[serde(default)]
    pub summary_data: Vec<StampedMeteredValues>,
}

/// Values metered over one time scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampedMeteredValues {
    pub stamp: TimeScope,
    #[serde(default)]
    pub values: Vec<MeteredValue>,
}

/// Time interval with a context describing what the stamps mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeScope {
    #[serde(default)]
    pub time_stamp1: Option<DateTime<Utc>>,
    #[serde(default)]
    pub time_stamp2: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_duration_seconds")]
    pub duration: Option<TimeDelta>,
    pub date_context: DateContext,
}

/// Serializes time scope durations as whole seconds
mod optional_duration_seconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<TimeDelta>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&duration.num_seconds()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<TimeDelta>, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?.and_then(TimeDelta::try_seconds))
    }
}

/// Meaning of a time scope's first stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateContext {
    ProposedStart,
    ActualStart,
    Unspecified,
}

/// A single decoded physical quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteredValue {
    pub value: RepresentationValue,
}

/// Representation value, tagged by representation kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RepresentationValue {
    Numeric(NumericRepresentationValue),
    Enumerated(EnumeratedValue),
}

/// Scaled numeric quantity with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRepresentationValue {
    pub representation: Representation,
    pub unit: String,
    pub value: f64,
}

/// Enumerated quantity (state, mode)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumeratedValue {
    pub representation: Representation,
    pub value: String,
}

/// Describes which quantity a value represents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Representation {
    /// Canonical representation code (e.g. `vrTotalAreaCovered`) or a raw
    /// 4-digit DDI code
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl Representation {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: String::new(),
        }
    }
}
