//! Application constants for the TaskData mapper
//!
//! This module contains identifier prefixes, DDI codes, document enumeration
//! codes and the small helpers used throughout the mapper.

// =============================================================================
// Document Identifier Prefixes
// =============================================================================

/// ISO 11783-10 element prefixes used when generating document identifiers
pub mod id_prefixes {
    /// Task (TSK)
    pub const TASK: &str = "TSK";

    /// Customer (CTR), the document counterpart of a grower
    pub const CUSTOMER: &str = "CTR";

    /// Farm (FRM)
    pub const FARM: &str = "FRM";

    /// Partfield (PFD), the document counterpart of a field or crop zone
    pub const PARTFIELD: &str = "PFD";

    /// Worker (WKR)
    pub const WORKER: &str = "WKR";

    /// Guidance group (GGP)
    pub const GUIDANCE_GROUP: &str = "GGP";

    /// Coded comment (CCT)
    pub const CODED_COMMENT: &str = "CCT";

    /// Coded comment list value (CCL)
    pub const CODED_COMMENT_VALUE: &str = "CCL";

    /// Time log file names (TLG)
    pub const TIME_LOG: &str = "TLG";

    /// Grid binary file names (GRD)
    pub const GRID: &str = "GRD";
}

/// Default unique-id source recorded on canonical entities imported from TaskData
pub const DEFAULT_ISO_ID_SOURCE: &str = "http://dictionary.isobus.net/isobus/";

/// Designator prefix for exported logged data tasks without a description
pub const LOGGED_DATA_DESIGNATOR_PREFIX: &str = "Logged Data";

/// Relative floating-point tolerance used when snapping scaled values to integers
pub const SCALE_SNAP_TOLERANCE: f64 = 1e-9;

/// Number of characters in a textual DDI code
pub const DDI_CODE_LENGTH: usize = 4;

// =============================================================================
// CLI Defaults
// =============================================================================

/// Extension of the bundle written by the import command
pub const IMPORTED_BUNDLE_EXTENSION: &str = "imported.json";

/// Extension of the bundle written by the export command
pub const EXPORTED_BUNDLE_EXTENSION: &str = "exported.json";

// =============================================================================
// Document Enumeration Codes
// =============================================================================

/// TSK.G task status codes
pub mod task_status {
    pub const PLANNED: u8 = 1;
    pub const RUNNING: u8 = 2;
    pub const PAUSED: u8 = 3;
    pub const COMPLETED: u8 = 4;
    pub const TEMPLATE: u8 = 5;
    pub const CANCELED: u8 = 6;
}

/// TIM.D time type codes
pub mod time_type {
    pub const PLANNED: u8 = 1;
    pub const PRELIMINARY: u8 = 2;
    pub const EFFECTIVE: u8 = 4;
    pub const INEFFECTIVE: u8 = 5;
    pub const REPAIR: u8 = 6;
    pub const CLEARING: u8 = 7;
    pub const POWERED_DOWN: u8 = 8;
}

/// TLG.D time log type code for binary time logs
pub const TIME_LOG_TYPE_BINARY: u8 = 1;

/// GRD.I grid type codes
pub mod grid_type {
    /// Grid cells carry a treatment zone code
    pub const TYPE_1: u8 = 1;

    /// Grid cells carry process data values directly
    pub const TYPE_2: u8 = 2;
}

// =============================================================================
// Data Dictionary Identifiers
// =============================================================================

/// Well-known ISO 11783-11 data dictionary identifiers
pub mod ddi {
    pub const SETPOINT_VOLUME_PER_AREA_RATE: u16 = 0x0001;
    pub const ACTUAL_VOLUME_PER_AREA_RATE: u16 = 0x0002;
    pub const SETPOINT_MASS_PER_AREA_RATE: u16 = 0x0006;
    pub const ACTUAL_MASS_PER_AREA_RATE: u16 = 0x0007;
    pub const ACTUAL_WORKING_WIDTH: u16 = 0x0043;
    pub const TOTAL_VOLUME: u16 = 0x0048;
    pub const TOTAL_MASS: u16 = 0x0050;
    pub const TOTAL_AREA: u16 = 0x0074;
    pub const EFFECTIVE_TOTAL_DISTANCE: u16 = 0x0075;
    pub const INEFFECTIVE_TOTAL_DISTANCE: u16 = 0x0076;
    pub const EFFECTIVE_TOTAL_TIME: u16 = 0x0077;
    pub const INEFFECTIVE_TOTAL_TIME: u16 = 0x0078;
    pub const ACTUAL_WORK_STATE: u16 = 0x008D;
    pub const TOTAL_FUEL_CONSUMPTION: u16 = 0x0094;
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Format a DDI as its 4-digit uppercase hexadecimal document form
pub fn format_ddi(ddi: u16) -> String {
    format!("{:04X}", ddi)
}

/// Parse a 4-digit hexadecimal DDI code (case-insensitive)
pub fn parse_ddi(code: &str) -> Option<u16> {
    let trimmed = code.trim();
    if trimmed.len() != DDI_CODE_LENGTH || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(trimmed, 16).ok()
}

/// Check whether a document identifier is well formed for the given prefix
///
/// ISO identifiers are the element prefix followed by an integer, which may be
/// negative for identifiers minted by tools that do not own the data.
pub fn is_valid_document_id(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .map(|rest| !rest.is_empty() && rest.parse::<i64>().is_ok())
        .unwrap_or(false)
}

/// Build the designator used for a logged data task that has no description
pub fn logged_data_designator(reference_id: i32) -> String {
    format!("{} {}", LOGGED_DATA_DESIGNATOR_PREFIX, reference_id)
}
