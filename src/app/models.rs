//! Data models for TaskData conversion
//!
//! This module contains the two object graphs the mapper converts between:
//! - [`document`] - parsed ISO 11783-10 TaskData elements (tasks, times, allocations)
//! - [`canonical`] - the canonical agricultural operations model (catalog and documents)
//!
//! Both graphs are plain data. Cross references inside the canonical model are
//! reference ids resolved through the catalog; cross references inside the
//! document are string identifiers.

pub mod canonical;
pub mod document;
