//! Time log references (TLG) <-> operation data
//!
//! Only the references are mapped here. The binary TLG/XML file pairs stay
//! in the TaskData storage folder and are decoded elsewhere.

use super::{MappingContext, TimeLogMapper};
use crate::Result;
use crate::app::models::canonical::OperationData;
use crate::app::models::document::IsoTimeLog;
use crate::constants::{TIME_LOG_TYPE_BINARY, id_prefixes};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTimeLogMapper;

impl TimeLogMapper for DefaultTimeLogMapper {
    fn export_time_logs(
        &self,
        ctx: &MappingContext<'_>,
        operation_data: &[OperationData],
        storage_path: &Path,
    ) -> Result<Vec<IsoTimeLog>> {
        let mut time_logs = Vec::with_capacity(operation_data.len());

        for operation in operation_data {
            let filename = ctx.document_id(
                operation.id.reference_id,
                operation.time_log_name.as_deref(),
                id_prefixes::TIME_LOG,
            )?;

            let binary = storage_path.join(format!("{}.bin", filename));
            let filelength = std::fs::metadata(&binary).ok().map(|m| m.len());
            if filelength.is_none() {
                debug!("No binary log at {}", binary.display());
            }

            time_logs.push(IsoTimeLog {
                filename,
                filelength,
                time_log_type: TIME_LOG_TYPE_BINARY,
            });
        }

        Ok(time_logs)
    }

    fn import_time_logs(
        &self,
        ctx: &MappingContext<'_>,
        time_logs: &[IsoTimeLog],
    ) -> Result<Vec<OperationData>> {
        let mut operation_data = Vec::with_capacity(time_logs.len());

        for time_log in time_logs {
            if time_log.time_log_type != TIME_LOG_TYPE_BINARY {
                warn!(
                    "Skipping time log {} of unsupported type {}",
                    time_log.filename, time_log.time_log_type
                );
                continue;
            }

            operation_data.push(OperationData {
                id: ctx.import_id(&time_log.filename)?,
                time_log_name: Some(time_log.filename.clone()),
                max_depth: 0,
                spatial_record_count: 0,
            });
        }

        Ok(operation_data)
    }
}
