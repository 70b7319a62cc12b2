//! Conversion session
//!
//! A session owns everything that must stay consistent across the calls of
//! one conversion: the identifier map, the quantity dictionary, the task
//! mapper and the statistics. Whole documents are imported and exported here;
//! the task mapper handles individual tasks.

use crate::Result;
use crate::app::models::canonical::DataModel;
use crate::app::models::document::{IsoTask, IsoTaskData};
use crate::app::services::collaborators::MappingContext;
use crate::app::services::identifier_map::{IdentifierLink, IdentifierMap};
use crate::app::services::quantity_dictionary::QuantityDictionary;
use crate::app::services::task_mapper::{MappingStats, TaskMapper};
use crate::config::ConversionConfig;
use crate::constants::{id_prefixes, is_valid_document_id};
use tracing::{debug, info};

pub mod bundle;

#[cfg(test)]
pub mod tests;

pub use bundle::ConversionBundle;

/// How a document task is imported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Planned or prescribed work, imported as a work item
    WorkOrder,
    /// Executed work, imported as logged data
    LoggedRecord,
}

impl TaskKind {
    /// Classify a task
    ///
    /// Tasks with time logs or effective time are logged records even when
    /// they also carry a prescription. Of the rest, planned, template and
    /// prescribed tasks are work orders and anything else is a logged record.
    pub fn of(task: &IsoTask) -> Self {
        if task.is_logged_record() {
            Self::LoggedRecord
        } else if task.is_work_order() {
            Self::WorkOrder
        } else {
            Self::LoggedRecord
        }
    }
}

/// State shared by every import and export of one conversion
#[derive(Debug)]
pub struct ConversionSession {
    config: ConversionConfig,
    ids: IdentifierMap,
    dictionary: QuantityDictionary,
    task_mapper: TaskMapper,
    stats: MappingStats,
}

impl ConversionSession {
    /// Create a session, loading the DDI export named by the configuration
    pub fn new(config: ConversionConfig) -> Result<Self> {
        let dictionary = match &config.ddi_export_path {
            Some(path) => QuantityDictionary::load_ddi_export(path)?,
            None => QuantityDictionary::builtin(),
        };
        Self::with_dictionary(config, dictionary)
    }

    /// Create a session with an explicit dictionary
    pub fn with_dictionary(
        config: ConversionConfig,
        dictionary: QuantityDictionary,
    ) -> Result<Self> {
        config.validate()?;
        debug!(
            "Starting conversion session with {} DDI definitions",
            dictionary.len()
        );

        Ok(Self {
            config,
            ids: IdentifierMap::new(),
            dictionary,
            task_mapper: TaskMapper::new(),
            stats: MappingStats::new(),
        })
    }

    /// Replace the task mapper, e.g. to plug in custom collaborators
    pub fn with_task_mapper(mut self, task_mapper: TaskMapper) -> Self {
        self.task_mapper = task_mapper;
        self
    }

    /// Register identifier pairs carried over from an earlier session
    pub fn seed_links(&self, links: &[IdentifierLink]) -> Result<()> {
        self.ids.seed(links)?;
        debug!("Seeded {} identifier links", links.len());
        Ok(())
    }

    /// Every identifier pair registered so far
    pub fn links(&self) -> Vec<IdentifierLink> {
        self.ids.links()
    }

    /// Registered pairs of catalog entities
    ///
    /// Task, time log and grid ids belong to one document. Carrying them into a
    /// later session would make importing that same document conflict with the
    /// records it was exported from.
    pub fn catalog_links(&self) -> Vec<IdentifierLink> {
        let document_prefixes = [
            self.config.task_id_prefix.as_str(),
            id_prefixes::TIME_LOG,
            id_prefixes::GRID,
        ];
        self.ids
            .links()
            .into_iter()
            .filter(|link| {
                !document_prefixes
                    .iter()
                    .any(|prefix| is_valid_document_id(&link.external, prefix))
            })
            .collect()
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn ids(&self) -> &IdentifierMap {
        &self.ids
    }

    pub fn dictionary(&self) -> &QuantityDictionary {
        &self.dictionary
    }

    pub fn stats(&self) -> &MappingStats {
        &self.stats
    }

    /// Services handed to every mapping call
    pub fn context(&self) -> MappingContext<'_> {
        MappingContext::new(&self.ids, &self.dictionary, &self.config)
    }

    /// Import every task of a document into the model
    ///
    /// Work items and logged data are appended to the model documents in
    /// document order. Entities created along the way (person roles,
    /// prescriptions, summaries...) are added to the model by the task mapper.
    pub fn import_task_data(
        &mut self,
        model: &mut DataModel,
        task_data: &IsoTaskData,
    ) -> Result<()> {
        self.ids.reserve_internal(model.reference_ids());

        let (work_orders, logged): (Vec<IsoTask>, Vec<IsoTask>) = task_data
            .tasks
            .iter()
            .cloned()
            .partition(|task| TaskKind::of(task) == TaskKind::WorkOrder);
        debug!(
            "Classified {} work orders and {} logged records",
            work_orders.len(),
            logged.len()
        );

        let ctx = MappingContext::new(&self.ids, &self.dictionary, &self.config);
        let work_items = self
            .task_mapper
            .import_work_items(&ctx, model, &work_orders, &mut self.stats)?;
        let records = self
            .task_mapper
            .import_logged_data(&ctx, model, &logged, &mut self.stats)?;

        model.documents.work_items.extend(work_items);
        model.documents.logged_data.extend(records);

        info!(
            "Imported {} tasks ({} degraded stages)",
            task_data.tasks.len(),
            self.stats.degraded_stages
        );
        Ok(())
    }

    /// Export every work item and logged data record of the model
    ///
    /// Tasks for work items come first, followed by one task per logged data
    /// record.
    pub fn export_task_data(&mut self, model: &DataModel) -> Result<IsoTaskData> {
        self.ids.reserve_internal(model.reference_ids());

        let ctx = MappingContext::new(&self.ids, &self.dictionary, &self.config);
        let mut tasks = self.task_mapper.export_work_items(
            &ctx,
            model,
            &model.documents.work_items,
            &mut self.stats,
        )?;
        tasks.extend(self.task_mapper.export_logged_data(
            &ctx,
            model,
            &model.documents.logged_data,
            &mut self.stats,
        )?);

        info!("Exported {} tasks", tasks.len());
        Ok(IsoTaskData { tasks })
    }
}
