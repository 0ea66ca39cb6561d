pub mod catalog;
pub mod domain;
pub mod error;
pub mod reconcile;
pub mod resolver;
pub mod scanner;

use std::path::Path;

use tracing::info;

use catalog::Catalog;
use domain::*;
use error::{Error, Result};

/// The main entry point: reconciles a Shotwell catalog whose RAW files were deleted.
pub struct Uncoupler {
    catalog: Catalog,
    config: ReconcileConfig,
}

impl Uncoupler {
    /// Open an existing catalog with the default configuration.
    pub fn open(catalog_path: &Path) -> Result<Self> {
        let catalog = Catalog::open(catalog_path)?;
        Ok(Self::with_catalog(catalog))
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: ReconcileConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReconcileConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Switch every photo under `prefixes` whose RAW file is gone to its backing file.
    ///
    /// All prefixes are processed in one transaction which is committed, or rolled
    /// back in [`RunMode::Simulate`], only after the last prefix. Any error aborts
    /// the run with nothing written.
    pub fn run(&mut self, prefixes: &[String], mode: RunMode) -> Result<ReconcileReport> {
        if prefixes.is_empty() {
            return Err(Error::NoPrefixes);
        }

        let mut uow = self.catalog.begin()?;
        let mut report = ReconcileReport::new(mode);
        for prefix in prefixes {
            reconcile::reconcile_prefix(&mut uow, prefix, &self.config, &mut report)?;
        }
        uow.finish(mode)?;

        info!(
            missing = report.missing,
            switched = report.promoted.len(),
            unresolved = report.unresolved.len(),
            committed = report.committed(),
            "run finished"
        );
        Ok(report)
    }
}
