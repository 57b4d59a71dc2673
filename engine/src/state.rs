//! Engine state management
//!
//! The state is built once at startup and shared by every caller. Factor
//! tables are immutable after creation. The achievement engine sits behind a
//! lock holding an `Arc`, so a catalog reload swaps in a fully validated
//! engine while readers keep whichever one they already hold.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use carbon_tracker_shared::{
    AchievementEngine, BadgeCatalog, FactorSet, FactorTable, LocationKey, PredicateRegistry,
};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::loader::{load_catalog, load_factor_table};

/// Shared engine state
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone, Debug)]
pub struct EngineState {
    pub config: Arc<EngineConfig>,
    factors: Arc<FactorTable>,
    registry: Arc<PredicateRegistry>,
    achievements: Arc<RwLock<Arc<AchievementEngine>>>,
}

impl EngineState {
    /// Build the state from configuration, loading any configured files
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::with_registry(config, PredicateRegistry::builtin())
    }

    /// Like [`EngineState::from_config`] with extra custom predicates
    pub fn with_registry(
        config: EngineConfig,
        registry: Arc<PredicateRegistry>,
    ) -> EngineResult<Self> {
        let factors = build_factor_table(&config)?;
        let catalog = read_catalog(&config)?;
        let engine = AchievementEngine::with_registry(catalog, Arc::clone(&registry));

        Ok(Self {
            config: Arc::new(config),
            factors: Arc::new(factors),
            registry,
            achievements: Arc::new(RwLock::new(Arc::new(engine))),
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn factors(&self) -> &FactorTable {
        &self.factors
    }

    /// Resolve factors for a location against the configured table
    pub fn resolve(&self, location: &LocationKey) -> FactorSet {
        self.factors.resolve(location)
    }

    /// The current achievement engine
    pub fn achievements(&self) -> Arc<AchievementEngine> {
        let guard = self
            .achievements
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Re-read the configured catalog and swap it in.
    ///
    /// On error the current catalog stays in place. Returns the number of
    /// badges loaded.
    pub fn reload_catalog(&self) -> EngineResult<usize> {
        let catalog = read_catalog(&self.config)?;
        Ok(self.replace_catalog(catalog))
    }

    /// Swap in an already validated catalog
    pub fn replace_catalog(&self, catalog: BadgeCatalog) -> usize {
        let count = catalog.len();
        let engine = Arc::new(AchievementEngine::with_registry(
            catalog,
            Arc::clone(&self.registry),
        ));

        let mut guard = self
            .achievements
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = engine;

        info!(badges = count, "Badge catalog swapped");
        count
    }
}

fn build_factor_table(config: &EngineConfig) -> EngineResult<FactorTable> {
    let mut table = match &config.factors.overrides_path {
        Some(path) => load_factor_table(Path::new(path))?,
        None => FactorTable::builtin().clone(),
    };

    if !config.factors.state_adjustments {
        info!("State factor adjustments disabled");
        table = table.without_state_adjustments();
    }
    if !config.factors.city_adjustments {
        info!("City factor adjustments disabled");
        table = table.without_city_adjustments();
    }
    Ok(table)
}

fn read_catalog(config: &EngineConfig) -> EngineResult<BadgeCatalog> {
    match &config.catalog.path {
        Some(path) => load_catalog(Path::new(path)),
        None => Ok(BadgeCatalog::builtin().clone()),
    }
}
