//! Loading reference data from files
//!
//! Badge catalogs and factor tables are read from JSON or TOML, chosen by
//! file extension, and validated before they are handed to the engine.

use std::fs;
use std::path::Path;

use carbon_tracker_shared::{BadgeCatalog, BadgeDefinition, CatalogDocument, FactorTable};
use serde::Deserialize;
use tracing::info;

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(DataFormat::Json),
            "toml" => Ok(DataFormat::Toml),
            _ => Err(EngineError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// JSON catalogs may be a bare list or a `{"badges": [...]}` document
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    List(Vec<BadgeDefinition>),
    Document(CatalogDocument),
}

// ============================================================================
// Badge Catalogs
// ============================================================================

/// Parse and validate a badge catalog
pub fn parse_catalog(text: &str, format: DataFormat) -> EngineResult<BadgeCatalog> {
    let definitions = match format {
        DataFormat::Json => match serde_json::from_str::<JsonCatalog>(text)? {
            JsonCatalog::List(badges) => badges,
            JsonCatalog::Document(document) => document.badges,
        },
        DataFormat::Toml => toml::from_str::<CatalogDocument>(text)?.badges,
    };

    Ok(BadgeCatalog::from_definitions(definitions)?)
}

pub fn load_catalog(path: &Path) -> EngineResult<BadgeCatalog> {
    let format = DataFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let catalog = parse_catalog(&text, format)?;

    info!(
        path = %path.display(),
        badges = catalog.len(),
        active = catalog.active().count(),
        "Loaded badge catalog"
    );
    Ok(catalog)
}

/// Serialize a catalog in the given format
pub fn render_catalog(catalog: &BadgeCatalog, format: DataFormat) -> EngineResult<String> {
    let document = catalog.to_document();
    match format {
        DataFormat::Json => Ok(serde_json::to_string_pretty(&document)?),
        DataFormat::Toml => Ok(toml::to_string(&document)?),
    }
}

// ============================================================================
// Factor Tables
// ============================================================================

/// Parse and validate a full factor table
pub fn parse_factor_table(text: &str, format: DataFormat) -> EngineResult<FactorTable> {
    let table: FactorTable = match format {
        DataFormat::Json => serde_json::from_str(text)?,
        DataFormat::Toml => toml::from_str(text)?,
    };
    table.validate()?;
    Ok(table)
}

pub fn load_factor_table(path: &Path) -> EngineResult<FactorTable> {
    let format = DataFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let table = parse_factor_table(&text, format)?;

    info!(
        path = %path.display(),
        countries = table.countries.len(),
        cities = table.city_adjustments.len(),
        "Loaded emission factor table"
    );
    Ok(table)
}
