use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use reveal_core::TabPanelCatalog;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read panel catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid panel catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize panel catalog: {0}")]
    Serialize(#[from] ron::Error),
}

pub fn parse_catalog(text: &str) -> Result<TabPanelCatalog, CatalogError> {
    Ok(ron::from_str(text)?)
}

/// Reads a RON panel catalog from disk.
pub fn load_catalog(path: &Path) -> Result<TabPanelCatalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&text)?;
    engine_info!("Loaded {} panels from {:?}", catalog.len(), path);
    Ok(catalog)
}

pub fn catalog_to_ron(catalog: &TabPanelCatalog) -> Result<String, CatalogError> {
    let pretty = ron::ser::PrettyConfig::new();
    Ok(ron::ser::to_string_pretty(catalog, pretty)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_survives_ron() {
        let builtin = TabPanelCatalog::builtin();
        let text = catalog_to_ron(&builtin).unwrap();
        assert_eq!(parse_catalog(&text).unwrap(), builtin);
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        let err = parse_catalog("(panels: {\"x\": (title: 1)})").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
