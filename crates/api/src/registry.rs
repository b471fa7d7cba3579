//! Widget definition registry loading.
//!
//! Definitions are deserialized once at startup from a JSON file (see
//! `widgets.json` at the repository root for the shipped set) into the
//! in-memory [`StaticWidgetRegistry`]. Handlers only ever see the
//! `WidgetDefinitionProvider` trait, so swapping the source later does
//! not touch them.

use gridboard_core::definitions::{StaticWidgetRegistry, WidgetDefinition};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Failed to read widgets file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse widgets file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the registry from a JSON file containing an array of widget
/// definitions.
pub fn load_registry(path: &str) -> Result<StaticWidgetRegistry, RegistryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_string(),
        source,
    })?;
    let definitions: Vec<WidgetDefinition> =
        serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
            path: path.to_string(),
            source,
        })?;
    Ok(StaticWidgetRegistry::new(definitions))
}
