//! Widget definition metadata and the registry provider seam.
//!
//! Widget definitions describe the widget types a dashboard can host:
//! identity, title, the roles allowed to see them, where they apply
//! (resource scope/qualifier/language), and their configurable
//! properties. They are supplied externally and never persisted; this
//! crate only defines the types and the [`WidgetDefinitionProvider`]
//! trait callers depend on, plus an in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::properties::WidgetPropertyDefinition;
use crate::roles::{ROLE_USER, ROLE_VIEWER};

/// Externally supplied metadata describing one widget type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetDefinition {
    /// Stable identifier, stored on widgets as `widget_key`.
    pub key: String,
    /// Display title, snapshotted onto widgets at creation time.
    pub title: String,
    /// Roles allowed to see this widget. Empty means everyone.
    #[serde(default)]
    pub user_roles: Vec<String>,
    /// Resource scopes this widget applies to. Empty means any.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Resource qualifiers this widget applies to. Empty means any.
    #[serde(default)]
    pub qualifiers: Vec<String>,
    /// Resource languages this widget applies to. Empty means any.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Ordered configurable properties.
    #[serde(default)]
    pub properties: Vec<WidgetPropertyDefinition>,
}

impl WidgetDefinition {
    /// True when at least one property is required, which means a fresh
    /// widget starts unconfigured.
    pub fn has_required_properties(&self) -> bool {
        self.properties.iter().any(|p| p.required)
    }

    /// Whether this definition applies to a resource with the given
    /// scope/qualifier/language. `None` filter values match anything.
    pub fn applies_to(
        &self,
        scope: Option<&str>,
        qualifier: Option<&str>,
        language: Option<&str>,
    ) -> bool {
        fn matches(allowed: &[String], value: Option<&str>) -> bool {
            match value {
                None => true,
                Some(v) => allowed.is_empty() || allowed.iter().any(|a| a == v),
            }
        }
        matches(&self.scopes, scope)
            && matches(&self.qualifiers, qualifier)
            && matches(&self.languages, language)
    }
}

/// Whether a viewer with the given roles may see a definition.
///
/// Definitions without role requirements are visible to everyone. The
/// `user` and `viewer` role names are satisfied unconditionally; any
/// other required role must appear in the viewer's role list.
pub fn is_authorized(def: &WidgetDefinition, viewer_roles: &[String]) -> bool {
    if def.user_roles.is_empty() {
        return true;
    }
    def.user_roles.iter().any(|role| {
        role == ROLE_USER || role == ROLE_VIEWER || viewer_roles.iter().any(|r| r == role)
    })
}

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// Read-only access to the widget definition registry.
///
/// Callers depend on this trait, not on any concrete registry, so the
/// definition source (static file, plugin system) can change freely.
pub trait WidgetDefinitionProvider: Send + Sync {
    /// Look up one definition by key.
    fn get_definition(&self, key: &str) -> Option<&WidgetDefinition>;

    /// List definitions applying to the given resource context, in
    /// registry order. `None` filter values match anything.
    fn list_definitions(
        &self,
        scope: Option<&str>,
        qualifier: Option<&str>,
        language: Option<&str>,
    ) -> Vec<&WidgetDefinition>;
}

/// In-memory registry over a fixed definition list.
#[derive(Debug, Default)]
pub struct StaticWidgetRegistry {
    definitions: Vec<WidgetDefinition>,
}

impl StaticWidgetRegistry {
    pub fn new(definitions: Vec<WidgetDefinition>) -> Self {
        Self { definitions }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl WidgetDefinitionProvider for StaticWidgetRegistry {
    fn get_definition(&self, key: &str) -> Option<&WidgetDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    fn list_definitions(
        &self,
        scope: Option<&str>,
        qualifier: Option<&str>,
        language: Option<&str>,
    ) -> Vec<&WidgetDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.applies_to(scope, qualifier, language))
            .collect()
    }
}
