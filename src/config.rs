use serde::{Deserialize, Serialize};

/// Names of the protocols that mark a type as a dependency module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMarkers {
    /// Marker for modules whose providers are created once
    pub singleton: String,
    /// Marker for modules whose providers are created per resolution
    pub transient: String,
}

impl Default for ScopeMarkers {
    fn default() -> Self {
        Self {
            singleton: "SingletonModule".to_string(),
            transient: "TransientModule".to_string(),
        }
    }
}

/// Configuration for extraction and emission.
///
/// Attribute tokens are matched by substring against attribute names, so
/// `"Named"` recognizes both `@Named("…")` and a module-qualified
/// `@DI.Named("…")` spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Token identifying a name-carrying attribute on a provider declaration
    pub naming_attribute: String,
    /// Token identifying a name-carrying attribute on a parameter
    pub parameter_name_attribute: String,
    pub scope_markers: ScopeMarkers,
    /// Import appended unconditionally to the generated file
    pub container_import: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            naming_attribute: "Named".to_string(),
            parameter_name_attribute: "Named".to_string(),
            scope_markers: ScopeMarkers::default(),
            container_import: "Swinject".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Map an inheritance-clause entry to a scope, if it names a marker.
    pub fn scope_for_marker(&self, name: &str) -> Option<crate::model::Scope> {
        if name == self.scope_markers.singleton {
            Some(crate::model::Scope::Singleton)
        } else if name == self.scope_markers.transient {
            Some(crate::model::Scope::Transient)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scope;

    #[test]
    fn test_default_markers_map_to_scopes() {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.scope_for_marker("SingletonModule"),
            Some(Scope::Singleton)
        );
        assert_eq!(
            config.scope_for_marker("TransientModule"),
            Some(Scope::Transient)
        );
        assert_eq!(config.scope_for_marker("Codable"), None);
    }
}
