//! End-to-end generation pipeline: parse, extract, resolve, present, emit.

use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::emit::emit;
use crate::errors::GenerateError;
use crate::extract::extract_modules;
use crate::graph::ProviderGraph;
use crate::model::Module;
use crate::present::present;
use crate::syntax::{parse_source, SourceUnit};

/// Drives the whole pipeline over a set of in-memory sources.
///
/// The generator holds no state between runs; the same input always yields
/// the identical output string.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate from `(file identity, content)` pairs. The identity is only
    /// used for logging; semantics depend solely on the contents and their
    /// order.
    pub fn generate(&self, sources: &[(String, String)]) -> Result<String, GenerateError> {
        info!(files = sources.len(), "generating container registrations");

        let mut units = Vec::with_capacity(sources.len());
        for (identity, content) in sources {
            let unit = parse_source(content);
            debug!(file = %identity, types = unit.types.len(), "scanned");
            units.push(unit);
        }

        self.generate_from_units(&units)
    }

    /// Generate from already-parsed source units.
    pub fn generate_from_units(&self, units: &[SourceUnit]) -> Result<String, GenerateError> {
        let modules: Vec<Module> = units
            .iter()
            .flat_map(|unit| extract_modules(unit, &self.config))
            .collect();
        debug!(modules = modules.len(), "extraction complete");

        let order = ProviderGraph::from_modules(&modules).resolve()?;
        let plan = present(&modules, &order, &self.config.container_import);
        Ok(emit(&plan))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_a_pure_function_of_input() {
        let generator = Generator::default();
        let sources = vec![(
            "Modules.swift".to_string(),
            "class M: SingletonModule { var w: Widget { Widget() } }".to_string(),
        )];
        let first = generator.generate(&sources).unwrap();
        let second = generator.generate(&sources).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("self.register(Widget.self"));
    }

    #[test]
    fn test_error_propagates_without_output() {
        let generator = Generator::default();
        let sources = vec![(
            "Modules.swift".to_string(),
            "class M: SingletonModule { func a(_ b: Missing) -> A { A(b) } }".to_string(),
        )];
        assert!(generator.generate(&sources).is_err());
    }
}
