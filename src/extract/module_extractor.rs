use tracing::debug;

use crate::config::GeneratorConfig;
use crate::model::{Module, ModuleKind};
use crate::syntax::ast::{DeclKind, SourceUnit};

use super::extract_providers;

/// Extract the dependency modules declared in one source unit.
///
/// A top-level class, struct, or extension becomes a module iff its
/// inheritance clause names a recognized scope marker; the first marker in
/// source order decides the scope. Every module records the full import set
/// of its unit, since the generated file must be able to spell all the
/// types the unit could reference.
pub fn extract_modules(unit: &SourceUnit, config: &GeneratorConfig) -> Vec<Module> {
    let mut modules = Vec::new();

    for decl in &unit.types {
        let Some(scope) = decl
            .inherited
            .iter()
            .find_map(|entry| config.scope_for_marker(entry))
        else {
            continue;
        };

        let kind = match decl.kind {
            DeclKind::Class => ModuleKind::Class,
            DeclKind::Struct => ModuleKind::Struct,
            DeclKind::Extension => ModuleKind::Extension,
        };

        let providers = extract_providers(decl, config);
        debug!(
            module = %decl.name,
            %scope,
            providers = providers.len(),
            "extracted module"
        );

        modules.push(Module {
            kind,
            scope,
            name: decl.name.clone(),
            imports: unit.imports.clone(),
            providers,
        });
    }

    modules
}
