//! Presentation mapping: reshape `(modules, order)` into the flat view the
//! emitter renders. Everything here is pure string shaping; validation has
//! already happened.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use crate::model::{DependencyId, Module, ProviderForm};

/// Emission-ready view of the whole generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPlan {
    /// Sorted, deduplicated imports, container import included
    pub imports: Vec<String>,
    /// Module instantiations, one per module, in first-appearance order
    pub instances: Vec<ModuleInstance>,
    /// One entry per provider, in registration order
    pub registrations: Vec<RegistrationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInstance {
    pub type_name: String,
    /// Lowercased type name, used as the `let` binding
    pub variable: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationView {
    /// Instance variable of the owning module
    pub module_instance: String,
    /// Functions get parentheses and an argument list; properties do not
    pub is_function: bool,
    pub return_type: String,
    /// `name:` argument of the registration: provider name, or the return
    /// type when the provider is unnamed
    pub registration_name: String,
    /// Member invoked on the module instance
    pub body: String,
    /// Lowercase scope label (`singleton` / `transient`)
    pub scope: String,
    pub parameters: Vec<ParameterView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterView {
    pub ty: String,
    /// `None` when the declared label was the `_` sentinel
    pub label: Option<String>,
    /// `name:` argument of the resolver call
    pub resolver_name: String,
    /// Comma control for the argument list
    pub is_last: bool,
}

/// Flatten validated modules into a [`RegistrationPlan`] following the
/// resolver's registration order.
pub fn present(
    modules: &[Module],
    order: &[DependencyId],
    container_import: &str,
) -> RegistrationPlan {
    let mut by_id: FxHashMap<DependencyId, (&Module, usize)> = FxHashMap::default();
    for module in modules {
        for (index, provider) in module.providers.iter().enumerate() {
            by_id.insert(provider.id(), (module, index));
        }
    }

    let mut instance_order: IndexSet<String> = IndexSet::new();
    let mut registrations = Vec::with_capacity(order.len());

    for id in order {
        let Some((module, provider_index)) = by_id.get(id) else {
            continue;
        };
        let provider = &module.providers[*provider_index];
        instance_order.insert(module.name.clone());

        let parameters: Vec<&crate::model::Parameter> = provider
            .parameters
            .iter()
            .filter(|p| p.default_value.is_none())
            .collect();
        let last = parameters.len().saturating_sub(1);
        let parameter_views = parameters
            .iter()
            .enumerate()
            .map(|(index, param)| ParameterView {
                ty: param.ty.clone(),
                label: (param.label != "_").then(|| param.label.clone()),
                resolver_name: param.resolver_name().to_string(),
                is_last: index == last,
            })
            .collect();

        registrations.push(RegistrationView {
            module_instance: module.name.to_lowercase(),
            is_function: provider.form == ProviderForm::Function,
            return_type: provider.return_type.clone(),
            registration_name: provider
                .name
                .clone()
                .unwrap_or_else(|| provider.return_type.clone()),
            body: provider.body.clone(),
            scope: module.scope.to_string(),
            parameters: parameter_views,
        });
    }

    let mut imports: Vec<String> = modules
        .iter()
        .flat_map(|module| module.imports.iter().cloned())
        .chain(std::iter::once(container_import.to_string()))
        .collect();
    imports.sort();
    imports.dedup();

    let instances = instance_order
        .into_iter()
        .map(|type_name| ModuleInstance {
            variable: type_name.to_lowercase(),
            type_name,
        })
        .collect();

    RegistrationPlan {
        imports,
        instances,
        registrations,
    }
}
