use crate::config::GeneratorConfig;
use crate::model::{Parameter, Provider, ProviderForm};
use crate::syntax::ast::{Attribute, FunctionDecl, Member, TypeDeclaration, VariableDecl};

/// Extract the providers declared in a module body.
///
/// Property providers are single-binding variable declarations with an
/// explicit type annotation and no stored initializer. Function providers
/// are functions with an explicit return type. Everything else in the body
/// is ignored.
pub fn extract_providers(decl: &TypeDeclaration, config: &GeneratorConfig) -> Vec<Provider> {
    let mut providers = Vec::new();

    for member in &decl.members {
        let provider = match member {
            Member::Variable(var_decl) => property_provider(var_decl, config),
            Member::Function(func) => function_provider(func, config),
        };
        if let Some(provider) = provider {
            // Identical re-declarations collapse; distinct providers that
            // collide on id are left for the resolver to report
            if !providers.contains(&provider) {
                providers.push(provider);
            }
        }
    }

    providers
}

fn property_provider(decl: &VariableDecl, config: &GeneratorConfig) -> Option<Provider> {
    let [binding] = decl.bindings.as_slice() else {
        return None;
    };
    if decl.bindings.iter().any(|b| b.has_initializer) {
        return None;
    }
    let annotation = binding.annotation.as_ref()?;

    Some(Provider {
        form: ProviderForm::Property,
        name: Attribute::lookup(&config.naming_attribute, &decl.attributes),
        return_type: annotation.clone(),
        body: binding.name.clone(),
        parameters: Vec::new(),
    })
}

fn function_provider(decl: &FunctionDecl, config: &GeneratorConfig) -> Option<Provider> {
    let return_type = decl.return_type.as_ref()?;

    let parameters = decl
        .parameters
        .iter()
        .map(|param| Parameter {
            ty: param.ty.clone(),
            label: param.label.clone(),
            default_value: param.default_value.clone(),
            referenced_name: Attribute::lookup(
                &config.parameter_name_attribute,
                &param.attributes,
            ),
        })
        .collect();

    Some(Provider {
        form: ProviderForm::Function,
        name: Attribute::lookup(&config.naming_attribute, &decl.attributes),
        return_type: return_type.clone(),
        body: decl.name.clone(),
        parameters,
    })
}
