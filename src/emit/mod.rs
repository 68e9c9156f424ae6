//! Rendering of a [`RegistrationPlan`] into the generated source file.
//!
//! The output is a pure function of the plan: imports first, then a single
//! `Container` extension whose `register()` method instantiates each module
//! once and registers every provider in the plan's order.

mod context;

pub use context::EmitterContext;

use crate::present::{RegistrationPlan, RegistrationView};

/// Name of the file the collaborator writes the output into.
pub const GENERATED_FILE_NAME: &str = "dependencies.generated.swift";

/// Render the complete generated source.
pub fn emit(plan: &RegistrationPlan) -> String {
    let mut ctx = EmitterContext::new();

    for import in &plan.imports {
        ctx.println(format!("import {}", import));
    }
    ctx.blank_line();

    ctx.println("extension Container {");
    ctx.inc_indent();
    ctx.println("func register() {");
    ctx.inc_indent();

    for instance in &plan.instances {
        ctx.println(format!(
            "let {} = {}()",
            instance.variable, instance.type_name
        ));
    }

    for registration in &plan.registrations {
        ctx.blank_line();
        emit_registration(&mut ctx, registration);
    }

    ctx.dec_indent();
    ctx.println("}");
    ctx.dec_indent();
    ctx.println("}");

    ctx.to_source()
}

fn emit_registration(ctx: &mut EmitterContext, registration: &RegistrationView) {
    ctx.println(format!(
        "self.register({}.self, name: \"{}\", objectScope: .{}) {{ resolver in",
        registration.return_type, registration.registration_name, registration.scope
    ));
    ctx.inc_indent();

    let invocation = format!("{}.{}", registration.module_instance, registration.body);
    if !registration.is_function {
        ctx.println(invocation);
    } else if registration.parameters.is_empty() {
        ctx.println(format!("{}()", invocation));
    } else {
        ctx.println(format!("{}(", invocation));
        ctx.inc_indent();
        for (index, parameter) in registration.parameters.iter().enumerate() {
            let resolve = format!(
                "resolver.resolve({}.self, name: \"{}\")",
                parameter.ty, parameter.resolver_name
            );
            // The first argument is unlabeled; later ones carry their labels
            let argument = match (&parameter.label, index) {
                (Some(label), 1..) => format!("{}: {}", label, resolve),
                _ => resolve,
            };
            let comma = if parameter.is_last { "" } else { "," };
            ctx.println(format!("{}{}", argument, comma));
        }
        ctx.dec_indent();
        ctx.println(")");
    }

    ctx.dec_indent();
    ctx.println("}");
}
