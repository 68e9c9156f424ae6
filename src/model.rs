//! Shared model for extracted dependency modules.
//!
//! Extraction produces [`Module`]s, each owning its [`Provider`]s, each owning
//! its [`Parameter`]s. The model is immutable after extraction; the resolver
//! and the presenter only read from it.

use std::fmt;

/// Lifecycle of every provider declared inside a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Created once and shared across resolutions
    Singleton,
    /// Created on each resolution
    Transient,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Singleton => write!(f, "singleton"),
            Scope::Transient => write!(f, "transient"),
        }
    }
}

/// Syntactic category of the declaration carrying the providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Class,
    Struct,
    Extension,
}

/// A type declaration marked as providing dependencies under a single scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub kind: ModuleKind,
    pub scope: Scope,
    /// Declared type name; for extensions, the extended type's name.
    pub name: String,
    /// Imports visible in the source unit declaring this module.
    pub imports: Vec<String>,
    pub providers: Vec<Provider>,
}

/// Whether a provider is a computed property or a factory function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderForm {
    Property,
    Function,
}

/// A member of a module that produces an instance of some type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub form: ProviderForm,
    /// Name taken from a recognized naming attribute, if any.
    pub name: Option<String>,
    /// Textual spelling of the provided type.
    pub return_type: String,
    /// Identifier used to invoke the provider on its module instance.
    pub body: String,
    /// Empty for property providers.
    pub parameters: Vec<Parameter>,
}

impl Provider {
    /// Graph key for this provider.
    pub fn id(&self) -> DependencyId {
        DependencyId::new(self.name.as_deref(), &self.return_type)
    }

    /// Ordered dependency references: one per parameter without a default
    /// value. Defaulted parameters take their defaults implicitly and never
    /// participate in ordering.
    pub fn dependency_edges(&self) -> Vec<DependencyId> {
        self.parameters
            .iter()
            .filter(|p| p.default_value.is_none())
            .map(Parameter::id)
            .collect()
    }
}

/// A single parameter of a function provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Textual type spelling with any leading attribute wrapper stripped.
    pub ty: String,
    /// External label; `_` means unlabeled at the call site.
    pub label: String,
    /// Source text of the default expression, if present.
    pub default_value: Option<String>,
    /// Name taken from a recognized naming attribute, if any.
    pub referenced_name: Option<String>,
}

impl Parameter {
    /// The provider id this parameter resolves against.
    pub fn id(&self) -> DependencyId {
        DependencyId::new(self.referenced_name.as_deref(), &self.ty)
    }

    /// The `name:` argument handed to the resolver at the call site.
    pub fn resolver_name(&self) -> &str {
        self.referenced_name.as_deref().unwrap_or(&self.ty)
    }
}

/// Identifier of a provider or of a parameter reference, rendered as
/// `name:type` with `_` standing in for a missing name.
///
/// Kept nominal so provider keys and raw strings cannot be mixed up; the
/// textual format is the sole serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyId(String);

impl DependencyId {
    pub fn new(name: Option<&str>, ty: &str) -> Self {
        Self(format!("{}:{}", name.unwrap_or("_"), ty))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
