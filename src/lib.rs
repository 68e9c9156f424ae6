pub mod cli;
pub mod config;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod fs;
pub mod generator;
pub mod graph;
pub mod model;
pub mod present;
pub mod syntax;

pub use config::{GeneratorConfig, ScopeMarkers};
pub use emit::{emit, GENERATED_FILE_NAME};
pub use errors::GenerateError;
pub use extract::{extract_modules, extract_providers};
pub use fs::{collect_swift_sources, FileSystem, MockFileSystem, RealFileSystem};
pub use generator::Generator;
pub use graph::{ProviderGraph, ResolveError};
pub use model::{DependencyId, Module, ModuleKind, Parameter, Provider, ProviderForm, Scope};
pub use present::{present, RegistrationPlan};
pub use syntax::{parse_source, SourceUnit};
