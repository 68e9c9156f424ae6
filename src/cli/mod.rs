//! CLI collaborator around the core: resolves options, discovers sources,
//! and writes the generated file. The core itself never touches the file
//! system.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::emit::GENERATED_FILE_NAME;
use crate::errors::GenerateError;
use crate::fs::{collect_swift_sources, FileSystem};
use crate::generator::Generator;

pub const PROJECT_PATH_ENV: &str = "SWINGEN_PROJECT_PATH";
pub const TARGET_NAME_ENV: &str = "SWINGEN_TARGET_NAME";

/// Options of the `generate` subcommand, after environment fallback.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub project_path: PathBuf,
    pub target_name: String,
    pub is_package: bool,
    /// Source roots; a trailing `/**` expands to every directory named
    /// `Sources` beneath the prefix.
    pub package_sources_paths: Vec<String>,
    /// Print to stdout instead of writing the generated file
    pub dry_run: bool,
}

/// Result of a generation run driven by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub output: String,
    pub output_path: PathBuf,
    pub written: bool,
}

/// Expand source-path patterns into concrete directories.
pub fn expand_sources_paths(
    fs: &dyn FileSystem,
    patterns: &[String],
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut roots = Vec::new();
    for pattern in patterns {
        match pattern.strip_suffix("/**") {
            Some(prefix) => {
                let mut found = Vec::new();
                collect_sources_dirs(fs, Path::new(prefix), &mut found)?;
                found.sort();
                roots.extend(found);
            }
            None => roots.push(PathBuf::from(pattern)),
        }
    }
    Ok(roots)
}

fn collect_sources_dirs(
    fs: &dyn FileSystem,
    dir: &Path,
    out: &mut Vec<PathBuf>,
) -> Result<(), std::io::Error> {
    for entry in fs.list_dir(dir)? {
        if !fs.is_dir(&entry) {
            continue;
        }
        if entry.file_name().is_some_and(|name| name == "Sources") {
            out.push(entry.clone());
        }
        collect_sources_dirs(fs, &entry, out)?;
    }
    Ok(())
}

/// Run the whole generation: discover sources, generate, write (or print).
pub fn run_generate(
    fs: &dyn FileSystem,
    generator: &Generator,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, GenerateError> {
    let roots = source_roots(fs, options)?;
    if roots.is_empty() {
        return Err(GenerateError::ConfigError(
            "no source directories to scan".to_string(),
        ));
    }

    let mut files = Vec::new();
    for root in &roots {
        files.extend(collect_swift_sources(fs, root)?);
    }
    files.sort();
    // A previous run's output must not feed the next one
    files.retain(|path| {
        path.file_name()
            .map_or(true, |name| name != GENERATED_FILE_NAME)
    });
    debug!(files = files.len(), roots = roots.len(), "discovered sources");

    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        let content = fs.read_file(path)?;
        sources.push((path.display().to_string(), content));
    }

    let output = generator.generate(&sources)?;
    let output_path = output_path(&roots, options);

    if options.dry_run {
        return Ok(GenerateOutcome {
            output,
            output_path,
            written: false,
        });
    }

    fs.write_file(&output_path, &output)?;
    info!(path = %output_path.display(), "wrote generated registrations");
    Ok(GenerateOutcome {
        output,
        output_path,
        written: true,
    })
}

fn source_roots(
    fs: &dyn FileSystem,
    options: &GenerateOptions,
) -> Result<Vec<PathBuf>, std::io::Error> {
    if options.is_package {
        return expand_sources_paths(fs, &options.package_sources_paths);
    }
    let root = if fs.is_dir(&options.project_path) {
        options.project_path.clone()
    } else {
        options
            .project_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };
    Ok(vec![root])
}

fn output_path(roots: &[PathBuf], options: &GenerateOptions) -> PathBuf {
    if options.is_package {
        roots[0].join(GENERATED_FILE_NAME)
    } else {
        roots[0].join(&options.target_name).join(GENERATED_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn module_source(ty: &str) -> String {
        format!(
            "import Swinject\nclass {0}Module: SingletonModule {{ var {1}: {0} {{ {0}() }} }}\n",
            ty,
            ty.to_lowercase()
        )
    }

    #[test]
    fn test_glob_expands_to_sources_directories() {
        let fs = MockFileSystem::new();
        fs.add_file("/pkg/Feature/Sources/A.swift", "");
        fs.add_file("/pkg/Core/Sources/Nested/B.swift", "");
        fs.add_file("/pkg/Core/Tests/C.swift", "");

        let roots = expand_sources_paths(&fs, &["/pkg/**".to_string()]).unwrap();
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/pkg/Core/Sources"),
                PathBuf::from("/pkg/Feature/Sources"),
            ]
        );
    }

    #[test]
    fn test_literal_paths_pass_through() {
        let fs = MockFileSystem::new();
        let roots = expand_sources_paths(&fs, &["/pkg/Sources".to_string()]).unwrap();
        assert_eq!(roots, vec![PathBuf::from("/pkg/Sources")]);
    }

    #[test]
    fn test_run_generate_writes_into_first_sources_root() {
        let fs = MockFileSystem::new();
        fs.add_file("/pkg/App/Sources/Module.swift", module_source("Widget"));

        let options = GenerateOptions {
            is_package: true,
            package_sources_paths: vec!["/pkg/**".to_string()],
            ..Default::default()
        };
        let outcome = run_generate(&fs, &Generator::default(), &options).unwrap();

        assert!(outcome.written);
        assert_eq!(
            outcome.output_path,
            PathBuf::from("/pkg/App/Sources").join(GENERATED_FILE_NAME)
        );
        let written = fs.written(&outcome.output_path).unwrap();
        assert!(written.contains("self.register(Widget.self"));
    }

    #[test]
    fn test_previous_output_is_excluded_from_input() {
        let fs = MockFileSystem::new();
        fs.add_file("/pkg/Sources/Module.swift", module_source("Widget"));
        fs.add_file(
            PathBuf::from("/pkg/Sources").join(GENERATED_FILE_NAME),
            "extension Container { func register() { } }",
        );

        let options = GenerateOptions {
            is_package: true,
            package_sources_paths: vec!["/pkg/Sources".to_string()],
            ..Default::default()
        };
        let outcome = run_generate(&fs, &Generator::default(), &options).unwrap();
        // One module, one registration; the stale output contributed nothing
        assert_eq!(outcome.output.matches("self.register(").count(), 1);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let fs = MockFileSystem::new();
        fs.add_file("/pkg/Sources/Module.swift", module_source("Widget"));

        let options = GenerateOptions {
            is_package: true,
            package_sources_paths: vec!["/pkg/Sources".to_string()],
            dry_run: true,
            ..Default::default()
        };
        let outcome = run_generate(&fs, &Generator::default(), &options).unwrap();
        assert!(!outcome.written);
        assert!(fs.written(&outcome.output_path).is_none());
    }

    #[test]
    fn test_project_target_output_location() {
        let fs = MockFileSystem::new();
        fs.add_file("/proj/App/Module.swift", module_source("Widget"));

        let options = GenerateOptions {
            project_path: PathBuf::from("/proj"),
            target_name: "App".to_string(),
            ..Default::default()
        };
        let outcome = run_generate(&fs, &Generator::default(), &options).unwrap();
        assert_eq!(
            outcome.output_path,
            PathBuf::from("/proj/App").join(GENERATED_FILE_NAME)
        );
    }
}
