use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use swingen::cli::{
    run_generate, GenerateOptions, PROJECT_PATH_ENV, TARGET_NAME_ENV,
};
use swingen::{Generator, GeneratorConfig, RealFileSystem};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("swingen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates Swinject container registrations from Swift dependency modules")
        .subcommand_required(true)
        .subcommand(
            Command::new("generate")
                .about("Scan sources and write dependencies.generated.swift")
                .arg(
                    Arg::new("project-path")
                        .long("project-path")
                        .value_name("PATH")
                        .help("Path to the project (directory or project file)"),
                )
                .arg(
                    Arg::new("target-name")
                        .long("target-name")
                        .value_name("NAME")
                        .help("Target the generated file belongs to"),
                )
                .arg(
                    Arg::new("is-package")
                        .long("is-package")
                        .action(ArgAction::SetTrue)
                        .help("Treat the project as a Swift package"),
                )
                .arg(
                    Arg::new("package-sources-path")
                        .long("package-sources-path")
                        .value_name("PATH")
                        .action(ArgAction::Append)
                        .help("Package sources directory; a trailing /** expands to all Sources directories"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Print the generated source instead of writing it"),
                ),
        )
        .get_matches();

    let Some(("generate", sub)) = matches.subcommand() else {
        process::exit(2);
    };

    let is_package = sub.get_flag("is-package");
    let project_path = sub
        .get_one::<String>("project-path")
        .cloned()
        .or_else(|| std::env::var(PROJECT_PATH_ENV).ok());
    let target_name = sub
        .get_one::<String>("target-name")
        .cloned()
        .or_else(|| std::env::var(TARGET_NAME_ENV).ok());

    let Some(project_path) = project_path else {
        eprintln!("Argument: --project-path is required.");
        process::exit(1);
    };
    let Some(target_name) = target_name else {
        eprintln!("Argument: --target-name is required.");
        process::exit(1);
    };

    let package_sources_paths: Vec<String> = sub
        .get_many::<String>("package-sources-path")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if is_package && package_sources_paths.is_empty() {
        eprintln!("Argument: --package-sources-path is required.");
        process::exit(1);
    }

    let options = GenerateOptions {
        project_path: PathBuf::from(project_path),
        target_name,
        is_package,
        package_sources_paths,
        dry_run: sub.get_flag("dry-run"),
    };

    let fs = RealFileSystem::new();
    let generator = Generator::new(GeneratorConfig::default());
    match run_generate(&fs, &generator, &options) {
        Ok(outcome) if outcome.written => {
            println!("Generated {}", outcome.output_path.display());
        }
        Ok(outcome) => {
            print!("{}", outcome.output);
        }
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    }
}
