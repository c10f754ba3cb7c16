//! protospec CLI
//!
//! Renders, validates, lints, and drift-checks proto3 definition files.
//!
//! Usage:
//!   protospec render defs/beacon.json -o gen/beacon.proto
//!   protospec check defs/beacon.json gen/beacon.proto
//!   protospec batch defs/ -o gen/

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use proto3_spec::{
    check_drift, discover_specs, load_spec, plan_outputs, write_output, GeneratorConfig,
    SidecarStatus, Spec, StyleLinter,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "protospec")]
#[command(about = "Generate proto3 definitions from JSON/TOML descriptions")]
#[command(version)]
struct Cli {
    /// Path to a config file (layered over protospec.toml and PROTOSPEC__* vars)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one definition to proto3 text
    Render {
        /// Definition file (.json or .toml)
        input: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate definitions without writing anything
    Validate {
        /// Definition files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Report style warnings
    Lint {
        /// Definition files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Check that a generated file matches its definition
    Check {
        /// Definition file
        input: PathBuf,
        /// Previously generated .proto file
        proto: PathBuf,
    },

    /// Render every definition under a directory
    Batch {
        /// Directory to scan
        dir: PathBuf,
        /// Output directory (overrides output.dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match GeneratorConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, mut config: GeneratorConfig) -> anyhow::Result<()> {
    match command {
        Commands::Render { input, output } => {
            let spec = load_spec(&input).with_context(|| format!("loading {}", input.display()))?;
            lint_if_enabled(&input, &spec, &config)?;
            let text = spec.render()?;

            match output {
                Some(path) => {
                    write_output(&path, &text, config.output.write_checksums)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ {} -> {}", input.display(), path.display());
                }
                None => print!("{}", text),
            }
            Ok(())
        }

        Commands::Validate { inputs } => {
            let mut failures = 0;
            for input in &inputs {
                match load_spec(input).map_err(anyhow::Error::from).and_then(|spec| {
                    spec.validate()?;
                    Ok(())
                }) {
                    Ok(()) => println!("  ✅ {}", input.display()),
                    Err(e) => {
                        println!("  ❌ {} - {:#}", input.display(), e);
                        failures += 1;
                    }
                }
            }
            if failures > 0 {
                bail!("{} of {} definitions failed validation", failures, inputs.len());
            }
            Ok(())
        }

        Commands::Lint { inputs } => {
            let linter = StyleLinter::new();
            let mut warnings = 0;
            for input in &inputs {
                let spec = load_spec(input).with_context(|| format!("loading {}", input.display()))?;
                let result = linter.lint(&input.display().to_string(), &spec);
                warnings += print_lint(&result);
            }
            if warnings > 0 && config.lint.deny_warnings {
                bail!("{} lint warnings (deny_warnings is set)", warnings);
            }
            println!("🔍 {} warnings", warnings);
            Ok(())
        }

        Commands::Check { input, proto } => {
            let spec = load_spec(&input).with_context(|| format!("loading {}", input.display()))?;
            let actual = fs::read_to_string(&proto)
                .with_context(|| format!("reading {}", proto.display()))?;

            match SidecarStatus::read(&proto, &actual) {
                SidecarStatus::Mismatch => {
                    println!("⚠️  {} was edited after generation", proto.display());
                }
                SidecarStatus::Malformed => {
                    tracing::warn!(path = %proto.display(), "malformed checksum file");
                }
                SidecarStatus::Missing | SidecarStatus::Matches => {}
            }

            match check_drift(&spec, &actual)? {
                None => {
                    println!("✅ {} is up to date", proto.display());
                    Ok(())
                }
                Some(drift) => {
                    println!(
                        "❌ {} drifted from {} (-{} +{})",
                        proto.display(),
                        input.display(),
                        drift.removed,
                        drift.added
                    );
                    print!("{}", drift.diff);
                    bail!("generated file is out of date");
                }
            }
        }

        Commands::Batch { dir, output } => {
            if output.is_some() {
                config.output.dir = output;
            }
            let inputs = discover_specs(&dir);
            if inputs.is_empty() {
                bail!("no definitions found under {}", dir.display());
            }
            println!("📂 {} definitions under {}", inputs.len(), dir.display());

            let plan = plan_outputs(&config, &inputs)?;

            let mut failures = 0;
            for (input, out_path) in &plan {
                let rendered = load_spec(input)
                    .map_err(anyhow::Error::from)
                    .and_then(|spec| {
                        lint_if_enabled(input, &spec, &config)?;
                        Ok(spec.render()?)
                    })
                    .and_then(|text| {
                        write_output(out_path, &text, config.output.write_checksums)
                            .map_err(anyhow::Error::from)
                    });
                match rendered {
                    Ok(()) => println!("  ✅ {} -> {}", input.display(), out_path.display()),
                    Err(e) => {
                        println!("  ❌ {} - {:#}", input.display(), e);
                        failures += 1;
                    }
                }
            }
            if failures > 0 {
                bail!("{} of {} definitions failed", failures, inputs.len());
            }
            Ok(())
        }
    }
}

fn lint_if_enabled(input: &Path, spec: &Spec, config: &GeneratorConfig) -> anyhow::Result<()> {
    if !config.lint.enabled {
        return Ok(());
    }
    let result = StyleLinter::new().lint(&input.display().to_string(), spec);
    for warning in &result.warnings {
        tracing::warn!(code = warning.code, path = %warning.path, "{}", warning.message);
    }
    if !result.is_clean() && config.lint.deny_warnings {
        bail!("{} lint warnings (deny_warnings is set)", result.warnings.len());
    }
    Ok(())
}

fn print_lint(result: &proto3_spec::LintResult) -> usize {
    if result.is_clean() {
        println!("  ✅ {}", result.spec_id);
        return 0;
    }
    println!("  ⚠️  {}", result.spec_id);
    for warning in &result.warnings {
        println!("     [{}] {}: {}", warning.code, warning.path, warning.message);
    }
    result.warnings.len()
}
