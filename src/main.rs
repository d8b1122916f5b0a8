//! Native Build Helper CLI
//!
//! Entry point for the `nbh` command-line tool.

use clap::{Parser, Subcommand};
use native_build_helper::runtime::{
    EnvironmentValidator, RuntimeClassification, RuntimeDetector, SystemEnvironment,
};
use native_build_helper::{
    BuildDetail, BuildOverview, ContextOptions, EnvironmentCheck, ExitCode, NativeBuildConfig,
    ProjectContext, RunnerCheck,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "nbh")]
#[command(about = "Quarkus native build diagnostics", version)]
struct Cli {
    /// Property override, as with -Dkey=value (repeatable)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", global = true)]
    defines: Vec<String>,

    /// Project directory
    #[arg(long, default_value = ".", global = true)]
    project_dir: PathBuf,

    /// Local property file (default: <project-dir>/gradle.properties)
    #[arg(long, global = true)]
    properties: Option<PathBuf>,

    /// Runtime installation to probe (default: JAVA_HOME, then java on PATH)
    #[arg(long, global = true)]
    java_home: Option<PathBuf>,

    /// Helper settings file (default: <project-dir>/.nbh/helper.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Helper setting override, e.g. native.image_xmx=8g (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    settings: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the packaging switches and builder image
    Overview,

    /// Show toolchain locations, every tracked property and the environment verdict
    Detail,

    /// Inspect the runtime and report native build readiness
    Check,

    /// Fail unless the runtime can build native images
    Validate {
        /// Validate even when disabled in the helper settings
        #[arg(long)]
        force: bool,
    },

    /// Check for the native runner executable after a build
    Runner {
        /// Project name (default: project directory name)
        #[arg(long)]
        name: Option<String>,

        /// Project version (default: local `version` property)
        #[arg(long)]
        version: Option<String>,
    },

    /// Show the effective helper settings
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ContextOptions {
        project_dir: cli.project_dir.clone(),
        properties: cli.properties.clone(),
        defines: cli.defines.clone(),
        config: cli.config.clone(),
        user_config: None,
        settings: cli.settings.clone(),
    };
    let ctx = match ProjectContext::load(&options) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code().as_i32());
        }
    };

    let code = match cli.command {
        Commands::Overview => run_overview(&ctx, cli.json),
        Commands::Detail => run_detail(&ctx, cli.java_home, cli.json),
        Commands::Check => run_check(cli.java_home, cli.json),
        Commands::Validate { force } => run_validate(&ctx, cli.java_home, force, cli.json),
        Commands::Runner { name, version } => {
            run_runner(&ctx, name.as_deref(), version.as_deref(), cli.json)
        }
        Commands::Config => run_config(&ctx, cli.java_home, cli.json),
    };
    process::exit(code.as_i32());
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

fn emit(json_output: bool, json: Result<String, serde_json::Error>, human: impl FnOnce() -> String) {
    if json_output {
        match json {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", human());
    }
}

fn probe(java_home: Option<PathBuf>) -> SystemEnvironment {
    SystemEnvironment::probe(java_home.as_deref())
}

fn run_overview(ctx: &ProjectContext, json_output: bool) -> ExitCode {
    let overview = BuildOverview::collect(&ctx.resolver());
    emit(json_output, overview.to_json(), || overview.to_human());
    ExitCode::Success
}

fn run_detail(ctx: &ProjectContext, java_home: Option<PathBuf>, json_output: bool) -> ExitCode {
    let validator = EnvironmentValidator::new(probe(java_home));
    let detail = BuildDetail::collect(&ctx.resolver(), &validator, &ctx.settings.settings);
    emit(json_output, detail.to_json(), || detail.to_human());
    ExitCode::Success
}

fn run_check(java_home: Option<PathBuf>, json_output: bool) -> ExitCode {
    let detector = RuntimeDetector::new(probe(java_home));
    let check = EnvironmentCheck::collect(&detector);
    emit(json_output, check.to_json(), || check.to_human());
    ExitCode::Success
}

fn run_validate(
    ctx: &ProjectContext,
    java_home: Option<PathBuf>,
    force: bool,
    json_output: bool,
) -> ExitCode {
    if !ctx.validation_enabled() && !force {
        tracing::info!("native environment validation disabled in settings");
        emit(json_output, skipped_json(), || {
            "Native environment validation skipped (disabled in settings)\n".to_string()
        });
        return ExitCode::Success;
    }

    let validator = EnvironmentValidator::new(probe(java_home));
    match validator.validate() {
        Ok(()) => {
            let kind = validator.detector().classify();
            emit(json_output, valid_json(kind), || {
                format!("Native build environment is valid ({})\n", kind)
            });
            ExitCode::Success
        }
        Err(e) => {
            if json_output {
                match e.to_json() {
                    Ok(s) => println!("{}", s),
                    Err(err) => eprintln!("Error serializing output: {}", err),
                }
            }
            eprintln!("{}", e);
            ExitCode::RequirementsNotMet
        }
    }
}

fn skipped_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "skipped": true,
        "reason": "validation.validate_native_environment is false",
    }))
}

fn valid_json(kind: RuntimeClassification) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "valid": true,
        "classification": kind.to_string(),
    }))
}

fn run_runner(
    ctx: &ProjectContext,
    name: Option<&str>,
    version: Option<&str>,
    json_output: bool,
) -> ExitCode {
    let check = RunnerCheck::check(ctx.project_dir(), name, version, &ctx.local);
    emit(json_output, check.to_json(), || check.to_human());
    if check.found {
        ExitCode::Success
    } else {
        ExitCode::RunnerMissing
    }
}

fn run_config(ctx: &ProjectContext, java_home: Option<PathBuf>, json_output: bool) -> ExitCode {
    let detector = RuntimeDetector::new(probe(java_home));
    let config = NativeBuildConfig::collect(&ctx.settings, &detector);
    emit(json_output, config.to_json(), || config.to_human());
    ExitCode::Success
}
