use std::env;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use analyzer_config::{
    find_config_file, load_config, ConfigError, ConfigValue, ProjectConfig,
    DEFAULT_CONFIG_FILENAME,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file. If omitted, searched upward from the current directory.
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output on stderr (-v: debug, -vv: trace). RUST_LOG takes precedence.
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve an analyzer-wide setting, e.g. `php_analyzer.enabled`.
    Global {
        /// Dotted setting path starting with the analyzer name.
        config_path: String,
    },
    /// Resolve a setting for FILE: the first matching path override, else the analyzer's `config`.
    File {
        /// Project-relative path of the file.
        file: String,
        /// Dotted setting path starting with the analyzer name.
        config_path: String,
    },
    /// Resolve a setting from the first path override matching FILE, else print the default.
    Path {
        /// Project-relative path of the file.
        file: String,
        /// Dotted setting path starting with the analyzer name.
        config_path: String,
        /// JSON value printed when no path override applies.
        #[arg(long, value_name = "JSON", default_value = "null")]
        default: String,
    },
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    ResolveError = 1,
    OtherError = 2,
}

pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run CLI processing and return `Ok(())` or an `ExitCode` on error.
pub fn run(cli: Cli) -> Result<(), ExitCode> {
    // 1) Locate config
    let config_path = match cli.config {
        Some(path) => path,
        None => {
            let cwd = env::current_dir().map_err(|err| {
                eprintln!("error: failed to get cwd: {err}");
                ExitCode::OtherError
            })?;
            find_config_file(&cwd).ok_or_else(|| {
                eprintln!(
                    "error: no {DEFAULT_CONFIG_FILENAME} found in {} or its parents",
                    cwd.display()
                );
                ExitCode::OtherError
            })?
        }
    };
    debug!(config = %config_path.display(), "using configuration");

    // 2) Load config
    let config = load_config(&config_path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::OtherError
    })?;

    // 3) Resolve
    let default = match &cli.command {
        Command::Path { default, .. } => parse_default(default)?,
        _ => ConfigValue::Null,
    };
    let value = resolve(&config, &cli.command, &default).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::ResolveError
    })?;

    // 4) Print
    let rendered = serde_json::to_string_pretty(value).map_err(|err| {
        eprintln!("error: failed to render value: {err}");
        ExitCode::OtherError
    })?;
    println!("{rendered}");
    Ok(())
}

fn resolve<'a>(
    config: &'a ProjectConfig,
    command: &Command,
    default: &'a ConfigValue,
) -> Result<&'a ConfigValue, ConfigError> {
    match command {
        Command::Global { config_path } => config.global_config(config_path),
        Command::File { file, config_path } => config.file_config(file, config_path),
        Command::Path {
            file, config_path, ..
        } => config.path_config_or(file, config_path, default),
    }
}

fn parse_default(raw: &str) -> Result<ConfigValue, ExitCode> {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(ConfigValue::from)
        .map_err(|err| {
            eprintln!("error: --default is not valid JSON: {err}");
            ExitCode::OtherError
        })
}
