//! Resolution of analyzer settings for a project.
//!
//! Every analyzer owns a settings entry in the project configuration. Its
//! `config` section holds the default per-file settings and `path_configs`
//! lists pattern-scoped replacements, of which the first matching one wins.
//! Settings are addressed with dotted paths such as `php_analyzer.severity`.

mod config;
mod error;
mod project;
mod value;

pub use config::{
    find_config_file, load_config, normalize_path, select_override, walk, AnalyzerConfig,
    ConfigPath, PathOverride, PathPatterns, ProjectConfig, DEFAULT_CONFIG_FILENAME,
};
pub use error::{ConfigError, LoadError};
pub use project::{File, Project};
pub use value::{ConfigTree, ConfigValue};
