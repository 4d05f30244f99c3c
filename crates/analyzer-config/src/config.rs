mod analyzer;
mod loader;
mod path;
mod pattern;
mod project_config;
mod walker;

pub use analyzer::{select_override, AnalyzerConfig, PathOverride};
pub use loader::{find_config_file, load_config, DEFAULT_CONFIG_FILENAME};
pub use path::ConfigPath;
pub use pattern::{normalize_path, PathPatterns};
pub use project_config::ProjectConfig;
pub use walker::walk;
