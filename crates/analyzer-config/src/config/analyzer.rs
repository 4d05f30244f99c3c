use crate::{
    error::LoadError,
    value::{ConfigTree, ConfigValue},
};

use super::pattern::PathPatterns;

pub const CONFIG_KEY: &str = "config";
pub const PATH_CONFIGS_KEY: &str = "path_configs";
pub const PATHS_KEY: &str = "paths";

/// Settings that replace an analyzer's `config` for files matching `patterns`.
#[derive(Debug, Clone)]
pub struct PathOverride {
    patterns: PathPatterns,
    config: ConfigValue,
}

impl PathOverride {
    pub fn new(patterns: PathPatterns, config: ConfigTree) -> Self {
        Self {
            patterns,
            config: ConfigValue::Tree(config),
        }
    }

    pub fn patterns(&self) -> &PathPatterns {
        &self.patterns
    }

    /// Always a [`ConfigValue::Tree`].
    pub fn config(&self) -> &ConfigValue {
        &self.config
    }

    pub fn matches(&self, file_path: &str) -> bool {
        self.patterns.is_match(file_path)
    }
}

/// Returns the `config` of the first override matching `file_path`.
///
/// Later overrides are never consulted once one matches, even when they are
/// more specific.
pub fn select_override<'a>(
    overrides: &'a [PathOverride],
    file_path: &str,
) -> Option<&'a ConfigValue> {
    overrides
        .iter()
        .find(|path_override| path_override.matches(file_path))
        .map(PathOverride::config)
}

/// One analyzer's entry of the project configuration.
///
/// `entry` is the raw value global lookups walk; `config` and `path_configs`
/// are the validated per-file sections taken from it.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    entry: ConfigValue,
    config: Option<ConfigValue>,
    path_configs: Option<Vec<PathOverride>>,
}

impl AnalyzerConfig {
    pub fn from_entry(name: &str, entry: ConfigValue) -> Result<Self, LoadError> {
        let (config, path_configs) = match entry.as_tree() {
            Some(tree) => (
                parse_config_section(name, tree.get(CONFIG_KEY))?,
                parse_path_configs(name, tree.get(PATH_CONFIGS_KEY))?,
            ),
            None => (None, None),
        };

        Ok(Self {
            entry,
            config,
            path_configs,
        })
    }

    pub fn entry(&self) -> &ConfigValue {
        &self.entry
    }

    /// `None` when the analyzer has no per-file settings at all.
    pub fn config(&self) -> Option<&ConfigValue> {
        self.config.as_ref()
    }

    /// `None` when the analyzer declares no `path_configs` section, which is
    /// different from an empty list.
    pub fn path_configs(&self) -> Option<&[PathOverride]> {
        self.path_configs.as_deref()
    }
}

fn invalid(analyzer: &str, reason: impl Into<String>) -> LoadError {
    LoadError::InvalidAnalyzer {
        analyzer: analyzer.to_string(),
        reason: reason.into(),
    }
}

fn parse_config_section(
    analyzer: &str,
    value: Option<&ConfigValue>,
) -> Result<Option<ConfigValue>, LoadError> {
    match value {
        None | Some(ConfigValue::Null) => Ok(None),
        Some(tree @ ConfigValue::Tree(_)) => Ok(Some(tree.clone())),
        Some(_) => Err(invalid(analyzer, "`config` must be a mapping")),
    }
}

fn parse_path_configs(
    analyzer: &str,
    value: Option<&ConfigValue>,
) -> Result<Option<Vec<PathOverride>>, LoadError> {
    let entries = match value {
        None | Some(ConfigValue::Null) => return Ok(None),
        Some(ConfigValue::List(entries)) => entries,
        Some(_) => return Err(invalid(analyzer, "`path_configs` must be a list")),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_path_override(analyzer, index, entry))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_path_override(
    analyzer: &str,
    index: usize,
    entry: &ConfigValue,
) -> Result<PathOverride, LoadError> {
    let tree = entry
        .as_tree()
        .ok_or_else(|| invalid(analyzer, format!("path_configs[{index}] must be a mapping")))?;

    let not_patterns = || {
        invalid(
            analyzer,
            format!("path_configs[{index}].{PATHS_KEY} must be a string or a list of strings"),
        )
    };
    let patterns: Vec<&str> = match tree.get(PATHS_KEY) {
        Some(ConfigValue::String(pattern)) => vec![pattern.as_str()],
        Some(ConfigValue::List(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(not_patterns))
            .collect::<Result<_, _>>()?,
        _ => return Err(not_patterns()),
    };

    let config = match tree.get(CONFIG_KEY) {
        Some(ConfigValue::Tree(config)) => config.clone(),
        _ => {
            return Err(invalid(
                analyzer,
                format!("path_configs[{index}].{CONFIG_KEY} must be a mapping"),
            ))
        }
    };

    Ok(PathOverride::new(PathPatterns::new(patterns)?, config))
}
