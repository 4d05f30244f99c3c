use indexmap::IndexMap;

use crate::{
    error::{ConfigError, LoadError},
    value::{ConfigTree, ConfigValue},
};

use super::{
    analyzer::{select_override, AnalyzerConfig},
    path::ConfigPath,
    pattern::normalize_path,
    walker::walk,
};

/// The settings of every analyzer of a project, keyed by analyzer name.
///
/// Built once and read-only afterwards; all lookups hand out borrows into it,
/// so a shared `ProjectConfig` can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    analyzers: IndexMap<String, AnalyzerConfig>,
}

impl ProjectConfig {
    /// Entries set to `null` are left out, so their names stay unknown.
    pub fn new(tree: ConfigTree) -> Result<Self, LoadError> {
        let analyzers = tree
            .into_iter()
            .filter(|(_, entry)| !entry.is_null())
            .map(|(name, entry)| {
                let analyzer = AnalyzerConfig::from_entry(&name, entry)?;
                Ok::<_, LoadError>((name, analyzer))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        Ok(Self { analyzers })
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(LoadError::Syntax)?;
        Self::try_from(ConfigValue::from(value))
    }

    pub fn analyzer(&self, name: &str) -> Option<&AnalyzerConfig> {
        self.analyzers.get(name)
    }

    pub fn analyzer_names(&self) -> impl Iterator<Item = &str> {
        self.analyzers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Path-override lookup without a default.
    ///
    /// `Ok(None)` means no override applies: either the analyzer declares no
    /// `path_configs` or none of them matches `file_path`. A matching override
    /// that lacks the requested keys is an error, not `None`.
    pub fn path_config(
        &self,
        file_path: &str,
        config_path: &str,
    ) -> Result<Option<&ConfigValue>, ConfigError> {
        let (path, analyzer) = self.parse(config_path)?;
        let Some(overrides) = analyzer.path_configs() else {
            return Ok(None);
        };

        match select_override(overrides, &normalize_path(file_path)) {
            Some(config) => walk(config, path.segments(), path.raw()).map(Some),
            None => Ok(None),
        }
    }

    /// Path-override lookup returning `default` itself when no override applies.
    pub fn path_config_or<'a>(
        &'a self,
        file_path: &str,
        config_path: &str,
        default: &'a ConfigValue,
    ) -> Result<&'a ConfigValue, ConfigError> {
        Ok(self.path_config(file_path, config_path)?.unwrap_or(default))
    }

    /// Per-file lookup: the first matching override if any, otherwise the
    /// analyzer's base `config`.
    pub fn file_config(
        &self,
        file_path: &str,
        config_path: &str,
    ) -> Result<&ConfigValue, ConfigError> {
        let (path, analyzer) = self.parse(config_path)?;
        let base = analyzer
            .config()
            .ok_or_else(|| ConfigError::NoPerFileConfig(path.analyzer().to_string()))?;

        let file_path = normalize_path(file_path);
        let config = analyzer
            .path_configs()
            .and_then(|overrides| select_override(overrides, &file_path))
            .unwrap_or(base);

        walk(config, path.segments(), path.raw())
    }

    /// Lookup against the analyzer's whole entry, ignoring files and overrides.
    pub fn global_config(&self, config_path: &str) -> Result<&ConfigValue, ConfigError> {
        let (path, analyzer) = self.parse(config_path)?;
        walk(analyzer.entry(), path.segments(), path.raw())
    }

    fn parse<'p>(
        &self,
        config_path: &'p str,
    ) -> Result<(ConfigPath<'p>, &AnalyzerConfig), ConfigError> {
        let path = ConfigPath::parse(config_path);
        let analyzer = self
            .analyzers
            .get(path.analyzer())
            .ok_or_else(|| ConfigError::UnknownAnalyzer(path.analyzer().to_string()))?;
        Ok((path, analyzer))
    }
}

impl TryFrom<ConfigValue> for ProjectConfig {
    type Error = LoadError;

    fn try_from(value: ConfigValue) -> Result<Self, Self::Error> {
        match value {
            ConfigValue::Tree(tree) => Self::new(tree),
            _ => Err(LoadError::NotATree),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: serde_json::Value) -> ProjectConfig {
        ProjectConfig::try_from(ConfigValue::from(value)).unwrap()
    }

    fn php_analyzer() -> ProjectConfig {
        config(json!({
            "php_analyzer": {
                "config": { "severity": "medium", "metrics": { "depth": 3 } },
                "path_configs": [
                    { "paths": ["tests/*"], "config": { "severity": "low" } },
                    { "paths": ["*"], "config": { "severity": "high" } }
                ]
            },
            "x": { "config": { "a": { "b": 1 } } },
            "no_file_config": { "enabled": true },
            "bare": 7
        }))
    }

    #[test]
    fn path_config_follows_first_match() {
        let config = php_analyzer();
        let default = ConfigValue::from("default");

        let low = config
            .path_config_or("tests/Foo.php", "php_analyzer.severity", &default)
            .unwrap();
        assert_eq!(low, &ConfigValue::from("low"));

        let high = config
            .path_config_or("src/Foo.php", "php_analyzer.severity", &default)
            .unwrap();
        assert_eq!(high, &ConfigValue::from("high"));
    }

    #[test]
    fn path_config_returns_the_default_itself() {
        let config = php_analyzer();
        let default = ConfigValue::from(json!({ "fallback": true }));

        let found = config.path_config_or("src/Foo.php", "x.a.b", &default).unwrap();
        assert!(std::ptr::eq(found, &default));
        assert!(config.path_config("src/Foo.php", "x.a.b").unwrap().is_none());
    }

    #[test]
    fn path_config_propagates_missing_path_in_matched_override() {
        let config = php_analyzer();
        let default = ConfigValue::Null;
        let err = config
            .path_config_or("tests/Foo.php", "php_analyzer.metrics.depth", &default)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingConfigPath { ref path, ref walked }
                if path == "php_analyzer.metrics.depth" && walked.is_empty()
        ));
    }

    #[test]
    fn path_config_rejects_unknown_analyzer() {
        let config = php_analyzer();
        let default = ConfigValue::Null;
        let err = config
            .path_config_or("src/Foo.php", "unknown.a", &default)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAnalyzer(name) if name == "unknown"));
    }

    #[test]
    fn file_config_falls_back_to_base_config() {
        let config = php_analyzer();
        assert_eq!(
            config.file_config("anything.php", "x.a.b").unwrap(),
            &ConfigValue::Integer(1)
        );
        assert_eq!(
            config.file_config("tests/Foo.php", "php_analyzer.severity").unwrap(),
            &ConfigValue::from("low")
        );
    }

    #[test]
    fn file_config_does_not_mix_override_and_base() {
        let config = php_analyzer();
        // the matched override replaces the base tree wholesale
        let err = config
            .file_config("src/Foo.php", "php_analyzer.metrics.depth")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfigPath { .. }));
    }

    #[test]
    fn file_config_requires_per_file_section() {
        let config = php_analyzer();
        let err = config.file_config("src/Foo.php", "no_file_config.a").unwrap_err();
        assert!(matches!(err, ConfigError::NoPerFileConfig(name) if name == "no_file_config"));

        let err = config.file_config("src/Foo.php", "bare").unwrap_err();
        assert!(matches!(err, ConfigError::NoPerFileConfig(_)));
    }

    #[test]
    fn global_config_walks_the_raw_entry() {
        let config = php_analyzer();
        assert_eq!(
            config.global_config("no_file_config.enabled").unwrap(),
            &ConfigValue::Bool(true)
        );
        assert_eq!(
            config.global_config("php_analyzer.config.metrics.depth").unwrap(),
            &ConfigValue::Integer(3)
        );
        assert_eq!(config.global_config("bare").unwrap(), &ConfigValue::Integer(7));
        assert_eq!(
            config.global_config("php_analyzer.path_configs.1.paths.0").unwrap(),
            &ConfigValue::from("*")
        );
    }

    #[test]
    fn global_config_reports_unknown_analyzer() {
        let err = php_analyzer().global_config("unknown_analyzer.a").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAnalyzer(name) if name == "unknown_analyzer"));
    }

    #[test]
    fn file_paths_are_normalized_before_matching() {
        let config = php_analyzer();
        assert_eq!(
            config.file_config(".\\tests\\Foo.php", "php_analyzer.severity").unwrap(),
            &ConfigValue::from("low")
        );
    }

    #[test]
    fn rejects_non_mapping_root() {
        assert!(matches!(
            ProjectConfig::from_json_str("[1, 2]"),
            Err(LoadError::NotATree)
        ));
        assert!(matches!(
            ProjectConfig::from_json_str("{"),
            Err(LoadError::Syntax(_))
        ));
    }

    #[test]
    fn null_analyzer_entry_is_unknown() {
        let config = ProjectConfig::from_json_str(r#"{ "x": null, "y": { "config": {} } }"#).unwrap();
        let default = ConfigValue::Null;

        assert!(matches!(
            config.global_config("x"),
            Err(ConfigError::UnknownAnalyzer(name)) if name == "x"
        ));
        assert!(matches!(
            config.file_config("src/Foo.php", "x.a"),
            Err(ConfigError::UnknownAnalyzer(name)) if name == "x"
        ));
        assert!(matches!(
            config.path_config_or("src/Foo.php", "x.a", &default),
            Err(ConfigError::UnknownAnalyzer(name)) if name == "x"
        ));
        assert!(config.analyzer("x").is_none());
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn lists_analyzer_names() {
        let config = php_analyzer();
        let names: Vec<&str> = config.analyzer_names().collect();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"php_analyzer"));
        assert!(!config.is_empty());
        assert_eq!(config.len(), 4);
    }
}
