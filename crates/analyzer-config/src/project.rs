use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::{
    config::{normalize_path, ProjectConfig},
    error::ConfigError,
    value::ConfigValue,
};

/// A project file, known to the resolver only by its normalized path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    path: String,
}

impl File {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The files of a project together with its analyzer configuration.
#[derive(Debug, Clone, Default)]
pub struct Project {
    files: IndexMap<String, File>,
    config: ProjectConfig,
}

impl Project {
    pub fn new(files: impl IntoIterator<Item = File>, config: ProjectConfig) -> Self {
        let files = files
            .into_iter()
            .map(|file| (file.path.clone(), file))
            .collect();
        Self { files, config }
    }

    pub fn get_file(&self, path: &str) -> Result<&File, ConfigError> {
        let path = normalize_path(path);
        self.files
            .get(&path)
            .ok_or(ConfigError::UnknownFile(path))
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Returns a path specific setting, or `default` if no path override
    /// applies to `file`.
    pub fn path_config_or<'a>(
        &'a self,
        file: &File,
        config_path: &str,
        default: &'a ConfigValue,
    ) -> Result<&'a ConfigValue, ConfigError> {
        self.config.path_config_or(file.path(), config_path, default)
    }

    pub fn path_config(
        &self,
        file: &File,
        config_path: &str,
    ) -> Result<Option<&ConfigValue>, ConfigError> {
        self.config.path_config(file.path(), config_path)
    }

    /// Returns a file specific setting, looking at path overrides first and at
    /// the analyzer's default `config` second.
    pub fn file_config(&self, file: &File, config_path: &str) -> Result<&ConfigValue, ConfigError> {
        self.config.file_config(file.path(), config_path)
    }

    pub fn global_config(&self, config_path: &str) -> Result<&ConfigValue, ConfigError> {
        self.config.global_config(config_path)
    }

    pub fn file_config_as<T: DeserializeOwned>(
        &self,
        file: &File,
        config_path: &str,
    ) -> Result<T, ConfigError> {
        decode(self.file_config(file, config_path)?, config_path)
    }

    pub fn global_config_as<T: DeserializeOwned>(
        &self,
        config_path: &str,
    ) -> Result<T, ConfigError> {
        decode(self.global_config(config_path)?, config_path)
    }
}

fn decode<T: DeserializeOwned>(value: &ConfigValue, config_path: &str) -> Result<T, ConfigError> {
    value.decode().map_err(|source| ConfigError::Decode {
        path: config_path.to_string(),
        source,
    })
}
