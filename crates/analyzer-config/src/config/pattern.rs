use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::LoadError;

/// A compiled set of shell-style patterns; a path matches when any one of them does.
///
/// `*` and `?` also match `/`, the same as `fnmatch` without path flags.
#[derive(Debug, Clone)]
pub struct PathPatterns {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PathPatterns {
    pub fn new<I, S>(patterns: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let set = build_globset(&patterns)?;
        Ok(Self { patterns, set })
    }

    /// `path` is expected to be normalized with [`normalize_path`].
    pub fn is_match(&self, path: &str) -> bool {
        self.set.is_match(path)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Brings a file path into the form patterns are written against:
/// forward slashes, no leading `./`, no repeated separators.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut parts = path.split('/').filter(|part| !part.is_empty()).peekable();
    if !absolute {
        while parts.next_if_eq(&".").is_some() {}
    }
    let joined = parts.collect::<Vec<_>>().join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, LoadError> {
    patterns
        .iter()
        .try_fold(GlobSetBuilder::new(), |mut builder, pattern| {
            let glob = Glob::new(pattern).map_err(|err| LoadError::Glob(pattern.clone(), err))?;
            builder.add(glob);
            Ok::<_, LoadError>(builder)
        })?
        .build()
        .map_err(|err| LoadError::Glob(patterns.join(", "), err))
}
