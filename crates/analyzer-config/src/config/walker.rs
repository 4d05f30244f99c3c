use crate::{error::ConfigError, value::ConfigValue};

/// Descends from `root` one segment at a time and returns the node reached.
///
/// A segment that does not exist (including any segment below a scalar) fails
/// with [`ConfigError::MissingConfigPath`], carrying `full_path` and the prefix
/// walked so far written as `.a.b`.
pub fn walk<'a>(
    root: &'a ConfigValue,
    segments: &[&str],
    full_path: &str,
) -> Result<&'a ConfigValue, ConfigError> {
    let mut current = root;
    let mut walked = String::new();

    for segment in segments {
        current = current
            .get(segment)
            .ok_or_else(|| ConfigError::MissingConfigPath {
                path: full_path.to_string(),
                walked: walked.clone(),
            })?;
        walked.push('.');
        walked.push_str(segment);
    }

    Ok(current)
}
