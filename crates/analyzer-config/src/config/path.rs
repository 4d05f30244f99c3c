/// A dotted setting path such as `php_analyzer.metrics.max_depth`, split into
/// the analyzer name and the key segments below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath<'a> {
    raw: &'a str,
    analyzer: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> ConfigPath<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split('.');
        // `split` always yields at least one item
        let analyzer = parts.next().unwrap_or(raw);
        Self {
            raw,
            analyzer,
            segments: parts.collect(),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn analyzer(&self) -> &'a str {
        self.analyzer
    }

    /// Keys below the analyzer; empty for a bare analyzer name.
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }
}
