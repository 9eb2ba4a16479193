//! Configuration for loading scripts.

use cue_schema::{MapConfig, VariantMatching};

/// Configuration for a [`ScriptLoader`](crate::ScriptLoader).
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// How parameter objects are matched against variants.
    pub matching: VariantMatching,
    /// File extension of script files, without the dot.
    pub extension: String,
    /// Log and drop commands with no registered name instead of failing.
    pub skip_unknown_commands: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            matching: VariantMatching::Exact,
            extension: "json".to_string(),
            skip_unknown_commands: false,
        }
    }
}

impl LoaderConfig {
    /// Set the variant matching rule.
    pub fn with_matching(mut self, matching: VariantMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Set the script file extension. A leading dot is dropped.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Skip unknown commands instead of failing.
    pub fn with_skip_unknown_commands(mut self, skip: bool) -> Self {
        self.skip_unknown_commands = skip;
        self
    }

    /// Mapper options derived from this config.
    pub fn map_config(&self) -> MapConfig {
        MapConfig::default().with_matching(self.matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = LoaderConfig::default();
        assert_eq!(cfg.matching, VariantMatching::Exact);
        assert_eq!(cfg.extension, "json");
        assert!(!cfg.skip_unknown_commands);
    }

    #[test]
    fn builder_methods() {
        let cfg = LoaderConfig::default()
            .with_matching(VariantMatching::IgnoreExtraKeys)
            .with_extension(".cue")
            .with_skip_unknown_commands(true);
        assert_eq!(cfg.extension, "cue");
        assert!(cfg.skip_unknown_commands);
        assert_eq!(cfg.map_config().matching, VariantMatching::IgnoreExtraKeys);
    }
}
