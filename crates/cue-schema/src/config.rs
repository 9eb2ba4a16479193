//! Configuration for the object mapper.

/// How an object's key set is compared with a variant's field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantMatching {
    /// Key set and field-name set must be equal.
    #[default]
    Exact,
    /// Every declared field must be present; unknown keys are ignored.
    IgnoreExtraKeys,
}

/// Options for a [`Mapper`](crate::Mapper).
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    /// Variant matching rule for abstract fields.
    pub matching: VariantMatching,
}

impl MapConfig {
    /// Set the variant matching rule.
    pub fn with_matching(mut self, matching: VariantMatching) -> Self {
        self.matching = matching;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_exact() {
        assert_eq!(MapConfig::default().matching, VariantMatching::Exact);
    }

    #[test]
    fn builder_sets_matching() {
        let cfg = MapConfig::default().with_matching(VariantMatching::IgnoreExtraKeys);
        assert_eq!(cfg.matching, VariantMatching::IgnoreExtraKeys);
    }
}
