use std::collections::BTreeSet;

use cue_json::Object;
use cue_json::value::fold_key;

use crate::config::VariantMatching;
use crate::error::{SchemaError, SchemaResult};
use crate::registry::SchemaRegistry;
use crate::schema::RecordDescriptor;

/// Picks the concrete variant of an abstract base from an object's key set.
///
/// There is no type tag in the data. Under [`VariantMatching::Exact`] a
/// variant matches when its case-folded field names equal the key set; under
/// [`VariantMatching::IgnoreExtraKeys`] every field name must be among the
/// keys. Exactly one variant may match.
#[derive(Debug, Clone, Copy)]
pub struct VariantResolver<'r> {
    registry: &'r SchemaRegistry,
    matching: VariantMatching,
}

impl<'r> VariantResolver<'r> {
    /// A resolver using exact matching.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            matching: VariantMatching::default(),
        }
    }

    /// Set the matching rule.
    pub fn with_matching(mut self, matching: VariantMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Resolve `base` against a set of object keys. Keys are case-folded
    /// before comparison.
    pub fn resolve(&self, base: &str, keys: &BTreeSet<String>) -> SchemaResult<&'r RecordDescriptor> {
        let variants = self
            .registry
            .variants(base)
            .ok_or_else(|| SchemaError::UnknownType(base.to_string()))?;
        let keys: BTreeSet<String> = keys.iter().map(|k| fold_key(k)).collect();

        let mut matches: Vec<&'r RecordDescriptor> = variants
            .into_iter()
            .filter(|variant| self.matches(&variant.shape(), &keys))
            .collect();

        match matches.len() {
            0 => Err(SchemaError::Unresolved {
                base: base.to_string(),
                keys,
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(SchemaError::Ambiguous {
                base: base.to_string(),
                candidates: matches.iter().map(|d| d.name().to_string()).collect(),
            }),
        }
    }

    /// Resolve `base` against the effective key set of an object.
    pub fn resolve_object(&self, base: &str, object: &Object) -> SchemaResult<&'r RecordDescriptor> {
        self.resolve(base, &object.key_set())
    }

    fn matches(&self, shape: &BTreeSet<String>, keys: &BTreeSet<String>) -> bool {
        match self.matching {
            VariantMatching::Exact => shape == keys,
            VariantMatching::IgnoreExtraKeys => shape.is_subset(keys),
        }
    }
}
