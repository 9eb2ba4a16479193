use std::collections::BTreeSet;

use cue_json::{Object, Value};
use cue_schema::{
    FieldKind, FieldValue, Mapper, RecordDescriptor, SchemaError, SchemaRegistry, VariantResolver,
};
use proptest::prelude::*;

/// Pairwise-distinct field sets, one per variant.
fn arb_shapes() -> impl Strategy<Value = Vec<BTreeSet<String>>> {
    prop::collection::btree_set(prop::collection::btree_set("[a-z]{1,6}", 1..5), 1..6)
        .prop_map(|shapes| shapes.into_iter().collect())
}

fn registry_for(shapes: &[BTreeSet<String>]) -> SchemaRegistry {
    shapes
        .iter()
        .enumerate()
        .fold(SchemaRegistry::builder(), |builder, (i, shape)| {
            let descriptor = shape
                .iter()
                .fold(RecordDescriptor::new(format!("V{i}")), |d, name| d.string(name.as_str()));
            builder.add_variant("Base", descriptor)
        })
        .build()
        .unwrap()
}

fn object_with(keys: &BTreeSet<String>, upper: bool) -> Value {
    let obj: Object = keys
        .iter()
        .map(|k| {
            let key = if upper { k.to_uppercase() } else { k.clone() };
            (key, Value::from(k.as_str()))
        })
        .collect();
    Value::Object(obj)
}

proptest! {
    #[test]
    fn each_shape_resolves_to_its_variant(shapes in arb_shapes(), upper in any::<bool>()) {
        let registry = registry_for(&shapes);
        let resolver = VariantResolver::new(&registry);
        for (i, shape) in shapes.iter().enumerate() {
            let value = object_with(shape, upper);
            let object = value.as_object().unwrap();
            let found = resolver.resolve_object("Base", object).unwrap();
            prop_assert_eq!(found.name(), format!("V{i}"));
        }
    }

    #[test]
    fn unknown_shape_is_unresolved(shapes in arb_shapes(), extra in "[0-9]{1,4}") {
        let registry = registry_for(&shapes);
        let resolver = VariantResolver::new(&registry);
        let mut keys = shapes[0].clone();
        // Generated field names are letters only, so a digit key matches no shape
        // even after case folding.
        keys.insert(extra);
        let is_unresolved = matches!(
            resolver.resolve("Base", &keys),
            Err(SchemaError::Unresolved { .. })
        );
        prop_assert!(is_unresolved);
    }

    #[test]
    fn list_mapping_keeps_order_and_length(
        shapes in arb_shapes(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
    ) {
        let registry = registry_for(&shapes);
        let chosen: Vec<usize> = picks.iter().map(|ix| ix.index(shapes.len())).collect();
        let value = Value::Array(chosen.iter().map(|&i| object_with(&shapes[i], false)).collect());

        let mapped = Mapper::new(&registry)
            .map(&value, &FieldKind::list_of(FieldKind::abstract_type("Base")))
            .unwrap();
        let names: Vec<String> = mapped
            .as_list()
            .unwrap()
            .iter()
            .filter_map(FieldValue::as_record)
            .map(|r| r.type_name().to_string())
            .collect();
        let expected: Vec<String> = chosen.iter().map(|i| format!("V{i}")).collect();
        prop_assert_eq!(names, expected);
    }
}

#[test]
fn duplicated_shape_is_ambiguous_naming_both() {
    let registry = SchemaRegistry::builder()
        .add_variant("Base", RecordDescriptor::new("Left").string("a").string("b"))
        .add_variant("Base", RecordDescriptor::new("Right").string("B").string("A"))
        .build()
        .unwrap();
    assert_eq!(registry.shape_conflicts().len(), 1);

    let keys: BTreeSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
    let err = VariantResolver::new(&registry).resolve("Base", &keys).unwrap_err();
    assert_eq!(
        err,
        SchemaError::Ambiguous {
            base: "Base".into(),
            candidates: vec!["Left".into(), "Right".into()],
        }
    );
}
