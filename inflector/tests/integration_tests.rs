use std::sync::Arc;

use dsl_factory_inflector::{
    Base, InflectionTable, Inflector, InflectorError, IrregularWord, RuleInflector, RuleSpec,
    from_fn,
};

// ---------------------------------------------------------------------------
// English rules
// ---------------------------------------------------------------------------

#[test]
fn singularizes_common_field_names() {
    let english = RuleInflector::english();
    let cases = [
        ("items", "item"),
        ("assignments", "assignment"),
        ("categories", "category"),
        ("addresses", "address"),
        ("statuses", "status"),
        ("matrices", "matrix"),
        ("wolves", "wolf"),
        ("children", "child"),
        ("user_roles", "user_role"),
    ];
    for (plural, singular) in cases {
        assert_eq!(english.singularize(plural), singular, "singularize({plural})");
    }
}

#[test]
fn singular_and_uncountable_words_are_unchanged() {
    let english = RuleInflector::english();
    for word in ["item", "person", "information", "equipment", "sheep"] {
        assert_eq!(english.singularize(word), word);
    }
}

// ---------------------------------------------------------------------------
// Custom vocabularies
// ---------------------------------------------------------------------------

#[test]
fn rules_added_later_take_precedence() {
    let mut inflector = RuleInflector::english();
    inflector
        .add_singular(dsl_factory_inflector::Rule::new("(?i)data$", "datum").unwrap())
        .add_uncountable("metadata");

    assert_eq!(inflector.singularize("data"), "datum");
    assert_eq!(inflector.singularize("metadata"), "metadata");
}

#[test]
fn table_layers_over_english() {
    let table = InflectionTable {
        base: Base::English,
        singulars: vec![RuleSpec {
            pattern: "(?i)(kudo)s$".to_string(),
            replacement: "${1}s".to_string(),
        }],
        irregulars: vec![IrregularWord {
            singular: "cactus".to_string(),
            plural: "cacti".to_string(),
        }],
        ..InflectionTable::default()
    };

    let inflector = table.compile().unwrap();
    assert_eq!(inflector.singularize("kudos"), "kudos");
    assert_eq!(inflector.singularize("cacti"), "cactus");
    assert_eq!(inflector.singularize("items"), "item");
}

#[test]
fn invalid_table_pattern_is_reported() {
    let table = InflectionTable {
        base: Base::Empty,
        plurals: vec![RuleSpec {
            pattern: "([unclosed".to_string(),
            replacement: String::new(),
        }],
        ..InflectionTable::default()
    };

    match table.compile() {
        Err(InflectorError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "([unclosed"),
        other => panic!("expected an invalid pattern error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn closures_and_shared_inflectors_are_interchangeable() {
    let inflectors: Vec<Arc<dyn Inflector>> = vec![
        Arc::new(RuleInflector::english()),
        Arc::new(from_fn(|word: &str| {
            word.strip_suffix('s').unwrap_or(word).to_string()
        })),
    ];
    for inflector in &inflectors {
        assert_eq!(inflector.singularize("items"), "item");
    }
}
