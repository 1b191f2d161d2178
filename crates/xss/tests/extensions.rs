use xss::{
    ExtensionStore, Pipeline, Platform, ResolverConfig, StyleRegistry, StyleValue, Viewport,
    record, sheet,
};

fn pipeline(config: &ResolverConfig) -> Pipeline {
    Pipeline::standard(config, Viewport::new(375.0, 812.0))
}

#[test]
fn test_transition_is_extracted_and_normalized() {
    let config = ResolverConfig::new(Platform::Ios);
    let mut registry = StyleRegistry::new();
    let mut store = ExtensionStore::from_config(&config);

    let resolved = pipeline(&config)
        .resolve(
            sheet! {
                "card" => record! {
                    "elevation" => 2,
                    "transition" => record! {
                        "duration" => 250,
                        "transition" => vec!["opacity", "elevation"],
                    },
                },
            },
            &mut registry,
            &mut store,
        )
        .unwrap();

    let card = resolved.styles.get("card").unwrap();
    assert!(card.get("transition").is_none());

    let transition = store.get(resolved.id("card").unwrap()).transition.unwrap();
    assert_eq!(transition.get("duration"), Some(&StyleValue::Number(250.0)));
    assert_eq!(
        transition.get("transition"),
        Some(&StyleValue::from(vec![
            "opacity",
            "shadowOffset",
            "shadowRadius",
            "shadowColor",
            "shadowOpacity",
        ]))
    );
}

#[test]
fn test_focus_accumulates_across_passes_for_one_identity() {
    let config = ResolverConfig::default();
    let pipeline = pipeline(&config);
    let mut registry = StyleRegistry::keyed_by_name();
    let mut store = ExtensionStore::from_config(&config);

    let first = pipeline
        .resolve(
            sheet! {
                "input" => record! {
                    "borderWidth" => 1,
                    "transition" => record! { "duration" => 150 },
                    ":focus" => record! { "borderColor" => "blue" },
                },
            },
            &mut registry,
            &mut store,
        )
        .unwrap();
    let second = pipeline
        .resolve(
            sheet! {
                "input" => record! {
                    "borderWidth" => 1,
                    ":focus" => record! { "borderWidth" => 2 },
                },
            },
            &mut registry,
            &mut store,
        )
        .unwrap();

    let id = first.id("input").unwrap();
    assert_eq!(second.id("input"), Some(id), "same name keeps its identity");

    let extensions = store.get(id);
    assert_eq!(
        extensions.transition,
        Some(record! { "duration" => 150 }),
        "a focus-only pass leaves the transition untouched"
    );
    assert_eq!(
        extensions.focus,
        vec![
            record! { "borderColor" => "blue" },
            record! { "borderWidth" => 2 },
        ]
    );
}

#[test]
fn test_conditional_focus_branch() {
    let config = ResolverConfig::default();
    let mut registry = StyleRegistry::new();
    let mut store = ExtensionStore::from_config(&config);

    let resolved = pipeline(&config)
        .resolve(
            sheet! {
                "field" => record! {
                    ":focus" => record! {
                        "borderColor" => "blue",
                        "@media (min-width: 1000px)" => record! { "borderColor" => "navy" },
                    },
                },
            },
            &mut registry,
            &mut store,
        )
        .unwrap();

    let focus = store.get(resolved.id("field").unwrap()).focus;
    assert_eq!(focus, vec![record! { "borderColor" => "blue" }]);
}

#[test]
fn test_focus_block_shorthands_are_expanded() {
    let config = ResolverConfig::default();
    let mut registry = StyleRegistry::new();
    let mut store = ExtensionStore::from_config(&config);

    let resolved = pipeline(&config)
        .resolve(
            sheet! {
                "field" => record! {
                    "borderWidth" => 1,
                    ":focus" => record! { "border" => "2px solid blue" },
                },
            },
            &mut registry,
            &mut store,
        )
        .unwrap();

    let focus = store.get(resolved.id("field").unwrap()).focus;
    assert_eq!(
        focus,
        vec![record! { "borderWidth" => 2, "borderStyle" => "solid", "borderColor" => "blue" }],
        "focus overrides must not carry shorthands"
    );
}

#[test]
fn test_unknown_identity_has_no_extensions() {
    let store = ExtensionStore::default();
    assert!(store.get(xss::StyleId(1)).is_empty());
}
