//! End-to-end resolution tests across the class and prop engines.

use horizon_variance::prelude::*;
use serde_json::json;

fn badge() -> ClassVariants {
    ClassVariants::new("badge")
        .variant(
            "size",
            [
                ("sm", vec!["text-xs", "px-1"]),
                ("md", vec!["text-sm", "px-2"]),
                ("lg", vec!["text-base", "px-3"]),
            ],
        )
        .variant("tone", [("info", "bg-blue"), ("danger", "bg-red")])
        .variant("outlined", [("true", "border"), ("false", "border-0")])
        .default_variant("size", "md")
        .default_variant("outlined", "false")
        .compound(
            CompoundRule::new()
                .when("tone", "danger")
                .when("outlined", "true")
                .class("border-red"),
        )
        .compound(
            CompoundRule::new()
                .when("size", "lg")
                .when("tone", "danger")
                .class(vec!["font-bold", "uppercase"]),
        )
}

#[test]
fn full_resolution_flow() {
    let engine = badge();

    // Defaults only.
    assert_eq!(
        engine.resolve(&Selection::new()),
        "badge text-sm px-2 border-0"
    );

    // Explicit choices, one compound firing, passthrough classes at the end.
    let selection = Selection::new()
        .with("size", "lg")
        .with("tone", "danger")
        .with("outlined", true)
        .class("mx-auto");
    assert_eq!(
        engine.resolve(&selection),
        "badge text-base px-3 bg-red border border-red font-bold uppercase mx-auto"
    );

    // Opting out of an axis suppresses both its classes and the compound
    // rules that relied on its default.
    let cleared = Selection::new().with("tone", "danger").clear("outlined");
    assert_eq!(engine.resolve(&cleared), "badge text-sm px-2 bg-red");
}

#[test]
fn builder_and_config_agree() {
    let config = r##"{
        "base": "badge",
        "variants": {
            "size": {
                "sm": ["text-xs", "px-1"],
                "md": ["text-sm", "px-2"],
                "lg": ["text-base", "px-3"]
            },
            "tone": { "info": "bg-blue", "danger": "bg-red" },
            "outlined": { "true": "border", "false": "border-0" }
        },
        "defaultVariants": { "size": "md", "outlined": false },
        "compoundVariants": [
            { "tone": "danger", "outlined": true, "class": "border-red" },
            { "size": "lg", "tone": "danger", "class": ["font-bold", "uppercase"] }
        ]
    }"##;
    let loaded = ClassVariants::from_json(config).unwrap();
    let built = badge();

    let selections = [
        Selection::new(),
        Selection::new().with("size", "sm"),
        Selection::new().with("tone", "danger").with("outlined", true),
        Selection::new().with("size", "lg").with("tone", "danger"),
        Selection::new().clear("size").class("extra"),
    ];
    for selection in &selections {
        assert_eq!(loaded.resolve(selection), built.resolve(selection));
    }
}

#[test]
fn prop_engine_mirrors_class_engine() {
    let engine = PropVariants::new(json!({
        "role": "status",
        "style": { "display": "inline-flex" },
        "data-tags": ["badge"],
    }))
    .variant(
        "size",
        [
            ("sm", json!({ "style": { "fontSize": 11 } })),
            ("lg", json!({ "style": { "fontSize": 15 } })),
        ],
    )
    .variant(
        "tone",
        [("danger", json!({ "aria-live": "assertive", "data-tags": ["danger"] }))],
    )
    .default_variant("size", "sm")
    .compound(
        CompoundProps::new()
            .when("size", "lg")
            .when("tone", "danger")
            .props(json!({ "style": { "fontWeight": 700 } })),
    );

    let props = engine.resolve(
        &PropSelection::new()
            .with("size", "lg")
            .with("tone", "danger")
            .props(json!({ "style": { "display": "flex" } })),
    );

    assert_eq!(
        props,
        json!({
            "role": "status",
            "style": { "display": "flex", "fontSize": 15, "fontWeight": 700 },
            "aria-live": "assertive",
            "data-tags": ["badge", "danger"],
        })
    );
}

#[test]
fn engines_are_shareable_across_threads() {
    let engine = std::sync::Arc::new(badge());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.resolve(&Selection::new().with("tone", "info")))
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            "badge text-sm px-2 bg-blue border-0"
        );
    }
}
