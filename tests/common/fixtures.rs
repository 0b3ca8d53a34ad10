use serde_json::{Value, json};
use tessera::RenderContext;

/// Module ids and registry baselines used across the integration tests.
pub const STANDARD_MODULES: &[(&str, i32)] = &[
    ("background", 1),
    ("image", 5),
    ("bullets", 20),
    ("textFields", 30),
    ("title", 57),
    ("logo", 80),
];

/// A config with the given render order and no rules.
pub fn config(render_order: Value) -> Value {
    json!({ "renderOrder": render_order, "isCustom": true })
}

/// A config with the given render order and spatial rules.
pub fn config_with_rules(render_order: Value, spatial_rules: Value) -> Value {
    json!({ "renderOrder": render_order, "spatialRules": spatial_rules, "isCustom": true })
}

/// Title, bullets with the given items, and a logo.
pub fn context_with_bullets(items: Value) -> RenderContext {
    RenderContext::new(1080, 1350)
        .with_module("title", json!({ "text": "Quarterly update" }))
        .with_module("bullets", json!({ "items": items }))
        .with_module("logo", json!({ "text": "ACME" }))
}

/// Every standard module enabled with some content.
pub fn full_context() -> RenderContext {
    RenderContext::new(1080, 1350)
        .with_base_url("https://assets.example.com/")
        .with_module("background", json!({ "text": "bg" }))
        .with_module("image", json!({ "url": "hero.png", "text": "img" }))
        .with_module("bullets", json!({ "items": ["Faster", "Cheaper"] }))
        .with_module("textFields", json!({ "items": ["Q3", "Revenue up", "Margin flat"] }))
        .with_module("title", json!({ "text": "Quarterly update" }))
        .with_module("logo", json!({ "text": "ACME" }))
}

/// A manifest of handlebars modules covering the preset module ids.
pub fn manifest_json() -> &'static str {
    r#"{
        "modules": [
            { "id": "image", "zIndex": 5, "fragment": "<img src=\"{{url}}\">" },
            {
                "id": "bullets",
                "zIndex": 20,
                "fragment": "<ul>{{#each items}}<li>{{this}}</li>{{/each}}</ul>",
                "itemsField": "items",
                "itemTemplate": "<li>{{item}}</li>"
            },
            {
                "id": "textFields",
                "zIndex": 30,
                "displayName": "Text",
                "fragment": "{{#each fields}}<p>{{this}}</p>{{/each}}",
                "itemsField": "fields",
                "itemTemplate": "<p class=\"field-{{index}}\">{{item}}</p>"
            },
            { "id": "title", "zIndex": 57, "fragment": "<h1>{{text}}</h1>" },
            { "id": "logo", "zIndex": 80, "fragment": "<span class=\"logo\">{{text}}</span>" }
        ]
    }"#
}

/// A context matching `manifest_json`.
pub fn manifest_context(bullets: Value) -> RenderContext {
    RenderContext::new(1080, 1080)
        .with_module("image", json!({ "url": "hero.png" }))
        .with_module("bullets", json!({ "items": bullets }))
        .with_module("textFields", json!({ "fields": ["One", "Two"] }))
        .with_module("title", json!({ "text": "Hello" }))
        .with_module("logo", json!({ "text": "ACME" }))
}
