//! Template engine for emitted artifacts.
//!
//! Artifact layout lives in minijinja templates embedded into the crate;
//! emitters build a serializable view and render it by name. The
//! environment runs with `trim_blocks` and `lstrip_blocks` so block tags can
//! sit on their own lines without leaking blank lines into the output.

use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;

use crate::case::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
use crate::error::EmitError;

pub const KOTLIN_OBJECT: &str = "kotlin_object.kt";
pub const TOKEN_PROVIDER: &str = "token_provider.kt";
pub const RESOURCES: &str = "resources.xml";
pub const STYLESHEET: &str = "tokens.css";

const TEMPLATES: [(&str, &str); 4] = [
    (KOTLIN_OBJECT, include_str!("../../templates/kotlin_object.kt.jinja")),
    (TOKEN_PROVIDER, include_str!("../../templates/token_provider.kt.jinja")),
    (RESOURCES, include_str!("../../templates/resources.xml.jinja")),
    (STYLESHEET, include_str!("../../templates/tokens.css.jinja")),
];

/// MiniJinja environment preloaded with the artifact templates.
///
/// # Example
///
/// ```rust
/// use tokenweave::emit::TemplateEngine;
///
/// let engine = TemplateEngine::new().unwrap();
/// let out = engine
///     .render_str("{{ name | snake }}", &serde_json::json!({"name": "brandPrimary"}))
///     .unwrap();
/// assert_eq!(out, "brand_primary");
/// ```
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, EmitError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        // XML text is escaped explicitly with the `xml_escape` filter.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_filters(&mut env);

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|source| EmitError::Template {
                    name: name.to_string(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Renders a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, EmitError> {
        let wrap = |source| EmitError::Template {
            name: name.to_string(),
            source,
        };
        let template = self.env.get_template(name).map_err(wrap)?;
        template.render(data).map_err(wrap)
    }

    /// Renders a one-off template string with the same filters and settings.
    pub fn render_str<T: Serialize>(&self, source: &str, data: &T) -> Result<String, EmitError> {
        self.env
            .render_str(source, data)
            .map_err(|source| EmitError::Template {
                name: "<inline>".to_string(),
                source,
            })
    }
}

/// Registers the identifier and escaping filters.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("nl", |value: Value| -> String { format!("{}\n", value) });
    env.add_filter("xml_escape", |value: Value| -> String {
        quick_xml::escape::escape(value.to_string().as_str()).into_owned()
    });
    env.add_filter("camel", |value: String| -> String { to_camel_case(&value) });
    env.add_filter("pascal", |value: String| -> String { to_pascal_case(&value) });
    env.add_filter("snake", |value: String| -> String { to_snake_case(&value) });
    env.add_filter("kebab", |value: String| -> String { to_kebab_case(&value) });
}
