//! Handlebars plumbing shared by the text emitters.
//!
//! Each emitter registers one template with the escape function of its
//! target syntax. Strict mode turns a missing field into a render error
//! instead of an empty string.

use crate::error::{RenderError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Register `template` under `name` and render it with `data`.
pub(crate) fn render<T: Serialize>(
    name: &str,
    template: &str,
    escape: fn(&str) -> String,
    data: &T,
) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(escape);
    handlebars
        .register_template_string(name, template)
        .map_err(RenderError::from)?;

    let rendered = handlebars.render(name, data).map_err(RenderError::from)?;
    log::trace!("Rendered template {name} ({} bytes)", rendered.len());
    Ok(rendered)
}

/// Escape a value for a double-quoted NSIS string.
pub(crate) fn escape_nsis(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '$' => escaped.push_str("$$"),
            '"' => escaped.push_str("$\\\""),
            '\n' => escaped.push_str("$\\n"),
            '\r' => escaped.push_str("$\\r"),
            '\t' => escaped.push_str("$\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a value for XML text or a double-quoted attribute.
pub(crate) fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_nsis() {
        assert_eq!(escape_nsis("Tango"), "Tango");
        assert_eq!(escape_nsis("a \"b\" $c"), "a $\\\"b$\\\" $$c");
        assert_eq!(escape_nsis("line\nbreak"), "line$\\nbreak");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("libstdc++-6.dll"), "libstdc++-6.dll");
        assert_eq!(escape_xml("A & B <\"x\">"), "A &amp; B &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn test_strict_mode_rejects_missing_field() {
        #[derive(Serialize)]
        struct Data {
            present: &'static str,
        }
        let result = render(
            "t",
            "{{present}} {{absent}}",
            handlebars::no_escape,
            &Data { present: "x" },
        );
        assert!(matches!(
            result,
            Err(crate::PackagingError::Render(RenderError::Render(_)))
        ));
    }

    #[test]
    fn test_escape_applies_to_values_only() {
        #[derive(Serialize)]
        struct Data {
            name: &'static str,
        }
        let out = render("t", "Name \"{{name}}\"", escape_nsis, &Data { name: "$x" }).unwrap();
        assert_eq!(out, "Name \"$$x\"");
    }
}
