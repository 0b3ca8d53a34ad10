//! Inline style assembly and attribute escaping for serialized markup.

use itertools::Itertools;

/// An ordered list of inline CSS declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(&'static str, String)>,
    raw: Vec<String>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &'static str, value: impl Into<String>) -> &mut Self {
        self.declarations.push((property, value.into()));
        self
    }

    /// Sets `property` when `value` is present and not blank.
    pub fn set_opt(&mut self, property: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.set(property, value);
        }
        self
    }

    /// Appends free-form CSS such as a user-supplied `customStyle`.
    pub fn push_raw(&mut self, css: Option<&str>) -> &mut Self {
        if let Some(css) = css.map(str::trim).filter(|c| !c.is_empty()) {
            self.raw.push(css.trim_end_matches(';').to_string());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.raw.is_empty()
    }

    pub fn contains(&self, property: &str) -> bool {
        self.declarations.iter().any(|(p, _)| *p == property)
    }

    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(property, value)| format!("{}: {};", property, value))
            .chain(self.raw.iter().map(|css| format!("{};", css)))
            .join(" ")
    }
}

/// Escapes a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Tag names are restricted to ASCII alphanumerics and hyphens; anything else becomes `div`.
pub fn sanitize_tag(tag: &str) -> &str {
    let tag = tag.trim();
    let valid = !tag.is_empty()
        && tag.starts_with(|c: char| c.is_ascii_alphabetic())
        && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid { tag } else { "div" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_css_orders_declarations() {
        let mut style = InlineStyle::new();
        style
            .set("margin-top", "4px")
            .set_opt("flex-basis", Some("  "))
            .set_opt("flex-grow", Some("1"))
            .push_raw(Some("color: red;"));
        assert_eq!(style.to_css(), "margin-top: 4px; flex-grow: 1; color: red;");
        assert!(style.contains("flex-grow"));
        assert!(!style.contains("flex-basis"));
    }

    #[test]
    fn test_empty_style() {
        let mut style = InlineStyle::new();
        style.set_opt("gap", None).push_raw(Some(" "));
        assert!(style.is_empty());
        assert_eq!(style.to_css(), "");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(
            escape_attr(r#"font-family: "A&B" <x>"#),
            "font-family: &quot;A&amp;B&quot; &lt;x&gt;"
        );
    }

    #[test]
    fn test_sanitize_tag() {
        assert_eq!(sanitize_tag("section"), "section");
        assert_eq!(sanitize_tag("my-card"), "my-card");
        assert_eq!(sanitize_tag("script><img"), "div");
        assert_eq!(sanitize_tag("1div"), "div");
    }
}
