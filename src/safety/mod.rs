use crate::errors::PromptError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Markup names are substituted into the document verbatim, so they are
/// restricted to characters that cannot open, close or split a tag.
fn markup_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:-]*$").expect("static regex"))
}

/// Returns true if `name` is safe to splice into markup as an element name.
///
/// Rules:
/// - Must start with an ASCII letter or `_`.
/// - May continue with ASCII alphanumerics, `_`, `.`, `:` or `-`.
/// - Whitespace, `<`, `>`, `/`, quotes and `&` are never allowed.
pub fn is_markup_name(name: &str) -> bool {
    markup_name_re().is_match(name)
}

/// Tag name wrapping user-made file modifications in conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    pub fn new(name: impl Into<String>) -> Result<Self, PromptError> {
        let name = name.into();
        if !is_markup_name(&name) {
            return Err(PromptError::InvalidTagName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TagName {
    fn default() -> Self {
        Self("modifications".into())
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TagName {
    type Error = PromptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TagName> for String {
    fn from(value: TagName) -> Self {
        value.0
    }
}

/// Element names shipped with the stock chat UI.
pub const DEFAULT_HTML_ELEMENTS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "dd", "del", "details", "div", "dl", "dt", "em",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "ins", "kbd", "li", "ol", "p", "pre", "q",
    "rp", "ruby", "s", "samp", "source", "span", "strike", "strong", "sub", "summary", "sup",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul", "var",
];

/// Ordered, duplicate-free set of markup elements replies may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MarkupAllowlist(Vec<String>);

impl MarkupAllowlist {
    /// Validate every name and drop repeats, keeping first-seen order.
    pub fn new<I, S>(names: I) -> Result<Self, PromptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !is_markup_name(&name) {
                return Err(PromptError::InvalidElement(name));
            }
            if out.contains(&name) {
                tracing::debug!(element = %name, "dropping duplicate allowlisted element");
                continue;
            }
            out.push(name);
        }
        Ok(Self(out))
    }

    pub fn elements(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma separated, in supplied order: `b, code`.
    pub fn render(&self) -> String {
        self.0.join(", ")
    }
}

impl Default for MarkupAllowlist {
    fn default() -> Self {
        Self(DEFAULT_HTML_ELEMENTS.iter().map(|s| s.to_string()).collect())
    }
}

impl TryFrom<Vec<String>> for MarkupAllowlist {
    type Error = PromptError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MarkupAllowlist> for Vec<String> {
    fn from(value: MarkupAllowlist) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_tag_names() {
        for name in ["modifications", "diff", "bolt-file", "ns:tag", "_x1"] {
            assert!(TagName::new(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_markup_breaking_tag_names() {
        for name in ["", "a b", "<x", "x>", "a/b", "a\"b", "1abc", "tab\there", "x&y"] {
            assert_eq!(
                TagName::new(name),
                Err(PromptError::InvalidTagName(name.to_string()))
            );
        }
    }

    #[test]
    fn tag_name_deserialization_is_validated() {
        let ok: TagName = serde_json::from_str("\"changes\"").unwrap();
        assert_eq!(ok.as_str(), "changes");
        assert!(serde_json::from_str::<TagName>("\"<changes>\"").is_err());
    }

    #[test]
    fn allowlist_preserves_order_and_drops_duplicates() {
        let list = MarkupAllowlist::new(["code", "b", "code", "em", "b"]).unwrap();
        assert_eq!(list.elements(), ["code", "b", "em"]);
        assert_eq!(list.render(), "code, b, em");
    }

    #[test]
    fn allowlist_rejects_bad_element() {
        let err = MarkupAllowlist::new(["b", "<script>"]).unwrap_err();
        assert_eq!(err, PromptError::InvalidElement("<script>".into()));
    }

    #[test]
    fn default_allowlist_has_no_duplicates() {
        let list = MarkupAllowlist::default();
        let rebuilt = MarkupAllowlist::new(list.elements().to_vec()).unwrap();
        assert_eq!(list, rebuilt);
        assert_eq!(list.elements().len(), DEFAULT_HTML_ELEMENTS.len());
    }
}
