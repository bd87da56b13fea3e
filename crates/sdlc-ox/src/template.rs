//! Prompt templates with `{slot}` substitution.
//!
//! Rendering is an explicit two-stage operation: placeholders are scanned
//! when the template is constructed and substituted when it is rendered.
//! A placeholder without a value is a typed error, never a silent blank.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template slot '{{{0}}}' has no value")]
    MissingValue(String),
}

/// Fixed text with named substitution slots.
///
/// A slot is `{name}` where `name` is ASCII alphanumeric or `_`. Braces
/// that do not form a slot are kept as literal text, and substituted
/// values are never re-scanned.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    slots: Vec<String>,
}

impl PromptTemplate {
    pub fn from_template(template: impl Into<String>) -> Self {
        let template = template.into();
        let slots = scan_slots(&template);
        Self { template, slots }
    }

    /// Slot names in order of first appearance.
    #[must_use]
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Substitute every slot with its value from `values`.
    ///
    /// Extra values are ignored.
    ///
    /// # Errors
    ///
    /// [`TemplateError::MissingValue`] when a slot has no matching value.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            match placeholder_at(&rest[open..]) {
                Some((name, consumed)) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| TemplateError::MissingValue(name.to_string()))?;
                    rendered.push_str(value);
                    rest = &rest[open + consumed..];
                }
                None => {
                    rendered.push('{');
                    rest = &rest[open + 1..];
                }
            }
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

/// Parse `{name}` at the start of `text` (which begins with `{`).
/// Returns the slot name and the number of bytes the placeholder spans.
fn placeholder_at(text: &str) -> Option<(&str, usize)> {
    let rest = &text[1..];
    let close = rest.find('}')?;
    let name = &rest[..close];
    if !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Some((name, close + 2))
    } else {
        None
    }
}

fn scan_slots(template: &str) -> Vec<String> {
    let mut slots: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        match placeholder_at(&rest[open..]) {
            Some((name, consumed)) => {
                if !slots.iter().any(|s| s == name) {
                    slots.push(name.to_string());
                }
                rest = &rest[open + consumed..];
            }
            None => rest = &rest[open + 1..],
        }
    }
    slots
}
