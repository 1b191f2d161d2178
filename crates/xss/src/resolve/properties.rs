//! Custom-property resolution.
//!
//! [`CustomProperties`] maps property names to transforms. Each transform
//! receives the raw value and returns the longhand record to merge in its
//! place; an empty record deletes the property. Properties whose names start
//! with an ignored prefix (`&`, `@global`, ...) are stripped.
//!
//! ## Resolution Order
//!
//! For every property of a record:
//!
//! 1. A registered transform wins
//! 2. Otherwise an ignored prefix drops the property
//! 3. Otherwise a `:focus` record is resolved recursively
//! 4. Otherwise the property is copied unchanged

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::XssError;
use crate::resolve::classify::FOCUS_KEY;
use crate::resolve::pipeline::{Rule, RuleOutput};
use crate::types::{StyleRecord, StyleSheet, StyleValue};

/// A custom property transform.
pub type PropertyFn = Arc<dyn Fn(&StyleValue) -> StyleRecord + Send + Sync>;

/// Returns `true` if `property` starts with any of `prefixes`.
pub fn has_ignored_prefix(property: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| property.starts_with(prefix.as_str()))
}

/// Registry of custom property transforms plus ignored prefixes.
///
/// # Example
///
/// ```
/// use xss::resolve::properties::CustomProperties;
/// use xss::{record, StyleRecord};
///
/// let properties = CustomProperties::new()
///     .with("pointerEvents", |_| StyleRecord::new())
///     .with_ignore_prefixes(["&"]);
///
/// let resolved = properties.resolve(record! {
///     "color" => "red",
///     "pointerEvents" => "none",
///     "&:hover" => record! { "color" => "blue" },
/// });
/// assert_eq!(resolved, record! { "color" => "red" });
/// ```
#[derive(Clone, Default)]
pub struct CustomProperties {
    transforms: HashMap<String, PropertyFn>,
    ignore_prefixes: Vec<String>,
}

impl fmt::Debug for CustomProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.transforms.keys().collect();
        names.sort();
        f.debug_struct("CustomProperties")
            .field("transforms", &names)
            .field("ignore_prefixes", &self.ignore_prefixes)
            .finish()
    }
}

impl CustomProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the transform for `property`.
    pub fn register<F>(&mut self, property: impl Into<String>, transform: F)
    where
        F: Fn(&StyleValue) -> StyleRecord + Send + Sync + 'static,
    {
        self.transforms.insert(property.into(), Arc::new(transform));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, property: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&StyleValue) -> StyleRecord + Send + Sync + 'static,
    {
        self.register(property, transform);
        self
    }

    /// Replaces the ignored prefixes.
    pub fn with_ignore_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_prefixes(&self) -> &[String] {
        &self.ignore_prefixes
    }

    pub fn contains(&self, property: &str) -> bool {
        self.transforms.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn is_ignored(&self, property: &str) -> bool {
        has_ignored_prefix(property, &self.ignore_prefixes)
    }

    /// Resolves every property of `style`.
    pub fn resolve(&self, style: StyleRecord) -> StyleRecord {
        let mut resolved = StyleRecord::new();
        for (property, value) in style {
            if let Some(transform) = self.transforms.get(&property) {
                resolved.assign(transform(&value));
            } else if self.is_ignored(&property) {
                continue;
            } else if let (FOCUS_KEY, StyleValue::Record(block)) = (property.as_str(), &value) {
                let block = self.resolve(block.clone());
                resolved.insert(property, block);
            } else {
                resolved.insert(property, value);
            }
        }
        resolved
    }
}

/// Sheet rule applying [`CustomProperties::resolve`] to every entry.
#[derive(Debug, Clone)]
pub struct CustomPropertyRule {
    properties: Arc<CustomProperties>,
}

impl CustomPropertyRule {
    pub fn new(properties: impl Into<Arc<CustomProperties>>) -> Self {
        Self {
            properties: properties.into(),
        }
    }

    pub fn properties(&self) -> &CustomProperties {
        &self.properties
    }
}

impl Rule for CustomPropertyRule {
    fn name(&self) -> &str {
        "custom-properties"
    }

    fn apply(&self, sheet: StyleSheet) -> Result<RuleOutput, XssError> {
        let styles = sheet.map_entries(|_, record| self.properties.resolve(record));
        Ok(RuleOutput::new(styles))
    }
}

/// Sheet rule dropping whole entries whose name starts with an ignored
/// prefix (`@global`, `@keyframes`, nested selectors, ...).
#[derive(Debug, Clone)]
pub struct IgnorePrefixesRule {
    prefixes: Vec<String>,
}

impl IgnorePrefixesRule {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Rule for IgnorePrefixesRule {
    fn name(&self) -> &str {
        "ignore-prefixes"
    }

    fn apply(&self, sheet: StyleSheet) -> Result<RuleOutput, XssError> {
        let styles = sheet
            .into_iter()
            .filter(|(name, _)| {
                let ignored = has_ignored_prefix(name, &self.prefixes);
                if ignored {
                    log::debug!("dropping ignored style entry `{}`", name);
                }
                !ignored
            })
            .collect();
        Ok(RuleOutput::new(styles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, sheet};

    fn uppercase_color() -> CustomProperties {
        CustomProperties::new().with("color", |value: &StyleValue| {
            let mut out = StyleRecord::new();
            if let Some(color) = value.as_str() {
                out.insert("color", color.to_uppercase());
            }
            out
        })
    }

    #[test]
    fn test_transform_output_is_merged() {
        let properties = CustomProperties::new().with("size", |value: &StyleValue| {
            record! { "width" => value.clone(), "height" => value.clone() }
        });
        assert_eq!(
            properties.resolve(record! { "size" => 10, "opacity" => 0.5 }),
            record! { "width" => 10, "height" => 10, "opacity" => 0.5 }
        );
    }

    #[test]
    fn test_registered_transform_wins_over_ignored_prefix() {
        let properties = uppercase_color().with_ignore_prefixes(["col"]);
        assert_eq!(
            properties.resolve(record! { "color" => "red", "column" => 2 }),
            record! { "color" => "RED" }
        );
    }

    #[test]
    fn test_ignored_prefixes_are_stripped_regardless_of_value() {
        let properties = CustomProperties::new().with_ignore_prefixes(["[", "#", "&"]);
        let resolved = properties.resolve(record! {
            "[data-active]" => record! { "color" => "red" },
            "#id" => "x",
            "&:hover" => 1,
            "opacity" => 1,
        });
        assert_eq!(resolved, record! { "opacity" => 1 });
    }

    #[test]
    fn test_focus_block_is_resolved() {
        let properties = uppercase_color().with_ignore_prefixes(["&"]);
        let resolved = properties.resolve(record! {
            "color" => "red",
            ":focus" => record! { "color" => "blue", "&:hover" => 1 },
        });
        assert_eq!(
            resolved,
            record! { "color" => "RED", ":focus" => record! { "color" => "BLUE" } }
        );
    }

    #[test]
    fn test_non_record_focus_is_copied() {
        let properties = uppercase_color();
        assert_eq!(
            properties.resolve(record! { ":focus" => 1 }),
            record! { ":focus" => 1 }
        );
    }

    #[test]
    fn test_rule_applies_to_every_entry() {
        let rule = CustomPropertyRule::new(uppercase_color());
        let out = rule
            .apply(sheet! {
                "a" => record! { "color" => "red" },
                "b" => record! { "color" => "blue" },
            })
            .unwrap();
        assert_eq!(
            out.styles,
            sheet! {
                "a" => record! { "color" => "RED" },
                "b" => record! { "color" => "BLUE" },
            }
        );
    }

    #[test]
    fn test_ignore_prefixes_rule_drops_entries_by_name() {
        let rule = IgnorePrefixesRule::new(["@global", "@keyframes"]);
        let out = rule
            .apply(sheet! {
                "@global" => record! { "body" => record! { "margin" => 0 } },
                "@keyframes spin" => record! { "from" => record! { "opacity" => 0 } },
                "root" => record! { "flex" => 1 },
            })
            .unwrap();
        assert_eq!(out.styles, sheet! { "root" => record! { "flex" => 1 } });
    }
}
