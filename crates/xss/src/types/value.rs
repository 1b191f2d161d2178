//! Dynamic style values, records, and sheets.
//!
//! Author-facing style sheets are loosely typed: a property may hold a number,
//! a string, an array (e.g. `transform`), or a nested record (conditional
//! branches, `shadowOffset`, extension blocks). This module provides:
//!
//! - [`StyleValue`]: A single property value
//! - [`StyleRecord`]: Property name to value mapping (one style entry)
//! - [`StyleSheet`]: Style name to record mapping
//!
//! Records are backed by ordered maps so resolved output is deterministic,
//! but no resolver depends on property order.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// A single style property value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A bare number (`borderWidth: 1`).
    Number(f64),
    /// A string (`borderStyle: "solid"`, `margin: "4px 8px"`).
    String(String),
    /// A boolean flag.
    Bool(bool),
    /// An ordered list, copied verbatim by every resolver.
    Array(Vec<StyleValue>),
    /// A nested record.
    Record(StyleRecord),
}

impl StyleValue {
    /// Returns the string slice if this is a [`StyleValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a [`StyleValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the nested record if this is a [`StyleValue::Record`].
    pub fn as_record(&self) -> Option<&StyleRecord> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the list if this is a [`StyleValue::Array`].
    pub fn as_array(&self) -> Option<&[StyleValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral numbers print without a trailing `.0` so they can be fed
            // back into shorthand parsing.
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Record(r) => write!(f, "{{{} properties}}", r.len()),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for StyleValue {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for StyleValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<StyleRecord> for StyleValue {
    fn from(r: StyleRecord) -> Self {
        Self::Record(r)
    }
}

impl<T: Into<StyleValue>> From<Vec<T>> for StyleValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

/// A mapping from property name to [`StyleValue`].
///
/// # Examples
///
/// ```
/// use xss::{record, StyleValue};
///
/// let style = record! {
///     "borderWidth" => 1,
///     "borderStyle" => "solid",
/// };
/// assert_eq!(style.get("borderWidth"), Some(&StyleValue::Number(1.0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRecord {
    properties: BTreeMap<String, StyleValue>,
}

impl StyleRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.properties.get(property)
    }

    pub fn contains_key(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    /// Sets a property, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        property: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.properties.insert(property.into(), value.into())
    }

    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.properties.remove(property)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, StyleValue> {
        self.properties.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, StyleValue> {
        self.properties.keys()
    }

    /// Shallow merge: every property of `other` replaces the same-named
    /// property of `self`.
    pub fn assign(&mut self, other: StyleRecord) {
        self.properties.extend(other.properties);
    }

    /// Deep merge: properties of `other` win on collision, except when both
    /// sides hold a record, in which case the records are merged key by key.
    ///
    /// Arrays are replaced, not concatenated.
    pub fn deep_merge(&mut self, other: StyleRecord) {
        for (property, incoming) in other.properties {
            let StyleValue::Record(nested) = incoming else {
                self.properties.insert(property, incoming);
                continue;
            };
            if let Some(StyleValue::Record(existing)) = self.properties.get_mut(&property) {
                existing.deep_merge(nested);
                continue;
            }
            self.properties.insert(property, StyleValue::Record(nested));
        }
    }

    /// Splits the record in two: properties for which `predicate` holds, and
    /// the rest.
    pub fn partition(self, predicate: impl Fn(&str) -> bool) -> (StyleRecord, StyleRecord) {
        let (picked, rest): (BTreeMap<_, _>, BTreeMap<_, _>) = self
            .properties
            .into_iter()
            .partition(|(property, _)| predicate(property));
        (Self { properties: picked }, Self { properties: rest })
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for StyleRecord {
    type Item = (String, StyleValue);
    type IntoIter = btree_map::IntoIter<String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

impl<'a> IntoIterator for &'a StyleRecord {
    type Item = (&'a String, &'a StyleValue);
    type IntoIter = btree_map::Iter<'a, String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

/// A mapping from style name to [`StyleRecord`].
///
/// This is both the input and the output of the resolution pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    entries: BTreeMap<String, StyleRecord>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StyleRecord> {
        self.entries.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: StyleRecord) -> Option<StyleRecord> {
        self.entries.insert(name.into(), record)
    }

    pub fn remove(&mut self, name: &str) -> Option<StyleRecord> {
        self.entries.remove(name)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, record: StyleRecord) -> Self {
        self.insert(name, record);
        self
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, StyleRecord> {
        self.entries.iter()
    }

    pub fn names(&self) -> btree_map::Keys<'_, String, StyleRecord> {
        self.entries.keys()
    }

    /// Applies `f` to every entry, failing on the first error.
    pub fn try_map_entries<E>(
        self,
        mut f: impl FnMut(&str, StyleRecord) -> Result<StyleRecord, E>,
    ) -> Result<StyleSheet, E> {
        let mut mapped = BTreeMap::new();
        for (name, record) in self.entries {
            let record = f(&name, record)?;
            mapped.insert(name, record);
        }
        Ok(Self { entries: mapped })
    }

    /// Applies `f` to every entry.
    pub fn map_entries(self, mut f: impl FnMut(&str, StyleRecord) -> StyleRecord) -> StyleSheet {
        self.entries
            .into_iter()
            .map(|(name, record)| {
                let record = f(&name, record);
                (name, record)
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, StyleRecord)> for StyleSheet {
    fn from_iter<I: IntoIterator<Item = (K, StyleRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for StyleSheet {
    type Item = (String, StyleRecord);
    type IntoIter = btree_map::IntoIter<String, StyleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a StyleSheet {
    type Item = (&'a String, &'a StyleRecord);
    type IntoIter = btree_map::Iter<'a, String, StyleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds a [`StyleRecord`] from `property => value` pairs.
///
/// Values are converted with [`Into<StyleValue>`], so numbers, strings,
/// booleans, vectors and nested records can be mixed freely.
#[macro_export]
macro_rules! record {
    () => {
        $crate::StyleRecord::new()
    };
    ($($property:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::StyleRecord::new();
        $( record.insert($property, $value); )+
        record
    }};
}

/// Builds a [`StyleSheet`] from `name => record` pairs.
#[macro_export]
macro_rules! sheet {
    () => {
        $crate::StyleSheet::new()
    };
    ($($name:expr => $record:expr),+ $(,)?) => {{
        let mut sheet = $crate::StyleSheet::new();
        $( sheet.insert($name, $record); )+
        sheet
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_merge_merges_nested_records_key_by_key() {
        let mut base = record! {
            "color" => "red",
            "shadowOffset" => record! { "width" => 0, "height" => 2 },
        };
        base.deep_merge(record! {
            "color" => "blue",
            "shadowOffset" => record! { "height" => 4 },
        });

        assert_eq!(base.get("color"), Some(&StyleValue::from("blue")));
        assert_eq!(
            base.get("shadowOffset"),
            Some(&StyleValue::from(record! { "width" => 0, "height" => 4 })),
            "nested records should merge rather than be replaced"
        );
    }

    #[test]
    fn test_deep_merge_replaces_arrays() {
        let mut base = record! { "transform" => vec![record! { "scale" => 2 }] };
        base.deep_merge(record! { "transform" => vec![record! { "rotate" => "45deg" }] });

        let transform = base.get("transform").and_then(StyleValue::as_array).unwrap();
        assert_eq!(transform.len(), 1, "arrays are replaced, not concatenated");
    }

    #[test]
    fn test_display_integral_number_has_no_fraction() {
        assert_eq!(StyleValue::Number(4.0).to_string(), "4");
        assert_eq!(StyleValue::Number(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_partition_splits_by_property_name() {
        let style = record! { "color" => "red", "transition" => "opacity" };
        let (picked, rest) = style.partition(|p| p == "transition");

        assert!(picked.contains_key("transition"));
        assert!(!rest.contains_key("transition"));
        assert!(rest.contains_key("color"));
    }
}
