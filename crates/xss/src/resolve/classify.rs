//! Per-property classification.
//!
//! Every resolver needs to tell plain values from nested records, conditional
//! branches and extension blocks. [`classify`] makes that decision once per
//! property so resolvers can `match` instead of re-sniffing prefixes.

use crate::parser::media::conditional_query;
use crate::types::{StyleRecord, StyleValue};

/// Property name of the transition extension block.
pub const TRANSITION_KEY: &str = "transition";

/// Property name of the focus-override extension block.
pub const FOCUS_KEY: &str = ":focus";

/// The extension keys, in the order they are documented.
pub const EXTENSION_KEYS: [&str; 2] = [TRANSITION_KEY, FOCUS_KEY];

/// Which extension block a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    Transition,
    Focus,
}

impl ExtensionKind {
    pub fn from_property(property: &str) -> Option<Self> {
        match property {
            TRANSITION_KEY => Some(Self::Transition),
            FOCUS_KEY => Some(Self::Focus),
            _ => None,
        }
    }
}

/// Returns `true` for properties that are relocated to the extension store.
pub fn is_extension_key(property: &str) -> bool {
    ExtensionKind::from_property(property).is_some()
}

/// Classification of a single `property: value` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind<'a> {
    /// Numbers, strings, booleans and arrays. Copied verbatim.
    Scalar,
    /// A nested record that is not a conditional branch.
    Nested(&'a StyleRecord),
    /// An `@media` branch. `branch` is `None` when the author wrote a
    /// non-record value under a conditional key.
    Conditional {
        query: &'a str,
        branch: Option<&'a StyleRecord>,
    },
    /// A `transition` or `:focus` block.
    Extension(ExtensionKind),
}

/// Classifies one property of a style record.
///
/// ```
/// use xss::resolve::classify::{classify, PropertyKind};
/// use xss::{record, StyleValue};
///
/// let branch = StyleValue::from(record! { "padding" => 16 });
/// assert!(matches!(
///     classify("@media (min-width: 600px)", &branch),
///     PropertyKind::Conditional { query: "(min-width: 600px)", .. }
/// ));
/// assert_eq!(classify("padding", &StyleValue::from(8)), PropertyKind::Scalar);
/// ```
pub fn classify<'a>(property: &'a str, value: &'a StyleValue) -> PropertyKind<'a> {
    if let Some(query) = conditional_query(property) {
        return PropertyKind::Conditional {
            query,
            branch: value.as_record(),
        };
    }
    if let Some(kind) = ExtensionKind::from_property(property) {
        return PropertyKind::Extension(kind);
    }
    match value {
        StyleValue::Record(nested) => PropertyKind::Nested(nested),
        _ => PropertyKind::Scalar,
    }
}
