//! Extension extraction and the extension store.
//!
//! Extension blocks are directives the renderer cannot express as static
//! style properties:
//!
//! ```text
//! button: {
//!     opacity: 1,
//!     transition: { duration: 300, easing: "ease-in", transition: ["opacity", "elevation"] },
//!     ":focus": { borderColor: "blue" },
//! }
//! ```
//!
//! [`extract_extensions`] runs after every other rule. It removes the
//! extension keys from each entry, registers the remaining record with the
//! host's identity allocator, and files the blocks in an [`ExtensionStore`]
//! under that identity:
//!
//! - `transition` replaces any earlier transition for the identity; its
//!   `transition` property list has `elevation` expanded to the platform's
//!   elevation properties
//! - `:focus` is appended to the identity's focus overrides
//!
//! The store is owned by the host and passed in by reference. It is not
//! synchronized; a host resolving on several threads wraps it in a mutex so
//! focus-list updates for one identity never interleave.

use std::collections::{BTreeMap, HashMap};

use crate::config::{DEFAULT_FOCUS_LIMIT, ResolverConfig};
use crate::resolve::builtin::elevation_properties;
use crate::resolve::classify::{ExtensionKind, FOCUS_KEY, TRANSITION_KEY, is_extension_key};
use crate::resolve::registry::{StyleId, StyleIdentities};
use crate::types::{Platform, StyleRecord, StyleSheet, StyleValue};

/// Extension blocks accumulated for one identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    /// Timing and behavior for the animation collaborator.
    pub transition: Option<StyleRecord>,
    /// Overrides applied while focused, oldest first.
    pub focus: Vec<StyleRecord>,
}

impl Extensions {
    pub fn is_empty(&self) -> bool {
        self.transition.is_none() && self.focus.is_empty()
    }

    /// Lays `other` over `self`: each field present in `other` replaces the
    /// same field of `self`.
    pub fn overlay(&mut self, other: Extensions) {
        if other.transition.is_some() {
            self.transition = other.transition;
        }
        if !other.focus.is_empty() {
            self.focus = other.focus;
        }
    }

    /// All focus overrides flattened into one record; later overrides win.
    pub fn focus_style(&self) -> Option<StyleRecord> {
        if self.focus.is_empty() {
            return None;
        }
        let mut merged = StyleRecord::new();
        for style in &self.focus {
            merged.assign(style.clone());
        }
        Some(merged)
    }

    /// Names listed in the transition's `transition` property.
    pub fn animated_properties(&self) -> Vec<String> {
        let Some(list) = self.transition.as_ref().and_then(|t| t.get(TRANSITION_KEY)) else {
            return Vec::new();
        };
        match list {
            StyleValue::String(name) => vec![name.clone()],
            StyleValue::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Expands every `elevation` in a transition property list into the
/// properties elevation expands to on `platform`.
///
/// ```
/// use xss::resolve::extensions::normalize_transition_properties;
/// use xss::{Platform, StyleValue};
///
/// let list = StyleValue::from(vec!["opacity", "elevation"]);
/// assert_eq!(
///     normalize_transition_properties(&list, Platform::Android),
///     StyleValue::from(vec!["opacity", "elevation"]),
/// );
/// assert_eq!(
///     normalize_transition_properties(&StyleValue::from("elevation"), Platform::Ios),
///     StyleValue::from(vec!["shadowOffset", "shadowRadius", "shadowColor", "shadowOpacity"]),
/// );
/// ```
pub fn normalize_transition_properties(value: &StyleValue, platform: Platform) -> StyleValue {
    let expand = || {
        elevation_properties(platform)
            .iter()
            .map(|p| StyleValue::from(*p))
    };
    match value {
        StyleValue::String(name) if name == "elevation" => StyleValue::Array(expand().collect()),
        StyleValue::Array(items) => StyleValue::Array(
            items
                .iter()
                .flat_map(|item| match item.as_str() {
                    Some("elevation") => expand().collect::<Vec<_>>(),
                    _ => vec![item.clone()],
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Identity-keyed table of extension blocks.
///
/// Entries are created the first time an identity contributes an extension
/// block and are never evicted. Identical focus overrides are stored once,
/// and each identity keeps at most `focus_limit` overrides (oldest dropped).
#[derive(Debug, Clone)]
pub struct ExtensionStore {
    entries: HashMap<StyleId, Extensions>,
    platform: Platform,
    focus_limit: usize,
}

impl Default for ExtensionStore {
    fn default() -> Self {
        Self::new(Platform::default())
    }
}

impl ExtensionStore {
    pub fn new(platform: Platform) -> Self {
        Self {
            entries: HashMap::new(),
            platform,
            focus_limit: DEFAULT_FOCUS_LIMIT,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            entries: HashMap::new(),
            platform: config.platform,
            focus_limit: config.focus_limit.max(1),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn focus_limit(&self) -> usize {
        self.focus_limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files the extension keys of `picked` under `id`.
    ///
    /// Keys other than `transition` and `:focus` are ignored.
    pub fn add(&mut self, id: StyleId, picked: StyleRecord) {
        let mut transition = None;
        let mut focus = None;
        for (property, value) in picked {
            let Some(kind) = ExtensionKind::from_property(&property) else {
                continue;
            };
            match value {
                StyleValue::Record(block) => match kind {
                    ExtensionKind::Transition => transition = Some(block),
                    ExtensionKind::Focus => focus = Some(block),
                },
                other => log::warn!(
                    "extension `{}` of {} must be a record, got {}; ignored",
                    property,
                    id,
                    other.kind()
                ),
            }
        }
        if transition.is_none() && focus.is_none() {
            return;
        }

        let platform = self.platform;
        let focus_limit = self.focus_limit;
        let entry = self.entries.entry(id).or_default();

        if let Some(mut transition) = transition {
            if let Some(list) = transition.remove(TRANSITION_KEY) {
                transition.insert(
                    TRANSITION_KEY,
                    normalize_transition_properties(&list, platform),
                );
            }
            log::debug!("storing transition for {}", id);
            entry.transition = Some(transition);
        }

        if let Some(focus) = focus {
            if entry.focus.contains(&focus) {
                log::debug!("focus override for {} already stored", id);
            } else {
                entry.focus.push(focus);
                if entry.focus.len() > focus_limit {
                    let excess = entry.focus.len() - focus_limit;
                    entry.focus.drain(..excess);
                    log::debug!("dropped {} oldest focus overrides for {}", excess, id);
                }
            }
        }
    }

    /// Extensions for `id`; empty for unknown identities.
    pub fn get(&self, id: StyleId) -> Extensions {
        self.entries.get(&id).cloned().unwrap_or_default()
    }

    pub fn lookup(&self, id: StyleId) -> Option<&Extensions> {
        self.entries.get(&id)
    }

    /// Extensions for a composed style list. Later identities replace the
    /// `transition`/`focus` fields of earlier ones.
    pub fn collect<I>(&self, ids: I) -> Extensions
    where
        I: IntoIterator<Item = StyleId>,
    {
        let mut merged = Extensions::default();
        for id in ids {
            if let Some(extensions) = self.entries.get(&id) {
                merged.overlay(extensions.clone());
            }
        }
        merged
    }

    /// Extensions written inline on an unregistered record.
    pub fn inline(&self, style: &StyleRecord) -> Extensions {
        let mut extensions = Extensions::default();
        if let Some(StyleValue::Record(transition)) = style.get(TRANSITION_KEY) {
            let mut transition = transition.clone();
            if let Some(list) = transition.remove(TRANSITION_KEY) {
                transition.insert(
                    TRANSITION_KEY,
                    normalize_transition_properties(&list, self.platform),
                );
            }
            extensions.transition = Some(transition);
        }
        if let Some(StyleValue::Record(focus)) = style.get(FOCUS_KEY) {
            extensions.focus.push(focus.clone());
        }
        extensions
    }
}

/// Entries with extension keys removed, plus the identity of each.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSheet {
    pub styles: StyleSheet,
    pub ids: BTreeMap<String, StyleId>,
}

/// Splits extension keys out of every entry of `sheet`.
///
/// Each stripped entry is registered with `identities`; its extension blocks
/// are filed in `store` under the returned identity.
pub fn extract_extensions(
    sheet: StyleSheet,
    identities: &mut dyn StyleIdentities,
    store: &mut ExtensionStore,
) -> ExtractedSheet {
    let mut ids = BTreeMap::new();
    let styles = sheet.map_entries(|name, record| {
        let (picked, stripped) = record.partition(is_extension_key);
        let id = identities.register(name, &stripped);
        if !picked.is_empty() {
            store.add(id, picked);
        }
        ids.insert(name.to_string(), id);
        stripped
    });
    ExtractedSheet { styles, ids }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::resolve::registry::StyleRegistry;
    use crate::sheet;

    fn fade() -> StyleRecord {
        record! { "duration" => 300, "transition" => "opacity" }
    }

    #[test]
    fn test_extraction_strips_keys_and_files_blocks() {
        let mut registry = StyleRegistry::new();
        let mut store = ExtensionStore::new(Platform::Ios);
        let out = extract_extensions(
            sheet! {
                "button" => record! {
                    "opacity" => 1,
                    "transition" => fade(),
                    ":focus" => record! { "borderColor" => "blue" },
                },
                "label" => record! { "color" => "black" },
            },
            &mut registry,
            &mut store,
        );

        assert_eq!(
            out.styles,
            sheet! {
                "button" => record! { "opacity" => 1 },
                "label" => record! { "color" => "black" },
            }
        );
        let button = out.ids["button"];
        let extensions = store.get(button);
        assert_eq!(extensions.transition, Some(fade()));
        assert_eq!(extensions.focus, vec![record! { "borderColor" => "blue" }]);
        assert_eq!(registry.get(button), Some(&record! { "opacity" => 1 }));

        assert!(store.lookup(out.ids["label"]).is_none(), "no entry without extensions");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_transition_overwrites_focus_appends() {
        let mut store = ExtensionStore::default();
        let id = StyleId(1);
        store.add(id, record! { "transition" => fade() });
        store.add(id, record! { ":focus" => record! { "borderColor" => "blue" } });
        store.add(id, record! { ":focus" => record! { "borderWidth" => 2 } });
        store.add(id, record! { "transition" => record! { "duration" => 100 } });

        let extensions = store.get(id);
        assert_eq!(extensions.transition, Some(record! { "duration" => 100 }));
        assert_eq!(
            extensions.focus,
            vec![
                record! { "borderColor" => "blue" },
                record! { "borderWidth" => 2 },
            ]
        );
    }

    #[test]
    fn test_focus_only_update_leaves_transition() {
        let mut store = ExtensionStore::default();
        let id = StyleId(3);
        store.add(id, record! { "transition" => fade() });
        store.add(id, record! { ":focus" => record! { "opacity" => 0.8 } });
        assert_eq!(store.get(id).transition, Some(fade()));
    }

    #[test]
    fn test_focus_overrides_are_deduplicated_and_capped() {
        let config = ResolverConfig::default().with_focus_limit(2);
        let mut store = ExtensionStore::from_config(&config);
        let id = StyleId(9);
        for width in [1, 1, 2, 3] {
            store.add(id, record! { ":focus" => record! { "borderWidth" => width } });
        }
        assert_eq!(
            store.get(id).focus,
            vec![record! { "borderWidth" => 2 }, record! { "borderWidth" => 3 }]
        );
    }

    #[test]
    fn test_elevation_in_transition_list_is_expanded() {
        let mut store = ExtensionStore::new(Platform::Ios);
        let id = StyleId(1);
        store.add(
            id,
            record! {
                "transition" => record! { "transition" => vec!["opacity", "elevation"] },
            },
        );
        assert_eq!(
            store.get(id).animated_properties(),
            vec![
                "opacity",
                "shadowOffset",
                "shadowRadius",
                "shadowColor",
                "shadowOpacity"
            ]
        );
    }

    #[test]
    fn test_unknown_identity_is_empty() {
        let store = ExtensionStore::default();
        assert!(store.get(StyleId(42)).is_empty());
    }

    #[test]
    fn test_non_record_blocks_are_ignored() {
        let mut store = ExtensionStore::default();
        store.add(StyleId(1), record! { "transition" => "opacity 300ms" });
        assert!(store.is_empty());
    }

    #[test]
    fn test_collect_overlays_left_to_right() {
        let mut store = ExtensionStore::default();
        store.add(StyleId(1), record! { "transition" => fade() });
        store.add(StyleId(2), record! { ":focus" => record! { "opacity" => 0.5 } });
        store.add(
            StyleId(3),
            record! { "transition" => record! { "duration" => 50 } },
        );

        let merged = store.collect([StyleId(1), StyleId(2)]);
        assert_eq!(merged.transition, Some(fade()));
        assert_eq!(merged.focus.len(), 1);

        let merged = store.collect([StyleId(1), StyleId(3), StyleId(99)]);
        assert_eq!(merged.transition, Some(record! { "duration" => 50 }));
        assert!(merged.focus.is_empty());
    }

    #[test]
    fn test_focus_style_flattens_in_order() {
        let extensions = Extensions {
            transition: None,
            focus: vec![
                record! { "borderColor" => "blue", "borderWidth" => 1 },
                record! { "borderWidth" => 2 },
            ],
        };
        assert_eq!(
            extensions.focus_style(),
            Some(record! { "borderColor" => "blue", "borderWidth" => 2 })
        );
    }

    #[test]
    fn test_inline_picks_extensions() {
        let store = ExtensionStore::new(Platform::Android);
        let inline = store.inline(&record! {
            "opacity" => 1,
            "transition" => record! { "transition" => "elevation" },
        });
        assert_eq!(inline.animated_properties(), vec!["elevation"]);
        assert!(inline.focus.is_empty());
    }
}
