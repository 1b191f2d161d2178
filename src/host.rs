//! Host integration.
//!
//! [`Host`] owns the resolution pipeline together with the two pieces of
//! state a rendering layer keeps across passes: the identity registry and the
//! extension store. Components hand it style lists (registered identities
//! mixed with inline records) and get back what they need to render:
//!
//! - [`Host::flatten`]: the static style for the renderer
//! - [`Host::with_focus`]: the style list with focus overrides appended while
//!   focused
//! - [`Host::transition_props`]: the transition record for the animation
//!   collaborator

use std::collections::{BTreeMap, HashSet};

use xss::resolve::classify::is_extension_key;
use xss::{
    EnvironmentProvider, ExtensionStore, Extensions, Pipeline, ResolverConfig, StyleId,
    StyleRecord, StyleRegistry, StyleSheet,
};

use crate::error::{HostError, Result};
use crate::states::InteractionStates;

/// Identity allocated for each entry of a created sheet.
pub type StyleIds = BTreeMap<String, StyleId>;

/// One element of a composed style list.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    Registered(StyleId),
    Inline(StyleRecord),
}

impl From<StyleId> for Style {
    fn from(id: StyleId) -> Self {
        Style::Registered(id)
    }
}

impl From<StyleRecord> for Style {
    fn from(record: StyleRecord) -> Self {
        Style::Inline(record)
    }
}

/// The host side of style resolution.
#[derive(Debug)]
pub struct Host {
    config: ResolverConfig,
    pipeline: Pipeline,
    registry: StyleRegistry,
    store: ExtensionStore,
}

impl Host {
    /// A host running the standard pipeline for `config`.
    pub fn new<E>(config: ResolverConfig, environment: E) -> Self
    where
        E: EnvironmentProvider + 'static,
    {
        let pipeline = Pipeline::standard(&config, environment);
        Self::with_pipeline(config, pipeline)
    }

    /// A host running a custom pipeline.
    pub fn with_pipeline(config: ResolverConfig, pipeline: Pipeline) -> Self {
        let store = ExtensionStore::from_config(&config);
        Self {
            config,
            pipeline,
            registry: StyleRegistry::new(),
            store,
        }
    }

    /// Replaces the identity registry, e.g. with
    /// [`StyleRegistry::keyed_by_name`] for live-reloaded sheets.
    pub fn with_registry(mut self, registry: StyleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn extensions(&self) -> &ExtensionStore {
        &self.store
    }

    /// Resolves and registers every entry of `sheet`.
    pub fn create(&mut self, sheet: StyleSheet) -> Result<StyleIds> {
        let resolution = self
            .pipeline
            .resolve(sheet, &mut self.registry, &mut self.store)?;
        log::debug!("created {} styles", resolution.ids.len());
        Ok(resolution.ids)
    }

    /// The most recent identity registered for `name`.
    pub fn id(&self, name: &str) -> Result<StyleId> {
        self.registry
            .id_of(name)
            .ok_or_else(|| HostError::UnknownStyle(name.to_string()))
    }

    /// The resolved record registered under `id`.
    pub fn style(&self, id: StyleId) -> Result<&StyleRecord> {
        self.registry.get(id).ok_or(HostError::UnknownIdentity(id))
    }

    /// Extensions of a composed style list, merged left to right.
    pub fn extensions_of(&self, styles: &[Style]) -> Extensions {
        let mut merged = Extensions::default();
        for style in styles {
            let extensions = match style {
                Style::Registered(id) => self.store.get(*id),
                Style::Inline(record) => self.store.inline(record),
            };
            merged.overlay(extensions);
        }
        merged
    }

    /// The transition record for the animation collaborator, if any style in
    /// the list declares one.
    pub fn transition_props(&self, styles: &[Style]) -> Option<StyleRecord> {
        self.extensions_of(styles).transition
    }

    /// `styles` followed by its focus overrides when `states` has focus.
    pub fn with_focus(&self, styles: &[Style], states: InteractionStates) -> Vec<Style> {
        let mut composed = styles.to_vec();
        if states.is_focused() {
            composed.extend(
                self.extensions_of(styles)
                    .focus
                    .into_iter()
                    .map(Style::Inline),
            );
        }
        composed
    }

    /// Flattens a style list into one record; later styles win. Extension
    /// keys on inline records are dropped.
    pub fn flatten(&self, styles: &[Style]) -> Result<StyleRecord> {
        let mut flat = StyleRecord::new();
        for style in styles {
            match style {
                Style::Registered(id) => flat.assign(self.style(*id)?.clone()),
                Style::Inline(record) => {
                    let (_, plain) = record.clone().partition(is_extension_key);
                    flat.assign(plain);
                }
            }
        }
        Ok(flat)
    }
}

/// Selects identities from a created sheet.
///
/// Returns the identities of every entry whose selector is `true`, in sheet
/// order. Selectors naming entries the sheet does not have are ignored.
///
/// ```
/// use std::collections::BTreeMap;
/// use extended_styles::styles_of;
/// use xss::StyleId;
///
/// let ids = BTreeMap::from([
///     ("active".to_string(), StyleId(2)),
///     ("base".to_string(), StyleId(1)),
/// ]);
/// let selected = styles_of(&ids, [("base", true), ("active", false), ("missing", true)]);
/// assert_eq!(selected, vec![StyleId(1)]);
/// ```
pub fn styles_of<'a, I>(ids: &StyleIds, selectors: I) -> Vec<StyleId>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    let selected: HashSet<&str> = selectors
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect();
    ids.iter()
        .filter(|(name, _)| selected.contains(name.as_str()))
        .map(|(_, id)| *id)
        .collect()
}
