//! The resolution pipeline.
//!
//! A [`Pipeline`] is an ordered list of sheet-level [`Rule`]s. Each rule
//! receives the sheet produced by the previous one and returns a transformed
//! sheet plus optional [`Meta`] flags:
//!
//! ```text
//! sheet ─▶ rule 1 ─▶ rule 2 ─▶ … ─▶ extension extraction ─▶ Resolution
//!            │          │                     │
//!            └── meta ──┴──── shallow merge ──┘
//! ```
//!
//! Extension extraction is not a rule callers can omit: it always runs last,
//! after every configured rule, and registers each resolved entry with the
//! host's identity allocator.
//!
//! Errors are not caught. The first failing rule aborts the pass and no
//! partially resolved sheet is returned.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::XssError;
use crate::config::ResolverConfig;
use crate::resolve::builtin;
use crate::resolve::conditional::ConditionalRule;
use crate::resolve::extensions::{ExtensionStore, extract_extensions};
use crate::resolve::properties::{CustomPropertyRule, IgnorePrefixesRule};
use crate::resolve::registry::{StyleId, StyleIdentities};
use crate::types::{EnvironmentProvider, StyleSheet, StyleValue};

/// Flags accumulated across pipeline stages.
///
/// Merged shallowly after every stage; a later stage overwrites an earlier
/// stage's value for the same key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    flags: BTreeMap<String, StyleValue>,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.flags.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.flags.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.flags.get(key) {
            Some(StyleValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, StyleValue> {
        self.flags.iter()
    }

    /// Shallow merge, `other` wins on collision.
    pub fn merge(&mut self, other: Meta) {
        self.flags.extend(other.flags);
    }
}

/// What a rule hands to the next stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutput {
    pub styles: StyleSheet,
    pub meta: Option<Meta>,
}

impl RuleOutput {
    pub fn new(styles: StyleSheet) -> Self {
        Self { styles, meta: None }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// A sheet-level transform.
///
/// Closures of the form `Fn(StyleSheet) -> Result<RuleOutput, XssError>` are
/// rules too, which keeps ad hoc rules in tests and host code short.
pub trait Rule {
    /// Name used in logs.
    fn name(&self) -> &str {
        "anonymous"
    }

    fn apply(&self, sheet: StyleSheet) -> Result<RuleOutput, XssError>;
}

impl<F> Rule for F
where
    F: Fn(StyleSheet) -> Result<RuleOutput, XssError>,
{
    fn apply(&self, sheet: StyleSheet) -> Result<RuleOutput, XssError> {
        self(sheet)
    }
}

/// Logs the sheet passing through it at `trace` level.
///
/// Insert between rules to inspect intermediate sheets.
#[derive(Debug, Clone)]
pub struct TraceRule {
    name: String,
}

impl TraceRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Rule for TraceRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, sheet: StyleSheet) -> Result<RuleOutput, XssError> {
        log::trace!("[TRACE RULE {}] {:?}", self.name, sheet);
        Ok(RuleOutput::new(sheet))
    }
}

/// The output of a full resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Resolved entries, free of shorthand, conditional and extension keys.
    pub styles: StyleSheet,
    /// Identity allocated for each entry.
    pub ids: BTreeMap<String, StyleId>,
    pub meta: Meta,
}

impl Resolution {
    pub fn id(&self, name: &str) -> Option<StyleId> {
        self.ids.get(name).copied()
    }
}

/// An ordered chain of rules with extension extraction as its fixed last step.
#[derive(Default)]
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("Pipeline").field("rules", &names).finish()
    }
}

impl Pipeline {
    /// A pipeline that only extracts extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: ignored sheet entries are stripped, conditional
    /// branches resolved, then custom properties (built-ins for the
    /// configured platform) applied.
    ///
    /// ```
    /// use xss::{record, sheet, ExtensionStore, Pipeline, ResolverConfig, StyleRegistry, StyleValue, Viewport};
    ///
    /// let config = ResolverConfig::default();
    /// let pipeline = Pipeline::standard(&config, Viewport::new(375.0, 812.0));
    /// let mut registry = StyleRegistry::new();
    /// let mut store = ExtensionStore::from_config(&config);
    ///
    /// let resolved = pipeline
    ///     .resolve(sheet! { "card" => record! { "border" => "1px solid" } }, &mut registry, &mut store)
    ///     .unwrap();
    /// assert_eq!(
    ///     resolved.styles.get("card").unwrap().get("borderWidth"),
    ///     Some(&StyleValue::Number(1.0)),
    /// );
    /// ```
    pub fn standard<E>(config: &ResolverConfig, environment: E) -> Self
    where
        E: EnvironmentProvider + 'static,
    {
        let properties = builtin::properties_for(config);
        Self::new()
            .with_rule(IgnorePrefixesRule::new(config.ignore_prefixes.clone()))
            .with_rule(ConditionalRule::new(environment))
            .with_rule(CustomPropertyRule::new(properties))
    }

    /// Appends a rule. Rules run in the order they were added.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.push_rule(rule);
        self
    }

    pub fn push_rule(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs only the configured rules, without extension extraction.
    ///
    /// Useful for inspecting intermediate output; hosts should call
    /// [`resolve`](Self::resolve).
    pub fn run_rules(&self, sheet: StyleSheet) -> Result<RuleOutput, XssError> {
        let mut styles = sheet;
        let mut meta = Meta::new();
        for rule in &self.rules {
            log::debug!("applying rule `{}` to {} entries", rule.name(), styles.len());
            let processed = rule.apply(styles)?;
            styles = processed.styles;
            if let Some(stage_meta) = processed.meta {
                meta.merge(stage_meta);
            }
        }
        Ok(RuleOutput::new(styles).with_meta(meta))
    }

    /// Resolves `sheet` through every rule, then extracts extension blocks
    /// into `store` under the identities allocated by `identities`.
    pub fn resolve(
        &self,
        sheet: StyleSheet,
        identities: &mut dyn StyleIdentities,
        store: &mut ExtensionStore,
    ) -> Result<Resolution, XssError> {
        let processed = self.run_rules(sheet)?;
        let extracted = extract_extensions(processed.styles, identities, store);
        Ok(Resolution {
            styles: extracted.styles,
            ids: extracted.ids,
            meta: processed.meta.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::registry::StyleRegistry;
    use crate::{record, sheet};

    fn rename(from: &'static str, to: &'static str) -> impl Fn(StyleSheet) -> Result<RuleOutput, XssError> {
        move |sheet: StyleSheet| {
            let styles = sheet.map_entries(|_, mut record| {
                if let Some(value) = record.remove(from) {
                    record.insert(to, value);
                }
                record
            });
            Ok(RuleOutput::new(styles))
        }
    }

    fn flag(key: &'static str, value: bool) -> impl Fn(StyleSheet) -> Result<RuleOutput, XssError> {
        move |sheet: StyleSheet| {
            let mut meta = Meta::new();
            meta.insert(key, value);
            Ok(RuleOutput::new(sheet).with_meta(meta))
        }
    }

    #[test]
    fn test_rules_fold_left_to_right() {
        let pipeline = Pipeline::new().with_rule(rename("a", "b")).with_rule(rename("b", "c"));
        let out = pipeline.run_rules(sheet! { "x" => record! { "a" => 1 } }).unwrap();
        assert_eq!(out.styles, sheet! { "x" => record! { "c" => 1 } });
    }

    #[test]
    fn test_meta_is_shallow_merged_last_write_wins() {
        let pipeline = Pipeline::new()
            .with_rule(flag("first", true))
            .with_rule(flag("shared", false))
            .with_rule(flag("shared", true));
        let meta = pipeline.run_rules(StyleSheet::new()).unwrap().meta.unwrap();
        assert_eq!(meta.get_bool("first"), Some(true));
        assert_eq!(meta.get_bool("shared"), Some(true));
    }

    #[test]
    fn test_failing_rule_aborts_the_pass() {
        let pipeline = Pipeline::new()
            .with_rule(|_: StyleSheet| -> Result<RuleOutput, XssError> {
                Err(XssError::rule("broken", "nope"))
            })
            .with_rule(|_: StyleSheet| -> Result<RuleOutput, XssError> {
                panic!("later rules must not run")
            });
        let mut registry = StyleRegistry::new();
        let mut store = ExtensionStore::default();
        let result = pipeline.resolve(
            sheet! { "x" => record! { "transition" => record! { "duration" => 300 } } },
            &mut registry,
            &mut store,
        );

        assert_eq!(result.unwrap_err(), XssError::rule("broken", "nope"));
        assert!(registry.is_empty(), "nothing is registered on failure");
        assert!(store.is_empty(), "nothing is extracted on failure");
    }

    #[test]
    fn test_extraction_always_runs_last() {
        // A rule that reintroduces an extension key still has it extracted.
        let pipeline = Pipeline::new().with_rule(rename("fade", "transition"));
        let mut registry = StyleRegistry::new();
        let mut store = ExtensionStore::default();
        let resolved = pipeline
            .resolve(
                sheet! { "x" => record! { "opacity" => 1, "fade" => record! { "duration" => 300 } } },
                &mut registry,
                &mut store,
            )
            .unwrap();

        assert_eq!(resolved.styles, sheet! { "x" => record! { "opacity" => 1 } });
        let id = resolved.id("x").unwrap();
        assert!(store.get(id).transition.is_some());
    }

    #[test]
    fn test_trace_rule_passes_sheet_through() {
        let sheet = sheet! { "x" => record! { "color" => "red" } };
        let out = TraceRule::new("debug").apply(sheet.clone()).unwrap();
        assert_eq!(out.styles, sheet);
        assert!(out.meta.is_none());
    }
}
