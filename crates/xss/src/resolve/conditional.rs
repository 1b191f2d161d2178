//! Conditional (viewport-dependent) branch resolution.
//!
//! A style record may carry `@media` branches next to its plain properties:
//!
//! ```text
//! container: {
//!     flexDirection: "column",
//!     "@media (orientation: landscape)": { flexDirection: "row" },
//! }
//! ```
//!
//! ## Algorithm
//!
//! 1. Plain properties are copied; nested records are resolved recursively
//! 2. Conditional branches are evaluated against the viewport read for this
//!    pass; matching branches are resolved recursively and deep-merged on top,
//!    so branch values override same-named siblings
//! 3. Non-matching branches are dropped without side effects
//!
//! Any conditional key, matched or not, marks the record as containing
//! conditional branching.

use crate::XssError;
use crate::parser::media::parse_media_query;
use crate::resolve::classify::{PropertyKind, classify};
use crate::resolve::pipeline::{Meta, Rule, RuleOutput};
use crate::types::{EnvironmentProvider, StyleRecord, StyleSheet, StyleValue, Viewport};

/// Meta flag: at least one entry contained a conditional key.
pub const CONTAINS_CONDITIONAL: &str = "containsConditional";

/// Meta entry: names of the entries that contained a conditional key.
pub const CONDITIONAL_ENTRIES: &str = "conditionalEntries";

/// The result of resolving one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalOutput {
    pub styles: StyleRecord,
    pub contains_conditional: bool,
}

/// Resolves all conditional branches of `record` against `viewport`.
///
/// Fails only when a conditional key carries an unparseable query.
pub fn resolve_record(record: StyleRecord, viewport: &Viewport) -> Result<ConditionalOutput, XssError> {
    let mut styles = StyleRecord::new();
    let mut branches = Vec::new();
    let mut contains_conditional = false;

    for (property, value) in record {
        match classify(&property, &value) {
            PropertyKind::Conditional { query, branch } => {
                contains_conditional = true;
                if !parse_media_query(query)?.matches(viewport) {
                    log::trace!("media query `{}` did not match {:?}", query, viewport);
                    continue;
                }
                match branch {
                    Some(branch) => branches.push(branch.clone()),
                    None => log::warn!(
                        "conditional key `{}` holds a {} instead of a style record; ignored",
                        property,
                        value.kind()
                    ),
                }
            }
            PropertyKind::Nested(nested) => {
                let resolved = resolve_record(nested.clone(), viewport)?;
                contains_conditional |= resolved.contains_conditional;
                styles.insert(property, resolved.styles);
            }
            PropertyKind::Extension(_) if value.is_record() => {
                let nested = value.as_record().cloned().unwrap_or_default();
                let resolved = resolve_record(nested, viewport)?;
                contains_conditional |= resolved.contains_conditional;
                styles.insert(property, resolved.styles);
            }
            PropertyKind::Extension(_) | PropertyKind::Scalar => {
                styles.insert(property, value);
            }
        }
    }

    for branch in branches {
        let resolved = resolve_record(branch, viewport)?;
        // Nested conditionals inside a matched branch still count.
        contains_conditional |= resolved.contains_conditional;
        styles.deep_merge(resolved.styles);
    }

    Ok(ConditionalOutput {
        styles,
        contains_conditional,
    })
}

/// Sheet rule applying [`resolve_record`] to every entry.
///
/// The viewport is read from the environment once per [`apply`](Rule::apply)
/// call, never cached across calls.
pub struct ConditionalRule<E> {
    environment: E,
}

impl<E: EnvironmentProvider> ConditionalRule<E> {
    pub fn new(environment: E) -> Self {
        Self { environment }
    }
}

impl<E: EnvironmentProvider> Rule for ConditionalRule<E> {
    fn name(&self) -> &str {
        "conditional"
    }

    fn apply(&self, sheet: StyleSheet) -> Result<RuleOutput, XssError> {
        let viewport = self.environment.viewport();
        let mut conditional_entries = Vec::new();

        let styles = sheet.try_map_entries(|name, record| {
            let resolved = resolve_record(record, &viewport)?;
            if resolved.contains_conditional {
                conditional_entries.push(StyleValue::from(name));
            }
            Ok::<_, XssError>(resolved.styles)
        })?;

        let mut meta = Meta::new();
        meta.insert(CONTAINS_CONDITIONAL, !conditional_entries.is_empty());
        meta.insert(CONDITIONAL_ENTRIES, StyleValue::Array(conditional_entries));
        Ok(RuleOutput::new(styles).with_meta(meta))
    }
}
