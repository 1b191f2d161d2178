//! Shorthand property expansion.
//!
//! An [`Expander`] decomposes one shorthand property into its longhands using
//! a shared knowledge table keyed by dash-case names, then renames longhands
//! to the camelCase used in style records:
//!
//! ```text
//! border: "1px solid red"
//!   → border-width: 1px, border-style: solid, border-color: red
//!   → { borderWidth: 1, borderStyle: "solid", borderColor: "red" }   (with a number cast on borderWidth)
//! ```
//!
//! ## Supported Shorthands
//!
//! | Shorthand                       | Grammar                               |
//! |---------------------------------|---------------------------------------|
//! | `margin`, `padding`             | 1-4 lengths (top, right, bottom, left) |
//! | `border-width/-style/-color`    | 1-4 values per side                   |
//! | `border-radius`                 | 1-4 radii per corner                  |
//! | `border`, `border-<side>`, `outline` | width, style, color in any order |
//! | `flex-flow`                     | direction and/or wrap                 |
//!
//! Malformed values are not errors: they log a warning and expand to an
//! empty record.

use std::collections::HashMap;

use phf::phf_map;

use crate::parser::values::{is_color, is_length_percentage, is_line_style, is_line_width, split_tokens};
use crate::types::{StyleRecord, StyleValue};

/// Converts a decomposed longhand value before it is stored.
pub type Cast = fn(&StyleValue) -> StyleValue;

/// Built-in casts.
pub mod cast {
    use crate::parser::units::pixel_token;
    use crate::types::StyleValue;

    /// Strips a `px` suffix and parses the rest as a number.
    ///
    /// Values that are not numeric after stripping (`"50%"`, `"auto"`,
    /// `"thin"`) are kept as they are.
    pub fn to_number(value: &StyleValue) -> StyleValue {
        match value {
            StyleValue::String(s) => match pixel_token(s) {
                Some(n) => StyleValue::Number(n),
                None => {
                    log::warn!("cannot cast `{}` to a number; keeping the string", s);
                    value.clone()
                }
            },
            _ => value.clone(),
        }
    }
}

/// Which values a side of a four-sided shorthand accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideValue {
    LengthPercentage,
    LineWidth,
    LineStyle,
    Color,
}

impl SideValue {
    fn accepts(self, token: &str) -> bool {
        match self {
            SideValue::LengthPercentage => is_length_percentage(token),
            SideValue::LineWidth => is_line_width(token),
            SideValue::LineStyle => is_line_style(token),
            SideValue::Color => !token.is_empty(),
        }
    }
}

/// Decomposition rule for a shorthand.
#[derive(Debug, Clone, Copy)]
enum Grammar {
    /// 1-4 values distributed clockwise starting at the top.
    Sides {
        longhands: [&'static str; 4],
        accepts: SideValue,
    },
    /// Width, style and color in any order, each at most once.
    Line { longhands: [&'static str; 3] },
    /// Flex direction and wrap in any order, each at most once.
    FlexFlow { longhands: [&'static str; 2] },
}

static SHORTHANDS: phf::Map<&'static str, Grammar> = phf_map! {
    "margin" => Grammar::Sides {
        longhands: ["margin-top", "margin-right", "margin-bottom", "margin-left"],
        accepts: SideValue::LengthPercentage,
    },
    "padding" => Grammar::Sides {
        longhands: ["padding-top", "padding-right", "padding-bottom", "padding-left"],
        accepts: SideValue::LengthPercentage,
    },
    "border-width" => Grammar::Sides {
        longhands: ["border-top-width", "border-right-width", "border-bottom-width", "border-left-width"],
        accepts: SideValue::LineWidth,
    },
    "border-style" => Grammar::Sides {
        longhands: ["border-top-style", "border-right-style", "border-bottom-style", "border-left-style"],
        accepts: SideValue::LineStyle,
    },
    "border-color" => Grammar::Sides {
        longhands: ["border-top-color", "border-right-color", "border-bottom-color", "border-left-color"],
        accepts: SideValue::Color,
    },
    "border-radius" => Grammar::Sides {
        longhands: [
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ],
        accepts: SideValue::LengthPercentage,
    },
    "border" => Grammar::Line {
        longhands: ["border-width", "border-style", "border-color"],
    },
    "border-top" => Grammar::Line {
        longhands: ["border-top-width", "border-top-style", "border-top-color"],
    },
    "border-right" => Grammar::Line {
        longhands: ["border-right-width", "border-right-style", "border-right-color"],
    },
    "border-bottom" => Grammar::Line {
        longhands: ["border-bottom-width", "border-bottom-style", "border-bottom-color"],
    },
    "border-left" => Grammar::Line {
        longhands: ["border-left-width", "border-left-style", "border-left-color"],
    },
    "outline" => Grammar::Line {
        longhands: ["outline-width", "outline-style", "outline-color"],
    },
    "flex-flow" => Grammar::FlexFlow {
        longhands: ["flex-direction", "flex-wrap"],
    },
};

/// Returns `true` if `shorthand` (dash-case) has a known decomposition.
pub fn is_known_shorthand(shorthand: &str) -> bool {
    SHORTHANDS.contains_key(shorthand)
}

/// Converts a dash-case property name to camelCase.
///
/// ```
/// use xss::resolve::shorthand::camel_case;
///
/// assert_eq!(camel_case("border-top-width"), "borderTopWidth");
/// assert_eq!(camel_case("margin"), "margin");
/// ```
pub fn camel_case(dashed: &str) -> String {
    let mut out = String::with_capacity(dashed.len());
    let mut upper_next = false;
    for c in dashed.chars() {
        if c == '-' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Decomposes `value` per `shorthand`'s grammar into dash-case longhands.
///
/// Returns `None` when the value does not fit the grammar.
fn decompose(shorthand: &str, value: &str) -> Option<Vec<(&'static str, String)>> {
    let grammar = SHORTHANDS.get(shorthand)?;
    let tokens = split_tokens(value);
    if tokens.is_empty() {
        return None;
    }

    match *grammar {
        Grammar::Sides { longhands, accepts } => {
            if tokens.len() > 4 || !tokens.iter().all(|t| accepts.accepts(t)) {
                return None;
            }
            // top, right, bottom, left
            let [top, right, bottom, left] = match tokens.as_slice() {
                [all] => [*all; 4],
                [vertical, horizontal] => [*vertical, *horizontal, *vertical, *horizontal],
                [top, horizontal, bottom] => [*top, *horizontal, *bottom, *horizontal],
                [top, right, bottom, left] => [*top, *right, *bottom, *left],
                _ => return None,
            };
            Some(
                longhands
                    .into_iter()
                    .zip([top, right, bottom, left])
                    .map(|(longhand, token)| (longhand, token.to_string()))
                    .collect(),
            )
        }
        Grammar::Line { longhands } => {
            let [width_name, style_name, color_name] = longhands;
            let (mut width, mut style, mut color) = (None, None, None);
            for token in tokens {
                if width.is_none() && is_line_width(token) {
                    width = Some(token);
                } else if style.is_none() && is_line_style(token) {
                    style = Some(token);
                } else if color.is_none() && is_color(token) {
                    color = Some(token);
                } else {
                    return None;
                }
            }
            Some(
                [(width_name, width), (style_name, style), (color_name, color)]
                    .into_iter()
                    .filter_map(|(name, token)| token.map(|t| (name, t.to_string())))
                    .collect(),
            )
        }
        Grammar::FlexFlow { longhands } => {
            let [direction_name, wrap_name] = longhands;
            let (mut direction, mut wrap) = (None, None);
            for token in tokens {
                match token {
                    "row" | "row-reverse" | "column" | "column-reverse" if direction.is_none() => {
                        direction = Some(token)
                    }
                    "nowrap" | "wrap" | "wrap-reverse" if wrap.is_none() => wrap = Some(token),
                    _ => return None,
                }
            }
            Some(
                [(direction_name, direction), (wrap_name, wrap)]
                    .into_iter()
                    .filter_map(|(name, token)| token.map(|t| (name, t.to_string())))
                    .collect(),
            )
        }
    }
}

/// Expands one shorthand property into camelCase longhands.
///
/// # Example
///
/// ```
/// use xss::resolve::shorthand::{cast, Expander};
/// use xss::{record, StyleValue};
///
/// let border = Expander::new("border").with_cast("borderWidth", cast::to_number);
/// assert_eq!(
///     border.expand(&StyleValue::from("1px solid")),
///     record! { "borderWidth" => 1, "borderStyle" => "solid" },
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Expander {
    shorthand: String,
    casts: HashMap<String, Cast>,
}

impl Expander {
    /// `shorthand` is the dash-case property name (`"border-top"`).
    pub fn new(shorthand: impl Into<String>) -> Self {
        let shorthand = shorthand.into();
        if !is_known_shorthand(&shorthand) {
            log::warn!("no decomposition known for shorthand `{}`", shorthand);
        }
        Self {
            shorthand,
            casts: HashMap::new(),
        }
    }

    /// Applies `cast` to the longhand named `longhand` (camelCase).
    pub fn with_cast(mut self, longhand: impl Into<String>, cast: Cast) -> Self {
        self.casts.insert(longhand.into(), cast);
        self
    }

    pub fn shorthand(&self) -> &str {
        &self.shorthand
    }

    pub fn expand(&self, value: &StyleValue) -> StyleRecord {
        let text = match value {
            StyleValue::String(s) => s.clone(),
            StyleValue::Number(_) => value.to_string(),
            other => {
                log::warn!(
                    "cannot expand `{}` from a {} value",
                    self.shorthand,
                    other.kind()
                );
                return StyleRecord::new();
            }
        };

        let Some(longhands) = decompose(&self.shorthand, &text) else {
            log::warn!("invalid `{}` shorthand \"{}\"", self.shorthand, text);
            return StyleRecord::new();
        };

        longhands
            .into_iter()
            .map(|(longhand, token)| {
                let name = camel_case(longhand);
                let raw = StyleValue::String(token);
                let value = match self.casts.get(&name) {
                    Some(cast) => cast(&raw),
                    None => raw,
                };
                (name, value)
            })
            .collect()
    }
}

/// Expands only when `condition` holds for the raw value; otherwise passes
/// the value through under the shorthand's own name.
///
/// Lets authors write either `margin: 8` or `margin: "4px 8px"`.
#[derive(Debug, Clone)]
pub struct ConditionalExpander {
    expander: Expander,
    condition: fn(&StyleValue) -> bool,
}

impl ConditionalExpander {
    pub fn new(expander: Expander, condition: fn(&StyleValue) -> bool) -> Self {
        Self {
            expander,
            condition,
        }
    }

    pub fn expand(&self, value: &StyleValue) -> StyleRecord {
        if (self.condition)(value) {
            self.expander.expand(value)
        } else {
            let mut passthrough = StyleRecord::new();
            passthrough.insert(camel_case(self.expander.shorthand()), value.clone());
            passthrough
        }
    }
}

/// Condition for [`ConditionalExpander`]: the value is not already a number.
pub fn is_not_number(value: &StyleValue) -> bool {
    !value.is_number()
}
