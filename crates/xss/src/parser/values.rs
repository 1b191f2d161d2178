//! Value tokenizing for shorthand properties.
//!
//! - Identifiers: generic CSS identifier parsing
//! - Tokens: whitespace separated words that keep `rgba(0, 0, 0, 0.5)` intact
//! - Keyword classes used to decompose `border`-like shorthands

use nom::{IResult, bytes::complete::take_while1};

/// Parses a CSS identifier (alphanumeric characters, dashes, and underscores).
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Splits a shorthand value into whitespace separated tokens.
///
/// Whitespace inside parentheses does not split, so color functions survive
/// as a single token.
///
/// ```
/// use xss::parser::values::split_tokens;
///
/// assert_eq!(
///     split_tokens("1px solid rgba(0, 0, 0, 0.5)"),
///     vec!["1px", "solid", "rgba(0, 0, 0, 0.5)"],
/// );
/// ```
pub fn split_tokens(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut paren_depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => {
                paren_depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                paren_depth = paren_depth.saturating_sub(1);
                start.get_or_insert(i);
            }
            c if c.is_whitespace() && paren_depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&input[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&input[s..]);
    }
    tokens
}

/// Border line styles.
pub fn is_line_style(token: &str) -> bool {
    matches!(
        token.to_ascii_lowercase().as_str(),
        "none"
            | "hidden"
            | "dotted"
            | "dashed"
            | "solid"
            | "double"
            | "groove"
            | "ridge"
            | "inset"
            | "outset"
    )
}

/// Border widths: a non-negative length or one of the width keywords.
pub fn is_line_width(token: &str) -> bool {
    if matches!(
        token.to_ascii_lowercase().as_str(),
        "thin" | "medium" | "thick"
    ) {
        return true;
    }
    let digits = token
        .strip_suffix("px")
        .or_else(|| token.strip_suffix("em"))
        .or_else(|| token.strip_suffix("pt"))
        .unwrap_or(token);
    crate::parser::units::numeric_token(digits).is_some_and(|n| n >= 0.0)
}

/// Lengths and percentages, as accepted by `margin`/`padding` sides.
pub fn is_length_percentage(token: &str) -> bool {
    if token.eq_ignore_ascii_case("auto") {
        return true;
    }
    let digits = token
        .strip_suffix('%')
        .or_else(|| token.strip_suffix("px"))
        .or_else(|| token.strip_suffix("em"))
        .or_else(|| token.strip_suffix("pt"))
        .unwrap_or(token);
    crate::parser::units::numeric_token(digits).is_some()
}

/// Anything that is not a width or style keyword is accepted as a color.
///
/// Color validation is left to the host renderer.
pub fn is_color(token: &str) -> bool {
    !token.is_empty() && !is_line_style(token) && !is_line_width(token)
}
