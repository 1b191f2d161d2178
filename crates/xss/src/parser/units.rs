//! Numeric value and unit parsing.
//!
//! Style values reach the resolver as author strings (`"12px"`, `"1.5"`,
//! `"2em"`). These helpers recognize the numeric forms shared by shorthand
//! casting, the flex parser, and media query features.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map, map_res, opt, recognize},
    sequence::{pair, tuple},
};

/// Pixels per `em`/`rem` when a media query uses relative lengths.
pub const PX_PER_EM: f64 = 16.0;

/// Length units understood in media queries and pixel casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// No suffix; treated as pixels.
    None,
    Px,
    Em,
    Rem,
}

/// Parse a signed decimal number (`12`, `-3`, `1.5`, `.5`, `2.`, `1e3`).
///
/// An exponent needs at least one digit, so `2em` stops before the `e`.
pub fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(alt((char('-'), char('+')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

fn parse_length_unit(input: &str) -> IResult<&str, LengthUnit> {
    let (input, unit) = opt(alt((
        map(tag_no_case("px"), |_| LengthUnit::Px),
        map(tag_no_case("rem"), |_| LengthUnit::Rem),
        map(tag_no_case("em"), |_| LengthUnit::Em),
    )))(input)?;
    Ok((input, unit.unwrap_or(LengthUnit::None)))
}

/// Parse a length and convert it to pixels.
pub fn parse_length_px(input: &str) -> IResult<&str, f64> {
    let (input, value) = parse_number(input)?;
    let (input, unit) = parse_length_unit(input)?;
    let px = match unit {
        LengthUnit::None | LengthUnit::Px => value,
        LengthUnit::Em | LengthUnit::Rem => value * PX_PER_EM,
    };
    Ok((input, px))
}

/// Returns the number if the whole (trimmed) token is a plain number.
///
/// `"2"` and `"0.5"` are numbers; `"2px"`, `"auto"` and `""` are not.
pub fn numeric_token(token: &str) -> Option<f64> {
    match parse_number(token.trim()) {
        Ok(("", value)) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Returns the number if the whole token is a number with an optional `px`
/// suffix.
pub fn pixel_token(token: &str) -> Option<f64> {
    let token = token.trim();
    let stripped = token
        .strip_suffix("px")
        .or_else(|| token.strip_suffix("PX"))
        .unwrap_or(token);
    numeric_token(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_token_requires_whole_token() {
        assert_eq!(numeric_token("2"), Some(2.0));
        assert_eq!(numeric_token(" 0.5 "), Some(0.5));
        assert_eq!(numeric_token(".5"), Some(0.5));
        assert_eq!(numeric_token("-3"), Some(-3.0));
        assert_eq!(numeric_token("1e3"), Some(1000.0));
        assert_eq!(numeric_token("2.5E-1"), Some(0.25));
        assert_eq!(numeric_token("1e"), None);
        assert_eq!(numeric_token("2px"), None);
        assert_eq!(numeric_token("auto"), None);
        assert_eq!(numeric_token(""), None);
    }

    #[test]
    fn test_pixel_token_strips_px() {
        assert_eq!(pixel_token("1px"), Some(1.0));
        assert_eq!(pixel_token("12"), Some(12.0));
        assert_eq!(pixel_token("thin"), None);
        assert_eq!(pixel_token("50%"), None);
    }

    #[test]
    fn test_parse_length_px_converts_relative_units() {
        assert_eq!(parse_length_px("20em"), Ok(("", 320.0)));
        assert_eq!(parse_length_px("2e2px"), Ok(("", 200.0)));
        assert_eq!(parse_length_px("1.5rem"), Ok(("", 24.0)));
        assert_eq!(parse_length_px("300px"), Ok(("", 300.0)));
        assert_eq!(parse_length_px("300"), Ok(("", 300.0)));
    }
}
