//! Media query parsing and evaluation.
//!
//! Conditional style branches are keyed by `@media <query list>`:
//!
//! ```text
//! {
//!     "padding": 8,
//!     "@media (min-width: 600px)": { "padding": 16 },
//!     "@media screen and (orientation: landscape)": { "flexDirection": "row" },
//! }
//! ```
//!
//! ## Supported Syntax
//!
//! - Query lists: `a, b` (matches when any query matches)
//! - Modifiers: `only`, `not`
//! - Media types: `all`, `screen` (match), `print`, `speech` and unknown types (never match)
//! - Features: `width`, `height`, `aspect-ratio` with `min-`/`max-` prefixes,
//!   `orientation`, and `device-width`/`device-height` (never match)
//! - Any other well-formed feature (`prefers-color-scheme`, `hover`, ...)
//!   parses but never matches
//! - Lengths: unitless, `px`, `em`, `rem`; ratios: `16/9`
//!
//! Syntax errors and malformed values of known features are reported as
//! [`XssError`]; they are author mistakes and abort the resolution pass.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_till1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use crate::XssError;
use crate::parser::units::{parse_length_px, parse_number};
use crate::parser::values::parse_ident;
use crate::types::{Orientation, Viewport};

/// Prefix marking a property name as a conditional branch.
pub const MEDIA_PREFIX: &str = "@media";

/// Returns the query text if `property` is a conditional key.
///
/// ```
/// use xss::parser::media::conditional_query;
///
/// assert_eq!(conditional_query("@media (min-width: 300px)"), Some("(min-width: 300px)"));
/// assert_eq!(conditional_query("margin"), None);
/// ```
pub fn conditional_query(property: &str) -> Option<&str> {
    property.strip_prefix(MEDIA_PREFIX).map(str::trim)
}

/// A comma-separated list of queries. Matches when any query matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQueryList {
    pub queries: Vec<MediaQuery>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    /// `not` modifier; inverts the result of the whole query.
    pub negated: bool,
    pub media_type: MediaType,
    pub features: Vec<MediaFeature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    All,
    Screen,
    Print,
    Speech,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePrefix {
    Exact,
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureName {
    Width,
    Height,
    AspectRatio,
    Orientation,
    DeviceWidth,
    DeviceHeight,
    /// A well-formed feature the environment does not supply
    /// (`prefers-color-scheme`, `hover`, `resolution`, ...). Never matches.
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    /// A length in pixels.
    Length(f64),
    /// A width / height ratio.
    Ratio(f64),
    Orientation(Orientation),
}

/// A single `(feature: value)` test.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFeature {
    pub name: FeatureName,
    pub prefix: RangePrefix,
    /// `None` for boolean-context features such as `(orientation)`.
    pub value: Option<FeatureValue>,
}

/// Unvalidated `(name: value)` pair as written.
struct RawFeature<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

struct RawQuery<'a> {
    modifier: Option<&'a str>,
    media_type: Option<&'a str>,
    features: Vec<RawFeature<'a>>,
}

fn parse_raw_feature(input: &str) -> IResult<&str, RawFeature<'_>> {
    let (input, (name, value)) = delimited(
        pair(char('('), multispace0),
        pair(
            parse_ident,
            opt(preceded(
                tuple((multispace0, char(':'), multispace0)),
                take_till1(|c: char| c == ')'),
            )),
        ),
        pair(multispace0, char(')')),
    )(input)?;
    Ok((
        input,
        RawFeature {
            name,
            value: value.map(str::trim),
        },
    ))
}

fn and_keyword(input: &str) -> IResult<&str, ()> {
    map(tuple((multispace1, tag_no_case("and"), multispace0)), |_| ())(input)
}

/// `[only|not] type (and (feature))*`
fn parse_typed_query(input: &str) -> IResult<&str, RawQuery<'_>> {
    let (input, modifier) = opt(terminated(
        alt((tag_no_case("only"), tag_no_case("not"))),
        multispace1,
    ))(input)?;
    let (input, media_type) = parse_ident(input)?;
    let (input, features) = many0(preceded(and_keyword, parse_raw_feature))(input)?;
    Ok((
        input,
        RawQuery {
            modifier,
            media_type: Some(media_type),
            features,
        },
    ))
}

/// `(feature) (and (feature))*`
fn parse_feature_query(input: &str) -> IResult<&str, RawQuery<'_>> {
    let (input, first) = parse_raw_feature(input)?;
    let (input, rest) = many0(preceded(and_keyword, parse_raw_feature))(input)?;
    let mut features = vec![first];
    features.extend(rest);
    Ok((
        input,
        RawQuery {
            modifier: None,
            media_type: None,
            features,
        },
    ))
}

fn parse_raw_query_list(input: &str) -> IResult<&str, Vec<RawQuery<'_>>> {
    separated_list1(
        tuple((multispace0, char(','), multispace0)),
        alt((parse_feature_query, parse_typed_query)),
    )(input)
}

/// Parses a media query list (the text after `@media`).
pub fn parse_media_query(source: &str) -> Result<MediaQueryList, XssError> {
    let trimmed = source.trim();
    let (remaining, raw) = parse_raw_query_list(trimmed)
        .map_err(|e| XssError::InvalidQuery(format!("{trimmed}: {e}")))?;

    if !remaining.trim().is_empty() {
        return Err(XssError::InvalidQuery(format!(
            "unexpected tokens at end of query `{}`: {}",
            trimmed,
            remaining.trim()
        )));
    }

    let queries = raw
        .into_iter()
        .map(validate_query)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MediaQueryList { queries })
}

fn validate_query(raw: RawQuery<'_>) -> Result<MediaQuery, XssError> {
    let negated = raw
        .modifier
        .is_some_and(|m| m.eq_ignore_ascii_case("not"));
    let media_type = match raw.media_type.map(str::to_ascii_lowercase).as_deref() {
        None | Some("all") => MediaType::All,
        Some("screen") => MediaType::Screen,
        Some("print") => MediaType::Print,
        Some("speech") => MediaType::Speech,
        Some(other) => MediaType::Other(other.to_string()),
    };
    let features = raw
        .features
        .into_iter()
        .map(validate_feature)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MediaQuery {
        negated,
        media_type,
        features,
    })
}

fn validate_feature(raw: RawFeature<'_>) -> Result<MediaFeature, XssError> {
    let lowered = raw.name.to_ascii_lowercase();
    let (prefix, base) = if let Some(base) = lowered.strip_prefix("min-") {
        (RangePrefix::Min, base)
    } else if let Some(base) = lowered.strip_prefix("max-") {
        (RangePrefix::Max, base)
    } else {
        (RangePrefix::Exact, lowered.as_str())
    };

    // `min-` with nothing after it names no feature at all.
    if base.is_empty() || base.starts_with('-') {
        return Err(XssError::UnknownFeature(raw.name.to_string()));
    }

    let name = match base {
        "width" => FeatureName::Width,
        "height" => FeatureName::Height,
        "aspect-ratio" => FeatureName::AspectRatio,
        "orientation" if prefix == RangePrefix::Exact => FeatureName::Orientation,
        "device-width" => FeatureName::DeviceWidth,
        "device-height" => FeatureName::DeviceHeight,
        _ => {
            log::debug!("media feature `{}` is not supported; it never matches", raw.name);
            return Ok(MediaFeature {
                name: FeatureName::Unsupported(lowered.clone()),
                prefix,
                value: None,
            });
        }
    };

    let invalid = |value: &str| XssError::InvalidQueryValue {
        feature: raw.name.to_string(),
        value: value.to_string(),
    };

    let value = match raw.value {
        None if prefix != RangePrefix::Exact => return Err(invalid("")),
        None => None,
        Some(text) => Some(match name {
            FeatureName::Orientation => match text.to_ascii_lowercase().as_str() {
                "portrait" => FeatureValue::Orientation(Orientation::Portrait),
                "landscape" => FeatureValue::Orientation(Orientation::Landscape),
                _ => return Err(invalid(text)),
            },
            FeatureName::AspectRatio => {
                FeatureValue::Ratio(parse_ratio_value(text).ok_or_else(|| invalid(text))?)
            }
            _ => match parse_length_px(text) {
                Ok(("", px)) => FeatureValue::Length(px),
                _ => return Err(invalid(text)),
            },
        }),
    };

    Ok(MediaFeature {
        name,
        prefix,
        value,
    })
}

/// Parses `16/9`, `16 / 9` or a bare number.
fn parse_ratio_value(text: &str) -> Option<f64> {
    let parsed: IResult<&str, (f64, Option<f64>)> = pair(
        parse_number,
        opt(preceded(
            tuple((multispace0, char('/'), multispace0)),
            parse_number,
        )),
    )(text);
    match parsed {
        Ok(("", (_, Some(den)))) if den == 0.0 => None,
        Ok(("", (num, den))) => Some(num / den.unwrap_or(1.0)),
        _ => None,
    }
}

impl MediaQueryList {
    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.queries.iter().any(|q| q.matches(viewport))
    }
}

impl MediaQuery {
    pub fn matches(&self, viewport: &Viewport) -> bool {
        let type_matches = matches!(self.media_type, MediaType::All | MediaType::Screen);
        let result = type_matches && self.features.iter().all(|f| f.matches(viewport));
        result != self.negated
    }
}

impl MediaFeature {
    pub fn matches(&self, viewport: &Viewport) -> bool {
        let actual = match self.name {
            FeatureName::Width => viewport.width,
            FeatureName::Height => viewport.height,
            FeatureName::AspectRatio => match viewport.aspect_ratio() {
                Some(ratio) => ratio,
                None => return false,
            },
            FeatureName::Orientation => {
                return match self.value {
                    Some(FeatureValue::Orientation(o)) => viewport.orientation() == o,
                    _ => true,
                };
            }
            // Device metrics and other features are not part of the
            // environment facts.
            FeatureName::DeviceWidth | FeatureName::DeviceHeight | FeatureName::Unsupported(_) => {
                return false;
            }
        };

        let expected = match self.value {
            None => return actual != 0.0,
            Some(FeatureValue::Length(v)) | Some(FeatureValue::Ratio(v)) => v,
            Some(FeatureValue::Orientation(_)) => return false,
        };

        match self.prefix {
            RangePrefix::Exact => actual == expected,
            RangePrefix::Min => actual >= expected,
            RangePrefix::Max => actual <= expected,
        }
    }
}

/// Parses `query` and evaluates it against `viewport` in one step.
pub fn match_media(query: &str, viewport: &Viewport) -> Result<bool, XssError> {
    Ok(parse_media_query(query)?.matches(viewport))
}
