//! Parsing of the string-valued parts of a style sheet.
//!
//! Style sheets arrive as structured records, but a few property names and
//! values still carry a small language of their own:
//!
//! - [`media`]: `@media` conditional keys (parsing and evaluation)
//! - [`units`]: Numeric value and unit parsing
//! - [`values`]: Shorthand value tokenizing and keyword classes

pub mod media;
pub mod units;
pub mod values;

pub use crate::parser::media::{MediaQueryList, conditional_query, match_media, parse_media_query};
