//! # Extended Styles
//!
//! Host integration for the [`xss`] resolver. Rendering layers use this crate
//! to create style sheets, compose style lists per element, and look up the
//! transition and focus behavior extracted from them.
//!
//! ```rust
//! use extended_styles::{Host, InteractionStates, Style, styles_of};
//! use xss::{record, sheet, ResolverConfig, StyleValue, Viewport};
//!
//! let mut host = Host::new(ResolverConfig::default(), Viewport::new(375.0, 812.0));
//! let ids = host
//!     .create(sheet! {
//!         "input" => record! {
//!             "border" => "1px solid gray",
//!             ":focus" => record! { "borderColor" => "blue" },
//!         },
//!         "invalid" => record! { "borderColor" => "red" },
//!     })
//!     .expect("valid sheet");
//!
//! let styles: Vec<Style> = styles_of(&ids, [("input", true), ("invalid", false)])
//!     .into_iter()
//!     .map(Style::from)
//!     .collect();
//!
//! let focused = host.with_focus(&styles, InteractionStates::FOCUS);
//! let flat = host.flatten(&focused).unwrap();
//! assert_eq!(flat.get("borderColor"), Some(&StyleValue::from("blue")));
//! assert_eq!(flat.get("borderWidth"), Some(&StyleValue::Number(1.0)));
//! ```

pub mod error;
pub mod host;
pub mod log_init;
pub mod states;

pub use error::{HostError, Result};
pub use host::{Host, Style, StyleIds, styles_of};
pub use log_init::init_logger;
pub use states::InteractionStates;
pub use xss;
