//! # XSS - Extended Style Sheets
//!
//! A resolver for extended style sheets: named style entries written with
//! CSS-like conveniences that a native renderer cannot consume directly.
//! Each entry is rewritten into plain longhand properties before it reaches
//! the renderer.
//!
//! - **Conditionals**: `@media` keys are evaluated against the current
//!   viewport and matching branches merged in
//! - **Shorthands**: `margin`, `border`, `flex`, ... expand into camelCased
//!   longhands
//! - **Custom properties**: `elevation`, `transform` strings and friends are
//!   translated into what the renderer understands
//! - **Extensions**: `transition` and `:focus` blocks are split out and kept
//!   in an [`ExtensionStore`] keyed by the identity the host assigns
//!
//! ## Quick Start
//!
//! ```rust
//! use xss::{record, sheet, ExtensionStore, Pipeline, ResolverConfig, StyleRegistry, StyleValue, Viewport};
//!
//! let config = ResolverConfig::default();
//! let pipeline = Pipeline::standard(&config, Viewport::new(768.0, 1024.0));
//! let mut registry = StyleRegistry::new();
//! let mut store = ExtensionStore::from_config(&config);
//!
//! let resolved = pipeline
//!     .resolve(
//!         sheet! {
//!             "button" => record! {
//!                 "padding" => "4px 8px",
//!                 "@media (min-width: 600px)" => record! { "padding" => "8px 16px" },
//!                 "transition" => record! { "duration" => 300, "transition" => "opacity" },
//!             },
//!         },
//!         &mut registry,
//!         &mut store,
//!     )
//!     .expect("valid sheet");
//!
//! let button = resolved.styles.get("button").unwrap();
//! assert_eq!(button.get("paddingTop"), Some(&StyleValue::Number(8.0)));
//! assert_eq!(button.get("paddingLeft"), Some(&StyleValue::Number(16.0)));
//! assert!(button.get("transition").is_none());
//!
//! let id = resolved.id("button").unwrap();
//! assert!(store.get(id).transition.is_some());
//! ```
//!
//! ## Modules
//!
//! - [`types`]: Style values, records, sheets and the viewport
//! - [`parser`]: Media query, unit and shorthand value parsing
//! - [`resolve`]: The pipeline and its rules
//! - [`config`]: Resolver configuration
//! - [`error`]: Error types for resolution failures

pub mod config;
pub mod error;
pub mod parser;
pub mod resolve;
pub mod types;

pub use config::ResolverConfig;
pub use error::XssError;
pub use resolve::extensions::{ExtensionStore, Extensions};
pub use resolve::pipeline::{Meta, Pipeline, Resolution, Rule, RuleOutput, TraceRule};
pub use resolve::registry::{StyleId, StyleIdentities, StyleRegistry};
pub use types::{EnvironmentProvider, Orientation, Platform, StyleRecord, StyleSheet, StyleValue, Viewport};
