//! Sheet resolution.
//!
//! - [`pipeline`]: The rule chain and its fixed extension-extraction step
//! - [`conditional`]: `@media` branch selection against the viewport
//! - [`classify`]: Per-property classification shared by the rules
//! - [`shorthand`]: CSS shorthand expansion into camelCased longhands
//! - [`properties`]: Custom property transforms and ignored prefixes
//! - [`builtin`]: The built-in custom properties for each platform
//! - [`extensions`]: Transition and focus extraction plus the store
//! - [`registry`]: Host style identities

pub mod builtin;
pub mod classify;
pub mod conditional;
pub mod extensions;
pub mod pipeline;
pub mod properties;
pub mod registry;
pub mod shorthand;
