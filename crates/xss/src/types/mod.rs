pub mod environment;
pub mod value;

pub use environment::{EnvironmentProvider, Orientation, Platform, Viewport};
pub use value::{StyleRecord, StyleSheet, StyleValue};
