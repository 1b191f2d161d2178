//! Environment facts consulted while resolving conditional branches.
//!
//! - [`Viewport`]: Current window dimensions
//! - [`Orientation`]: Derived from the viewport (`landscape` iff width > height)
//! - [`EnvironmentProvider`]: Host-supplied source of viewport facts
//! - [`Platform`]: Target platform, selects platform-specific expansions

/// Window dimensions in density-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Width divided by height, or `None` for a zero-height viewport.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height != 0.0).then(|| self.width / self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Source of the current viewport.
///
/// Resolvers call [`viewport`](Self::viewport) once per resolution pass and
/// never cache the answer, so a rotation is picked up by the next pass.
pub trait EnvironmentProvider {
    fn viewport(&self) -> Viewport;
}

/// A fixed viewport.
impl EnvironmentProvider for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

/// A viewport computed on demand, e.g. read from a cell the host updates on
/// rotation.
impl<F> EnvironmentProvider for F
where
    F: Fn() -> Viewport,
{
    fn viewport(&self) -> Viewport {
        self()
    }
}

/// The platform the resolved styles are rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    /// Renders elevation natively.
    Android,
    /// Renders elevation through shadow properties.
    #[default]
    Ios,
    /// Renders elevation through shadow properties.
    Web,
}

impl Platform {
    /// Whether `elevation` is a native style property on this platform.
    pub fn has_native_elevation(&self) -> bool {
        matches!(self, Platform::Android)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_orientation_is_landscape_only_when_wider() {
        assert_eq!(Viewport::new(800.0, 600.0).orientation(), Orientation::Landscape);
        assert_eq!(Viewport::new(600.0, 800.0).orientation(), Orientation::Portrait);
        assert_eq!(
            Viewport::new(500.0, 500.0).orientation(),
            Orientation::Portrait,
            "square viewports are portrait"
        );
    }

    #[test]
    fn test_shared_viewport_reflects_updates() {
        let shared = Rc::new(Cell::new(Viewport::new(320.0, 640.0)));
        let handle = Rc::clone(&shared);
        let provider: Box<dyn EnvironmentProvider> = Box::new(move || handle.get());
        assert_eq!(provider.viewport().orientation(), Orientation::Portrait);

        shared.set(Viewport::new(640.0, 320.0));
        assert_eq!(provider.viewport().orientation(), Orientation::Landscape);
    }
}
