//! Built-in custom properties.
//!
//! | Property                           | Behavior                                        |
//! |------------------------------------|-------------------------------------------------|
//! | `border`, `border{Top,Right,Bottom,Left}` | Expanded; width cast to a number         |
//! | `margin`, `padding`                | Expanded unless already a number                |
//! | `flex`                             | `<grow> <shrink>? <basis>?` → flexGrow/Shrink/Basis |
//! | `elevation`                        | Native on Android, shadow properties elsewhere |
//! | `fontWeight`                       | Numbers become strings                          |
//! | `transform`                        | String transforms dropped, arrays kept          |
//! | `willChange`, `pointerEvents`, `fontFamily`, `animation`, `flip` | Dropped          |
//!
//! The registries are built once per platform and shared.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::ResolverConfig;
use crate::parser::units::{numeric_token, pixel_token};
use crate::resolve::properties::CustomProperties;
use crate::resolve::shorthand::{ConditionalExpander, Expander, camel_case, cast, is_not_number};
use crate::types::{Platform, StyleRecord, StyleValue};

/// Properties that `elevation` expands to on `platform`.
///
/// Kept in one place so transition lists naming `elevation` animate exactly
/// the properties the expansion produces.
pub fn elevation_properties(platform: Platform) -> &'static [&'static str] {
    if platform.has_native_elevation() {
        &["elevation"]
    } else {
        &["shadowOffset", "shadowRadius", "shadowColor", "shadowOpacity"]
    }
}

/// Shadow color used when elevation is drawn with shadow properties.
pub const ELEVATION_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.25)";

/// Lower bound for the synthesized shadow opacity.
///
/// NOTE: 2.25 lies outside the 0..=1 opacity range, so the clamp always wins
/// for elevations below 9. Kept as authored until the intended bound is
/// confirmed.
pub const ELEVATION_MIN_OPACITY: f64 = 2.25;

/// Returns `max(value, minimum)`.
fn floor(minimum: f64) -> impl Fn(f64) -> f64 {
    move |value| if value < minimum { minimum } else { value }
}

/// Expands `elevation` for `platform`.
pub fn elevation(platform: Platform, value: &StyleValue) -> StyleRecord {
    if platform.has_native_elevation() {
        let mut native = StyleRecord::new();
        native.insert("elevation", value.clone());
        return native;
    }

    let Some(elevation) = value.as_number() else {
        log::warn!("elevation must be a number, got {}", value);
        return StyleRecord::new();
    };

    let mut offset = StyleRecord::new();
    offset.insert("width", 0);
    offset.insert("height", floor(0.0)(elevation));

    let mut shadow = StyleRecord::new();
    shadow.insert("shadowColor", ELEVATION_SHADOW_COLOR);
    shadow.insert("shadowOffset", offset);
    shadow.insert("shadowRadius", elevation * 3.0 / 2.0);
    shadow.insert(
        "shadowOpacity",
        floor(ELEVATION_MIN_OPACITY)(0.25 * elevation),
    );
    shadow
}

/// Parses the `flex` shorthand: `<grow number> <shrink number>? <basis>?`.
///
/// A non-string value is passed through as `flex`. An invalid grow token
/// yields an empty record and a warning. A non-numeric token in the shrink
/// position is taken as the basis when no third token follows. An `auto`
/// basis is left to the renderer's default.
pub fn flex(value: &StyleValue) -> StyleRecord {
    let mut expanded = StyleRecord::new();
    let Some(text) = value.as_str() else {
        expanded.insert("flex", value.clone());
        return expanded;
    };

    let mut tokens = text.split_whitespace();
    let grow = tokens.next();
    let shrink = tokens.next();
    let mut basis = tokens.next();

    let Some(grow) = grow.and_then(numeric_token) else {
        log::warn!(
            "invalid flex shorthand \"{}\", must be <grow number> <shrink number>? <basis>?",
            text
        );
        return expanded;
    };
    expanded.insert("flexGrow", grow);

    if let Some(shrink) = shrink {
        match numeric_token(shrink) {
            Some(n) => {
                expanded.insert("flexShrink", n);
            }
            None if basis.is_none() => basis = Some(shrink),
            None => {
                log::warn!("invalid flex shrink \"{}\" in \"{}\"", shrink, text);
            }
        }
    }

    if let Some(basis) = basis.filter(|b| !b.eq_ignore_ascii_case("auto")) {
        let basis_value = match pixel_token(basis) {
            Some(n) => StyleValue::Number(n),
            None => StyleValue::from(basis),
        };
        expanded.insert("flexBasis", basis_value);
    }
    expanded
}

/// `fontWeight: 700` → `fontWeight: "700"`.
pub fn font_weight(value: &StyleValue) -> StyleRecord {
    let mut out = StyleRecord::new();
    let weight = match value {
        StyleValue::Number(_) => StyleValue::String(value.to_string()),
        other => other.clone(),
    };
    out.insert("fontWeight", weight);
    out
}

/// String transforms (`"rotate(45deg)"`) are not supported by the renderer
/// and are dropped; structured transforms pass through.
pub fn transform(value: &StyleValue) -> StyleRecord {
    let mut out = StyleRecord::new();
    if value.as_str().is_none() {
        out.insert("transform", value.clone());
    }
    out
}

fn drop_property(_: &StyleValue) -> StyleRecord {
    StyleRecord::new()
}

fn register_borders(properties: &mut CustomProperties) {
    let border = Expander::new("border").with_cast("borderWidth", cast::to_number);
    properties.register("border", move |value: &StyleValue| border.expand(value));

    for side in ["top", "right", "bottom", "left"] {
        let shorthand = format!("border-{side}");
        let camel = camel_case(&shorthand);
        let expander = Expander::new(shorthand).with_cast(format!("{camel}Width"), cast::to_number);
        properties.register(camel, move |value: &StyleValue| expander.expand(value));
    }
}

fn register_spacing(properties: &mut CustomProperties, shorthand: &'static str) {
    let expander = ["Top", "Right", "Bottom", "Left"]
        .into_iter()
        .fold(Expander::new(shorthand), |expander, side| {
            expander.with_cast(format!("{shorthand}{side}"), cast::to_number)
        });
    let conditional = ConditionalExpander::new(expander, is_not_number);
    properties.register(shorthand, move |value: &StyleValue| conditional.expand(value));
}

/// Builds the built-in registry for `platform`, with the default ignored
/// prefixes.
pub fn build(platform: Platform) -> CustomProperties {
    let mut properties =
        CustomProperties::new().with_ignore_prefixes(ResolverConfig::default().ignore_prefixes);

    for dropped in ["willChange", "pointerEvents", "fontFamily", "animation", "flip"] {
        properties.register(dropped, drop_property);
    }
    properties.register("transform", transform);
    properties.register("fontWeight", font_weight);
    properties.register("flex", flex);
    properties.register("elevation", move |value: &StyleValue| elevation(platform, value));
    register_borders(&mut properties);
    register_spacing(&mut properties, "margin");
    register_spacing(&mut properties, "padding");
    properties
}

static ANDROID: Lazy<Arc<CustomProperties>> = Lazy::new(|| Arc::new(build(Platform::Android)));
static IOS: Lazy<Arc<CustomProperties>> = Lazy::new(|| Arc::new(build(Platform::Ios)));
static WEB: Lazy<Arc<CustomProperties>> = Lazy::new(|| Arc::new(build(Platform::Web)));

/// The shared built-in registry for `platform`.
pub fn properties(platform: Platform) -> Arc<CustomProperties> {
    match platform {
        Platform::Android => Arc::clone(&ANDROID),
        Platform::Ios => Arc::clone(&IOS),
        Platform::Web => Arc::clone(&WEB),
    }
}

/// The built-in registry for `config`'s platform, using its ignored
/// prefixes.
pub fn properties_for(config: &ResolverConfig) -> Arc<CustomProperties> {
    let shared = properties(config.platform);
    if shared.ignore_prefixes() == config.ignore_prefixes.as_slice() {
        return shared;
    }
    Arc::new(
        (*shared)
            .clone()
            .with_ignore_prefixes(config.ignore_prefixes.clone()),
    )
}
