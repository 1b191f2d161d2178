use extended_styles::{Host, InteractionStates, Style, styles_of};
use xss::{Platform, ResolverConfig, StyleRegistry, StyleValue, Viewport, record, sheet};

fn tablet_host(platform: Platform) -> Host {
    Host::new(ResolverConfig::new(platform), Viewport::new(768.0, 1024.0))
}

#[test]
fn test_focus_overrides_only_apply_while_focused() {
    let mut host = tablet_host(Platform::Ios);
    let ids = host
        .create(sheet! {
            "field" => record! {
                "borderColor" => "gray",
                ":focus" => record! { "borderColor" => "blue" },
            },
        })
        .unwrap();
    let styles = vec![Style::from(ids["field"])];

    let idle = host.with_focus(&styles, InteractionStates::empty());
    assert_eq!(idle, styles, "unfocused list is unchanged");

    let focused = host.with_focus(&styles, InteractionStates::FOCUS | InteractionStates::HOVER);
    assert_eq!(focused.len(), 2);
    assert_eq!(
        host.flatten(&focused).unwrap().get("borderColor"),
        Some(&StyleValue::from("blue"))
    );
}

#[test]
fn test_transition_props_merge_left_to_right() {
    let mut host = tablet_host(Platform::Android);
    let ids = host
        .create(sheet! {
            "card" => record! {
                "elevation" => 2,
                "transition" => record! { "duration" => 200, "transition" => "elevation" },
            },
            "fast" => record! {
                "transition" => record! { "duration" => 50, "transition" => "opacity" },
            },
            "plain" => record! { "opacity" => 1 },
        })
        .unwrap();

    let card_only = host.transition_props(&[Style::from(ids["card"]), Style::from(ids["plain"])]);
    assert_eq!(
        card_only,
        Some(record! { "duration" => 200, "transition" => vec!["elevation"] })
    );

    let overridden = host.transition_props(&[Style::from(ids["card"]), Style::from(ids["fast"])]);
    assert_eq!(
        overridden.and_then(|t| t.get("duration").cloned()),
        Some(StyleValue::Number(50.0))
    );

    assert_eq!(host.transition_props(&[Style::from(ids["plain"])]), None);
}

#[test]
fn test_inline_transition_is_picked_directly() {
    let host = tablet_host(Platform::Ios);
    let inline = Style::from(record! {
        "opacity" => 0,
        "transition" => record! { "duration" => 120, "transition" => "opacity" },
    });
    assert_eq!(
        host.transition_props(&[inline]),
        Some(record! { "duration" => 120, "transition" => "opacity" })
    );
}

#[test]
fn test_selected_styles_flatten_in_sheet_order() {
    let mut host = tablet_host(Platform::Web);
    let ids = host
        .create(sheet! {
            "active" => record! { "backgroundColor" => "blue" },
            "base" => record! { "backgroundColor" => "white", "padding" => "4px" },
            "disabled" => record! { "opacity" => 0.5 },
        })
        .unwrap();

    let selected: Vec<Style> = styles_of(&ids, [("base", true), ("active", true), ("disabled", false)])
        .into_iter()
        .map(Style::from)
        .collect();
    let flat = host.flatten(&selected).unwrap();

    // "active" sorts before "base", so base's background wins.
    assert_eq!(flat.get("backgroundColor"), Some(&StyleValue::from("white")));
    assert_eq!(flat.get("paddingTop"), Some(&StyleValue::Number(4.0)));
    assert!(flat.get("opacity").is_none());
}

#[test]
fn test_live_reload_keeps_identities() {
    let mut host = tablet_host(Platform::Ios).with_registry(StyleRegistry::keyed_by_name());
    let first = host
        .create(sheet! { "title" => record! { "fontWeight" => 600 } })
        .unwrap();
    let second = host
        .create(sheet! { "title" => record! { "fontWeight" => 700 } })
        .unwrap();

    assert_eq!(first["title"], second["title"]);
    assert_eq!(host.id("title").unwrap(), first["title"]);
    assert_eq!(
        host.style(first["title"]).unwrap(),
        &record! { "fontWeight" => "700" }
    );
}

#[test]
fn test_resolution_errors_surface_to_the_host() {
    let mut host = tablet_host(Platform::Ios);
    let result = host.create(sheet! {
        "x" => record! { "@media (orientation: sideways)" => record! { "opacity" => 1 } },
    });
    assert!(matches!(
        result,
        Err(extended_styles::HostError::Resolve(xss::XssError::InvalidQueryValue { .. }))
    ));
}
