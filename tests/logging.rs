use extended_styles::{HostError, init_logger};
use log::LevelFilter;
use xss::resolve::shorthand::Expander;
use xss::StyleValue;

#[test]
fn test_diagnostics_reach_the_log_file() {
    let path = std::env::temp_dir().join(format!("extended-styles-{}.log", std::process::id()));
    let _ = std::fs::remove_file(&path);

    init_logger(&path, LevelFilter::Warn).expect("logger installs once");
    assert!(matches!(
        init_logger(&path, LevelFilter::Warn),
        Err(HostError::LoggerAlreadySet)
    ));

    let expanded = Expander::new("margin").expand(&StyleValue::from("1px solid"));
    assert!(expanded.is_empty());
    log::debug!("below the configured level");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[WARN]"), "warning was written: {contents}");
    assert!(contents.contains("invalid `margin` shorthand"));
    assert!(!contents.contains("below the configured level"));

    let _ = std::fs::remove_file(&path);
}
