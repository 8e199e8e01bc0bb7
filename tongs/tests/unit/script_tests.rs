use strum::IntoEnumIterator;
use tongs::script::{dependent_select_js, on_dom_ready, write_script};
use tongs::{TongsConfig, TransportMode};

#[test]
fn test_post_script() {
    let js = dependent_select_js(&TongsConfig::default());

    assert!(js.starts_with("'use strict';"));
    assert!(js.contains("document.addEventListener(\"DOMContentLoaded\""));
    assert!(js.contains("document.getElementById(\"id_ido_type\")"));
    assert!(js.contains("document.getElementById(\"id_ido_syumoku\")"));
    assert!(js.contains("method: 'POST'"));
    assert!(js.contains("getCookie(\"csrftoken\")"));
    assert!(js.contains("headers[\"X-CSRFToken\"] = token;"));
    assert!(js.contains("body: JSON.stringify({data: {[\"ido_type\"]: value}})"));
    assert!(js.contains("fetch(\"/jinji/select_ido_type/\""));
    assert!(js.contains("new Option(\"---------\", '')"));
    assert!(js.contains("if (!response.ok)"));
    assert!(js.contains("if (sequence !== issued)"));
    assert!(js.contains("console.error('Error:', error);"));
}

#[test]
fn test_script_only_accepts_string_or_number_cells() {
    let js = dependent_select_js(&TongsConfig::default());

    assert!(js.contains("if (typeof value !== 'string' && typeof value !== 'number')"));
    assert!(js.contains("new Option(cell(row[1]), cell(row[0]))"));
    assert!(!js.contains("String(row["));
}

#[test]
fn test_get_script() {
    let config = TongsConfig {
        mode: TransportMode::Get,
        ..TongsConfig::default()
    };
    let js = dependent_select_js(&config);

    assert!(js.contains("method: 'GET'"));
    assert!(js.contains("new URLSearchParams({[\"ido_type\"]: value})"));
    assert!(!js.contains("getCookie"));
    assert!(!js.contains("X-CSRFToken"));
}

#[test]
fn test_script_toggles() {
    let config = TongsConfig {
        check_status: false,
        discard_stale: false,
        ..TongsConfig::default()
    };
    let js = dependent_select_js(&config);

    assert!(!js.contains("response.ok"));
    assert!(!js.contains("sequence !== issued"));
}

#[test]
fn test_script_escapes_config_strings() {
    let config = TongsConfig {
        placeholder_label: "it's \"none\"".to_string(),
        ..TongsConfig::default()
    };
    let js = dependent_select_js(&config);
    assert!(js.contains(r#"new Option("it's \"none\"", '')"#));
}

#[test]
fn test_every_mode_sets_common_headers() {
    for mode in TransportMode::iter() {
        let config = TongsConfig {
            mode,
            ..TongsConfig::default()
        };
        let js = dependent_select_js(&config);
        assert!(js.contains("'Accept': \"application/json\""), "{mode}");
        assert!(js.contains("'X-Requested-With': \"XMLHttpRequest\""), "{mode}");
    }
}

#[test]
fn test_on_dom_ready_wraps_blocks() {
    let js = on_dom_ready(&["a();".to_string(), "b();".to_string()]);
    assert_eq!(
        js,
        "document.addEventListener(\"DOMContentLoaded\", () => {\na();\nb();\n});"
    );
}

#[test]
fn test_write_script() {
    let dir = tempfile::tempdir().unwrap();
    let config = TongsConfig::default();

    let path = write_script(&config, dir.path()).unwrap();

    assert_eq!(path, dir.path().join("assets/js/select_ido_type.js"));
    let written = std::fs::read_to_string(path).unwrap();
    assert_eq!(written, dependent_select_js(&config));
}
