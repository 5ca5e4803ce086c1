#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use srenvelope_registry::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
registry:
  url: "http://localhost:8081"
  timeout_msec: 500 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
registry:
  url: "http://localhost:8081"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.registry.timeout_ms, 5000);
    assert!(!cfg.registry.cache);
    assert!(cfg.registry.credentials().is_none());
    assert_eq!(cfg.decode.payload_offset, 5);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
registry:
  url: "https://registry.internal:8081/"
  timeout_ms: 250
  username: "svc"
  password: "secret"
  cache: true
decode:
  payload_offset: 7
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.registry.timeout().as_millis(), 250);
    assert_eq!(cfg.registry.credentials(), Some(("svc", "secret")));
    assert!(cfg.registry.cache);
    assert_eq!(cfg.decode.payload_offset, 7);
}

#[test]
fn out_of_range_values_fail() {
    let cases = [
        "version: 2\nregistry:\n  url: \"http://r\"\n",
        "version: 1\nregistry:\n  url: \"ftp://r\"\n",
        "version: 1\nregistry:\n  url: \"http://r\"\n  timeout_ms: 10\n",
        "version: 1\nregistry:\n  url: \"http://r\"\n  username: \"only-user\"\n",
        "version: 1\nregistry:\n  url: \"http://r\"\ndecode:\n  payload_offset: 4\n",
        "version: 1\n",
    ];

    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.code().as_str(), "CONFIG_ERROR", "case={case}");
    }
}

#[test]
fn registry_url_override_is_validated() {
    let cfg = config::load_from_str("version: 1\nregistry:\n  url: \"http://a:1\"\n").unwrap();

    let same = config::with_registry_url(cfg.clone(), None).unwrap();
    assert_eq!(same.registry.url, "http://a:1");

    let moved = config::with_registry_url(cfg.clone(), Some("http://b:2".into())).unwrap();
    assert_eq!(moved.registry.url, "http://b:2");

    let err = config::with_registry_url(cfg, Some("b:2".into())).unwrap_err();
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}

#[test]
fn missing_file_is_config_error() {
    let err = config::load_from_file("does/not/exist.yaml").unwrap_err();
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}
