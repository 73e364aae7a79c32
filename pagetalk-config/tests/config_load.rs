use pagetalk_config::PagetalkConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn loads_file_with_env_interpolation() {
    let tmp = TempDir::new().unwrap();
    let file_yaml = r#"
inference:
  endpoint: "https://api.example.com/openai/v1/chat/completions"
  api_key: "${PAGETALK_TEST_KEY}"
  model: "llama3-8b-8192"
session:
  secret: "cookie-secret"
  ttl_secs: 1800
scrape:
  truncation_budget: 8000
server:
  port: 9000
"#;
    let p = write_yaml(&tmp, "pagetalk.yaml", file_yaml);

    temp_env::with_var("PAGETALK_TEST_KEY", Some("sk-from-env"), || {
        let cfg = PagetalkConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load config");

        assert_eq!(cfg.inference.api_key, "sk-from-env");
        assert_eq!(cfg.session.ttl_secs, 1800);
        assert_eq!(cfg.scrape.truncation_budget, 8000);
        assert_eq!(cfg.server.port, 9000);
    });
}

#[test]
#[serial]
fn env_overrides_win_over_the_file() {
    let tmp = TempDir::new().unwrap();
    let file_yaml = r#"
inference:
  endpoint: "https://api.example.com/openai/v1/chat/completions"
  api_key: "sk-file"
session:
  secret: "cookie-secret"
"#;
    let p = write_yaml(&tmp, "pagetalk.yaml", file_yaml);

    temp_env::with_var("PAGETALK_INFERENCE__API_KEY", Some("sk-env-wins"), || {
        let cfg = PagetalkConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load config");
        assert_eq!(cfg.inference.api_key, "sk-env-wins");
    });
}

#[test]
#[serial]
fn missing_file_falls_back_to_environment_only() {
    temp_env::with_vars(
        [
            (
                "PAGETALK_INFERENCE__ENDPOINT",
                Some("https://api.example.com/v1/chat/completions"),
            ),
            ("PAGETALK_INFERENCE__API_KEY", Some("sk-env")),
            ("PAGETALK_SESSION__SECRET", Some("cookie-secret")),
        ],
        || {
            let cfg = PagetalkConfigLoader::new()
                .with_file("does-not-exist.yaml")
                .load()
                .expect("load from env");
            assert_eq!(cfg.inference.api_key, "sk-env");
            assert_eq!(cfg.session.secret, "cookie-secret");
        },
    );
}
