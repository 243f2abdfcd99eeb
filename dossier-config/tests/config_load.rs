use dossier_config::DossierConfigLoader;
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
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "1"
site:
  base_url: "https://m.example-social.net"
credentials:
  username: "${DOSSIER_RUN_USERNAME}"
  password: "${DOSSIER_RUN_PASSWORD}"
run:
  group_id: "386183191718"
  posts: true
  members: true
browser:
  headless: false
  page_load_timeout_secs: 900
output:
  data_path: "out/data.json"
  "#;
    let p = write_yaml(&tmp, "dossier.yaml", file_yaml);

    temp_env::with_vars(
        [
            ("DOSSIER_RUN_USERNAME", Some("ana@example.net")),
            ("DOSSIER_RUN_PASSWORD", Some("s3cret")),
        ],
        || {
            let config = DossierConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load run config");

            assert_eq!(config.credentials.username, "ana@example.net");
            assert_eq!(config.run.group_id.as_deref(), Some("386183191718"));
            assert!(config.run.posts);
            assert!(config.run.members);
            assert!(!config.browser.headless);
            assert_eq!(config.browser.page_load_timeout_secs, 900);
            // Defaults fill whatever the file leaves out.
            assert_eq!(config.browser.settle_ms, 3000);
            assert_eq!(config.output.data_path, "out/data.json");
            assert_eq!(config.output.screenshot_dir, ".");
        },
    );
}

#[test]
#[serial]
fn selector_overrides_merge_over_defaults() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
site:
  base_url: "https://m.example-social.net"
credentials:
  username: "ana@example.net"
  password: "s3cret"
run:
  person_id: "maria.silva"
selectors:
  login:
    username_field: "input#m_login_email"
vocabulary:
  single: "Solteira"
  "#;
    let p = write_yaml(&tmp, "dossier.yaml", file_yaml);

    let config = DossierConfigLoader::new()
        .with_file(&p)
        .load()
        .expect("load run config");

    assert_eq!(config.selectors.login.username_field, "input#m_login_email");
    // Untouched entries keep the built-in catalog.
    assert_eq!(config.selectors.login.password_field, "input[name='pass']");
    assert_eq!(config.vocabulary.single, "Solteira");
    assert_eq!(
        config.vocabulary.birth_date_label,
        "Data de nascimento"
    );
}
