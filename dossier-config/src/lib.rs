//! Loader for run configuration with YAML + environment overlays.
//!
//! A run is described by `dossier.yaml` plus `DOSSIER_`-prefixed environment
//! variables; `${VAR}` placeholders inside the file are expanded recursively
//! so secrets never have to live in the file itself.

use config::{Config, ConfigError, Environment, File};
use dossier_common::catalog::{SelectorCatalog, Vocabulary};
use dossier_common::{Credentials, RunOptions};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct DossierConfig {
    pub version: Option<String>,
    pub site: SiteSpec,
    pub credentials: Credentials,
    #[serde(default)]
    pub run: RunOptions,
    #[serde(default)]
    pub browser: BrowserSpec,
    #[serde(default)]
    pub output: OutputSpec,
    #[serde(default)]
    pub selectors: SelectorCatalog,
    #[serde(default)]
    pub vocabulary: Vocabulary,
}

/// The site under extraction.
#[derive(Debug, Deserialize)]
pub struct SiteSpec {
    /// Root URL; profile and group URLs are resolved against it.
    pub base_url: String,
}

/// Browser transport settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrowserSpec {
    pub webdriver_url: String,
    pub headless: bool,
    /// Upper bound for every full page navigation. Deliberately generous;
    /// network speed on the other side is unpredictable.
    pub page_load_timeout_secs: u64,
    /// Pause after scroll/click storms so lazy content can render.
    pub settle_ms: u64,
}

impl Default for BrowserSpec {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
            page_load_timeout_secs: 600,
            settle_ms: 3000,
        }
    }
}

/// Where run artifacts land.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    pub data_path: String,
    pub screenshot_dir: String,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            data_path: "data.json".into(),
            screenshot_dir: ".".into(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct DossierConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for DossierConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DossierConfigLoader {
    /// Start with sensible defaults: YAML file + `DOSSIER_` env overrides.
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("DOSSIER").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use dossier_config::DossierConfigLoader;
    ///
    /// let cfg = DossierConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// site:
    ///   base_url: "https://m.example-social.net"
    /// credentials:
    ///   username: "ana@example.net"
    ///   password: "secret"
    /// run:
    ///   group_id: "386183191718"
    ///   members: true
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.run.group_id.as_deref(), Some("386183191718"));
    /// assert!(cfg.run.members);
    /// assert!(!cfg.run.posts);
    /// assert_eq!(cfg.browser.webdriver_url, "http://localhost:9515");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// The loader combines YAML snippets with `DOSSIER_`-prefixed environment
    /// variables and expands `${VAR}` placeholders before materialising the
    /// strongly typed configuration.
    pub fn load(self) -> Result<DossierConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first so placeholders inside nested
        // structures are expanded uniformly.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: DossierConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
