//! The authenticated browser session a run owns.
//!
//! One [`Session`] wraps the single mutable page of a run and is handed
//! down the call chain by exclusive borrow: login, then the group or
//! profile assembler, then nested member and post extraction. No two page
//! operations are ever in flight at once.

use dossier_common::catalog::{SelectorCatalog, Vocabulary};
use dossier_common::{Credentials, DossierError, Result, RunOptions};
use dossier_drivers::PageDriver;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

/// Per-operation navigation bounds.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    /// Upper bound for a full page navigation.
    pub page_load: Duration,
    /// Pause after scroll/click storms so lazy content can render.
    pub settle: Duration,
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self {
            page_load: Duration::from_secs(600),
            settle: Duration::from_millis(3000),
        }
    }
}

/// Everything a session needs besides the driver itself.
pub struct SessionOptions {
    pub base: Url,
    pub catalog: SelectorCatalog,
    pub vocabulary: Vocabulary,
    pub run: RunOptions,
    pub navigation: NavigationPolicy,
    pub screenshot_dir: PathBuf,
    pub cancel: CancellationToken,
}

pub struct Session<D: PageDriver> {
    pub(crate) driver: D,
    pub(crate) catalog: SelectorCatalog,
    pub(crate) vocab: Vocabulary,
    pub(crate) opts: RunOptions,
    pub(crate) nav: NavigationPolicy,
    base: Url,
    screenshot_dir: PathBuf,
    cancel: CancellationToken,
}

impl<D: PageDriver> Session<D> {
    pub fn new(driver: D, options: SessionOptions) -> Self {
        Self {
            driver,
            catalog: options.catalog,
            vocab: options.vocabulary,
            opts: options.run,
            nav: options.navigation,
            base: options.base,
            screenshot_dir: options.screenshot_dir,
            cancel: options.cancel,
        }
    }

    /// Hand the page back once the run is over, e.g. to close it.
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Authenticate the session. A failure here is fatal to the run.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        debug!(target: "session.login", "logging in under the configured credentials");
        let root = self.base_str().to_string();
        self.navigate(&root)
            .await
            .map_err(auth_on_timeout)?;

        let login = self.catalog.login.clone();
        self.driver.focus(&login.username_field).await?;
        self.driver
            .type_text(&login.username_field, &credentials.username)
            .await?;
        self.driver.focus(&login.password_field).await?;
        self.driver
            .type_text(&login.password_field, &credentials.password)
            .await?;
        self.driver.click(&login.submit_button).await?;

        self.wait_for_navigation(&root)
            .await
            .map_err(auth_on_timeout)?;

        self.screenshot("login.png").await?;
        info!(target: "session.login", "authenticated");
        Ok(())
    }

    /// Site root without the trailing slash URL normalisation adds.
    pub(crate) fn base_str(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn profile_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_str(), id)
    }

    pub(crate) fn group_url(&self, group_id: &str) -> String {
        format!("{}/groups/{}", self.base_str(), group_id)
    }

    /// Full navigation: issue the load and wait for it under the bound.
    pub(crate) async fn navigate(&mut self, url: &str) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(DossierError::Cancelled);
        }
        self.driver.goto(url).await?;
        self.wait_for_navigation(url).await
    }

    /// Wait for the in-flight navigation, racing the cancellation token
    /// and the configured bound.
    pub(crate) async fn wait_for_navigation(&mut self, url: &str) -> Result<()> {
        let bound = self.nav.page_load;
        let cancel = self.cancel.clone();
        tokio::select! {
            _ = cancel.cancelled() => Err(DossierError::Cancelled),
            outcome = tokio::time::timeout(bound, self.driver.wait_until_loaded()) => {
                match outcome {
                    Ok(loaded) => {
                        loaded?;
                        Ok(())
                    }
                    Err(_) => Err(DossierError::NavigationTimeout {
                        url: url.to_string(),
                        waited_ms: bound.as_millis() as u64,
                    }),
                }
            }
        }
    }

    pub(crate) async fn screenshot(&mut self, name: &str) -> Result<()> {
        let path = self.screenshot_dir.join(name);
        self.driver.screenshot(&path).await?;
        debug!(target: "session.screenshot", path = %path.display(), "captured audit artifact");
        Ok(())
    }
}

/// Within login, a navigation that never completes means the submission
/// failed; everything else keeps its own kind.
fn auth_on_timeout(err: DossierError) -> DossierError {
    match err {
        DossierError::NavigationTimeout { url, waited_ms } => DossierError::Auth(format!(
            "navigation to {url} did not complete within {waited_ms}ms"
        )),
        other => other,
    }
}
