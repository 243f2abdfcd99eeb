use crate::browser::launch::{chrome_capabilities, LaunchOptions};
use crate::browser::typing::InputCadence;
use crate::traits::PageDriver;
use anyhow::Result;
use async_trait::async_trait;
use fantoccini::{elements::Element, Client, ClientBuilder, Locator};
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Load-state polling interval.
const READY_POLL: Duration = Duration::from_millis(250);
/// Scroll passes before we assume the page height is stable.
const MAX_SCROLL_ROUNDS: usize = 40;
/// Click-all passes before we give up on a control that never disappears.
const MAX_CLICK_ROUNDS: usize = 20;

/// A live WebDriver page implementing [`PageDriver`].
///
/// Wraps a single `fantoccini` client; the session is the one mutable
/// browser resource of a run and is handed down the call chain by exclusive
/// borrow, so no two page operations can ever be in flight at once.
pub struct BrowserSession {
    client: Client,
    cadence: InputCadence,
}

impl BrowserSession {
    /// Connect to a running WebDriver service (Chromedriver by default).
    pub async fn connect(webdriver_url: &str, opts: &LaunchOptions) -> Result<Self> {
        let caps = chrome_capabilities(opts);
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;
        Ok(Self {
            client,
            cadence: InputCadence::new(),
        })
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }

    async fn element(&self, selector: &str) -> Result<Element> {
        let element = self
            .client
            .wait()
            .for_element(Locator::Css(selector))
            .await?;
        Ok(element)
    }
}

#[async_trait]
impl PageDriver for BrowserSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.cadence.pause(300, 1200).await;
        self.client.goto(url).await?;
        Ok(())
    }

    async fn wait_until_loaded(&mut self) -> Result<()> {
        loop {
            let state = self
                .client
                .execute("return document.readyState", vec![])
                .await?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }
            sleep(READY_POLL).await;
        }
    }

    async fn page_source(&mut self) -> Result<String> {
        self.client.source().await.map_err(anyhow::Error::from)
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        let mut last_height = -1i64;
        for round in 0..MAX_SCROLL_ROUNDS {
            let height = self
                .client
                .execute(
                    "window.scrollTo(0, document.body.scrollHeight); \
                     return document.body.scrollHeight;",
                    vec![],
                )
                .await?;
            let height = height.as_i64().unwrap_or(0);
            if height == last_height {
                debug!(target: "browser.scroll", rounds = round, height, "page height stable");
                break;
            }
            last_height = height;
            self.cadence.pause(400, 900).await;
        }
        Ok(())
    }

    async fn click_all(&mut self, selector: &str) -> Result<usize> {
        let mut clicks = 0usize;
        for _ in 0..MAX_CLICK_ROUNDS {
            let elements = self.client.find_all(Locator::Css(selector)).await?;
            if elements.is_empty() {
                break;
            }
            let mut progressed = false;
            for element in elements {
                // Elements routinely go stale as clicks mutate the feed;
                // the next round re-queries whatever is still there.
                if element.click().await.is_ok() {
                    clicks += 1;
                    progressed = true;
                    self.cadence.pause(150, 450).await;
                }
            }
            if !progressed {
                break;
            }
        }
        debug!(target: "browser.click_all", selector, clicks, "exhausted matching controls");
        Ok(clicks)
    }

    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        // FIXME(screenshot): WebDriver captures only the viewport; stitch
        // scrolled captures so the audit artifact covers the full page.
        let png = self.client.screenshot().await?;
        tokio::fs::write(path, png).await?;
        Ok(())
    }

    async fn focus(&mut self, selector: &str) -> Result<()> {
        // Focus the way a person would: click into the field.
        let element = self.element(selector).await?;
        element.click().await?;
        self.cadence.pause(100, 300).await;
        Ok(())
    }

    async fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let element = self.element(selector).await?;
        self.cadence.type_into(&element, text).await
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let element = self.element(selector).await?;
        element.click().await?;
        Ok(())
    }

    async fn settle(&mut self, duration: Duration) -> Result<()> {
        sleep(duration).await;
        Ok(())
    }
}
