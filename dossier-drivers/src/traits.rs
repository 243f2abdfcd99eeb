use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// The page capability the assemblers drive.
///
/// One implementor wraps a live WebDriver session; integration tests
/// substitute a scripted fake. All operations act on the single logical
/// page the session owns, and complete strictly in the order issued.
#[async_trait]
pub trait PageDriver: Send {
    /// Begin a full navigation to `url`. Completion is observed separately
    /// through [`PageDriver::wait_until_loaded`] so the caller owns the bound.
    async fn goto(&mut self, url: &str) -> anyhow::Result<()>;

    /// Resolve once the current document has finished loading. Deliberately
    /// unbounded; callers race it against their own timeout.
    async fn wait_until_loaded(&mut self) -> anyhow::Result<()>;

    /// Serialized snapshot of the live DOM. Extraction never touches the
    /// page again after taking one.
    async fn page_source(&mut self) -> anyhow::Result<String>;

    /// One pass of scrolling to the bottom, forcing lazy content to render.
    async fn scroll_to_bottom(&mut self) -> anyhow::Result<()>;

    /// Repeatedly click every element matching `selector` until none remain.
    /// Returns the number of clicks issued.
    async fn click_all(&mut self, selector: &str) -> anyhow::Result<usize>;

    /// Capture a PNG of the current viewport to `path`.
    async fn screenshot(&mut self, path: &Path) -> anyhow::Result<()>;

    /// Give an element input focus.
    async fn focus(&mut self, selector: &str) -> anyhow::Result<()>;

    /// Type into the element matching `selector`.
    async fn type_text(&mut self, selector: &str, text: &str) -> anyhow::Result<()>;

    /// Click the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> anyhow::Result<()>;

    /// Timed wait allowing freshly triggered rendering to land.
    async fn settle(&mut self, duration: Duration) -> anyhow::Result<()>;
}
