#![allow(dead_code)]

use async_trait::async_trait;
use dossier_common::RunOptions;
use dossier_common::catalog::{SelectorCatalog, Vocabulary};
use dossier_drivers::PageDriver;
use dossier_social::{NavigationPolicy, Session, SessionOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Scripted driver: serves canned page sources keyed by URL fragment and
/// records every action for assertions. The longest matching fragment wins,
/// so nested URLs (a group feed vs. its member roster) resolve correctly.
pub struct FakeDriver {
    pages: Vec<(String, String)>,
    current: String,
    hang_on_load: bool,
    pub actions: Vec<String>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            hang_on_load: false,
            actions: Vec::new(),
        }
    }

    /// A driver whose navigations never finish loading.
    pub fn hanging() -> Self {
        Self {
            hang_on_load: true,
            ..Self::new()
        }
    }

    pub fn with_page(mut self, url_fragment: &str, html: &str) -> Self {
        self.pages.push((url_fragment.to_string(), html.to_string()));
        self
    }

    fn lookup(&self, url: &str) -> String {
        self.pages
            .iter()
            .filter(|(fragment, _)| url.contains(fragment.as_str()))
            .max_by_key(|(fragment, _)| fragment.len())
            .map(|(_, html)| html.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn goto(&mut self, url: &str) -> anyhow::Result<()> {
        self.actions.push(format!("goto {url}"));
        self.current = self.lookup(url);
        Ok(())
    }

    async fn wait_until_loaded(&mut self) -> anyhow::Result<()> {
        if self.hang_on_load {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(())
    }

    async fn page_source(&mut self) -> anyhow::Result<String> {
        Ok(self.current.clone())
    }

    async fn scroll_to_bottom(&mut self) -> anyhow::Result<()> {
        self.actions.push("scroll".to_string());
        Ok(())
    }

    async fn click_all(&mut self, selector: &str) -> anyhow::Result<usize> {
        self.actions.push(format!("click_all {selector}"));
        Ok(0)
    }

    async fn screenshot(&mut self, path: &Path) -> anyhow::Result<()> {
        self.actions.push(format!("screenshot {}", path.display()));
        Ok(())
    }

    async fn focus(&mut self, selector: &str) -> anyhow::Result<()> {
        self.actions.push(format!("focus {selector}"));
        Ok(())
    }

    async fn type_text(&mut self, selector: &str, text: &str) -> anyhow::Result<()> {
        self.actions.push(format!("type {selector} {text}"));
        Ok(())
    }

    async fn click(&mut self, selector: &str) -> anyhow::Result<()> {
        self.actions.push(format!("click {selector}"));
        Ok(())
    }

    async fn settle(&mut self, _duration: Duration) -> anyhow::Result<()> {
        self.actions.push("settle".to_string());
        Ok(())
    }
}

pub const BASE: &str = "https://m.example-social.net";

pub fn session(driver: FakeDriver, run: RunOptions) -> Session<FakeDriver> {
    session_with_cancel(driver, run, CancellationToken::new())
}

pub fn session_with_cancel(
    driver: FakeDriver,
    run: RunOptions,
    cancel: CancellationToken,
) -> Session<FakeDriver> {
    Session::new(
        driver,
        SessionOptions {
            base: Url::parse(BASE).unwrap(),
            catalog: SelectorCatalog::default(),
            vocabulary: Vocabulary::default(),
            run,
            navigation: NavigationPolicy {
                page_load: Duration::from_millis(200),
                settle: Duration::from_millis(1),
            },
            screenshot_dir: PathBuf::from("."),
            cancel,
        },
    )
}

// Fixture pages shared by the pipeline tests.

pub fn relationship_page() -> &'static str {
    r#"<html><body>
        <div id="relationship"><div data-sigil="profile-relationship">João Pereira Casado(a)</div></div>
        <div id="family"><div data-sigil="profile-relative">Joana Silva Mãe</div></div>
    </body></html>"#
}

pub fn contact_page(birth_date: &str) -> String {
    format!(
        r#"<html><body><div id="contact-info"><table>
            <tr><td>Celular</td><td>+55 11 98888-0000</td></tr>
            <tr><td>Data de nascimento</td><td>{birth_date}</td></tr>
        </table></div></body></html>"#
    )
}

pub fn living_page() -> &'static str {
    r#"<html><body><div id="living"><table>
        <tr><td>Cidade atual</td><td>São Paulo</td></tr>
    </table></div></body></html>"#
}

pub fn education_page(name: &str) -> String {
    format!(
        r#"<html><body>
        <div id="cover-name-root"><h3>{name}</h3></div>
        <div id="education">
            <header>Trabalho</header>
            <div data-sigil="profile-experience">Padaria Pão Quente</div>
            <header>Habilidades</header>
            <div data-sigil="profile-experience">Confeitaria</div>
            <header>Educação</header>
            <div data-sigil="profile-experience">Colégio Estadual</div>
        </div>
    </body></html>"#
    )
}

/// Register the four about sub-pages for `id` on the driver.
pub fn with_profile_pages(driver: FakeDriver, id: &str, name: &str, birth_date: &str) -> FakeDriver {
    driver
        .with_page(
            &format!("{id}/about?section=relationship"),
            relationship_page(),
        )
        .with_page(
            &format!("{id}/about?section=contact-info"),
            &contact_page(birth_date),
        )
        .with_page(&format!("{id}/about?section=living"), living_page())
        .with_page(
            &format!("{id}/about?section=education"),
            &education_page(name),
        )
}
