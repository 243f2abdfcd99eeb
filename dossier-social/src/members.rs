//! Member roster assembly: collect profile ids, then visit each profile.

use crate::extract;
use crate::records::UserRecord;
use crate::session::Session;
use dossier_common::Result;
use dossier_drivers::PageDriver;
use scraper::Html;
use tracing::{debug, warn};

impl<D: PageDriver> Session<D> {
    /// Assemble every member of a group, strictly one profile at a time:
    /// the session's single page is the only interaction channel.
    pub async fn members(&mut self, group_url: &str) -> Result<Vec<UserRecord>> {
        let roster_url = format!("{group_url}/members/");
        self.navigate(&roster_url).await?;
        self.driver.scroll_to_bottom().await?;

        let html = self.driver.page_source().await?;
        let ids = {
            let doc = Html::parse_document(&html);
            let group = &self.catalog.group;
            let raw = extract::profile_ids(
                &doc,
                &[
                    group.member_links.as_str(),
                    group.member_links_extended.as_str(),
                    group.member_links_all.as_str(),
                ],
                self.base_url(),
            )?;
            extract::dedup_preserving_order(raw)
        };

        if ids.is_empty() {
            warn!(target: "group.members", "member roster yielded no profile links");
        }
        debug!(target: "group.members", members = ids.len(), "visiting member profiles");

        let mut records = Vec::with_capacity(ids.len());
        for id in &ids {
            records.push(self.profile(Some(id.as_str())).await?);
        }
        Ok(records)
    }
}
