//! Group assembly: the feed's posts plus the optional member fan-out.

use crate::extract;
use crate::records::{GroupRecord, PostRecord};
use crate::session::Session;
use dossier_common::Result;
use dossier_common::catalog::SelectorCatalog;
use dossier_drivers::PageDriver;
use scraper::Html;
use tracing::{debug, warn};

impl<D: PageDriver> Session<D> {
    /// Assemble a group's record from its feed.
    ///
    /// The feed is scrolled once to the bottom and every "more comments"
    /// control is exhausted before the snapshot is taken, so the settled
    /// page carries everything a single pass can reveal.
    pub async fn group(&mut self, group_id: &str) -> Result<GroupRecord> {
        let group_url = self.group_url(group_id);
        debug!(target: "group.feed", group = group_id, url = %group_url, "opening group feed");
        self.navigate(&group_url).await?;
        self.driver.scroll_to_bottom().await?;
        let more = self.catalog.post.more_comments.clone();
        self.driver.click_all(&more).await?;
        self.driver.settle(self.nav.settle).await?;

        let html = self.driver.page_source().await?;
        let posts = {
            let doc = Html::parse_document(&html);
            let post = &self.catalog.post;
            let primary = extract::story_keys(
                &doc,
                &self.catalog.group.feed_posts,
                &post.story_data_attr,
                &post.story_key_field,
            )?;
            if primary.is_empty() {
                // Access-control failures render an empty feed; an actually
                // empty group is the rarer cause.
                warn!(
                    target: "group.feed",
                    group = group_id,
                    "no stories in the group feed; the session may not have access to this group"
                );
            }
            let secondary = extract::story_keys(
                &doc,
                &self.catalog.group.article_posts,
                &post.story_data_attr,
                &post.story_key_field,
            )?;

            let mut ids = primary;
            ids.extend(secondary);
            let ids = extract::dedup_preserving_order(ids);
            debug!(target: "group.feed", stories = ids.len(), "getting the posts data");
            build_posts(&doc, &self.catalog, &ids)?
        };

        let members = if self.opts.members {
            debug!(target: "group.members", group = group_id, "getting members data");
            Some(self.members(&group_url).await?)
        } else {
            None
        };

        Ok(GroupRecord {
            id: group_id.to_string(),
            posts,
            members,
        })
    }
}

/// Collect story keys from the given feed selectors and extract every
/// addressed post from the same snapshot.
pub(crate) fn collect_feed_posts(
    html: &str,
    catalog: &SelectorCatalog,
    feed_selectors: &[&str],
) -> Result<Vec<PostRecord>> {
    let doc = Html::parse_document(html);
    let mut ids = Vec::new();
    for feed in feed_selectors {
        ids.extend(extract::story_keys(
            &doc,
            feed,
            &catalog.post.story_data_attr,
            &catalog.post.story_key_field,
        )?);
    }
    let ids = extract::dedup_preserving_order(ids);
    build_posts(&doc, catalog, &ids)
}

pub(crate) fn build_posts(
    doc: &Html,
    catalog: &SelectorCatalog,
    ids: &[String],
) -> Result<Vec<PostRecord>> {
    let mut posts = Vec::with_capacity(ids.len());
    for id in ids {
        let container_sel = catalog.group.post_container_for(id);
        match extract::post_with_comments(doc, &catalog.post, &container_sel, id)? {
            Some(post) => posts.push(post),
            None => warn!(
                target: "feed.extract",
                story_key = %id,
                "story container yielded no content"
            ),
        }
    }
    Ok(posts)
}
