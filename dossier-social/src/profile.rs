//! Profile assembly: four about sub-pages merged into one [`UserRecord`].

use crate::records::{ContactEntry, EducationRecord, PostRecord, RelationshipRecord, UserRecord};
use crate::session::Session;
use crate::{dates, extract, group};
use dossier_common::catalog::{ProfileSelectors, Vocabulary};
use dossier_common::{DossierError, Result};
use dossier_drivers::PageDriver;
use scraper::Html;
use tracing::debug;

impl<D: PageDriver> Session<D> {
    /// Assemble one profile's record.
    ///
    /// The target comes from the explicit `id` when given (member fan-out),
    /// falling back to the configured self id. Each about sub-page is a full
    /// navigation; a timeout on any of them aborts the run.
    pub async fn profile(&mut self, id: Option<&str>) -> Result<UserRecord> {
        let target = id
            .map(str::to_string)
            .or_else(|| self.opts.person_id.clone())
            .ok_or_else(|| {
                DossierError::Config("no profile target: pass an id or set run.person_id".into())
            })?;
        debug!(target: "profile.visit", id = %target, "getting user data");
        let profile_url = self.profile_url(&target);

        self.navigate(&format!("{profile_url}/about?section=relationship"))
            .await?;
        let html = self.driver.page_source().await?;
        let relationship = parse_relationship(&html, &self.catalog.profile, &self.vocab)?;

        self.navigate(&format!("{profile_url}/about?section=contact-info"))
            .await?;
        let html = self.driver.page_source().await?;
        let contact = parse_pairs(
            &html,
            &self.catalog.profile.contact_label,
            &self.catalog.profile.contact_value,
        )?;

        self.navigate(&format!("{profile_url}/about?section=living"))
            .await?;
        let html = self.driver.page_source().await?;
        let living = parse_pairs(
            &html,
            &self.catalog.profile.living_label,
            &self.catalog.profile.living_value,
        )?;

        self.navigate(&format!("{profile_url}/about?section=education"))
            .await?;
        let html = self.driver.page_source().await?;
        let (education, name) = parse_education_page(&html, &self.catalog.profile)?;

        let age = contact
            .iter()
            .find(|entry| entry.label == self.vocab.birth_date_label)
            .and_then(|entry| dates::derive_age(&entry.value, chrono::Local::now().date_naive()));

        let posts = if self.opts.posts {
            Some(self.person_feed_posts(&target, &profile_url).await?)
        } else {
            None
        };

        Ok(UserRecord {
            id: target,
            name,
            age,
            relationship,
            contact,
            living,
            education,
            posts,
        })
    }

    /// Collect the person's own feed, exhausting "more comments" controls
    /// first, and capture the post-visit audit screenshot.
    async fn person_feed_posts(
        &mut self,
        id: &str,
        profile_url: &str,
    ) -> Result<Vec<PostRecord>> {
        debug!(target: "profile.posts", id, "getting feed posts");
        self.navigate(profile_url).await?;
        self.driver.scroll_to_bottom().await?;
        let more = self.catalog.post.more_comments.clone();
        self.driver.click_all(&more).await?;
        self.driver.settle(self.nav.settle).await?;
        self.screenshot("person.png").await?;

        let html = self.driver.page_source().await?;
        let feed = self.catalog.profile.feed_posts.clone();
        group::collect_feed_posts(&html, &self.catalog, &[feed.as_str()])
    }
}

fn parse_relationship(
    html: &str,
    ps: &ProfileSelectors,
    vocab: &Vocabulary,
) -> Result<RelationshipRecord> {
    let doc = Html::parse_document(html);
    let romantic = extract::single_text(&doc, &ps.romantic_status)?
        .map(|text| extract::romantic_status(vocab, &text))
        .unwrap_or(crate::records::RomanticStatus::NoInfo);
    let family_texts = extract::all_texts(&doc, &ps.family_relation)?;
    let family = extract::family_relations(vocab, &family_texts);
    Ok(RelationshipRecord { romantic, family })
}

fn parse_pairs(html: &str, label_sel: &str, value_sel: &str) -> Result<Vec<ContactEntry>> {
    let doc = Html::parse_document(html);
    Ok(extract::key_value(&doc, label_sel, value_sel)?)
}

fn parse_education_page(
    html: &str,
    ps: &ProfileSelectors,
) -> Result<(EducationRecord, Option<String>)> {
    let doc = Html::parse_document(html);
    let [work, skills, education] = extract::divided_list(
        &doc,
        &ps.education_list,
        &ps.education_entry,
        &ps.education_divider,
    )?;
    let name = extract::single_text(&doc, &ps.name)?;
    Ok((
        EducationRecord {
            work,
            skills,
            education,
        },
        name,
    ))
}
