//! Pure field extractors over serialized DOM snapshots.
//!
//! Every function here maps a parsed snapshot (or one subtree of it) plus
//! catalog/vocabulary inputs to a typed record fragment. No function
//! touches the live page, so all of them are unit-testable against fixture
//! HTML.

use crate::records::{ContactEntry, FamilyRelation, PostRecord, RomanticStatus};
use anyhow::{Result, anyhow};
use dossier_common::catalog::{PostSelectors, Vocabulary};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

fn sel(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| anyhow!("invalid selector {raw:?}: {e}"))
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty())
}

fn first_attr(scope: ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Body fields of one story container, without comments.
#[derive(Debug, Default, PartialEq)]
pub struct PostBody {
    pub author: Option<String>,
    pub date: Option<String>,
    pub text: Option<String>,
    pub media_url: Option<String>,
    pub link: Option<String>,
}

/// Extract the body of a story. Long-form text wins over the short form;
/// a linked image wins over an inline one.
pub fn post_body(container: ElementRef, ps: &PostSelectors) -> Result<PostBody> {
    let big_text = sel(&ps.big_text)?;
    let text = sel(&ps.text)?;
    let image = sel(&ps.image)?;
    let link_image = sel(&ps.link_image)?;
    let link = sel(&ps.link)?;
    let author = sel(&ps.author)?;
    let date = sel(&ps.date)?;

    Ok(PostBody {
        author: first_text(container, &author),
        date: first_text(container, &date),
        text: first_text(container, &big_text).or_else(|| first_text(container, &text)),
        media_url: first_attr(container, &link_image, "src")
            .or_else(|| first_attr(container, &image, "src")),
        link: first_attr(container, &link, "href"),
    })
}

/// Comment texts under a story's comment subtree, in DOM order. Empty
/// bodies become `None` entries rather than being dropped, so positions
/// stay aligned with the page.
pub fn comments(container: ElementRef, ps: &PostSelectors) -> Result<Vec<Option<String>>> {
    let comment = sel(&ps.comment_text)?;
    Ok(container
        .select(&comment)
        .map(|el| {
            let text = text_of(el);
            if text.is_empty() { None } else { Some(text) }
        })
        .collect())
}

/// Split `text` at the first vocabulary label occurring in it.
///
/// Labels are tried in vocabulary order and the first one present wins,
/// even if another label occurs earlier in the text. The prefix is returned
/// exactly as written, trailing whitespace included.
pub fn split_at_label<'t>(labels: &'t [String], text: &'t str) -> Option<(&'t str, &'t str)> {
    labels.iter().find_map(|label| {
        text.find(label.as_str())
            .map(|idx| (&text[..idx], label.as_str()))
    })
}

/// Classify romantic-status free text.
pub fn romantic_status(vocab: &Vocabulary, text: &str) -> RomanticStatus {
    let trimmed = text.trim();
    if trimmed == vocab.no_relationship_info {
        return RomanticStatus::NoInfo;
    }
    if trimmed == vocab.single {
        return RomanticStatus::Single;
    }
    match split_at_label(&vocab.romantic_relations, trimmed) {
        Some((prefix, label)) => RomanticStatus::Partnered {
            person_name: prefix.to_string(),
            status: label.to_string(),
        },
        None => RomanticStatus::Unrecognized {
            raw: trimmed.to_string(),
        },
    }
}

/// Apply the family split to each text independently. Texts matching no
/// label keep their raw form as the name, with no relation.
pub fn family_relations(vocab: &Vocabulary, texts: &[String]) -> Vec<FamilyRelation> {
    texts
        .iter()
        .map(|raw| {
            let trimmed = raw.trim();
            match split_at_label(&vocab.family_relations, trimmed) {
                Some((name, relation)) => FamilyRelation {
                    name: name.to_string(),
                    relation: Some(relation.to_string()),
                },
                None => FamilyRelation {
                    name: trimmed.to_string(),
                    relation: None,
                },
            }
        })
        .collect()
}

/// Zip two parallel node lists into ordered label/value pairs.
///
/// The lists are assumed equal length and positionally aligned; a surplus
/// on either side is silently dropped by the zip.
pub fn key_value(doc: &Html, label_sel: &str, value_sel: &str) -> Result<Vec<ContactEntry>> {
    let labels = sel(label_sel)?;
    let values = sel(value_sel)?;
    Ok(doc
        .select(&labels)
        .map(text_of)
        .zip(doc.select(&values).map(text_of))
        .map(|(label, value)| ContactEntry { label, value })
        .collect())
}

/// Extract one combined list and cut it into exactly three contiguous
/// segments at divider boundaries, in document order.
///
/// A divider before the first entry opens the first segment rather than
/// shifting it; dividers past the third segment fold into the last one, so
/// no entry is ever dropped.
pub fn divided_list(
    doc: &Html,
    list_sel: &str,
    entry_sel: &str,
    divider_sel: &str,
) -> Result<[Vec<String>; 3]> {
    let list = sel(list_sel)?;
    let entry = sel(entry_sel)?;
    let divider = sel(divider_sel)?;

    let mut segments: [Vec<String>; 3] = Default::default();
    let Some(container) = doc.select(&list).next() else {
        return Ok(segments);
    };

    let divider_ids: HashSet<_> = container.select(&divider).map(|el| el.id()).collect();
    let entry_ids: HashSet<_> = container.select(&entry).map(|el| el.id()).collect();

    let mut idx = 0usize;
    let mut seen_entry = false;
    for node in container.descendants() {
        if divider_ids.contains(&node.id()) {
            if seen_entry && idx < 2 {
                idx += 1;
            }
        } else if entry_ids.contains(&node.id()) {
            if let Some(el) = ElementRef::wrap(node) {
                segments[idx].push(text_of(el));
                seen_entry = true;
            }
        }
    }
    Ok(segments)
}

/// Collect story keys from every element matching `container_sel`.
///
/// The key lives inside a JSON payload carried by a per-element data
/// attribute; elements without the attribute, or with a payload that does
/// not parse, are skipped.
pub fn story_keys(
    doc: &Html,
    container_sel: &str,
    data_attr: &str,
    key_field: &str,
) -> Result<Vec<String>> {
    let containers = sel(container_sel)?;
    let mut keys = Vec::new();
    for el in doc.select(&containers) {
        let Some(raw) = el.value().attr(data_attr) else {
            continue;
        };
        let Ok(payload) = serde_json::from_str::<serde_json::Value>(raw) else {
            continue;
        };
        match payload.get(key_field) {
            Some(serde_json::Value::String(s)) => keys.push(s.clone()),
            Some(serde_json::Value::Number(n)) => keys.push(n.to_string()),
            _ => {}
        }
    }
    Ok(keys)
}

/// Extract a full [`PostRecord`] for one story key.
///
/// Among the containers matching `container_sel`, the first one with any
/// visible text wins; its first element child is the story body and its
/// last element child holds the comments.
pub fn post_with_comments(
    doc: &Html,
    ps: &PostSelectors,
    container_sel: &str,
    story_key: &str,
) -> Result<Option<PostRecord>> {
    let selector = sel(container_sel)?;
    let Some(container) = doc.select(&selector).find(|el| !text_of(*el).is_empty()) else {
        return Ok(None);
    };

    let kids: Vec<ElementRef> = container.children().filter_map(ElementRef::wrap).collect();
    let body_scope = kids.first().copied().unwrap_or(container);
    let comment_scope = kids.last().copied().unwrap_or(container);

    let body = post_body(body_scope, ps)?;
    let comments = comments(comment_scope, ps)?;
    Ok(Some(PostRecord {
        id: story_key.to_string(),
        author: body.author,
        date: body.date,
        text: body.text,
        media_url: body.media_url,
        link: body.link,
        comments,
    }))
}

/// Collect bare profile ids from member links.
///
/// Each href is resolved against the base URL and stripped of its query;
/// the id is the remaining URL path. Links that fail to resolve are
/// skipped.
pub fn profile_ids(doc: &Html, selectors: &[&str], base: &Url) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for raw in selectors {
        let selector = sel(raw)?;
        for el in doc.select(&selector) {
            let Some(href) = el.value().attr("href") else {
                continue;
            };
            if let Some(id) = profile_id_from_href(base, href) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}

/// Bare profile id from one link: resolve against `base`, drop the query,
/// keep the path without its leading slash.
pub fn profile_id_from_href(base: &Url, href: &str) -> Option<String> {
    let resolved = base.join(href).ok()?;
    let path = resolved.path().trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(path.trim_end_matches('/').to_string())
}

/// Trimmed text of the first element matching `selector`, if any.
pub fn single_text(doc: &Html, selector: &str) -> Result<Option<String>> {
    let selector = sel(selector)?;
    Ok(doc
        .select(&selector)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty()))
}

/// Trimmed texts of every element matching `selector`, in document order.
pub fn all_texts(doc: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = sel(selector)?;
    Ok(doc.select(&selector).map(text_of).collect())
}

/// Drop repeated ids while preserving first-seen order.
pub fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
