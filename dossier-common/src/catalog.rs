//! DOM selector catalog and localized vocabulary.
//!
//! The catalog maps semantic field names to the DOM query strings used to
//! locate them, grouped by page type. It is loaded once per run and never
//! mutated; every group supports partial overrides from configuration, with
//! the built-in mobile-site defaults filling the gaps.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with a story key in [`GroupSelectors::post_container_for`].
const STORY_KEY_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorCatalog {
    pub login: LoginSelectors,
    pub group: GroupSelectors,
    pub profile: ProfileSelectors,
    pub post: PostSelectors,
}

/// Login form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSelectors {
    pub username_field: String,
    pub password_field: String,
    pub submit_button: String,
}

impl Default for LoginSelectors {
    fn default() -> Self {
        Self {
            username_field: "input[name='email']".into(),
            password_field: "input[name='pass']".into(),
            submit_button: "button[name='login']".into(),
        }
    }
}

/// Group feed and member roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSelectors {
    /// Primary feed posts. An empty match here usually means the session
    /// has no access to the group, not that the group is empty.
    pub feed_posts: String,
    /// Secondary article feed; overlaps with `feed_posts`.
    pub article_posts: String,
    /// Per-story container template; `{id}` is replaced with a story key.
    pub post_container: String,
    pub member_links: String,
    pub member_links_extended: String,
    pub member_links_all: String,
}

impl Default for GroupSelectors {
    fn default() -> Self {
        Self {
            feed_posts: "#m_group_stories_container article[data-ft]".into(),
            article_posts: "#m_group_stories_container section article[data-ft]".into(),
            post_container: "article[data-ft*='{id}']".into(),
            member_links: "#groupsMemberSection .item a[href]".into(),
            member_links_extended: "#groupsMemberSection_extended .item a[href]".into(),
            member_links_all: "#groupsAllMembersSection .item a[href]".into(),
        }
    }
}

impl GroupSelectors {
    /// Selector addressing one story's container by its story key.
    pub fn post_container_for(&self, story_key: &str) -> String {
        self.post_container.replace(STORY_KEY_PLACEHOLDER, story_key)
    }
}

/// Profile "about" sub-pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSelectors {
    pub name: String,
    /// Stories on the person's own feed, for runs that collect posts.
    pub feed_posts: String,
    pub romantic_status: String,
    pub family_relation: String,
    pub contact_label: String,
    pub contact_value: String,
    pub living_label: String,
    pub living_value: String,
    /// Combined work/skills/education list container.
    pub education_list: String,
    pub education_entry: String,
    /// Boundary elements that cut the combined list into its three segments.
    pub education_divider: String,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            name: "#cover-name-root h3".into(),
            feed_posts: "#structured_composer_async_container article[data-ft]".into(),
            romantic_status: "#relationship div[data-sigil='profile-relationship']".into(),
            family_relation: "#family div[data-sigil='profile-relative']".into(),
            contact_label: "#contact-info table td:first-child".into(),
            contact_value: "#contact-info table td:last-child".into(),
            living_label: "#living table td:first-child".into(),
            living_value: "#living table td:last-child".into(),
            education_list: "#education".into(),
            education_entry: "div[data-sigil='profile-experience']".into(),
            education_divider: "header".into(),
        }
    }
}

/// Story content and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSelectors {
    /// Long-form body; wins over `text` when both are present.
    pub big_text: String,
    pub text: String,
    /// Inline image.
    pub image: String,
    /// Image behind a photo link; wins over `image` when both are present.
    pub link_image: String,
    pub link: String,
    pub author: String,
    pub date: String,
    pub comment_text: String,
    pub more_comments: String,
    /// Element attribute holding the story's JSON data store.
    pub story_data_attr: String,
    /// Key of the story identifier inside that JSON payload.
    pub story_key_field: String,
}

impl Default for PostSelectors {
    fn default() -> Self {
        Self {
            big_text: "div.text_exposed_root p".into(),
            text: "div.story_body_container p".into(),
            image: "div.story_body_container img[src]".into(),
            link_image: "a[data-sigil='photo-image'] img[src]".into(),
            link: "div.story_body_container a[href]".into(),
            author: "header h3 a".into(),
            date: "header abbr".into(),
            comment_text: "div[data-sigil='comment-body']".into(),
            more_comments: "div[data-sigil='replies-see-more'] a".into(),
            story_data_attr: "data-ft".into(),
            story_key_field: "mf_story_key".into(),
        }
    }
}

/// Localized text fragments used to split free-text relationship
/// descriptions into structured fields, plus the sentinels the site renders
/// for the no-data cases. Defaults target the pt-BR locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Exact text rendered when a profile exposes no relationship info.
    pub no_relationship_info: String,
    /// Exact text rendered for a single person.
    pub single: String,
    /// Romantic status labels; earlier entries win when several occur.
    pub romantic_relations: Vec<String>,
    /// Family relation labels; earlier entries win when several occur.
    pub family_relations: Vec<String>,
    /// Contact-record label carrying the birth date.
    pub birth_date_label: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            no_relationship_info: "Nenhuma informação de relacionamento a ser exibida".into(),
            single: "Solteiro".into(),
            romantic_relations: vec![
                "Casado(a)".into(),
                "Noivo(a)".into(),
                "Namorando".into(),
                "Em um relacionamento sério".into(),
                "União estável".into(),
            ],
            // "Irmão" before "Irmã": the shorter label is a prefix of the
            // longer one and would otherwise always win the split.
            family_relations: vec![
                "Pai".into(),
                "Mãe".into(),
                "Irmão".into(),
                "Irmã".into(),
                "Filho".into(),
                "Filha".into(),
                "Primo".into(),
                "Prima".into(),
                "Tio".into(),
                "Tia".into(),
                "Avô".into(),
                "Avó".into(),
                "Sobrinho".into(),
                "Sobrinha".into(),
                "Marido".into(),
                "Esposa".into(),
            ],
            birth_date_label: "Data de nascimento".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_container_substitutes_story_key() {
        let group = GroupSelectors::default();
        assert_eq!(
            group.post_container_for("7715"),
            "article[data-ft*='7715']"
        );
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let catalog: SelectorCatalog = serde_json::from_str(
            r#"{ "login": { "username_field": "input#user" } }"#,
        )
        .unwrap();
        assert_eq!(catalog.login.username_field, "input#user");
        assert_eq!(catalog.login.password_field, "input[name='pass']");
        assert_eq!(catalog.post.story_key_field, "mf_story_key");
    }
}
