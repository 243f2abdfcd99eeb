mod common;

use common::{FakeDriver, session, with_profile_pages};
use dossier_common::RunOptions;
use dossier_social::dates;
use dossier_social::records::RomanticStatus;

const GROUP_ID: &str = "386183191718";

fn group_feed_page() -> &'static str {
    r#"<html><body><div id="m_group_stories_container"><section>
        <article data-ft='{"mf_story_key":"101"}'>
            <div>
                <header><h3><a>Ana Costa</a></h3><abbr>3 de agosto às 14:02</abbr></header>
                <div class="story_body_container">
                    <p>Primeiro mutirão confirmado</p>
                    <a href="https://example.net/mutirao">detalhes</a>
                </div>
            </div>
            <div>
                <div data-sigil="comment-body">Confirmado!</div>
                <div data-sigil="comment-body">Levo as ferramentas</div>
            </div>
        </article>
        <article data-ft='{"mf_story_key":"102"}'>
            <div>
                <header><h3><a>Bruno Lima</a></h3><abbr>4 de agosto às 09:15</abbr></header>
                <div class="story_body_container">
                    <p>Fotos do sábado</p>
                    <img src="https://cdn.example.net/sabado.jpg">
                </div>
            </div>
            <div>
                <div data-sigil="comment-body">Ficaram ótimas</div>
            </div>
        </article>
    </section></div></body></html>"#
}

fn members_page() -> &'static str {
    // The same member appears in two overlapping roster sections; the
    // pipeline must visit her only once.
    r#"<html><body>
        <div id="groupsMemberSection">
            <div class="item"><a href="/maria.silva?fref=gm">Maria Silva</a></div>
        </div>
        <div id="groupsMemberSection_extended">
            <div class="item"><a href="/maria.silva">Maria Silva</a></div>
        </div>
    </body></html>"#
}

#[tokio::test]
async fn group_run_extracts_posts_and_members() {
    let driver = FakeDriver::new()
        .with_page(&format!("groups/{GROUP_ID}"), group_feed_page())
        .with_page(&format!("groups/{GROUP_ID}/members"), members_page());
    let driver = with_profile_pages(driver, "maria.silva", "Maria Silva", "12 de janeiro de 1990");

    let run = RunOptions {
        group_id: Some(GROUP_ID.into()),
        members: true,
        ..Default::default()
    };
    let mut session = session(driver, run);

    let record = session.group(GROUP_ID).await.expect("group run");
    assert_eq!(record.id, GROUP_ID);

    // Two stories, despite both feed selector sets matching each of them.
    assert_eq!(record.posts.len(), 2);
    let first = &record.posts[0];
    assert_eq!(first.id, "101");
    assert_eq!(first.author.as_deref(), Some("Ana Costa"));
    assert_eq!(first.text.as_deref(), Some("Primeiro mutirão confirmado"));
    assert_eq!(first.link.as_deref(), Some("https://example.net/mutirao"));
    assert_eq!(
        first.comments,
        vec![
            Some("Confirmado!".to_string()),
            Some("Levo as ferramentas".to_string())
        ]
    );
    let second = &record.posts[1];
    assert_eq!(second.id, "102");
    assert_eq!(
        second.media_url.as_deref(),
        Some("https://cdn.example.net/sabado.jpg")
    );
    assert_eq!(second.comments.len(), 1);

    // One member, despite two overlapping roster links.
    let members = record.members.expect("members collected");
    assert_eq!(members.len(), 1);
    let maria = &members[0];
    assert_eq!(maria.id, "maria.silva");
    assert_eq!(maria.name.as_deref(), Some("Maria Silva"));
    assert_eq!(
        maria.age,
        dates::derive_age(
            "12 de janeiro de 1990",
            chrono::Local::now().date_naive()
        )
    );
    assert_eq!(
        maria.relationship.romantic,
        RomanticStatus::Partnered {
            person_name: "João Pereira ".into(),
            status: "Casado(a)".into(),
        }
    );
    assert_eq!(maria.relationship.family.len(), 1);
    assert_eq!(maria.relationship.family[0].relation.as_deref(), Some("Mãe"));
    assert_eq!(maria.living[0].label, "Cidade atual");
    assert_eq!(maria.education.work, vec!["Padaria Pão Quente"]);
    assert_eq!(maria.education.skills, vec!["Confeitaria"]);
    assert_eq!(maria.education.education, vec!["Colégio Estadual"]);
    // Posts were not requested for this run.
    assert!(maria.posts.is_none());

    // The feed is settled before the snapshot: scroll, then comment
    // expansion, then the member fan-out in navigation order.
    let driver = session.into_driver();
    let gotos: Vec<&String> = driver
        .actions
        .iter()
        .filter(|a| a.starts_with("goto"))
        .collect();
    assert!(gotos[0].contains("/groups/386183191718"));
    assert!(gotos[1].contains("/members/"));
    assert!(gotos[2].contains("about?section=relationship"));
    assert!(gotos[3].contains("about?section=contact-info"));
    assert!(gotos[4].contains("about?section=living"));
    assert!(gotos[5].contains("about?section=education"));
    assert_eq!(gotos.len(), 6);
}

#[tokio::test]
async fn empty_feed_degrades_to_no_posts() {
    let driver = FakeDriver::new().with_page(
        &format!("groups/{GROUP_ID}"),
        "<html><body><div id='m_group_stories_container'></div></body></html>",
    );
    let run = RunOptions {
        group_id: Some(GROUP_ID.into()),
        ..Default::default()
    };
    let mut session = session(driver, run);

    let record = session.group(GROUP_ID).await.expect("run still succeeds");
    assert!(record.posts.is_empty());
    assert!(record.members.is_none());
}
