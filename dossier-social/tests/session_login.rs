mod common;

use common::{BASE, FakeDriver, session, session_with_cancel};
use dossier_common::{Credentials, DossierError, RunOptions};
use tokio_util::sync::CancellationToken;

fn creds() -> Credentials {
    Credentials {
        username: "ana@example.net".into(),
        password: "s3cret".into(),
    }
}

fn any_run() -> RunOptions {
    RunOptions {
        person_id: Some("ana".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn login_fills_the_form_and_captures_the_audit_shot() {
    let driver = FakeDriver::new().with_page("example-social.net", "<html><body></body></html>");
    let mut session = session(driver, any_run());

    session.login(&creds()).await.expect("login");

    let driver = session.into_driver();
    let expected = [
        format!("goto {BASE}"),
        "focus input[name='email']".to_string(),
        "type input[name='email'] ana@example.net".to_string(),
        "focus input[name='pass']".to_string(),
        "type input[name='pass'] s3cret".to_string(),
        "click button[name='login']".to_string(),
        "screenshot ./login.png".to_string(),
    ];
    assert_eq!(driver.actions, expected);
}

#[tokio::test]
async fn login_timeout_is_an_auth_error() {
    let mut session = session(FakeDriver::hanging(), any_run());

    let err = session.login(&creds()).await.expect_err("must time out");
    assert!(matches!(err, DossierError::Auth(_)), "got {err:?}");
}

#[tokio::test]
async fn cancelled_runs_stop_before_navigating() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut session = session_with_cancel(FakeDriver::new(), any_run(), cancel);

    let err = session.group("386183191718").await.expect_err("cancelled");
    assert!(matches!(err, DossierError::Cancelled), "got {err:?}");
}
