use anyhow::Result;
use dossier_common::observability::{LogConfig, init_logging};
use dossier_config::{DossierConfig, DossierConfigLoader};
use dossier_drivers::browser::{BrowserSession, LaunchOptions};
use dossier_social::records::Aggregate;
use dossier_social::{NavigationPolicy, Session, SessionOptions};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use url::Url;
use uuid::Uuid;

mod sink;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config first (env wins), then logging.
    let cfg: DossierConfig = DossierConfigLoader::new().with_file("dossier.yaml").load()?;

    let log_config = LogConfig {
        emit_stderr: true,
        ..LogConfig::default()
    };
    init_logging(log_config)?;

    if let Err(err) = run(cfg).await {
        error!(target: "app", %err, "run aborted");
        return Err(err);
    }
    Ok(())
}

async fn run(cfg: DossierConfig) -> Result<()> {
    cfg.run.validate()?;
    let run_id = Uuid::new_v4();
    info!(target: "app", %run_id, "starting extraction run");

    // Ctrl-C cancels the run at the next suspension point.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!(target: "app", "interrupt received; cancelling run");
                cancel.cancel();
            }
        });
    }

    let base = Url::parse(&cfg.site.base_url)?;
    let launch = LaunchOptions {
        headless: cfg.browser.headless,
        ..Default::default()
    };
    let driver = BrowserSession::connect(&cfg.browser.webdriver_url, &launch).await?;

    let mut session = Session::new(
        driver,
        SessionOptions {
            base,
            catalog: cfg.selectors,
            vocabulary: cfg.vocabulary,
            run: cfg.run.clone(),
            navigation: NavigationPolicy {
                page_load: Duration::from_secs(cfg.browser.page_load_timeout_secs),
                settle: Duration::from_millis(cfg.browser.settle_ms),
            },
            screenshot_dir: cfg.output.screenshot_dir.clone().into(),
            cancel,
        },
    );

    session.login(&cfg.credentials).await?;

    let aggregate = if let Some(group_id) = cfg.run.group_id.as_deref() {
        Aggregate::Group(session.group(group_id).await?)
    } else {
        Aggregate::Profile(Box::new(session.profile(None).await?))
    };

    sink::write_aggregate(&cfg.output.data_path, &aggregate).await?;
    info!(target: "app", %run_id, path = %cfg.output.data_path, "saved aggregate");

    let driver = session.into_driver();
    if let Err(err) = driver.close().await {
        error!(target: "app", %err, "failed to close the browser session");
    }
    Ok(())
}
