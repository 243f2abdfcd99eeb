use serde_json::json;
use std::collections::HashMap;
use webdriver::capabilities::Capabilities;

/// Browser launch settings for a session.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Override the reported user agent; `None` keeps the browser default.
    pub user_agent: Option<String>,
    pub window: (u32, u32),
    /// Accept-Language reported by the browser; the extraction vocabulary
    /// assumes the page renders in this locale.
    pub lang: String,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: None,
            window: (1366, 768),
            lang: "pt-BR,pt".into(),
        }
    }
}

/// Construct Chrome command-line arguments for the given options.
pub fn chrome_arguments(opts: &LaunchOptions) -> Vec<String> {
    let mut args = vec![
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
        format!("--window-size={},{}", opts.window.0, opts.window.1),
        format!("--lang={}", opts.lang),
    ];
    if let Some(ua) = &opts.user_agent {
        args.push(format!("--user-agent={ua}"));
    }
    if opts.headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

/// WebDriver capabilities for a Chrome session with the given options.
pub fn chrome_capabilities(opts: &LaunchOptions) -> Capabilities {
    let mut caps = Capabilities::new();
    let mut chrome_opts = HashMap::new();
    chrome_opts.insert("args".to_string(), json!(chrome_arguments(opts)));
    caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));
    caps
}
