use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{BlockPattern, SetBlockedUrLsParams};
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::app::{Result, SnagError};
use crate::fetcher::{FetchResult, Fetcher};
use crate::scraper::config::ScraperConfig;

/// Rendered-page fetcher: one isolated browser per call.
///
/// The number of live browsers is bounded by `max_concurrency`.
pub struct ChromeFetcher {
    config: ScraperConfig,
    user_agent: String,
    semaphore: Arc<Semaphore>,
}

impl ChromeFetcher {
    /// `default_user_agent` is used unless the config overrides it.
    pub fn new(config: ScraperConfig, default_user_agent: &str) -> Self {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| default_user_agent.to_string());
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));

        Self {
            config,
            user_agent,
            semaphore,
        }
    }

    /// Browser settings for one call, with its own profile directory.
    fn browser_config(&self, profile: &Path) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .arg("--disable-extensions")
            .arg("--no-first-run")
            .user_data_dir(profile)
            .launch_timeout(self.config.launch_timeout());

        if !self.config.headless {
            builder = builder.with_head();
        }

        if let Some(ref path) = self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder
            .build()
            .map_err(|e| SnagError::Browser(format!("Failed to build browser config: {}", e)))
    }
}

#[async_trait]
impl Fetcher for ChromeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| SnagError::Browser(format!("Semaphore error: {}", e)))?;

        let deadline = Instant::now() + self.config.timeout();
        let profile = TempDir::with_prefix("snag-chrome-")
            .map_err(|e| SnagError::Browser(format!("Failed to create browser profile: {}", e)))?;
        let session = BrowserSession::launch(self.browser_config(profile.path())?, profile).await?;

        // Rendering only gets what launch left of the deadline.
        let rendered = tokio::time::timeout_at(
            deadline,
            session.render(
                url,
                &self.user_agent,
                &self.config.blocked_url_patterns(),
                self.config.wait_after_load(),
            ),
        )
        .await;

        session.shutdown().await;

        match rendered {
            Ok(result) => result,
            Err(_) => Err(SnagError::Timeout {
                url: url.to_string(),
                secs: self.config.timeout().as_secs(),
            }),
        }
    }
}

/// A launched browser plus the task pumping its CDP events.
///
/// Every path out of [`ChromeFetcher::fetch`] after a successful launch goes
/// through [`BrowserSession::shutdown`]; if the future itself is dropped,
/// `Browser`'s own drop kills the child process. The profile directory is
/// removed once the session is gone.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    profile: TempDir,
}

impl BrowserSession {
    async fn launch(config: BrowserConfig, profile: TempDir) -> Result<Self> {
        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            SnagError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Drive the CDP connection
            }
        });

        Ok(Self {
            browser,
            handler,
            profile,
        })
    }

    async fn render(
        &self,
        url: &str,
        user_agent: &str,
        blocked: &[String],
        wait_after_load: Duration,
    ) -> Result<FetchResult> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| SnagError::Browser(format!("Failed to create page: {}", e)))?;

        page.set_user_agent(user_agent)
            .await
            .map_err(|e| SnagError::Browser(format!("Failed to set user agent: {}", e)))?;

        if !blocked.is_empty() {
            block_resources(&page, blocked).await;
        }

        page.goto(url)
            .await
            .map_err(|e| SnagError::Browser(format!("Navigation failed: {}", e)))?;

        if !wait_after_load.is_zero() {
            tokio::time::sleep(wait_after_load).await;
        }

        let html = page
            .content()
            .await
            .map_err(|e| SnagError::Browser(format!("Failed to read page content: {}", e)))?;

        let final_url = match page.url().await {
            Ok(Some(current)) if current != "about:blank" => current,
            _ => url.to_string(),
        };

        debug!("Rendered {} bytes from {}", html.len(), final_url);
        Ok(FetchResult {
            html,
            url: final_url,
        })
    }

    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed, killing process: {}", e);
            if let Some(Err(e)) = self.browser.kill().await {
                warn!("Failed to kill browser process: {}", e);
            }
        }

        if let Err(e) = self.browser.wait().await {
            warn!("Failed to reap browser process: {}", e);
        }

        self.handler.abort();
        debug!("Browser profile {} released", self.profile.path().display());
    }
}

/// Ask the page to skip the given URL patterns; blocking is best effort.
async fn block_resources(page: &Page, patterns: &[String]) {
    let params = SetBlockedUrLsParams::builder()
        .url_patterns(
            patterns
                .iter()
                .map(|pattern| BlockPattern::new(pattern.clone(), true))
                .collect::<Vec<_>>(),
        )
        .build();

    if let Err(e) = page.execute(params).await {
        warn!("Resource blocking unavailable, loading everything: {}", e);
    }
}
