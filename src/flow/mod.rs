mod steps;

use crate::config::{BrowserConfig, FlowConfig};
use crate::locator::Locator;
use crate::Result;
use eoka::{Browser, Page, StealthConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Number of steps in the journey.
pub const STEP_COUNT: usize = 5;

/// Outcome of one smoke run.
#[derive(Debug)]
pub struct FlowReport {
    /// Whether the run succeeded.
    pub success: bool,
    /// Error message if failed.
    pub error: Option<String>,
    /// Number of steps completed before success or failure.
    pub steps_completed: usize,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
    /// Screenshot path, if the evidence step was reached.
    pub screenshot: Option<PathBuf>,
}

/// Drives the onboarding journey in one owned browser session.
///
/// The browser is the one scoped resource: acquire with [`SmokeFlow::launch`],
/// release with [`SmokeFlow::close`] on every exit path. [`run_once`] wraps
/// all three for callers that want the guarantee handled for them.
pub struct SmokeFlow {
    browser: Browser,
    page: Page,
}

impl SmokeFlow {
    /// Launch a browser and open the single page the flow uses.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let stealth = StealthConfig {
            headless: config.headless,
            user_agent: config.user_agent.clone(),
            viewport_width: config.viewport.as_ref().map(|v| v.width).unwrap_or(1280),
            viewport_height: config.viewport.as_ref().map(|v| v.height).unwrap_or(720),
            ..Default::default()
        };

        debug!("launching browser (headless: {})", config.headless);
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;

        Ok(Self { browser, page })
    }

    /// Get a reference to the page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Run the journey once. A step failure ends up in the report, never as
    /// an `Err`, so the caller always reaches `close()`.
    pub async fn run(&mut self, config: &FlowConfig) -> FlowReport {
        let start = Instant::now();
        let mut steps_completed = 0;
        let mut screenshot = None;

        let error = match self
            .drive(config, &mut steps_completed, &mut screenshot)
            .await
        {
            Ok(()) => None,
            Err(e) => {
                warn!("run failed after {} steps: {}", steps_completed, e);
                Some(e.to_string())
            }
        };

        FlowReport {
            success: error.is_none(),
            error,
            steps_completed,
            duration_ms: start.elapsed().as_millis() as u64,
            screenshot,
        }
    }

    async fn drive(
        &self,
        config: &FlowConfig,
        steps_completed: &mut usize,
        screenshot: &mut Option<PathBuf>,
    ) -> Result<()> {
        let button = Locator::role("button", &config.journey.button_label);
        let prompt = Locator::text(&config.journey.confirmation_text);

        info!("navigate: {}", config.target.url);
        steps::navigate(&self.page, &config.target.url).await?;
        *steps_completed += 1;

        info!("wait for actionable: {}", button);
        steps::wait_for_actionable(&self.page, &button, config.timeouts.actionable()).await?;
        *steps_completed += 1;

        info!("click: {}", button);
        steps::click(&self.page, &button).await?;
        *steps_completed += 1;

        info!("assert visible: {}", prompt);
        steps::assert_visible(&self.page, &prompt, config.timeouts.visible()).await?;
        *steps_completed += 1;

        info!("screenshot: {}", config.evidence.screenshot.display());
        let bytes = steps::capture_screenshot(&self.page, &config.evidence.screenshot).await?;
        info!("screenshot saved ({} bytes)", bytes);
        *screenshot = Some(config.evidence.screenshot.clone());
        *steps_completed += 1;

        Ok(())
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

/// Launch a browser, run the journey, and close the browser on every exit
/// path. A teardown failure after a finished run is logged, not propagated.
pub async fn run_once(config: &FlowConfig) -> Result<FlowReport> {
    let mut flow = SmokeFlow::launch(&config.browser).await?;
    let report = flow.run(config).await;
    if let Err(e) = flow.close().await {
        warn!("browser close failed: {}", e);
    }
    Ok(report)
}
