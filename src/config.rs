use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level flow configuration.
///
/// `Default` is the compiled-in reference journey; a YAML file overrides
/// individual sections, and any unmentioned section keeps its default.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FlowConfig {
    /// Target URL to navigate to.
    pub target: TargetUrl,

    /// Browser launch configuration.
    pub browser: BrowserConfig,

    /// The journey to drive and the state to confirm.
    pub journey: Journey,

    /// Evidence output.
    pub evidence: Evidence,

    /// Per-wait timeouts.
    pub timeouts: Timeouts,
}

impl FlowConfig {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse config from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: FlowConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config.
    pub fn validate(&self) -> Result<()> {
        if self.target.url.is_empty() {
            return Err(Error::Config("target.url is required".into()));
        }
        if self.journey.button_label.is_empty() {
            return Err(Error::Config("journey.button_label is required".into()));
        }
        if self.journey.confirmation_text.is_empty() {
            return Err(Error::Config(
                "journey.confirmation_text is required".into(),
            ));
        }
        if self.evidence.screenshot.as_os_str().is_empty() {
            return Err(Error::Config("evidence.screenshot is required".into()));
        }
        if self.timeouts.actionable_ms == 0 || self.timeouts.visible_ms == 0 {
            return Err(Error::Config("timeouts must be at least 1ms".into()));
        }
        Ok(())
    }
}

/// Target URL configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetUrl {
    /// URL to navigate to.
    pub url: String,
}

impl Default for TargetUrl {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".into(),
        }
    }
}

/// Browser launch configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run in headless mode.
    pub headless: bool,

    /// Custom user agent.
    pub user_agent: Option<String>,

    /// Viewport size.
    pub viewport: Option<Viewport>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: None,
            viewport: None,
        }
    }
}

/// Viewport dimensions.
#[derive(Debug, Clone, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// The one user journey this tool verifies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Journey {
    /// Accessible name of the landing-page call-to-action button.
    pub button_label: String,

    /// Text that must become visible after the click.
    pub confirmation_text: String,
}

impl Default for Journey {
    fn default() -> Self {
        Self {
            button_label: "Architect My First Letter".into(),
            confirmation_text: "Sign in to access your applications".into(),
        }
    }
}

/// Evidence output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Evidence {
    /// Screenshot path. The containing directory is created if absent.
    pub screenshot: PathBuf,
}

impl Default for Evidence {
    fn default() -> Self {
        Self {
            screenshot: PathBuf::from("verification/auth_screen.png"),
        }
    }
}

/// Per-wait timeouts. Each wait has its own deadline; there is no global one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// How long to wait for the button to become actionable.
    pub actionable_ms: u64,

    /// How long to wait for the confirmation text to become visible.
    pub visible_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            actionable_ms: 10_000,
            visible_ms: 10_000,
        }
    }
}

impl Timeouts {
    pub fn actionable(&self) -> Duration {
        Duration::from_millis(self.actionable_ms)
    }

    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }
}
