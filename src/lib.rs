//! # auth-smoke
//!
//! Headless-browser smoke test for the onboarding flow: click the landing
//! page call-to-action and confirm the sign-in prompt appears, saving a
//! full-page screenshot as evidence.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use auth_smoke::FlowConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> auth_smoke::Result<()> {
//! let config = FlowConfig::default();
//! let report = auth_smoke::run_once(&config).await?;
//! println!("Success: {}", report.success);
//! # Ok(())
//! # }
//! ```

mod config;
mod flow;
mod locator;

pub use config::{BrowserConfig, Evidence, FlowConfig, Journey, TargetUrl, Timeouts, Viewport};
pub use flow::{run_once, FlowReport, SmokeFlow, STEP_COUNT};
pub use locator::{BBox, Locator, Observation};

/// Result type for smoke-test operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a run. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("element not ready: {0}")]
    ElementNotReady(String),

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("browser error: {0}")]
    Browser(#[from] eoka::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = FlowConfig::default();
        assert_eq!(config.target.url, "http://localhost:3000");
        assert_eq!(config.journey.button_label, "Architect My First Letter");
        assert_eq!(
            config.journey.confirmation_text,
            "Sign in to access your applications"
        );
        assert_eq!(
            config.evidence.screenshot,
            PathBuf::from("verification/auth_screen.png")
        );
        assert!(config.browser.headless);
        assert!(config.browser.viewport.is_none());
        assert_eq!(config.timeouts.actionable_ms, 10_000);
        assert_eq!(config.timeouts.visible_ms, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = FlowConfig::parse("{}").unwrap();
        assert_eq!(config.target.url, "http://localhost:3000");
        assert!(config.browser.headless);
    }

    #[test]
    fn test_parse_partial_override() {
        let yaml = r#"
target:
  url: "http://localhost:8080"
"#;
        let config = FlowConfig::parse(yaml).unwrap();
        assert_eq!(config.target.url, "http://localhost:8080");
        // Unmentioned sections keep their defaults
        assert_eq!(config.journey.button_label, "Architect My First Letter");
        assert_eq!(config.timeouts.actionable_ms, 10_000);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
target:
  url: "http://localhost:4000"
browser:
  headless: false
  user_agent: "Custom UA"
  viewport:
    width: 1920
    height: 1080
journey:
  button_label: "Get Started"
  confirmation_text: "Sign in to continue"
evidence:
  screenshot: "out/proof.png"
timeouts:
  actionable_ms: 5000
  visible_ms: 3000
"#;
        let config = FlowConfig::parse(yaml).unwrap();
        assert_eq!(config.target.url, "http://localhost:4000");
        assert!(!config.browser.headless);
        assert_eq!(config.browser.user_agent, Some("Custom UA".into()));
        let viewport = config.browser.viewport.unwrap();
        assert_eq!(viewport.width, 1920);
        assert_eq!(viewport.height, 1080);
        assert_eq!(config.journey.button_label, "Get Started");
        assert_eq!(config.journey.confirmation_text, "Sign in to continue");
        assert_eq!(config.evidence.screenshot, PathBuf::from("out/proof.png"));
        assert_eq!(config.timeouts.actionable_ms, 5000);
        assert_eq!(config.timeouts.visible_ms, 3000);
    }

    #[test]
    fn test_validation_empty_url() {
        let yaml = r#"
target:
  url: ""
"#;
        let result = FlowConfig::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("target.url"));
    }

    #[test]
    fn test_validation_empty_button_label() {
        let yaml = r#"
journey:
  button_label: ""
"#;
        let result = FlowConfig::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("button_label"));
    }

    #[test]
    fn test_validation_empty_confirmation_text() {
        let yaml = r#"
journey:
  confirmation_text: ""
"#;
        assert!(FlowConfig::parse(yaml).is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let yaml = r#"
timeouts:
  actionable_ms: 0
"#;
        let result = FlowConfig::parse(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeouts"));
    }

    #[test]
    fn test_validation_empty_screenshot_path() {
        let yaml = r#"
evidence:
  screenshot: ""
"#;
        assert!(FlowConfig::parse(yaml).is_err());
    }

    #[test]
    fn test_timeout_durations() {
        let timeouts = Timeouts {
            actionable_ms: 1500,
            visible_ms: 250,
        };
        assert_eq!(timeouts.actionable().as_millis(), 1500);
        assert_eq!(timeouts.visible().as_millis(), 250);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = FlowConfig::parse("target: [not, a, map]");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }
}
