//! The individual journey steps, each operating on the live page.

use crate::locator::{BBox, Locator};
use crate::{Error, Result};
use eoka::Page;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// Poll interval for wait/assert loops.
const POLL_MS: u64 = 100;

/// Load the target page.
pub async fn navigate(page: &Page, url: &str) -> Result<()> {
    page.goto(url)
        .await
        .map_err(|e| Error::Navigation(format!("{}: {}", url, e)))
}

/// Wait until the element is attached, visible, stable, and enabled.
///
/// Stable means the bounding box did not move between two consecutive polls,
/// so a mid-animation element is not clicked.
pub async fn wait_for_actionable(page: &Page, locator: &Locator, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    let mut last_box: Option<BBox> = None;

    loop {
        let obs = locator.observe(page).await?;
        if obs.actionable() {
            if last_box.as_ref() == Some(&obs.bbox) {
                return Ok(());
            }
            debug!("{}: actionable, confirming stable position", locator);
            last_box = Some(obs.bbox.clone());
        } else {
            debug!("{}: {}", locator, obs.describe());
            last_box = None;
        }

        if Instant::now() >= deadline {
            let state = if obs.actionable() {
                "visible but not yet stable"
            } else {
                obs.describe()
            };
            return Err(Error::ElementNotReady(format!(
                "{} {} after {}ms",
                locator,
                state,
                timeout.as_millis()
            )));
        }
        page.wait(POLL_MS).await;
    }
}

/// Dispatch a real pointer click.
///
/// Re-resolves the locator first; the page may have re-rendered since the
/// actionability wait, and a stale selector would hit the wrong node.
pub async fn click(page: &Page, locator: &Locator) -> Result<()> {
    let obs = locator.observe(page).await?;
    if !obs.actionable() {
        return Err(Error::ElementNotReady(format!(
            "{} {} at click time",
            locator,
            obs.describe()
        )));
    }
    page.click(&obs.selector)
        .await
        .map_err(|e| Error::ElementNotReady(format!("click on {} failed: {}", locator, e)))
}

/// Poll until the element is visible. The failure message carries the last
/// observed state so a hidden-but-present element reads differently from an
/// absent one.
pub async fn assert_visible(page: &Page, locator: &Locator, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;

    loop {
        let obs = locator.observe(page).await?;
        if obs.found && obs.visible {
            return Ok(());
        }
        debug!("{}: {}", locator, obs.describe());

        if Instant::now() >= deadline {
            return Err(Error::Assertion(format!(
                "{} {} after {}ms",
                locator,
                obs.describe(),
                timeout.as_millis()
            )));
        }
        page.wait(POLL_MS).await;
    }
}

/// Create the output directory if needed and write a full-page capture.
/// Returns the number of bytes written.
pub async fn capture_screenshot(page: &Page, path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let png = page.screenshot().await?;
    std::fs::write(path, &png)?;
    Ok(png.len() as u64)
}
