//! Lazy element queries resolved against the live page.
//!
//! A [`Locator`] is a query value, not an element handle. The page can
//! re-render between steps, so every use re-resolves via injected JS and
//! reports the element's state as observed at that instant.

use crate::Result;
use eoka::Page;
use serde::Deserialize;
use std::fmt;

/// A deferred, re-evaluatable element query.
#[derive(Debug, Clone)]
pub enum Locator {
    /// Match by tag/ARIA role and accessible name (exact first, then contains).
    Role { role: String, name: String },
    /// Match the deepest element whose text content contains the value.
    Text(String),
    /// Direct CSS selector.
    Css(String),
}

impl Locator {
    /// Query by role and accessible name, e.g. `role("button", "Sign In")`.
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Locator::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Query by visible text content.
    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text(text.into())
    }

    /// Query by CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    fn as_js_args(&self) -> (&'static str, &str, &str) {
        match self {
            Locator::Role { role, name } => ("role", role, name),
            Locator::Text(v) => ("text", "", v),
            Locator::Css(v) => ("css", "", v),
        }
    }

    /// Resolve against the current page and report the element state.
    ///
    /// Never caches: the returned selector is only good until the next
    /// re-render, which is why callers re-observe before acting.
    pub async fn observe(&self, page: &Page) -> Result<Observation> {
        let (kind, role, value) = self.as_js_args();
        let js = format!(
            "{}({},{},{})",
            PROBE_JS,
            serde_json::to_string(kind).unwrap(),
            serde_json::to_string(role).unwrap(),
            serde_json::to_string(value).unwrap()
        );
        let observation: Observation = page.evaluate(&js).await?;
        Ok(observation)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Role { role, name } => write!(f, "{} \"{}\"", role, name),
            Locator::Text(v) => write!(f, "text \"{}\"", v),
            Locator::Css(v) => write!(f, "selector \"{}\"", v),
        }
    }
}

/// Element state captured by one probe.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    /// Whether a matching element is attached to the document.
    pub found: bool,
    /// Non-zero size and not hidden by style.
    pub visible: bool,
    /// Not disabled (native or aria).
    pub enabled: bool,
    /// CSS path usable for a follow-up click.
    pub selector: String,
    /// Bounding box in viewport coordinates.
    #[serde(default)]
    pub bbox: BBox,
}

/// Bounding box.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Observation {
    /// Attached, visible, and enabled. Stability is the caller's concern
    /// since it needs two consecutive observations.
    pub fn actionable(&self) -> bool {
        self.found && self.visible && self.enabled
    }

    /// Human-readable state for diagnostics.
    pub fn describe(&self) -> &'static str {
        if !self.found {
            "not attached"
        } else if !self.visible {
            "attached but not visible"
        } else if !self.enabled {
            "visible but disabled"
        } else {
            "visible"
        }
    }
}

/// Probe script: resolves a query and returns the element's observed state.
const PROBE_JS: &str = r#"
((kind, role, value) => {
    const lc = s => (s || '').toLowerCase().trim();
    const want = lc(value);

    function cssPath(el) {
        if (el.id) return '#' + CSS.escape(el.id);
        const path = [];
        let n = el;
        while (n && n.nodeType === 1) {
            let s = n.tagName.toLowerCase();
            if (n.id) { path.unshift('#' + CSS.escape(n.id)); break; }
            const p = n.parentElement;
            if (p) {
                const sibs = [...p.children].filter(c => c.tagName === n.tagName);
                if (sibs.length > 1) s += ':nth-of-type(' + (sibs.indexOf(n) + 1) + ')';
            }
            path.unshift(s);
            n = p;
        }
        return path.join(' > ');
    }

    function accName(el) {
        return el.getAttribute('aria-label') || el.innerText?.trim() || el.value || el.title || '';
    }

    let el = null;
    switch (kind) {
        case 'role': {
            const pool = [...document.querySelectorAll(role + ', [role=' + JSON.stringify(role) + ']')];
            el = pool.find(e => lc(accName(e)) === want) || pool.find(e => lc(accName(e)).includes(want));
            break;
        }
        case 'text': {
            const walker = document.createTreeWalker(document.body, NodeFilter.SHOW_ELEMENT, null);
            while (walker.nextNode()) {
                const n = walker.currentNode;
                if (lc(n.textContent).includes(want)) el = n;
            }
            break;
        }
        case 'css':
            el = document.querySelector(value);
            break;
    }

    if (!el) return { found: false, visible: false, enabled: false, selector: '', bbox: { x: 0, y: 0, width: 0, height: 0 } };

    const r = el.getBoundingClientRect();
    const s = getComputedStyle(el);
    const visible = r.width > 0 && r.height > 0 && s.display !== 'none' && s.visibility !== 'hidden' && parseFloat(s.opacity) >= 0.1;
    const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true';
    return { found: true, visible, enabled, selector: cssPath(el), bbox: { x: r.x, y: r.y, width: r.width, height: r.height } };
})
"#;
