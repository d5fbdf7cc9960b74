//! Light/dark theme state
//!
//! An explicitly passed context value rather than a process-wide global:
//! whoever holds a clone can read or toggle, and interested parties observe
//! changes through a broadcast channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// CSS class hook for the page shell
    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Shared theme context with an update channel
#[derive(Debug, Clone)]
pub struct ThemeContext {
    dark: Arc<AtomicBool>,
    tx: broadcast::Sender<Theme>,
}

impl ThemeContext {
    pub fn new(initial: Theme) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            dark: Arc::new(AtomicBool::new(initial == Theme::Dark)),
            tx,
        }
    }

    pub fn current(&self) -> Theme {
        if self.dark.load(Ordering::Acquire) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Flip the theme and publish the new value to subscribers
    pub fn toggle(&self) -> Theme {
        let was_dark = self.dark.fetch_xor(true, Ordering::AcqRel);
        let next = if was_dark { Theme::Light } else { Theme::Dark };
        // Send only fails when nobody is subscribed, which is fine
        let _ = self.tx.send(next);
        next
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Theme> {
        self.tx.subscribe()
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(Theme::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_and_returns_new_value() {
        let ctx = ThemeContext::new(Theme::Light);
        assert_eq!(ctx.toggle(), Theme::Dark);
        assert_eq!(ctx.current(), Theme::Dark);
        assert_eq!(ctx.toggle(), Theme::Light);
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let ctx = ThemeContext::new(Theme::Light);
        let mut rx = ctx.subscribe();
        ctx.toggle();
        assert_eq!(rx.try_recv().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_clones_share_state() {
        let ctx = ThemeContext::new(Theme::Light);
        let other = ctx.clone();
        ctx.toggle();
        assert_eq!(other.current(), Theme::Dark);
    }
}
