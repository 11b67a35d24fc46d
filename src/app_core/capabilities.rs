//! Browser engine profile.
//!
//! Old Internet Explorer and pre-Chromium Edge repaint long lists slowly, so
//! they get a longer filter debounce. Everything else is `Modern`.

use std::time::Duration;

pub const MODERN_DEBOUNCE: Duration = Duration::from_millis(100);
pub const LEGACY_DEBOUNCE: Duration = Duration::from_millis(300);

const LEGACY_MARKERS: &[&str] = &["MSIE", "TRIDENT", "EDGE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineProfile {
    #[default]
    Modern,
    Legacy,
}

impl EngineProfile {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_uppercase();
        if LEGACY_MARKERS.iter().any(|marker| ua.contains(marker)) {
            EngineProfile::Legacy
        } else {
            EngineProfile::Modern
        }
    }

    pub fn debounce_delay(self) -> Duration {
        match self {
            EngineProfile::Modern => MODERN_DEBOUNCE,
            EngineProfile::Legacy => LEGACY_DEBOUNCE,
        }
    }
}
