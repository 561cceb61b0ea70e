use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

pub const DEFAULT_SHARE_BASE: &str = "https://games.ai-studio.com/play";

/// Deployment targets, in the order they are offered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Web,
    Wechat,
    Telegram,
    Facebook,
}

impl Platform {
    pub fn title(self) -> &'static str {
        match self {
            Platform::Web => "Web (HTML5)",
            Platform::Wechat => "WeChat Mini Game",
            Platform::Telegram => "Telegram Web App",
            Platform::Facebook => "Facebook Messenger",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Platform::Web => "Standard web deployment for any website",
            Platform::Wechat => "Optimized for WeChat platform",
            Platform::Telegram => "Deploy as Telegram bot game",
            Platform::Facebook => "Messenger platform integration",
        }
    }

    pub fn all() -> Vec<Platform> {
        Platform::iter().collect()
    }
}

/// What the "complete" screen shows after a (simulated) export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub share_link: String,
    pub platforms: Vec<Platform>,
    pub asset_count: usize,
    pub file_size: String,
    pub load_time: String,
}

impl ExportReceipt {
    pub fn new(share_base: &str, project_id: &str, platforms: &BTreeSet<Platform>, asset_count: usize) -> Self {
        Self {
            share_link: share_link(share_base, project_id),
            platforms: platforms.iter().copied().collect(),
            asset_count,
            file_size: "2.4 MB".into(),
            load_time: "~1.2 seconds".into(),
        }
    }
}

pub fn share_link(base: &str, project_id: &str) -> String {
    format!("{}/{project_id}", base.trim_end_matches('/'))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub platforms: BTreeSet<Platform>,
    pub analytics: bool,
    pub leaderboard: bool,
    pub receipt: Option<ExportReceipt>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            platforms: BTreeSet::from([Platform::Web]),
            analytics: true,
            leaderboard: true,
            receipt: None,
        }
    }
}

impl ExportSettings {
    /// Flips membership of `platform`; applying it twice is the identity.
    pub fn toggle(&mut self, platform: Platform) {
        if !self.platforms.remove(&platform) {
            self.platforms.insert(platform);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.receipt.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_web_only() {
        let s = ExportSettings::default();
        assert_eq!(s.platforms.iter().copied().collect::<Vec<_>>(), [Platform::Web]);
        assert!(!s.is_complete());
    }

    #[test]
    fn toggle_twice_is_identity() {
        for p in Platform::iter() {
            let mut s = ExportSettings::default();
            let before = s.platforms.clone();
            s.toggle(p);
            assert_ne!(s.platforms, before);
            s.toggle(p);
            assert_eq!(s.platforms, before);
        }
    }

    #[test]
    fn receipt_links_to_project() {
        let platforms = BTreeSet::from([Platform::Telegram, Platform::Web]);
        let r = ExportReceipt::new(DEFAULT_SHARE_BASE, "42", &platforms, 5);
        assert_eq!(r.share_link, "https://games.ai-studio.com/play/42");
        assert_eq!(r.platforms, [Platform::Web, Platform::Telegram]);
        assert_eq!(r.asset_count, 5);
    }
}
