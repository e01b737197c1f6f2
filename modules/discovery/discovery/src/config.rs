use std::time::Duration;

use discovery_sdk::ViewMode;
use serde::{Deserialize, Serialize};

/// Configuration for the discovery module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Remote page size while in spotlight mode.
    pub spotlight_page_size: usize,
    /// Remote page size for grid and map modes.
    pub grid_page_size: usize,
    /// Cards per client-side grid page.
    pub grid_items_per_page: usize,
    /// Spotlight look-ahead: fetch more once the index is this close to the end.
    pub lookahead_threshold: usize,
    /// Sessions untouched for this many seconds are dropped.
    pub session_idle_ttl_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            spotlight_page_size: ViewMode::SPOTLIGHT_PAGE_SIZE,
            grid_page_size: ViewMode::GRID_PAGE_SIZE,
            grid_items_per_page: ViewMode::GRID_ITEMS_PER_PAGE,
            lookahead_threshold: 5,
            session_idle_ttl_secs: 30 * 60,
        }
    }
}

impl DiscoveryConfig {
    #[must_use]
    pub fn limit_for(&self, mode: ViewMode) -> usize {
        let size = match mode {
            ViewMode::Spotlight => self.spotlight_page_size,
            ViewMode::Grid | ViewMode::Map => self.grid_page_size,
        };
        size.max(1)
    }

    #[must_use]
    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_view_mode_sizes() {
        let cfg = DiscoveryConfig::default();
        assert_eq!(cfg.limit_for(ViewMode::Spotlight), 20);
        assert_eq!(cfg.limit_for(ViewMode::Grid), 27);
        assert_eq!(cfg.grid_items_per_page, 9);
        assert_eq!(cfg.session_idle_ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: DiscoveryConfig =
            serde_json::from_value(serde_json::json!({ "grid_page_size": 18 })).unwrap();
        assert_eq!(cfg.grid_page_size, 18);
        assert_eq!(cfg.spotlight_page_size, 20);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<DiscoveryConfig, _> =
            serde_json::from_value(serde_json::json!({ "page": 1 }));
        assert!(res.is_err());
    }
}
