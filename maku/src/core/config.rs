use std::path::PathBuf;

use super::ResizePolicy;

pub const DEFAULT_WATCH_PREFIX: &str = "/watch";

/// Application configuration settings.
/// Filled from command-line flags; everything has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage file; `None` resolves through `MAKU_STORAGE` or the data dir
    pub storage_path: Option<PathBuf>,
    /// Pages whose path starts with this prefix get an overlay
    pub watch_prefix: String,
    pub resize_policy: ResizePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            watch_prefix: DEFAULT_WATCH_PREFIX.to_string(),
            resize_policy: ResizePolicy::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_watch_path(&self, path: &str) -> bool {
        path.starts_with(&self.watch_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.watch_prefix, "/watch");
        assert_eq!(config.resize_policy, ResizePolicy::Anchored);
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn test_is_watch_path() {
        let config = Config::new();
        assert!(config.is_watch_path("/watch"));
        assert!(config.is_watch_path("/watch/extra"));
        assert!(!config.is_watch_path("/"));
        assert!(!config.is_watch_path("/results"));
        assert!(!config.is_watch_path("/shorts/abc"));
    }
}
