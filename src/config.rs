use crate::seed::Seed;
use std::path::PathBuf;

pub const LOG_ENV: &str = "CAMPUSD_LOG";
pub const SEED_ENV: &str = "CAMPUSD_SEED";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_vars(
            std::env::var(LOG_ENV).ok(),
            std::env::var_os(SEED_ENV).map(PathBuf::from),
        )
    }

    fn from_vars(log_filter: Option<String>, seed_path: Option<PathBuf>) -> Config {
        Config {
            log_filter: log_filter
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            seed_path: seed_path.filter(|p| !p.as_os_str().is_empty()),
        }
    }

    pub fn load_seed(&self) -> anyhow::Result<Seed> {
        match &self.seed_path {
            Some(path) => Seed::from_path(path),
            None => Ok(Seed::demo()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_warn_and_demo_seed() {
        let cfg = Config::from_vars(None, None);
        assert_eq!(cfg.log_filter, "warn");
        assert_eq!(cfg.seed_path, None);
        let seed = cfg.load_seed().expect("demo seed");
        assert_eq!(seed.users.len(), 5);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = Config::from_vars(Some("  ".into()), Some(PathBuf::new()));
        assert_eq!(cfg.log_filter, "warn");
        assert_eq!(cfg.seed_path, None);

        let cfg = Config::from_vars(Some("campusd=debug".into()), None);
        assert_eq!(cfg.log_filter, "campusd=debug");
    }
}
