//! Environment configuration.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// `NO_COLOR` set to anything non-empty disables styling.
    pub no_color: bool,
    /// `SD_THROTTLE_MS` overrides the repaint throttle.
    pub throttle: Option<Duration>,
    /// `SD_DEBUG=1` enables verbose stderr diagnostics.
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            no_color: env_present("NO_COLOR"),
            throttle: env_millis("SD_THROTTLE_MS"),
            debug: env_flag("SD_DEBUG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_present(key: &str) -> bool {
    env::var(key)
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false)
}

fn env_millis(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn defaults_are_off() {
        let _lock = env_lock();
        let _g1 = set_env_guard("NO_COLOR", None);
        let _g2 = set_env_guard("SD_THROTTLE_MS", None);
        let _g3 = set_env_guard("SD_DEBUG", None);

        let config = EnvConfig::from_env();
        assert!(!config.no_color);
        assert!(config.throttle.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn variables_are_parsed() {
        let _lock = env_lock();
        let _g1 = set_env_guard("NO_COLOR", Some("1"));
        let _g2 = set_env_guard("SD_THROTTLE_MS", Some("120"));
        let _g3 = set_env_guard("SD_DEBUG", Some("1"));

        let config = EnvConfig::from_env();
        assert!(config.no_color);
        assert_eq!(config.throttle, Some(Duration::from_millis(120)));
        assert!(config.debug);
    }

    #[test]
    fn garbage_throttle_values_are_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SD_THROTTLE_MS", Some("soon"));
        assert!(EnvConfig::from_env().throttle.is_none());
    }
}
