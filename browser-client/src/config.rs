use crate::services::relay::DEFAULT_RELAY_URL;
use std::path::PathBuf;

pub const DEFAULT_HISTORY_PATH: &str = "recent_searches.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub relay_url: String,
    pub history_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ClientConfig {
            relay_url: lookup("RELAY_URL").unwrap_or_else(|| DEFAULT_RELAY_URL.to_string()),
            history_path: lookup("HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH)),
        }
    }

    /// `--relay <url>` and `--history <path>` override the environment.
    pub fn with_args(mut self, args: &[String]) -> Result<Self, String> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--relay" => {
                    self.relay_url = args.get(i + 1).ok_or("--relay needs a URL")?.clone();
                    i += 2;
                }
                "--history" => {
                    let path = args.get(i + 1).ok_or("--history needs a path")?;
                    self.history_path = PathBuf::from(path);
                    i += 2;
                }
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_point_at_local_relay() {
        let config = ClientConfig::from_lookup(|_| None);

        assert_eq!(config.relay_url, "http://localhost:8080");
        assert_eq!(config.history_path, PathBuf::from("recent_searches.json"));
    }

    #[test]
    fn environment_then_args_override() {
        let config = ClientConfig::from_lookup(|key| match key {
            "RELAY_URL" => Some("http://env:1".to_string()),
            _ => None,
        })
        .with_args(&args(&["--history", "/tmp/h.json"]))
        .unwrap();

        assert_eq!(config.relay_url, "http://env:1");
        assert_eq!(config.history_path, PathBuf::from("/tmp/h.json"));

        let config = config.with_args(&args(&["--relay", "http://arg:2"])).unwrap();
        assert_eq!(config.relay_url, "http://arg:2");
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let config = ClientConfig::from_lookup(|_| None);

        assert!(config.clone().with_args(&args(&["--relay"])).is_err());
        assert!(config.with_args(&args(&["--verbose"])).is_err());
    }
}
