use std::collections::HashMap;
use std::path::Path;
use anyhow::Result;

pub const ISTIOCTL_URL: &str = "ISTIOCTL_URL";

// Keys the process environment may override.
const ENV_KEYS: &[&str] = &[ISTIOCTL_URL];

pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    pub fn new(file_path: &Path) -> Result<Self> {
        Self::load(file_path, |key| std::env::var(key).ok())
    }

    fn load(file_path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut values = HashMap::new();
        if file_path.exists() {
            for item in dotenvy::from_path_iter(file_path)? {
                let (key, value) = item?;
                values.insert(key, value);
            }
        }

        for key in ENV_KEYS {
            if let Some(value) = env(key) {
                values.insert(key.to_string(), value);
            }
        }

        Ok(Config { values })
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    pub fn istioctl_url(&self) -> Option<&str> {
        self.get(ISTIOCTL_URL)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}
