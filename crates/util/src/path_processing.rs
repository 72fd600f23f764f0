use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Name of the per-user directory holding hookdash files.
pub const APP_DIR_NAME: &str = "hookdash";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolves a file path from an environment override, falling back to
/// `<config_dir>/hookdash/<file_name>`.
pub fn app_file_path(env_var: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = std::env::var(env_var) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
        assert_eq!(expand_tilde("~/sites.json"), home.join("sites.json"));
        assert_eq!(expand_tilde("  /etc/hookdash.json "), PathBuf::from("/etc/hookdash.json"));
    }

    #[test]
    fn app_file_path_prefers_environment() {
        temp_env::with_var("HOOKDASH_TEST_PATH", Some("/tmp/custom.json"), || {
            assert_eq!(app_file_path("HOOKDASH_TEST_PATH", "x.json"), PathBuf::from("/tmp/custom.json"));
        });
        temp_env::with_var("HOOKDASH_TEST_PATH", Some("   "), || {
            let path = app_file_path("HOOKDASH_TEST_PATH", "x.json");
            assert!(path.ends_with("hookdash/x.json"));
        });
    }
}
