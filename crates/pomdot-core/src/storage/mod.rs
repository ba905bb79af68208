mod config;

pub use config::{ConfigRecord, ConfigStore, ConfigValues, CONFIG_FILENAME};

use std::path::{Path, PathBuf};

/// Returns `~/.config/pomdot/`.
///
/// Falls back to the current directory when the home directory cannot be
/// determined. The directory is not created here; writers create it lazily.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("pomdot")
}

/// Returns `~/.config/pomdot/config.toml`.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILENAME)
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_pomdot_config() {
        assert!(default_config_path().ends_with(".config/pomdot/config.toml"));
    }

    #[test]
    fn expands_leading_tilde_only() {
        let plain = Path::new("/etc/pomdot.toml");
        assert_eq!(expand_tilde(plain), plain);

        let odd = Path::new("a/~/b.toml");
        assert_eq!(expand_tilde(odd), odd);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/p.toml")), home.join("p.toml"));
        }
    }
}
