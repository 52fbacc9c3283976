//! Well-known file locations

use std::path::PathBuf;

/// Per-user configuration file
pub fn user_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "board-report", "board-report")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".board-report")
                .join("config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_config_path_is_toml() {
        let path = user_config_path();
        assert_eq!(path.file_name().unwrap(), "config.toml");
    }
}
