use std::path::PathBuf;

/// Default config location, `~/.config/ticket-eval/config.toml`.
pub fn default_config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("ticket-eval")
            .join("config.toml")
    })
}
