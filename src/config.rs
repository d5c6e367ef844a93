use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// UI theme. Persisted as `"light"` / `"dark"`.
#[derive(
    clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub theme: Option<ThemeMode>,
    pub data_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            theme: other.theme.or(self.theme),
            data_dir: other.data_dir.clone().or_else(|| self.data_dir.clone()),
            export_dir: other.export_dir.clone().or_else(|| self.export_dir.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    platform_dir(PlatformDir::Config).map_or_else(local_override_path, |dir| dir.join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mdpadrc")
}

/// Directory holding the persisted buffer and theme.
pub fn default_data_dir() -> PathBuf {
    platform_dir(PlatformDir::Data).unwrap_or_else(|| PathBuf::from(".mdpad"))
}

#[derive(Clone, Copy)]
enum PlatformDir {
    Config,
    Data,
}

fn platform_dir(kind: PlatformDir) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let _ = kind;
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("mdpad"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        let _ = kind;
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("mdpad"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let (xdg_var, fallback) = match kind {
            PlatformDir::Config => ("XDG_CONFIG_HOME", [".config", ""]),
            PlatformDir::Data => ("XDG_DATA_HOME", [".local", "share"]),
        };
        if let Some(xdg) = std::env::var_os(xdg_var) {
            return Some(PathBuf::from(xdg).join("mdpad"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            let mut path = PathBuf::from(home);
            for part in fallback.iter().filter(|p| !p.is_empty()) {
                path.push(part);
            }
            return Some(path.join("mdpad"));
        }
    }

    None
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# mdpad defaults (saved with --save)".to_string()];
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(dir) = &flags.data_dir {
        lines.push(format!("--data-dir {}", dir.display()));
    }
    if let Some(dir) = &flags.export_dir {
        lines.push(format!("--export-dir {}", dir.display()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list. Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(
            name,
            "--theme" | "--data-dir" | "--export-dir" | "--log-file"
        );
        if takes_value {
            let value = match inline {
                Some(value) => Some(value),
                None => {
                    i += 1;
                    tokens.get(i).map(String::as_str)
                }
            };
            if let Some(value) = value {
                match name {
                    "--theme" => flags.theme = parse_theme(value),
                    "--data-dir" => flags.data_dir = Some(PathBuf::from(value)),
                    "--export-dir" => flags.export_dir = Some(PathBuf::from(value)),
                    _ => flags.log_file = Some(PathBuf::from(value)),
                }
            }
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "mdpad".to_string(),
            "--theme".to_string(),
            "dark".to_string(),
            "--data-dir=/tmp/mdpad".to_string(),
            "--export-dir".to_string(),
            "out".to_string(),
            "notes.md".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.data_dir, Some(PathBuf::from("/tmp/mdpad")));
        assert_eq!(flags.export_dir, Some(PathBuf::from("out")));
        assert_eq!(flags.log_file, None);
    }

    #[test]
    fn test_unknown_theme_is_ignored() {
        let args = vec!["--theme=sepia".to_string()];
        assert_eq!(parse_flag_tokens(&args).theme, None);
    }

    #[test]
    fn test_trailing_flag_without_value_is_ignored() {
        let args = vec!["--log-file".to_string()];
        assert_eq!(parse_flag_tokens(&args), ConfigFlags::default());
    }

    #[test]
    fn test_config_union_prefers_other() {
        let file = ConfigFlags {
            theme: Some(ThemeMode::Light),
            data_dir: Some(PathBuf::from("file-data")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            theme: Some(ThemeMode::Dark),
            export_dir: Some(PathBuf::from("cli-out")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.data_dir, Some(PathBuf::from("file-data")));
        assert_eq!(merged.export_dir, Some(PathBuf::from("cli-out")));
    }

    #[test]
    fn test_theme_toggle_and_names() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::default().as_str(), "light");
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            theme: Some(ThemeMode::Dark),
            data_dir: Some(PathBuf::from("data")),
            export_dir: Some(PathBuf::from("exports")),
            log_file: Some(PathBuf::from("mdpad.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
