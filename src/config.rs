use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub no_form: bool,
    pub title: Option<String>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_form: self.no_form || other.no_form,
            title: other.title.clone().or_else(|| self.title.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("masthead").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("masthead")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("masthead").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("masthead")
                .join("config");
        }
    }

    PathBuf::from(".mastheadrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mastheadrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    // One flag per line. A title value runs to the end of its line.
    let mut title = None;
    let mut tokens = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(value) = line.strip_prefix("--title=") {
            title = Some(value.to_string());
        } else if let Some(value) = line.strip_prefix("--title ") {
            title = Some(value.trim_start().to_string());
        } else {
            tokens.extend(line.split_whitespace().map(ToOwned::to_owned));
        }
    }
    let mut flags = parse_flag_tokens(&tokens);
    if title.is_some() {
        flags.title = title;
    }
    Ok(flags)
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# masthead defaults (saved with --save)".to_string());
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.no_form {
        lines.push("--no-form".to_string());
    }
    if let Some(title) = &flags.title {
        lines.push(format!("--title {title}"));
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

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--watch" {
            flags.watch = true;
        } else if token == "--no-form" {
            flags.no_form = true;
        } else if token == "--title" {
            if let Some(next) = tokens.get(i + 1) {
                flags.title = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--title=") {
            flags.title = Some(value.to_string());
        }
        i += 1;
    }
    flags
}
