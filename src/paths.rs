use anyhow::Context;
use std::env;
use std::path::{Path, PathBuf};

fn home_dir() -> anyhow::Result<PathBuf> {
    // Unix HOME only.
    let home = env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home))
}

fn ensure_dir(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))?;
    Ok(path.to_path_buf())
}

/// Config directory without touching the filesystem.
///
/// `$DOGA_HOME/config`, then `$XDG_CONFIG_HOME/doga`, then `~/.config/doga`.
pub fn resolve_config_dir(
    doga_home: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: impl FnOnce() -> anyhow::Result<PathBuf>,
) -> anyhow::Result<PathBuf> {
    if let Some(base) = doga_home {
        return Ok(base.join("config"));
    }
    if let Some(xdg) = xdg_config_home {
        return Ok(xdg.join("doga"));
    }
    Ok(home()?.join(".config").join("doga"))
}

pub fn config_dir() -> anyhow::Result<PathBuf> {
    let dir = resolve_config_dir(
        env::var_os("DOGA_HOME").map(PathBuf::from),
        env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        home_dir,
    )?;
    ensure_dir(&dir)
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
