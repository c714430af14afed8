use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

/// Resolve the server home directory into an absolute path.
///
/// - `None` (or blank) falls back to `<user home>/<default_subdir>`.
/// - A leading `~` is expanded against the user home.
/// - Relative paths are joined onto the current working directory.
///
/// With `create = true` the directory is created if missing.
pub fn resolve_home_dir(
    requested: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let user_home = user_home()?;

    let resolved = match requested.map(|s| s.trim().to_string()) {
        None => user_home.join(default_subdir),
        Some(s) if s.is_empty() => user_home.join(default_subdir),
        Some(s) if s == "~" => user_home,
        Some(s) => {
            if let Some(rest) = s.strip_prefix("~/").or_else(|| s.strip_prefix("~\\")) {
                user_home.join(rest)
            } else {
                let p = PathBuf::from(&s);
                if p.is_absolute() {
                    p
                } else {
                    std::env::current_dir()
                        .context("cannot read current directory")?
                        .join(p)
                }
            }
        }
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("cannot create home dir {}", resolved.display()))?;
    }
    Ok(resolved)
}

#[cfg(not(target_os = "windows"))]
fn user_home() -> Result<PathBuf> {
    // HOME wins over passwd lookups so tests can redirect it
    if let Some(h) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(h));
    }
    dirs::home_dir().ok_or_else(|| anyhow!("unable to determine user home directory"))
}

#[cfg(target_os = "windows")]
fn user_home() -> Result<PathBuf> {
    if let Some(h) = std::env::var_os("APPDATA").filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(h));
    }
    dirs::config_dir().ok_or_else(|| anyhow!("unable to determine APPDATA directory"))
}
