use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const JOURNAL_DIR: &str = ".northern-journal";
pub const CONFIG_FILE: &str = "config.json";
pub const ENTRIES_DIR: &str = "entries";
pub const LOG_FILE: &str = "njournal.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

#[derive(Serialize, Deserialize)]
pub struct Config {
    /// Directory entry files are exported to. Must resolve inside `$HOME`.
    pub journal_dir: String,
}

pub fn default_base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home.join(JOURNAL_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(default_base_dir()?.join(CONFIG_FILE))
}

pub fn default_entries_dir() -> Result<PathBuf> {
    Ok(default_base_dir()?.join(ENTRIES_DIR))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(default_base_dir()?.join(LOG_FILE))
}

pub fn load_config() -> Result<Option<Config>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let cfg: Config = serde_json::from_str(&raw)?;
    Ok(Some(cfg))
}

pub fn save_config(journal_dir: &Path) -> Result<()> {
    let cfg = Config {
        journal_dir: journal_dir
            .to_str()
            .ok_or_else(|| anyhow!("Invalid journal dir path"))?
            .to_string(),
    };
    if let Some(parent) = config_path()?.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            restrict_dir(parent)?;
        }
    }
    let data = serde_json::to_string_pretty(&cfg)?;
    let path = config_path()?;
    atomic_write(path.as_path(), data.as_bytes())?;
    restrict_file(path.as_path())?;
    Ok(())
}

/// Directory entries are exported to: the configured one when present and
/// valid, the default otherwise.
pub fn configured_entries_dir() -> Result<PathBuf> {
    if let Some(cfg) = load_config()? {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        return resolve_journal_dir_under_home(Path::new(&cfg.journal_dir), &home);
    }
    default_entries_dir()
}

/// Name of an exported entry file for the given timestamp, sortable by name.
pub fn export_filename(timestamp: &DateTime<Local>) -> String {
    format!("journal_entry_{}.txt", timestamp.format(TIMESTAMP_FORMAT))
}

/// Writes the entry text verbatim to a timestamped file under `dir`,
/// creating the directory on first use. An empty entry is a valid export.
pub fn export_entry(dir: &Path, text: &str, timestamp: &DateTime<Local>) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        restrict_dir(dir)?;
    }
    let path = dir.join(export_filename(timestamp));
    atomic_write(&path, text.as_bytes())?;
    restrict_file(&path)?;
    Ok(path)
}

/// Validates a configured journal directory: absolute or relative to home,
/// no parent traversal, and symlinks may not resolve outside home.
pub fn resolve_journal_dir_under_home(raw: &Path, home: &Path) -> Result<PathBuf> {
    let candidate = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        home.join(raw)
    };

    if candidate
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(anyhow!("Path cannot contain '..' traversal components"));
    }
    if !candidate.starts_with(home) {
        return Err(anyhow!("Path must be inside {}", home.display()));
    }

    let home_real = fs::canonicalize(home).unwrap_or_else(|_| home.to_path_buf());
    if candidate.exists() {
        let candidate_real = fs::canonicalize(&candidate)?;
        if !candidate_real.starts_with(&home_real) {
            return Err(anyhow!("Path resolves outside {}", home.display()));
        }
    } else if let Some(parent) = candidate.parent() {
        if parent.exists() {
            let parent_real = fs::canonicalize(parent)?;
            if !parent_real.starts_with(&home_real) {
                return Err(anyhow!("Path parent resolves outside {}", home.display()));
            }
        }
    }
    Ok(candidate)
}

fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| anyhow!("Invalid target path"))?;
    if !parent.exists() {
        fs::create_dir_all(parent)?;
        restrict_dir(parent)?;
    }

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path)
        .map_err(|e| anyhow!("Atomic write failed: {}", e.error))?;
    Ok(())
}

fn restrict_file(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if path.exists() {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms)?;
        }
    }
    // On non-Unix platforms we skip explicit chmod; rely on platform defaults.
    Ok(())
}

fn restrict_dir(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if path.exists() {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(path, perms)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixed_ts() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 11, 3, 21, 4, 9)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn export_filename_is_deterministic() {
        assert_eq!(
            export_filename(&fixed_ts()),
            "journal_entry_2025-11-03T21-04-09.txt"
        );
        assert_eq!(export_filename(&fixed_ts()), export_filename(&fixed_ts()));
    }

    #[test]
    fn export_round_trips_entry_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = "Dear journal,\n\ntoday was quiet. Lanterns, snow, tea ☕\n";
        let path = export_entry(dir.path(), text, &fixed_ts()).expect("export");
        let read = fs::read_to_string(&path).expect("read back");
        assert_eq!(read, text);
    }

    #[test]
    fn empty_entry_exports_zero_byte_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = export_entry(dir.path(), "", &fixed_ts()).expect("export");
        assert_eq!(fs::metadata(&path).expect("metadata").len(), 0);
        let name = path.file_name().and_then(|n| n.to_str()).expect("file name");
        assert!(name.starts_with("journal_entry_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn export_creates_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("entries");
        let path = export_entry(&nested, "hello", &fixed_ts()).expect("export");
        assert!(path.starts_with(&nested));
        assert_eq!(fs::read_to_string(&path).expect("read back"), "hello");
    }

    #[test]
    fn journal_dir_must_stay_inside_home() {
        let home = tempfile::tempdir().expect("tempdir");
        let ok = resolve_journal_dir_under_home(Path::new("journal"), home.path())
            .expect("relative path resolves under home");
        assert!(ok.starts_with(home.path()));

        assert!(resolve_journal_dir_under_home(Path::new("../escape"), home.path()).is_err());
        assert!(resolve_journal_dir_under_home(Path::new("/somewhere/else"), home.path()).is_err());
    }
}
