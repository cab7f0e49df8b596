//! Admin entries stored in the AMX Mod X `users.ini`.
//!
//! Format: an optional `#[NAME: <display name>]` comment line immediately
//! before a quoted quadruple `"auth" "password" "access" "flags"`. All
//! other lines (comments, blanks) are preserved on mutation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::RecordError;
use crate::models::AdminEntry;

const NAME_PREFIX: &str = "#[NAME:";

pub fn users_ini_path(install: &Path) -> PathBuf {
    install.join("cstrike/addons/amxmodx/configs/users.ini")
}

pub fn list_admins(install: &Path) -> Result<Vec<AdminEntry>, RecordError> {
    let path = users_ini_path(install);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RecordError::FileNotFound(path.display().to_string())
        } else {
            RecordError::IoError(e)
        }
    })?;

    let mut entries = vec![];
    let mut current_name: Option<String> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(NAME_PREFIX) {
            if let Some(name) = rest.strip_suffix(']') {
                current_name = Some(name.trim().to_string());
            }
        } else if trimmed.starts_with('"') {
            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.len() >= 4 {
                entries.push(AdminEntry {
                    name: current_name.take(),
                    auth: parts[0].trim_matches('"').to_string(),
                    password: parts[1].trim_matches('"').to_string(),
                    access: parts[2].trim_matches('"').to_string(),
                    flags: parts[3].trim_matches('"').to_string(),
                });
            }
        }
    }

    Ok(entries)
}

pub fn add_admin(install: &Path, entry: &AdminEntry) -> Result<(), RecordError> {
    let path = users_ini_path(install);
    let mut file = fs::File::options()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(RecordError::IoError)?;

    if let Some(name) = &entry.name {
        writeln!(file, "{} {}]", NAME_PREFIX, name).map_err(RecordError::IoError)?;
    }
    writeln!(
        file,
        "\"{}\" \"{}\" \"{}\" \"{}\"",
        entry.auth, entry.password, entry.access, entry.flags
    )
    .map_err(RecordError::IoError)?;
    Ok(())
}

/// Replace the entry whose auth matches `updated.auth`.
pub fn update_admin(install: &Path, updated: &AdminEntry) -> Result<(), RecordError> {
    rewrite(install, |lines, line| {
        if line.trim().starts_with('"') && line.contains(&updated.auth) {
            if lines
                .last()
                .map(|prev: &String| prev.trim().starts_with(NAME_PREFIX))
                .unwrap_or(false)
            {
                lines.pop();
            }
            if let Some(name) = &updated.name {
                lines.push(format!("{} {}]", NAME_PREFIX, name));
            }
            lines.push(format!(
                "\"{}\" \"{}\" \"{}\" \"{}\"",
                updated.auth, updated.password, updated.access, updated.flags
            ));
            false
        } else {
            true
        }
    })
}

/// Remove the entry whose auth matches, along with its name comment.
pub fn remove_admin(install: &Path, auth: &str) -> Result<(), RecordError> {
    rewrite(install, |lines, line| {
        if line.trim().starts_with('"') && line.contains(auth) {
            if lines
                .last()
                .map(|prev: &String| prev.trim().starts_with(NAME_PREFIX))
                .unwrap_or(false)
            {
                lines.pop();
            }
            false
        } else {
            true
        }
    })
}

/// Stream the file through `keep`, which may also edit already-kept lines;
/// returning false drops the current line.
fn rewrite<F>(install: &Path, mut keep: F) -> Result<(), RecordError>
where
    F: FnMut(&mut Vec<String>, &str) -> bool,
{
    let path = users_ini_path(install);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RecordError::FileNotFound(path.display().to_string())
        } else {
            RecordError::IoError(e)
        }
    })?;

    let mut lines: Vec<String> = vec![];
    for line in content.lines() {
        if keep(&mut lines, line) {
            lines.push(line.to_string());
        }
    }

    fs::write(&path, lines.join("\n") + "\n").map_err(RecordError::IoError)?;
    Ok(())
}
