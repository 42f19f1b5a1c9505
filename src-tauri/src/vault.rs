use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum VaultError {
    Io { path: PathBuf, source: io::Error },
    InvalidPath(String),
}

impl VaultError {
    fn io(path: &Path, source: io::Error) -> Self {
        VaultError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            VaultError::InvalidPath(path) => write!(f, "invalid note path: {path}"),
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VaultError::Io { source, .. } => Some(source),
            VaultError::InvalidPath(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultNote {
    pub path: String,
    pub content: String,
}

pub fn normalize_rel_path(path: &str) -> String {
    path.trim().replace('\\', "/").trim_matches('/').to_string()
}

pub fn normalize_link_key(path: &str) -> String {
    normalize_rel_path(path).to_ascii_lowercase()
}

pub fn strip_md(path: &str) -> String {
    let normalized = normalize_rel_path(path);
    if normalized.to_ascii_lowercase().ends_with(".md") {
        normalized[..normalized.len() - 3].to_string()
    } else {
        normalized
    }
}

pub fn file_stem(path: &str) -> String {
    let no_ext = strip_md(path);
    match no_ext.rsplit_once('/') {
        Some((_, stem)) => stem.to_string(),
        None => no_ext,
    }
}

fn collect_markdown_files(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<(), VaultError> {
    let read_dir = fs::read_dir(dir).map_err(|e| VaultError::io(dir, e))?;
    for entry in read_dir {
        let entry = entry.map_err(|e| VaultError::io(dir, e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            collect_markdown_files(root, &path, out)?;
            continue;
        }
        if !path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        {
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .map_err(|_| VaultError::InvalidPath(path.display().to_string()))?
            .to_string_lossy()
            .replace('\\', "/");
        out.push(rel);
    }
    Ok(())
}

/// Vault-relative paths of every markdown note, sorted. Hidden entries are
/// skipped.
pub fn collect_note_paths(vault_path: &Path) -> Result<Vec<String>, VaultError> {
    if !vault_path.exists() {
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    collect_markdown_files(vault_path, vault_path, &mut entries)?;
    entries.sort();
    Ok(entries)
}

pub fn read_vault_notes(vault_path: &Path) -> Result<Vec<VaultNote>, VaultError> {
    let mut notes = Vec::new();
    for rel_path in collect_note_paths(vault_path)? {
        let abs = vault_path.join(&rel_path);
        match fs::read_to_string(&abs) {
            Ok(content) => notes.push(VaultNote {
                path: rel_path,
                content,
            }),
            Err(err) => log::warn!("skipping unreadable note {}: {err}", abs.display()),
        }
    }
    Ok(notes)
}

const WELCOME_NOTE: &str = "# Welcome to Bedrock\n\n\
Link notes with [[Getting Started]] style wiki links.\n\
Ctrl/Cmd-click a link to open it, or open the graph to see its neighbors.\n";

const GETTING_STARTED_NOTE: &str = "# Getting Started\n\nBack to [[Welcome]].\n";

/// Creates the vault layout on first run. Existing files are left alone.
pub fn init_vault_dir(vault_path: &Path) -> Result<(), VaultError> {
    if !vault_path.exists() {
        fs::create_dir_all(vault_path).map_err(|e| VaultError::io(vault_path, e))?;
        for (name, body) in [
            ("Welcome.md", WELCOME_NOTE),
            ("Getting Started.md", GETTING_STARTED_NOTE),
        ] {
            let path = vault_path.join(name);
            fs::write(&path, body).map_err(|e| VaultError::io(&path, e))?;
        }
    }

    let settings_path = vault_path.join("settings.json");
    if !settings_path.exists() {
        fs::write(&settings_path, "{}").map_err(|e| VaultError::io(&settings_path, e))?;
    }
    Ok(())
}

pub fn read_file(path: &Path) -> Result<String, VaultError> {
    fs::read_to_string(path).map_err(|e| VaultError::io(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<(), VaultError> {
    fs::write(path, content).map_err(|e| VaultError::io(path, e))
}
