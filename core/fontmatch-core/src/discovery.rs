//! Font file discovery for fontmatch-core (made by FontLab https://www.fontlab.com/)

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Environment variable overriding the platform font directories.
pub const FONT_DIRS_ENV: &str = "FONTMATCH_FONT_DIRS";

/// Recursive filesystem walker that collects common font formats.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    roots: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots = roots.into_iter().map(Into::into).collect();
        Self {
            roots,
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Walk every root, returning font files in a stable, name-sorted order.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();

        for root in &self.roots {
            if !root.exists() {
                return Err(Error::system(format!(
                    "root path does not exist: {}",
                    root.display()
                )));
            }

            let walker = WalkDir::new(root)
                .follow_links(self.follow_symlinks)
                .sort_by_file_name();
            for entry in walker {
                let entry = entry.map_err(|err| {
                    Error::io(format!("walking {}", root.display()), io::Error::from(err))
                })?;
                if entry.file_type().is_file() && is_font(entry.path()) {
                    found.push(entry.into_path());
                }
            }
        }

        Ok(found)
    }
}

fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc")
}

/// Font directories for the current platform that exist on disk.
///
/// `FONTMATCH_FONT_DIRS` (`:` or `;` separated) replaces the built-in list.
pub fn system_font_roots() -> Result<Vec<PathBuf>> {
    if let Ok(raw) = env::var(FONT_DIRS_ENV) {
        let mut overrides: Vec<PathBuf> = raw
            .split([':', ';'])
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .collect();

        overrides.sort();
        overrides.dedup();

        return if overrides.is_empty() {
            Err(Error::BackendUnavailable(format!(
                "{FONT_DIRS_ENV} is set but no paths exist"
            )))
        } else {
            Ok(overrides)
        };
    }

    let mut candidates = platform_font_dirs()?;
    candidates.retain(|p| p.exists());
    candidates.sort();
    candidates.dedup();

    if candidates.is_empty() {
        return Err(Error::BackendUnavailable(
            "no system font directories found for this platform".to_string(),
        ));
    }

    Ok(candidates)
}

#[cfg(target_os = "macos")]
fn platform_font_dirs() -> Result<Vec<PathBuf>> {
    let mut dirs = vec![
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
    ];
    if let Some(home) = env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join("Library/Fonts"));
    }
    Ok(dirs)
}

#[cfg(target_os = "linux")]
fn platform_font_dirs() -> Result<Vec<PathBuf>> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
    ];
    if let Some(home) = env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
    }
    Ok(dirs)
}

#[cfg(target_os = "windows")]
fn platform_font_dirs() -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    if let Some(system_root) = env::var_os("SYSTEMROOT") {
        dirs.push(PathBuf::from(system_root).join("Fonts"));
    }
    if let Some(local_appdata) = env::var_os("LOCALAPPDATA") {
        dirs.push(PathBuf::from(local_appdata).join("Microsoft/Windows/Fonts"));
    }
    Ok(dirs)
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn platform_font_dirs() -> Result<Vec<PathBuf>> {
    Err(Error::NotImplemented(
        "system font directories are unknown for this platform".to_string(),
    ))
}
