//! Shared library discovery
//!
//! Platform naming comes from `std::env::consts` (`lib*.so`, `lib*.dylib`,
//! `*.dll`), so nothing here branches on the OS itself.

use crate::LoadError;
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

/// Crate name of the native library, as it appears in built artifacts
pub const LIBRARY_STEM: &str = "bindbench_native";

/// Finds the native shared library on disk
#[derive(Debug, Clone)]
pub struct LibraryLocator {
    explicit: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl LibraryLocator {
    /// Locator that searches exactly `search_dirs`, in order
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            explicit: None,
            search_dirs,
        }
    }

    /// Use this file and nothing else
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Search `dir` before the existing search directories
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.insert(0, dir.into());
        self
    }

    /// Platform file name, e.g. `libbindbench_native.so`
    pub fn file_name() -> String {
        format!("{DLL_PREFIX}{LIBRARY_STEM}{DLL_SUFFIX}")
    }

    /// Directories searched, in order
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Exact-name candidates, in search order
    pub fn candidates(&self) -> Vec<PathBuf> {
        match &self.explicit {
            Some(path) => vec![path.clone()],
            None => {
                let name = Self::file_name();
                self.search_dirs.iter().map(|dir| dir.join(&name)).collect()
            }
        }
    }

    /// Find the library.
    ///
    /// An explicit path is authoritative. Otherwise the exact platform name
    /// is tried in every search directory, then each directory is scanned
    /// for any file mentioning the library stem with the platform suffix.
    pub fn locate(&self) -> Result<PathBuf, LoadError> {
        let candidates = self.candidates();

        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            return Ok(found.clone());
        }

        if self.explicit.is_none() {
            for dir in &self.search_dirs {
                if let Some(found) = scan_dir(dir) {
                    tracing::debug!(path = %found.display(), "found library by directory scan");
                    return Ok(found);
                }
            }
        }

        Err(LoadError::NotFound {
            searched: candidates,
        })
    }
}

impl Default for LibraryLocator {
    fn default() -> Self {
        Self::new(default_search_dirs())
    }
}

/// Where cargo and the usual build layouts leave the library.
fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        // target/<profile>/ for binaries, target/<profile>/deps/ for tests
        if let Some(parent) = exe_dir.parent() {
            dirs.push(exe_dir.clone());
            dirs.push(parent.to_path_buf());
        } else {
            dirs.push(exe_dir);
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        for sub in ["target/release", "target/debug", "build"] {
            dirs.push(cwd.join(sub));
        }
        dirs.push(cwd);
    }

    dirs.dedup();
    dirs
}

fn scan_dir(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains(LIBRARY_STEM) && n.ends_with(DLL_SUFFIX))
        })
        .collect();
    matches.sort();
    matches.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bindbench-locator-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_name_uses_platform_affixes() {
        let name = LibraryLocator::file_name();
        assert!(name.starts_with(DLL_PREFIX));
        assert!(name.ends_with(DLL_SUFFIX));
        assert!(name.contains(LIBRARY_STEM));
    }

    #[test]
    fn test_exact_name_in_search_dir() {
        let empty = scratch("exact-empty");
        let dir = scratch("exact");
        let lib = dir.join(LibraryLocator::file_name());
        std::fs::write(&lib, b"").unwrap();

        let locator = LibraryLocator::new(vec![empty.clone(), dir.clone()]);
        assert_eq!(locator.locate().unwrap(), lib);

        std::fs::remove_dir_all(&dir).ok();
        std::fs::remove_dir_all(&empty).ok();
    }

    #[test]
    fn test_scan_fallback() {
        let dir = scratch("scan");
        let lib = dir.join(format!("{DLL_PREFIX}{LIBRARY_STEM}-1a2b3c{DLL_SUFFIX}"));
        std::fs::write(&lib, b"").unwrap();
        std::fs::write(dir.join(format!("{LIBRARY_STEM}.txt")), b"").unwrap();

        let locator = LibraryLocator::new(vec![dir.clone()]);
        assert_eq!(locator.locate().unwrap(), lib);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_not_found_lists_candidates() {
        let dir = scratch("missing");
        let locator = LibraryLocator::new(vec![dir.clone()]);

        match locator.locate().unwrap_err() {
            LoadError::NotFound { searched } => {
                assert_eq!(searched, vec![dir.join(LibraryLocator::file_name())]);
            }
            other => panic!("unexpected error: {other}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_explicit_path_is_authoritative() {
        let dir = scratch("explicit");
        std::fs::write(dir.join(LibraryLocator::file_name()), b"").unwrap();

        let locator = LibraryLocator::new(vec![dir.clone()]).with_path(dir.join("elsewhere.so"));
        assert!(matches!(locator.locate(), Err(LoadError::NotFound { .. })));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_with_search_dir_prepends() {
        let locator = LibraryLocator::new(vec![PathBuf::from("b")]).with_search_dir("a");
        assert_eq!(locator.search_dirs(), &[PathBuf::from("a"), PathBuf::from("b")]);
    }
}
