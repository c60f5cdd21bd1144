//! Render-engine executable discovery.
//!
//! The candidate list is data, not branching: an ordered slice of
//! well-known Chrome and Edge install locations per platform, probed in
//! order until one exists on disk.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[cfg(target_os = "windows")]
const WINDOWS_CANDIDATES: &[(&str, &str)] = &[
    ("ProgramFiles", r"Google\Chrome\Application\chrome.exe"),
    ("ProgramFiles(x86)", r"Google\Chrome\Application\chrome.exe"),
    ("LOCALAPPDATA", r"Google\Chrome\Application\chrome.exe"),
    ("ProgramFiles", r"Microsoft\Edge\Application\msedge.exe"),
    ("ProgramFiles(x86)", r"Microsoft\Edge\Application\msedge.exe"),
];

#[cfg(target_os = "macos")]
const MACOS_CANDIDATES: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
];

#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
const LINUX_CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/opt/google/chrome/chrome",
    "/usr/bin/microsoft-edge",
    "/usr/bin/microsoft-edge-stable",
];

/// Well-known install locations for the current platform, in probe order.
pub fn candidate_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        WINDOWS_CANDIDATES
            .iter()
            .filter_map(|(root, rel)| {
                std::env::var_os(root).map(|base| Path::new(&base).join(rel))
            })
            .collect()
    }
    #[cfg(target_os = "macos")]
    {
        MACOS_CANDIDATES.iter().map(PathBuf::from).collect()
    }
    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    {
        LINUX_CANDIDATES.iter().map(PathBuf::from).collect()
    }
}

/// Resolve the render-engine executable.
///
/// A supplied path wins but must exist on disk; otherwise the platform
/// candidate list is probed in order. Fails with
/// [`Error::RenderEngineNotFound`] naming the missing executable, or
/// describing the failed probe.
pub fn resolve(supplied: Option<&Path>) -> Result<PathBuf> {
    resolve_with(supplied, &candidate_paths(), |p| p.exists())
}

/// Discovery core with an injectable existence predicate, so tests can
/// run against a fake filesystem.
pub(crate) fn resolve_with<F>(
    supplied: Option<&Path>,
    candidates: &[PathBuf],
    exists: F,
) -> Result<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if let Some(path) = supplied {
        if exists(path) {
            return Ok(path.to_path_buf());
        }
        return Err(Error::RenderEngineNotFound(path.display().to_string()));
    }

    for candidate in candidates {
        if exists(candidate) {
            log::debug!("render engine found at {}", candidate.display());
            return Ok(candidate.clone());
        }
    }
    Err(Error::RenderEngineNotFound(
        "no Chrome or Edge installation found; pass an explicit executable path".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_path_must_exist() {
        let missing = Path::new("/opt/fake/chrome");
        let err = resolve_with(Some(missing), &[], |_| false).unwrap_err();
        let Error::RenderEngineNotFound(message) = err else {
            panic!("expected RenderEngineNotFound");
        };
        assert!(message.contains("/opt/fake/chrome"));
    }

    #[test]
    fn test_supplied_path_skips_probing() {
        let supplied = Path::new("/tools/chrome");
        let resolved = resolve_with(Some(supplied), &[PathBuf::from("/other")], |p| {
            p == supplied
        })
        .unwrap();
        assert_eq!(resolved, supplied);
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let candidates = vec![
            PathBuf::from("/a/chrome"),
            PathBuf::from("/b/chrome"),
            PathBuf::from("/c/chrome"),
        ];
        let resolved =
            resolve_with(None, &candidates, |p| p.starts_with("/b") || p.starts_with("/c"))
                .unwrap();
        assert_eq!(resolved, PathBuf::from("/b/chrome"));
    }

    #[test]
    fn test_no_candidate_found() {
        let candidates = vec![PathBuf::from("/a/chrome")];
        let err = resolve_with(None, &candidates, |_| false).unwrap_err();
        assert!(matches!(err, Error::RenderEngineNotFound(_)));
    }
}
