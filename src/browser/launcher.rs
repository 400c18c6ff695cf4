use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Executable names tried on `PATH` after the well-known install locations.
const PATH_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium-browser",
    "chromium",
];

/// Flags every verification session runs with. Locators match English
/// labels, so the UI language is pinned.
const SESSION_FLAGS: &[&str] = &[
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-background-networking",
    "--disable-default-apps",
    "--disable-extensions",
    "--disable-notifications",
    "--disable-popup-blocking",
    "--disable-sync",
    "--disable-translate",
    "--mute-audio",
    "--lang=en-US",
];

/// Locate Chrome or Chromium. `CHROME_PATH` wins when set and must exist.
pub fn find_chrome_binary() -> Result<PathBuf> {
    resolve_chrome(
        std::env::var("CHROME_PATH").ok(),
        &install_locations(),
        |path| path.exists(),
        |name| which::which(name).ok(),
    )
}

fn resolve_chrome(
    explicit: Option<String>,
    locations: &[PathBuf],
    exists: impl Fn(&Path) -> bool,
    on_path: impl Fn(&str) -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(explicit) = explicit {
        let path = PathBuf::from(explicit);
        if !exists(&path) {
            bail!("CHROME_PATH points at a missing file: {}", path.display());
        }
        tracing::info!("Using Chrome from CHROME_PATH: {}", path.display());
        return Ok(path);
    }

    if let Some(path) = locations.iter().find(|p| exists(p)) {
        tracing::info!("Found Chrome at: {}", path.display());
        return Ok(path.clone());
    }

    if let Some(path) = PATH_NAMES.iter().find_map(|name| on_path(name)) {
        tracing::info!("Found Chrome in PATH: {}", path.display());
        return Ok(path);
    }

    let searched: Vec<String> = locations.iter().map(|p| p.display().to_string()).collect();
    bail!(
        "Could not find Chrome or Chromium (set CHROME_PATH). Searched:\n{}",
        searched.join("\n")
    )
}

fn install_locations() -> Vec<PathBuf> {
    let mut locations: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "macos")]
    {
        locations.push("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome".into());
        locations.push("/Applications/Chromium.app/Contents/MacOS/Chromium".into());
    }

    #[cfg(target_os = "linux")]
    {
        for path in [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium-browser",
            "/usr/bin/chromium",
            "/snap/bin/chromium",
        ] {
            locations.push(path.into());
        }
    }

    #[cfg(target_os = "windows")]
    {
        for var in ["PROGRAMFILES", "LOCALAPPDATA"] {
            if let Ok(root) = std::env::var(var) {
                locations.push(
                    PathBuf::from(root)
                        .join("Google")
                        .join("Chrome")
                        .join("Application")
                        .join("chrome.exe"),
                );
            }
        }
    }

    locations
}

/// Launch flags for one session. Profile directory and window size are set
/// on the browser config by the session itself.
pub fn default_chrome_args(headless: bool) -> Vec<String> {
    let mut args: Vec<String> = SESSION_FLAGS.iter().map(|f| f.to_string()).collect();
    if headless {
        args.push("--headless=new".into());
    }
    args
}
