//! Where Autodraw keeps its settings file, logs and default export folder.
//!
//! Debug builds and `cargo run` use the working directory; installed builds
//! use an `autodraw` folder under the directories reported by `dirs`.

use std::path::PathBuf;

/// Running from a checkout: under cargo or in a debug build
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Folder holding `config.json`
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("autodraw"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Folder holding the `logs/` directory
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("autodraw"))
}

/// The settings file read by the config plugin
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Target of the debug-build log file
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Default folder for the save and import dialogs; the documents folder
/// when installed
pub fn exports_dir() -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from("exports");
    }

    dirs::document_dir()
        .or_else(data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Create the settings and log folders of an installed build
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        // Local directories, created lazily by whoever writes there
        return Ok(());
    }

    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data_dir() {
        std::fs::create_dir_all(data.join("logs"))?;
    }
    Ok(())
}
