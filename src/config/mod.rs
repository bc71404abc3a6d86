use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{MAX_GRID_STEP, MIN_GRID_STEP};
use crate::model::Point;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Text format shown in the export panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    /// One `kind args...` line per element
    #[default]
    Description,
    /// A LaTeX `tikzpicture`
    Tikz,
}

impl ExportFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Description => "Description",
            ExportFormat::Tikz => "TikZ",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Description => "txt",
            ExportFormat::Tikz => "tex",
        }
    }
}

fn default_grid_step() -> i32 {
    MIN_GRID_STEP
}

fn default_tikz_scale() -> f64 {
    1.0
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Snapping pitch restored on startup
    #[serde(default = "default_grid_step")]
    pub grid_step: i32,

    /// Export origin in canvas pixels; `None` centres it on the canvas
    #[serde(default)]
    pub origin: Option<Point>,

    /// Where the last export was written (offered again by the save dialog)
    #[serde(default)]
    pub last_export_path: Option<PathBuf>,

    #[serde(default)]
    pub export_format: ExportFormat,

    /// Multiplier applied on top of the 100 px per unit TikZ scale
    #[serde(default = "default_tikz_scale")]
    pub tikz_scale: f64,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            grid_step: default_grid_step(),
            origin: None,
            last_export_path: None,
            export_format: ExportFormat::default(),
            tikz_scale: default_tikz_scale(),
        }
    }
}

impl AppConfigData {
    /// Pull out-of-range values loaded from disk back into range
    pub fn sanitized(mut self) -> Self {
        self.grid_step = self.grid_step.clamp(MIN_GRID_STEP, MAX_GRID_STEP);
        if !self.tikz_scale.is_finite() || self.tikz_scale <= 0.0 {
            self.tikz_scale = default_tikz_scale();
        }
        self
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the origin and grid step the user picked
#[derive(Message)]
pub struct StoreCanvasSettingsRequest {
    pub origin: Point,
    pub grid_step: i32,
}

/// Message to remember where an export was written
#[derive(Message)]
pub struct UpdateLastExportPathRequest {
    pub path: PathBuf,
}

/// Message to switch the export panel format
#[derive(Message)]
pub struct SetExportFormatRequest {
    pub format: ExportFormat,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config JSON, falling back to defaults with a reason on failure
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str::<AppConfigData>(json) {
        Ok(data) => (data.sanitized(), None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let parsed = parse_config(&json);
                if parsed.1.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                parsed
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to store origin and grid step
fn store_canvas_settings_system(
    mut events: MessageReader<StoreCanvasSettingsRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        let origin = Some(event.origin);
        if config.data.origin == origin && config.data.grid_step == event.grid_step {
            continue;
        }
        config.data.origin = origin;
        config.data.grid_step = event.grid_step;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update last export path
fn update_last_export_path_system(
    mut events: MessageReader<UpdateLastExportPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_export_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to switch the export format
fn set_export_format_system(
    mut events: MessageReader<SetExportFormatRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.export_format == event.format {
            continue;
        }
        config.data.export_format = event.format;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<StoreCanvasSettingsRequest>()
            .add_message::<UpdateLastExportPathRequest>()
            .add_message::<SetExportFormatRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    store_canvas_settings_system.run_if(on_message::<StoreCanvasSettingsRequest>),
                    update_last_export_path_system
                        .run_if(on_message::<UpdateLastExportPathRequest>),
                    set_export_format_system.run_if(on_message::<SetExportFormatRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
