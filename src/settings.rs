use crate::screen::{Orientation, ScreenParams, WindowRequest};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Startup options of the mirror window, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenSettings {
    #[serde(default)]
    pub window_x: Option<i32>,
    #[serde(default)]
    pub window_y: Option<i32>,
    #[serde(default)]
    pub window_width: Option<u16>,
    #[serde(default)]
    pub window_height: Option<u16>,
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default)]
    pub orientation: Orientation,
    /// Reserve the button panel next to the content.
    #[serde(default)]
    pub panel_show: bool,
    #[serde(default)]
    pub hide_window: bool,
    #[serde(default)]
    pub start_fps_counter: bool,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default)]
    pub debug_logging: bool,
}

impl ScreenSettings {
    /// Read settings from `path`. A missing or blank file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read screen settings file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("deserialize screen settings file {}", path.display()))?;
        settings
            .validate()
            .with_context(|| format!("invalid screen settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Install the log subscriber at the level these settings ask for.
    pub fn init_logging(&self) {
        crate::logging::init(self.debug_logging);
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("window_x", self.window_x), ("window_y", self.window_y)] {
            if let Some(value) = value {
                if i16::try_from(value).is_err() {
                    bail!("{name} {value} is outside {}..={}", i16::MIN, i16::MAX);
                }
            }
        }
        Ok(())
    }

    /// Parameters for [`crate::screen::Screen::new`]. Positions outside the
    /// `i16` range are dropped in favor of centering.
    pub fn to_params(&self) -> ScreenParams {
        let coord = |value: Option<i32>| value.and_then(|v| i16::try_from(v).ok());
        ScreenParams {
            window: WindowRequest {
                x: coord(self.window_x),
                y: coord(self.window_y),
                width: self.window_width,
                height: self.window_height,
            },
            orientation: self.orientation,
            fullscreen: self.fullscreen,
            panel_show: self.panel_show,
            hide_window: self.hide_window,
            start_fps_counter: self.start_fps_counter,
            always_on_top: self.always_on_top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_params_carries_every_option() {
        let settings = ScreenSettings {
            window_x: Some(-20),
            window_y: None,
            window_width: Some(540),
            window_height: None,
            fullscreen: true,
            orientation: Orientation::Flip90,
            panel_show: true,
            hide_window: false,
            start_fps_counter: true,
            always_on_top: true,
            debug_logging: true,
        };
        let params = settings.to_params();
        assert_eq!(
            params.window,
            WindowRequest {
                x: Some(-20),
                y: None,
                width: Some(540),
                height: None,
            }
        );
        assert_eq!(params.orientation, Orientation::Flip90);
        assert!(params.fullscreen && params.panel_show && params.start_fps_counter);
        assert!(params.always_on_top && !params.hide_window);
    }

    #[test]
    fn validate_rejects_positions_beyond_i16() {
        let settings = ScreenSettings {
            window_x: Some(40_000),
            ..ScreenSettings::default()
        };
        assert!(settings.validate().is_err());
        assert_eq!(settings.to_params().window.x, None);
    }
}
