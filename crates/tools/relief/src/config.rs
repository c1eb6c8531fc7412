//! Conversion configuration
//!
//! Values come from, in increasing precedence: built-in defaults, a TOML
//! file, `RELIEF_*` environment variables, and finally whatever the caller
//! (usually the CLI) sets on the struct directly.

use crate::error::{ReliefError, Result};
use serde::{Deserialize, Serialize};
use std::{env, path::Path};

/// Default extrusion height for dark pixels in binary-threshold mode
pub const DEFAULT_EXTRUSION_HEIGHT: f32 = 20.0;

/// Default per-intensity scale in continuous mode
pub const DEFAULT_SCALE_FACTOR: f32 = 0.2;

/// Default binary threshold: intensities below this are raised
pub const DEFAULT_THRESHOLD: u8 = 128;

/// How pixel intensity becomes surface height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeightMode {
    /// Dark pixels raised to a fixed height, light pixels flat
    #[default]
    BinaryThreshold,
    /// Height proportional to intensity
    Continuous,
}

/// Which grid edges receive side-wall geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallMode {
    /// Walls along the outer perimeter only (watertight)
    #[default]
    Perimeter,
    /// Walls along every grid edge, interior included.
    ///
    /// Reproduces older converter output. The result is not watertight.
    InteriorTransitions,
}

/// Laplacian smoothing parameters for the top surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Number of smoothing passes
    pub iterations: u32,
    /// Blend factor toward the neighbour average, in (0, 1]
    pub lambda: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            lambda: 0.5,
        }
    }
}

/// Full conversion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReliefConfig {
    pub height_mode: HeightMode,
    /// Used only in binary-threshold mode
    pub extrusion_height: f32,
    /// Used only in binary-threshold mode
    pub threshold: u8,
    /// Used only in continuous mode
    pub scale_factor: f32,
    /// Used only in continuous mode
    pub invert_intensity: bool,
    pub wall_mode: WallMode,
    /// Gaussian blur applied to the intensity grid before height mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_sigma: Option<f32>,
    /// Emit `vn` lines alongside vertices
    pub emit_normals: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothing: Option<SmoothingConfig>,
}

impl Default for ReliefConfig {
    fn default() -> Self {
        Self {
            height_mode: HeightMode::default(),
            extrusion_height: DEFAULT_EXTRUSION_HEIGHT,
            threshold: DEFAULT_THRESHOLD,
            scale_factor: DEFAULT_SCALE_FACTOR,
            invert_intensity: false,
            wall_mode: WallMode::default(),
            blur_sigma: None,
            emit_normals: false,
            smoothing: None,
        }
    }
}

impl ReliefConfig {
    /// Binary-threshold configuration with the given extrusion height
    pub fn binary(extrusion_height: f32) -> Self {
        Self {
            height_mode: HeightMode::BinaryThreshold,
            extrusion_height,
            ..Default::default()
        }
    }

    /// Continuous configuration with the given scale factor
    pub fn continuous(scale_factor: f32, invert_intensity: bool) -> Self {
        Self {
            height_mode: HeightMode::Continuous,
            scale_factor,
            invert_intensity,
            ..Default::default()
        }
    }

    pub fn with_wall_mode(mut self, wall_mode: WallMode) -> Self {
        self.wall_mode = wall_mode;
        self
    }

    pub fn with_smoothing(mut self, iterations: u32, lambda: f32) -> Self {
        self.smoothing = Some(SmoothingConfig { iterations, lambda });
        self
    }

    pub fn with_blur(mut self, sigma: f32) -> Self {
        self.blur_sigma = Some(sigma);
        self
    }

    pub fn with_normals(mut self, emit_normals: bool) -> Self {
        self.emit_normals = emit_normals;
        self
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ReliefError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            ReliefError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Overlay `RELIEF_*` environment variables onto this config.
    ///
    /// Unset variables leave the current value alone; set but unparsable
    /// variables are an error rather than silently ignored.
    pub fn apply_env(mut self) -> Result<Self> {
        if let Some(mode) = env_var("RELIEF_HEIGHT_MODE") {
            self.height_mode = match mode.as_str() {
                "binary-threshold" | "binary" => HeightMode::BinaryThreshold,
                "continuous" => HeightMode::Continuous,
                other => {
                    return Err(ReliefError::InvalidConfig(format!(
                        "RELIEF_HEIGHT_MODE: unknown mode '{}'",
                        other
                    )))
                }
            };
        }
        if let Some(mode) = env_var("RELIEF_WALL_MODE") {
            self.wall_mode = match mode.as_str() {
                "perimeter" => WallMode::Perimeter,
                "interior-transitions" => WallMode::InteriorTransitions,
                other => {
                    return Err(ReliefError::InvalidConfig(format!(
                        "RELIEF_WALL_MODE: unknown mode '{}'",
                        other
                    )))
                }
            };
        }
        if let Some(v) = parse_env("RELIEF_EXTRUSION_HEIGHT")? {
            self.extrusion_height = v;
        }
        if let Some(v) = parse_env("RELIEF_THRESHOLD")? {
            self.threshold = v;
        }
        if let Some(v) = parse_env("RELIEF_SCALE_FACTOR")? {
            self.scale_factor = v;
        }
        if let Some(v) = parse_env("RELIEF_INVERT_INTENSITY")? {
            self.invert_intensity = v;
        }
        if let Some(v) = parse_env("RELIEF_BLUR_SIGMA")? {
            self.blur_sigma = Some(v);
        }
        if let Some(v) = parse_env("RELIEF_EMIT_NORMALS")? {
            self.emit_normals = v;
        }
        Ok(self)
    }

    /// Reject values that would produce meaningless geometry
    pub fn validate(&self) -> Result<()> {
        if !self.extrusion_height.is_finite() || self.extrusion_height < 0.0 {
            return Err(ReliefError::InvalidConfig(format!(
                "extrusion height must be finite and >= 0 (got {})",
                self.extrusion_height
            )));
        }
        if !self.scale_factor.is_finite() || self.scale_factor < 0.0 {
            return Err(ReliefError::InvalidConfig(format!(
                "scale factor must be finite and >= 0 (got {})",
                self.scale_factor
            )));
        }
        if let Some(smoothing) = &self.smoothing {
            if smoothing.iterations == 0 {
                return Err(ReliefError::InvalidConfig(
                    "smoothing iterations must be at least 1".to_string(),
                ));
            }
            if !(smoothing.lambda > 0.0 && smoothing.lambda <= 1.0) {
                return Err(ReliefError::InvalidConfig(format!(
                    "smoothing lambda must be in (0, 1] (got {})",
                    smoothing.lambda
                )));
            }
        }
        if let Some(sigma) = self.blur_sigma {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(ReliefError::InvalidConfig(format!(
                    "blur sigma must be finite and > 0 (got {})",
                    sigma
                )));
            }
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ReliefError::InvalidConfig(format!("{}: cannot parse '{}'", key, raw))),
        None => Ok(None),
    }
}
