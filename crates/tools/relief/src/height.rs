//! Intensity to height mapping strategies

use crate::config::{HeightMode, ReliefConfig};

/// Maps an 8-bit intensity sample to a surface height
pub trait HeightMapping {
    fn height(&self, intensity: u8) -> f32;
}

/// Stamp relief: dark pixels raised to a fixed height, light pixels flat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryThreshold {
    pub extrusion_height: f32,
    /// Intensities strictly below this are raised
    pub threshold: u8,
}

impl HeightMapping for BinaryThreshold {
    #[inline]
    fn height(&self, intensity: u8) -> f32 {
        if intensity < self.threshold {
            self.extrusion_height
        } else {
            0.0
        }
    }
}

/// Smooth relief proportional to brightness (or darkness, when inverted)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Continuous {
    pub scale_factor: f32,
    pub invert: bool,
}

impl HeightMapping for Continuous {
    #[inline]
    fn height(&self, intensity: u8) -> f32 {
        let level = if self.invert {
            255 - intensity
        } else {
            intensity
        };
        level as f32 * self.scale_factor
    }
}

/// Either mapping, selected from configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightPolicy {
    Binary(BinaryThreshold),
    Continuous(Continuous),
}

impl HeightPolicy {
    pub fn from_config(config: &ReliefConfig) -> Self {
        match config.height_mode {
            HeightMode::BinaryThreshold => HeightPolicy::Binary(BinaryThreshold {
                extrusion_height: config.extrusion_height,
                threshold: config.threshold,
            }),
            HeightMode::Continuous => HeightPolicy::Continuous(Continuous {
                scale_factor: config.scale_factor,
                invert: config.invert_intensity,
            }),
        }
    }
}

impl HeightMapping for HeightPolicy {
    #[inline]
    fn height(&self, intensity: u8) -> f32 {
        match self {
            HeightPolicy::Binary(m) => m.height(intensity),
            HeightPolicy::Continuous(m) => m.height(intensity),
        }
    }
}
