//! Utility functions.
//!
//! This module provides colour palettes and layout constants shared by the
//! terminal chart view and the image export.

pub mod colormaps;
pub mod layout_config;

pub use colormaps::{contrasting_text, ColorPalette};
pub use layout_config::{ExportConfig, LayoutConfig};
