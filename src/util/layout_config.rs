//! Layout configuration constants for the chart view and image export.

/// Configuration for the terminal heatmap grid.
#[derive(Debug, Clone)]
pub struct HeatmapLayoutConfig {
    /// Width of each value cell in characters.
    pub cell_width: u16,
    /// Upper bound for the gene label column.
    pub max_label_width: u16,
    /// Width of the colorbar in characters.
    pub colorbar_width: usize,
}

impl Default for HeatmapLayoutConfig {
    fn default() -> Self {
        Self {
            cell_width: 9,
            max_label_width: 18,
            colorbar_width: 40,
        }
    }
}

/// Configuration for scatter charts drawn on a terminal canvas.
#[derive(Debug, Clone)]
pub struct ScatterLayoutConfig {
    /// Head room above the highest point (0.05 = 5%).
    pub y_padding_factor: f64,
    /// Width reserved on the left for y-axis values.
    pub y_axis_width: u16,
    /// Number of dashes per reference line.
    pub dash_count: usize,
}

impl Default for ScatterLayoutConfig {
    fn default() -> Self {
        Self {
            y_padding_factor: 0.05,
            y_axis_width: 8,
            dash_count: 40,
        }
    }
}

/// Size of exported images.
#[derive(Debug, Clone, Copy)]
pub struct ExportConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

/// Combined layout configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Heatmap grid.
    pub heatmap: HeatmapLayoutConfig,
    /// Manhattan and volcano canvases.
    pub scatter: ScatterLayoutConfig,
    /// PNG export.
    pub export: ExportConfig,
}
