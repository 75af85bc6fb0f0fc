//! Color mapping functions for heatmaps.
//!
//! Palettes return plain RGB triples so the terminal view and the PNG
//! export share one implementation.

/// Color palette for heatmap cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPalette {
    /// Viridis colormap (perceptually uniform, colorblind-friendly).
    #[default]
    Viridis,
    /// Plasma colormap (perceptually uniform).
    Plasma,
    /// Rainbow/Spectral colormap (traditional, high contrast).
    Rainbow,
    /// Blue-White-Red diverging colormap.
    BlueRed,
}

impl ColorPalette {
    /// Get the next palette in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Rainbow,
            Self::Rainbow => Self::BlueRed,
            Self::BlueRed => Self::Viridis,
        }
    }

    /// Get palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Rainbow => "Rainbow",
            Self::BlueRed => "Blue-Red",
        }
    }

    /// Map a normalized value (0.0 to 1.0) to an RGB triple.
    pub fn rgb(self, t: f64) -> (u8, u8, u8) {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Viridis => viridis(t),
            Self::Plasma => plasma(t),
            Self::Rainbow => rainbow(t),
            Self::BlueRed => bluered(t),
        }
    }
}

/// Black or white, whichever reads better on the given background.
pub fn contrasting_text(bg: (u8, u8, u8)) -> (u8, u8, u8) {
    let (r, g, b) = (bg.0 as f64, bg.1 as f64, bg.2 as f64);
    let luminance = 0.299 * r + 0.587 * g + 0.114 * b;
    if luminance > 140.0 {
        (0, 0, 0)
    } else {
        (255, 255, 255)
    }
}

fn lerp_stops(t: f64, low: f64, mid: f64, high: f64) -> f64 {
    if t < 0.5 {
        low + t * 2.0 * (mid - low)
    } else {
        mid + (t - 0.5) * 2.0 * (high - mid)
    }
}

/// Viridis approximation: piecewise linear through purple, teal, yellow.
fn viridis(t: f64) -> (u8, u8, u8) {
    (
        lerp_stops(t, 68.0, 33.0, 253.0) as u8,
        lerp_stops(t, 1.0, 144.0, 231.0) as u8,
        lerp_stops(t, 84.0, 140.0, 37.0) as u8,
    )
}

fn plasma(t: f64) -> (u8, u8, u8) {
    (
        lerp_stops(t, 13.0, 204.0, 240.0) as u8,
        lerp_stops(t, 8.0, 71.0, 249.0) as u8,
        lerp_stops(t, 135.0, 120.0, 33.0) as u8,
    )
}

/// HSV sweep from 240° (blue) to 0° (red).
fn rainbow(t: f64) -> (u8, u8, u8) {
    let h = (1.0 - t) * 240.0;
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();

    let (r, g, b) = if h < 60.0 {
        (1.0, x, 0.0)
    } else if h < 120.0 {
        (x, 1.0, 0.0)
    } else if h < 180.0 {
        (0.0, 1.0, x)
    } else {
        (0.0, x, 1.0)
    };

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn bluered(t: f64) -> (u8, u8, u8) {
    if t < 0.5 {
        let t2 = t * 2.0;
        ((t2 * 255.0) as u8, (t2 * 255.0) as u8, 255)
    } else {
        let t2 = (t - 0.5) * 2.0;
        (255, ((1.0 - t2) * 255.0) as u8, ((1.0 - t2) * 255.0) as u8)
    }
}
