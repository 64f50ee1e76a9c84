use serde::{Deserialize, Serialize};

/// Plot geometry in screen coordinates. Brush regions are expressed in the
/// same space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Area inside the margins where points are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsableArea {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl UsableArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

impl PlotConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn usable_area(&self) -> UsableArea {
        UsableArea {
            top: self.margin.top,
            right: self.width - self.margin.right,
            bottom: self.height - self.margin.bottom,
            left: self.margin.left,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 20.0,
            },
        }
    }
}
