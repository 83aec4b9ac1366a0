//! Maps current source values to bar geometry.
//!
//! Bars are normalized against the largest value of the frame being built, so
//! the tallest bar always spans `viewport.height - margin`. Nothing is carried
//! over from one frame to the next.

use crate::constants::LABEL_OFFSET;
use crate::source::DataSource;
use crate::util::format_rate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Screen rectangle, origin at the top-left, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartItem {
    pub rect: Rect,
    pub label: String,
    pub label_anchor: Point,
}

/// Geometry for one cycle, in the same order as the sources it came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartFrame {
    items: Vec<ChartItem>,
}

impl ChartFrame {
    pub fn items(&self) -> &[ChartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Largest current value, or 0 for an empty slice.
pub fn max_value(sources: &[DataSource]) -> f64 {
    sources.iter().map(|s| s.value).fold(0.0, f64::max)
}

pub fn compute_frame(sources: &[DataSource], viewport: Viewport, margin: f64) -> ChartFrame {
    if sources.is_empty() {
        return ChartFrame::default();
    }

    let max = max_value(sources);
    let bar_width = viewport.width / (sources.len() as f64 * 2.0);
    let usable_height = viewport.height - margin;

    let items = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            // all-zero frame: draw empty bars instead of dividing by zero
            let ratio = if max > 0.0 { source.value / max } else { 0.0 };
            let height = ratio * usable_height;
            let x = i as f64 * 2.0 * bar_width + bar_width / 2.0;
            let y = viewport.height - height;

            ChartItem {
                rect: Rect {
                    x,
                    y,
                    width: bar_width,
                    height,
                },
                label: format!("{}: {}", source.id(), format_rate(source.value)),
                label_anchor: Point {
                    x,
                    y: y - LABEL_OFFSET,
                },
            }
        })
        .collect();

    ChartFrame { items }
}
