//! Drawing-surface abstraction the driver renders through.

pub use ratatui::style::Color;

use crate::error::ResourceError;
use crate::layout::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    CloseRequested,
}

/// A window-like target for one frame of draw calls.
///
/// Calls between `clear` and `present` build the next frame; nothing becomes
/// visible until `present`. `close` releases the underlying resource and must
/// be safe to call more than once.
pub trait Surface {
    /// Font handle accepted by `draw_text`.
    type Font;

    /// Next pending platform event, or `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<SurfaceEvent>;

    fn clear(&mut self, color: Color);

    fn draw_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(
        &mut self,
        text: &str,
        font: &Self::Font,
        size: f32,
        position: Point,
        color: Color,
    );

    fn present(&mut self) -> Result<(), ResourceError>;

    fn close(&mut self);

    fn is_open(&self) -> bool;
}

/// Retained draw call, replayed when the frame is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        /// Width of the text in the label font at its requested size.
        extent: f64,
        color: Color,
    },
}
