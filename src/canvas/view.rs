use crate::color::{ColorModel, RGBAColorFormat};
use crate::geometry::Rectangle;
use crate::image::ImageSource;

use super::SparseCanvas;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Luminance resolved through the canvas theme.
    #[default]
    Themed,
    /// Luminance as plain gray, useful to inspect what was stored.
    Mask,
}

/// Read-only adapter choosing how a canvas is rendered.
#[derive(Clone, Copy)]
pub struct CanvasView<'a> {
    canvas: &'a SparseCanvas,
    mode: RenderMode,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a SparseCanvas, mode: RenderMode) -> Self {
        Self { canvas, mode }
    }
}

impl ImageSource for CanvasView<'_> {
    type Pixel = RGBAColorFormat;

    fn bounds(&self) -> Rectangle {
        self.canvas.bounds()
    }

    fn at(&self, x: i32, y: i32) -> Self::Pixel {
        match self.mode {
            RenderMode::Themed => self.canvas.at(x, y),
            RenderMode::Mask => {
                let luma = self.canvas.luminance(x, y);
                RGBAColorFormat::opaque(luma, luma, luma)
            }
        }
    }

    fn color_model(&self) -> ColorModel {
        match self.mode {
            RenderMode::Themed => ColorModel::Rgb,
            RenderMode::Mask => ColorModel::Gray,
        }
    }
}
