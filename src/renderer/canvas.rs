//! Canvas 2D renderer

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::label::{TextMeasure, layout_label};
use crate::sim::BlockView;

/// Label color on top of block fills
const LABEL_COLOR: &str = "white";
const LABEL_FONT_FAMILY: &str = "Arial";

/// Canvas context adapter for label measurement
struct CanvasMeasure<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl TextMeasure for CanvasMeasure<'_> {
    fn set_font_px(&mut self, px: f32) {
        self.ctx.set_font(&format!("{}px {}", px, LABEL_FONT_FAMILY));
    }

    fn width(&self, text: &str) -> f32 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }
}

/// Draws the board onto a 2D canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Clear and redraw every block
    pub fn render(&self, blocks: &[BlockView<'_>]) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

        for block in blocks {
            self.ctx.set_fill_style_str(block.color);
            self.ctx.fill_rect(
                block.pos.x as f64,
                block.pos.y as f64,
                block.size.x as f64,
                block.size.y as f64,
            );
            self.draw_label(block);
        }
    }

    fn draw_label(&self, block: &BlockView<'_>) {
        let mut measure = CanvasMeasure { ctx: &self.ctx };
        let layout = layout_label(&mut measure, block.display_name, block.pos, block.size);

        self.ctx.set_fill_style_str(LABEL_COLOR);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        for line in &layout.lines {
            if let Err(e) = self
                .ctx
                .fill_text(&line.text, line.pos.x as f64, line.pos.y as f64)
            {
                log::warn!("fill_text failed: {:?}", e);
            }
        }
    }
}
