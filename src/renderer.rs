use egui::{Color32, Painter, Pos2, Rect, Shape, Vec2};

use crate::stroke::Stroke;

/// Color the canvas is cleared to before strokes are replayed.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Something strokes can be replayed onto: the live painter or an offscreen raster.
pub trait StrokeSurface {
    /// Fill the whole surface with a flat color
    fn clear(&mut self, color: Color32);

    /// Draw a connected line through `points`, in canvas-local coordinates
    fn polyline(&mut self, points: &[Pos2], color: Color32, width: f32);
}

/// Clear the surface and draw every renderable stroke in list order.
///
/// Later strokes overdraw earlier ones. Strokes with fewer than two points
/// are skipped.
pub fn replay<S: StrokeSurface + ?Sized>(surface: &mut S, strokes: &[Stroke]) {
    surface.clear(BACKGROUND);

    for stroke in strokes.iter().filter(|stroke| stroke.is_renderable()) {
        surface.polyline(stroke.points(), stroke.color(), stroke.width() as f32);
    }
}

/// Replays onto an egui painter, offsetting canvas-local points into `rect`.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn offset(&self) -> Vec2 {
        self.rect.min.to_vec2()
    }
}

impl StrokeSurface for PainterSurface<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn polyline(&mut self, points: &[Pos2], color: Color32, width: f32) {
        let offset = self.offset();
        let points = points.iter().map(|p| *p + offset).collect();
        self.painter
            .add(Shape::line(points, egui::Stroke::new(width, color)));
    }
}
