use egui::{Color32, Rect, Response, Sense, Shape, Ui, Vec2, Widget};

/// Edge length of a swatch, in points.
pub const SWATCH_SIZE: f32 = 45.0;
/// Gap between the swatch bounds and the selection outline.
pub const SELECTION_INSET: f32 = 1.0;
/// Gap between the selection outline and the content.
pub const CONTENT_INSET: f32 = 2.0;
pub const ROUNDNESS: f32 = 4.0;

/// What a swatch shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwatchKind {
    /// Flat fill in this color
    ColorFill(Color32),
    /// Black dot with this diameter on a white background
    PenDot(u32),
}

/// Shapes for one swatch occupying `rect`.
///
/// The pen dot is not clipped to the content rectangle.
pub fn swatch_shapes(rect: Rect, kind: SwatchKind, selected: bool, dark_mode: bool) -> Vec<Shape> {
    let selection_rect = rect.shrink(SELECTION_INSET);
    let content_rect = selection_rect.shrink(CONTENT_INSET);

    let mut shapes = match kind {
        SwatchKind::ColorFill(color) => vec![Shape::rect_filled(content_rect, ROUNDNESS, color)],
        SwatchKind::PenDot(width) => vec![
            Shape::rect_filled(content_rect, ROUNDNESS, Color32::WHITE),
            Shape::circle_filled(content_rect.center(), width as f32 / 2.0, Color32::BLACK),
        ],
    };

    if selected {
        let outline = if dark_mode {
            Color32::WHITE
        } else {
            Color32::BLACK
        };
        shapes.push(Shape::rect_stroke(
            selection_rect,
            ROUNDNESS,
            egui::Stroke::new(1.0, outline),
        ));
    }

    shapes
}

/// Fixed-size clickable square showing a color or a pen width.
///
/// Holds no selection state of its own; the caller says whether it is selected.
pub struct Swatch {
    kind: SwatchKind,
    selected: bool,
}

impl Swatch {
    pub fn new(kind: SwatchKind, selected: bool) -> Self {
        Self { kind, selected }
    }
}

impl Widget for Swatch {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::click());

        if ui.is_rect_visible(rect) {
            let dark_mode = ui.visuals().dark_mode;
            ui.painter()
                .extend(swatch_shapes(rect, self.kind, self.selected, dark_mode));
        }

        response
    }
}
