use egui::{Color32, Pos2};

/// Color and pen width a new stroke is started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: u32,
}

impl StrokeStyle {
    pub fn new(color: Color32, width: u32) -> Self {
        Self {
            color,
            width: width.max(1),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color32::BLACK, 1)
    }
}

/// One continuous pointer drag, rendered as a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    width: u32,
}

impl Stroke {
    /// Create an empty stroke with the given style
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            points: Vec::new(),
            color: style.color,
            width: style.width,
        }
    }

    /// Create a stroke from already recorded points
    pub fn with_points(style: StrokeStyle, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color: style.color,
            width: style.width,
        }
    }

    pub(crate) fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// A line needs at least two points; shorter strokes stay in the list but draw nothing.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}
