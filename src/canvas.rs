use egui::{Pos2, Rect, Response, Sense, Ui, Vec2};

use crate::command::{CONTEXT_MENU, CanvasCommand};
use crate::renderer::{self, PainterSurface};
use crate::stroke::{Stroke, StrokeStyle};

/// Whether pointer movement is currently extending a stroke
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Pointer input as the canvas sees it, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
    Leave,
}

/// Translates raw egui events into canvas pointer events.
///
/// `inside` tracks whether the pointer was over `rect` after the previous
/// event and is updated in place. A press only counts when `accepts_press`
/// is set, i.e. nothing else (such as an open popup) covers the canvas.
pub fn pointer_events(
    events: &[egui::Event],
    rect: Rect,
    accepts_press: bool,
    inside: &mut bool,
) -> Vec<PointerEvent> {
    let to_local = |pos: Pos2| (pos - rect.min).to_pos2();
    let mut out = Vec::new();

    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                if !*pressed {
                    out.push(PointerEvent::Up);
                } else if accepts_press && rect.contains(*pos) {
                    *inside = true;
                    out.push(PointerEvent::Down(to_local(*pos)));
                }
            }
            egui::Event::PointerMoved(pos) => {
                if rect.contains(*pos) {
                    *inside = true;
                    out.push(PointerEvent::Move(to_local(*pos)));
                } else if *inside {
                    *inside = false;
                    out.push(PointerEvent::Leave);
                }
            }
            egui::Event::PointerGone => {
                if *inside {
                    *inside = false;
                    out.push(PointerEvent::Leave);
                }
            }
            _ => {}
        }
    }

    out
}

/// Freehand drawing surface holding every stroke of the session.
#[derive(Debug, Default)]
pub struct Canvas {
    strokes: Vec<Stroke>,
    state: CaptureState,
    size: Vec2,
    pointer_inside: bool,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn capture_state(&self) -> CaptureState {
        self.state
    }

    /// Logical size of the canvas as of the last layout
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Start a new empty stroke and begin capturing.
    pub fn begin_stroke(&mut self, style: StrokeStyle) {
        self.strokes.push(Stroke::new(style));
        self.state = CaptureState::Capturing;
        log::debug!(
            "Stroke {} started (width {}, color {:?})",
            self.strokes.len(),
            style.width,
            style.color
        );
    }

    /// Append `pos` to the active stroke. Returns true when a repaint is needed.
    pub fn extend_stroke(&mut self, pos: Pos2) -> bool {
        if self.state != CaptureState::Capturing {
            return false;
        }

        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.add_point(pos);
                true
            }
            None => false,
        }
    }

    pub fn end_stroke(&mut self) {
        if self.state == CaptureState::Capturing {
            if let Some(stroke) = self.strokes.last() {
                log::debug!("Stroke ended with {} points", stroke.points().len());
            }
        }
        self.state = CaptureState::Idle;
    }

    /// Apply one pointer event. Returns true when a repaint is needed.
    pub fn handle_event(&mut self, event: PointerEvent, style: StrokeStyle) -> bool {
        match event {
            PointerEvent::Down(_) => {
                self.begin_stroke(style);
                false
            }
            PointerEvent::Move(pos) => self.extend_stroke(pos),
            PointerEvent::Up | PointerEvent::Leave => {
                self.end_stroke();
                false
            }
        }
    }

    /// Drop every stroke.
    pub fn clear(&mut self) {
        log::info!("Clearing {} strokes", self.strokes.len());
        self.strokes.clear();
        self.state = CaptureState::Idle;
    }

    /// Lay out the canvas in the remaining space, feed it this frame's
    /// pointer input and paint it.
    ///
    /// Returns the context-menu command picked this frame, if any.
    pub fn show(&mut self, ui: &mut Ui, style: StrokeStyle) -> Option<CanvasCommand> {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        self.size = rect.size();

        let events = ui.input(|i| i.events.clone());
        let mut inside = self.pointer_inside;
        let pointer_events = pointer_events(&events, rect, response.hovered(), &mut inside);
        self.pointer_inside = inside;

        let mut needs_repaint = false;
        for event in pointer_events {
            needs_repaint |= self.handle_event(event, style);
        }
        if needs_repaint {
            ui.ctx().request_repaint();
        }

        renderer::replay(&mut PainterSurface::new(&painter, rect), &self.strokes);

        context_menu(&response)
    }
}

fn context_menu(response: &Response) -> Option<CanvasCommand> {
    let mut chosen = None;
    response.context_menu(|ui| {
        for entry in &CONTEXT_MENU {
            if ui.button(entry.label).clicked() {
                chosen = Some(entry.command);
                ui.close_menu();
            }
        }
    });
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    fn style() -> StrokeStyle {
        StrokeStyle::new(Color32::RED, 3)
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut canvas = Canvas::new();
        assert!(!canvas.handle_event(PointerEvent::Move(Pos2::new(1.0, 1.0)), style()));
        assert!(canvas.strokes().is_empty());
        assert_eq!(canvas.capture_state(), CaptureState::Idle);
    }

    #[test]
    fn test_down_starts_empty_stroke() {
        let mut canvas = Canvas::new();
        canvas.handle_event(PointerEvent::Down(Pos2::new(4.0, 4.0)), style());

        assert_eq!(canvas.capture_state(), CaptureState::Capturing);
        assert_eq!(canvas.strokes().len(), 1);
        assert!(canvas.strokes()[0].points().is_empty());
    }

    #[test]
    fn test_every_move_is_recorded() {
        let mut canvas = Canvas::new();
        canvas.begin_stroke(style());
        for _ in 0..25 {
            // Duplicate positions are kept too
            assert!(canvas.extend_stroke(Pos2::new(7.0, 7.0)));
        }
        assert_eq!(canvas.strokes()[0].points().len(), 25);
    }

    #[test]
    fn test_leave_ends_capture_without_new_stroke() {
        let mut canvas = Canvas::new();
        canvas.handle_event(PointerEvent::Down(Pos2::ZERO), style());
        canvas.handle_event(PointerEvent::Move(Pos2::new(1.0, 1.0)), style());
        canvas.handle_event(PointerEvent::Leave, style());
        canvas.handle_event(PointerEvent::Move(Pos2::new(2.0, 2.0)), style());

        assert_eq!(canvas.capture_state(), CaptureState::Idle);
        assert_eq!(canvas.strokes().len(), 1);
        assert_eq!(canvas.strokes()[0].points().len(), 1);
    }

    #[test]
    fn test_clear_resets_capture() {
        let mut canvas = Canvas::new();
        canvas.begin_stroke(style());
        canvas.clear();
        assert!(canvas.strokes().is_empty());
        assert!(!canvas.extend_stroke(Pos2::ZERO));
    }

    #[test]
    fn test_pointer_events_are_canvas_local() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(200.0, 200.0));
        let events = vec![
            egui::Event::PointerButton {
                pos: Pos2::new(110.0, 60.0),
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
            egui::Event::PointerMoved(Pos2::new(120.0, 65.0)),
            egui::Event::PointerMoved(Pos2::new(500.0, 65.0)),
        ];

        let mut inside = false;
        let out = pointer_events(&events, rect, true, &mut inside);

        assert_eq!(
            out,
            vec![
                PointerEvent::Down(Pos2::new(10.0, 10.0)),
                PointerEvent::Move(Pos2::new(20.0, 15.0)),
                PointerEvent::Leave,
            ]
        );
        assert!(!inside);
    }

    #[test]
    fn test_press_outside_or_covered_is_ignored() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(50.0, 50.0));
        let press = |pos| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        };

        let mut inside = false;
        assert!(pointer_events(&[press(Pos2::new(80.0, 10.0))], rect, true, &mut inside).is_empty());
        assert!(pointer_events(&[press(Pos2::new(10.0, 10.0))], rect, false, &mut inside).is_empty());
    }

    #[test]
    fn test_secondary_button_does_not_draw() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(50.0, 50.0));
        let events = vec![egui::Event::PointerButton {
            pos: Pos2::new(10.0, 10.0),
            button: egui::PointerButton::Secondary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        }];

        let mut inside = false;
        assert!(pointer_events(&events, rect, true, &mut inside).is_empty());
    }
}
