use crate::canvas::Canvas;
use crate::error::ExportResult;
use crate::export::{self, ExportOutcome, SavePathPicker};

/// Actions offered by the canvas context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasCommand {
    Clear,
    SaveAs,
}

impl CanvasCommand {
    /// Whether running the command alters what the canvas shows.
    pub fn changes_canvas(self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Everything a command needs besides the canvas itself
pub struct CommandContext<'a> {
    /// Content-scale factor applied when rasterizing
    pub pixels_per_point: f32,
    pub picker: &'a dyn SavePathPicker,
}

pub type CommandHandler = fn(&mut Canvas, &CommandContext<'_>) -> ExportResult<()>;

pub struct CommandEntry {
    pub command: CanvasCommand,
    pub label: &'static str,
    pub handler: CommandHandler,
}

/// Context-menu entries, in display order.
pub const CONTEXT_MENU: [CommandEntry; 2] = [
    CommandEntry {
        command: CanvasCommand::Clear,
        label: "Clear",
        handler: clear,
    },
    CommandEntry {
        command: CanvasCommand::SaveAs,
        label: "Save As...",
        handler: save_as,
    },
];

fn clear(canvas: &mut Canvas, _ctx: &CommandContext<'_>) -> ExportResult<()> {
    canvas.clear();
    Ok(())
}

fn save_as(canvas: &mut Canvas, ctx: &CommandContext<'_>) -> ExportResult<()> {
    let outcome =
        export::export_to_file(canvas.strokes(), canvas.size(), ctx.pixels_per_point, ctx.picker)?;
    if outcome == ExportOutcome::Cancelled {
        log::info!("Save As cancelled");
    }
    Ok(())
}

/// Run the handler registered for `command`.
pub fn dispatch(
    command: CanvasCommand,
    canvas: &mut Canvas,
    ctx: &CommandContext<'_>,
) -> ExportResult<()> {
    match CONTEXT_MENU.iter().find(|entry| entry.command == command) {
        Some(entry) => (entry.handler)(canvas, ctx),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::PathBuf;

    struct CountingPicker {
        calls: Cell<usize>,
    }

    impl SavePathPicker for CountingPicker {
        fn pick_save_path(&self) -> Option<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            None
        }
    }

    #[test]
    fn test_menu_labels() {
        let labels: Vec<&str> = CONTEXT_MENU.iter().map(|entry| entry.label).collect();
        assert_eq!(labels, vec!["Clear", "Save As..."]);
    }

    #[test]
    fn test_every_command_has_an_entry() {
        for command in [CanvasCommand::Clear, CanvasCommand::SaveAs] {
            assert!(CONTEXT_MENU.iter().any(|entry| entry.command == command));
        }
    }

    #[test]
    fn test_only_clear_changes_canvas() {
        assert!(CanvasCommand::Clear.changes_canvas());
        assert!(!CanvasCommand::SaveAs.changes_canvas());
    }

    #[test]
    fn test_save_as_asks_picker() {
        let picker = CountingPicker { calls: Cell::new(0) };
        let ctx = CommandContext {
            pixels_per_point: 1.0,
            picker: &picker,
        };

        let mut canvas = Canvas::new();
        dispatch(CanvasCommand::SaveAs, &mut canvas, &ctx).unwrap();
        assert_eq!(picker.calls.get(), 1);
    }
}
