use egui::Color32;

use crate::canvas::Canvas;
use crate::command::{self, CanvasCommand, CommandContext};
use crate::export::{FileDialogPicker, SavePathPicker};
use crate::palette::{self, Palette};
use crate::stroke::StrokeStyle;
use crate::swatch::{Swatch, SwatchKind};

const LIGHT_BACKGROUND: Color32 = Color32::from_rgb(0xf4, 0xf3, 0xf3);
const DARK_BACKGROUND: Color32 = Color32::from_rgb(0x2c, 0x28, 0x28);

/// Main window: the two swatch groups next to the drawing canvas.
#[derive(Debug)]
pub struct PaintApp {
    canvas: Canvas,
    colors: Palette<Color32>,
    pen_widths: Palette<u32>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(),
            colors: Palette::new(palette::COLORS.to_vec()),
            pen_widths: Palette::new(palette::pen_widths()),
        }
    }
}

impl PaintApp {
    /// Called once before the first frame. Every run starts with the first
    /// color and the thinnest pen selected.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn colors(&self) -> &Palette<Color32> {
        &self.colors
    }

    pub fn pen_widths(&self) -> &Palette<u32> {
        &self.pen_widths
    }

    /// Style the next stroke will be started with.
    pub fn current_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.colors.selected_value(), self.pen_widths.selected_value())
    }

    /// Returns true if the selection changed.
    pub fn select_color(&mut self, index: usize) -> bool {
        match self.colors.select(index) {
            Some(change) => {
                log::info!(
                    "Color swatch {} -> {} ({:?})",
                    change.previous,
                    change.current,
                    self.colors.selected_value()
                );
                true
            }
            None => false,
        }
    }

    /// Returns true if the selection changed.
    pub fn select_pen_width(&mut self, index: usize) -> bool {
        match self.pen_widths.select(index) {
            Some(change) => {
                log::info!(
                    "Pen width swatch {} -> {} (width {})",
                    change.previous,
                    change.current,
                    self.pen_widths.selected_value()
                );
                true
            }
            None => false,
        }
    }

    /// Run a canvas command, logging failures instead of propagating them.
    ///
    /// Returns true when the canvas content changed and needs another frame.
    pub fn run_command(
        &mut self,
        command: CanvasCommand,
        pixels_per_point: f32,
        picker: &dyn SavePathPicker,
    ) -> bool {
        log::info!("Running {command:?}");
        let ctx = CommandContext {
            pixels_per_point,
            picker,
        };

        if let Err(err) = command::dispatch(command, &mut self.canvas, &ctx) {
            log::error!("{command:?} failed: {err}");
        }

        command.changes_canvas()
    }

    fn menu_bar(ctx: &egui::Context) -> Option<CanvasCommand> {
        let mut chosen = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save As...").clicked() {
                        chosen = Some(CanvasCommand::SaveAs);
                        ui.close_menu();
                    }
                    if ui.button("Clear").clicked() {
                        chosen = Some(CanvasCommand::Clear);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        chosen
    }

    fn controls_panel(&mut self, ctx: &egui::Context) {
        let background = if ctx.style().visuals.dark_mode {
            DARK_BACKGROUND
        } else {
            LIGHT_BACKGROUND
        };

        egui::SidePanel::left("controls_panel")
            .resizable(true)
            .default_width(170.0)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(background))
            .show(ctx, |ui| {
                ui.label("Colors");
                let mut clicked = None;
                ui.horizontal_wrapped(|ui| {
                    for (i, color) in self.colors.entries().iter().enumerate() {
                        let swatch = Swatch::new(SwatchKind::ColorFill(*color), self.colors.is_selected(i));
                        if ui.add(swatch).clicked() {
                            clicked = Some(i);
                        }
                    }
                });
                if let Some(i) = clicked {
                    if self.select_color(i) {
                        ctx.request_repaint();
                    }
                }

                ui.add_space(8.0);
                ui.label("Pen width");
                let mut clicked = None;
                ui.horizontal_wrapped(|ui| {
                    for (i, width) in self.pen_widths.entries().iter().enumerate() {
                        let swatch = Swatch::new(SwatchKind::PenDot(*width), self.pen_widths.is_selected(i));
                        if ui.add(swatch).clicked() {
                            clicked = Some(i);
                        }
                    }
                });
                if let Some(i) = clicked {
                    if self.select_pen_width(i) {
                        ctx.request_repaint();
                    }
                }
            });
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut pending = Self::menu_bar(ctx);

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::S)) {
            pending = Some(CanvasCommand::SaveAs);
        }

        self.controls_panel(ctx);

        let style = self.current_style();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if let Some(command) = self.canvas.show(ui, style) {
                    pending = Some(command);
                }
            });

        if let Some(command) = pending {
            if self.run_command(command, ctx.pixels_per_point(), &FileDialogPicker) {
                ctx.request_repaint();
            }
        }
    }
}
