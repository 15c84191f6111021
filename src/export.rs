use std::path::{Path, PathBuf};

use egui::{Color32, Pos2, Vec2};
use image::RgbaImage;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use crate::error::{ExportError, ExportResult};
use crate::renderer::{self, StrokeSurface};
use crate::stroke::Stroke;

/// What happened when the user asked to save the drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// Asks the user where the PNG should go.
pub trait SavePathPicker {
    /// Returns `None` when the user dismissed the choice.
    fn pick_save_path(&self) -> Option<PathBuf>;
}

/// Native "Save drawing" dialog.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDialogPicker;

impl SavePathPicker for FileDialogPicker {
    fn pick_save_path(&self) -> Option<PathBuf> {
        let dialog = rfd::AsyncFileDialog::new()
            .set_title("Save drawing")
            .add_filter("PNG files", &["png"])
            .set_file_name("drawing.png")
            .save_file();

        futures::executor::block_on(dialog).map(|file| with_png_extension(file.path().to_path_buf()))
    }
}

/// Append `.png` when the chosen name has no extension.
pub fn with_png_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("png");
    }
    path
}

/// Pixel dimensions of the exported raster: logical size times the content-scale factor.
pub fn export_pixel_size(size: Vec2, pixels_per_point: f32) -> [u32; 2] {
    let to_pixels = |points: f32| (points * pixels_per_point).round().max(0.0) as u32;
    [to_pixels(size.x), to_pixels(size.y)]
}

/// Offscreen raster that strokes are replayed onto in logical coordinates.
struct RasterSurface {
    pixmap: Pixmap,
    transform: Transform,
}

impl RasterSurface {
    fn new(width: u32, height: u32, pixels_per_point: f32) -> ExportResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(ExportError::SurfaceUnavailable { width, height })?;

        Ok(Self {
            pixmap,
            transform: Transform::from_scale(pixels_per_point, pixels_per_point),
        })
    }

    fn into_image(self) -> ExportResult<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();

        RgbaImage::from_raw(width, height, data)
            .ok_or(ExportError::SurfaceUnavailable { width, height })
    }
}

fn skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

impl StrokeSurface for RasterSurface {
    fn clear(&mut self, color: Color32) {
        self.pixmap.fill(skia_color(color));
    }

    fn polyline(&mut self, points: &[Pos2], color: Color32, width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;

        let stroke = tiny_skia::Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform, None);
    }
}

/// Replay `strokes` into an offscreen image sized `size * pixels_per_point`.
pub fn rasterize(strokes: &[Stroke], size: Vec2, pixels_per_point: f32) -> ExportResult<RgbaImage> {
    let [width, height] = export_pixel_size(size, pixels_per_point);
    let mut surface = RasterSurface::new(width, height, pixels_per_point)?;

    renderer::replay(&mut surface, strokes);

    surface.into_image()
}

/// Write the raster as a PNG file.
pub fn write_png(image: &RgbaImage, path: &Path) -> ExportResult<()> {
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Ask for a destination, then rasterize and save.
///
/// A dismissed dialog returns `ExportOutcome::Cancelled` before anything is rendered.
pub fn export_to_file(
    strokes: &[Stroke],
    size: Vec2,
    pixels_per_point: f32,
    picker: &dyn SavePathPicker,
) -> ExportResult<ExportOutcome> {
    let Some(path) = picker.pick_save_path() else {
        log::debug!("Save dialog dismissed");
        return Ok(ExportOutcome::Cancelled);
    };

    let image = rasterize(strokes, size, pixels_per_point)?;
    write_png(&image, &path)?;

    log::info!(
        "Saved {}x{} drawing to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(ExportOutcome::Saved(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeStyle;

    #[test]
    fn test_pixel_size_scales() {
        assert_eq!(export_pixel_size(Vec2::new(100.0, 50.0), 1.0), [100, 50]);
        assert_eq!(export_pixel_size(Vec2::new(100.0, 50.0), 2.0), [200, 100]);
        assert_eq!(export_pixel_size(Vec2::new(33.0, 10.0), 1.5), [50, 15]);
    }

    #[test]
    fn test_empty_canvas_has_no_surface() {
        let result = rasterize(&[], Vec2::ZERO, 1.0);
        assert!(matches!(
            result,
            Err(ExportError::SurfaceUnavailable { width: 0, height: 0 })
        ));
    }

    #[test]
    fn test_png_extension_added() {
        assert_eq!(
            with_png_extension(PathBuf::from("/tmp/sketch")),
            PathBuf::from("/tmp/sketch.png")
        );
        assert_eq!(
            with_png_extension(PathBuf::from("/tmp/sketch.PNG")),
            PathBuf::from("/tmp/sketch.PNG")
        );
    }

    #[test]
    fn test_single_point_stroke_leaves_background() {
        let stroke = Stroke::with_points(
            StrokeStyle::new(Color32::RED, 9),
            vec![Pos2::new(5.0, 5.0)],
        );
        let image = rasterize(&[stroke], Vec2::new(10.0, 10.0), 1.0).unwrap();
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
