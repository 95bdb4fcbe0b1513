//! The drawing surface: a white RGBA bitmap, pen settings, the modified
//! flag, and the hand-off of finished drawings to the digit model.

use std::path::Path;

use eframe::egui;
use image::{imageops, ImageBuffer, ImageFormat, Rgba, RgbaImage};
use log::{debug, info, warn};

use crate::model::{DigitModel, DigitSample, SAMPLE_SIDE};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DEFAULT_PEN_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);
const DEFAULT_PEN_WIDTH: u32 = 3;

pub const MIN_PEN_WIDTH: u32 = 1;
pub const MAX_PEN_WIDTH: u32 = 50;

pub struct Canvas {
    image: RgbaImage,
    pen_color: Rgba<u8>,
    pen_width: u32,
    modified: bool,
    model: Option<Box<dyn DigitModel>>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::from_pixel(width, height, WHITE),
            pen_color: DEFAULT_PEN_COLOR,
            pen_width: DEFAULT_PEN_WIDTH,
            modified: false,
            model: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn pen_color(&self) -> Rgba<u8> {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, color: Rgba<u8>) {
        self.pen_color = color;
    }

    pub fn pen_width(&self) -> u32 {
        self.pen_width
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.pen_width = width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH);
    }

    pub fn set_model(&mut self, model: Box<dyn DigitModel>) {
        self.model = Some(model);
    }

    /// Grow the canvas to at least the given size, keeping existing pixels.
    /// Shrink requests are ignored so strokes never get cropped.
    /// Returns true when the bitmap was reallocated.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if width <= self.width() && height <= self.height() {
            return false;
        }
        let new_width = width.max(self.width());
        let new_height = height.max(self.height());
        let mut grown = ImageBuffer::from_pixel(new_width, new_height, WHITE);
        imageops::overlay(&mut grown, &self.image, 0, 0);
        self.image = grown;
        true
    }

    /// Freehand stroke segment: Bresenham between the two points, stamping
    /// a filled circle of the pen radius at every step.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32)) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.stamp(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x == x1 {
                    break;
                }
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                if y == y1 {
                    break;
                }
                err += dx;
                y += sy;
            }
        }
        self.modified = true;
    }

    fn stamp(&mut self, cx: i32, cy: i32) {
        let radius = (self.pen_width / 2) as i32;
        let color = self.pen_color;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Replace the drawing with the decoded file, placed at the top-left
    /// over white. Clears the modified flag.
    pub fn open_image(&mut self, path: &Path) -> image::ImageResult<()> {
        let loaded = image::open(path)?.to_rgba8();
        let width = loaded.width().max(self.width());
        let height = loaded.height().max(self.height());
        let mut replaced = ImageBuffer::from_pixel(width, height, WHITE);
        imageops::overlay(&mut replaced, &loaded, 0, 0);
        self.image = replaced;
        self.modified = false;
        info!("opened {}", path.display());
        Ok(())
    }

    /// Encode the drawing in the given format. Clears the modified flag on
    /// success.
    pub fn save_image(&mut self, path: &Path, format: ImageFormat) -> image::ImageResult<()> {
        self.image.save_with_format(path, format)?;
        self.modified = false;
        info!("saved {}", path.display());
        Ok(())
    }

    pub fn clear_image(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = WHITE;
        }
        self.modified = true;
    }

    /// Spool the drawing to the system print command via a temporary PNG.
    /// Failures are logged and otherwise ignored.
    pub fn print(&self) {
        let path = std::env::temp_dir().join(format!("scribble-print-{}.png", std::process::id()));
        if let Err(err) = self.image.save_with_format(&path, ImageFormat::Png) {
            warn!("could not spool print job: {err}");
            return;
        }
        match std::process::Command::new("lpr").arg(&path).status() {
            Ok(status) if status.success() => info!("sent print job"),
            Ok(status) => warn!("print command exited with {status}"),
            Err(err) => warn!("could not run print command: {err}"),
        }
        let _ = std::fs::remove_file(&path);
    }

    /// Downsample the drawing to a labeled sample, feed it to the model,
    /// and clear the canvas for the next digit.
    pub fn train_on_written_char(&mut self, label: u8) {
        let Some(model) = self.model.as_mut() else {
            warn!("no model attached, dropping labeled drawing");
            return;
        };
        let luma = imageops::grayscale(&self.image);
        let small = imageops::resize(
            &luma,
            SAMPLE_SIDE,
            SAMPLE_SIDE,
            imageops::FilterType::Triangle,
        );
        // MNIST convention: ink is high, background is low.
        let pixels: Vec<u8> = small.pixels().map(|p| 255 - p.0[0]).collect();
        debug!("training on written digit {label}");
        model.train(DigitSample { label, pixels });
        self.clear_image();
    }

    /// Texture upload data for the GUI.
    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        let samples = self.image.as_flat_samples();
        egui::ColorImage::from_rgba_unmultiplied(size, samples.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CapturingModel(Rc<RefCell<Vec<DigitSample>>>);

    impl DigitModel for CapturingModel {
        fn train(&mut self, sample: DigitSample) {
            self.0.borrow_mut().push(sample);
        }
    }

    #[test]
    fn fresh_canvas_is_white_and_unmodified() {
        let canvas = Canvas::new(64, 64);
        assert!(!canvas.is_modified());
        assert_eq!(*canvas.image.get_pixel(10, 10), WHITE);
    }

    #[test]
    fn drawing_marks_modified_and_paints_pen_color() {
        let mut canvas = Canvas::new(64, 64);
        canvas.draw_line((10, 10), (20, 10));
        assert!(canvas.is_modified());
        assert_eq!(*canvas.image.get_pixel(15, 10), DEFAULT_PEN_COLOR);
    }

    #[test]
    fn strokes_outside_the_bitmap_are_clipped() {
        let mut canvas = Canvas::new(32, 32);
        canvas.draw_line((-10, -10), (100, 100));
        assert!(canvas.is_modified());
    }

    #[test]
    fn grow_preserves_pixels_and_shrink_is_ignored() {
        let mut canvas = Canvas::new(32, 32);
        canvas.draw_line((5, 5), (5, 5));
        let inked = *canvas.image.get_pixel(5, 5);

        assert!(canvas.ensure_size(64, 48));
        assert_eq!(canvas.width(), 64);
        assert_eq!(canvas.height(), 48);
        assert_eq!(*canvas.image.get_pixel(5, 5), inked);
        assert_eq!(*canvas.image.get_pixel(60, 40), WHITE);

        assert!(!canvas.ensure_size(16, 16));
        assert_eq!(canvas.width(), 64);
    }

    #[test]
    fn clear_whitens_and_marks_modified() {
        let mut canvas = Canvas::new(32, 32);
        canvas.draw_line((4, 4), (10, 10));
        canvas.clear_image();
        assert!(canvas.is_modified());
        assert_eq!(*canvas.image.get_pixel(7, 7), WHITE);
    }

    #[test]
    fn pen_width_is_clamped() {
        let mut canvas = Canvas::new(8, 8);
        canvas.set_pen_width(0);
        assert_eq!(canvas.pen_width(), MIN_PEN_WIDTH);
        canvas.set_pen_width(200);
        assert_eq!(canvas.pen_width(), MAX_PEN_WIDTH);
    }

    #[test]
    fn training_produces_mnist_shaped_sample_and_clears() {
        let samples = Rc::new(RefCell::new(Vec::new()));
        let mut canvas = Canvas::new(128, 128);
        canvas.set_model(Box::new(CapturingModel(Rc::clone(&samples))));

        // Wide stroke so the ink survives the 28×28 downsample.
        canvas.set_pen_width(20);
        canvas.draw_line((20, 20), (100, 100));
        canvas.train_on_written_char(7);

        let samples = samples.borrow();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].label, 7);
        assert_eq!(samples[0].pixels.len(), (SAMPLE_SIDE * SAMPLE_SIDE) as usize);
        // Ink must survive the downsample, background must stay low.
        assert!(samples[0].pixels.iter().any(|&p| p > 128));
        assert!(samples[0].pixels.iter().any(|&p| p < 32));
        // Canvas is reset for the next digit.
        assert_eq!(*canvas.image.get_pixel(60, 60), WHITE);
    }

    #[test]
    fn training_without_a_model_leaves_the_drawing_alone() {
        let mut canvas = Canvas::new(64, 64);
        canvas.draw_line((10, 10), (30, 30));
        canvas.train_on_written_char(5);
        assert_ne!(*canvas.image.get_pixel(20, 20), WHITE);
    }

    #[test]
    fn save_then_open_round_trips_and_clears_modified() {
        let path = std::env::temp_dir().join(format!(
            "scribble-canvas-{}.png",
            std::process::id()
        ));
        let mut canvas = Canvas::new(48, 48);
        canvas.draw_line((8, 8), (40, 8));
        canvas.save_image(&path, ImageFormat::Png).unwrap();
        assert!(!canvas.is_modified());

        let mut reopened = Canvas::new(48, 48);
        reopened.draw_line((0, 0), (1, 1));
        reopened.open_image(&path).unwrap();
        assert!(!reopened.is_modified());
        assert_eq!(*reopened.image.get_pixel(20, 8), DEFAULT_PEN_COLOR);

        let _ = std::fs::remove_file(&path);
    }
}
