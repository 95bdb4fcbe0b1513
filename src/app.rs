//! The Scribble window: menu bar, training row, pen dialogs, and the
//! save/discard confirmation gate in front of destructive actions.

use std::path::PathBuf;

use eframe::egui;
use image::ImageFormat;
use log::warn;

use crate::canvas::{Canvas, MAX_PEN_WIDTH, MIN_PEN_WIDTH};
use crate::command::{menu_bar, Command, Menu, MenuItem};
use crate::dialogs::{Dialogs, DiscardChoice};
use crate::model::DigitModel;
use crate::strings;

const INITIAL_CANVAS: (u32, u32) = (640, 480);
const TRAINING_WIDGET_WIDTH: f32 = 100.0;

/// Modal pen-settings dialogs (Options menu). The working value only
/// reaches the canvas when the user confirms.
#[derive(Clone, Copy)]
enum PenDialog {
    Color { working: egui::Color32 },
    Width { working: u32 },
}

pub struct ScribbleApp {
    canvas: Canvas,
    dialogs: Box<dyn Dialogs>,
    menus: Vec<Menu>,
    work_dir: PathBuf,

    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
    label_input: String,
    pen_dialog: Option<PenDialog>,
    last_stroke_point: Option<(i32, i32)>,
    close_confirmed: bool,
}

impl ScribbleApp {
    pub fn new(model: Box<dyn DigitModel>, dialogs: Box<dyn Dialogs>) -> Self {
        let mut canvas = Canvas::new(INITIAL_CANVAS.0, INITIAL_CANVAS.1);
        canvas.set_model(model);
        Self {
            canvas,
            dialogs,
            menus: menu_bar(),
            work_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            texture: None,
            texture_dirty: true,
            label_input: String::new(),
            pen_dialog: None,
            last_stroke_point: None,
            close_confirmed: false,
        }
    }

    // ── Controller operations ───────────────────────────────────────────

    /// Forward the labeled drawing to the model. Empty input is an
    /// explicit no-op; the field is cleared either way.
    fn train(&mut self) {
        let parsed = self.label_input.parse::<u8>();
        self.label_input.clear();
        let Ok(label) = parsed else {
            return;
        };
        self.canvas.train_on_written_char(label);
        self.texture_dirty = true;
    }

    fn open(&mut self) {
        if !self.confirm_discard() {
            return;
        }
        let Some(path) = self.dialogs.pick_open_path(&self.work_dir) else {
            return;
        };
        match self.canvas.open_image(&path) {
            Ok(()) => self.texture_dirty = true,
            Err(err) => warn!("could not open {}: {err}", path.display()),
        }
    }

    fn save_as(&mut self, format: ImageFormat) {
        let _ = self.save_file(format);
    }

    /// Save dialog plus export. False when the user cancels the dialog or
    /// the encode fails.
    fn save_file(&mut self, format: ImageFormat) -> bool {
        let Some(path) = self.dialogs.pick_save_path(&self.work_dir, format) else {
            return false;
        };
        match self.canvas.save_image(&path, format) {
            Ok(()) => true,
            Err(err) => {
                warn!("could not save {}: {err}", path.display());
                false
            }
        }
    }

    /// Gate in front of destructive actions. True means the caller may
    /// proceed (nothing to lose, saved, or explicitly discarded).
    fn confirm_discard(&mut self) -> bool {
        if !self.canvas.is_modified() {
            return true;
        }
        match self.dialogs.confirm_unsaved() {
            DiscardChoice::Save => self.save_file(ImageFormat::Png),
            DiscardChoice::Discard => true,
            DiscardChoice::Cancel => false,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::Open => self.open(),
            Command::SaveAs(format) => self.save_as(format),
            Command::Print => self.canvas.print(),
            Command::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Command::PenColor => {
                self.pen_dialog = Some(PenDialog::Color {
                    working: to_color32(self.canvas.pen_color()),
                });
            }
            Command::PenWidth => {
                self.pen_dialog = Some(PenDialog::Width {
                    working: self.canvas.pen_width(),
                });
            }
            Command::ClearScreen => {
                self.canvas.clear_image();
                self.texture_dirty = true;
            }
            Command::About => {
                self.dialogs
                    .show_message(strings::ABOUT_TITLE, strings::ABOUT_TEXT);
            }
            Command::AboutEgui => {
                self.dialogs
                    .show_message(strings::ABOUT_EGUI_TITLE, strings::ABOUT_EGUI_TEXT);
            }
        }
    }

    // ── UI ──────────────────────────────────────────────────────────────

    fn menu_ui(&self, ui: &mut egui::Ui, pending: &mut Vec<Command>) {
        egui::menu::bar(ui, |ui| {
            for menu in &self.menus {
                ui.menu_button(menu.title, |ui| {
                    for item in &menu.items {
                        match item {
                            MenuItem::Entry(entry) => {
                                let mut button = egui::Button::new(&entry.label);
                                if let Some(shortcut) = &entry.shortcut {
                                    button =
                                        button.shortcut_text(ui.ctx().format_shortcut(shortcut));
                                }
                                if ui.add(button).clicked() {
                                    pending.push(entry.command);
                                    ui.close_menu();
                                }
                            }
                            MenuItem::SaveAsSubmenu(entries) => {
                                ui.menu_button(strings::MENU_SAVE_AS, |ui| {
                                    for entry in entries {
                                        if ui.button(&entry.label).clicked() {
                                            pending.push(entry.command);
                                            ui.close_menu();
                                        }
                                    }
                                });
                            }
                            MenuItem::Separator => {
                                ui.separator();
                            }
                        }
                    }
                });
            }
        });
    }

    fn training_row_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let pad = (ui.available_width() - 2.0 * TRAINING_WIDGET_WIDTH - 8.0) * 0.5;
            ui.add_space(pad.max(0.0));

            let edit = ui.add(
                egui::TextEdit::singleline(&mut self.label_input)
                    .desired_width(TRAINING_WIDGET_WIDTH)
                    .hint_text(strings::LABEL_HINT),
            );
            if edit.changed() {
                sanitize_label_input(&mut self.label_input);
            }

            let retrain = egui::Button::new(
                egui::RichText::new(strings::RETRAIN_BUTTON).color(egui::Color32::WHITE),
            )
            .fill(egui::Color32::from_rgb(190, 40, 40));
            let submitted = ui
                .add_sized([TRAINING_WIDGET_WIDTH, ui.available_height()], retrain)
                .clicked()
                || (edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
            if submitted {
                self.train();
            }
        });
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        if self
            .canvas
            .ensure_size(rect.width() as u32, rect.height() as u32)
        {
            self.texture_dirty = true;
        }

        if self.texture_dirty || self.texture.is_none() {
            let color_image = self.canvas.to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(color_image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "canvas",
                        color_image,
                        egui::TextureOptions::NEAREST,
                    ));
                }
            }
            self.texture_dirty = false;
        }

        if let Some(texture) = &self.texture {
            let size = egui::vec2(self.canvas.width() as f32, self.canvas.height() as f32);
            painter.image(
                texture.id(),
                egui::Rect::from_min_size(rect.min, size),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        if !self.canvas_input_enabled() {
            self.last_stroke_point = None;
            return;
        }

        let to_canvas =
            |pos: egui::Pos2| ((pos.x - rect.min.x) as i32, (pos.y - rect.min.y) as i32);

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let point = to_canvas(pos);
                self.canvas.draw_line(point, point);
                self.texture_dirty = true;
            }
        }
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.last_stroke_point = Some(to_canvas(pos));
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let (Some(last), Some(pos)) =
                (self.last_stroke_point, response.interact_pointer_pos())
            {
                let point = to_canvas(pos);
                self.canvas.draw_line(last, point);
                self.last_stroke_point = Some(point);
                self.texture_dirty = true;
            }
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            self.last_stroke_point = None;
        }
    }

    /// While a pen dialog is up the rest of the window is inert, like the
    /// blocking Qt dialogs it replaces.
    fn canvas_input_enabled(&self) -> bool {
        self.pen_dialog.is_none()
    }

    fn pen_dialog_ui(&mut self, ctx: &egui::Context) {
        let Some(mut dialog) = self.pen_dialog else {
            return;
        };
        let mut apply = false;
        let mut close = false;

        let title = match dialog {
            PenDialog::Color { .. } => strings::PEN_COLOR_TITLE,
            PenDialog::Width { .. } => strings::PEN_WIDTH_TITLE,
        };
        let modal = egui::Modal::new(egui::Id::new("pen_dialog")).show(ctx, |ui| {
            ui.heading(title);
            ui.add_space(8.0);
            match &mut dialog {
                PenDialog::Color { working } => {
                    egui::color_picker::color_picker_color32(
                        ui,
                        working,
                        egui::color_picker::Alpha::Opaque,
                    );
                }
                PenDialog::Width { working } => {
                    ui.label(strings::PEN_WIDTH_PROMPT);
                    ui.add(egui::Slider::new(
                        working,
                        MIN_PEN_WIDTH..=MAX_PEN_WIDTH,
                    ));
                }
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(strings::OK).clicked() {
                    apply = true;
                    close = true;
                }
                if ui.button(strings::CANCEL).clicked() {
                    close = true;
                }
            });
        });
        // Click outside or Esc cancels, same as the Cancel button.
        if modal.should_close() {
            close = true;
        }

        if apply {
            match dialog {
                PenDialog::Color { working } => self.canvas.set_pen_color(from_color32(working)),
                PenDialog::Width { working } => self.canvas.set_pen_width(working),
            }
        }
        self.pen_dialog = if close { None } else { Some(dialog) };
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) || self.close_confirmed {
            return;
        }
        if self.confirm_discard() {
            self.close_confirmed = true;
        } else {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }
    }
}

impl eframe::App for ScribbleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut pending: Vec<Command> = Vec::new();

        if self.canvas_input_enabled() {
            ctx.input_mut(|input| {
                for menu in &self.menus {
                    for item in &menu.items {
                        if let MenuItem::Entry(entry) = item {
                            if let Some(shortcut) = &entry.shortcut {
                                if input.consume_shortcut(shortcut) {
                                    pending.push(entry.command);
                                }
                            }
                        }
                    }
                }
            });
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            self.menu_ui(ui, &mut pending);
        });
        egui::TopBottomPanel::bottom("training").show(ctx, |ui| {
            self.training_row_ui(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_ui(ui);
        });

        self.pen_dialog_ui(ctx);

        for command in pending {
            self.dispatch(ctx, command);
        }

        self.handle_close_request(ctx);
    }
}

/// Keep at most one ASCII digit in the label field; everything else is
/// rejected as it is typed.
fn sanitize_label_input(buf: &mut String) {
    buf.retain(|c| c.is_ascii_digit());
    buf.truncate(1);
}

fn to_color32(c: image::Rgba<u8>) -> egui::Color32 {
    egui::Color32::from_rgb(c[0], c[1], c[2])
}

fn from_color32(c: egui::Color32) -> image::Rgba<u8> {
    image::Rgba([c.r(), c.g(), c.b(), 255])
}
