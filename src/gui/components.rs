use super::logging::LogEntry;
use super::models::{CardGridGui, CropperGui, LogPanelState};
use crate::core::params::{
    BLACKPOINT_RANGE, BRIGHTNESS_RANGE, CONTRAST_RANGE, GAMMA_RANGE, ParamRange,
    SATURATION_RANGE, WARMTH_RANGE,
};
use eframe::egui::{
    self, Align, Color32, DragValue, Frame, Grid, Layout, RichText, ScrollArea, TextEdit, Ui,
};
use std::path::Path;
use std::time::Duration;
use tracing::Level;

const COMPONENT_WIDTH: f32 = 180.0;
const THUMB_SIZE: egui::Vec2 = egui::Vec2::new(32.0, 44.0);

const ACCENT: Color32 = Color32::from_rgb(255, 165, 0);
const MUTED: Color32 = Color32::from_gray(120);

/// `file://` URI for the image loader. Windows separators become `/` and a
/// drive letter gets the extra leading slash.
pub fn file_uri(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    if normalized.starts_with('/') {
        format!("file://{}", normalized)
    } else {
        format!("file:///{}", normalized)
    }
}

fn hint(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(MUTED).size(11.0));
}

fn drag_row(ui: &mut Ui, label: &str, value: &mut f64, range: ParamRange, decimals: usize) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.add(
                DragValue::new(value)
                    .range(range.min..=range.max)
                    .speed(range.step)
                    .fixed_decimals(decimals),
            );
        });
    });
}

pub struct HeaderComponent;

impl HeaderComponent {
    pub fn render(ui: &mut Ui, app: &CardGridGui) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("CARDGRID")
                            .size(32.0)
                            .color(Color32::from_gray(220))
                            .strong(),
                    );
                    ui.label(
                        RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(10.0)
                            .color(Color32::WHITE),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("Background:");
                    let text = RichText::new(app.template_path.to_string_lossy());
                    if app.template.is_some() {
                        ui.label(text.color(ACCENT));
                    } else {
                        ui.label(text.color(Color32::from_rgb(255, 100, 100)))
                            .on_hover_text(app.template_error.as_deref().unwrap_or("not loaded"));
                    }
                });
            });
        });
    }
}

pub struct AdjustmentsComponent;

impl AdjustmentsComponent {
    pub fn render(ui: &mut Ui, app: &mut CardGridGui) {
        ui.heading("Card Adjustments");

        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.set_min_width(COMPONENT_WIDTH);
            let adj = &mut app.adjustments;

            drag_row(ui, "Saturation:", &mut adj.saturation, SATURATION_RANGE, 1);
            drag_row(ui, "Gamma:", &mut adj.gamma, GAMMA_RANGE, 1);
            drag_row(ui, "Brightness:", &mut adj.brightness, BRIGHTNESS_RANGE, 1);
            drag_row(ui, "Contrast:", &mut adj.contrast, CONTRAST_RANGE, 1);

            ui.horizontal(|ui| {
                ui.label("Black Point:");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.add(
                        DragValue::new(&mut adj.blackpoint)
                            .range(BLACKPOINT_RANGE.min as i32..=BLACKPOINT_RANGE.max as i32)
                            .speed(BLACKPOINT_RANGE.step),
                    );
                });
            });

            drag_row(ui, "Warmth:", &mut adj.warmth, WARMTH_RANGE, 2);

            ui.add_space(5.0);
            hint(
                ui,
                "Applied to every card in order: saturation, brightness, contrast, gamma, black point, warmth.",
            );

            ui.add_space(5.0);
            if ui.button("Reset Adjustments").clicked() {
                app.reset_adjustments();
                tracing::debug!("Adjustments reset to neutral");
            }
        });
    }
}

pub struct LayoutInfoComponent;

impl LayoutInfoComponent {
    pub fn render(ui: &mut Ui, app: &CardGridGui) {
        ui.heading("Page Layout");

        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.set_min_width(COMPONENT_WIDTH);
            ui.label(format!("Template: {}", app.layout.template));
            ui.label(format!("Cards per page: {}", app.layout.cards_per_page()));
            ui.label(format!("Bleed: {} px", app.layout.bleed_px));
            ui.label(format!("Resolution: {} DPI", app.dpi));

            let copies: usize = app.cards.iter().map(|row| row.copies().get() as usize).sum();
            let pages = copies.div_ceil(app.layout.cards_per_page().max(1));
            ui.add_space(5.0);
            ui.label(
                RichText::new(format!("{} card(s) → {} page(s)", copies, pages)).color(ACCENT),
            );
            if let Some(summary) = app.last_export_summary() {
                ui.add_space(5.0);
                hint(ui, &summary);
            }
        });
    }
}

pub struct ActionsComponent;

impl ActionsComponent {
    pub fn render(ui: &mut Ui, app: &mut CardGridGui) {
        ui.horizontal(|ui| {
            if ui.button("Add Cards").clicked() {
                app.add_cards();
            }
            if ui.button("Clear All").clicked() {
                app.clear_cards();
                tracing::info!("Card list cleared");
            }
            if ui.button("Generate Output").clicked() {
                app.generate_output();
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.checkbox(&mut app.show_thumbnails, "Thumbnails");
            });
        });
    }
}

pub struct CardListComponent;

impl CardListComponent {
    pub fn render(ui: &mut Ui, app: &mut CardGridGui) {
        ui.heading(format!("Cards ({})", app.cards.len()));

        let mut to_remove = None;
        ScrollArea::vertical()
            .id_salt("card_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if app.cards.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No cards added").color(MUTED));
                    });
                    return;
                }

                Grid::new("card_rows")
                    .striped(true)
                    .num_columns(if app.show_thumbnails { 4 } else { 3 })
                    .show(ui, |ui| {
                        for row in app.cards.iter_mut() {
                            if app.show_thumbnails {
                                ui.add(
                                    egui::Image::new(file_uri(&row.path)).fit_to_exact_size(THUMB_SIZE),
                                );
                            }
                            ui.label(row.file_name())
                                .on_hover_text(row.path.display().to_string());

                            ui.horizontal(|ui| {
                                ui.label("Copies:");
                                if ui.small_button("-").clicked() {
                                    row.step_copies(-1);
                                }
                                ui.add(TextEdit::singleline(&mut row.copies_text).desired_width(28.0));
                                if ui.small_button("+").clicked() {
                                    row.step_copies(1);
                                }
                            });

                            if ui.button("Remove").clicked() {
                                to_remove = Some(row.id);
                            }
                            ui.end_row();
                        }
                    });
            });

        if let Some(id) = to_remove {
            if let Some(row) = app.remove_card(id) {
                tracing::info!("Removed {}", row.file_name());
            }
        }
    }
}

pub struct CropperPanelComponent;

impl CropperPanelComponent {
    pub fn render(ui: &mut Ui, app: &mut CropperGui) {
        ui.heading("Card Border Cropper");

        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.label(format!(
                "Removes {:.1}% of the width and {:.1}% of the height, split evenly on both sides.",
                app.params.width_fraction * 100.0,
                app.params.height_fraction * 100.0
            ));
            hint(
                ui,
                "Results are written to a \"cropped\" folder next to the first selected image, keeping each file name.",
            );
            ui.add_space(10.0);
            if ui
                .button(RichText::new("Select Images").size(16.0).color(Color32::WHITE))
                .clicked()
            {
                app.select_and_crop();
            }
        });
    }
}

fn format_log_entry(entry: &LogEntry) -> RichText {
    if entry.message.starts_with("---") {
        return RichText::new(&entry.message).color(ACCENT).monospace().strong();
    }

    let color = match entry.level {
        Level::ERROR => Color32::from_rgb(255, 100, 100),
        Level::WARN => Color32::from_rgb(255, 200, 100),
        Level::INFO => Color32::from_rgb(100, 200, 255),
        Level::DEBUG => Color32::from_rgb(150, 150, 150),
        Level::TRACE => Color32::from_rgb(100, 100, 100),
    };

    RichText::new(format!(
        "[{}] {:<5} {}",
        entry.timestamp, entry.level, entry.message
    ))
    .color(color)
    .monospace()
}

pub struct LogPanelComponent;

impl LogPanelComponent {
    pub fn render(ui: &mut Ui, logs: &mut LogPanelState) {
        ui.horizontal(|ui| {
            ui.label("Log Output");

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.selectable_value(&mut logs.min_log_level, Level::ERROR, "ERROR");
                ui.selectable_value(&mut logs.min_log_level, Level::WARN, "WARN");
                ui.selectable_value(&mut logs.min_log_level, Level::INFO, "INFO");
                ui.selectable_value(&mut logs.min_log_level, Level::DEBUG, "DEBUG");
                ui.selectable_value(&mut logs.min_log_level, Level::TRACE, "ALL");
            });
        });

        ui.add_space(5.0);

        ScrollArea::vertical()
            .id_salt("log_panel")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                let Ok(entries) = logs.log_messages.lock() else {
                    return;
                };
                if entries.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No log messages").color(MUTED));
                    });
                    return;
                }
                for entry in entries.iter().filter(|e| logs.is_visible(e)) {
                    ui.label(format_log_entry(entry));
                }
            });
    }
}

pub struct FooterComponent;

impl FooterComponent {
    pub fn render(
        ui: &mut Ui,
        title: &str,
        status: &str,
        last_run: Option<Duration>,
        logs: &LogPanelState,
    ) {
        ui.horizontal(|ui| {
            let timing_text = match last_run {
                Some(d) => format!("{} | Last run: {:.2?}", status, d),
                None => status.to_string(),
            };
            ui.label(
                RichText::new(timing_text)
                    .color(Color32::from_rgb(100, 200, 100))
                    .size(14.0),
            );

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Save Logs").clicked() {
                    if let Err(e) = logs.save_logs_to_file(title) {
                        tracing::error!("Failed to save logs: {}", e);
                    }
                }
                if ui.button("Clear").clicked() {
                    logs.clear();
                }
            });
        });
    }
}
