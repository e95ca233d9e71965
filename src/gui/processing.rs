use super::logging::LogEntry;
use super::models::{CardGridGui, CropperGui};
use crate::api::{self, ExportReport};
use crate::types::ImageKind;
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// GUI-specific errors
#[derive(Debug, Error)]
pub enum GuiError {
    #[error("Background image not loaded ({reason}). Check {path:?} and restart.")]
    TemplateMissing { path: PathBuf, reason: String },

    #[error(transparent)]
    Pipeline(#[from] crate::Error),
}

impl GuiError {
    fn title(&self) -> &'static str {
        match self {
            GuiError::TemplateMissing { .. } => "Template Missing",
            GuiError::Pipeline(crate::Error::NoCards | crate::Error::NoCopies) => "Nothing to Export",
            GuiError::Pipeline(_) => "Error",
        }
    }
}

pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn show_warning(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn show_info(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Append `.pdf` unless the chosen name already ends with it.
pub fn with_pdf_extension(path: PathBuf) -> PathBuf {
    let has_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if has_pdf {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".pdf");
        PathBuf::from(name)
    }
}

pub fn export_summary(report: &ExportReport) -> String {
    let mut msg = format!(
        "Exported {}-page PDF successfully!\n{} card(s) placed.\n\n{}",
        report.pages,
        report.copies,
        report.output.display()
    );
    if !report.skipped.is_empty() {
        msg.push_str(&format!(
            "\n\nSkipped {} unreadable file(s):",
            report.skipped.len()
        ));
        for path in &report.skipped {
            msg.push_str(&format!("\n  {}", path.display()));
        }
    }
    msg
}

impl CropperGui {
    pub fn select_and_crop(&mut self) {
        let extensions = ImageKind::filter_extensions(ImageKind::CROP_INPUTS);
        let selected = rfd::FileDialog::new()
            .set_title("Select card images to crop")
            .add_filter("Image files", extensions.as_slice())
            .pick_files()
            .unwrap_or_default();

        if selected.is_empty() {
            warn!("No images selected");
            show_warning("No Selection", "No images selected.");
            return;
        }

        self.logs.push(LogEntry::separator("crop"));
        let start = Instant::now();
        let result = api::crop_files(&selected, &self.params);
        let elapsed = start.elapsed();
        self.last_run_duration = Some(elapsed);

        match result {
            Ok(report) => {
                info!("Cropping finished in {:.2?}", elapsed);
                self.status_message = format!(
                    "Processed: {}, Errors: {}",
                    report.processed(),
                    report.errors()
                );
                let mut msg = format!(
                    "Cropped images saved in:\n{}",
                    report.output_dir.display()
                );
                if report.errors() > 0 {
                    msg.push_str(&format!(
                        "\n\n{} file(s) could not be processed. See the log for details.",
                        report.errors()
                    ));
                }
                show_info("Done", &msg);
            }
            Err(e) => {
                error!("Cropping aborted: {}", e);
                self.status_message = "Failed".to_string();
                show_error("Error", &e.to_string());
            }
        }
    }
}

impl CardGridGui {
    pub fn add_cards(&mut self) {
        let extensions = ImageKind::filter_extensions(ImageKind::CARD_INPUTS);
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Select card images")
            .add_filter("Image files", extensions.as_slice())
            .pick_files()
        else {
            debug!("Card selection cancelled");
            return;
        };
        for path in paths {
            debug!("Added card {:?}", path);
            self.push_card(path);
        }
        info!("{} card(s) in list", self.cards.len());
    }

    /// Surface the startup template failure once the window is up.
    pub fn show_pending_startup_error(&mut self) {
        if let Some(reason) = self.pending_startup_error.take() {
            show_error(
                "Template Missing",
                &format!("Failed to load background image:\n{}", reason),
            );
        }
    }

    /// Run one export. `Ok(None)` means the user cancelled the save dialog.
    pub fn run_generation(&self) -> Result<Option<ExportReport>, GuiError> {
        let Some(template) = &self.template else {
            return Err(GuiError::TemplateMissing {
                path: self.template_path.clone(),
                reason: self
                    .template_error
                    .clone()
                    .unwrap_or_else(|| "not loaded".to_string()),
            });
        };

        let request = self.generation_request();
        let copies = request.expanded()?;
        info!(
            "Generating {} card(s) from {} file(s)",
            copies.len(),
            request.cards.len()
        );

        let Some(chosen) = rfd::FileDialog::new()
            .set_title("Save PDF")
            .add_filter("PDF files", &["pdf"])
            .set_file_name("cards.pdf")
            .save_file()
        else {
            info!("Export cancelled");
            return Ok(None);
        };
        let output = with_pdf_extension(chosen);

        let report = api::generate_document(&request, template, &self.layout, &output)?;
        Ok(Some(report))
    }

    pub fn generate_output(&mut self) {
        self.logs.push(LogEntry::separator("generate"));
        let start = Instant::now();
        let result = self.run_generation();
        let elapsed = start.elapsed();

        match result {
            Ok(Some(report)) => {
                self.last_run_duration = Some(elapsed);
                info!(
                    "Wrote {} page(s) to {:?} in {:.2?}",
                    report.pages, report.output, elapsed
                );
                self.status_message = format!("Exported {} page(s)", report.pages);
                if report.skipped.is_empty() {
                    show_info("Success", &export_summary(&report));
                } else {
                    show_warning("Exported With Warnings", &export_summary(&report));
                }
                self.last_export = Some(report);
            }
            Ok(None) => {}
            Err(e) => {
                error!("Generation failed: {}", e);
                self.status_message = "Failed".to_string();
                show_error(e.title(), &e.to_string());
            }
        }
    }
}
