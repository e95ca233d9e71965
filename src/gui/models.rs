use crate::api::{ExportReport, GenerationRequest};
use crate::config::GridConfig;
use crate::core::layout::PageLayout;
use crate::core::params::{AdjustmentParams, CropParams};
use crate::core::processing::paginate::CopyCount;
use crate::gui::logging::{GuiLogLayer, LogEntry};
use crate::io::template::load_template;
use crate::types::CardEntry;
use image::RgbImage;
use once_cell::sync::OnceCell;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

static LOGGING_INIT: OnceCell<()> = OnceCell::new();

/// Install the GUI log layer once per process. With `console` set, events
/// are mirrored to stderr as well.
pub fn init_gui_logging(console: bool) {
    LOGGING_INIT.get_or_init(|| {
        let gui_layer = GuiLogLayer::new();

        // Windowing crates are chatty below info.
        let filter = EnvFilter::new("info,cardprint=trace,eframe=info,winit=info,wgpu=warn");

        let console_layer = console.then(|| fmt::layer().with_target(false));

        let subscriber = Registry::default()
            .with(filter)
            .with(gui_layer)
            .with(console_layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

fn level_visible(min_level: Level, entry: &LogEntry) -> bool {
    // TRACE doubles as "show everything".
    min_level == Level::TRACE || entry.level == min_level
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "ALL",
    }
}

/// Log panel state shared by both windows.
pub struct LogPanelState {
    pub min_log_level: Level,
    pub log_messages: Arc<Mutex<Vec<LogEntry>>>,
}

impl Default for LogPanelState {
    fn default() -> Self {
        Self {
            min_log_level: Level::TRACE,
            log_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LogPanelState {
    pub fn clear(&self) {
        if let Ok(mut logs) = self.log_messages.lock() {
            logs.clear();
        }
    }

    pub fn push(&self, entry: LogEntry) {
        if let Ok(mut logs) = self.log_messages.lock() {
            logs.push(entry);
        }
    }

    /// Render the visible entries as a text report.
    pub fn export_text(&self, title: &str) -> Result<String, String> {
        let logs = self
            .log_messages
            .lock()
            .map_err(|e| format!("Failed to lock logs: {}", e))?;
        let visible: Vec<&LogEntry> = logs
            .iter()
            .filter(|entry| level_visible(self.min_log_level, entry))
            .collect();
        if visible.is_empty() {
            return Err("No logs match the current filter level".to_string());
        }

        let mut out = String::new();
        out.push_str(&format!("=== {} log ===\n", title));
        out.push_str(&format!("Generated: {}\n", chrono::Local::now().to_rfc3339()));
        out.push_str(&format!("Filter Level: {}\n", level_label(self.min_log_level)));
        out.push_str(&format!("Entries: {}\n\n", visible.len()));
        for entry in visible {
            out.push_str(&entry.to_line());
            out.push('\n');
        }
        Ok(out)
    }

    pub fn save_logs_to_file(&self, title: &str) -> Result<(), String> {
        let content = self.export_text(title)?;
        let default_name = format!("{}_log.txt", title.to_lowercase());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text files", &["txt", "log"])
            .set_file_name(&default_name)
            .save_file()
        else {
            return Err("No save location selected".to_string());
        };
        fs::write(&path, content).map_err(|e| e.to_string())?;
        tracing::info!("Logs saved to {:?}", path);
        Ok(())
    }

    pub fn is_visible(&self, entry: &LogEntry) -> bool {
        level_visible(self.min_log_level, entry)
    }
}

/// Border cropper window.
pub struct CropperGui {
    pub params: CropParams,
    pub status_message: String,
    pub last_run_duration: Option<Duration>,
    pub logs: LogPanelState,
}

impl CropperGui {
    pub fn new(params: CropParams) -> Self {
        Self {
            params,
            status_message: "Ready".to_string(),
            last_run_duration: None,
            logs: LogPanelState::default(),
        }
    }
}

impl Default for CropperGui {
    fn default() -> Self {
        Self::new(CropParams::default())
    }
}

/// One row of the card list. Copies stay as typed text until generation.
#[derive(Debug, Clone)]
pub struct CardRow {
    pub id: u64,
    pub path: PathBuf,
    pub copies_text: String,
}

impl CardRow {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    pub fn copies(&self) -> CopyCount {
        CopyCount::parse(&self.copies_text)
    }

    /// Step the count by `delta`, staying inside the control's 1..=99.
    pub fn step_copies(&mut self, delta: i64) {
        let next = (self.copies().get() as i64 + delta)
            .clamp(CopyCount::MIN as i64, CopyCount::MAX as i64);
        self.copies_text = next.to_string();
    }
}

/// Page composer window.
pub struct CardGridGui {
    pub template_path: PathBuf,
    pub template: Option<RgbImage>,
    pub template_error: Option<String>,
    pub layout: PageLayout,
    pub dpi: f32,

    pub adjustments: AdjustmentParams,
    pub cards: Vec<CardRow>,
    pub show_thumbnails: bool,
    next_card_id: u64,

    pub status_message: String,
    pub last_run_duration: Option<Duration>,
    pub last_export: Option<ExportReport>,
    pub logs: LogPanelState,

    /// Template failure still waiting to be shown in a dialog.
    pub pending_startup_error: Option<String>,
}

impl CardGridGui {
    pub fn new(config: GridConfig) -> Self {
        let (template, template_error) = match load_template(&config.template_path) {
            Ok(img) => (Some(img), None),
            Err(e) => {
                tracing::error!("{}", e);
                (None, Some(e.to_string()))
            }
        };
        Self {
            template_path: config.template_path,
            pending_startup_error: template_error.clone(),
            template,
            template_error,
            layout: config.layout,
            dpi: config.dpi,
            adjustments: AdjustmentParams::default(),
            cards: Vec::new(),
            show_thumbnails: true,
            next_card_id: 0,
            status_message: "Ready".to_string(),
            last_run_duration: None,
            last_export: None,
            logs: LogPanelState::default(),
        }
    }

    pub fn push_card(&mut self, path: PathBuf) {
        self.cards.push(CardRow {
            id: self.next_card_id,
            path,
            copies_text: CopyCount::default().to_string(),
        });
        self.next_card_id += 1;
    }

    pub fn remove_card(&mut self, id: u64) -> Option<CardRow> {
        let index = self.cards.iter().position(|row| row.id == id)?;
        Some(self.cards.remove(index))
    }

    pub fn clear_cards(&mut self) {
        self.cards.clear();
    }

    /// One-line description of the most recent successful export.
    pub fn last_export_summary(&self) -> Option<String> {
        let report = self.last_export.as_ref()?;
        let name = report
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.output.display().to_string());
        let mut line = format!("Last export: {} page(s) to {}", report.pages, name);
        if !report.skipped.is_empty() {
            line.push_str(&format!(", {} skipped", report.skipped.len()));
        }
        Some(line)
    }

    pub fn reset_adjustments(&mut self) {
        self.adjustments = AdjustmentParams::default();
    }

    /// Snapshot of the current session for the composer.
    pub fn generation_request(&self) -> GenerationRequest {
        let cards = self
            .cards
            .iter()
            .map(|row| CardEntry::with_copies(&row.path, row.copies()))
            .collect();
        let mut request = GenerationRequest::new(cards, self.adjustments);
        request.dpi = self.dpi;
        request
    }
}
