use cardprint::config::GridArgs;
use cardprint::gui::app::apply_theme;
use cardprint::gui::{CardGridGui, init_gui_logging};
use clap::Parser;
use eframe::{NativeOptions, egui::ViewportBuilder};
use egui_extras::install_image_loaders;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = GridArgs::parse();
    init_gui_logging(args.log);
    let config = args.resolve()?;
    tracing::info!(
        "Template {:?}, {} slot(s) per page at {} DPI",
        config.template_path,
        config.layout.cards_per_page(),
        config.dpi
    );

    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Card Grid")
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Card Grid",
        options,
        Box::new(move |cc| {
            install_image_loaders(&cc.egui_ctx);
            apply_theme(&cc.egui_ctx);
            Ok(Box::new(CardGridGui::new(config)))
        }),
    )?;
    Ok(())
}
