use cardprint::config::CropperArgs;
use cardprint::gui::app::apply_theme;
use cardprint::gui::{CropperGui, init_gui_logging};
use clap::Parser;
use eframe::{NativeOptions, egui::ViewportBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CropperArgs::parse();
    init_gui_logging(args.log);
    let params = args.crop_params()?;
    tracing::debug!("Crop fractions: {:?}", params);

    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Card Border Cropper")
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Card Border Cropper",
        options,
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx);
            Ok(Box::new(CropperGui::new(params)))
        }),
    )?;
    Ok(())
}
