use super::components::*;
use super::logging::drain_into;
use super::models::{CardGridGui, CropperGui, LogPanelState};
use eframe::egui;

/// Dark theme shared by both windows.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.override_text_color = Some(egui::Color32::from_gray(220));
    style.visuals.widgets.noninteractive.bg_fill = egui::Color32::from_rgb(40, 40, 40);
    style.visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(50, 50, 50);
    style.visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(60, 60, 60);
    style.visuals.widgets.active.bg_fill = egui::Color32::from_rgb(70, 70, 70);
    style.visuals.panel_fill = egui::Color32::from_rgb(30, 30, 30);
    style.visuals.window_fill = egui::Color32::from_rgb(25, 25, 25);
    style.visuals.faint_bg_color = egui::Color32::from_rgb(45, 45, 45);
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(20, 20, 20);
    ctx.set_style(style);
}

fn pump_logs(ctx: &egui::Context, logs: &LogPanelState) {
    if drain_into(&logs.log_messages) {
        ctx.request_repaint();
    }
}

impl eframe::App for CropperGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        pump_logs(ctx, &self.logs);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(5.0);
            CropperPanelComponent::render(ui, self);
            ui.add_space(5.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            FooterComponent::render(
                ui,
                "Cardcrop",
                &self.status_message,
                self.last_run_duration,
                &self.logs,
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            LogPanelComponent::render(ui, &mut self.logs);
        });
    }
}

impl eframe::App for CardGridGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        pump_logs(ctx, &self.logs);
        self.show_pending_startup_error();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            HeaderComponent::render(ui, self);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            FooterComponent::render(
                ui,
                "Cardgrid",
                &self.status_message,
                self.last_run_duration,
                &self.logs,
            );
        });

        egui::SidePanel::left("left_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(10.0);
                        AdjustmentsComponent::render(ui, self);
                        ui.separator();
                        LayoutInfoComponent::render(ui, self);
                    });
            });

        egui::SidePanel::right("log_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                LogPanelComponent::render(ui, &mut self.logs);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ActionsComponent::render(ui, self);
            ui.separator();
            CardListComponent::render(ui, self);
        });
    }
}
