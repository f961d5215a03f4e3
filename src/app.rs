use eframe::egui;

use crate::config::DashConfig;
use crate::state::Session;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinDashApp {
    pub session: Session,
    pub config: DashConfig,
}

impl PenguinDashApp {
    pub fn new(session: Session, config: DashConfig) -> Self {
        Self { session, config }
    }
}

impl eframe::App for PenguinDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: page heading + menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.heading(&self.config.window.page_heading);
            panels::top_bar(ui, &mut self.session);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("sidebar")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session, &self.config);
            });

        // ---- Bottom panel: filtered rows ----
        egui::TopBottomPanel::bottom("filtered_rows")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::filtered_table(ui, &mut self.session);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Main Panel");
            ui.separator();
            plot::scatter_plot(ui, &mut self.session);
        });
    }
}
