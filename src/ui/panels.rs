use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{DashConfig, MAX_BIN_COUNT, SLIDER_BIN_RANGE};
use crate::data::model::{Column, Species};
use crate::state::Session;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the sidebar controls.
pub fn side_panel(ui: &mut Ui, session: &mut Session, config: &DashConfig) {
    ui.heading("Sidebar");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            attribute_controls(ui, session);
            ui.separator();
            species_controls(ui, session);
            ui.separator();

            ui.strong("Links:");
            for link in &config.links {
                ui.hyperlink_to(&link.label, &link.url);
            }
        });
}

fn attribute_controls(ui: &mut Ui, session: &mut Session) {
    ui.strong("Select Plotly Attribute");
    let current = session.selected_attribute();
    egui::ComboBox::from_id_salt("selected_attribute")
        .selected_text(current.name())
        .show_ui(ui, |ui: &mut Ui| {
            for column in Column::NUMERIC {
                if ui
                    .selectable_label(current == column, column.name())
                    .clicked()
                {
                    session.set_selected_attribute(column);
                }
            }
        });

    ui.add_space(4.0);
    let mut plotly_bins = session.plotly_bin_count();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Number of Plotly bins");
        ui.add(egui::DragValue::new(&mut plotly_bins).range(1..=MAX_BIN_COUNT));
    });
    session.set_plotly_bin_count(plotly_bins);

    let mut seaborn_bins = session.seaborn_bin_count();
    let (min, max) = SLIDER_BIN_RANGE;
    ui.add(egui::Slider::new(&mut seaborn_bins, min..=max).text("Number of Seaborn bins"));
    session.set_seaborn_bin_count(seaborn_bins);
}

fn species_controls(ui: &mut Ui, session: &mut Session) {
    let n_selected = session.selected_species().len();
    ui.strong(format!(
        "Species in Scatterplot  ({n_selected}/{})",
        Species::ALL.len()
    ));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            session.select_all_species();
        }
        if ui.small_button("None").clicked() {
            session.select_no_species();
        }
    });

    for species in Species::ALL {
        let mut checked = session.is_species_selected(species);
        let present = session.is_species_present(species);
        let text = RichText::new(species.as_str()).color(session.colors().color_for(species));
        let response = ui
            .add_enabled(present, egui::Checkbox::new(&mut checked, text))
            .on_disabled_hover_text("No rows for this species in the loaded table");
        if response.changed() {
            session.toggle_species(species);
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &mut Session) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Chart", |ui: &mut Ui| {
            if ui.button("Copy chart JSON").clicked() {
                copy_chart_json(ui, session);
                ui.close_menu();
            }
        });

        ui.separator();

        let visible = session.filtered_view().len();
        let plotted = session.chart().point_count();
        ui.label(format!(
            "{} penguins loaded, {visible} selected, {plotted} plotted",
            session.dataset().len()
        ));

        if let Some(msg) = &session.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn copy_chart_json(ui: &Ui, session: &mut Session) {
    match session.chart().to_json() {
        Ok(json) => {
            ui.ctx().copy_text(json);
            session.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to serialise chart: {e}");
            session.status_message = Some(format!("Error: {e}"));
        }
    }
}
