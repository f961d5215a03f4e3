use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Column;
use crate::state::Session;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Filtered rows (bottom panel)
// ---------------------------------------------------------------------------

/// Placeholder for an empty view. With species selected the view is empty
/// only because none of them appear in the loaded table.
fn empty_view_message(selected: usize) -> &'static str {
    if selected == 0 {
        "No species selected."
    } else {
        "No rows match the current selection."
    }
}

/// List the rows of the current filtered view. Rows with missing values
/// are shown too; the plot skips them.
pub fn filtered_table(ui: &mut Ui, session: &mut Session) {
    let view = session.filtered_view();
    let dataset = session.dataset();

    ui.strong(format!("Filtered rows ({} of {})", view.len(), dataset.len()));
    ui.separator();

    if view.is_empty() {
        ui.label(empty_view_message(session.selected_species().len()));
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(TableColumn::auto().at_least(60.0), Column::ALL.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for column in Column::ALL {
                header.col(|ui| {
                    ui.strong(column.label());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, view.len(), |mut row| {
                let Some(penguin) = view
                    .indices()
                    .get(row.index())
                    .and_then(|&i| dataset.get(i))
                else {
                    return;
                };
                for column in Column::ALL {
                    row.col(|ui| {
                        ui.label(penguin.cell(column).to_string());
                    });
                }
            });
        });
}
