use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::model::RespondentCategory;
use crate::state::AppState;

/// Survey logo shown at the top of the sidebar.
pub const LOGO_URL: &str =
    "https://github.com/azalliamelani/stackoverflow-2023-survey/raw/main/dashboard/logo.png";

const ALL_RESPONDENTS: &str = "All Respondents";
const NO_EDUCATION_ANSWER: &str = "(no answer)";

fn category_label(category: Option<RespondentCategory>) -> &'static str {
    category.map_or(ALL_RESPONDENTS, RespondentCategory::label)
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(LOGO_URL)
                .max_width(ui.available_width() * 0.8)
                .max_height(120.0)
                .rounding(10.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            respondent_selector(ui, state);
            ui.separator();
            age_sliders(ui, state);
            ui.separator();
            education_checkboxes(ui, state);
        });
}

fn respondent_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Respondent Type");
    let current = state.criteria.category;
    let mut selected = current;
    egui::ComboBox::from_id_salt("respondent_type")
        .selected_text(category_label(current))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, None, ALL_RESPONDENTS);
            for category in RespondentCategory::ALL {
                ui.selectable_value(&mut selected, Some(category), category.label());
            }
        });
    if selected != current {
        state.set_category(selected);
    }
}

fn age_sliders(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Age Range");
    let Some((lo, hi)) = state.age_bounds else {
        ui.label("No age answers for this respondent type.");
        return;
    };

    let bounds = lo as f64..=hi as f64;
    let mut min = state.criteria.age_range.min;
    let mut max = state.criteria.age_range.max;
    let min_changed = ui
        .add(Slider::new(&mut min, bounds.clone()).integer().text("from"))
        .changed();
    let max_changed = ui
        .add(Slider::new(&mut max, bounds).integer().text("to"))
        .changed();

    if min_changed || max_changed {
        // Dragging one handle past the other pushes the other along.
        if min > max {
            if min_changed {
                max = min;
            } else {
                min = max;
            }
        }
        state.set_age_range(min, max);
    }
}

fn education_checkboxes(ui: &mut Ui, state: &mut AppState) {
    let options = state.education_options.clone();
    let n_selected = state.criteria.education.len();
    let header_text = format!("Select Education Level  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("education")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_education();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_education();
                }
            });

            for level in &options {
                let mut checked = state.criteria.education.contains(level);
                let text = level.as_deref().unwrap_or(NO_EDUCATION_ANSWER);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_education(level.as_deref());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} respondents loaded, {} matching filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Open a local copy of the survey instead of the downloaded one.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["zip", "csv", "json", "parquet", "pq"])
        .add_filter("Zip archive", &["zip"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(Arc::new(dataset)),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.set_error(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_labels() {
        assert_eq!(category_label(None), "All Respondents");
        assert_eq!(
            category_label(Some(RespondentCategory::Learner)),
            "Learning to Code"
        );
    }
}
