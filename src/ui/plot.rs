use eframe::egui::{self, Color32, Frame, Grid, RichText, ScrollArea, Sense, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Plot};

use crate::color::{ColorScale, BAR_COLOR, PANEL_FILL};
use crate::data::aggregate::Aggregation;
use crate::data::summary::{DashboardSummary, Metrics};
use crate::state::AppState;

const TITLE: &str = "Stack Overflow 2023 Developer Survey Analysis";
const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render metrics and charts for the current filtered view.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| match &state.status_message {
            Some(msg) => {
                ui.label(
                    RichText::new(format!("The survey dataset could not be loaded.\n\n{msg}"))
                        .color(Color32::RED),
                );
            }
            None => {
                ui.heading("Open a file to view the survey  (File → Open…)");
            }
        });
        return;
    }

    let summary = &state.summary;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(TITLE).size(26.0).strong());
            ui.add_space(8.0);

            ui.heading("Demographics");
            metrics_row(ui, &summary.metrics);

            section(ui, "Age Distribution");
            age_histogram(ui, summary);

            section(ui, "Education Level Distribution");
            ranking_chart(ui, &summary.education);

            section(ui, summary.countries.dimension.title());
            country_map(ui, &summary.countries);

            ui.add_space(12.0);
            ui.separator();
            ui.heading("Programming Experience");
            for aggregation in &summary.experience {
                section(ui, aggregation.dimension.title());
                ranking_chart(ui, aggregation);
            }
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).size(18.0).strong());
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, metrics: &Metrics) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Total Respondents", metrics.total_respondents.to_string());
        metric_card(&mut cols[1], "Total Countries", metrics.total_countries.to_string());
        metric_card(&mut cols[2], "Average Age", metrics.average_age_text());
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: String) {
    Frame::group(ui.style()).fill(PANEL_FILL).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(label).color(Color32::BLACK));
        ui.label(RichText::new(value).size(28.0).color(Color32::BLACK));
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Axis label for the bar at integer position `value`; blank between bars.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn age_histogram(ui: &mut Ui, summary: &DashboardSummary) {
    if summary.age_distribution.is_empty() {
        ui.weak("No respondents match the current filters.");
        return;
    }

    let labels: Vec<String> = summary
        .age_distribution
        .iter()
        .map(|(label, _)| label.clone())
        .collect();
    let bars: Vec<Bar> = summary
        .age_distribution
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(label)
                .fill(BAR_COLOR)
        })
        .collect();
    let chart = BarChart::new(bars).color(BAR_COLOR).name("Respondent Count");

    Plot::new("age_distribution")
        .height(CHART_HEIGHT)
        .x_axis_label("Age")
        .y_axis_label("Respondent Count")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Horizontal top-10 bar chart; the most frequent answer is drawn at the top.
fn ranking_chart(ui: &mut Ui, aggregation: &Aggregation) {
    if aggregation.is_empty() {
        ui.weak("No answers in the current selection.");
        return;
    }

    let dimension = aggregation.dimension;
    let labels: Vec<String> = aggregation
        .entries
        .iter()
        .rev()
        .map(|(label, _)| label.clone())
        .collect();
    let bars: Vec<Bar> = aggregation
        .entries
        .iter()
        .rev()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(label)
                .fill(BAR_COLOR)
        })
        .collect();
    let chart = BarChart::new(bars)
        .horizontal()
        .color(BAR_COLOR)
        .name(dimension.axis_label());

    Plot::new(dimension.column())
        .height(CHART_HEIGHT)
        .x_axis_label("Respondent Count")
        .y_axis_label(dimension.axis_label())
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Country map
// ---------------------------------------------------------------------------

/// `13606` → `"13,606"`.
fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Top countries shaded on the pink scale, next to a per-country breakdown.
fn country_map(ui: &mut Ui, aggregation: &Aggregation) {
    if aggregation.is_empty() {
        ui.weak("No answers in the current selection.");
        return;
    }

    let scale = ColorScale::pink();
    let min = aggregation.min_count() as f64;
    let max = aggregation.max_count() as f64;

    ui.columns(2, |cols: &mut [Ui]| {
        Grid::new("country_map")
            .num_columns(3)
            .striped(true)
            .show(&mut cols[0], |ui: &mut Ui| {
                for (country, count) in &aggregation.entries {
                    let color = scale.color_for(*count as f64, min, max);
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(36.0, 16.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, color);
                    ui.label(country);
                    ui.label(with_thousands(*count));
                    ui.end_row();
                }
            });

        Frame::group(cols[1].style())
            .fill(PANEL_FILL)
            .show(&mut cols[1], |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new("Explanation For Each Country")
                        .strong()
                        .color(Color32::BLACK),
                );
                for (rank, (country, count)) in aggregation.entries.iter().enumerate() {
                    ui.label(
                        RichText::new(format!(
                            "{}. {country}: {} Respondents",
                            rank + 1,
                            with_thousands(*count)
                        ))
                        .color(Color32::BLACK),
                    );
                }
            });
    });
}
