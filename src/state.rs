use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::filter::{
    age_bounds, category_indices, education_levels, filtered_indices, AgeRange, FilterCriteria,
};
use crate::data::model::{RespondentCategory, SurveyDataset};
use crate::data::summary::DashboardSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<SurveyDataset>>,

    /// Current sidebar selection.
    pub criteria: FilterCriteria,

    /// Age slider limits for the selected respondent category.
    pub age_bounds: Option<(i64, i64)>,

    /// Education answers offered by the multi-select, in first-seen order.
    /// `None` is the "no answer" option.
    pub education_options: Vec<Option<String>>,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics and rankings for `visible_indices`.
    pub summary: DashboardSummary,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            age_bounds: None,
            education_options: Vec::new(),
            visible_indices: Vec::new(),
            summary: DashboardSummary::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset filters for "All Respondents".
    pub fn set_dataset(&mut self, dataset: Arc<SurveyDataset>) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.set_category(None);
    }

    /// Report a load failure. Any previously loaded dataset stays in place.
    pub fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Change respondent category. Slider bounds and education options are
    /// re-derived from the records of that category; the age selection goes
    /// back to the default window clamped into the new bounds and every
    /// education level is selected.
    pub fn set_category(&mut self, category: Option<RespondentCategory>) {
        self.criteria.category = category;

        if let Some(ds) = &self.dataset {
            let in_category = category_indices(ds, category);
            self.age_bounds = age_bounds(ds.select(&in_category));
            self.education_options = education_levels(ds.select(&in_category));
        } else {
            self.age_bounds = None;
            self.education_options.clear();
        }

        self.criteria.age_range = match self.age_bounds {
            Some(bounds) => AgeRange::default().clamped(bounds),
            None => AgeRange::default(),
        };
        self.criteria.education = self.education_options.iter().cloned().collect();
        self.refilter();
    }

    /// Set the age selection; ends are swapped if given in reverse.
    pub fn set_age_range(&mut self, min: f64, max: f64) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let range = AgeRange::new(min, max);
        self.criteria.age_range = match self.age_bounds {
            Some(bounds) => range.clamped(bounds),
            None => range,
        };
        self.refilter();
    }

    /// Toggle a single education answer (`None` toggles "no answer").
    pub fn toggle_education(&mut self, level: Option<&str>) {
        let level = level.map(str::to_string);
        let selected = &mut self.criteria.education;
        if !selected.remove(&level) {
            selected.insert(level);
        }
        self.refilter();
    }

    /// Select every offered education level.
    pub fn select_all_education(&mut self) {
        self.criteria.education = self.education_options.iter().cloned().collect();
        self.refilter();
    }

    /// Deselect every education level.
    pub fn select_no_education(&mut self) {
        self.criteria.education = BTreeSet::new();
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a filter change.
    pub fn refilter(&mut self) {
        match &self.dataset {
            Some(ds) => {
                self.visible_indices = filtered_indices(ds, &self.criteria);
                self.summary = DashboardSummary::compute(ds.select(&self.visible_indices));
            }
            None => {
                self.visible_indices.clear();
                self.summary = DashboardSummary::default();
            }
        }
        log::debug!(
            "Filter {:?} kept {} records",
            self.criteria,
            self.visible_indices.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{Record, LEARNER_BRANCH, PROFESSIONAL_BRANCH};

    fn record(branch: &str, age: &str, ed: &str) -> Record {
        Record {
            main_branch: Some(branch.to_string()),
            age: Some(age.to_string()),
            ed_level: (ed != "NA").then(|| ed.to_string()),
            country: Some("Chile".to_string()),
            ..Default::default()
        }
    }

    fn loaded() -> AppState {
        let dataset = SurveyDataset::from_records(vec![
            record(PROFESSIONAL_BRANCH, "25-34 years old", "Bachelor"),
            record(PROFESSIONAL_BRANCH, "45-54 years old", "Master"),
            record(LEARNER_BRANCH, "Under 18 years old", "Secondary"),
            record(LEARNER_BRANCH, "18-24 years old", "Bachelor"),
        ]);
        let mut state = AppState::default();
        state.set_dataset(Arc::new(dataset));
        state
    }

    #[test]
    fn new_dataset_uses_default_window_and_all_levels() {
        let state = loaded();
        assert_eq!(state.age_bounds, Some((17, 49)));
        assert_eq!(state.criteria.age_range, AgeRange::new(20.0, 40.0));
        assert_eq!(
            state.education_options,
            vec![
                Some("Bachelor".to_string()),
                Some("Master".to_string()),
                Some("Secondary".to_string()),
            ]
        );
        assert_eq!(state.criteria.education.len(), 3);
        // 29.5 and 21 fall inside [20, 40]
        assert_eq!(state.visible_indices, vec![0, 3]);
        assert_eq!(state.summary.metrics.total_respondents, 2);
    }

    #[test]
    fn category_change_rederives_bounds_and_options() {
        let mut state = loaded();
        state.set_category(Some(RespondentCategory::Learner));
        assert_eq!(state.age_bounds, Some((17, 21)));
        assert_eq!(state.criteria.age_range, AgeRange::new(20.0, 21.0));
        assert_eq!(
            state.education_options,
            vec![Some("Secondary".to_string()), Some("Bachelor".to_string())]
        );
        assert_eq!(state.visible_indices, vec![3]);

        state.set_category(None);
        assert_eq!(state.criteria.age_range, AgeRange::new(20.0, 40.0));
        assert_eq!(state.visible_indices, vec![0, 3]);
    }

    #[test]
    fn empty_category_degrades_to_empty_summary() {
        let mut state = loaded();
        state.set_category(Some(RespondentCategory::Other));
        assert_eq!(state.age_bounds, None);
        assert!(state.education_options.is_empty());
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.summary, DashboardSummary::default());
    }

    #[test]
    fn education_toggles_and_bulk_selection() {
        let mut state = loaded();
        state.toggle_education(Some("Bachelor"));
        assert!(state.visible_indices.is_empty());
        state.toggle_education(Some("Bachelor"));
        assert_eq!(state.visible_indices, vec![0, 3]);
        state.select_no_education();
        assert!(state.visible_indices.is_empty());
        state.select_all_education();
        assert_eq!(state.visible_indices, vec![0, 3]);
    }

    #[test]
    fn unanswered_education_is_kept_by_default() {
        let dataset = SurveyDataset::from_records(vec![
            record(PROFESSIONAL_BRANCH, "25-34 years old", "Bachelor"),
            record(PROFESSIONAL_BRANCH, "25-34 years old", "NA"),
        ]);
        let mut state = AppState::default();
        state.set_dataset(Arc::new(dataset));
        assert_eq!(
            state.education_options,
            vec![Some("Bachelor".to_string()), None]
        );
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.summary.metrics.total_respondents, 2);

        state.toggle_education(None);
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.summary.metrics.total_respondents, 1);

        state.select_all_education();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn age_range_is_ordered_and_clamped() {
        let mut state = loaded();
        state.set_age_range(30.0, 10.0);
        assert_eq!(state.criteria.age_range, AgeRange::new(17.0, 30.0));
        assert_eq!(state.visible_indices, vec![0, 2, 3]);
    }

    #[test]
    fn refilter_without_dataset_is_empty() {
        let mut state = AppState::default();
        state.refilter();
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.summary.metrics.total_respondents, 0);
    }
}
