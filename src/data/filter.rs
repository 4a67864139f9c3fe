use std::collections::{BTreeSet, HashSet};

use super::model::{Record, RespondentCategory, SurveyDataset};

// ---------------------------------------------------------------------------
// Filter predicates: respondent category, age range, education levels
// ---------------------------------------------------------------------------

/// Slider selection applied before the user touches the age control.
pub const DEFAULT_AGE_RANGE: (f64, f64) = (20.0, 40.0);

/// Inclusive numeric age window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeRange {
    pub min: f64,
    pub max: f64,
}

impl AgeRange {
    pub fn new(min: f64, max: f64) -> Self {
        AgeRange { min, max }
    }

    pub fn contains(&self, age: f64) -> bool {
        age >= self.min && age <= self.max
    }

    /// Clamp both ends into `bounds`, keeping `min <= max`.
    pub fn clamped(self, bounds: (i64, i64)) -> Self {
        let (lo, hi) = (bounds.0 as f64, bounds.1 as f64);
        let min = self.min.clamp(lo, hi);
        let max = self.max.clamp(min, hi);
        AgeRange { min, max }
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        AgeRange::new(DEFAULT_AGE_RANGE.0, DEFAULT_AGE_RANGE.1)
    }
}

/// The active selection from the sidebar controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// `None` means "All Respondents".
    pub category: Option<RespondentCategory>,
    pub age_range: AgeRange,
    /// Accepted education answers. `None` stands for "no answer" and, when
    /// present, keeps records that skipped the question.
    pub education: BTreeSet<Option<String>>,
}

impl FilterCriteria {
    pub fn matches_category(&self, record: &Record) -> bool {
        match self.category {
            None => true,
            Some(category) => record.category() == category,
        }
    }

    /// All three predicates, conjunctively.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.matches_category(record) {
            return false;
        }
        match record.age_numeric() {
            Some(age) if self.age_range.contains(age) => {}
            _ => return false,
        }
        self.education.contains(&record.ed_level)
    }
}

/// Indices of records in the given respondent category, in source order.
pub fn category_indices(
    dataset: &SurveyDataset,
    category: Option<RespondentCategory>,
) -> Vec<usize> {
    let criteria = FilterCriteria {
        category,
        ..Default::default()
    };
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches_category(r))
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of records that pass all active filters, in source order.
pub fn filtered_indices(dataset: &SurveyDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Same predicate over an arbitrary record sequence; applying it twice is a no-op.
pub fn filter_records<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| criteria.matches(r)).collect()
}

/// Integer slider bounds from the observed numeric ages (truncated), or `None`
/// when no record has a usable age.
pub fn age_bounds<'a, I>(records: I) -> Option<(i64, i64)>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(Record::age_numeric)
        .fold(None, |acc: Option<(f64, f64)>, age| match acc {
            None => Some((age, age)),
            Some((lo, hi)) => Some((lo.min(age), hi.max(age))),
        })
        .map(|(lo, hi)| (lo.trunc() as i64, hi.trunc() as i64))
}

/// Distinct education answers in first-occurrence order. A missing answer is
/// offered as `None` so it can be selected like any other level.
pub fn education_levels<'a, I>(records: I) -> Vec<Option<String>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(|r| r.ed_level.as_deref())
        .filter(|level| seen.insert(*level))
        .map(|level| level.map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{LEARNER_BRANCH, PROFESSIONAL_BRANCH};

    fn record(branch: Option<&str>, age: &str, ed: Option<&str>) -> Record {
        Record {
            main_branch: branch.map(str::to_string),
            age: Some(age.to_string()),
            ed_level: ed.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample() -> SurveyDataset {
        SurveyDataset::from_records(vec![
            record(Some(PROFESSIONAL_BRANCH), "25-34 years old", Some("Bachelor")),
            record(Some(LEARNER_BRANCH), "Under 18 years old", Some("Secondary")),
            record(None, "35-44 years old", Some("Master")),
            record(Some(PROFESSIONAL_BRANCH), "Prefer not to say", Some("Bachelor")),
            record(Some("I code primarily as a hobby"), "18-24 years old", None),
        ])
    }

    fn accept_all(dataset: &SurveyDataset, min: f64, max: f64) -> FilterCriteria {
        FilterCriteria {
            category: None,
            age_range: AgeRange::new(min, max),
            education: education_levels(&dataset.records).into_iter().collect(),
        }
    }

    #[test]
    fn age_window_is_inclusive() {
        let dataset = SurveyDataset::from_records(vec![
            record(None, "18-24 years old", Some("Bachelor")),
            record(None, "25-34 years old", Some("Bachelor")),
            record(None, "Under 18 years old", Some("Bachelor")),
        ]);
        let criteria = accept_all(&dataset, 20.0, 30.0);
        // 21 is also inside [20, 30]; only the second record is at 29.5.
        let strict = FilterCriteria {
            age_range: AgeRange::new(22.0, 30.0),
            ..criteria.clone()
        };
        assert_eq!(filtered_indices(&dataset, &criteria), vec![0, 1]);
        assert_eq!(filtered_indices(&dataset, &strict), vec![1]);
    }

    #[test]
    fn category_classification_partitions_dataset() {
        let dataset = sample();
        assert_eq!(
            category_indices(&dataset, Some(RespondentCategory::Professional)),
            vec![0, 3]
        );
        assert_eq!(
            category_indices(&dataset, Some(RespondentCategory::Learner)),
            vec![1]
        );
        assert_eq!(
            category_indices(&dataset, Some(RespondentCategory::Other)),
            vec![2, 4]
        );
        assert_eq!(category_indices(&dataset, None).len(), dataset.len());
    }

    #[test]
    fn missing_age_never_matches() {
        let dataset = sample();
        let criteria = accept_all(&dataset, 0.0, 100.0);
        // index 3 has an unmapped bracket
        assert_eq!(filtered_indices(&dataset, &criteria), vec![0, 1, 2, 4]);
    }

    #[test]
    fn unanswered_education_follows_its_own_option() {
        let dataset = sample();
        let mut criteria = accept_all(&dataset, 0.0, 100.0);
        assert!(criteria.education.contains(&None));
        assert_eq!(filtered_indices(&dataset, &criteria), vec![0, 1, 2, 4]);

        criteria.education.remove(&None);
        assert_eq!(filtered_indices(&dataset, &criteria), vec![0, 1, 2]);
    }

    #[test]
    fn education_filter_is_membership() {
        let dataset = sample();
        let mut criteria = accept_all(&dataset, 0.0, 100.0);
        criteria.education = BTreeSet::from([Some("Master".to_string())]);
        assert_eq!(filtered_indices(&dataset, &criteria), vec![2]);
    }

    #[test]
    fn filtering_is_idempotent_and_order_preserving() {
        let dataset = sample();
        let criteria = FilterCriteria {
            category: Some(RespondentCategory::Professional),
            ..accept_all(&dataset, 17.0, 70.0)
        };
        let once = filter_records(&dataset.records, &criteria);
        let twice = filter_records(once.iter().copied(), &criteria);
        assert_eq!(once, twice);
        assert_eq!(once, vec![&dataset.records[0]]);
    }

    #[test]
    fn age_bounds_follow_observed_ages() {
        let dataset = sample();
        assert_eq!(age_bounds(&dataset.records), Some((17, 39)));
        let pros: Vec<usize> = category_indices(&dataset, Some(RespondentCategory::Professional));
        assert_eq!(age_bounds(dataset.select(&pros)), Some((29, 29)));
        assert_eq!(age_bounds(std::iter::empty()), None);
    }

    #[test]
    fn education_levels_keep_first_occurrence_order() {
        let dataset = sample();
        assert_eq!(
            education_levels(&dataset.records),
            vec![
                Some("Bachelor".to_string()),
                Some("Secondary".to_string()),
                Some("Master".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn clamped_range_stays_inside_bounds() {
        let range = AgeRange::default().clamped((29, 70));
        assert_eq!(range, AgeRange::new(29.0, 40.0));
        let range = AgeRange::default().clamped((45, 70));
        assert_eq!(range, AgeRange::new(45.0, 45.0));
    }

    #[test]
    fn empty_dataset_filters_to_nothing() {
        let dataset = SurveyDataset::default();
        let criteria = FilterCriteria::default();
        assert!(filtered_indices(&dataset, &criteria).is_empty());
    }
}
