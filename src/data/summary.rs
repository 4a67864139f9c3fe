use std::collections::HashSet;

use super::aggregate::{aggregate, Aggregation};
use super::model::{AgeBracket, Dimension, Record};

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub total_respondents: usize,
    /// Distinct answered countries.
    pub total_countries: usize,
    /// Mean derived age over records that have one.
    pub average_age: Option<f64>,
}

impl Metrics {
    pub fn compute(records: &[&Record]) -> Self {
        let total_countries = records
            .iter()
            .filter_map(|r| r.country.as_deref())
            .collect::<HashSet<_>>()
            .len();

        let (sum, n) = records
            .iter()
            .filter_map(|r| r.age_numeric())
            .fold((0.0, 0usize), |(sum, n), age| (sum + age, n + 1));
        let average_age = (n > 0).then(|| sum / n as f64);

        Metrics {
            total_respondents: records.len(),
            total_countries,
            average_age,
        }
    }

    pub fn average_age_text(&self) -> String {
        match self.average_age {
            Some(age) => format!("{age:.1}"),
            None => "n/a".to_string(),
        }
    }
}

/// Respondent count per age label. Known brackets come first in age order,
/// then any other answer ("Prefer not to say") in first-seen order.
pub fn age_distribution(records: &[&Record]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in records.iter().filter_map(|r| r.age.as_deref()) {
        match counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    // stable sort: unknown labels share a key and stay in first-seen order
    counts.sort_by_key(|(label, _)| {
        AgeBracket::parse(label).map_or(AgeBracket::ALL.len(), |b| b as usize)
    });
    counts
}

// ---------------------------------------------------------------------------
// DashboardSummary – everything the charts need for one filtered view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub metrics: Metrics,
    pub age_distribution: Vec<(String, usize)>,
    pub education: Aggregation,
    pub countries: Aggregation,
    /// One ranking per entry of [`Dimension::EXPERIENCE`].
    pub experience: Vec<Aggregation>,
}

impl DashboardSummary {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let records: Vec<&Record> = records.into_iter().collect();
        let rows = || records.iter().copied();
        DashboardSummary {
            metrics: Metrics::compute(&records),
            age_distribution: age_distribution(&records),
            education: aggregate(rows(), Dimension::Education),
            countries: aggregate(rows(), Dimension::Country),
            experience: Dimension::EXPERIENCE
                .iter()
                .map(|&dim| aggregate(rows(), dim))
                .collect(),
        }
    }
}

impl Default for DashboardSummary {
    fn default() -> Self {
        DashboardSummary::compute(std::iter::empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn respondent(age: &str, country: &str) -> Record {
        Record {
            age: Some(age.to_string()),
            country: Some(country.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_view_degrades_to_zeros() {
        let summary = DashboardSummary::default();
        assert_eq!(summary.metrics, Metrics::default());
        assert_eq!(summary.metrics.average_age_text(), "n/a");
        assert!(summary.age_distribution.is_empty());
        assert!(summary.education.is_empty());
        assert!(summary.countries.is_empty());
        assert_eq!(summary.experience.len(), Dimension::EXPERIENCE.len());
        assert!(summary.experience.iter().all(Aggregation::is_empty));
    }

    #[test]
    fn metrics_skip_missing_ages_and_countries() {
        let records = vec![
            respondent("25-34 years old", "Germany"),
            respondent("35-44 years old", "Germany"),
            respondent("Prefer not to say", "India"),
            Record::default(),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        let metrics = Metrics::compute(&refs);
        assert_eq!(metrics.total_respondents, 4);
        assert_eq!(metrics.total_countries, 2);
        assert_eq!(metrics.average_age, Some(34.5));
        assert_eq!(metrics.average_age_text(), "34.5");
    }

    #[test]
    fn age_distribution_orders_brackets_by_age() {
        let records = vec![
            respondent("35-44 years old", "A"),
            respondent("Prefer not to say", "A"),
            respondent("Under 18 years old", "A"),
            respondent("35-44 years old", "A"),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        assert_eq!(
            age_distribution(&refs),
            vec![
                ("Under 18 years old".to_string(), 1),
                ("35-44 years old".to_string(), 2),
                ("Prefer not to say".to_string(), 1),
            ]
        );
    }

    #[test]
    fn summary_ranks_every_dimension() {
        let records = vec![Record {
            languages: Some("Rust;Go".into()),
            collab_tools: Some("Vim".into()),
            ..respondent("18-24 years old", "Canada")
        }];
        let summary = DashboardSummary::compute(&records);
        assert_eq!(summary.countries.entries, vec![("Canada".to_string(), 1)]);
        assert_eq!(summary.experience[0].dimension, Dimension::Language);
        assert_eq!(summary.experience[0].entries.len(), 2);
        assert_eq!(summary.experience[4].entries, vec![("Vim".to_string(), 1)]);
    }
}
