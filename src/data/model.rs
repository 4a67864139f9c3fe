use std::fmt;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const MAIN_BRANCH: &str = "MainBranch";
pub const AGE: &str = "Age";
pub const ED_LEVEL: &str = "EdLevel";
pub const COUNTRY: &str = "Country";
pub const LANGUAGES: &str = "LanguageHaveWorkedWith";
pub const DATABASES: &str = "DatabaseHaveWorkedWith";
pub const PLATFORMS: &str = "PlatformHaveWorkedWith";
pub const WEB_FRAMEWORKS: &str = "WebframeHaveWorkedWith";
pub const COLLAB_TOOLS: &str = "NEWCollabToolsHaveWorkedWith";

/// Every column the dashboard reads, in export order.
pub const COLUMNS: [&str; 9] = [
    MAIN_BRANCH,
    AGE,
    ED_LEVEL,
    COUNTRY,
    LANGUAGES,
    DATABASES,
    PLATFORMS,
    WEB_FRAMEWORKS,
    COLLAB_TOOLS,
];

/// Separator used inside multi-value answers ("Python;Go;Rust").
pub const MULTI_VALUE_DELIMITER: char = ';';

/// The survey export writes `NA` for unanswered questions.
pub fn is_missing(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == "NA"
}

fn missing_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !is_missing(s)))
}

// ---------------------------------------------------------------------------
// AgeBracket – the categorical age answer and its numeric midpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBracket {
    Under18,
    From18To24,
    From25To34,
    From35To44,
    From45To54,
    From55To64,
    Over65,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 7] = [
        AgeBracket::Under18,
        AgeBracket::From18To24,
        AgeBracket::From25To34,
        AgeBracket::From35To44,
        AgeBracket::From45To54,
        AgeBracket::From55To64,
        AgeBracket::Over65,
    ];

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Under18 => "Under 18 years old",
            AgeBracket::From18To24 => "18-24 years old",
            AgeBracket::From25To34 => "25-34 years old",
            AgeBracket::From35To44 => "35-44 years old",
            AgeBracket::From45To54 => "45-54 years old",
            AgeBracket::From55To64 => "55-64 years old",
            AgeBracket::Over65 => "65 years or older",
        }
    }

    /// Representative age of the bracket.
    pub fn midpoint(self) -> f64 {
        match self {
            AgeBracket::Under18 => 17.0,
            AgeBracket::From18To24 => 21.0,
            AgeBracket::From25To34 => 29.5,
            AgeBracket::From35To44 => 39.5,
            AgeBracket::From45To54 => 49.5,
            AgeBracket::From55To64 => 59.5,
            AgeBracket::Over65 => 70.0,
        }
    }
}

/// Numeric age for an age-bracket label, `None` for anything unrecognised.
pub fn age_midpoint(label: &str) -> Option<f64> {
    AgeBracket::parse(label).map(AgeBracket::midpoint)
}

// ---------------------------------------------------------------------------
// RespondentCategory – classification of the MainBranch answer
// ---------------------------------------------------------------------------

pub const PROFESSIONAL_BRANCH: &str = "I am a developer by profession";
pub const LEARNER_BRANCH: &str = "I am learning to code";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespondentCategory {
    Professional,
    Learner,
    /// Everyone who is neither of the above, including unanswered.
    Other,
}

impl RespondentCategory {
    pub const ALL: [RespondentCategory; 3] = [
        RespondentCategory::Professional,
        RespondentCategory::Learner,
        RespondentCategory::Other,
    ];

    pub fn classify(main_branch: Option<&str>) -> Self {
        match main_branch {
            Some(PROFESSIONAL_BRANCH) => RespondentCategory::Professional,
            Some(LEARNER_BRANCH) => RespondentCategory::Learner,
            _ => RespondentCategory::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RespondentCategory::Professional => "Professional Developer",
            RespondentCategory::Learner => "Learning to Code",
            RespondentCategory::Other => "Other Coders",
        }
    }
}

impl fmt::Display for RespondentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Dimension – a field the dashboard ranks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Country,
    Education,
    Language,
    Database,
    Platform,
    WebFramework,
    CollabTool,
}

impl Dimension {
    /// The "Programming Experience" charts, in display order.
    pub const EXPERIENCE: [Dimension; 5] = [
        Dimension::Language,
        Dimension::Database,
        Dimension::Platform,
        Dimension::WebFramework,
        Dimension::CollabTool,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Dimension::Country => COUNTRY,
            Dimension::Education => ED_LEVEL,
            Dimension::Language => LANGUAGES,
            Dimension::Database => DATABASES,
            Dimension::Platform => PLATFORMS,
            Dimension::WebFramework => WEB_FRAMEWORKS,
            Dimension::CollabTool => COLLAB_TOOLS,
        }
    }

    /// Whether the answer is a `;`-separated list rather than a single value.
    pub fn is_multi_value(self) -> bool {
        !matches!(self, Dimension::Country | Dimension::Education)
    }

    pub fn title(self) -> &'static str {
        match self {
            Dimension::Country => "Top 10 Respondent Based On Country Distribution",
            Dimension::Education => "Top 10 Education Levels",
            Dimension::Language => "Top 10 Most Popular Programming Languages Used by Developers",
            Dimension::Database => "Top 10 Most Popular Databases Used by Developers",
            Dimension::Platform => "Top 10 Most Popular Cloud Platforms Used by Developers",
            Dimension::WebFramework => "Top 10 Most Popular Web Frameworks Used by Developers",
            Dimension::CollabTool => "Top 10 Most Popular IDE's Used by Developers",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Dimension::Country => "Country",
            Dimension::Education => "Education Level",
            Dimension::Language => "Programming Language",
            Dimension::Database => "Database",
            Dimension::Platform => "Cloud Platform",
            Dimension::WebFramework => "Web Framework",
            Dimension::CollabTool => "IDE Tools",
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one survey response
// ---------------------------------------------------------------------------

/// One respondent's answers. Every field is optional because any question
/// may have been skipped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "MainBranch", default, deserialize_with = "missing_as_none")]
    pub main_branch: Option<String>,
    #[serde(rename = "Age", default, deserialize_with = "missing_as_none")]
    pub age: Option<String>,
    #[serde(rename = "EdLevel", default, deserialize_with = "missing_as_none")]
    pub ed_level: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "missing_as_none")]
    pub country: Option<String>,
    #[serde(rename = "LanguageHaveWorkedWith", default, deserialize_with = "missing_as_none")]
    pub languages: Option<String>,
    #[serde(rename = "DatabaseHaveWorkedWith", default, deserialize_with = "missing_as_none")]
    pub databases: Option<String>,
    #[serde(rename = "PlatformHaveWorkedWith", default, deserialize_with = "missing_as_none")]
    pub platforms: Option<String>,
    #[serde(rename = "WebframeHaveWorkedWith", default, deserialize_with = "missing_as_none")]
    pub web_frameworks: Option<String>,
    #[serde(
        rename = "NEWCollabToolsHaveWorkedWith",
        default,
        deserialize_with = "missing_as_none"
    )]
    pub collab_tools: Option<String>,
}

impl Record {
    /// Build a record from a column lookup (used by columnar loaders).
    pub fn from_columns<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut field = |column: &str| get(column).filter(|s| !is_missing(s));
        Record {
            main_branch: field(MAIN_BRANCH),
            age: field(AGE),
            ed_level: field(ED_LEVEL),
            country: field(COUNTRY),
            languages: field(LANGUAGES),
            databases: field(DATABASES),
            platforms: field(PLATFORMS),
            web_frameworks: field(WEB_FRAMEWORKS),
            collab_tools: field(COLLAB_TOOLS),
        }
    }

    pub fn age_numeric(&self) -> Option<f64> {
        self.age.as_deref().and_then(age_midpoint)
    }

    pub fn category(&self) -> RespondentCategory {
        RespondentCategory::classify(self.main_branch.as_deref())
    }

    pub fn value(&self, dimension: Dimension) -> Option<&str> {
        let field = match dimension {
            Dimension::Country => &self.country,
            Dimension::Education => &self.ed_level,
            Dimension::Language => &self.languages,
            Dimension::Database => &self.databases,
            Dimension::Platform => &self.platforms,
            Dimension::WebFramework => &self.web_frameworks,
            Dimension::CollabTool => &self.collab_tools,
        };
        field.as_deref()
    }

    /// The answer split into individual tokens. Missing answers yield nothing,
    /// and empty entries such as the middle of `"A;;B"` are skipped.
    pub fn tokens(&self, dimension: Dimension) -> impl Iterator<Item = &str> {
        let value = self.value(dimension);
        let parts: Box<dyn Iterator<Item = &str> + '_> = match value {
            None => Box::new(std::iter::empty()),
            Some(v) if dimension.is_multi_value() => Box::new(v.split(MULTI_VALUE_DELIMITER)),
            Some(v) => Box::new(std::iter::once(v)),
        };
        parts.filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All responses in source order. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    pub records: Vec<Record>,
}

impl SurveyDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        SurveyDataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records at the given indices, in index order.
    pub fn select<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = &'a Record> + 'a {
        indices.iter().filter_map(|&i| self.records.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_age_is_bracket_midpoint() {
        let ages: Vec<Option<f64>> = AgeBracket::ALL
            .iter()
            .map(|b| age_midpoint(b.label()))
            .collect();
        assert_eq!(
            ages,
            vec![
                Some(17.0),
                Some(21.0),
                Some(29.5),
                Some(39.5),
                Some(49.5),
                Some(59.5),
                Some(70.0)
            ]
        );
        assert_eq!(age_midpoint("Prefer not to say"), None);
        assert_eq!(age_midpoint(""), None);
    }

    #[test]
    fn record_without_age_has_no_numeric_age() {
        let record = Record::default();
        assert_eq!(record.age_numeric(), None);
    }

    #[test]
    fn classify_main_branch() {
        assert_eq!(
            RespondentCategory::classify(Some(PROFESSIONAL_BRANCH)),
            RespondentCategory::Professional
        );
        assert_eq!(
            RespondentCategory::classify(Some(LEARNER_BRANCH)),
            RespondentCategory::Learner
        );
        assert_eq!(
            RespondentCategory::classify(Some("I code primarily as a hobby")),
            RespondentCategory::Other
        );
        assert_eq!(RespondentCategory::classify(None), RespondentCategory::Other);
    }

    #[test]
    fn tokens_split_only_multi_value_fields() {
        let record = Record {
            country: Some("Bosnia;Herzegovina".into()),
            languages: Some("Python;;Go".into()),
            ..Default::default()
        };
        let country: Vec<&str> = record.tokens(Dimension::Country).collect();
        let langs: Vec<&str> = record.tokens(Dimension::Language).collect();
        assert_eq!(country, vec!["Bosnia;Herzegovina"]);
        assert_eq!(langs, vec!["Python", "Go"]);
        assert_eq!(record.tokens(Dimension::Database).count(), 0);
    }

    #[test]
    fn from_columns_treats_na_as_missing() {
        let record = Record::from_columns(|col| match col {
            AGE => Some("25-34 years old".into()),
            COUNTRY => Some("NA".into()),
            _ => None,
        });
        assert_eq!(record.age_numeric(), Some(29.5));
        assert_eq!(record.country, None);
    }
}
