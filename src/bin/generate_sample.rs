use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

const MAIN_BRANCHES: [&str; 5] = [
    "I am a developer by profession",
    "I am learning to code",
    "I code primarily as a hobby",
    "I am not primarily a developer, but I write code sometimes as part of my work/studies",
    "I used to be a developer by profession, but no longer am",
];

const AGES: [&str; 8] = [
    "Under 18 years old",
    "18-24 years old",
    "25-34 years old",
    "35-44 years old",
    "45-54 years old",
    "55-64 years old",
    "65 years or older",
    "Prefer not to say",
];

const ED_LEVELS: [&str; 5] = [
    "Bachelor’s degree (B.A., B.S., B.Eng., etc.)",
    "Master’s degree (M.A., M.S., M.Eng., MBA, etc.)",
    "Some college/university study without earning a degree",
    "Secondary school (e.g. American high school, German Realschule or Gymnasium, etc.)",
    "Professional degree (JD, MD, Ph.D, Ed.D, etc.)",
];

const COUNTRIES: [&str; 10] = [
    "United States of America",
    "Germany",
    "India",
    "United Kingdom of Great Britain and Northern Ireland",
    "Canada",
    "France",
    "Poland",
    "Netherlands",
    "Australia",
    "Brazil",
];

const LANGUAGES: [&str; 12] = [
    "JavaScript", "HTML/CSS", "Python", "SQL", "TypeScript", "Bash/Shell",
    "Java", "C#", "C++", "C", "Go", "Rust",
];
const DATABASES: [&str; 8] = [
    "PostgreSQL", "MySQL", "SQLite", "MongoDB", "Microsoft SQL Server", "Redis",
    "MariaDB", "Elasticsearch",
];
const PLATFORMS: [&str; 6] = [
    "Amazon Web Services (AWS)", "Microsoft Azure", "Google Cloud", "Firebase",
    "Cloudflare", "Digital Ocean",
];
const WEB_FRAMEWORKS: [&str; 8] = [
    "Node.js", "React", "jQuery", "Express", "Angular", "Next.js", "ASP.NET CORE", "Vue.js",
];
const COLLAB_TOOLS: [&str; 7] = [
    "Visual Studio Code", "Visual Studio", "IntelliJ IDEA", "Notepad++", "Vim",
    "Android Studio", "PyCharm",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Index skewed towards the front of the list, like real survey answers.
    fn skewed_index(&mut self, len: usize) -> usize {
        let u = self.next_f64();
        ((u * u) * len as f64) as usize % len
    }

    fn pick<'a>(&mut self, values: &[&'a str]) -> &'a str {
        values[self.skewed_index(values.len())]
    }

    /// A `;`-joined answer, or `NA` for a skipped question.
    fn multi<'a>(&mut self, values: &[&'a str], skip_rate: f64) -> String {
        if self.next_f64() < skip_rate {
            return "NA".to_string();
        }
        let mut chosen: Vec<&str> = values
            .iter()
            .copied()
            .filter(|_| self.next_f64() < 0.35)
            .collect();
        if chosen.is_empty() {
            chosen.push(self.pick(values));
        }
        chosen.join(";")
    }

    fn maybe<'a>(&mut self, values: &[&'a str], skip_rate: f64) -> &'a str {
        if self.next_f64() < skip_rate {
            "NA"
        } else {
            self.pick(values)
        }
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_rows = 5_000;

    let mut csv = csv::Writer::from_writer(Vec::new());
    csv.write_record([
        "ResponseId",
        "MainBranch",
        "Age",
        "EdLevel",
        "Country",
        "LanguageHaveWorkedWith",
        "DatabaseHaveWorkedWith",
        "PlatformHaveWorkedWith",
        "WebframeHaveWorkedWith",
        "NEWCollabToolsHaveWorkedWith",
    ])?;

    for id in 1..=n_rows {
        let row = [
            id.to_string(),
            rng.pick(&MAIN_BRANCHES).to_string(),
            rng.pick(&AGES).to_string(),
            rng.maybe(&ED_LEVELS, 0.02).to_string(),
            rng.maybe(&COUNTRIES, 0.01).to_string(),
            rng.multi(&LANGUAGES, 0.05),
            rng.multi(&DATABASES, 0.2),
            rng.multi(&PLATFORMS, 0.3),
            rng.multi(&WEB_FRAMEWORKS, 0.25),
            rng.multi(&COLLAB_TOOLS, 0.05),
        ];
        csv.write_record(&row)?;
    }
    let body = csv.into_inner().context("flushing CSV")?;

    let output_path = "survey_results_public.zip";
    let file = File::create(output_path).context("creating output file")?;
    let mut archive = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    archive.start_file("survey_results_public.csv", options)?;
    archive.write_all(&body)?;
    archive.finish()?;

    println!("Wrote {n_rows} synthetic responses to {output_path}");
    Ok(())
}
