//! Salary guide records — one row per (industry, category, job title).

use serde::{Deserialize, Serialize};

/// A single salary guide entry. Immutable once loaded; salaries are monthly
/// figures in millions of IDR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub industry: String,
    #[serde(default)]
    pub category: String,
    pub job_title: String,
    /// Accepts the guide's short `salary` key as well as the long form.
    #[serde(alias = "salary")]
    pub monthly_salary_idr_millions: f64,
}

impl SalaryRecord {
    /// Text the similarity index runs over: title, industry, category, and
    /// related terms so "programmer" still reaches "Back-end Developer".
    pub fn searchable_text(&self) -> String {
        let mut parts = vec![
            self.job_title.clone(),
            self.industry.clone(),
            self.category.clone(),
        ];
        let variations = title_variations(&self.job_title);
        if !variations.is_empty() {
            parts.push(variations);
        }
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}

/// Related terms per common title word, taken from the salary guide's
/// vocabulary. Matched case-insensitively against the title.
const TITLE_VARIATIONS: &[(&str, &str)] = &[
    (
        "developer",
        "programmer engineer coder software development coding",
    ),
    (
        "manager",
        "lead head supervisor coordinator management leader",
    ),
    ("analyst", "specialist expert consultant analysis analytics"),
    ("director", "head vp vice president executive leadership"),
    ("engineer", "developer specialist technical engineering"),
    ("marketing", "brand digital social media advertising promotion"),
    ("finance", "accounting financial controller treasury audit"),
    ("hr", "human resources people talent recruitment organizational"),
];

fn title_variations(job_title: &str) -> String {
    let title_lower = job_title.to_lowercase();
    let mut out = Vec::new();
    for (key, values) in TITLE_VARIATIONS {
        if title_lower.contains(key) {
            out.push(*values);
        }
    }
    out.join(" ")
}
