//! Candidate profile — the structured input to the estimation pipeline.
//!
//! Produced upstream by a CV parser; this service treats it as read-only.

use serde::{Deserialize, Serialize};

/// Highest completed education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Highschool,
    Diploma,
    Bachelor,
    Master,
    Phd,
}

/// Experience band derived from total years of experience.
/// Ordering matters: bands are compared when matching roles and the
/// multiplier table is monotonic across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Expert,
}

impl ExperienceLevel {
    /// Band boundaries: entry 0-2, junior 2-5, mid 5-8, senior 8-12, expert 12+.
    pub fn from_years(years: f64) -> Self {
        if years < 2.0 {
            ExperienceLevel::Entry
        } else if years < 5.0 {
            ExperienceLevel::Junior
        } else if years < 8.0 {
            ExperienceLevel::Mid
        } else if years < 12.0 {
            ExperienceLevel::Senior
        } else {
            ExperienceLevel::Expert
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Expert => "expert",
        }
    }
}

/// Structured candidate profile. Created once per request, read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Most recent job title, when the upstream parser detected one.
    #[serde(default)]
    pub current_title: Option<String>,
    pub years_experience: f64,
    pub education_level: EducationLevel,
    pub detected_industry: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Profile {
    pub fn experience_level(&self) -> ExperienceLevel {
        ExperienceLevel::from_years(self.years_experience)
    }
}
