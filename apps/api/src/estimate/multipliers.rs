//! Factor multiplier tables — static multiplicative adjustments applied to a
//! base salary, one per profile dimension.
//!
//! Values come from the Indonesia Salary Guide calibration. Experience
//! multipliers are strictly increasing across bands, which is what makes
//! estimates monotonic in experience.

use crate::models::estimate::MultiplierSet;
use crate::models::profile::{EducationLevel, ExperienceLevel, Profile};

pub fn experience_multiplier(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Entry => 0.70,
        ExperienceLevel::Junior => 0.85,
        ExperienceLevel::Mid => 1.00,
        ExperienceLevel::Senior => 1.20,
        ExperienceLevel::Expert => 1.40,
    }
}

pub fn education_multiplier(level: EducationLevel) -> f64 {
    match level {
        EducationLevel::Highschool => 0.70,
        EducationLevel::Diploma => 0.85,
        EducationLevel::Bachelor => 1.00,
        EducationLevel::Master => 1.15,
        EducationLevel::Phd => 1.30,
    }
}

/// City adjustments relative to Jakarta. Matched as case-folded substrings
/// so "Jakarta Selatan" still resolves to Jakarta.
const LOCATION_MULTIPLIERS: &[(&str, f64)] = &[
    ("jakarta", 1.00),
    ("surabaya", 0.85),
    ("bandung", 0.85),
    ("medan", 0.80),
    ("semarang", 0.80),
];

const LOCATION_OTHER: f64 = 0.75;

/// Missing location assumes Jakarta; an unrecognized city gets the
/// "other" discount.
pub fn location_multiplier(location: Option<&str>) -> f64 {
    let location = match location {
        Some(l) if !l.trim().is_empty() => l.to_lowercase(),
        _ => return 1.0,
    };
    for (city, multiplier) in LOCATION_MULTIPLIERS {
        if location.contains(city) {
            return *multiplier;
        }
    }
    LOCATION_OTHER
}

/// Derives the full multiplier set for one profile. Deterministic; no
/// persistence.
pub fn for_profile(profile: &Profile) -> MultiplierSet {
    MultiplierSet {
        experience: experience_multiplier(profile.experience_level()),
        education: education_multiplier(profile.education_level),
        location: location_multiplier(profile.location.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(years: f64, education: EducationLevel, location: Option<&str>) -> Profile {
        Profile {
            current_title: None,
            years_experience: years,
            education_level: education,
            detected_industry: "Technology".to_string(),
            skills: vec![],
            location: location.map(|l| l.to_string()),
        }
    }

    #[test]
    fn test_experience_multipliers_strictly_increase() {
        let bands = [
            ExperienceLevel::Entry,
            ExperienceLevel::Junior,
            ExperienceLevel::Mid,
            ExperienceLevel::Senior,
            ExperienceLevel::Expert,
        ];
        for pair in bands.windows(2) {
            assert!(experience_multiplier(pair[0]) < experience_multiplier(pair[1]));
        }
    }

    #[test]
    fn test_all_multipliers_are_positive() {
        for level in [
            EducationLevel::Highschool,
            EducationLevel::Diploma,
            EducationLevel::Bachelor,
            EducationLevel::Master,
            EducationLevel::Phd,
        ] {
            assert!(education_multiplier(level) > 0.0);
        }
        assert!(location_multiplier(Some("Mars")) > 0.0);
    }

    #[test]
    fn test_location_substring_match() {
        assert_eq!(location_multiplier(Some("Jakarta Selatan")), 1.0);
        assert_eq!(location_multiplier(Some("SURABAYA")), 0.85);
        assert_eq!(location_multiplier(Some("Yogyakarta")), 1.0); // contains "jakarta"
        assert_eq!(location_multiplier(Some("Makassar")), LOCATION_OTHER);
    }

    #[test]
    fn test_missing_location_assumes_jakarta() {
        assert_eq!(location_multiplier(None), 1.0);
        assert_eq!(location_multiplier(Some("  ")), 1.0);
    }

    #[test]
    fn test_for_profile_combines_all_three() {
        let set = for_profile(&profile(9.0, EducationLevel::Master, Some("Medan")));
        assert_eq!(set.experience, 1.20);
        assert_eq!(set.education, 1.15);
        assert_eq!(set.location, 0.80);
    }
}
