//! The salary estimator — a pure function from profile + ranked candidates
//! to a final range, confidence, and rule-based recommendations.

use chrono::Utc;

use crate::errors::AppError;
use crate::estimate::multipliers;
use crate::models::estimate::{CandidateMatch, EstimateResult};
use crate::models::profile::{ExperienceLevel, Profile};

/// Estimator tuning. Carried in `AppState`; defaults match the salary guide
/// calibration.
#[derive(Debug, Clone)]
pub struct EstimatorParams {
    /// Candidates requested from the retriever per estimate.
    pub top_k: usize,
    /// Top-3 scores within this distance of the best are averaged for the
    /// base salary instead of trusting a single record.
    pub tie_tolerance: f32,
    /// Below this many candidates the confidence is discounted.
    pub min_candidates: usize,
    pub sparse_discount: f32,
    /// Range spread around the base: min = (1 - spread) × base, max = (1 + spread) × base.
    pub spread: f64,
    /// Plausible monthly range in millions IDR; estimates are clamped into it.
    pub floor_millions: f64,
    pub ceiling_millions: f64,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            top_k: 10,
            tie_tolerance: 0.05,
            min_candidates: 3,
            sparse_discount: 0.8,
            spread: 0.2,
            floor_millions: 3.0,
            ceiling_millions: 400.0,
        }
    }
}

/// Computes the estimate. No side effects; an empty candidate list is the
/// no-match condition the caller must surface to the user.
pub fn estimate(
    profile: &Profile,
    candidates: &[CandidateMatch],
    params: &EstimatorParams,
) -> Result<EstimateResult, AppError> {
    let top = candidates.first().ok_or_else(|| {
        AppError::NoMatch(
            "insufficient salary data for this profile; no comparable roles found".to_string(),
        )
    })?;

    let base = base_salary(candidates, params);
    let multipliers = multipliers::for_profile(profile);
    let product = multipliers.product();

    let clamp = |v: f64| v.clamp(params.floor_millions, params.ceiling_millions);
    let estimated_min = clamp(base * (1.0 - params.spread) * product);
    let estimated_avg = clamp(base * product);
    let estimated_max = clamp(base * (1.0 + params.spread) * product);

    let mut confidence = top.similarity.clamp(0.0, 1.0);
    if candidates.len() < params.min_candidates {
        confidence *= params.sparse_discount;
    }

    Ok(EstimateResult {
        estimated_min_millions: estimated_min,
        estimated_avg_millions: estimated_avg,
        estimated_max_millions: estimated_max,
        confidence,
        best_match_title: Some(top.record.job_title.clone()),
        multipliers,
        matched: candidates.to_vec(),
        narrative: None,
        recommendations: build_recommendations(profile, candidates),
        estimated_at: Utc::now(),
    })
}

/// Base salary selection: the top match's salary, unless the top-3 scores sit
/// within the tie tolerance of the best — then their mean, so a near-tie
/// doesn't hinge on one record.
fn base_salary(candidates: &[CandidateMatch], params: &EstimatorParams) -> f64 {
    let best = candidates[0].similarity;
    let band: Vec<f64> = candidates
        .iter()
        .take(3)
        .filter(|c| best - c.similarity <= params.tie_tolerance)
        .map(|c| c.record.monthly_salary_idr_millions)
        .collect();

    if band.len() > 1 {
        band.iter().sum::<f64>() / band.len() as f64
    } else {
        candidates[0].record.monthly_salary_idr_millions
    }
}

/// Senior salary line (millions IDR/month) above which the negotiation
/// recommendation kicks in.
const SENIOR_SALARY_LINE: f64 = 50.0;
const MAX_RECOMMENDATIONS: usize = 5;

/// Rule-based career recommendations. LLM-provided ones are merged in front
/// of these by the pipeline when the narrative call succeeds.
fn build_recommendations(profile: &Profile, candidates: &[CandidateMatch]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if profile.experience_level() <= ExperienceLevel::Junior {
        recommendations.push(
            "Focus on building technical expertise and obtaining relevant certifications \
             to accelerate career progression."
                .to_string(),
        );
    }

    if profile.skills.len() < 5 {
        recommendations.push(
            "List more of your technical and soft skills; a richer skill profile improves \
             matching and market value."
                .to_string(),
        );
    }

    if let Some(top) = candidates.first() {
        if top.record.monthly_salary_idr_millions > SENIOR_SALARY_LINE {
            recommendations.push(
                "Your profile matches senior-level positions. Consider negotiating for \
                 leadership roles or exploring executive opportunities."
                    .to_string(),
            );
        }
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::EducationLevel;
    use crate::models::record::SalaryRecord;

    fn profile(years: f64) -> Profile {
        Profile {
            current_title: Some("Full-stack Developer".to_string()),
            years_experience: years,
            education_level: EducationLevel::Bachelor,
            detected_industry: "Technology".to_string(),
            skills: vec![],
            location: Some("Jakarta".to_string()),
        }
    }

    fn candidate(title: &str, salary: f64, similarity: f32) -> CandidateMatch {
        CandidateMatch {
            record: SalaryRecord {
                industry: "Technology".to_string(),
                category: "Development".to_string(),
                job_title: title.to_string(),
                monthly_salary_idr_millions: salary,
            },
            similarity,
        }
    }

    #[test]
    fn test_empty_candidates_is_no_match() {
        let err = estimate(&profile(5.0), &[], &EstimatorParams::default()).unwrap_err();
        assert!(matches!(err, AppError::NoMatch(_)));
    }

    #[test]
    fn test_single_record_scenario() {
        // Full-stack Developer at 30M; 5 years, bachelor, Jakarta => all
        // multipliers 1.0, estimate centered on 30.
        let candidates = vec![candidate("Full-stack Developer", 30.0, 0.92)];
        let result = estimate(&profile(5.0), &candidates, &EstimatorParams::default()).unwrap();

        assert_eq!(result.best_match_title.as_deref(), Some("Full-stack Developer"));
        assert!((result.estimated_avg_millions - 30.0).abs() < 1e-9);
        assert!((result.estimated_min_millions - 24.0).abs() < 1e-9);
        assert!((result.estimated_max_millions - 36.0).abs() < 1e-9);
        assert!(result.confidence > 0.0);
        // Only one candidate: the sparse discount applies.
        assert!((result.confidence - 0.92 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_avg_lies_between_min_and_max_and_all_positive() {
        let candidates = vec![
            candidate("Tech Lead", 40.0, 0.9),
            candidate("Back-end Developer", 25.0, 0.6),
            candidate("Front-end Developer", 20.0, 0.5),
        ];
        for years in [0.5, 3.0, 6.0, 10.0, 20.0] {
            let result =
                estimate(&profile(years), &candidates, &EstimatorParams::default()).unwrap();
            assert!(result.estimated_min_millions > 0.0);
            assert!(result.estimated_min_millions <= result.estimated_avg_millions);
            assert!(result.estimated_avg_millions <= result.estimated_max_millions);
        }
    }

    #[test]
    fn test_estimate_monotonic_in_experience_band() {
        let candidates = vec![
            candidate("Tech Lead", 40.0, 0.9),
            candidate("Back-end Developer", 25.0, 0.6),
            candidate("Front-end Developer", 20.0, 0.5),
        ];
        let params = EstimatorParams::default();
        let mut last_avg = 0.0;
        for years in [1.0, 3.0, 6.0, 10.0, 15.0] {
            let result = estimate(&profile(years), &candidates, &params).unwrap();
            assert!(
                result.estimated_avg_millions >= last_avg,
                "estimate decreased at {years} years"
            );
            last_avg = result.estimated_avg_millions;
        }
    }

    #[test]
    fn test_tie_band_averages_top_salaries() {
        let candidates = vec![
            candidate("Full-stack Developer", 30.0, 0.90),
            candidate("Back-end Developer", 24.0, 0.88),
            candidate("Front-end Developer", 18.0, 0.87),
        ];
        let result = estimate(&profile(5.0), &candidates, &EstimatorParams::default()).unwrap();
        // All three within 0.05 of the best: base = mean(30, 24, 18) = 24.
        assert!((result.estimated_avg_millions - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_winner_is_not_averaged() {
        let candidates = vec![
            candidate("Full-stack Developer", 30.0, 0.90),
            candidate("HR Generalist", 21.0, 0.30),
        ];
        let result = estimate(&profile(5.0), &candidates, &EstimatorParams::default()).unwrap();
        assert!((result.estimated_avg_millions - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamping_to_plausible_range() {
        let params = EstimatorParams {
            floor_millions: 10.0,
            ceiling_millions: 35.0,
            ..Default::default()
        };
        let candidates = vec![candidate("Head of HR", 100.0, 0.9)];
        let result = estimate(&profile(15.0), &candidates, &params).unwrap();
        assert_eq!(result.estimated_max_millions, 35.0);
        assert!(result.estimated_min_millions >= 10.0);
        assert!(result.estimated_min_millions <= result.estimated_avg_millions);
        assert!(result.estimated_avg_millions <= result.estimated_max_millions);
    }

    #[test]
    fn test_confidence_not_discounted_with_enough_candidates() {
        let candidates = vec![
            candidate("Tech Lead", 40.0, 0.75),
            candidate("Back-end Developer", 25.0, 0.6),
            candidate("Front-end Developer", 20.0, 0.5),
        ];
        let result = estimate(&profile(5.0), &candidates, &EstimatorParams::default()).unwrap();
        assert!((result.confidence - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_junior_profile_gets_expertise_recommendation() {
        let candidates = vec![candidate("Front-end Developer", 20.0, 0.8)];
        let result = estimate(&profile(1.0), &candidates, &EstimatorParams::default()).unwrap();
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.contains("technical expertise")));
    }

    #[test]
    fn test_high_salary_match_gets_negotiation_recommendation() {
        let mut p = profile(10.0);
        p.skills = (0..8).map(|i| format!("skill-{i}")).collect();
        let candidates = vec![candidate("Engineering Manager", 67.0, 0.8)];
        let result = estimate(&p, &candidates, &EstimatorParams::default()).unwrap();
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.contains("senior-level")));
    }

    #[test]
    fn test_narrative_starts_empty() {
        let candidates = vec![candidate("Data Analyst", 30.0, 0.8)];
        let result = estimate(&profile(5.0), &candidates, &EstimatorParams::default()).unwrap();
        assert!(result.narrative.is_none());
    }
}
