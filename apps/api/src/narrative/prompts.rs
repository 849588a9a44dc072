// LLM prompt constants and builders for the narrative module.

use crate::models::estimate::EstimateResult;
use crate::models::profile::Profile;

/// System prompt for narrative generation — enforces JSON-only output.
pub const NARRATIVE_SYSTEM: &str =
    "You are an expert HR consultant and salary analyst specializing in the \
    Indonesian job market. You explain salary estimations grounded in the \
    Indonesia Salary Guide, considering experience, education, skills, and \
    location factors. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Narrative prompt template. Placeholders: `{profile_summary}`,
/// `{positions_summary}`, `{estimate_summary}`.
const NARRATIVE_PROMPT_TEMPLATE: &str = r#"Explain the following salary estimation to the candidate.

CANDIDATE PROFILE:
{profile_summary}

MATCHED POSITIONS FROM THE SALARY GUIDE:
{positions_summary}

COMPUTED ESTIMATE:
{estimate_summary}

Return a JSON object with this EXACT schema (no extra fields):
{
  "explanation": "detailed explanation of the estimate considering all factors",
  "recommendations": ["specific career advancement recommendation", "..."],
  "market_insights": "insights about the current Indonesian market for this profile"
}

Rules:
- Ground every claim in the profile and matched positions above; do not invent figures.
- Keep the explanation under 150 words.
- Provide 3 to 5 recommendations."#;

/// How many matched positions the prompt includes.
const MAX_PROMPT_POSITIONS: usize = 5;

pub fn build_narrative_prompt(profile: &Profile, estimate: &EstimateResult) -> String {
    let profile_summary = format!(
        "- Title: {}\n- Experience: {:.1} years ({})\n- Education: {:?}\n- Industry: {}\n- Skills: {}\n- Location: {}",
        profile.current_title.as_deref().unwrap_or("unknown"),
        profile.years_experience,
        profile.experience_level().label(),
        profile.education_level,
        profile.detected_industry,
        if profile.skills.is_empty() {
            "none listed".to_string()
        } else {
            profile.skills.join(", ")
        },
        profile.location.as_deref().unwrap_or("unspecified"),
    );

    let positions_summary = estimate
        .matched
        .iter()
        .take(MAX_PROMPT_POSITIONS)
        .map(|m| {
            format!(
                "- {} in {}: IDR {} million/month (similarity {:.2})",
                m.record.job_title,
                m.record.industry,
                m.record.monthly_salary_idr_millions,
                m.similarity
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let estimate_summary = format!(
        "- Range: IDR {:.0}-{:.0} million/month (avg {:.0})\n- Confidence: {:.2}\n- Factors: experience x{:.2}, education x{:.2}, location x{:.2}",
        estimate.estimated_min_millions,
        estimate.estimated_max_millions,
        estimate.estimated_avg_millions,
        estimate.confidence,
        estimate.multipliers.experience,
        estimate.multipliers.education,
        estimate.multipliers.location,
    );

    NARRATIVE_PROMPT_TEMPLATE
        .replace("{profile_summary}", &profile_summary)
        .replace("{positions_summary}", &positions_summary)
        .replace("{estimate_summary}", &estimate_summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::estimator::{estimate, EstimatorParams};
    use crate::models::estimate::CandidateMatch;
    use crate::models::profile::EducationLevel;
    use crate::models::record::SalaryRecord;

    #[test]
    fn test_prompt_includes_profile_and_positions() {
        let profile = Profile {
            current_title: Some("Data Analyst".to_string()),
            years_experience: 4.0,
            education_level: EducationLevel::Bachelor,
            detected_industry: "Technology".to_string(),
            skills: vec!["sql".to_string(), "python".to_string()],
            location: Some("Jakarta".to_string()),
        };
        let candidates = vec![CandidateMatch {
            record: SalaryRecord {
                industry: "Technology".to_string(),
                category: "Analytics".to_string(),
                job_title: "Data Analyst".to_string(),
                monthly_salary_idr_millions: 30.0,
            },
            similarity: 0.9,
        }];
        let result = estimate(&profile, &candidates, &EstimatorParams::default()).unwrap();
        let prompt = build_narrative_prompt(&profile, &result);

        assert!(prompt.contains("Data Analyst"));
        assert!(prompt.contains("sql, python"));
        assert!(prompt.contains("IDR 30 million/month"));
        assert!(prompt.contains("\"explanation\""));
    }
}
