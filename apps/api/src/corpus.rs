//! Salary guide corpus — loads the structured salary table into memory.
//!
//! Loaded once at startup and shared read-only across requests. Malformed
//! entries are skipped with a warning, never fatal; a missing guide file
//! falls back to the embedded sample table.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::models::record::SalaryRecord;

/// In-memory, immutable salary guide.
#[derive(Debug, Clone)]
pub struct SalaryCorpus {
    records: Vec<SalaryRecord>,
}

impl SalaryCorpus {
    /// Loads records from a JSON array file (schema: industry, category,
    /// job_title, salary in millions IDR).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "salary guide not found at {}; using embedded sample data",
                    path.display()
                );
                return Ok(Self::sample());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        let entries: Vec<Value> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a JSON array", path.display()))?;

        let total = entries.len();
        let records: Vec<SalaryRecord> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(idx, entry)| match Self::validate(entry) {
                Ok(record) => Some(record),
                Err(reason) => {
                    warn!("skipping malformed salary record #{idx}: {reason}");
                    None
                }
            })
            .collect();

        info!(
            "loaded {} salary records from {} ({} skipped)",
            records.len(),
            path.display(),
            total - records.len()
        );
        Ok(Self { records })
    }

    /// Parses and validates one raw entry. Titles must be non-empty and
    /// salaries positive finite numbers.
    fn validate(entry: Value) -> std::result::Result<SalaryRecord, String> {
        let record: SalaryRecord =
            serde_json::from_value(entry).map_err(|e| e.to_string())?;
        if record.job_title.trim().is_empty() {
            return Err("empty job_title".to_string());
        }
        if record.industry.trim().is_empty() {
            return Err("empty industry".to_string());
        }
        let salary = record.monthly_salary_idr_millions;
        if !salary.is_finite() || salary <= 0.0 {
            return Err(format!("non-positive salary {salary}"));
        }
        Ok(record)
    }

    /// Embedded subset of the Indonesia Salary Guide, used when no guide
    /// file is available.
    pub fn sample() -> Self {
        let rec = |industry: &str, category: &str, title: &str, salary: f64| SalaryRecord {
            industry: industry.to_string(),
            category: category.to_string(),
            job_title: title.to_string(),
            monthly_salary_idr_millions: salary,
        };

        Self {
            records: vec![
                rec("Technology", "Development", "Front-end Developer", 20.0),
                rec("Technology", "Development", "Back-end Developer", 25.0),
                rec("Technology", "Development", "Full-stack Developer", 30.0),
                rec("Technology", "Development", "Tech Lead", 40.0),
                rec("Technology", "Development", "Engineering Manager", 67.0),
                rec("Technology", "Analytics", "Data Analyst", 30.0),
                rec("Technology", "Analytics", "Data Scientist", 46.0),
                rec("Technology", "Analytics", "Data Science Manager", 72.0),
                rec("Accounting & Finance", "Accounting", "Senior Accountant", 25.0),
                rec("Accounting & Finance", "Accounting", "Accounting Manager", 45.0),
                rec("Accounting & Finance", "Accounting", "Finance Manager", 50.0),
                rec("Accounting & Finance", "Accounting", "Financial Controller", 80.0),
                rec("Sales & Marketing", "Consumer Products", "Marketing Executive", 12.0),
                rec("Sales & Marketing", "Consumer Products", "Brand Manager", 35.0),
                rec("Sales & Marketing", "Consumer Products", "Marketing Manager", 70.0),
                rec("Sales & Marketing", "Digital", "Digital Marketing Manager", 40.0),
                rec("Human Resources", "Generalist", "HR Generalist", 21.0),
                rec("Human Resources", "Generalist", "HR Manager", 35.0),
                rec("Human Resources", "Generalist", "HR Business Partner", 45.0),
                rec("Human Resources", "Generalist", "Head of HR", 100.0),
            ],
        }
    }

    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        Self { records }
    }
}
