//! Survey answer normalization into the canonical project fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AppError;

/// Canonical project field recognised in survey answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    WorkType,
    GrossInternalArea,
    ExpectedFinishes,
    SiteConditions,
}

impl ProjectField {
    /// All fields, in rendering order.
    pub const ALL: [ProjectField; 4] = [
        ProjectField::WorkType,
        ProjectField::GrossInternalArea,
        ProjectField::ExpectedFinishes,
        ProjectField::SiteConditions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProjectField::WorkType => "work_type",
            ProjectField::GrossInternalArea => "gross_internal_area",
            ProjectField::ExpectedFinishes => "expected_finishes",
            ProjectField::SiteConditions => "site_conditions",
        }
    }

    /// Case-sensitive substring that identifies this field in a question.
    pub fn question_pattern(&self) -> &'static str {
        match self {
            ProjectField::WorkType => "Project Type",
            ProjectField::GrossInternalArea => "gross internal area",
            ProjectField::ExpectedFinishes => "expected finishes and materials",
            ProjectField::SiteConditions => "site-specific conditions",
        }
    }

    /// First field whose pattern occurs in `question`.
    pub fn match_question(question: &str) -> Option<ProjectField> {
        Self::ALL.into_iter().find(|field| question.contains(field.question_pattern()))
    }
}

/// One `{question, answer}` survey record.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyAnswer {
    pub question: String,
    pub answer: Value,
}

/// Normalized project details keyed by canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectDetails {
    fields: BTreeMap<ProjectField, String>,
}

impl ProjectDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ProjectField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Value for `field`, or `"N/A"` when absent.
    pub fn display(&self, field: ProjectField) -> &str {
        self.get(field).unwrap_or("N/A")
    }

    pub fn insert(&mut self, field: ProjectField, answer: impl Into<String>) {
        self.fields.insert(field, answer.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Map survey records onto the canonical project fields.
///
/// Records whose question matches no pattern are dropped. A later record for
/// the same field replaces the earlier answer. Records lacking `question` or
/// `answer` fail the whole extraction.
pub fn extract_project_info(records: &[Value]) -> Result<ProjectDetails, AppError> {
    let mut details = ProjectDetails::new();

    for (index, record) in records.iter().enumerate() {
        let answer = SurveyAnswer::deserialize(record)
            .map_err(|e| AppError::malformed(format!("project_info_payload[{}]", index), e))?;

        if let Some(field) = ProjectField::match_question(&answer.question) {
            details.insert(field, answer_text(&answer.answer));
        }
    }

    Ok(details)
}

fn answer_text(answer: &Value) -> String {
    match answer {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
