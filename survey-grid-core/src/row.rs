use serde::{Deserialize, Serialize};
use survey_grid_common::{DataConfig, Result, SurveyGridError};

use crate::column::FilterColumn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_full_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub survey_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// One survey response. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_info: UserInfo,
    #[serde(default)]
    pub project_id: i64,
    #[serde(default)]
    pub data: Vec<QuestionAnswer>,
}

impl Row {
    pub fn full_name(&self) -> &str {
        &self.user_info.user_full_name
    }

    /// First answer recorded for `question`.
    pub fn answer(&self, question: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|qa| qa.question == question)
            .map(|qa| qa.answer.as_str())
    }
}

/// Resolves a row's value for each filterable column by question label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccessor {
    pub project_question: String,
    pub company_question: String,
}

impl Default for FieldAccessor {
    fn default() -> Self {
        Self {
            project_question: "Project".into(),
            company_question: "Company".into(),
        }
    }
}

impl From<&DataConfig> for FieldAccessor {
    fn from(cfg: &DataConfig) -> Self {
        Self {
            project_question: cfg.project_question.clone(),
            company_question: cfg.company_question.clone(),
        }
    }
}

impl FieldAccessor {
    pub fn project_answer<'r>(&self, row: &'r Row) -> Result<&'r str> {
        lookup(row, &self.project_question)
    }

    pub fn company_answer<'r>(&self, row: &'r Row) -> Result<&'r str> {
        lookup(row, &self.company_question)
    }

    pub fn value<'r>(&self, row: &'r Row, column: FilterColumn) -> Result<&'r str> {
        match column {
            FilterColumn::Names => Ok(row.full_name()),
            FilterColumn::Projects => self.project_answer(row),
            FilterColumn::Companies => self.company_answer(row),
        }
    }

    /// Fails with `MalformedRow` unless every filterable column resolves.
    pub fn validate(&self, row: &Row) -> Result<()> {
        for column in FilterColumn::ALL {
            self.value(row, column)?;
        }
        Ok(())
    }
}

fn lookup<'r>(row: &'r Row, question: &str) -> Result<&'r str> {
    row.answer(question).ok_or_else(|| SurveyGridError::MalformedRow {
        id: row.id.clone(),
        reason: format!("no answer for question '{question}'"),
    })
}
