use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use survey_grid_common::Result;
use tracing::info;

use crate::row::{QuestionAnswer, Row, UserInfo};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub path: PathBuf,
    pub file_size: u64,
    pub row_count: usize,
}

/// Reads a JSON array of rows.
pub fn open_dataset(path: &Path) -> Result<(DatasetInfo, Vec<Row>)> {
    let content = std::fs::read_to_string(path)?;
    let rows: Vec<Row> = serde_json::from_str(&content)?;
    let info = DatasetInfo {
        path: path.to_path_buf(),
        file_size: content.len() as u64,
        row_count: rows.len(),
    };
    info!(path = %path.display(), rows = info.row_count, bytes = info.file_size, "loaded dataset");
    Ok((info, rows))
}

pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    open_dataset(path).map(|(_, rows)| rows)
}

/// Built-in three-row dataset used when no file is given.
pub fn sample_rows() -> Vec<Row> {
    [
        ("63bfeee77f76adde4de2a8c0", "Test Client 1", "TestProjectAmurov", ".ClientAmurov"),
        ("63bfeee77f76adde4de2a8c1", "Test Client 2", "TestProjectAmurov", ".ClientAmurov"),
        ("63bfeee77f76adde4de2a8c2", "Test Client 3", "TestProjectAmurov2", "PT 2"),
    ]
    .into_iter()
    .map(|(id, name, project, company)| Row {
        id: id.into(),
        user_info: UserInfo {
            user_full_name: name.into(),
            user_email: "marius.lupasco@amdaris.com".into(),
            survey_date: "2023-01-12T11:28:39.338000".into(),
        },
        project_id: 399,
        data: [
            ("Name", "Test Client"),
            ("Job Title", "Delivery Lead"),
            ("Project", project),
            ("Company", company),
        ]
        .into_iter()
        .map(|(q, a)| QuestionAnswer { question: q.into(), answer: a.into() })
        .collect(),
    })
    .collect()
}

pub fn sample_info() -> DatasetInfo {
    DatasetInfo {
        path: PathBuf::from("<sample>"),
        file_size: 0,
        row_count: 3,
    }
}
