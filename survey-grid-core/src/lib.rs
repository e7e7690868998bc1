pub mod column;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod grid;
pub mod menu;
pub mod row;

pub use column::{default_columns, ColumnDescriptor, FilterColumn};
pub use dataset::{load_rows, open_dataset, sample_info, sample_rows, DatasetInfo};
pub use export::{export_csv, export_json, print_rows, write_table};
pub use filter::{apply_filters, cascade_resets, compute_visible_rows, row_matches, rows_matching_others, ApplyOutcome};
pub use grid::FilterGrid;
pub use menu::{ChecklistItem, FilterMenuState, FilterSelection};
pub use row::{FieldAccessor, QuestionAnswer, Row, UserInfo};
pub use survey_grid_common::{Result, SurveyGridError};
