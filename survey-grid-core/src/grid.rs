use std::collections::HashSet;

use survey_grid_common::{Result, SurveyGridError};
use tracing::debug;

use crate::column::{default_columns, ColumnDescriptor, FilterColumn};
use crate::filter::{apply_filters, rows_matching_others, ApplyOutcome};
use crate::menu::{ChecklistItem, FilterMenuState, FilterSelection};
use crate::row::{FieldAccessor, Row};

/// Filterable grid state: the full row snapshot, the menu checklists and the
/// currently visible subset.
///
/// Checkbox edits are only accepted in the open menu. Closing or switching
/// menus without applying discards them, so `applied` always describes the
/// rows in `visible`.
#[derive(Debug, Clone)]
pub struct FilterGrid {
    rows: Vec<Row>,
    columns: Vec<ColumnDescriptor>,
    fields: FieldAccessor,
    menus: FilterMenuState,
    applied: FilterSelection,
    visible: Vec<usize>,
    active: Option<FilterColumn>,
    menu_open: bool,
}

impl FilterGrid {
    pub fn new(rows: Vec<Row>, columns: Vec<ColumnDescriptor>, fields: FieldAccessor) -> Result<Self> {
        let mut described = HashSet::new();
        for col in &columns {
            if !described.insert(col.filter_by) {
                return Err(SurveyGridError::InvalidFilterOperation(format!(
                    "column '{}' maps to {} which is already described",
                    col.label, col.filter_by
                )));
            }
        }
        for row in &rows {
            fields.validate(row)?;
        }
        let menus = FilterMenuState::from_rows(&rows, &fields)?;
        let visible = (0..rows.len()).collect();
        Ok(Self {
            rows,
            columns,
            fields,
            menus,
            applied: FilterSelection::default(),
            visible,
            active: None,
            menu_open: false,
        })
    }

    pub fn with_defaults(rows: Vec<Row>) -> Result<Self> {
        Self::new(rows, default_columns(), FieldAccessor::default())
    }

    // --- read side ---

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn fields(&self) -> &FieldAccessor {
        &self.fields
    }

    pub fn visible_rows(&self) -> Vec<&Row> {
        self.visible.iter().map(|&i| &self.rows[i]).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn checklist(&self, column: FilterColumn) -> &[ChecklistItem] {
        self.menus.checklist(column)
    }

    pub fn is_all_checked(&self, column: FilterColumn) -> bool {
        self.menus.is_all_checked(column)
    }

    pub fn has_filter(&self, column: FilterColumn) -> bool {
        self.menus.has_filter(column)
    }

    pub fn active_column(&self) -> Option<FilterColumn> {
        self.active
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn value<'r>(&self, row: &'r Row, column: FilterColumn) -> Result<&'r str> {
        self.fields.value(row, column)
    }

    // --- menu lifecycle ---

    /// Drops unapplied checks, then rebuilds `column`'s options from the rows
    /// admitted by the other columns' applied filters and makes it the apply
    /// target.
    pub fn open_menu(&mut self, column: FilterColumn) -> Result<()> {
        self.menus.restore(&self.applied);
        let source = rows_matching_others(&self.rows, &self.applied, &self.fields, column)?;
        self.menus
            .rebuild_column(column, source.iter().map(|&i| &self.rows[i]), &self.fields)?;
        self.active = Some(column);
        self.menu_open = true;
        debug!(column = %column, options = self.menus.checklist(column).len(), "opened filter menu");
        Ok(())
    }

    /// Hides the menu and discards unapplied checks. The last opened column
    /// stays the apply target.
    pub fn close_menu(&mut self) {
        self.menus.restore(&self.applied);
        self.menu_open = false;
    }

    pub fn toggle(&mut self, column: FilterColumn, value: &str) -> Result<bool> {
        self.ensure_editable(column)?;
        self.menus.toggle(column, value)
    }

    pub fn set_checked(&mut self, column: FilterColumn, value: &str, checked: bool) -> Result<()> {
        self.ensure_editable(column)?;
        self.menus.set_checked(column, value, checked)
    }

    pub fn toggle_all(&mut self, column: FilterColumn) -> Result<()> {
        self.ensure_editable(column)?;
        self.menus.toggle_all(column);
        Ok(())
    }

    pub fn clear_all(&mut self, column: FilterColumn) -> Result<()> {
        self.ensure_editable(column)?;
        self.menus.clear_all(column);
        Ok(())
    }

    /// Applies the active column's menu. `None` when no menu was ever opened.
    pub fn apply_filters(&mut self) -> Result<Option<ApplyOutcome>> {
        let Some(target) = self.active else {
            debug!("apply ignored: no filter menu opened yet");
            return Ok(None);
        };
        let outcome = apply_filters(&self.rows, &mut self.menus, target, &self.fields)?;
        self.applied = self.menus.selection();
        self.visible = outcome.visible.clone();
        Ok(Some(outcome))
    }

    /// Checks the given values column by column in precedence order, applying
    /// after each column. Unknown values fail with the options that were on
    /// offer.
    pub fn apply_selections(&mut self, selections: &[(FilterColumn, Vec<String>)]) -> Result<()> {
        let mut ordered: Vec<&(FilterColumn, Vec<String>)> = selections.iter().collect();
        ordered.sort_by_key(|(column, _)| *column);
        for (column, values) in ordered {
            if values.is_empty() {
                continue;
            }
            self.open_menu(*column)?;
            for value in values {
                if self.set_checked(*column, value, true).is_err() {
                    let available: Vec<&str> =
                        self.checklist(*column).iter().map(|i| i.name.as_str()).collect();
                    let err = SurveyGridError::InvalidFilterOperation(format!(
                        "no {column} value '{value}' among the visible rows; available: {}",
                        available.join(", ")
                    ));
                    self.close_menu();
                    return Err(err);
                }
            }
            self.apply_filters()?;
            self.close_menu();
        }
        Ok(())
    }

    fn ensure_editable(&self, column: FilterColumn) -> Result<()> {
        if self.menu_open && self.active == Some(column) {
            Ok(())
        } else {
            Err(SurveyGridError::InvalidFilterOperation(format!(
                "the {column} menu is not open"
            )))
        }
    }
}
