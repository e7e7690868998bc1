use std::collections::HashSet;

use survey_grid_common::{Result, SurveyGridError};
use tracing::debug;

use crate::column::FilterColumn;
use crate::row::{FieldAccessor, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub name: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn unchecked(name: impl Into<String>) -> Self {
        Self { name: name.into(), checked: false }
    }
}

/// Checked values per column. An empty set imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    checked: [HashSet<String>; 3],
}

impl FilterSelection {
    pub fn has_filter(&self, column: FilterColumn) -> bool {
        !self.checked[column.index()].is_empty()
    }

    pub fn contains(&self, column: FilterColumn, value: &str) -> bool {
        self.checked[column.index()].contains(value)
    }

    pub fn insert(&mut self, column: FilterColumn, value: impl Into<String>) {
        self.checked[column.index()].insert(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.checked.iter().all(HashSet::is_empty)
    }
}

/// Per-column checklists backing the filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMenuState {
    lists: [Vec<ChecklistItem>; 3],
}

impl FilterMenuState {
    /// Every column seeded from `rows`, nothing checked.
    pub fn from_rows(rows: &[Row], fields: &FieldAccessor) -> Result<Self> {
        let mut state = Self::default();
        for column in FilterColumn::ALL {
            state.rebuild_column(column, rows, fields)?;
        }
        Ok(state)
    }

    pub fn checklist(&self, column: FilterColumn) -> &[ChecklistItem] {
        &self.lists[column.index()]
    }

    /// Regenerates `column` from the distinct values in `source_rows`
    /// (first-occurrence order). Checked flags carry over by name; values no
    /// longer present are dropped.
    pub fn rebuild_column<'r, I>(
        &mut self,
        column: FilterColumn,
        source_rows: I,
        fields: &FieldAccessor,
    ) -> Result<()>
    where
        I: IntoIterator<Item = &'r Row>,
    {
        let previously_checked: HashSet<&str> = self.lists[column.index()]
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.name.as_str())
            .collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut rebuilt = Vec::new();
        for row in source_rows {
            let value = fields.value(row, column)?;
            if seen.insert(value) {
                rebuilt.push(ChecklistItem {
                    name: value.to_owned(),
                    checked: previously_checked.contains(value),
                });
            }
        }
        debug!(
            column = %column,
            options = rebuilt.len(),
            checked = rebuilt.iter().filter(|i| i.checked).count(),
            "rebuilt checklist"
        );
        self.lists[column.index()] = rebuilt;
        Ok(())
    }

    pub fn replace_column(&mut self, column: FilterColumn, items: Vec<ChecklistItem>) {
        self.lists[column.index()] = items;
    }

    /// Flips `value` and returns its new state. Absent values are an error.
    pub fn toggle(&mut self, column: FilterColumn, value: &str) -> Result<bool> {
        let item = self.item_mut(column, value)?;
        item.checked = !item.checked;
        Ok(item.checked)
    }

    pub fn set_checked(&mut self, column: FilterColumn, value: &str, checked: bool) -> Result<()> {
        self.item_mut(column, value)?.checked = checked;
        Ok(())
    }

    pub fn select_all(&mut self, column: FilterColumn) {
        self.set_all(column, true);
    }

    pub fn clear_all(&mut self, column: FilterColumn) {
        self.set_all(column, false);
    }

    /// Clears when everything is already checked, otherwise checks everything.
    pub fn toggle_all(&mut self, column: FilterColumn) {
        if self.is_all_checked(column) {
            self.clear_all(column);
        } else {
            self.select_all(column);
        }
    }

    /// Resets every checked flag to `selection`, keeping the options as they are.
    pub fn restore(&mut self, selection: &FilterSelection) {
        for column in FilterColumn::ALL {
            for item in &mut self.lists[column.index()] {
                item.checked = selection.contains(column, &item.name);
            }
        }
    }

    /// Vacuously true for an empty checklist.
    pub fn is_all_checked(&self, column: FilterColumn) -> bool {
        self.lists[column.index()].iter().all(|item| item.checked)
    }

    pub fn has_filter(&self, column: FilterColumn) -> bool {
        self.lists[column.index()].iter().any(|item| item.checked)
    }

    pub fn checked_count(&self, column: FilterColumn) -> usize {
        self.lists[column.index()].iter().filter(|item| item.checked).count()
    }

    pub fn cleared_copy(&self, column: FilterColumn) -> Vec<ChecklistItem> {
        self.lists[column.index()]
            .iter()
            .map(|item| ChecklistItem { name: item.name.clone(), checked: false })
            .collect()
    }

    pub fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::default();
        for column in FilterColumn::ALL {
            for item in self.lists[column.index()].iter().filter(|i| i.checked) {
                selection.insert(column, item.name.clone());
            }
        }
        selection
    }

    fn set_all(&mut self, column: FilterColumn, checked: bool) {
        for item in &mut self.lists[column.index()] {
            item.checked = checked;
        }
    }

    fn item_mut(&mut self, column: FilterColumn, value: &str) -> Result<&mut ChecklistItem> {
        self.lists[column.index()]
            .iter_mut()
            .find(|item| item.name == value)
            .ok_or_else(|| {
                SurveyGridError::InvalidFilterOperation(format!(
                    "'{value}' is not an option in the {column} menu"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{QuestionAnswer, UserInfo};

    fn row(name: &str, project: &str, company: &str) -> Row {
        Row {
            id: name.into(),
            user_info: UserInfo {
                user_full_name: name.into(),
                user_email: String::new(),
                survey_date: String::new(),
            },
            project_id: 0,
            data: vec![
                QuestionAnswer { question: "Project".into(), answer: project.into() },
                QuestionAnswer { question: "Company".into(), answer: company.into() },
            ],
        }
    }

    fn names(state: &FilterMenuState, column: FilterColumn) -> Vec<&str> {
        state.checklist(column).iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn rebuild_dedups_in_first_occurrence_order() {
        let rows = vec![row("b", "P2", "Acme"), row("a", "P1", "Acme"), row("c", "P2", "Zed")];
        let state = FilterMenuState::from_rows(&rows, &FieldAccessor::default()).unwrap();
        assert_eq!(names(&state, FilterColumn::Names), vec!["b", "a", "c"]);
        assert_eq!(names(&state, FilterColumn::Projects), vec!["P2", "P1"]);
        assert_eq!(names(&state, FilterColumn::Companies), vec!["Acme", "Zed"]);
        assert!(state.checklist(FilterColumn::Companies).iter().all(|i| !i.checked));
    }

    #[test]
    fn rebuild_keeps_checked_by_name() {
        let fields = FieldAccessor::default();
        let rows = vec![row("a", "P1", "Acme"), row("b", "P2", "Beta")];
        let mut state = FilterMenuState::from_rows(&rows, &fields).unwrap();
        state.toggle(FilterColumn::Companies, "Acme").unwrap();

        let next = vec![row("c", "P3", "Gamma"), row("a", "P1", "Acme")];
        state.rebuild_column(FilterColumn::Companies, &next, &fields).unwrap();
        assert_eq!(
            state.checklist(FilterColumn::Companies),
            &[ChecklistItem::unchecked("Gamma"), ChecklistItem { name: "Acme".into(), checked: true }]
        );
    }

    #[test]
    fn rebuild_with_all_new_values_has_nothing_checked() {
        let fields = FieldAccessor::default();
        let rows = vec![row("a", "P1", "Acme")];
        let mut state = FilterMenuState::from_rows(&rows, &fields).unwrap();
        state.toggle(FilterColumn::Companies, "Acme").unwrap();
        let next = vec![row("z", "P9", "Other")];
        state.rebuild_column(FilterColumn::Companies, &next, &fields).unwrap();
        assert!(!state.has_filter(FilterColumn::Companies));
        assert_eq!(names(&state, FilterColumn::Companies), vec!["Other"]);
    }

    #[test]
    fn toggle_absent_value_errors() {
        let rows = vec![row("a", "P1", "Acme")];
        let mut state = FilterMenuState::from_rows(&rows, &FieldAccessor::default()).unwrap();
        let err = state.toggle(FilterColumn::Projects, "nope").unwrap_err();
        assert!(matches!(err, SurveyGridError::InvalidFilterOperation(_)));
        assert!(state.toggle(FilterColumn::Projects, "P1").unwrap());
        assert!(!state.toggle(FilterColumn::Projects, "P1").unwrap());
    }

    #[test]
    fn toggle_all_flips_on_all_checked() {
        let rows = vec![row("a", "P1", "Acme"), row("b", "P2", "Acme")];
        let mut state = FilterMenuState::from_rows(&rows, &FieldAccessor::default()).unwrap();
        state.toggle(FilterColumn::Names, "a").unwrap();
        state.toggle_all(FilterColumn::Names);
        assert!(state.is_all_checked(FilterColumn::Names));
        state.toggle_all(FilterColumn::Names);
        assert!(!state.has_filter(FilterColumn::Names));
        state.select_all(FilterColumn::Names);
        assert_eq!(state.checked_count(FilterColumn::Names), 2);
        state.clear_all(FilterColumn::Names);
        assert_eq!(state.checked_count(FilterColumn::Names), 0);
    }

    #[test]
    fn empty_checklist_counts_as_all_checked() {
        let state = FilterMenuState::default();
        assert!(state.is_all_checked(FilterColumn::Projects));
        assert!(!state.has_filter(FilterColumn::Projects));
    }

    #[test]
    fn cleared_copy_leaves_state_alone() {
        let rows = vec![row("a", "P1", "Acme")];
        let mut state = FilterMenuState::from_rows(&rows, &FieldAccessor::default()).unwrap();
        state.select_all(FilterColumn::Projects);
        let copy = state.cleared_copy(FilterColumn::Projects);
        assert_eq!(copy, vec![ChecklistItem::unchecked("P1")]);
        assert!(state.is_all_checked(FilterColumn::Projects));
    }

    #[test]
    fn selection_mirrors_checked_flags() {
        let rows = vec![row("a", "P1", "Acme"), row("b", "P2", "Beta")];
        let mut state = FilterMenuState::from_rows(&rows, &FieldAccessor::default()).unwrap();
        state.set_checked(FilterColumn::Projects, "P2", true).unwrap();
        let sel = state.selection();
        assert!(sel.has_filter(FilterColumn::Projects));
        assert!(sel.contains(FilterColumn::Projects, "P2"));
        assert!(!sel.contains(FilterColumn::Projects, "P1"));
        assert!(!sel.has_filter(FilterColumn::Names));
        assert!(!sel.is_empty());
    }

    #[test]
    fn restore_discards_unsaved_checks() {
        let rows = vec![row("a", "P1", "Acme"), row("b", "P2", "Beta")];
        let mut state = FilterMenuState::from_rows(&rows, &FieldAccessor::default()).unwrap();
        state.toggle(FilterColumn::Projects, "P1").unwrap();
        let saved = state.selection();
        state.toggle(FilterColumn::Projects, "P2").unwrap();
        state.toggle(FilterColumn::Names, "a").unwrap();
        state.restore(&saved);
        assert_eq!(state.selection(), saved);
        assert_eq!(names(&state, FilterColumn::Names), vec!["a", "b"]);
    }
}
