use survey_grid_common::Result;
use tracing::debug;

use crate::column::FilterColumn;
use crate::menu::{ChecklistItem, FilterMenuState, FilterSelection};
use crate::row::{FieldAccessor, Row};

/// Result of applying one column's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Indices into the full row set, in original order.
    pub visible: Vec<usize>,
    /// Downstream columns whose checked values were cleared by the cascade.
    pub reset: Vec<FilterColumn>,
}

// --- row predicate ---

/// True when `row` satisfies every active column filter, ignoring `skip`.
pub fn row_matches(
    row: &Row,
    selection: &FilterSelection,
    fields: &FieldAccessor,
    skip: Option<FilterColumn>,
) -> Result<bool> {
    for column in FilterColumn::ALL {
        if Some(column) == skip || !selection.has_filter(column) {
            continue;
        }
        if !selection.contains(column, fields.value(row, column)?) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matching_indices(
    rows: &[Row],
    selection: &FilterSelection,
    fields: &FieldAccessor,
    skip: Option<FilterColumn>,
) -> Result<Vec<usize>> {
    let mut out = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        if row_matches(row, selection, fields, skip)? {
            out.push(idx);
        }
    }
    Ok(out)
}

// --- visibility ---

/// Intersection of every active column filter. No active filter keeps all rows.
pub fn compute_visible_rows(
    rows: &[Row],
    selection: &FilterSelection,
    fields: &FieldAccessor,
) -> Result<Vec<usize>> {
    if selection.is_empty() {
        return Ok((0..rows.len()).collect());
    }
    matching_indices(rows, selection, fields, None)
}

/// Rows passing every active filter except `column`'s own.
pub fn rows_matching_others(
    rows: &[Row],
    selection: &FilterSelection,
    fields: &FieldAccessor,
    column: FilterColumn,
) -> Result<Vec<usize>> {
    matching_indices(rows, selection, fields, Some(column))
}

// --- cascade ---

/// Cleared checklists for every column downstream of `target`.
pub fn cascade_resets(
    menus: &FilterMenuState,
    target: FilterColumn,
) -> Vec<(FilterColumn, Vec<ChecklistItem>)> {
    target
        .downstream()
        .map(|column| (column, menus.cleared_copy(column)))
        .collect()
}

/// Applies `target`'s menu: cascade-clears downstream columns, recomputes the
/// visible rows, then rebuilds the other menus from the visible rows and
/// `target`'s own menu from the rows its sibling filters admit.
pub fn apply_filters(
    rows: &[Row],
    menus: &mut FilterMenuState,
    target: FilterColumn,
    fields: &FieldAccessor,
) -> Result<ApplyOutcome> {
    let mut reset = Vec::new();
    for (column, cleared) in cascade_resets(menus, target) {
        if menus.has_filter(column) {
            reset.push(column);
        }
        menus.replace_column(column, cleared);
    }

    let selection = menus.selection();
    let visible = compute_visible_rows(rows, &selection, fields)?;
    // sources are fixed before any rebuild so rebuild order can't leak into them
    let target_source = rows_matching_others(rows, &selection, fields, target)?;

    for column in target.others() {
        menus.rebuild_column(column, visible.iter().map(|&i| &rows[i]), fields)?;
    }
    menus.rebuild_column(target, target_source.iter().map(|&i| &rows[i]), fields)?;

    debug!(
        target = %target,
        visible = visible.len(),
        total = rows.len(),
        reset = ?reset,
        "applied filters"
    );
    Ok(ApplyOutcome { visible, reset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{QuestionAnswer, UserInfo};

    fn row(name: &str, project: &str, company: &str) -> Row {
        Row {
            id: format!("id-{name}"),
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

    fn grid_rows() -> Vec<Row> {
        vec![
            row("ann", "apollo", "acme"),
            row("bob", "apollo", "beta"),
            row("cat", "gemini", "acme"),
            row("dan", "gemini", "beta"),
            row("eve", "mercury", "acme"),
        ]
    }

    fn labels(menus: &FilterMenuState, column: FilterColumn) -> Vec<(String, bool)> {
        menus.checklist(column).iter().map(|i| (i.name.clone(), i.checked)).collect()
    }

    #[test]
    fn empty_selection_keeps_everything_in_order() {
        let rows = grid_rows();
        let visible =
            compute_visible_rows(&rows, &FilterSelection::default(), &FieldAccessor::default()).unwrap();
        assert_eq!(visible, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn visibility_is_intersection_of_active_columns() {
        let rows = grid_rows();
        let fields = FieldAccessor::default();
        let mut sel = FilterSelection::default();
        sel.insert(FilterColumn::Projects, "apollo");
        sel.insert(FilterColumn::Projects, "gemini");
        sel.insert(FilterColumn::Companies, "acme");
        let visible = compute_visible_rows(&rows, &sel, &fields).unwrap();
        assert_eq!(visible, vec![0, 2]);
        for (idx, r) in rows.iter().enumerate() {
            let expected = ["apollo", "gemini"].contains(&fields.project_answer(r).unwrap())
                && fields.company_answer(r).unwrap() == "acme";
            assert_eq!(visible.contains(&idx), expected, "row {idx}");
        }
    }

    #[test]
    fn others_ignores_own_column() {
        let rows = grid_rows();
        let mut sel = FilterSelection::default();
        sel.insert(FilterColumn::Companies, "beta");
        sel.insert(FilterColumn::Names, "bob");
        let fields = FieldAccessor::default();
        assert_eq!(rows_matching_others(&rows, &sel, &fields, FilterColumn::Companies).unwrap(), vec![1]);
        assert_eq!(rows_matching_others(&rows, &sel, &fields, FilterColumn::Names).unwrap(), vec![1, 3]);
    }

    #[test]
    fn cascade_clears_only_downstream() {
        let rows = grid_rows();
        let fields = FieldAccessor::default();
        let mut menus = FilterMenuState::from_rows(&rows, &fields).unwrap();
        menus.select_all(FilterColumn::Names);
        menus.select_all(FilterColumn::Companies);
        let resets = cascade_resets(&menus, FilterColumn::Projects);
        assert_eq!(resets.len(), 1);
        assert_eq!(resets[0].0, FilterColumn::Companies);
        assert!(resets[0].1.iter().all(|i| !i.checked));
        assert!(cascade_resets(&menus, FilterColumn::Companies).is_empty());
        // pure: nothing mutated
        assert!(menus.is_all_checked(FilterColumn::Companies));
    }

    #[test]
    fn applying_names_resets_projects_and_companies() {
        let rows = grid_rows();
        let fields = FieldAccessor::default();
        let mut menus = FilterMenuState::from_rows(&rows, &fields).unwrap();
        menus.toggle(FilterColumn::Projects, "gemini").unwrap();
        menus.toggle(FilterColumn::Companies, "acme").unwrap();
        menus.toggle(FilterColumn::Names, "ann").unwrap();
        menus.toggle(FilterColumn::Names, "dan").unwrap();

        let out = apply_filters(&rows, &mut menus, FilterColumn::Names, &fields).unwrap();
        assert_eq!(out.reset, vec![FilterColumn::Projects, FilterColumn::Companies]);
        assert_eq!(out.visible, vec![0, 3]);
        assert_eq!(menus.checked_count(FilterColumn::Projects), 0);
        assert_eq!(menus.checked_count(FilterColumn::Companies), 0);
        assert_eq!(
            labels(&menus, FilterColumn::Projects),
            vec![("apollo".to_string(), false), ("gemini".to_string(), false)]
        );
    }

    #[test]
    fn applying_projects_resets_companies_but_not_names() {
        let rows = grid_rows();
        let fields = FieldAccessor::default();
        let mut menus = FilterMenuState::from_rows(&rows, &fields).unwrap();
        menus.toggle(FilterColumn::Names, "ann").unwrap();
        menus.toggle(FilterColumn::Names, "dan").unwrap();
        menus.toggle(FilterColumn::Companies, "beta").unwrap();
        menus.toggle(FilterColumn::Projects, "apollo").unwrap();

        let out = apply_filters(&rows, &mut menus, FilterColumn::Projects, &fields).unwrap();
        assert_eq!(out.reset, vec![FilterColumn::Companies]);
        assert_eq!(out.visible, vec![0]);
        assert_eq!(menus.checked_count(FilterColumn::Companies), 0);
        assert_eq!(labels(&menus, FilterColumn::Companies), vec![("acme".to_string(), false)]);
        assert_eq!(labels(&menus, FilterColumn::Names), vec![("ann".to_string(), true)]);
        // projects offers everything the names filter admits
        assert_eq!(
            labels(&menus, FilterColumn::Projects),
            vec![("apollo".to_string(), true), ("gemini".to_string(), false)]
        );
    }

    #[test]
    fn target_menu_keeps_unselected_siblings() {
        let rows = grid_rows();
        let fields = FieldAccessor::default();
        let mut menus = FilterMenuState::from_rows(&rows, &fields).unwrap();
        menus.toggle(FilterColumn::Companies, "beta").unwrap();
        let out = apply_filters(&rows, &mut menus, FilterColumn::Companies, &fields).unwrap();
        assert_eq!(out.visible, vec![1, 3]);
        assert!(out.reset.is_empty());
        // companies still offers acme so the filter can be widened again
        assert_eq!(
            labels(&menus, FilterColumn::Companies),
            vec![("acme".to_string(), false), ("beta".to_string(), true)]
        );
        assert_eq!(
            labels(&menus, FilterColumn::Projects),
            vec![("apollo".to_string(), false), ("gemini".to_string(), false)]
        );
    }

    #[test]
    fn target_menu_narrowed_by_sibling_filters() {
        let rows = grid_rows();
        let fields = FieldAccessor::default();
        let mut menus = FilterMenuState::from_rows(&rows, &fields).unwrap();
        menus.toggle(FilterColumn::Names, "eve").unwrap();
        menus.toggle(FilterColumn::Names, "ann").unwrap();
        menus.toggle(FilterColumn::Companies, "acme").unwrap();
        let out = apply_filters(&rows, &mut menus, FilterColumn::Companies, &fields).unwrap();
        assert_eq!(out.visible, vec![0, 4]);
        assert_eq!(labels(&menus, FilterColumn::Companies), vec![("acme".to_string(), true)]);
        assert_eq!(
            labels(&menus, FilterColumn::Names),
            vec![("ann".to_string(), true), ("eve".to_string(), true)]
        );
    }

    #[test]
    fn apply_twice_is_stable() {
        let rows = grid_rows();
        let fields = FieldAccessor::default();
        let mut menus = FilterMenuState::from_rows(&rows, &fields).unwrap();
        menus.toggle(FilterColumn::Projects, "apollo").unwrap();
        menus.toggle(FilterColumn::Projects, "mercury").unwrap();
        let first = apply_filters(&rows, &mut menus, FilterColumn::Projects, &fields).unwrap();
        let menus_after_first = menus.clone();
        let second = apply_filters(&rows, &mut menus, FilterColumn::Projects, &fields).unwrap();
        assert_eq!(first.visible, vec![0, 1, 4]);
        assert_eq!(first.visible, second.visible);
        assert_eq!(menus, menus_after_first);
    }
}
