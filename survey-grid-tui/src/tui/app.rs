use crate::tui::theme::Theme;
use survey_grid_common::Config;
use survey_grid_core::{DatasetInfo, FilterColumn, FilterGrid};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Table,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Focus {
    Table,
    Menu,
}

pub struct App {
    pub grid: FilterGrid,
    pub dataset: DatasetInfo,
    pub view: View,
    pub focus: Focus,
    pub header_selected: usize, // index into grid.columns()
    pub menu_cursor: usize,     // 0 is the "Select All" line, items start at 1
    pub scroll_y: usize,
    pub help_scroll: usize,
    pub status_msg: String,
    pub should_quit: bool,
    pub theme: Theme,
    pub menu_width_pct: u16, // clamped 20..=90
}

impl App {
    pub fn new(grid: FilterGrid, dataset: DatasetInfo, config: &Config) -> Self {
        Self {
            grid,
            dataset,
            view: View::Table,
            focus: Focus::Table,
            header_selected: 0,
            menu_cursor: 0,
            scroll_y: 0,
            help_scroll: 0,
            status_msg: String::from("Ready | q:quit ?:help"),
            should_quit: false,
            theme: Theme::from_name(&config.display.theme),
            menu_width_pct: config.display.menu_width_pct.clamp(20, 90),
        }
    }

    pub fn selected_column(&self) -> Option<FilterColumn> {
        self.grid
            .columns()
            .get(self.header_selected)
            .filter(|c| c.filterable)
            .map(|c| c.filter_by)
    }

    pub fn header_left(&mut self) {
        self.header_selected = self.header_selected.saturating_sub(1);
    }
    pub fn header_right(&mut self) {
        let max = self.grid.columns().len().saturating_sub(1);
        if self.header_selected < max {
            self.header_selected += 1;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_y + 1 < self.grid.visible_count() {
            self.scroll_y += 1;
        }
    }
    pub fn scroll_up(&mut self) {
        self.scroll_y = self.scroll_y.saturating_sub(1);
    }

    // --- filter menu ---

    pub fn open_menu(&mut self, column: FilterColumn) {
        match self.grid.open_menu(column) {
            Ok(()) => {
                if let Some(pos) = self.grid.columns().iter().position(|c| c.filter_by == column) {
                    self.header_selected = pos;
                }
                self.focus = Focus::Menu;
                self.menu_cursor = 0;
                self.status_msg = format!(
                    "{} options | Space:toggle a:all c:clear Enter:apply Esc:close",
                    self.grid.checklist(column).len()
                );
            }
            Err(e) => {
                warn!(error = %e, column = %column, "could not open filter menu");
                self.status_msg = format!("menu error: {e}");
            }
        }
    }

    pub fn open_selected_menu(&mut self) {
        match self.selected_column() {
            Some(column) => self.open_menu(column),
            None => self.status_msg = "column is not filterable".into(),
        }
    }

    pub fn close_menu(&mut self) {
        self.grid.close_menu();
        self.focus = Focus::Table;
    }

    /// Items in the open menu, not counting the "Select All" line.
    pub fn menu_len(&self) -> usize {
        self.grid
            .active_column()
            .map(|c| self.grid.checklist(c).len())
            .unwrap_or(0)
    }

    pub fn menu_down(&mut self) {
        if self.menu_cursor < self.menu_len() {
            self.menu_cursor += 1;
        }
    }
    pub fn menu_up(&mut self) {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
    }

    /// Toggles the item under the cursor; on the "Select All" line toggles all.
    pub fn menu_toggle(&mut self) {
        let Some(column) = self.grid.active_column() else { return };
        if self.menu_cursor == 0 {
            self.menu_toggle_all();
            return;
        }
        let Some(name) = self
            .grid
            .checklist(column)
            .get(self.menu_cursor - 1)
            .map(|item| item.name.clone())
        else {
            return;
        };
        if let Err(e) = self.grid.toggle(column, &name) {
            self.status_msg = format!("toggle error: {e}");
        }
    }

    pub fn menu_toggle_all(&mut self) {
        let Some(column) = self.grid.active_column() else { return };
        if let Err(e) = self.grid.toggle_all(column) {
            self.status_msg = format!("toggle error: {e}");
        }
    }

    pub fn menu_clear(&mut self) {
        let Some(column) = self.grid.active_column() else { return };
        if let Err(e) = self.grid.clear_all(column) {
            self.status_msg = format!("clear error: {e}");
        }
    }

    pub fn apply(&mut self) {
        match self.grid.apply_filters() {
            Ok(Some(outcome)) => {
                let reset = if outcome.reset.is_empty() {
                    String::new()
                } else {
                    let cols: Vec<String> = outcome.reset.iter().map(|c| c.to_string()).collect();
                    format!(" (cleared {})", cols.join(", "))
                };
                self.status_msg = format!(
                    "filter applied: {} of {} rows{reset}",
                    outcome.visible.len(),
                    self.grid.row_count()
                );
                self.scroll_y = 0;
                self.close_menu();
            }
            Ok(None) => self.status_msg = "open a filter menu first".into(),
            Err(e) => {
                warn!(error = %e, "apply failed");
                self.status_msg = format!("filter error: {e}");
            }
        }
    }

    /// Short "names:2 companies:1" summary of checked values.
    pub fn filter_summary(&self) -> String {
        FilterColumn::ALL
            .iter()
            .filter(|&&c| self.grid.has_filter(c))
            .map(|&c| {
                let n = self.grid.checklist(c).iter().filter(|i| i.checked).count();
                format!("{c}:{n}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
