use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};
use crate::tui::app::{App, Focus, View};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    render_topbar(frame, app, chunks[0], theme);
    render_table(frame, app, chunks[1], theme);
    render_bottombar(frame, app, chunks[2], theme);
    if app.focus == Focus::Menu && app.grid.is_menu_open() { render_menu(frame, app, area, theme); }
    if app.view == View::Help { render_help(frame, app, area); }
}

fn render_topbar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let summary = app.filter_summary();
    let badge = if summary.is_empty() {
        Span::styled("[ALL]", Style::default().fg(theme.success))
    } else {
        Span::styled("[FILTERED]", Style::default().fg(theme.filtered))
    };
    let mut info = format!(" {} | {}/{} rows", app.dataset.path.display(), app.grid.visible_count(), app.grid.row_count());
    if !summary.is_empty() { info.push_str(&format!(" | {summary}")); }
    let line = Line::from(vec![badge, Span::raw(info)]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg).fg(theme.fg)), area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let columns = app.grid.columns();
    let block = Block::default().borders(Borders::ALL).title("Responses (h/l column, Enter filter)")
        .border_style(if app.focus == Focus::Table { Style::default().fg(theme.highlight) } else { Style::default() });
    if app.grid.visible_count() == 0 {
        frame.render_widget(Paragraph::new("No rows match the current filters.").style(Style::default().fg(theme.muted)).block(block), area);
        return;
    }
    let header = Row::new(columns.iter().enumerate().map(|(i, c)| {
        let marker = if c.filterable && app.grid.has_filter(c.filter_by) { " \u{25bc}" } else { "" };
        let mut style = Style::default().fg(if marker.is_empty() { theme.header } else { theme.filtered }).add_modifier(Modifier::BOLD);
        if i == app.header_selected { style = style.add_modifier(Modifier::REVERSED); }
        Cell::from(format!("{}{marker}", c.label)).style(style)
    }));
    let body_height = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = app.grid.visible_rows().into_iter().skip(app.scroll_y).take(body_height).map(|row| {
        Row::new(columns.iter().map(|c| Cell::from(app.grid.value(row, c.filter_by).unwrap_or("-").to_owned())))
    }).collect();
    let share = 100 / columns.len().max(1) as u16;
    let widths: Vec<Constraint> = columns.iter().map(|_| Constraint::Percentage(share)).collect();
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let Some(column) = app.grid.active_column() else { return };
    let label = app.grid.columns().iter().find(|c| c.filter_by == column).map(|c| c.label.as_str()).unwrap_or("Filter");
    let popup = centered_rect(app.menu_width_pct, 60, area);
    frame.render_widget(Clear, popup);
    let checkbox = |checked: bool| if checked { "[x] " } else { "[ ] " };
    let mut items = vec![ListItem::new(Line::from(vec![
        Span::raw(checkbox(app.grid.is_all_checked(column))),
        Span::styled("Select All", Style::default().add_modifier(Modifier::BOLD)),
    ]))];
    items.extend(app.grid.checklist(column).iter().map(|item| {
        let style = if item.checked { Style::default().fg(theme.checked) } else { Style::default().fg(theme.muted) };
        ListItem::new(Line::from(vec![Span::styled(checkbox(item.checked), style), Span::raw(truncate(&item.name, 40))]))
    }));
    let mut state = ListState::default();
    state.select(Some(app.menu_cursor.min(items.len().saturating_sub(1))));
    let block = Block::default().borders(Borders::ALL).title(format!("Filter: {label}"))
        .title_bottom(" Space toggle  a all  c clear  Enter apply  Esc close ")
        .border_style(Style::default().fg(theme.highlight));
    let list = List::new(items).block(block).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, popup, &mut state);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(Span::styled("Keybindings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  q        Quit"),
        Line::from("  ?        Toggle help"),
        Line::from("  h/l      Select column"),
        Line::from("  j/k      Scroll rows"),
        Line::from("  Enter/f  Open filter menu for column"),
        Line::from("  1/2/3    Open names/projects/companies menu"),
        Line::from(""),
        Line::from(Span::styled("In a filter menu", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  j/k      Move cursor"),
        Line::from("  Space    Toggle item (Select All line: toggle all)"),
        Line::from("  a        Toggle all"),
        Line::from("  c        Clear"),
        Line::from("  Enter    Apply and close"),
        Line::from("  Esc/q    Close without applying"),
        Line::from(""),
        Line::from("Applying names clears projects and companies;"),
        Line::from("applying projects clears companies."),
    ];
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).scroll((app.help_scroll as u16, 0)).block(Block::default().borders(Borders::ALL).title("Help (?)")), popup);
}

fn render_bottombar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let color = if app.status_msg.contains("error") { theme.error } else { theme.fg };
    frame.render_widget(Paragraph::new(format!(" {}", app.status_msg)).style(Style::default().bg(theme.bg).fg(color)), area);
}

fn centered_rect(px: u16, py: u16, r: Rect) -> Rect {
    let v = Layout::default().direction(Direction::Vertical).constraints([Constraint::Percentage((100-py)/2), Constraint::Percentage(py), Constraint::Percentage((100-py)/2)]).split(r);
    Layout::default().direction(Direction::Horizontal).constraints([Constraint::Percentage((100-px)/2), Constraint::Percentage(px), Constraint::Percentage((100-px)/2)]).split(v[1])[1]
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max { s.to_owned() } else { format!("{}\u{2026}", s.chars().take(max.saturating_sub(1)).collect::<String>()) }
}
