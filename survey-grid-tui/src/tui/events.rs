use crate::tui::app::{App, Focus, View};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use survey_grid_core::FilterColumn;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') if app.focus == Focus::Table => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            if app.view == View::Help {
                app.view = View::Table;
                app.help_scroll = 0;
            } else {
                app.view = View::Help;
            }
            return;
        }
        KeyCode::Char('j') if app.view == View::Help => {
            app.help_scroll += 1;
            return;
        }
        KeyCode::Char('k') if app.view == View::Help => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
            return;
        }
        KeyCode::Esc if app.view == View::Help => {
            app.view = View::Table;
            app.help_scroll = 0;
            return;
        }
        _ => {}
    }
    match app.focus {
        Focus::Table => handle_table(app, key),
        Focus::Menu => handle_menu(app, key),
    }
}

fn handle_table(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.header_left(),
        KeyCode::Char('l') | KeyCode::Right => app.header_right(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::PageDown => {
            for _ in 0..10 {
                app.scroll_down();
            }
        }
        KeyCode::PageUp => {
            for _ in 0..10 {
                app.scroll_up();
            }
        }
        KeyCode::Enter | KeyCode::Char('f') => app.open_selected_menu(),
        KeyCode::Char('1') => app.open_menu(FilterColumn::Names),
        KeyCode::Char('2') => app.open_menu(FilterColumn::Projects),
        KeyCode::Char('3') => app.open_menu(FilterColumn::Companies),
        _ => {}
    }
}

fn handle_menu(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_menu(),
        KeyCode::Char('j') | KeyCode::Down => app.menu_down(),
        KeyCode::Char('k') | KeyCode::Up => app.menu_up(),
        KeyCode::Char(' ') => app.menu_toggle(),
        KeyCode::Char('a') => app.menu_toggle_all(),
        KeyCode::Char('c') => app.menu_clear(),
        KeyCode::Enter => app.apply(),
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match (mouse.kind, app.focus.clone()) {
        (MouseEventKind::ScrollDown, Focus::Menu) => app.menu_down(),
        (MouseEventKind::ScrollUp, Focus::Menu) => app.menu_up(),
        (MouseEventKind::ScrollDown, Focus::Table) => app.scroll_down(),
        (MouseEventKind::ScrollUp, Focus::Table) => app.scroll_up(),
        _ => {}
    }
}
