//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Mode, TreeAction};

/// Poll for and handle events with a timeout.
///
/// Returns `Ok(true)` if an event was handled, `Ok(false)` if timeout expired.
pub fn handle_events(app: &mut App, timeout: Duration) -> std::io::Result<bool> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) => {
                handle_key_event(app, key);
                return Ok(true);
            }
            Event::Mouse(mouse) => {
                handle_mouse_event(app, mouse);
                return Ok(true);
            }
            _ => {}
        }
    }
    Ok(false)
}

/// Handle a single mouse event.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Normal {
        return;
    }
    app.tree.handle_mouse(mouse);
    app.process_actions();
}

/// Handle a single key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Normal if app.tree.is_menu_visible() => handle_menu_keys(app, key),
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Rename => handle_rename_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }

    app.process_actions();
}

fn handle_menu_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.tree.menu_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.tree.menu_next(),
        KeyCode::Enter => {
            app.tree.activate_highlighted();
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => app.tree.hide_context_menu(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Home | KeyCode::Char('g') => app.tree.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.tree.select_last(),
        KeyCode::PageUp => app.move_selection(-20),
        KeyCode::PageDown => app.move_selection(20),

        // Expand/Collapse
        KeyCode::Right | KeyCode::Char('l') => app.expand_selected(),
        KeyCode::Left | KeyCode::Char('h') => app.collapse_selected(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('E') => app.expand_all(),
        KeyCode::Char('C') => app.collapse_all(),
        KeyCode::Enter => app.click_selected(),

        // Context menu
        KeyCode::Char('m') => {
            if !app.tree.open_context_menu_at_selection() {
                app.status_message = Some("Nothing selected".to_string());
            }
        }

        // Edits
        KeyCode::Char('a') => {
            if let Some(id) = app.selected_id() {
                app.apply(TreeAction::AddChild(id));
            }
        }
        KeyCode::Char('r') => {
            if let Some(id) = app.selected_id() {
                app.apply(TreeAction::Rename(id));
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_id() {
                app.apply(TreeAction::Remove(id));
            }
        }

        // Help
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }

        _ => {}
    }
}

fn handle_rename_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_rename(),
        KeyCode::Enter => app.commit_rename(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}
