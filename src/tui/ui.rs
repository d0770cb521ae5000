//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Mode};

/// Render the entire UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Tree view
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_tree_area(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    match app.mode {
        Mode::Rename => render_rename_overlay(app, frame),
        Mode::Help => render_help_overlay(frame),
        Mode::Normal => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mut header_text = format!(
        " {}  │  {} nodes",
        app.source.display(),
        app.tree.len()
    );
    if let Some(element) = app.tree.selected_element() {
        header_text.push_str(&format!("  │  {}", element.label()));
    }

    let block = Block::default()
        .title(" sprig ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &mut App, frame: &mut Frame, area: Rect) {
    if app.tree.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let paragraph = Paragraph::new("Empty tree")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));

        frame.render_widget(paragraph, area);
        return;
    }

    frame.render_widget(&mut app.tree, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal if app.tree.is_menu_visible() => "[↑↓] Choose  [Enter] Run  [Esc] Hide",
        Mode::Normal => {
            "[↑↓] Move  [←→] Fold  [m] Menu  [a] Add  [r] Rename  [d] Del  [?] Help  [q] Quit"
        }
        Mode::Rename => "[Enter] Save  [Esc] Cancel",
        Mode::Help => "[Esc] Close help",
    };

    let text = app.status_message.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_rename_overlay(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Position at bottom, above footer
    let input_area = Rect {
        x: 2,
        y: area.height.saturating_sub(6),
        width: area.width.saturating_sub(4).min(60),
        height: 3,
    };

    frame.render_widget(Clear, input_area);

    let block = Block::default()
        .title(" Rename ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(app.input.as_str())
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, input_area);

    frame.set_cursor_position(Position::new(
        input_area.x + app.input.chars().count() as u16 + 1,
        input_area.y + 1,
    ));
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 26u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k  ↓/j   Move up / down
 g/G        Go to top / bottom
 →/l        Expand node
 ←/h        Collapse node
 Space      Toggle expand/collapse
 E / C      Expand / collapse all
 Enter      Click node

 EDITING
 ─────────────────────────────────
 m          Open context menu
 a          Add child
 r          Rename
 d          Remove subtree

 MOUSE
 ─────────────────────────────────
 Click ▶/▼  Toggle
 Right-click label  Context menu

 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, help_area);
}
