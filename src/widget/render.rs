//! Drawing the tree into a ratatui buffer and remembering where each row
//! landed for pointer hit testing.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Widget};

use super::element::{class, Icon};
use super::{TreeWidget, VisibleRow};
use crate::model::NodeId;

/// Part of a row under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPart {
    Switcher,
    Label,
    /// Anywhere else on the row (indent, trailing space).
    Row,
}

/// Screen regions of one drawn row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHit {
    pub id: NodeId,
    pub row: Rect,
    /// Empty for leaves.
    pub switcher: Rect,
    pub label: Rect,
}

impl RowHit {
    pub fn part_at(&self, position: Position) -> Option<RowPart> {
        if !self.row.contains(position) {
            None
        } else if self.switcher.contains(position) {
            Some(RowPart::Switcher)
        } else if self.label.contains(position) {
            Some(RowPart::Label)
        } else {
            Some(RowPart::Row)
        }
    }
}

/// First row to draw so the selection stays visible with a little padding.
pub fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected
            .saturating_sub(padding)
            .min(total.saturating_sub(visible_height))
    }
}

const ICON_WIDTH: u16 = 2;

impl TreeWidget {
    /// Scroll offset used by the last render.
    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// Rows as they were last drawn.
    pub fn row_hits(&self) -> &[RowHit] {
        &self.hits
    }

    fn render_row(&self, row: &VisibleRow, area: Rect, buf: &mut Buffer) -> Option<RowHit> {
        let element = self.elements.get(&row.id)?;

        let mut classes = vec![class::GROUP];
        classes.extend(element.classes());
        let row_style = self.theme.compose(&classes);
        buf.set_style(area, row_style);

        let indent = "  ".repeat(row.depth);
        let icon = match element.icon {
            Icon::Switcher if element.collapsed => "▶ ",
            Icon::Switcher => "▼ ",
            Icon::Leaf => "· ",
        };
        let icon_style = row_style.patch(self.theme.style(element.icon.class()));
        let label_style = row_style.patch(self.theme.style(class::LABEL));

        // Truncate on char boundaries, leaving room for the ellipsis.
        let available = (area.width as usize).saturating_sub(indent.len() + ICON_WIDTH as usize);
        let label_chars = element.label.chars().count();
        let label = if label_chars > available && available > 1 {
            let truncated: String = element.label.chars().take(available - 1).collect();
            format!("{}…", truncated)
        } else {
            element.label.clone()
        };
        let label_width = label.chars().count().min(available) as u16;

        let line = Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(icon, icon_style),
            Span::styled(label, label_style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let icon_x = area.x.saturating_add(indent.len() as u16);
        let switcher_width = match element.icon {
            Icon::Switcher => ICON_WIDTH,
            Icon::Leaf => 0,
        };
        Some(RowHit {
            id: row.id.clone(),
            row: area,
            switcher: Rect::new(icon_x, area.y, switcher_width, 1).intersection(area),
            label: Rect::new(icon_x.saturating_add(ICON_WIDTH), area.y, label_width, 1)
                .intersection(area),
        })
    }

    fn render_menu(&mut self, bounds: Rect, buf: &mut Buffer) {
        let style = self.theme.style(class::CONTEXT_MENU);
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        if !menu.is_visible() {
            return;
        }

        let area = menu.placement(bounds);
        Clear.render(area, buf);
        let block = Block::default().borders(Borders::ALL).border_style(style);
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, text) in menu.texts().enumerate().take(inner.height as usize) {
            let entry_style = if i == menu.highlighted() {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            };
            let y = inner.y + i as u16;
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), entry_style);
            buf.set_stringn(
                inner.x.saturating_add(1),
                y,
                text,
                inner.width.saturating_sub(2) as usize,
                entry_style,
            );
        }
        menu.set_area(area);
    }
}

impl Widget for &mut TreeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self
            .container
            .clone()
            .border_style(self.theme.style(class::ROOT));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self.visible_rows();
        let height = inner.height as usize;
        let selected = self
            .selected
            .as_ref()
            .and_then(|id| rows.iter().position(|r| &r.id == id));
        self.offset = calculate_scroll_offset(selected.unwrap_or(0), height, rows.len());

        let mut hits = Vec::with_capacity(height.min(rows.len()));
        for (i, row) in rows.iter().skip(self.offset).take(height).enumerate() {
            let row_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            if let Some(hit) = self.render_row(row, row_area, buf) {
                hits.push(hit);
            }
        }
        self.hits = hits;

        self.render_menu(area, buf);
    }
}
