//! Context menu shown over the tree.

use ratatui::layout::{Position, Rect};

use super::options::MenuEntry;

#[derive(Debug)]
pub struct ContextMenu {
    pub(crate) entries: Vec<MenuEntry>,
    visible: bool,
    anchor: Position,
    highlighted: usize,
    /// Where the menu was last drawn, for hit testing.
    area: Rect,
}

impl ContextMenu {
    pub(crate) fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            entries,
            visible: false,
            anchor: Position::new(0, 0),
            highlighted: 0,
            area: Rect::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.text.as_str())
    }

    pub(crate) fn open(&mut self, at: Position) {
        self.visible = true;
        self.anchor = at;
        self.highlighted = 0;
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
        self.area = Rect::default();
    }

    pub(crate) fn next(&mut self) {
        if !self.entries.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.entries.len();
        }
    }

    pub(crate) fn previous(&mut self) {
        if !self.entries.is_empty() {
            self.highlighted = (self.highlighted + self.entries.len() - 1) % self.entries.len();
        }
    }

    /// Width and height including the border.
    pub fn size(&self) -> (u16, u16) {
        let widest = self
            .entries
            .iter()
            .map(|e| e.text.chars().count())
            .max()
            .unwrap_or(0);
        let width = u16::try_from(widest.saturating_add(4)).unwrap_or(u16::MAX);
        let height = u16::try_from(self.entries.len().saturating_add(2)).unwrap_or(u16::MAX);
        (width, height)
    }

    /// Place the menu at its anchor, shifted so it stays inside `bounds`.
    pub(crate) fn placement(&self, bounds: Rect) -> Rect {
        let (width, height) = self.size();
        let width = width.min(bounds.width);
        let height = height.min(bounds.height);
        let max_x = bounds.right().saturating_sub(width);
        let max_y = bounds.bottom().saturating_sub(height);
        Rect {
            x: self.anchor.x.clamp(bounds.x, max_x.max(bounds.x)),
            y: self.anchor.y.clamp(bounds.y, max_y.max(bounds.y)),
            width,
            height,
        }
    }

    pub(crate) fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub(crate) fn contains(&self, position: Position) -> bool {
        self.visible && self.area.contains(position)
    }

    /// Entry under `position`, if the menu is drawn there.
    pub(crate) fn entry_at(&self, position: Position) -> Option<usize> {
        if !self.contains(position) || position.y == self.area.y {
            return None;
        }
        let index = (position.y - self.area.y - 1) as usize;
        (index < self.entries.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(texts: &[&str]) -> ContextMenu {
        ContextMenu::new(texts.iter().map(|t| MenuEntry::new(*t, |_| {})).collect())
    }

    #[test]
    fn test_open_and_hide() {
        let mut menu = menu(&["Add", "Remove"]);
        assert!(!menu.is_visible());
        menu.open(Position::new(3, 4));
        assert!(menu.is_visible());
        assert_eq!(menu.anchor(), Position::new(3, 4));
        menu.hide();
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_highlight_wraps() {
        let mut menu = menu(&["Add", "Remove", "Rename"]);
        menu.previous();
        assert_eq!(menu.highlighted(), 2);
        menu.next();
        assert_eq!(menu.highlighted(), 0);
    }

    #[test]
    fn test_size() {
        let menu = menu(&["Add", "Remove"]);
        assert_eq!(menu.size(), (10, 4));
    }

    #[test]
    fn test_size_saturates() {
        let long = "x".repeat(usize::from(u16::MAX) + 10);
        let menu = menu(&[long.as_str()]);
        assert_eq!(menu.size(), (u16::MAX, 3));
    }

    #[test]
    fn test_placement_stays_in_bounds() {
        let mut menu = menu(&["Add", "Remove"]);
        menu.open(Position::new(78, 22));
        let area = menu.placement(Rect::new(0, 0, 80, 24));
        assert_eq!(area, Rect::new(70, 20, 10, 4));
    }

    #[test]
    fn test_entry_at() {
        let mut menu = menu(&["Add", "Remove"]);
        menu.open(Position::new(5, 5));
        menu.set_area(Rect::new(5, 5, 10, 4));
        assert_eq!(menu.entry_at(Position::new(6, 5)), None);
        assert_eq!(menu.entry_at(Position::new(6, 6)), Some(0));
        assert_eq!(menu.entry_at(Position::new(6, 7)), Some(1));
        assert_eq!(menu.entry_at(Position::new(6, 8)), None);
        assert_eq!(menu.entry_at(Position::new(30, 6)), None);
    }
}
