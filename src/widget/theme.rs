//! Class-keyed styles.

use std::collections::HashMap;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use super::element::class;
use crate::error::ConfigError;

/// Maps marker classes to styles. A row's style is the patch of every class
/// it carries, in the order the classes are listed.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut styles = HashMap::new();
        styles.insert(class::ROOT, Style::default().fg(Color::Gray));
        styles.insert(class::GROUP, Style::default());
        styles.insert(class::NODE, Style::default().fg(Color::White));
        styles.insert(class::LABEL, Style::default());
        styles.insert(class::LEAF_ICON, Style::default().fg(Color::DarkGray));
        styles.insert(
            class::SWITCHER,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );
        styles.insert(class::COLLAPSED, Style::default());
        styles.insert(
            class::SELECTED,
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
        );
        styles.insert(class::CONTEXT_MENU, Style::default().fg(Color::Yellow));
        Self { styles }
    }
}

impl Theme {
    /// Style for a single class; unknown classes get the empty style.
    pub fn style(&self, name: &str) -> Style {
        self.styles.get(name).copied().unwrap_or_default()
    }

    /// Patch together the styles of several classes.
    pub fn compose(&self, names: &[&str]) -> Style {
        names
            .iter()
            .fold(Style::default(), |style, name| style.patch(self.style(name)))
    }

    pub fn set(&mut self, name: &str, style: Style) -> Result<(), ConfigError> {
        let key = known_class(name)?;
        self.styles.insert(key, style);
        Ok(())
    }

    /// Default theme with overrides from configuration.
    ///
    /// Values are `"<fg>"` or `"<fg> on <bg>"`, each any color ratatui can
    /// parse (`"cyan"`, `"light-blue"`, `"#ff8800"`, `"214"`).
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut theme = Self::default();
        for (name, value) in overrides {
            theme.set(name, parse_style(value)?)?;
        }
        Ok(theme)
    }
}

fn known_class(name: &str) -> Result<&'static str, ConfigError> {
    class::ALL
        .iter()
        .copied()
        .find(|known| *known == name)
        .ok_or_else(|| ConfigError::Invalid(format!("unknown theme class '{}'", name)))
}

fn parse_color(value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value.trim())
        .map_err(|_| ConfigError::Invalid(format!("invalid color '{}'", value.trim())))
}

/// Parse `"<fg>"` or `"<fg> on <bg>"` into a style.
pub fn parse_style(value: &str) -> Result<Style, ConfigError> {
    match value.split_once(" on ") {
        Some((fg, bg)) => Ok(Style::default().fg(parse_color(fg)?).bg(parse_color(bg)?)),
        None => Ok(Style::default().fg(parse_color(value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_every_class() {
        let theme = Theme::default();
        for name in class::ALL {
            assert!(theme.styles.contains_key(name), "missing {}", name);
        }
    }

    #[test]
    fn test_parse_style() {
        assert_eq!(parse_style("red").unwrap(), Style::default().fg(Color::Red));
        assert_eq!(
            parse_style("yellow on blue").unwrap(),
            Style::default().fg(Color::Yellow).bg(Color::Blue)
        );
        assert!(parse_style("not-a-color").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("tree-switcher".to_string(), "magenta".to_string());
        let theme = Theme::with_overrides(&overrides).unwrap();
        assert_eq!(theme.style(class::SWITCHER), Style::default().fg(Color::Magenta));
    }

    #[test]
    fn test_unknown_class_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("tree-bogus".to_string(), "red".to_string());
        let err = Theme::with_overrides(&overrides).unwrap_err();
        assert!(err.to_string().contains("tree-bogus"));
    }

    #[test]
    fn test_compose_patches_in_order() {
        let theme = Theme::default();
        let style = theme.compose(&[class::NODE, class::SELECTED]);
        assert_eq!(style.fg, Some(Color::White));
        assert_eq!(style.bg, Some(Color::DarkGray));
    }
}
