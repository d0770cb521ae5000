//! View command implementation

use std::time::Duration;

use crate::cli::ViewArgs;
use crate::config::Config;
use crate::error::Result;
use crate::model::load_forest;
use crate::tui::{self, ViewSettings};

/// Resolve viewer settings from arguments and configuration.
pub fn settings(args: &ViewArgs, config: &Config) -> Result<ViewSettings> {
    Ok(ViewSettings {
        depth: args.depth.unwrap_or(config.tree.depth),
        animation: if args.no_animation {
            Duration::ZERO
        } else {
            config.animation()
        },
        theme: config.theme()?,
    })
}

/// Run the view command
pub fn run(args: ViewArgs, config: &Config) -> Result<()> {
    let settings = settings(&args, config)?;
    let forest = load_forest(&args.file)?;

    tracing::info!(
        path = %args.file.display(),
        depth = settings.depth,
        animation_ms = settings.animation.as_millis() as u64,
        "Opening viewer"
    );

    tui::run(args.file, forest, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(depth: Option<usize>, no_animation: bool) -> ViewArgs {
        ViewArgs {
            file: PathBuf::from("tree.json"),
            depth,
            no_animation,
        }
    }

    #[test]
    fn test_settings_from_config() {
        let settings = settings(&args(None, false), &Config::default()).unwrap();
        assert_eq!(settings.depth, 1);
        assert_eq!(settings.animation, Duration::from_millis(120));
    }

    #[test]
    fn test_settings_overrides() {
        let settings = settings(&args(Some(3), true), &Config::default()).unwrap();
        assert_eq!(settings.depth, 3);
        assert_eq!(settings.animation, Duration::ZERO);
    }
}
