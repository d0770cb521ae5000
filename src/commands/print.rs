//! Print command implementation

use ratatui::widgets::Block;

use crate::cli::PrintArgs;
use crate::config::Config;
use crate::error::{Result, SprigError};
use crate::model::{format_json, format_tree, load_forest, FormatOptions};
use crate::widget::{TreeOptions, TreeWidget};

/// Run the print command
pub fn run(args: PrintArgs, config: &Config) -> Result<()> {
    let output = render(&args, config)?;
    if args.json {
        println!("{}", output);
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Build the text `print` writes to stdout.
pub fn render(args: &PrintArgs, config: &Config) -> Result<String> {
    tracing::info!(path = %args.file.display(), "Printing tree");

    let forest = load_forest(&args.file)?;

    // Going through the widget assigns depths the same way the viewer does.
    let tree = TreeWidget::new(Block::default(), TreeOptions::new().with_data(forest));
    let data = tree.data();

    if args.json {
        return format_json(&data, true).map_err(|source| SprigError::Data {
            path: args.file.clone(),
            source,
        });
    }

    let mut options = FormatOptions::new().with_ids(args.ids || config.tree.show_ids);
    if let Some(depth) = args.depth {
        options = options.with_max_depth(depth);
    }
    if let Some(top) = args.top {
        options = options.with_top_n(top);
    }

    Ok(format_tree(&data, &options))
}
