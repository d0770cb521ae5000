use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// sprig - browse and edit tree-shaped data in the terminal
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "SPRIG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a tree file in the interactive viewer
    View(ViewArgs),

    /// Print a tree file to stdout
    Print(PrintArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// JSON file holding the forest
    pub file: PathBuf,

    /// Initial expansion depth (overrides config)
    #[arg(short, long, value_name = "N")]
    pub depth: Option<usize>,

    /// Disable expand/collapse animation
    #[arg(long)]
    pub no_animation: bool,
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    /// JSON file holding the forest
    pub file: PathBuf,

    /// Maximum depth to display
    #[arg(short, long, value_name = "N")]
    pub depth: Option<usize>,

    /// Show only the first N children of each node
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Append node ids to labels
    #[arg(long)]
    pub ids: bool,

    /// Output as JSON, with depths filled in
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_view_command() {
        let cli = Cli::parse_from(["sprig", "view", "tree.json", "--depth", "2"]);
        match cli.command {
            Command::View(args) => {
                assert_eq!(args.file, PathBuf::from("tree.json"));
                assert_eq!(args.depth, Some(2));
                assert!(!args.no_animation);
            }
            _ => panic!("Expected View command"),
        }
    }

    #[test]
    fn parse_print_with_options() {
        let cli = Cli::parse_from(["sprig", "print", "--json", "-n", "5", "--ids", "data.json"]);
        match cli.command {
            Command::Print(args) => {
                assert!(args.json);
                assert!(args.ids);
                assert_eq!(args.top, Some(5));
                assert_eq!(args.depth, None);
            }
            _ => panic!("Expected Print command"),
        }
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["sprig", "-vvv", "print", "x.json"]);
        assert_eq!(cli.verbose, 3);
    }
}
