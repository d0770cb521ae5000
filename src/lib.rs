//! sprig - an interactive tree widget for the terminal
//!
//! This crate provides functionality for:
//! - Rendering a forest of nodes as an expandable, selectable tree
//! - Adding, updating and removing nodes while the tree is on screen
//! - Loading forests from JSON and printing them as text
//! - Interactive TUI for browsing and editing a forest

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod tui;
pub mod widget;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SprigError, TreeError};
pub use model::{NodeId, TreeNode};
pub use widget::{TreeOptions, TreeWidget};
