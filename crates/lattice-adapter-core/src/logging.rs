//! Logging and debugging facilities for Lattice Adapter.
//!
//! This module provides:
//! - Target names for filtering `tracing` output by subsystem
//! - Debug visualization for flattened hierarchical lists
//!
//! # Tracing Integration
//!
//! Lattice Adapter uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_adapter::expand=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`OutlineDebug`] to render a flat list whose rows carry a depth:
//!
//! ```
//! use lattice_adapter_core::logging::{OutlineDebug, OutlineRow};
//!
//! let rows = vec![
//!     OutlineRow::new(0, "fruit").expanded(true),
//!     OutlineRow::new(1, "apple"),
//!     OutlineRow::new(0, "vegetables").expanded(false),
//! ];
//! let output = OutlineDebug::new().format("Adapter", &rows);
//! assert!(output.contains("apple"));
//! ```

use std::fmt;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_adapter_core::signal";
    /// Deferred task queue target.
    pub const DEFERRED: &str = "lattice_adapter_core::deferred";
    /// Adapter data mutation target.
    pub const ADAPTER: &str = "lattice_adapter::adapter";
    /// Observer notification target.
    pub const NOTIFY: &str = "lattice_adapter::notify";
    /// Expand/collapse target.
    pub const EXPAND: &str = "lattice_adapter::expand";
    /// Load more and up fetch target.
    pub const LOAD_MORE: &str = "lattice_adapter::load_more";
    /// Diff application target.
    pub const DIFF: &str = "lattice_adapter::diff";
}

/// Style options for outline visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for outline debug output.
#[derive(Debug, Clone)]
pub struct OutlineFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to prefix each row with its list position.
    pub show_positions: bool,
    /// Whether to mark expandable rows with `[+]` / `[-]`.
    pub show_expansion: bool,
    /// Maximum depth to render (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for OutlineFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_positions: true,
            show_expansion: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl OutlineFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_positions: false,
            show_expansion: false,
            ..Default::default()
        }
    }
}

/// One row of a flattened outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    /// Nesting depth, 0 for top-level rows.
    pub depth: usize,
    /// Text shown for the row.
    pub label: String,
    /// Expanded state for expandable rows, `None` for plain rows.
    pub expanded: Option<bool>,
}

impl OutlineRow {
    /// Create a plain row.
    pub fn new(depth: usize, label: impl Into<String>) -> Self {
        Self {
            depth,
            label: label.into(),
            expanded: None,
        }
    }

    /// Mark the row as expandable with the given state.
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }
}

/// Debug utility for visualizing flattened hierarchical lists.
#[derive(Debug, Clone, Default)]
pub struct OutlineDebug {
    options: OutlineFormatOptions,
}

impl OutlineDebug {
    /// Create a new visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: OutlineFormatOptions) -> Self {
        Self { options }
    }

    /// Format `rows` under a `title` line.
    pub fn format(&self, title: &str, rows: &[OutlineRow]) -> String {
        let mut output = format!("{title} ({} rows):\n", rows.len());

        if rows.is_empty() {
            output.push_str("  (empty)\n");
            return output;
        }

        for (position, row) in rows.iter().enumerate() {
            if self.options.max_depth.is_some_and(|max| row.depth > max) {
                continue;
            }

            output.push_str(&self.build_prefix(row.depth, is_last_sibling(rows, position)));

            if self.options.show_expansion {
                match row.expanded {
                    Some(true) => output.push_str("[-] "),
                    Some(false) => output.push_str("[+] "),
                    None => {}
                }
            }

            output.push_str(&row.label);

            if self.options.show_positions {
                output.push_str(&format!(" @{position}"));
            }

            output.push('\n');
        }

        output
    }

    /// Build the prefix string for a row.
    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => (
                "\u{2502}",
                "\u{251c}\u{2500}\u{2500}",
                "\u{2514}\u{2500}\u{2500}",
            ),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();

        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }

        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A row is the last of its siblings when no later row shares its depth
/// before the outline climbs back above it.
fn is_last_sibling(rows: &[OutlineRow], position: usize) -> bool {
    let depth = rows[position].depth;
    for row in &rows[position + 1..] {
        if row.depth < depth {
            return true;
        }
        if row.depth == depth {
            return false;
        }
    }
    true
}

/// Adapter for `Display` over a pre-built outline.
pub struct OutlineDisplay<'a> {
    debug: &'a OutlineDebug,
    title: &'a str,
    rows: &'a [OutlineRow],
}

impl<'a> OutlineDisplay<'a> {
    /// Wrap rows for display with the given visualizer.
    pub fn new(debug: &'a OutlineDebug, title: &'a str, rows: &'a [OutlineRow]) -> Self {
        Self { debug, title, rows }
    }
}

impl fmt::Display for OutlineDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug.format(self.title, self.rows))
    }
}
