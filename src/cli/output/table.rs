//! Table output formatting for CLI commands
//!
//! Renders people as tables using comfy-table.

use crate::domain::models::Person;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format people as a table, one row per person in the given order
    pub fn format_people(&self, people: &[Person]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("First name").add_attribute(Attribute::Bold),
            Cell::new("Last name").add_attribute(Attribute::Bold),
        ]);

        for person in people {
            let id_cell = if self.use_colors {
                Cell::new(person.id()).fg(Color::Cyan)
            } else {
                Cell::new(person.id())
            };
            table.add_row(vec![
                id_cell,
                Cell::new(person.first_name()),
                Cell::new(person.last_name()),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
