use crate::core::filters::NOT_AVAILABLE;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned cell for an already formatted figure. "n/a" is dimmed.
pub fn figure_cell(text: String) -> Cell {
    let cell = if text == NOT_AVAILABLE {
        Cell::new(text).fg(Color::DarkGrey)
    } else {
        Cell::new(text)
    };
    cell.set_alignment(CellAlignment::Right)
}

/// Name cell, highlighted when the instance is selected in calculator mode.
pub fn name_cell(name: &str, selected: bool) -> Cell {
    if selected {
        Cell::new(name)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(name)
    }
}
