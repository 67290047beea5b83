use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn cyan_header<S: AsRef<str>>(labels: &[S]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label.as_ref()).fg(TableColor::Cyan))
        .collect()
}

/// Pivot counts: zero cells dimmed, the busiest cells highlighted.
pub fn count_cell(count: usize, max: usize) -> Cell {
    if count == 0 {
        Cell::new(count).fg(TableColor::DarkGrey)
    } else if count * 2 >= max {
        Cell::new(count).fg(TableColor::Red)
    } else {
        Cell::new(count).fg(TableColor::Yellow)
    }
}

pub fn blocker_cell(blocker: bool) -> Cell {
    if blocker {
        Cell::new("True").fg(TableColor::Red)
    } else {
        Cell::new("False").fg(TableColor::Green)
    }
}
