//! Table renderers for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use showroom_model::{Booking, Vehicle, VehicleSummary, format_inr};
use showroom_state::BookmarkEntry;

/// Vehicles in a listing page.
pub fn vehicles_table(vehicles: &[Vehicle]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Brand"),
        header_cell("Name"),
        header_cell("Fuel"),
        header_cell("Price"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for vehicle in vehicles {
        table.add_row(vec![
            Cell::new(vehicle.id),
            Cell::new(&vehicle.brand)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&vehicle.name),
            Cell::new(vehicle.fuel_type),
            price_cell(vehicle.price),
        ]);
    }
    table
}

/// Per-brand inventory summary.
pub fn summary_table(summary: &[VehicleSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Brand"), header_cell("Vehicles")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let mut total = 0u64;
    for row in summary {
        total += row.total;
        table.add_row(vec![
            Cell::new(&row.brand)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(row.total),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Bookmarked vehicles.
pub fn bookmarks_table(entries: &[BookmarkEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Bookmark"),
        header_cell("Vehicle"),
        header_cell("Fuel"),
        header_cell("Price"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.bookmark_id),
            Cell::new(entry.vehicle.title()),
            Cell::new(entry.vehicle.fuel_type),
            price_cell(entry.vehicle.price),
        ]);
    }
    table
}

/// Bookings with whatever vehicle detail the records embed.
pub fn bookings_table(bookings: &[Booking]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Booking"),
        header_cell("Vehicle"),
        header_cell("Name"),
        header_cell("Email"),
        header_cell("Booked on"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for booking in bookings {
        let vehicle_label = match booking.vehicle.vehicle() {
            Some(vehicle) => vehicle.title(),
            None => format!("#{}", booking.vehicle.id()),
        };
        table.add_row(vec![
            Cell::new(booking.id),
            Cell::new(vehicle_label),
            Cell::new(&booking.customer_name),
            Cell::new(&booking.customer_email),
            Cell::new(booking.created_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn price_cell(price: i64) -> Cell {
    Cell::new(format!("₹{}", format_inr(price))).fg(Color::Green)
}
