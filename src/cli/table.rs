//! Fixed-width listing of catalog items.

use std::io::{self, Write};

use serde::Serialize;

use crate::domain::Item;

const SEPARATOR_WIDTH: usize = 80;

/// One rendered listing row
#[derive(Debug, Clone, Serialize)]
pub struct ItemRow<'a> {
    pub id: &'a str,
    pub status: &'static str,
    pub kind: &'static str,
    pub title: &'a str,
    pub year: String,
    pub scope: i32,
    pub fee: f64,
}

impl<'a> From<&'a Item> for ItemRow<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: item.id.as_str(),
            status: if item.rented { "Rented" } else { "Available" },
            kind: item.kind().display_name(),
            title: &item.title,
            year: item.publication_year.to_string(),
            scope: item.scope(),
            fee: item.rental_fee(),
        }
    }
}

/// Write the column header and separator
pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{:<7} {:<9} {:<7} {:<30} {:<7} {:<8} {}",
        "ID", "Rent", "Type", "Title", "Pub", "Scope", "Calc"
    )?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

/// Write a single item row
pub fn write_row<W: Write>(out: &mut W, item: &Item) -> io::Result<()> {
    let row = ItemRow::from(item);
    writeln!(
        out,
        "{:<7} {:<9} {:<7} {:<30} {:<7} {:<8} {:.2}",
        row.id, row.status, row.kind, row.title, row.year, row.scope, row.fee
    )
}

/// Write a header followed by all rows
pub fn write_table<W: Write>(out: &mut W, items: &[&Item]) -> io::Result<()> {
    write_header(out)?;
    for item in items {
        write_row(out, item)?;
    }
    Ok(())
}

/// Render items as a pretty-printed JSON array
pub fn to_json(items: &[&Item]) -> serde_json::Result<String> {
    let rows: Vec<ItemRow<'_>> = items.iter().map(|item| ItemRow::from(*item)).collect();
    serde_json::to_string_pretty(&rows)
}
