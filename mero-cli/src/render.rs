//! Plain-text rendering of a view.

use std::io;
use std::io::Write;

use mero_lib::ViewResult;
use mero_lib::model::FieldDescriptor;
use mero_lib::model::Record;
use mero_lib::view::ALL_GROUP;

/// Cells longer than this are cut and end in `…`.
const MAX_CELL_WIDTH: usize = 40;

const COLUMN_GAP: &str = "  ";

/// Print a view as text tables.
///
/// Ungrouped views print the requested page. Grouped views print every
/// group in full under a `label (count)` heading, since groups span pages.
pub fn write_view<W: Write>(
    out: &mut W,
    view: &ViewResult<'_, Record>,
    fields: &[FieldDescriptor],
) -> io::Result<()> {
    let columns: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();

    if view.total_matched == 0 {
        return writeln!(out, "No matching records.");
    }

    let grouped = !(view.groups.len() == 1 && view.groups[0].label == ALL_GROUP);
    if grouped {
        for (i, group) in view.groups.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{} ({})", group.label, group.len())?;
            write_table(out, &columns, &group.records)?;
        }
        return writeln!(out, "\n{} matched", view.total_matched);
    }

    write_table(out, &columns, &view.page_records)?;
    writeln!(out)?;
    writeln!(out, "{}", page_footer(view))
}

fn page_footer(view: &ViewResult<'_, Record>) -> String {
    if view.page_records.is_empty() {
        return format!(
            "Page {} of {} is empty ({} matched)",
            view.page, view.page_count, view.total_matched
        );
    }
    let first = view
        .records
        .iter()
        .position(|r| std::ptr::eq(*r, view.page_records[0]))
        .unwrap_or(0)
        + 1;
    let last = first + view.page_records.len() - 1;
    format!(
        "Showing {}-{} of {} (page {} of {})",
        first, last, view.total_matched, view.page, view.page_count
    )
}

fn write_table<W: Write>(out: &mut W, columns: &[&str], records: &[&Record]) -> io::Result<()> {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|key| cell(record.get(key).map(|v| v.to_string()).unwrap_or_default()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(out, columns.iter().copied(), &widths)?;
    for row in &rows {
        write_row(out, row.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

fn write_row<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(out, "{}", line.trim_end())
}

fn cell(text: String) -> String {
    let text = text.replace(['\n', '\r', '\t'], " ");
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text;
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}
