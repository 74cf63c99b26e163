// Clipboard text assembly

use tabula_engine::document::Document;

use crate::codec::format_record;

/// Builds the text block a copy gesture puts on the clipboard: one CSV
/// record per line, header names first, then each covered row.
///
/// Covers the selected rows or columns when something is selected, the
/// whole grid otherwise. Lines are joined with `\n` and there is no
/// trailing newline.
pub fn selection_block(document: &Document) -> String {
    let (rows, columns) = document.copy_region();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header: Vec<String> = columns
        .iter()
        .filter_map(|&column| document.header(column))
        .map(str::to_string)
        .collect();
    lines.push(format_record(&header));

    for &row in &rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|&column| document.cell(row, column).unwrap_or("").to_string())
            .collect();
        lines.push(format_record(&cells));
    }
    lines.join("\n")
}
