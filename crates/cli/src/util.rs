use unicode_width::UnicodeWidthStr;

use tabula_engine::document::Document;

use crate::CliError;

/// Hard cap on a printed column's width so one long cell does not wreck
/// the whole table.
const MAX_COLUMN_WIDTH: usize = 40;

/// Cell text as one printable line: embedded line breaks become spaces.
pub(crate) fn display_cell(cell: &str) -> String {
    if cell.contains('\n') || cell.contains('\r') {
        cell.replace("\r\n", " ").replace(&['\n', '\r'][..], " ")
    } else {
        cell.to_string()
    }
}

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if width < 3 {
        for ch in s.chars() {
            let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if cw <= width {
                return ch.to_string();
            }
        }
        return String::new();
    }

    if display_width(s) <= width {
        return s.to_string();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            end_byte = i;
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw > width {
        truncate_display(s, width)
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

/// One display width per column: widest of header and cells, capped.
fn column_widths(document: &Document) -> Vec<usize> {
    let mut widths: Vec<usize> = document
        .headers()
        .iter()
        .map(|h| display_width(h).max(1))
        .collect();
    for row in document.rows() {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() {
                widths[index] = widths[index].max(display_width(&display_cell(cell)));
            }
        }
    }
    for width in &mut widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }
    widths
}

/// Print the whole grid as an aligned table: header, rule, numbered body
/// rows. The gutter numbers are the 1-based rows that `drop --rows` and
/// `copy --rows` take.
pub(crate) fn print_table(document: &Document) {
    let widths = column_widths(document);
    // Gutter as wide as the largest row number.
    let gutter = document.row_count().to_string().len();

    let header: Vec<String> = document
        .headers()
        .iter()
        .zip(&widths)
        .map(|(name, &width)| pad_right(name, width))
        .collect();
    println!("{:>gutter$}  {}", "#", header.join("  "));

    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    println!("{}  {}", "-".repeat(gutter), rule.join("  "));

    for (number, row) in document.rows().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad_right(&display_cell(cell), width))
            .collect();
        println!("{:>gutter$}  {}", number + 1, cells.join("  "));
    }
}

/// Parses comma-separated 1-based row numbers (as `show` prints them)
/// into zero-based indices.
pub(crate) fn parse_row_list(args: &[String]) -> Result<Vec<usize>, CliError> {
    let mut indices = Vec::new();
    for token in args.iter().flat_map(|arg| arg.split(',')) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let number: usize = token
            .parse()
            .map_err(|_| CliError::args(format!("invalid row number '{token}'")))?;
        if number == 0 {
            return Err(
                CliError::args("row numbers are 1-based").with_hint("use the numbers `show` prints")
            );
        }
        indices.push(number - 1);
    }
    Ok(indices)
}

/// Resolves one column given by header name (exact, then
/// case-insensitive) or 1-based position.
pub(crate) fn resolve_column(document: &Document, spec: &str) -> Result<usize, CliError> {
    let headers = document.headers();
    if let Some(index) = headers.iter().position(|h| h == spec) {
        return Ok(index);
    }
    if let Some(index) = headers.iter().position(|h| h.eq_ignore_ascii_case(spec)) {
        return Ok(index);
    }
    if let Ok(number) = spec.parse::<usize>() {
        if number >= 1 && number <= headers.len() {
            return Ok(number - 1);
        }
    }
    Err(
        CliError::args(format!("unknown column '{spec}'"))
            .with_hint(format!("available columns: {}", headers.join(", "))),
    )
}

/// Resolves comma-separated column specs, in the order given.
pub(crate) fn resolve_columns(document: &Document, args: &[String]) -> Result<Vec<usize>, CliError> {
    let mut indices = Vec::new();
    for token in args.iter().flat_map(|arg| arg.split(',')) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        indices.push(resolve_column(document, token)?);
    }
    Ok(indices)
}
