// RFC4180 record grammar: parse, format, quote-aware record splitting

/// Parses one record into its fields.
///
/// Single left-to-right scan with an inside-quotes flag. Inside quotes a
/// doubled `"` emits one literal quote; any other `"` toggles the flag. A
/// `,` outside quotes ends the current field. Everything else is field
/// content verbatim, embedded newlines included. Empty input yields one
/// empty field, never zero, and fields are not trimmed.
pub fn parse_record(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut inside_quotes = false;
    let mut chars = record.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if inside_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    inside_quotes = !inside_quotes;
                }
            }
            ',' if !inside_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

/// Serializes fields into one record: comma-joined, each field escaped
/// independently and only when it needs to be.
pub fn format_record(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<String>>()
        .join(",")
}

/// Wraps a field in quotes, doubling internal quotes, when it contains a
/// comma, a quote, or a line break. Anything else passes through as-is.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits whole-file text into records.
///
/// A line break (`\n`, `\r\n`, or bare `\r`) outside quotes ends a
/// record; inside quotes it is field content and the record continues
/// across the physical line. Records that are empty or whitespace-only
/// are dropped, so trailing newlines and blank separator lines produce
/// no rows.
pub fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut record = String::new();
    let mut inside_quotes = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            // Escaped quotes toggle twice, which nets out correctly.
            '"' => {
                inside_quotes = !inside_quotes;
                record.push(ch);
            }
            '\r' if !inside_quotes => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                flush_record(&mut records, &mut record);
            }
            '\n' if !inside_quotes => flush_record(&mut records, &mut record),
            _ => record.push(ch),
        }
    }
    flush_record(&mut records, &mut record);
    records
}

fn flush_record(records: &mut Vec<String>, record: &mut String) {
    if !record.trim().is_empty() {
        records.push(std::mem::take(record));
    } else {
        record.clear();
    }
}
