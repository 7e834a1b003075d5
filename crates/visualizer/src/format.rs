//! Text rendering of decoded items.

use enumviz_payload::{Cell, SequentialModel, ValueKind};
use serde_json::Value;

/// Serializes `value` on one line with a space after every `{`, `[`, `:`
/// and `,`, and before every `}` and `]`. Punctuation inside strings is left
/// alone.
pub fn pretty_one_line(value: &Value) -> String {
    let json = value.to_string();
    let mut out = String::with_capacity(json.len() + json.len() / 4);
    let mut in_string = false;
    let mut escaped = false;
    for ch in json.chars() {
        if in_string {
            out.push(ch);
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '{' | '[' | ':' | ',' => {
                out.push(ch);
                out.push(' ');
            }
            '}' | ']' => {
                out.push(' ');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// One display line for a sequence item.
///
/// JSON items are pretty-printed on one line; other text has its line breaks
/// escaped so that every item occupies exactly one line.
pub fn format_item(cell: &Cell) -> String {
    if cell.kind == ValueKind::Json {
        if let Some(value) = cell.as_json() {
            return pretty_one_line(&value);
        }
    }
    escape_line_breaks(&cell.text)
}

fn escape_line_breaks(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_owned();
    }
    text.replace('\r', "\\r").replace('\n', "\\n")
}

pub fn truncation_line(count: usize) -> String {
    format!("… truncated after {count} items")
}

/// Text-surface content for a sequence: one item per line, plus a trailing
/// notice when the encoder dropped items past its bound.
pub fn format_sequence(model: &SequentialModel) -> String {
    let mut lines: Vec<String> = model.items.iter().map(format_item).collect();
    if model.truncated {
        lines.push(truncation_line(model.items.len()));
    }
    lines.join("\n")
}

/// Grid-cell text. Nulls display empty.
pub fn grid_text(cell: &Cell) -> &str {
    match cell.kind {
        ValueKind::Null => "",
        _ => &cell.text,
    }
}
