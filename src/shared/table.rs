//! Table and text layout helpers used by the session output.
//! Keeps ANSI-aware width calculations and simple table rendering in one place.

/// Render a simple text table. Column widths are auto-computed from the widest
/// cell (header or row) using display lengths that ignore ANSI color codes.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> =
        headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }

    let mut out = String::new();
    let header_row = format_row(headers, &widths);
    out.push_str(&header_row);
    out.push('\n');
    out.push_str(&"=".repeat(display_len(&header_row)));
    for row in rows {
        out.push('\n');
        out.push_str(format_row(row, &widths).trim_end());
    }
    out
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths.iter())
        .map(|(cell, width)| pad_field(cell, *width, display_len(cell)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Right-pad a field based on visible length (ignoring ANSI codes).
pub fn pad_field(display: &str, target: usize, plain_len: usize) -> String {
    let mut out = display.to_string();
    out.push_str(&" ".repeat(target.saturating_sub(plain_len)));
    out
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out =
        text.chars().take(max_width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

/// Compute visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let headers = vec!["from".to_string(), "style".to_string()];
        let rows = vec![
            vec!["0".to_string(), "bold".to_string()],
            vec!["12".to_string(), "strikethrough".to_string()],
        ];
        let out = render_table(&headers, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "from | style        ");
        assert_eq!(lines[1], "=".repeat(20));
        assert_eq!(lines[2], "0    | bold");
        assert_eq!(lines[3], "12   | strikethrough");
    }

    #[test]
    fn test_display_len_ignores_ansi() {
        assert_eq!(display_len("\x1b[1mbold\x1b[0m"), 4);
        assert_eq!(display_len("héllo"), 5);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("journal", 10), "journal");
        assert_eq!(truncate_with_ellipsis("journal", 4), "jou…");
        assert_eq!(truncate_with_ellipsis("journal", 1), "…");
        assert_eq!(truncate_with_ellipsis("journal", 0), "");
    }
}
