/// Usable width from `COLUMNS`, ignored when implausibly narrow.
pub fn terminal_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40)
}

/// Render an aligned plain-text table.
///
/// Widths are measured in display columns; CJK characters count as two.
pub fn render<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|value| display_width(value))
                .chain(std::iter::once(display_width(header.as_ref())))
                .max()
                .unwrap_or(0)
        })
        .collect();
    shrink_to_fit(&mut widths, max_width);

    let header = line(headers.iter().map(AsRef::as_ref), &widths);
    let mut lines = vec![header.clone(), "-".repeat(display_width(&header))];
    for row in rows {
        lines.push(line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(value, width)| pad(&truncate(value, *width), *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn shrink_to_fit(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > 8)
            .max_by_key(|width| **width)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn char_width(ch: char) -> usize {
    // Hiragana, Katakana, CJK ideographs, fullwidth forms
    if matches!(ch as u32, 0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6)
    {
        2
    } else {
        1
    }
}

fn display_width(value: &str) -> usize {
    value.chars().map(char_width).sum()
}

fn truncate(value: &str, width: usize) -> String {
    let value = value.replace('\n', " ");
    if display_width(&value) <= width {
        return value;
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let w = char_width(ch);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(value));
    format!("{value}{}", " ".repeat(fill))
}
