//! Plain-text rendering of a view model.

use std::fmt::Write;

use chronogrid::{Cell, ViewModel};

const CELL_WIDTH: usize = 10;

/// Renders `view` as a block of text.
///
/// The active cell is wrapped in `[ ]`, the selected cell carries a `*`,
/// today's cell a `!`, and days outside the month are shown in `( )`.
pub fn render(view: &ViewModel) -> String {
    let mut out = String::new();
    let up = view
        .up_nav
        .as_ref()
        .map_or("-", |nav| nav.accessible_label.as_str());
    let _ = writeln!(out, "== {} ({}) ==", view.label, view.granularity);
    let _ = writeln!(
        out,
        "  < {}   ^ {}   > {}",
        view.left_nav.accessible_label, up, view.right_nav.accessible_label
    );

    if let Some(headers) = &view.column_headers {
        for header in headers {
            let _ = write!(out, "{header:^CELL_WIDTH$}");
        }
        out.push('\n');
    }
    for row in &view.grid {
        for cell in row {
            let _ = write!(out, "{:^CELL_WIDTH$}", decorate(cell));
        }
        out.push('\n');
    }
    out
}

fn decorate(cell: &Cell) -> String {
    let mut text = cell.display_text.clone();
    if cell.is_selected {
        text.push('*');
    }
    if cell.is_today {
        text.push('!');
    }
    if cell.is_active {
        format!("[{text}]")
    } else if cell.is_out_of_range {
        format!("({text})")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use chronogrid::{DateTimePicker, FixedClock, Granularity, Instant, PickerConfig, Zone};

    use super::*;

    #[test]
    fn test_render_decade() {
        // 2024-01-05T13:20Z
        let now = Instant::from_millis(1_704_460_800_000);
        let picker = DateTimePicker::new(
            PickerConfig::default()
                .zone(Zone::Utc)
                .start_granularity(Granularity::Decade)
                .clock(FixedClock(now)),
        );
        let text = render(&picker.view_model());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== 2020-2029 (decade) ==");
        assert_eq!(lines[1], "  < Go to 2010-2019   ^ -   > Go to 2030-2039");
        assert!(lines[2].contains("[2024!]"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_month_has_headers() {
        let now = Instant::from_millis(1_704_460_800_000);
        let picker =
            DateTimePicker::new(PickerConfig::default().zone(Zone::Utc).clock(FixedClock(now)));
        let text = render(&picker.view_model());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Jan 2024 (month) ==");
        assert!(lines[2].trim_start().starts_with("Su"));
        assert!(lines[3].contains("(31)"));
        assert!(text.contains("[5!]"));
        assert_eq!(lines.len(), 9);
    }
}
