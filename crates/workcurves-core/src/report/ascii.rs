//! Terminal rendering of a curve collection.

use indoc::indoc;

use super::surface::LevelAxis;
use crate::curves::CurveCollection;
use crate::dataset::{HOURS_PER_DAY, MAX_MINUTES_PER_HOUR};

const LEGEND: &str = indoc! {"
    Legend: ' ' (<1 min)  ░ (<15)  ▒ (<30)  ▓ (<45)  █ (45-60)
    Rows run from the least to the most active window.
"};

/// Shade character for minutes active in one hour.
pub fn shade_char(minutes: f64) -> char {
    let fraction = minutes / MAX_MINUTES_PER_HOUR;
    if minutes < 1.0 {
        ' '
    } else if fraction < 0.25 {
        '░'
    } else if fraction < 0.5 {
        '▒'
    } else if fraction < 0.75 {
        '▓'
    } else {
        '█'
    }
}

/// Render the collection as a shaded hour-by-level grid.
pub fn render_ascii(collection: &CurveCollection, axis: LevelAxis) -> String {
    let mut output = String::new();

    output.push_str("\nWork Curves\n");
    output.push_str(&"=".repeat(88));
    output.push('\n');

    if collection.is_empty() {
        output.push_str("No curves: every window was empty or the width exceeds the activity range.\n");
        return output;
    }

    output.push_str(&format!(
        "Curves: {} of {} windows",
        collection.len(),
        collection.windows_attempted()
    ));
    if let Some(params) = collection.params() {
        output.push_str(&format!(
            " (width {}, offset {})",
            params.window_width, params.offset
        ));
    }
    output.push_str("\n\n");

    // Header row with hours
    output.push_str(&format!("{:>8} ", "level"));
    for hour in 0..HOURS_PER_DAY {
        output.push_str(&format!("{:>2} ", hour));
    }
    output.push_str(" days report\n");

    for curve in collection {
        output.push_str(&format!("{:>8.1} ", axis.level(curve)));
        for &minutes in &curve.profile {
            output.push(' ');
            output.push(shade_char(minutes));
            output.push(' ');
        }
        output.push_str(&format!(
            " {:>4} {:>5.0}%\n",
            curve.day_count,
            curve.self_report * 100.0
        ));
    }

    output.push('\n');
    output.push_str(&"=".repeat(88));
    output.push('\n');
    output.push_str(LEGEND);
    output
}
