use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::scoring::TotalScore;

/// T-score bands conventionally read as elevated (mean 50, SD 10).
const T_ELEVATED: f64 = 60.0;
const T_CLINICAL: f64 = 70.0;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score report as a table with columns: Scale, Raw, T.
/// T-scores at or above 70 render red, at or above 60 yellow.
pub fn format_score_table(total: &TotalScore, use_colors: bool) -> String {
    if total.scales_results.is_empty() {
        return format!("No scales scored.\nUnanswered: {}", total.unanswered);
    }

    let name_width = total
        .scales_results
        .iter()
        .map(|s| s.scale_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Scale".len());

    let mut lines = Vec::with_capacity(total.scales_results.len() + 3);

    let header = format!("{:<name_width$}  {:>4}  {:>6}", "Scale", "Raw", "T");
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for score in &total.scales_results {
        let t_cell = format!("{:>6}", format!("{:.1}", score.t_score));
        let t_cell = if use_colors {
            if score.t_score >= T_CLINICAL {
                t_cell.red().to_string()
            } else if score.t_score >= T_ELEVATED {
                t_cell.yellow().to_string()
            } else {
                t_cell
            }
        } else {
            t_cell
        };

        lines.push(format!(
            "{:<name_width$}  {:>4}  {}",
            score.scale_name, score.initial_score, t_cell
        ));
    }

    lines.push(String::new());
    lines.push(format!("Unanswered: {}", total.unanswered));
    lines.join("\n")
}

/// Format a score report as pretty-printed JSON with the wire field names
/// (`scalesResults`, `scaleName`, `initialScore`, `tScore`, `unanswered`).
pub fn format_json(total: &TotalScore) -> serde_json::Result<String> {
    serde_json::to_string_pretty(total)
}
