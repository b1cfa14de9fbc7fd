pub mod formatter;

pub use formatter::{format_json, format_score_table, should_use_colors};
