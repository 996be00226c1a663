use colored::*;

use crate::models::ItemKind;

/// One accepted item, flattened for console output.
pub struct LabeledRow {
    pub number: u64,
    pub title: String,
    pub label: String,
}

pub fn print_labeled_row(kind: ItemKind, row: &LabeledRow) {
    println!(
        "{} {} {} [{}]",
        kind.to_string().bright_black(),
        format!("#{}", row.number).bright_blue().bold(),
        truncate(&row.title, 70),
        row.label.cyan()
    );
}

pub fn print_labeled_table(rows: &[LabeledRow]) {
    println!(
        "{:<10} {:<30} {:<60}",
        "Number".bold(),
        "Label".bold(),
        "Title".bold()
    );
    println!("{}", "-".repeat(102));
    for row in rows {
        println!(
            "{:<10} {:<30} {:<60}",
            format!("#{}", row.number).bright_blue().bold(),
            row.label.cyan(),
            truncate(&row.title, 58)
        );
    }
}

pub fn print_summary(kind: ItemKind, included: usize) {
    println!(
        "{} {}: {} item(s) written",
        "Done".green().bold(),
        kind,
        included.to_string().green()
    );
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_strings_untouched() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_strings_get_ellipsis() {
        let out = truncate("a very long issue title indeed", 10);
        assert_eq!(out, "a very ...");
        assert_eq!(out.chars().count(), 10);
    }
}
