pub mod items;

pub use items::{print_labeled_row, print_labeled_table, print_summary, LabeledRow};
