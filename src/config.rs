use clap::Parser;
use std::path::PathBuf;

pub(crate) const DEFAULT_STORE: &str = "expenses.csv";

/// Personal expense tracker: records expenses to a CSV file and summarizes them.
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub(crate) struct Config {
    /// Expense store, created with a header row if it doesn't exist
    #[arg(short, long, default_value = DEFAULT_STORE)]
    pub file: PathBuf,
    /// Directory receiving exported reports and charts
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Symbol printed in front of every amount
    #[arg(short, long, default_value = "₹")]
    pub currency: String,
}
