use clap::Parser;
use sheetscope::{DEFAULT_BIN_COUNT, DEFAULT_TOP_N, run_tui};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse spreadsheets and summarize them in the terminal.", long_about = None)]
struct Args {
    /// Directory scanned for spreadsheet files
    #[arg(short, long, default_value = "xlsx")]
    dir: PathBuf,
    /// Number of histogram bins for numeric columns
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT)]
    bins: usize,
    /// Number of top categories shown for categorical columns
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,
}

fn main() -> Result<(), sheetscope::SheetError> {
    let args = Args::parse();
    run_tui(&args.dir, args.bins, args.top)
}
