//! Mealboard CLI entry point.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mealboard",
    version,
    about = "Dining-hall menu viewer: date-aware rendering, allergen tags, calorie tally"
)]
struct Cli {
    #[command(subcommand)]
    command: mealboard::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = mealboard::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
