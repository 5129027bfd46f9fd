use clap::Parser;
use crossout::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = crossout::tui::run(cli.file.as_deref(), cli.delay_ms) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
