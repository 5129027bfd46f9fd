use std::path::PathBuf;

use clap::Parser;

/// A single-screen terminal checklist with undo/redo
#[derive(Parser, Debug)]
#[command(name = "xo", version, about)]
pub struct Cli {
    /// Path to the state file (default: ~/.crossout.json)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Quiet period before a background save, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_no_args() {
        let cli = Cli::parse_from(["xo"]);
        assert!(cli.file.is_none());
        assert!(cli.delay_ms.is_none());
    }

    #[test]
    fn parses_file_and_delay() {
        let cli = Cli::parse_from(["xo", "--file", "/tmp/list.json", "--delay-ms", "500"]);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/list.json")));
        assert_eq!(cli.delay_ms, Some(500));
    }
}
