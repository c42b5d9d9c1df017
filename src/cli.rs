use clap::{Args, Parser, Subcommand};
use std::num::NonZeroU32;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-split-rename")]
#[command(about = "Split a PDF into fixed-size page chunks named after a spreadsheet column")]
#[command(version)]
pub struct Cli {
    /// File that receives the split log (appended to; `plan` does not log)
    #[arg(
        long,
        global = true,
        env = "PDF_SPLIT_RENAME_LOG",
        default_value = "pdf-split-rename.log"
    )]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the PDF and write one file per chunk
    Split {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for the output files (created if missing)
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Fail instead of overwriting when two names resolve to one filename
        #[arg(long)]
        strict_names: bool,

        /// Print a JSON report of the written files
        #[arg(long)]
        json: bool,
    },

    /// Show which pages would go to which file, without writing anything (not even the log)
    #[command(alias = "dry-run")]
    Plan {
        #[command(flatten)]
        input: InputArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Whether the command touches the filesystem, and so keeps a log file
    pub fn writes_files(&self) -> bool {
        matches!(self, Commands::Split { .. })
    }
}

#[derive(Args, Clone)]
pub struct InputArgs {
    /// PDF file to split
    pub path: PathBuf,

    /// Spreadsheet whose first column names the output files
    pub names: PathBuf,

    /// Number of pages in each output file
    #[arg(short, long, value_parser = parse_pages_per_file)]
    pub pages_per_file: NonZeroU32,

    /// Worksheet to read (default: the first one)
    #[arg(long)]
    pub sheet: Option<String>,

    /// The first row holds a name, not a column title
    #[arg(long)]
    pub no_header: bool,
}

fn parse_pages_per_file(s: &str) -> Result<NonZeroU32, String> {
    s.trim()
        .parse::<u32>()
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| format!("'{}' is not a positive whole number of pages", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pages_per_file() {
        assert_eq!(parse_pages_per_file("3").unwrap().get(), 3);
        assert_eq!(parse_pages_per_file(" 12 ").unwrap().get(), 12);
        assert!(parse_pages_per_file("0").is_err());
        assert!(parse_pages_per_file("-2").is_err());
        assert!(parse_pages_per_file("two").is_err());
        assert!(parse_pages_per_file("").is_err());
    }

    #[test]
    fn test_split_arguments() {
        let cli = Cli::try_parse_from([
            "pdf-split-rename",
            "split",
            "in.pdf",
            "names.xlsx",
            "-p",
            "3",
            "-o",
            "out",
            "--sheet",
            "Plan1",
        ])
        .unwrap();

        match cli.command {
            Commands::Split {
                input,
                output_dir,
                strict_names,
                json,
            } => {
                assert_eq!(input.path, PathBuf::from("in.pdf"));
                assert_eq!(input.names, PathBuf::from("names.xlsx"));
                assert_eq!(input.pages_per_file.get(), 3);
                assert_eq!(input.sheet.as_deref(), Some("Plan1"));
                assert!(!input.no_header);
                assert_eq!(output_dir, PathBuf::from("out"));
                assert!(!strict_names);
                assert!(!json);
            }
            Commands::Plan { .. } => panic!("expected split"),
        }
    }

    #[test]
    fn test_only_split_keeps_a_log() {
        let split = Cli::try_parse_from([
            "pdf-split-rename",
            "split",
            "in.pdf",
            "names.xlsx",
            "-p",
            "1",
            "-o",
            "out",
        ])
        .unwrap();
        assert!(split.command.writes_files());

        let plan =
            Cli::try_parse_from(["pdf-split-rename", "plan", "in.pdf", "names.xlsx", "-p", "1"])
                .unwrap();
        assert!(!plan.command.writes_files());
    }

    #[test]
    fn test_zero_pages_rejected() {
        let result = Cli::try_parse_from([
            "pdf-split-rename",
            "split",
            "in.pdf",
            "names.xlsx",
            "-p",
            "0",
            "-o",
            "out",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_dir_required() {
        let result =
            Cli::try_parse_from(["pdf-split-rename", "split", "in.pdf", "names.xlsx", "-p", "2"]);
        assert!(result.is_err());
    }
}
