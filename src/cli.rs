use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::conflict::Decision;

#[derive(Parser)]
#[command(name = "pdfslice")]
#[command(about = "Extract page selections from PDFs or split them into fixed-size parts")]
#[command(version)]
pub struct Cli {
    /// Log filter, e.g. "info" or "pdfslice=debug"
    #[arg(long, global = true, env = "PDFSLICE_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display page count and metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Validate a page range and print its canonical form
    Pages {
        /// PDF file the pages refer to
        path: PathBuf,

        /// Page ranges (e.g., "1,3-5")
        pages: String,
    },

    /// Extract selected pages into a new PDF
    #[command(alias = "cat")]
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Page ranges (e.g., "1,3-5")
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        conflict: ConflictArgs,
    },

    /// Split a PDF into files of N consecutive pages
    #[command(alias = "burst")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Pages per output file
        #[arg(
            short = 'n',
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        pages_per_file: u32,

        /// Base output path; its directory and stem name the parts
        /// (defaults to the input's directory and stem)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        conflict: ConflictArgs,
    },
}

/// How to handle outputs that already exist. Without a flag, ask.
#[derive(Args, Debug, Clone, Copy)]
pub struct ConflictArgs {
    /// Replace existing files without asking
    #[arg(long, conflicts_with = "skip_existing")]
    pub overwrite: bool,

    /// Leave existing files untouched without asking
    #[arg(long)]
    pub skip_existing: bool,
}

impl ConflictArgs {
    /// The fixed answer selected by flags, if any.
    pub fn decision(&self) -> Option<Decision> {
        if self.overwrite {
            Some(Decision::Overwrite)
        } else if self.skip_existing {
            Some(Decision::Skip)
        } else {
            None
        }
    }
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
    fn test_split_defaults() {
        let cli = Cli::try_parse_from(["pdfslice", "burst", "in.pdf"]).unwrap();
        match cli.command {
            Commands::Split {
                pages_per_file,
                output,
                conflict,
                ..
            } => {
                assert_eq!(pages_per_file, 1);
                assert!(output.is_none());
                assert_eq!(conflict.decision(), None);
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_split_rejects_zero() {
        assert!(Cli::try_parse_from(["pdfslice", "split", "in.pdf", "-n", "0"]).is_err());
    }

    #[test]
    fn test_conflict_flags() {
        let cli = Cli::try_parse_from([
            "pdfslice",
            "extract",
            "in.pdf",
            "1-2",
            "-o",
            "o.pdf",
            "--skip-existing",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract { conflict, .. } => {
                assert_eq!(conflict.decision(), Some(Decision::Skip))
            }
            _ => panic!("expected extract"),
        }
        assert!(Cli::try_parse_from([
            "pdfslice",
            "extract",
            "in.pdf",
            "1",
            "-o",
            "o.pdf",
            "--overwrite",
            "--skip-existing"
        ])
        .is_err());
    }
}
