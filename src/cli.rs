use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::export::OutputFormat;

/// Build word clouds and word counts from PDF, text and Word documents.
#[derive(Debug, Parser)]
#[command(name = "wordcloud-studio", about, version)]
pub struct Cli {
    /// Config file (YAML). Defaults to ./wordcloud.yml when present
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Defaults to the interactive view
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive terminal view
    Tui {
        /// Document to open on start
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Declared MIME type. Guessed from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },

    /// Print file details and the extracted text preview
    Info {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write the word frequency table as CSV
    Counts {
        #[command(flatten)]
        input: InputArgs,

        /// Output file. Prints to stdout when omitted
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Render the word cloud image
    Cloud {
        #[command(flatten)]
        input: InputArgs,

        /// Image format
        #[arg(long, value_parser = parse_format)]
        format: Option<OutputFormat>,

        /// Do not exclude the standard stopword list
        #[arg(long)]
        no_stopwords: bool,

        /// Additional word to exclude (repeatable)
        #[arg(long = "exclude", value_name = "WORD")]
        exclude: Vec<String>,

        /// Output directory. Defaults to the configured output_dir
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Path to the document
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Declared MIME type. Guessed from the extension when omitted
    #[arg(long)]
    pub mime: Option<String>,
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    value.parse::<OutputFormat>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cloud_args() {
        let cli = Cli::parse_from([
            "wordcloud-studio", "cloud", "notes.txt", "--format", "webp",
            "--exclude", "cat", "--exclude", "dog", "--no-stopwords",
        ]);
        match cli.command {
            Some(Commands::Cloud { input, format, no_stopwords, exclude, output }) => {
                assert_eq!(input.file, PathBuf::from("notes.txt"));
                assert_eq!(format, Some(OutputFormat::Webp));
                assert!(no_stopwords);
                assert_eq!(exclude, vec!["cat", "dog"]);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::parse_from(["wordcloud-studio"]);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["wordcloud-studio", "--config", "x.yml", "tui", "report.pdf"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.yml")));
        match cli.command {
            Some(Commands::Tui { file, mime }) => {
                assert_eq!(file, Some(PathBuf::from("report.pdf")));
                assert!(mime.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
