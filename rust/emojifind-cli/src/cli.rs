use clap::{Parser, Subcommand};
use emojifind_core::{CopyFormat, SkinTone};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "emojifind")]
#[command(version)]
#[command(about = "Build and query the Emoji Find dataset")]
#[command(long_about = "
emojifind - build-time tools for Emoji Find

USAGE:
  emojifind prepare              # emoji-test.txt + en.xml -> groups.csv, emoji.csv
  emojifind describe             # fill desc/<glyph>.txt through a chat model
  emojifind index                # tables + descriptions -> index.json
  emojifind search <QUERY>       # query the built assets

Logging is controlled with RUST_LOG (default: emojifind=info).
")]
pub struct Cli {
    /// Directory holding the generated assets
    #[arg(long, global = true, env = "EMOJIFIND_ASSETS_DIR", default_value = "assets", value_name = "DIR")]
    pub assets: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse the Unicode sources into the interchange tables
    Prepare {
        /// Directory containing emoji-test.txt and en.xml
        #[arg(long, env = "EMOJIFIND_INPUT_DIR", default_value = "input", value_name = "DIR")]
        input: PathBuf,
    },

    /// Build the search index snapshot from the tables and descriptions
    Index,

    /// Generate missing description files with an OpenAI-compatible API
    Describe {
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Chat completions URL
        #[arg(long, env = "OPENAI_ENDPOINT", value_name = "URL")]
        endpoint: Option<String>,

        #[arg(long, env = "OPENAI_MODEL", default_value = "deepseek-chat")]
        model: String,

        /// Pause after each generated description
        #[arg(long, default_value_t = 250, value_name = "MS")]
        delay_ms: u64,

        /// Stop after this many new descriptions
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search the built assets
    Search {
        #[arg(value_name = "QUERY")]
        query: String,

        /// Preferred skin tone (Default, Light, MediumLight, Medium, MediumDark, Dark)
        #[arg(long, default_value = "Light")]
        tone: SkinTone,

        /// Copy format shown next to each result
        #[arg(long, default_value = "Emoji")]
        format: CopyFormat,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
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
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "emojifind", "--assets", "out", "search", "thumbs", "--tone", "Dark", "--format", "HTMLDecimal",
        ])
        .unwrap();
        assert_eq!(cli.assets, PathBuf::from("out"));
        match cli.command {
            Command::Search { query, tone, format, limit } => {
                assert_eq!(query, "thumbs");
                assert_eq!(tone, SkinTone::Dark);
                assert_eq!(format, CopyFormat::HTMLDecimal);
                assert_eq!(limit, 20);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tone_rejected() {
        assert!(Cli::try_parse_from(["emojifind", "search", "x", "--tone", "Blue"]).is_err());
    }
}
