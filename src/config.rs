//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::session::ViewMode;
use crate::share::DEFAULT_MAX_TOKEN_LEN;

/// Page URL share links point at when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/";

/// Command line configuration for MarkShare.
#[derive(Debug, Clone, Parser)]
#[command(name = "markshare", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter directive (overrides MARKSHARE_LOG), e.g. "debug"
    #[arg(long, global = true)]
    pub log: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Encode a markdown file into a share link
    Share(ShareArgs),
    /// Print the markdown carried by a share link
    Open(OpenArgs),
    /// Render a markdown file or share link to a static HTML page
    Preview(PreviewArgs),
}

/// Link target options shared by commands that produce links.
#[derive(Debug, Clone, Args)]
pub struct LinkArgs {
    /// Page URL the link points at
    #[arg(long, env = "MARKSHARE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Longest token accepted into a link
    #[arg(long, default_value_t = DEFAULT_MAX_TOKEN_LEN)]
    pub max_len: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ShareArgs {
    /// Markdown file ("-" or omitted reads stdin)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Debug, Clone, Args)]
pub struct OpenArgs {
    /// Share link, "#fragment" or bare token
    pub link: String,

    /// Write markdown to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print token format and share time to stderr
    #[arg(long)]
    pub info: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Markdown file to preview
    #[arg(conflicts_with = "link")]
    pub file: Option<PathBuf>,

    /// Share link to preview instead of a file
    #[arg(long)]
    pub link: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Panes to show (defaults to preview for links, split otherwise)
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    /// Page title
    #[arg(long)]
    pub title: Option<String>,

    /// Do not open the generated page in a browser
    #[arg(long)]
    pub no_open: bool,

    /// Leave the share link off the page
    #[arg(long)]
    pub no_share: bool,

    #[command(flatten)]
    pub share: LinkArgs,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if an input file does not exist, the base URL is empty,
    /// or the token limit is zero.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Share(args) => {
                if let Some(file) = &args.file {
                    validate_input(file)?;
                }
                args.link.validate()
            }
            Command::Open(args) => {
                if args.link.trim().is_empty() {
                    bail!("Share link is empty");
                }
                Ok(())
            }
            Command::Preview(args) => {
                if let Some(file) = &args.file {
                    validate_input(file)?;
                }
                args.share.validate()
            }
        }
    }
}

impl LinkArgs {
    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("Base URL must not be empty");
        }

        if self.max_len == 0 {
            bail!("Maximum token length must be greater than zero");
        }

        Ok(())
    }
}

/// Returns true when the path means standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn validate_input(path: &Path) -> Result<()> {
    if !is_stdin(path) && !path.is_file() {
        bail!("Markdown file does not exist: {}", path.display());
    }
    Ok(())
}
