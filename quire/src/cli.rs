use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command line interface for quire
#[derive(Parser, Debug)]
#[command(author, version, about = "quire: markdown to HTML for a blog")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,
}

/// All supported subcommands for the quire CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new quire configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "quire.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render every markdown file in the input directory to HTML.
  Build {
    /// Path to the directory containing markdown files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory for generated HTML.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Host of the site itself. Links to it are not treated as external.
    #[arg(long)]
    own_domain: Option<String>,

    /// Public URL of the site, used to derive the own domain when
    /// `--own-domain` is not given.
    #[arg(long)]
    site_url: Option<String>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,
  },

  /// Render a single markdown file and print the HTML.
  Render {
    /// Markdown file to render.
    file: PathBuf,
  },

  /// Print the intermediate tree of a markdown file as JSON.
  Ast {
    /// Markdown file to parse.
    file: PathBuf,

    /// Which tree to print.
    #[arg(long, value_enum, default_value_t = AstStage::Document)]
    stage: AstStage,
  },
}

/// Tree stages that the `ast` command can print.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstStage {
  /// Markdown tree after the document passes
  Document,
  /// HTML tree after the render passes
  Render,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
