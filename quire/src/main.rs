use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use quire::{
  build::{build_site, read_markdown},
  cli::{AstStage, Cli, Commands},
  config::Config,
};
use quire_commonmark::MarkdownProcessor;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      // Check if file already exists and that we're not forcing overwrite
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
          info!("Created directory: {}", parent.display());
        }
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;

      info!(
        "Configuration file created successfully. Edit it to customize your \
         site."
      );
      Ok(())
    },

    Commands::Build { .. } => {
      let config = Config::load(&cli)?;
      info!("Starting build...");

      let written = build_site(&config).wrap_err("Build failed")?;
      info!(
        "Rendered {} documents into {}",
        written.len(),
        config.output_dir.display()
      );
      Ok(())
    },

    Commands::Render { file } => {
      let config = Config::load(&cli)?;
      let processor = MarkdownProcessor::new(config.markdown_options());
      let content = read_markdown(file)?;

      #[allow(clippy::print_stdout, reason = "Rendered HTML is the output")]
      {
        print!("{}", processor.render(&content).html);
      }
      Ok(())
    },

    Commands::Ast { file, stage } => {
      let config = Config::load(&cli)?;
      let processor = MarkdownProcessor::new(config.markdown_options());
      let content = read_markdown(file)?;

      let document = processor.document_tree(&content);
      let json = match stage {
        AstStage::Document => serde_json::to_string_pretty(&document)?,
        AstStage::Render => {
          serde_json::to_string_pretty(&processor.compile_tree(&document))?
        },
      };

      #[allow(clippy::print_stdout, reason = "The tree dump is the output")]
      {
        println!("{json}");
      }
      Ok(())
    },
  }
}
