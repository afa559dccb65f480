pub mod templates;

use std::{
  fs,
  path::{Path, PathBuf},
};

use log::info;
use quire_commonmark::{
  MarkdownOptions,
  MarkdownOptionsBuilder,
  transform::own_domain_from_site_url,
};
use serde::{Deserialize, Serialize};

use crate::{
  cli::{Cli, Commands},
  error::QuireError,
};

/// File names searched, in order, when no config file is given.
const CONFIG_FILENAMES: [&str; 4] = [
  "quire.toml",
  "quire.json",
  ".config/quire.toml",
  ".config/quire.json",
];

fn default_output_dir() -> PathBuf {
  PathBuf::from("dist")
}

const fn default_true() -> bool {
  true
}

/// Configuration options for quire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Input directory containing markdown files
  #[serde(default)]
  pub input_dir: Option<PathBuf>,

  /// Output directory for generated HTML
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Public URL of the site
  #[serde(default)]
  pub site_url: Option<String>,

  /// Host treated as internal, overriding the host of `site_url`
  #[serde(default)]
  pub own_domain: Option<String>,

  /// Number of threads to use for parallel processing
  #[serde(default)]
  pub jobs: Option<usize>,

  /// Whether to enable GitHub Flavored Markdown extensions
  #[serde(default = "default_true")]
  pub gfm: bool,

  /// Whether links to other sites open in a new tab
  #[serde(default = "default_true")]
  pub external_links: bool,

  /// Whether credit comments turn images into captioned figures
  #[serde(default = "default_true")]
  pub image_credits: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_dir:      None,
      output_dir:     default_output_dir(),
      site_url:       None,
      own_domain:     None,
      jobs:           None,
      gfm:            true,
      external_links: true,
      image_credits:  true,
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format
  /// is unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QuireError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      QuireError::Config(format!(
        "Failed to read config file: {}: {e}",
        path.display()
      ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => {
        match ext.to_lowercase().as_str() {
          "json" => {
            serde_json::from_str(&content).map_err(|e| {
              QuireError::Config(format!(
                "Failed to parse JSON config from {}: {e}",
                path.display()
              ))
            })
          },
          "toml" => {
            toml::from_str(&content).map_err(|e| {
              QuireError::Config(format!(
                "Failed to parse TOML config from {}: {e}",
                path.display()
              ))
            })
          },
          _ => {
            Err(QuireError::Config(format!(
              "Unsupported config file format: {}",
              path.display()
            )))
          },
        }
      },
      None => {
        Err(QuireError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load config from file and CLI arguments.
  ///
  /// An explicit `--config-file` wins over a discovered one; without either
  /// the defaults are used. CLI flags are merged last.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file cannot be loaded or the configured
  /// input directory does not exist.
  pub fn load(cli: &Cli) -> Result<Self, QuireError> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path)?
    } else if let Some(discovered) = Self::find_config_file() {
      info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);

    if let Some(ref input_dir) = config.input_dir {
      if !input_dir.is_dir() {
        return Err(QuireError::Config(format!(
          "Input directory does not exist: {}",
          input_dir.display()
        )));
      }
    }

    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Commands::Build {
      input_dir,
      output_dir,
      own_domain,
      site_url,
      jobs,
    } = &cli.command
    {
      if let Some(input_dir) = input_dir {
        self.input_dir = Some(input_dir.clone());
      }

      if let Some(output_dir) = output_dir {
        self.output_dir.clone_from(output_dir);
      }

      if let Some(own_domain) = own_domain {
        self.own_domain = Some(own_domain.clone());
      }

      if let Some(site_url) = site_url {
        self.site_url = Some(site_url.clone());
      }

      self.jobs = jobs.or(self.jobs);
    }
  }

  /// Search for config files in the current directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  /// Search for config files below `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// The host that links are compared against: `own_domain` when set,
  /// otherwise the host of `site_url`.
  #[must_use]
  pub fn effective_own_domain(&self) -> Option<String> {
    self.own_domain.clone().or_else(|| {
      self
        .site_url
        .as_deref()
        .and_then(own_domain_from_site_url)
    })
  }

  /// Markdown options for the processor.
  #[must_use]
  pub fn markdown_options(&self) -> MarkdownOptions {
    MarkdownOptionsBuilder::new()
      .gfm(self.gfm)
      .own_domain(self.effective_own_domain())
      .external_links(self.external_links)
      .image_credits(self.image_credits)
      .build()
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unknown or the file cannot be written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), QuireError> {
    let config_content = templates::get_template(format)
      .map_err(|e| QuireError::Config(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      QuireError::Config(format!(
        "Failed to write default config to {}: {e}",
        path.display()
      ))
    })?;

    info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
mod tests {
  use clap::Parser;

  use super::*;

  #[test]
  fn test_from_file_toml_and_json() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let toml_path = dir.path().join("quire.toml");
    let json_path = dir.path().join("quire.json");
    fs::write(
      &toml_path,
      "output_dir = \"public\"\nsite_url = \"https://example.com/\"\n",
    )
    .expect("Failed to write config");
    fs::write(&json_path, r#"{ "image_credits": false, "jobs": 2 }"#)
      .expect("Failed to write config");

    let from_toml = Config::from_file(&toml_path).expect("TOML config");
    assert_eq!(from_toml.output_dir, PathBuf::from("public"));
    assert!(from_toml.external_links);

    let from_json = Config::from_file(&json_path).expect("JSON config");
    assert!(!from_json.image_credits);
    assert_eq!(from_json.jobs, Some(2));
    assert_eq!(from_json.output_dir, PathBuf::from("dist"));
  }

  #[test]
  fn test_from_file_rejects_unknown_extension() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("quire.yaml");
    fs::write(&path, "gfm: true").expect("Failed to write config");

    let err = Config::from_file(&path).expect_err("yaml is not supported");
    assert!(err.to_string().contains("Unsupported config file format"));
  }

  #[test]
  fn test_from_file_parse_errors_name_the_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let toml_path = dir.path().join("quire.toml");
    let json_path = dir.path().join("quire.json");
    fs::write(&toml_path, "gfm = \"yes\"\n").expect("Failed to write config");
    fs::write(&json_path, "{ \"jobs\": ").expect("Failed to write config");

    let err = Config::from_file(&toml_path).expect_err("gfm is a bool");
    let QuireError::Config(message) = &err else {
      panic!("expected a config error, got {err:?}");
    };
    assert!(message.starts_with("Failed to parse TOML config from"));
    assert!(message.contains(&toml_path.display().to_string()));

    let err = Config::from_file(&json_path).expect_err("truncated JSON");
    let QuireError::Config(message) = &err else {
      panic!("expected a config error, got {err:?}");
    };
    assert!(message.starts_with("Failed to parse JSON config from"));
    assert!(message.contains(&json_path.display().to_string()));
  }

  #[test]
  fn test_cli_overrides_file_values() {
    let mut config = Config {
      output_dir: PathBuf::from("public"),
      own_domain: Some("old.example".to_string()),
      jobs: Some(2),
      ..Default::default()
    };
    let cli = Cli::parse_from([
      "quire",
      "build",
      "-o",
      "out",
      "--own-domain",
      "example.com",
    ]);

    config.merge_with_cli(&cli);

    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert_eq!(config.own_domain.as_deref(), Some("example.com"));
    assert_eq!(config.jobs, Some(2));
  }

  #[test]
  fn test_effective_own_domain() {
    let mut config = Config {
      site_url: Some("https://blog.example.com/posts/".to_string()),
      ..Default::default()
    };
    assert_eq!(
      config.effective_own_domain().as_deref(),
      Some("blog.example.com")
    );

    config.own_domain = Some("example.com".to_string());
    assert_eq!(config.effective_own_domain().as_deref(), Some("example.com"));

    assert_eq!(Config::default().effective_own_domain(), None);
  }

  #[test]
  fn test_markdown_options_follow_config() {
    let config = Config {
      own_domain: Some("example.com".to_string()),
      external_links: false,
      ..Default::default()
    };
    let options = config.markdown_options();

    assert!(options.gfm);
    assert!(!options.external_links);
    assert!(options.image_credits);
    assert_eq!(options.own_domain(), "example.com");
  }

  #[test]
  fn test_find_config_file_in_order() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    assert_eq!(Config::find_config_file_in(dir.path()), None);

    fs::create_dir_all(dir.path().join(".config"))
      .expect("Failed to create dir");
    fs::write(dir.path().join(".config/quire.toml"), "")
      .expect("Failed to write config");
    assert_eq!(
      Config::find_config_file_in(dir.path()),
      Some(dir.path().join(".config/quire.toml"))
    );

    fs::write(dir.path().join("quire.json"), "{}")
      .expect("Failed to write config");
    assert_eq!(
      Config::find_config_file_in(dir.path()),
      Some(dir.path().join("quire.json"))
    );
  }
}
