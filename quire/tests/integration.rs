#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use quire::{
  build::build_site,
  config::{Config, templates},
};
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &str) {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("Failed to create dir in test");
  }
  fs::write(path, content).expect("Failed to write file in test");
}

#[test]
fn test_build_renders_figures_and_external_links() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input_dir = temp_dir.path().join("content");
  let output_dir = temp_dir.path().join("dist");

  write(
    &input_dir.join("index.md"),
    "# Home\n\nRead [the docs](https://docs.rs) or [about me](/about).\n",
  );
  write(
    &input_dir.join("posts/harbour.md"),
    "# Harbour\n\n![Boats](boats.jpg)\n<!-- credit: Jane Doe -->\n\nSee \
     [more](https://example.com/gallery).\n",
  );
  write(&input_dir.join("posts/notes.txt"), "not markdown");

  let config = Config {
    input_dir: Some(input_dir),
    output_dir: output_dir.clone(),
    site_url: Some("https://example.com/".to_string()),
    jobs: Some(2),
    ..Default::default()
  };

  let written = build_site(&config).expect("Build failed in test");
  assert_eq!(written, [
    output_dir.join("index.html"),
    output_dir.join("posts/harbour.html")
  ]);
  assert!(!output_dir.join("posts/notes.html").exists());

  let index =
    fs::read_to_string(output_dir.join("index.html")).expect("index.html");
  assert!(index.contains(
    "<a href=\"https://docs.rs\" target=\"_blank\" rel=\"noopener \
     noreferrer\">the docs</a>"
  ));
  assert!(index.contains("<a href=\"/about\">about me</a>"));

  let post = fs::read_to_string(output_dir.join("posts/harbour.html"))
    .expect("harbour.html");
  assert!(post.contains(
    "<figure class=\"image-with-credit\">\n<img src=\"boats.jpg\" \
     alt=\"Boats\" /><figcaption class=\"image-credit\">Jane \
     Doe</figcaption>\n</figure>"
  ));
  assert!(post.contains("<a href=\"https://example.com/gallery\">more</a>"));
  assert!(!post.contains("credit:"));
}

#[test]
fn test_build_with_passes_disabled() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input_dir = temp_dir.path().join("content");
  let output_dir = temp_dir.path().join("dist");
  write(
    &input_dir.join("post.md"),
    "![a](a.png)\n<!-- credit: Jane -->\n\n[x](https://x.org)\n",
  );

  let config = Config {
    input_dir: Some(input_dir),
    output_dir: output_dir.clone(),
    external_links: false,
    image_credits: false,
    ..Default::default()
  };
  build_site(&config).expect("Build failed in test");

  let html =
    fs::read_to_string(output_dir.join("post.html")).expect("post.html");
  assert!(!html.contains("<figure"));
  assert!(!html.contains("target="));
  assert!(html.contains("<!-- credit: Jane -->"));
}

#[test]
fn test_default_config_round_trip() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");

  for format in ["toml", "json"] {
    let path = temp_dir.path().join(format!("quire.{format}"));
    Config::generate_default_config(format, &path)
      .expect("Failed to generate config in test");

    let config = Config::from_file(&path).expect("Failed to load config");
    assert_eq!(config.output_dir, std::path::PathBuf::from("dist"));
    assert_eq!(
      config.input_dir.as_deref(),
      Some(std::path::Path::new("content"))
    );
    assert!(config.gfm && config.external_links && config.image_credits);
  }

  assert!(templates::get_template("yaml").is_err());
}

#[test]
fn test_invalid_config_is_reported() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let path = temp_dir.path().join("quire.toml");
  write(&path, "gfm = \"sometimes\"\n");

  let err = Config::from_file(&path).expect_err("config should not parse");
  assert!(err.to_string().contains("Failed to parse TOML config"));
}
