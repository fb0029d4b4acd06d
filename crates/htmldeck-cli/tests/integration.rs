//! Integration tests for the htmldeck CLI
//!
//! These drive the command functions against documents on disk and open
//! the produced containers with `zip`.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use htmldeck_cli::{
    convert_command, inspect_command, load_config, ConfigOverrides, OutputFormat,
};
use image::{Rgb, RgbImage};
use tempfile::TempDir;
use zip::ZipArchive;

const DOCUMENT: &str = r##"<!DOCTYPE html>
<html><body><div class="reveal"><div class="slides">
  <section>
    <h1>Diabetes Prediction: A Comparative Analysis</h1>
    <p>LDA versus QDA on clinical data</p>
  </section>
  <section>
    <h2>Our Mission</h2>
    <img src="images/mission.png">
    <p>Find the model that catches the most diabetic patients.</p>
  </section>
  <section>
    <h2>The Critical Blind Spot</h2>
    <div class="card"><h1>44%</h1><p>Missed cases</p><p>Diabetic patients classified healthy</p></div>
  </section>
  <section>
    <h2>Appendix</h2>
    <img src="images/gone.png">
  </section>
</div></div></body></html>
"##;

fn setup() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("images")).unwrap();
    RgbImage::from_pixel(640, 480, Rgb([200, 30, 30]))
        .save(dir.path().join("images").join("mission.png"))
        .unwrap();
    let input = dir.path().join("talk.html");
    fs::write(&input, DOCUMENT).unwrap();
    (dir, input)
}

fn entry_names(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn test_convert_writes_next_to_input() {
    let (dir, input) = setup();
    let config = load_config(&input, None, &ConfigOverrides::default()).unwrap();
    let report = convert_command(&input, None, config).unwrap();

    let output = dir.path().join("talk.pptx");
    assert!(output.is_file());
    assert_eq!(report.output.as_deref(), Some(output.as_path()));
    assert_eq!(report.slide_count, 4);
    assert_eq!(report.images_placed, 1);
    assert_eq!(report.warning_count(), 1);

    let names = entry_names(&output);
    for slide in 1..=4 {
        assert!(names.contains(&format!("ppt/slides/slide{}.xml", slide)));
    }
    assert!(names.contains(&"ppt/media/image1.png".to_string()));
    assert!(!names.iter().any(|n| n == "ppt/slides/slide5.xml"));

    let alert = read_entry(&output, "ppt/slides/slide3.xml");
    assert!(alert.contains("44%"));
    assert!(alert.to_lowercase().contains("fef2f2"));
}

#[test]
fn test_convert_metadata_overrides() {
    let (dir, input) = setup();
    let overrides = ConfigOverrides {
        title: Some("Final Presentation".to_string()),
        author: Some("Group 7".to_string()),
        ..ConfigOverrides::default()
    };
    let config = load_config(&input, None, &overrides).unwrap();
    let output = dir.path().join("out").join("deck.pptx");
    convert_command(&input, Some(&output), config).unwrap();

    let core = read_entry(&output, "docProps/core.xml");
    assert!(core.contains("Final Presentation"));
    assert!(core.contains("Group 7"));
}

#[test]
fn test_convert_missing_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.html");
    let err = convert_command(&input, None, Default::default()).unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
    assert!(!dir.path().join("absent.pptx").exists());
}

#[test]
fn test_config_file_asset_root() {
    let (dir, input) = setup();
    fs::rename(dir.path().join("images"), dir.path().join("art")).unwrap();
    let config_path = dir.path().join("htmldeck.toml");
    fs::write(
        &config_path,
        format!("[assets]\nroot = {:?}\n", dir.path().join("art").display().to_string()),
    )
    .unwrap();

    let config = load_config(&input, Some(&config_path), &ConfigOverrides::default()).unwrap();
    let report = convert_command(&input, None, config).unwrap();
    assert_eq!(report.images_placed, 1);
}

#[test]
fn test_inspect_text() {
    let (_dir, input) = setup();
    let config = load_config(&input, None, &ConfigOverrides::default()).unwrap();
    let text = inspect_command(&input, OutputFormat::Text, config).unwrap();

    assert!(text.contains("Slide 1 [title-slide] Diabetes Prediction: A Comparative Analysis"));
    assert!(text.contains("Slide 2 [mission] Our Mission"));
    assert!(text.contains("Slide 3 [alert-cards] The Critical Blind Spot"));
    assert!(text.contains("Slide 4 [generic] Appendix"));
    assert!(text.contains("warning[ASSET001]: slide 4: Image not found: images/gone.png"));
    assert!(text.contains("mission.png"));
    assert!(text.ends_with("4 slide(s), 1 warning(s)"));
}

#[test]
fn test_inspect_json_matches_convert() {
    let (dir, input) = setup();
    let config = load_config(&input, None, &ConfigOverrides::default()).unwrap();
    let json = inspect_command(&input, OutputFormat::Json, config.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let report = convert_command(&input, Some(&dir.path().join("x.pptx")), config).unwrap();
    let slides = value["slides"].as_array().unwrap();
    assert_eq!(slides.len(), report.slides.len());
    for (inspected, record) in slides.iter().zip(&report.slides) {
        assert_eq!(inspected["template"], record.template.as_str());
        assert_eq!(inspected["index"], record.index);
        assert_eq!(
            inspected["positioned"].as_array().unwrap().len(),
            record.elements
        );
    }
    assert_eq!(slides[2]["background"], "#fef2f2");
    assert_eq!(value["diagnostics"][0]["code"], "ASSET001");
}

#[test]
fn test_inspect_is_deterministic() {
    let (_dir, input) = setup();
    let config = load_config(&input, None, &ConfigOverrides::default()).unwrap();
    let first = inspect_command(&input, OutputFormat::Json, config.clone()).unwrap();
    let second = inspect_command(&input, OutputFormat::Json, config).unwrap();
    assert_eq!(first, second);
}
