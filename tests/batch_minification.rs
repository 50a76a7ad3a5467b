use std::fs;

use svg_minifier::{BatchOptimizer, Config, OptimizerChoice};
use tempfile::TempDir;

const ICON: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- exported -->
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
  <metadata>editor data</metadata>
  <style>
    /* theme * dark */
    .icon-fill { fill : #222 ; }
  </style>
  <path class="icon-fill" d="M 2.0000 2.5000 L 22.12345 22 Z"/>
</svg>
"#;

fn optimizer(config: Config) -> BatchOptimizer {
    BatchOptimizer::with_choice(config, OptimizerChoice::BuiltIn)
}

#[tokio::test]
async fn test_batch_counts_successes_and_failures() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("icons");
    let output = temp_dir.path().join("dist");
    fs::create_dir(&input).unwrap();

    for name in ["home.svg", "menu.svg", "close.svg"] {
        fs::write(input.join(name), ICON).unwrap();
    }
    fs::write(input.join("broken.svg"), [0x3c, 0x73, 0x76, 0x67, 0x20, 0xc3, 0x28]).unwrap();
    fs::write(input.join("readme.txt"), "not an svg").unwrap();

    let batch = optimizer(Config {
        output_path: Some(output.clone()),
        ..Config::default()
    })
    .run(&input)
    .await
    .unwrap();

    assert_eq!(batch.stats.succeeded, 3);
    assert_eq!(batch.stats.failed, 1);
    assert_eq!(batch.reports.len(), 4);

    let broken = batch.reports.iter().find(|r| r.file_name() == "broken.svg").unwrap();
    assert!(!broken.success);
    assert_eq!(broken.original_size, 0);

    for name in ["home.svg", "menu.svg", "close.svg"] {
        let minified = fs::read_to_string(output.join(name)).unwrap();
        assert!(minified.len() < ICON.len());
        assert!(minified.contains(".icon-fill{fill:#222}"));
        assert!(minified.contains(r#"d="M2 2.5L22.123 22Z""#));
        assert!(!minified.contains("metadata"));
    }
    assert!(!output.join("broken.svg").exists());
    assert!(!output.join("readme.txt").exists());

    let expected_original = 3 * ICON.len() as u64;
    assert_eq!(batch.stats.total_original_size, expected_original);
}

#[tokio::test]
async fn test_obfuscated_batch_is_single_line() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("icons");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("home.svg"), ICON).unwrap();

    let batch = optimizer(Config {
        rename_identifiers: true,
        make_unreadable: true,
        ..Config::default()
    })
    .run(&input)
    .await
    .unwrap();
    assert_eq!(batch.stats.succeeded, 1);

    let minified = fs::read_to_string(temp_dir.path().join("icons_minified").join("home.svg")).unwrap();
    assert!(!minified.contains('\n'));
    assert!(minified.contains(".a{fill:#222}"));
    assert!(minified.contains(r#"<path class="a""#));
}

#[tokio::test]
async fn test_dry_run_leaves_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("icons");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("home.svg"), ICON).unwrap();

    let batch = optimizer(Config {
        dry_run: true,
        ..Config::default()
    })
    .run(&input)
    .await
    .unwrap();

    assert_eq!(batch.stats.succeeded, 1);
    assert!(batch.stats.bytes_saved() > 0);
    assert!(!temp_dir.path().join("icons_minified").exists());
}
