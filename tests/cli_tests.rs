//! Command-line plumbing tests
//!
//! Exercises the same path as the `ferro-norm` binary: a reference document
//! loaded from disk, a configuration file merged with flags, and batch
//! normalization of JSON variant lines.

use ferro_norm::cli::{normalize_lines, BatchSummary, OutputFormat};
use ferro_norm::config::{CliOverrides, FileConfig};
use ferro_norm::reference::ReferenceData;
use ferro_norm::{MockProvider, Normalizer, ShuffleDirection};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

const REFERENCE: &str = r#"{
  "sequences": {
    "NC_000099.1": "GATTACAAAAAGGCCTT",
    "NM_000099.1": "CCCCGGGGAAAATTTTCCCC"
  },
  "transcripts": [
    {
      "accession": "NM_000099.1",
      "alignments": [
        {
          "alt_ac": "NC_000099.1",
          "cds_start_i": 4,
          "cds_end_i": 16,
          "exons": [
            { "ord": 0, "tx_start_i": 0, "tx_end_i": 10 },
            { "ord": 1, "tx_start_i": 10, "tx_end_i": 20 }
          ]
        }
      ]
    }
  ]
}"#;

fn write_reference(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("reference.json");
    fs::write(&path, REFERENCE).unwrap();
    path
}

fn genomic_del(pos: i64) -> String {
    format!(
        r#"{{"accession":"NC_000099.1","type":"g","location":{{"start":{{"base":{pos}}},"end":{{"base":{pos}}}}},"edit":{{"type":"deletion"}}}}"#
    )
}

fn run(normalizer: &Normalizer<MockProvider>, input: &str, format: OutputFormat) -> (BatchSummary, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = normalize_lines(normalizer, Cursor::new(input), &mut out, &mut err, format).unwrap();
    (
        summary,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_reference_loaded_from_file() {
    let dir = TempDir::new().unwrap();
    let provider = MockProvider::from_json(&write_reference(&dir)).unwrap();
    assert!(provider.has_sequence("NC_000099.1"));
    assert_eq!(provider.sequence_len("NM_000099.1"), Some(20));
}

#[test]
fn test_missing_reference_file() {
    let dir = TempDir::new().unwrap();
    assert!(MockProvider::from_json(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_batch_text_output() {
    let dir = TempDir::new().unwrap();
    let provider = MockProvider::from_json(&write_reference(&dir)).unwrap();
    let normalizer = Normalizer::new(provider);

    // g.8_11 is AAAA; g.1 is G
    let input = format!("{}\n{}\n", genomic_del(8), genomic_del(1));
    let (summary, out, err) = run(&normalizer, &input, OutputFormat::Text);

    assert_eq!(summary.total, 2);
    assert_eq!(summary.failed, 0);
    assert!(err.is_empty());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "NC_000099.1:g.8del -> NC_000099.1:g.11delA",
            "NC_000099.1:g.1del -> NC_000099.1:g.1delG",
        ]
    );
}

#[test]
fn test_config_file_and_flags() {
    let dir = TempDir::new().unwrap();
    let provider = MockProvider::from_json(&write_reference(&dir)).unwrap();
    let config_path = dir.path().join("norm.toml");
    fs::write(&config_path, "[normalize]\ndirection = \"5prime\"\nfill = false\n").unwrap();

    let file_config = FileConfig::load(Some(config_path.as_path())).unwrap();
    let config = file_config.merge_with_cli(&CliOverrides::default());
    assert_eq!(config.shuffle_direction, ShuffleDirection::FivePrime);

    let normalizer = Normalizer::with_config(provider, config);
    let (summary, out, _) = run(&normalizer, &genomic_del(10), OutputFormat::Text);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(out, "NC_000099.1:g.10del -> NC_000099.1:g.7del\n");
}

#[test]
fn test_transcript_boundary_in_loaded_reference() {
    let dir = TempDir::new().unwrap();
    let provider = MockProvider::from_json(&write_reference(&dir)).unwrap();
    let file_config = FileConfig::default();
    let normalizer = Normalizer::with_config(
        provider,
        file_config.merge_with_cli(&CliOverrides {
            direction: Some(ShuffleDirection::FivePrime),
            ..CliOverrides::default()
        }),
    );

    // n.9_12 is AAAA across the exon edge at n.10/n.11
    let line = r#"{"accession":"NM_000099.1","type":"n","location":{"start":{"base":12},"end":{"base":12}},"edit":{"type":"deletion"}}"#;
    let (summary, out, err) = run(&normalizer, line, OutputFormat::Json);
    assert_eq!(summary.succeeded, 1, "{}", err);
    let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(value["output"], "NM_000099.1:n.11delA");
    assert_eq!(value["status"], "ok");
}

#[test]
fn test_batch_json_errors() {
    let dir = TempDir::new().unwrap();
    let provider = MockProvider::from_json(&write_reference(&dir)).unwrap();
    let normalizer = Normalizer::new(provider);

    let mismatched = r#"{"accession":"NC_000099.1","type":"g","location":{"start":{"base":1},"end":{"base":1}},"edit":{"type":"deletion","reference":"C"}}"#;
    let input = format!("{}\n# skipped\n{}\n", mismatched, genomic_del(99));
    let (summary, out, err) = run(&normalizer, &input, OutputFormat::Json);

    assert_eq!(
        summary,
        BatchSummary {
            total: 2,
            succeeded: 0,
            failed: 2
        }
    );
    assert!(out.is_empty());
    let records: Vec<serde_json::Value> = err
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["code"], "E3001");
    assert_eq!(records[0]["line"], 1);
    // past the end of the 17 bp contig
    assert_eq!(records[1]["code"], "E3003");
    assert_eq!(records[1]["line"], 3);
}
