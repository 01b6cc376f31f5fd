//! CLI contract tests for `termgraph`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const DOC: &str = "Graph centrality ranks keywords. A keyword graph links nearby words, \
    and centrality in the keyword graph rewards words with many neighbours. \
    Ranking keywords by graph centrality needs no training corpus.";

fn termgraph() -> Command {
    Command::cargo_bin("termgraph").expect("binary built")
}

fn write_doc(dir: &tempfile::TempDir, name: &str, text: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, text).expect("write doc");
    path.to_str().unwrap().to_string()
}

#[test]
fn rank_prints_table() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = write_doc(&tmp, "doc.txt", DOC);

    termgraph()
        .args(["rank", &doc, "--language", "en", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tokens:"))
        .stdout(predicate::str::contains("graph"));
}

#[test]
fn rank_reads_stdin_and_emits_json() {
    let output = termgraph()
        .args(["rank", "-", "--language", "en", "--json"])
        .write_stdin(DOC)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).expect("json");
    let rows = rows.as_array().expect("array");
    assert!(!rows.is_empty());
    assert_eq!(rows[0]["rank"], 1);
    let total: f64 = rows.iter().map(|r| r["score"].as_f64().unwrap()).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[test]
fn graph_view_highlights_search_terms() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = write_doc(&tmp, "doc.txt", DOC);

    let output = termgraph()
        .args([
            "graph", &doc, "--language", "en", "--top-k", "4", "--search", "GRAPH",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let view: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(view["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(view["highlighted"][0], "graph");
}

#[test]
fn clamp_applies_to_graph_top_k() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = write_doc(&tmp, "doc.txt", DOC);

    termgraph()
        .args(["graph", &doc, "--language", "en", "--top-k", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("top_k"));

    let output = termgraph()
        .args(["graph", &doc, "--language", "en", "--clamp", "--top-k", "0"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let view: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(view["nodes"].as_array().unwrap().len(), 1);
}

#[test]
fn invalid_window_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = write_doc(&tmp, "doc.txt", DOC);

    termgraph()
        .args(["rank", &doc, "--window", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("window_size"));

    termgraph()
        .args(["rank", &doc, "--window", "9", "--clamp", "--language", "en"])
        .assert()
        .success();
}

#[test]
fn config_file_is_applied() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = write_doc(&tmp, "doc.txt", DOC);
    let config = write_doc(&tmp, "config.json", r#"{ "language": "en", "window_size": 7 }"#);

    termgraph()
        .args(["rank", &doc, "--config", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("window_size"));

    termgraph()
        .args(["rank", &doc, "--config", &config, "--window", "3"])
        .assert()
        .success();
}

#[test]
fn short_document_fails_with_insufficient_content() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let doc = write_doc(&tmp, "short.txt", "graph ranking");

    termgraph()
        .args(["rank", &doc])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient content"));
}

#[test]
fn batch_skips_degenerate_documents() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let good = write_doc(&tmp, "good.txt", DOC);
    let empty = write_doc(&tmp, "empty.txt", "");

    termgraph()
        .args(["batch", &good, &empty, "--language", "en", "--top", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("good.txt"))
        .stderr(predicate::str::contains("skipping"));
}
