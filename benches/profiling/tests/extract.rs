use std::fs;

use common::{loader::load, record::Grouping};
use profiling::{Extractor, result::FailedEntry};
use tempfile::tempdir;

const LOG: &str = r#"{
  "name": "query_client_state",
  "src_chain": "ibc-0",
  "elapsed": 700
}
{
  "name": "query_client_state",
  "src_chain": "ibc-1",
  "elapsed": 900
}
{
  "name": "build_update_client",
  "src_chain": "ibc-0",
  "elapsed": 40,
  "dst_chain": "ibc-1"
}
{
  "name": "broken",
  "elapsed":
}
"#;

#[test]
fn writes_chartable_statistics() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("profiling.log");
    fs::write(&input, LOG).unwrap();
    let output_dir = tmp.path().join("outputs");

    let written = Extractor {
        output_dir: output_dir.clone(),
        name_prefix: "run".to_owned(),
        progress: false,
    }
    .run(&input)
    .unwrap();

    assert_eq!(written.len(), 4);
    assert!(written.iter().all(|p| p.exists()));

    let failed = fs::read_to_string(output_dir.join("run_failed_entries.jsonl"))
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str::<FailedEntry>(line).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].line, 3);

    let mut docs = load(&output_dir)
        .unwrap()
        .collect::<eyre::Result<Vec<_>>>()
        .unwrap();
    docs.sort_by(|a, b| a.filename.cmp(&b.filename));
    let filenames = docs.iter().map(|d| d.filename.as_str()).collect::<Vec<_>>();
    assert_eq!(
        filenames,
        vec![
            "run_parsed_statistics.json",
            "run_per_chain_statistics.json",
            "run_statistics.json",
        ]
    );

    let per_chain = &docs[1].document;
    assert_eq!(per_chain.grouping(), Grouping::Grouped);
    assert_eq!(per_chain.records().len(), 3);
    assert_eq!(per_chain.chains(), vec!["ibc-0", "ibc-1"]);

    let totals = &docs[2].document;
    assert_eq!(totals.grouping(), Grouping::Ungrouped);
    let query = totals
        .records()
        .iter()
        .find(|r| r.name == "query_client_state")
        .unwrap();
    assert_eq!(query.count, Some(2.0));
    assert_eq!(query.mean, Some(800.0));
    assert_eq!(query.total, Some(1.6));
    assert!(query.five_number_summary().is_ok());
}

#[test]
fn missing_input_is_an_error() {
    let tmp = tempdir().unwrap();
    let result = Extractor {
        output_dir: tmp.path().join("outputs"),
        name_prefix: "run".to_owned(),
        progress: false,
    }
    .run(&tmp.path().join("absent.log"));
    assert!(result.is_err());
    assert!(!tmp.path().join("outputs").exists());
}
