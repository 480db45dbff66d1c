use regatta_cli::export::{CSV_HEADER, to_csv, to_json};
use regatta_cli::template::submission_template;
use regatta_cli::{CliError, Config, JsonStore, ResultStore, find_event};
use scoring::ResultLedger;
use scoring::dto::ResultSubmission;
use scoring::models::{Event, PenaltyCode};
use std::path::Path;
use tempfile::TempDir;

const EVENTS: &str = r#"[
  {
    "id": "spring",
    "name": "Spring Series",
    "races": [
      {
        "id": "r1",
        "name": "Race 1",
        "handicap_type": "Open",
        "handicap_system": "Portsmouth",
        "classes": [
          { "id": "laser", "name": "Laser", "rating": 1100 },
          { "id": "topper", "name": "Topper", "rating": 1365 }
        ]
      },
      { "id": "r2", "name": "Race 2", "handicap_type": "OneDesign" }
    ]
  }
]"#;

fn setup() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("events.json"), EVENTS).unwrap();
    let config = Config::new(dir.path(), Path::new("events.json"), Path::new("results.json"));
    let store = JsonStore::new(&config);
    (dir, store)
}

fn submission(sailor: &str, class: &str, time: Option<&str>) -> ResultSubmission {
    ResultSubmission {
        race_id: "r1".to_string(),
        class_id: class.to_string(),
        sailor_name: sailor.to_string(),
        sail_number: "GBR 1".to_string(),
        finish_time: time.map(str::to_string),
        status: None,
        handicap_number: Some(1100.into()),
    }
}

async fn spring(store: &JsonStore) -> Event {
    let events = store.load_events().await.unwrap().data;
    find_event(&events, "spring").unwrap().clone()
}

#[tokio::test]
async fn test_missing_results_file_loads_empty() {
    let (_dir, store) = setup();
    let snapshot = store.load_results().await.unwrap();
    assert!(snapshot.data.is_empty());
}

#[tokio::test]
async fn test_bare_event_array_is_accepted() {
    let (_dir, store) = setup();
    let events = store.load_events().await.unwrap();
    assert_eq!(events.data.len(), 1);
    assert_eq!(events.data[0].races.len(), 2);
    assert!(events.data[0].races[1].is_one_design());
}

#[tokio::test]
async fn test_save_then_reload_round_trips_results() {
    let (dir, store) = setup();
    let event = spring(&store).await;

    let snapshot = store.load_results().await.unwrap();
    let mut ledger = ResultLedger::new(snapshot.data);
    ledger.submit(&event, submission("Ann", "Laser", Some("01:00:00")), "tester").unwrap();
    ledger.submit(&event, submission("Ben", "Laser", Some("00:58:00")), "tester").unwrap();
    let saved = store.save_results(snapshot.last_updated, ledger.into_results()).await.unwrap();

    let reloaded = store.load_results().await.unwrap();
    assert_eq!(reloaded.last_updated, saved.last_updated);
    assert_eq!(reloaded.data.len(), 2);
    let ben = reloaded.data.iter().find(|r| r.sailor_name == "Ben").unwrap();
    assert_eq!(ben.position, 1);
    assert_eq!(ben.points, 1);

    let raw = std::fs::read_to_string(dir.path().join("results.json")).unwrap();
    assert!(raw.contains("last_updated"));
    assert!(!dir.path().join("results.json.tmp").exists());
}

#[tokio::test]
async fn test_stale_save_is_rejected() {
    let (_dir, store) = setup();
    let event = spring(&store).await;

    let first = store.load_results().await.unwrap();
    let second = store.load_results().await.unwrap();

    let mut ledger = ResultLedger::new(first.data);
    ledger.submit(&event, submission("Ann", "Laser", Some("01:00:00")), "a").unwrap();
    store.save_results(first.last_updated, ledger.into_results()).await.unwrap();

    let mut ledger = ResultLedger::new(second.data);
    ledger.submit(&event, submission("Ben", "Laser", Some("01:00:00")), "b").unwrap();
    let outcome = store.save_results(second.last_updated, ledger.into_results()).await;
    assert!(matches!(outcome, Err(CliError::ConcurrentModification { .. })));

    let current = store.load_results().await.unwrap();
    assert_eq!(current.data.len(), 1);
    assert_eq!(current.data[0].sailor_name, "Ann");
}

#[tokio::test]
async fn test_unknown_event_is_reported() {
    let (_dir, store) = setup();
    let events = store.load_events().await.unwrap().data;
    assert!(matches!(find_event(&events, "autumn"), Err(CliError::EventNotFound(_))));
}

#[tokio::test]
async fn test_csv_export_orders_by_position_and_quotes() {
    let (_dir, store) = setup();
    let event = spring(&store).await;

    let mut ledger = ResultLedger::default();
    let ann = submission("Ann", "Laser", Some("01:00:00"));
    ledger.submit(&event, ann, "Lee, Race Office").unwrap();
    let mut ben = submission("Ben", "Laser", Some("00:55:00"));
    ben.sail_number = "GBR \"7\"".to_string();
    ledger.submit(&event, ben, "o").unwrap();
    let mut dns = submission("Cat", "Laser", None);
    dns.status = Some(PenaltyCode::Dns);
    ledger.submit(&event, dns, "o").unwrap();

    let csv = to_csv(&event, ledger.results());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("1,Ben,\"GBR \"\"7\"\"\",1100,00:55:00,00:50:00,,1,o,"));
    assert!(lines[2].starts_with("2,Ann,GBR 1,1100,01:00:00,00:54:33,,2,\"Lee, Race Office\","));
    assert!(lines[3].starts_with("3,Cat,GBR 1,1100,-,-,DNS,4,o,"));

    let exported = to_json(&event, ledger.results()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(3));
    assert_eq!(json[0]["sailor_name"], "Ben");
}

#[tokio::test]
async fn test_template_round_trips_through_bulk_submit() {
    let (_dir, store) = setup();
    let event = spring(&store).await;

    let samples = submission_template(&event, None).unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0].class_id, "Laser");
    assert_eq!(samples[0].handicap_number, Some(1100.into()));
    assert_eq!(samples[1].status, Some(PenaltyCode::Dns));
    assert_eq!(samples[2].handicap_number, None);

    let mut ledger = ResultLedger::default();
    let report = ledger.submit_bulk(&event, None, samples, "o");
    assert!(report.is_clean(), "{:?}", report.errors);
    assert_eq!(report.accepted.len(), 4);

    let single = submission_template(&event, Some("r1")).unwrap();
    assert_eq!(single.len(), 2);
    assert!(single.iter().all(|s| s.race_id.is_empty()));
    assert!(submission_template(&event, Some("r9")).is_err());
}
