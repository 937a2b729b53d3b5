// tests/cycle_e2e.rs
use std::fs;
use std::path::Path;

use dex_scrape::catalog::{CatalogBuilder, SpeciesCatalog, SpeciesEntry};
use dex_scrape::config::options::AppOptions;
use dex_scrape::engine::{ParticipantKey, RandomSource, Tier};
use dex_scrape::error::{CatalogError, CycleError};
use dex_scrape::progress::Progress;
use dex_scrape::record::ParticipantRecord;
use dex_scrape::runner::{self, run_cycle};
use dex_scrape::specs::roster::{RosterInput, RosterSource};
use dex_scrape::store::{FileStore, Store};

/// Hands out draws from a fixed list, then zeros.
struct Draws(Vec<usize>);

impl RandomSource for Draws {
    fn pick_index(&mut self, len: usize) -> usize {
        let v = if self.0.is_empty() { 0 } else { self.0.remove(0) };
        v % len
    }
}

#[derive(Default)]
struct Recorder {
    begun: Option<usize>,
    done: Vec<(String, u32)>,
    lines: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.begun = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn item_done(&mut self, name: &str, score: u32) { self.done.push((name.to_string(), score)); }
    fn finish(&mut self) { self.finished = true; }
}

fn catalog() -> SpeciesCatalog {
    let mut b = CatalogBuilder::new();
    for (id, name) in [(1, "Bulbasaur"), (2, "Ivysaur"), (3, "Venusaur"),
                       (4, "Charmander"), (5, "Charmeleon"), (6, "Charizard")] {
        b.add_species(SpeciesEntry::new(id, name, false, false));
    }
    b.add_species(SpeciesEntry::new(150, "Mewtwo", true, false))
        .add_species(SpeciesEntry::new(151, "Mew", false, true))
        .add_resolved(vec![1, 2, 3])
        .add_resolved(vec![4, 5, 6]);
    b.build().unwrap()
}

fn roster_page(rows: &[(&str, u32)]) -> String {
    let mut html = String::from(
        "<html><body><table>\n<tr><th>Name</th><th></th><th></th><th>Puzzles</th><th></th><th>PLW</th><th>USCF</th><th>Group</th></tr>\n",
    );
    for (name, score) in rows {
        html.push_str(&format!(
            "<tr><td>{name}</td><td>-</td><td>-</td><td>12</td><td>-</td><td>{score}</td><td>1500</td><td>Blue</td></tr>\n"
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn roster_rows(dir: &Path, rows: &[(&str, u32)]) -> Vec<Vec<String>> {
    let page = dir.join("roster.html");
    fs::write(&page, roster_page(rows)).unwrap();
    RosterInput::File(page).rows().unwrap()
}

fn file_store(dir: &Path) -> FileStore {
    FileStore::new(dir.join(".store/assignments.json"), dir.join("out/participants.json"))
}

fn written_records(store: &FileStore) -> Vec<ParticipantRecord> {
    serde_json::from_str(&fs::read_to_string(store.records_path()).unwrap()).unwrap()
}

fn by_name<'a>(records: &'a [ParticipantRecord], name: &str) -> &'a ParticipantRecord {
    records.iter().find(|r| r.name == name).unwrap()
}

#[test]
fn species_evolves_with_score_across_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let cat = catalog();
    let store = file_store(dir.path());

    // Ada: chain 0, elite 1. Bo is below the floor and draws nothing. Cy: chain 1, elite 1.
    let rows = roster_rows(dir.path(), &[("Ada", 30), ("Bo", 0), ("Cy", 110)]);
    let summary = run_cycle(&cat, &rows, &store, Draws(vec![0, 1, 1, 1]), None).unwrap();
    assert_eq!(summary.rows_seen, 3);
    assert_eq!(summary.records_written, 2);
    assert_eq!(summary.tracked, 2);
    assert!(summary.reset.is_none());
    assert_eq!(summary.fingerprint, cat.fingerprint());

    let out = written_records(&store);
    let ada = by_name(&out, "Ada");
    assert_eq!((ada.species_id, ada.species_name.as_str(), ada.tier), (1, "Bulbasaur", Tier::Basic));
    assert_eq!(ada.puzzles, 12);
    assert_eq!(ada.group, "Blue");
    let cy = by_name(&out, "Cy");
    assert_eq!((cy.species_id, cy.tier), (151, Tier::Legendary));

    // Same participants never redraw, even with a different random source.
    let rows = roster_rows(dir.path(), &[("ADA ", 80), ("Bo", 25), ("Cy", 120)]);
    let summary = run_cycle(&cat, &rows, &store, Draws(vec![1, 0]), None).unwrap();
    assert_eq!(summary.records_written, 3);
    assert_eq!(summary.tracked, 3);

    let out = written_records(&store);
    assert_eq!(by_name(&out, "ADA").species_id, 3);
    assert_eq!(by_name(&out, "ADA").tier, Tier::Final);
    assert_eq!(by_name(&out, "Bo").species_id, 4);
    assert_eq!(by_name(&out, "Cy").species_id, 151);

    let state = store.load_assignments();
    let ada = state.get(&ParticipantKey::normalize("ada")).unwrap();
    assert_eq!((ada.chain_index, ada.elite_index, ada.last_score), (Some(0), Some(1), 80));
}

#[test]
fn reset_clears_store_and_keeps_last_output() {
    let dir = tempfile::tempdir().unwrap();
    let cat = catalog();
    let store = file_store(dir.path());

    let rows = roster_rows(dir.path(), &[("Ada", 60), ("Bo", 45)]);
    run_cycle(&cat, &rows, &store, Draws(vec![0, 0, 1, 1]), None).unwrap();
    let before = fs::read_to_string(store.records_path()).unwrap();

    let rows = roster_rows(dir.path(), &[("Ada", 0), ("Bo", 0)]);
    let mut progress = Recorder::default();
    let summary = run_cycle(&cat, &rows, &store, Draws(vec![]), Some(&mut progress)).unwrap();

    let ev = summary.reset.unwrap();
    assert_eq!(ev.key, ParticipantKey::normalize("ada"));
    assert_eq!(ev.previous, 60);
    assert_eq!(summary.records_written, 0);
    assert!(store.load_assignments().is_empty());
    assert_eq!(fs::read_to_string(store.records_path()).unwrap(), before);

    assert_eq!(progress.begun, Some(2));
    assert!(progress.done.is_empty());
    assert_eq!(progress.lines.len(), 1);
    assert!(progress.finished);
}

#[test]
fn reassigned_after_reset() {
    let dir = tempfile::tempdir().unwrap();
    let cat = catalog();
    let store = file_store(dir.path());

    let rows = roster_rows(dir.path(), &[("Ada", 30)]);
    run_cycle(&cat, &rows, &store, Draws(vec![0, 0]), None).unwrap();

    // Reset and a fresh score in the same snapshot: Ada is the evidence, Bo
    // keeps playing and is drawn anew.
    let rows = roster_rows(dir.path(), &[("Ada", 0), ("Bo", 30)]);
    let summary = run_cycle(&cat, &rows, &store, Draws(vec![1, 0]), None).unwrap();
    assert!(summary.reset.is_some());
    assert_eq!(summary.tracked, 1);

    let rows = roster_rows(dir.path(), &[("Ada", 30)]);
    run_cycle(&cat, &rows, &store, Draws(vec![1, 1]), None).unwrap();
    let out = written_records(&store);
    assert_eq!(by_name(&out, "Ada").species_id, 4);
}

#[test]
fn absent_participant_is_not_a_reset() {
    let dir = tempfile::tempdir().unwrap();
    let cat = catalog();
    let store = file_store(dir.path());

    let rows = roster_rows(dir.path(), &[("Ada", 60), ("Bo", 30)]);
    run_cycle(&cat, &rows, &store, Draws(vec![0, 0, 1, 0]), None).unwrap();

    let rows = roster_rows(dir.path(), &[("Bo", 35)]);
    let summary = run_cycle(&cat, &rows, &store, Draws(vec![]), None).unwrap();
    assert!(summary.reset.is_none());
    assert_eq!(summary.tracked, 2);
}

#[test]
fn full_run_from_options() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.json");
    fs::write(&dump, r#"{
        "species": [
            {"id": 1, "name": "Bulbasaur"}, {"id": 2, "name": "Ivysaur"}, {"id": 3, "name": "Venusaur"},
            {"id": 150, "name": "Mewtwo", "is_legendary": true}
        ],
        "chains": [
            {"species": {"name": "bulbasaur", "url": ""},
             "evolves_to": [{"species": {"name": "ivysaur", "url": ""},
                             "evolves_to": [{"species": {"name": "venusaur", "url": ""}}]}]}
        ]
    }"#).unwrap();
    let page = dir.path().join("roster.html");
    fs::write(&page, roster_page(&[("Ada", 55), ("Bo", 100), ("Cy", 3)])).unwrap();

    let mut opts = AppOptions::default();
    opts.roster = page.display().to_string();
    opts.catalog.dump_path = dump;
    opts.catalog.snapshot_path = dir.path().join(".store/catalog.json");
    opts.store.assignments_path = dir.path().join(".store/assignments.json");
    opts.store.records_path = dir.path().join("out/participants.json");
    opts.seed = Some(7);

    let summary = runner::run(&opts, None).unwrap();
    assert_eq!(summary.records_written, 2);
    assert!(opts.catalog.snapshot_path.exists());

    // Single path and single elite: every draw lands the same.
    let ada = by_name(&summary.records, "Ada");
    assert_eq!((ada.species_name.as_str(), ada.tier), ("Ivysaur", Tier::Evolved));
    let bo = by_name(&summary.records, "Bo");
    assert_eq!(bo.species_name, "Mewtwo");

    // Second run is served from the snapshot even with the dump gone.
    fs::remove_file(&opts.catalog.dump_path).unwrap();
    let again = runner::run(&opts, None).unwrap();
    assert_eq!(again.fingerprint, summary.fingerprint);
    assert_eq!(again.records, summary.records);
}

#[test]
fn unusable_catalog_leaves_outputs_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("dump.json");
    let no_elite = r#"{
        "species": [{"id": 1, "name": "Bulbasaur"}, {"id": 150, "name": "Mewtwo"}],
        "chains": [{"species": {"name": "bulbasaur", "url": ""}}]
    }"#;
    fs::write(&dump, no_elite).unwrap();
    let page = dir.path().join("roster.html");
    fs::write(&page, roster_page(&[("Ada", 55)])).unwrap();

    let mut opts = AppOptions::default();
    opts.roster = page.display().to_string();
    opts.catalog.dump_path = dump.clone();
    opts.catalog.snapshot_path = dir.path().join(".store/catalog.json");
    opts.store.assignments_path = dir.path().join(".store/assignments.json");
    opts.store.records_path = dir.path().join("out/participants.json");
    opts.seed = Some(3);

    let previous_state = r#"{"bo":{"chainIndex":0,"eliteIndex":0,"lastScore":40}}"#;
    let previous_out = "[]";
    fs::create_dir_all(dir.path().join(".store")).unwrap();
    fs::create_dir_all(dir.path().join("out")).unwrap();
    fs::write(&opts.store.assignments_path, previous_state).unwrap();
    fs::write(&opts.store.records_path, previous_out).unwrap();

    let err = runner::run(&opts, None).unwrap_err();
    assert!(matches!(
        err,
        CycleError::Catalog(CatalogError::EmptyCatalog { paths: 1, elite: 0 })
    ));
    assert_eq!(fs::read_to_string(&opts.store.assignments_path).unwrap(), previous_state);
    assert_eq!(fs::read_to_string(&opts.store.records_path).unwrap(), previous_out);
    assert!(!opts.catalog.snapshot_path.exists());

    // Fixing the dump is enough; no forced rebuild needed.
    fs::write(&dump, no_elite.replace(r#""name": "Mewtwo""#, r#""name": "Mewtwo", "is_legendary": true"#)).unwrap();
    let summary = runner::run(&opts, None).unwrap();
    assert_eq!(summary.records_written, 1);
    assert_eq!(by_name(&summary.records, "Ada").species_name, "Bulbasaur");
    assert!(opts.catalog.snapshot_path.exists());
    assert_eq!(written_records(&file_store_at(&opts)).len(), 1);
}

fn file_store_at(opts: &AppOptions) -> FileStore {
    FileStore::from_options(&opts.store)
}
