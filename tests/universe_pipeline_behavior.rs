//! Behavior-driven tests for the universe pipeline.
//!
//! These tests verify HOW the pipeline behaves end to end: which records
//! survive discovery, fetch, filter, and rank, and what lands on disk.

use std::fs;
use std::sync::Arc;

use capsift_core::{
    collect_daily_bars, CsvSink, DailyBar, DiscoveryError, IsoDate, SourceError, UniverseBuilder,
    UniverseError,
};
use capsift_tests::{sample_record, ScriptedSource};

fn mixed_population() -> Arc<ScriptedSource> {
    let source = Arc::new(ScriptedSource::new());
    source.push_page(&["AAA", "BBB", "CCC"], Some("cursor-1"));
    source.push_page(&["DDD", "EEE", "FFF"], None);

    // Admitted: AAA (NYSE) and BBB (NASDAQ).
    source.insert_record(sample_record("AAA", Some(500.0), "XNYS", "CS"));
    source.insert_record(sample_record("BBB", Some(900.0), "XNAS", "CS"));
    // Dropped: no market cap reported.
    source.insert_record(sample_record("CCC", None, "XNAS", "CS"));
    // Dropped: per-symbol fetch fault.
    source.insert_details_failure("DDD", SourceError::status(500));
    // Dropped: off-exchange and wrong security type.
    source.insert_record(sample_record("EEE", Some(700.0), "OTCM", "CS"));
    source.insert_record(sample_record("FFF", Some(800.0), "XNAS", "ETF"));

    source
}

// =============================================================================
// Membership and ranking
// =============================================================================

#[tokio::test]
async fn when_provider_returns_mixed_population_only_admitted_records_survive() {
    // Given: six discovered symbols with mixed metadata quality
    let source = mixed_population();

    // When: the universe is built
    let universe = UniverseBuilder::new(source)
        .build()
        .await
        .expect("build should succeed");

    // Then: only NYSE/NASDAQ common stock with a valid cap remains, ranked
    let order = universe
        .records()
        .iter()
        .map(|record| record.symbol.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["BBB", "AAA"]);

    let stats = universe.stats();
    assert_eq!(stats.discovered, 6);
    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.missing_market_cap, 1);
    assert_eq!(stats.rejected_exchange, 1);
    assert_eq!(stats.rejected_security_type, 1);
    assert_eq!(stats.admitted, 2);
}

#[tokio::test]
async fn when_market_caps_tie_rank_falls_back_to_symbol_order() {
    // Given: three records with identical market caps
    let source = Arc::new(ScriptedSource::new());
    source.push_page(&["ZZZ", "AAA", "MMM"], None);
    source.insert_record(sample_record("ZZZ", Some(500.0), "XNAS", "CS"));
    source.insert_record(sample_record("AAA", Some(500.0), "XNYS", "CS"));
    source.insert_record(sample_record("MMM", Some(500.0), "XNAS", "CS"));

    // When: the universe is built
    let universe = UniverseBuilder::new(source)
        .build()
        .await
        .expect("build should succeed");

    // Then: ties break by symbol ascending
    let order = universe
        .records()
        .iter()
        .map(|record| record.symbol.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["AAA", "MMM", "ZZZ"]);
}

#[tokio::test]
async fn universe_membership_is_a_subset_of_discovery() {
    // Given: a mixed population
    let source = mixed_population();

    // When: the universe is built
    let universe = UniverseBuilder::new(source)
        .build()
        .await
        .expect("build should succeed");

    // Then: every output symbol was discovered
    let discovered = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"];
    for record in universe.records() {
        assert!(discovered.contains(&record.symbol.as_str()));
    }
}

// =============================================================================
// Failure isolation and fatal faults
// =============================================================================

#[tokio::test]
async fn when_one_symbol_fails_to_fetch_the_rest_of_the_population_survives() {
    // Given: one scripted fetch fault among healthy symbols
    let source = Arc::new(ScriptedSource::new());
    source.push_page(&["AAA", "BAD", "BBB"], None);
    source.insert_record(sample_record("AAA", Some(100.0), "XNYS", "CS"));
    source.insert_details_failure("BAD", SourceError::transport("connection reset"));
    source.insert_record(sample_record("BBB", Some(200.0), "XNAS", "CS"));

    // When: the universe is built
    let universe = UniverseBuilder::new(source)
        .build()
        .await
        .expect("build should succeed");

    // Then: the fault moved a counter, not the build result
    assert_eq!(universe.len(), 2);
    assert_eq!(universe.stats().fetch_failures, 1);
}

#[tokio::test]
async fn when_discovery_fails_mid_listing_no_artifact_is_written() {
    // Given: a listing that faults on the second page
    let source = Arc::new(ScriptedSource::new());
    source.push_page(&["AAA"], Some("cursor-1"));
    source.push_page_failure(SourceError::status(503));

    let dir = tempfile::tempdir().expect("tempdir should create");
    let path = dir.path().join("universe.csv");

    // When: the build fails
    let err = UniverseBuilder::new(source)
        .build()
        .await
        .expect_err("build must fail");

    // Then: the error is a discovery fault and nothing reached the sink
    assert!(matches!(
        err,
        UniverseError::Discovery(DiscoveryError::Page { page: 1, .. })
    ));
    assert!(!path.exists());
}

#[tokio::test]
async fn when_discovery_yields_zero_symbols_build_reports_empty_universe() {
    // Given: a provider with an empty listing
    let source = Arc::new(ScriptedSource::new());
    source.push_page(&[], None);

    // When: the build runs
    let err = UniverseBuilder::new(source)
        .build()
        .await
        .expect_err("build must fail");

    // Then: the failure is the distinct empty-universe case
    assert!(matches!(err, UniverseError::EmptyUniverse));
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn when_every_record_is_rejected_artifact_is_header_only() {
    // Given: discovery succeeds but nothing passes the filter
    let source = Arc::new(ScriptedSource::new());
    source.push_page(&["AAA"], None);
    source.insert_record(sample_record("AAA", Some(1.0), "OTCM", "CS"));

    let dir = tempfile::tempdir().expect("tempdir should create");
    let path = dir.path().join("universe.csv");

    // When: the empty-but-valid universe is written
    let universe = UniverseBuilder::new(source)
        .build()
        .await
        .expect("build should succeed");
    CsvSink::new(&path)
        .write_universe(&universe)
        .expect("write should succeed");

    // Then: the artifact exists and holds only the header
    let contents = fs::read_to_string(&path).expect("artifact should read");
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.starts_with("symbol,active,security_type,market_cap,"));
}

#[tokio::test]
async fn when_metadata_omits_market_cap_the_record_never_reaches_the_artifact() {
    // Given: a mixed population including a capless record
    let source = mixed_population();
    let dir = tempfile::tempdir().expect("tempdir should create");
    let path = dir.path().join("universe.csv");

    // When: the universe is built and written
    let universe = UniverseBuilder::new(source)
        .build()
        .await
        .expect("build should succeed");
    CsvSink::new(&path)
        .write_universe(&universe)
        .expect("write should succeed");

    // Then: the capless symbol is absent from the artifact
    let contents = fs::read_to_string(&path).expect("artifact should read");
    assert!(!contents.contains("CCC"));
}

#[tokio::test]
async fn repeated_builds_over_identical_data_produce_byte_identical_artifacts() {
    // Given: two runs over the same scripted provider data
    let dir = tempfile::tempdir().expect("tempdir should create");
    let first_path = dir.path().join("first.csv");
    let second_path = dir.path().join("second.csv");

    // When: each run builds and persists a universe
    for path in [&first_path, &second_path] {
        let universe = UniverseBuilder::new(mixed_population())
            .build()
            .await
            .expect("build should succeed");
        CsvSink::new(path)
            .write_universe(&universe)
            .expect("write should succeed");
    }

    // Then: the artifacts are byte identical
    let first = fs::read(&first_path).expect("artifact should read");
    let second = fs::read(&second_path).expect("artifact should read");
    assert_eq!(first, second);
}

#[tokio::test]
async fn when_fetch_runs_concurrently_artifact_matches_the_sequential_run() {
    // Given: identical scripted data for both runs
    let dir = tempfile::tempdir().expect("tempdir should create");
    let sequential_path = dir.path().join("sequential.csv");
    let concurrent_path = dir.path().join("concurrent.csv");

    // When: one run is sequential and one uses a bounded worker pool
    let sequential = UniverseBuilder::new(mixed_population())
        .build()
        .await
        .expect("build should succeed");
    CsvSink::new(&sequential_path)
        .write_universe(&sequential)
        .expect("write should succeed");

    let concurrent = UniverseBuilder::new(mixed_population())
        .with_fetch_concurrency(4)
        .build()
        .await
        .expect("build should succeed");
    CsvSink::new(&concurrent_path)
        .write_universe(&concurrent)
        .expect("write should succeed");

    // Then: concurrency changes nothing about the output
    let sequential_bytes = fs::read(&sequential_path).expect("artifact should read");
    let concurrent_bytes = fs::read(&concurrent_path).expect("artifact should read");
    assert_eq!(sequential_bytes, concurrent_bytes);
}

// =============================================================================
// Daily bars
// =============================================================================

#[tokio::test]
async fn when_daily_bars_are_collected_artifact_groups_rows_per_symbol() {
    // Given: scripted daily series for two symbols, one unscripted
    let source = ScriptedSource::new();
    source.insert_bars(
        "AAPL",
        vec![
            DailyBar {
                date: IsoDate::parse("2024-01-02").expect("must parse"),
                open: 184.5,
                high: 186.0,
                low: 183.9,
                close: 185.0,
                volume: Some(50_000_000.0),
            },
            DailyBar {
                date: IsoDate::parse("2024-01-03").expect("must parse"),
                open: 185.0,
                high: 185.5,
                low: 183.0,
                close: 184.2,
                volume: Some(48_200_000.0),
            },
        ],
    );
    source.insert_bars(
        "MSFT",
        vec![DailyBar {
            date: IsoDate::parse("2024-01-02").expect("must parse"),
            open: 370.0,
            high: 372.5,
            low: 369.1,
            close: 370.9,
            volume: Some(20_000_000.0),
        }],
    );

    let symbols = ["AAPL", "GONE", "MSFT"]
        .iter()
        .map(|raw| capsift_core::Symbol::parse(raw).expect("symbol should parse"))
        .collect::<Vec<_>>();
    let from = IsoDate::parse("2024-01-01").expect("must parse");
    let to = IsoDate::parse("2024-01-31").expect("must parse");

    // When: bars are collected and written
    let series = collect_daily_bars(&source, &symbols, from, to)
        .await
        .expect("collection should succeed");

    let dir = tempfile::tempdir().expect("tempdir should create");
    let path = dir.path().join("bars.csv");
    CsvSink::new(&path)
        .write_daily_bars(&series)
        .expect("write should succeed");

    // Then: the failed symbol is skipped and rows stay grouped per symbol
    let contents = fs::read_to_string(&path).expect("artifact should read");
    let lines = contents.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "ticker,date,open,high,low,close,volume");
    assert!(lines[1].starts_with("AAPL,2024-01-02,"));
    assert!(lines[2].starts_with("AAPL,2024-01-03,"));
    assert!(lines[3].starts_with("MSFT,2024-01-02,"));
    assert_eq!(lines.len(), 4);
    assert!(!contents.contains("GONE"));
}
