//! Integration tests for grouping, concurrent execution, status roll-up and reporting

use std::time::Duration;

use attest::cli::{ExitCode, execute};
use attest::prelude::*;
use attest::report::{ConsoleReporter, ResultTree, Status, TestReporter, TestSummary};
use attest::{OutputFormat, RunConfig, run_tree};

fn passing(name: &str) -> Test {
    Test::new(name, |e| {
        e.expect(1 + 1).named("1 + 1 = 2").to_be(2);
        Ok(())
    })
}

fn failing(name: &str) -> Test {
    Test::new(name, |e| {
        e.expect(2 + 2).named("2 + 2 = 5").to_be(5);
        Ok(())
    })
}

fn stopping(name: &str) -> Test {
    Test::new(name, |e| {
        e.expect(1).to_be(1);
        Err(Thrown::new(ErrorKind::RangeError, "negative number").into())
    })
}

fn mixed_suite() -> SuiteBuilder {
    SuiteBuilder::new()
        .register("arithmetic", vec![passing("Addition"), failing("Addition"), passing("Subtraction")])
        .register("deep/nested/file", vec![stopping("Broken")])
        .register("empty", vec![Test::new("Nothing", |_| Ok(()))])
}

// =============================================================================
// Aggregation
// =============================================================================

#[tokio::test]
async fn error_anywhere_wins_at_the_root() {
    let tree = mixed_suite().discover().unwrap();
    let results = run_tree(&tree).await;

    assert_eq!(results.status(), Status::Error);
    assert_eq!(results.get("/arithmetic").map(ResultTree::status), Some(Status::Fail));
    assert_eq!(results.get("/empty").map(ResultTree::status), Some(Status::Pass));
    assert_eq!(results.get("/empty").map(ResultTree::display_status), Some(Status::Pass));

    let broken = results
        .get("/deep")
        .and_then(|t| t.get("/nested"))
        .and_then(|t| t.get("/file"))
        .and_then(|t| t.get("Broken"))
        .unwrap();
    let ResultTree::Error(error) = broken else {
        panic!("expected a stopped test, got {broken:?}");
    };
    assert_eq!(error.assertion_index(), 1);
    assert_eq!(error.message(), "RangeError: negative number");
}

#[tokio::test]
async fn duplicate_test_names_keep_every_result() {
    let tree = mixed_suite().discover().unwrap();
    let results = run_tree(&tree).await;
    let arithmetic = results.get("/arithmetic").unwrap();

    assert_eq!(arithmetic.get("Addition").map(ResultTree::status), Some(Status::Pass));
    assert_eq!(arithmetic.get("Addition (2)").map(ResultTree::status), Some(Status::Fail));
    assert_eq!(arithmetic.get("Subtraction").map(ResultTree::status), Some(Status::Pass));
}

#[tokio::test]
async fn summary_counts_tests() {
    let tree = mixed_suite().discover().unwrap();
    let results = run_tree(&tree).await;
    let summary = TestSummary::from_tree(&results, Duration::ZERO);

    assert_eq!(summary.total, 5);
    assert_eq!((summary.passed, summary.failed, summary.errored, summary.warned), (2, 1, 1, 1));
    assert_eq!(summary.assertions, 3);
}

#[tokio::test]
async fn bundled_suite_runs_clean() {
    let config = RunConfig::new().with_strict(true).with_color(false);
    let mut out: Vec<u8> = Vec::new();
    let code = execute(&config, &attest::selfcheck::suite(), &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(code, ExitCode::SUCCESS, "{output}");
    assert!(!output.contains("Failed"), "{output}");
}

#[tokio::test]
async fn exit_codes_follow_the_worst_status() {
    let mut sink: Vec<u8> = Vec::new();
    let config = RunConfig::new().with_format(OutputFormat::Json);

    let only_failures = SuiteBuilder::new().register("f", vec![failing("x")]);
    assert_eq!(execute(&config, &only_failures, &mut sink).await.unwrap(), ExitCode::FAILURE);
    assert_eq!(execute(&config, &mixed_suite(), &mut sink).await.unwrap(), ExitCode::ERROR);
    let filtered = config.clone().with_filter("Subtraction");
    assert_eq!(execute(&filtered, &mixed_suite(), &mut sink).await.unwrap(), ExitCode::SUCCESS);
}

// =============================================================================
// Reporting
// =============================================================================

#[tokio::test]
async fn console_report_of_a_mixed_run() {
    let tree = mixed_suite().discover().unwrap();
    let results = run_tree(&tree).await;
    let summary = TestSummary::from_tree(&results, Duration::from_millis(1234));

    let mut reporter = ConsoleReporter::new(Vec::new(), true, false);
    reporter.on_run_start(tree.test_count()).unwrap();
    reporter.on_run_complete(&results, &summary).unwrap();
    let output = String::from_utf8(reporter.into_inner()).unwrap();

    insta::assert_snapshot!(output, @r"
    collected 5 tests

    /arithmetic
        Addition
            1. (1 + 1 = 2) ✅ Passed
        Addition (2)
            1. (2 + 2 = 5) ❌ Failed: expected value to be 5, but was actually 4
        Subtraction
            1. (1 + 1 = 2) ✅ Passed
    /deep
        /nested
            /file
                Broken
                    ⛔ Stopped after 1 assertion (RangeError: negative number)
    /empty
        Nothing
            ⚠️ No assertions were made

    ====== 2 passed, 1 failed, 1 stopped, 1 without assertions in 1.23s ======
    ");
}
