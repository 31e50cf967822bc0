//! CLI module for the attest runner
//!
//! ## Flags
//!
//! - `-v/--verbose` - List passing assertions and their notes
//! - `-s/--strict` - Fail the run when a test records no assertion
//! - `-k/--filter <EXPR>` - Run only tests whose name (or group) contains EXPR
//! - `--format console|json` - Output format
//! - `--no-color` - Plain console output
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! [`execute`] returns `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level [`run`] function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io::{self, Write};
use std::panic;
use std::process;
use std::thread;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, info};

use crate::config::{OutputFormat, RunConfig};
use crate::report::{ConsoleReporter, JsonReporter, Status, TestReporter, TestSummary};
use crate::suite::{TestDiscovery, run_tree};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one assertion failed (or, in strict mode, a test recorded none).
    pub const FAILURE: ExitCode = ExitCode(1);
    /// At least one test stopped early, or the run itself could not proceed.
    pub const ERROR: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create an error for a run that could not proceed (exit code 2).
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::ERROR)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(error: io::Error) -> Self {
        Self::error(format!("Error writing report: {error}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the bundled assertion suite and report results as a tree
#[derive(Parser, Debug)]
#[command(name = "attest")]
#[command(version = VERSION)]
#[command(about = "Run assertion-based tests and report results as a tree", long_about = None)]
pub struct Cli {
    /// List passing assertions and their notes
    #[arg(short, long)]
    pub verbose: bool,

    /// Fail the run when a test completes without recording an assertion
    #[arg(short, long)]
    pub strict: bool,

    /// Run only tests whose name, or an enclosing group's name, contains EXPR
    #[arg(short = 'k', long, value_name = "EXPR")]
    pub filter: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Disable ANSI colors in console output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn to_config(&self) -> RunConfig {
        RunConfig::new()
            .with_verbose(self.verbose)
            .with_strict(self.strict)
            .with_color(!self.no_color)
            .with_filter(self.filter.clone().unwrap_or_default())
            .with_format(self.format)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. [`execute`] returns `CliResult` and errors are
/// handled here.
pub async fn run<D: TestDiscovery + ?Sized>(discovery: &D) {
    let cli = Cli::parse();
    let config = cli.to_config();
    quiet_test_panics();

    let mut stdout = io::stdout();
    match execute(&config, discovery, &mut stdout).await {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Discover, run and report every test.
///
/// ## Parameters
/// - `config`: flags controlling filtering, strictness and output
/// - `discovery`: source of the test tree
/// - `out`: where the report is written
///
/// ## Returns
/// - `ExitCode::ERROR` if any test stopped early, `ExitCode::FAILURE` if any assertion failed (or a test
///   recorded none under `strict`), `ExitCode::SUCCESS` otherwise.
/// - `Err(CliError)` if discovery fails or the report cannot be written.
#[tracing::instrument(skip_all, fields(filter = ?config.filter, strict = config.strict))]
pub async fn execute<D: TestDiscovery + ?Sized>(
    config: &RunConfig,
    discovery: &D,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let tree = discovery
        .discover()
        .map_err(|e| CliError::error(format!("Error: {e}")))?;
    let tree = match &config.filter {
        Some(keyword) => tree.filter(keyword),
        None => tree,
    };

    let test_count = tree.test_count();
    if test_count == 0 {
        writeln!(out, "No tests collected")?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut reporter: Box<dyn TestReporter + '_> = match config.format {
        OutputFormat::Console => Box::new(ConsoleReporter::new(&mut *out, config.verbose, config.color)),
        OutputFormat::Json => Box::new(JsonReporter::new(&mut *out)),
    };
    reporter.on_run_start(test_count)?;

    let started = Instant::now();
    let results = run_tree(&tree).await;
    let summary = TestSummary::from_tree(&results, started.elapsed());
    info!(
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored,
        warned = summary.warned,
        "run complete"
    );

    reporter.on_run_complete(&results, &summary)?;
    Ok(exit_code(results.status(), &summary, config.strict))
}

fn exit_code(status: Status, summary: &TestSummary, strict: bool) -> ExitCode {
    match status {
        Status::Error => ExitCode::ERROR,
        Status::Fail => ExitCode::FAILURE,
        _ if !summary.is_success(strict) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

/// Panics inside test bodies are reported as stopped tests; log them instead of printing raw backtraces.
/// Panics on the main thread keep the default behavior.
fn quiet_test_panics() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if thread::current().name() == Some("main") {
            previous(info);
        } else {
            debug!(panic = %info, "panic inside test task");
        }
    }));
}

// ============================================================================
// Tests
// ============================================================================
