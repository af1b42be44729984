use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sidediff_host::{
    CompareError, ComparisonSession, DocumentProvider, FileProvider, HostConfig, HttpProvider,
    StyledSides, render_report,
};

/// Compare two HTML pages and render them side by side with differences highlighted
#[derive(Parser)]
#[command(name = "sidediff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Left document (URL, or path with --files)
    left: String,

    /// Right document (URL, or path with --files)
    right: String,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fetch through this proxy endpoint (target passed as its `url` parameter)
    #[arg(long, env = "SIDEDIFF_PROXY")]
    proxy: Option<String>,

    /// Per-document load timeout in milliseconds
    #[arg(long, env = "SIDEDIFF_TIMEOUT_MS", default_value_t = 10_000)]
    timeout_ms: u64,

    /// Treat both targets as local file paths
    #[arg(long)]
    files: bool,

    /// Highlight marks in both views, not only the right one
    #[arg(long)]
    style_both: bool,

    /// Do not mirror scrolling between the two views
    #[arg(long)]
    no_scroll_sync: bool,

    /// Print the comparison summary as JSON on stdout
    #[arg(long)]
    summary_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> HostConfig {
        HostConfig {
            load_timeout: Duration::from_millis(self.timeout_ms),
            proxy_endpoint: self.proxy.clone(),
            scroll_mirroring: !self.no_scroll_sync,
            styled_sides: if self.style_both {
                StyledSides::Both
            } else {
                StyledSides::Right
            },
            ..HostConfig::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SIDEDIFF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e, &mut std::io::stderr().lock()),
    }
}

/// One line for the user; the structured error only goes to the debug log.
fn report_failure(e: &CompareError, out: &mut impl Write) -> ExitCode {
    debug!(stage = %e.stage(), error = ?e, "comparison failed");
    let _ = writeln!(out, "sidediff: {} failed: {e}", e.stage());
    ExitCode::from(1)
}

fn run(cli: &Cli) -> Result<(), CompareError> {
    let config = cli.config();
    if cli.files {
        compare_with(FileProvider::default(), cli, &config)
    } else {
        compare_with(HttpProvider::new(&config)?, cli, &config)
    }
}

fn compare_with<P: DocumentProvider + Sync>(
    provider: P,
    cli: &Cli,
    config: &HostConfig,
) -> Result<(), CompareError> {
    let session = ComparisonSession::new(provider);
    let comparison = session.run(&cli.left, &cli.right)?;
    debug!(summary = ?comparison.summary, "done");

    if cli.summary_json {
        println!("{}", comparison.summary.to_json()?);
    }

    let report = render_report(&comparison, config);
    match &cli.output {
        Some(path) => std::fs::write(path, report).map_err(|e| CompareError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
        None if cli.summary_json => Ok(()),
        None => std::io::stdout()
            .lock()
            .write_all(report.as_bytes())
            .map_err(|e| CompareError::Write {
                path: "<stdout>".to_owned(),
                reason: e.to_string(),
            }),
    }
}
