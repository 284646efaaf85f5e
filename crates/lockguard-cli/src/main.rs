//! CLI entry point for lockguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `lockguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use lockguard_app::{
    CheckInput, ExplainOutput, ManifestSource, exit_code, parse_report_json, render_annotations,
    render_markdown, render_text, run_check, run_explain, runtime_error_report, serialize_report,
    to_renderable,
};
use lockguard_settings::Overrides;
use lockguard_types::LockguardReport;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lockguard",
    version,
    about = "Supply-chain audit for npm lockfiles"
)]
struct Cli {
    /// Path to lockguard config TOML (default: lockguard.toml in the project directory, if present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (repeat for more detail: -v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Md,
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Project directory to search for a lockfile.
    #[arg(long, default_value = ".")]
    dir: Utf8PathBuf,

    /// Lockfile to audit (skips discovery).
    #[arg(long)]
    lockfile: Option<Utf8PathBuf>,

    /// Manifest for sync checks (default: package.json beside the lockfile).
    #[arg(long, conflicts_with = "no_manifest")]
    manifest: Option<Utf8PathBuf>,

    /// Skip manifest sync checks.
    #[arg(long)]
    no_manifest: bool,

    /// Trust an additional registry URL prefix (repeatable).
    #[arg(long = "allowed-registry", value_name = "URL")]
    allowed_registries: Vec<String>,

    /// Permit git:// and git+ssh:// sources.
    #[arg(long)]
    allow_git: bool,

    /// Permit direct github.com sources.
    #[arg(long)]
    allow_github: bool,

    /// Escalate warnings to errors.
    #[arg(long)]
    strict: bool,

    /// Override profile (default|strict|permissive).
    #[arg(long)]
    profile: Option<String>,

    /// Exit with status 2 when the audit does not pass.
    #[arg(long)]
    ci: bool,

    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the JSON report to this path.
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,

    /// Disable colored text output (also honored: the NO_COLOR environment variable).
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit a lockfile and print the results.
    Check(CheckArgs),

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a rule or code with remediation guidance.
    Explain {
        /// The rule (e.g., "https-only") or code (e.g., "insecure_http") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.cmd {
        Commands::Check(args) => cmd_check(cli.config.as_deref(), args),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(config: Option<&Utf8Path>, args: &CheckArgs) -> anyhow::Result<()> {
    let lockfile_hint = args
        .lockfile
        .clone()
        .unwrap_or_else(|| args.dir.join(lockguard_repo::LOCKFILE_NAMES[0]));

    let result = (|| -> anyhow::Result<i32> {
        let lockfile = match &args.lockfile {
            Some(path) => path.clone(),
            None => lockguard_repo::discover_lockfile(&args.dir).context("discover lockfile")?,
        };

        let config_text = read_config(config, &lockfile)?;

        let manifest = match (&args.manifest, args.no_manifest) {
            (_, true) => ManifestSource::Skip,
            (Some(path), false) => ManifestSource::Path(path),
            (None, false) => ManifestSource::Beside,
        };

        let overrides = Overrides {
            profile: args.profile.clone(),
            allowed_registries: args.allowed_registries.clone(),
            allow_git: args.allow_git,
            allow_github: args.allow_github,
            strict: args.strict,
        };

        let output = run_check(CheckInput {
            lockfile: &lockfile,
            manifest,
            config_text: &config_text,
            overrides,
        })?;
        tracing::debug!(profile = %output.resolved_config.profile, "resolved configuration");

        if let Some(path) = &args.report_out {
            write_report_file(path, &output.report).context("write report json")?;
        }
        print_report(&output.report, args.format, use_color(args.no_color))?;

        Ok(exit_code(output.report.summary.passed, args.ci))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(path) = &args.report_out {
                let report = runtime_error_report(lockfile_hint.as_str(), &format!("{err:#}"));
                let _ = write_report_file(path, &report);
            }
            eprintln!("lockguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// An explicit `--config` must exist; the implicit `lockguard.toml` beside the lockfile is
/// optional.
fn read_config(explicit: Option<&Utf8Path>, lockfile: &Utf8Path) -> anyhow::Result<String> {
    match explicit {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read config: {}", path))
        }
        None => {
            let path = lockguard_repo::config_beside(lockfile);
            if path.is_file() {
                tracing::debug!(path = %path, "using config file");
                std::fs::read_to_string(&path).with_context(|| format!("read config: {}", path))
            } else {
                Ok(String::new())
            }
        }
    }
}

fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn print_report(report: &LockguardReport, format: OutputFormat, color: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let data = serialize_report(report)?;
            let text = String::from_utf8(data).context("report is not UTF-8")?;
            println!("{}", text);
        }
        OutputFormat::Md => print!("{}", render_markdown(&to_renderable(report))),
        OutputFormat::Text => print!("{}", render_text(&to_renderable(report), color)),
    }
    Ok(())
}

fn write_report_file(path: &Utf8Path, report: &LockguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<LockguardReport> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found {
            identifier,
            kind,
            explanation,
        } => {
            print!(
                "{}",
                lockguard_app::format_explanation(&identifier, kind, &explanation)
            );
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                lockguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
