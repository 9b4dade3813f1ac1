//! CLI entry point for odrl-eval.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `odrl-eval-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use odrl_eval_app::{
    ExplainOutput, RunInput, exit_code, list_cases, parse_report_json, render_markdown,
    run_cases, run_explain, write_case_outputs, write_text,
};
use odrl_eval_settings::Overrides;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "odrl-eval",
    version,
    about = "Evaluate ODRL usage-policy rules against preset test cases"
)]
struct Cli {
    /// Path to the case file TOML. Policy paths inside it are relative to its directory.
    #[arg(long, global = true, default_value = "odrl-eval.toml")]
    cases: Utf8PathBuf,

    /// Override oracle profile (blank|permissive|restrictive).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the evaluation round of every case (1|2).
    #[arg(long, global = true)]
    round: Option<String>,

    /// Log every decision to stderr (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the cases and write per-case reports and logs.
    Run {
        /// Only run cases whose name matches this glob (repeatable).
        #[arg(id = "case", long = "case", value_name = "GLOB")]
        cases: Vec<String>,

        /// Directory for `<case>.report.json` and `CASE_<case>_log.txt`.
        #[arg(long, default_value = "artifacts/odrl-eval")]
        out_dir: Utf8PathBuf,

        /// Write a Markdown summary alongside the reports.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown summary (if enabled).
        #[arg(long, default_value = "artifacts/odrl-eval/summary.md")]
        markdown_out: Utf8PathBuf,
    },

    /// List the resolved cases without evaluating them.
    List,

    /// Render a Markdown summary from existing case reports.
    Md {
        /// Path to a case report JSON file (repeatable).
        #[arg(long = "report", required = true)]
        reports: Vec<Utf8PathBuf>,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a verdict label (e.g. "Not-Allowed") or abort code (e.g. "missing_action").
    Explain { identifier: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Run {
            ref cases,
            ref out_dir,
            write_markdown,
            ref markdown_out,
        } => cmd_run(&cli, cases.clone(), out_dir, write_markdown, markdown_out),
        Commands::List => cmd_list(&cli),
        Commands::Md {
            ref reports,
            ref output,
        } => cmd_md(reports, output.as_deref()),
        Commands::Explain { ref identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        round: cli.round.clone(),
    }
}

fn read_cases(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read case file: {path}"))
}

fn cmd_run(
    cli: &Cli,
    select: Vec<String>,
    out_dir: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cases_text = read_cases(&cli.cases)?;
        let base_dir = match cli.cases.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };

        let output = run_cases(RunInput {
            base_dir: &base_dir,
            config_text: &cases_text,
            overrides: overrides(cli),
            select,
        })?;

        write_case_outputs(out_dir, &output.reports).context("write case outputs")?;

        if write_markdown {
            let md = render_markdown(Some(&output.profile), &output.reports);
            write_text(markdown_out, &md).context("write markdown")?;
        }

        let mut mismatched = 0;
        for report in &output.reports {
            let verdict = report.verdict.label();
            match &report.expectation {
                Some(e) if e.matched => println!("ok        {}: {verdict}", report.case),
                Some(e) => {
                    mismatched += 1;
                    println!(
                        "MISMATCH  {}: {verdict} (expected {})",
                        report.case, e.expected
                    );
                }
                None => println!("-         {}: {verdict}", report.case),
            }
        }
        println!(
            "{} cases, {} mismatched",
            output.reports.len(),
            mismatched
        );

        Ok(exit_code(&output.reports))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("odrl-eval error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_list(cli: &Cli) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<()> {
        let cases_text = read_cases(&cli.cases)?;
        for case in list_cases(&cases_text, overrides(cli))? {
            println!("{}", case.line());
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("odrl-eval error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_md(report_paths: &[Utf8PathBuf], output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let mut reports = Vec::with_capacity(report_paths.len());
    for path in report_paths {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
        let report = parse_report_json(&text).with_context(|| format!("parse report: {path}"))?;
        reports.push(report);
    }
    reports.sort_by(|a, b| a.case.cmp(&b.case));

    let md = render_markdown(None, &reports);
    if let Some(out_path) = output {
        write_text(out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", odrl_eval_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_labels,
            available_abort_codes,
        } => {
            eprint!(
                "{}",
                odrl_eval_app::format_not_found(
                    &identifier,
                    available_labels,
                    available_abort_codes
                )
            );
            std::process::exit(1);
        }
    }
}
