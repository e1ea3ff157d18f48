//! Thin command-line front end: reads the idea text, runs one analysis, and
//! renders the report.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use venture_core::{AnalysisBundle, TaskOutcome};
use venture_model::{GeminiClient, GeminiConfig};
use venture_runner::{AnalysisReport, Analyzer, AnalyzerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Analyze a business idea: market, competitive, and financial analysis plus
/// an executive summary.
#[derive(Parser, Debug)]
#[command(name = "venture", version, about)]
struct Args {
    /// Free-form description of the business idea. Reads stdin when omitted.
    idea: Vec<String>,

    /// Gemini model to use.
    #[arg(long, default_value = "gemini-2.0-flash")]
    model: String,

    /// Per-analysis-task timeout in seconds.
    #[arg(long, default_value_t = 90)]
    timeout_secs: u64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let user_text = read_idea(&args)?;

    let config = GeminiConfig::from_env()
        .map(|c| GeminiConfig { model: args.model.clone(), ..c })
        .context("Gemini configuration")?;
    let model = Arc::new(GeminiClient::new(config)?);
    let analyzer = Analyzer::new(model)
        .with_config(AnalyzerConfig { task_timeout: Duration::from_secs(args.timeout_secs) });

    let report = analyzer
        .analyze(&user_text)
        .await
        .context("could not analyze the business idea")?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => render_text(&report),
    }
    Ok(())
}

fn read_idea(args: &Args) -> anyhow::Result<String> {
    if !args.idea.is_empty() {
        return Ok(args.idea.join(" "));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read the idea text from stdin")?;
    let text = buf.trim().to_string();
    anyhow::ensure!(!text.is_empty(), "no idea text given (argument or stdin)");
    Ok(text)
}

fn render_text(report: &AnalysisReport) {
    match report {
        AnalysisReport::Complete { query, summary, bundle } => {
            println!("Business:  {}", query.business_type);
            println!("Location:  {}", query.location);
            println!("Idea:      {}\n", query.description);

            println!("# Executive Summary");
            for (i, point) in summary.points.iter().enumerate() {
                let sources: Vec<&str> =
                    point.sources.iter().map(|d| d.as_str()).collect();
                println!("{}. {} [{}]", i + 1, point.headline, sources.join(", "));
                println!("   {}\n", point.detail);
            }
            if !summary.citations.is_empty() {
                println!("Citations:");
                for citation in &summary.citations {
                    println!("  - {}: {}", citation.domain, citation.section);
                }
            }
            render_bundle(bundle);
        }
        AnalysisReport::Degraded { query, bundle, reason } => {
            println!("Business:  {}", query.business_type);
            println!("Location:  {}", query.location);
            println!(
                "\nNo executive summary could be produced ({reason:?}); raw analyses follow.\n"
            );
            render_bundle(bundle);
        }
    }
}

fn render_bundle(bundle: &AnalysisBundle) {
    for domain in venture_core::AnalysisDomain::ALL {
        println!("\n# {} analysis", domain);
        match bundle.outcome(domain) {
            TaskOutcome::Success { result } => {
                for (key, value) in &result.sections {
                    println!("## {key}\n{value}\n");
                }
            }
            TaskOutcome::Failure { kind, message } => {
                println!("unavailable ({kind:?}): {message}");
            }
        }
    }
}
