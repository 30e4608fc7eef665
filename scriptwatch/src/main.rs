use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use script_diff::DiffItem;
use std::fs;
use std::path::{Path, PathBuf};

mod config;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat { Text, Json, Jsonl }

#[derive(Debug, Parser)]
#[command(name = "scriptwatch", version, about = "Payment-page script inventory and change detection")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./scriptwatch.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Compare two persisted scans and print the change set
    Diff {
        /// Older scan artifact (JSON)
        old: PathBuf,
        /// Newer scan artifact (JSON)
        new: PathBuf,
        /// Output format: text, json, or jsonl (default json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Output file (overwrites). Stdout if omitted.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Write CSV instead of the selected format when --out is provided
        #[arg(long, default_value_t = false)]
        csv: bool,
        /// Also write an HTML diff report to this path
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
    },
    /// Render a persisted scan as an HTML report
    Report {
        /// Scan artifact to render (JSON)
        scan: PathBuf,
        /// Output HTML file
        out: PathBuf,
        /// Report title (overrides config)
        #[arg(long)]
        title: Option<String>,
    },
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s {
        "text" => Some(OutputFormat::Text),
        "json" => Some(OutputFormat::Json),
        "jsonl" => Some(OutputFormat::Jsonl),
        _ => None,
    }
}

fn render_text(items: &[DiffItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!("{}\t{}\n", item.change_type.as_str(), item.script_id));
    }
    out
}

fn write_csv(path: &Path, items: &[DiffItem]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(fs::File::create(path)?);
    wtr.write_record([
        "changeType", "pageUrl", "scriptId",
        "oldScriptUrl", "oldInlineHash", "oldOrigin",
        "newScriptUrl", "newInlineHash", "newOrigin",
    ])?;
    for item in items {
        let (old_url, old_hash, old_origin) = record_fields(item.old_record.as_ref());
        let (new_url, new_hash, new_origin) = record_fields(item.new_record.as_ref());
        wtr.write_record([
            item.change_type.as_str().to_string(),
            item.page_url.clone(),
            item.script_id.clone(),
            old_url, old_hash, old_origin,
            new_url, new_hash, new_origin,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn record_fields(record: Option<&scriptwatch_core::types::ScriptRecord>) -> (String, String, String) {
    match record {
        None => (String::new(), String::new(), String::new()),
        Some(r) => (
            r.script_url.clone().unwrap_or_default(),
            r.inline_hash.clone().unwrap_or_default(),
            r.origin.as_str().to_string(),
        ),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded_cfg = config::load_config(cli.config.as_deref());
    match cli.command {
        Commands::Version => {
            println!("scriptwatch {} (core {})", env!("CARGO_PKG_VERSION"), scriptwatch_core::version());
        }
        Commands::Diff { old, new, format, out, csv, html } => {
            let old_scan = scriptwatch_core::store::load_scan(&old)?;
            let new_scan = scriptwatch_core::store::load_scan(&new)?;
            let items = script_diff::diff(&old_scan, &new_scan);

            let format = format
                .or_else(|| {
                    loaded_cfg
                        .as_ref()
                        .and_then(|c| c.diff.as_ref())
                        .and_then(|d| d.format.as_deref())
                        .and_then(parse_format)
                })
                .unwrap_or(OutputFormat::Json);

            if let Some(path) = html.as_deref() {
                let doc = report::render_diff(&items, "Payment Page Script Diff Report");
                fs::write(path, doc)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("HTML diff report written to {}", path.display());
            }

            let rendered = match format {
                OutputFormat::Text => render_text(&items),
                OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&items)?),
                OutputFormat::Jsonl => {
                    let mut s = String::new();
                    for item in &items {
                        s.push_str(&serde_json::to_string(item)?);
                        s.push('\n');
                    }
                    s
                }
            };
            match out {
                Some(path) if csv => write_csv(&path, &items)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", rendered),
            }
        }
        Commands::Report { scan, out, title } => {
            let scan_result = scriptwatch_core::store::load_scan(&scan)?;
            let title = title
                .or_else(|| {
                    loaded_cfg
                        .as_ref()
                        .and_then(|c| c.report.as_ref())
                        .and_then(|r| r.title.clone())
                })
                .unwrap_or_else(|| "Payment Page Script Scan Report".to_string());
            let doc = report::render_scan(&scan_result, &title);
            fs::write(&out, doc)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("HTML report written to {}", out.display());
        }
    }
    Ok(())
}
