//! Dealflow - investor deal workflow CLI
//!
//! The `dealflow` command exposes the workflow engine from a terminal.
//!
//! ## Commands
//!
//! - `catalog`: List opportunities, filtered by sector and query
//! - `score`: Assess a proposed investment
//! - `term-sheet`: Preview an indicative term sheet
//! - `fit`: Show the counterpart panel and its aggregate fit
//! - `session`: Drive the full workflow interactively or from a script

mod session;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};

use dealflow_core::metrics::METRICS;
use dealflow_core::obs::SessionSpan;
use dealflow_core::{
    filter_catalog, format_ask, format_currency, format_percent, Catalog, ConversationMessage,
    DealAssessment, DealParameters, EngineConfig, Sector, StageView, TermSheet, WorkflowMachine,
};

use session::{parse_line, LineCommand, HELP};

#[derive(Parser)]
#[command(name = "dealflow")]
#[command(author = "Dealflow Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Investor deal-fit and negotiation workflow", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON: log lines and command output
    #[arg(long, global = true)]
    json: bool,

    /// Engine config file (JSON); DEALFLOW_* variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List opportunities in the catalog
    Catalog {
        /// Only show these sectors (repeatable)
        #[arg(long = "sector")]
        sectors: Vec<Sector>,

        /// Case-insensitive match on name or sector
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Assess a proposed deal
    Score {
        /// Investment amount in dollars
        #[arg(long)]
        investment: u64,

        /// Equity stake in percent
        #[arg(long)]
        equity: f64,
    },

    /// Preview the term sheet for a deal
    TermSheet {
        /// Investment amount in dollars
        #[arg(long)]
        investment: u64,

        /// Equity stake in percent
        #[arg(long)]
        equity: f64,
    },

    /// Show the counterpart panel and aggregate fit
    Fit,

    /// Run the workflow over stdin or a script of line commands
    Session {
        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    dealflow_core::telemetry::init_tracing(cli.json, level);

    let config = load_config(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Catalog { sectors, query } => cmd_catalog(&sectors, &query, cli.json),
        Commands::Score { investment, equity } => cmd_score(investment, equity, cli.json),
        Commands::TermSheet { investment, equity } => {
            cmd_term_sheet(investment, equity, cli.json)
        }
        Commands::Fit => cmd_fit(cli.json),
        Commands::Session { script } => cmd_session(config, script.as_deref(), cli.json).await,
    };

    METRICS.flush();
    result
}

/// Defaults, then the optional file, then the environment.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let base = match path {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => EngineConfig::default(),
    };
    let config = base
        .overlay(|key| std::env::var(key).ok())
        .context("Invalid DEALFLOW_* environment")?;
    info!(
        reply_delay_ms = config.reply_delay_ms,
        seeded = config.rng_seed.is_some(),
        "config loaded"
    );
    Ok(config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// One-shot commands
// ---------------------------------------------------------------------------

fn cmd_catalog(sectors: &[Sector], query: &str, json: bool) -> Result<()> {
    let records = filter_catalog(Catalog::seeded().records(), sectors, query);
    if json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("No opportunities match.");
        return Ok(());
    }
    for r in records {
        println!(
            "{:>2}  {:<14} {:<11} ask {:<7} for {:<5} fit {:>3}  risk {:>3}  traction {:>3}",
            r.id,
            r.name,
            r.sector.label(),
            format_ask(r.funding_ask),
            format_percent(r.equity_offered),
            r.market_fit.value(),
            r.risk_score.value(),
            r.traction.value(),
        );
    }
    Ok(())
}

fn cmd_score(investment: u64, equity: f64, json: bool) -> Result<()> {
    let params = DealParameters::new(investment, equity).context("Invalid deal parameters")?;
    let assessment = DealAssessment::assess(&params);
    if json {
        return print_json(&assessment);
    }
    print_assessment(&assessment);
    Ok(())
}

fn cmd_term_sheet(investment: u64, equity: f64, json: bool) -> Result<()> {
    let params = DealParameters::new(investment, equity).context("Invalid deal parameters")?;
    let sheet = TermSheet::from_deal(&params, Utc::now().date_naive());
    if json {
        return print_json(&sheet);
    }
    print_term_sheet(&sheet);
    Ok(())
}

fn cmd_fit(json: bool) -> Result<()> {
    let catalog = Catalog::seeded();
    let panel = catalog.counterparts();
    let fit = dealflow_core::aggregate_fit(panel.iter().map(|c| c.fit_score));

    if json {
        return print_json(&serde_json::json!({
            "counterparts": panel,
            "aggregate_fit": fit,
        }));
    }

    for c in panel {
        println!("{:<14} {:>3}%  {}", c.name, c.fit_score.value(), c.focus);
    }
    match fit {
        Some(fit) => println!("Aggregate fit: {fit}%"),
        None => println!("No counterparts on the panel."),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

async fn cmd_session(config: EngineConfig, script: Option<&Path>, json: bool) -> Result<()> {
    let input: Box<dyn AsyncBufRead + Unpin> = match script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {:?}", path))?;
            Box::new(BufReader::new(file))
        }
        None => {
            println!("{HELP}");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let mut machine = WorkflowMachine::new(Catalog::seeded(), config);
    render_view(&machine.view(), json)?;
    run_session(&mut machine, input, json).await?;

    // Let replies still in flight land before exiting.
    while let Some(message) = machine.next_reply().await {
        render_message(message, json)?;
    }
    Ok(())
}

async fn run_session(
    machine: &mut WorkflowMachine,
    input: Box<dyn AsyncBufRead + Unpin>,
    json: bool,
) -> Result<()> {
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    return Ok(());
                };
                if !handle_line(machine, &line, json).await? {
                    return Ok(());
                }
            }
            Some(message) = machine.next_reply(), if machine.has_pending_replies() => {
                render_message(message, json)?;
            }
        }
    }
}

/// Apply one input line. Returns `false` when the session should end.
async fn handle_line(machine: &mut WorkflowMachine, line: &str, json: bool) -> Result<bool> {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(true),
        Err(e) => {
            println!("! {e:#}");
            return Ok(true);
        }
    };

    match command {
        LineCommand::Quit => return Ok(false),
        LineCommand::Help => println!("{HELP}"),
        LineCommand::Wait => match machine.next_reply().await {
            Some(message) => render_message(message, json)?,
            None => println!("! no replies pending"),
        },
        LineCommand::Intent(intent) => {
            let _span = machine
                .conversation()
                .map(|c| SessionSpan::enter(c.id(), c.record().name));
            match machine.apply(intent) {
                Ok(_) => render_view(&machine.view(), json)?,
                Err(e) => {
                    warn!(error = %e, "intent rejected");
                    println!("! {e}");
                }
            }
        }
    }
    Ok(true)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_view(view: &StageView<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(view)?);
        return Ok(());
    }

    println!("== {} ==", view.stage().label());
    match view {
        StageView::Profiling { preference } => {
            let range = preference.equity_range();
            let tags: Vec<&str> = preference.selected_tags().iter().map(|s| s.label()).collect();
            println!(
                "investment {}  equity {}%-{}%  sectors [{}]",
                format_currency(preference.investment_amount() as i64),
                range.low(),
                range.high(),
                tags.join(", ")
            );
        }
        StageView::Discovery { query, records, .. } => {
            if !query.is_empty() {
                println!("query: {query}");
            }
            if records.is_empty() {
                println!("No opportunities match.");
            }
            for r in records {
                println!(
                    "{:>2}  {:<14} {:<11} {}",
                    r.id,
                    r.name,
                    r.sector.label(),
                    format_ask(r.funding_ask)
                );
            }
        }
        StageView::Detail(detail) => {
            let r = detail.record;
            println!("{} ({})  {}", r.name, r.sector.label(), r.summary);
            println!(
                "market fit {} ({:?})  risk {} ({:?})  traction {} ({:?})",
                r.market_fit.value(),
                detail.market_fit_tone,
                r.risk_score.value(),
                detail.risk_tone,
                r.traction.value(),
                detail.traction_tone,
            );
            print_assessment(&detail.assessment);
        }
        StageView::Conversation {
            record, messages, ..
        } => {
            println!("talking to {}", record.name);
            for message in messages.iter() {
                print_message(message);
            }
        }
    }
    Ok(())
}

fn render_message(message: &ConversationMessage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(message)?);
    } else {
        print_message(message);
    }
    Ok(())
}

fn print_message(message: &ConversationMessage) {
    println!("[{}] {}: {}", message.seq, message.role, message.text);
}

fn print_assessment(a: &DealAssessment) {
    println!(
        "{} for {} -> post-money {}, pre-money {}",
        format_currency(a.investment as i64),
        format_percent(a.equity_percent),
        format_currency(a.post_money as i64),
        format_currency(a.pre_money),
    );
    println!("acceptance {}% ({})", a.probability, a.label);
}

fn print_term_sheet(sheet: &TermSheet) {
    println!("Indicative term sheet ({})", sheet.issued_on.format("%Y-%m-%d"));
    for line in sheet.lines() {
        println!("  {:<26} {}", line.label, line.value);
    }
    println!("Key conditions:");
    for condition in sheet.key_conditions() {
        println!("  - {condition}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealflow_core::{Intent, Stage};
    use std::io::Write;

    fn seeded_config() -> EngineConfig {
        EngineConfig::default()
            .with_reply_delay_ms(200)
            .with_rng_seed(1)
    }

    fn script(lines: &str) -> Box<dyn AsyncBufRead + Unpin> {
        Box::new(BufReader::new(std::io::Cursor::new(lines.as_bytes().to_vec())))
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dealflow", "catalog", "--sector", "fintech", "--sector", "saas", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Catalog { sectors, query } => {
                assert_eq!(sectors, vec![Sector::FinTech, Sector::Saas]);
                assert!(query.is_empty());
            }
            _ => panic!("expected catalog"),
        }
    }

    #[test]
    fn test_score_rejects_zero_equity() {
        assert!(cmd_score(1_000_000, 0.0, false).is_err());
        assert!(cmd_score(2_000_000, 10.0, true).is_ok());
        assert!(cmd_score(u64::MAX, 1.0, false).is_err());
        assert!(cmd_score(10_000_000_000_000_000_000, 200.0, false).is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "reply_delay_ms": 10 }}"#).unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.reply_delay_ms, 10);
        assert!(load_config(Some(Path::new("/nonexistent.json"))).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_session_reaches_conversation() {
        let mut machine = WorkflowMachine::new(Catalog::seeded(), seeded_config());
        let lines = "\
            tag fintech\n\
            proceed\n\
            select 1\n\
            select 2\n\
            deal 2000000 10\n\
            chat\n\
            say How fast are you growing?\n\
            wait\n";
        run_session(&mut machine, script(lines), false).await.unwrap();

        assert_eq!(machine.stage(), Stage::Conversation);
        assert_eq!(machine.selected().map(|r| r.name), Some("FinLedger"));
        assert_eq!(machine.messages().len(), 3);
        assert!(machine.messages()[2].text.contains("FinLedger"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_reading() {
        let mut machine = WorkflowMachine::new(Catalog::seeded(), seeded_config());
        run_session(&mut machine, script("proceed\nquit\nselect 1\n"), true)
            .await
            .unwrap();
        assert_eq!(machine.stage(), Stage::Discovery);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_lines_do_not_end_the_session() {
        let mut machine = WorkflowMachine::new(Catalog::seeded(), seeded_config());
        assert!(handle_line(&mut machine, "fly away", false).await.unwrap());
        assert!(handle_line(&mut machine, "back", false).await.unwrap());
        assert!(handle_line(&mut machine, "wait", false).await.unwrap());
        machine.apply(Intent::Proceed).unwrap();
        assert_eq!(machine.stage(), Stage::Discovery);
    }
}
