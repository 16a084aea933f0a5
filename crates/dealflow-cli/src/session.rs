//! Line commands for `dealflow session`.

use anyhow::{bail, Context, Result};
use dealflow_core::{Intent, Sector};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineCommand {
    Intent(Intent),
    /// Block until the next pending reply lands.
    Wait,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  proceed | back
  amount N | low N | high N | tag SECTOR      (profiling)
  query TEXT | select ID                       (discovery)
  deal INVESTMENT EQUITY | chat                (detail)
  say TEXT | wait                              (conversation)
  help | quit";

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<LineCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "proceed" | "next" => LineCommand::Intent(Intent::Proceed),
        "back" => LineCommand::Intent(Intent::Back),
        "amount" => LineCommand::Intent(Intent::AdjustInvestment(number(word, rest)?)),
        "low" => LineCommand::Intent(Intent::AdjustEquityLow(number(word, rest)?)),
        "high" => LineCommand::Intent(Intent::AdjustEquityHigh(number(word, rest)?)),
        "tag" => {
            let sector: Sector = rest.parse()?;
            LineCommand::Intent(Intent::ToggleTag(sector))
        }
        "query" => LineCommand::Intent(Intent::SetQuery(rest.to_string())),
        "select" => LineCommand::Intent(Intent::Select(number(word, rest)?)),
        "deal" => {
            let mut parts = rest.split_whitespace();
            let (Some(investment), Some(equity), None) = (parts.next(), parts.next(), parts.next())
            else {
                bail!("usage: deal INVESTMENT EQUITY");
            };
            LineCommand::Intent(Intent::AdjustDeal {
                investment: number(word, investment)?,
                equity_percent: number(word, equity)?,
            })
        }
        "chat" => LineCommand::Intent(Intent::StartConversation),
        "say" => LineCommand::Intent(Intent::Submit(rest.to_string())),
        "wait" => LineCommand::Wait,
        "help" | "?" => LineCommand::Help,
        "quit" | "exit" => LineCommand::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}

fn number<T>(command: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .replace('_', "")
        .parse()
        .with_context(|| format!("{command}: expected a number, got '{raw}'"))
}
