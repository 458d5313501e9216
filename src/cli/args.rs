use std::path::PathBuf;

use chrono::NaiveDate;

use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Upcoming,
    Next,
    MonthlyTotal,
    Version,
    Help,
}

impl CommandKind {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "upcoming" => Some(CommandKind::Upcoming),
            "next" => Some(CommandKind::Next),
            "monthly-total" | "monthly" => Some(CommandKind::MonthlyTotal),
            "version" => Some(CommandKind::Version),
            "help" => Some(CommandKind::Help),
            _ => None,
        }
    }
}

/// Parsed command line for `balance_core_cli`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: CommandKind,
    pub rules: Option<PathBuf>,
    pub from: Option<NaiveDate>,
    pub horizon: Option<u32>,
    pub limit: Option<usize>,
    pub json: bool,
    pub plain: bool,
}

impl Invocation {
    fn new(command: CommandKind) -> Self {
        Self {
            command,
            rules: None,
            from: None,
            horizon: None,
            limit: None,
            json: false,
            plain: false,
        }
    }
}

/// Parses arguments (without the program name). An empty list means `help`.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens = args.into_iter().map(Into::into);
    let mut invocation: Option<Invocation> = None;
    let mut flags: Vec<(String, Option<String>)> = Vec::new();

    while let Some(token) = tokens.next() {
        match token.as_str() {
            "--json" | "--plain" => flags.push((token, None)),
            "--rules" | "--from" | "--horizon" | "--limit" => {
                let value = tokens
                    .next()
                    .ok_or_else(|| CliError::Input(format!("{token} requires a value")))?;
                flags.push((token, Some(value)));
            }
            "-h" | "--help" => invocation = Some(Invocation::new(CommandKind::Help)),
            other if other.starts_with('-') => {
                return Err(CliError::Input(format!("unknown option `{other}`")));
            }
            other => {
                if invocation.is_some() {
                    return Err(CliError::Input(format!("unexpected argument `{other}`")));
                }
                let command = CommandKind::parse(other)
                    .ok_or_else(|| CliError::Input(format!("unknown command `{other}`")))?;
                invocation = Some(Invocation::new(command));
            }
        }
    }

    let mut invocation = invocation.unwrap_or_else(|| Invocation::new(CommandKind::Help));
    for (flag, value) in flags {
        let value = value.unwrap_or_default();
        match flag.as_str() {
            "--json" => invocation.json = true,
            "--plain" => invocation.plain = true,
            "--rules" => invocation.rules = Some(PathBuf::from(value)),
            "--from" => invocation.from = Some(parse_date(&value)?),
            "--horizon" => invocation.horizon = Some(parse_number(&flag, &value)?),
            "--limit" => invocation.limit = Some(parse_number(&flag, &value)?),
            _ => {}
        }
    }
    Ok(invocation)
}

fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{value}` is not a YYYY-MM-DD date")))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Input(format!("{flag} expects a non-negative number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_arguments_show_help() {
        let invocation = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(invocation.command, CommandKind::Help);
    }

    #[test]
    fn parses_upcoming_with_options_in_any_order() {
        let invocation = parse_args([
            "--plain",
            "upcoming",
            "--from",
            "2025-01-03",
            "--horizon",
            "14",
            "--limit",
            "5",
            "--rules",
            "rules.json",
        ])
        .unwrap();
        assert_eq!(invocation.command, CommandKind::Upcoming);
        assert_eq!(invocation.from, NaiveDate::from_ymd_opt(2025, 1, 3));
        assert_eq!(invocation.horizon, Some(14));
        assert_eq!(invocation.limit, Some(5));
        assert_eq!(invocation.rules, Some(PathBuf::from("rules.json")));
        assert!(invocation.plain);
        assert!(!invocation.json);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(["teleport"]).is_err());
        assert!(parse_args(["upcoming", "--from", "03/01/2025"]).is_err());
        assert!(parse_args(["upcoming", "--horizon", "-1"]).is_err());
        assert!(parse_args(["upcoming", "--limit"]).is_err());
        assert!(parse_args(["upcoming", "--verbose"]).is_err());
        assert!(parse_args(["upcoming", "next"]).is_err());
    }
}
