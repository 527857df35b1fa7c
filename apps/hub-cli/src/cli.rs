//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gamepal_hub_query::SortState;

/// GamePal hub over a directory of backend JSON fixtures.
///
/// Logging follows `RUST_LOG` (default `info`).
#[derive(Debug, Parser)]
#[command(name = "gamepal-hub", version)]
pub struct Args {
    /// Fixture directory (default: `GAMEPAL_DATA_DIR`, then `.`).
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Installed games.
    Installed(ListArgs),
    /// Owned games.
    Owned(ListArgs),
    /// Local and remote mods.
    Mods(ListArgs),
    /// Details, warnings and mods of an installed game.
    Game { id: String },
    /// Execute a backend command given as JSON.
    Run { command: String },
    /// Refetch every collection.
    Refresh,
}

/// List page options. Every change is persisted per page.
#[derive(Debug, Clone, Default, PartialEq, clap::Args)]
pub struct ListArgs {
    /// Search text, empty to clear.
    #[arg(long)]
    pub search: Option<String>,

    /// Filter a column, empty value to clear.
    #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort column, ascending unless suffixed with `:desc`.
    #[arg(long, value_name = "COLUMN[:desc]", value_parser = parse_sort)]
    pub sort: Option<SortState>,

    /// Show or hide a column.
    #[arg(long = "toggle-column", value_name = "COLUMN")]
    pub toggle_columns: Vec<String>,

    /// Clear filters and search.
    #[arg(long)]
    pub reset: bool,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected <column>=<value>, got {raw:?}"))
}

fn parse_sort(raw: &str) -> Result<SortState, String> {
    match raw.split_once(':') {
        Some((column, "desc")) => Ok(SortState::desc(column)),
        Some((column, "asc")) => Ok(SortState::asc(column)),
        Some((_, other)) => Err(format!("unknown sort direction {other:?}")),
        None => Ok(SortState::asc(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(line: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("gamepal-hub").chain(line.split_whitespace()))
    }

    fn list_args(args: Args) -> ListArgs {
        match args.command {
            Command::Installed(list) | Command::Owned(list) | Command::Mods(list) => list,
            other => panic!("expected a list command, got {other:?}"),
        }
    }

    #[test]
    fn command_is_required() {
        assert!(parse_str("").is_err());
    }

    #[test]
    fn list_options_and_global_data_dir() {
        let args =
            parse_str("installed --sort name:desc --data /tmp/d --filter provider=Steam").unwrap();
        assert_eq!(args.data, Some(PathBuf::from("/tmp/d")));
        assert!(matches!(args.command, Command::Installed(_)));

        let list = list_args(args);
        assert_eq!(list.sort, Some(SortState::desc("name")));
        assert_eq!(
            list.filters,
            vec![("provider".to_string(), "Steam".to_string())]
        );
    }

    #[test]
    fn repeated_filters_and_toggles_accumulate() {
        let list = list_args(
            parse_str("mods --filter loader=bepinex --filter status=Orphaned --toggle-column version --reset")
                .unwrap(),
        );
        assert_eq!(list.filters.len(), 2);
        assert_eq!(list.toggle_columns, vec!["version".to_string()]);
        assert!(list.reset);
        assert_eq!(list.sort, None);
    }

    #[test]
    fn empty_filter_value_is_kept_for_clearing() {
        let list = list_args(parse_str("owned --filter provider=").unwrap());
        assert_eq!(list.filters, vec![("provider".to_string(), String::new())]);
    }

    #[test]
    fn sort_without_direction_is_ascending() {
        let list = list_args(parse_str("owned --sort releaseDate").unwrap());
        assert_eq!(list.sort, Some(SortState::asc("releaseDate")));
    }

    #[test]
    fn game_takes_an_id() {
        assert_eq!(
            parse_str("game g1").unwrap().command,
            Command::Game { id: "g1".into() }
        );
        assert!(parse_str("game").is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_str("launch").is_err());
        assert!(parse_str("mods --filter loader").is_err());
        assert!(parse_str("mods --sort name:sideways").is_err());
        assert!(parse_str("mods owned").is_err());
    }
}
