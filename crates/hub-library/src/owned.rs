//! Owned games page.

use chrono::DateTime;
use gamepal_hub_mods::ProcessedOwnedGame;
use gamepal_hub_query::{CellValue, Column, FilterOption, FilterState, includes_one_of};
use gamepal_protocol::{GameMode, OperatingSystem, ProviderId, UevrScore};

use crate::shared::{engine_column, enum_options};

pub const OWNED_KEY: &str = "owned";

pub const OWNED_DEFAULT_HIDDEN: &[&str] = &[];

/// Release date as `YYYY-MM-DD`, from unix seconds.
pub fn format_release_date(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn owned_columns() -> Vec<Column<ProcessedOwnedGame>> {
    vec![
        Column::new("name", "Game")
            .with_get(|p: &ProcessedOwnedGame| Some(CellValue::text(&p.game.name))),
        Column::new("provider", "Provider")
            .hidable()
            .with_get(|p: &ProcessedOwnedGame| Some(p.game.provider.as_str().into()))
            .with_filter_options(enum_options(&ProviderId::ALL, ProviderId::as_str)),
        Column::new("operatingSystems", "OS")
            .hidable()
            .with_get(|p: &ProcessedOwnedGame| {
                if p.game.os_list.is_empty() {
                    return None;
                }
                let names: Vec<&str> = p.game.os_list.iter().map(|os| os.as_str()).collect();
                Some(CellValue::Text(names.join(", ")))
            })
            .with_filter_options(enum_options(&OperatingSystem::ALL, OperatingSystem::as_str))
            .with_matches(|p: &ProcessedOwnedGame, value: &str| {
                p.game.os_list.iter().any(|os| os.as_str() == value)
            }),
        engine_column(|p: &ProcessedOwnedGame| p.game.engine.as_ref()),
        Column::new("gameMode", "Mode")
            .hidable()
            .with_get(|p: &ProcessedOwnedGame| p.game.game_mode.map(|m| m.as_str().into()))
            .with_filter_options(enum_options(&GameMode::ALL, GameMode::as_str)),
        Column::new("uevrScore", "UEVR")
            .hidable()
            .with_get(|p: &ProcessedOwnedGame| p.game.uevr_score.map(|s| s.as_str().into()))
            .with_filter_options(enum_options(&UevrScore::ALL, UevrScore::as_str)),
        Column::new("releaseDate", "Release")
            .hidable()
            .with_get(|p: &ProcessedOwnedGame| {
                p.game
                    .release_date
                    .and_then(format_release_date)
                    .map(CellValue::Text)
            })
            .with_sort(|a: &ProcessedOwnedGame, b: &ProcessedOwnedGame| {
                match (a.game.release_date, b.game.release_date) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            }),
        Column::new("installed", "Installed")
            .hidable()
            .with_get(|p: &ProcessedOwnedGame| Some(p.is_installed.into()))
            .with_filter_options([
                FilterOption::new("true", "Installed"),
                FilterOption::new("false", "Not installed"),
            ]),
    ]
}

/// Search by name or store id.
pub fn owned_search(p: &ProcessedOwnedGame, _: &FilterState, search: &str) -> bool {
    includes_one_of(
        search,
        &[p.game.name.as_str(), p.game.provider_game_id.as_str()],
    )
}
