//! Installed games page.

use gamepal_hub_mods::ProcessedInstalledGame;
use gamepal_hub_query::{CellValue, Column, FilterOption, FilterState, includes_one_of};
use gamepal_protocol::{Architecture, OperatingSystem, ProviderId, UnityScriptingBackend};

use crate::shared::{engine_column, enum_options};

pub const INSTALLED_KEY: &str = "installed";

/// Columns hidden until the user picks otherwise.
pub const INSTALLED_DEFAULT_HIDDEN: &[&str] = &["operatingSystem"];

pub fn installed_columns() -> Vec<Column<ProcessedInstalledGame>> {
    vec![
        Column::new("name", "Game")
            .with_get(|p: &ProcessedInstalledGame| Some(CellValue::text(&p.game.name))),
        Column::new("provider", "Provider")
            .hidable()
            .with_get(|p: &ProcessedInstalledGame| Some(p.game.provider.as_str().into()))
            .with_filter_options(enum_options(&ProviderId::ALL, ProviderId::as_str)),
        Column::new("operatingSystem", "OS")
            .hidable()
            .with_get(|p: &ProcessedInstalledGame| {
                p.game
                    .executable
                    .operating_system
                    .map(|os| os.as_str().into())
            })
            .with_filter_options(enum_options(&OperatingSystem::ALL, OperatingSystem::as_str)),
        Column::new("architecture", "Arch")
            .hidable()
            .with_get(|p: &ProcessedInstalledGame| {
                p.game.executable.architecture.map(|a| a.as_str().into())
            })
            .with_filter_options(enum_options(&Architecture::ALL, Architecture::as_str)),
        Column::new("scriptingBackend", "Backend")
            .hidable()
            .with_get(|p: &ProcessedInstalledGame| {
                p.game
                    .executable
                    .scripting_backend
                    .map(|b| b.as_str().into())
            })
            .with_filter_options(enum_options(
                &UnityScriptingBackend::ALL,
                UnityScriptingBackend::as_str,
            )),
        engine_column(|p: &ProcessedInstalledGame| p.game.executable.engine.as_ref()),
        Column::new("mods", "Mods")
            .hidable()
            .with_get(|p: &ProcessedInstalledGame| Some(p.has_outdated_mod.into()))
            .with_filter_options([
                FilterOption::new("true", "Outdated mods"),
                FilterOption::new("false", "Up to date"),
            ]),
    ]
}

/// Search by name or discriminator only.
pub fn installed_search(p: &ProcessedInstalledGame, _: &FilterState, search: &str) -> bool {
    let discriminator = p.game.discriminator.as_deref().unwrap_or_default();
    includes_one_of(search, &[p.game.name.as_str(), discriminator])
}
