//! Mods page.

use gamepal_hub_mods::{ModStatus, UnifiedMod};
use gamepal_hub_query::{CellValue, Column, FilterOption, FilterState, includes_one_of};
use gamepal_protocol::{EngineBrand, UnityScriptingBackend};

use crate::shared::enum_options;

pub const MODS_KEY: &str = "mods";

pub const MODS_DEFAULT_HIDDEN: &[&str] = &[];

/// Mods columns. `loader_ids` feeds the loader filter menu.
pub fn mods_columns(loader_ids: &[String]) -> Vec<Column<UnifiedMod>> {
    vec![
        Column::new("name", "Mod").with_get(|m: &UnifiedMod| Some(m.title().into())),
        Column::new("loader", "Loader")
            .hidable()
            .with_get(|m: &UnifiedMod| Some(CellValue::text(&m.common.loader_id)))
            .with_filter_options(loader_ids.iter().map(|id| FilterOption::plain(id.as_str()))),
        Column::new("engine", "Engine")
            .hidable()
            .with_get(|m: &UnifiedMod| m.common.engine.map(|e| e.as_str().into()))
            .with_filter_options(enum_options(&EngineBrand::ALL, EngineBrand::as_str)),
        Column::new("unityBackend", "Backend")
            .hidable()
            .with_get(|m: &UnifiedMod| m.common.unity_backend.map(|b| b.as_str().into()))
            .with_filter_options(enum_options(
                &UnityScriptingBackend::ALL,
                UnityScriptingBackend::as_str,
            )),
        Column::new("status", "Status")
            .hidable()
            .with_get(|m: &UnifiedMod| Some(m.status().as_str().into()))
            .with_sort(|a: &UnifiedMod, b: &UnifiedMod| a.status().cmp(&b.status()))
            .with_filter_options(enum_options(&ModStatus::ALL, ModStatus::as_str)),
        Column::new("version", "Version")
            .hidable()
            .with_get(|m: &UnifiedMod| m.local_version().map(CellValue::from)),
    ]
}

/// Search by title, id or author.
pub fn mods_search(m: &UnifiedMod, _: &FilterState, search: &str) -> bool {
    let author = m.remote.as_ref().map(|r| r.author.as_str()).unwrap_or_default();
    includes_one_of(search, &[m.title(), m.id(), author])
}
