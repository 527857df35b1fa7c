//! Entry point tying caches, derived data and list views together.

use std::sync::Arc;

use gamepal_hub_data::DataStore;
use gamepal_hub_mods::{
    ProcessedInstalledGame, ProcessedOwnedGame, UnifiedMod, UnifiedModMap, process_installed_games,
    process_owned_games, reconcile, sorted_mods,
};
use gamepal_hub_query::ListView;
use gamepal_hub_settings::PreferenceStore;

use crate::installed::{INSTALLED_DEFAULT_HIDDEN, INSTALLED_KEY, installed_columns, installed_search};
use crate::mods::{MODS_DEFAULT_HIDDEN, MODS_KEY, mods_columns, mods_search};
use crate::owned::{OWNED_DEFAULT_HIDDEN, OWNED_KEY, owned_columns, owned_search};

/// The hub's library: cached backend data plus the pages built on it.
///
/// Derived collections are recomputed on every call from the current
/// snapshots; callers decide when to ask again.
pub struct Library {
    store: Arc<DataStore>,
    preferences: Arc<dyn PreferenceStore>,
}

impl Library {
    pub fn new(store: Arc<DataStore>, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self { store, preferences }
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    pub fn preferences(&self) -> &Arc<dyn PreferenceStore> {
        &self.preferences
    }

    /// Local and remote mods merged by id.
    pub async fn unified_mods(&self) -> UnifiedModMap {
        let local = self.store.load_local_mods().await;
        let remote = self.store.load_remote_mods().await;
        reconcile(&local, &remote)
    }

    /// Installed games with their owned game and outdated flag.
    pub async fn installed_games(&self) -> Vec<ProcessedInstalledGame> {
        let installed = self.store.load_installed_games().await;
        let owned = self.store.load_owned_games().await;
        let mods = self.unified_mods().await;
        process_installed_games(&installed, &owned, &mods)
    }

    pub async fn owned_games(&self) -> Vec<ProcessedOwnedGame> {
        let owned = self.store.load_owned_games().await;
        let installed = self.store.load_installed_games().await;
        process_owned_games(&owned, &installed)
    }

    /// Unified mods as a list ordered by title, ready for the mods page.
    pub async fn mods(&self) -> Vec<UnifiedMod> {
        sorted_mods(self.unified_mods().await)
    }

    /// One installed game by id, processed.
    pub async fn installed_game(&self, game_id: &str) -> Option<ProcessedInstalledGame> {
        self.installed_games()
            .await
            .into_iter()
            .find(|p| p.game.id == game_id)
    }

    pub fn installed_view(&self) -> ListView<ProcessedInstalledGame> {
        ListView::new(
            INSTALLED_KEY,
            installed_columns(),
            INSTALLED_DEFAULT_HIDDEN,
            self.preferences.clone(),
        )
        .with_custom_filter(installed_search)
    }

    pub fn owned_view(&self) -> ListView<ProcessedOwnedGame> {
        ListView::new(
            OWNED_KEY,
            owned_columns(),
            OWNED_DEFAULT_HIDDEN,
            self.preferences.clone(),
        )
        .with_custom_filter(owned_search)
    }

    /// Mods view. The loader filter lists the loaders known right now.
    pub fn mods_view(&self) -> ListView<UnifiedMod> {
        let mut loader_ids: Vec<String> = self
            .store
            .mod_loaders()
            .map(|loaders| loaders.keys().cloned().collect())
            .unwrap_or_default();
        loader_ids.sort();
        ListView::new(
            MODS_KEY,
            mods_columns(&loader_ids),
            MODS_DEFAULT_HIDDEN,
            self.preferences.clone(),
        )
        .with_custom_filter(mods_search)
    }
}
