//! Contract with the native backend.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use gamepal_protocol::{
    EventMessage, InstalledGameMap, LocalModMap, ModLoaderMap, OwnedGameMap,
    ProviderCommandAction, RemoteModMap,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::DataError;

/// Boxed future returned by gateway calls.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DataError>> + Send + 'a>>;

/// Mutating or opaque operations run by the backend.
///
/// Commands report only success or failure. Their effects come back as
/// events that invalidate the affected caches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GatewayCommand {
    InstallMod {
        mod_loader_id: String,
        mod_id: String,
        game_id: String,
    },
    UninstallMod {
        game_id: String,
        mod_id: String,
    },
    DownloadMod {
        mod_id: String,
    },
    RunRunnableMod {
        mod_id: String,
    },
    AddGame {
        path: PathBuf,
    },
    RemoveGame {
        game_id: String,
    },
    RefreshGame {
        game_id: String,
    },
    StartGame {
        game_id: String,
    },
    StartGameExe {
        game_id: String,
    },
    OpenGameFolder {
        game_id: String,
    },
    OpenGameModsFolder {
        game_id: String,
    },
    OpenModFolder {
        mod_loader_id: String,
        mod_id: String,
    },
    OpenModLoaderFolder {
        mod_loader_id: String,
    },
    RunProviderCommand {
        owned_game_id: String,
        action: ProviderCommandAction,
    },
    UpdateData,
}

impl GatewayCommand {
    /// Short name used in logs and notifications.
    pub fn name(&self) -> &'static str {
        match self {
            GatewayCommand::InstallMod { .. } => "install mod",
            GatewayCommand::UninstallMod { .. } => "uninstall mod",
            GatewayCommand::DownloadMod { .. } => "download mod",
            GatewayCommand::RunRunnableMod { .. } => "run mod",
            GatewayCommand::AddGame { .. } => "add game",
            GatewayCommand::RemoveGame { .. } => "remove game",
            GatewayCommand::RefreshGame { .. } => "refresh game",
            GatewayCommand::StartGame { .. } => "start game",
            GatewayCommand::StartGameExe { .. } => "start game executable",
            GatewayCommand::OpenGameFolder { .. } => "open game folder",
            GatewayCommand::OpenGameModsFolder { .. } => "open game mods folder",
            GatewayCommand::OpenModFolder { .. } => "open mod folder",
            GatewayCommand::OpenModLoaderFolder { .. } => "open mod loader folder",
            GatewayCommand::RunProviderCommand { .. } => "run provider command",
            GatewayCommand::UpdateData => "update data",
        }
    }
}

/// Abstract connection to the backend.
///
/// The app provides the implementation; tests use an in-memory mock.
/// Fetches return complete id-keyed collections.
pub trait CommandGateway: Send + Sync {
    fn fetch_installed_games(&self) -> GatewayFuture<'_, InstalledGameMap>;

    fn fetch_owned_games(&self) -> GatewayFuture<'_, OwnedGameMap>;

    fn fetch_mod_loaders(&self) -> GatewayFuture<'_, ModLoaderMap>;

    fn fetch_local_mods(&self) -> GatewayFuture<'_, LocalModMap>;

    fn fetch_remote_mods(&self) -> GatewayFuture<'_, RemoteModMap>;

    /// Runs a command. Effects are reported through events.
    fn execute(&self, command: GatewayCommand) -> GatewayFuture<'_, ()>;

    /// New receiver for backend events.
    fn subscribe_events(&self) -> broadcast::Receiver<EventMessage>;
}
