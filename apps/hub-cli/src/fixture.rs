//! Backend stand-in reading entity collections from JSON files.
//!
//! Layout of the data directory:
//! - `installed-games.json`, `owned-games.json`, `mod-loaders.json`,
//!   `local-mods.json`, `remote-mods.json`: id-keyed objects
//! - `commands.log`: executed commands, one JSON object per line

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use gamepal_hub_data::{CommandGateway, DataError, GatewayCommand, GatewayFuture};
use gamepal_protocol::{
    EventMessage, InstalledGameMap, LocalModMap, ModLoaderMap, OwnedGameMap, RemoteModMap,
};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast;
use tracing::debug;

const COMMAND_LOG: &str = "commands.log";

pub struct FixtureGateway {
    dir: PathBuf,
    events: broadcast::Sender<EventMessage>,
}

impl FixtureGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            dir: dir.into(),
            events,
        }
    }

    fn read<T>(&self, file: &'static str) -> GatewayFuture<'_, T>
    where
        T: DeserializeOwned + Default + Send + 'static,
    {
        let path = self.dir.join(file);
        Box::pin(async move { read_collection(&path).await })
    }
}

/// Missing files read as empty collections.
async fn read_collection<T: DeserializeOwned + Default>(path: &Path) -> Result<T, DataError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "fixture file missing, using empty collection");
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}

impl CommandGateway for FixtureGateway {
    fn fetch_installed_games(&self) -> GatewayFuture<'_, InstalledGameMap> {
        self.read("installed-games.json")
    }

    fn fetch_owned_games(&self) -> GatewayFuture<'_, OwnedGameMap> {
        self.read("owned-games.json")
    }

    fn fetch_mod_loaders(&self) -> GatewayFuture<'_, ModLoaderMap> {
        self.read("mod-loaders.json")
    }

    fn fetch_local_mods(&self) -> GatewayFuture<'_, LocalModMap> {
        self.read("local-mods.json")
    }

    fn fetch_remote_mods(&self) -> GatewayFuture<'_, RemoteModMap> {
        self.read("remote-mods.json")
    }

    fn execute(&self, command: GatewayCommand) -> GatewayFuture<'_, ()> {
        let path = self.dir.join(COMMAND_LOG);
        Box::pin(async move {
            let mut line = serde_json::to_string(&command)?;
            line.push('\n');
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            // Pending writes are lost if the file is dropped unflushed.
            file.flush().await?;
            debug!(command = command.name(), "command recorded");
            Ok(())
        })
    }

    fn subscribe_events(&self) -> broadcast::Receiver<EventMessage> {
        self.events.subscribe()
    }
}
