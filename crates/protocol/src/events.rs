//! Backend event envelope and the cache invalidations each event implies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Events pushed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppEvent {
    SyncInstalledGames,
    SyncOwnedGames,
    SyncModLoaders,
    SyncLocalMods,
    SyncRemoteMods,
    ExecutedProviderCommand,
    /// Payload: the game name.
    GameAdded,
    /// Payload: the game name.
    GameRemoved,
    /// Payload: the error message.
    Error,
}

/// The cached entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataKind {
    InstalledGames,
    OwnedGames,
    ModLoaders,
    LocalMods,
    RemoteMods,
}

impl DataKind {
    pub const ALL: [DataKind; 5] = [
        DataKind::InstalledGames,
        DataKind::OwnedGames,
        DataKind::ModLoaders,
        DataKind::LocalMods,
        DataKind::RemoteMods,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DataKind::InstalledGames => "installed games",
            DataKind::OwnedGames => "owned games",
            DataKind::ModLoaders => "mod loaders",
            DataKind::LocalMods => "local mods",
            DataKind::RemoteMods => "remote mods",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppEvent {
    /// Collections that must be refetched when this event arrives.
    pub fn invalidates(self) -> &'static [DataKind] {
        match self {
            AppEvent::SyncInstalledGames => &[DataKind::InstalledGames],
            AppEvent::SyncOwnedGames => &[DataKind::OwnedGames],
            AppEvent::SyncModLoaders => &[DataKind::ModLoaders],
            AppEvent::SyncLocalMods => &[DataKind::LocalMods],
            AppEvent::SyncRemoteMods => &[DataKind::RemoteMods],
            AppEvent::ExecutedProviderCommand => &[DataKind::InstalledGames, DataKind::OwnedGames],
            AppEvent::GameAdded | AppEvent::GameRemoved | AppEvent::Error => &[],
        }
    }
}

/// Envelope for backend events.
///
/// The payload stays raw until a consumer asks for it with
/// [`EventMessage::parse_payload`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub event: AppEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Box<serde_json::value::RawValue>>,
}

impl EventMessage {
    /// Creates an event without a payload.
    pub fn bare(event: AppEvent) -> Self {
        Self {
            event,
            payload: None,
        }
    }

    /// Creates an event carrying the given payload.
    pub fn new<T: Serialize>(event: AppEvent, payload: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_string(payload)?;
        Ok(Self {
            event,
            payload: Some(serde_json::value::RawValue::from_string(json)?),
        })
    }

    /// Deserializes the payload into the given type.
    pub fn parse_payload<T: for<'de> Deserialize<'de>>(
        &self,
    ) -> Result<Option<T>, serde_json::Error> {
        match &self.payload {
            Some(raw) => Ok(Some(serde_json::from_str(raw.get())?)),
            None => Ok(None),
        }
    }

    /// Text of a string payload, if the payload is a JSON string.
    pub fn payload_text(&self) -> Option<String> {
        self.parse_payload::<String>().ok().flatten()
    }
}
