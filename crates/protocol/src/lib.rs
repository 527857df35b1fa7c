//! Wire types shared between the GamePal backend and the hub.
//!
//! Entities are immutable snapshots serialized as camelCase JSON. Events
//! arrive in an [`EventMessage`] envelope with a lazily decoded payload.

pub mod events;
pub mod mods;
pub mod types;

// Re-export primary types for convenience.
pub use events::{AppEvent, DataKind, EventMessage};
pub use mods::{
    CommonModData, LocalMod, LocalModData, LocalModManifest, LocalModMap, ModKind,
    ModLoaderData, ModLoaderMap, RemoteMod, RemoteModData, RemoteModDownload, RemoteModMap,
    RunnableModData,
};
pub use types::{
    Architecture, EngineBrand, EngineVersion, EngineVersionNumbers, GameEngine, GameExecutable,
    GameMode, InstalledGame, InstalledGameMap, OperatingSystem, OwnedGame, OwnedGameMap,
    ProviderCommand, ProviderCommandAction, ProviderId, UevrScore, UnityScriptingBackend,
};
