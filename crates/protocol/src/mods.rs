//! Mod and mod loader types.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{EngineBrand, UnityScriptingBackend};

/// Identity fields shared by the local and remote records of a mod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonModData {
    pub id: String,
    #[serde(default)]
    pub engine: Option<EngineBrand>,
    #[serde(default)]
    pub unity_backend: Option<UnityScriptingBackend>,
    pub loader_id: String,
}

/// Program to launch for mods that run next to the game instead of
/// being copied into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnableModData {
    pub path: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Manifest written next to a downloaded mod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalModManifest {
    pub version: String,
    #[serde(default)]
    pub runnable: Option<RunnableModData>,
    #[serde(default)]
    pub engine: Option<EngineBrand>,
    #[serde(default)]
    pub unity_backend: Option<UnityScriptingBackend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalModData {
    pub path: PathBuf,
    #[serde(default)]
    pub manifest: Option<LocalModManifest>,
}

/// A mod present on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalMod {
    pub common: CommonModData,
    pub data: LocalModData,
}

/// Latest downloadable build of a remote mod.
///
/// `id` is an opaque version identifier, compared by string equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteModDownload {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub runnable: Option<RunnableModData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteModData {
    pub title: String,
    pub author: String,
    pub source_code: String,
    pub description: String,
    #[serde(default)]
    pub latest_version: Option<RemoteModDownload>,
}

/// A mod listed in a mod loader's database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMod {
    pub common: CommonModData,
    pub data: RemoteModData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModKind {
    Installable,
    Runnable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModLoaderData {
    pub id: String,
    pub path: PathBuf,
    pub kind: ModKind,
}

pub type LocalModMap = HashMap<String, LocalMod>;
pub type RemoteModMap = HashMap<String, RemoteMod>;
pub type ModLoaderMap = HashMap<String, ModLoaderData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mod_without_manifest() {
        let json = r#"{
            "common": {"id": "m1", "loaderId": "bepinex"},
            "data": {"path": "/mods/m1"}
        }"#;
        let local: LocalMod = serde_json::from_str(json).unwrap();
        assert_eq!(local.common.id, "m1");
        assert_eq!(local.common.engine, None);
        assert!(local.data.manifest.is_none());
    }

    #[test]
    fn remote_mod_field_names() {
        let json = r#"{
            "common": {"id": "m1", "engine": "Unity", "unityBackend": "Il2Cpp", "loaderId": "bepinex"},
            "data": {
                "title": "Mod One",
                "author": "someone",
                "sourceCode": "https://example.com/m1",
                "description": "does things",
                "latestVersion": {"id": "v2", "url": "https://example.com/m1.zip", "root": "BepInEx"}
            }
        }"#;
        let remote: RemoteMod = serde_json::from_str(json).unwrap();
        assert_eq!(remote.common.unity_backend, Some(UnityScriptingBackend::Il2Cpp));
        let latest = remote.data.latest_version.unwrap();
        assert_eq!(latest.id, "v2");
        assert_eq!(latest.root.as_deref(), Some("BepInEx"));
        assert!(latest.runnable.is_none());
    }

    #[test]
    fn mod_loader_kind_serialization() {
        let loader = ModLoaderData {
            id: "uevr".into(),
            path: PathBuf::from("/loaders/uevr"),
            kind: ModKind::Runnable,
        };
        let json = serde_json::to_value(&loader).unwrap();
        assert_eq!(json["kind"], "Runnable");
        assert_eq!(json["path"], "/loaders/uevr");
    }
}
