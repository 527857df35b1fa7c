//! Game entity types received from the backend.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Store or source a game comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderId {
    Steam,
    Manual,
    Epic,
    Gog,
    Xbox,
}

impl ProviderId {
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Steam,
        ProviderId::Epic,
        ProviderId::Gog,
        ProviderId::Xbox,
        ProviderId::Manual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Steam => "Steam",
            ProviderId::Manual => "Manual",
            ProviderId::Epic => "Epic",
            ProviderId::Gog => "Gog",
            ProviderId::Xbox => "Xbox",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    X64,
    X86,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::X64, Architecture::X86];

    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X64 => "X64",
            Architecture::X86 => "X86",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingSystem {
    Linux,
    Windows,
}

impl OperatingSystem {
    pub const ALL: [OperatingSystem; 2] = [OperatingSystem::Windows, OperatingSystem::Linux];

    pub fn as_str(self) -> &'static str {
        match self {
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Windows => "Windows",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineBrand {
    Unity,
    Unreal,
    Godot,
    GameMaker,
}

impl EngineBrand {
    pub const ALL: [EngineBrand; 4] = [
        EngineBrand::Unity,
        EngineBrand::Unreal,
        EngineBrand::Godot,
        EngineBrand::GameMaker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EngineBrand::Unity => "Unity",
            EngineBrand::Unreal => "Unreal",
            EngineBrand::Godot => "Godot",
            EngineBrand::GameMaker => "GameMaker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnityScriptingBackend {
    Il2Cpp,
    Mono,
}

impl UnityScriptingBackend {
    pub const ALL: [UnityScriptingBackend; 2] =
        [UnityScriptingBackend::Il2Cpp, UnityScriptingBackend::Mono];

    pub fn as_str(self) -> &'static str {
        match self {
            UnityScriptingBackend::Il2Cpp => "Il2Cpp",
            UnityScriptingBackend::Mono => "Mono",
        }
    }
}

/// Numeric part of an engine version. Minor and patch are optional
/// because some engines only report a major version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineVersionNumbers {
    pub major: u32,
    #[serde(default)]
    pub minor: Option<u32>,
    #[serde(default)]
    pub patch: Option<u32>,
}

impl Ord for EngineVersionNumbers {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)`, so "5" sorts before "5.0".
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl PartialOrd for EngineVersionNumbers {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineVersion {
    pub numbers: EngineVersionNumbers,
    #[serde(default)]
    pub suffix: Option<String>,
    pub display: String,
}

/// Detected engine of a game executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEngine {
    pub brand: EngineBrand,
    #[serde(default)]
    pub version: Option<EngineVersion>,
}

impl GameEngine {
    /// Human-readable engine label, e.g. `"Unity 2019.4.1f1"`.
    pub fn display(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {}", self.brand.as_str(), version.display),
            None => self.brand.as_str().to_string(),
        }
    }
}

/// Executable the backend detected for an installed game.
///
/// Every detected property is optional: detection can fail for any of them
/// and that is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameExecutable {
    pub path: PathBuf,
    pub name: String,
    #[serde(default)]
    pub engine: Option<GameEngine>,
    #[serde(default)]
    pub architecture: Option<Architecture>,
    #[serde(default)]
    pub operating_system: Option<OperatingSystem>,
    #[serde(default)]
    pub scripting_backend: Option<UnityScriptingBackend>,
}

/// Action a provider can perform for one of its games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderCommandAction {
    Install,
    ShowInLibrary,
    ShowInStore,
    Start,
    OpenInBrowser,
}

/// How the backend runs a provider action: open a URI, or run a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProviderCommand {
    String(String),
    Path(PathBuf, Vec<String>),
}

/// A game found on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledGame {
    pub id: String,
    pub name: String,
    pub provider: ProviderId,
    pub executable: GameExecutable,
    /// Mod id → installed version. `None` means installed with an unknown
    /// version; a missing key means not installed.
    #[serde(default)]
    pub installed_mod_versions: HashMap<String, Option<String>>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub owned_game_id: Option<String>,
    #[serde(default)]
    pub start_command: Option<ProviderCommand>,
}

impl InstalledGame {
    /// Whether `mod_id` is installed, regardless of its known version.
    pub fn has_mod(&self, mod_id: &str) -> bool {
        self.installed_mod_versions.contains_key(mod_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Vr,
    Flat,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Flat, GameMode::Vr];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Vr => "Vr",
            GameMode::Flat => "Flat",
        }
    }
}

/// Community compatibility rating for running a flat game in VR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UevrScore {
    A,
    B,
    C,
    D,
    E,
}

impl UevrScore {
    pub const ALL: [UevrScore; 5] = [
        UevrScore::A,
        UevrScore::B,
        UevrScore::C,
        UevrScore::D,
        UevrScore::E,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UevrScore::A => "A",
            UevrScore::B => "B",
            UevrScore::C => "C",
            UevrScore::D => "D",
            UevrScore::E => "E",
        }
    }
}

/// A game in a provider's owned-games catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedGame {
    pub id: String,
    pub provider: ProviderId,
    pub provider_game_id: String,
    pub name: String,
    #[serde(default)]
    pub os_list: Vec<OperatingSystem>,
    #[serde(default)]
    pub engine: Option<GameEngine>,
    /// Unix timestamp in seconds.
    #[serde(default)]
    pub release_date: Option<i64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub game_mode: Option<GameMode>,
    #[serde(default)]
    pub uevr_score: Option<UevrScore>,
    #[serde(default)]
    pub provider_commands: HashMap<ProviderCommandAction, ProviderCommand>,
}

pub type InstalledGameMap = HashMap<String, InstalledGame>;
pub type OwnedGameMap = HashMap<String, OwnedGame>;
