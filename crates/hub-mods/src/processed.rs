//! Games joined with the data the list pages show next to them.
//!
//! Everything here is recomputed from the current snapshots on demand;
//! nothing is cached.

use gamepal_hub_data::GatewayCommand;
use gamepal_protocol::{
    EngineBrand, GameExecutable, InstalledGame, InstalledGameMap, OwnedGame, OwnedGameMap,
    ProviderCommandAction, ProviderId,
};

use crate::outdated::{has_outdated_mod, is_outdated};
use crate::unified::{UnifiedMod, UnifiedModMap, compare_by_name};

/// An installed game with its owned-game record and outdated-mod flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedInstalledGame {
    pub game: InstalledGame,
    pub owned_game: Option<OwnedGame>,
    pub has_outdated_mod: bool,
}

/// An owned game and whether any installed game links to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedOwnedGame {
    pub game: OwnedGame,
    pub is_installed: bool,
}

/// Joins every installed game with its owned game and outdated flag.
/// Ordered by name, then id.
pub fn process_installed_games(
    installed: &InstalledGameMap,
    owned: &OwnedGameMap,
    mods: &UnifiedModMap,
) -> Vec<ProcessedInstalledGame> {
    let mut games: Vec<ProcessedInstalledGame> = installed
        .values()
        .map(|game| ProcessedInstalledGame {
            owned_game: game
                .owned_game_id
                .as_ref()
                .and_then(|id| owned.get(id))
                .cloned(),
            has_outdated_mod: has_outdated_mod(game, mods),
            game: game.clone(),
        })
        .collect();
    games.sort_by(|a, b| compare_by_name(&a.game.name, &a.game.id, &b.game.name, &b.game.id));
    games
}

/// Marks each owned game installed iff an installed game links to it.
/// Ordered by name, then id.
pub fn process_owned_games(
    owned: &OwnedGameMap,
    installed: &InstalledGameMap,
) -> Vec<ProcessedOwnedGame> {
    let mut games: Vec<ProcessedOwnedGame> = owned
        .values()
        .map(|game| ProcessedOwnedGame {
            is_installed: installed
                .values()
                .any(|i| i.owned_game_id.as_deref() == Some(game.id.as_str())),
            game: game.clone(),
        })
        .collect();
    games.sort_by(|a, b| compare_by_name(&a.game.name, &a.game.id, &b.game.name, &b.game.id));
    games
}

// ---------------------------------------------------------------------------
// Per-game mod rows
// ---------------------------------------------------------------------------

/// State of one mod for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameModState {
    Installed {
        version: Option<String>,
        outdated: bool,
    },
    /// Compatible with the game but not installed.
    Available,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameModRow<'a> {
    pub unified: &'a UnifiedMod,
    pub state: GameModState,
}

impl GameModRow<'_> {
    /// Command that toggles this mod for `game_id`.
    pub fn command(&self, game_id: &str) -> GatewayCommand {
        let common = &self.unified.common;
        match self.state {
            GameModState::Installed { .. } => GatewayCommand::UninstallMod {
                game_id: game_id.to_string(),
                mod_id: common.id.clone(),
            },
            GameModState::Available if self.unified.is_runnable() => {
                GatewayCommand::RunRunnableMod {
                    mod_id: common.id.clone(),
                }
            }
            GameModState::Available => GatewayCommand::InstallMod {
                mod_loader_id: common.loader_id.clone(),
                mod_id: common.id.clone(),
                game_id: game_id.to_string(),
            },
        }
    }
}

/// Whether a mod targets the engine the executable runs on.
///
/// Unknown on either side counts as compatible.
pub fn is_compatible(m: &UnifiedMod, executable: &GameExecutable) -> bool {
    let engine = executable.engine.as_ref().map(|e| e.brand);
    let brand_ok = match (m.common.engine, engine) {
        (Some(wanted), Some(actual)) => wanted == actual,
        _ => true,
    };
    let backend_ok = match (m.common.unity_backend, executable.scripting_backend) {
        (Some(wanted), Some(actual)) => wanted == actual,
        _ => true,
    };
    brand_ok && backend_ok
}

/// Rows for every mod installed in `game` plus every compatible mod that
/// is not, ordered by title then id.
pub fn game_mod_rows<'a>(game: &InstalledGame, mods: &'a UnifiedModMap) -> Vec<GameModRow<'a>> {
    let mut rows: Vec<GameModRow<'a>> = mods
        .values()
        .filter_map(|m| match game.installed_mod_versions.get(m.id()) {
            Some(version) => Some(GameModRow {
                unified: m,
                state: GameModState::Installed {
                    outdated: is_outdated(version.as_deref(), m.latest_version_id()),
                    version: version.clone(),
                },
            }),
            None if is_compatible(m, &game.executable) => Some(GameModRow {
                unified: m,
                state: GameModState::Available,
            }),
            None => None,
        })
        .collect();
    rows.sort_by(|a, b| {
        compare_by_name(a.unified.title(), a.unified.id(), b.unified.title(), b.unified.id())
    });
    rows
}

// ---------------------------------------------------------------------------
// Game detail helpers
// ---------------------------------------------------------------------------

/// Detection gaps worth surfacing next to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableWarning {
    UnknownArchitecture,
    UnknownOperatingSystem,
    UnknownEngine,
    /// Unity game whose scripting backend could not be read.
    UnknownScriptingBackend,
}

impl ExecutableWarning {
    pub fn message(self) -> &'static str {
        match self {
            ExecutableWarning::UnknownArchitecture => {
                "Failed to read the executable architecture. Some mods might fail to install."
            }
            ExecutableWarning::UnknownOperatingSystem => {
                "Failed to read the executable operating system. Some mods might fail to install."
            }
            ExecutableWarning::UnknownEngine => {
                "Failed to determine the game engine. Engine-specific mods might not work."
            }
            ExecutableWarning::UnknownScriptingBackend => {
                "Failed to determine the Unity scripting backend."
            }
        }
    }
}

/// Soft warnings for missing executable details.
pub fn executable_warnings(game: &InstalledGame) -> Vec<ExecutableWarning> {
    let exe = &game.executable;
    let mut warnings = Vec::new();
    if exe.architecture.is_none() {
        warnings.push(ExecutableWarning::UnknownArchitecture);
    }
    if exe.operating_system.is_none() {
        warnings.push(ExecutableWarning::UnknownOperatingSystem);
    }
    match &exe.engine {
        None => warnings.push(ExecutableWarning::UnknownEngine),
        Some(engine) if engine.brand == EngineBrand::Unity && exe.scripting_backend.is_none() => {
            warnings.push(ExecutableWarning::UnknownScriptingBackend);
        }
        Some(_) => {}
    }
    warnings
}

/// Commands offered in an installed game's detail view.
pub fn game_actions(processed: &ProcessedInstalledGame) -> Vec<GatewayCommand> {
    let game = &processed.game;
    let id = || game.id.clone();
    let mut actions = vec![
        GatewayCommand::StartGame { game_id: id() },
        GatewayCommand::RefreshGame { game_id: id() },
        GatewayCommand::OpenGameFolder { game_id: id() },
        GatewayCommand::OpenGameModsFolder { game_id: id() },
    ];
    if game.start_command.is_some() {
        actions.insert(1, GatewayCommand::StartGameExe { game_id: id() });
    }
    if let Some(owned) = &processed.owned_game {
        for action in [
            ProviderCommandAction::ShowInStore,
            ProviderCommandAction::ShowInLibrary,
        ] {
            if owned.provider_commands.contains_key(&action) {
                actions.push(GatewayCommand::RunProviderCommand {
                    owned_game_id: owned.id.clone(),
                    action,
                });
            }
        }
    }
    if game.provider == ProviderId::Manual {
        actions.push(GatewayCommand::RemoveGame { game_id: id() });
    }
    actions
}
