//! Mod reconciliation and the per-game facts derived from it.
//!
//! Local mods (on disk) and remote mods (from mod loader databases) are
//! merged by id into [`UnifiedMod`]s. Outdated flags, processed game rows
//! and per-game mod rows are pure functions of the current snapshots.

pub mod outdated;
pub mod processed;
pub mod unified;

// Re-export primary types for convenience.
pub use outdated::{has_outdated_mod, installed_mod_outdated, is_outdated};
pub use processed::{
    ExecutableWarning, GameModRow, GameModState, ProcessedInstalledGame, ProcessedOwnedGame,
    executable_warnings, game_actions, game_mod_rows, is_compatible, process_installed_games,
    process_owned_games,
};
pub use unified::{ModStatus, UnifiedMod, UnifiedModMap, compare_by_name, reconcile, sorted_mods};
