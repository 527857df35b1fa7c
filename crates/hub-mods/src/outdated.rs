//! Outdated-mod detection.
//!
//! Version identifiers are opaque: two versions are the same iff their
//! strings are equal.

use gamepal_protocol::InstalledGame;

use crate::unified::UnifiedModMap;

/// Whether an installed version lags behind the latest available one.
///
/// An unknown latest version is never outdated. An unknown installed
/// version is outdated as soon as a latest version is known.
pub fn is_outdated(installed: Option<&str>, latest: Option<&str>) -> bool {
    match (installed, latest) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(installed), Some(latest)) => installed != latest,
    }
}

/// Installed version of `mod_id` in `game` compared against the unified map.
/// `None` if the mod is not installed.
pub fn installed_mod_outdated(game: &InstalledGame, mod_id: &str, mods: &UnifiedModMap) -> Option<bool> {
    let installed = game.installed_mod_versions.get(mod_id)?;
    let latest = mods.get(mod_id).and_then(|m| m.latest_version_id());
    Some(is_outdated(installed.as_deref(), latest))
}

/// Whether any mod installed in `game` is outdated.
pub fn has_outdated_mod(game: &InstalledGame, mods: &UnifiedModMap) -> bool {
    game.installed_mod_versions.iter().any(|(mod_id, installed)| {
        let latest = mods.get(mod_id).and_then(|m| m.latest_version_id());
        is_outdated(installed.as_deref(), latest)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use gamepal_protocol::{
        CommonModData, GameExecutable, ProviderId, RemoteModData, RemoteModDownload,
    };

    use crate::unified::UnifiedMod;

    fn game_with(mods: &[(&str, Option<&str>)]) -> InstalledGame {
        InstalledGame {
            id: "g1".into(),
            name: "Game".into(),
            provider: ProviderId::Steam,
            executable: GameExecutable {
                path: PathBuf::from("/games/g1/game.exe"),
                name: "game.exe".into(),
                engine: None,
                architecture: None,
                operating_system: None,
                scripting_backend: None,
            },
            installed_mod_versions: mods
                .iter()
                .map(|(id, v)| (id.to_string(), v.map(String::from)))
                .collect(),
            discriminator: None,
            thumbnail_url: None,
            owned_game_id: None,
            start_command: None,
        }
    }

    fn remote_only(id: &str, latest: Option<&str>) -> UnifiedMod {
        UnifiedMod {
            common: CommonModData {
                id: id.into(),
                engine: None,
                unity_backend: None,
                loader_id: "bepinex".into(),
            },
            local: None,
            remote: Some(RemoteModData {
                title: id.into(),
                author: String::new(),
                source_code: String::new(),
                description: String::new(),
                latest_version: latest.map(|v| RemoteModDownload {
                    id: v.into(),
                    url: format!("https://example.com/{v}.zip"),
                    root: None,
                    runnable: None,
                }),
            }),
        }
    }

    fn unified(mods: Vec<UnifiedMod>) -> UnifiedModMap {
        mods.into_iter().map(|m| (m.common.id.clone(), m)).collect()
    }

    #[test]
    fn outdated_truth_table() {
        assert!(!is_outdated(Some("v1"), None));
        assert!(!is_outdated(None, None));
        assert!(is_outdated(None, Some("v2")));
        assert!(!is_outdated(Some("v1"), Some("v1")));
        assert!(is_outdated(Some("v1"), Some("v2")));
    }

    #[test]
    fn changed_installed_version_clears_flag() {
        let mods = unified(vec![remote_only("mod1", Some("def"))]);

        assert!(has_outdated_mod(&game_with(&[("mod1", Some("abc"))]), &mods));
        assert!(!has_outdated_mod(&game_with(&[("mod1", Some("def"))]), &mods));
    }

    #[test]
    fn unknown_installed_version_is_outdated() {
        let mods = unified(vec![remote_only("mod1", Some("def"))]);
        assert!(has_outdated_mod(&game_with(&[("mod1", None)]), &mods));
    }

    #[test]
    fn mods_missing_from_map_are_not_outdated() {
        let mods = unified(vec![remote_only("other", Some("def"))]);
        let game = game_with(&[("mod1", Some("abc")), ("mod2", None)]);

        assert!(!has_outdated_mod(&game, &mods));
        assert!(!has_outdated_mod(&game, &HashMap::new()));
    }

    #[test]
    fn one_outdated_mod_is_enough() {
        let mods = unified(vec![
            remote_only("fresh", Some("v1")),
            remote_only("stale", Some("v2")),
        ]);
        let game = game_with(&[("fresh", Some("v1")), ("stale", Some("v1"))]);
        assert!(has_outdated_mod(&game, &mods));
        assert_eq!(installed_mod_outdated(&game, "fresh", &mods), Some(false));
        assert_eq!(installed_mod_outdated(&game, "stale", &mods), Some(true));
        assert_eq!(installed_mod_outdated(&game, "absent", &mods), None);
    }
}
