//! Local and remote mod records merged into one view.

use std::cmp::Ordering;
use std::collections::HashMap;

use gamepal_hub_data::GatewayCommand;
use gamepal_protocol::{CommonModData, LocalMod, LocalModData, RemoteMod, RemoteModData};

/// A mod as the hub sees it: what is on disk, what the loader database
/// offers, or both. At least one side is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedMod {
    pub common: CommonModData,
    pub local: Option<LocalModData>,
    pub remote: Option<RemoteModData>,
}

pub type UnifiedModMap = HashMap<String, UnifiedMod>;

/// Where a unified mod's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModStatus {
    /// Listed remotely, nothing on disk.
    AvailableForDownload,
    /// On disk, unknown to the loader database.
    Orphaned,
    /// On disk and listed remotely.
    Downloadable,
}

impl ModStatus {
    pub const ALL: [ModStatus; 3] = [
        ModStatus::AvailableForDownload,
        ModStatus::Orphaned,
        ModStatus::Downloadable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModStatus::AvailableForDownload => "Available",
            ModStatus::Orphaned => "Orphaned",
            ModStatus::Downloadable => "Downloaded",
        }
    }
}

impl UnifiedMod {
    pub fn id(&self) -> &str {
        &self.common.id
    }

    pub fn status(&self) -> ModStatus {
        match (&self.local, &self.remote) {
            (Some(_), Some(_)) => ModStatus::Downloadable,
            (Some(_), None) => ModStatus::Orphaned,
            _ => ModStatus::AvailableForDownload,
        }
    }

    /// Remote title, or the id for mods the database does not know.
    pub fn title(&self) -> &str {
        self.remote
            .as_ref()
            .map(|r| r.title.as_str())
            .unwrap_or(&self.common.id)
    }

    /// Version of the copy on disk, from its manifest.
    pub fn local_version(&self) -> Option<&str> {
        self.local
            .as_ref()
            .and_then(|l| l.manifest.as_ref())
            .map(|m| m.version.as_str())
    }

    /// Identifier of the newest remote build.
    pub fn latest_version_id(&self) -> Option<&str> {
        self.remote
            .as_ref()
            .and_then(|r| r.latest_version.as_ref())
            .map(|v| v.id.as_str())
    }

    pub fn is_download_available(&self) -> bool {
        self.remote
            .as_ref()
            .and_then(|r| r.latest_version.as_ref())
            .is_some_and(|v| !v.url.is_empty())
    }

    /// Whether the mod runs as its own process rather than being copied
    /// into the game.
    pub fn is_runnable(&self) -> bool {
        let local = self
            .local
            .as_ref()
            .and_then(|l| l.manifest.as_ref())
            .is_some_and(|m| m.runnable.is_some());
        let remote = self
            .remote
            .as_ref()
            .and_then(|r| r.latest_version.as_ref())
            .is_some_and(|v| v.runnable.is_some());
        local || remote
    }

    /// Commands offered for this mod in its detail view.
    pub fn actions(&self) -> Vec<GatewayCommand> {
        let mut actions = Vec::new();
        let download = self.is_download_available();
        if self.local.is_some() {
            actions.push(GatewayCommand::OpenModFolder {
                mod_loader_id: self.common.loader_id.clone(),
                mod_id: self.common.id.clone(),
            });
        }
        if !download && self.local.is_none() {
            actions.push(GatewayCommand::OpenModLoaderFolder {
                mod_loader_id: self.common.loader_id.clone(),
            });
        }
        if download {
            actions.push(GatewayCommand::DownloadMod {
                mod_id: self.common.id.clone(),
            });
        }
        actions
    }
}

/// Case-insensitive name order, ties broken by id.
pub fn compare_by_name(a_name: &str, a_id: &str, b_name: &str, b_id: &str) -> Ordering {
    a_name
        .to_lowercase()
        .cmp(&b_name.to_lowercase())
        .then_with(|| a_id.cmp(b_id))
}

/// Unified mods as a list ordered by title, then id.
pub fn sorted_mods(mods: UnifiedModMap) -> Vec<UnifiedMod> {
    let mut list: Vec<UnifiedMod> = mods.into_values().collect();
    list.sort_by(|a, b| compare_by_name(a.title(), a.id(), b.title(), b.id()));
    list
}

/// Merges local and remote records by mod id.
///
/// `common` comes from the local record when both exist.
pub fn reconcile(
    local_mods: &HashMap<String, LocalMod>,
    remote_mods: &HashMap<String, RemoteMod>,
) -> UnifiedModMap {
    let mut unified = UnifiedModMap::with_capacity(local_mods.len().max(remote_mods.len()));

    for (id, remote) in remote_mods {
        unified.insert(
            id.clone(),
            UnifiedMod {
                common: remote.common.clone(),
                local: None,
                remote: Some(remote.data.clone()),
            },
        );
    }

    for (id, local) in local_mods {
        let entry = unified.entry(id.clone()).or_insert_with(|| UnifiedMod {
            common: local.common.clone(),
            local: None,
            remote: None,
        });
        entry.common = local.common.clone();
        entry.local = Some(local.data.clone());
    }

    unified
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use gamepal_protocol::{EngineBrand, LocalModManifest, RemoteModDownload};

    fn common(id: &str, loader: &str) -> CommonModData {
        CommonModData {
            id: id.into(),
            engine: None,
            unity_backend: None,
            loader_id: loader.into(),
        }
    }

    fn local(id: &str, version: Option<&str>) -> LocalMod {
        LocalMod {
            common: common(id, "bepinex"),
            data: LocalModData {
                path: PathBuf::from(format!("/mods/{id}")),
                manifest: version.map(|v| LocalModManifest {
                    version: v.into(),
                    runnable: None,
                    engine: None,
                    unity_backend: None,
                }),
            },
        }
    }

    fn remote(id: &str, latest: Option<(&str, &str)>) -> RemoteMod {
        RemoteMod {
            common: CommonModData {
                engine: Some(EngineBrand::Unity),
                ..common(id, "bepinex")
            },
            data: RemoteModData {
                title: format!("Mod {id}"),
                author: "someone".into(),
                source_code: String::new(),
                description: String::new(),
                latest_version: latest.map(|(vid, url)| RemoteModDownload {
                    id: vid.into(),
                    url: url.into(),
                    root: None,
                    runnable: None,
                }),
            },
        }
    }

    fn maps(
        locals: Vec<LocalMod>,
        remotes: Vec<RemoteMod>,
    ) -> (HashMap<String, LocalMod>, HashMap<String, RemoteMod>) {
        (
            locals
                .into_iter()
                .map(|m| (m.common.id.clone(), m))
                .collect(),
            remotes
                .into_iter()
                .map(|m| (m.common.id.clone(), m))
                .collect(),
        )
    }

    #[test]
    fn reconcile_covers_union_of_ids() {
        let (locals, remotes) = maps(
            vec![local("a", Some("1")), local("b", None)],
            vec![remote("b", None), remote("c", None)],
        );
        let unified = reconcile(&locals, &remotes);

        let mut ids: Vec<&str> = unified.keys().map(String::as_str).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);

        assert_eq!(unified["a"].status(), ModStatus::Orphaned);
        assert_eq!(unified["b"].status(), ModStatus::Downloadable);
        assert_eq!(unified["c"].status(), ModStatus::AvailableForDownload);
        for m in unified.values() {
            assert_eq!(m.local.is_some(), locals.contains_key(m.id()));
            assert_eq!(m.remote.is_some(), remotes.contains_key(m.id()));
        }
    }

    #[test]
    fn local_common_wins() {
        let (locals, remotes) = maps(vec![local("b", None)], vec![remote("b", None)]);
        let unified = reconcile(&locals, &remotes);
        // Remote declares Unity, local does not.
        assert_eq!(unified["b"].common.engine, None);
    }

    #[test]
    fn sorted_mods_order_by_title_then_id() {
        let (locals, remotes) = maps(
            vec![local("zeta", None), local("Alpha", None)],
            vec![remote("b", None), remote("a", None)],
        );
        let ids: Vec<String> = sorted_mods(reconcile(&locals, &remotes))
            .into_iter()
            .map(|m| m.common.id)
            .collect();
        // Titles: "Alpha", "Mod a", "Mod b", "zeta".
        assert_eq!(ids, vec!["Alpha", "a", "b", "zeta"]);
    }

    #[test]
    fn empty_inputs_give_empty_map() {
        let unified = reconcile(&HashMap::new(), &HashMap::new());
        assert!(unified.is_empty());
    }

    #[test]
    fn title_falls_back_to_id() {
        let (locals, remotes) = maps(vec![local("a", Some("1"))], vec![remote("c", None)]);
        let unified = reconcile(&locals, &remotes);
        assert_eq!(unified["a"].title(), "a");
        assert_eq!(unified["c"].title(), "Mod c");
        assert_eq!(unified["a"].local_version(), Some("1"));
        assert_eq!(unified["c"].local_version(), None);
    }

    #[test]
    fn actions_follow_availability() {
        let (locals, remotes) = maps(
            vec![local("both", None), local("orphan", None)],
            vec![
                remote("both", Some(("v1", "https://example.com/both.zip"))),
                remote("listed", None),
            ],
        );
        let unified = reconcile(&locals, &remotes);

        assert_eq!(
            unified["both"].actions(),
            vec![
                GatewayCommand::OpenModFolder {
                    mod_loader_id: "bepinex".into(),
                    mod_id: "both".into(),
                },
                GatewayCommand::DownloadMod {
                    mod_id: "both".into(),
                },
            ]
        );
        assert_eq!(
            unified["orphan"].actions(),
            vec![GatewayCommand::OpenModFolder {
                mod_loader_id: "bepinex".into(),
                mod_id: "orphan".into(),
            }]
        );
        assert_eq!(
            unified["listed"].actions(),
            vec![GatewayCommand::OpenModLoaderFolder {
                mod_loader_id: "bepinex".into(),
            }]
        );
    }

    #[test]
    fn empty_url_is_not_downloadable() {
        let (locals, remotes) = maps(vec![], vec![remote("m", Some(("v1", "")))]);
        let unified = reconcile(&locals, &remotes);
        assert!(!unified["m"].is_download_available());
        assert_eq!(unified["m"].latest_version_id(), Some("v1"));
        assert!(!unified["m"].is_runnable());
    }
}
