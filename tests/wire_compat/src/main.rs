fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use gamepal_hub_data::GatewayCommand;
    use gamepal_hub_query::{ListState, SortDirection};
    use gamepal_protocol::{
        AppEvent, EventMessage, InstalledGame, LocalMod, ModLoaderData, OwnedGame,
        ProviderCommandAction, RemoteMod,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison). Returns the parsed value.
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  backend: {fixture}\n  hub:     {reserialized}"
        );
        parsed
    }

    // --- Entity tests ---

    #[test]
    fn fixture_installed_game() {
        let game: InstalledGame = roundtrip_test("installed_game.json");
        assert!(game.has_mod("unity-explorer"));
        assert_eq!(game.installed_mod_versions["unity-explorer"], None);
        assert_eq!(game.owned_game_id.as_deref(), Some("steam_620"));
    }

    #[test]
    fn fixture_owned_game() {
        let game: OwnedGame = roundtrip_test("owned_game.json");
        assert_eq!(game.os_list.len(), 2);
        assert!(
            game.provider_commands
                .contains_key(&ProviderCommandAction::ShowInStore)
        );
    }

    #[test]
    fn fixture_local_mod() {
        let m: LocalMod = roundtrip_test("local_mod.json");
        let manifest = m.data.manifest.expect("manifest present");
        assert_eq!(manifest.version, "abc");
    }

    #[test]
    fn fixture_remote_mod() {
        let m: RemoteMod = roundtrip_test("remote_mod.json");
        let latest = m.data.latest_version.expect("latest version present");
        assert_eq!(latest.id, "def");
        assert!(latest.runnable.is_some());
    }

    #[test]
    fn fixture_mod_loader() {
        let loader: ModLoaderData = roundtrip_test("mod_loader.json");
        assert_eq!(loader.id, "bepinex");
    }

    // --- Event and command tests ---

    #[test]
    fn fixture_event_game_added() {
        let message: EventMessage = roundtrip_test("event_game_added.json");
        assert_eq!(message.event, AppEvent::GameAdded);
        assert_eq!(message.payload_text().as_deref(), Some("Portal 2"));
        assert!(message.event.invalidates().is_empty());
    }

    #[test]
    fn fixture_command_install_mod() {
        let command: GatewayCommand = roundtrip_test("command_install_mod.json");
        assert_eq!(command.name(), "install mod");
    }

    #[test]
    fn fixture_command_run_provider_command() {
        let command: GatewayCommand = roundtrip_test("command_run_provider_command.json");
        assert_eq!(
            command,
            GatewayCommand::RunProviderCommand {
                owned_game_id: "steam_620".into(),
                action: ProviderCommandAction::ShowInStore,
            }
        );
    }

    // --- Persisted preferences ---

    #[test]
    fn fixture_list_state() {
        let state: ListState = roundtrip_test("list_state.json");
        let sort = state.sort.expect("sort present");
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(state.filter.len(), 2);
    }
}
