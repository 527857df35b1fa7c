mod cli;
mod fixture;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use gamepal_hub_data::{DataStore, GatewayCommand};
use gamepal_hub_library::Library;
use gamepal_hub_mods::{executable_warnings, game_actions, game_mod_rows};
use gamepal_hub_query::ListView;
use gamepal_hub_settings::JsonFilePreferences;
use gamepal_protocol::DataKind;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, ListArgs};
use crate::fixture::FixtureGateway;

const DATA_DIR_ENV: &str = "GAMEPAL_DATA_DIR";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data_dir = args
        .data
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %data_dir.display(),
        "starting GamePal hub"
    );

    let store = Arc::new(DataStore::new(Arc::new(FixtureGateway::new(data_dir))));
    let preferences = Arc::new(JsonFilePreferences::open_default());
    let library = Library::new(store.clone(), preferences);

    let result = run(&library, args.command).await;

    let failed = store.has_error_notifications();
    for notification in store.take_notifications() {
        eprintln!("{}", render::notification(&notification));
    }
    result?;
    if failed {
        anyhow::bail!("finished with errors");
    }
    Ok(())
}

async fn run(library: &Library, command: Command) -> anyhow::Result<()> {
    let store = library.store();
    match command {
        Command::Installed(list) => {
            let games = library.installed_games().await;
            let mut view = library.installed_view();
            print_page(&mut view, &list, &games);
        }
        Command::Owned(list) => {
            let games = library.owned_games().await;
            let mut view = library.owned_view();
            print_page(&mut view, &list, &games);
        }
        Command::Mods(list) => {
            store.load_mod_loaders().await;
            let mods = library.mods().await;
            let mut view = library.mods_view();
            print_page(&mut view, &list, &mods);
        }
        Command::Game { id } => {
            let Some(processed) = library.installed_game(&id).await else {
                anyhow::bail!("no installed game with id {id:?}");
            };
            for warning in executable_warnings(&processed.game) {
                store.notify_warning(processed.game.name.as_str(), warning.message());
            }
            let mods = library.unified_mods().await;
            let rows = game_mod_rows(&processed.game, &mods);
            print!("{}", render::game_details(&processed, &rows));

            let actions: Vec<&str> = game_actions(&processed)
                .iter()
                .map(GatewayCommand::name)
                .collect();
            println!("actions: {}", actions.join(", "));
        }
        Command::Run { command } => {
            let command: GatewayCommand = serde_json::from_str(&command)?;
            let name = command.name();
            // Failures are queued as notifications by the store.
            if store.execute(command).await.is_ok() {
                store.notify_success(format!("Executed {name}"));
                store.refresh_all().await;
            }
        }
        Command::Refresh => {
            store.refresh_all().await;
            for kind in DataKind::ALL {
                if !store.is_loaded(kind) {
                    warn!(kind = %kind, "collection not loaded");
                }
            }
            println!("refreshed");
        }
    }
    Ok(())
}

/// Applies the persisted-state edits in `list`, then prints the page.
fn print_page<T>(view: &mut ListView<T>, list: &ListArgs, items: &[T]) {
    if list.reset {
        view.reset_filter();
    }
    if let Some(search) = &list.search {
        view.set_search(search.as_str());
    }
    if !list.filters.is_empty() {
        view.set_filter(
            list.filters
                .iter()
                .map(|(column, value)| (column.as_str(), Some(value.as_str()))),
        );
    }
    if let Some(sort) = &list.sort {
        view.set_sort(Some(sort.clone()));
    }
    for column in &list.toggle_columns {
        if !view.toggle_column(column) {
            warn!(column = %column, "column cannot be hidden");
        }
    }

    let rows = view.query(items);
    print!("{}", render::view_summary(view));
    print!("{}", render::table(view, &rows, items.len()));
}
