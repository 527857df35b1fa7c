//! Plain-text rendering of list pages and game details.

use std::fmt::Write;

use gamepal_hub_mods::{GameModRow, GameModState, ProcessedInstalledGame};
use gamepal_hub_query::{Column, ListView};
use gamepal_hub_settings::Notification;

/// Renders `rows` as an aligned table of the view's visible columns.
/// `total` is the collection size before filtering.
pub fn table<T>(view: &ListView<T>, rows: &[&T], total: usize) -> String {
    let columns: Vec<&Column<T>> = view
        .visible_columns()
        .into_iter()
        .filter(|c| !c.label.is_empty())
        .collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| c.value(row).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain([c.label.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<&str> = columns.iter().map(|c| c.label).collect();
    push_row(&mut out, header.iter().copied(), &widths);
    for row in &cells {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    let _ = writeln!(out, "{} of {total} shown", rows.len());
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Header lines for the active sort, filters and search of a view.
pub fn view_summary<T>(view: &ListView<T>) -> String {
    let state = view.state();
    let mut out = String::new();
    if let Some(sort) = &state.sort {
        let _ = writeln!(out, "sort: {} {:?}", sort.column_id, sort.direction);
    }
    for (column, value) in state.filter.iter().filter(|(_, v)| !v.is_empty()) {
        let _ = writeln!(out, "filter: {column} = {value}");
    }
    if !state.search.is_empty() {
        let _ = writeln!(out, "search: {}", state.search);
    }
    if !view.hidden_columns().is_empty() {
        let _ = writeln!(out, "hidden: {}", view.hidden_columns().join(", "));
    }
    out
}

/// Detail page of one installed game. Executable warnings are reported
/// as notifications instead.
pub fn game_details(processed: &ProcessedInstalledGame, mods: &[GameModRow<'_>]) -> String {
    let game = &processed.game;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}, {})", game.name, game.provider, game.id);
    let _ = writeln!(out, "executable: {}", game.executable.path.display());
    if let Some(engine) = &game.executable.engine {
        let _ = writeln!(out, "engine: {}", engine.display());
    }
    if let Some(owned) = &processed.owned_game {
        let _ = writeln!(out, "owned as: {}", owned.name);
    }

    if mods.is_empty() {
        let _ = writeln!(out, "no compatible mods");
    }
    for row in mods {
        let state = match &row.state {
            GameModState::Installed { version, outdated } => {
                let version = version.as_deref().unwrap_or("unknown version");
                if *outdated {
                    format!("installed ({version}, update available)")
                } else {
                    format!("installed ({version})")
                }
            }
            GameModState::Available => "available".to_string(),
        };
        let _ = writeln!(
            out,
            "  {} [{}] {}",
            row.unified.title(),
            row.unified.common.loader_id,
            state
        );
    }
    out
}

pub fn notification(n: &Notification) -> String {
    match &n.message {
        Some(message) => format!("[{:?}] {}: {}", n.level, n.title, message),
        None => format!("[{:?}] {}", n.level, n.title),
    }
}
