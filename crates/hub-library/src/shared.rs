//! Column helpers shared by the game pages.

use std::cmp::Ordering;

use gamepal_hub_query::{CellValue, Column, FilterOption, compare_text};
use gamepal_protocol::{EngineBrand, GameEngine};

/// Filter options for a closed enum, value and label both its name.
pub fn enum_options<E: Copy>(all: &[E], name: fn(E) -> &'static str) -> Vec<FilterOption> {
    all.iter().map(|&e| FilterOption::plain(name(e))).collect()
}

/// Brand first, then version numbers. Unknown engines sort last.
pub fn compare_engines(a: Option<&GameEngine>, b: Option<&GameEngine>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_text(a.brand.as_str(), b.brand.as_str()).then_with(|| {
            match (&a.version, &b.version) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(va), Some(vb)) => va.numbers.cmp(&vb.numbers),
            }
        }),
    }
}

/// Engine column over any item exposing an optional engine.
///
/// Shows the engine with its version, filters on the brand alone.
pub fn engine_column<T: 'static>(engine: fn(&T) -> Option<&GameEngine>) -> Column<T> {
    Column::new("engine", "Engine")
        .hidable()
        .with_get(move |item: &T| engine(item).map(|e| CellValue::Text(e.display())))
        .with_sort(move |a: &T, b: &T| compare_engines(engine(a), engine(b)))
        .with_filter_options(enum_options(&EngineBrand::ALL, EngineBrand::as_str))
        .with_matches(move |item: &T, value: &str| {
            engine(item).is_some_and(|e| e.brand.as_str() == value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamepal_protocol::{EngineVersion, EngineVersionNumbers};

    fn engine(brand: EngineBrand, major: Option<u32>) -> GameEngine {
        GameEngine {
            brand,
            version: major.map(|major| EngineVersion {
                numbers: EngineVersionNumbers {
                    major,
                    minor: None,
                    patch: None,
                },
                suffix: None,
                display: major.to_string(),
            }),
        }
    }

    #[test]
    fn engines_order_by_brand_then_version() {
        let unity5 = engine(EngineBrand::Unity, Some(5));
        let unity2019 = engine(EngineBrand::Unity, Some(2019));
        let godot = engine(EngineBrand::Godot, None);

        assert_eq!(compare_engines(Some(&godot), Some(&unity5)), Ordering::Less);
        assert_eq!(
            compare_engines(Some(&unity5), Some(&unity2019)),
            Ordering::Less
        );
        assert_eq!(compare_engines(None, Some(&godot)), Ordering::Greater);
    }

    #[test]
    fn engine_column_filters_on_brand() {
        let col = engine_column(|e: &Option<GameEngine>| e.as_ref());
        let item = Some(engine(EngineBrand::Unreal, Some(4)));

        assert!(col.matches_filter(&item, "Unreal"));
        assert!(!col.matches_filter(&item, "Unreal 4"));
        assert!(!col.matches_filter(&None, "Unreal"));
        assert_eq!(col.value(&item), Some(CellValue::text("Unreal 4")));
        assert_eq!(col.filter_options().len(), 4);
    }
}
