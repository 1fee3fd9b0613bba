use hoops::columns::{games_columns, roster_columns, ColumnKey};
use hoops::commands::games::format_games;
use hoops::commands::players::format_players;
use hoops::commands::sort_from_args;
use hoops::config::{self, DisplayConfig};
use hoops::sort::{SortDirection, SortState};
use hoops::table::SortableTable;
use hoops::types::{Game, Player};

fn player(id: i64, name: &str, jersey: Option<i64>) -> Player {
    Player {
        id,
        name: name.to_string(),
        jersey_number: jersey,
        position: None,
    }
}

fn roster() -> Vec<Player> {
    vec![
        player(1, "Cy", Some(11)),
        player(2, "ada", Some(23)),
        player(3, "Bo", Some(11)),
        player(4, "Dee", None),
    ]
}

fn names(rows: &[Player]) -> Vec<&str> {
    rows.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_header_cycle_through_table() {
    let rows = roster();
    let mut table = SortableTable::new(roster_columns());

    assert!(table.toggle(ColumnKey::Name));
    assert_eq!(table.sort().direction(), Some(SortDirection::Descending));
    assert_eq!(names(&table.sorted_rows(&rows)), ["Dee", "Cy", "Bo", "ada"]);

    table.toggle(ColumnKey::Name);
    assert_eq!(names(&table.sorted_rows(&rows)), ["ada", "Bo", "Cy", "Dee"]);

    table.toggle(ColumnKey::Name);
    assert_eq!(names(&table.sorted_rows(&rows)), ["Cy", "ada", "Bo", "Dee"]);
}

#[test]
fn test_ties_keep_source_order_both_directions() {
    let rows = roster();
    let mut table = SortableTable::new(roster_columns());

    table.toggle(ColumnKey::Jersey);
    assert_eq!(names(&table.sorted_rows(&rows)), ["ada", "Cy", "Bo", "Dee"]);

    table.toggle(ColumnKey::Jersey);
    assert_eq!(names(&table.sorted_rows(&rows)), ["Dee", "Cy", "Bo", "ada"]);
}

#[test]
fn test_toggle_unknown_column_is_ignored() {
    let mut table = SortableTable::new(games_columns());
    assert!(!table.toggle(ColumnKey::Jersey));
    assert_eq!(*table.sort(), SortState::new());
}

#[test]
fn test_format_players_with_cli_sort() {
    let display = DisplayConfig::from_use_unicode(false);
    let sort = sort_from_args(Some("name".parse().unwrap()), true);
    let output = format_players(&roster(), sort, &display).unwrap();
    let ada = output.find("ada").unwrap();
    let dee = output.find("Dee").unwrap();
    assert!(ada < dee);
    assert!(output.contains("Name▲"));
}

#[test]
fn test_format_games_rejects_roster_column() {
    let games = vec![Game {
        id: 1,
        date: "2025-01-10".into(),
        opponent: "Rivals".into(),
        location: Some("Home".into()),
    }];
    let display = DisplayConfig::default();
    let err = format_games(&games, sort_from_args(Some(ColumnKey::Jersey), false), &display).unwrap_err();
    assert!(err.to_string().contains("jersey"));
}

#[test]
fn test_config_parse_overrides_defaults() {
    let config = config::parse(
        r#"
        api_base_url = "http://stats.local:9000/"
        leaders_limit = 3

        [display]
        use_unicode = false
        "#,
    );
    assert_eq!(config.leaders_limit, 3);
    assert!(!config.display.use_unicode);
    assert_eq!(config.display.box_chars.horizontal, "-");
}
