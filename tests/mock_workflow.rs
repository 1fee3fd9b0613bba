#![cfg(feature = "development")]

use hoops::commands::auth::login;
use hoops::commands::stats::StatEntry;
use hoops::commands::{games, players, stats, users};
use hoops::data_provider::{load_box_score, StatsProvider};
use hoops::dev::{MockClient, MOCK_PASSWORD};
use hoops::session::{Session, SessionStore};
use hoops::types::{NewPlayer, NewUser, Role};

fn temp_store(name: &str) -> SessionStore {
    SessionStore::new(
        std::env::temp_dir()
            .join(format!("hoops-it-{}-{}", name, std::process::id()))
            .join("session.toml"),
    )
}

#[tokio::test]
async fn test_admin_enters_stats_for_new_player() {
    let client = MockClient::logged_out();
    let store = temp_store("admin");
    let session = login(&client, &store, "admin", MOCK_PASSWORD).await.unwrap();
    assert_eq!(session.role, Some(Role::Admin));

    let before = client.players().await.unwrap().len();
    players::add(
        &client,
        &session,
        NewPlayer { name: "Gus Hale".into(), jersey_number: Some(9), position: Some("G".into()) },
    )
    .await
    .unwrap();
    let roster = client.players().await.unwrap();
    assert_eq!(roster.len(), before + 1);
    let gus = roster.iter().find(|p| p.name == "Gus Hale").unwrap();

    let entry = StatEntry {
        minutes: Some("12:30".into()),
        points: 7,
        fg: 3,
        fga: 6,
        fg3: 1,
        fga3: 2,
        ..Default::default()
    };
    stats::set(&client, &session, 1, gus.id, &entry).await.unwrap();

    let box_score = load_box_score(&client, 1).await.unwrap();
    let line = box_score.stat_lines.iter().find(|l| l.player_id == gus.id).unwrap();
    assert_eq!(line.points, 7);
    assert_eq!(line.minutes, 12.5);

    store.clear().unwrap();
}

#[tokio::test]
async fn test_viewer_cannot_mutate() {
    let client = MockClient::logged_out();
    let store = temp_store("viewer");
    let session = login(&client, &store, "coach", MOCK_PASSWORD).await.unwrap();
    assert_eq!(session.role, Some(Role::Viewer));

    let err = games::add(&client, &session, "2025-03-01", "Owls", false).await.unwrap_err();
    assert!(err.to_string().to_lowercase().contains("admin"));
    assert_eq!(client.games().await.unwrap().len(), 5);

    store.clear().unwrap();
}

#[tokio::test]
async fn test_mutations_require_login() {
    let client = MockClient::logged_out();
    let err = players::remove(&client, &Session::default(), 1).await.unwrap_err();
    assert!(!err.to_string().is_empty());
    assert_eq!(client.players().await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_admin_creates_user_who_can_log_in() {
    let client = MockClient::logged_out();
    let store = temp_store("users");
    let admin = login(&client, &store, "admin", MOCK_PASSWORD).await.unwrap();

    let scorer = NewUser {
        username: "scorer".into(),
        password: "courtside".into(),
        role: Role::Admin,
    };
    let id = users::add(&client, &admin, scorer.clone()).await.unwrap();
    assert!(id > 1);

    let err = users::add(&client, &admin, scorer).await.unwrap_err();
    assert_eq!(err.to_string(), "Username 'scorer' already exists");

    let session = login(&client, &store, "scorer", "courtside").await.unwrap();
    assert_eq!(session.role, Some(Role::Admin));

    store.clear().unwrap();
}

#[tokio::test]
async fn test_viewer_cannot_create_users() {
    let client = MockClient::logged_out();
    let store = temp_store("users-viewer");
    let viewer = login(&client, &store, "coach", MOCK_PASSWORD).await.unwrap();

    let user = NewUser {
        username: "intruder".into(),
        password: "pw".into(),
        role: Role::Admin,
    };
    let err = users::add(&client, &viewer, user.clone()).await.unwrap_err();
    assert!(err.to_string().contains("Admin permission required"));

    // The server refuses too, even when the local role check is bypassed
    assert!(matches!(
        client.create_user(&user).await,
        Err(hoops::client::ApiError::Forbidden)
    ));
    assert!(client.login("intruder", "pw").await.is_err());

    store.clear().unwrap();
}
