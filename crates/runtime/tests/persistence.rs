use stats_core::{AppData, MatchId, MatchReport, Player, Roster};
use stats_runtime::{FileStore, InMemoryStore, StoreReader, StoreWriter, Tracker};
use tempfile::TempDir;

/// A season's worth of state touching every field of the data model.
fn season() -> AppData {
    let mut data = AppData::new();
    for name in ["ace", "bolt", "cid", "dex"] {
        data.add_player(Player::new(name)).unwrap();
    }
    data.add_roster(Roster::new("teamA").with_players(["ace", "bolt"]))
        .unwrap();
    data.add_roster(Roster::new("teamB").with_players(["cid", "dex", "ace"]))
        .unwrap();

    data.record(MatchReport::new("teamA", 13, 7, "mapX").with_mvp("bolt"))
        .unwrap();
    data.record_match("teamB", 9, 13, "mapY").unwrap();
    data.record_match("teamA", 12, 12, "mapZ").unwrap();

    // Membership edits after matches were played.
    data.remove_player("dex").unwrap();
    data.unassign_player("teamA", "bolt").unwrap();
    data.record_match("teamA", 16, 3, "mapX").unwrap();
    data
}

#[test]
fn round_trip_through_file_store() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().join("app_data.json"));
    let data = season();

    store.write(&data).unwrap();
    let loaded = store.read().unwrap();

    assert_eq!(loaded, data);

    let players: Vec<_> = loaded.players().map(Player::username).collect();
    assert_eq!(players, ["ace", "bolt", "cid"]);
    assert_eq!(loaded.roster("teamA").unwrap().players(), ["ace".to_string()]);

    // Removed player survives in the snapshot of the match they played.
    let second = loaded.match_by_id(MatchId(2)).unwrap();
    let snapshot: Vec<_> = second.players().iter().map(Player::username).collect();
    assert_eq!(snapshot, ["cid", "dex", "ace"]);
    assert_eq!(loaded.next_match_id(), Some(MatchId(5)));
}

#[test]
fn write_is_idempotent() {
    let store = InMemoryStore::new();
    let data = season();

    store.write(&data).unwrap();
    let first = store.document().unwrap().unwrap();
    store.write(&data).unwrap();
    let second = store.document().unwrap().unwrap();

    assert_eq!(first, second);
}

#[test]
fn recorded_counters_survive_reload() {
    let store = InMemoryStore::new();
    store.write(&season()).unwrap();
    let mut data = store.read().unwrap();

    let record = data.record_match("teamB", 13, 4, "mapQ").unwrap();
    assert_eq!(record.id(), MatchId(5));

    let ace = data.player("ace").unwrap();
    assert_eq!(ace.games_played(), 5);
    assert_eq!((ace.wins(), ace.losses(), ace.ties()), (3, 1, 1));
    assert!(data.history_divergences().is_empty());
}

#[test]
fn dangling_member_fails_load_and_keeps_session() {
    let text = r#"{
        "players": [
            { "username": "ace", "games_played": 0, "wins": 0, "losses": 0,
              "most_valuable_player_awards": 0 }
        ],
        "rosters": [
            { "id": "teamA", "players": ["ace", "ghost"], "games_played": 0,
              "rounds_played": 0, "wins": 0, "losses": 0 }
        ],
        "matches": []
    }"#;

    let mut tracker = Tracker::with_data(InMemoryStore::with_document(text), season());
    let before = tracker.data().clone();

    let err = tracker.load().unwrap_err();
    assert!(err.is_consistency());
    assert_eq!(tracker.data(), &before);
}

#[test]
fn impossible_record_fails_load() {
    let text = r#"{
        "players": [
            { "username": "ace", "games_played": 1, "wins": 1, "losses": 1,
              "most_valuable_player_awards": 0 }
        ],
        "rosters": [],
        "matches": []
    }"#;

    let err = InMemoryStore::with_document(text).read().unwrap_err();
    assert!(err.is_consistency());
}

#[test]
fn file_session_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("app_data.json");

    let mut tracker = Tracker::new(FileStore::new(&path));
    assert!(!tracker.load_or_default().unwrap());

    tracker.data_mut().add_player(Player::new("ace")).unwrap();
    tracker
        .data_mut()
        .add_roster(Roster::new("teamA").with_players(["ace"]))
        .unwrap();
    tracker
        .data_mut()
        .record_match("teamA", 13, 7, "mapX")
        .unwrap();
    tracker.save().unwrap();

    let mut reopened = Tracker::new(FileStore::new(&path));
    assert!(reopened.load_or_default().unwrap());
    assert_eq!(reopened.data(), tracker.data());
    assert_eq!(reopened.data().roster("teamA").unwrap().rounds_played(), 20);
}
