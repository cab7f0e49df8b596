//! Integration tests for the record collaborators: users.ini round-trips,
//! map listing/deletion, the favorites key-set, the webhook registry, and
//! webhook delivery filtering.

use std::fs;

use hlds_console::models::{AdminEntry, WebhookEvent};
use hlds_console::records::webhooks::EVENT_VOCABULARY;
use hlds_console::records::{admins, maps, FavoriteMaps, WebhookRegistry};

fn install_root() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("cstrike/addons/amxmodx/configs")).unwrap();
    fs::create_dir_all(dir.path().join("cstrike/maps")).unwrap();
    fs::write(admins::users_ini_path(dir.path()), "; users.ini\n").unwrap();
    dir
}

fn entry(name: Option<&str>, auth: &str) -> AdminEntry {
    AdminEntry {
        name: name.map(String::from),
        auth: auth.to_string(),
        password: "secret".to_string(),
        access: "abcdefghijklmnopqrstu".to_string(),
        flags: "a".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Admins
// ---------------------------------------------------------------------------

#[test]
fn admins_round_trip_through_users_ini() {
    let root = install_root();

    admins::add_admin(root.path(), &entry(Some("Alice"), "STEAM_0:1:111")).unwrap();
    admins::add_admin(root.path(), &entry(None, "STEAM_0:1:222")).unwrap();

    let listed = admins::list_admins(root.path()).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name.as_deref(), Some("Alice"));
    assert_eq!(listed[0].auth, "STEAM_0:1:111");
    assert_eq!(listed[1].name, None);
    assert_eq!(listed[1].flags, "a");
}

#[test]
fn updating_an_admin_replaces_entry_and_name_comment() {
    let root = install_root();
    admins::add_admin(root.path(), &entry(Some("Alice"), "STEAM_0:1:111")).unwrap();

    let mut updated = entry(Some("Alice the Second"), "STEAM_0:1:111");
    updated.flags = "b".to_string();
    admins::update_admin(root.path(), &updated).unwrap();

    let listed = admins::list_admins(root.path()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name.as_deref(), Some("Alice the Second"));
    assert_eq!(listed[0].flags, "b");
}

#[test]
fn removing_an_admin_drops_entry_and_name_comment() {
    let root = install_root();
    admins::add_admin(root.path(), &entry(Some("Alice"), "STEAM_0:1:111")).unwrap();
    admins::add_admin(root.path(), &entry(Some("Bob"), "STEAM_0:1:222")).unwrap();

    admins::remove_admin(root.path(), "STEAM_0:1:111").unwrap();

    let listed = admins::list_admins(root.path()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name.as_deref(), Some("Bob"));

    let raw = fs::read_to_string(admins::users_ini_path(root.path())).unwrap();
    assert!(!raw.contains("Alice"));
    // Unrelated comment lines survive rewrites.
    assert!(raw.contains("; users.ini"));
}

// ---------------------------------------------------------------------------
// Maps and favorites
// ---------------------------------------------------------------------------

#[test]
fn map_listing_only_reports_bsp_stems_sorted() {
    let root = install_root();
    let maps_dir = root.path().join("cstrike/maps");
    fs::write(maps_dir.join("de_dust2.bsp"), b"bsp").unwrap();
    fs::write(maps_dir.join("de_dust2.txt"), b"notes").unwrap();
    fs::write(maps_dir.join("cs_assault.bsp"), b"bsp").unwrap();

    let listed = maps::list_maps(root.path()).unwrap();
    assert_eq!(listed, vec!["cs_assault", "de_dust2"]);
}

#[test]
fn deleting_a_map_removes_every_file_sharing_the_stem() {
    let root = install_root();
    let maps_dir = root.path().join("cstrike/maps");
    fs::write(maps_dir.join("de_dust2.bsp"), b"bsp").unwrap();
    fs::write(maps_dir.join("de_dust2.txt"), b"notes").unwrap();
    fs::write(maps_dir.join("cs_assault.bsp"), b"bsp").unwrap();

    assert!(maps::delete_map_files(root.path(), "de_dust2").unwrap());
    assert!(!maps_dir.join("de_dust2.bsp").exists());
    assert!(!maps_dir.join("de_dust2.txt").exists());
    assert!(maps_dir.join("cs_assault.bsp").exists());

    // Nothing left to delete the second time.
    assert!(!maps::delete_map_files(root.path(), "de_dust2").unwrap());
}

#[test]
fn favorites_are_a_persistent_key_set() {
    let dir = tempfile::TempDir::new().unwrap();

    let mut favorites = FavoriteMaps::load(dir.path());
    assert!(!favorites.contains("de_dust2"));

    assert!(favorites.toggle("de_dust2").unwrap());
    assert!(favorites.contains("de_dust2"));

    // Reload from disk: the set survives.
    let mut favorites = FavoriteMaps::load(dir.path());
    assert!(favorites.contains("de_dust2"));

    assert!(!favorites.toggle("de_dust2").unwrap());
    assert!(!favorites.contains("de_dust2"));
}

// ---------------------------------------------------------------------------
// Webhook registry and delivery
// ---------------------------------------------------------------------------

#[test]
fn registry_validates_event_names_against_the_vocabulary() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = WebhookRegistry::new(dir.path());

    assert!(registry.list().is_empty());

    registry
        .add(
            "https://example.com/hook".to_string(),
            vec!["server_started".to_string(), "knife_kill".to_string()],
        )
        .unwrap();
    assert_eq!(registry.list().len(), 1);

    let err = registry
        .add(
            "https://example.com/hook2".to_string(),
            vec!["server_rebooted".to_string()],
        )
        .unwrap_err();
    assert!(err.to_string().contains("server_rebooted"));
    assert_eq!(registry.list().len(), 1);

    registry.remove("https://example.com/hook").unwrap();
    assert!(registry.list().is_empty());
}

#[test]
fn vocabulary_covers_all_emitted_events() {
    for event in [
        WebhookEvent::ServerStarted,
        WebhookEvent::ServerStopped,
        WebhookEvent::ErrorOccurred,
        WebhookEvent::MapAdded("x".into()),
        WebhookEvent::MapDeleted("x".into()),
        WebhookEvent::MapChanged("x".into()),
        WebhookEvent::Custom {
            title: "t".into(),
            message: "m".into(),
        },
        WebhookEvent::KnifeKill {
            killer_id: "1".into(),
            killer_name: "a".into(),
            victim_id: "2".into(),
            victim_name: "b".into(),
            killer_score: 1,
            victim_score: 0,
        },
    ] {
        assert!(EVENT_VOCABULARY.contains(&event.name()));
    }
}

#[tokio::test]
async fn delivery_only_targets_hooks_subscribed_to_the_event() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = WebhookRegistry::new(dir.path());

    let mut server = mockito::Server::new_async().await;
    let subscribed = server
        .mock("POST", "/subscribed")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let other = server
        .mock("POST", "/other")
        .with_status(204)
        .expect(0)
        .create_async()
        .await;

    registry
        .add(
            format!("{}/subscribed", server.url()),
            vec!["server_started".to_string()],
        )
        .unwrap();
    registry
        .add(
            format!("{}/other", server.url()),
            vec!["map_deleted".to_string()],
        )
        .unwrap();

    registry.emit(&WebhookEvent::ServerStarted).await;

    subscribed.assert_async().await;
    other.assert_async().await;
}

#[tokio::test]
async fn failed_delivery_is_swallowed() {
    let dir = tempfile::TempDir::new().unwrap();
    let registry = WebhookRegistry::new(dir.path());

    registry
        .add(
            // Nothing listens here; delivery fails and must not panic.
            "http://127.0.0.1:9/refused".to_string(),
            vec!["server_stopped".to_string()],
        )
        .unwrap();

    registry.emit(&WebhookEvent::ServerStopped).await;
}
