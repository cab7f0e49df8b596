//! Keyed-record collaborators: admin entries, map files and favorites,
//! webhook registrations, and the knife scoreboard.
//!
//! These are simple stores with explicit load/save contracts; the console
//! core only observes and emits the shapes defined in `models`.

pub mod admins;
pub mod knife_scores;
pub mod maps;
pub mod webhooks;

pub use knife_scores::KnifeScoreboard;
pub use maps::FavoriteMaps;
pub use webhooks::WebhookRegistry;
