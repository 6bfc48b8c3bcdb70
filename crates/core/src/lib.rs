//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod characters;
pub mod config;
pub mod deck;
pub mod distance;
pub mod event_cards;
pub mod events;
pub mod game;
pub mod pending;
pub mod player;
pub mod rng;
pub mod session;
pub mod table;
pub mod view;

pub use cards::*;
pub use catalog::CardSpec;
pub use characters::*;
pub use config::*;
pub use deck::*;
pub use event_cards::*;
pub use events::*;
pub use game::*;
pub use pending::*;
pub use player::*;
pub use rng::*;
pub use session::*;
pub use table::*;
pub use view::*;
