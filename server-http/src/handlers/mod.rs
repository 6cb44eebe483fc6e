pub mod football;
pub mod health;
pub mod image;
pub mod nfl;

pub use football::{live_scores, players, squad, standings, teams};
pub use health::health_check;
pub use image::proxy_image;
pub use nfl::{nfl_players, nfl_scores};
