//! Objects managed by the scene

mod enemy;
mod parallax;
mod player;
mod trail;

pub use enemy::Enemy;
pub use parallax::ParallaxLayer;
pub use player::Player;
pub use trail::Trail;
