pub mod actors;
pub mod movies;
pub mod ratings;
pub mod users;

pub use actors::ActorService;
pub use movies::MovieService;
pub use ratings::{RatingService, RatingWithMovie};
pub use users::UserService;
