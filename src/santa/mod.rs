pub mod draw;
pub mod message;
pub mod roster;

pub use draw::{Assignment, Assignments, SecretSanta};
pub use message::{compose_message, Message};
pub use roster::Roster;
