//! sea-orm entities for the FriendlyTask database.

pub mod comments;
pub mod likes;
pub mod tasks;
pub mod tips;
pub mod users;
