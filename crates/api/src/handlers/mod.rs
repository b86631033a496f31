pub mod answers;
pub mod home;
pub mod lists;
pub mod profiles;
pub mod questions;
pub mod tags;
pub mod users;
pub mod votes;
