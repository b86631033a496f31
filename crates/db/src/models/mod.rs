//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs, validated with `validator` where they carry
//!   free text

pub mod answer;
pub mod profile;
pub mod question;
pub mod question_list;
pub mod tag;
pub mod user;
pub mod vote;
