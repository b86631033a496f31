//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod answer_repo;
pub mod profile_repo;
pub mod question_list_repo;
pub mod question_repo;
pub mod question_view_repo;
pub mod reputation_repo;
pub mod tag_repo;
pub mod user_repo;
pub mod vote_repo;

pub use answer_repo::AnswerRepo;
pub use profile_repo::ProfileRepo;
pub use question_list_repo::QuestionListRepo;
pub use question_repo::QuestionRepo;
pub use question_view_repo::QuestionViewRepo;
pub use reputation_repo::ReputationRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
