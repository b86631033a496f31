use std::fmt::Display;
use std::str::FromStr;

use quanda_core::reputation::{
    ReputationConfig, DEFAULT_ANSWER_VOTED_DOWN, DEFAULT_ANSWER_VOTED_UP,
    DEFAULT_QUESTION_VOTED_DOWN, DEFAULT_QUESTION_VOTED_UP, DEFAULT_VOTE_ANSWER_DOWN_REP,
    DEFAULT_VOTE_ANSWER_UP_REP, DEFAULT_VOTE_QUESTION_DOWN_REP, DEFAULT_VOTE_QUESTION_UP_REP,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` and the JWT secret has a default
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Allowed CORS origins, from the comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Reputation bonuses and voting thresholds.
    pub reputation: ReputationConfig,
}

impl ServerConfig {
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `DATABASE_URL`         | required                |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    ///
    /// See [`JwtConfig::from_env`] and [`reputation_from_env`] for the rest.
    ///
    /// # Panics
    ///
    /// Panics on a missing required variable or an unparsable value.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 3000),
            database_url,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            reputation: reputation_from_env(),
        }
    }
}

/// Load the eight reputation knobs.
///
/// | Env Var                  | Default |
/// |--------------------------|---------|
/// | `QUESTION_VOTED_UP`      | `10`    |
/// | `QUESTION_VOTED_DOWN`    | `5`     |
/// | `ANSWER_VOTED_UP`        | `10`    |
/// | `ANSWER_VOTED_DOWN`      | `5`     |
/// | `VOTE_QUESTION_UP_REP`   | `20`    |
/// | `VOTE_QUESTION_DOWN_REP` | `100`   |
/// | `VOTE_ANSWER_UP_REP`     | `20`    |
/// | `VOTE_ANSWER_DOWN_REP`   | `100`   |
///
/// Values may be negative; a negative `*_VOTED_DOWN` makes down-votes cost
/// reputation.
pub fn reputation_from_env() -> ReputationConfig {
    ReputationConfig {
        question_voted_up: env_or("QUESTION_VOTED_UP", DEFAULT_QUESTION_VOTED_UP),
        question_voted_down: env_or("QUESTION_VOTED_DOWN", DEFAULT_QUESTION_VOTED_DOWN),
        answer_voted_up: env_or("ANSWER_VOTED_UP", DEFAULT_ANSWER_VOTED_UP),
        answer_voted_down: env_or("ANSWER_VOTED_DOWN", DEFAULT_ANSWER_VOTED_DOWN),
        vote_question_up_rep: env_or("VOTE_QUESTION_UP_REP", DEFAULT_VOTE_QUESTION_UP_REP),
        vote_question_down_rep: env_or("VOTE_QUESTION_DOWN_REP", DEFAULT_VOTE_QUESTION_DOWN_REP),
        vote_answer_up_rep: env_or("VOTE_ANSWER_UP_REP", DEFAULT_VOTE_ANSWER_UP_REP),
        vote_answer_down_rep: env_or("VOTE_ANSWER_DOWN_REP", DEFAULT_VOTE_ANSWER_DOWN_REP),
    }
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => parse_setting(name, &raw),
        Err(_) => default,
    }
}

fn parse_setting<T>(name: &str, raw: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .unwrap_or_else(|e| panic!("{name} has invalid value '{raw}': {e}"))
}
