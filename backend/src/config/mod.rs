//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret and password hashing cost.

use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use std::env;

/// bcrypt accepts cost factors in this range.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_ttl = parse_jwt_ttl(
            &env::var("JWT_EXPIRES_IN_SECONDS").unwrap_or_else(|_| "60".to_string()),
        )?;

        let bcrypt_cost = parse_bcrypt_cost(
            &env::var("BCRYPT_COST").unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string()),
        )?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_ttl,
            bcrypt_cost,
            server_port,
        })
    }
}

/// Parses `JWT_EXPIRES_IN_SECONDS`.
///
/// The TTL must be positive, and a token issued now must have a representable
/// expiry timestamp.
pub fn parse_jwt_ttl(raw: &str) -> Result<Duration> {
    let seconds = raw
        .trim()
        .parse::<u64>()
        .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
    if seconds == 0 {
        bail!("JWT_EXPIRES_IN_SECONDS must be greater than zero");
    }

    let ttl = i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some());

    match ttl {
        Some(ttl) => Ok(ttl),
        None => bail!("JWT_EXPIRES_IN_SECONDS is out of range: {}", seconds),
    }
}

/// Parses `BCRYPT_COST`, rejecting values bcrypt would refuse at hash time.
pub fn parse_bcrypt_cost(raw: &str) -> Result<u32> {
    let cost = raw
        .trim()
        .parse::<u32>()
        .context("BCRYPT_COST must be a valid number")?;
    if !BCRYPT_COST_RANGE.contains(&cost) {
        bail!(
            "BCRYPT_COST must be between {} and {}, got {}",
            BCRYPT_COST_RANGE.start(),
            BCRYPT_COST_RANGE.end(),
            cost
        );
    }
    Ok(cost)
}
