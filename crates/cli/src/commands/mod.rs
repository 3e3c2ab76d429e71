//! CLI subcommands.

pub mod migrate;
pub mod user;

use secrecy::SecretString;

/// Primary database URL variable; `DATABASE_URL` is the fallback.
pub const DATABASE_URL_VAR: &str = "BOOKING_DATABASE_URL";

/// Read the database URL from the environment (after loading `.env`).
fn database_url() -> Option<SecretString> {
    dotenvy::dotenv().ok();
    std::env::var(DATABASE_URL_VAR)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
