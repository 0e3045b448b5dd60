//! Print the argon2 hash of an API key for use in `API_KEY_HASHES`.
//!
//! Usage: `hash-api-key <key>`

use anyhow::{bail, Context};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(api_key) = args.next() else {
        bail!("usage: hash-api-key <key>");
    };
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    let hash = salonbook::middleware::hash_api_key(&api_key).context("Failed to hash API key")?;
    println!("{}", hash);
    Ok(())
}
