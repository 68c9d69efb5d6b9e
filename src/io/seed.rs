use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::io::Read;

use crate::domain::{Friend, parse_cents};

/// One entry of a JSON seed file. Balances are decimal strings ("-7.00").
#[derive(Debug, Clone, Deserialize)]
pub struct SeedFriend {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub balance: Option<String>,
}

/// Load the initial friend list from JSON.
///
/// ```json
/// [{ "name": "Clark", "image": "https://i.pravatar.cc/48?u=1", "balance": "-7" }]
/// ```
pub fn load_seed<R: Read>(reader: R) -> Result<Vec<Friend>> {
    let entries: Vec<SeedFriend> =
        serde_json::from_reader(reader).context("Seed file is not a valid JSON friend list")?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| seed_friend(index, entry))
        .collect()
}

fn seed_friend(index: usize, entry: SeedFriend) -> Result<Friend> {
    let name = entry.name.trim();
    let image = entry.image.trim();
    if name.is_empty() {
        bail!("Seed entry {}: name must not be empty", index);
    }
    if image.is_empty() {
        bail!("Seed entry {} ({}): image must not be empty", index, name);
    }

    let balance = match entry.balance.as_deref() {
        Some(raw) => parse_cents(raw)
            .with_context(|| format!("Seed entry {} ({}): invalid balance", index, name))?,
        None => 0,
    };

    Ok(Friend::new(name, image).with_balance(balance))
}
