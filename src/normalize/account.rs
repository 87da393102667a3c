use super::{decode, null_as_default};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GitHub user or organization identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
}

#[derive(Deserialize)]
struct RawAccount {
    id: u64,
    login: String,
    avatar_url: String,
}

pub fn normalize_account(value: &Value) -> Result<Account> {
    let raw: RawAccount = decode(value, "account")?;
    Ok(Account {
        id: raw.id,
        login: raw.login,
        avatar_url: raw.avatar_url,
    })
}

/// Account profile as returned by `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDetails {
    pub account: Account,
    pub followers: u64,
    pub following: u64,
}

#[derive(Deserialize)]
struct RawAccountCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    followers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    following: u64,
}

pub fn normalize_account_details(value: &Value) -> Result<AccountDetails> {
    let account = normalize_account(value)?;
    let counts: RawAccountCounts = decode(value, "account")?;
    Ok(AccountDetails {
        account,
        followers: counts.followers,
        following: counts.following,
    })
}

/// One page of `GET /search/users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSearchResults {
    pub total_count: u64,
    pub items: Vec<Account>,
}

#[derive(Deserialize)]
struct RawSearchResults {
    total_count: u64,
    items: Vec<Value>,
}

pub fn normalize_account_search(value: &Value) -> Result<AccountSearchResults> {
    let raw: RawSearchResults = decode(value, "account search")?;
    let items = raw
        .items
        .iter()
        .map(normalize_account)
        .collect::<Result<Vec<_>>>()?;
    Ok(AccountSearchResults {
        total_count: raw.total_count,
        items,
    })
}
