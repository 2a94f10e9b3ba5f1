//! Typed accessors for the persisted login keys.

use serde::{Deserialize, Serialize};

use super::{
    now_millis, KeyValueStore, KeyValueStoreExt, StorageError, FORCE_LOGOUT, TOKEN,
    TOKEN_EXPIRATION, USER_DETAILS,
};

/// Profile of the logged-in user, persisted under `userDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserDetails {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

pub fn token(store: &dyn KeyValueStore) -> Option<String> {
    store.get_item::<String>(TOKEN).filter(|t| !t.is_empty())
}

pub fn user_details(store: &dyn KeyValueStore) -> Option<UserDetails> {
    store.get_item(USER_DETAILS)
}

/// Username of the logged-in user, if any.
pub fn username(store: &dyn KeyValueStore) -> Option<String> {
    user_details(store)
        .map(|d| d.username)
        .filter(|u| !u.is_empty())
}

/// A token is present and has not expired.
pub fn is_logged_in(store: &dyn KeyValueStore) -> bool {
    let expiration: Option<i64> = store.get_item(TOKEN_EXPIRATION);
    token(store).is_some() && expiration.is_some_and(|exp| exp > now_millis())
}

pub fn is_force_logout(store: &dyn KeyValueStore) -> bool {
    store.get_item::<bool>(FORCE_LOGOUT).unwrap_or(false)
}

pub fn set_force_logout(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.set_item(FORCE_LOGOUT, &true)
}

pub fn clear_force_logout(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.remove(FORCE_LOGOUT)
}

pub fn persist_login(
    store: &dyn KeyValueStore,
    token: &str,
    expiration_millis: i64,
    details: &UserDetails,
) -> Result<(), StorageError> {
    store.set_item(TOKEN, token)?;
    store.set_item(TOKEN_EXPIRATION, &expiration_millis)?;
    store.set_item(USER_DETAILS, details)
}

/// Remove all persisted login state.
pub fn clear_session(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.clear()
}
