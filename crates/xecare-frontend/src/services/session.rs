//! # Session Persistence
//!
//! Keeps the auth token in browser local storage and restores the signed-in
//! profile on startup.

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::state::AppState;

const TOKEN_KEY: &str = "xecare.token";

/// Persist a fresh session after login/registration.
pub fn establish(state: &AppState, token: String, user: xecare_domain::UserProfile) {
    if let Err(err) = LocalStorage::set(TOKEN_KEY, &token) {
        log::warn!("failed to persist session token: {err}");
    }
    state.auth_token.set(Some(token));
    state.current_user.set(Some(user));
}

/// Drop the session everywhere.
pub fn clear(state: &AppState) {
    LocalStorage::delete(TOKEN_KEY);
    state.auth_token.set(None);
    state.current_user.set(None);
}

/// Restore a persisted session on startup, re-fetching the profile.
pub fn restore(state: &AppState) {
    let Ok(token) = LocalStorage::get::<String>(TOKEN_KEY) else {
        return;
    };
    state.auth_token.set(Some(token.clone()));

    let state = *state;
    spawn_local(async move {
        match api::fetch_profile(&token).await {
            Ok(user) => state.current_user.set(Some(user)),
            Err(err) => {
                log::warn!("stored session rejected: {err}");
                clear(&state);
            }
        }
    });
}
