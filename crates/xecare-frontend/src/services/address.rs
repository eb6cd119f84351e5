//! # Address Validation
//!
//! Debounced server-side address validation for the garage forms, with a
//! memoization cache keyed by the normalized address so unchanged input
//! never re-hits the network. Programmatic updates (map pick, autofill)
//! bypass the settle window with `force_immediate`.

use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::{self, AddressCheck};

/// Settle window for keystroke-driven validation.
const DEBOUNCE_MS: u32 = 600;

/// Form-owned address validator.
#[derive(Clone, Copy)]
pub struct AddressValidator {
    cache: StoredValue<HashMap<String, AddressCheck>>,
    pending: StoredValue<Option<Timeout>, LocalStorage>,
    pub result: RwSignal<Option<AddressCheck>>,
    pub validating: RwSignal<bool>,
}

impl AddressValidator {
    pub fn new() -> Self {
        Self {
            cache: StoredValue::new(HashMap::new()),
            pending: StoredValue::new_local(None),
            result: RwSignal::new(None),
            validating: RwSignal::new(false),
        }
    }

    /// Validate `address`, debounced unless `force_immediate`.
    ///
    /// A repeat of an already-validated address resolves from the cache
    /// without scheduling anything.
    pub fn request(&self, address: &str, force_immediate: bool) {
        // Any newer input supersedes a scheduled validation.
        self.pending.set_value(None);

        let normalized = normalize_address(address);
        if normalized.is_empty() {
            self.result.set(None);
            return;
        }

        if let Some(hit) = self.cache.with_value(|c| c.get(&normalized).cloned()) {
            self.result.set(Some(hit));
            return;
        }

        let validator = *self;
        if force_immediate {
            validator.run(normalized);
        } else {
            let timeout = Timeout::new(DEBOUNCE_MS, move || validator.run(normalized));
            self.pending.set_value(Some(timeout));
        }
    }

    fn run(self, normalized: String) {
        self.validating.set(true);
        spawn_local(async move {
            match api::validate_address(&normalized).await {
                Ok(check) => {
                    self.cache
                        .update_value(|c| drop(c.insert(normalized, check.clone())));
                    self.result.set(Some(check));
                }
                Err(err) => {
                    log::warn!("address validation failed: {err}");
                    self.result.set(None);
                }
            }
            self.validating.set(false);
        });
    }
}

impl Default for AddressValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalization used as the cache key: trimmed, lowercased, inner
/// whitespace collapsed.
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_whitespace_and_case() {
        assert_eq!(
            normalize_address("  215  Nguyen   Trai, HANOI "),
            "215 nguyen trai, hanoi"
        );
        assert_eq!(normalize_address("\t\n"), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_address("12 Pho Hue,   Hai Ba Trung");
        assert_eq!(normalize_address(&once), once);
    }
}
