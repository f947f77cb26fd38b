//! Helpers for in-memory values: shuffling and deep copies.

use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

/// Shuffle `items` in place using the thread-local generator.
pub fn shuffle<T>(items: &mut [T]) {
    shuffle_with(items, &mut rand::thread_rng());
}

/// Shuffle `items` in place (Fisher-Yates) with the given generator.
pub fn shuffle_with<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Copy a value through its JSON representation.
///
/// Values JSON cannot represent, such as NaN, fail instead of coming back
/// altered.
pub fn deep_clone<T>(value: &T) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    serde_json::from_value(serde_json::to_value(value)?)
}
