use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Local storage slot a value is persisted under.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Reads the stored value, `None` when missing or unreadable.
pub(crate) fn local_load<T>() -> Option<T>
where
    T: StorageKey + DeserializeOwned,
{
    match LocalStorage::get(T::KEY) {
        Ok(value) => Some(value),
        Err(StorageError::KeyNotFound(_)) => None,
        Err(err) => {
            log::warn!("failed to read {}: {}", T::KEY, err);
            None
        }
    }
}

pub(crate) fn local_save<T>(value: &T) -> Result<(), StorageError>
where
    T: StorageKey + Serialize,
{
    LocalStorage::set(T::KEY, value)
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}
