use pairs_core as game;
use serde::{Deserialize, Serialize};

use crate::utils::*;

/// Best score kept in the browser's local storage.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalBestScore;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
struct StoredBestScore(u32);

impl StorageKey for StoredBestScore {
    const KEY: &'static str = "pairs:best-score";
}

impl game::BestScoreStore for LocalBestScore {
    fn read_best_score(&self) -> Option<u32> {
        local_load::<StoredBestScore>().map(|StoredBestScore(clicks)| clicks)
    }

    fn write_best_score(&mut self, clicks: u32) -> game::Result<()> {
        local_save(&StoredBestScore(clicks)).map_err(|err| game::GameError::Storage(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_uses_project_namespace() {
        assert_eq!(<StoredBestScore as StorageKey>::KEY, "pairs:best-score");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use game::BestScoreStore;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn best_score_round_trips_through_local_storage() {
        let mut store = LocalBestScore;
        store.write_best_score(24).unwrap();
        assert_eq!(store.read_best_score(), Some(24));
    }
}
