//! RngSeed - доменный seed для перемешивания колоды.
//!
//! Seed раздачи получается ключевым хэшем:
//!     seed = H(domain || server_seed || client_seed || table_id || hand_id)
//! где server seed выступает ключом, а всё остальное – контекстом.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{HandId, TableId};
use crate::infra::rng::DeterministicRng;

const SHUFFLE_DOMAIN: &[u8] = b"HOLDEM_TABLE_SHUFFLE_V1";

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed конкретной раздачи. Длины полей входят в хэш,
    /// чтобы разные пары (server, client) не склеивались в один вход.
    pub fn for_hand(
        server_seed: &[u8; 32],
        client_seed: &str,
        table_id: TableId,
        hand_id: HandId,
    ) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(SHUFFLE_DOMAIN);
        hasher.update((server_seed.len() as u64).to_le_bytes());
        hasher.update(server_seed);
        hasher.update((client_seed.len() as u64).to_le_bytes());
        hasher.update(client_seed.as_bytes());
        hasher.update(table_id.to_le_bytes());
        hasher.update(hand_id.to_le_bytes());

        Self {
            bytes: hasher.finalize().into(),
        }
    }

    /// Создать DeterministicRng из seed.
    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
