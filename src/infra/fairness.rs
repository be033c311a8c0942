//! Provably-fair раздача по схеме commit–reveal.
//!
//! 1. До раздачи сервер выбирает `ServerSeed` и публикует его хэш (`Commitment`).
//! 2. Игроки дают `client_seed`.
//! 3. Колода перемешивается RNG из `RngSeed::for_hand(server, client, table, hand)`.
//! 4. После раздачи server seed раскрывается в `FairnessProof`; любой может
//!    проверить хэш и восстановить порядок колоды.

use core::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{Deck, HandId, TableId};
use crate::infra::rng::DeterministicRng;
use crate::infra::rng_seed::RngSeed;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Секретный seed сервера. Раскрывается только после раздачи.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSeed(pub [u8; 32]);

impl ServerSeed {
    /// Новый seed из криптостойкого RNG ОС.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn commitment(&self) -> Commitment {
        Commitment(Sha256::digest(self.0).into())
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl fmt::Debug for ServerSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServerSeed(<hidden>)")
    }
}

/// SHA-256 от server seed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Семена одной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSeeds {
    pub server_seed: ServerSeed,
    pub client_seed: String,
}

impl HandSeeds {
    pub fn new(server_seed: ServerSeed, client_seed: impl Into<String>) -> Self {
        Self {
            server_seed,
            client_seed: client_seed.into(),
        }
    }

    pub fn commitment(&self) -> Commitment {
        self.server_seed.commitment()
    }

    pub fn rng(&self, table_id: TableId, hand_id: HandId) -> DeterministicRng {
        RngSeed::for_hand(&self.server_seed.0, &self.client_seed, table_id, hand_id).to_rng()
    }

    /// Доказательство для публикации после раздачи.
    pub fn reveal(&self, table_id: TableId, hand_id: HandId) -> FairnessProof {
        FairnessProof {
            table_id,
            hand_id,
            commitment: self.commitment(),
            server_seed: self.server_seed,
            client_seed: self.client_seed.clone(),
        }
    }
}

/// Раскрытые данные раздачи для независимой проверки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FairnessProof {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub commitment: Commitment,
    pub server_seed: ServerSeed,
    pub client_seed: String,
}

impl FairnessProof {
    /// Раскрытый seed соответствует опубликованному хэшу.
    pub fn verify_commitment(&self) -> bool {
        self.server_seed.commitment() == self.commitment
    }

    /// Восстановить порядок колоды этой раздачи.
    pub fn deck(&self) -> Deck {
        let mut rng =
            RngSeed::for_hand(&self.server_seed.0, &self.client_seed, self.table_id, self.hand_id)
                .to_rng();
        Deck::new_shuffled(&mut rng)
    }

    /// Полная проверка: хэш сходится и колода совпадает с тем, что раздавали.
    pub fn verify(&self, dealt_order: &[crate::domain::Card]) -> bool {
        self.verify_commitment() && self.deck().cards().starts_with(dealt_order)
    }
}
