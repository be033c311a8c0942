//! Provably-fair: commit до раздачи, reveal после, воспроизводимая колода.

mod common;

use common::table_with_stacks;
use holdem_table::api::{execute, Command, CommandResponse};
use holdem_table::domain::{Card, Chips, Deck, TableConfig};
use holdem_table::engine::{
    EngineError, ErrorClass, HandStatus, PlayerAction, PlayerActionKind, TableEventKind,
    TableRegistry,
};
use holdem_table::infra::{ChipLedger, FairnessProof, HandSeeds, InMemoryLedger, RngSeed, ServerSeed};

fn seeds(byte: u8, client: &str) -> HandSeeds {
    HandSeeds::new(ServerSeed::from_bytes([byte; 32]), client)
}

/// Commitment – это SHA-256 от server seed.
#[test]
fn commitment_is_sha256_of_server_seed() {
    let seed = ServerSeed::from_bytes([0u8; 32]);
    assert_eq!(
        seed.commitment().to_hex(),
        "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925"
    );
    assert_eq!(seed.to_hex(), "00".repeat(32));
    assert_ne!(
        ServerSeed::from_bytes([1u8; 32]).commitment(),
        seed.commitment()
    );
}

/// Debug не раскрывает seed в логах.
#[test]
fn server_seed_debug_is_redacted() {
    let seed = ServerSeed::from_bytes([0xAB; 32]);
    let debug = format!("{seed:?}");
    assert!(!debug.contains("ab"));
    assert!(!debug.contains("171"));
}

#[test]
fn generated_seeds_differ() {
    assert_ne!(ServerSeed::generate(), ServerSeed::generate());
}

/// Колода определяется всеми четырьмя входами.
#[test]
fn deck_depends_on_every_input() {
    let deck = |server: u8, client: &str, table: u64, hand: u64| {
        Deck::new_shuffled(&mut RngSeed::for_hand(&[server; 32], client, table, hand).to_rng())
    };

    let base = deck(7, "alice", 1, 1);
    assert_eq!(base, deck(7, "alice", 1, 1));
    assert_ne!(base, deck(8, "alice", 1, 1));
    assert_ne!(base, deck(7, "bob", 1, 1));
    assert_ne!(base, deck(7, "alice", 2, 1));
    assert_ne!(base, deck(7, "alice", 1, 2));
}

/// Proof восстанавливает ту же колоду, что и `HandSeeds::rng`.
#[test]
fn proof_rebuilds_deck() {
    let s = seeds(3, "client-seed");
    let proof = s.reveal(9, 4);
    assert!(proof.verify_commitment());

    let expected = Deck::new_shuffled(&mut s.rng(9, 4));
    assert_eq!(proof.deck(), expected);

    let dealt: Vec<Card> = expected.cards()[..9].to_vec();
    assert!(proof.verify(&dealt));

    let mut wrong = dealt.clone();
    wrong.swap(0, 1);
    assert!(!proof.verify(&wrong));
}

/// Подменённый seed не проходит проверку хэша.
#[test]
fn tampered_proof_fails() {
    let mut proof = seeds(5, "x").reveal(1, 1);
    proof.server_seed = ServerSeed::from_bytes([6; 32]);
    assert!(!proof.verify_commitment());
    assert!(!proof.verify(&[]));
}

/// Через стол: хэш в HandStarted, раскрытие в HandEnded, розданные карты сходятся.
#[test]
fn table_publishes_commitment_then_reveals() {
    let mut table = table_with_stacks(&[1000, 1000, 1000]);
    let s = seeds(42, "table-test");

    table.start_hand(&s).unwrap();
    let dealt_hole: Vec<Card> = table.hand().unwrap().dealt.clone();
    assert_eq!(dealt_hole.len(), 6);

    let events = table.drain_events();
    let commitment = events.iter().find_map(|e| match &e.kind {
        TableEventKind::HandStarted { commitment, .. } => *commitment,
        _ => None,
    });
    assert_eq!(commitment, Some(s.commitment()));

    table.process_action(0, PlayerActionKind::Fold).unwrap();
    let status = table.process_action(1, PlayerActionKind::Fold).unwrap();
    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна закончиться");
    };

    let proof: FairnessProof = summary.fairness.clone().expect("proof в итоге раздачи");
    assert_eq!(proof.table_id, 1);
    assert_eq!(proof.hand_id, 1);
    assert_eq!(proof.client_seed, "table-test");
    assert!(proof.verify(&dealt_hole));

    let revealed = table.drain_events().into_iter().find_map(|e| match e.kind {
        TableEventKind::HandEnded { fairness, .. } => fairness,
        _ => None,
    });
    assert_eq!(revealed, Some(proof.clone()));

    // Proof переживает сериализацию: его можно проверить вне сервера.
    let json = serde_json::to_string(&proof).unwrap();
    let back: FairnessProof = serde_json::from_str(&json).unwrap();
    assert!(back.verify(&dealt_hole));
}

/// Разные раздачи одного стола с одним seed – разные колоды.
#[test]
fn consecutive_hands_get_distinct_decks() {
    let mut table = table_with_stacks(&[1000, 1000]);
    let s = seeds(9, "same");

    table.start_hand(&s).unwrap();
    let first = table.hand().unwrap().dealt.clone();
    table.process_action(0, PlayerActionKind::Fold).unwrap();

    table.start_hand(&s).unwrap();
    let second = table.hand().unwrap().dealt.clone();

    assert_eq!(table.table().current_hand_id, Some(2));
    assert_ne!(first, second);
}

/// Хэш server seed отдаётся клиенту раньше, чем тот присылает свой seed,
/// и совпадает с тем, что раскрывается в конце раздачи.
#[test]
fn api_commits_before_client_seed_is_known() {
    let mut registry = TableRegistry::new();
    let mut ledger = InMemoryLedger::new();
    let config = TableConfig::ring(6, Chips(50), Chips(100));
    let CommandResponse::TableCreated(view) =
        execute(&mut registry, &mut ledger, Command::CreateTable { config }).unwrap()
    else {
        panic!("ожидался TableCreated");
    };
    let table_id = view.table_id;
    for player_id in 1..=2 {
        ledger.add_player(player_id, Chips(10_000)).unwrap();
        let sit = Command::SitDown {
            table_id,
            player_id,
            buy_in: Chips(5_000),
        };
        execute(&mut registry, &mut ledger, sit).unwrap();
    }

    // Без зафиксированного seed раздача не начинается.
    let start = Command::StartHand {
        table_id,
        client_seed: "c".into(),
    };
    let err = execute(&mut registry, &mut ledger, start.clone()).unwrap_err();
    assert_eq!(err.code, "SeedNotCommitted");
    assert_eq!(err.class, ErrorClass::Precondition);

    let CommandResponse::SeedCommitted {
        table_id: committed_on,
        commitment,
    } = execute(&mut registry, &mut ledger, Command::CommitSeed { table_id }).unwrap()
    else {
        panic!("ожидался SeedCommitted");
    };
    assert_eq!(committed_on, table_id);

    // До старта раздачи хэш уже лежит в событиях, seed – нигде.
    let events = registry.table_mut(table_id).unwrap().drain_events();
    let published = events.iter().find_map(|e| match &e.kind {
        TableEventKind::SeedCommitted { hand_id, commitment } => Some((*hand_id, *commitment)),
        _ => None,
    });
    assert_eq!(published, Some((1, commitment)));
    assert!(!events
        .iter()
        .any(|e| matches!(e.kind, TableEventKind::HandStarted { .. })));

    execute(&mut registry, &mut ledger, start.clone()).unwrap();
    let started = registry
        .table_mut(table_id)
        .unwrap()
        .drain_events()
        .into_iter()
        .find_map(|e| match e.kind {
            TableEventKind::HandStarted { commitment, .. } => commitment,
            _ => None,
        });
    assert_eq!(started, Some(commitment));

    let fold = Command::PlayerAction {
        table_id,
        action: PlayerAction::new(0, PlayerActionKind::Fold),
    };
    let CommandResponse::HandFinished { summary, .. } =
        execute(&mut registry, &mut ledger, fold).unwrap()
    else {
        panic!("фолд хедз-ап заканчивает раздачу");
    };
    let proof = summary.fairness.expect("proof в итоге раздачи");
    assert_eq!(proof.commitment, commitment);
    assert_eq!(proof.client_seed, "c");
    assert!(proof.verify_commitment());

    // Seed одноразовый: следующей раздаче нужен новый.
    let err = execute(&mut registry, &mut ledger, start).unwrap_err();
    assert_eq!(err.code, "SeedNotCommitted");
}

/// Зафиксированный seed не меняется до старта и переживает отказ по предусловию.
#[test]
fn committed_seed_is_stable_until_hand_starts() {
    let mut table = table_with_stacks(&[1000]);
    assert_eq!(
        table.start_committed_hand("early"),
        Err(EngineError::SeedNotCommitted)
    );

    let commitment = table.commit_seed().unwrap();
    assert_eq!(table.commit_seed().unwrap(), commitment);
    assert_eq!(table.committed_seed(), Some(commitment));

    assert_eq!(
        table.start_committed_hand("alone"),
        Err(EngineError::NotEnoughPlayers)
    );
    assert_eq!(table.committed_seed(), Some(commitment));

    table.add_seat(2, Chips(1000)).unwrap();
    table.start_committed_hand("now").unwrap();
    assert_eq!(table.committed_seed(), None);

    // Следующий commit во время раздачи относится к следующей раздаче.
    let next = table.commit_seed().unwrap();
    assert_ne!(next, commitment);
    let hand_ids: Vec<u64> = table
        .drain_events()
        .into_iter()
        .filter_map(|e| match e.kind {
            TableEventKind::SeedCommitted { hand_id, .. } => Some(hand_id),
            _ => None,
        })
        .collect();
    assert_eq!(hand_ids, vec![1, 2]);
}
