//! Dev-симулятор: несколько независимых столов, случайные легальные действия,
//! все события стола уходят в лог.
//!
//! RUST_LOG=debug HOLDEM_TABLES=3 HOLDEM_HANDS=50 cargo run --features cli --bin holdem_dev_cli

use std::process::ExitCode;

use rand::Rng;

use holdem_table::domain::{Chips, PlayerId, TableConfig, TableId};
use holdem_table::engine::{
    settle_departures, EngineError, HandStatus, LegalActions, PlayerActionKind, TableEvent,
    TableEventKind, TableRegistry,
};
use holdem_table::infra::{ChipLedger, DeterministicRng, InMemoryLedger};

const BUY_IN: u64 = 10_000;
const BANKROLL: u64 = 2 * BUY_IN;

fn env_or(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tables = env_or("HOLDEM_TABLES", 3);
    let hands = env_or("HOLDEM_HANDS", 20);
    log::info!("holdem_dev_cli: {} tables x {} hands", tables, hands);

    let mut registry = TableRegistry::new();
    let mut ledger = InMemoryLedger::new();
    let mut bots = DeterministicRng::from_u64(0x5EED);
    let mut next_player: PlayerId = 1;

    let mut table_ids = Vec::new();
    for n in 0..tables {
        let players = 2 + (n % 5);
        match setup_table(&mut registry, &mut ledger, &mut next_player, players) {
            Ok(id) => table_ids.push(id),
            Err(err) => {
                log::error!("table setup failed: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }
    let initial = Chips(BANKROLL * (next_player - 1));

    for &table_id in &table_ids {
        match play_table(&mut registry, &mut ledger, table_id, hands, &mut bots) {
            Ok(played) => log::info!("table {}: {} hands played", table_id, played),
            Err(err) => {
                log::error!("table {}: {} ({:?})", table_id, err, err.class());
                return ExitCode::FAILURE;
            }
        }
    }

    let on_tables: Chips = table_ids
        .iter()
        .filter_map(|id| registry.table(*id).ok())
        .map(|t| t.total_chips())
        .sum();
    let total = ledger.total() + on_tables;
    if total != initial {
        log::error!("chips drifted: expected {}, got {}", initial, total);
        return ExitCode::FAILURE;
    }

    log::info!("all chips accounted for: {}", total);
    ExitCode::SUCCESS
}

fn setup_table(
    registry: &mut TableRegistry,
    ledger: &mut InMemoryLedger,
    next_player: &mut PlayerId,
    players: usize,
) -> Result<TableId, EngineError> {
    let table_id = registry.create_table(TableConfig::ring(6, Chips(50), Chips(100)))?;
    for _ in 0..players {
        let player_id = *next_player;
        *next_player += 1;
        ledger.add_player(player_id, Chips(BANKROLL))?;
        registry.sit_down(table_id, player_id, Chips(BUY_IN), ledger)?;
    }
    Ok(table_id)
}

fn play_table(
    registry: &mut TableRegistry,
    ledger: &mut InMemoryLedger,
    table_id: TableId,
    hands: usize,
    bots: &mut DeterministicRng,
) -> Result<usize, EngineError> {
    let mut played = 0;

    for hand_no in 0..hands {
        if registry.table(table_id)?.table().funded_count() < 2 {
            log::info!("table {}: not enough players left", table_id);
            break;
        }

        // Хэш публикуется раньше, чем известен client seed.
        let commitment = registry.commit_seed(table_id)?;
        let client_seed = format!("dev-{}-{}", table_id, hand_no);
        let mut status = registry.start_committed_hand(table_id, client_seed)?;

        while status == HandStatus::Ongoing {
            let table = registry.table(table_id)?;
            let seat = table
                .current_actor()
                .ok_or(EngineError::Internal("раздача идёт, но ход ничей"))?;
            let legal = table.legal_actions(seat)?;
            let current_bet = table
                .hand()
                .map(|h| h.betting.current_bet)
                .unwrap_or(Chips::ZERO);

            let kind = choose_action(&legal, current_bet, bots.inner_mut());
            status = registry.process_action(table_id, seat, kind)?;
        }

        if let HandStatus::Finished(summary) = &status {
            settle_departures(summary, ledger)?;
            if let Some(proof) = &summary.fairness {
                if proof.commitment != commitment || !proof.verify_commitment() {
                    log::error!("hand {}: commitment mismatch", summary.hand_id);
                }
            }
        }

        for event in registry.table_mut(table_id)?.drain_events() {
            log_event(&event);
        }
        played += 1;
    }

    Ok(played)
}

/// Простой бот: иногда фолдит, иногда рейзит, в остальном check/call.
fn choose_action(legal: &LegalActions, current_bet: Chips, rng: &mut impl Rng) -> PlayerActionKind {
    let roll: u32 = rng.gen_range(0..100);

    if legal.call_amount.is_some() && roll < 15 {
        return PlayerActionKind::Fold;
    }
    if roll >= 97 && legal.can_all_in {
        return PlayerActionKind::AllIn;
    }
    if let Some((min, max)) = legal.raise_range {
        if roll >= 80 {
            let cap = max.min(Chips(min.0.saturating_mul(3)));
            let to = Chips(rng.gen_range(min.0..=cap.0));
            return if current_bet.is_zero() {
                PlayerActionKind::Bet(to)
            } else {
                PlayerActionKind::Raise(to)
            };
        }
    }

    match legal.call_amount {
        Some(_) => PlayerActionKind::Call,
        None if legal.can_check => PlayerActionKind::Check,
        None => PlayerActionKind::Fold,
    }
}

fn log_event(event: &TableEvent) {
    match &event.kind {
        TableEventKind::HandEnded { .. } | TableEventKind::TableFaulted { .. } => {
            match serde_json::to_string(event) {
                Ok(json) => log::info!("{}", json),
                Err(err) => log::warn!("event {} not serializable: {}", event.index, err),
            }
        }
        kind => log::debug!("table {} #{}: {:?}", event.table_id, event.index, kind),
    }
}
