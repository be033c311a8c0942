use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::TableConfig;
use crate::domain::{PlayerId, SeatId, TableId};
use crate::engine::actions::PlayerAction;
use crate::engine::{settle_departures, HandStatus, SeatRemoval, TableRegistry};
use crate::infra::ledger::ChipLedger;

use super::dto::{map_hand_status_to_response, CommandResponse};
use super::errors::ApiError;

/// Команда верхнего уровня: всё, что меняет состояние.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Создать новый стол.
    CreateTable { config: TableConfig },

    /// Посадить игрока: бай-ин списывается из кошелька.
    SitDown {
        table_id: TableId,
        player_id: PlayerId,
        buy_in: Chips,
    },

    /// Встать из-за стола, остаток стека вернётся в кошелёк.
    StandUp { table_id: TableId, seat: SeatId },

    /// Зафиксировать server seed следующей раздачи. В ответе – его хэш,
    /// который клиент получает до того, как отправит свой seed.
    CommitSeed { table_id: TableId },

    /// Запустить новую раздачу на зафиксированном server seed;
    /// `client_seed` даёт клиент (любая строка).
    StartHand {
        table_id: TableId,
        client_seed: String,
    },

    /// Действие игрока в раздаче.
    PlayerAction {
        table_id: TableId,
        action: PlayerAction,
    },
}

/// Разобрать команду из JSON.
pub fn parse_command(json: &str) -> Result<Command, ApiError> {
    Ok(serde_json::from_str(json)?)
}

/// Выполнить команду над реестром столов.
///
/// Кошелёк трогается только здесь: бай-ин при посадке и возврат стеков
/// освободившихся мест после раздачи.
pub fn execute<L: ChipLedger>(
    registry: &mut TableRegistry,
    ledger: &mut L,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::CreateTable { config } => {
            let table_id = registry.create_table(config)?;
            let view = registry.table(table_id)?.get_state(None);
            Ok(CommandResponse::TableCreated(view))
        }

        Command::SitDown {
            table_id,
            player_id,
            buy_in,
        } => {
            let seat = registry.sit_down(table_id, player_id, buy_in, ledger)?;
            let table = registry.table(table_id)?.get_state(Some(seat));
            Ok(CommandResponse::Seated { seat, table })
        }

        Command::StandUp { table_id, seat } => {
            let removal = registry.stand_up(table_id, seat, ledger)?;
            let table = registry.table(table_id)?.get_state(None);
            let response = match removal {
                SeatRemoval::Immediate { player_id, stack } => CommandResponse::StoodUp {
                    player_id,
                    credited: stack,
                    pending: false,
                    table,
                },
                SeatRemoval::AtHandEnd { player_id, status } => {
                    let credited = match &status {
                        HandStatus::Finished(summary) => summary
                            .departures
                            .iter()
                            .filter(|d| d.player_id == player_id)
                            .map(|d| d.stack)
                            .sum::<Chips>(),
                        HandStatus::Ongoing => Chips::ZERO,
                    };
                    CommandResponse::StoodUp {
                        player_id,
                        credited,
                        pending: !status.is_finished(),
                        table,
                    }
                }
            };
            Ok(response)
        }

        Command::CommitSeed { table_id } => {
            let commitment = registry.commit_seed(table_id)?;
            Ok(CommandResponse::SeedCommitted {
                table_id,
                commitment,
            })
        }

        Command::StartHand {
            table_id,
            client_seed,
        } => {
            let status = registry.start_committed_hand(table_id, client_seed)?;
            finish_response(registry, ledger, table_id, status)
        }

        Command::PlayerAction { table_id, action } => {
            let status = registry.process_action(table_id, action.seat, action.kind)?;
            finish_response(registry, ledger, table_id, status)
        }
    }
}

/// После раздачи вернуть в кошелёк стеки ушедших и собрать ответ.
fn finish_response<L: ChipLedger>(
    registry: &TableRegistry,
    ledger: &mut L,
    table_id: TableId,
    status: HandStatus,
) -> Result<CommandResponse, ApiError> {
    if let HandStatus::Finished(summary) = &status {
        settle_departures(summary, ledger)?;
    }
    let table = registry.table(table_id)?.get_state(None);
    Ok(map_hand_status_to_response(status, table))
}
