use crate::state::RaffleState;

/// Whether a draw should start now.
///
/// Evaluated by `check_upkeep` for external watchers and again inside
/// `perform_upkeep` right before a randomness request is paid for.
pub fn should_draw(
    state: RaffleState,
    entrant_count: usize,
    pool: u64,
    elapsed: i64,
    interval: i64,
) -> bool {
    let is_open = state == RaffleState::Open;
    let has_players = entrant_count > 0;
    let has_balance = pool > 0;
    let time_passed = elapsed >= interval;

    is_open && has_players && has_balance && time_passed
}
