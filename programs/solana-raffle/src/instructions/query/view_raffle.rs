use anchor_lang::prelude::*;
use crate::state::{Raffle, RoundInfo, RAFFLE_SEED};
use crate::errors::RaffleError;

/// Read-only access to the raffle for views and the upkeep check.
#[derive(Accounts)]
pub struct ViewRaffle<'info> {
    #[account(
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,
}

pub fn process_get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
    let index = usize::try_from(index).map_err(|_| RaffleError::IndexOutOfRange)?;
    ctx.accounts.raffle.ledger.entry_at(index)
}

pub fn process_get_round_info(ctx: Context<ViewRaffle>) -> Result<RoundInfo> {
    Ok(ctx.accounts.raffle.round_info())
}
