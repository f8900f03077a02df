use anchor_lang::prelude::*;
use crate::state::{Raffle, VrfSubscription, RAFFLE_SEED, SUBSCRIPTION_SEED};
use crate::events::RequestedRaffleWinner;

/// Open to any keeper; the draw only starts when `check_upkeep` holds.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [SUBSCRIPTION_SEED, raffle.subscription_id.to_le_bytes().as_ref()],
        bump = subscription.bump,
    )]
    pub subscription: Account<'info, VrfSubscription>,

    pub keeper: Signer<'info>,
}

pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let clock = Clock::get()?;
    let consumer = ctx.accounts.raffle.key();
    let raffle = &mut ctx.accounts.raffle;
    let subscription = &mut ctx.accounts.subscription;

    let request_id = raffle.perform_upkeep(consumer, &mut **subscription, clock.unix_timestamp)?;

    msg!("Draw requested by {}, request {}", ctx.accounts.keeper.key(), request_id);
    emit!(RequestedRaffleWinner { request_id });

    Ok(())
}
