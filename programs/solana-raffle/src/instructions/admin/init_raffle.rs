use anchor_lang::prelude::*;
use crate::state::{InitRaffleParams, Raffle, VrfSubscription, RAFFLE_SEED, SUBSCRIPTION_SEED};
use crate::events::RaffleInitialized;

#[derive(Accounts)]
#[instruction(params: InitRaffleParams)]
pub struct InitRaffle<'info> {
    #[account(
        init,
        seeds = [RAFFLE_SEED],
        bump,
        payer = authority,
        space = 8 + Raffle::INIT_SPACE
    )]
    pub raffle: Account<'info, Raffle>,

    /// Subscription that will pay for this raffle's randomness requests.
    #[account(
        seeds = [SUBSCRIPTION_SEED, params.subscription_id.to_le_bytes().as_ref()],
        bump = subscription.bump,
    )]
    pub subscription: Account<'info, VrfSubscription>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_init_raffle(ctx: Context<InitRaffle>, params: InitRaffleParams) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = Raffle::new(&params, clock.unix_timestamp, ctx.bumps.raffle)?;
    ctx.accounts.raffle.set_inner(raffle);

    emit!(RaffleInitialized {
        authority: ctx.accounts.authority.key(),
        entrance_fee: params.entrance_fee,
        interval: params.interval,
        subscription_id: params.subscription_id,
    });

    Ok(())
}
