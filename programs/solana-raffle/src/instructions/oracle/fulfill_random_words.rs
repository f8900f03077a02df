use anchor_lang::prelude::*;
use crate::state::{Raffle, VrfSubscription, RAFFLE_SEED, SUBSCRIPTION_SEED};
use crate::events::WinnerPicked;
use crate::errors::RaffleError;

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
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
        constraint = subscription.oracle == oracle.key() @ RaffleError::UnauthorizedOracle
    )]
    pub subscription: Account<'info, VrfSubscription>,

    #[account(mut)]
    pub oracle: Signer<'info>,

    /// CHECK: Must be the entrant selected by the random value; verified before any lamports move
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

pub fn process_fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_value: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let raffle_info = ctx.accounts.raffle.to_account_info();
    let winner_info = ctx.accounts.winner.to_account_info();
    let reserve = Rent::get()?.minimum_balance(raffle_info.data_len());

    let settlement = ctx.accounts.raffle.fulfill_random_words(
        request_id,
        random_value,
        clock.unix_timestamp,
        |winner, prize| pay_out(&raffle_info, &winner_info, winner, prize, reserve),
    )?;

    // Oracle is paid only for a request that settled.
    let fee = ctx.accounts.subscription.charge_fulfillment()?;
    pay_oracle_fee(
        &ctx.accounts.subscription.to_account_info(),
        &ctx.accounts.oracle.to_account_info(),
        fee,
    )?;

    msg!("Request {} paid {} to {}", settlement.request_id, settlement.prize, settlement.winner);
    emit!(WinnerPicked {
        winner: settlement.winner,
        prize: settlement.prize,
        request_id: settlement.request_id,
    });

    Ok(())
}

/// Moves the prize out of the raffle PDA without touching its rent reserve.
fn pay_out<'info>(
    raffle: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
    winner: &Pubkey,
    prize: u64,
    reserve: u64,
) -> Result<()> {
    require_keys_eq!(*destination.key, *winner, RaffleError::PayoutTransferFailed);

    let remaining = raffle
        .lamports()
        .checked_sub(prize)
        .ok_or(RaffleError::PayoutTransferFailed)?;
    require!(remaining >= reserve, RaffleError::PayoutTransferFailed);
    let credited = destination
        .lamports()
        .checked_add(prize)
        .ok_or(RaffleError::PayoutTransferFailed)?;

    **raffle.try_borrow_mut_lamports()? = remaining;
    **destination.try_borrow_mut_lamports()? = credited;
    Ok(())
}

/// Moves the reserved request fee from the subscription PDA to the oracle.
fn pay_oracle_fee<'info>(
    subscription: &AccountInfo<'info>,
    oracle: &AccountInfo<'info>,
    fee: u64,
) -> Result<()> {
    if fee == 0 {
        return Ok(());
    }

    let drained = subscription
        .lamports()
        .checked_sub(fee)
        .ok_or(RaffleError::MathOverflow)?;
    let credited = oracle
        .lamports()
        .checked_add(fee)
        .ok_or(RaffleError::MathOverflow)?;

    **subscription.try_borrow_mut_lamports()? = drained;
    **oracle.try_borrow_mut_lamports()? = credited;
    Ok(())
}
