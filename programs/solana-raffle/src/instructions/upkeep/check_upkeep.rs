use anchor_lang::prelude::*;
use crate::instructions::query::ViewRaffle;

pub fn process_check_upkeep(ctx: Context<ViewRaffle>) -> Result<bool> {
    let clock = Clock::get()?;
    Ok(ctx.accounts.raffle.check_upkeep(clock.unix_timestamp))
}
