use anchor_lang::prelude::*;
use crate::errors::RaffleError;

/// Upper bound on entries per round.
pub const MAX_ENTRANTS: usize = 200;

/// Entrants of the current round, in entry order, and the stake they put in.
///
/// An identity appears once per entry it paid for. `pool` is the sum of
/// those stakes and is only reset by [`EntryLedger::clear`] after a payout.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq, InitSpace)]
pub struct EntryLedger {
    #[max_len(MAX_ENTRANTS)]
    pub entrants: Vec<Pubkey>,
    pub pool: u64,
}

impl EntryLedger {
    pub fn join(&mut self, identity: Pubkey, stake: u64, entrance_fee: u64) -> Result<()> {
        require!(stake >= entrance_fee, RaffleError::InsufficientStake);
        require!(self.entrants.len() < MAX_ENTRANTS, RaffleError::RoundFull);

        let pool = self.pool
            .checked_add(stake)
            .ok_or(RaffleError::MathOverflow)?;

        self.entrants.push(identity);
        self.pool = pool;
        Ok(())
    }

    pub fn entry_at(&self, index: usize) -> Result<Pubkey> {
        self.entrants
            .get(index)
            .copied()
            .ok_or_else(|| error!(RaffleError::IndexOutOfRange))
    }

    pub fn count(&self) -> usize {
        self.entrants.len()
    }

    pub fn clear(&mut self) {
        self.entrants.clear();
        self.pool = 0;
    }
}
