use anchor_lang::prelude::*;
use crate::errors::RaffleError;

pub const SUBSCRIPTION_SEED: &[u8] = b"subscription";

/// Oracle subscription that pays for randomness requests.
///
/// Seeds: `["subscription", subscription_id.to_le_bytes()]`
///
/// Lamports deposited through `fund_subscription` sit on this PDA and are
/// tracked in `balance`. Accepting a request sets `request_fee` aside in
/// `reserved`; fulfilling it pays that fee to the `oracle` key, which is also
/// the only key allowed to fulfill.
#[account]
#[derive(InitSpace)]
pub struct VrfSubscription {
    pub subscription_id: u64,
    pub owner: Pubkey,
    /// Off-chain oracle that answers requests and collects fees.
    pub oracle: Pubkey,
    /// Account allowed to request randomness against this subscription.
    pub consumer: Option<Pubkey>,
    pub balance: u64,
    /// Fees owed for requests that are still outstanding.
    pub reserved: u64,
    pub request_fee: u64,
    /// Last correlation id handed out. Ids start at 1.
    pub request_nonce: u64,
    pub bump: u8,
}

impl VrfSubscription {
    pub fn new(subscription_id: u64, owner: Pubkey, oracle: Pubkey, request_fee: u64, bump: u8) -> Self {
        Self {
            subscription_id,
            owner,
            oracle,
            consumer: None,
            balance: 0,
            reserved: 0,
            request_fee,
            request_nonce: 0,
            bump,
        }
    }

    /// Credits `amount` and returns the balance before the deposit.
    pub fn fund(&mut self, amount: u64) -> Result<u64> {
        let old_balance = self.balance;
        self.balance = old_balance
            .checked_add(amount)
            .ok_or(RaffleError::MathOverflow)?;
        Ok(old_balance)
    }

    /// Registers the single consumer, replacing any previous one.
    pub fn add_consumer(&mut self, consumer: Pubkey) {
        self.consumer = Some(consumer);
    }

    /// Balance not already set aside for outstanding requests.
    pub fn available(&self) -> u64 {
        self.balance.saturating_sub(self.reserved)
    }

    pub fn can_serve(&self, consumer: &Pubkey) -> bool {
        self.consumer.as_ref() == Some(consumer) && self.available() >= self.request_fee
    }

    /// Sets the fee for an accepted request aside so it stays payable.
    pub fn reserve_fee(&mut self) -> Result<()> {
        require!(self.available() >= self.request_fee, RaffleError::OracleRequestFailed);
        self.reserved = self.reserved
            .checked_add(self.request_fee)
            .ok_or(RaffleError::MathOverflow)?;
        Ok(())
    }

    /// Debits the reserved fee owed to the oracle for a fulfilled request.
    pub fn charge_fulfillment(&mut self) -> Result<u64> {
        let fee = self.request_fee;
        let reserved = self.reserved
            .checked_sub(fee)
            .ok_or(RaffleError::MathOverflow)?;
        let balance = self.balance
            .checked_sub(fee)
            .ok_or(RaffleError::MathOverflow)?;
        self.reserved = reserved;
        self.balance = balance;
        Ok(fee)
    }
}
