use anchor_lang::prelude::*;
use crate::errors::RaffleError;
use crate::events::RandomWordsRequested;
use crate::state::VrfSubscription;

/// Random words asked for per draw. Only the first one picks the winner.
pub const NUM_WORDS: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomnessRequest {
    pub consumer: Pubkey,
    pub key_hash: [u8; 32],
    pub callback_gas_limit: u32,
    pub num_words: u32,
    pub requested_at: i64,
}

/// Sending side of the randomness oracle.
///
/// `request_randomness` only hands the request over and returns the
/// correlation id; the random value arrives later through
/// `fulfill_random_words`.
pub trait RandomnessOracle {
    fn request_randomness(&mut self, request: &RandomnessRequest) -> Result<u64>;
}

impl RandomnessOracle for VrfSubscription {
    fn request_randomness(&mut self, request: &RandomnessRequest) -> Result<u64> {
        if !self.can_serve(&request.consumer) {
            msg!(
                "Subscription {} cannot serve {} (available {}, fee {})",
                self.subscription_id,
                request.consumer,
                self.available(),
                self.request_fee
            );
            return err!(RaffleError::OracleRequestFailed);
        }

        let request_id = self.request_nonce
            .checked_add(1)
            .ok_or(RaffleError::MathOverflow)?;
        self.reserve_fee()?;
        self.request_nonce = request_id;

        emit!(RandomWordsRequested {
            request_id,
            subscription_id: self.subscription_id,
            consumer: request.consumer,
            key_hash: request.key_hash,
            callback_gas_limit: request.callback_gas_limit,
            num_words: request.num_words,
            requested_at: request.requested_at,
        });

        Ok(request_id)
    }
}
