use anchor_lang::prelude::*;

#[event]
pub struct RaffleInitialized {
    pub authority: Pubkey,
    pub entrance_fee: u64,
    pub interval: i64,
    pub subscription_id: u64,
}

#[event]
pub struct RaffleEnter {
    pub player: Pubkey,
    pub amount: u64,
    pub pool: u64,
}

#[event]
pub struct RequestedRaffleWinner {
    pub request_id: u64,
}

/// Picked up by the off-chain oracle node; carries everything it needs to
/// answer with `fulfill_random_words`.
#[event]
pub struct RandomWordsRequested {
    pub request_id: u64,
    pub subscription_id: u64,
    pub consumer: Pubkey,
    pub key_hash: [u8; 32],
    pub callback_gas_limit: u32,
    pub num_words: u32,
    pub requested_at: i64,
}

#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub prize: u64,
    pub request_id: u64,
}

#[event]
pub struct SubscriptionCreated {
    pub subscription_id: u64,
    pub owner: Pubkey,
    pub oracle: Pubkey,
    pub request_fee: u64,
}

#[event]
pub struct SubscriptionFunded {
    pub subscription_id: u64,
    pub old_balance: u64,
    pub new_balance: u64,
}

#[event]
pub struct ConsumerAdded {
    pub subscription_id: u64,
    pub consumer: Pubkey,
}
