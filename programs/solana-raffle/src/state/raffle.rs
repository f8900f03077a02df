use anchor_lang::prelude::*;
use crate::errors::RaffleError;
use crate::randomness::{RandomnessOracle, RandomnessRequest, NUM_WORDS};
use crate::state::ledger::EntryLedger;
use crate::utils::{math, upkeep};

pub const RAFFLE_SEED: &[u8] = b"raffle";

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RaffleState {
    Open,
    Calculating,
}

/// The single outstanding randomness request of a round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct DrawRequest {
    pub request_id: u64,
    pub issued_at: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitRaffleParams {
    pub entrance_fee: u64,
    pub interval: i64,
    pub subscription_id: u64,
    pub key_hash: [u8; 32],
    pub callback_gas_limit: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundInfo {
    pub entrance_fee: u64,
    pub interval: i64,
    pub state: RaffleState,
    pub latest_timestamp: i64,
    pub recent_winner: Option<Pubkey>,
    pub num_players: u64,
    pub pool: u64,
}

/// Outcome of a fulfilled draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub request_id: u64,
    pub winner: Pubkey,
    pub prize: u64,
}

/// Raffle configuration plus the state of the round in play.
///
/// Seeds: `["raffle"]`
///
/// The pool is held as lamports on this PDA on top of its rent-exempt
/// reserve; `ledger.pool` is the amount owed to the next winner.
#[account]
#[derive(InitSpace)]
pub struct Raffle {
    pub entrance_fee: u64,
    pub interval: i64,
    pub subscription_id: u64,
    pub key_hash: [u8; 32],
    pub callback_gas_limit: u32,
    pub state: RaffleState,
    /// Start of the current round (init or last payout).
    pub last_timestamp: i64,
    pub recent_winner: Option<Pubkey>,
    pub pending_request: Option<DrawRequest>,
    pub ledger: EntryLedger,
    pub bump: u8,
}

impl Raffle {
    pub fn new(params: &InitRaffleParams, now: i64, bump: u8) -> Result<Self> {
        require!(params.entrance_fee > 0, RaffleError::InvalidConfig);
        require!(params.interval > 0, RaffleError::InvalidConfig);
        require!(params.callback_gas_limit > 0, RaffleError::InvalidConfig);

        Ok(Self {
            entrance_fee: params.entrance_fee,
            interval: params.interval,
            subscription_id: params.subscription_id,
            key_hash: params.key_hash,
            callback_gas_limit: params.callback_gas_limit,
            state: RaffleState::Open,
            last_timestamp: now,
            recent_winner: None,
            pending_request: None,
            ledger: EntryLedger::default(),
            bump,
        })
    }

    pub fn enter(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(amount >= self.entrance_fee, RaffleError::InsufficientStake);
        require!(self.state == RaffleState::Open, RaffleError::RoundNotOpen);
        self.ledger.join(player, amount, self.entrance_fee)
    }

    pub fn check_upkeep(&self, now: i64) -> bool {
        upkeep::should_draw(
            self.state,
            self.ledger.count(),
            self.ledger.pool,
            now.saturating_sub(self.last_timestamp),
            self.interval,
        )
    }

    /// Moves the round to CALCULATING once the oracle has accepted a request.
    ///
    /// `consumer` is the raffle account the subscription must be serving.
    pub fn perform_upkeep<O>(&mut self, consumer: Pubkey, oracle: &mut O, now: i64) -> Result<u64>
    where
        O: RandomnessOracle + ?Sized,
    {
        if !self.check_upkeep(now) {
            msg!(
                "Upkeep not needed: pool {}, players {}, state {:?}",
                self.ledger.pool,
                self.ledger.count(),
                self.state
            );
            return err!(RaffleError::UpkeepNotNeeded);
        }

        let request = RandomnessRequest {
            consumer,
            key_hash: self.key_hash,
            callback_gas_limit: self.callback_gas_limit,
            num_words: NUM_WORDS,
            requested_at: now,
        };
        let request_id = oracle.request_randomness(&request).map_err(|err| {
            msg!("Randomness request failed: {}", err);
            error!(RaffleError::OracleRequestFailed)
        })?;

        self.state = RaffleState::Calculating;
        self.pending_request = Some(DrawRequest {
            request_id,
            issued_at: now,
        });

        Ok(request_id)
    }

    /// Settles the round for the outstanding request.
    ///
    /// `transfer` pays the prize to the winner. Nothing is committed unless
    /// it succeeds, so a failed payout leaves the request pending and the
    /// round CALCULATING.
    pub fn fulfill_random_words<F>(
        &mut self,
        request_id: u64,
        random_value: u64,
        now: i64,
        transfer: F,
    ) -> Result<Settlement>
    where
        F: FnOnce(&Pubkey, u64) -> Result<()>,
    {
        let pending = self
            .pending_request
            .filter(|request| request.request_id == request_id && self.state == RaffleState::Calculating);
        let Some(pending) = pending else {
            msg!("Rejected fulfillment for request {}", request_id);
            return err!(RaffleError::UnknownRequest);
        };

        let index = math::winner_index(random_value, self.ledger.count())
            .ok_or(RaffleError::IndexOutOfRange)?;
        let winner = self.ledger.entry_at(index)?;
        let prize = self.ledger.pool;

        transfer(&winner, prize).map_err(|err| {
            msg!("Payout of {} to {} failed: {}", prize, winner, err);
            error!(RaffleError::PayoutTransferFailed)
        })?;

        self.recent_winner = Some(winner);
        self.ledger.clear();
        self.last_timestamp = now;
        self.pending_request = None;
        self.state = RaffleState::Open;

        Ok(Settlement {
            request_id: pending.request_id,
            winner,
            prize,
        })
    }

    pub fn round_info(&self) -> RoundInfo {
        RoundInfo {
            entrance_fee: self.entrance_fee,
            interval: self.interval,
            state: self.state,
            latest_timestamp: self.last_timestamp,
            recent_winner: self.recent_winner,
            num_players: self.ledger.count() as u64,
            pool: self.ledger.pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const FEE: u64 = 10;
    const INTERVAL: i64 = 30;
    const START: i64 = 1_700_000_000;

    struct FixedOracle {
        next_id: u64,
        fail: bool,
    }

    impl RandomnessOracle for FixedOracle {
        fn request_randomness(&mut self, _request: &RandomnessRequest) -> Result<u64> {
            if self.fail {
                return err!(RaffleError::MathOverflow);
            }
            self.next_id += 1;
            Ok(self.next_id)
        }
    }

    fn params() -> InitRaffleParams {
        InitRaffleParams {
            entrance_fee: FEE,
            interval: INTERVAL,
            subscription_id: 1,
            key_hash: [1; 32],
            callback_gas_limit: 500_000,
        }
    }

    fn raffle() -> Raffle {
        Raffle::new(&params(), START, 254).unwrap()
    }

    fn oracle() -> FixedOracle {
        FixedOracle { next_id: 0, fail: false }
    }

    #[test]
    fn starts_open_and_empty() {
        let raffle = raffle();
        let info = raffle.round_info();

        assert_eq!(info.state, RaffleState::Open);
        assert_eq!(info.entrance_fee, FEE);
        assert_eq!(info.interval, INTERVAL);
        assert_eq!(info.latest_timestamp, START);
        assert_eq!(info.num_players, 0);
        assert_eq!(info.recent_winner, None);
    }

    #[test]
    fn rejects_zero_fee_or_interval() {
        let mut bad = params();
        bad.entrance_fee = 0;
        assert!(Raffle::new(&bad, START, 0).is_err());

        let mut bad = params();
        bad.interval = 0;
        assert!(Raffle::new(&bad, START, 0).is_err());

        let mut bad = params();
        bad.callback_gas_limit = 0;
        assert!(Raffle::new(&bad, START, 0).is_err());
    }

    #[test]
    fn upkeep_is_refused_before_interval_and_state_stays_open() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let mut oracle = oracle();

        let err = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle, START + INTERVAL - 1)
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::UpkeepNotNeeded));
        assert_eq!(raffle.state, RaffleState::Open);
        assert_eq!(raffle.pending_request, None);
        assert_eq!(oracle.next_id, 0);
    }

    #[test]
    fn upkeep_is_refused_without_entrants() {
        let mut raffle = raffle();
        let err = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle(), START + INTERVAL)
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::UpkeepNotNeeded));
        assert_eq!(raffle.state, RaffleState::Open);
    }

    #[test]
    fn calculating_round_blocks_entries_and_second_trigger() {
        let mut raffle = raffle();
        let mut oracle = oracle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();

        let request_id = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle, START + INTERVAL)
            .unwrap();

        assert_eq!(request_id, 1);
        assert_eq!(raffle.state, RaffleState::Calculating);
        assert_eq!(
            raffle.pending_request,
            Some(DrawRequest { request_id: 1, issued_at: START + INTERVAL })
        );
        assert!(!raffle.check_upkeep(START + INTERVAL));

        let err = raffle.enter(Pubkey::new_unique(), FEE).unwrap_err();
        assert_eq!(err, Error::from(RaffleError::RoundNotOpen));

        let err = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle, START + INTERVAL)
            .unwrap_err();
        assert_eq!(err, Error::from(RaffleError::UpkeepNotNeeded));
        assert_eq!(oracle.next_id, 1);
    }

    #[test]
    fn failed_request_keeps_round_open() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let mut oracle = FixedOracle { next_id: 0, fail: true };

        let err = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle, START + INTERVAL)
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::OracleRequestFailed));
        assert_eq!(raffle.state, RaffleState::Open);
        assert_eq!(raffle.pending_request, None);
        assert!(raffle.check_upkeep(START + INTERVAL));
    }

    #[test]
    fn short_stake_is_reported_before_round_state() {
        let mut raffle = raffle();
        raffle.state = RaffleState::Calculating;

        let err = raffle.enter(Pubkey::new_unique(), FEE - 1).unwrap_err();

        assert_eq!(err, Error::from(RaffleError::InsufficientStake));
    }

    #[test]
    fn mismatched_fulfillment_changes_nothing() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let request_id = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle(), START + INTERVAL)
            .unwrap();

        let mut paid = false;
        let err = raffle
            .fulfill_random_words(request_id + 1, 7, START + INTERVAL + 5, |_, _| {
                paid = true;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::UnknownRequest));
        assert!(!paid);
        assert_eq!(raffle.state, RaffleState::Calculating);
        assert_eq!(raffle.ledger.count(), 1);
        assert_eq!(raffle.pending_request.map(|r| r.request_id), Some(request_id));
    }

    #[test]
    fn fulfillment_without_request_is_unknown() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();

        for id in [0, 1] {
            let err = raffle
                .fulfill_random_words(id, 7, START, |_, _| Ok(()))
                .unwrap_err();
            assert_eq!(err, Error::from(RaffleError::UnknownRequest));
        }
        assert_eq!(raffle.state, RaffleState::Open);
        assert_eq!(raffle.ledger.count(), 1);
    }

    #[test]
    fn matching_fulfillment_pays_and_resets() {
        let players: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let mut raffle = raffle();
        for player in &players {
            raffle.enter(*player, FEE).unwrap();
        }
        let request_id = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle(), START + INTERVAL)
            .unwrap();

        let mut payout = None;
        let settlement = raffle
            .fulfill_random_words(request_id, 17, START + INTERVAL + 9, |winner, amount| {
                payout = Some((*winner, amount));
                Ok(())
            })
            .unwrap();

        assert_eq!(payout, Some((players[1], 4 * FEE)));
        assert_eq!(settlement, Settlement { request_id, winner: players[1], prize: 4 * FEE });
        assert_eq!(raffle.state, RaffleState::Open);
        assert_eq!(raffle.ledger.count(), 0);
        assert_eq!(raffle.ledger.pool, 0);
        assert_eq!(raffle.pending_request, None);
        assert_eq!(raffle.recent_winner, Some(players[1]));
        assert_eq!(raffle.last_timestamp, START + INTERVAL + 9);
    }

    #[test]
    fn failed_payout_commits_nothing_and_can_be_retried() {
        let winner = Pubkey::new_unique();
        let mut raffle = raffle();
        raffle.enter(winner, FEE).unwrap();
        let request_id = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle(), START + INTERVAL)
            .unwrap();

        let err = raffle
            .fulfill_random_words(request_id, 3, START + INTERVAL + 1, |_, _| {
                err!(RaffleError::MathOverflow)
            })
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::PayoutTransferFailed));
        assert_eq!(raffle.state, RaffleState::Calculating);
        assert_eq!(raffle.ledger.pool, FEE);
        assert_eq!(raffle.ledger.count(), 1);
        assert_eq!(raffle.recent_winner, None);
        assert_eq!(raffle.last_timestamp, START);

        let settlement = raffle
            .fulfill_random_words(request_id, 3, START + INTERVAL + 2, |_, _| Ok(()))
            .unwrap();
        assert_eq!(settlement.winner, winner);
        assert_eq!(raffle.state, RaffleState::Open);
    }

    #[test]
    fn replayed_fulfillment_is_rejected() {
        let mut raffle = raffle();
        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let request_id = raffle
            .perform_upkeep(Pubkey::new_unique(), &mut oracle(), START + INTERVAL)
            .unwrap();
        raffle
            .fulfill_random_words(request_id, 0, START + INTERVAL, |_, _| Ok(()))
            .unwrap();

        raffle.enter(Pubkey::new_unique(), FEE).unwrap();
        let err = raffle
            .fulfill_random_words(request_id, 0, START + INTERVAL, |_, _| Ok(()))
            .unwrap_err();

        assert_eq!(err, Error::from(RaffleError::UnknownRequest));
        assert_eq!(raffle.ledger.count(), 1);
    }
}
