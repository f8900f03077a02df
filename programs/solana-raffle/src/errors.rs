use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    #[msg("Stake is below the entrance fee")]
    InsufficientStake,
    #[msg("Raffle is not open")]
    RoundNotOpen,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Randomness request was rejected by the oracle subscription")]
    OracleRequestFailed,
    #[msg("Fulfillment does not match the outstanding request")]
    UnknownRequest,
    #[msg("Prize transfer to the winner failed")]
    PayoutTransferFailed,
    #[msg("No entrant at this index")]
    IndexOutOfRange,
    #[msg("Round has reached its entrant capacity")]
    RoundFull,
    #[msg("Invalid raffle configuration")]
    InvalidConfig,
    #[msg("Signer is not the subscription oracle")]
    UnauthorizedOracle,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
