use anchor_lang::prelude::*;

pub mod state;
pub mod instructions;
pub mod randomness;
pub mod errors;
pub mod events;
pub mod utils;

pub use instructions::*;
use state::{InitRaffleParams, RoundInfo};

declare_id!("DhkCd3nJz2o8yuWwFWw2qYCWRmVrub7Tnpf4z7q7ZfTJ");

#[program]
pub mod solana_raffle {
    use super::*;

    pub fn create_subscription(ctx: Context<CreateSubscription>, subscription_id: u64, oracle: Pubkey, request_fee: u64) -> Result<()> {
        instructions::admin::subscription::process_create_subscription(ctx, subscription_id, oracle, request_fee)
    }

    pub fn fund_subscription(ctx: Context<FundSubscription>, amount: u64) -> Result<()> {
        instructions::admin::subscription::process_fund_subscription(ctx, amount)
    }

    pub fn add_consumer(ctx: Context<AddConsumer>, consumer: Pubkey) -> Result<()> {
        instructions::admin::subscription::process_add_consumer(ctx, consumer)
    }

    pub fn init_raffle(ctx: Context<InitRaffle>, params: InitRaffleParams) -> Result<()> {
        instructions::admin::init_raffle::process_init_raffle(ctx, params)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        instructions::player::enter_raffle::process_enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<ViewRaffle>) -> Result<bool> {
        instructions::upkeep::check_upkeep::process_check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        instructions::upkeep::perform_upkeep::process_perform_upkeep(ctx)
    }

    pub fn fulfill_random_words(ctx: Context<FulfillRandomWords>, request_id: u64, random_value: u64) -> Result<()> {
        instructions::oracle::fulfill_random_words::process_fulfill_random_words(ctx, request_id, random_value)
    }

    pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
        instructions::query::view_raffle::process_get_player(ctx, index)
    }

    pub fn get_round_info(ctx: Context<ViewRaffle>) -> Result<RoundInfo> {
        instructions::query::view_raffle::process_get_round_info(ctx)
    }
}
