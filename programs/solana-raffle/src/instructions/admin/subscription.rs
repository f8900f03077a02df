use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use crate::state::{VrfSubscription, SUBSCRIPTION_SEED};
use crate::events::{ConsumerAdded, SubscriptionCreated, SubscriptionFunded};
use crate::errors::RaffleError;

#[derive(Accounts)]
#[instruction(subscription_id: u64)]
pub struct CreateSubscription<'info> {
    #[account(
        init,
        seeds = [SUBSCRIPTION_SEED, subscription_id.to_le_bytes().as_ref()],
        bump,
        payer = owner,
        space = 8 + VrfSubscription::INIT_SPACE
    )]
    pub subscription: Account<'info, VrfSubscription>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_create_subscription(
    ctx: Context<CreateSubscription>,
    subscription_id: u64,
    oracle: Pubkey,
    request_fee: u64,
) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    ctx.accounts.subscription.set_inner(VrfSubscription::new(
        subscription_id,
        owner,
        oracle,
        request_fee,
        ctx.bumps.subscription,
    ));

    emit!(SubscriptionCreated {
        subscription_id,
        owner,
        oracle,
        request_fee,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FundSubscription<'info> {
    #[account(
        mut,
        seeds = [SUBSCRIPTION_SEED, subscription.subscription_id.to_le_bytes().as_ref()],
        bump = subscription.bump,
    )]
    pub subscription: Account<'info, VrfSubscription>,

    #[account(mut)]
    pub funder: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_fund_subscription(ctx: Context<FundSubscription>, amount: u64) -> Result<()> {
    require!(amount > 0, RaffleError::InvalidConfig);

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder.to_account_info(),
                to: ctx.accounts.subscription.to_account_info(),
            },
        ),
        amount,
    )?;

    let subscription = &mut ctx.accounts.subscription;
    let old_balance = subscription.fund(amount)?;

    emit!(SubscriptionFunded {
        subscription_id: subscription.subscription_id,
        old_balance,
        new_balance: subscription.balance,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AddConsumer<'info> {
    #[account(
        mut,
        seeds = [SUBSCRIPTION_SEED, subscription.subscription_id.to_le_bytes().as_ref()],
        bump = subscription.bump,
        constraint = subscription.owner == owner.key() @ RaffleError::Unauthorized
    )]
    pub subscription: Account<'info, VrfSubscription>,

    pub owner: Signer<'info>,
}

pub fn process_add_consumer(ctx: Context<AddConsumer>, consumer: Pubkey) -> Result<()> {
    let subscription = &mut ctx.accounts.subscription;
    subscription.add_consumer(consumer);

    emit!(ConsumerAdded {
        subscription_id: subscription.subscription_id,
        consumer,
    });

    Ok(())
}
