//! Protocol Initialization
//!
//! Sets up the two singleton accounts: the market factory and the resolver.
//! Both are typically created once during deployment, resolver first so its
//! address can be handed to the factory as the default delegate.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::state::{MarketFactory, MarketResolver};

/// Accounts required to create the market factory
#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    /// Deployer (pays for the account)
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global factory account (created)
    #[account(
        init,
        payer = authority,
        space = 8 + MarketFactory::INIT_SPACE,
        seeds = [MarketFactory::SEED],
        bump,
    )]
    pub factory: Account<'info, MarketFactory>,

    /// Collateral token mint (wrapped SOL for native collateral)
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeFactory<'info> {
    pub fn initialize_factory(
        &mut self,
        resolver: Pubkey,
        min_liquidity: u64,
        bumps: &InitializeFactoryBumps,
    ) -> Result<()> {
        let factory = MarketFactory::configure(
            self.authority.key(),
            self.collateral_mint.key(),
            self.collateral_mint.decimals,
            resolver,
            min_liquidity,
            bumps.factory,
        )?;
        self.factory.set_inner(factory);

        msg!("Factory initialized!");
        msg!("Collateral mint: {}", self.collateral_mint.key());
        msg!("Delegated resolver: {}", resolver);
        msg!("Min liquidity: {}", self.factory.min_liquidity);

        Ok(())
    }
}

/// Accounts required to create the resolver
#[derive(Accounts)]
pub struct InitializeResolver<'info> {
    /// Becomes the allow-list owner
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + MarketResolver::INIT_SPACE,
        seeds = [MarketResolver::SEED],
        bump,
    )]
    pub resolver: Account<'info, MarketResolver>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeResolver<'info> {
    pub fn initialize_resolver(
        &mut self,
        oracle: Pubkey,
        max_price_age: i64,
        bumps: &InitializeResolverBumps,
    ) -> Result<()> {
        self.resolver.set_inner(MarketResolver::configure(
            self.owner.key(),
            oracle,
            max_price_age,
            bumps.resolver,
        ));

        msg!("Resolver initialized!");
        msg!("Owner: {}", self.owner.key());
        msg!("Oracle: {}", oracle);
        msg!("Max price age: {}s", self.resolver.max_price_age);

        Ok(())
    }
}
