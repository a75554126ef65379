//! Collateral movements between holders and a market's vault
//!
//! The vault is the market PDA's associated token account, so withdrawals are
//! signed with the market seeds.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::state::Market;

/// Move `units` from a holder's account into the vault
pub fn deposit<'info>(
    from: &InterfaceAccount<'info, TokenAccount>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    authority: &Signer<'info>,
    token_program: &Interface<'info, TokenInterface>,
    units: u64,
) -> Result<()> {
    if units == 0 {
        return Ok(());
    }

    transfer_checked(
        CpiContext::new(
            token_program.to_account_info(),
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: vault.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        units,
        mint.decimals,
    )
}

/// Pay `units` out of the vault, signed by the market PDA
pub fn withdraw<'info>(
    market: &Account<'info, Market>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    token_program: &Interface<'info, TokenInterface>,
    units: u64,
) -> Result<()> {
    if units == 0 {
        return Ok(());
    }

    let index = market.index.to_le_bytes();
    let bump = [market.bump];
    let market_seeds: &[&[u8]] = &[Market::SEED, market.factory.as_ref(), &index, &bump];
    let market_signer = &[market_seeds];

    transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: vault.to_account_info(),
                mint: mint.to_account_info(),
                to: to.to_account_info(),
                authority: market.to_account_info(),
            },
            market_signer,
        ),
        units,
        mint.decimals,
    )
}
