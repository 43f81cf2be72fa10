#![no_std]

//! Registry of tiered, time-boxed token sales.
//!
//! The registry owns every sale record and custodies the deposited sale
//! tokens and the raised base currency. Privileged calls are checked
//! against the access gate contract the sale was deployed with, and fee
//! parameters are copied into each sale at deployment.

mod errors;
mod events;
mod gate;
mod payout;
mod rounds;
mod sale;
mod settlement;
mod storage;
mod types;


use soroban_sdk::{contract, contractimpl, contractmeta, Address, Env, Vec};

pub use errors::{Error, ErrorKind};
pub use sale::SaleParams;
pub use types::{
    FeeSnapshot, Participation, Payout, RegistryConfig, Round, Sale, SaleTerms, Stage, Terms,
    BPS_DENOMINATOR, MAX_FEE_BPS,
};

use storage::*;

contractmeta!(
    key = "Description",
    val = "Tiered token sale registry with soft and hard caps"
);

#[contract]
pub struct SaleRegistry;

fn require_sale_admin(env: &Env, sale: &Sale, caller: &Address) -> Result<(), Error> {
    gate::require_admin(env, &sale.access_gate, caller)
}

#[contractimpl]
impl SaleRegistry {
    // Registry

    /// Bind the registry to its access gate. `admin` must be an admin of
    /// that gate and authorize the call.
    pub fn initialize(
        env: Env,
        admin: Address,
        access_gate: Address,
        fee_recipient: Address,
        fee_bps: u32,
    ) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if fee_bps > MAX_FEE_BPS {
            return Err(Error::InvalidFeeBps);
        }
        gate::require_admin(&env, &access_gate, &admin)?;

        set_config(
            &env,
            &RegistryConfig {
                access_gate,
                fee_recipient,
                fee_bps,
            },
        );
        set_sale_count(&env, 0);
        Ok(())
    }

    /// Create a sale bound to the registry's gate and current fee settings.
    /// Returns the sale handle used by every other call.
    pub fn deploy_sale(
        env: Env,
        caller: Address,
        base_token: Address,
        burn_leftover: bool,
    ) -> Result<u64, Error> {
        let config = get_config(&env)?;
        gate::require_admin(&env, &config.access_gate, &caller)?;

        let index = get_sale_count(&env);
        let id = u64::from(index) + 1;
        let new_sale = sale::new_sale(&env, id, &config, base_token, burn_leftover);

        set_sale(&env, &new_sale);
        set_sale_at(&env, index, id);
        set_sale_count(&env, index.checked_add(1).ok_or(Error::Overflow)?);

        events::sale_deployed(&env, id, &new_sale.base_token, config.fee_bps);
        Ok(id)
    }

    pub fn set_fee_bps(env: Env, caller: Address, fee_bps: u32) -> Result<(), Error> {
        let mut config = get_config(&env)?;
        gate::require_admin(&env, &config.access_gate, &caller)?;
        if fee_bps > MAX_FEE_BPS {
            return Err(Error::InvalidFeeBps);
        }

        config.fee_bps = fee_bps;
        set_config(&env, &config);
        events::fee_bps_changed(&env, fee_bps);
        Ok(())
    }

    pub fn set_fee_recipient(env: Env, caller: Address, recipient: Address) -> Result<(), Error> {
        let mut config = get_config(&env)?;
        gate::require_admin(&env, &config.access_gate, &caller)?;
        if recipient == env.current_contract_address() {
            return Err(Error::InvalidAddress);
        }

        config.fee_recipient = recipient;
        set_config(&env, &config);
        events::fee_recipient_changed(&env, &config.fee_recipient);
        Ok(())
    }

    pub fn config(env: Env) -> Result<RegistryConfig, Error> {
        get_config(&env)
    }

    pub fn sale_count(env: Env) -> u32 {
        get_sale_count(&env)
    }

    pub fn sale_at(env: Env, index: u32) -> Result<u64, Error> {
        get_sale_at(&env, index).ok_or(Error::SaleNotFound)
    }

    // Sale setup

    pub fn set_sale_params(
        env: Env,
        caller: Address,
        sale_id: u64,
        params: SaleParams,
    ) -> Result<(), Error> {
        let mut sale = get_sale(&env, sale_id)?;
        require_sale_admin(&env, &sale, &caller)?;
        sale::configure(&env, &mut sale, params)
    }

    pub fn set_rounds(
        env: Env,
        caller: Address,
        sale_id: u64,
        start_times: Vec<u64>,
    ) -> Result<(), Error> {
        let mut sale = get_sale(&env, sale_id)?;
        require_sale_admin(&env, &sale, &caller)?;
        sale::set_schedule(&env, &mut sale, &start_times)
    }

    /// Batch tier grant. A tier of 0 revokes the investor's grant.
    pub fn grant_tiers(
        env: Env,
        caller: Address,
        sale_id: u64,
        investors: Vec<Address>,
        tiers: Vec<u32>,
    ) -> Result<(), Error> {
        let sale = get_sale(&env, sale_id)?;
        require_sale_admin(&env, &sale, &caller)?;
        sale::grant_tiers(&env, &sale, &investors, &tiers)
    }

    /// Pull exactly the hard cap of sale tokens from the owner. The owner
    /// must have approved the registry as spender beforehand.
    pub fn deposit_tokens(env: Env, owner: Address, sale_id: u64) -> Result<(), Error> {
        owner.require_auth();
        let mut sale = get_sale(&env, sale_id)?;
        sale::deposit(&env, &mut sale, &owner)
    }

    // Participation

    pub fn get_current_round(env: Env, sale_id: u64) -> Result<u32, Error> {
        let sale = get_sale(&env, sale_id)?;
        Ok(sale::current_round(&env, &sale))
    }

    /// Buy into the open round with `amount` of base currency. Returns the
    /// number of sale token units bought.
    pub fn participate(
        env: Env,
        investor: Address,
        sale_id: u64,
        round: u32,
        amount: i128,
    ) -> Result<i128, Error> {
        investor.require_auth();
        let mut sale = get_sale(&env, sale_id)?;
        sale::participate(&env, &mut sale, &investor, round, amount)
    }

    // Settlement

    pub fn finish_sale(env: Env, caller: Address, sale_id: u64) -> Result<bool, Error> {
        let mut sale = get_sale(&env, sale_id)?;
        require_sale_admin(&env, &sale, &caller)?;
        settlement::finish(&env, &mut sale)
    }

    pub fn withdraw(env: Env, investor: Address, sale_id: u64) -> Result<(), Error> {
        investor.require_auth();
        let sale = get_sale(&env, sale_id)?;
        let payouts = settlement::claim_tokens(&env, &sale, &investor)?;
        payout::dispatch(&env, &payouts);
        Ok(())
    }

    pub fn withdraw_earnings(env: Env, owner: Address, sale_id: u64) -> Result<(), Error> {
        owner.require_auth();
        let mut sale = get_sale(&env, sale_id)?;
        let payouts = settlement::withdraw_earnings(&env, &mut sale, &owner)?;
        payout::dispatch(&env, &payouts);
        Ok(())
    }

    pub fn withdraw_leftover(env: Env, owner: Address, sale_id: u64) -> Result<(), Error> {
        owner.require_auth();
        let mut sale = get_sale(&env, sale_id)?;
        let payouts = settlement::withdraw_leftover(&env, &mut sale, &owner)?;
        payout::dispatch(&env, &payouts);
        Ok(())
    }

    pub fn withdraw_earnings_and_leftover(
        env: Env,
        owner: Address,
        sale_id: u64,
    ) -> Result<(), Error> {
        owner.require_auth();
        let mut sale = get_sale(&env, sale_id)?;
        let payouts = settlement::withdraw_earnings_and_leftover(&env, &mut sale, &owner)?;
        payout::dispatch(&env, &payouts);
        Ok(())
    }

    /// Refund the base currency an investor paid into a cancelled sale.
    pub fn refund_if_cancelled(env: Env, investor: Address, sale_id: u64) -> Result<(), Error> {
        investor.require_auth();
        let sale = get_sale(&env, sale_id)?;
        let payouts = settlement::refund(&env, &sale, &investor)?;
        payout::dispatch(&env, &payouts);
        Ok(())
    }

    /// Return the deposited sale tokens of a cancelled sale to its owner.
    pub fn reclaim_deposit_if_cancelled(
        env: Env,
        owner: Address,
        sale_id: u64,
    ) -> Result<(), Error> {
        owner.require_auth();
        let mut sale = get_sale(&env, sale_id)?;
        let payouts = settlement::reclaim_deposit(&env, &mut sale, &owner)?;
        payout::dispatch(&env, &payouts);
        Ok(())
    }

    /// Sweep tokens the registry holds beyond every sale's escrow. Gate
    /// admins only.
    pub fn remove_stuck_tokens(
        env: Env,
        caller: Address,
        sale_id: u64,
        token: Address,
        destination: Address,
    ) -> Result<(), Error> {
        let sale = get_sale(&env, sale_id)?;
        require_sale_admin(&env, &sale, &caller)?;

        let payouts = settlement::sweep(&env, &sale, &token, &destination)?;
        payout::dispatch(&env, &payouts);
        Ok(())
    }

    // Views

    pub fn sale(env: Env, sale_id: u64) -> Result<Sale, Error> {
        get_sale(&env, sale_id)
    }

    pub fn rounds(env: Env, sale_id: u64) -> Vec<Round> {
        get_rounds(&env, sale_id)
    }

    pub fn tier_of(env: Env, sale_id: u64, investor: Address) -> u32 {
        get_tier(&env, sale_id, &investor)
    }

    pub fn participation(env: Env, sale_id: u64, investor: Address) -> Option<Participation> {
        get_participation(&env, sale_id, &investor)
    }

    pub fn is_participated(env: Env, sale_id: u64, investor: Address) -> bool {
        get_participation(&env, sale_id, &investor).is_some()
    }

    pub fn participant_count(env: Env, sale_id: u64) -> Result<u32, Error> {
        Ok(get_sale(&env, sale_id)?.participants)
    }

    pub fn is_finished(env: Env, sale_id: u64) -> Result<bool, Error> {
        Ok(get_sale(&env, sale_id)?.stage.is_finished())
    }

    pub fn is_successful(env: Env, sale_id: u64) -> Result<bool, Error> {
        Ok(get_sale(&env, sale_id)?.stage == Stage::Successful)
    }

    /// Sale tokens the investor can currently withdraw.
    pub fn claimable(env: Env, sale_id: u64, investor: Address) -> Result<i128, Error> {
        let sale = get_sale(&env, sale_id)?;
        if sale.stage != Stage::Successful {
            return Ok(0);
        }
        Ok(get_participation(&env, sale_id, &investor)
            .filter(|record| !record.withdrawn)
            .map(|record| record.amount_bought)
            .unwrap_or(0))
    }

    pub fn escrowed(env: Env, token: Address) -> i128 {
        get_escrowed(&env, &token)
    }
}
