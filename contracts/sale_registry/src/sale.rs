//! Sale lifecycle up to the end of the selling window: configuration,
//! round schedule, tier grants, token deposit and participation.

use crate::errors::Error;
use crate::events;
use crate::rounds;
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contracttype, token, Address, Env, Vec};

/// Arguments of `set_sale_params`, grouped to keep the entry point narrow.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleParams {
    pub token: Address,
    pub sale_owner: Address,
    pub price: i128,
    pub sale_end: u64,
    pub sale_start: u64,
    pub public_round: u32,
    pub hard_cap: i128,
    pub soft_cap: i128,
}

/// Operations whose legality depends on the sale stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Configure,
    SetRounds,
    GrantTiers,
    Deposit,
    Participate,
    Finish,
    SuccessPath,
    CancelPath,
}

impl Sale {
    pub fn terms(&self) -> Result<&SaleTerms, Error> {
        match &self.terms {
            Terms::Set(terms) => Ok(terms),
            Terms::Unset => Err(Error::NotConfigured),
        }
    }

    pub fn require_owner(&self, who: &Address) -> Result<&SaleTerms, Error> {
        let terms = self.terms()?;
        if terms.owner != *who {
            return Err(Error::NotSaleOwner);
        }
        Ok(terms)
    }

    /// Stage transition table. Every stage-dependent precondition is
    /// checked here and nowhere else.
    pub fn guard(&self, action: Action, now: u64) -> Result<(), Error> {
        use Stage::*;

        match (action, self.stage) {
            (Action::Configure, Pending) => Ok(()),
            (Action::Configure, _) => Err(Error::AlreadyConfigured),

            (Action::SuccessPath, Successful) => Ok(()),
            (Action::SuccessPath, Cancelled) => Err(Error::SaleNotSuccessful),
            (Action::SuccessPath, _) => Err(Error::SaleNotFinished),

            (Action::CancelPath, Cancelled) => Ok(()),
            (Action::CancelPath, _) => Err(Error::SaleNotCancelled),

            (_, Successful | Cancelled) => Err(Error::AlreadyFinished),

            (Action::GrantTiers, _) => Ok(()),

            (_, Pending) => Err(Error::NotConfigured),

            (Action::SetRounds, Configured) => Ok(()),
            (Action::SetRounds, _) => Err(Error::RoundsAlreadySet),

            (Action::Deposit, _) if self.tokens_deposited > 0 => Err(Error::AlreadyDeposited),
            (Action::Deposit, _) => Ok(()),

            (Action::Participate, Configured) => Err(Error::RoundsNotSet),
            (Action::Participate, _) if self.tokens_deposited == 0 => {
                Err(Error::TokensNotDeposited)
            }
            (Action::Participate, _) => Ok(()),

            (Action::Finish, _) => {
                if now < self.terms()?.sale_end {
                    return Err(Error::SaleRunning);
                }
                Ok(())
            }
        }
    }
}

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

pub fn new_sale(
    env: &Env,
    id: u64,
    config: &RegistryConfig,
    base_token: Address,
    burn_leftover: bool,
) -> Sale {
    Sale {
        id,
        access_gate: config.access_gate.clone(),
        base_token,
        fee: FeeSnapshot {
            fee_bps: config.fee_bps,
            recipient: config.fee_recipient.clone(),
        },
        burn_leftover,
        created_at: now(env),
        stage: Stage::Pending,
        terms: Terms::Unset,
        total_tokens_sold: 0,
        total_raised: 0,
        tokens_deposited: 0,
        participants: 0,
        earnings_withdrawn: false,
        leftover_withdrawn: false,
        deposit_reclaimed: false,
    }
}

pub fn configure(env: &Env, sale: &mut Sale, params: SaleParams) -> Result<(), Error> {
    let now = now(env);
    sale.guard(Action::Configure, now)?;

    let registry = env.current_contract_address();
    if params.token == registry || params.sale_owner == registry {
        return Err(Error::InvalidAddress);
    }
    if params.token == sale.base_token {
        return Err(Error::InvalidAddress);
    }
    if params.price <= 0 || params.hard_cap <= 0 || params.soft_cap <= 0 {
        return Err(Error::InvalidAmount);
    }
    if params.soft_cap > params.hard_cap {
        return Err(Error::InvalidAmount);
    }
    if params.sale_end <= now {
        return Err(Error::InvalidSaleEnd);
    }
    if params.sale_start >= params.sale_end {
        return Err(Error::InvalidSaleStart);
    }

    let decimals = token::Client::new(env, &params.token).decimals();
    let token_scale = 10i128.checked_pow(decimals).ok_or(Error::Overflow)?;

    let terms = SaleTerms {
        token: params.token,
        owner: params.sale_owner,
        price: params.price,
        token_scale,
        sale_start: params.sale_start,
        sale_end: params.sale_end,
        public_round: params.public_round,
        hard_cap: params.hard_cap,
        soft_cap: params.soft_cap,
    };

    events::sale_created(env, sale.id, &terms);
    sale.terms = Terms::Set(terms);
    sale.stage = Stage::Configured;
    set_sale(env, sale);
    Ok(())
}

pub fn set_schedule(env: &Env, sale: &mut Sale, start_times: &Vec<u64>) -> Result<(), Error> {
    let now = now(env);
    sale.guard(Action::SetRounds, now)?;

    let terms = sale.terms()?;
    let schedule =
        rounds::build_schedule(env, start_times, now, terms.sale_start, terms.sale_end)?;

    set_rounds(env, sale.id, &schedule);
    sale.stage = Stage::Scheduled;
    set_sale(env, sale);

    for round in schedule.iter() {
        events::round_added(env, sale.id, round.tier_id, round.start_time);
    }
    Ok(())
}

pub fn grant_tiers(
    env: &Env,
    sale: &Sale,
    investors: &Vec<Address>,
    tiers: &Vec<u32>,
) -> Result<(), Error> {
    sale.guard(Action::GrantTiers, now(env))?;
    if investors.len() != tiers.len() {
        return Err(Error::LengthMismatch);
    }

    for (investor, tier) in investors.iter().zip(tiers.iter()) {
        set_tier(env, sale.id, &investor, tier);
    }

    events::tiers_granted(env, sale.id, investors.len());
    Ok(())
}

pub fn deposit(env: &Env, sale: &mut Sale, owner: &Address) -> Result<(), Error> {
    let terms = sale.require_owner(owner)?.clone();
    sale.guard(Action::Deposit, now(env))?;

    sale.tokens_deposited = terms.hard_cap;
    set_sale(env, sale);
    lock_escrow(env, &terms.token, terms.hard_cap)?;

    let registry = env.current_contract_address();
    token::Client::new(env, &terms.token).transfer_from(
        &registry,
        owner,
        &registry,
        &terms.hard_cap,
    );

    events::tokens_deposited(env, sale.id, owner, terms.hard_cap);
    Ok(())
}

pub fn current_round(env: &Env, sale: &Sale) -> u32 {
    match sale.terms() {
        Ok(terms) => {
            let schedule = get_rounds(env, sale.id);
            rounds::current_round(&schedule, terms.sale_end, now(env))
        }
        Err(_) => 0,
    }
}

/// Granted tiers open from their own round onwards; the public round, when
/// set, opens the sale to everyone.
pub fn is_eligible(granted_tier: u32, open_round: u32, public_round: u32) -> bool {
    if public_round != 0 && open_round >= public_round {
        return true;
    }
    granted_tier != 0 && granted_tier <= open_round
}

pub fn tokens_for(amount: i128, terms: &SaleTerms) -> Result<i128, Error> {
    amount
        .checked_mul(terms.token_scale)
        .map(|scaled| scaled / terms.price)
        .ok_or(Error::Overflow)
}

pub fn participate(
    env: &Env,
    sale: &mut Sale,
    investor: &Address,
    round: u32,
    amount: i128,
) -> Result<i128, Error> {
    let now = now(env);
    sale.guard(Action::Participate, now)?;

    if get_participation(env, sale.id, investor).is_some() {
        return Err(Error::AlreadyParticipated);
    }
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let terms = sale.terms()?.clone();
    let open_round = current_round(env, sale);
    if open_round == 0 {
        return Err(Error::RoundNotOpen);
    }
    if round != open_round {
        return Err(Error::RoundMismatch);
    }
    if !is_eligible(get_tier(env, sale.id, investor), open_round, terms.public_round) {
        return Err(Error::NotEligible);
    }

    let tokens = tokens_for(amount, &terms)?;
    if tokens == 0 {
        return Err(Error::InvalidAmount);
    }
    let total_sold = sale
        .total_tokens_sold
        .checked_add(tokens)
        .ok_or(Error::Overflow)?;
    if total_sold > terms.hard_cap {
        return Err(Error::HardCapExceeded);
    }
    let total_raised = sale
        .total_raised
        .checked_add(amount)
        .ok_or(Error::Overflow)?;

    let record = Participation {
        tier_used: open_round,
        amount_bought: tokens,
        amount_paid: amount,
        timestamp: now,
        withdrawn: false,
    };
    set_participation(env, sale.id, investor, &record);

    sale.total_tokens_sold = total_sold;
    sale.total_raised = total_raised;
    sale.participants = sale.participants.checked_add(1).ok_or(Error::Overflow)?;
    set_sale(env, sale);
    lock_escrow(env, &sale.base_token, amount)?;

    token::Client::new(env, &sale.base_token).transfer(
        investor,
        &env.current_contract_address(),
        &amount,
    );

    events::tokens_sold(env, sale.id, investor, tokens);
    Ok(tokens)
}
