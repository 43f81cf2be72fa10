//! Post-sale settlement. Each step checks its preconditions, stores its
//! completion flags and escrow release, and only then hands back the
//! payouts for the caller to dispatch.

use crate::errors::Error;
use crate::events;
use crate::sale::Action;
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{token, vec, Address, Env, Vec};

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

/// Close the sale. The outcome is decided here once and never revisited.
pub fn finish(env: &Env, sale: &mut Sale) -> Result<bool, Error> {
    sale.guard(Action::Finish, now(env))?;

    let successful = sale.total_tokens_sold >= sale.terms()?.soft_cap;
    sale.stage = if successful {
        Stage::Successful
    } else {
        Stage::Cancelled
    };
    set_sale(env, sale);

    events::sale_finished(env, sale.id, successful, sale.total_tokens_sold);
    Ok(successful)
}

fn take_record(env: &Env, sale: &Sale, investor: &Address) -> Result<Participation, Error> {
    let mut record = get_participation(env, sale.id, investor).ok_or(Error::NotParticipant)?;
    if record.withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }
    record.withdrawn = true;
    set_participation(env, sale.id, investor, &record);
    Ok(record)
}

pub fn claim_tokens(env: &Env, sale: &Sale, investor: &Address) -> Result<Vec<Payout>, Error> {
    sale.guard(Action::SuccessPath, now(env))?;
    let token = sale.terms()?.token.clone();

    let record = take_record(env, sale, investor)?;
    release_escrow(env, &token, record.amount_bought)?;

    events::tokens_withdrawn(env, sale.id, investor, record.amount_bought);
    Ok(vec![
        env,
        Payout::Send(token, investor.clone(), record.amount_bought),
    ])
}

/// Split of the raised base currency as `(owner_amount, fee_amount)`.
pub fn fee_split(raised: i128, fee_bps: u32) -> Result<(i128, i128), Error> {
    let fee = raised
        .checked_mul(i128::from(fee_bps))
        .ok_or(Error::Overflow)?
        / BPS_DENOMINATOR;
    Ok((raised - fee, fee))
}

pub fn withdraw_earnings(env: &Env, sale: &mut Sale, owner: &Address) -> Result<Vec<Payout>, Error> {
    sale.require_owner(owner)?;
    sale.guard(Action::SuccessPath, now(env))?;
    if sale.earnings_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }
    earnings_payouts(env, sale, owner)
}

fn earnings_payouts(env: &Env, sale: &mut Sale, owner: &Address) -> Result<Vec<Payout>, Error> {
    let (owner_amount, fee_amount) = fee_split(sale.total_raised, sale.fee.fee_bps)?;

    sale.earnings_withdrawn = true;
    set_sale(env, sale);
    release_escrow(env, &sale.base_token, sale.total_raised)?;

    let mut payouts = Vec::new(env);
    if fee_amount > 0 {
        payouts.push_back(Payout::Send(
            sale.base_token.clone(),
            sale.fee.recipient.clone(),
            fee_amount,
        ));
    }
    if owner_amount > 0 {
        payouts.push_back(Payout::Send(
            sale.base_token.clone(),
            owner.clone(),
            owner_amount,
        ));
    }

    events::earnings_withdrawn(env, sale.id, owner_amount, fee_amount);
    Ok(payouts)
}

pub fn withdraw_leftover(env: &Env, sale: &mut Sale, owner: &Address) -> Result<Vec<Payout>, Error> {
    sale.require_owner(owner)?;
    sale.guard(Action::SuccessPath, now(env))?;
    if sale.leftover_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }
    leftover_payouts(env, sale, owner)
}

fn leftover_payouts(env: &Env, sale: &mut Sale, owner: &Address) -> Result<Vec<Payout>, Error> {
    let token = sale.terms()?.token.clone();
    let leftover = sale
        .tokens_deposited
        .checked_sub(sale.total_tokens_sold)
        .ok_or(Error::Overflow)?;

    sale.leftover_withdrawn = true;
    set_sale(env, sale);

    let mut payouts = Vec::new(env);
    if leftover > 0 {
        release_escrow(env, &token, leftover)?;
        if sale.burn_leftover {
            payouts.push_back(Payout::Burn(token, leftover));
        } else {
            payouts.push_back(Payout::Send(token, owner.clone(), leftover));
        }
    }

    events::leftover_withdrawn(env, sale.id, leftover, sale.burn_leftover);
    Ok(payouts)
}

/// Run whichever of the earnings and leftover withdrawals is still pending.
pub fn withdraw_earnings_and_leftover(
    env: &Env,
    sale: &mut Sale,
    owner: &Address,
) -> Result<Vec<Payout>, Error> {
    sale.require_owner(owner)?;
    sale.guard(Action::SuccessPath, now(env))?;
    if sale.earnings_withdrawn && sale.leftover_withdrawn {
        return Err(Error::AlreadyWithdrawn);
    }

    let mut payouts = Vec::new(env);
    if !sale.earnings_withdrawn {
        payouts.append(&earnings_payouts(env, sale, owner)?);
    }
    if !sale.leftover_withdrawn {
        payouts.append(&leftover_payouts(env, sale, owner)?);
    }
    Ok(payouts)
}

pub fn refund(env: &Env, sale: &Sale, investor: &Address) -> Result<Vec<Payout>, Error> {
    sale.guard(Action::CancelPath, now(env))?;

    let record = take_record(env, sale, investor)?;
    release_escrow(env, &sale.base_token, record.amount_paid)?;

    events::funds_refunded(env, sale.id, investor, record.amount_paid);
    Ok(vec![
        env,
        Payout::Send(sale.base_token.clone(), investor.clone(), record.amount_paid),
    ])
}

pub fn reclaim_deposit(env: &Env, sale: &mut Sale, owner: &Address) -> Result<Vec<Payout>, Error> {
    let token = sale.require_owner(owner)?.token.clone();
    sale.guard(Action::CancelPath, now(env))?;
    if sale.tokens_deposited == 0 {
        return Err(Error::TokensNotDeposited);
    }
    if sale.deposit_reclaimed {
        return Err(Error::AlreadyWithdrawn);
    }

    let amount = sale.tokens_deposited;
    sale.deposit_reclaimed = true;
    set_sale(env, sale);
    release_escrow(env, &token, amount)?;

    events::deposit_reclaimed(env, sale.id, owner, amount);
    Ok(vec![env, Payout::Send(token, owner.clone(), amount)])
}

/// Sweep tokens the registry holds beyond what every sale owes. The sale
/// token itself only leaves through the dedicated withdrawal paths.
pub fn sweep(
    env: &Env,
    sale: &Sale,
    token: &Address,
    destination: &Address,
) -> Result<Vec<Payout>, Error> {
    if let Ok(terms) = sale.terms() {
        if terms.token == *token {
            return Err(Error::CannotSweepSaleToken);
        }
    }

    let held = token::Client::new(env, token).balance(&env.current_contract_address());
    let surplus = held - get_escrowed(env, token);
    if surplus <= 0 {
        return Err(Error::NothingToSweep);
    }

    events::stuck_tokens_swept(env, sale.id, token, destination, surplus);
    Ok(vec![
        env,
        Payout::Send(token.clone(), destination.clone(), surplus),
    ])
}
