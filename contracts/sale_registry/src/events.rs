use crate::types::SaleTerms;
use soroban_sdk::{symbol_short, Address, Env};

pub fn sale_deployed(env: &Env, id: u64, base_token: &Address, fee_bps: u32) {
    env.events().publish(
        (symbol_short!("deployed"), id),
        (base_token.clone(), fee_bps),
    );
}

pub fn sale_created(env: &Env, id: u64, terms: &SaleTerms) {
    env.events().publish(
        (symbol_short!("created"), id),
        (
            terms.owner.clone(),
            terms.price,
            terms.sale_end,
            terms.hard_cap,
            terms.soft_cap,
        ),
    );
}

pub fn round_added(env: &Env, id: u64, tier_id: u32, start_time: u64) {
    env.events()
        .publish((symbol_short!("round"), id), (tier_id, start_time));
}

pub fn tiers_granted(env: &Env, id: u64, count: u32) {
    env.events().publish((symbol_short!("granted"), id), count);
}

pub fn tokens_deposited(env: &Env, id: u64, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("deposited"), id), (owner.clone(), amount));
}

pub fn tokens_sold(env: &Env, id: u64, investor: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("sold"), id), (investor.clone(), amount));
}

pub fn sale_finished(env: &Env, id: u64, successful: bool, total_sold: i128) {
    env.events()
        .publish((symbol_short!("finished"), id), (successful, total_sold));
}

pub fn tokens_withdrawn(env: &Env, id: u64, investor: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdrawn"), id), (investor.clone(), amount));
}

pub fn earnings_withdrawn(env: &Env, id: u64, owner_amount: i128, fee_amount: i128) {
    env.events().publish(
        (symbol_short!("earnings"), id),
        (owner_amount, fee_amount),
    );
}

pub fn leftover_withdrawn(env: &Env, id: u64, amount: i128, burned: bool) {
    env.events()
        .publish((symbol_short!("leftover"), id), (amount, burned));
}

pub fn funds_refunded(env: &Env, id: u64, investor: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("refunded"), id), (investor.clone(), amount));
}

pub fn deposit_reclaimed(env: &Env, id: u64, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("reclaimed"), id), (owner.clone(), amount));
}

pub fn stuck_tokens_swept(env: &Env, id: u64, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("swept"), id),
        (token.clone(), to.clone(), amount),
    );
}

pub fn fee_bps_changed(env: &Env, fee_bps: u32) {
    env.events().publish((symbol_short!("fee_bps"),), fee_bps);
}

pub fn fee_recipient_changed(env: &Env, recipient: &Address) {
    env.events()
        .publish((symbol_short!("fee_to"),), recipient.clone());
}
