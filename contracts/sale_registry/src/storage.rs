use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env, Vec};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<RegistryConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &RegistryConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_sale_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::SaleCount)
        .unwrap_or(0)
}

pub fn set_sale_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::SaleCount, &count);
}

pub fn get_sale_at(env: &Env, index: u32) -> Option<u64> {
    env.storage().persistent().get(&DataKey::SaleAt(index))
}

pub fn set_sale_at(env: &Env, index: u32, id: u64) {
    env.storage().persistent().set(&DataKey::SaleAt(index), &id);
}

pub fn get_sale(env: &Env, id: u64) -> Result<Sale, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Sale(id))
        .ok_or(Error::SaleNotFound)
}

pub fn set_sale(env: &Env, sale: &Sale) {
    env.storage()
        .persistent()
        .set(&DataKey::Sale(sale.id), sale);
}

pub fn get_rounds(env: &Env, id: u64) -> Vec<Round> {
    env.storage()
        .persistent()
        .get(&DataKey::Rounds(id))
        .unwrap_or(Vec::new(env))
}

pub fn set_rounds(env: &Env, id: u64, rounds: &Vec<Round>) {
    env.storage()
        .persistent()
        .set(&DataKey::Rounds(id), rounds);
}

pub fn get_tier(env: &Env, id: u64, investor: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Tier(id, investor.clone()))
        .unwrap_or(0)
}

pub fn set_tier(env: &Env, id: u64, investor: &Address, tier: u32) {
    let key = DataKey::Tier(id, investor.clone());
    if tier == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &tier);
    }
}

pub fn get_participation(env: &Env, id: u64, investor: &Address) -> Option<Participation> {
    env.storage()
        .persistent()
        .get(&DataKey::Participation(id, investor.clone()))
}

pub fn set_participation(env: &Env, id: u64, investor: &Address, record: &Participation) {
    env.storage()
        .persistent()
        .set(&DataKey::Participation(id, investor.clone()), record);
}

pub fn get_escrowed(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Escrowed(token.clone()))
        .unwrap_or(0)
}

pub fn lock_escrow(env: &Env, token: &Address, amount: i128) -> Result<(), Error> {
    let total = get_escrowed(env, token)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    env.storage()
        .persistent()
        .set(&DataKey::Escrowed(token.clone()), &total);
    Ok(())
}

pub fn release_escrow(env: &Env, token: &Address, amount: i128) -> Result<(), Error> {
    let total = get_escrowed(env, token)
        .checked_sub(amount)
        .filter(|left| *left >= 0)
        .ok_or(Error::Overflow)?;
    env.storage()
        .persistent()
        .set(&DataKey::Escrowed(token.clone()), &total);
    Ok(())
}
