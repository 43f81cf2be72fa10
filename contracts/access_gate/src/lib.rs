#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address, Env,
    Vec,
};

contractmeta!(
    key = "Description",
    val = "Admin set consulted by launchpad sales"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAdmin = 3,
    AlreadyAdmin = 4,
    NotFound = 5,
    LastAdmin = 6,
    EmptyAdminSet = 7,
}

#[contracttype]
pub enum DataKey {
    Admins,
}

#[contract]
pub struct AccessGate;

fn load_admins(env: &Env) -> Result<Vec<Address>, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admins)
        .ok_or(Error::NotInitialized)
}

fn save_admins(env: &Env, admins: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Admins, admins);
}

fn require_admin(env: &Env, caller: &Address) -> Result<Vec<Address>, Error> {
    caller.require_auth();
    let admins = load_admins(env)?;
    if !admins.contains(caller) {
        return Err(Error::NotAdmin);
    }
    Ok(admins)
}

#[contractimpl]
impl AccessGate {
    /// Seed the admin set. Duplicate entries are collapsed and every
    /// admin must authorize its own enrollment.
    pub fn initialize(env: Env, admins: Vec<Address>) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admins) {
            return Err(Error::AlreadyInitialized);
        }
        if admins.is_empty() {
            return Err(Error::EmptyAdminSet);
        }

        let mut unique = Vec::new(&env);
        for admin in admins.iter() {
            if !unique.contains(&admin) {
                unique.push_back(admin);
            }
        }
        for admin in unique.iter() {
            admin.require_auth();
        }
        save_admins(&env, &unique);
        Ok(())
    }

    pub fn is_admin(env: Env, who: Address) -> bool {
        load_admins(&env)
            .map(|admins| admins.contains(&who))
            .unwrap_or(false)
    }

    pub fn admins(env: Env) -> Result<Vec<Address>, Error> {
        load_admins(&env)
    }

    pub fn add_admin(env: Env, caller: Address, who: Address) -> Result<(), Error> {
        let mut admins = require_admin(&env, &caller)?;
        if admins.contains(&who) {
            return Err(Error::AlreadyAdmin);
        }

        admins.push_back(who.clone());
        save_admins(&env, &admins);

        env.events().publish((symbol_short!("adm_add"),), (caller, who));
        Ok(())
    }

    /// Remove an admin. Callers may remove themselves, but the set never
    /// drops to zero members.
    pub fn remove_admin(env: Env, caller: Address, who: Address) -> Result<(), Error> {
        let mut admins = require_admin(&env, &caller)?;
        let index = admins.first_index_of(&who).ok_or(Error::NotFound)?;
        if admins.len() == 1 {
            return Err(Error::LastAdmin);
        }

        admins.remove(index);
        save_admins(&env, &admins);

        env.events().publish((symbol_short!("adm_rm"),), (caller, who));
        Ok(())
    }
}
