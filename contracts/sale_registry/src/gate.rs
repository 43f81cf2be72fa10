use crate::errors::Error;
use soroban_sdk::{contractclient, Address, Env};

/// The slice of the access gate contract the registry depends on.
#[contractclient(name = "AdminGateClient")]
pub trait AdminGate {
    fn is_admin(env: Env, who: Address) -> bool;
}

pub fn is_admin(env: &Env, gate: &Address, who: &Address) -> bool {
    AdminGateClient::new(env, gate).is_admin(who)
}

pub fn require_admin(env: &Env, gate: &Address, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !is_admin(env, gate, caller) {
        return Err(Error::NotAdmin);
    }
    Ok(())
}
