use crate::types::Payout;
use soroban_sdk::{token, Env, Vec};

pub fn dispatch(env: &Env, payouts: &Vec<Payout>) {
    let registry = env.current_contract_address();
    for payout in payouts.iter() {
        match payout {
            Payout::Send(token, to, amount) => {
                token::Client::new(env, &token).transfer(&registry, &to, &amount);
            }
            Payout::Burn(token, amount) => {
                token::Client::new(env, &token).burn(&registry, &amount);
            }
        }
    }
}
