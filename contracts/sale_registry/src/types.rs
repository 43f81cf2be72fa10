use soroban_sdk::{contracttype, Address};

pub const BPS_DENOMINATOR: i128 = 10_000;
pub const MAX_FEE_BPS: u32 = 10_000;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RegistryConfig {
    pub access_gate: Address,
    pub fee_recipient: Address,
    pub fee_bps: u32,
}

/// Fee parameters copied into a sale when it is deployed.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FeeSnapshot {
    pub fee_bps: u32,
    pub recipient: Address,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleTerms {
    pub token: Address,
    pub owner: Address,
    pub price: i128,       // base units per whole sale token
    pub token_scale: i128, // 10^decimals of the sale token
    pub sale_start: u64,
    pub sale_end: u64,
    pub public_round: u32, // 0 disables the public round
    pub hard_cap: i128,
    pub soft_cap: i128,
}

/// Sale terms, unset until the sale is configured.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Terms {
    Unset,
    Set(SaleTerms),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Stage {
    Pending,
    Configured,
    Scheduled,
    Successful,
    Cancelled,
}

impl Stage {
    pub fn is_finished(self) -> bool {
        matches!(self, Stage::Successful | Stage::Cancelled)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Sale {
    pub id: u64,
    pub access_gate: Address,
    pub base_token: Address,
    pub fee: FeeSnapshot,
    pub burn_leftover: bool,
    pub created_at: u64,
    pub stage: Stage,
    pub terms: Terms,
    pub total_tokens_sold: i128,
    pub total_raised: i128,
    pub tokens_deposited: i128,
    pub participants: u32,
    pub earnings_withdrawn: bool,
    pub leftover_withdrawn: bool,
    pub deposit_reclaimed: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Round {
    pub tier_id: u32,
    pub start_time: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Participation {
    pub tier_used: u32,
    pub amount_bought: i128,
    pub amount_paid: i128,
    pub timestamp: u64,
    pub withdrawn: bool,
}

/// Outbound movement produced by a settlement step, dispatched only after
/// the step's flags have been stored.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Payout {
    Send(Address, Address, i128), // token, recipient, amount
    Burn(Address, i128),          // token, amount
}

#[contracttype]
pub enum DataKey {
    Config,
    SaleCount,
    SaleAt(u32),
    Sale(u64),
    Rounds(u64),
    Tier(u64, Address),
    Participation(u64, Address),
    Escrowed(Address),
}
