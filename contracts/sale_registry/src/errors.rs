use soroban_sdk::contracterror;

/// Codes are grouped by kind: 1-9 authorization, 10-29 state,
/// 30-49 validation, 50-59 capacity, 60+ arithmetic.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAdmin = 1,
    NotSaleOwner = 2,
    NotEligible = 3,
    NotParticipant = 4,

    AlreadyInitialized = 10,
    NotInitialized = 11,
    SaleNotFound = 12,
    AlreadyConfigured = 13,
    NotConfigured = 14,
    RoundsAlreadySet = 15,
    RoundsNotSet = 16,
    TokensNotDeposited = 17,
    AlreadyDeposited = 18,
    AlreadyParticipated = 19,
    SaleRunning = 20,
    AlreadyFinished = 21,
    SaleNotFinished = 22,
    SaleNotSuccessful = 23,
    SaleNotCancelled = 24,
    AlreadyWithdrawn = 25,

    InvalidAddress = 30,
    InvalidAmount = 31,
    InvalidSaleEnd = 32,
    InvalidSaleStart = 33,
    EmptySchedule = 34,
    UnsortedSchedule = 35,
    RoundInPast = 36,
    RoundAfterSaleEnd = 37,
    LengthMismatch = 38,
    InvalidFeeBps = 39,
    CannotSweepSaleToken = 40,
    RoundBeforeSaleStart = 41,

    HardCapExceeded = 50,
    RoundNotOpen = 51,
    RoundMismatch = 52,
    NothingToSweep = 53,

    Overflow = 60,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Authorization,
    State,
    Validation,
    Capacity,
    Arithmetic,
}

impl Error {
    pub fn kind(self) -> ErrorKind {
        match self as u32 {
            1..=9 => ErrorKind::Authorization,
            10..=29 => ErrorKind::State,
            30..=49 => ErrorKind::Validation,
            50..=59 => ErrorKind::Capacity,
            _ => ErrorKind::Arithmetic,
        }
    }
}
