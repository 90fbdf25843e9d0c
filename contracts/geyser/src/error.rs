use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    MultiplyRatio(#[from] CheckedMultiplyRatioError),

    #[error("caller is not the owner")]
    NotOwner,

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("beneficiary address is empty")]
    BeneficiaryIsNull,

    #[error("start bonus {start_bonus} exceeds 100 percent")]
    StartBonusTooHigh { start_bonus: u16 },

    #[error("bonus period must be greater than zero")]
    BonusPeriodZero,

    #[error("unlock schedule limit of {max} reached")]
    ScheduleLimit { max: u32 },

    #[error("stake of {amount} is too small to mint any staking shares")]
    StakeTooSmall { amount: Uint128 },

    #[error("unstake of {amount} is too small to burn any staking shares")]
    UnstakeTooSmall { amount: Uint128 },

    #[error("unstake of {requested} exceeds staked balance of {staked}")]
    UnstakeExceedsBalance { requested: Uint128, staked: Uint128 },
}
