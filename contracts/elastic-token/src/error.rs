use cosmwasm_std::{ConversionOverflowError, OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("caller is not the owner")]
    NotOwner,

    #[error("total supply must stay above zero and within the uint128 range")]
    InvalidSupply,

    #[error("insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance { needed: Uint128, available: Uint128 },

    #[error("insufficient allowance: needed {needed}, available {available}")]
    InsufficientAllowance { needed: Uint128, available: Uint128 },
}
