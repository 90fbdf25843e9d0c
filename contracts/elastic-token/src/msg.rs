use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Int128, Uint128};

use geyser_common::{AllowanceResponse, BalanceResponse, TokenInfoResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Starting fragment supply; credited in full to the instantiator
    pub initial_supply: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
    },
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
    },
    /// Scale every holder's visible balance by adjusting the total supply.
    /// Owner only.
    Rebase {
        epoch: u64,
        supply_delta: Int128,
    },
    /// Hand the rebase authority to a new owner. Owner only.
    TransferOwnership {
        new_owner: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(BalanceResponse)]
    Balance { address: String },
    #[returns(TokenInfoResponse)]
    TokenInfo {},
    #[returns(AllowanceResponse)]
    Allowance { owner: String, spender: String },
}
