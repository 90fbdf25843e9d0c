use cosmwasm_schema::{cw_serde, QueryResponses};

use geyser_common::BalanceResponse;

use crate::state::PoolConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub token: String,
}

// Execution is the shared vault interface so the owning contract can build
// messages without depending on this crate.
pub use geyser_common::PoolExecuteMsg as ExecuteMsg;

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PoolConfig)]
    Config {},
    /// Live balance of the bound token held by this vault.
    #[returns(BalanceResponse)]
    Balance {},
}
