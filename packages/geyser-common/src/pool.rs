use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, StdResult, Uint128, WasmMsg};

/// Execute interface of a token-pool vault, as seen by its owner.
#[cw_serde]
pub enum PoolExecuteMsg {
    /// Pay out `amount` of the pool's bound token to `to`. Owner only.
    Transfer { to: String, amount: Uint128 },
    /// Hand the vault to a new owner. Owner only.
    TransferOwnership { new_owner: String },
}

/// Build a pool payout message.
pub fn pool_transfer_msg(pool: &Addr, to: &Addr, amount: Uint128) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: pool.to_string(),
        msg: to_json_binary(&PoolExecuteMsg::Transfer {
            to: to.to_string(),
            amount,
        })?,
        funds: vec![],
    })
}
