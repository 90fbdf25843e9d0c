use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, QuerierWrapper, StdResult, Uint128, WasmMsg};

/// Execute interface of a CW20-shaped fungible ledger.
///
/// The geyser only ever moves value with these two variants, so any token
/// whose execute API is a superset (the elastic token, a vanilla cw20) can
/// serve as staking or distribution asset.
#[cw_serde]
pub enum TokenExecuteMsg {
    /// Move `amount` from the calling account to `recipient`.
    Transfer { recipient: String, amount: Uint128 },
    /// Move `amount` from `owner` to `recipient` using the caller's allowance.
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
}

/// Query interface of a CW20-shaped fungible ledger.
#[cw_serde]
pub enum TokenQueryMsg {
    Balance { address: String },
    TokenInfo {},
    Allowance { owner: String, spender: String },
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct TokenInfoResponse {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

#[cw_serde]
pub struct AllowanceResponse {
    pub allowance: Uint128,
}

/// Build a `Transfer` execute message on `token`.
pub fn transfer_msg(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&TokenExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    })
}

/// Build a `TransferFrom` execute message on `token`.
pub fn transfer_from_msg(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&TokenExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    })
}

/// Read the live balance of `address` on `token`.
pub fn query_balance(querier: &QuerierWrapper, token: &Addr, address: &Addr) -> StdResult<Uint128> {
    let res: BalanceResponse = querier.query_wasm_smart(
        token,
        &TokenQueryMsg::Balance {
            address: address.to_string(),
        },
    )?;
    Ok(res.balance)
}
