use cosmwasm_std::{to_json_binary, Binary, Deps};

use geyser_common::{AllowanceResponse, BalanceResponse, TokenInfoResponse};

use crate::error::ContractError;
use crate::state::{ALLOWANCES, BALANCES, CONFIG, SUPPLY};

pub fn query_balance(deps: Deps, address: String) -> Result<Binary, ContractError> {
    let addr = deps.api.addr_validate(&address)?;
    let supply = SUPPLY.load(deps.storage)?;
    let gons = BALANCES.may_load(deps.storage, &addr)?.unwrap_or_default();
    Ok(to_json_binary(&BalanceResponse {
        balance: supply.to_fragments(gons)?,
    })?)
}

pub fn query_token_info(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let supply = SUPPLY.load(deps.storage)?;
    Ok(to_json_binary(&TokenInfoResponse {
        name: config.name,
        symbol: config.symbol,
        decimals: config.decimals,
        total_supply: supply.total_supply,
    })?)
}

pub fn query_allowance(deps: Deps, owner: String, spender: String) -> Result<Binary, ContractError> {
    let owner = deps.api.addr_validate(&owner)?;
    let spender = deps.api.addr_validate(&spender)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&owner, &spender))?
        .unwrap_or_default();
    Ok(to_json_binary(&AllowanceResponse { allowance })?)
}
