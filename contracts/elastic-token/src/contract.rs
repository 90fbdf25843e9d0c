use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, Uint256};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{SupplyState, TokenConfig, BALANCES, CONFIG, SUPPLY};

const CONTRACT_NAME: &str = "crates.io:elastic-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.initial_supply.is_zero() {
        return Err(ContractError::InvalidSupply);
    }

    let config = TokenConfig {
        owner: info.sender.clone(),
        name: msg.name,
        symbol: msg.symbol,
        decimals: msg.decimals,
    };
    CONFIG.save(deps.storage, &config)?;

    // largest gon count that divides evenly into the starting supply, so the
    // instantiator's visible balance is exactly `initial_supply`
    let total_gons = Uint256::MAX - (Uint256::MAX % Uint256::from(msg.initial_supply));
    let supply = SupplyState {
        total_supply: msg.initial_supply,
        total_gons,
        gons_per_fragment: total_gons / Uint256::from(msg.initial_supply),
        epoch: 0,
    };
    SUPPLY.save(deps.storage, &supply)?;
    BALANCES.save(deps.storage, &info.sender, &total_gons)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "elastic-token")
        .add_attribute("owner", info.sender.to_string())
        .add_attribute("initial_supply", msg.initial_supply.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            execute::transfer(deps, info, recipient, amount)
        }
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => execute::transfer_from(deps, info, owner, recipient, amount),
        ExecuteMsg::IncreaseAllowance { spender, amount } => {
            execute::increase_allowance(deps, info, spender, amount)
        }
        ExecuteMsg::DecreaseAllowance { spender, amount } => {
            execute::decrease_allowance(deps, info, spender, amount)
        }
        ExecuteMsg::Rebase {
            epoch,
            supply_delta,
        } => execute::rebase(deps, info, epoch, supply_delta),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute::transfer_ownership(deps, info, new_owner)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Balance { address } => query::query_balance(deps, address),
        QueryMsg::TokenInfo {} => query::query_token_info(deps),
        QueryMsg::Allowance { owner, spender } => query::query_allowance(deps, owner, spender),
    }
}
