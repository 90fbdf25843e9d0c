use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, Uint128,
};
use cw2::set_contract_version;

use geyser_common::{query_balance, transfer_msg, BalanceResponse};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{PoolConfig, CONFIG};

const CONTRACT_NAME: &str = "crates.io:token-pool";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = PoolConfig {
        owner: info.sender.clone(),
        token: deps.api.addr_validate(&msg.token)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "token-pool")
        .add_attribute("owner", info.sender.to_string())
        .add_attribute("token", config.token.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { to, amount } => transfer(deps, info, to, amount),
        ExecuteMsg::TransferOwnership { new_owner } => transfer_ownership(deps, info, new_owner),
    }
}

fn transfer(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::NotOwner);
    }
    let to = deps.api.addr_validate(&to)?;

    Ok(Response::new()
        .add_message(transfer_msg(&config.token, &to, amount)?)
        .add_attribute("action", "transfer")
        .add_attribute("to", to.to_string())
        .add_attribute("amount", amount.to_string()))
}

fn transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::NotOwner);
    }

    let previous_owner = config.owner.clone();
    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("previous_owner", previous_owner.to_string())
        .add_attribute("new_owner", config.owner.to_string()))
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => {
            let config = CONFIG.load(deps.storage)?;
            Ok(to_json_binary(&config)?)
        }
        QueryMsg::Balance {} => {
            let config = CONFIG.load(deps.storage)?;
            let balance = query_balance(&deps.querier, &config.token, &env.contract.address)?;
            Ok(to_json_binary(&BalanceResponse { balance })?)
        }
    }
}
