use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{Config, GlobalTotals, CONFIG, SCHEDULES, TOTALS};

const CONTRACT_NAME: &str = "crates.io:token-geyser";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.start_bonus > 100 {
        return Err(ContractError::StartBonusTooHigh {
            start_bonus: msg.start_bonus,
        });
    }
    if msg.bonus_period_seconds == 0 {
        return Err(ContractError::BonusPeriodZero);
    }

    let config = Config {
        owner: info.sender.clone(),
        staking_token: deps.api.addr_validate(&msg.staking_token)?,
        distribution_token: deps.api.addr_validate(&msg.distribution_token)?,
        staking_pool: deps.api.addr_validate(&msg.staking_pool)?,
        distribution_pool: deps.api.addr_validate(&msg.distribution_pool)?,
        max_unlock_schedules: msg.max_unlock_schedules,
        start_bonus: msg.start_bonus,
        bonus_period_seconds: msg.bonus_period_seconds,
        initial_shares_per_token: msg.initial_shares_per_token,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTALS.save(deps.storage, &GlobalTotals::new(env.block.time))?;
    SCHEDULES.save(deps.storage, &vec![])?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "token-geyser")
        .add_attribute("owner", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Stake { amount, data } => execute::stake(deps, env, info, amount, data),
        ExecuteMsg::StakeFor {
            beneficiary,
            amount,
            data,
        } => execute::stake_for(deps, env, info, beneficiary, amount, data),
        ExecuteMsg::Unstake { amount, data } => execute::unstake(deps, env, info, amount, data),
        ExecuteMsg::UpdateAccounting {} => execute::update_accounting(deps, env, info),
        ExecuteMsg::LockTokens {
            amount,
            duration_seconds,
        } => execute::lock_tokens(deps, env, info, amount, duration_seconds),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute::transfer_ownership(deps, info, new_owner)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Totals {} => query::query_totals(deps),
        QueryMsg::TotalStaked {} => query::query_total_staked(deps),
        QueryMsg::TotalStakedFor { address } => query::query_total_staked_for(deps, address),
        QueryMsg::TotalLocked {} => query::query_total_locked(deps),
        QueryMsg::TotalUnlocked {} => query::query_total_unlocked(deps),
        QueryMsg::UnstakeQuery { address, amount } => {
            query::query_unstake(deps, env, address, amount)
        }
        QueryMsg::Accounting { address } => query::query_accounting(deps, env, address),
        QueryMsg::UnlockScheduleCount {} => query::query_unlock_schedule_count(deps),
        QueryMsg::UnlockSchedule { index } => query::query_unlock_schedule(deps, index),
    }
}
