use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdError, Uint128};

use geyser_common::query_balance;

use crate::accounting;
use crate::error::ContractError;
use crate::execute::accounting_response;
use crate::msg::UnstakeQueryResponse;
use crate::state::{UserTotals, CONFIG, SCHEDULES, TOTALS, USER_TOTALS};

pub fn query_config(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(to_json_binary(&config)?)
}

pub fn query_totals(deps: Deps) -> Result<Binary, ContractError> {
    let totals = TOTALS.load(deps.storage)?;
    Ok(to_json_binary(&totals)?)
}

/// Live staking-pool balance. Reflects rebases immediately.
pub fn query_total_staked(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let balance = query_balance(&deps.querier, &config.staking_token, &config.staking_pool)?;
    Ok(to_json_binary(&balance)?)
}

pub fn query_total_staked_for(deps: Deps, address: String) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let totals = TOTALS.load(deps.storage)?;
    let addr = deps.api.addr_validate(&address)?;
    let user_shares = USER_TOTALS
        .may_load(deps.storage, &addr)?
        .map(|user| user.staking_shares)
        .unwrap_or_default();

    let balance = query_balance(&deps.querier, &config.staking_token, &config.staking_pool)?;
    let staked = accounting::amount_from_shares(user_shares, totals.staking_shares, balance)?;
    Ok(to_json_binary(&staked)?)
}

/// Token value of the still-vesting distribution shares, as of the last
/// refresh.
pub fn query_total_locked(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let totals = TOTALS.load(deps.storage)?;
    let balance = query_balance(
        &deps.querier,
        &config.distribution_token,
        &config.distribution_pool,
    )?;
    let locked =
        accounting::amount_from_shares(totals.locked_shares, totals.distribution_shares(), balance)?;
    Ok(to_json_binary(&locked)?)
}

pub fn query_total_unlocked(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let totals = TOTALS.load(deps.storage)?;
    let balance = query_balance(
        &deps.querier,
        &config.distribution_token,
        &config.distribution_pool,
    )?;
    let unlocked = accounting::amount_from_shares(
        totals.unlocked_shares,
        totals.distribution_shares(),
        balance,
    )?;
    Ok(to_json_binary(&unlocked)?)
}

/// Simulate an unstake against a settled snapshot and report the reward it
/// would pay. Nothing is persisted.
pub fn query_unstake(
    deps: Deps,
    env: Env,
    address: String,
    amount: Uint128,
) -> Result<Binary, ContractError> {
    let addr = deps.api.addr_validate(&address)?;
    let mut books = accounting::settle_books(deps, &env, Some(&addr))?;
    let mut user = books
        .user
        .take()
        .unwrap_or_else(|| UserTotals::new(env.block.time));

    let outcome = accounting::compute_unstake(
        &books.config,
        &mut books.totals,
        &mut user,
        amount,
        books.staking_pool_balance,
        books.distribution_pool_balance,
        env.block.time,
    )?;

    Ok(to_json_binary(&UnstakeQueryResponse {
        reward_amount: outcome.reward_amount,
    })?)
}

/// The `UpdateAccounting` figures against a settled snapshot. Nothing is
/// persisted.
pub fn query_accounting(
    deps: Deps,
    env: Env,
    address: Option<String>,
) -> Result<Binary, ContractError> {
    let addr = address
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    let books = accounting::settle_books(deps, &env, addr.as_ref())?;
    Ok(to_json_binary(&accounting_response(&books)?)?)
}

pub fn query_unlock_schedule_count(deps: Deps) -> Result<Binary, ContractError> {
    let schedules = SCHEDULES.load(deps.storage)?;
    Ok(to_json_binary(&(schedules.len() as u32))?)
}

pub fn query_unlock_schedule(deps: Deps, index: u32) -> Result<Binary, ContractError> {
    let schedules = SCHEDULES.load(deps.storage)?;
    let schedule = schedules.get(index as usize).ok_or_else(|| {
        StdError::generic_err(format!("no unlock schedule at index {}", index))
    })?;
    Ok(to_json_binary(schedule)?)
}
