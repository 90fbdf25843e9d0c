use cosmwasm_std::{
    Addr, DepsMut, Event, Int128, MessageInfo, Response, Storage, Uint128, Uint256,
};

use crate::error::ContractError;
use crate::state::{ALLOWANCES, BALANCES, CONFIG, SUPPLY};

pub fn transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let recipient = deps.api.addr_validate(&recipient)?;
    move_fragments(deps.storage, &info.sender, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("from", info.sender.to_string())
        .add_attribute("to", recipient.to_string())
        .add_attribute("amount", amount.to_string()))
}

pub fn transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let owner = deps.api.addr_validate(&owner)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    spend_allowance(deps.storage, &owner, &info.sender, amount)?;
    move_fragments(deps.storage, &owner, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_from")
        .add_attribute("spender", info.sender.to_string())
        .add_attribute("from", owner.to_string())
        .add_attribute("to", recipient.to_string())
        .add_attribute("amount", amount.to_string()))
}

pub fn increase_allowance(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let current = ALLOWANCES
        .may_load(deps.storage, (&info.sender, &spender))?
        .unwrap_or_default();
    let updated = current.checked_add(amount)?;
    ALLOWANCES.save(deps.storage, (&info.sender, &spender), &updated)?;

    Ok(Response::new()
        .add_attribute("action", "increase_allowance")
        .add_attribute("owner", info.sender.to_string())
        .add_attribute("spender", spender.to_string())
        .add_attribute("allowance", updated.to_string()))
}

pub fn decrease_allowance(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let current = ALLOWANCES
        .may_load(deps.storage, (&info.sender, &spender))?
        .unwrap_or_default();
    // clamps at zero rather than failing
    let updated = current.saturating_sub(amount);
    if updated.is_zero() {
        ALLOWANCES.remove(deps.storage, (&info.sender, &spender));
    } else {
        ALLOWANCES.save(deps.storage, (&info.sender, &spender), &updated)?;
    }

    Ok(Response::new()
        .add_attribute("action", "decrease_allowance")
        .add_attribute("owner", info.sender.to_string())
        .add_attribute("spender", spender.to_string())
        .add_attribute("allowance", updated.to_string()))
}

/// Apply a signed supply delta and rescale every visible balance by moving
/// `gons_per_fragment`. Gon balances are untouched, so holders keep the same
/// proportional claim on the new supply.
pub fn rebase(
    deps: DepsMut,
    info: MessageInfo,
    epoch: u64,
    supply_delta: Int128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::NotOwner);
    }

    let mut supply = SUPPLY.load(deps.storage)?;
    let new_supply = if supply_delta.is_negative() {
        supply
            .total_supply
            .checked_sub(supply_delta.unsigned_abs())
            .map_err(|_| ContractError::InvalidSupply)?
    } else {
        supply
            .total_supply
            .checked_add(supply_delta.unsigned_abs())
            .map_err(|_| ContractError::InvalidSupply)?
    };
    if new_supply.is_zero() {
        return Err(ContractError::InvalidSupply);
    }

    supply.total_supply = new_supply;
    supply.gons_per_fragment = supply.total_gons / Uint256::from(new_supply);
    supply.epoch = epoch;
    SUPPLY.save(deps.storage, &supply)?;

    Ok(Response::new()
        .add_attribute("action", "rebase")
        .add_attribute("epoch", epoch.to_string())
        .add_attribute("supply_delta", supply_delta.to_string())
        .add_event(
            Event::new("elastic_rebase")
                .add_attribute("epoch", epoch.to_string())
                .add_attribute("total_supply", new_supply.to_string()),
        ))
}

pub fn transfer_ownership(
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

fn move_fragments(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let supply = SUPPLY.load(storage)?;
    let gons = supply.to_gons(amount)?;

    let from_balance = BALANCES.may_load(storage, from)?.unwrap_or_default();
    let new_from = from_balance
        .checked_sub(gons)
        .map_err(|_| ContractError::InsufficientBalance {
            needed: amount,
            available: supply
                .to_fragments(from_balance)
                .unwrap_or_else(|_| Uint128::MAX),
        })?;
    BALANCES.save(storage, from, &new_from)?;

    let to_balance = BALANCES.may_load(storage, to)?.unwrap_or_default();
    BALANCES.save(storage, to, &to_balance.checked_add(gons)?)?;

    Ok(())
}

fn spend_allowance(
    storage: &mut dyn Storage,
    owner: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let current = ALLOWANCES
        .may_load(storage, (owner, spender))?
        .unwrap_or_default();
    let remaining = current
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientAllowance {
            needed: amount,
            available: current,
        })?;
    if remaining.is_zero() {
        ALLOWANCES.remove(storage, (owner, spender));
    } else {
        ALLOWANCES.save(storage, (owner, spender), &remaining)?;
    }
    Ok(())
}
