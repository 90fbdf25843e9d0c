use cosmwasm_std::{
    to_json_binary, Addr, Binary, DepsMut, Env, Event, MessageInfo, Response, Uint128,
};

use geyser_common::{pool_transfer_msg, transfer_from_msg};

use crate::accounting::{self, SettledBooks};
use crate::error::ContractError;
use crate::msg::AccountingResponse;
use crate::state::{StakeEntry, UnlockSchedule, UserTotals, CONFIG, SCHEDULES, TOTALS, USER_TOTALS};

/// Deposit staking tokens for the sender.
pub fn stake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    data: Option<Binary>,
) -> Result<Response, ContractError> {
    let beneficiary = info.sender.clone();
    stake_into(deps, env, info, beneficiary, amount, data)
}

/// Deposit staking tokens credited to `beneficiary`.
pub fn stake_for(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beneficiary: String,
    amount: Uint128,
    data: Option<Binary>,
) -> Result<Response, ContractError> {
    if beneficiary.trim().is_empty() {
        return Err(ContractError::BeneficiaryIsNull);
    }
    let beneficiary = deps.api.addr_validate(&beneficiary)?;
    stake_into(deps, env, info, beneficiary, amount, data)
}

fn stake_into(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    beneficiary: Addr,
    amount: Uint128,
    data: Option<Binary>,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let mut books = accounting::settle_books(deps.as_ref(), &env, Some(&beneficiary))?;

    // shares are priced against the pool balance before the deposit lands;
    // the transfer message below executes after this call returns
    let minted = accounting::shares_from_amount(
        amount,
        books.totals.staking_shares,
        books.staking_pool_balance,
        books.config.initial_shares_per_token,
    )?;
    if minted.is_zero() {
        return Err(ContractError::StakeTooSmall { amount });
    }

    let mut user = books
        .user
        .take()
        .unwrap_or_else(|| UserTotals::new(env.block.time));
    user.stakes.push(StakeEntry {
        shares: minted,
        timestamp: env.block.time,
    });
    user.staking_shares += minted;
    books.totals.staking_shares += minted;

    TOTALS.save(deps.storage, &books.totals)?;
    SCHEDULES.save(deps.storage, &books.schedules)?;
    USER_TOTALS.save(deps.storage, &beneficiary, &user)?;

    // staked value of the beneficiary once the deposit is in the pool
    let total_staked_for = accounting::amount_from_shares(
        user.staking_shares,
        books.totals.staking_shares,
        books.staking_pool_balance + amount,
    )?;

    let deposit_msg = transfer_from_msg(
        &books.config.staking_token,
        &info.sender,
        &books.config.staking_pool,
        amount,
    )?;

    let mut response = Response::new()
        .add_message(deposit_msg)
        .add_attribute("action", "stake")
        .add_attribute("user", beneficiary.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("shares_minted", minted.to_string())
        .add_event(
            Event::new("geyser_staked")
                .add_attribute("user", beneficiary.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("total", total_staked_for.to_string())
                .add_attribute("data", passthrough(&data)),
        );
    if let Some(event) = tokens_unlocked_event(&books)? {
        response = response.add_event(event);
    }

    Ok(response)
}

/// Withdraw staked tokens plus the reward earned by the burned deposits.
pub fn unstake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    data: Option<Binary>,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let mut books = accounting::settle_books(deps.as_ref(), &env, Some(&info.sender))?;
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

    TOTALS.save(deps.storage, &books.totals)?;
    SCHEDULES.save(deps.storage, &books.schedules)?;
    USER_TOTALS.save(deps.storage, &info.sender, &user)?;

    let total_staked_for = accounting::amount_from_shares(
        user.staking_shares,
        books.totals.staking_shares,
        books.staking_pool_balance.checked_sub(amount)?,
    )?;

    // state is settled; value leaves the pools last
    let mut response = Response::new()
        .add_message(pool_transfer_msg(
            &books.config.staking_pool,
            &info.sender,
            amount,
        )?)
        .add_attribute("action", "unstake")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("shares_burned", outcome.shares_burned.to_string())
        .add_attribute("reward", outcome.reward_amount.to_string());
    if !outcome.reward_amount.is_zero() {
        response = response.add_message(pool_transfer_msg(
            &books.config.distribution_pool,
            &info.sender,
            outcome.reward_amount,
        )?);
    }

    response = response
        .add_event(
            Event::new("geyser_unstaked")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("total", total_staked_for.to_string())
                .add_attribute("data", passthrough(&data)),
        )
        .add_event(
            Event::new("geyser_tokens_claimed")
                .add_attribute("user", info.sender.to_string())
                .add_attribute("amount", outcome.reward_amount.to_string()),
        );
    if let Some(event) = tokens_unlocked_event(&books)? {
        response = response.add_event(event);
    }

    Ok(response)
}

/// Settle vesting and share-second accounting for the sender and report the
/// settled figures in the response data.
pub fn update_accounting(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let known_user = USER_TOTALS.has(deps.storage, &info.sender);
    let books = accounting::settle_books(deps.as_ref(), &env, Some(&info.sender))?;

    TOTALS.save(deps.storage, &books.totals)?;
    SCHEDULES.save(deps.storage, &books.schedules)?;
    if known_user {
        if let Some(user) = &books.user {
            USER_TOTALS.save(deps.storage, &info.sender, user)?;
        }
    }

    let accounting = accounting_response(&books)?;

    let mut response = Response::new()
        .add_attribute("action", "update_accounting")
        .add_attribute("user", info.sender.to_string())
        .add_attribute("total_locked", accounting.total_locked.to_string())
        .add_attribute("total_unlocked", accounting.total_unlocked.to_string())
        .set_data(to_json_binary(&accounting)?);
    if let Some(event) = tokens_unlocked_event(&books)? {
        response = response.add_event(event);
    }

    Ok(response)
}

/// Vest `amount` of distribution tokens linearly over `duration_seconds`.
/// Owner only.
pub fn lock_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    duration_seconds: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::NotOwner);
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    if SCHEDULES.load(deps.storage)?.len() as u32 >= config.max_unlock_schedules {
        return Err(ContractError::ScheduleLimit {
            max: config.max_unlock_schedules,
        });
    }

    let mut books = accounting::settle_books(deps.as_ref(), &env, None)?;

    // shares are priced before the deposit lands, like stake
    let locked_shares = accounting::shares_from_amount(
        amount,
        books.totals.distribution_shares(),
        books.distribution_pool_balance,
        config.initial_shares_per_token,
    )?;

    books.schedules.push(UnlockSchedule {
        initial_locked_shares: locked_shares,
        unlocked_shares: Uint128::zero(),
        last_unlock_ts: env.block.time,
        end_ts: env.block.time.plus_seconds(duration_seconds),
        duration_seconds,
    });
    books.totals.locked_shares += locked_shares;

    TOTALS.save(deps.storage, &books.totals)?;
    SCHEDULES.save(deps.storage, &books.schedules)?;

    let total_locked = accounting::amount_from_shares(
        books.totals.locked_shares,
        books.totals.distribution_shares(),
        books.distribution_pool_balance + amount,
    )?;

    let deposit_msg = transfer_from_msg(
        &config.distribution_token,
        &info.sender,
        &config.distribution_pool,
        amount,
    )?;

    let mut response = Response::new()
        .add_message(deposit_msg)
        .add_attribute("action", "lock_tokens")
        .add_attribute("amount", amount.to_string())
        .add_attribute("duration_seconds", duration_seconds.to_string())
        .add_attribute("shares_locked", locked_shares.to_string())
        .add_event(
            Event::new("geyser_tokens_locked")
                .add_attribute("amount", amount.to_string())
                .add_attribute("total", total_locked.to_string())
                .add_attribute("duration_seconds", duration_seconds.to_string()),
        );
    if let Some(event) = tokens_unlocked_event(&books)? {
        response = response.add_event(event);
    }

    Ok(response)
}

/// Hand the geyser to a new owner. Owner only.
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
        .add_attribute("new_owner", config.owner.to_string())
        .add_event(
            Event::new("geyser_ownership_transferred")
                .add_attribute("previous_owner", previous_owner.to_string())
                .add_attribute("new_owner", config.owner.to_string()),
        ))
}

/// The `UpdateAccounting` figures for a settled set of books.
pub fn accounting_response(books: &SettledBooks) -> Result<AccountingResponse, ContractError> {
    let total_unlocked = books.total_unlocked()?;
    let (user_share_seconds, reward_entitlement) = match &books.user {
        Some(user) => (
            user.staking_share_seconds,
            accounting::reward_entitlement(
                total_unlocked,
                user.staking_share_seconds,
                books.totals.staking_share_seconds,
            )?,
        ),
        None => (Uint128::zero(), Uint128::zero()),
    };

    Ok(AccountingResponse {
        total_locked: books.total_locked()?,
        total_unlocked,
        user_staking_share_seconds: user_share_seconds,
        total_staking_share_seconds: books.totals.staking_share_seconds,
        reward_entitlement,
        timestamp: books.totals.last_accounting_ts.seconds(),
    })
}

/// `TokensUnlocked` event for a refresh that vested something.
fn tokens_unlocked_event(books: &SettledBooks) -> Result<Option<Event>, ContractError> {
    if books.newly_unlocked_shares.is_zero() {
        return Ok(None);
    }
    Ok(Some(
        Event::new("geyser_tokens_unlocked")
            .add_attribute("amount", books.newly_unlocked_amount.to_string())
            .add_attribute("total", books.total_locked()?.to_string()),
    ))
}

fn passthrough(data: &Option<Binary>) -> String {
    data.as_ref().map(|b| b.to_base64()).unwrap_or_default()
}
