//! Share and vesting arithmetic.
//!
//! Everything here is integer math over `Uint128` with multiplication before
//! division (`checked_multiply_ratio` widens to 256 bits internally). Token
//! amounts are never persisted; the functions take the live pool balances as
//! arguments and the callers read those balances through the token contracts,
//! so an out-of-band rebase is picked up by the very next conversion.

use cosmwasm_std::{Addr, Deps, Env, StdError, Timestamp, Uint128};

use geyser_common::query_balance;

use crate::error::ContractError;
use crate::state::{
    Config, GlobalTotals, UnlockSchedule, UserTotals, CONFIG, SCHEDULES, TOTALS, USER_TOTALS,
};

/// Staking-asset amount -> internal shares at the current pool rate. The
/// balance passed in must be read before the deposit transfer is applied.
pub fn shares_from_amount(
    amount: Uint128,
    total_shares: Uint128,
    pool_balance: Uint128,
    initial_shares_per_token: Uint128,
) -> Result<Uint128, ContractError> {
    if total_shares.is_zero() {
        return Ok(amount.checked_mul(initial_shares_per_token)?);
    }
    Ok(amount.checked_multiply_ratio(total_shares, pool_balance)?)
}

/// Internal shares -> staking-asset amount at the current pool rate.
pub fn amount_from_shares(
    shares: Uint128,
    total_shares: Uint128,
    pool_balance: Uint128,
) -> Result<Uint128, ContractError> {
    if total_shares.is_zero() {
        return Ok(Uint128::zero());
    }
    Ok(shares.checked_multiply_ratio(pool_balance, total_shares)?)
}

/// Advance one schedule to `now` and return the shares released this tick.
///
/// At or past `end_ts` the whole remainder is flushed: summing truncated
/// linear increments alone would strand dust in the locked pool forever.
pub fn unlock_schedule_shares(
    schedule: &mut UnlockSchedule,
    now: Timestamp,
) -> Result<Uint128, ContractError> {
    if schedule.unlocked_shares >= schedule.initial_locked_shares {
        return Ok(Uint128::zero());
    }

    let shares = if now >= schedule.end_ts {
        schedule.last_unlock_ts = schedule.end_ts;
        schedule
            .initial_locked_shares
            .checked_sub(schedule.unlocked_shares)?
    } else {
        let elapsed = now.seconds().saturating_sub(schedule.last_unlock_ts.seconds());
        schedule.last_unlock_ts = now;
        schedule
            .initial_locked_shares
            .checked_multiply_ratio(elapsed, schedule.duration_seconds)?
    };

    schedule.unlocked_shares += shares;
    Ok(shares)
}

/// Advance the global books (and the caller's, when present) to `now`:
/// vest every schedule, then accrue share-seconds for the elapsed interval.
/// Returns the distribution shares that moved from locked to unlocked.
pub fn settle(
    totals: &mut GlobalTotals,
    schedules: &mut [UnlockSchedule],
    user: Option<&mut UserTotals>,
    now: Timestamp,
) -> Result<Uint128, ContractError> {
    let mut newly_unlocked = Uint128::zero();
    for schedule in schedules.iter_mut() {
        newly_unlocked += unlock_schedule_shares(schedule, now)?;
    }
    totals.locked_shares = totals.locked_shares.checked_sub(newly_unlocked)?;
    totals.unlocked_shares += newly_unlocked;

    let elapsed = now.seconds().saturating_sub(totals.last_accounting_ts.seconds());
    totals.staking_share_seconds +=
        totals.staking_shares.checked_mul(Uint128::from(elapsed))?;
    totals.last_accounting_ts = now;

    if let Some(user) = user {
        let elapsed = now.seconds().saturating_sub(user.last_accounting_ts.seconds());
        user.staking_share_seconds +=
            user.staking_shares.checked_mul(Uint128::from(elapsed))?;
        user.last_accounting_ts = now;
    }

    Ok(newly_unlocked)
}

/// Early-withdrawal bonus for a deposit of age `stake_age_seconds`, as an
/// integer rational. Starts at `start_bonus` percent and climbs linearly to
/// 100% at the end of the bonus period.
pub fn bonus_ratio(config: &Config, stake_age_seconds: u64) -> (u128, u128) {
    let period = config.bonus_period_seconds as u128;
    let start = config.start_bonus as u128;
    let capped = (stake_age_seconds as u128).min(period);
    (start * period + (100 - start) * capped, 100 * period)
}

#[derive(Debug)]
pub struct UnstakeOutcome {
    pub shares_burned: Uint128,
    pub share_seconds_burned: Uint128,
    /// Distribution-asset amount owed to the caller
    pub reward_amount: Uint128,
    /// Distribution shares leaving the unlocked pool
    pub reward_shares: Uint128,
}

/// Burn `amount` worth of the user's stake, newest deposit first, pricing
/// the reward slice by slice. The books must already be settled to `now`.
///
/// Each slice is priced against the running totals and the totals are
/// reduced before the next slice, so one unstake pays exactly what the same
/// volume spread over many consecutive unstakes would pay. The share-to-token
/// rate of the distribution pool is fixed across slices: a payout removes
/// balance and shares at the same rate, so re-reading it would only add
/// rounding noise. The unbonused remainder of each slice stays in the
/// unlocked pool for the remaining stakers.
pub fn compute_unstake(
    config: &Config,
    totals: &mut GlobalTotals,
    user: &mut UserTotals,
    amount: Uint128,
    staking_pool_balance: Uint128,
    distribution_pool_balance: Uint128,
    now: Timestamp,
) -> Result<UnstakeOutcome, ContractError> {
    let staked = amount_from_shares(user.staking_shares, totals.staking_shares, staking_pool_balance)?;
    if amount > staked {
        return Err(ContractError::UnstakeExceedsBalance {
            requested: amount,
            staked,
        });
    }

    let shares_to_burn = if staking_pool_balance.is_zero() {
        Uint128::zero()
    } else {
        amount.checked_multiply_ratio(totals.staking_shares, staking_pool_balance)?
    };
    if shares_to_burn.is_zero() {
        return Err(ContractError::UnstakeTooSmall { amount });
    }

    let distribution_shares = totals.distribution_shares();

    let mut remaining = shares_to_burn;
    let mut share_seconds_burned = Uint128::zero();
    let mut reward_amount = Uint128::zero();
    let mut reward_shares = Uint128::zero();

    while !remaining.is_zero() {
        let (entry_shares, entry_ts) = match user.stakes.last() {
            Some(entry) => (entry.shares, entry.timestamp),
            None => return Err(StdError::generic_err("stake journal exhausted").into()),
        };
        let stake_age = now.seconds().saturating_sub(entry_ts.seconds());
        let slice = remaining.min(entry_shares);
        let slice_share_seconds = slice.checked_mul(Uint128::from(stake_age))?;

        let raw_shares = if totals.staking_share_seconds.is_zero() {
            Uint128::zero()
        } else {
            totals
                .unlocked_shares
                .checked_multiply_ratio(slice_share_seconds, totals.staking_share_seconds)?
        };
        let unbonused =
            amount_from_shares(raw_shares, distribution_shares, distribution_pool_balance)?;

        let (bonus_num, bonus_den) = bonus_ratio(config, stake_age);
        let bonused_amount = unbonused.checked_multiply_ratio(bonus_num, bonus_den)?;
        let bonused_shares = raw_shares.checked_multiply_ratio(bonus_num, bonus_den)?;

        reward_amount += bonused_amount;
        reward_shares += bonused_shares;
        share_seconds_burned += slice_share_seconds;

        totals.unlocked_shares = totals.unlocked_shares.checked_sub(bonused_shares)?;
        totals.staking_share_seconds =
            totals.staking_share_seconds.checked_sub(slice_share_seconds)?;
        user.staking_share_seconds =
            user.staking_share_seconds.checked_sub(slice_share_seconds)?;

        if slice == entry_shares {
            user.stakes.pop();
        } else if let Some(entry) = user.stakes.last_mut() {
            entry.shares = entry_shares.checked_sub(slice)?;
        }
        remaining = remaining.checked_sub(slice)?;
    }

    user.staking_shares = user.staking_shares.checked_sub(shares_to_burn)?;
    totals.staking_shares = totals.staking_shares.checked_sub(shares_to_burn)?;

    Ok(UnstakeOutcome {
        shares_burned: shares_to_burn,
        share_seconds_burned,
        reward_amount,
        reward_shares,
    })
}

/// The unbonused claim `user_share_seconds` currently has on the unlocked pool.
pub fn reward_entitlement(
    total_unlocked_amount: Uint128,
    user_share_seconds: Uint128,
    total_share_seconds: Uint128,
) -> Result<Uint128, ContractError> {
    if total_share_seconds.is_zero() {
        return Ok(Uint128::zero());
    }
    Ok(total_unlocked_amount.checked_multiply_ratio(user_share_seconds, total_share_seconds)?)
}

/// Books advanced to the current block plus the pool balances they were
/// settled against. The execute path persists the mutated pieces; the query
/// path drops them.
pub struct SettledBooks {
    pub config: Config,
    pub totals: GlobalTotals,
    pub schedules: Vec<UnlockSchedule>,
    pub user: Option<UserTotals>,
    pub newly_unlocked_shares: Uint128,
    /// Token value that left the locked side this tick. Computed as the
    /// locked-value delta so that the amounts reported across successive
    /// ticks telescope to the locked total with no truncation drift.
    pub newly_unlocked_amount: Uint128,
    pub staking_pool_balance: Uint128,
    pub distribution_pool_balance: Uint128,
}

impl SettledBooks {
    pub fn total_locked(&self) -> Result<Uint128, ContractError> {
        amount_from_shares(
            self.totals.locked_shares,
            self.totals.distribution_shares(),
            self.distribution_pool_balance,
        )
    }

    pub fn total_unlocked(&self) -> Result<Uint128, ContractError> {
        amount_from_shares(
            self.totals.unlocked_shares,
            self.totals.distribution_shares(),
            self.distribution_pool_balance,
        )
    }
}

/// Load the books, read the live pool balances and settle everything to the
/// current block time.
pub fn settle_books(
    deps: Deps,
    env: &Env,
    user: Option<&Addr>,
) -> Result<SettledBooks, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut totals = TOTALS.load(deps.storage)?;
    let mut schedules = SCHEDULES.load(deps.storage)?;
    let mut user_totals = match user {
        Some(addr) => Some(
            USER_TOTALS
                .may_load(deps.storage, addr)?
                .unwrap_or_else(|| UserTotals::new(env.block.time)),
        ),
        None => None,
    };

    let staking_pool_balance =
        query_balance(&deps.querier, &config.staking_token, &config.staking_pool)?;
    let distribution_pool_balance = query_balance(
        &deps.querier,
        &config.distribution_token,
        &config.distribution_pool,
    )?;

    let locked_value_before = amount_from_shares(
        totals.locked_shares,
        totals.distribution_shares(),
        distribution_pool_balance,
    )?;

    let newly_unlocked_shares = settle(
        &mut totals,
        &mut schedules,
        user_totals.as_mut(),
        env.block.time,
    )?;

    let locked_value_after = amount_from_shares(
        totals.locked_shares,
        totals.distribution_shares(),
        distribution_pool_balance,
    )?;
    let newly_unlocked_amount = locked_value_before.checked_sub(locked_value_after)?;

    Ok(SettledBooks {
        config,
        totals,
        schedules,
        user: user_totals,
        newly_unlocked_shares,
        newly_unlocked_amount,
        staking_pool_balance,
        distribution_pool_balance,
    })
}
