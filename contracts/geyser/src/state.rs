use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOTALS: Item<GlobalTotals> = Item::new("totals");
pub const SCHEDULES: Item<Vec<UnlockSchedule>> = Item::new("schedules");
pub const USER_TOTALS: Map<&Addr, UserTotals> = Map::new("user_totals");

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub staking_token: Addr,
    pub distribution_token: Addr,
    /// Vault holding all staked value. Never persisted as an amount; the
    /// live token balance of this address is the source of truth, which is
    /// what keeps rebases out of the share ledger.
    pub staking_pool: Addr,
    /// Vault holding the distribution asset, locked and unlocked together.
    pub distribution_pool: Addr,
    pub max_unlock_schedules: u32,
    /// Reward fraction at the instant of staking, in percent (100 = 100%)
    pub start_bonus: u16,
    /// Seconds of staking after which the bonus factor reaches 100%
    pub bonus_period_seconds: u64,
    /// Share multiplier used while the staking pool is empty
    pub initial_shares_per_token: Uint128,
}

#[cw_serde]
pub struct GlobalTotals {
    pub staking_shares: Uint128,
    pub locked_shares: Uint128,
    pub unlocked_shares: Uint128,
    /// Accumulated shares x seconds across all stakes, as of `last_accounting_ts`
    pub staking_share_seconds: Uint128,
    pub last_accounting_ts: Timestamp,
}

impl GlobalTotals {
    pub fn new(now: Timestamp) -> Self {
        GlobalTotals {
            staking_shares: Uint128::zero(),
            locked_shares: Uint128::zero(),
            unlocked_shares: Uint128::zero(),
            staking_share_seconds: Uint128::zero(),
            last_accounting_ts: now,
        }
    }

    /// All distribution-pool shares in existence, locked or not. The
    /// share-to-token conversion rate for the distribution pool is
    /// `pool_balance / distribution_shares()`.
    pub fn distribution_shares(&self) -> Uint128 {
        self.locked_shares + self.unlocked_shares
    }
}

#[cw_serde]
pub struct UserTotals {
    pub staking_shares: Uint128,
    pub staking_share_seconds: Uint128,
    pub last_accounting_ts: Timestamp,
    /// Deposit journal: appended on stake, consumed newest-first on unstake
    pub stakes: Vec<StakeEntry>,
}

impl UserTotals {
    pub fn new(now: Timestamp) -> Self {
        UserTotals {
            staking_shares: Uint128::zero(),
            staking_share_seconds: Uint128::zero(),
            last_accounting_ts: now,
            stakes: vec![],
        }
    }
}

#[cw_serde]
pub struct StakeEntry {
    pub shares: Uint128,
    pub timestamp: Timestamp,
}

#[cw_serde]
pub struct UnlockSchedule {
    pub initial_locked_shares: Uint128,
    /// Cumulative shares already released by this schedule
    pub unlocked_shares: Uint128,
    pub last_unlock_ts: Timestamp,
    pub end_ts: Timestamp,
    pub duration_seconds: u64,
}
