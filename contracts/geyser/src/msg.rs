use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::state::{Config, GlobalTotals, UnlockSchedule};

#[cw_serde]
pub struct InstantiateMsg {
    pub staking_token: String,
    pub distribution_token: String,
    /// Pre-deployed token-pool vault for staked value. Ownership must be
    /// handed to the geyser after instantiation.
    pub staking_pool: String,
    /// Pre-deployed token-pool vault for the distribution asset.
    pub distribution_pool: String,
    pub max_unlock_schedules: u32,
    /// Reward fraction at the instant of staking, in percent (50 = 50%)
    pub start_bonus: u16,
    pub bonus_period_seconds: u64,
    pub initial_shares_per_token: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit staking tokens for the sender. Requires a prior allowance
    /// for the geyser on the staking token.
    Stake {
        amount: Uint128,
        data: Option<Binary>,
    },
    /// Deposit staking tokens credited to `beneficiary`.
    StakeFor {
        beneficiary: String,
        amount: Uint128,
        data: Option<Binary>,
    },
    /// Withdraw `amount` of staked tokens plus the reward earned by the
    /// burned deposits, newest deposits first.
    Unstake {
        amount: Uint128,
        data: Option<Binary>,
    },
    /// Settle vesting and share-second accounting for the sender.
    /// Response data carries an `AccountingResponse`.
    UpdateAccounting {},
    /// Vest `amount` of distribution tokens linearly over
    /// `duration_seconds`. Owner only.
    LockTokens {
        amount: Uint128,
        duration_seconds: u64,
    },
    /// Hand the geyser to a new owner. Owner only.
    TransferOwnership { new_owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    /// Raw share-ledger introspection.
    #[returns(GlobalTotals)]
    Totals {},
    /// Live staking-pool balance.
    #[returns(Uint128)]
    TotalStaked {},
    #[returns(Uint128)]
    TotalStakedFor { address: String },
    #[returns(Uint128)]
    TotalLocked {},
    #[returns(Uint128)]
    TotalUnlocked {},
    /// The reward an unstake of `amount` by `address` would pay right now,
    /// computed against a settled snapshot without mutating state.
    #[returns(UnstakeQueryResponse)]
    UnstakeQuery { address: String, amount: Uint128 },
    /// The `UpdateAccounting` figures, computed against a settled snapshot
    /// without mutating state.
    #[returns(AccountingResponse)]
    Accounting { address: Option<String> },
    #[returns(u32)]
    UnlockScheduleCount {},
    #[returns(UnlockSchedule)]
    UnlockSchedule { index: u32 },
}

#[cw_serde]
pub struct UnstakeQueryResponse {
    pub reward_amount: Uint128,
}

#[cw_serde]
pub struct AccountingResponse {
    /// Token value of the still-vesting distribution shares
    pub total_locked: Uint128,
    /// Token value of the payable distribution shares
    pub total_unlocked: Uint128,
    pub user_staking_share_seconds: Uint128,
    pub total_staking_share_seconds: Uint128,
    /// The user's unbonused claim on the unlocked pool
    pub reward_entitlement: Uint128,
    pub timestamp: u64,
}
