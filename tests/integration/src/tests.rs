use std::collections::HashMap;

use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, ContractResult, CosmosMsg, Env, Int128, OwnedDeps,
    Response, SystemError, SystemResult, Timestamp, Uint128, WasmMsg, WasmQuery,
};

use geyser_common::{BalanceResponse, TokenQueryMsg};
use token_geyser::error::ContractError;
use token_geyser::msg::{AccountingResponse, UnstakeQueryResponse};
use token_geyser::state::{GlobalTotals, UnlockSchedule, USER_TOTALS};

type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

// ─── Constants ───

/// 1.0 of the 9-decimal asset
const ONE: u128 = 1_000_000_000;
const ISPT: u128 = 1_000_000;
const DAY: u64 = 86_400;
const YEAR: u64 = 365 * DAY;
const T0: u64 = 1_600_000_000;
const TOKEN_SUPPLY: u128 = 100_000 * ONE;

// ─── Harness ───

/// One mock backend per contract plus a shared clock. The same elastic token
/// serves as staking and distribution asset; the two vault contracts keep the
/// pools distinct, which is exactly why they exist.
struct TestEnv {
    token: MockDeps,
    staking_pool: MockDeps,
    distribution_pool: MockDeps,
    geyser: MockDeps,
    now: Timestamp,
}

impl TestEnv {
    fn new(start_bonus: u16, bonus_period_seconds: u64) -> Self {
        let api = MockApi::default();
        let owner = api.addr_make("owner");
        let geyser_addr = api.addr_make("geyser");

        let mut token = mock_dependencies();
        elastic_token::contract::instantiate(
            token.as_mut(),
            contract_env("token", Timestamp::from_seconds(T0)),
            message_info(&owner, &[]),
            elastic_token::msg::InstantiateMsg {
                name: "Elastic".to_string(),
                symbol: "ELT".to_string(),
                decimals: 9,
                initial_supply: Uint128::new(TOKEN_SUPPLY),
            },
        )
        .unwrap();

        let mut staking_pool = mock_dependencies();
        let mut distribution_pool = mock_dependencies();
        for (pool, name) in [
            (&mut staking_pool, "staking_pool"),
            (&mut distribution_pool, "distribution_pool"),
        ] {
            token_pool::contract::instantiate(
                pool.as_mut(),
                contract_env(name, Timestamp::from_seconds(T0)),
                message_info(&owner, &[]),
                token_pool::msg::InstantiateMsg {
                    token: api.addr_make("token").to_string(),
                },
            )
            .unwrap();
            token_pool::contract::execute(
                pool.as_mut(),
                contract_env(name, Timestamp::from_seconds(T0)),
                message_info(&owner, &[]),
                token_pool::msg::ExecuteMsg::TransferOwnership {
                    new_owner: geyser_addr.to_string(),
                },
            )
            .unwrap();
        }

        let mut geyser = mock_dependencies();
        token_geyser::contract::instantiate(
            geyser.as_mut(),
            contract_env("geyser", Timestamp::from_seconds(T0)),
            message_info(&owner, &[]),
            token_geyser::msg::InstantiateMsg {
                staking_token: api.addr_make("token").to_string(),
                distribution_token: api.addr_make("token").to_string(),
                staking_pool: api.addr_make("staking_pool").to_string(),
                distribution_pool: api.addr_make("distribution_pool").to_string(),
                max_unlock_schedules: 5,
                start_bonus,
                bonus_period_seconds,
                initial_shares_per_token: Uint128::new(ISPT),
            },
        )
        .unwrap();

        TestEnv {
            token,
            staking_pool,
            distribution_pool,
            geyser,
            now: Timestamp::from_seconds(T0),
        }
    }

    fn addr(&self, name: &str) -> Addr {
        MockApi::default().addr_make(name)
    }

    fn advance(&mut self, seconds: u64) {
        self.now = self.now.plus_seconds(seconds);
    }

    fn env_for(&self, contract: &str) -> Env {
        contract_env(contract, self.now)
    }

    /// Live balance straight from the token contract.
    fn token_balance(&self, holder: &str) -> u128 {
        let res = elastic_token::contract::query(
            self.token.as_ref(),
            self.env_for("token"),
            elastic_token::msg::QueryMsg::Balance {
                address: self.addr(holder).to_string(),
            },
        )
        .unwrap();
        let parsed: BalanceResponse = from_json(res).unwrap();
        parsed.balance.u128()
    }

    /// Refresh the geyser's wasm querier with the pool balances as the token
    /// contract currently reports them.
    fn sync_querier(&mut self) {
        let token_addr = self.addr("token").to_string();
        let mut balances: HashMap<String, Uint128> = HashMap::new();
        for holder in ["staking_pool", "distribution_pool"] {
            balances.insert(
                self.addr(holder).to_string(),
                Uint128::new(self.token_balance(holder)),
            );
        }
        self.geyser.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { contract_addr, msg } if *contract_addr == token_addr => {
                match from_json::<TokenQueryMsg>(msg) {
                    Ok(TokenQueryMsg::Balance { address }) => SystemResult::Ok(ContractResult::Ok(
                        to_json_binary(&BalanceResponse {
                            balance: balances.get(&address).copied().unwrap_or_default(),
                        })
                        .unwrap(),
                    )),
                    _ => SystemResult::Err(SystemError::UnsupportedRequest {
                        kind: "token query".to_string(),
                    }),
                }
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "wasm query".to_string(),
            }),
        });
    }

    /// Deliver every message in a response to the addressed contract, the way
    /// the chain would, with the emitting contract as sender.
    fn dispatch(&mut self, sender: &str, response: Response) {
        for sub in response.messages {
            match sub.msg {
                CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr, msg, ..
                }) => self.route(sender, &contract_addr, msg),
                other => panic!("unroutable message: {:?}", other),
            }
        }
    }

    fn route(&mut self, sender: &str, target: &str, msg: Binary) {
        let info = message_info(&self.addr(sender), &[]);
        if *target == self.addr("token").to_string() {
            let parsed: elastic_token::msg::ExecuteMsg = from_json(&msg).unwrap();
            let env = self.env_for("token");
            let res = elastic_token::contract::execute(
                self.token.as_mut(),
                env,
                info,
                parsed,
            )
            .unwrap();
            assert!(res.messages.is_empty());
        } else if *target == self.addr("staking_pool").to_string() {
            let parsed: token_pool::msg::ExecuteMsg = from_json(&msg).unwrap();
            let env = self.env_for("staking_pool");
            let res = token_pool::contract::execute(
                self.staking_pool.as_mut(),
                env,
                info,
                parsed,
            )
            .unwrap();
            self.dispatch("staking_pool", res);
        } else if *target == self.addr("distribution_pool").to_string() {
            let parsed: token_pool::msg::ExecuteMsg = from_json(&msg).unwrap();
            let env = self.env_for("distribution_pool");
            let res = token_pool::contract::execute(
                self.distribution_pool.as_mut(),
                env,
                info,
                parsed,
            )
            .unwrap();
            self.dispatch("distribution_pool", res);
        } else {
            panic!("message to unknown contract {}", target);
        }
    }

    fn geyser_execute(
        &mut self,
        sender: &str,
        msg: token_geyser::msg::ExecuteMsg,
    ) -> Result<Response, ContractError> {
        self.sync_querier();
        let info = message_info(&self.addr(sender), &[]);
        let env = self.env_for("geyser");
        let res = token_geyser::contract::execute(
            self.geyser.as_mut(),
            env,
            info,
            msg,
        )?;
        self.dispatch("geyser", res.clone());
        Ok(res)
    }

    fn geyser_query(&mut self, msg: token_geyser::msg::QueryMsg) -> Binary {
        self.sync_querier();
        token_geyser::contract::query(self.geyser.as_ref(), self.env_for("geyser"), msg).unwrap()
    }

    // ── Convenience operations ──

    /// Owner hands `amount` of the token to `to`.
    fn give(&mut self, to: &str, amount: u128) {
        let owner = self.addr("owner");
        let recipient = self.addr(to);
        let env = self.env_for("token");
        elastic_token::contract::execute(
            self.token.as_mut(),
            env,
            message_info(&owner, &[]),
            elastic_token::msg::ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount: Uint128::new(amount),
            },
        )
        .unwrap();
    }

    /// `approver` grants the geyser an allowance of `amount`.
    fn approve(&mut self, approver: &str, amount: u128) {
        let approver = self.addr(approver);
        let geyser = self.addr("geyser");
        let env = self.env_for("token");
        elastic_token::contract::execute(
            self.token.as_mut(),
            env,
            message_info(&approver, &[]),
            elastic_token::msg::ExecuteMsg::IncreaseAllowance {
                spender: geyser.to_string(),
                amount: Uint128::new(amount),
            },
        )
        .unwrap();
    }

    fn stake(&mut self, user: &str, amount: u128) -> Response {
        self.approve(user, amount);
        self.geyser_execute(
            user,
            token_geyser::msg::ExecuteMsg::Stake {
                amount: Uint128::new(amount),
                data: None,
            },
        )
        .unwrap()
    }

    fn unstake(&mut self, user: &str, amount: u128) -> Response {
        self.geyser_execute(
            user,
            token_geyser::msg::ExecuteMsg::Unstake {
                amount: Uint128::new(amount),
                data: None,
            },
        )
        .unwrap()
    }

    fn lock(&mut self, amount: u128, duration_seconds: u64) -> Response {
        self.approve("owner", amount);
        self.geyser_execute(
            "owner",
            token_geyser::msg::ExecuteMsg::LockTokens {
                amount: Uint128::new(amount),
                duration_seconds,
            },
        )
        .unwrap()
    }

    fn update_accounting(&mut self, user: &str) -> Response {
        self.geyser_execute(user, token_geyser::msg::ExecuteMsg::UpdateAccounting {})
            .unwrap()
    }

    /// Owner rebases the token by `supply_delta`.
    fn rebase(&mut self, supply_delta: i128) {
        let owner = self.addr("owner");
        let supply = elastic_token::state::SUPPLY
            .load(self.token.as_ref().storage)
            .unwrap();
        let env = self.env_for("token");
        elastic_token::contract::execute(
            self.token.as_mut(),
            env,
            message_info(&owner, &[]),
            elastic_token::msg::ExecuteMsg::Rebase {
                epoch: supply.epoch + 1,
                supply_delta: Int128::new(supply_delta),
            },
        )
        .unwrap();
    }

    // ── Views ──

    fn total_staked(&mut self) -> u128 {
        let res = self.geyser_query(token_geyser::msg::QueryMsg::TotalStaked {});
        from_json::<Uint128>(res).unwrap().u128()
    }

    fn total_staked_for(&mut self, user: &str) -> u128 {
        let address = self.addr(user).to_string();
        let res = self.geyser_query(token_geyser::msg::QueryMsg::TotalStakedFor { address });
        from_json::<Uint128>(res).unwrap().u128()
    }

    fn total_locked(&mut self) -> u128 {
        let res = self.geyser_query(token_geyser::msg::QueryMsg::TotalLocked {});
        from_json::<Uint128>(res).unwrap().u128()
    }

    fn total_unlocked(&mut self) -> u128 {
        let res = self.geyser_query(token_geyser::msg::QueryMsg::TotalUnlocked {});
        from_json::<Uint128>(res).unwrap().u128()
    }

    fn totals(&mut self) -> GlobalTotals {
        let res = self.geyser_query(token_geyser::msg::QueryMsg::Totals {});
        from_json(res).unwrap()
    }

    fn accounting(&mut self, user: &str) -> AccountingResponse {
        let address = Some(self.addr(user).to_string());
        let res = self.geyser_query(token_geyser::msg::QueryMsg::Accounting { address });
        from_json(res).unwrap()
    }

    fn unstake_query(&mut self, user: &str, amount: u128) -> u128 {
        let address = self.addr(user).to_string();
        let res = self.geyser_query(token_geyser::msg::QueryMsg::UnstakeQuery {
            address,
            amount: Uint128::new(amount),
        });
        from_json::<UnstakeQueryResponse>(res)
            .unwrap()
            .reward_amount
            .u128()
    }

    /// The share-ledger invariants that must hold after every operation.
    fn assert_share_invariants(&mut self, users: &[&str]) {
        let totals = self.totals();
        let mut share_sum = Uint128::zero();
        let mut entry_sum = Uint128::zero();
        let mut share_second_sum = Uint128::zero();
        for user in users {
            let addr = self.addr(user);
            if let Some(user_totals) = USER_TOTALS
                .may_load(self.geyser.as_ref().storage, &addr)
                .unwrap()
            {
                share_sum += user_totals.staking_shares;
                share_second_sum += user_totals.staking_share_seconds;
                let from_entries: Uint128 = user_totals.stakes.iter().map(|s| s.shares).sum();
                assert_eq!(user_totals.staking_shares, from_entries);
                entry_sum += from_entries;
            }
        }
        assert_eq!(totals.staking_shares, share_sum);
        assert_eq!(totals.staking_shares, entry_sum);
        assert!(totals.staking_share_seconds >= share_second_sum);
    }
}

fn contract_env(contract: &str, now: Timestamp) -> Env {
    let mut env = mock_env();
    env.contract.address = MockApi::default().addr_make(contract);
    env.block.time = now;
    env
}

fn event_attr(res: &Response, ty: &str, key: &str) -> Option<String> {
    res.events.iter().find(|e| e.ty == ty).map(|e| {
        e.attributes
            .iter()
            .find(|a| a.key == key)
            .unwrap_or_else(|| panic!("event {} has no attribute {}", ty, key))
            .value
            .clone()
    })
}

fn claimed_amount(res: &Response) -> u128 {
    event_attr(res, "geyser_tokens_claimed", "amount")
        .expect("no geyser_tokens_claimed event")
        .parse()
        .unwrap()
}

fn unlocked_amount(res: &Response) -> Option<u128> {
    event_attr(res, "geyser_tokens_unlocked", "amount").map(|v| v.parse().unwrap())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_pool_stake() {
    // Staking 100.0 into an empty pool mints at the initial multiplier.
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 100 * ONE);

    env.stake("user1", 100 * ONE);

    assert_eq!(env.total_staked(), 100 * ONE);
    assert_eq!(env.total_staked_for("user1"), 100 * ONE);
    assert_eq!(env.totals().staking_shares, Uint128::new(100 * ONE * ISPT));
    assert_eq!(env.token_balance("staking_pool"), 100 * ONE);
    assert_eq!(env.token_balance("user1"), 0);
    env.assert_share_invariants(&["user1"]);
}

#[test]
fn test_rebase_doubles_supply_mid_stake() {
    // A stakes 50, the token rebases +100%, B stakes 150. A's stake is now
    // worth 100 while the share ledger never moved.
    let mut env = TestEnv::new(50, DAY);
    env.give("user_a", 50 * ONE);
    env.give("user_b", 300 * ONE);

    env.stake("user_a", 50 * ONE);
    env.rebase(TOKEN_SUPPLY as i128); // +100%
    env.stake("user_b", 150 * ONE);

    assert_eq!(env.total_staked_for("user_a"), 100 * ONE);
    assert_eq!(env.total_staked_for("user_b"), 150 * ONE);
    assert_eq!(env.total_staked(), 250 * ONE);
    assert_eq!(env.totals().staking_shares, Uint128::new(125 * ONE * ISPT));
    env.assert_share_invariants(&["user_a", "user_b"]);
}

#[test]
fn test_rebase_is_neutral_on_shares() {
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 100 * ONE);
    env.stake("user1", 100 * ONE);
    env.advance(DAY);
    env.update_accounting("user1");

    let before = env.totals();
    let staked_before = env.total_staked_for("user1");

    env.rebase((TOKEN_SUPPLY / 2) as i128); // +50%
    env.update_accounting("user1");

    let after = env.totals();
    assert_eq!(before.staking_shares, after.staking_shares);
    assert_eq!(before.staking_share_seconds, after.staking_share_seconds);
    assert_eq!(env.total_staked_for("user1"), staked_before * 3 / 2);
}

#[test]
fn test_single_staker_full_reward() {
    // Lock 100 over a year, stake 50, wait the year out, withdraw 30:
    // 60% of the fully vested pool comes back with the withdrawal.
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 50 * ONE);

    env.lock(100 * ONE, YEAR);
    env.stake("user1", 50 * ONE);
    env.advance(YEAR);

    let res = env.unstake("user1", 30 * ONE);

    assert_eq!(claimed_amount(&res), 60 * ONE);
    // 30.0 principal + 60.0 reward
    assert_eq!(env.token_balance("user1"), 90 * ONE);
    assert_eq!(env.total_staked_for("user1"), 20 * ONE);

    let accounting = env.accounting("user1");
    assert_eq!(accounting.reward_entitlement, Uint128::new(40 * ONE));
    env.assert_share_invariants(&["user1"]);
}

#[test]
fn test_early_withdrawal_bonus() {
    // Half the bonus period elapsed: factor = 0.5 + 0.5 * 0.5 = 0.75.
    // Withdrawing half of a sole stake claims half the 1000.0 pool, scaled
    // to 375.0; the forfeited 125.0 stays unlocked for remaining stakers.
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 500 * ONE);

    env.lock(1_000 * ONE, 3_600);
    env.stake("user1", 500 * ONE);
    env.advance(DAY / 2);

    let res = env.unstake("user1", 250 * ONE);

    assert_eq!(claimed_amount(&res), 375 * ONE);
    // 250.0 principal + 375.0 reward
    assert_eq!(env.token_balance("user1"), 625 * ONE);
    assert_eq!(env.total_unlocked(), 625 * ONE);
    env.assert_share_invariants(&["user1"]);
}

#[test]
fn test_multi_schedule_linear_unlock() {
    // Two overlapping one-year schedules. At t = 0.6y the first has vested
    // 60% of its shares and the second 10%.
    let mut env = TestEnv::new(50, DAY);

    env.lock(100 * ONE, YEAR);
    env.advance(YEAR / 2);
    env.lock(100 * ONE, YEAR);
    env.advance(YEAR / 10);
    env.update_accounting("owner");

    assert_eq!(env.total_unlocked(), 70 * ONE);
    assert_eq!(env.total_locked(), 130 * ONE);

    let res = env.geyser_query(token_geyser::msg::QueryMsg::UnlockScheduleCount {});
    assert_eq!(from_json::<u32>(res).unwrap(), 2);
    let res = env.geyser_query(token_geyser::msg::QueryMsg::UnlockSchedule { index: 0 });
    let first: UnlockSchedule = from_json(res).unwrap();
    assert_eq!(
        first.unlocked_shares,
        first.initial_locked_shares.multiply_ratio(6u128, 10u128)
    );
}

#[test]
fn test_lifo_multi_stake_reward() {
    // Two 10.0 deposits a year apart, three 5.0 withdrawals at t = 2y.
    // LIFO burns the younger deposit first, so the third withdrawal reaches
    // the deposit with twice the share-seconds and claims about twice the
    // reward of the first.
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 20 * ONE);

    env.lock(100 * ONE, YEAR);
    env.stake("user1", 10 * ONE);
    env.advance(YEAR);
    env.stake("user1", 10 * ONE);
    env.advance(YEAR);

    let first = claimed_amount(&env.unstake("user1", 5 * ONE));
    let second = claimed_amount(&env.unstake("user1", 5 * ONE));
    let third = claimed_amount(&env.unstake("user1", 5 * ONE));

    // first two slices both come from the younger deposit
    assert_eq!(first, second);
    let ratio = third as f64 / first as f64;
    assert!(
        (1.99..=2.01).contains(&ratio),
        "expected LIFO ratio near 2, got {}",
        ratio
    );
    env.assert_share_invariants(&["user1"]);
}

#[test]
fn test_dust_free_schedule_completion() {
    // 1.0 locked over ten years, refreshed just before the end and just
    // after: the two unlock amounts must sum to exactly 1.0.
    let mut env = TestEnv::new(50, DAY);

    env.lock(ONE, 10 * YEAR);
    env.advance(10 * YEAR - 60);
    let first = unlocked_amount(&env.update_accounting("owner")).unwrap();
    env.advance(65);
    let second = unlocked_amount(&env.update_accounting("owner")).unwrap();

    assert_eq!(first + second, ONE);
    let totals = env.totals();
    assert_eq!(totals.locked_shares, Uint128::zero());

    let res = env.geyser_query(token_geyser::msg::QueryMsg::UnlockSchedule { index: 0 });
    let schedule: UnlockSchedule = from_json(res).unwrap();
    assert_eq!(schedule.unlocked_shares, schedule.initial_locked_shares);
}

#[test]
fn test_zero_elapsed_round_trip() {
    // Stake and unstake in the same instant: principal comes back whole and
    // no reward is paid even though unlocked tokens exist.
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 100 * ONE);

    env.lock(50 * ONE, 3_600);
    env.advance(2 * 3_600);
    env.stake("user1", 100 * ONE);
    let res = env.unstake("user1", 100 * ONE);

    assert_eq!(claimed_amount(&res), 0);
    assert_eq!(env.token_balance("user1"), 100 * ONE);
    assert_eq!(env.total_staked_for("user1"), 0);
    assert_eq!(env.total_unlocked(), 50 * ONE);
    env.assert_share_invariants(&["user1"]);
}

#[test]
fn test_equal_stakers_earn_equal_rewards() {
    let mut env = TestEnv::new(50, DAY);
    env.give("user_a", 50 * ONE);
    env.give("user_b", 50 * ONE);

    env.lock(100 * ONE, DAY);
    env.stake("user_a", 50 * ONE);
    env.stake("user_b", 50 * ONE);
    env.advance(2 * DAY);

    let reward_a = claimed_amount(&env.unstake("user_a", 50 * ONE));
    let reward_b = claimed_amount(&env.unstake("user_b", 50 * ONE));

    assert_eq!(reward_a, reward_b);
    assert_eq!(reward_a, 50 * ONE);
    env.assert_share_invariants(&["user_a", "user_b"]);
}

#[test]
fn test_unstake_query_matches_unstake() {
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 80 * ONE);
    env.give("user2", 40 * ONE);

    env.lock(200 * ONE, 30 * DAY);
    env.stake("user1", 80 * ONE);
    env.advance(3 * DAY);
    env.stake("user2", 40 * ONE);
    env.advance(10 * DAY);

    let predicted = env.unstake_query("user1", 60 * ONE);
    // the query must leave the books untouched
    let totals_before = env.totals();
    assert_eq!(totals_before, env.totals());

    let actual = claimed_amount(&env.unstake("user1", 60 * ONE));
    assert_eq!(predicted, actual);
    env.assert_share_invariants(&["user1", "user2"]);
}

#[test]
fn test_stake_for_credits_beneficiary() {
    let mut env = TestEnv::new(50, DAY);
    env.give("funder", 25 * ONE);

    env.approve("funder", 25 * ONE);
    let beneficiary = env.addr("beneficiary").to_string();
    env.geyser_execute(
        "funder",
        token_geyser::msg::ExecuteMsg::StakeFor {
            beneficiary,
            amount: Uint128::new(25 * ONE),
            data: None,
        },
    )
    .unwrap();

    assert_eq!(env.total_staked_for("beneficiary"), 25 * ONE);
    assert_eq!(env.total_staked_for("funder"), 0);

    // the beneficiary, not the funder, can withdraw
    let res = env.unstake("beneficiary", 25 * ONE);
    assert_eq!(claimed_amount(&res), 0);
    assert_eq!(env.token_balance("beneficiary"), 25 * ONE);
}

#[test]
fn test_data_passes_through_events() {
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", ONE);

    env.approve("user1", ONE);
    let res = env
        .geyser_execute(
            "user1",
            token_geyser::msg::ExecuteMsg::Stake {
                amount: Uint128::new(ONE),
                data: Some(Binary::from(b"hello")),
            },
        )
        .unwrap();

    assert_eq!(
        event_attr(&res, "geyser_staked", "data").unwrap(),
        Binary::from(b"hello").to_base64()
    );
}

#[test]
fn test_unstake_exceeds_balance() {
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", 10 * ONE);
    env.stake("user1", 10 * ONE);

    let err = env
        .geyser_execute(
            "user1",
            token_geyser::msg::ExecuteMsg::Unstake {
                amount: Uint128::new(11 * ONE),
                data: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ContractError::UnstakeExceedsBalance { .. }));
}

#[test]
fn test_lock_tokens_auth_and_limit() {
    let mut env = TestEnv::new(50, DAY);
    env.give("user1", ONE);

    env.approve("user1", ONE);
    let err = env
        .geyser_execute(
            "user1",
            token_geyser::msg::ExecuteMsg::LockTokens {
                amount: Uint128::new(ONE),
                duration_seconds: DAY,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ContractError::NotOwner));

    for _ in 0..5 {
        env.lock(ONE, YEAR);
    }
    env.approve("owner", ONE);
    let err = env
        .geyser_execute(
            "owner",
            token_geyser::msg::ExecuteMsg::LockTokens {
                amount: Uint128::new(ONE),
                duration_seconds: YEAR,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ContractError::ScheduleLimit { max: 5 }));
}

#[test]
fn test_ownership_transfer_moves_lock_rights() {
    let mut env = TestEnv::new(50, DAY);
    env.give("new_owner", 10 * ONE);

    let new_owner = env.addr("new_owner").to_string();
    env.geyser_execute(
        "owner",
        token_geyser::msg::ExecuteMsg::TransferOwnership { new_owner },
    )
    .unwrap();

    // the old owner is locked out, the new owner can lock
    env.approve("owner", ONE);
    let err = env
        .geyser_execute(
            "owner",
            token_geyser::msg::ExecuteMsg::LockTokens {
                amount: Uint128::new(ONE),
                duration_seconds: DAY,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ContractError::NotOwner));

    env.approve("new_owner", 10 * ONE);
    env.geyser_execute(
        "new_owner",
        token_geyser::msg::ExecuteMsg::LockTokens {
            amount: Uint128::new(10 * ONE),
            duration_seconds: DAY,
        },
    )
    .unwrap();
    assert_eq!(env.total_locked(), 10 * ONE);
}

#[test]
fn test_interleaved_operations_hold_invariants() {
    // A scripted mix of stakes, locks, rebases and unstakes; the share
    // ledger must reconcile after every step.
    let mut env = TestEnv::new(50, DAY);
    let users = ["user_a", "user_b", "user_c"];
    env.give("user_a", 100 * ONE);
    env.give("user_b", 200 * ONE);
    env.give("user_c", 50 * ONE);

    env.lock(300 * ONE, 10 * DAY);
    env.stake("user_a", 60 * ONE);
    env.assert_share_invariants(&users);

    env.advance(DAY);
    env.stake("user_b", 200 * ONE);
    env.assert_share_invariants(&users);

    env.advance(DAY);
    env.rebase((TOKEN_SUPPLY / 4) as i128);
    env.stake("user_c", 50 * ONE);
    env.assert_share_invariants(&users);

    env.advance(3 * DAY);
    env.unstake("user_b", 75 * ONE);
    env.assert_share_invariants(&users);

    env.advance(DAY);
    env.stake("user_a", 25 * ONE);
    env.unstake("user_c", 10 * ONE);
    env.assert_share_invariants(&users);

    // drain the remaining schedule and verify nothing stays locked
    env.advance(10 * DAY);
    env.update_accounting("user_a");
    let totals = env.totals();
    assert_eq!(totals.locked_shares, Uint128::zero());
    assert_eq!(env.total_locked(), 0);
}

#[test]
fn test_accounting_figures_for_two_stakers() {
    // B joins a day in and the books settle a day later: A holds two thirds
    // of the share-seconds and so two thirds of the entitlement.
    let mut env = TestEnv::new(50, DAY);
    env.give("user_a", 10 * ONE);
    env.give("user_b", 10 * ONE);

    env.lock(90 * ONE, DAY);
    env.stake("user_a", 10 * ONE);
    env.advance(DAY);
    env.stake("user_b", 10 * ONE);
    env.advance(DAY);

    let for_a = env.accounting("user_a");
    let for_b = env.accounting("user_b");

    assert_eq!(for_a.total_unlocked, Uint128::new(90 * ONE));
    assert_eq!(for_a.total_locked, Uint128::zero());
    assert_eq!(
        for_a.user_staking_share_seconds,
        Uint128::new(10 * ONE * ISPT * 2 * DAY as u128)
    );
    assert_eq!(
        for_b.user_staking_share_seconds,
        Uint128::new(10 * ONE * ISPT * DAY as u128)
    );
    assert_eq!(for_a.reward_entitlement, Uint128::new(60 * ONE));
    assert_eq!(for_b.reward_entitlement, Uint128::new(30 * ONE));
    assert_eq!(for_a.timestamp, T0 + 2 * DAY);
}
