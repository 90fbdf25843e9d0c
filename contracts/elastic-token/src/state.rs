use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, ConversionOverflowError, OverflowError, Uint128, Uint256};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<TokenConfig> = Item::new("config");
pub const SUPPLY: Item<SupplyState> = Item::new("supply");
/// Balances in gons, the fixed internal unit. Rebases never touch this map.
pub const BALANCES: Map<&Addr, Uint256> = Map::new("balances");
/// Allowances in fragments, keyed (owner, spender). Deliberately not scaled
/// by rebases.
pub const ALLOWANCES: Map<(&Addr, &Addr), Uint128> = Map::new("allowances");

#[cw_serde]
pub struct TokenConfig {
    /// Rebase authority
    pub owner: Addr,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct SupplyState {
    /// Visible supply in fragments; changes only on rebase
    pub total_supply: Uint128,
    /// Fixed forever at instantiation; the sum of all gon balances
    pub total_gons: Uint256,
    pub gons_per_fragment: Uint256,
    /// Epoch of the last rebase
    pub epoch: u64,
}

impl SupplyState {
    pub fn to_gons(&self, amount: Uint128) -> Result<Uint256, OverflowError> {
        Uint256::from(amount).checked_mul(self.gons_per_fragment)
    }

    pub fn to_fragments(&self, gons: Uint256) -> Result<Uint128, ConversionOverflowError> {
        Uint128::try_from(gons / self.gons_per_fragment)
    }
}
