use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

pub const CONFIG: Item<PoolConfig> = Item::new("config");

#[cw_serde]
pub struct PoolConfig {
    pub owner: Addr,
    /// The one token this vault holds
    pub token: Addr,
}
