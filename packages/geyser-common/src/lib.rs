pub mod pool;
pub mod token;

pub use pool::{pool_transfer_msg, PoolExecuteMsg};
pub use token::{
    query_balance, transfer_from_msg, transfer_msg, AllowanceResponse, BalanceResponse,
    TokenExecuteMsg, TokenInfoResponse, TokenQueryMsg,
};
