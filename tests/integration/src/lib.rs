//! Integration tests for the geyser protocol.
//!
//! The contracts are driven through their `instantiate` / `execute` / `query`
//! entry points directly. A small harness owns one mock backend per contract,
//! routes every `WasmMsg` a contract emits to the addressed contract, and
//! refreshes the geyser's wasm querier with the live pool balances before
//! each operation, so cross-contract balance reads behave as they would
//! on chain.

#[cfg(test)]
mod tests;
