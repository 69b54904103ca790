//! Wire shapes of the contract's lifecycle actions.
//!
//! Field names and value types are fixed by the contract's action schema
//! and must match exactly; quantity fields are asset strings of the form
//! `"<decimal> <SYMBOL>"`.

use serde::Serialize;

use super::{OrderKey, TimestampMillis};

/// Permission under which an action actor signs.
#[derive(Clone, Debug, Serialize)]
pub struct Authorization {
    pub actor: String,
    pub permission: String,
}

/// One contract action, ready for hand-off to an
/// [`crate::client::ActionDispatcher`].
#[derive(Clone, Debug, Serialize)]
pub struct Action {
    /// Account the exchange contract is deployed under.
    pub account: String,
    /// Contract action name (`createorder`, `editorder`, ...).
    pub name: &'static str,
    pub authorization: Vec<Authorization>,
    pub data: ActionData,
}

/// Per-action argument mapping.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ActionData {
    Create(CreateOrderData),
    Edit(EditOrderData),
    /// `cancelorder` and `retireorder` both carry only the key.
    KeyOnly(KeyOnlyData),
    Settle(SettleOrdersData),
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateOrderData {
    pub user: String,
    pub sender: String,
    pub key: OrderKey,
    pub base: String,
    pub counter: String,
    pub fees: String,
    pub memo: String,
    pub timestamp: TimestampMillis,
    pub expires: TimestampMillis,
}

#[derive(Clone, Debug, Serialize)]
pub struct EditOrderData {
    pub key: OrderKey,
    pub base: String,
    pub counter: String,
    pub expires: TimestampMillis,
}

#[derive(Clone, Debug, Serialize)]
pub struct KeyOnlyData {
    pub key: OrderKey,
}

#[derive(Clone, Debug, Serialize)]
pub struct SettleOrdersData {
    pub maker: OrderKey,
    pub taker: OrderKey,
    /// Quantity the maker pays, deducted from the maker's base.
    pub quantity_maker: String,
    /// Quantity deducted from the maker's counter to keep its price constant.
    pub deduct_maker: String,
    /// Quantity the taker pays, deducted from the taker's base.
    pub quantity_taker: String,
    /// Quantity deducted from the taker's counter to keep its price constant.
    pub deduct_taker: String,
    pub memo: String,
}
