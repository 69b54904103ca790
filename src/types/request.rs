//! Order lifecycle requests.
//!
//! One request type per contract action. Requests hold caller input as
//! given; [`prepare`](CreateOrder::prepare) validates it, derives/encodes
//! the ledger-native values and produces the wire [`Action`]. Preparation is
//! pure: no I/O, no shared state, and validation runs to completion before
//! any key derivation or quantity formatting.

use crate::{
    error::{Error, Result},
    name::AccountName,
    num::Formatter,
    symbol::SymbolCode,
};

use super::*;

/// Token all relayer fees are denominated in.
pub const FEE_SYMBOL: &str = "GIZMO";

/// Precision of the fee token.
pub const FEE_DECIMALS: u32 = 8;

/// One side of an order: an amount in a currency at a caller-supplied
/// precision.
///
/// The precision is never inferred; it must match what the contract expects
/// for the symbol, by contract. Two quantities are the same asset only if
/// both symbol and precision agree.
#[derive(Clone, Debug)]
pub struct Quantity {
    amount: String,
    decimals: u32,
    symbol: String,
}

impl Quantity {
    pub fn new(amount: impl Into<String>, decimals: u32, symbol: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            decimals,
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    fn validate(&self, amount_field: &'static str, symbol_field: &'static str) -> Result<()> {
        if self.amount.trim().is_empty() {
            return Err(Error::missing(amount_field, "provide a quantity"));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::missing(symbol_field, "provide a token symbol"));
        }
        Ok(())
    }

    fn render(&self) -> Result<String> {
        Ok(Formatter::new(self.decimals).quantity(&self.amount, &self.symbol)?)
    }
}

fn require(field: &'static str, value: &str, message: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing(field, message));
    }
    Ok(())
}

fn require_key(field: &'static str, key: OrderKey) -> Result<()> {
    if key.is_null() {
        return Err(Error::missing(field, "provide a key identifying the order"));
    }
    Ok(())
}

fn authorization(actor: &str, permission: &str) -> Vec<Authorization> {
    vec![Authorization {
        actor: actor.to_string(),
        permission: permission.to_string(),
    }]
}

/// Request to place a new order.
///
/// The order key is derived here, from `(user, base symbol, now)`, and
/// identifies the order for its whole lifecycle.
#[derive(Clone, Debug)]
pub struct CreateOrder {
    user: String,
    sender: String,
    base: Quantity,
    counter: Quantity,
    fees_amount: String,
    memo: Option<String>,
    expires: TimestampMillis,
}

impl CreateOrder {
    /// * `user` — account whose tokens back the order.
    /// * `sender` — relayer account collecting the fees.
    /// * `base` — quantity offered by `user`.
    /// * `counter` — quantity asked in return.
    /// * `fees_amount` — relayer fee, always denominated in [`FEE_SYMBOL`].
    /// * `memo` — free text; defaults to `Issue order <key>` when absent.
    /// * `expires` — expiry instant, milliseconds since epoch.
    pub fn new(
        user: impl Into<String>,
        sender: impl Into<String>,
        base: Quantity,
        counter: Quantity,
        fees_amount: impl Into<String>,
        memo: Option<String>,
        expires: TimestampMillis,
    ) -> Self {
        Self {
            user: user.into(),
            sender: sender.into(),
            base,
            counter,
            fees_amount: fees_amount.into(),
            memo,
            expires,
        }
    }

    /// Validate the request and build the `createorder` action.
    ///
    /// `now` becomes both the order timestamp and the timestamp addend of
    /// the derived key.
    pub fn prepare(
        &self,
        contract: &str,
        permission: &str,
        now: TimestampMillis,
    ) -> Result<Action> {
        require("user", &self.user, "provide a user account for the order")?;
        require("sender", &self.sender, "provide a sender account for the order")?;
        self.base.validate("base.amount", "base.symbol")?;
        self.counter.validate("counter.amount", "counter.symbol")?;
        require("fees", &self.fees_amount, "provide a fee quantity for the order")?;
        if self.expires == 0 {
            return Err(Error::missing(
                "expires",
                "provide an expiry in milliseconds since epoch",
            ));
        }

        let key = OrderKey::derive(
            AccountName::new(&self.user)?,
            SymbolCode::new(self.base.symbol())?,
            now,
        );
        let memo = match self.memo.as_deref().filter(|m| !m.is_empty()) {
            Some(memo) => memo.to_string(),
            None => format!("Issue order {key}"),
        };

        Ok(Action {
            account: contract.to_string(),
            name: "createorder",
            authorization: authorization(&self.user, permission),
            data: ActionData::Create(CreateOrderData {
                user: self.user.clone(),
                sender: self.sender.clone(),
                key,
                base: self.base.render()?,
                counter: self.counter.render()?,
                fees: Formatter::new(FEE_DECIMALS).quantity(&self.fees_amount, FEE_SYMBOL)?,
                memo,
                timestamp: now,
                expires: self.expires,
            }),
        })
    }
}

/// Request to change an existing order.
///
/// Only the quantities and the expiry can change; the key is the one
/// derived at creation and is never recomputed.
#[derive(Clone, Debug)]
pub struct EditOrder {
    user: String,
    key: OrderKey,
    base: Quantity,
    counter: Quantity,
    expires: TimestampMillis,
}

impl EditOrder {
    pub fn new(
        user: impl Into<String>,
        key: OrderKey,
        base: Quantity,
        counter: Quantity,
        expires: TimestampMillis,
    ) -> Self {
        Self {
            user: user.into(),
            key,
            base,
            counter,
            expires,
        }
    }

    /// Validate the request and build the `editorder` action.
    pub fn prepare(&self, contract: &str, permission: &str) -> Result<Action> {
        require("user", &self.user, "provide the user account owning the order")?;
        require_key("key", self.key)?;
        self.base.validate("base.amount", "base.symbol")?;
        self.counter.validate("counter.amount", "counter.symbol")?;
        if self.expires == 0 {
            return Err(Error::missing(
                "expires",
                "provide an expiry in milliseconds since epoch",
            ));
        }

        Ok(Action {
            account: contract.to_string(),
            name: "editorder",
            authorization: authorization(&self.user, permission),
            data: ActionData::Edit(EditOrderData {
                key: self.key,
                base: self.base.render()?,
                counter: self.counter.render()?,
                expires: self.expires,
            }),
        })
    }
}

/// Request to delete an order; only its owner may issue it.
#[derive(Clone, Debug)]
pub struct CancelOrder {
    user: String,
    key: OrderKey,
}

impl CancelOrder {
    pub fn new(user: impl Into<String>, key: OrderKey) -> Self {
        Self {
            user: user.into(),
            key,
        }
    }

    /// Validate the request and build the `cancelorder` action.
    pub fn prepare(&self, contract: &str, permission: &str) -> Result<Action> {
        require("user", &self.user, "provide the user account owning the order")?;
        require_key("key", self.key)?;
        Ok(Action {
            account: contract.to_string(),
            name: "cancelorder",
            authorization: authorization(&self.user, permission),
            data: ActionData::KeyOnly(KeyOnlyData { key: self.key }),
        })
    }
}

/// Request to garbage-collect an expired order; any account may issue it.
#[derive(Clone, Debug)]
pub struct RetireOrder {
    sender: String,
    key: OrderKey,
}

impl RetireOrder {
    pub fn new(sender: impl Into<String>, key: OrderKey) -> Self {
        Self {
            sender: sender.into(),
            key,
        }
    }

    /// Validate the request and build the `retireorder` action.
    pub fn prepare(&self, contract: &str, permission: &str) -> Result<Action> {
        require("sender", &self.sender, "provide the account retiring the order")?;
        require_key("key", self.key)?;
        Ok(Action {
            account: contract.to_string(),
            name: "retireorder",
            authorization: authorization(&self.sender, permission),
            data: ActionData::KeyOnly(KeyOnlyData { key: self.key }),
        })
    }
}

/// Request to settle two matched orders.
///
/// Any account may issue it; the contract itself verifies the match. The
/// four quantities are, in order: what the maker pays, what comes off the
/// maker's counter side, what the taker pays, and what comes off the
/// taker's counter side.
#[derive(Clone, Debug)]
pub struct SettleOrders {
    sender: String,
    maker: OrderKey,
    taker: OrderKey,
    quantity_maker: Quantity,
    deduct_maker: Quantity,
    quantity_taker: Quantity,
    deduct_taker: Quantity,
    memo: String,
}

impl SettleOrders {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender: impl Into<String>,
        maker: OrderKey,
        taker: OrderKey,
        quantity_maker: Quantity,
        deduct_maker: Quantity,
        quantity_taker: Quantity,
        deduct_taker: Quantity,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            maker,
            taker,
            quantity_maker,
            deduct_maker,
            quantity_taker,
            deduct_taker,
            memo: memo.into(),
        }
    }

    /// Validate the request and build the `settleorders` action.
    pub fn prepare(&self, contract: &str, permission: &str) -> Result<Action> {
        require("sender", &self.sender, "provide the account issuing the settlement")?;
        require_key("maker", self.maker)?;
        require_key("taker", self.taker)?;
        self.quantity_maker
            .validate("quantity_maker.amount", "quantity_maker.symbol")?;
        self.deduct_maker
            .validate("deduct_maker.amount", "deduct_maker.symbol")?;
        self.quantity_taker
            .validate("quantity_taker.amount", "quantity_taker.symbol")?;
        self.deduct_taker
            .validate("deduct_taker.amount", "deduct_taker.symbol")?;

        Ok(Action {
            account: contract.to_string(),
            name: "settleorders",
            authorization: authorization(&self.sender, permission),
            data: ActionData::Settle(SettleOrdersData {
                maker: self.maker,
                taker: self.taker,
                quantity_maker: self.quantity_maker.render()?,
                deduct_maker: self.deduct_maker.render()?,
                quantity_taker: self.quantity_taker.render()?,
                deduct_taker: self.deduct_taker.render()?,
                memo: self.memo.clone(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "gizmo.market";
    const NOW: TimestampMillis = 1690000000000;
    const EXPIRES: TimestampMillis = 1700000000000;

    fn create_request() -> CreateOrder {
        CreateOrder::new(
            "alice",
            "bob",
            Quantity::new("10.005", 2, "EOS"),
            Quantity::new("5", 4, "USDT"),
            "0.1",
            None,
            EXPIRES,
        )
    }

    #[test]
    fn test_create_order_payload() {
        let action = create_request().prepare(CONTRACT, "active", NOW).unwrap();
        assert_eq!(action.account, CONTRACT);
        assert_eq!(action.name, "createorder");
        assert_eq!(action.authorization[0].actor, "alice");
        assert_eq!(action.authorization[0].permission, "active");

        let ActionData::Create(data) = &action.data else {
            panic!("expected createorder data");
        };
        assert_eq!(data.user, "alice");
        assert_eq!(data.sender, "bob");
        assert_eq!(data.key.raw(), 3773038512881587013);
        assert_eq!(data.base, "10.00 EOS");
        assert_eq!(data.counter, "5.0000 USDT");
        assert_eq!(data.fees, "0.10000000 GIZMO");
        assert_eq!(data.memo, "Issue order 3773038512881587013");
        assert_eq!(data.timestamp, NOW);
        assert_eq!(data.expires, EXPIRES);
    }

    #[test]
    fn test_create_order_keeps_explicit_memo() {
        let mut req = create_request();
        req.memo = Some("fill or kill".to_string());
        let action = req.prepare(CONTRACT, "active", NOW).unwrap();
        let ActionData::Create(data) = &action.data else {
            panic!("expected createorder data");
        };
        assert_eq!(data.memo, "fill or kill");
    }

    #[test]
    fn test_create_order_missing_fields() {
        let missing = |req: CreateOrder| {
            req.prepare(CONTRACT, "active", NOW)
                .unwrap_err()
                .missing_field()
                .expect("MissingField error")
        };

        let mut req = create_request();
        req.user.clear();
        assert_eq!(missing(req), "user");

        let mut req = create_request();
        req.sender.clear();
        assert_eq!(missing(req), "sender");

        let mut req = create_request();
        req.base = Quantity::new("", 2, "EOS");
        assert_eq!(missing(req), "base.amount");

        let mut req = create_request();
        req.counter = Quantity::new("5", 4, "");
        assert_eq!(missing(req), "counter.symbol");

        let mut req = create_request();
        req.fees_amount.clear();
        assert_eq!(missing(req), "fees");

        let mut req = create_request();
        req.expires = 0;
        assert_eq!(missing(req), "expires");
    }

    #[test]
    fn test_create_order_rejects_bad_amounts() {
        let mut req = create_request();
        req.base = Quantity::new("ten", 2, "EOS");
        assert!(matches!(
            req.prepare(CONTRACT, "active", NOW),
            Err(Error::Amount(_))
        ));
    }

    #[test]
    fn test_create_order_rejects_bad_name() {
        let mut req = create_request();
        req.user = "Alice".to_string();
        assert!(matches!(
            req.prepare(CONTRACT, "active", NOW),
            Err(Error::Name(_))
        ));
    }

    #[test]
    fn test_edit_order_payload() {
        let key = OrderKey::new(3773038512881587013);
        let action = EditOrder::new(
            "alice",
            key,
            Quantity::new("8", 2, "EOS"),
            Quantity::new("4.00008", 4, "USDT"),
            EXPIRES,
        )
        .prepare(CONTRACT, "active")
        .unwrap();
        assert_eq!(action.name, "editorder");
        assert_eq!(action.authorization[0].actor, "alice");
        let ActionData::Edit(data) = &action.data else {
            panic!("expected editorder data");
        };
        assert_eq!(data.key, key);
        assert_eq!(data.base, "8.00 EOS");
        assert_eq!(data.counter, "4.0000 USDT");
        assert_eq!(data.expires, EXPIRES);
    }

    #[test]
    fn test_cancel_and_retire_payloads() {
        let key = OrderKey::new(42);
        let cancel = CancelOrder::new("alice", key)
            .prepare(CONTRACT, "active")
            .unwrap();
        assert_eq!(cancel.name, "cancelorder");
        assert_eq!(cancel.authorization[0].actor, "alice");
        assert!(matches!(cancel.data, ActionData::KeyOnly(KeyOnlyData { key: k }) if k == key));

        let retire = RetireOrder::new("bob", key)
            .prepare(CONTRACT, "active")
            .unwrap();
        assert_eq!(retire.name, "retireorder");
        assert_eq!(retire.authorization[0].actor, "bob");
        assert!(matches!(retire.data, ActionData::KeyOnly(KeyOnlyData { key: k }) if k == key));
    }

    #[test]
    fn test_cancel_requires_key() {
        let err = CancelOrder::new("alice", OrderKey::new(0))
            .prepare(CONTRACT, "active")
            .unwrap_err();
        assert_eq!(err.missing_field(), Some("key"));
    }

    #[test]
    fn test_settle_orders_payload() {
        let action = SettleOrders::new(
            "carol",
            OrderKey::new(11),
            OrderKey::new(22),
            Quantity::new("10", 2, "EOS"),
            Quantity::new("5", 4, "USDT"),
            Quantity::new("5", 4, "USDT"),
            Quantity::new("10", 2, "EOS"),
            "matched",
        )
        .prepare(CONTRACT, "active")
        .unwrap();
        assert_eq!(action.name, "settleorders");
        assert_eq!(action.authorization[0].actor, "carol");
        let ActionData::Settle(data) = &action.data else {
            panic!("expected settleorders data");
        };
        assert_eq!(data.maker.raw(), 11);
        assert_eq!(data.taker.raw(), 22);
        assert_eq!(data.quantity_maker, "10.00 EOS");
        assert_eq!(data.deduct_maker, "5.0000 USDT");
        assert_eq!(data.quantity_taker, "5.0000 USDT");
        assert_eq!(data.deduct_taker, "10.00 EOS");
        assert_eq!(data.memo, "matched");
    }

    #[test]
    fn test_settle_orders_missing_quantity() {
        let err = SettleOrders::new(
            "carol",
            OrderKey::new(11),
            OrderKey::new(22),
            Quantity::new("10", 2, "EOS"),
            Quantity::new("", 4, "USDT"),
            Quantity::new("5", 4, "USDT"),
            Quantity::new("10", 2, "EOS"),
            "",
        )
        .prepare(CONTRACT, "active")
        .unwrap_err();
        assert_eq!(err.missing_field(), Some("deduct_maker.amount"));
    }
}
