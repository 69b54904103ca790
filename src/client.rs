//! Exchange client: order-table queries and action submission.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::{debug, info};

use crate::{
    Network,
    error::{Error, Result},
    types::{
        Action, CancelOrder, CreateOrder, EditOrder, RetireOrder, SettleOrders, TimestampMillis,
    },
};

/// Transaction submission boundary.
///
/// Implementations own key management, signing, broadcast, retry and
/// confirmation-depth policy. The client hands over the ordered action list
/// and passes the result, or the failure, through untouched.
pub trait ActionDispatcher {
    fn dispatch(&self, actions: &[Action]) -> impl Future<Output = Result<Value>> + Send;
}

/// Optional client-side narrowing of the order table.
///
/// `base_symbol`/`counter_symbol` match the symbol part of the row's asset
/// strings. `page` is 1-based and only applies together with `limit`.
#[derive(Clone, Debug, Default)]
pub struct OrderFilter {
    pub user: Option<String>,
    pub sender: Option<String>,
    pub base_symbol: Option<String>,
    pub counter_symbol: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of order-table rows.
///
/// Rows stay untyped: the table layout belongs to the contract, the client
/// only filters and pages over it.
#[derive(Clone, Debug, serde::Serialize)]
pub struct OrderPage {
    pub docs: Vec<Value>,
    pub total: usize,
    pub limit: usize,
    pub page: usize,
    pub pages: usize,
}

#[derive(Debug, serde::Deserialize)]
struct TableRows {
    rows: Vec<Value>,
}

/// Client for one exchange contract on one node.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    network: Network,
    contract: String,
    permission: String,
}

impl Client {
    pub fn new(network: Network, contract: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            network,
            contract: contract.into(),
            permission: "active".to_string(),
        }
    }

    /// Sign actions under a permission other than `active`.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Query the contract's public order table.
    pub async fn get_orders(&self, filter: &OrderFilter) -> Result<OrderPage> {
        let url = self.network.table_rows_url()?;
        let request = serde_json::json!({
            "code": self.contract,
            "scope": self.contract,
            "table": "orders",
            "json": true,
        });
        debug!(%url, contract = %self.contract, "querying order table");
        let response = self.http.post(url).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(Error::Node(format!(
                "get_table_rows returned {}",
                response.status()
            )));
        }
        let table: TableRows = response.json().await?;
        debug!(rows = table.rows.len(), "order table fetched");
        let rows = filter_rows(table.rows, filter);
        Ok(paginate(rows, filter.page, filter.limit))
    }

    /// Place a new order. The key is derived from the current wall clock.
    pub async fn create_order<D: ActionDispatcher>(
        &self,
        dispatcher: &D,
        request: &CreateOrder,
    ) -> Result<Value> {
        let action = request.prepare(&self.contract, &self.permission, now_millis())?;
        self.submit(dispatcher, vec![action]).await
    }

    pub async fn edit_order<D: ActionDispatcher>(
        &self,
        dispatcher: &D,
        request: &EditOrder,
    ) -> Result<Value> {
        let action = request.prepare(&self.contract, &self.permission)?;
        self.submit(dispatcher, vec![action]).await
    }

    pub async fn cancel_order<D: ActionDispatcher>(
        &self,
        dispatcher: &D,
        request: &CancelOrder,
    ) -> Result<Value> {
        let action = request.prepare(&self.contract, &self.permission)?;
        self.submit(dispatcher, vec![action]).await
    }

    pub async fn retire_order<D: ActionDispatcher>(
        &self,
        dispatcher: &D,
        request: &RetireOrder,
    ) -> Result<Value> {
        let action = request.prepare(&self.contract, &self.permission)?;
        self.submit(dispatcher, vec![action]).await
    }

    pub async fn settle_orders<D: ActionDispatcher>(
        &self,
        dispatcher: &D,
        request: &SettleOrders,
    ) -> Result<Value> {
        let action = request.prepare(&self.contract, &self.permission)?;
        self.submit(dispatcher, vec![action]).await
    }

    /// Submit an already-built action sequence.
    pub async fn submit<D: ActionDispatcher>(
        &self,
        dispatcher: &D,
        actions: Vec<Action>,
    ) -> Result<Value> {
        info!(
            count = actions.len(),
            first = actions.first().map(|a| a.name),
            "submitting actions"
        );
        dispatcher.dispatch(&actions).await
    }
}

fn now_millis() -> TimestampMillis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

fn filter_rows(mut rows: Vec<Value>, filter: &OrderFilter) -> Vec<Value> {
    fn field_is(row: &Value, field: &str, want: &str) -> bool {
        row.get(field).and_then(Value::as_str) == Some(want)
    }
    // Symbol lives in the second token of the asset string, "<decimal> <SYMBOL>".
    fn symbol_is(row: &Value, field: &str, want: &str) -> bool {
        row.get(field)
            .and_then(Value::as_str)
            .and_then(|quantity| quantity.split_whitespace().nth(1))
            == Some(want)
    }

    if let Some(user) = &filter.user {
        rows.retain(|r| field_is(r, "user", user));
    }
    if let Some(sender) = &filter.sender {
        rows.retain(|r| field_is(r, "sender", sender));
    }
    if let Some(symbol) = &filter.base_symbol {
        rows.retain(|r| symbol_is(r, "base", symbol));
    }
    if let Some(symbol) = &filter.counter_symbol {
        rows.retain(|r| symbol_is(r, "counter", symbol));
    }
    rows
}

fn paginate(rows: Vec<Value>, page: Option<usize>, limit: Option<usize>) -> OrderPage {
    let total = rows.len();
    match (page, limit) {
        (Some(page), Some(limit)) if limit > 0 => {
            let page = page.max(1);
            let docs = rows
                .into_iter()
                .skip((page - 1) * limit)
                .take(limit)
                .collect();
            OrderPage {
                docs,
                total,
                limit,
                page,
                pages: total.div_ceil(limit),
            }
        }
        _ => OrderPage {
            docs: rows,
            total,
            limit: total,
            page: 1,
            pages: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows() -> Vec<Value> {
        vec![
            json!({"key": "1", "user": "alice", "sender": "bob", "base": "10.00 EOS", "counter": "5.0000 USDT"}),
            json!({"key": "2", "user": "alice", "sender": "dave", "base": "1.00 EOS", "counter": "2.00000000 GIZMO"}),
            json!({"key": "3", "user": "carol", "sender": "bob", "base": "7.0000 USDT", "counter": "3.00 EOS"}),
        ]
    }

    #[test]
    fn test_filter_by_user_and_sender() {
        let filter = OrderFilter {
            user: Some("alice".to_string()),
            sender: Some("bob".to_string()),
            ..Default::default()
        };
        let rows = filter_rows(rows(), &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["key"], "1");
    }

    #[test]
    fn test_filter_by_symbols() {
        let filter = OrderFilter {
            base_symbol: Some("EOS".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_rows(rows(), &filter).len(), 2);

        let filter = OrderFilter {
            counter_symbol: Some("GIZMO".to_string()),
            ..Default::default()
        };
        let rows = filter_rows(rows(), &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["key"], "2");
    }

    #[test]
    fn test_paginate() {
        let page = paginate(rows(), Some(2), Some(2));
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 2);
        assert_eq!(page.docs.len(), 1);
        assert_eq!(page.docs[0]["key"], "3");
    }

    #[test]
    fn test_paginate_defaults_to_single_page() {
        let page = paginate(rows(), None, None);
        assert_eq!(page.docs.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 1);
    }
}
