//! Commerce reports over clients, products and sales.
//!
//! Money columns are summed in minor units. Discounted amounts are rounded to
//! whole minor units by the store after summing.

use chrono::NaiveDate;
use rusqlite::Connection;
use sampledb_common::{Money, PaymentMethod, Result, SaleId};
use serde::Serialize;

use super::collect;
use super::table::{percent, ReportRow};
use crate::column_parse;

/// A sale paid in cash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashSale {
    pub sale_id: SaleId,
    pub firm_name: String,
    pub sale_date: NaiveDate,
    pub product_name: String,
    pub quantity_sold: i64,
    pub discount: f64,
    pub payment_method: PaymentMethod,
}

impl ReportRow for CashSale {
    const COLUMNS: &'static [&'static str] = &[
        "sale_id",
        "firm_name",
        "sale_date",
        "product_name",
        "quantity_sold",
        "discount",
        "payment_method",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.sale_id.to_string(),
            self.firm_name.clone(),
            self.sale_date.to_string(),
            self.product_name.clone(),
            self.quantity_sold.to_string(),
            percent(self.discount),
            self.payment_method.to_string(),
        ]
    }
}

/// A sale that needs delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverySale {
    pub sale_id: SaleId,
    pub firm_name: String,
    pub product_name: String,
    pub sale_date: NaiveDate,
    pub delivery_needed: bool,
    pub delivery_cost: Money,
}

impl ReportRow for DeliverySale {
    const COLUMNS: &'static [&'static str] = &[
        "sale_id",
        "firm_name",
        "product_name",
        "sale_date",
        "delivery_needed",
        "delivery_cost",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.sale_id.to_string(),
            self.firm_name.clone(),
            self.product_name.clone(),
            self.sale_date.to_string(),
            self.delivery_needed.to_string(),
            self.delivery_cost.to_string(),
        ]
    }
}

/// What a client owes before and after discounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientTotal {
    pub firm_name: String,
    pub total_amount: Money,
    pub discounted_amount: Money,
}

impl ReportRow for ClientTotal {
    const COLUMNS: &'static [&'static str] = &["firm_name", "total_amount", "discounted_amount"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.firm_name.clone(),
            self.total_amount.to_string(),
            self.discounted_amount.to_string(),
        ]
    }
}

/// One purchase of a given client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientPurchase {
    pub sale_id: SaleId,
    pub product_name: String,
    pub sale_date: NaiveDate,
    pub quantity_sold: i64,
    pub discount: f64,
}

impl ReportRow for ClientPurchase {
    const COLUMNS: &'static [&'static str] =
        &["sale_id", "product_name", "sale_date", "quantity_sold", "discount"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.sale_id.to_string(),
            self.product_name.clone(),
            self.sale_date.to_string(),
            self.quantity_sold.to_string(),
            percent(self.discount),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseCount {
    pub firm_name: String,
    pub purchase_count: i64,
}

impl ReportRow for PurchaseCount {
    const COLUMNS: &'static [&'static str] = &["firm_name", "purchase_count"];

    fn cells(&self) -> Vec<String> {
        vec![self.firm_name.clone(), self.purchase_count.to_string()]
    }
}

/// Discounted amounts a client paid, split by payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSplit {
    pub firm_name: String,
    pub cash_payment: Money,
    pub non_cash_payment: Money,
}

impl ReportRow for PaymentSplit {
    const COLUMNS: &'static [&'static str] = &["firm_name", "cash_payment", "non_cash_payment"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.firm_name.clone(),
            self.cash_payment.to_string(),
            self.non_cash_payment.to_string(),
        ]
    }
}

/// Sales paid in cash, ordered by firm name.
pub fn cash_sales(conn: &Connection) -> Result<Vec<CashSale>> {
    collect(
        conn,
        "SELECT s.sale_id, c.firm_name, s.sale_date, p.product_name,
                s.quantity_sold, s.discount, s.payment_method
         FROM sales s
         JOIN clients c ON s.client_id = c.client_id
         JOIN products p ON s.product_id = p.product_id
         WHERE s.payment_method = 'cash'
         ORDER BY c.firm_name, s.sale_id",
        [],
        |row| {
            Ok(CashSale {
                sale_id: SaleId::from(row.get::<_, i64>(0)?),
                firm_name: row.get(1)?,
                sale_date: row.get(2)?,
                product_name: row.get(3)?,
                quantity_sold: row.get(4)?,
                discount: row.get(5)?,
                payment_method: column_parse(row, 6)?,
            })
        },
    )
}

/// Sales that need delivery.
pub fn deliveries(conn: &Connection) -> Result<Vec<DeliverySale>> {
    collect(
        conn,
        "SELECT s.sale_id, c.firm_name, p.product_name, s.sale_date,
                s.delivery_needed, s.delivery_cost_minor
         FROM sales s
         JOIN clients c ON s.client_id = c.client_id
         JOIN products p ON s.product_id = p.product_id
         WHERE s.delivery_needed = 1
         ORDER BY s.sale_id",
        [],
        |row| {
            Ok(DeliverySale {
                sale_id: SaleId::from(row.get::<_, i64>(0)?),
                firm_name: row.get(1)?,
                product_name: row.get(2)?,
                sale_date: row.get(3)?,
                delivery_needed: row.get(4)?,
                delivery_cost: Money::from_minor(row.get(5)?),
            })
        },
    )
}

/// Gross and discounted amount per client.
pub fn client_totals(conn: &Connection) -> Result<Vec<ClientTotal>> {
    collect(
        conn,
        "SELECT c.firm_name,
                SUM(p.price_minor * s.quantity_sold) AS total_amount,
                CAST(ROUND(SUM(p.price_minor * s.quantity_sold * (100.0 - s.discount) / 100.0)) AS INTEGER)
                    AS discounted_amount
         FROM sales s
         JOIN clients c ON s.client_id = c.client_id
         JOIN products p ON s.product_id = p.product_id
         GROUP BY c.firm_name
         ORDER BY c.firm_name",
        [],
        |row| {
            Ok(ClientTotal {
                firm_name: row.get(0)?,
                total_amount: Money::from_minor(row.get(1)?),
                discounted_amount: Money::from_minor(row.get(2)?),
            })
        },
    )
}

/// Purchases of the client with the given firm name.
pub fn client_purchases(conn: &Connection, firm_name: &str) -> Result<Vec<ClientPurchase>> {
    collect(
        conn,
        "SELECT s.sale_id, p.product_name, s.sale_date, s.quantity_sold, s.discount
         FROM sales s
         JOIN clients c ON s.client_id = c.client_id
         JOIN products p ON s.product_id = p.product_id
         WHERE c.firm_name = :firm_name
         ORDER BY s.sale_date, s.sale_id",
        rusqlite::named_params! { ":firm_name": firm_name },
        |row| {
            Ok(ClientPurchase {
                sale_id: SaleId::from(row.get::<_, i64>(0)?),
                product_name: row.get(1)?,
                sale_date: row.get(2)?,
                quantity_sold: row.get(3)?,
                discount: row.get(4)?,
            })
        },
    )
}

/// Number of sales per client.
pub fn purchase_counts(conn: &Connection) -> Result<Vec<PurchaseCount>> {
    collect(
        conn,
        "SELECT c.firm_name, COUNT(s.sale_id) AS purchase_count
         FROM sales s
         JOIN clients c ON s.client_id = c.client_id
         GROUP BY c.firm_name
         ORDER BY c.firm_name",
        [],
        |row| {
            Ok(PurchaseCount {
                firm_name: row.get(0)?,
                purchase_count: row.get(1)?,
            })
        },
    )
}

/// Discounted amounts per client, cash and non-cash side by side.
pub fn payments_by_method(conn: &Connection) -> Result<Vec<PaymentSplit>> {
    collect(
        conn,
        "SELECT c.firm_name,
                CAST(ROUND(SUM(CASE WHEN s.payment_method = 'cash'
                    THEN p.price_minor * s.quantity_sold * (100.0 - s.discount) / 100.0
                    ELSE 0 END)) AS INTEGER) AS cash_payment,
                CAST(ROUND(SUM(CASE WHEN s.payment_method = 'non_cash'
                    THEN p.price_minor * s.quantity_sold * (100.0 - s.discount) / 100.0
                    ELSE 0 END)) AS INTEGER) AS non_cash_payment
         FROM sales s
         JOIN clients c ON s.client_id = c.client_id
         JOIN products p ON s.product_id = p.product_id
         GROUP BY c.firm_name
         ORDER BY c.firm_name",
        [],
        |row| {
            Ok(PaymentSplit {
                firm_name: row.get(0)?,
                cash_payment: Money::from_minor(row.get(1)?),
                non_cash_payment: Money::from_minor(row.get(2)?),
            })
        },
    )
}
