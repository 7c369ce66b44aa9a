//! Domain records mirrored from relational rows.
//!
//! Raw row types carry amounts in integer cents exactly as the store returns
//! them. The display types next to them carry the formatted values the
//! fetchers hand to renderers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::{cents_to_dollars, format_currency};
use crate::error::StoreError;

/// Invoice status as stored in the `invoices.status` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Pending,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            other => Err(StoreError::decode("status", other)),
        }
    }
}

/// Invoice row (`invoices` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
}

/// Customer row (`customers` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Monthly revenue row (`revenue` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    pub month: String,
    pub revenue: i64,
}

/// Latest-invoices row before formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestInvoiceRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: i64,
}

/// Latest invoice as displayed on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: String,
}

impl From<LatestInvoiceRow> for LatestInvoice {
    fn from(row: LatestInvoiceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            amount: format_currency(row.amount),
        }
    }
}

/// Invoice joined with its customer for the invoices table.
///
/// Returned unformatted; the table renders the amount itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTableRow {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Single invoice as read for the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Invoice for the edit form, amount in dollars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl From<InvoiceRecord> for InvoiceForm {
    fn from(record: InvoiceRecord) -> Self {
        Self {
            id: record.id,
            customer_id: record.customer_id,
            amount: cents_to_dollars(record.amount),
            status: record.status,
        }
    }
}

/// Customer option for select inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// Customer with invoice aggregates, before formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerTableRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Customer with formatted invoice aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerTable {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<CustomerTableRow> for CustomerTable {
    fn from(row: CustomerTableRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        }
    }
}

/// Paid and pending sums in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub paid: i64,
    pub pending: i64,
}

/// All card figures from one combined query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardTotals {
    pub invoice_count: i64,
    pub customer_count: i64,
    pub totals: StatusTotals,
}

/// Dashboard summary cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number_of_invoices: i64,
    pub number_of_customers: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

impl From<CardTotals> for CardData {
    fn from(t: CardTotals) -> Self {
        Self {
            number_of_invoices: t.invoice_count,
            number_of_customers: t.customer_count,
            total_paid_invoices: format_currency(t.totals.paid),
            total_pending_invoices: format_currency(t.totals.pending),
        }
    }
}

/// Everything the dashboard overview renders, fetched in one go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub revenue: Vec<Revenue>,
    pub latest_invoices: Vec<LatestInvoice>,
    pub card_data: CardData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::Pending.to_string(), "pending");
        assert!("overdue".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn invoice_form_converts_cents_to_dollars() {
        let form = InvoiceForm::from(InvoiceRecord {
            id: "abc123".into(),
            customer_id: "c1".into(),
            amount: 150000,
            status: InvoiceStatus::Paid,
        });
        assert_eq!(form.amount, 1500.0);
    }

    #[test]
    fn card_data_serializes_camel_case() {
        let card = CardData::from(CardTotals {
            invoice_count: 3,
            customer_count: 2,
            totals: StatusTotals {
                paid: 12345,
                pending: 0,
            },
        });
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["numberOfInvoices"], 3);
        assert_eq!(json["totalPaidInvoices"], "$123.45");
        assert_eq!(json["totalPendingInvoices"], "$0.00");
    }
}
