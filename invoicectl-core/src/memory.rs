//! In-memory implementation of Store for tests and database-free demos
//!
//! Mirrors the SQL semantics of the PostgreSQL store: inner joins for invoice
//! listings, left joins for customer aggregates, `ILIKE '%query%'` search with
//! its wildcards, and a decode error where a bigint sum would overflow. Every query is counted, and any query kind can be made to fail.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    CardTotals, Customer, CustomerField, CustomerTableRow, Invoice, InvoiceRecord, InvoiceStatus,
    InvoiceTableRow, LatestInvoiceRow, Revenue, StatusTotals,
};
use crate::placeholder;
use crate::search::contains_ignore_case;
use crate::store::Store;

/// Query shapes of the Store trait, for counting and fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Revenue,
    LatestInvoices,
    InvoiceCount,
    CustomerCount,
    StatusTotals,
    CardTotals,
    FilteredInvoices,
    CountFilteredInvoices,
    InvoiceById,
    Customers,
    FilteredCustomers,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::LatestInvoices => "latest_invoices",
            Self::InvoiceCount => "invoice_count",
            Self::CustomerCount => "customer_count",
            Self::StatusTotals => "status_totals",
            Self::CardTotals => "card_totals",
            Self::FilteredInvoices => "filtered_invoices",
            Self::CountFilteredInvoices => "count_filtered_invoices",
            Self::InvoiceById => "invoice_by_id",
            Self::Customers => "customers",
            Self::FilteredCustomers => "filtered_customers",
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<Customer>,
    invoices: Vec<Invoice>,
    revenue: Vec<Revenue>,
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: RwLock<HashSet<QueryKind>>,
    executed: RwLock<HashMap<QueryKind, usize>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the placeholder dataset
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write().unwrap_or_else(PoisonError::into_inner);
            tables.customers = placeholder::customers();
            tables.invoices = placeholder::invoices();
            tables.revenue = placeholder::revenue();
        }
        store
    }

    pub fn insert_customer(&self, customer: Customer) {
        self.write_tables().customers.push(customer);
    }

    pub fn insert_invoice(&self, invoice: Invoice) {
        self.write_tables().invoices.push(invoice);
    }

    pub fn insert_revenue(&self, revenue: Revenue) {
        self.write_tables().revenue.push(revenue);
    }

    /// Make every subsequent `kind` query fail
    pub fn fail(&self, kind: QueryKind) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind);
    }

    /// Undo [`MemoryStore::fail`]
    pub fn recover(&self, kind: QueryKind) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&kind);
    }

    /// How many `kind` queries ran, failed ones included
    pub fn executed(&self, kind: QueryKind) -> usize {
        self.executed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }

    fn begin(&self, kind: QueryKind) -> Result<(), StoreError> {
        *self
            .executed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default() += 1;

        let failing = self.failing.read().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(&kind) {
            return Err(StoreError::Unavailable {
                query: kind.as_str(),
            });
        }
        Ok(())
    }

    fn read_tables(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tables(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tables {
    fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// `invoices JOIN customers`, newest first
    fn joined_invoices(&self) -> Vec<(&Invoice, &Customer)> {
        let mut rows: Vec<_> = self
            .invoices
            .iter()
            .filter_map(|invoice| Some((invoice, self.customer(&invoice.customer_id)?)))
            .collect();
        rows.sort_by(|(a, _), (b, _)| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        rows
    }

    fn matching_invoices(&self, query: &str) -> Vec<(&Invoice, &Customer)> {
        self.joined_invoices()
            .into_iter()
            .filter(|(invoice, customer)| invoice_matches(invoice, customer, query))
            .collect()
    }

    fn status_totals(&self) -> Result<StatusTotals, StoreError> {
        sum_by_status(self.invoices.iter())
    }
}

fn invoice_matches(invoice: &Invoice, customer: &Customer, query: &str) -> bool {
    contains_ignore_case(&customer.name, query)
        || contains_ignore_case(&customer.email, query)
        || contains_ignore_case(&invoice.amount.to_string(), query)
        || contains_ignore_case(&invoice.date.format("%Y-%m-%d").to_string(), query)
        || contains_ignore_case(invoice.status.as_str(), query)
}

fn sum_by_status<'a>(
    mut invoices: impl Iterator<Item = &'a Invoice>,
) -> Result<StatusTotals, StoreError> {
    invoices.try_fold(StatusTotals::default(), |mut totals, invoice| {
        let sum = match invoice.status {
            InvoiceStatus::Paid => &mut totals.paid,
            InvoiceStatus::Pending => &mut totals.pending,
        };
        *sum = sum
            .checked_add(invoice.amount)
            .ok_or_else(|| StoreError::decode("amount", format!("{} + {}", sum, invoice.amount)))?;
        Ok(totals)
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn revenue(&self) -> Result<Vec<Revenue>, StoreError> {
        self.begin(QueryKind::Revenue)?;
        Ok(self.read_tables().revenue.clone())
    }

    async fn latest_invoices(&self, limit: u32) -> Result<Vec<LatestInvoiceRow>, StoreError> {
        self.begin(QueryKind::LatestInvoices)?;
        let tables = self.read_tables();

        Ok(tables
            .joined_invoices()
            .into_iter()
            .take(limit as usize)
            .map(|(invoice, customer)| LatestInvoiceRow {
                id: invoice.id.clone(),
                name: customer.name.clone(),
                email: customer.email.clone(),
                image_url: customer.image_url.clone(),
                amount: invoice.amount,
            })
            .collect())
    }

    async fn invoice_count(&self) -> Result<i64, StoreError> {
        self.begin(QueryKind::InvoiceCount)?;
        Ok(self.read_tables().invoices.len() as i64)
    }

    async fn customer_count(&self) -> Result<i64, StoreError> {
        self.begin(QueryKind::CustomerCount)?;
        Ok(self.read_tables().customers.len() as i64)
    }

    async fn status_totals(&self) -> Result<StatusTotals, StoreError> {
        self.begin(QueryKind::StatusTotals)?;
        self.read_tables().status_totals()
    }

    async fn card_totals(&self) -> Result<CardTotals, StoreError> {
        self.begin(QueryKind::CardTotals)?;
        let tables = self.read_tables();

        Ok(CardTotals {
            invoice_count: tables.invoices.len() as i64,
            customer_count: tables.customers.len() as i64,
            totals: tables.status_totals()?,
        })
    }

    async fn filtered_invoices(
        &self,
        query: &str,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<InvoiceTableRow>, StoreError> {
        self.begin(QueryKind::FilteredInvoices)?;
        let tables = self.read_tables();

        Ok(tables
            .matching_invoices(query)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(invoice, customer)| InvoiceTableRow {
                id: invoice.id.clone(),
                customer_id: customer.id.clone(),
                name: customer.name.clone(),
                email: customer.email.clone(),
                image_url: customer.image_url.clone(),
                date: invoice.date,
                amount: invoice.amount,
                status: invoice.status,
            })
            .collect())
    }

    async fn count_filtered_invoices(&self, query: &str) -> Result<i64, StoreError> {
        self.begin(QueryKind::CountFilteredInvoices)?;
        Ok(self.read_tables().matching_invoices(query).len() as i64)
    }

    async fn invoice_by_id(&self, id: &str) -> Result<Option<InvoiceRecord>, StoreError> {
        self.begin(QueryKind::InvoiceById)?;
        let tables = self.read_tables();

        Ok(tables
            .invoices
            .iter()
            .find(|invoice| invoice.id == id)
            .map(|invoice| InvoiceRecord {
                id: invoice.id.clone(),
                customer_id: invoice.customer_id.clone(),
                amount: invoice.amount,
                status: invoice.status,
            }))
    }

    async fn customers(&self) -> Result<Vec<CustomerField>, StoreError> {
        self.begin(QueryKind::Customers)?;
        let tables = self.read_tables();

        let mut customers: Vec<_> = tables
            .customers
            .iter()
            .map(|c| CustomerField {
                id: c.id.clone(),
                name: c.name.clone(),
            })
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn filtered_customers(&self, query: &str) -> Result<Vec<CustomerTableRow>, StoreError> {
        self.begin(QueryKind::FilteredCustomers)?;
        let tables = self.read_tables();

        let mut rows = tables
            .customers
            .iter()
            .filter(|c| contains_ignore_case(&c.name, query) || contains_ignore_case(&c.email, query))
            .map(|c| -> Result<_, StoreError> {
                let owned = tables.invoices.iter().filter(|i| i.customer_id == c.id);
                let totals = sum_by_status(owned.clone())?;
                Ok(CustomerTableRow {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    email: c.email.clone(),
                    image_url: c.image_url.clone(),
                    total_invoices: owned.count() as i64,
                    total_pending: totals.pending,
                    total_paid: totals.paid,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
