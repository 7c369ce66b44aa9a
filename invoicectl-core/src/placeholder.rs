//! Placeholder dataset for seeding a fresh database or the in-memory store

use chrono::NaiveDate;

use crate::models::{Customer, Invoice, InvoiceStatus, Revenue};

const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    ("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa", "Ada Lindqvist", "ada@lindqvist.dev", "/customers/ada-lindqvist.png"),
    ("3958dc9e-712f-4377-85e9-fec4b6a6442a", "Bruno Costa", "bruno@costa.io", "/customers/bruno-costa.png"),
    ("3958dc9e-742f-4377-85e9-fec4b6a6442a", "Chidi Okafor", "chidi@okafor.net", "/customers/chidi-okafor.png"),
    ("76d65c26-f784-44a2-ac19-586678f7c2f2", "Dana Whitfield", "dana@whitfield.org", "/customers/dana-whitfield.png"),
    ("cc27c14a-0acf-4f4a-a6c9-d45682c144b9", "Emeka Lee", "emeka@lee.co", "/customers/emeka-lee.png"),
    ("13d07535-c59e-4157-a011-f8d2ef4e0cbb", "Farah Haddad", "farah@haddad.me", "/customers/farah-haddad.png"),
];

const INVOICES: &[(&str, usize, i64, InvoiceStatus, &str)] = &[
    ("2f7a1b3c-0001-4a5b-9c8d-000000000001", 0, 15795, InvoiceStatus::Pending, "2022-12-06"),
    ("2f7a1b3c-0002-4a5b-9c8d-000000000002", 1, 20348, InvoiceStatus::Pending, "2022-11-14"),
    ("2f7a1b3c-0003-4a5b-9c8d-000000000003", 4, 3040, InvoiceStatus::Paid, "2022-10-29"),
    ("2f7a1b3c-0004-4a5b-9c8d-000000000004", 3, 44800, InvoiceStatus::Paid, "2023-09-10"),
    ("2f7a1b3c-0005-4a5b-9c8d-000000000005", 5, 34577, InvoiceStatus::Pending, "2023-08-05"),
    ("2f7a1b3c-0006-4a5b-9c8d-000000000006", 2, 54246, InvoiceStatus::Pending, "2023-07-16"),
    ("2f7a1b3c-0007-4a5b-9c8d-000000000007", 0, 666, InvoiceStatus::Pending, "2023-06-27"),
    ("2f7a1b3c-0008-4a5b-9c8d-000000000008", 3, 32545, InvoiceStatus::Paid, "2023-06-09"),
    ("2f7a1b3c-0009-4a5b-9c8d-000000000009", 4, 1250, InvoiceStatus::Paid, "2023-06-17"),
    ("2f7a1b3c-0010-4a5b-9c8d-000000000010", 5, 8546, InvoiceStatus::Paid, "2023-06-07"),
    ("2f7a1b3c-0011-4a5b-9c8d-000000000011", 1, 500, InvoiceStatus::Paid, "2023-08-19"),
    ("2f7a1b3c-0012-4a5b-9c8d-000000000012", 5, 8945, InvoiceStatus::Paid, "2023-06-03"),
    ("2f7a1b3c-0013-4a5b-9c8d-000000000013", 2, 1000, InvoiceStatus::Paid, "2022-06-05"),
];

const REVENUE: &[(&str, i64)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

pub fn customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|&(id, name, email, image_url)| Customer {
            id: id.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
            image_url: image_url.to_owned(),
        })
        .collect()
}

pub fn invoices() -> Vec<Invoice> {
    INVOICES
        .iter()
        .filter_map(|&(id, customer, amount, status, date)| {
            Some(Invoice {
                id: id.to_owned(),
                customer_id: CUSTOMERS.get(customer)?.0.to_owned(),
                amount,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?,
                status,
            })
        })
        .collect()
}

pub fn revenue() -> Vec<Revenue> {
    REVENUE
        .iter()
        .map(|&(month, revenue)| Revenue {
            month: month.to_owned(),
            revenue,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_invoice_is_kept() {
        assert_eq!(invoices().len(), INVOICES.len());
        assert_eq!(customers().len(), 6);
        assert_eq!(revenue().len(), 12);
    }

    #[test]
    fn invoices_reference_known_customers() {
        let ids: Vec<_> = customers().into_iter().map(|c| c.id).collect();
        assert!(invoices().iter().all(|i| ids.contains(&i.customer_id)));
    }
}
