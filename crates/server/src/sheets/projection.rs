//! Order projection over raw sheet rows.
//!
//! # Column contract
//!
//! Row 1 of the configured range is a header row; columns are resolved by
//! header title, not position, so feeds may reorder or append columns
//! freely as long as the titles below are present:
//!
//! | Header            | Field          |
//! |-------------------|----------------|
//! | `Order ID`        | `order_id`     |
//! | `Price`           | `price`        |
//! | `Total quantity`  | `quantity`     |
//! | `Product name`    | `product`      |
//! | `Full name`       | `full_name`    |
//! | `Full address`    | `address`      |
//! | `Area`            | `area`         |
//! | `City`            | `city`         |
//! | `Phone`           | `phone`        |
//! | `Back up phone`   | `backup_phone` |
//! | `Email`           | `email`        |
//! | `Currency`        | `currency`     |
//! | `Note for driver` | `note`         |
//! | `Order Link`      | `link`         |
//! | `Order date`      | `date`         |
//! | `Status`          | `status`       |
//!
//! Cells beyond a row's length read as empty. A blank `Order ID` is
//! synthesized as `row{n}` from the data-row index so every projected
//! order is addressable.

use crate::models::Order;

use super::SheetsError;

/// Resolved header positions for one sheet.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    order_id: usize,
    price: usize,
    quantity: usize,
    product: usize,
    full_name: usize,
    address: usize,
    area: usize,
    city: usize,
    phone: usize,
    backup_phone: usize,
    email: usize,
    currency: usize,
    note: usize,
    link: usize,
    date: usize,
    status: usize,
}

impl ColumnMap {
    /// Resolve column positions from the header row.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::MissingColumn` naming the first absent header.
    pub fn resolve(header: &[String]) -> Result<Self, SheetsError> {
        let find = |title: &'static str| {
            header
                .iter()
                .position(|h| h == title)
                .ok_or(SheetsError::MissingColumn(title))
        };

        Ok(Self {
            order_id: find("Order ID")?,
            price: find("Price")?,
            quantity: find("Total quantity")?,
            product: find("Product name")?,
            full_name: find("Full name")?,
            address: find("Full address")?,
            area: find("Area")?,
            city: find("City")?,
            phone: find("Phone")?,
            backup_phone: find("Back up phone")?,
            email: find("Email")?,
            currency: find("Currency")?,
            note: find("Note for driver")?,
            link: find("Order Link")?,
            date: find("Order date")?,
            status: find("Status")?,
        })
    }
}

/// Read one cell, treating short rows as padded with empty text.
fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

/// Truncate an order date to its `YYYY-MM-DD` prefix.
fn truncate_date(value: &str) -> String {
    value.split('T').next().unwrap_or_default().to_owned()
}

/// Project one sheet's raw values (header row first) into orders.
///
/// # Errors
///
/// Returns `SheetsError::MissingColumn` when the header row lacks a
/// contracted column. An empty values payload projects to no orders.
pub fn parse_sheet(values: &[Vec<String>]) -> Result<Vec<Order>, SheetsError> {
    let Some((header, rows)) = values.split_first() else {
        return Ok(Vec::new());
    };

    let columns = ColumnMap::resolve(header)?;

    let orders = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let raw_id = cell(row, columns.order_id);
            Order {
                order_id: if raw_id.is_empty() {
                    format!("row{i}")
                } else {
                    raw_id
                },
                price: cell(row, columns.price),
                quantity: cell(row, columns.quantity),
                product: cell(row, columns.product),
                full_name: cell(row, columns.full_name),
                address: cell(row, columns.address),
                area: cell(row, columns.area),
                city: cell(row, columns.city),
                phone: cell(row, columns.phone),
                backup_phone: cell(row, columns.backup_phone),
                email: cell(row, columns.email),
                currency: cell(row, columns.currency),
                note: cell(row, columns.note),
                link: cell(row, columns.link),
                date: truncate_date(&cell(row, columns.date)),
                status: cell(row, columns.status),
            }
        })
        .collect();

    Ok(orders)
}

/// Concatenate per-sheet projections into the final order list.
///
/// Ordering is source order, then row order within each source.
#[must_use]
pub fn concat_sheets(sheets: Vec<Vec<Order>>) -> Vec<Order> {
    sheets.into_iter().flatten().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        [
            "Price",
            "Total quantity",
            "Product name",
            "Full name",
            "Full address",
            "Area",
            "City",
            "Phone",
            "Back up phone",
            "Order ID",
            "Email",
            "Currency",
            "Note for driver",
            "Order Link",
            "Order date",
            "Status",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    fn row(order_id: &str, price: &str, date: &str, status: &str) -> Vec<String> {
        vec![
            price.to_owned(),
            "2".to_owned(),
            "Oud Perfume".to_owned(),
            "Ali Hassan".to_owned(),
            "12 Marina Walk".to_owned(),
            "Marina".to_owned(),
            "Dubai".to_owned(),
            "0501234567".to_owned(),
            String::new(),
            order_id.to_owned(),
            "ali@example.com".to_owned(),
            "AED".to_owned(),
            String::new(),
            String::new(),
            date.to_owned(),
            status.to_owned(),
        ]
    }

    #[test]
    fn test_parse_sheet_resolves_by_header_not_position() {
        let values = vec![header(), row("ORD-9", "120", "2025-07-01", "New Order")];
        let orders = parse_sheet(&values).unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "ORD-9");
        assert_eq!(orders[0].price, "120");
        assert_eq!(orders[0].city, "Dubai");
        assert_eq!(orders[0].status, "New Order");
    }

    #[test]
    fn test_parse_sheet_missing_column() {
        let mut bad_header = header();
        bad_header.retain(|h| h != "Status");
        let values = vec![bad_header];

        let err = parse_sheet(&values).unwrap_err();
        assert!(matches!(err, SheetsError::MissingColumn("Status")));
    }

    #[test]
    fn test_parse_sheet_empty_values() {
        assert!(parse_sheet(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_sheet_truncates_date() {
        let values = vec![
            header(),
            row("ORD-1", "50", "2025-07-09T14:03:00.000Z", "New Order"),
        ];
        let orders = parse_sheet(&values).unwrap();
        assert_eq!(orders[0].date, "2025-07-09");
    }

    #[test]
    fn test_parse_sheet_short_rows_pad_empty() {
        let values = vec![header(), vec!["99".to_owned()]];
        let orders = parse_sheet(&values).unwrap();

        assert_eq!(orders[0].price, "99");
        assert_eq!(orders[0].status, "");
        // Blank Order ID falls back to the data-row index
        assert_eq!(orders[0].order_id, "row0");
    }

    #[test]
    fn test_concat_preserves_source_then_row_order() {
        let source_a = vec![
            Order {
                order_id: "a1".into(),
                ..Order::default()
            },
            Order {
                order_id: "a2".into(),
                ..Order::default()
            },
            Order {
                order_id: "a3".into(),
                ..Order::default()
            },
        ];
        let source_b = vec![
            Order {
                order_id: "b1".into(),
                ..Order::default()
            },
            Order {
                order_id: "b2".into(),
                ..Order::default()
            },
        ];

        let all = concat_sheets(vec![source_a, source_b]);

        assert_eq!(all.len(), 5);
        let ids: Vec<_> = all.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3", "b1", "b2"]);
    }
}
