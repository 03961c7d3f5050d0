//! The invoice data set. The grid only reads it; sorting and applying
//! edits happen here.

use std::cmp::Ordering;

use rowscope::{Alignment, CellValue, Column, GridRow, SortDirection};

const CUSTOMERS: &[&str] = &[
    "Acme Corp",
    "Globex",
    "Initech",
    "Umbrella",
    "Hooli",
    "Stark Industries",
    "Wayne Enterprises",
    "Wonka Industries",
    "Tyrell Corp",
    "Cyberdyne",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: u32,
    pub customer: String,
    pub amount: i64,
    pub due: String,
    pub paid: bool,
}

impl GridRow for Invoice {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }

    fn field(&self, name: &str) -> CellValue {
        match name {
            "customer" => CellValue::Text(self.customer.clone()),
            "amount" => CellValue::Integer(self.amount),
            "due" => CellValue::Text(self.due.clone()),
            "paid" => CellValue::Bool(self.paid),
            _ => CellValue::Empty,
        }
    }
}

/// Deterministic sample invoices.
pub fn generate(count: usize) -> Vec<Invoice> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    (1..=count as u32)
        .map(|id| {
            let r = next();
            Invoice {
                id,
                customer: CUSTOMERS[(r % CUSTOMERS.len() as u64) as usize].to_string(),
                amount: ((r >> 8) % 50_000) as i64,
                due: format!("2024-{:02}-{:02}", (r >> 24) % 12 + 1, (r >> 32) % 28 + 1),
                paid: (r >> 40) % 3 == 0,
            }
        })
        .collect()
}

/// Column set shown by the host.
pub fn columns() -> Vec<Column<Invoice>> {
    vec![
        Column::new("number", "Invoice", 10.0)
            .derived(|inv: &Invoice| CellValue::text(format!("INV-{:05}", inv.id)))
            .sortable(),
        Column::new("customer", "Customer", 22.0)
            .min_width(8.0)
            .sortable()
            .editable(),
        Column::new("amount", "Amount", 12.0)
            .align(Alignment::Right)
            .sortable()
            .editable()
            .render_with(|v| match v {
                CellValue::Integer(i) => format!("${}", i),
                other => other.to_string(),
            }),
        Column::new("due", "Due", 12.0).sortable(),
        Column::new("paid", "Paid", 6.0)
            .align(Alignment::Center)
            .editable()
            .render_with(|v| match v {
                CellValue::Bool(true) => "yes".to_string(),
                CellValue::Bool(false) => "no".to_string(),
                other => other.to_string(),
            }),
    ]
}

/// Owner of the invoices: keeps them in natural (id) order and hands out
/// sorted copies.
#[derive(Debug, Default)]
pub struct InvoiceStore {
    invoices: Vec<Invoice>,
    sort: Option<(String, SortDirection)>,
}

impl InvoiceStore {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices,
            sort: None,
        }
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn set_sort(&mut self, column_id: &str, direction: Option<SortDirection>) {
        self.sort = direction.map(|d| (column_id.to_string(), d));
    }

    /// Rows in the current sort order. Ties keep natural order.
    pub fn rows(&self) -> Vec<Invoice> {
        let mut rows = self.invoices.clone();
        if let Some((column, direction)) = &self.sort {
            rows.sort_by(|a, b| {
                let ord = compare(a, b, column);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    /// Check a value before the grid accepts the commit.
    pub fn validate(column_id: &str, value: &CellValue) -> Result<(), String> {
        match (column_id, value) {
            ("customer", CellValue::Text(s)) if s.trim().is_empty() => {
                Err("customer is required".to_string())
            }
            ("customer", CellValue::Text(_)) => Ok(()),
            ("amount", CellValue::Integer(i)) if *i < 0 => {
                Err("amount must be non-negative".to_string())
            }
            ("amount", CellValue::Integer(_)) => Ok(()),
            ("amount", CellValue::Empty) => Err("amount is required".to_string()),
            ("paid", CellValue::Bool(_)) => Ok(()),
            (column, value) => Err(format!("cannot store {:?} in {}", value.kind(), column)),
        }
    }

    /// Write an accepted value into the invoice.
    pub fn apply(&mut self, id: u32, column_id: &str, value: CellValue) -> Result<(), String> {
        Self::validate(column_id, &value)?;
        let invoice = self
            .invoices
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or_else(|| format!("invoice {} no longer exists", id))?;
        match (column_id, value) {
            ("customer", CellValue::Text(s)) => invoice.customer = s.trim().to_string(),
            ("amount", CellValue::Integer(i)) => invoice.amount = i,
            ("paid", CellValue::Bool(b)) => invoice.paid = b,
            _ => {}
        }
        Ok(())
    }

    /// Drop an invoice.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.invoices.len();
        self.invoices.retain(|inv| inv.id != id);
        self.invoices.len() != before
    }
}

/// Owner comparison rules: numbers numerically, text case-insensitively.
fn compare(a: &Invoice, b: &Invoice, column_id: &str) -> Ordering {
    match column_id {
        "number" => a.id.cmp(&b.id),
        "customer" => a.customer.to_lowercase().cmp(&b.customer.to_lowercase()),
        "amount" => a.amount.cmp(&b.amount),
        "due" => a.due.cmp(&b.due),
        "paid" => a.paid.cmp(&b.paid),
        _ => Ordering::Equal,
    }
}
