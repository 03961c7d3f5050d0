#![allow(dead_code)]

use rowscope::{CellValue, Column, GridRow};
use simplelog::{Config, LevelFilter, TestLogger};

/// Route engine logs to the test harness's captured output.
pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub name: String,
    pub amount: i64,
    pub date: String,
}

impl Invoice {
    pub fn new(id: &str, name: &str, amount: i64, date: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            date: date.to_string(),
        }
    }
}

impl GridRow for Invoice {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn field(&self, name: &str) -> CellValue {
        match name {
            "name" => CellValue::Text(self.name.clone()),
            "amount" => CellValue::Integer(self.amount),
            "date" => CellValue::Text(self.date.clone()),
            _ => CellValue::Empty,
        }
    }
}

/// `r1..=rN`, amounts descending so sorting visibly reorders them.
pub fn rows(n: usize) -> Vec<Invoice> {
    (1..=n)
        .map(|i| {
            Invoice::new(
                &format!("r{}", i),
                &format!("Customer {}", i),
                (n - i) as i64 * 10,
                &format!("2024-01-{:02}", i),
            )
        })
        .collect()
}

/// name (editable), amount (sortable and editable), date.
pub fn columns() -> Vec<Column<Invoice>> {
    vec![
        Column::new("name", "Name", 200.0).editable(),
        Column::new("amount", "Amount", 120.0)
            .sortable()
            .editable()
            .min_width(80.0),
        Column::new("date", "Date", 140.0),
    ]
}

pub fn key(id: &str) -> String {
    id.to_string()
}

pub fn keys(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
