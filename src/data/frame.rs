use serde::{Deserialize, Serialize};

use crate::{
    constants::columns,
    error::{EnvError, EnvResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Column-oriented price table. Every column has the same length and only finite values.
/// Closes are strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFrame {
    columns: Vec<(String, Vec<f64>)>,
    len: usize,
}

impl PriceFrame {
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> EnvResult<Self> {
        let Some((_, first)) = columns.first() else {
            return Err(EnvError::MalformedInput("price frame has no columns".into()));
        };
        let len = first.len();

        for (index, (name, values)) in columns.iter().enumerate() {
            if values.len() != len {
                return Err(EnvError::MalformedInput(format!(
                    "column {name} has {} rows, expected {len}",
                    values.len()
                )));
            }
            if columns[..index].iter().any(|(other, _)| other == name) {
                return Err(EnvError::MalformedInput(format!("duplicate column {name}")));
            }
            if let Some(row) = values.iter().position(|value| !value.is_finite()) {
                return Err(EnvError::MalformedInput(format!(
                    "column {name} has a non-finite value at row {row}"
                )));
            }
            if name == columns::CLOSE {
                if let Some(row) = values.iter().position(|value| *value <= 0.) {
                    return Err(EnvError::MalformedInput(format!(
                        "close price {} at row {row} is not positive",
                        values[row]
                    )));
                }
            }
        }

        Ok(Self { columns, len })
    }

    pub fn from_closes(closes: Vec<f64>) -> EnvResult<Self> {
        Self::new(vec![(columns::CLOSE.to_string(), closes)])
    }

    pub fn from_bars(bars: &[Bar]) -> EnvResult<Self> {
        let column = |name: &str, field: fn(&Bar) -> f64| {
            (name.to_string(), bars.iter().map(field).collect::<Vec<f64>>())
        };

        Self::new(vec![
            column(columns::OPEN, |bar| bar.open),
            column(columns::HIGH, |bar| bar.high),
            column(columns::LOW, |bar| bar.low),
            column(columns::CLOSE, |bar| bar.close),
            column(columns::VOLUME, |bar| bar.volume),
        ])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column(&self, name: &str) -> EnvResult<&[f64]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| EnvError::MissingColumn(name.to_string()))
    }

    pub fn close(&self) -> EnvResult<&[f64]> {
        self.column(columns::CLOSE)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }
}
