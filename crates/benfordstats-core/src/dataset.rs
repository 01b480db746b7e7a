//! Country-year panel input.
//!
//! A [`Panel`] is an immutable set of records, one per (entity, year), each
//! carrying a population and a GDP-per-capita figure. The caller loads it once
//! and passes it by reference into every analysis.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BenfordError, Result};

/// One row of the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Country (or any other panel unit).
    #[serde(alias = "country")]
    pub entity: String,
    pub year: i32,
    #[serde(alias = "pop")]
    pub population: f64,
    #[serde(alias = "gdpPercap")]
    pub gdp_per_capita: f64,
}

/// Numeric column of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Population,
    GdpPerCapita,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Population => "population",
            Column::GdpPerCapita => "gdp_per_capita",
        }
    }

    fn value(&self, record: &Record) -> f64 {
        match self {
            Column::Population => record.population,
            Column::GdpPerCapita => record.gdp_per_capita,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = BenfordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "population" | "pop" => Ok(Column::Population),
            "gdp_per_capita" | "gdppercap" | "gdp" => Ok(Column::GdpPerCapita),
            other => Err(BenfordError::InvalidArgument(format!(
                "unknown column '{}'. Use 'population' or 'gdp_per_capita'.",
                other
            ))),
        }
    }
}

/// Immutable panel of country-year records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    records: Vec<Record>,
}

impl Panel {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    ///
    /// Field names follow [`Record`]; `country`, `pop` and `gdpPercap` are
    /// accepted as aliases.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        debug!(records = records.len(), "loaded panel from json");
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of records for `year`.
    pub fn entities_in_year(&self, year: i32) -> usize {
        self.records.iter().filter(|r| r.year == year).count()
    }
}

/// Values of `column`, optionally restricted to one year, in record order.
///
/// # Errors
/// - `EmptyDataset` if no record matches
/// - `InvalidInput` if a selected value is not strictly positive and finite
pub fn select_column(panel: &Panel, column: Column, filter_year: Option<i32>) -> Result<Vec<f64>> {
    let values = panel
        .records
        .iter()
        .filter(|r| filter_year.map_or(true, |y| r.year == y))
        .map(|r| {
            let v = column.value(r);
            if v.is_finite() && v > 0.0 {
                Ok(v)
            } else {
                Err(BenfordError::InvalidInput(format!(
                    "{} for {} in {} is {}",
                    column, r.entity, r.year, v
                )))
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.is_empty() {
        return Err(BenfordError::EmptyDataset(match filter_year {
            Some(y) => format!("no {} values for year {}", column, y),
            None => format!("no {} values in panel", column),
        }));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entity: &str, year: i32, population: f64, gdp_per_capita: f64) -> Record {
        Record {
            entity: entity.to_string(),
            year,
            population,
            gdp_per_capita,
        }
    }

    fn sample_panel() -> Panel {
        Panel::new(vec![
            record("Albania", 2002, 3_508_512.0, 4_604.2),
            record("Albania", 2007, 3_600_523.0, 5_937.0),
            record("Brazil", 2002, 179_914_212.0, 8_131.2),
            record("Brazil", 2007, 190_010_647.0, 9_065.8),
            record("Chad", 2002, 8_835_739.0, 1_156.2),
            record("Chad", 2007, 10_238_807.0, 1_704.1),
            record("Denmark", 2007, 5_468_120.0, 35_278.4),
        ])
    }

    #[test]
    fn test_select_by_year_matches_panel_size() {
        let panel = sample_panel();
        let pop_2007 = select_column(&panel, Column::Population, Some(2007)).unwrap();
        assert_eq!(pop_2007.len(), 4);
        assert_eq!(pop_2007.len(), panel.entities_in_year(2007));

        let gdp_2002 = select_column(&panel, Column::GdpPerCapita, Some(2002)).unwrap();
        assert_eq!(gdp_2002, vec![4_604.2, 8_131.2, 1_156.2]);
    }

    #[test]
    fn test_select_without_filter_keeps_order() {
        let panel = sample_panel();
        let all = select_column(&panel, Column::Population, None).unwrap();
        assert_eq!(all.len(), panel.len());
        assert_eq!(all[0], 3_508_512.0);
        assert_eq!(all[6], 5_468_120.0);
    }

    #[test]
    fn test_unknown_year_is_empty() {
        let result = select_column(&sample_panel(), Column::Population, Some(1900));
        assert!(matches!(result, Err(BenfordError::EmptyDataset(_))));
    }

    #[test]
    fn test_non_positive_value_rejected() {
        let panel = Panel::new(vec![record("Nowhere", 2000, 0.0, 10.0)]);
        let err = select_column(&panel, Column::Population, None).unwrap_err();
        assert!(matches!(err, BenfordError::InvalidInput(_)));
        assert!(err.to_string().contains("Nowhere"));
        // The other column is fine
        assert!(select_column(&panel, Column::GdpPerCapita, None).is_ok());
    }

    #[test]
    fn test_years_sorted_distinct() {
        assert_eq!(sample_panel().years(), vec![2002, 2007]);
    }

    #[test]
    fn test_column_from_str() {
        assert_eq!("population".parse::<Column>().unwrap(), Column::Population);
        assert_eq!("pop".parse::<Column>().unwrap(), Column::Population);
        assert_eq!("gdpPercap".parse::<Column>().unwrap(), Column::GdpPerCapita);
        assert_eq!(" GDP ".parse::<Column>().unwrap(), Column::GdpPerCapita);
        assert!(matches!("lifeExp".parse::<Column>(), Err(BenfordError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_json_with_aliases() {
        let json = r#"[
            {"country": "Chad", "year": 2007, "pop": 10238807, "gdpPercap": 1704.06},
            {"entity": "Peru", "year": 2007, "population": 28674757, "gdp_per_capita": 7408.9}
        ]"#;
        let panel = Panel::from_json_str(json).unwrap();
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.records()[0].entity, "Chad");
        assert_eq!(panel.records()[1].population, 28_674_757.0);
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(Panel::from_json_str("[{\"year\": 1}"), Err(BenfordError::Parse(_))));
        assert!(matches!(Panel::from_json_str("[{\"year\": 1}]"), Err(BenfordError::Parse(_))));
    }
}
