//! The immutable in-memory sales dataset.

use std::collections::BTreeSet;

use crate::data::DataError;
use crate::domain::SalesRecord;

/// All loaded rows plus derived read-only views.
///
/// There are no setters: a refresh builds a new `Dataset` and swaps the
/// shared handle.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    recession: Vec<usize>,
    years: Vec<i32>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let recession = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.recession)
            .map(|(i, _)| i)
            .collect();

        let years = records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            records,
            recession,
            years,
        })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows where the recession flag is set, in load order.
    pub fn recession_records(&self) -> impl Iterator<Item = &SalesRecord> + '_ {
        self.recession.iter().map(|&i| &self.records[i])
    }

    pub fn recession_len(&self) -> usize {
        self.recession.len()
    }

    /// Rows for a single year, in load order.
    pub fn year_records(&self, year: i32) -> impl Iterator<Item = &SalesRecord> + '_ {
        self.records.iter().filter(move |r| r.year == year)
    }

    /// Sorted unique years.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// `preferred` if present, otherwise the earliest year.
    pub fn resolve_year(&self, preferred: i32) -> i32 {
        if self.contains_year(preferred) {
            preferred
        } else {
            self.years[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Month;

    fn row(year: i32, month: Month, recession: bool) -> SalesRecord {
        SalesRecord {
            year,
            month,
            vehicle_type: "Sports".to_string(),
            automobile_sales: 1.0,
            advertising_expenditure: 1.0,
            unemployment_rate: 5.0,
            recession,
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(Dataset::new(Vec::new()), Err(DataError::Empty)));
    }

    #[test]
    fn derives_sorted_years_and_recession_view() {
        let ds = Dataset::new(vec![
            row(2008, Month::Jan, true),
            row(1980, Month::Feb, false),
            row(2008, Month::Mar, false),
            row(1981, Month::Apr, true),
        ])
        .unwrap();

        assert_eq!(ds.years(), &[1980, 1981, 2008]);
        assert_eq!(ds.recession_len(), 2);
        assert!(ds.recession_records().all(|r| r.recession));
        assert_eq!(ds.year_records(2008).count(), 2);
        assert_eq!(ds.resolve_year(2005), 1980);
        assert_eq!(ds.resolve_year(2008), 2008);
    }
}
