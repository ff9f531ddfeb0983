//! Group cleaned records by calendar year.

use std::collections::BTreeMap;

use crate::domain::{AnnualMean, CleanedRecord};

/// Mean temperature per year, ascending by year.
///
/// Each year appears once; its mean covers exactly the records of that year.
pub fn annual_means(records: &[CleanedRecord]) -> Vec<AnnualMean> {
    let mut groups: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.year).or_insert((0.0, 0));
        entry.0 += r.temperature;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(year, (sum, count))| AnnualMean {
            year,
            mean: sum / count as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn rec(y: i32, m: u32, d: u32, temperature: f64) -> CleanedRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        CleanedRecord {
            date,
            temperature,
            year: date.year(),
        }
    }

    #[test]
    fn groups_by_year_in_ascending_order() {
        let records = vec![
            rec(2020, 1, 1, 15.0),
            rec(1910, 1, 1, 10.0),
            rec(2020, 6, 1, 25.0),
            rec(1910, 6, 1, 20.0),
            rec(1965, 3, 3, -1.5),
        ];

        let annual = annual_means(&records);
        let years: Vec<i32> = annual.iter().map(|a| a.year).collect();
        assert_eq!(years, vec![1910, 1965, 2020]);

        assert_eq!(annual[0], AnnualMean { year: 1910, mean: 15.0, count: 2 });
        assert_eq!(annual[1], AnnualMean { year: 1965, mean: -1.5, count: 1 });
        assert_eq!(annual[2], AnnualMean { year: 2020, mean: 20.0, count: 2 });
    }

    #[test]
    fn duplicate_dates_each_count() {
        let records = vec![rec(2000, 1, 1, 1.0), rec(2000, 1, 1, 2.0), rec(2000, 1, 1, 6.0)];
        let annual = annual_means(&records);
        assert_eq!(annual.len(), 1);
        assert_eq!(annual[0].count, 3);
        assert!((annual[0].mean - 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_has_no_years() {
        assert!(annual_means(&[]).is_empty());
    }
}
