//! Historical inflation and the horizons derived from it.

use advisor_core::rounding::round_to;
use advisor_core::{AdvisorError, AdvisorResult, Date};
use serde::{Deserialize, Serialize};

/// Short horizon in years.
pub const SHORT_HORIZON_YEARS: i32 = 5;

/// Long horizon in years.
pub const LONG_HORIZON_YEARS: i32 = 10;

/// Decimal places kept on derived inflation figures.
const INFLATION_PLACES: u32 = 4;

/// One annual observation. `rate` is fractional (0.074 for 7.4%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationObservation {
    /// Calendar year.
    pub year: i32,
    /// Annual inflation rate.
    #[serde(alias = "inflation")]
    pub rate: f64,
}

impl InflationObservation {
    /// Creates an observation.
    #[must_use]
    pub fn new(year: i32, rate: f64) -> Self {
        Self { year, rate }
    }
}

/// Inflation rates used to discount cash flows in a screening run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationHorizons {
    /// Median over the trailing five years.
    pub five_year: f64,
    /// Median over the trailing ten years.
    pub ten_year: f64,
}

impl InflationHorizons {
    /// Creates horizons from explicit rates.
    #[must_use]
    pub fn new(five_year: f64, ten_year: f64) -> Self {
        Self { five_year, ten_year }
    }
}

/// Annual inflation observations, ordered by year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InflationSeries {
    observations: Vec<InflationObservation>,
}

impl InflationSeries {
    /// Creates a series, sorting observations by year.
    #[must_use]
    pub fn new(mut observations: Vec<InflationObservation>) -> Self {
        observations.sort_by_key(|o| o.year);
        Self { observations }
    }

    /// All observations.
    pub fn observations(&self) -> &[InflationObservation] {
        &self.observations
    }

    /// Returns true if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations inside the trailing window ending in `as_of`'s year.
    ///
    /// Keeps years strictly after `as_of.year() - years`. If the series
    /// starts after that bound it is too short and is used whole.
    pub fn window(&self, years: i32, as_of: Date) -> &[InflationObservation] {
        let bound = as_of.year() - years;
        match self.observations.first() {
            Some(first) if first.year <= bound => {
                let start = self.observations.partition_point(|o| o.year <= bound);
                &self.observations[start..]
            }
            _ => &self.observations,
        }
    }

    /// Arithmetic mean over the trailing window, rounded to 4 decimals.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` if the window is empty.
    pub fn mean_over(&self, years: i32, as_of: Date) -> AdvisorResult<f64> {
        let rates = self.rates(years, as_of)?;
        let mean = rates.iter().sum::<f64>() / rates.len() as f64;
        Ok(round_to(mean, INFLATION_PLACES))
    }

    /// Median over the trailing window, rounded to 4 decimals.
    ///
    /// An even count averages the two middle values.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` if the window is empty.
    pub fn median_over(&self, years: i32, as_of: Date) -> AdvisorResult<f64> {
        let mut rates = self.rates(years, as_of)?;
        rates.sort_by(f64::total_cmp);
        let mid = rates.len() / 2;
        let median = if rates.len() % 2 == 0 {
            (rates[mid - 1] + rates[mid]) / 2.0
        } else {
            rates[mid]
        };
        Ok(round_to(median, INFLATION_PLACES))
    }

    /// The five- and ten-year medians used by the screening pipeline.
    ///
    /// # Errors
    ///
    /// Returns `MissingData` for an empty series.
    pub fn horizons(&self, as_of: Date) -> AdvisorResult<InflationHorizons> {
        Ok(InflationHorizons {
            five_year: self.median_over(SHORT_HORIZON_YEARS, as_of)?,
            ten_year: self.median_over(LONG_HORIZON_YEARS, as_of)?,
        })
    }

    fn rates(&self, years: i32, as_of: Date) -> AdvisorResult<Vec<f64>> {
        let window = self.window(years, as_of);
        if window.is_empty() {
            return Err(AdvisorError::missing_data("inflation series is empty"));
        }
        Ok(window.iter().map(|o| o.rate).collect())
    }
}

impl FromIterator<InflationObservation> for InflationSeries {
    fn from_iter<I: IntoIterator<Item = InflationObservation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::ErrorKind;
    use approx::assert_relative_eq;

    fn as_of() -> Date {
        Date::from_ymd(2024, 6, 1).unwrap()
    }

    fn series() -> InflationSeries {
        [
            (2012, 0.066),
            (2013, 0.065),
            (2014, 0.114),
            (2015, 0.129),
            (2016, 0.054),
            (2017, 0.025),
            (2018, 0.043),
            (2019, 0.030),
            (2020, 0.049),
            (2021, 0.084),
            (2022, 0.119),
            (2023, 0.074),
        ]
        .into_iter()
        .map(|(y, r)| InflationObservation::new(y, r))
        .collect()
    }

    #[test]
    fn test_window_keeps_trailing_years() {
        let s = series();
        let years: Vec<i32> = s.window(5, as_of()).iter().map(|o| o.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022, 2023]);
    }

    #[test]
    fn test_short_series_used_whole() {
        let s: InflationSeries = [(2021, 0.08), (2022, 0.12), (2023, 0.07)]
            .into_iter()
            .map(|(y, r)| InflationObservation::new(y, r))
            .collect();
        assert_eq!(s.window(5, as_of()).len(), 3);
    }

    #[test]
    fn test_median_and_mean() {
        let s = series();
        // 2020..=2023: 0.049, 0.084, 0.119, 0.074
        assert_relative_eq!(s.median_over(5, as_of()).unwrap(), 0.079, epsilon = 1e-12);
        assert_relative_eq!(s.mean_over(5, as_of()).unwrap(), 0.0815, epsilon = 1e-12);
    }

    #[test]
    fn test_horizons() {
        let h = series().horizons(as_of()).unwrap();
        assert_relative_eq!(h.five_year, 0.079, epsilon = 1e-12);
        // 2015..=2023 sorted: .025 .030 .043 .049 .054 .074 .084 .119 .129
        assert_relative_eq!(h.ten_year, 0.054, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_series() {
        let err = InflationSeries::default().horizons(as_of()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
    }

    #[test]
    fn test_unsorted_input() {
        let s = InflationSeries::new(vec![
            InflationObservation::new(2023, 0.07),
            InflationObservation::new(2019, 0.03),
        ]);
        assert_eq!(s.observations()[0].year, 2019);
    }
}
