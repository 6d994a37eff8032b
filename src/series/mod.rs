//! Time series, their collections, and the dataset views over them.

pub mod collection;
pub mod dataset;
pub mod item;
pub mod period_values;
pub mod timeseries;

pub use collection::{DataPoint, TimeSeriesCollection};
pub use dataset::{DomainInfo, IntervalXyDataset, XyDataset};
pub use item::TimeSeriesDataItem;
pub use period_values::{SimpleTimePeriod, TimePeriodValue, TimePeriodValues, TimePeriodValuesCollection};
pub use timeseries::TimeSeries;
