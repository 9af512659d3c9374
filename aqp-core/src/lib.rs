pub mod alert;
pub mod attribution;
pub mod catalog;
pub mod error;
pub mod forecast;
pub mod pollutant;
pub mod risk;
pub mod station;
pub mod timeseries;
