//! Monthly wage statements for Korean hourly workers.
//!
//! This crate computes a month's pay for a part-time hourly worker: base
//! salary, the weekly-rest allowance (주휴수당), income and rural tax
//! withholding, and net pay. It also counts business days against a
//! per-year holiday calendar and builds the formatted pay statement that
//! image and PDF renderers consume.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
