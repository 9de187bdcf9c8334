//! Benchmarking engine for supplemental health-insurance policies.
//!
//! The library turns the structured output of an upstream document-extraction
//! step into a typed [`workflows::benchmark::PolicyInput`], rates each coverage
//! category Green/Orange/Red, and rolls the category colors up into a
//! Gold/Silver/Bronze tier. Extraction itself, notification delivery, and
//! persistence are the caller's concern.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
