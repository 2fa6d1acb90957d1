//! # estimate_core - Remodel Estimate Engine
//!
//! `estimate_core` prices deck, patio and fence projects and produces the
//! paperwork around them: a PDF quote for the customer and a CSV log of every
//! saved estimate. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: The calculator is a pure function of an explicit request
//! - **Deterministic**: Money is always rounded to cents, duration to a tenth of a day
//! - **Rich Errors**: Structured error types, not just strings
//! - **Graceful**: A missing logo never stops a quote from rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::calculations::{estimate, EstimateRequest, PricingPolicy, ProjectType};
//!
//! let request = EstimateRequest::area(ProjectType::Deck, 10.0, 10.0, "Pressure-treated wood")
//!     .with_markup(20.0);
//! let result = estimate(&request, PricingPolicy::Markup).unwrap();
//! assert_eq!(result.total_estimate.to_string(), "3390.00");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Project types, the estimate calculator and pricing policies
//! - [`materials`] - Material rate table
//! - [`units`] - Type-safe unit wrappers
//! - [`quote`] - Client details and the priced quote
//! - [`permits`] - ZIP-code permit advisory
//! - [`branding`] - Logo loading from disk or URL
//! - [`pdf`] - PDF rendering via Typst
//! - [`file_io`] - Record log and atomic document writes
//! - [`config`] - TOML configuration
//! - [`errors`] - Structured error types

pub mod branding;
pub mod calculations;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod pdf;
pub mod permits;
pub mod quote;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{estimate, EstimateRequest, EstimateResult, PricingPolicy, ProjectType};
pub use config::EstimatorConfig;
pub use errors::{CoreResult, EstimateError};
pub use file_io::{write_document, RecordStore};
pub use permits::{requires_permit, PermitAdvisory};
pub use quote::{ClientInfo, Quote};
