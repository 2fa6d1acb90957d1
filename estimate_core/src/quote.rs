//! # Quote Data Structures
//!
//! A `Quote` bundles everything that goes onto one customer document: who it
//! is for, what was asked, what it costs, and whether a permit notice
//! applies. It is what the PDF renderer and the record log consume.
//!
//! ## Structure
//!
//! ```text
//! Quote
//! ├── client: ClientInfo (name, email, phone, address)
//! ├── request: EstimateRequest (project type, dimensions, material)
//! ├── result: EstimateResult (sqft, costs, duration)
//! ├── prepared_on: date
//! └── permit_notice: Option<String>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::{EstimateRequest, PricingPolicy, ProjectType};
//! use estimate_core::permits::PermitAdvisory;
//! use estimate_core::quote::{ClientInfo, Quote};
//!
//! let client = ClientInfo::new("Jane Doe", "jane@example.com", "410-555-0100", "10 Light St, Baltimore MD 21202");
//! let request = EstimateRequest::area(ProjectType::Patio, 12.0, 14.0, "Pavers");
//!
//! let quote = Quote::prepare(client, request, PricingPolicy::Markup, &PermitAdvisory::default()).unwrap();
//! assert!(quote.permit_notice.is_some());
//! let json = serde_json::to_string_pretty(&quote).unwrap();
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculations::{estimate, EstimateRequest, EstimateResult, PricingPolicy};
use crate::errors::{CoreResult, EstimateError};
use crate::materials::find_material;
use crate::permits::PermitAdvisory;

/// Customer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: String,
}

impl ClientInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        ClientInfo {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Presence checks: name, email and address are required and the email
    /// has to at least contain an `@`.
    pub fn validate(&self) -> CoreResult<()> {
        for (field, value) in [("name", &self.name), ("email", &self.email), ("address", &self.address)] {
            if value.trim().is_empty() {
                return Err(EstimateError::missing_field(field));
            }
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(EstimateError::invalid_input("email", email, "Email must look like name@domain")),
        }
    }
}

/// A priced estimate for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub client: ClientInfo,
    pub request: EstimateRequest,
    pub result: EstimateResult,
    pub prepared_on: NaiveDate,
    /// Set when the client's address is in a permit jurisdiction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permit_notice: Option<String>,
}

impl Quote {
    /// Validate the client, price the request and check the permit list.
    pub fn prepare(
        client: ClientInfo,
        request: EstimateRequest,
        policy: PricingPolicy,
        permits: &PermitAdvisory,
    ) -> CoreResult<Self> {
        client.validate()?;
        let result = estimate(&request, policy)?;
        let permit_notice = permits.notice(&client.address);

        Ok(Quote {
            client,
            request,
            result,
            prepared_on: Local::now().date_naive(),
            permit_notice,
        })
    }

    /// Material as printed: the table spelling when known, else as entered.
    pub fn material_label(&self) -> String {
        find_material(self.request.project_type, &self.request.material)
            .map(|m| m.name.to_string())
            .unwrap_or_else(|| self.request.material.trim().to_string())
    }

    /// Document heading, e.g. "Deck Estimate"
    pub fn title(&self) -> String {
        format!("{} Estimate", self.request.project_type)
    }
}
