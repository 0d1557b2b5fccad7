// Crossmatch - Blood Donation Matching Core
// Copyright (c) 2026 Crossmatch Contributors
// Licensed under the MIT License

//! # Crossmatch - Blood Donation Matching Core
//!
//! Crossmatch is the donor-matching and notification dispatch core of a
//! blood-donation coordination platform: given a blood request, it works
//! out which registered donors are compatible, fans the request out to
//! them as individual notifications, records their replies, and shares an
//! accepting donor's contact details back with the requester.
//!
//! ## Overview
//!
//! The crate provides:
//! - **Compatibility matching** - the static donor/recipient blood-group
//!   table with urgency-weighted scoring and donor ranking
//! - **Notification dispatch** - one `blood_request` prompt per
//!   compatible, eligible donor, with requester exclusion and dedupe on
//!   retried dispatch
//! - **Response handling** - replace-on-donor upsert of replies,
//!   first-class accept flow (contact sharing, prompt resolution, donor
//!   reminder)
//! - **Lifecycle management** - the request status state machine and
//!   stale-request housekeeping
//!
//! ## Architecture
//!
//! Crossmatch follows a layered architecture:
//!
//! - [`cli`] - Command-line harness (init, validate-config, simulate)
//! - [`core`] - Business logic (dispatch, response handling, housekeeping,
//!   the service facade)
//! - [`adapters`] - Collaborator seams (donor directory, request and
//!   notification stores, auth identity) plus in-memory implementations
//! - [`domain`] - Core domain types, the compatibility table and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crossmatch::adapters::{
//!     InMemoryDonorDirectory, InMemoryNotificationStore, InMemoryRequestStore, StaticIdentity,
//! };
//! use crossmatch::core::BloodRequestService;
//! use crossmatch::domain::{BloodGroup, NewBloodRequest, UrgencyLevel};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = BloodRequestService::new(
//!         Arc::new(StaticIdentity::anonymous()),
//!         Arc::new(InMemoryDonorDirectory::new()),
//!         Arc::new(InMemoryRequestStore::new()),
//!         Arc::new(InMemoryNotificationStore::new()),
//!     );
//!
//!     let outcome = service
//!         .submit_blood_request(
//!             NewBloodRequest::builder()
//!                 .patient_name("Kofi Mensah")
//!                 .blood_group(BloodGroup::APositive)
//!                 .units_required(2)
//!                 .urgency_level(UrgencyLevel::Urgent)
//!                 .hospital_name("Ridge Hospital")
//!                 .build()?,
//!         )
//!         .await?;
//!
//!     println!(
//!         "{} donor(s) notified of request {}",
//!         outcome.notifications_sent, outcome.request_id
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Compatibility
//!
//! The matching table follows standard transfusion rules - O- donates to
//! every group and receives only O-; AB+ receives from every group:
//!
//! ```rust
//! use crossmatch::domain::{compatibility, BloodGroup, UrgencyLevel};
//!
//! assert!(compatibility::is_compatible(
//!     BloodGroup::ONegative,
//!     BloodGroup::AbPositive
//! ));
//! assert_eq!(
//!     compatibility::compatible_donor_groups(BloodGroup::ONegative),
//!     &[BloodGroup::ONegative]
//! );
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with the
//! [`domain::CrossmatchError`] taxonomy; collaborator failures arrive as
//! [`domain::StoreError`] / [`domain::DirectoryError`] and never expose
//! third-party types.
//!
//! ## Logging
//!
//! Crossmatch uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(request_id = "abc", "Dispatch complete");
//! warn!(donor_id = "donor-1", "Prompt reconciliation failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
