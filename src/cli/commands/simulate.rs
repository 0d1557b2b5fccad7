//! Simulate command implementation
//!
//! Runs a blood request through the full matching pipeline against an
//! in-memory backend seeded from a JSON donor file: submit, dispatch, and
//! optionally replay donor responses. Useful for checking compatibility
//! fan-out and notification behavior without the platform around the
//! core.

use crate::adapters::auth::StaticIdentity;
use crate::adapters::directory::InMemoryDonorDirectory;
use crate::adapters::store::{
    InMemoryNotificationStore, InMemoryRequestStore, NotificationStore, RequestStore,
};
use crate::config::{load_config, CrossmatchConfig};
use crate::core::response::ResponseHandler;
use crate::core::service::BloodRequestService;
use crate::domain::ids::UserId;
use crate::domain::request::{NewBloodRequest, ResponseChoice};
use crate::domain::{BloodGroup, UrgencyLevel};
use clap::Args;
use futures::future::join_all;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Arguments for the simulate command
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Blood group needed, e.g. A+ or O-
    #[arg(long)]
    pub blood_group: String,

    /// Units required
    #[arg(long, default_value_t = 1)]
    pub units: u32,

    /// Urgency level (critical, urgent, normal)
    #[arg(long, default_value = "normal")]
    pub urgency: String,

    /// Patient name
    #[arg(long, default_value = "Demo Patient")]
    pub patient: String,

    /// Hospital name
    #[arg(long, default_value = "Demo Hospital")]
    pub hospital: String,

    /// JSON donor seed file; falls back to directory.seed_path from the config
    #[arg(long)]
    pub donors: Option<String>,

    /// Submit as this authenticated user id (tests requester exclusion)
    #[arg(long)]
    pub requester: Option<String>,

    /// Replay donor responses after dispatch, e.g. --respond donor-1=accepted
    /// or --respond "donor-2=declined:out of town"
    #[arg(long = "respond")]
    pub responses: Vec<String>,
}

impl SimulateArgs {
    /// Execute the simulate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = if Path::new(config_path).exists() {
            load_config(config_path)?
        } else {
            tracing::info!(config_path, "No configuration file; using defaults");
            CrossmatchConfig::default()
        };

        let seed_path = match self.donors.clone().or(config.directory.seed_path.clone()) {
            Some(path) => path,
            None => {
                println!("❌ No donor seed file: pass --donors or set directory.seed_path");
                return Ok(2);
            }
        };

        let blood_group = BloodGroup::from_str(&self.blood_group)?;
        let urgency = UrgencyLevel::from_str(&self.urgency)?;

        let directory = Arc::new(InMemoryDonorDirectory::from_seed_file(&seed_path)?);
        let requests = Arc::new(InMemoryRequestStore::new());
        let notifications = Arc::new(InMemoryNotificationStore::new());

        let identity = match &self.requester {
            Some(id) => StaticIdentity::user(
                UserId::new(id.clone()).map_err(anyhow::Error::msg)?,
            ),
            None => StaticIdentity::anonymous(),
        };

        let service = BloodRequestService::with_options(
            Arc::new(identity),
            directory.clone(),
            requests.clone(),
            notifications.clone(),
            config.service_options(),
        );

        println!("🩸 Simulating blood request");
        println!("  Blood group: {blood_group}");
        println!("  Urgency: {urgency}");
        println!("  Donors in directory: {}", directory.len().await);
        println!();

        let mut builder = NewBloodRequest::builder()
            .patient_name(self.patient.as_str())
            .blood_group(blood_group)
            .units_required(self.units)
            .urgency_level(urgency)
            .hospital_name(self.hospital.as_str());
        if let Some(id) = &self.requester {
            builder = builder.requester_id(UserId::new(id.clone()).map_err(anyhow::Error::msg)?);
        }
        let outcome = service.submit_blood_request(builder.build()?).await?;

        println!("✅ {}", outcome.message);
        println!("  Request id: {}", outcome.request_id);
        println!("  Compatible donors: {}", outcome.compatible_donors_found);
        println!("  Notifications sent: {}", outcome.notifications_sent);

        if !self.responses.is_empty() {
            println!();
            println!("Replaying {} donor response(s)...", self.responses.len());

            // Each donor responds through their own authenticated call;
            // driving them concurrently exercises the per-donor upsert.
            let handler = Arc::new(ResponseHandler::new(
                requests.clone(),
                notifications.clone(),
                directory.clone(),
            ));
            let replies = self
                .responses
                .iter()
                .map(|spec| parse_response_spec(spec))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let calls = replies.into_iter().map(|(donor_id, choice, message)| {
                let handler = handler.clone();
                let request_id = outcome.request_id.clone();
                async move {
                    let result = handler
                        .respond(Some(&donor_id), &request_id, &donor_id, choice, &message)
                        .await;
                    (donor_id, result)
                }
            });

            for (donor_id, result) in join_all(calls).await {
                match result {
                    Ok(r) => println!("  {donor_id}: {}", r.message),
                    Err(e) => println!("  {donor_id}: ❌ {e}"),
                }
            }
        }

        let request = requests.get(&outcome.request_id).await?;
        let remaining = notifications.list_for_request(&outcome.request_id).await?;
        println!();
        println!("Final state:");
        println!("  Status: {} (fulfilled: {})", request.status, request.fulfilled);
        println!("  Recorded responses: {}", request.donor_responses.len());
        for response in &request.donor_responses {
            println!(
                "    {} -> {} (contact shared: {})",
                response.donor_id, response.response, response.contact_shared
            );
        }
        println!("  Live notifications for request: {}", remaining.len());
        for notification in &remaining {
            println!("    [{}] {}", notification.kind, notification.message);
        }

        Ok(0)
    }
}

/// Parses `donor-id=choice` or `donor-id=choice:message`
fn parse_response_spec(spec: &str) -> anyhow::Result<(UserId, ResponseChoice, String)> {
    let (donor, rest) = spec
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid --respond '{spec}': expected donor=choice"))?;
    let (choice, message) = match rest.split_once(':') {
        Some((choice, message)) => (choice, message.to_string()),
        None => (rest, String::new()),
    };
    let donor_id = UserId::new(donor).map_err(anyhow::Error::msg)?;
    let choice = ResponseChoice::from_str(choice)?;
    Ok((donor_id, choice, message))
}
