use crate::core::template::MessageTemplate;
use crate::domain::model::{
    BroadcastReport, Contact, DelayRange, SendEvent, SendMode, SendOutcome,
};
use crate::domain::ports::{MessagingClient, Pacer};
use crate::utils::error::Result;

/// Drives the send loop over an already-ingested contact list.
///
/// Contacts are processed strictly one at a time: existence check, send,
/// then the pacing wait, before the next contact is touched. The
/// single-flight ordering imitates a human operator sending by hand and must
/// not be parallelized, even though the per-contact work is independent.
pub struct Broadcaster<C: MessagingClient, P: Pacer> {
    client: C,
    pacer: P,
}

impl<C: MessagingClient, P: Pacer> Broadcaster<C, P> {
    pub fn new(client: C, pacer: P) -> Self {
        Self { client, pacer }
    }

    /// Processes the contact list (or its first element in test mode) and
    /// returns the final tally. Per-contact failures never abort the loop;
    /// every contact gets exactly one attempt.
    pub async fn run(
        &mut self,
        contacts: &[Contact],
        template: &MessageTemplate,
        mode: SendMode,
        delay: &DelayRange,
    ) -> Result<BroadcastReport> {
        let subset = match mode {
            SendMode::Test => &contacts[..contacts.len().min(1)],
            SendMode::Full => contacts,
        };
        let total = subset.len();

        let mut report = BroadcastReport::default();

        for (i, contact) in subset.iter().enumerate() {
            let canonical = canonical_number(&contact.number);
            tracing::info!("   Attempting to send to: {}", canonical);

            let outcome = self.attempt(contact, &canonical, template).await;

            match &outcome {
                SendOutcome::Sent { message_id } => {
                    report.success_count += 1;
                    tracing::info!(
                        "✅ [{}/{}] Sent to {} ({})",
                        i + 1,
                        total,
                        contact.name,
                        contact.number
                    );
                    tracing::debug!("   Message ID: {}", message_id);
                }
                SendOutcome::NotRegistered => {
                    report.fail_count += 1;
                    tracing::warn!(
                        "⚠️  [{}/{}] {} ({}) is not registered",
                        i + 1,
                        total,
                        contact.name,
                        contact.number
                    );
                }
                SendOutcome::SentWithoutConfirmation => {
                    report.fail_count += 1;
                    tracing::warn!(
                        "⚠️  [{}/{}] Sent but no confirmation for {} ({})",
                        i + 1,
                        total,
                        contact.name,
                        contact.number
                    );
                }
                SendOutcome::Failed { reason } => {
                    report.fail_count += 1;
                    tracing::error!(
                        "❌ [{}/{}] Failed for {} ({})",
                        i + 1,
                        total,
                        contact.name,
                        contact.number
                    );
                    tracing::error!("   Error: {}", reason);
                }
            }

            report.events.push(SendEvent {
                index: i,
                total,
                contact: contact.clone(),
                outcome,
            });

            // No wait after the last contact.
            if i + 1 < total {
                let wait = self.pacer.draw(delay);
                tracing::info!("   ⏳ Waiting {}s before next message...", wait.as_secs());
                self.pacer.pause(wait).await;
            }
        }

        Ok(report)
    }

    async fn attempt(
        &self,
        contact: &Contact,
        canonical: &str,
        template: &MessageTemplate,
    ) -> SendOutcome {
        let endpoint = match self.client.resolve_endpoint(canonical).await {
            Ok(Some(endpoint)) => endpoint,
            Ok(None) => return SendOutcome::NotRegistered,
            Err(e) => {
                return SendOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        // Personalization happens only once the endpoint is known to exist.
        let body = template.render(&contact.name);

        match self.client.send_message(&endpoint, &body).await {
            Ok(receipt) => match receipt.message_id {
                Some(message_id) => SendOutcome::Sent { message_id },
                None => SendOutcome::SentWithoutConfirmation,
            },
            Err(e) => SendOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Strips everything but ASCII digits from a raw number. No further
/// validation happens here.
pub fn canonical_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
