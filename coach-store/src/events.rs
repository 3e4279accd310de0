use coach_shared::models::events::NotificationEvent;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// In-process stand-in for a message broker. Subscribers that fall behind
/// lose the oldest events.
#[derive(Clone)]
pub struct EventProducer {
    tx: broadcast::Sender<NotificationEvent>,
}

impl EventProducer {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers received the event. Having none is not an error.
    pub fn publish(&self, event: NotificationEvent) -> usize {
        let topic = event.topic();
        match serde_json::to_string(&event) {
            Ok(payload) => info!("Publishing to {}: {} bytes", topic, payload.len()),
            Err(e) => warn!("Event for {} is not serializable: {}", topic, e),
        }

        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                warn!("No subscribers for {}", topic);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_shared::models::events::ContactSubmittedEvent;
    use coach_shared::pii::Masked;

    fn contact_event() -> NotificationEvent {
        NotificationEvent::ContactSubmitted(ContactSubmittedEvent {
            inquiry_id: Default::default(),
            name: "Jane".to_string(),
            email: Masked("jane@example.com".to_string()),
            phone: Masked("555".to_string()),
            preferred_contact: "email".to_string(),
            message_length: 12,
            timestamp: 0,
        })
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let producer = EventProducer::new(8);
        let mut rx = producer.subscribe();

        assert_eq!(producer.publish(contact_event()), 1);
        let received = rx.recv().await.unwrap();
        assert_eq!(received.topic(), "contact.submitted");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let producer = EventProducer::new(8);
        assert_eq!(producer.publish(contact_event()), 0);
    }
}
