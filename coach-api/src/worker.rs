use coach_shared::models::events::NotificationEvent;
use coach_store::EventProducer;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Consumes notification events and hands them to delivery. Delivery is
/// simulated: calendar invites and acknowledgements are only logged.
pub fn start_notification_worker(events: &EventProducer) -> JoinHandle<()> {
    let mut rx = events.subscribe();

    tokio::spawn(async move {
        info!("Notification worker started, listening to booking and contact events...");

        loop {
            match rx.recv().await {
                Ok(event) => handle_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Notification worker lagged, {} events dropped", skipped);
                }
                Err(RecvError::Closed) => {
                    info!("Event channel closed, notification worker stopping");
                    break;
                }
            }
        }
    })
}

fn handle_event(event: &NotificationEvent) {
    match event {
        NotificationEvent::BookingConfirmed(booking) => {
            info!(
                "Sending {} calendar invites to {} for booking {} ({})",
                booking.session_dates.len(),
                booking.email.hint(),
                booking.booking_id,
                booking.session_dates.join("; "),
            );
        }
        NotificationEvent::ContactSubmitted(inquiry) => {
            info!(
                "Acknowledging inquiry {} via {} to {}",
                inquiry.inquiry_id,
                inquiry.preferred_contact,
                inquiry.email.hint(),
            );
        }
    }
}
