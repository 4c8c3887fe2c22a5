use tracing::info;

use crate::domain::HostEvent;
use crate::ports::HostNotifier;

/// Reports host notifications through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl HostNotifier for LogNotifier {
    fn notify(&mut self, event: &HostEvent) {
        match serde_json::to_string(event) {
            Ok(json) => info!(event = %json, "Host notification"),
            Err(err) => info!(?event, error = %err, "Host notification"),
        }
    }
}
