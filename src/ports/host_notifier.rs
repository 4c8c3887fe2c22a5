use crate::domain::HostEvent;

/// Port receiving informational mode/step/reset notifications.
pub trait HostNotifier {
    fn notify(&mut self, event: &HostEvent);
}
