use crate::domain::HostEvent;
use crate::ports::HostNotifier;

#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    pub events: Vec<HostEvent>,
}

impl HostNotifier for RecordingNotifier {
    fn notify(&mut self, event: &HostEvent) {
        self.events.push(event.clone());
    }
}
