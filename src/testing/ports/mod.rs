mod manual_clock;
mod memory_state_store;
mod mock_clipboard;
mod recording_notifier;
mod stub_generator;

pub use self::manual_clock::ManualClock;
pub use self::memory_state_store::MemoryStateStore;
pub use self::mock_clipboard::MockClipboard;
pub use self::recording_notifier::RecordingNotifier;
pub use self::stub_generator::StubGenerator;
