pub mod ports;

#[allow(unused_imports)]
pub use ports::ManualClock;
#[allow(unused_imports)]
pub use ports::MemoryStateStore;
#[allow(unused_imports)]
pub use ports::MockClipboard;
#[allow(unused_imports)]
pub use ports::RecordingNotifier;
#[allow(unused_imports)]
pub use ports::StubGenerator;
