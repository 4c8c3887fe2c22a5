use crate::adapters::{LogNotifier, SystemClock};
use crate::ports::{ClipboardWriter, Clock, HostNotifier, PromptGenerator, StateStore};

/// Application context holding the collaborators a form session talks to.
pub struct AppContext<S, G, C, N = LogNotifier, K = SystemClock>
where
    S: StateStore,
    G: PromptGenerator,
    C: ClipboardWriter,
    N: HostNotifier,
    K: Clock,
{
    store: S,
    generator: G,
    clipboard: C,
    notifier: N,
    clock: K,
}

impl<S, G, C> AppContext<S, G, C>
where
    S: StateStore,
    G: PromptGenerator,
    C: ClipboardWriter,
{
    /// Create a context that reports notifications to the log and reads the system clock.
    pub fn new(store: S, generator: G, clipboard: C) -> Self {
        Self { store, generator, clipboard, notifier: LogNotifier, clock: SystemClock }
    }
}

impl<S, G, C, N, K> AppContext<S, G, C, N, K>
where
    S: StateStore,
    G: PromptGenerator,
    C: ClipboardWriter,
    N: HostNotifier,
    K: Clock,
{
    /// Create a context with a custom notifier and clock.
    pub fn with_host(store: S, generator: G, clipboard: C, notifier: N, clock: K) -> Self {
        Self { store, generator, clipboard, notifier, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }
}
