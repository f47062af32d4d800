//! Raw key sources
//!
//! The shell loop pulls raw bytes from a [`KeySource`]. Hosts plug in a
//! hardware or stdin reader; the self-test command and the headless runner
//! feed fixed byte sequences through [`ScriptSource`] and [`Replay`].

/// Blocking source of raw key bytes
pub trait KeySource {
    /// Wait for the next key byte. `None` means the source is closed.
    fn read_key(&mut self) -> Option<u8>;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn read_key(&mut self) -> Option<u8> {
        (**self).read_key()
    }
}

/// Key source serving a fixed byte sequence
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
    bytes: Vec<u8>,
    next: usize,
}

impl ScriptSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            next: 0,
        }
    }

    /// An empty, already exhausted source
    pub fn empty() -> Self {
        Self::default()
    }

    /// All bytes have been served
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.bytes.len()
    }

    /// Number of bytes not yet served
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.next.min(self.bytes.len())
    }
}

impl KeySource for ScriptSource {
    fn read_key(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.next).copied()?;
        self.next += 1;
        Some(byte)
    }
}

/// Live key source with an injectable script served first
///
/// Once the pushed script is exhausted, reads fall through to the live source
/// without the caller noticing.
#[derive(Debug)]
pub struct Replay<K> {
    live: K,
    script: ScriptSource,
}

impl<K: KeySource> Replay<K> {
    pub fn new(live: K) -> Self {
        Self {
            live,
            script: ScriptSource::empty(),
        }
    }

    /// Queue a script; it replaces whatever was left of the previous one
    pub fn push(&mut self, bytes: impl Into<Vec<u8>>) {
        self.script = ScriptSource::new(bytes);
        tracing::debug!(len = self.script.remaining(), "Replaying scripted keys");
    }

    /// A pushed script still has bytes to serve
    pub fn is_replaying(&self) -> bool {
        !self.script.is_exhausted()
    }

    /// Get a reference to the live source
    pub fn live(&self) -> &K {
        &self.live
    }
}

impl<K: KeySource> KeySource for Replay<K> {
    fn read_key(&mut self) -> Option<u8> {
        match self.script.read_key() {
            Some(byte) => Some(byte),
            None => self.live.read_key(),
        }
    }
}
