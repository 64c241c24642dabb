use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for placement IDs: fast comparisons on every
/// pointer-move lookup.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Sequence shared by every generated ID in this process.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Interned identifier of a placed plant (`gardenId` on the wire).
/// 4 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementId(Spur);

impl PlacementId {
    /// Intern a string as a PlacementId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        PlacementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh ID of the form `garden-<epoch-ms>-<seq>`.
    ///
    /// The timestamp keeps IDs from previous sessions (loaded from storage)
    /// apart from the ones minted now; the sequence separates IDs minted
    /// within the same millisecond.
    pub fn generate(now_ms: u64) -> Self {
        let n = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("garden-{now_ms}-{n}"))
    }
}

impl fmt::Debug for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlacementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlacementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PlacementId::intern(&s))
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────

/// Source of wall-clock milliseconds for ID generation and file names.
///
/// Hosts supply their own: the browser bridge reads `Date.now()`, native
/// code reads the system clock, tests pin a fixed value.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Native system clock. Not usable on `wasm32-unknown-unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}
