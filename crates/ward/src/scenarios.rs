//! The classic bug demonstrations, rerun against the checked APIs.
//!
//! Each function replays one well-known defect (an unchecked string copy,
//! a heap overflow, a use-after-free, a double free, a wrapping size
//! computation, removal while iterating, an unsynchronized counter) and
//! reports what the safe API did instead. A scenario whose contract
//! violation was caught carries it in [`ScenarioOutcome::violation`].

use std::fmt;
use std::str::FromStr;

use tracing::debug;
use ward_arena::{checked_size_i32, Heap, HeapConfig};
use ward_buffer::{FixedBuffer, OverflowPolicy};
use ward_sync::{run_balanced, CounterConfig};

use crate::error::WardError;

/// Destination capacity used by the copy scenarios.
pub const DEMO_CAPACITY: usize = 10;

/// Source copied by [`overflowing_copy`].
pub const LONG_SOURCE: &[u8] = b"This is a very long string";

/// Source copied by [`heap_overflow_copy`].
pub const HEAP_OVERFLOW_SOURCE: &[u8] = b"AAAAAAAAAAAAA";

/// Element size multiplied by [`scaled_allocation`]'s count.
pub const SCALE_FACTOR: i32 = 1_000_000;

/// Count used by [`run_all`] for [`scaled_allocation`]; the `i32` product
/// with [`SCALE_FACTOR`] overflows.
pub const DEFAULT_SCALE_COUNT: i32 = 3_000;

/// Block limit of the heaps the scenarios allocate from.
pub const SCENARIO_BLOCK_LIMIT: usize = 64 << 20;

/// What one scenario did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// Scenario name, as parsed by [`Scenario`].
    pub name: &'static str,
    /// Human-readable account of the resulting state.
    pub detail: String,
    /// The contract violation that was detected, if any.
    pub violation: Option<WardError>,
}

impl ScenarioOutcome {
    fn clean(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            detail: detail.into(),
            violation: None,
        }
    }

    fn caught(name: &'static str, detail: impl Into<String>, err: impl Into<WardError>) -> Self {
        let violation = err.into();
        debug!(scenario = name, %violation, "violation caught");
        Self {
            name,
            detail: detail.into(),
            violation: Some(violation),
        }
    }

    /// Whether a contract violation was detected.
    pub fn is_violation(&self) -> bool {
        self.violation.is_some()
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.violation {
            Some(e) => write!(f, "{}: {} (caught: {e})", self.name, self.detail),
            None => write!(f, "{}: {}", self.name, self.detail),
        }
    }
}

fn scenario_heap() -> Heap {
    // Both limits are non-zero, so validation cannot fail.
    Heap::new(HeapConfig::new().with_max_block_bytes(SCENARIO_BLOCK_LIMIT)).unwrap_or_default()
}

/// Copy a 26-byte string into a 10-byte buffer.
///
/// The copy is rejected; under the truncating policy the buffer keeps the
/// first nine bytes, terminated.
pub fn overflowing_copy() -> ScenarioOutcome {
    const NAME: &str = "overflowing_copy";
    let mut buf = FixedBuffer::new(DEMO_CAPACITY);
    match buf.copy_from(LONG_SOURCE, OverflowPolicy::Truncate) {
        Ok(n) => ScenarioOutcome::clean(NAME, format!("copied {n} bytes")),
        Err(e) => ScenarioOutcome::caught(
            NAME,
            format!("buffer holds {:?}", buf.to_string_lossy()),
            e,
        ),
    }
}

/// Copy 13 bytes into a 10-byte heap block, then release it.
pub fn heap_overflow_copy() -> ScenarioOutcome {
    const NAME: &str = "heap_overflow_copy";
    let mut heap = scenario_heap();
    let id = match heap.alloc_bytes(DEMO_CAPACITY) {
        Ok(id) => id,
        Err(e) => return ScenarioOutcome::caught(NAME, "allocation failed", e),
    };
    let copied = heap.copy_into(id, HEAP_OVERFLOW_SOURCE);
    let freed = heap.release(id);
    let detail = format!("block released, {} leaked", heap.live_count());
    match (copied, freed) {
        (Err(e), _) => ScenarioOutcome::caught(NAME, detail, e),
        (Ok(_), Err(e)) => ScenarioOutcome::caught(NAME, detail, e),
        (Ok(n), Ok(_)) => ScenarioOutcome::clean(NAME, format!("copied {n} bytes; {detail}")),
    }
}

/// Allocate 20 bytes, write `"abc"`, release, then read through the stale
/// handle.
pub fn use_after_free() -> ScenarioOutcome {
    const NAME: &str = "use_after_free";
    let mut heap = scenario_heap();
    let id = match heap.alloc_bytes(20) {
        Ok(id) => id,
        Err(e) => return ScenarioOutcome::caught(NAME, "allocation failed", e),
    };
    if let Err(e) = heap.copy_into(id, b"abc") {
        return ScenarioOutcome::caught(NAME, "initial copy failed", e);
    }
    if let Err(e) = heap.release(id) {
        return ScenarioOutcome::caught(NAME, "release failed", e);
    }
    match heap.read(id) {
        Ok(bytes) => ScenarioOutcome::clean(NAME, format!("read {} bytes", bytes.len())),
        Err(e) => ScenarioOutcome::caught(NAME, format!("read through {id} refused"), e),
    }
}

/// Allocate 10 bytes and release the block twice.
pub fn double_free() -> ScenarioOutcome {
    const NAME: &str = "double_free";
    let mut heap = scenario_heap();
    let id = match heap.alloc_bytes(DEMO_CAPACITY) {
        Ok(id) => id,
        Err(e) => return ScenarioOutcome::caught(NAME, "allocation failed", e),
    };
    if let Err(e) = heap.release(id) {
        return ScenarioOutcome::caught(NAME, "first release failed", e);
    }
    match heap.release(id) {
        Ok(n) => ScenarioOutcome::clean(NAME, format!("second release freed {n} bytes")),
        Err(e) => ScenarioOutcome::caught(
            NAME,
            format!("second release refused, {} releases recorded", heap.stats().total_releases),
            e,
        ),
    }
}

/// Allocate `count * 1_000_000` bytes, sized in `i32` as a C
/// `int len = n * 1000000` was, then release the block.
pub fn scaled_allocation(count: i32) -> ScenarioOutcome {
    const NAME: &str = "scaled_allocation";
    let size = match checked_size_i32(count, SCALE_FACTOR) {
        Ok(size) => size,
        Err(e) => return ScenarioOutcome::caught(NAME, format!("no allocation for count {count}"), e),
    };
    let mut heap = scenario_heap();
    let id = match heap.alloc_bytes(size) {
        Ok(id) => id,
        Err(e) => return ScenarioOutcome::caught(NAME, format!("no allocation for count {count}"), e),
    };
    match heap.release(id) {
        Ok(n) => ScenarioOutcome::clean(NAME, format!("allocated and released {n} bytes")),
        Err(e) => ScenarioOutcome::caught(NAME, "release failed", e),
    }
}

/// Remove the even values from `[1, 2, 3, 4, 5]`.
pub fn remove_evens() -> ScenarioOutcome {
    const NAME: &str = "remove_evens";
    let mut items = vec![1, 2, 3, 4, 5];
    let removed = ward_seq::remove_where(&mut items, |v| v % 2 == 0);
    ScenarioOutcome::clean(NAME, format!("{items:?} ({removed} removed)"))
}

/// Run the balanced increment/decrement race.
pub fn counter_race(config: &CounterConfig) -> ScenarioOutcome {
    const NAME: &str = "counter_race";
    match run_balanced(config) {
        Ok(report) => ScenarioOutcome::clean(
            NAME,
            format!(
                "final value {} after {} increments and {} decrements ({} counter)",
                report.final_value, report.increments, report.decrements, report.strategy
            ),
        ),
        Err(e) => ScenarioOutcome::caught(NAME, "run failed", e),
    }
}

/// A selectable scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// [`overflowing_copy`]
    OverflowingCopy,
    /// [`heap_overflow_copy`]
    HeapOverflowCopy,
    /// [`use_after_free`]
    UseAfterFree,
    /// [`double_free`]
    DoubleFree,
    /// [`scaled_allocation`]
    ScaledAllocation,
    /// [`remove_evens`]
    RemoveEvens,
    /// [`counter_race`]
    CounterRace,
}

impl Scenario {
    /// Every scenario, in demonstration order.
    pub const ALL: [Scenario; 7] = [
        Self::OverflowingCopy,
        Self::HeapOverflowCopy,
        Self::UseAfterFree,
        Self::DoubleFree,
        Self::ScaledAllocation,
        Self::RemoveEvens,
        Self::CounterRace,
    ];

    /// The scenario's name.
    pub fn name(self) -> &'static str {
        match self {
            Self::OverflowingCopy => "overflowing_copy",
            Self::HeapOverflowCopy => "heap_overflow_copy",
            Self::UseAfterFree => "use_after_free",
            Self::DoubleFree => "double_free",
            Self::ScaledAllocation => "scaled_allocation",
            Self::RemoveEvens => "remove_evens",
            Self::CounterRace => "counter_race",
        }
    }

    /// Run the scenario with the given parameters.
    pub fn run(self, params: &ScenarioParams) -> ScenarioOutcome {
        match self {
            Self::OverflowingCopy => overflowing_copy(),
            Self::HeapOverflowCopy => heap_overflow_copy(),
            Self::UseAfterFree => use_after_free(),
            Self::DoubleFree => double_free(),
            Self::ScaledAllocation => scaled_allocation(params.scale_count),
            Self::RemoveEvens => remove_evens(),
            Self::CounterRace => counter_race(&params.counter),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|sc| sc.name() == wanted)
            .ok_or_else(|| format!("unknown scenario '{s}'"))
    }
}

/// Inputs for the parameterised scenarios.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioParams {
    /// Count passed to [`scaled_allocation`]. Default: [`DEFAULT_SCALE_COUNT`].
    pub scale_count: i32,
    /// Config passed to [`counter_race`].
    pub counter: CounterConfig,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            scale_count: DEFAULT_SCALE_COUNT,
            counter: CounterConfig::default(),
        }
    }
}

/// Run every scenario with default parameters.
pub fn run_all() -> Vec<ScenarioOutcome> {
    run_all_with(&ScenarioParams::default())
}

/// Run every scenario with the given parameters.
pub fn run_all_with(params: &ScenarioParams) -> Vec<ScenarioOutcome> {
    Scenario::ALL.into_iter().map(|sc| sc.run(params)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::{ConfigError, CopyError, HandleError, SizeError};

    #[test]
    fn overflowing_copy_truncates_and_reports() {
        let out = overflowing_copy();
        assert_eq!(
            out.violation,
            Some(WardError::Copy(CopyError::CapacityExceeded {
                source_len: 26,
                capacity: 10
            }))
        );
        assert_eq!(out.detail, "buffer holds \"This is a\"");
    }

    #[test]
    fn heap_overflow_leaves_no_leak() {
        let out = heap_overflow_copy();
        assert!(matches!(out.violation, Some(WardError::Copy(_))));
        assert!(out.detail.contains("0 leaked"));
    }

    #[test]
    fn use_after_free_is_refused() {
        let out = use_after_free();
        assert!(matches!(
            out.violation,
            Some(WardError::Handle(HandleError::UseAfterFree { .. }))
        ));
    }

    #[test]
    fn double_free_is_refused() {
        let out = double_free();
        assert!(matches!(
            out.violation,
            Some(WardError::Handle(HandleError::DoubleFree { .. }))
        ));
        assert!(out.detail.contains("1 releases recorded"));
    }

    #[test]
    fn scaled_allocation_overflow_and_success() {
        let out = scaled_allocation(DEFAULT_SCALE_COUNT);
        assert_eq!(
            out.violation,
            Some(WardError::Size(SizeError::InvalidSize {
                count: 3_000,
                elem_size: 1_000_000
            }))
        );
        let out = scaled_allocation(2);
        assert!(!out.is_violation());
        assert_eq!(out.detail, "allocated and released 2000000 bytes");
    }

    #[test]
    fn scaled_allocation_over_block_limit() {
        let out = scaled_allocation(100);
        assert!(matches!(
            out.violation,
            Some(WardError::Size(SizeError::ExceedsLimit { .. }))
        ));
    }

    #[test]
    fn remove_evens_keeps_odds() {
        let out = remove_evens();
        assert_eq!(out.detail, "[1, 3, 5] (2 removed)");
        assert!(!out.is_violation());
    }

    #[test]
    fn counter_race_reports_zero() {
        let out = counter_race(&CounterConfig::new(1_000));
        assert!(!out.is_violation());
        assert!(out.detail.starts_with("final value 0 after 1000 increments"));

        let out = counter_race(&CounterConfig::new(1).with_pairs(0));
        assert_eq!(out.violation, Some(WardError::Config(ConfigError::ZeroPairs)));
    }

    #[test]
    fn scenario_names_round_trip() {
        for sc in Scenario::ALL {
            assert_eq!(sc.name().parse::<Scenario>(), Ok(sc));
        }
        assert_eq!("double-free".parse::<Scenario>(), Ok(Scenario::DoubleFree));
        assert!("stack_smash".parse::<Scenario>().is_err());
    }

    #[test]
    fn run_all_covers_every_scenario() {
        let params = ScenarioParams {
            counter: CounterConfig::new(1_000),
            ..ScenarioParams::default()
        };
        let outcomes = run_all_with(&params);
        let names: Vec<_> = outcomes.iter().map(|o| o.name).collect();
        let expected: Vec<_> = Scenario::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, expected);
        assert_eq!(outcomes.iter().filter(|o| o.is_violation()).count(), 5);
    }
}
