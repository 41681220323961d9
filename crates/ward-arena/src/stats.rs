//! Heap usage counters.

/// Counters describing a [`Heap`](crate::Heap)'s activity.
///
/// `live_*` fields describe the current state; the rest are cumulative
/// since the heap was created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Blocks currently live.
    pub live_blocks: u32,
    /// Bytes held by live blocks.
    pub live_bytes: usize,
    /// Successful allocations.
    pub total_allocs: u64,
    /// Successful releases.
    pub total_releases: u64,
    /// Allocations that reused a released slot.
    pub slot_reuses: u64,
    /// Allocation requests rejected by sizing or the live limit.
    pub rejected_allocs: u64,
    /// Reads or writes rejected because the handle was stale or unknown.
    pub rejected_accesses: u64,
    /// Releases rejected as double frees or unknown handles.
    pub rejected_releases: u64,
    /// Slots permanently retired because their generation was exhausted.
    pub retired_slots: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = HeapStats::default();
        assert_eq!(s.live_blocks, 0);
        assert_eq!(s.live_bytes, 0);
        assert_eq!(s.total_allocs, 0);
        assert_eq!(s.total_releases, 0);
        assert_eq!(s.slot_reuses, 0);
        assert_eq!(s.rejected_allocs, 0);
        assert_eq!(s.rejected_accesses, 0);
        assert_eq!(s.rejected_releases, 0);
        assert_eq!(s.retired_slots, 0);
    }
}
