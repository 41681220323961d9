//! Order-preserving removal strategies.

/// Return a new vector of the elements for which `pred` is false.
///
/// The input is left untouched.
pub fn without_matching<T: Clone>(items: &[T], mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if !pred(item) {
            kept.push(item.clone());
        }
    }
    kept
}

/// Remove, in place, every element for which `pred` is true.
///
/// Returns the number of elements removed.
///
/// Kept elements are swapped down from the read index to the write index;
/// the vector is truncated only after the last element has been visited.
pub fn remove_where<T>(items: &mut Vec<T>, mut pred: impl FnMut(&T) -> bool) -> usize {
    let kept = compact(items, &mut pred);
    let removed = items.len() - kept;
    items.truncate(kept);
    removed
}

/// Remove, in place, every element for which `pred` is true and return
/// the removed elements in their original relative order.
///
/// Elements are moved out by value and partitioned into two new vectors,
/// so no index into `items` is held across a removal.
pub fn extract_where<T>(items: &mut Vec<T>, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
    let mut kept = Vec::with_capacity(items.len());
    let mut removed = Vec::new();
    for item in items.drain(..) {
        if pred(&item) {
            removed.push(item);
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    removed
}

/// Move kept elements to the front in their original order and return
/// the kept count. Removed elements end up in `items[kept..]`, unordered.
///
/// Invariant: `write <= read`, and `items[..write]` holds exactly the kept
/// elements among `items[..read]`, in order.
fn compact<T>(items: &mut [T], pred: &mut impl FnMut(&T) -> bool) -> usize {
    let mut write = 0;
    for read in 0..items.len() {
        if !pred(&items[read]) {
            items.swap(write, read);
            write += 1;
        }
    }
    write
}
