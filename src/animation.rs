//! Staggered entrance of the page's cards.

/// Delay in milliseconds before the card at each index is revealed:
/// `index * step_ms`, in document order. Saturates at `i32::MAX`, the
/// largest delay `setTimeout` accepts.
pub fn stagger_delays(count: usize, step_ms: u32) -> Vec<i32> {
    (0..count)
        .map(|index| {
            let delay = (index as u64).saturating_mul(u64::from(step_ms));
            i32::try_from(delay).unwrap_or(i32::MAX)
        })
        .collect()
}
