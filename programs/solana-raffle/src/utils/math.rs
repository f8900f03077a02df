/// Position of the winning entry for a fulfilled random value.
///
/// Returns `None` when there are no entrants to pick from.
pub fn winner_index(random_value: u64, entrant_count: usize) -> Option<usize> {
    let count = u64::try_from(entrant_count).ok()?;
    let index = random_value.checked_rem(count)?;
    usize::try_from(index).ok()
}
