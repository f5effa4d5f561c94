/// Identity of a single card, unique within a deck.
pub type CardId = u8;

/// Shared by exactly the two cards forming a pair.
pub type PairId = u8;

/// Count type used for pairs per deck.
pub type PairCount = u8;

/// Wall-clock milliseconds since the Unix epoch.
pub type Timestamp = u64;

pub const fn elapsed_secs(from: Timestamp, to: Timestamp) -> u32 {
    let secs = to.saturating_sub(from) / 1000;
    if secs > u32::MAX as u64 {
        u32::MAX
    } else {
        secs as u32
    }
}
