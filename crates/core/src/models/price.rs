use rand::Rng;

/// Largest price move per round, in percent, in either direction.
pub const MAX_CHANGE_PERCENT: f64 = 5.0;

/// Smallest price a listed stock can fall to (one cent).
pub const MIN_PRICE: f64 = 0.01;

/// Round a money amount to the nearest cent.
///
/// Works on the binary `f64` value, so a tie is decided by how the amount is
/// represented: `1.005` is stored just below the half and rounds to `1.0`,
/// while `2.675` rounds to `2.68`.
///
/// All prices, costs, proceeds and balances pass through this so that
/// repeated arithmetic never accumulates sub-cent drift.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Draw a uniform percentage change in `[-MAX_CHANGE_PERCENT, +MAX_CHANGE_PERCENT]`.
pub fn random_change_percent<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-MAX_CHANGE_PERCENT..=MAX_CHANGE_PERCENT)
}

/// Apply a percentage change to a price and round to cents.
///
/// A positive price never drops to zero or below: the result is floored at
/// [`MIN_PRICE`]. A zero price stays zero.
pub fn apply_change(price: f64, change_percent: f64) -> f64 {
    let next = round_to_cents(price * (1.0 + change_percent / 100.0));
    if price > 0.0 && next < MIN_PRICE {
        MIN_PRICE
    } else {
        next.max(0.0)
    }
}
