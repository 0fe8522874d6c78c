// Layout math shared by the views

/// Fraction of the stack decided so far, 0.0 ..= 1.0
pub fn calculate_progress(decided: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (decided as f64 / total as f64).min(1.0)
}

/// Columns to shift a card by for a horizontal displacement `x`.
///
/// A card at the exit offset is pushed all the way to the edge, which is
/// `max_shift` columns away from center.
pub fn card_shift(x: f64, exit_displacement: f64, max_shift: u16) -> i32 {
    if exit_displacement <= 0.0 {
        return 0;
    }
    let ratio = (x / exit_displacement).clamp(-1.0, 1.0);
    (ratio * max_shift as f64).round() as i32
}
