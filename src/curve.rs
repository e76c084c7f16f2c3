// Logarithmic slider: the UI works in positions 0-100, the mixer in gains 0-1.
// Gain grows exponentially with position so loudness feels linear on the slider.

const MIN_POS: f64 = 0.0;
const MAX_POS: f64 = 100.0;
pub const MAX_POSITION: u8 = 100;

#[inline]
fn min_val() -> f64 {
    1.0_f64.ln()
}

#[inline]
fn scale() -> f64 {
    (100.0_f64.ln() - min_val()) / (MAX_POS - MIN_POS)
}

/// Slider position (0-100) to mixer gain (0-1), rounded to two decimals.
pub fn position_to_volume(position: u8) -> f32 {
    if position == 0 {
        return 0.0; // ln(0) is undefined
    }
    let position = position.min(MAX_POSITION) as f64;
    let vol = ((position - MIN_POS) * scale() + min_val()).exp() / 100.0;
    ((vol * 100.0).round() / 100.0) as f32
}

/// Mixer gain (0-1) back to a slider position. Lossy: truncates.
///
/// Public counterpart of [`position_to_volume`]; the app itself only ever
/// goes position to gain.
#[allow(dead_code)]
pub fn volume_to_position(volume: f32) -> u8 {
    if !(volume > 0.0) { // also catches NaN
        return 0;
    }
    let conv_volume = volume.min(1.0) as f64 * 100.0;
    let pos = MIN_POS + (conv_volume.ln() - min_val()) / scale();
    // truncate toward zero like an int cast (after absorbing float noise, so
    // 1.0 lands on 100 and not 99), then keep it on the slider
    ((pos + 1e-9).trunc() as i64).clamp(0, MAX_POSITION as i64) as u8
}
