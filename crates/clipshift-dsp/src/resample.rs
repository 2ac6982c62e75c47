//! Length-changing linear interpolation.

/// Resample `input` to exactly `output_len` samples by linear interpolation.
///
/// The read position advances by `input.len() / output_len` per output sample,
/// so playing the result at the original sample rate scales every frequency
/// by that ratio.
pub fn resample_linear(input: &[f32], output_len: usize) -> Vec<f32> {
    if output_len == 0 {
        return Vec::new();
    }
    if input.is_empty() {
        return vec![0.0; output_len];
    }
    if input.len() == output_len {
        return input.to_vec();
    }

    let last = input.len() - 1;
    let step = input.len() as f64 / output_len as f64;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 * step;
            let i0 = (pos.floor() as usize).min(last);
            let i1 = (i0 + 1).min(last);
            let frac = (pos - i0 as f64) as f32;
            input[i0] + (input[i1] - input[i0]) * frac
        })
        .collect()
}
