use crate::constants::CHIP_RATE_HZ;

/// Nearest-neighbor (floor) oversampling of a chip sequence onto a sample
/// grid, per §4.2. `offset_chips` is the fractional chip phase at sample 0
/// and may be negative; indexing wraps with Euclidean modulo so it is safe
/// for any real offset.
pub fn oversample(code: &[i8], sample_rate_hz: f64, num_samples: usize, offset_chips: f64) -> Vec<i8> {
    let samples_per_chip = sample_rate_hz / CHIP_RATE_HZ;
    let len = code.len() as i64;

    (0..num_samples)
        .map(|n| {
            let idx = (offset_chips + n as f64 / samples_per_chip).floor() as i64;
            code[idx.rem_euclid(len) as usize]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replicates_each_chip_for_the_oversampling_ratio() {
        let code = [1i8, -1];
        let fs = 4.0 * CHIP_RATE_HZ;
        let out = oversample(&code, fs, 8, 0.0);
        assert_eq!(out, vec![1, 1, 1, 1, -1, -1, -1, -1]);
    }

    #[test]
    fn negative_offsets_wrap_without_panicking() {
        let code = [1i8, -1, 1, -1];
        let fs = CHIP_RATE_HZ;
        let out = oversample(&code, fs, 6, -2.0);
        assert_eq!(out.len(), 6);
        // offset -2 chips at unity rate should reproduce the code shifted by
        // two positions (wrapping), i.e. start at index 2.
        assert_eq!(out, vec![1, -1, 1, -1, 1, -1]);
    }

    #[test]
    fn is_idempotent_under_repeated_unity_rate_oversampling() {
        let code = [1i8, -1, -1, 1, 1, -1, -1, -1, 1, 1];
        let out = oversample(&code, CHIP_RATE_HZ, code.len(), 0.0);
        assert_eq!(out, code);
    }
}
