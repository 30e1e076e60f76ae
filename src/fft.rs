use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward FFT of `data`, zero-padded/truncated to exactly `len`.
pub fn forward_padded(planner: &mut FftPlanner<f64>, data: &[Complex64], len: usize) -> Vec<Complex64> {
    let mut buf = vec![Complex64::default(); len];
    let n = data.len().min(len);
    buf[..n].copy_from_slice(&data[..n]);
    planner.plan_fft_forward(len).process(&mut buf);
    buf
}

/// Circular cross-correlation via FFT: `ifft(fft(signal) .* conj_reference_fft)`,
/// normalized so the inverse transform matches its forward counterpart.
/// `conj_reference_fft` must already hold the conjugated FFT of the reference.
pub fn correlate(
    planner: &mut FftPlanner<f64>,
    signal: &[Complex64],
    conj_reference_fft: &[Complex64],
) -> Vec<Complex64> {
    let len = conj_reference_fft.len();
    let mut buf = forward_padded(planner, signal, len);

    for (b, r) in buf.iter_mut().zip(conj_reference_fft) {
        *b *= r;
    }

    planner.plan_fft_inverse(len).process(&mut buf);
    let scale = 1.0 / len as f64;
    for c in buf.iter_mut() {
        *c *= scale;
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlate_peaks_at_zero_lag_for_an_aligned_impulse() {
        let len = 16;
        let mut planner = FftPlanner::<f64>::new();

        let mut reference = vec![Complex64::default(); len];
        reference[0] = Complex64::new(1.0, 0.0);
        let mut ref_fft = forward_padded(&mut planner, &reference, len);
        for c in ref_fft.iter_mut() {
            *c = c.conj();
        }

        let signal = reference.clone();
        let corr = correlate(&mut planner, &signal, &ref_fft);

        let (peak_idx, _) = corr
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm_sqr().total_cmp(&b.1.norm_sqr()))
            .unwrap();
        assert_eq!(peak_idx, 0);
    }
}
