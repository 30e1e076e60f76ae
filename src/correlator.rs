use rustfft::num_complex::Complex64;

use crate::constants::{self, CODE_PERIOD_SEC};
use crate::oversample::oversample;

/// Early/prompt/late complex correlations for one tracking epoch.
pub struct CorrelatorOutput {
    pub prompt: Complex64,
    pub early: Complex64,
    pub late: Complex64,
}

/// Correlates `samples` (one epoch's worth, starting at absolute time `t0`)
/// against the local carrier and a early/prompt/late-spaced replica of `prn`,
/// per §4.4.
///
/// `code_phase_sec`, `doppler_hz`, and `carrier_phase` are the tracking
/// state's estimates as of the start of this epoch; `t_a` is this epoch's
/// (possibly Doppler-adjusted) integration time, used to size the tiled PRN
/// replica.
#[allow(clippy::too_many_arguments)]
pub fn correlate_epoch(
    samples: &[f64],
    t0: f64,
    f_if: f64,
    f_s: f64,
    t_a: f64,
    code_phase_sec: f64,
    doppler_hz: f64,
    carrier_phase: f64,
    early_late_spacing_sec: f64,
    prn: &[i8],
) -> CorrelatorOutput {
    let n = samples.len();
    let chip_interval = CODE_PERIOD_SEC / prn.len() as f64;

    let n_codes = (t_a / CODE_PERIOD_SEC).ceil().max(1.0) as usize;
    let tiled_prn: Vec<i8> = prn.iter().copied().cycle().take(prn.len() * n_codes).collect();

    let phi_prompt = (t0 - code_phase_sec) / chip_interval;
    let phi_early = (t0 - (code_phase_sec - early_late_spacing_sec)) / chip_interval;
    let phi_late = (t0 - (code_phase_sec + early_late_spacing_sec)) / chip_interval;

    let code_p = oversample(&tiled_prn, f_s, n, phi_prompt);
    let code_e = oversample(&tiled_prn, f_s, n, phi_early);
    let code_l = oversample(&tiled_prn, f_s, n, phi_late);

    let mut prompt = Complex64::default();
    let mut early = Complex64::default();
    let mut late = Complex64::default();

    for k in 0..n {
        let t_k = t0 + k as f64 / f_s;
        let phase = -(2.0 * constants::PI * (f_if * t_k + doppler_hz * (t_k - t0)) + carrier_phase);
        let local = Complex64::new(phase.cos(), phase.sin());
        let x = Complex64::new(samples[k], 0.0) * local;

        prompt += x * code_p[k] as f64;
        early += x * code_e[k] as f64;
        late += x * code_l[k] as f64;
    }

    CorrelatorOutput { prompt, early, late }
}
