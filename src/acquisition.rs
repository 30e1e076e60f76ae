use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use crate::constants::{self, CODE_PERIOD_SEC, PRN_CODE_LEN};
use crate::error::{Error, Result};
use crate::fft;
use crate::oversample::oversample;
use crate::types::AcquisitionResult;

/// Runs the 2-D code-delay x Doppler acquisition search of §4.3 over `samples`
/// for a single satellite's PRN.
///
/// `doppler_grid` overrides the default +-7kHz search (§4.3); pass `None` to
/// use it. Fails with [`Error::InsufficientSamples`] if fewer than the FFT
/// size (the next power of two at or above `f_s * t_a` samples) are
/// available.
pub fn acquire(
    samples: &[f64],
    f_if: f64,
    f_s: f64,
    prn: &[i8],
    t_a: f64,
    doppler_grid: Option<&[f64]>,
) -> Result<AcquisitionResult> {
    if f_s <= 0.0 || t_a <= 0.0 {
        return Err(Error::InvalidConfiguration(
            "sample rate and integration time must be positive".into(),
        ));
    }

    let owned_grid;
    let grid: &[f64] = if let Some(g) = doppler_grid {
        if g.is_empty() {
            return Err(Error::InvalidConfiguration(
                "doppler search grid must not be empty".into(),
            ));
        }
        g
    } else {
        owned_grid = constants::default_doppler_grid(t_a);
        &owned_grid
    };

    let n_code = (f_s * CODE_PERIOD_SEC).round() as usize;
    let n_acq = (f_s * t_a).round() as usize;
    let n_fft = n_acq.max(1).next_power_of_two();

    if samples.len() < n_fft {
        return Err(Error::InsufficientSamples {
            requested: n_fft,
            available: samples.len(),
        });
    }

    let n_codes = (t_a / CODE_PERIOD_SEC).ceil().max(1.0) as usize;
    let tiled_prn: Vec<i8> = prn.iter().copied().cycle().take(prn.len() * n_codes).collect();
    let prn_os = oversample(&tiled_prn, f_s, n_acq, 0.0);
    let prn_os_complex: Vec<Complex64> =
        prn_os.iter().map(|&c| Complex64::new(c as f64, 0.0)).collect();

    let mut planner = FftPlanner::<f64>::new();
    let mut prn_fft = fft::forward_padded(&mut planner, &prn_os_complex, n_fft);
    for c in prn_fft.iter_mut() {
        *c = c.conj();
    }

    // First n_acq samples of the buffer, zero-extended to n_fft.
    let mut data_buf = vec![Complex64::default(); n_fft];
    for (slot, &x) in data_buf.iter_mut().zip(samples[..n_acq].iter()) {
        *slot = Complex64::new(x, 0.0);
    }

    let mut corr_map = vec![vec![0.0f64; grid.len()]; n_code];

    for (j, &f_d) in grid.iter().enumerate() {
        let baseband: Vec<Complex64> = data_buf
            .iter()
            .enumerate()
            .map(|(n, &x)| {
                let phase = -2.0 * constants::PI * (f_if + f_d) * n as f64 / f_s;
                x * Complex64::new(phase.cos(), phase.sin())
            })
            .collect();

        let corr = fft::correlate(&mut planner, &baseband, &prn_fft);

        for i in 0..n_code {
            corr_map[i][j] = corr[i].norm_sqr();
        }
    }

    let (i_peak, j_peak, peak) = argmax2d(&corr_map);
    let doppler_hz = grid[j_peak];
    let code_offset_sec = i_peak as f64 / f_s;
    let cn0_db_hz = cn0_from_map(&corr_map, i_peak, j_peak, peak, t_a, f_s);

    log::info!(
        "acquire: doppler_hz={doppler_hz:.1} code_offset_sec={code_offset_sec:.6} cn0_db_hz={cn0_db_hz:.1}"
    );

    Ok(AcquisitionResult {
        doppler_hz,
        code_offset_sec,
        cn0_db_hz,
    })
}

fn argmax2d(map: &[Vec<f64>]) -> (usize, usize, f64) {
    let mut best = (0usize, 0usize, f64::MIN);
    for (i, row) in map.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            if v > best.2 {
                best = (i, j, v);
            }
        }
    }
    best
}

/// C/N0 estimate of §4.3.1: noise floor averaged over the correlation map
/// excluding a window around the peak's code row and Doppler column.
fn cn0_from_map(map: &[Vec<f64>], i_peak: usize, j_peak: usize, peak: f64, t_a: f64, f_s: f64) -> f64 {
    let n_code = map.len();
    let n_doppler = map[0].len();

    let chip_interval = CODE_PERIOD_SEC / PRN_CODE_LEN as f64;
    let idx_t_width = (chip_interval * f_s).ceil() as usize;
    let idx_f_width = ((2.0 / (t_a * (n_doppler as f64 / 1000.0))) as i64).max(1) as usize;

    let t_lo = i_peak.saturating_sub(idx_t_width);
    let t_hi = (i_peak + idx_t_width + 1).min(n_code);
    let f_lo = j_peak.saturating_sub(idx_f_width);
    let f_hi = (j_peak + idx_f_width + 1).min(n_doppler);

    let mut sum = 0.0;
    let mut count = 0usize;
    for (i, row) in map.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            let excluded_by_code_col = j == j_peak && i >= t_lo && i < t_hi;
            let excluded_by_doppler_row = i == i_peak && j >= f_lo && j < f_hi;
            if excluded_by_code_col || excluded_by_doppler_row {
                continue;
            }
            sum += v;
            count += 1;
        }
    }

    let noise_floor = sum / count as f64;
    10.0 * ((peak - noise_floor) / (noise_floor * t_a)).log10()
}
