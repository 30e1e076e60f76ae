pub const PI: f64 = std::f64::consts::PI;

pub const PRN_CODE_LEN: usize = 1023;
pub const NUM_GPS_SATS: usize = 32;

pub const CHIP_RATE_HZ: f64 = 1.023e6;
pub const CODE_PERIOD_SEC: f64 = 1e-3;

pub const SAMPLE_RATE_HZ: f64 = 40.0e6 / 7.0;
pub const IF_HZ: f64 = 1_610_476.19;
pub const L1_HZ: f64 = 154.0 * 10.23e6;

pub const COARSE_INTEGRATION_SEC: f64 = 1e-3;
pub const FINE_INTEGRATION_SEC: f64 = 10e-3;

pub const PLL_BANDWIDTH_HZ: f64 = 10.0;
pub const DLL_BANDWIDTH_HZ: f64 = 0.1;

pub const EARLY_LATE_SPACING_CHIPS: f64 = 0.5;

/// Standard GPS L1 C/A G2 delay table, indexed by `id - 1`. Must be reproduced
/// verbatim; see spec §6.
pub const G2_DELAY: [usize; NUM_GPS_SATS] = [
    5, 6, 7, 8, 17, 18, 139, 140, 141, 251, 252, 254, 255, 256, 257, 258, 469, 470, 471, 472, 473,
    474, 509, 512, 513, 514, 515, 516, 859, 860, 861, 862, 863,
];

/// numpy-`arange`-equivalent half-open range: `start, start+step, ... < stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step == 0.0 || (stop - start) / step <= 0.0 {
        return vec![];
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Default acquisition Doppler search grid of §4.3: [-7000, 7000] Hz, step 1/(4*Ta).
pub fn default_doppler_grid(t_a: f64) -> Vec<f64> {
    arange(-7000.0, 7001.0, 1.0 / (4.0 * t_a))
}

/// Coarse Doppler search grid of §6: [-40kHz, -10kHz) step 1/(4*Ta).
pub fn coarse_doppler_grid(t_a: f64) -> Vec<f64> {
    arange(-40_000.0, -10_000.0, 1.0 / (4.0 * t_a))
}

/// Fine Doppler search grid of §6, centered on the coarse estimate: +/-250 Hz step 2 Hz.
pub fn fine_doppler_grid(center_hz: f64) -> Vec<f64> {
    arange(center_hz - 250.0, center_hz + 252.0, 2.0)
}
