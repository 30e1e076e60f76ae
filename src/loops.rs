use rustfft::num_complex::Complex64;

use crate::constants::PI;

/// Third-order state-space carrier tracking loop (§4.5).
#[derive(Debug, Clone, Copy)]
pub struct PllState {
    a: [[f64; 2]; 2],
    b: [f64; 2],
    c: [f64; 2],
    d: f64,
    x: [f64; 2],
}

impl PllState {
    /// Builds the loop filter for noise bandwidth `bn` and integration time
    /// `t_a`, seeding the state from an initial Doppler estimate (Hz).
    pub fn new(bn: f64, t_a: f64, doppler_hz_init: f64) -> Self {
        let a_gain = 1.2 * bn;
        let k = 2.0 * a_gain;

        let a = [[1.0, t_a], [0.0, 1.0]];
        let b = [k * t_a + k * t_a * t_a / 2.0, k * t_a];
        let c = [1.0, 0.0];
        let d = k;

        let x0 = 2.0 * PI * doppler_hz_init;

        Self { a, b, c, d, x: [x0, x0] }
    }

    /// Runs one epoch: arctan discriminator against the prompt correlation,
    /// then the state-space update. Returns `(v_k, doppler_hz)` where `v_k`
    /// is the loop's angular-velocity output (rad/s), computed from the
    /// *pre-update* state, matching the reference order of operations.
    pub fn update(&mut self, i_prompt: f64, q_prompt: f64) -> (f64, f64) {
        let error = q_prompt.atan2(i_prompt);

        let v_k = self.c[0] * self.x[0] + self.c[1] * self.x[1] + self.d * error;

        let x0 = self.a[0][0] * self.x[0] + self.a[0][1] * self.x[1] + self.b[0] * error;
        let x1 = self.a[1][0] * self.x[0] + self.a[1][1] * self.x[1] + self.b[1] * error;
        self.x = [x0, x1];

        (v_k, v_k / (2.0 * PI))
    }
}

/// Normalized first-order code tracking loop (§4.5), carrier-aided by the
/// PLL's angular velocity.
#[derive(Debug, Clone, Copy)]
pub struct DllState {
    bn: f64,
    sigma_iq: f64,
}

impl DllState {
    /// `sigma_iq` is frozen at construction from the acquisition C/N0
    /// estimate; this loop never re-estimates it.
    pub fn new(bn: f64, cn0_init_db_hz: f64, t_a: f64) -> Self {
        let sigma_iq = 10f64.powf(cn0_init_db_hz / 20.0) / (2.0 * t_a).sqrt();
        Self { bn, sigma_iq }
    }

    pub fn sigma_iq(&self) -> f64 {
        self.sigma_iq
    }

    /// Computes the code-rate correction `v_code` (chips/epoch worth of
    /// normalized Doppler) from the epoch's early/prompt/late correlations,
    /// the pre-update Doppler estimate, and the PLL's `v_k` for this epoch.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &self,
        prompt: Complex64,
        early: Complex64,
        late: Complex64,
        doppler_hz: f64,
        v_k: f64,
        early_late_spacing_sec: f64,
        l1_hz: f64,
    ) -> f64 {
        let power = prompt.norm_sqr();
        let early_corr = early.re * prompt.re + early.im * prompt.im;
        let late_corr = late.re * prompt.re + late.im * prompt.im;

        let t_c_eff = early_late_spacing_sec * (1.0 - doppler_hz / l1_hz);
        let gain = (t_c_eff / 2.0) / (power - 2.0 * self.sigma_iq * self.sigma_iq);
        let error = gain * (early_corr - late_corr);

        4.0 * self.bn * error + v_k / (2.0 * PI * l1_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pll_locks_onto_a_constant_residual_doppler() {
        // Closed-loop simulation: a carrier sitting at a fixed offset from the
        // loop's initial estimate, phase error evolving from the loop's own
        // angular-velocity output each epoch -- the same feedback the epoch
        // loop in tracking.rs drives.
        let t_a = 1e-3;
        let f_true_hz = 50.0;
        let mut pll = PllState::new(10.0, t_a, 0.0);

        let mut phase_error = 0.0f64;
        let mut doppler_hz = 0.0;
        for _ in 0..300 {
            let (v_k, d) = pll.update(phase_error.cos(), phase_error.sin());
            doppler_hz = d;
            phase_error += (2.0 * PI * f_true_hz - v_k) * t_a;
        }

        assert!(
            (doppler_hz - f_true_hz).abs() < 0.2 * f_true_hz,
            "doppler_hz={doppler_hz} f_true_hz={f_true_hz}"
        );
    }

    #[test]
    fn dll_error_sign_follows_the_early_late_imbalance() {
        let dll = DllState::new(0.1, 40.0, 1e-3);
        let prompt = Complex64::new(1.0, 0.0);
        let early = Complex64::new(1.2, 0.0);
        let late = Complex64::new(0.8, 0.0);

        let v_code = dll.update(prompt, early, late, 0.0, 0.0, 0.5 * 1e-3 / 1023.0, crate::constants::L1_HZ);
        assert!(v_code > 0.0, "v_code={v_code}");
    }
}
