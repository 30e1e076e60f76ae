use colored::Colorize;

use crate::constants::{self, CODE_PERIOD_SEC, EARLY_LATE_SPACING_CHIPS};
use crate::correlator::correlate_epoch;
use crate::error::{Error, Result};
use crate::loops::{DllState, PllState};
use crate::types::{AcquisitionResult, TrackResult};

const CN0_WARN_THRESHOLD_DB_HZ: f64 = 25.0;

/// Tracking-loop parameters; defaults mirror the receiver's nominal front end
/// and the reference loop bandwidths of §4.5.
#[derive(Debug, Clone, Copy)]
pub struct TrackingConfig {
    pub f_if: f64,
    pub f_s: f64,
    pub f_l1: f64,
    pub t_a: f64,
    pub pll_bandwidth_hz: f64,
    pub dll_bandwidth_hz: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            f_if: constants::IF_HZ,
            f_s: constants::SAMPLE_RATE_HZ,
            f_l1: constants::L1_HZ,
            t_a: constants::COARSE_INTEGRATION_SEC,
            pll_bandwidth_hz: constants::PLL_BANDWIDTH_HZ,
            dll_bandwidth_hz: constants::DLL_BANDWIDTH_HZ,
        }
    }
}

/// Runs the epoch-synchronous tracking loop of §4.6 from the satellite's
/// acquisition result to the end of `samples`.
pub fn track(
    samples: &[f64],
    prn: &[i8],
    sv_id: u8,
    acq: &AcquisitionResult,
    cfg: &TrackingConfig,
) -> Result<TrackResult> {
    if cfg.f_s <= 0.0 || cfg.t_a <= 0.0 {
        return Err(Error::InvalidConfiguration(
            "sample rate and integration time must be positive".into(),
        ));
    }

    let early_late_spacing_sec = EARLY_LATE_SPACING_CHIPS * CODE_PERIOD_SEC / prn.len() as f64;

    let mut pll = PllState::new(cfg.pll_bandwidth_hz, cfg.t_a, acq.doppler_hz);
    let dll = DllState::new(cfg.dll_bandwidth_hz, acq.cn0_db_hz, cfg.t_a);

    let mut code_phase_sec = acq.code_offset_sec;
    let mut carrier_phase = 0.0f64;
    let mut doppler_hz = acq.doppler_hz;
    let mut idx = (code_phase_sec * cfg.f_s) as usize;

    let mut result = TrackResult::default();
    let mut warned_low_cn0 = false;

    log::warn!(
        "sv {sv_id}: {} doppler_hz={doppler_hz:.1} code_offset_sec={code_phase_sec:.6} cn0_db_hz={:.1}",
        "LOCK".green(),
        acq.cn0_db_hz,
    );

    loop {
        let t_a_adj = cfg.t_a / (1.0 + doppler_hz / cfg.f_l1);
        let n_adj = (cfg.f_s * t_a_adj) as usize;

        if n_adj == 0 || idx + n_adj >= samples.len() {
            break;
        }

        let t0 = idx as f64 / cfg.f_s;
        let segment = &samples[idx..idx + n_adj];

        let corr = correlate_epoch(
            segment,
            t0,
            cfg.f_if,
            cfg.f_s,
            t_a_adj,
            code_phase_sec,
            doppler_hz,
            carrier_phase,
            early_late_spacing_sec,
            prn,
        );

        let i_prompt = corr.prompt.re;
        let q_prompt = corr.prompt.im;
        let (v_k, doppler_hz_new) = pll.update(i_prompt, q_prompt);

        let v_code = dll.update(
            corr.prompt,
            corr.early,
            corr.late,
            doppler_hz,
            v_k,
            early_late_spacing_sec,
            cfg.f_l1,
        );

        let cn0_db_hz =
            10.0 * (corr.prompt.norm_sqr() / (2.0 * dll.sigma_iq() * dll.sigma_iq() * cfg.t_a)).log10();

        result.i_prompt.push(i_prompt);
        result.q_prompt.push(q_prompt);
        result.doppler_hz.push(doppler_hz_new);
        result.code_phase_sec.push(code_phase_sec);
        result.cn0_db_hz.push(cn0_db_hz);

        if cn0_db_hz < CN0_WARN_THRESHOLD_DB_HZ {
            if !warned_low_cn0 {
                log::warn!("sv {sv_id}: {} cn0_db_hz={cn0_db_hz:.1}", "LOST".red());
                warned_low_cn0 = true;
            }
        } else {
            warned_low_cn0 = false;
        }

        let dt = n_adj as f64 / cfg.f_s;
        carrier_phase += dt * v_k;
        code_phase_sec += (1.0 - v_code) * CODE_PERIOD_SEC;
        doppler_hz = doppler_hz_new;
        idx += n_adj;
    }

    log::info!(
        "sv {sv_id}: IDLE epochs={} last_doppler_hz={doppler_hz:.1}",
        result.len(),
    );

    Ok(result)
}
