use std::collections::HashMap;

use rayon::prelude::*;

use crate::acquisition::acquire;
use crate::constants;
use crate::error::Result;
use crate::prn::generate_prn;
use crate::tracking::{track, TrackingConfig};
use crate::types::{AcquisitionResult, TrackResult};

/// Acquires (coarse then fine, per §6) and tracks a set of satellites against
/// a shared sample buffer in parallel (§4.8/§5). Each satellite's PRN,
/// acquisition state, and tracking state are private to its own task, so
/// satellites can be dispatched across worker threads with no shared mutable
/// state beyond the read-only sample buffer.
pub fn acquire_and_track_all(
    samples: &[f64],
    sv_ids: &[u8],
    coarse_cfg: &TrackingConfig,
    fine_t_a: f64,
) -> HashMap<u8, Result<(AcquisitionResult, TrackResult)>> {
    sv_ids
        .par_iter()
        .map(|&sv_id| (sv_id, acquire_and_track_one(samples, sv_id, coarse_cfg, fine_t_a)))
        .collect()
}

fn acquire_and_track_one(
    samples: &[f64],
    sv_id: u8,
    coarse_cfg: &TrackingConfig,
    fine_t_a: f64,
) -> Result<(AcquisitionResult, TrackResult)> {
    let prn = generate_prn(sv_id)?;

    let coarse_grid = constants::coarse_doppler_grid(coarse_cfg.t_a);
    let coarse = acquire(
        samples,
        coarse_cfg.f_if,
        coarse_cfg.f_s,
        &prn,
        coarse_cfg.t_a,
        Some(&coarse_grid),
    )?;

    let fine_grid = constants::fine_doppler_grid(coarse.doppler_hz);
    let fine = acquire(samples, coarse_cfg.f_if, coarse_cfg.f_s, &prn, fine_t_a, Some(&fine_grid))?;

    let result = track(samples, &prn, sv_id, &fine, coarse_cfg)?;

    Ok((fine, result))
}
