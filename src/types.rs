/// Result of a single code/Doppler acquisition search (§4.3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquisitionResult {
    pub doppler_hz: f64,
    pub code_offset_sec: f64,
    pub cn0_db_hz: f64,
}

/// Per-epoch tracking history (§4.6). All fields have the same length; one
/// entry per epoch processed.
#[derive(Debug, Clone, Default)]
pub struct TrackResult {
    pub i_prompt: Vec<f64>,
    pub q_prompt: Vec<f64>,
    pub doppler_hz: Vec<f64>,
    pub code_phase_sec: Vec<f64>,
    pub cn0_db_hz: Vec<f64>,
}

impl TrackResult {
    pub fn len(&self) -> usize {
        self.i_prompt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i_prompt.is_empty()
    }
}
