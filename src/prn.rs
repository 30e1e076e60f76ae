use crate::constants::{G2_DELAY, PRN_CODE_LEN};
use crate::error::{Error, Result};

// Zero-indexed tap positions for G1 (x^10 + x^3 + 1) and G2 (x^10 + x^9 + x^8
// + x^6 + x^3 + x^2 + 1), per the ICD.
const G1_TAPS: [usize; 2] = [2, 9];
const G2_TAPS: [usize; 6] = [1, 2, 5, 7, 8, 9];

/// Generates the length-1023 bipolar (+-1) Gold code for GPS L1 C/A satellite
/// `id` (1..=32).
///
/// Registers are carried in bipolar form directly: XOR in {0,1} is
/// multiplication in {-1,+1}, so the feedback taps and the final combine are
/// both plain products.
pub fn generate_prn(id: u8) -> Result<Vec<i8>> {
    if !(1..=32).contains(&id) {
        return Err(Error::InvalidSatelliteId(id));
    }

    let mut g1 = [0i8; PRN_CODE_LEN];
    let mut g2 = [0i8; PRN_CODE_LEN];
    let mut r1 = [-1i8; 10];
    let mut r2 = [-1i8; 10];

    for i in 0..PRN_CODE_LEN {
        g1[i] = r1[9];
        g2[i] = r2[9];

        let fb1 = r1[G1_TAPS[0]] * r1[G1_TAPS[1]];
        let fb2: i8 = G2_TAPS.iter().map(|&t| r2[t]).product();

        r1.rotate_right(1);
        r2.rotate_right(1);
        r1[0] = fb1;
        r2[0] = fb2;
    }

    let delay = G2_DELAY[(id - 1) as usize];
    let mut j = PRN_CODE_LEN - delay;
    let mut prn = Vec::with_capacity(PRN_CODE_LEN);
    for i in 0..PRN_CODE_LEN {
        prn.push(-g1[i] * g2[j % PRN_CODE_LEN]);
        j += 1;
    }

    Ok(prn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prn1_first_ten_chips_match_the_published_sequence() {
        let code = generate_prn(1).unwrap();
        assert_eq!(&code[..10], &[-1, -1, -1, -1, -1, -1, -1, -1, -1, 1]);
    }

    #[test]
    fn every_sv_code_has_the_right_length_and_alphabet() {
        for id in 1..=32u8 {
            let code = generate_prn(id).unwrap();
            assert_eq!(code.len(), PRN_CODE_LEN);
            assert!(code.iter().all(|&c| c == -1 || c == 1));
        }
    }

    #[test]
    fn every_sv_code_is_balanced_to_within_one_chip() {
        for id in 1..=32u8 {
            let code = generate_prn(id).unwrap();
            let sum: i64 = code.iter().map(|&c| c as i64).sum();
            assert_eq!(sum.unsigned_abs(), 1, "prn {id} sum={sum}");
        }
    }

    #[test]
    fn autocorrelation_sidelobes_are_bounded() {
        let code = generate_prn(1).unwrap();
        let n = code.len();

        let lag0: i64 = code.iter().map(|&c| (c as i64) * (c as i64)).sum();
        assert_eq!(lag0, n as i64);

        for lag in 1..n {
            let corr: i64 = (0..n)
                .map(|i| code[i] as i64 * code[(i + lag) % n] as i64)
                .sum();
            assert!(corr.abs() <= 65, "lag {lag}: corr={corr}");
        }
    }

    #[test]
    fn satellite_ids_outside_1_to_32_are_rejected() {
        assert!(matches!(generate_prn(0), Err(Error::InvalidSatelliteId(0))));
        assert!(matches!(
            generate_prn(33),
            Err(Error::InvalidSatelliteId(33))
        ));
    }
}
