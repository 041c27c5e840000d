//! Kazakhstan individual identification number (IIN) checksum.

const FIRST_PASS: [u32; 11] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
const SECOND_PASS: [u32; 11] = [3, 4, 5, 6, 7, 8, 9, 10, 11, 1, 2];

/// Check that `iin` is 12 ASCII digits whose last digit is the control digit.
///
/// The control digit is the weighted sum of the first eleven digits mod 11.
/// When that yields 10 the sum is recomputed with the shifted weights; a
/// second 10 can never equal a single digit, so such an IIN is invalid.
pub fn is_valid_national_id(iin: &str) -> bool {
    let bytes = iin.as_bytes();
    if bytes.len() != 12 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let digits: Vec<u32> = bytes.iter().map(|b| u32::from(b - b'0')).collect();
    let weighted = |weights: &[u32; 11]| -> u32 {
        digits
            .iter()
            .zip(weights.iter())
            .map(|(d, w)| d * w)
            .sum::<u32>()
            % 11
    };

    let mut control = weighted(&FIRST_PASS);
    if control == 10 {
        control = weighted(&SECOND_PASS);
    }

    control == digits[11]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Append the computed control digit to an 11-digit prefix, if one exists.
    fn with_control(prefix: &str) -> Option<String> {
        let digits: Vec<u32> = prefix.bytes().map(|b| u32::from(b - b'0')).collect();
        let sum = |w: &[u32; 11]| digits.iter().zip(w).map(|(d, w)| d * w).sum::<u32>() % 11;
        let mut control = sum(&FIRST_PASS);
        if control == 10 {
            control = sum(&SECOND_PASS);
        }
        (control < 10).then(|| format!("{prefix}{control}"))
    }

    #[test]
    fn test_known_valid() {
        // 9*1+0*2+0*3+1*4+0*5+1*6+3*7+0*8+0*9+0*10+1*11 = 51, 51 % 11 = 7.
        assert!(is_valid_national_id("900101300017"));
        assert!(!is_valid_national_id("900101300018"));
    }

    #[test]
    fn test_second_pass() {
        // 0*1+..+0*9 + 1*10 + 0*11 = 10 on the first pass.
        // Second pass: 1*1 (weight for position 10) = 1.
        assert!(is_valid_national_id("000000000101"));
        assert!(!is_valid_national_id("000000000100"));
    }

    #[test]
    fn test_second_pass_ten_is_never_valid() {
        // Find a prefix where both passes give 10 and confirm no digit passes.
        let prefix = (0..100_000u32)
            .map(|n| format!("{n:011}"))
            .find(|p| {
                let d: Vec<u32> = p.bytes().map(|b| u32::from(b - b'0')).collect();
                let s = |w: &[u32; 11]| d.iter().zip(w).map(|(d, w)| d * w).sum::<u32>() % 11;
                s(&FIRST_PASS) == 10 && s(&SECOND_PASS) == 10
            })
            .expect("such a prefix exists in range");
        for last in 0..=9 {
            assert!(!is_valid_national_id(&format!("{prefix}{last}")));
        }
    }

    #[test]
    fn test_shape_checks() {
        assert!(!is_valid_national_id(""));
        assert!(!is_valid_national_id("90010130001"));
        assert!(!is_valid_national_id("9001013000170"));
        assert!(!is_valid_national_id("90010130001a"));
        assert!(!is_valid_national_id(" 900101300017"));
        assert!(!is_valid_national_id("９００１０１３０００１７"));
    }

    #[test]
    fn test_agrees_with_reference_on_sample() {
        for n in (0..2_000_000u64).step_by(7919) {
            let prefix = format!("{n:011}");
            match with_control(&prefix) {
                Some(valid) => assert!(is_valid_national_id(&valid), "{valid}"),
                None => {
                    for last in 0..=9 {
                        assert!(!is_valid_national_id(&format!("{prefix}{last}")));
                    }
                }
            }
        }
    }
}
