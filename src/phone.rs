/// Normalize a raw phone entry into the shop's display format
///
/// Only ASCII digits are kept. A bare 8-digit entry is treated as a mobile
/// number typed without its `010` prefix. Digit counts that match no known
/// shape come back as the bare digit string.
pub fn normalize(raw: Option<&str>) -> String {
    let digits: String = raw
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    // Every char is ASCII from here on, so byte slicing is safe.
    match digits.len() {
        0 => String::new(),
        8 => format!("010-{}-{}", &digits[..4], &digits[4..]),
        10 if digits.starts_with("02") => {
            format!("{}-{}-{}", &digits[..2], &digits[2..6], &digits[6..])
        }
        10 if digits.starts_with('0') => {
            format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
        }
        11 => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
        _ => digits,
    }
}
