//! 16-bit Two's-Complement Words
//!
//! Conversions between signed integers, raw 16-bit words and their
//! `0xHHHH` text form. All arithmetic results pass through
//! `to_twos_complement`, so overflow wraps modulo 2^16.

const MODULUS: i64 = 1 << 16;
const SIGN_BIT: u16 = 1 << 15;

/// Reduce any integer modulo 2^16
pub fn to_twos_complement(value: i64) -> u16 {
    value.rem_euclid(MODULUS) as u16
}

/// Reinterpret a raw word as a signed value
pub fn from_twos_complement(word: u16) -> i16 {
    let value = i32::from(word);
    if word & SIGN_BIT != 0 {
        (value - MODULUS as i32) as i16
    } else {
        value as i16
    }
}

/// Four lower-case hex digits with a `0x` prefix
pub fn to_hex(word: u16) -> String {
    format!("0x{:04x}", word)
}

/// Parse `0xHHHH` (prefix optional, either case)
pub fn from_hex(text: &str) -> Option<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_modulo_two_to_the_sixteen() {
        assert_eq!(to_twos_complement(32768), 0x8000);
        assert_eq!(to_twos_complement(-1), 0xffff);
        assert_eq!(to_twos_complement(65536 + 5), 5);
        assert_eq!(from_twos_complement(to_twos_complement(32768)), -32768);
    }

    #[test]
    fn sign_bit_marks_negative_values() {
        assert_eq!(from_twos_complement(0x7fff), 32767);
        assert_eq!(from_twos_complement(0x8000), -32768);
        assert_eq!(from_twos_complement(0xfffb), -5);
    }

    #[test]
    fn hex_form_is_four_digits() {
        assert_eq!(to_hex(5), "0x0005");
        assert_eq!(to_hex(0xfffb), "0xfffb");
        assert_eq!(from_hex("0x0005"), Some(5));
        assert_eq!(from_hex("FFFB"), Some(0xfffb));
        assert_eq!(from_hex("0x10000"), None);
        assert_eq!(from_hex("0x"), None);
    }
}
