//! RK number decoding.

/// The value is stored multiplied by 100
const RK_SCALED: u32 = 0x01;
/// The payload is a signed integer rather than truncated IEEE bits
const RK_INTEGER: u32 = 0x02;

/// Decode the 32-bit RK form of a number stored in RK and MULRK records.
///
/// The two low bits are flags. The other 30 bits are either a signed
/// integer or the high bits of a double whose low 34 bits are zero.
pub fn decode_rk(rk: u32) -> f64 {
    let number = if rk & RK_INTEGER != 0 {
        f64::from((rk as i32) >> 2)
    } else {
        f64::from_bits(u64::from(rk & !0x03) << 32)
    };

    if rk & RK_SCALED != 0 {
        number / 100.0
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_rk() {
        let cases = [
            (0x3FF0_0000, 1.0),
            (0x3FF0_0001, 0.01),
            (0xC059_0000, -100.0),
            ((1000 << 2) | RK_INTEGER, 1000.0),
            (0xFFFF_FFFE, -1.0),
            ((250 << 2) | RK_INTEGER | RK_SCALED, 2.5),
        ];
        for (rk, expected) in cases {
            assert_eq!(decode_rk(rk), expected, "rk {rk:#010X}");
        }
    }

    #[test]
    fn test_flags_are_not_part_of_the_double() {
        assert_eq!(decode_rk(0x3FF0_0000 | RK_SCALED), 0.01);
        assert_eq!(decode_rk(0x4024_0000), 10.0);
    }

    #[test]
    fn test_integer_range_edges() {
        assert_eq!(decode_rk(0x7FFF_FFFE), f64::from((1 << 29) - 1));
        assert_eq!(decode_rk(0x8000_0002), -f64::from(1 << 29));
    }
}
