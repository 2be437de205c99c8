/// Parses the digits of a hexadecimal literal into an `i32`.
///
/// Literals up to `FFFFFFFF` are accepted and reinterpreted as two's
/// complement, so `0xFFFFFFFF` is `-1`.
///
/// ## Parameters
/// - `digits`: The hex digits, without the `0x` prefix.
///
/// ## Returns
/// - `Some(i32)`: The value, if it fits in 32 bits.
/// - `None`: If the literal is too long or malformed.
///
/// ## Example
/// ```
/// use trio::util::num::hex_to_i32;
///
/// assert_eq!(hex_to_i32("1F"), Some(31));
/// assert_eq!(hex_to_i32("ffffffff"), Some(-1));
/// assert_eq!(hex_to_i32("100000000"), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn hex_to_i32(digits: &str) -> Option<i32> {
    u32::from_str_radix(digits, 16).ok().map(|v| v as i32)
}

/// Converts an `f64` to `i32` by truncating toward zero.
///
/// ## Errors
/// Returns `Err(error)` for NaN and for values whose integral part lies
/// outside the `i32` range.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `error`: The error to return if the conversion is not possible.
///
/// ## Example
/// ```
/// use trio::util::num::f64_to_i32_truncating;
///
/// assert_eq!(f64_to_i32_truncating(-2.9, "bad"), Ok(-2));
/// assert_eq!(f64_to_i32_truncating(2_147_483_647.5, "bad"), Ok(i32::MAX));
/// assert!(f64_to_i32_truncating(f64::NAN, "bad").is_err());
/// assert!(f64_to_i32_truncating(3e9, "bad").is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_truncating<E>(value: f64, error: E) -> Result<i32, E> {
    let truncated = value.trunc();
    if truncated.is_nan() || truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return Err(error);
    }
    Ok(truncated as i32)
}

/// Converts a `usize` to `i32` if it fits.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `i32::MAX`.
///
/// ## Example
/// ```
/// use trio::util::num::usize_to_i32_checked;
///
/// assert_eq!(usize_to_i32_checked(42, ()), Ok(42));
/// assert!(usize_to_i32_checked(usize::MAX, ()).is_err());
/// ```
pub fn usize_to_i32_checked<E>(value: usize, error: E) -> Result<i32, E> {
    i32::try_from(value).map_err(|_| error)
}

/// Converts a script index into a position within a list of length `len`.
///
/// ## Returns
/// - `Some(usize)`: If `0 <= index < len`.
/// - `None`: Otherwise.
///
/// ## Example
/// ```
/// use trio::util::num::list_index;
///
/// assert_eq!(list_index(1, 3), Some(1));
/// assert_eq!(list_index(3, 3), None);
/// assert_eq!(list_index(-1, 3), None);
/// ```
#[must_use]
pub fn list_index(index: i32, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}
