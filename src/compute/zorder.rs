//! Z-order (Morton) keys for latitude/longitude pairs.
//!
//! Each coordinate is quantized to 32 bits over its geographic domain and the
//! two words are bit-interleaved: longitude occupies the even bits, latitude
//! the odd bits. Both steps are monotone in each argument, so for any
//! rectangle every inside point has a key between the keys of the lower-left
//! and upper-right corners:
//!
//! ```text
//! encode(lat_min, lon_min) <= encode(lat, lon) <= encode(lat_max, lon_max)
//! ```
//!
//! The converse does not hold. The curve leaves and re-enters the rectangle,
//! so a key range is a superset of the rectangle and has to be filtered.

use crate::compute::validation::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

pub type ZKey = u64;

const CELLS_PER_AXIS: f64 = 4_294_967_296.0; // 2^32

/// Interleave a latitude/longitude pair into a single orderable key.
///
/// Out-of-domain inputs are clamped to the nearest edge, NaN to the lower
/// edge.
///
/// # Examples
///
/// ```
/// use cityscan::compute::zorder::encode;
///
/// assert_eq!(encode(-90.0, -180.0), 0);
/// assert_eq!(encode(90.0, 180.0), u64::MAX);
/// assert!(encode(10.0, 20.0) <= encode(10.0, 21.0));
/// ```
pub fn encode(latitude: f64, longitude: f64) -> ZKey {
    let lat = quantize(latitude, MIN_LATITUDE, MAX_LATITUDE);
    let lon = quantize(longitude, MIN_LONGITUDE, MAX_LONGITUDE);
    spread(lon) | (spread(lat) << 1)
}

/// Lower-left corner `(latitude, longitude)` of the cell a key designates.
pub fn decode(key: ZKey) -> (f64, f64) {
    let lat = compact(key >> 1);
    let lon = compact(key);
    (
        dequantize(lat, MIN_LATITUDE, MAX_LATITUDE),
        dequantize(lon, MIN_LONGITUDE, MAX_LONGITUDE),
    )
}

/// Width in degrees of one quantization step along each axis:
/// `(latitude, longitude)`.
pub fn cell_size() -> (f64, f64) {
    (
        (MAX_LATITUDE - MIN_LATITUDE) / CELLS_PER_AXIS,
        (MAX_LONGITUDE - MIN_LONGITUDE) / CELLS_PER_AXIS,
    )
}

fn quantize(value: f64, min: f64, max: f64) -> u32 {
    if value.is_nan() || value <= min {
        return 0;
    }
    if value >= max {
        return u32::MAX;
    }
    // `as` saturates, which absorbs rounding right below `max`
    ((value - min) / (max - min) * CELLS_PER_AXIS) as u32
}

fn dequantize(cell: u32, min: f64, max: f64) -> f64 {
    min + f64::from(cell) / CELLS_PER_AXIS * (max - min)
}

/// Spread the 32 bits of `v` over the even bits of a `u64`.
fn spread(v: u32) -> u64 {
    let mut x = u64::from(v);
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Inverse of [`spread`]: gather the even bits of `x`.
fn compact(x: u64) -> u32 {
    let mut x = x & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x as u32
}
