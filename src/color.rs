use std::fmt::Display;

use crate::error::Error;

const EIGHT_TO_SIXTEEN_BIT: u32 = 0x101;
const SIXTEEN_BIT_MAX: u32 = 0xFFFF;

/// Anything that can be written onto a canvas.
///
/// Channels are reported in the 16 bit range `0..=0xFFFF`, which is the scale
/// the luminance weights are defined on.
pub trait Color {
    fn rgba16(&self) -> [u32; 4];

    fn rgb8(&self) -> [u8; 3] {
        let [red, green, blue, _] = self.rgba16();
        [(red >> 8) as u8, (green >> 8) as u8, (blue >> 8) as u8]
    }
}

/// How a source wants its pixels to be interpreted by writers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorModel {
    Rgb,
    Gray,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RGBAColorFormat {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl RGBAColorFormat {
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: u8::MAX,
        }
    }
}

impl Color for RGBAColorFormat {
    fn rgba16(&self) -> [u32; 4] {
        [
            self.red as u32 * EIGHT_TO_SIXTEEN_BIT,
            self.green as u32 * EIGHT_TO_SIXTEEN_BIT,
            self.blue as u32 * EIGHT_TO_SIXTEEN_BIT,
            self.alpha as u32 * EIGHT_TO_SIXTEEN_BIT,
        ]
    }
}

impl Display for RGBAColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrayColorFormat {
    pub luma: u8,
}

impl Color for GrayColorFormat {
    fn rgba16(&self) -> [u32; 4] {
        let luma = self.luma as u32 * EIGHT_TO_SIXTEEN_BIT;
        [luma, luma, luma, SIXTEEN_BIT_MAX]
    }
}

/// A color whose components are bounded by an arbitrary maximum, as found in
/// netpbm files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

impl<T: PartialOrd<T> + Display + Copy> RangeColorFormat<T> {
    pub fn new(max: T, red: T, green: T, blue: T) -> crate::Result<Self> {
        if red > max || green > max || blue > max {
            return Err(Error::ColorValueExceedsMaximum(max.to_string()));
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }
}

impl<T: Default + Copy> RangeColorFormat<T> {
    pub fn black(max: T) -> Self {
        RangeColorFormat {
            max,
            red: T::default(),
            green: T::default(),
            blue: T::default(),
        }
    }
}

impl Color for RangeColorFormat<u16> {
    fn rgba16(&self) -> [u32; 4] {
        let scale = |value: u16| -> u32 {
            if self.max == 0 {
                return 0;
            }
            value as u32 * SIXTEEN_BIT_MAX / self.max as u32
        };
        [
            scale(self.red),
            scale(self.green),
            scale(self.blue),
            SIXTEEN_BIT_MAX,
        ]
    }
}

impl<C: Color> Color for &C {
    fn rgba16(&self) -> [u32; 4] {
        (*self).rgba16()
    }
}

/// BT.601 luma in fixed point with rounding. The weights sum to `1 << 16`, so
/// the shift by 24 maps 16 bit channels back to a byte.
pub fn luminance<C: Color + ?Sized>(color: &C) -> u8 {
    let [red, green, blue, _] = color.rgba16();
    ((19595 * red + 38470 * green + 7471 * blue + (1 << 15)) >> 24) as u8
}
