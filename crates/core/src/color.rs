//! Color codec - packs 8-bit RGB into board cell values and back
//!
//! A board cell stores `(r << 16) | (g << 8) | b`. The value 0 means "empty",
//! so pure black can never be used as a block color.

/// Packed cell value of an empty board cell
pub const EMPTY_CELL: u32 = 0;

/// 8-bit RGB color of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure black packs to the empty-cell value and is not a valid block color
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    pub fn pack(&self) -> u32 {
        pack(self.r, self.g, self.b)
    }

    /// Recover the 8-bit channels of a packed cell value
    pub fn from_packed(value: u32) -> Self {
        Self {
            r: ((value & 0xff_0000) >> 16) as u8,
            g: ((value & 0xff00) >> 8) as u8,
            b: (value & 0xff) as u8,
        }
    }
}

/// Normalized RGBA color, channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

/// Pack three 8-bit channels into a cell value
#[inline]
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Decode a packed cell value into a normalized color with alpha 1.0
///
/// Any value decodes; bits above the low 24 are ignored.
pub fn unpack(value: u32) -> Rgba {
    let c = Rgb8::from_packed(value);
    Rgba {
        r: c.r as f32 / 255.0,
        g: c.g as f32 / 255.0,
        b: c.b as f32 / 255.0,
        a: 1.0,
    }
}
