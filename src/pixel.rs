//! Pixel types and the per-format channel pack/unpack rules.

use crate::format::ColorFormat;
use crate::mix::{mix_channel, mix_over_alpha, mix_rgb, OPA_COVER, OPA_TRANSP};
use std::fmt;

/// Represents a pixel of a color format, read from and written to raw rows of a buffer.
///
/// Every format with color (or luminance) implements this trait. [`ColorFormat::A8`] has no
/// pixel type: coverage canvases are worked on as plain bytes.
pub trait Pixel: Copy + Clone + Default + PartialEq + Eq + fmt::Debug {
    /// The buffer format this pixel type is stored in.
    const FORMAT: ColorFormat;

    /// Reads the pixel at column `x` of `row`.
    ///
    /// # Panics
    /// * `row` is too short to hold column `x`.
    fn read_at(row: &[u8], x: usize) -> Self;

    /// Writes the pixel into column `x` of `row`, leaving every other pixel untouched.
    ///
    /// # Panics
    /// * `row` is too short to hold column `x`.
    fn write_at(self, row: &mut [u8], x: usize);

    /// Returns the alpha, or opacity level of the pixel.
    ///
    /// Formats without an alpha channel are always fully opaque (255).
    fn alpha(&self) -> u8 {
        OPA_COVER
    }

    /// Returns the color of the pixel, ignoring alpha.
    fn to_rgb(self) -> Rgb;

    /// Encodes a color into this format. Formats with alpha become fully opaque.
    fn from_rgb(rgb: Rgb) -> Self;

    /// Returns this pixel with `src` composited over it using the src-over law and the given
    /// effective alpha.
    fn blend(self, src: Rgb, alpha: u8) -> Self {
        match alpha {
            OPA_TRANSP => self,
            OPA_COVER => Self::from_rgb(src),
            _ => Self::from_rgb(mix_rgb(src, self.to_rgb(), alpha)),
        }
    }
}

/// Represents an RGB color. This is also the pixel type of [`ColorFormat::Rgb888`] buffers,
/// which store it as `[b, g, r]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// The red component of the pixel.
    pub r: u8,
    /// The green component of the pixel.
    pub g: u8,
    /// The blue component of the pixel.
    pub b: u8,
}

impl Rgb {
    /// Creates a new RGB pixel.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a completely black pixel.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Creates a completely white pixel.
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Creates a gray pixel with all channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// The perceived brightness of the color, `(r*77 + g*150 + b*29) >> 8`.
    #[inline]
    pub const fn luminance(&self) -> u8 {
        ((self.r as u16 * 77 + self.g as u16 * 150 + self.b as u16 * 29) >> 8) as u8
    }
}

impl Pixel for Rgb {
    const FORMAT: ColorFormat = ColorFormat::Rgb888;

    #[inline]
    fn read_at(row: &[u8], x: usize) -> Self {
        let px = &row[x * 3..x * 3 + 3];

        Self::new(px[2], px[1], px[0])
    }

    #[inline]
    fn write_at(self, row: &mut [u8], x: usize) {
        row[x * 3..x * 3 + 3].copy_from_slice(&[self.b, self.g, self.r]);
    }

    fn to_rgb(self) -> Rgb {
        self
    }

    fn from_rgb(rgb: Rgb) -> Self {
        rgb
    }
}

/// Represents an L, or luminance pixel of a [`ColorFormat::L8`] buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct L(
    /// The luminance value of the pixel, between 0 and 255.
    pub u8,
);

impl Pixel for L {
    const FORMAT: ColorFormat = ColorFormat::L8;

    #[inline]
    fn read_at(row: &[u8], x: usize) -> Self {
        Self(row[x])
    }

    #[inline]
    fn write_at(self, row: &mut [u8], x: usize) {
        row[x] = self.0;
    }

    fn to_rgb(self) -> Rgb {
        Rgb::gray(self.0)
    }

    fn from_rgb(rgb: Rgb) -> Self {
        Self(rgb.luminance())
    }

    #[inline]
    fn blend(self, src: Rgb, alpha: u8) -> Self {
        Self(mix_channel(src.luminance(), self.0, alpha))
    }
}

/// Represents a luminance pixel with alpha, stored as `[l, a]` in [`ColorFormat::Al88`] buffers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct La {
    /// The luminance of the pixel.
    pub l: u8,
    /// The alpha of the pixel.
    pub a: u8,
}

impl La {
    /// Creates a new luminance-alpha pixel.
    pub const fn new(l: u8, a: u8) -> Self {
        Self { l, a }
    }
}

impl Pixel for La {
    const FORMAT: ColorFormat = ColorFormat::Al88;

    #[inline]
    fn read_at(row: &[u8], x: usize) -> Self {
        Self::new(row[x * 2], row[x * 2 + 1])
    }

    #[inline]
    fn write_at(self, row: &mut [u8], x: usize) {
        row[x * 2] = self.l;
        row[x * 2 + 1] = self.a;
    }

    fn alpha(&self) -> u8 {
        self.a
    }

    fn to_rgb(self) -> Rgb {
        Rgb::gray(self.l)
    }

    fn from_rgb(rgb: Rgb) -> Self {
        Self::new(rgb.luminance(), OPA_COVER)
    }

    fn blend(self, src: Rgb, alpha: u8) -> Self {
        let ([l], a) = mix_over_alpha([src.luminance()], [self.l], self.a, alpha);

        Self::new(l, a)
    }
}

/// Represents a 16-bit packed 5-6-5 pixel of a [`ColorFormat::Rgb565`] buffer, stored
/// little-endian.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(
    /// The packed value: red in the top 5 bits, green in the middle 6, blue in the low 5.
    pub u16,
);

impl Rgb565 {
    /// Packs 8-bit channels by dropping their low bits.
    pub const fn pack(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    /// Returns the 5-bit red channel.
    pub const fn red(&self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Returns the 6-bit green channel.
    pub const fn green(&self) -> u8 {
        ((self.0 >> 5) & 0x3f) as u8
    }

    /// Returns the 5-bit blue channel.
    pub const fn blue(&self) -> u8 {
        (self.0 & 0x1f) as u8
    }
}

impl Pixel for Rgb565 {
    const FORMAT: ColorFormat = ColorFormat::Rgb565;

    #[inline]
    fn read_at(row: &[u8], x: usize) -> Self {
        Self(u16::from_le_bytes([row[x * 2], row[x * 2 + 1]]))
    }

    #[inline]
    fn write_at(self, row: &mut [u8], x: usize) {
        row[x * 2..x * 2 + 2].copy_from_slice(&self.0.to_le_bytes());
    }

    /// Expands the channels to 8 bits by replicating their high bits.
    fn to_rgb(self) -> Rgb {
        let (r, g, b) = (self.red(), self.green(), self.blue());

        Rgb::new((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    fn from_rgb(Rgb { r, g, b }: Rgb) -> Self {
        Self::pack(r, g, b)
    }
}

/// Represents a pixel of a [`ColorFormat::Xrgb8888`] buffer, stored as `[b, g, r, x]`.
///
/// The `x` byte carries no meaning. It is ignored when read and written as `0xff`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Xrgb(pub Rgb);

impl Pixel for Xrgb {
    const FORMAT: ColorFormat = ColorFormat::Xrgb8888;

    #[inline]
    fn read_at(row: &[u8], x: usize) -> Self {
        let px = &row[x * 4..x * 4 + 4];

        Self(Rgb::new(px[2], px[1], px[0]))
    }

    #[inline]
    fn write_at(self, row: &mut [u8], x: usize) {
        let Rgb { r, g, b } = self.0;
        row[x * 4..x * 4 + 4].copy_from_slice(&[b, g, r, 0xff]);
    }

    fn to_rgb(self) -> Rgb {
        self.0
    }

    fn from_rgb(rgb: Rgb) -> Self {
        Self(rgb)
    }
}

/// Represents an RGBA pixel of a [`ColorFormat::Argb8888`] buffer, stored as `[b, g, r, a]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// The red component of the pixel.
    pub r: u8,
    /// The green component of the pixel.
    pub g: u8,
    /// The blue component of the pixel.
    pub b: u8,
    /// The alpha component of the pixel.
    pub a: u8,
}

impl Rgba {
    /// Creates a new RGBA pixel.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel from an RGB pixel.
    pub const fn from_rgb_opaque(Rgb { r, g, b }: Rgb) -> Self {
        Self::new(r, g, b, OPA_COVER)
    }

    /// Creates a completely transparent pixel.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl Pixel for Rgba {
    const FORMAT: ColorFormat = ColorFormat::Argb8888;

    #[inline]
    fn read_at(row: &[u8], x: usize) -> Self {
        let px = &row[x * 4..x * 4 + 4];

        Self::new(px[2], px[1], px[0], px[3])
    }

    #[inline]
    fn write_at(self, row: &mut [u8], x: usize) {
        row[x * 4..x * 4 + 4].copy_from_slice(&[self.b, self.g, self.r, self.a]);
    }

    fn alpha(&self) -> u8 {
        self.a
    }

    fn to_rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    fn from_rgb(rgb: Rgb) -> Self {
        Self::from_rgb_opaque(rgb)
    }

    fn blend(self, src: Rgb, alpha: u8) -> Self {
        let ([r, g, b], a) =
            mix_over_alpha([src.r, src.g, src.b], [self.r, self.g, self.b], self.a, alpha);

        Self::new(r, g, b, a)
    }
}

/// Represents a single-bit pixel of a [`ColorFormat::I1`] buffer: either on (white) or off
/// (black).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitPixel(
    /// Whether the pixel is on.
    pub bool,
);

impl BitPixel {
    /// Returns a new `BitPixel` with the given value.
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// Returns the value of the pixel.
    pub const fn value(&self) -> bool {
        self.0
    }

    /// Returns the luminance this pixel displays as, `0` or `255`.
    pub const fn luminance(&self) -> u8 {
        if self.0 {
            255
        } else {
            0
        }
    }

    /// Returns whether the bit at `index` is set, MSB-first.
    #[inline]
    pub fn get_bit(row: &[u8], index: usize) -> bool {
        (row[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// Sets or clears the bit at `index`, MSB-first.
    #[inline]
    pub fn set_bit(row: &mut [u8], index: usize, value: bool) {
        let bit = 0x80 >> (index % 8);
        if value {
            row[index / 8] |= bit;
        } else {
            row[index / 8] &= !bit;
        }
    }
}

impl Pixel for BitPixel {
    const FORMAT: ColorFormat = ColorFormat::I1;

    #[inline]
    fn read_at(row: &[u8], x: usize) -> Self {
        Self(Self::get_bit(row, x))
    }

    #[inline]
    fn write_at(self, row: &mut [u8], x: usize) {
        Self::set_bit(row, x, self.0);
    }

    fn to_rgb(self) -> Rgb {
        Rgb::gray(self.luminance())
    }

    fn from_rgb(rgb: Rgb) -> Self {
        Self(rgb.luminance() > 127)
    }

    fn blend(self, src: Rgb, alpha: u8) -> Self {
        let L(luminance) = L(self.luminance()).blend(src, alpha);

        Self(luminance > 127)
    }
}

impl From<Rgb> for L {
    fn from(rgb: Rgb) -> Self {
        Self(rgb.luminance())
    }
}

impl From<L> for Rgb {
    fn from(L(l): L) -> Self {
        Self::gray(l)
    }
}

impl From<Rgb> for BitPixel {
    fn from(rgb: Rgb) -> Self {
        <Self as Pixel>::from_rgb(rgb)
    }
}

impl From<Rgba> for Rgb {
    fn from(Rgba { r, g, b, .. }: Rgba) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_opaque(rgb)
    }
}
