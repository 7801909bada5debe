//! Borrowed views over caller-owned pixel memory.
//!
//! Every view is validated when it is created so that walking `height` rows by `stride` bytes
//! never leaves the underlying slice. The blenders then work on plain row slices.

use crate::error::{Error, Result};
use crate::format::ColorFormat;

/// Checks that `len` bytes can hold `height` rows of `width` pixels spaced `stride` bytes apart.
fn validate(format: ColorFormat, len: usize, width: u32, height: u32, stride: usize) -> Result<()> {
    let row_bytes = format.row_bytes(width);
    if stride < row_bytes {
        return Err(Error::InvalidStride {
            format,
            stride,
            row_bytes,
        });
    }

    if width == 0 || height == 0 {
        return Ok(());
    }

    let required = (height as usize - 1) * stride + row_bytes;
    if len < required {
        return Err(Error::IncompatibleBufferData {
            width,
            height,
            required,
            received: len,
        });
    }

    Ok(())
}

/// Byte offset of pixel `(x, y)`. I1 offsets must be byte aligned.
fn offset_of(format: ColorFormat, stride: usize, x: u32, y: u32) -> Result<usize> {
    if format == ColorFormat::I1 && x % 8 != 0 {
        return Err(Error::MisalignedRegion { x });
    }

    Ok(y as usize * stride + format.row_bytes(x))
}

/// Yields `height` rows of `row_bytes` bytes, `stride` bytes apart.
fn rows(data: &[u8], height: u32, stride: usize, row_bytes: usize) -> impl Iterator<Item = &[u8]> {
    debug_assert!(stride >= row_bytes && stride > 0);
    data.chunks(stride)
        .take(height as usize)
        .map(move |row| &row[..row_bytes])
}

/// A mutable view into the pixel memory a blend writes to.
#[derive(Debug)]
pub struct DestBuffer<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
    format: ColorFormat,
}

impl<'a> DestBuffer<'a> {
    /// Creates a view of `height` rows of `width` pixels, each row starting `stride` bytes after
    /// the previous one.
    ///
    /// Zero dimensions are accepted: blending into such a buffer does nothing.
    ///
    /// # Errors
    /// * `stride` is smaller than one row of pixels.
    /// * `data` is too short to hold every row.
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: ColorFormat,
    ) -> Result<Self> {
        validate(format, data.len(), width, height, stride)?;

        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Creates a view over tightly packed rows, without padding.
    ///
    /// # Errors
    /// * `data` is too short to hold every row.
    pub fn packed(data: &'a mut [u8], width: u32, height: u32, format: ColorFormat) -> Result<Self> {
        let stride = format.row_bytes(width);
        Self::new(data, width, height, stride, format)
    }

    /// Reborrows a `width`x`height` region starting at pixel `(x, y)`.
    ///
    /// # Errors
    /// * The region does not lie inside this buffer.
    /// * `x` is not a multiple of 8 in a [`ColorFormat::I1`] buffer.
    pub fn region(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<DestBuffer<'_>> {
        let inside = x.checked_add(width).map_or(false, |right| right <= self.width)
            && y.checked_add(height).map_or(false, |bottom| bottom <= self.height);
        if !inside {
            return Err(Error::RegionOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        let offset = offset_of(self.format, self.stride, x, y)?;
        let data = self.data.get_mut(offset..).unwrap_or_default();

        DestBuffer::new(data, width, height, self.stride, self.format)
    }

    /// Returns the width of the blended area, in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the blended area, in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the amount of bytes between the starts of two rows.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the pixel format of the buffer.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> ColorFormat {
        self.format
    }

    /// Returns true if the view covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the bytes of a single row of the view, without padding.
    #[inline]
    #[must_use]
    pub const fn row_bytes(&self) -> usize {
        self.format.row_bytes(self.width)
    }

    /// Returns an iterator over the rows of the view, each trimmed to [`Self::row_bytes`].
    ///
    /// Must not be called on an empty view.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let row_bytes = self.row_bytes();
        debug_assert!(self.stride >= row_bytes && self.stride > 0);

        self.data
            .chunks_mut(self.stride)
            .take(self.height as usize)
            .map(move |row| &mut row[..row_bytes])
    }
}

/// A read-only view of the pixels an image blend reads from.
#[derive(Copy, Clone, Debug)]
pub struct SourceBuffer<'a> {
    data: &'a [u8],
    stride: usize,
    format: ColorFormat,
}

impl<'a> SourceBuffer<'a> {
    /// Creates a source view. Its extent is checked against the destination once it is attached
    /// to an [`ImageDescriptor`](crate::ImageDescriptor).
    #[must_use]
    pub const fn new(data: &'a [u8], stride: usize, format: ColorFormat) -> Self {
        Self {
            data,
            stride,
            format,
        }
    }

    /// Returns the view moved to start at pixel `(x, y)`.
    ///
    /// # Errors
    /// * The offset lies past the end of the data.
    /// * `x` is not a multiple of 8 in a [`ColorFormat::I1`] buffer.
    pub fn offset(self, x: u32, y: u32) -> Result<Self> {
        let offset = offset_of(self.format, self.stride, x, y)?;
        let data = self.data.get(offset..).ok_or(Error::RegionOutOfBounds {
            x,
            y,
            width: 0,
            height: 0,
        })?;

        Ok(Self { data, ..self })
    }

    /// Returns the amount of bytes between the starts of two rows.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the pixel format of the source.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> ColorFormat {
        self.format
    }

    pub(crate) fn validate(&self, width: u32, height: u32) -> Result<()> {
        validate(self.format, self.data.len(), width, height, self.stride)
    }

    /// Rows covering `width` pixels. Must have been validated against these dimensions.
    pub(crate) fn rows(&self, width: u32, height: u32) -> impl Iterator<Item = &'a [u8]> {
        rows(self.data, height, self.stride, self.format.row_bytes(width))
    }
}

/// A read-only view of per-pixel coverage bytes, such as an anti-aliasing or clipping mask.
#[derive(Copy, Clone, Debug)]
pub struct Mask<'a> {
    data: &'a [u8],
    stride: usize,
}

impl<'a> Mask<'a> {
    /// Creates a mask whose rows are `stride` bytes apart.
    #[must_use]
    pub const fn new(data: &'a [u8], stride: usize) -> Self {
        Self { data, stride }
    }

    /// Returns the amount of bytes between the starts of two rows.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    pub(crate) fn validate(&self, width: u32, height: u32) -> Result<()> {
        validate(ColorFormat::A8, self.data.len(), width, height, self.stride)
    }

    pub(crate) fn rows(&self, width: u32, height: u32) -> impl Iterator<Item = &'a [u8]> {
        rows(self.data, height, self.stride, width as usize)
    }
}
