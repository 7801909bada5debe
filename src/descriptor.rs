//! Descriptors fully specifying one blend operation.
//!
//! A descriptor is built by the caller right before a blend call, consumed synchronously and
//! dropped afterwards. Only the destination pixels inside the declared rectangle are mutated.

use crate::buffer::{DestBuffer, Mask, SourceBuffer};
use crate::error::Result;
use crate::mix::{BlendMode, OPA_COVER};
use crate::pixel::Rgb;

/// Which of the four blending branches a call takes, decided once per call from whether a mask is
/// present and whether the opacity is full.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlendCase {
    /// No mask, full opacity.
    Plain,
    /// No mask, opacity below 255.
    OpacityOnly,
    /// Mask present, full opacity.
    MaskOnly,
    /// Mask present, opacity below 255.
    MaskAndOpacity,
}

impl BlendCase {
    /// Classifies a call.
    #[inline]
    #[must_use]
    pub const fn classify(has_mask: bool, opacity: u8) -> Self {
        match (has_mask, opacity == OPA_COVER) {
            (false, true) => Self::Plain,
            (false, false) => Self::OpacityOnly,
            (true, true) => Self::MaskOnly,
            (true, false) => Self::MaskAndOpacity,
        }
    }
}

/// Describes filling a rectangle of the destination with a single color.
#[derive(Debug)]
pub struct FillDescriptor<'a> {
    pub(crate) dest: DestBuffer<'a>,
    pub(crate) color: Rgb,
    pub(crate) opacity: u8,
    pub(crate) mask: Option<Mask<'a>>,
}

impl<'a> FillDescriptor<'a> {
    /// Creates a fully opaque, unmasked fill of the whole destination.
    ///
    /// The color is encoded into the destination's native format when blending. Coverage
    /// canvases ignore the color and record full coverage.
    #[must_use]
    pub fn new(dest: DestBuffer<'a>, color: Rgb) -> Self {
        Self {
            dest,
            color,
            opacity: OPA_COVER,
            mask: None,
        }
    }

    /// Sets the opacity of the fill, 0 being fully transparent and 255 fully opaque.
    #[must_use]
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    /// Attaches a coverage mask. The mask must cover the whole destination rectangle.
    ///
    /// # Errors
    /// * The mask stride is smaller than the destination width.
    /// * The mask data is too short to cover every destination row.
    pub fn with_mask(mut self, mask: Mask<'a>) -> Result<Self> {
        mask.validate(self.dest.width(), self.dest.height())?;
        self.mask = Some(mask);
        Ok(self)
    }

    /// Returns the destination view.
    #[must_use]
    pub const fn dest(&self) -> &DestBuffer<'a> {
        &self.dest
    }

    /// Returns the fill color.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Returns the opacity of the fill.
    #[must_use]
    pub const fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Returns the mask, if one is attached.
    #[must_use]
    pub const fn mask(&self) -> Option<&Mask<'a>> {
        self.mask.as_ref()
    }

    /// Returns which branch a blend of this descriptor takes.
    #[must_use]
    pub const fn case(&self) -> BlendCase {
        BlendCase::classify(self.mask.is_some(), self.opacity)
    }

    /// Splits the descriptor into the destination and mask rows it blends.
    pub(crate) fn parts(&mut self) -> (&mut DestBuffer<'a>, Option<Mask<'a>>) {
        (&mut self.dest, self.mask)
    }
}

/// Describes compositing a source pixel buffer into a rectangle of the destination.
#[derive(Debug)]
pub struct ImageDescriptor<'a> {
    pub(crate) dest: DestBuffer<'a>,
    pub(crate) source: SourceBuffer<'a>,
    pub(crate) opacity: u8,
    pub(crate) mask: Option<Mask<'a>>,
    pub(crate) mode: BlendMode,
}

impl<'a> ImageDescriptor<'a> {
    /// Creates a fully opaque, unmasked image blend in [`BlendMode::Normal`].
    ///
    /// # Errors
    /// * The source stride is smaller than one row of the destination width.
    /// * The source data is too short to cover every destination row.
    pub fn new(dest: DestBuffer<'a>, source: SourceBuffer<'a>) -> Result<Self> {
        source.validate(dest.width(), dest.height())?;

        Ok(Self {
            dest,
            source,
            opacity: OPA_COVER,
            mask: None,
            mode: BlendMode::Normal,
        })
    }

    /// Sets the opacity of the image, 0 being fully transparent and 255 fully opaque.
    #[must_use]
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    /// Attaches a coverage mask. The mask must cover the whole destination rectangle.
    ///
    /// # Errors
    /// * The mask stride is smaller than the destination width.
    /// * The mask data is too short to cover every destination row.
    pub fn with_mask(mut self, mask: Mask<'a>) -> Result<Self> {
        mask.validate(self.dest.width(), self.dest.height())?;
        self.mask = Some(mask);
        Ok(self)
    }

    /// Sets how source colors are combined with the destination colors.
    #[must_use]
    pub fn with_mode(mut self, mode: BlendMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the destination view.
    #[must_use]
    pub const fn dest(&self) -> &DestBuffer<'a> {
        &self.dest
    }

    /// Returns the source view.
    #[must_use]
    pub const fn source(&self) -> &SourceBuffer<'a> {
        &self.source
    }

    /// Returns the opacity of the image.
    #[must_use]
    pub const fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Returns the mask, if one is attached.
    #[must_use]
    pub const fn mask(&self) -> Option<&Mask<'a>> {
        self.mask.as_ref()
    }

    /// Returns the blend mode.
    #[must_use]
    pub const fn mode(&self) -> BlendMode {
        self.mode
    }

    /// Returns which branch a blend of this descriptor takes.
    #[must_use]
    pub const fn case(&self) -> BlendCase {
        BlendCase::classify(self.mask.is_some(), self.opacity)
    }
}
