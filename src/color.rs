//! Raw channel data and clear-relative RGB conversion.

/// One atomic read of the four photodiode channels.
///
/// The clear channel measures unfiltered light intensity and acts as the
/// normalization reference for the three filtered channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RawRgbc {
    /// Red channel count
    pub red: u16,
    /// Green channel count
    pub green: u16,
    /// Blue channel count
    pub blue: u16,
    /// Clear (unfiltered) channel count
    pub clear: u16,
}

impl RawRgbc {
    /// Normalize the raw counts into a clear-relative 8-bit RGB color.
    ///
    /// Each filtered channel is scaled by `round(raw / clear * 255)` and
    /// clamped into `[0, 255]`. Rounding is half-away-from-zero. Returns
    /// `None` when the clear channel is zero, since the normalization is
    /// undefined in that case.
    pub fn to_color(self) -> Option<Color> {
        if self.clear == 0 {
            return None;
        }
        Some(Color::rgb(
            scale(self.red, self.clear),
            scale(self.green, self.clear),
            scale(self.blue, self.clear),
        ))
    }
}

fn scale(channel: u16, clear: u16) -> u8 {
    let scaled = libm::roundf(channel as f32 / clear as f32 * 255.0);
    if scaled <= 0.0 {
        0
    } else if scaled >= 255.0 {
        255
    } else {
        scaled as u8
    }
}

/// An opaque 8-bit RGB color derived from a raw sample.
///
/// The alpha channel is always fully opaque; the sensor has no notion of
/// transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha component, always `0xFF`
    pub a: u8,
}

impl Color {
    /// Create an opaque color from its red, green and blue components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}
