//! Random colours painted onto the source element on each pick-up.

use peniko::Color;

/// Generates opaque random colours from a counter-fed integer mixer.
///
/// Works on every platform including WASM; the browser shell seeds it from
/// `Math.random` so each page load gets its own sequence.
#[derive(Debug, Clone)]
pub struct Palette {
    seed: u32,
    counter: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self::seeded(0)
    }
}

impl Palette {
    /// Create a palette with a fixed seed.
    pub fn seeded(seed: u32) -> Self {
        Self { seed, counter: 0 }
    }

    /// Next 24-bit colour value.
    pub fn next_rgb(&mut self) -> u32 {
        self.counter = self.counter.wrapping_add(1);

        // splitmix32-style finalizer
        let mut x = self.seed ^ self.counter.wrapping_mul(0x9E3779B9);
        x ^= x >> 16;
        x = x.wrapping_mul(0x85EBCA6B);
        x ^= x >> 13;
        x = x.wrapping_mul(0xC2B2AE35);
        x ^= x >> 16;
        x & 0x00FF_FFFF
    }

    /// Next opaque colour.
    pub fn next_color(&mut self) -> Color {
        let rgb = self.next_rgb();
        Color::from_rgba8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }
}

/// Format a colour as a 6-digit CSS hex string. Alpha is dropped.
pub fn to_css_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}
