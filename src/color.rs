// Simple color struct, created from an unsigned 32 representing RRGGBB.
// Alpha is decided at draw time (twinkle and line fade), so it is not stored.
// Carrying channels as numbers replaces the hex-string surgery the old JS
// did to build rgba() line colors.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b }
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles. Alpha is
    /// clamped to [0, 1].
    pub fn to_css(&self, alpha: f64) -> String {
        let alpha = alpha.max(0.0).min(1.0);
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

// Neuro palette: cyan, purple, blue
pub const PALETTE: [Color; 3] = [
    Color {
        r: 0x00,
        g: 0xe5,
        b: 0xff,
    },
    Color {
        r: 0xbd,
        g: 0x00,
        b: 0xff,
    },
    Color {
        r: 0x30,
        g: 0x8c,
        b: 0xe8,
    },
];

// White spark used for click bursts
pub const SPARK: Color = Color {
    r: 0xff,
    g: 0xff,
    b: 0xff,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u32_unpacks_channels() {
        let c = Color::from_u32(0x00e5ff);
        assert_eq!(c, PALETTE[0]);
    }

    #[test]
    fn to_css_clamps_alpha() {
        let c = Color::from_u32(0xbd00ff);
        assert_eq!(c.to_css(0.5), "rgba(189,0,255,0.5)");
        assert_eq!(c.to_css(-2.0), "rgba(189,0,255,0)");
        assert_eq!(c.to_css(7.0), "rgba(189,0,255,1)");
    }
}
