//! Viridis color mapping for the season scale

/// Viridis anchor colors at t = 0, 1/8, ..., 1
const VIRIDIS_ANCHORS: [(u8, u8, u8); 9] = [
    (0x44, 0x01, 0x54),
    (0x47, 0x2c, 0x7a),
    (0x3b, 0x51, 0x8b),
    (0x2c, 0x71, 0x8e),
    (0x21, 0x90, 0x8d),
    (0x27, 0xad, 0x81),
    (0x5c, 0xc8, 0x63),
    (0xaa, 0xdc, 0x32),
    (0xfd, 0xe7, 0x25),
];

/// Number of discrete colors in the palette
pub const PALETTE_SIZE: usize = 256;

/// Viridis colormap - maps value in [0, 1] to RGB
pub fn viridis(t: f64) -> (u8, u8, u8) {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS_ANCHORS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS_ANCHORS.len() - 2);
    let frac = scaled - lo as f64;

    let (a, b) = (VIRIDIS_ANCHORS[lo], VIRIDIS_ANCHORS[lo + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

pub fn hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Maps a continuous value range onto a 256-entry Viridis palette
#[derive(Debug, Clone)]
pub struct LinearColorMapper {
    palette: Vec<String>,
    low: f64,
    high: f64,
}

impl LinearColorMapper {
    pub fn new(low: f64, high: f64) -> Self {
        let palette = (0..PALETTE_SIZE)
            .map(|i| hex(viridis(i as f64 / (PALETTE_SIZE - 1) as f64)))
            .collect();
        Self { palette, low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Color for `value`; values outside [low, high] get the end colors
    pub fn color(&self, value: f64) -> &str {
        let span = self.high - self.low;
        let idx = if span > 0.0 {
            let t = (value - self.low) / span;
            ((t * PALETTE_SIZE as f64).floor().max(0.0) as usize).min(PALETTE_SIZE - 1)
        } else {
            0
        };
        &self.palette[idx]
    }

    /// A handful of evenly spaced palette colors for a CSS gradient
    pub fn gradient_stops(&self, count: usize) -> Vec<String> {
        match count {
            0 => vec![],
            1 => vec![self.palette[0].clone()],
            n => (0..n)
                .map(|i| self.palette[i * (PALETTE_SIZE - 1) / (n - 1)].clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(hex(viridis(0.0)), "#440154");
        assert_eq!(hex(viridis(1.0)), "#fde725");
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn test_mapper_ends_and_clamping() {
        let mapper = LinearColorMapper::new(2001.0, 2024.0);
        assert_eq!(mapper.palette().len(), PALETTE_SIZE);
        assert_eq!(mapper.color(2001.0), "#440154");
        assert_eq!(mapper.color(2024.0), "#fde725");
        assert_eq!(mapper.color(1990.0), mapper.color(2001.0));
        assert_eq!(mapper.color(2030.0), mapper.color(2024.0));
    }

    #[test]
    fn test_mapper_is_monotone_in_palette_index() {
        let mapper = LinearColorMapper::new(0.0, 1.0);
        let idx = |v: f64| mapper.palette().iter().position(|c| c == mapper.color(v)).unwrap();
        assert!(idx(0.2) <= idx(0.5));
        assert!(idx(0.5) <= idx(0.9));
    }

    #[test]
    fn test_degenerate_range() {
        let mapper = LinearColorMapper::new(2016.0, 2016.0);
        assert_eq!(mapper.color(2016.0), "#440154");
    }

    #[test]
    fn test_gradient_stops() {
        let mapper = LinearColorMapper::new(0.0, 1.0);
        let stops = mapper.gradient_stops(5);
        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0], "#440154");
        assert_eq!(stops[4], "#fde725");
        assert!(mapper.gradient_stops(0).is_empty());
    }
}
