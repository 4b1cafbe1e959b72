use image::Rgb;
use rand::Rng;

/// Viridis sampled at nine evenly spaced stops.
const VIRIDIS: [[f64; 3]; 9] = [
    [68.0, 1.0, 84.0],
    [71.0, 44.0, 122.0],
    [59.0, 81.0, 139.0],
    [44.0, 113.0, 142.0],
    [33.0, 144.0, 141.0],
    [39.0, 173.0, 129.0],
    [92.0, 200.0, 99.0],
    [170.0, 220.0, 50.0],
    [253.0, 231.0, 37.0],
];

/// Colour at `t` in `[0, 1]`, linearly interpolated between stops.
pub fn viridis(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let lower = t.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = t - lower as f64;

    let mut rgb = [0u8; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        let a = VIRIDIS[lower][channel];
        let b = VIRIDIS[upper][channel];
        *value = (a + (b - a) * frac).round() as u8;
    }
    Rgb(rgb)
}

pub fn random_color<R: Rng>(rng: &mut R) -> Rgb<u8> {
    viridis(rng.gen::<f64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(viridis(0.0), Rgb([68, 1, 84]));
        assert_eq!(viridis(1.0), Rgb([253, 231, 37]));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn test_midpoint_between_stops() {
        // Halfway between the first two stops.
        assert_eq!(viridis(0.0625), Rgb([70, 23, 103]));
    }
}
