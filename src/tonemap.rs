use crate::geometry::{Fp, Vec3f};

pub static EXPOSURE: Fp = 0.5;

/// ACES filmic curve fit. Compresses unbounded positive radiance into
/// [0, 1]; the clamp only bites once the rational term overshoots 1.
pub fn aces_film(color: Vec3f) -> Vec3f {
    fn curve(x: Fp) -> Fp {
        let (a, b, c, d, e) = (2.51, 0.03, 2.43, 0.59, 0.14);
        ((x * (a * x + b)) / (x * (c * x + d) + e)).clamp(0.0, 1.0)
    }
    color.map(curve)
}

pub fn linear_to_srgb(color: Vec3f) -> Vec3f {
    fn encode(x: Fp) -> Fp {
        let x = x.clamp(0.0, 1.0);
        if x < 0.0031308 {
            x * 12.92
        } else {
            1.055 * x.powf(1.0 / 2.4) - 0.055
        }
    }
    color.map(encode)
}

pub fn srgb_to_linear(color: Vec3f) -> Vec3f {
    fn decode(x: Fp) -> Fp {
        let x = x.clamp(0.0, 1.0);
        if x < 0.04045 {
            x / 12.92
        } else {
            ((x + 0.055) / 1.055).powf(2.4)
        }
    }
    color.map(decode)
}

/// Linear HDR to display-ready sRGB in [0, 1].
pub fn tone_map(color: Vec3f, exposure: Fp) -> Vec3f {
    linear_to_srgb(aces_film(color * exposure))
}
