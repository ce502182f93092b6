//! Per-pixel blend functions.
//!
//! Implements source-over compositing combined with the blend modes of the
//! W3C Compositing and Blending Level 1, the same set a 2D canvas exposes.
//! All maths is done on unpremultiplied channels in `[0, 1]`.

use crate::types::{BlendMode, Colour};

type Rgb = [f32; 3];

/// Composite `source` over `backdrop` with a blend mode and an extra alpha
/// multiplier in `[0, 1]` (the layer opacity).
pub fn blend_pixel(backdrop: Colour, source: Colour, mode: BlendMode, opacity: f32) -> Colour {
    let alpha_s = unit(source.a) * opacity.clamp(0.0, 1.0);
    if alpha_s <= 0.0 {
        return backdrop;
    }

    let alpha_b = unit(backdrop.a);
    let cs = [unit(source.r), unit(source.g), unit(source.b)];
    let cb = [unit(backdrop.r), unit(backdrop.g), unit(backdrop.b)];

    let blended = blend_rgb(mode, cb, cs);

    let alpha_o = alpha_s + alpha_b * (1.0 - alpha_s);
    if alpha_o <= 0.0 {
        return Colour::TRANSPARENT;
    }

    let mut out = [0u8; 3];
    for i in 0..3 {
        // source colour adjusted for the backdrop's coverage
        let mixed = (1.0 - alpha_b) * cs[i] + alpha_b * blended[i];
        let premultiplied = alpha_s * mixed + (1.0 - alpha_s) * alpha_b * cb[i];
        out[i] = channel(premultiplied / alpha_o);
    }

    Colour::new(out[0], out[1], out[2], channel(alpha_o))
}

/// The blend function B(Cb, Cs) for a mode.
pub fn blend_rgb(mode: BlendMode, cb: Rgb, cs: Rgb) -> Rgb {
    match mode {
        BlendMode::Normal => cs,
        BlendMode::Multiply => separable(cb, cs, |b, s| b * s),
        BlendMode::Screen => separable(cb, cs, screen),
        BlendMode::Overlay => separable(cb, cs, |b, s| hard_light(s, b)),
        BlendMode::Darken => separable(cb, cs, f32::min),
        BlendMode::Lighten => separable(cb, cs, f32::max),
        BlendMode::ColourDodge => separable(cb, cs, colour_dodge),
        BlendMode::ColourBurn => separable(cb, cs, colour_burn),
        BlendMode::HardLight => separable(cb, cs, hard_light),
        BlendMode::SoftLight => separable(cb, cs, soft_light),
        BlendMode::Difference => separable(cb, cs, |b, s| (b - s).abs()),
        BlendMode::Exclusion => separable(cb, cs, |b, s| b + s - 2.0 * b * s),
        BlendMode::Hue => set_lum(set_sat(cs, sat(cb)), lum(cb)),
        BlendMode::Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
        BlendMode::Colour => set_lum(cs, lum(cb)),
        BlendMode::Luminosity => set_lum(cb, lum(cs)),
    }
}

fn separable(cb: Rgb, cs: Rgb, f: impl Fn(f32, f32) -> f32) -> Rgb {
    [f(cb[0], cs[0]), f(cb[1], cs[1]), f(cb[2], cs[2])]
}

fn screen(b: f32, s: f32) -> f32 {
    b + s - b * s
}

fn hard_light(b: f32, s: f32) -> f32 {
    if s <= 0.5 {
        b * 2.0 * s
    } else {
        screen(b, 2.0 * s - 1.0)
    }
}

fn colour_dodge(b: f32, s: f32) -> f32 {
    if b <= 0.0 {
        0.0
    } else if s >= 1.0 {
        1.0
    } else {
        (b / (1.0 - s)).min(1.0)
    }
}

fn colour_burn(b: f32, s: f32) -> f32 {
    if b >= 1.0 {
        1.0
    } else if s <= 0.0 {
        0.0
    } else {
        1.0 - ((1.0 - b) / s).min(1.0)
    }
}

fn soft_light(b: f32, s: f32) -> f32 {
    if s <= 0.5 {
        b - (1.0 - 2.0 * s) * b * (1.0 - b)
    } else {
        let d = if b <= 0.25 {
            ((16.0 * b - 12.0) * b + 4.0) * b
        } else {
            b.sqrt()
        };
        b + (2.0 * s - 1.0) * (d - b)
    }
}

fn lum(c: Rgb) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_colour(c: Rgb) -> Rgb {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: Rgb, l: f32) -> Rgb {
    let d = l - lum(c);
    clip_colour([c[0] + d, c[1] + d, c[2] + d])
}

fn sat(c: Rgb) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: Rgb, s: f32) -> Rgb {
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| c[a].total_cmp(&c[b]));
    let [min, mid, max] = order;

    let mut out = [0.0; 3];
    if c[max] > c[min] {
        out[mid] = (c[mid] - c[min]) * s / (c[max] - c[min]);
        out[max] = s;
    }
    out
}

fn unit(value: u8) -> f32 {
    value as f32 / 255.0
}

fn channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
