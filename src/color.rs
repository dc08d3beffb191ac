use plotters::style::RGBColor;

pub const FONT_SIZE: i32 = 16;

/// Named line colors for the scaling curves, one per compared variant.
pub fn get_color_from_label(label: &str) -> RGBColor {
    match label {
        "dark-blue" => RGBColor(31, 119, 180),
        "dark-orange" => RGBColor(255, 127, 14),
        "dark-green" => RGBColor(44, 160, 44),
        "dark-red" => RGBColor(214, 39, 40),
        _ => RGBColor(127, 127, 127),
    }
}

/// Heatmap color ramp: a normalized value in [0, 1] maps from dark blue
/// through magenta to light yellow, out-of-range inputs are clamped.
pub fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);

    // Piecewise-linear ramp over four anchor colors.
    const ANCHORS: [(u8, u8, u8); 4] = [
        (13, 8, 135),
        (156, 23, 158),
        (237, 121, 83),
        (240, 249, 33),
    ];

    let scaled = t * (ANCHORS.len() - 1) as f64;
    let low = (scaled.floor() as usize).min(ANCHORS.len() - 2);
    let frac = scaled - low as f64;

    let (r0, g0, b0) = ANCHORS[low];
    let (r1, g1, b1) = ANCHORS[low + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints_hit_the_anchor_colors() {
        assert_eq!(heat_color(0.0), RGBColor(13, 8, 135));
        assert_eq!(heat_color(1.0), RGBColor(240, 249, 33));
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(heat_color(-1.0), heat_color(0.0));
        assert_eq!(heat_color(2.0), heat_color(1.0));
    }
}
