use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

/// Series colour of actual delivery times.
pub const ACTUAL_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Series colour of estimated delivery times.
pub const ESTIMATED_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

/// Control points of the viridis colour map, dark to light.
const VIRIDIS: [(f32, f32, f32); 5] = [
    (0.267, 0.005, 0.329),
    (0.231, 0.322, 0.545),
    (0.129, 0.569, 0.549),
    (0.369, 0.788, 0.384),
    (0.992, 0.906, 0.145),
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` colours evenly spaced along the viridis map.
pub fn viridis_palette(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![viridis(0.0)],
        _ => (0..n).map(|i| viridis(i as f32 / (n - 1) as f32)).collect(),
    }
}

/// Sample the viridis map at `t` in `[0, 1]`, mixing in linear light.
pub fn viridis(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let segments = (VIRIDIS.len() - 1) as f32;
    let pos = t * segments;
    let lower = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = pos - lower as f32;

    let stop = |(r, g, b): (f32, f32, f32)| -> LinSrgb { Srgb::new(r, g, b).into_linear() };
    let mixed: LinSrgb = stop(VIRIDIS[lower]).mix(stop(VIRIDIS[lower + 1]), frac);
    let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Same colour with the given opacity.
pub fn translucent(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
