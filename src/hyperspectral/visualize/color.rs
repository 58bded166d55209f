//! Approximate RGB colour of monochromatic light.

/// RGB in `[0, 1]` for wavelength `l` in nanometres, piecewise quadratic over
/// 400–700 nm and black outside. Green segments overlap at 585–590 nm; the
/// earlier segment takes precedence.
pub fn spectral_color(l: f32) -> [f32; 3] {
    let r = if (400.0..410.0).contains(&l) {
        let t = (l - 400.0) / (410.0 - 400.0);
        0.33 * t - 0.20 * t * t
    } else if (410.0..475.0).contains(&l) {
        let t = (l - 410.0) / (475.0 - 410.0);
        0.14 - 0.13 * t * t
    } else if (545.0..595.0).contains(&l) {
        let t = (l - 545.0) / (595.0 - 545.0);
        1.98 * t - t * t
    } else if (595.0..650.0).contains(&l) {
        let t = (l - 595.0) / (650.0 - 595.0);
        0.98 + 0.06 * t - 0.40 * t * t
    } else if (650.0..700.0).contains(&l) {
        let t = (l - 650.0) / (700.0 - 650.0);
        0.65 - 0.84 * t + 0.20 * t * t
    } else {
        0.0
    };

    let g = if (415.0..475.0).contains(&l) {
        let t = (l - 415.0) / (475.0 - 415.0);
        0.80 * t * t
    } else if (475.0..590.0).contains(&l) {
        let t = (l - 475.0) / (590.0 - 475.0);
        0.8 + 0.76 * t - 0.80 * t * t
    } else if (585.0..639.0).contains(&l) {
        let t = (l - 585.0) / (639.0 - 585.0);
        0.84 - 0.84 * t
    } else {
        0.0
    };

    let b = if (400.0..475.0).contains(&l) {
        let t = (l - 400.0) / (475.0 - 400.0);
        2.20 * t - 1.50 * t * t
    } else if (475.0..560.0).contains(&l) {
        let t = (l - 475.0) / (560.0 - 475.0);
        0.7 - t + 0.30 * t * t
    } else {
        0.0
    };

    [r, g, b]
}
