// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume unit conversion to cubic metres

/// Scale factor from a volume unit label to cubic metres
///
/// Accepts both the superscript and the ASCII spelling (`m³` / `m3`).
/// Returns `None` for labels that are not volume units.
pub fn volume_scale(unit: &str) -> Option<f64> {
    let scale = match unit.trim() {
        "" | "m³" | "m3" | "CUBIC_METRE" => scales::CUBIC_METRE,
        "dm³" | "dm3" => scales::CUBIC_DECIMETRE,
        "l" | "L" | "litre" | "liter" => scales::LITRE,
        "cm³" | "cm3" => scales::CUBIC_CENTIMETRE,
        "mm³" | "mm3" => scales::CUBIC_MILLIMETRE,
        "ft³" | "ft3" | "cubic foot" => scales::CUBIC_FOOT,
        "in³" | "in3" | "cubic inch" => scales::CUBIC_INCH,
        "yd³" | "yd3" | "cubic yard" => scales::CUBIC_YARD,
        _ => return None,
    };
    Some(scale)
}

/// Common volume scales for reference
pub mod scales {
    /// Cubic metres to cubic metres (identity)
    pub const CUBIC_METRE: f64 = 1.0;
    /// Cubic decimetres to cubic metres
    pub const CUBIC_DECIMETRE: f64 = 1e-3;
    /// Litres to cubic metres
    pub const LITRE: f64 = 1e-3;
    /// Cubic centimetres to cubic metres
    pub const CUBIC_CENTIMETRE: f64 = 1e-6;
    /// Cubic millimetres to cubic metres
    pub const CUBIC_MILLIMETRE: f64 = 1e-9;
    /// Cubic feet to cubic metres
    pub const CUBIC_FOOT: f64 = 0.028_316_846_592;
    /// Cubic inches to cubic metres
    pub const CUBIC_INCH: f64 = 0.000_016_387_064;
    /// Cubic yards to cubic metres
    pub const CUBIC_YARD: f64 = 0.764_554_857_984;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_units() {
        assert_relative_eq!(volume_scale("m³").unwrap(), 1.0);
        assert_relative_eq!(volume_scale("m3").unwrap(), 1.0);
        assert_relative_eq!(volume_scale("l").unwrap(), 0.001);
        assert_relative_eq!(volume_scale("mm³").unwrap(), 1e-9);
        assert_relative_eq!(volume_scale(" ft3 ").unwrap(), 0.028_316_846_592);
    }

    #[test]
    fn test_unknown_unit() {
        assert!(volume_scale("m²").is_none());
        assert!(volume_scale("furlong").is_none());
    }
}
