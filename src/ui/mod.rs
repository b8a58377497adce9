// src/ui/mod.rs
pub mod dashboard;
pub mod force_graph;
pub mod input_panel;
pub mod markdown;

use eframe::egui::Color32;

use crate::model::analysis::parse_hex_rgb;

/// Palette hex string to swatch fill, if it parses.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    parse_hex_rgb(value).map(|[r, g, b]| Color32::from_rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_into_the_swatch_fill() {
        assert_eq!(
            parse_hex_color("#0e7490"),
            Some(Color32::from_rgb(0x0e, 0x74, 0x90))
        );
        assert_eq!(parse_hex_color("not-a-color"), None);
    }
}
