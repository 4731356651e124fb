//! Nearest-color classification against a fixed reference table.
//!
//! [`NAMED_COLORS`] carries the 140 CSS/X11 named colors in alphabetical
//! order, which fixes both the tie-break order and the exact reference
//! values as part of the crate contract. `Transparent` is left out on
//! purpose: sensor output is always opaque and its RGB value duplicates
//! `White`.

use crate::color::Color;

/// An immutable, non-empty mapping from color name to reference color.
///
/// Entry order is the tie-break order for [`ColorTable::classify`].
#[derive(Debug, Clone, Copy)]
pub struct ColorTable<'a> {
    entries: &'a [(&'a str, Color)],
}

impl<'a> ColorTable<'a> {
    /// Build a table from a slice of `(name, reference color)` entries.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is empty. An empty table is a programming error:
    /// classification would have no fallback to return.
    pub const fn new(entries: &'a [(&'a str, Color)]) -> Self {
        assert!(
            !entries.is_empty(),
            "color table must contain at least one entry"
        );
        Self { entries }
    }

    /// Number of entries in the table.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Name the table entry closest to `color`.
    ///
    /// Returns immediately on the first exact component-wise match.
    /// Otherwise the entry minimizing the truncated Euclidean distance
    /// `trunc(sqrt(dr^2 + dg^2 + db^2))` wins; the comparison is strict, so
    /// ties go to the first-encountered entry in table order. Alpha is
    /// ignored.
    pub fn classify(&self, color: Color) -> &'a str {
        let mut best_name = self.entries[0].0;
        let mut best_dist = u32::MAX;
        for &(name, reference) in self.entries {
            if reference.r == color.r && reference.g == color.g && reference.b == color.b {
                return name;
            }
            let dist = distance(reference, color);
            if dist < best_dist {
                best_dist = dist;
                best_name = name;
            }
        }
        best_name
    }
}

impl ColorTable<'static> {
    /// The built-in [`NAMED_COLORS`] reference table.
    pub const fn named() -> Self {
        Self {
            entries: NAMED_COLORS,
        }
    }
}

/// Euclidean distance in RGB space, truncated to an integer.
fn distance(a: Color, b: Color) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    let squared = (dr * dr + dg * dg + db * db) as f32;
    libm::sqrtf(squared) as u32
}

/// The 140 CSS/X11 named colors, alphabetical by name.
pub const NAMED_COLORS: &[(&str, Color)] = &[
    ("AliceBlue", Color::rgb(240, 248, 255)),
    ("AntiqueWhite", Color::rgb(250, 235, 215)),
    ("Aqua", Color::rgb(0, 255, 255)),
    ("Aquamarine", Color::rgb(127, 255, 212)),
    ("Azure", Color::rgb(240, 255, 255)),
    ("Beige", Color::rgb(245, 245, 220)),
    ("Bisque", Color::rgb(255, 228, 196)),
    ("Black", Color::rgb(0, 0, 0)),
    ("BlanchedAlmond", Color::rgb(255, 235, 205)),
    ("Blue", Color::rgb(0, 0, 255)),
    ("BlueViolet", Color::rgb(138, 43, 226)),
    ("Brown", Color::rgb(165, 42, 42)),
    ("BurlyWood", Color::rgb(222, 184, 135)),
    ("CadetBlue", Color::rgb(95, 158, 160)),
    ("Chartreuse", Color::rgb(127, 255, 0)),
    ("Chocolate", Color::rgb(210, 105, 30)),
    ("Coral", Color::rgb(255, 127, 80)),
    ("CornflowerBlue", Color::rgb(100, 149, 237)),
    ("Cornsilk", Color::rgb(255, 248, 220)),
    ("Crimson", Color::rgb(220, 20, 60)),
    ("Cyan", Color::rgb(0, 255, 255)),
    ("DarkBlue", Color::rgb(0, 0, 139)),
    ("DarkCyan", Color::rgb(0, 139, 139)),
    ("DarkGoldenrod", Color::rgb(184, 134, 11)),
    ("DarkGray", Color::rgb(169, 169, 169)),
    ("DarkGreen", Color::rgb(0, 100, 0)),
    ("DarkKhaki", Color::rgb(189, 183, 107)),
    ("DarkMagenta", Color::rgb(139, 0, 139)),
    ("DarkOliveGreen", Color::rgb(85, 107, 47)),
    ("DarkOrange", Color::rgb(255, 140, 0)),
    ("DarkOrchid", Color::rgb(153, 50, 204)),
    ("DarkRed", Color::rgb(139, 0, 0)),
    ("DarkSalmon", Color::rgb(233, 150, 122)),
    ("DarkSeaGreen", Color::rgb(143, 188, 143)),
    ("DarkSlateBlue", Color::rgb(72, 61, 139)),
    ("DarkSlateGray", Color::rgb(47, 79, 79)),
    ("DarkTurquoise", Color::rgb(0, 206, 209)),
    ("DarkViolet", Color::rgb(148, 0, 211)),
    ("DeepPink", Color::rgb(255, 20, 147)),
    ("DeepSkyBlue", Color::rgb(0, 191, 255)),
    ("DimGray", Color::rgb(105, 105, 105)),
    ("DodgerBlue", Color::rgb(30, 144, 255)),
    ("Firebrick", Color::rgb(178, 34, 34)),
    ("FloralWhite", Color::rgb(255, 250, 240)),
    ("ForestGreen", Color::rgb(34, 139, 34)),
    ("Fuchsia", Color::rgb(255, 0, 255)),
    ("Gainsboro", Color::rgb(220, 220, 220)),
    ("GhostWhite", Color::rgb(248, 248, 255)),
    ("Gold", Color::rgb(255, 215, 0)),
    ("Goldenrod", Color::rgb(218, 165, 32)),
    ("Gray", Color::rgb(128, 128, 128)),
    ("Green", Color::rgb(0, 128, 0)),
    ("GreenYellow", Color::rgb(173, 255, 47)),
    ("Honeydew", Color::rgb(240, 255, 240)),
    ("HotPink", Color::rgb(255, 105, 180)),
    ("IndianRed", Color::rgb(205, 92, 92)),
    ("Indigo", Color::rgb(75, 0, 130)),
    ("Ivory", Color::rgb(255, 255, 240)),
    ("Khaki", Color::rgb(240, 230, 140)),
    ("Lavender", Color::rgb(230, 230, 250)),
    ("LavenderBlush", Color::rgb(255, 240, 245)),
    ("LawnGreen", Color::rgb(124, 252, 0)),
    ("LemonChiffon", Color::rgb(255, 250, 205)),
    ("LightBlue", Color::rgb(173, 216, 230)),
    ("LightCoral", Color::rgb(240, 128, 128)),
    ("LightCyan", Color::rgb(224, 255, 255)),
    ("LightGoldenrodYellow", Color::rgb(250, 250, 210)),
    ("LightGray", Color::rgb(211, 211, 211)),
    ("LightGreen", Color::rgb(144, 238, 144)),
    ("LightPink", Color::rgb(255, 182, 193)),
    ("LightSalmon", Color::rgb(255, 160, 122)),
    ("LightSeaGreen", Color::rgb(32, 178, 170)),
    ("LightSkyBlue", Color::rgb(135, 206, 250)),
    ("LightSlateGray", Color::rgb(119, 136, 153)),
    ("LightSteelBlue", Color::rgb(176, 196, 222)),
    ("LightYellow", Color::rgb(255, 255, 224)),
    ("Lime", Color::rgb(0, 255, 0)),
    ("LimeGreen", Color::rgb(50, 205, 50)),
    ("Linen", Color::rgb(250, 240, 230)),
    ("Magenta", Color::rgb(255, 0, 255)),
    ("Maroon", Color::rgb(128, 0, 0)),
    ("MediumAquamarine", Color::rgb(102, 205, 170)),
    ("MediumBlue", Color::rgb(0, 0, 205)),
    ("MediumOrchid", Color::rgb(186, 85, 211)),
    ("MediumPurple", Color::rgb(147, 112, 219)),
    ("MediumSeaGreen", Color::rgb(60, 179, 113)),
    ("MediumSlateBlue", Color::rgb(123, 104, 238)),
    ("MediumSpringGreen", Color::rgb(0, 250, 154)),
    ("MediumTurquoise", Color::rgb(72, 209, 204)),
    ("MediumVioletRed", Color::rgb(199, 21, 133)),
    ("MidnightBlue", Color::rgb(25, 25, 112)),
    ("MintCream", Color::rgb(245, 255, 250)),
    ("MistyRose", Color::rgb(255, 228, 225)),
    ("Moccasin", Color::rgb(255, 228, 181)),
    ("NavajoWhite", Color::rgb(255, 222, 173)),
    ("Navy", Color::rgb(0, 0, 128)),
    ("OldLace", Color::rgb(253, 245, 230)),
    ("Olive", Color::rgb(128, 128, 0)),
    ("OliveDrab", Color::rgb(107, 142, 35)),
    ("Orange", Color::rgb(255, 165, 0)),
    ("OrangeRed", Color::rgb(255, 69, 0)),
    ("Orchid", Color::rgb(218, 112, 214)),
    ("PaleGoldenrod", Color::rgb(238, 232, 170)),
    ("PaleGreen", Color::rgb(152, 251, 152)),
    ("PaleTurquoise", Color::rgb(175, 238, 238)),
    ("PaleVioletRed", Color::rgb(219, 112, 147)),
    ("PapayaWhip", Color::rgb(255, 239, 213)),
    ("PeachPuff", Color::rgb(255, 218, 185)),
    ("Peru", Color::rgb(205, 133, 63)),
    ("Pink", Color::rgb(255, 192, 203)),
    ("Plum", Color::rgb(221, 160, 221)),
    ("PowderBlue", Color::rgb(176, 224, 230)),
    ("Purple", Color::rgb(128, 0, 128)),
    ("Red", Color::rgb(255, 0, 0)),
    ("RosyBrown", Color::rgb(188, 143, 143)),
    ("RoyalBlue", Color::rgb(65, 105, 225)),
    ("SaddleBrown", Color::rgb(139, 69, 19)),
    ("Salmon", Color::rgb(250, 128, 114)),
    ("SandyBrown", Color::rgb(244, 164, 96)),
    ("SeaGreen", Color::rgb(46, 139, 87)),
    ("SeaShell", Color::rgb(255, 245, 238)),
    ("Sienna", Color::rgb(160, 82, 45)),
    ("Silver", Color::rgb(192, 192, 192)),
    ("SkyBlue", Color::rgb(135, 206, 235)),
    ("SlateBlue", Color::rgb(106, 90, 205)),
    ("SlateGray", Color::rgb(112, 128, 144)),
    ("Snow", Color::rgb(255, 250, 250)),
    ("SpringGreen", Color::rgb(0, 255, 127)),
    ("SteelBlue", Color::rgb(70, 130, 180)),
    ("Tan", Color::rgb(210, 180, 140)),
    ("Teal", Color::rgb(0, 128, 128)),
    ("Thistle", Color::rgb(216, 191, 216)),
    ("Tomato", Color::rgb(255, 99, 71)),
    ("Turquoise", Color::rgb(64, 224, 208)),
    ("Violet", Color::rgb(238, 130, 238)),
    ("Wheat", Color::rgb(245, 222, 179)),
    ("White", Color::rgb(255, 255, 255)),
    ("WhiteSmoke", Color::rgb(245, 245, 245)),
    ("Yellow", Color::rgb(255, 255, 0)),
    ("YellowGreen", Color::rgb(154, 205, 50)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins_over_earlier_near_miss() {
        let entries = [
            ("Near", Color::rgb(21, 20, 20)),
            ("Exact", Color::rgb(20, 20, 20)),
        ];
        let table = ColorTable::new(&entries);
        assert_eq!(table.classify(Color::rgb(20, 20, 20)), "Exact");
    }

    #[test]
    fn tie_goes_to_first_entry_in_table_order() {
        let entries = [
            ("First", Color::rgb(0, 0, 0)),
            ("Second", Color::rgb(20, 0, 0)),
        ];
        let table = ColorTable::new(&entries);
        // (10,0,0) is exactly 10 away from both references.
        assert_eq!(table.classify(Color::rgb(10, 0, 0)), "First");
    }

    #[test]
    fn truncated_distance_ties_keep_table_order() {
        // sqrt(11) = 3.31.. and sqrt(9) = 3 both truncate to 3, so the
        // first entry wins even though the second is strictly closer
        // before truncation.
        let entries = [
            ("Coarse", Color::rgb(0, 3, 1)), // squared distance 11 -> 3
            ("Fine", Color::rgb(3, 0, 0)),   // squared distance 9  -> 3
        ];
        let table = ColorTable::new(&entries);
        assert_eq!(table.classify(Color::rgb(0, 0, 0)), "Coarse");
    }

    #[test]
    fn named_table_exact_primaries() {
        let table = ColorTable::named();
        assert_eq!(table.classify(Color::rgb(255, 0, 0)), "Red");
        assert_eq!(table.classify(Color::rgb(0, 128, 0)), "Green");
        assert_eq!(table.classify(Color::rgb(0, 0, 255)), "Blue");
        assert_eq!(table.classify(Color::rgb(0, 0, 0)), "Black");
    }

    #[test]
    fn named_table_nearest_match() {
        let table = ColorTable::named();
        // (254,254,254) is 1 away from White, 5 from Snow/Ivory and friends.
        assert_eq!(table.classify(Color::rgb(254, 254, 254)), "White");
    }

    #[test]
    fn duplicate_values_resolve_alphabetically() {
        let table = ColorTable::named();
        // Aqua and Cyan share (0,255,255); Aqua comes first.
        assert_eq!(table.classify(Color::rgb(0, 255, 255)), "Aqua");
        assert_eq!(table.classify(Color::rgb(255, 0, 255)), "Fuchsia");
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn empty_table_is_a_precondition_violation() {
        let _ = ColorTable::new(&[]);
    }
}
