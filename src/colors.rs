use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::TableError;

lazy_static! {
    static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").unwrap();

    /// Component colours used by every chart of the dashboard.
    pub static ref COMPONENT_COLORS: ColorMap = ColorMap::from_hex_table(&[
        ("Polysilicon", "#00BFFF"),
        ("Imported Polysilicon", "#00BFFF"),
        ("Wafer", "#008080"),
        ("Wafer (excl. polysilicon)", "#008080"),
        ("Domestic Wafer (excl. polysilicon)", "#008080"),
        ("Cell Cost (incl. domestic polysilicon and wafer)", "#FF8C00"),
        ("Domestic Cell (excl. wafer)", "#FF8C00"),
        ("Imported Cell (incl. polysilicon and wafer)", "#FF8C00"),
        ("Cell Cost (excl. wafer)", "#FF8C00"),
        ("Overheads", "#708090"),
        ("Electricity", "#DAA520"),
        ("Building and facilities", "#8B4513"),
        ("Equipment depreciation", "#6A5ACD"),
        ("Maintenance", "#228B22"),
        ("Labour", "#DC143C"),
        ("Other material (e.g. front and back glass, encapsulant and others)", "#BA55D3"),
        ("ESG Certification", "#2E8B57"),
        ("Operating profits", "#4169E1"),
    ])
    .expect("component colour table is well-formed");
}

/// 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let caps = HEX_COLOR_REGEX.captures(hex.trim())?;
        let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
        Some(Rgb(channel(1)?, channel(2)?, channel(3)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Colour used for any label that has no entry.
pub const FALLBACK_COLOR: Rgb = Rgb(0x1F, 0x77, 0xB4);

/// Static `category label -> colour` table with a silent fallback.
#[derive(Clone, Debug, Default)]
pub struct ColorMap {
    colors: HashMap<String, Rgb>,
}

impl ColorMap {
    /// Builds a map from `(label, "#RRGGBB")` pairs; fails on the first malformed colour.
    pub fn from_hex_table(table: &[(&str, &str)]) -> Result<Self, TableError> {
        let mut colors = HashMap::with_capacity(table.len());
        for (label, hex) in table {
            let rgb = Rgb::from_hex(hex).ok_or_else(|| TableError::BadColor {
                label: label.to_string(),
                hex: hex.to_string(),
            })?;
            colors.insert(label.to_string(), rgb);
        }
        Ok(ColorMap { colors })
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, label: &str) -> Option<Rgb> {
        self.colors.get(label).copied()
    }

    /// Colour for `label`, or [`FALLBACK_COLOR`] when it is not listed.
    pub fn color_for(&self, label: &str) -> Rgb {
        self.get(label).unwrap_or(FALLBACK_COLOR)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.colors.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
