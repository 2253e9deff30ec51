//! Static disposal guidance for the recognized material categories.
//!
//! The classification backend returns a bare label; everything shown next to
//! it (title, description, disposal steps) is a fixed local lookup.

use std::fmt;

/// Material category predicted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Cardboard,
    Glass,
    Metal,
    Paper,
    Plastic,
    Trash,
}

/// All categories, in display order.
pub const ALL: [Material; 6] = [
    Material::Cardboard,
    Material::Glass,
    Material::Metal,
    Material::Paper,
    Material::Plastic,
    Material::Trash,
];

impl Material {
    /// Maps a predicted label to a category. Unknown labels fall back to
    /// general waste, the safest disposal advice.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "cardboard" => Material::Cardboard,
            "glass" => Material::Glass,
            "metal" => Material::Metal,
            "paper" => Material::Paper,
            "plastic" => Material::Plastic,
            _ => Material::Trash,
        }
    }

    /// The backend's label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Material::Cardboard => "cardboard",
            Material::Glass => "glass",
            Material::Metal => "metal",
            Material::Paper => "paper",
            Material::Plastic => "plastic",
            Material::Trash => "trash",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Material::Cardboard => "Cardboard",
            Material::Glass => "Glass",
            Material::Metal => "Metal",
            Material::Paper => "Paper",
            Material::Plastic => "Plastic",
            Material::Trash => "General Waste",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Material::Cardboard => "📦",
            Material::Glass => "🫙",
            Material::Metal => "🔧",
            Material::Paper => "📰",
            Material::Plastic => "🛢️",
            Material::Trash => "🗑️",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Material::Cardboard => "Cardboard is recyclable and biodegradable.",
            Material::Glass => {
                "Glass is 100% recyclable and can be recycled endlessly without loss in quality."
            }
            Material::Metal => "Metals like aluminum and steel are highly recyclable.",
            Material::Paper => "Paper is recyclable and can be turned into new paper products.",
            Material::Plastic => "Many types of plastic can be recycled into new plastic products.",
            Material::Trash => {
                "This item is not recyclable and should be disposed of in general waste."
            }
        }
    }

    pub fn instructions(self) -> &'static [&'static str] {
        match self {
            Material::Cardboard => &[
                "Remove any tape or labels",
                "Flatten boxes to save space",
                "Keep dry and clean",
                "Place in the designated cardboard recycling bin",
            ],
            Material::Glass => &[
                "Rinse containers thoroughly",
                "Remove caps and lids",
                "Separate by color if required",
                "Place in the glass recycling bin",
            ],
            Material::Metal => &[
                "Rinse containers to remove food residue",
                "Remove paper labels if possible",
                "Crush cans to save space (optional)",
                "Place in the metal recycling bin",
            ],
            Material::Paper => &[
                "Keep paper clean and dry",
                "Remove any plastic wrapping",
                "Shred sensitive documents",
                "Place in the paper recycling bin",
            ],
            Material::Plastic => &[
                "Check the recycling symbol and number",
                "Rinse containers to remove food residue",
                "Remove caps and labels if possible",
                "Place in the plastic recycling bin",
            ],
            Material::Trash => &[
                "Ensure the item cannot be recycled or composted",
                "Place in a sealed bag",
                "Dispose of in the general waste bin",
                "Consider ways to reduce non-recyclable waste",
            ],
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
