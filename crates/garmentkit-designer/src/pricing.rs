//! Unit price derivation.
//!
//! `unit = base + base * avg(modifier) + count * per_item_fee`. Missing or
//! non-finite base prices count as zero; an empty technique set adds no
//! decoration surcharge.

use garmentkit_core::DesignerError;
use serde::Serialize;

/// A production method with a fractional surcharge on the base price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecorationTechnique {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_modifier: f64,
}

pub const TECHNIQUES: [DecorationTechnique; 5] = [
    DecorationTechnique {
        id: "dtg",
        name: "Digital Print (DTG)",
        description: "Direct-to-garment printing with vibrant colors and fine detail",
        price_modifier: 0.0,
    },
    DecorationTechnique {
        id: "dtf",
        name: "Digital Transfer Print (DTF)",
        description: "Durable heat transfer with excellent color reproduction",
        price_modifier: 0.15,
    },
    DecorationTechnique {
        id: "screen_print",
        name: "Screen Print (up to 10 colors)",
        description: "Classic screen printing for bold, long-lasting designs",
        price_modifier: 0.25,
    },
    DecorationTechnique {
        id: "puff_screen",
        name: "Puff Screen Print",
        description: "Raised screen print with dimensional texture",
        price_modifier: 0.35,
    },
    DecorationTechnique {
        id: "embroidery",
        name: "Embroidery",
        description: "Premium embroidered finish for professional appearance",
        price_modifier: 0.50,
    },
];

/// Looks up a catalog technique by id.
pub fn technique(id: &str) -> Result<DecorationTechnique, DesignerError> {
    TECHNIQUES
        .iter()
        .find(|t| t.id == id)
        .copied()
        .ok_or_else(|| DesignerError::UnknownTechnique(id.to_string()))
}

/// Techniques selected during a session, deduplicated by id and kept in
/// selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechniqueSet {
    techniques: Vec<DecorationTechnique>,
}

impl TechniqueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `technique`; returns false if its id was already present.
    pub fn insert(&mut self, technique: DecorationTechnique) -> bool {
        if self.contains(technique.id) {
            return false;
        }
        self.techniques.push(technique);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.techniques.iter().any(|t| t.id == id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.techniques.len();
        self.techniques.retain(|t| t.id != id);
        self.techniques.len() != before
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecorationTechnique> {
        self.techniques.iter()
    }

    /// Mean price modifier, zero for an empty set.
    pub fn average_modifier(&self) -> f64 {
        if self.techniques.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.techniques.iter().map(|t| t.price_modifier).sum();
        sum / self.techniques.len() as f64
    }
}

impl FromIterator<DecorationTechnique> for TechniqueSet {
    fn from_iter<I: IntoIterator<Item = DecorationTechnique>>(iter: I) -> Self {
        let mut set = TechniqueSet::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

pub fn unit_price(
    base_price: Option<f64>,
    techniques: &TechniqueSet,
    customization_count: usize,
    per_item_fee: f64,
) -> f64 {
    let base = base_price.filter(|p| p.is_finite()).unwrap_or(0.0);
    let decoration = base * techniques.average_modifier();
    let customization = customization_count as f64 * per_item_fee;
    base + decoration + customization
}

pub fn order_total(unit_price: f64, quantity: u32) -> f64 {
    unit_price * quantity as f64
}
