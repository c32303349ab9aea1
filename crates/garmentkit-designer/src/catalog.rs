//! Product-record helpers: garment colour choices and mockup images.

use garmentkit_core::{ProductRecord, ProductVariant};

use crate::area::GarmentView;

/// Variant option title that carries the garment colour.
const COLOR_OPTION: &str = "color";

/// Reduces the product's variants to one per offered garment colour.
///
/// Colours keep the order in which they first appear. For each colour a
/// variant carrying a `hex_color` swatch is preferred over one without.
pub fn garment_color_variants<'a>(
    product: &'a ProductRecord,
    offered: &[String],
) -> Vec<&'a ProductVariant> {
    let mut picked: Vec<(String, &ProductVariant)> = Vec::new();

    for variant in &product.variants {
        let Some(color) = variant.option(COLOR_OPTION) else {
            continue;
        };
        let key = color.to_ascii_lowercase();
        if !offered.iter().any(|c| c.eq_ignore_ascii_case(&key)) {
            continue;
        }
        match picked.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => {
                if entry.1.hex_color().is_none() && variant.hex_color().is_some() {
                    entry.1 = variant;
                }
            }
            None => picked.push((key, variant)),
        }
    }

    picked.into_iter().map(|(_, v)| v).collect()
}

/// Mockup image URL for `view`.
///
/// Prefers an image whose URL mentions the view, then the positional
/// image (front, back, neck), and finally the front image.
pub fn view_image(product: &ProductRecord, view: GarmentView) -> Option<&str> {
    let by_name = |v: GarmentView| {
        product
            .images
            .iter()
            .find(|img| img.url.contains(v.as_str()))
            .map(|img| img.url.as_str())
    };
    let by_index = |i: usize| product.images.get(i).map(|img| img.url.as_str());

    let front = by_name(GarmentView::Front).or_else(|| by_index(0));
    match view {
        GarmentView::Front => front,
        GarmentView::Back => by_name(view).or_else(|| by_index(1)).or(front),
        GarmentView::Neck => by_name(view).or_else(|| by_index(2)).or(front),
    }
}
