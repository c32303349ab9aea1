//! Area membership resolution.
//!
//! Interactive placement binds new objects to the active area of the view
//! (the first one). Export re-derives membership geometrically from the
//! object's final bounding box, which works even for objects whose owning
//! area was never tracked.

use garmentkit_core::Bounds;
use garmentkit_settings::MembershipPolicy;

use crate::area::Area;

/// Assignment-time resolution: the active area, if the view has one.
pub fn active_area(areas: &[Area]) -> Option<&Area> {
    areas.first()
}

/// Containment-time resolution: an area whose rectangle fully contains
/// `bounds`. Partially outside means no match.
pub fn resolve_containing<'a>(
    bounds: &Bounds,
    areas: &'a [Area],
    policy: MembershipPolicy,
) -> Option<&'a Area> {
    let mut containing = areas.iter().filter(|a| a.bounds().contains_bounds(bounds));
    match policy {
        MembershipPolicy::FirstMatch => containing.next(),
        MembershipPolicy::SmallestContaining => containing.fold(None, |best: Option<&Area>, a| {
            match best {
                Some(b) if b.bounds().area() <= a.bounds().area() => Some(b),
                _ => Some(a),
            }
        }),
    }
}
