use garmentkit_core::Point;
use garmentkit_designer::constraint::{fire, install};
use garmentkit_designer::{
    Area, AreaKind, ConstraintOutcome, Element, GarmentView, ImageElement, ImageRef, SceneObject,
};
use garmentkit_settings::ScaleClampMode;
use proptest::prelude::*;

fn clamp_mode() -> impl Strategy<Value = ScaleClampMode> {
    prop_oneof![Just(ScaleClampMode::Independent), Just(ScaleClampMode::Uniform)]
}

fn placed_image(
    area: &Area,
    natural: (f64, f64),
    rotation: f64,
    mode: ScaleClampMode,
) -> SceneObject {
    let mut element = ImageElement::new(ImageRef::Url("art.png".into()), natural.0, natural.1);
    element.rotation = rotation;
    let mut object = SceneObject::new(
        1,
        GarmentView::Front,
        area.id.clone(),
        area.center(),
        Element::Image(element),
    );
    install(&mut object, area, mode);
    fire(&mut object);
    object
}

proptest! {
    /// Whatever geometry the surface reports, the corrected box lies inside the area.
    #[test]
    fn corrected_geometry_is_contained(
        ax in -200.0f64..400.0, ay in -200.0f64..400.0,
        aw in 1.0f64..400.0, ah in 1.0f64..400.0,
        nw in 1.0f64..800.0, nh in 1.0f64..800.0,
        rotation in prop_oneof![Just(0.0f64), 0.0f64..360.0],
        cx in -2000.0f64..2000.0, cy in -2000.0f64..2000.0,
        sx in 0.01f64..10.0, sy in 0.01f64..10.0,
        mode in clamp_mode(),
    ) {
        let area = Area::new("a", "A", ax, ay, aw, ah, AreaKind::Both);
        let mut object = placed_image(&area, (nw, nh), rotation, mode);
        prop_assert!(area.bounds().contains_bounds(&object.bounds()));

        object.geometry.center = Point::new(cx, cy);
        object.geometry.scale_x = sx;
        object.geometry.scale_y = sy;
        fire(&mut object);

        prop_assert!(
            area.bounds().contains_bounds(&object.bounds()),
            "{:?} escapes {:?}", object.bounds(), area.bounds()
        );
    }

    /// A second run without a new interaction changes nothing.
    #[test]
    fn constraint_is_idempotent(
        aw in 1.0f64..400.0, ah in 1.0f64..400.0,
        nw in 1.0f64..800.0, nh in 1.0f64..800.0,
        rotation in 0.0f64..360.0,
        cx in -2000.0f64..2000.0, cy in -2000.0f64..2000.0,
        sx in 0.01f64..10.0, sy in 0.01f64..10.0,
        mode in clamp_mode(),
    ) {
        let area = Area::new("a", "A", 50.0, 80.0, aw, ah, AreaKind::Both);
        let mut object = placed_image(&area, (nw, nh), rotation, mode);
        object.geometry.center = Point::new(cx, cy);
        object.geometry.scale_x = sx;
        object.geometry.scale_y = sy;
        fire(&mut object);

        let settled = object.geometry;
        prop_assert_eq!(fire(&mut object), ConstraintOutcome::Unchanged);
        prop_assert_eq!(object.geometry, settled);
    }

    /// Pure translations that stay inside the area are left alone.
    #[test]
    fn inside_moves_are_untouched(dx in -25.0f64..25.0, dy in -25.0f64..25.0) {
        let area = Area::new("a", "A", 0.0, 0.0, 100.0, 100.0, AreaKind::Both);
        let mut object = placed_image(&area, (50.0, 50.0), 0.0, ScaleClampMode::Independent);
        let target = Point::new(50.0 + dx, 50.0 + dy);
        object.geometry.center = target;

        prop_assert_eq!(fire(&mut object), ConstraintOutcome::Unchanged);
        prop_assert_eq!(object.center(), target);
    }
}

#[test]
fn independent_clamp_sets_area_over_natural() {
    let area = Area::new("a", "A", 0.0, 0.0, 150.0, 200.0, AreaKind::Both);
    let mut object = placed_image(&area, (300.0, 100.0), 0.0, ScaleClampMode::Independent);
    object.geometry.scale_x = 2.0;
    object.geometry.scale_y = 2.5;
    fire(&mut object);

    assert!((object.geometry.scale_x - 0.5).abs() < 1e-12);
    assert!((object.geometry.scale_y - 2.0).abs() < 1e-12);
}
