use garmentkit_core::{DesignerError, DesignerEvent, Point, SceneEvent};
use garmentkit_designer::{default_areas, ConstraintOutcome, DesignSession, GarmentView, TextUpdate};
use garmentkit_settings::Config;
use serde_json::json;

use crate::support::{product, product_with_areas, record_events, session};

#[test]
fn test_new_session_defaults() {
    let s = session();
    assert_eq!(s.view(), GarmentView::Front);
    assert_eq!(s.active_area().map(|a| a.id.as_str()), Some("front-center"));
    assert_eq!(s.variant().map(|v| v.id.as_str()), Some("var_white"));
    assert_eq!(s.quantity(), 50);
    assert_eq!(s.customization_count(), 0);
    assert_eq!(s.view_image(), Some("https://cdn.example.com/tee-front.png"));

    let colors: Vec<_> = s.color_variants().iter().map(|v| v.id.as_str()).collect();
    assert_eq!(colors, vec!["var_white", "var_black"]);
}

#[test]
fn test_add_text_centres_in_active_area() {
    let mut s = session();
    let id = s.add_text("Hello").unwrap();
    let object = s.scene().get(id).unwrap();

    assert_eq!(object.area_id, "front-center");
    assert_eq!(object.center(), Point::new(200.0, 240.0));
    let text = object.as_text().unwrap();
    assert_eq!(text.font_family, "Arial");
    assert_eq!(text.fill_color, "#000000");
    assert_eq!(text.font_size, 20.0);
    assert_eq!(s.customization_count(), 1);
    assert_eq!(s.scene().selected_id(), Some(id));
    assert_eq!(s.editor_target(), Some(id));
}

#[test]
fn test_drag_is_clamped_to_area() {
    let mut s = session();
    let id = s.add_text("Hello").unwrap();
    let events = record_events(&mut s);

    let outcome = s
        .handle_event(SceneEvent::Moving {
            id,
            center: Point::new(1000.0, 1000.0),
        })
        .unwrap();
    assert_eq!(outcome, ConstraintOutcome::Corrected);

    let object = s.scene().get(id).unwrap();
    let area = default_areas(GarmentView::Front).remove(0);
    assert!(area.bounds().contains_bounds(&object.bounds()));
    assert!((object.center().x - 245.0).abs() < 1e-9);
    assert!((object.center().y - 328.4).abs() < 1e-9);
    assert_eq!(*events.borrow(), vec![DesignerEvent::RedrawRequested { id }]);

    // Moving inside the area needs no redraw.
    let outcome = s
        .handle_event(SceneEvent::Moving {
            id,
            center: Point::new(190.0, 200.0),
        })
        .unwrap();
    assert_eq!(outcome, ConstraintOutcome::Unchanged);
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn test_view_round_trip_keeps_constraint() {
    let mut s = session();
    let id = s.add_text("Hello").unwrap();

    s.select_view(GarmentView::Back);
    assert!(s.scene().get(id).unwrap().constraint().is_none());
    assert_eq!(s.editor_target(), None);

    // Objects of the inactive view ignore surface events.
    let outcome = s
        .handle_event(SceneEvent::Moving {
            id,
            center: Point::new(-500.0, -500.0),
        })
        .unwrap();
    assert_eq!(outcome, ConstraintOutcome::Unchanged);
    assert_eq!(s.scene().get(id).unwrap().center(), Point::new(200.0, 240.0));

    s.select_view(GarmentView::Front);
    let outcome = s
        .handle_event(SceneEvent::Moving {
            id,
            center: Point::new(1000.0, -1000.0),
        })
        .unwrap();
    assert_eq!(outcome, ConstraintOutcome::Corrected);

    let object = s.scene().get(id).unwrap();
    assert_eq!(
        object.constraint().map(|r| r.handler().area_id()),
        Some("front-center")
    );
    let front = default_areas(GarmentView::Front).remove(0);
    assert!(front.bounds().contains_bounds(&object.bounds()));
}

#[test]
fn test_view_change_reinstalls_single_handler() {
    let mut s = session();
    let id = s.add_text("Hi").unwrap();
    let first = s.scene().get(id).unwrap().constraint().unwrap().token();

    s.select_view(GarmentView::Back);
    s.select_view(GarmentView::Front);
    let second = s.scene().get(id).unwrap().constraint().unwrap().token();
    assert_ne!(first, second);
}

#[test]
fn test_view_without_areas_is_noop() {
    let mut s = session();
    let events = record_events(&mut s);
    s.select_view(GarmentView::Neck);
    assert!(s.active_area().is_none());

    assert_eq!(
        s.add_text("Hi"),
        Err(DesignerError::NoActiveArea {
            view: "neck".to_string()
        })
    );
    assert!(matches!(
        s.begin_add_artwork(None),
        Err(DesignerError::NoActiveArea { .. })
    ));
    assert_eq!(s.scene().object_count(), 0);
    assert_eq!(s.customization_count(), 0);
    assert_eq!(
        *events.borrow(),
        vec![DesignerEvent::ViewChanged {
            view: "neck".to_string()
        }]
    );
}

#[test]
fn test_invalid_area_override_falls_back() {
    let product = product_with_areas(Some(json!({
        "front": [ { "id": "x", "name": "X", "x": 0, "y": 0, "width": 10, "kind": "both" } ]
    })));
    let mut s = DesignSession::new(product, Config::default());
    assert_eq!(s.areas(GarmentView::Front), default_areas(GarmentView::Front).as_slice());
    assert!(s.add_text("still works").is_ok());
}

#[test]
fn test_areas_are_resolved_once_per_session() {
    let product = product_with_areas(Some(json!({
        "back": [ { "id": "yoke", "name": "Yoke", "x": 150, "y": 60, "width": 100, "height": 40, "kind": "text" } ]
    })));
    let mut s = DesignSession::new(product, Config::default());
    let back = s.areas(GarmentView::Back).to_vec();
    assert_eq!(back[0].id, "yoke");

    s.select_view(GarmentView::Back);
    assert_eq!(s.areas(GarmentView::Back), back.as_slice());
    assert_eq!(s.active_area().map(|a| a.id.as_str()), Some("yoke"));
    s.select_view(GarmentView::Front);
    s.select_view(GarmentView::Back);
    assert_eq!(s.areas(GarmentView::Back), back.as_slice());
}

#[test]
fn test_area_kind_is_enforced() {
    let product = product_with_areas(Some(json!({
        "front": [ { "id": "chest", "name": "Chest", "x": 150, "y": 150, "width": 100, "height": 40, "type": "text" } ]
    })));
    let mut s = DesignSession::new(product, Config::default());

    assert_eq!(
        s.begin_add_artwork(None),
        Err(DesignerError::AreaKindMismatch {
            area_id: "chest".to_string(),
            element: "image".to_string()
        })
    );
    let id = s.add_text("Chest print").unwrap();
    assert_eq!(s.scene().get(id).unwrap().area_id, "chest");
}

#[test]
fn test_text_length_limit() {
    let mut s = session();
    let long = "x".repeat(101);
    assert_eq!(
        s.add_text(&long),
        Err(DesignerError::TextTooLong {
            length: 101,
            max: 100
        })
    );
    assert_eq!(s.customization_count(), 0);

    let id = s.add_text(&"x".repeat(100)).unwrap();
    let update = TextUpdate {
        text: Some(long),
        ..TextUpdate::default()
    };
    assert!(matches!(
        s.update_text(id, update),
        Err(DesignerError::TextTooLong { .. })
    ));
}

#[test]
fn test_editor_updates_and_font_steps() {
    let mut s = session();
    let id = s.add_text("Hi").unwrap();

    s.update_text(
        id,
        TextUpdate {
            text: Some("A much longer slogan here".to_string()),
            font_family: Some("Georgia".to_string()),
            fill_color: Some("#FF0000".to_string()),
            font_size: Some(72.0),
        },
    )
    .unwrap();
    let object = s.scene().get(id).unwrap();
    let text = object.as_text().unwrap();
    assert_eq!(text.font_family, "Georgia");
    assert_eq!(text.fill_color, "#FF0000");
    // The wider text was shrunk back into the area.
    let front = default_areas(GarmentView::Front).remove(0);
    assert!(front.bounds().contains_bounds(&object.bounds()));
    assert!(object.geometry.scale_x < 1.0);

    assert_eq!(s.grow_text(id), Ok(72.0));
    assert_eq!(s.shrink_text(id), Ok(70.0));
    for _ in 0..40 {
        s.shrink_text(id).unwrap();
    }
    assert_eq!(s.shrink_text(id), Ok(12.0));

    assert_eq!(
        s.update_text(999, TextUpdate::font_size(20.0)),
        Err(DesignerError::UnknownObject(999))
    );
}

#[test]
fn test_delete_closes_editor_and_decrements() {
    let mut s = session();
    let keep = s.add_text("Keep").unwrap();
    let id = s.add_text("Delete me").unwrap();
    assert_eq!(s.customization_count(), 2);
    assert_eq!(s.editor_target(), Some(id));

    let events = record_events(&mut s);
    assert_eq!(s.delete_selected(), Some(id));
    assert_eq!(s.editor_target(), None);
    assert_eq!(s.customization_count(), 1);
    assert!(s.scene().get(id).is_none());
    assert!(s.scene().get(keep).is_some());

    let events = events.borrow();
    let closed = events
        .iter()
        .position(|e| *e == DesignerEvent::EditorClosed { id })
        .unwrap();
    let removed = events
        .iter()
        .position(|e| *e == DesignerEvent::ObjectRemoved { id })
        .unwrap();
    assert!(closed < removed);

    drop(events);
    assert_eq!(s.delete_selected(), None);
}

#[test]
fn test_surface_removal_and_selection() {
    let mut s = session();
    let a = s.add_text("A").unwrap();
    let b = s.add_text("B").unwrap();

    s.handle_event(SceneEvent::SelectionChanged { id: Some(a) })
        .unwrap();
    assert_eq!(s.editor_target(), Some(a));
    s.handle_event(SceneEvent::SelectionChanged { id: None })
        .unwrap();
    assert_eq!(s.editor_target(), None);

    s.handle_event(SceneEvent::ObjectRemoved { id: b }).unwrap();
    assert_eq!(s.customization_count(), 1);
    assert_eq!(
        s.handle_event(SceneEvent::ObjectRemoved { id: b }),
        Err(DesignerError::UnknownObject(b))
    );
}

#[test]
fn test_invalid_scale_is_rejected() {
    let mut s = session();
    let id = s.add_text("Hi").unwrap();
    let before = s.scene().get(id).unwrap().geometry;
    let events = record_events(&mut s);

    for (sx, sy) in [(-1.0, 1.0), (0.0, 1.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
        let outcome = s
            .handle_event(SceneEvent::Scaling {
                id,
                center: Point::new(200.0, 240.0),
                scale_x: sx,
                scale_y: sy,
            })
            .unwrap();
        assert_eq!(outcome, ConstraintOutcome::Corrected);
    }
    assert_eq!(s.scene().get(id).unwrap().geometry, before);
    assert_eq!(events.borrow().len(), 4);
}

#[test]
fn test_pricing_follows_session() {
    let mut s = session();
    assert_eq!(s.unit_price(), 20.0);

    s.add_text("One").unwrap();
    s.add_text("Two").unwrap();
    assert_eq!(s.unit_price(), 25.0);

    s.select_variant("var_black").unwrap();
    assert_eq!(s.unit_price(), 27.0);
    assert_eq!(
        s.select_variant("var_missing"),
        Err(DesignerError::UnknownVariant("var_missing".to_string()))
    );

    s.select_variant("var_free").unwrap();
    assert_eq!(s.unit_price(), 5.0);

    s.set_quantity(0);
    assert_eq!(s.quantity(), 1);
    s.set_quantity(10);
    assert_eq!(s.order_total(), 50.0);
}

#[test]
fn test_unknown_object_event() {
    let mut s = DesignSession::new(product(), Config::default());
    assert_eq!(
        s.handle_event(SceneEvent::Moving {
            id: 42,
            center: Point::new(0.0, 0.0)
        }),
        Err(DesignerError::UnknownObject(42))
    );
}
