use async_trait::async_trait;
use garmentkit_core::{AssetError, DesignerError, DesignerEvent, Point};
use garmentkit_designer::{ArtworkLoader, ArtworkSource, DecodedArtwork, GarmentView, ImageRef};

use crate::support::{record_events, session};

fn decoded(width: u32, height: u32) -> DecodedArtwork {
    DecodedArtwork {
        image_ref: ImageRef::Content("upload-7".to_string()),
        width,
        height,
        format: "png".to_string(),
    }
}

#[test]
fn test_artwork_is_fitted_and_centred() {
    let mut s = session();
    let request = s.begin_add_artwork(Some("screen_print")).unwrap();
    assert_eq!(s.pending_artwork_count(), 1);

    let id = s.complete_add_artwork(request, Ok(decoded(200, 100))).unwrap();
    assert_eq!(s.pending_artwork_count(), 0);

    let object = s.scene().get(id).unwrap();
    assert_eq!(object.center(), Point::new(200.0, 240.0));
    let size = object.scaled_size();
    assert!((size.width - 100.0).abs() < 1e-9);
    assert!((size.height - 50.0).abs() < 1e-9);
    assert_eq!(
        object.as_image().map(|i| &i.source),
        Some(&ImageRef::Content("upload-7".to_string()))
    );

    assert!(s.techniques().contains("screen_print"));
    assert_eq!(s.customization_count(), 1);
    // 20 base + 25% decoration + one 2.50 customization
    assert!((s.unit_price() - 27.5).abs() < 1e-9);
}

#[test]
fn test_view_switch_makes_request_stale() {
    let mut s = session();
    let request = s.begin_add_artwork(None).unwrap();
    s.select_view(GarmentView::Back);

    let result = s.complete_add_artwork(request, Ok(decoded(10, 10)));
    assert!(matches!(
        result,
        Err(DesignerError::StaleArtworkRequest { .. })
    ));
    assert_eq!(s.scene().object_count(), 0);
    assert_eq!(s.customization_count(), 0);
}

#[test]
fn test_view_round_trip_makes_request_stale() {
    let mut s = session();
    let request = s.begin_add_artwork(None).unwrap();
    s.select_view(GarmentView::Back);
    s.select_view(GarmentView::Front);

    let result = s.complete_add_artwork(request, Ok(decoded(10, 10)));
    assert!(matches!(
        result,
        Err(DesignerError::StaleArtworkRequest { .. })
    ));
    assert_eq!(s.scene().object_count(), 0);
    assert_eq!(s.pending_artwork_count(), 0);

    let fresh = s.begin_add_artwork(None).unwrap();
    assert!(s.complete_add_artwork(fresh, Ok(decoded(10, 10))).is_ok());
}

#[test]
fn test_cancelled_request_is_stale() {
    let mut s = session();
    let request = s.begin_add_artwork(Some("dtf")).unwrap();
    assert!(s.cancel_artwork(request));
    assert!(!s.cancel_artwork(request));

    assert!(matches!(
        s.complete_add_artwork(request, Ok(decoded(10, 10))),
        Err(DesignerError::StaleArtworkRequest { .. })
    ));
    assert!(s.techniques().is_empty());
}

#[test]
fn test_failed_load_leaves_scene_untouched() {
    let mut s = session();
    let text = s.add_text("Existing").unwrap();
    let before = s.scene().get(text).unwrap().geometry;
    let events = record_events(&mut s);

    let request = s.begin_add_artwork(Some("embroidery")).unwrap();
    let err = AssetError::Decode("truncated file".to_string());
    assert_eq!(
        s.complete_add_artwork(request, Err(err.clone())),
        Err(DesignerError::AssetLoadFailure(err))
    );

    assert_eq!(s.scene().object_count(), 1);
    assert_eq!(s.scene().get(text).unwrap().geometry, before);
    assert_eq!(s.customization_count(), 1);
    assert!(s.techniques().is_empty());
    assert!(matches!(
        events.borrow().as_slice(),
        [DesignerEvent::ArtworkFailed { request: r, .. }] if *r == request
    ));
}

#[test]
fn test_empty_artwork_is_a_load_failure() {
    let mut s = session();
    let request = s.begin_add_artwork(None).unwrap();
    assert_eq!(
        s.complete_add_artwork(request, Ok(decoded(0, 10))),
        Err(DesignerError::AssetLoadFailure(AssetError::EmptyImage {
            width: 0,
            height: 10
        }))
    );
}

#[test]
fn test_unknown_technique_starts_nothing() {
    let mut s = session();
    assert_eq!(
        s.begin_add_artwork(Some("foil")),
        Err(DesignerError::UnknownTechnique("foil".to_string()))
    );
    assert_eq!(s.pending_artwork_count(), 0);
}

struct FixedLoader(Result<DecodedArtwork, AssetError>);

#[async_trait]
impl ArtworkLoader for FixedLoader {
    async fn load(&self, _source: &ArtworkSource) -> Result<DecodedArtwork, AssetError> {
        self.0.clone()
    }
}

#[tokio::test]
async fn test_async_add_artwork() {
    let mut s = session();
    let loader = FixedLoader(Ok(decoded(50, 400)));
    let id = s
        .add_artwork(&loader, &ArtworkSource::bytes("upload-7", Vec::new()), Some("dtg"))
        .await
        .unwrap();

    let size = s.scene().get(id).unwrap().scaled_size();
    assert!((size.width - 12.5).abs() < 1e-9);
    assert!((size.height - 100.0).abs() < 1e-9);
    assert!(s.techniques().contains("dtg"));

    let failing = FixedLoader(Err(AssetError::UnsupportedFormat("bmp".to_string())));
    let result = s
        .add_artwork(&failing, &ArtworkSource::file("art.bmp"), None)
        .await;
    assert!(matches!(result, Err(DesignerError::AssetLoadFailure(_))));
    assert_eq!(s.scene().object_count(), 1);
    assert_eq!(s.pending_artwork_count(), 0);
}
