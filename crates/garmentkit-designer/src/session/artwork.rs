use garmentkit_core::{ArtworkRequestId, AssetError, DesignerError, DesignerEvent, ObjectId};

use super::DesignSession;
use crate::area::GarmentView;
use crate::assets::{ArtworkLoader, ArtworkSource, DecodedArtwork};
use crate::constraint;
use crate::model::{Element, ElementKind, ImageElement, SceneObject};
use crate::pricing::{self, DecorationTechnique};

/// An add-artwork request waiting for its load to finish.
#[derive(Debug, Clone)]
pub(crate) struct PendingArtwork {
    view: GarmentView,
    view_epoch: u64,
    area_id: String,
    technique: Option<DecorationTechnique>,
}

impl DesignSession {
    /// Starts an add-artwork request against the active area.
    ///
    /// Validates everything that does not depend on the artwork itself so a
    /// load is never started for a request that cannot be placed.
    pub fn begin_add_artwork(
        &mut self,
        technique: Option<&str>,
    ) -> Result<ArtworkRequestId, DesignerError> {
        let technique = technique.map(pricing::technique).transpose()?;
        let area = self.placement_area(ElementKind::Image)?;

        let request = ArtworkRequestId::new();
        self.pending_artwork.insert(
            request,
            PendingArtwork {
                view: self.view,
                view_epoch: self.view_epoch,
                area_id: area.id,
                technique,
            },
        );
        tracing::debug!("Started {} on {}", request, self.view);
        Ok(request)
    }

    /// Drops a pending request; a later completion for it is stale.
    pub fn cancel_artwork(&mut self, request: ArtworkRequestId) -> bool {
        self.pending_artwork.remove(&request).is_some()
    }

    pub fn pending_artwork_count(&self) -> usize {
        self.pending_artwork.len()
    }

    /// Finishes a request with the outcome of its load.
    ///
    /// A failed load or a request that is no longer valid leaves the scene
    /// untouched. A request is stale when it was cancelled, the view changed
    /// while it was loading, or its area is no longer defined.
    pub fn complete_add_artwork(
        &mut self,
        request: ArtworkRequestId,
        loaded: Result<DecodedArtwork, AssetError>,
    ) -> Result<ObjectId, DesignerError> {
        let stale = |reason: &str| DesignerError::StaleArtworkRequest {
            request: request.to_string(),
            reason: reason.to_string(),
        };

        let pending = self
            .pending_artwork
            .remove(&request)
            .ok_or_else(|| stale("unknown or cancelled request"))?;

        let loaded = loaded.and_then(|artwork| {
            if artwork.width == 0 || artwork.height == 0 {
                return Err(AssetError::EmptyImage {
                    width: artwork.width,
                    height: artwork.height,
                });
            }
            Ok(artwork)
        });
        let artwork = match loaded {
            Ok(artwork) => artwork,
            Err(e) => {
                tracing::warn!("{} failed: {}", request, e);
                self.emit(DesignerEvent::ArtworkFailed {
                    request,
                    reason: e.to_string(),
                });
                return Err(DesignerError::AssetLoadFailure(e));
            }
        };

        if pending.view_epoch != self.view_epoch {
            tracing::info!("Discarding {}: view changed", request);
            return Err(stale("view changed while loading"));
        }
        let Some(area) = self.find_area(pending.view, &pending.area_id).cloned() else {
            tracing::info!("Discarding {}: area '{}' is gone", request, pending.area_id);
            return Err(stale("target area no longer defined"));
        };

        let width = f64::from(artwork.width);
        let height = f64::from(artwork.height);
        let fit = self.config.designer.default_artwork_size / width.max(height);

        let id = self.scene.generate_id();
        let mut object = SceneObject::new(
            id,
            self.view,
            area.id.clone(),
            area.center(),
            Element::Image(ImageElement::new(artwork.image_ref, width, height)),
        );
        object.geometry.scale_x = fit;
        object.geometry.scale_y = fit;
        constraint::install(&mut object, &area, self.config.designer.scale_clamp);
        constraint::fire(&mut object);

        if let Some(technique) = pending.technique {
            self.techniques.insert(technique);
        }
        self.insert_placed(object);
        self.select(Some(id));
        Ok(id)
    }

    /// Loads `source` and places it in the active area.
    ///
    /// The session may not be touched by anything else while the load is
    /// pending; callers that need to keep editing use the two-phase API.
    pub async fn add_artwork(
        &mut self,
        loader: &dyn ArtworkLoader,
        source: &ArtworkSource,
        technique: Option<&str>,
    ) -> Result<ObjectId, DesignerError> {
        let request = self.begin_add_artwork(technique)?;
        let loaded = loader.load(source).await;
        self.complete_add_artwork(request, loaded)
    }
}
