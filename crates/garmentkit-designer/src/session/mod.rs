//! Design session: the single owner of one editing session's state.
//!
//! The session decides which garment view is active and which areas are in
//! effect. It routes user actions and surface events into the constraint
//! engine, the serializer and pricing. It is split into submodules:
//! - `objects`: text placement, the floating text editor, deletion, surface events
//! - `artwork`: two-phase artwork placement

mod artwork;
mod objects;

pub use objects::TextUpdate;

use garmentkit_core::{
    ArtworkRequestId, DesignerError, DesignerEvent, ObjectId, ProductRecord, ProductVariant,
};
use garmentkit_settings::Config;
use std::collections::{BTreeMap, HashMap};

use crate::area::{resolve_areas, Area, GarmentView};
use crate::catalog::{garment_color_variants, view_image};
use crate::constraint;
use crate::membership::active_area;
use crate::model::{ApproximateTextMeasure, TextMeasure};
use crate::pricing::{self, TechniqueSet};
use crate::scene::Scene;
use crate::serialization::{CustomizationDocument, DocumentSerializer};

use artwork::PendingArtwork;

type Listener = Box<dyn Fn(&DesignerEvent)>;

pub struct DesignSession {
    product: ProductRecord,
    variant_id: Option<String>,
    config: Config,
    view: GarmentView,
    /// Bumped on every view switch.
    view_epoch: u64,
    areas: BTreeMap<GarmentView, Vec<Area>>,
    scene: Scene,
    techniques: TechniqueSet,
    customization_count: usize,
    quantity: u32,
    measure: Box<dyn TextMeasure>,
    pending_artwork: HashMap<ArtworkRequestId, PendingArtwork>,
    editor: Option<ObjectId>,
    listeners: Vec<Listener>,
}

impl DesignSession {
    /// Starts a session on the front view with the default colour variant
    /// selected.
    pub fn new(product: ProductRecord, config: Config) -> Self {
        let areas = GarmentView::ALL
            .iter()
            .map(|&view| (view, resolve_areas(view, product.area_override())))
            .collect();
        let variant_id = garment_color_variants(&product, &config.pricing.garment_colors)
            .first()
            .copied()
            .or_else(|| product.variants.first())
            .map(|v| v.id.clone());
        let quantity = config.pricing.default_quantity.max(1);

        tracing::info!(
            "Design session started for product {} (variant {:?})",
            product.id,
            variant_id
        );

        Self {
            product,
            variant_id,
            config,
            view: GarmentView::default(),
            view_epoch: 0,
            areas,
            scene: Scene::new(),
            techniques: TechniqueSet::new(),
            customization_count: 0,
            quantity,
            measure: Box::new(ApproximateTextMeasure::default()),
            pending_artwork: HashMap::new(),
            editor: None,
            listeners: Vec::new(),
        }
    }

    /// Replaces the text metrics used to size text elements.
    pub fn with_text_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    /// Registers a listener for session notifications.
    pub fn on_event<F>(&mut self, listener: F)
    where
        F: Fn(&DesignerEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn emit(&self, event: DesignerEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    pub fn product(&self) -> &ProductRecord {
        &self.product
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> GarmentView {
        self.view
    }

    /// Areas in effect for `view`.
    pub fn areas(&self, view: GarmentView) -> &[Area] {
        self.areas.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The placement target of the current view.
    pub fn active_area(&self) -> Option<&Area> {
        active_area(self.areas(self.view))
    }

    pub(crate) fn find_area(&self, view: GarmentView, area_id: &str) -> Option<&Area> {
        self.areas(view).iter().find(|a| a.id == area_id)
    }

    pub fn view_image(&self) -> Option<&str> {
        view_image(&self.product, self.view)
    }

    pub fn customization_count(&self) -> usize {
        self.customization_count
    }

    pub fn techniques(&self) -> &TechniqueSet {
        &self.techniques
    }

    /// Switches the active view.
    ///
    /// Handlers of the old view's objects are removed; objects created under
    /// the new view get their handler reinstalled against their own area.
    /// Objects never move between views.
    pub fn select_view(&mut self, view: GarmentView) {
        if view == self.view {
            return;
        }
        let previous = self.view;

        for id in self.scene.store.ids_in_view(previous) {
            if let Some(object) = self.scene.get_mut(id) {
                constraint::uninstall(object);
            }
        }
        self.clear_selection();

        self.view = view;
        self.view_epoch += 1;

        let mode = self.config.designer.scale_clamp;
        for id in self.scene.store.ids_in_view(view) {
            let Some(object) = self.scene.store.get(id) else {
                continue;
            };
            let Some(area) = self.find_area(view, &object.area_id).cloned() else {
                tracing::warn!(
                    "Object {} references area '{}' which is not defined for {}",
                    id,
                    object.area_id,
                    view
                );
                continue;
            };
            if let Some(object) = self.scene.get_mut(id) {
                constraint::install(object, &area, mode);
            }
        }

        tracing::info!("Switched view {} -> {}", previous, view);
        self.emit(DesignerEvent::ViewChanged {
            view: view.to_string(),
        });
    }

    pub fn color_variants(&self) -> Vec<&ProductVariant> {
        garment_color_variants(&self.product, &self.config.pricing.garment_colors)
    }

    pub fn variant(&self) -> Option<&ProductVariant> {
        self.variant_id
            .as_deref()
            .and_then(|id| self.product.variant(id))
    }

    pub fn select_variant(&mut self, variant_id: &str) -> Result<(), DesignerError> {
        if self.product.variant(variant_id).is_none() {
            return Err(DesignerError::UnknownVariant(variant_id.to_string()));
        }
        tracing::debug!("Selected variant {}", variant_id);
        self.variant_id = Some(variant_id.to_string());
        Ok(())
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Sets the order quantity; values below one are raised to one.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    pub fn unit_price(&self) -> f64 {
        pricing::unit_price(
            self.variant().and_then(|v| v.price),
            &self.techniques,
            self.customization_count,
            self.config.pricing.per_item_fee,
        )
    }

    pub fn order_total(&self) -> f64 {
        pricing::order_total(self.unit_price(), self.quantity)
    }

    /// Derives the customization document from the current scene.
    ///
    /// Each view's objects are resolved against that view's areas only.
    pub fn export_document(&self) -> CustomizationDocument {
        let serializer = DocumentSerializer::new(self.config.designer.membership);
        let customizations = GarmentView::ALL
            .iter()
            .flat_map(|&view| {
                serializer.customizations(self.scene.objects_in_view(view), self.areas(view))
            })
            .collect();

        CustomizationDocument {
            product_id: self.product.id.clone(),
            variant_id: self.variant_id.clone().unwrap_or_default(),
            customizations,
        }
    }
}
