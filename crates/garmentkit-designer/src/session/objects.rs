use garmentkit_core::{DesignerError, DesignerEvent, ObjectId, Point, SceneEvent};
use serde::{Deserialize, Serialize};

use super::DesignSession;
use crate::area::Area;
use crate::constraint::{self, ConstraintOutcome};
use crate::model::{Element, ElementKind, SceneObject, TextElement};

/// Changes applied to a text element; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextUpdate {
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub fill_color: Option<String>,
    pub font_size: Option<f64>,
}

impl TextUpdate {
    pub fn font_size(size: f64) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }
}

impl DesignSession {
    fn check_text_length(&self, text: &str) -> Result<(), DesignerError> {
        let length = text.chars().count();
        let max = self.config.text.max_characters;
        if length > max {
            return Err(DesignerError::TextTooLong { length, max });
        }
        Ok(())
    }

    /// Places a text element with the default style in the active area.
    pub fn add_text(&mut self, text: &str) -> Result<ObjectId, DesignerError> {
        self.add_styled_text(text, TextUpdate::default())
    }

    /// Places a text element in the active area, centred.
    ///
    /// Fails without touching the scene if the view has no area, the area
    /// does not accept text, or the text is too long.
    pub fn add_styled_text(
        &mut self,
        text: &str,
        style: TextUpdate,
    ) -> Result<ObjectId, DesignerError> {
        self.check_text_length(text)?;
        let area = self.placement_area(ElementKind::Text)?;

        let settings = &self.config.text;
        let element = TextElement::new(
            text,
            style
                .font_family
                .unwrap_or_else(|| settings.default_font().to_string()),
            style
                .fill_color
                .unwrap_or_else(|| settings.default_color().to_string()),
            settings.clamp_font_size(style.font_size.unwrap_or(settings.default_font_size)),
            self.measure.as_ref(),
        );

        let id = self.scene.generate_id();
        let mut object = SceneObject::new(
            id,
            self.view,
            area.id.clone(),
            area.center(),
            Element::Text(element),
        );
        constraint::install(&mut object, &area, self.config.designer.scale_clamp);
        constraint::fire(&mut object);

        self.insert_placed(object);
        self.select(Some(id));
        Ok(id)
    }

    /// Active area of the current view, checked against `kind`.
    pub(crate) fn placement_area(&self, kind: ElementKind) -> Result<Area, DesignerError> {
        let Some(area) = self.active_area() else {
            tracing::warn!("No customization area for {}; ignoring add {}", self.view, kind);
            return Err(DesignerError::NoActiveArea {
                view: self.view.to_string(),
            });
        };
        let accepted = match kind {
            ElementKind::Text => area.kind.accepts_text(),
            ElementKind::Image => area.kind.accepts_image(),
        };
        if !accepted {
            return Err(DesignerError::AreaKindMismatch {
                area_id: area.id.clone(),
                element: kind.to_string(),
            });
        }
        Ok(area.clone())
    }

    pub(crate) fn insert_placed(&mut self, object: SceneObject) {
        let id = object.id;
        let area_id = object.area_id.clone();
        self.scene.add(object);
        self.customization_count += 1;
        tracing::info!("Added object {} to area '{}'", id, area_id);
        self.emit(DesignerEvent::ObjectAdded { id, area_id });
    }

    /// Object bound to the floating text editor, if open.
    pub fn editor_target(&self) -> Option<ObjectId> {
        self.editor
    }

    /// Changes the selection. Selecting a text object binds the editor to
    /// it; anything else closes the editor.
    pub fn select(&mut self, id: Option<ObjectId>) {
        let id = id.filter(|&id| {
            self.scene
                .get(id)
                .is_some_and(|object| object.view == self.view)
        });
        if self.scene.select(id) {
            self.emit(DesignerEvent::SelectionChanged { id });
        }

        let text_target = id.filter(|&id| {
            self.scene
                .get(id)
                .is_some_and(|object| object.kind() == ElementKind::Text)
        });
        if text_target != self.editor {
            self.close_editor();
            if let Some(id) = text_target {
                self.editor = Some(id);
                self.emit(DesignerEvent::EditorOpened { id });
            }
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        self.select(None);
    }

    fn close_editor(&mut self) {
        if let Some(id) = self.editor.take() {
            self.emit(DesignerEvent::EditorClosed { id });
        }
    }

    /// Edits a text element of the active view and re-runs its constraint,
    /// since a new text, font or size changes the element's natural size.
    pub fn update_text(&mut self, id: ObjectId, update: TextUpdate) -> Result<(), DesignerError> {
        if let Some(text) = &update.text {
            self.check_text_length(text)?;
        }
        let settings = &self.config.text;
        let view = self.view;
        let object = self
            .scene
            .store
            .get_mut(id)
            .filter(|object| object.view == view)
            .ok_or(DesignerError::UnknownObject(id))?;
        let element = object
            .as_text_mut()
            .ok_or(DesignerError::UnknownObject(id))?;

        if let Some(text) = update.text {
            element.text = text;
        }
        if let Some(font) = update.font_family {
            element.font_family = font;
        }
        if let Some(color) = update.fill_color {
            element.fill_color = color;
        }
        if let Some(size) = update.font_size {
            element.font_size = settings.clamp_font_size(size);
        }
        element.remeasure(self.measure.as_ref());
        constraint::fire(object);

        self.emit(DesignerEvent::RedrawRequested { id });
        Ok(())
    }

    fn step_font_size(&mut self, id: ObjectId, direction: f64) -> Result<f64, DesignerError> {
        let current = self
            .scene
            .get(id)
            .and_then(SceneObject::as_text)
            .map(|t| t.font_size)
            .ok_or(DesignerError::UnknownObject(id))?;
        let step = self.config.text.font_size_step;
        self.update_text(id, TextUpdate::font_size(current + direction * step))?;
        Ok(self
            .scene
            .get(id)
            .and_then(SceneObject::as_text)
            .map_or(current, |t| t.font_size))
    }

    /// Increases the font size by one step; returns the new size.
    pub fn grow_text(&mut self, id: ObjectId) -> Result<f64, DesignerError> {
        self.step_font_size(id, 1.0)
    }

    /// Decreases the font size by one step; returns the new size.
    pub fn shrink_text(&mut self, id: ObjectId) -> Result<f64, DesignerError> {
        self.step_font_size(id, -1.0)
    }

    /// Deletes an object, closing the editor if it was bound to it.
    pub fn remove(&mut self, id: ObjectId) -> Result<SceneObject, DesignerError> {
        if self.editor == Some(id) {
            self.close_editor();
        }
        let was_selected = self.scene.selected_id() == Some(id);
        let mut object = self
            .scene
            .remove(id)
            .ok_or(DesignerError::UnknownObject(id))?;
        constraint::uninstall(&mut object);
        self.customization_count = self.customization_count.saturating_sub(1);

        tracing::info!("Removed object {}", id);
        self.emit(DesignerEvent::ObjectRemoved { id });
        if was_selected {
            self.emit(DesignerEvent::SelectionChanged { id: None });
        }
        Ok(object)
    }

    /// Deletes the selected object, if any.
    pub fn delete_selected(&mut self) -> Option<ObjectId> {
        let id = self.scene.selected_id()?;
        self.remove(id).ok().map(|object| object.id)
    }

    /// Routes one raw interaction from the rendering surface.
    ///
    /// Move and scale events are applied tentatively and then corrected by
    /// the object's handler. Objects of inactive views have no handler and
    /// are left alone. Non-finite positions and non-positive scales are
    /// rejected and the object is redrawn at its last valid geometry.
    pub fn handle_event(&mut self, event: SceneEvent) -> Result<ConstraintOutcome, DesignerError> {
        match event {
            SceneEvent::Moving { id, center } => self.apply_raw(id, center, None),
            SceneEvent::Scaling {
                id,
                center,
                scale_x,
                scale_y,
            } => self.apply_raw(id, center, Some((scale_x, scale_y))),
            SceneEvent::SelectionChanged { id } => {
                self.select(id);
                Ok(ConstraintOutcome::Unchanged)
            }
            SceneEvent::ObjectRemoved { id } => {
                self.remove(id)?;
                Ok(ConstraintOutcome::Unchanged)
            }
        }
    }

    fn apply_raw(
        &mut self,
        id: ObjectId,
        center: Point,
        scale: Option<(f64, f64)>,
    ) -> Result<ConstraintOutcome, DesignerError> {
        let view = self.view;
        let object = self
            .scene
            .get_mut(id)
            .ok_or(DesignerError::UnknownObject(id))?;
        if object.view != view {
            tracing::debug!("Ignoring event for object {} outside {}", id, view);
            return Ok(ConstraintOutcome::Unchanged);
        }

        let valid_center = center.x.is_finite() && center.y.is_finite();
        let valid_scale =
            scale.map_or(true, |(sx, sy)| sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0);
        let outcome = if valid_center && valid_scale {
            object.geometry.center = center;
            if let Some((sx, sy)) = scale {
                object.geometry.scale_x = sx;
                object.geometry.scale_y = sy;
            }
            constraint::fire(object)
        } else {
            tracing::warn!("Rejected invalid geometry for object {}", id);
            ConstraintOutcome::Corrected
        };

        if outcome.needs_redraw() {
            self.emit(DesignerEvent::RedrawRequested { id });
        }
        Ok(outcome)
    }
}
