//! Placement constraint engine.
//!
//! A [`ConstraintHandler`] rewrites an object's scale and position after a
//! raw move/scale interaction so that its bounding box ends inside the
//! owning area. Each object owns at most one [`ConstraintRegistration`];
//! installing a new one replaces the old one, so handlers never stack.
//!
//! Per axis the handler:
//! 1. computes the bounding box of the raw geometry,
//! 2. shrinks the scale if the box is wider/taller than the area,
//! 3. recomputes the box,
//! 4. shifts the centre back inside the area edges,
//! 5. commits only if something changed.

use garmentkit_core::{Bounds, Size, GEOMETRY_EPSILON};
use garmentkit_settings::ScaleClampMode;
use uuid::Uuid;

use crate::area::Area;
use crate::model::{element_bounds, Geometry, SceneObject};

/// Result of running a handler once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOutcome {
    /// Raw geometry already satisfied the area; nothing to redraw.
    Unchanged,
    /// Geometry was corrected and the object needs a redraw.
    Corrected,
}

impl ConstraintOutcome {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, ConstraintOutcome::Corrected)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintHandler {
    area_id: String,
    bounds: Bounds,
    mode: ScaleClampMode,
}

impl ConstraintHandler {
    pub fn new(area: &Area, mode: ScaleClampMode) -> Self {
        Self {
            area_id: area.id.clone(),
            bounds: area.bounds(),
            mode,
        }
    }

    pub fn area_id(&self) -> &str {
        &self.area_id
    }

    pub fn mode(&self) -> ScaleClampMode {
        self.mode
    }

    /// Computes constrained geometry for an element of `natural` size and
    /// `rotation` degrees whose surface-reported geometry is `raw`.
    pub fn constrain(&self, natural: Size, rotation: f64, raw: Geometry) -> Geometry {
        let area_w = self.bounds.width();
        let area_h = self.bounds.height();
        let bounds_of = |g: &Geometry| element_bounds(natural, g, rotation);

        let mut g = raw;
        let b = bounds_of(&g);
        let over_w = b.width() > area_w + GEOMETRY_EPSILON;
        let over_h = b.height() > area_h + GEOMETRY_EPSILON;

        match self.mode {
            ScaleClampMode::Independent => {
                // Never grows an axis: for unrotated elements this equals
                // area / natural exactly when the axis overflows.
                if over_w && natural.width > 0.0 {
                    g.scale_x = (area_w / natural.width)
                        .min(g.scale_x.abs())
                        .copysign(g.scale_x);
                }
                if over_h && natural.height > 0.0 {
                    g.scale_y = (area_h / natural.height)
                        .min(g.scale_y.abs())
                        .copysign(g.scale_y);
                }
            }
            ScaleClampMode::Uniform => {
                if over_w || over_h {
                    let k = (area_w / b.width()).min(area_h / b.height());
                    g.scale_x *= k;
                    g.scale_y *= k;
                }
            }
        }

        // A rotated box can still overflow after per-axis clamping.
        let b = bounds_of(&g);
        if b.width() > area_w + GEOMETRY_EPSILON || b.height() > area_h + GEOMETRY_EPSILON {
            let k = (area_w / b.width()).min(area_h / b.height());
            g.scale_x *= k;
            g.scale_y *= k;
        }

        let b = bounds_of(&g);
        let area = &self.bounds;
        g.center.x = clamp_center(g.center.x, b.width() / 2.0, area.min_x, area.max_x);
        g.center.y = clamp_center(g.center.y, b.height() / 2.0, area.min_y, area.max_y);
        g
    }

    /// Rewrites `object`'s geometry in place.
    pub fn apply(&self, object: &mut SceneObject) -> ConstraintOutcome {
        let raw = object.geometry;
        let constrained = self.constrain(
            object.element.natural_size(),
            object.element.rotation(),
            raw,
        );
        if constrained == raw {
            return ConstraintOutcome::Unchanged;
        }
        tracing::debug!(
            "Constrained object {} to area {}: {:?} -> {:?}",
            object.id,
            self.area_id,
            raw,
            constrained
        );
        object.geometry = constrained;
        ConstraintOutcome::Corrected
    }
}

fn clamp_center(center: f64, half_extent: f64, min: f64, max: f64) -> f64 {
    let mut c = center;
    if c - half_extent < min - GEOMETRY_EPSILON {
        c = min + half_extent;
    }
    if c + half_extent > max + GEOMETRY_EPSILON {
        c = max - half_extent;
    }
    c
}

/// The handler currently installed on one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRegistration {
    token: Uuid,
    handler: ConstraintHandler,
}

impl ConstraintRegistration {
    pub fn token(&self) -> Uuid {
        self.token
    }

    pub fn handler(&self) -> &ConstraintHandler {
        &self.handler
    }
}

/// Installs a handler for `area` on `object`, returning the registration it
/// replaced.
pub fn install(
    object: &mut SceneObject,
    area: &Area,
    mode: ScaleClampMode,
) -> Option<ConstraintRegistration> {
    let registration = ConstraintRegistration {
        token: Uuid::new_v4(),
        handler: ConstraintHandler::new(area, mode),
    };
    object.constraint.replace(registration)
}

/// Removes the handler from `object`.
pub fn uninstall(object: &mut SceneObject) -> Option<ConstraintRegistration> {
    object.constraint.take()
}

/// Runs the installed handler, if any.
pub fn fire(object: &mut SceneObject) -> ConstraintOutcome {
    match object.constraint.clone() {
        Some(registration) => registration.handler.apply(object),
        None => ConstraintOutcome::Unchanged,
    }
}
