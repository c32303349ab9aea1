//! Scripted editing sessions.
//!
//! A script is a JSON array of [`SessionCommand`]s replayed in order
//! against a fresh [`DesignSession`]. Object ids are assigned from 1 in
//! creation order, so scripts can refer to the objects they create.

use anyhow::Context;
use garmentkit_core::{ObjectId, SceneEvent};
use garmentkit_designer::{
    ArtworkLoader, ArtworkSource, CustomizationDocument, DesignSession, GarmentView, TextUpdate,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    SelectView {
        view: GarmentView,
    },
    AddText {
        text: String,
        #[serde(default)]
        style: TextUpdate,
    },
    UpdateText {
        id: ObjectId,
        update: TextUpdate,
    },
    GrowText {
        id: ObjectId,
    },
    ShrinkText {
        id: ObjectId,
    },
    AddArtwork {
        artwork: ArtworkSource,
        #[serde(default)]
        technique: Option<String>,
    },
    /// A raw interaction as the rendering surface would report it.
    Surface {
        event: SceneEvent,
    },
    Select {
        id: Option<ObjectId>,
    },
    Delete {
        id: ObjectId,
    },
    DeleteSelected,
    SelectVariant {
        variant_id: String,
    },
    SetQuantity {
        quantity: u32,
    },
}

/// What a replayed session produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub document: CustomizationDocument,
    pub unit_price: f64,
    pub quantity: u32,
    pub order_total: f64,
}

impl SessionSummary {
    pub fn from_session(session: &DesignSession) -> Self {
        Self {
            document: session.export_document(),
            unit_price: session.unit_price(),
            quantity: session.quantity(),
            order_total: session.order_total(),
        }
    }
}

async fn apply(
    session: &mut DesignSession,
    loader: &dyn ArtworkLoader,
    command: SessionCommand,
) -> anyhow::Result<()> {
    match command {
        SessionCommand::SelectView { view } => session.select_view(view),
        SessionCommand::AddText { text, style } => {
            session.add_styled_text(&text, style)?;
        }
        SessionCommand::UpdateText { id, update } => session.update_text(id, update)?,
        SessionCommand::GrowText { id } => {
            session.grow_text(id)?;
        }
        SessionCommand::ShrinkText { id } => {
            session.shrink_text(id)?;
        }
        SessionCommand::AddArtwork { artwork, technique } => {
            session
                .add_artwork(loader, &artwork, technique.as_deref())
                .await?;
        }
        SessionCommand::Surface { event } => {
            session.handle_event(event)?;
        }
        SessionCommand::Select { id } => session.select(id),
        SessionCommand::Delete { id } => {
            session.remove(id)?;
        }
        SessionCommand::DeleteSelected => {
            if session.delete_selected().is_none() {
                tracing::warn!("delete_selected with nothing selected");
            }
        }
        SessionCommand::SelectVariant { variant_id } => session.select_variant(&variant_id)?,
        SessionCommand::SetQuantity { quantity } => session.set_quantity(quantity),
    }
    Ok(())
}

/// Replays `commands` in order, stopping at the first failing one.
pub async fn run_script(
    session: &mut DesignSession,
    loader: &dyn ArtworkLoader,
    commands: Vec<SessionCommand>,
) -> anyhow::Result<SessionSummary> {
    for (index, command) in commands.into_iter().enumerate() {
        tracing::debug!("Step {}: {:?}", index + 1, command);
        let label = format!("script step {} ({:?})", index + 1, command);
        apply(session, loader, command).await.context(label)?;
    }
    Ok(SessionSummary::from_session(session))
}
