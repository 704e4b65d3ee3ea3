//! Area manager: creates, tracks, and routes commands to areas.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sketchduel_game::{Clock, RandomPicker, ShapeDealer, ShapeLibrary, ShapePicker};
use sketchduel_protocol::{AreaId, AreaSnapshot, Command, CommandResponse};
use tokio::sync::mpsc;

use crate::area::spawn_area;
use crate::{AreaConfig, AreaError, AreaHandle, ConfigError, Participant, SessionDispatcher};

/// Counter for generating unique area IDs.
static NEXT_AREA_ID: AtomicU64 = AtomicU64::new(1);

/// Owns every running area in the process.
///
/// All areas share one config, one shape library and one clock. Each gets
/// its own dispatcher and its own picker.
pub struct AreaManager {
    areas: HashMap<AreaId, AreaHandle>,
    config: AreaConfig,
    library: Arc<dyn ShapeLibrary>,
    clock: Arc<dyn Clock>,
}

impl AreaManager {
    /// # Errors
    /// Returns the first problem [`AreaConfig::validate`] finds.
    pub fn new(
        config: AreaConfig,
        library: Arc<dyn ShapeLibrary>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            areas: HashMap::new(),
            config,
            library,
            clock,
        })
    }

    pub fn config(&self) -> &AreaConfig {
        &self.config
    }

    /// Spawns an area that picks reference figures at random.
    pub fn create_area(&mut self) -> AreaId {
        self.create_area_with_picker(RandomPicker::new())
    }

    /// Spawns an area with a caller-chosen picker.
    pub fn create_area_with_picker(&mut self, picker: impl ShapePicker + 'static) -> AreaId {
        let area_id = AreaId(NEXT_AREA_ID.fetch_add(1, Ordering::Relaxed));
        let dealer = ShapeDealer::new(
            self.config.catalog.clone(),
            Arc::clone(&self.library),
            picker,
        );
        let dispatcher = SessionDispatcher::new(area_id, dealer, Arc::clone(&self.clock));
        let handle = spawn_area(dispatcher, self.config.channel_size);
        self.areas.insert(area_id, handle);
        tracing::info!(%area_id, "area created");
        area_id
    }

    /// Returns a clone of the handle for `area_id`.
    ///
    /// Useful when callers need to talk to an area without holding the
    /// manager.
    pub fn area(&self, area_id: AreaId) -> Result<AreaHandle, AreaError> {
        self.areas
            .get(&area_id)
            .cloned()
            .ok_or(AreaError::NotFound(area_id))
    }

    /// Routes a command to an area.
    pub async fn handle(
        &self,
        area_id: AreaId,
        command: Command,
        participant: Participant,
    ) -> Result<CommandResponse, AreaError> {
        self.handle_ref(area_id)?.handle(command, participant).await
    }

    /// Routes a JSON-encoded command to an area.
    pub async fn handle_encoded(
        &self,
        area_id: AreaId,
        bytes: Vec<u8>,
        participant: Participant,
    ) -> Result<CommandResponse, AreaError> {
        self.handle_ref(area_id)?
            .handle_encoded(bytes, participant)
            .await
    }

    pub async fn snapshot(&self, area_id: AreaId) -> Result<AreaSnapshot, AreaError> {
        self.handle_ref(area_id)?.snapshot().await
    }

    pub async fn subscribe(
        &self,
        area_id: AreaId,
    ) -> Result<(AreaSnapshot, mpsc::UnboundedReceiver<AreaSnapshot>), AreaError> {
        self.handle_ref(area_id)?.subscribe().await
    }

    /// Shuts an area down and forgets it.
    pub async fn destroy_area(&mut self, area_id: AreaId) -> Result<(), AreaError> {
        let handle = self
            .areas
            .remove(&area_id)
            .ok_or(AreaError::NotFound(area_id))?;

        // An actor that already stopped has nothing left to shut down.
        let _ = handle.shutdown().await;

        tracing::info!(%area_id, "area destroyed");
        Ok(())
    }

    /// Returns the number of active areas.
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Lists all active area IDs, lowest first.
    pub fn area_ids(&self) -> Vec<AreaId> {
        let mut ids: Vec<_> = self.areas.keys().copied().collect();
        ids.sort();
        ids
    }

    fn handle_ref(&self, area_id: AreaId) -> Result<&AreaHandle, AreaError> {
        self.areas.get(&area_id).ok_or(AreaError::NotFound(area_id))
    }
}

impl std::fmt::Debug for AreaManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AreaManager")
            .field("areas", &self.area_ids())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
