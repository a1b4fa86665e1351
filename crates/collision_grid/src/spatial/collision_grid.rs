//! Uniform-grid collision activation
//!
//! Static box colliders under a scan root are bucketed once by cell and
//! switched off in the registration bridge. Every step, the cells within
//! `active_radius` of each dynamic object form the active set; only the
//! colliders in cells that entered or left that set since the previous
//! step are registered or unregistered.
//!
//! ```text
//! previous: {A, B}      current: {B, C}
//!   A  exited  -> unregister colliders in A
//!   C  entered -> register colliders in C
//!   B  stayed  -> untouched
//! ```

use std::collections::{HashMap, HashSet};

use crate::core::config::{ConfigError, GridConfig};
use crate::foundation::collections::{ColliderHandle, NodeId};
use crate::foundation::math::Vec3;
use crate::physics::RegistrationBridge;
use crate::scene::SceneGraph;
use crate::spatial::cell::CellCoord;

/// What a single [`CollisionGrid::step`] changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Cells active now that were not active on the previous step
    pub cells_entered: usize,
    /// Cells active on the previous step that are not active now
    pub cells_exited: usize,
    /// `register` calls issued to the bridge
    pub colliders_enabled: usize,
    /// `unregister` calls issued to the bridge by the diff (scan not included)
    pub colliders_disabled: usize,
    /// The step short-circuited because no dynamic objects are tracked
    pub skipped: bool,
}

impl StepReport {
    /// Check if no cells entered or exited the active set
    pub fn is_empty(&self) -> bool {
        self.cells_entered == 0 && self.cells_exited == 0
    }
}

/// Snapshot of grid occupancy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridMetrics {
    /// Static colliders bucketed by the scan
    pub static_colliders: usize,
    /// Cells holding at least one static collider
    pub occupied_cells: usize,
    /// Cells in the current active set
    pub active_cells: usize,
    /// Static colliders currently registered through the bridge
    pub registered_colliders: usize,
    /// Tracked dynamic objects
    pub dynamic_objects: usize,
    /// Steps taken, including skipped ones
    pub steps: u64,
}

/// Activates static colliders near dynamic objects
///
/// The grid holds handles only; the scene passed to [`step`](Self::step)
/// owns the nodes and colliders.
pub struct CollisionGrid<B: RegistrationBridge> {
    config: GridConfig,
    bridge: B,
    root: Option<NodeId>,
    initialized: bool,

    /// Static colliders per cell, fixed at scan time
    static_colliders: HashMap<CellCoord, Vec<ColliderHandle>>,
    static_count: usize,

    dynamic_objects: Vec<NodeId>,

    /// Cells active on the current step
    active_cells: HashSet<CellCoord>,
    /// Cells active on the previous step
    previous_cells: HashSet<CellCoord>,

    /// Static colliders this grid has registered through the bridge
    registered: HashSet<ColliderHandle>,

    steps: u64,
}

impl<B: RegistrationBridge> CollisionGrid<B> {
    /// Create a grid with 8x8x8 cells and an activation radius of 1
    pub fn new(bridge: B) -> Self {
        Self::from_parts(GridConfig::default(), bridge)
    }

    /// Create a grid with a validated configuration
    pub fn with_config(config: GridConfig, bridge: B) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, bridge))
    }

    fn from_parts(config: GridConfig, bridge: B) -> Self {
        Self {
            config,
            bridge,
            root: None,
            initialized: false,
            static_colliders: HashMap::new(),
            static_count: 0,
            dynamic_objects: Vec::new(),
            active_cells: HashSet::new(),
            previous_cells: HashSet::new(),
            registered: HashSet::new(),
            steps: 0,
        }
    }

    /// Builder pattern: set the scan root
    #[must_use]
    pub fn with_root(mut self, root: NodeId) -> Self {
        self.set_root(root);
        self
    }

    /// Set the node whose subtree holds the static geometry
    ///
    /// The subtree is scanned on the next step. Once a scan has completed,
    /// changing the root has no effect on the buckets.
    pub fn set_root(&mut self, root: NodeId) {
        if self.initialized {
            log::debug!("CollisionGrid: root set after static scan, buckets unchanged");
        }
        self.root = Some(root);
    }

    /// Start tracking a dynamic object
    ///
    /// Duplicates are allowed; each entry must be matched by one
    /// [`unregister_dynamic`](Self::unregister_dynamic).
    pub fn register_dynamic(&mut self, object: NodeId) {
        self.dynamic_objects.push(object);
    }

    /// Stop tracking one entry for `object`
    ///
    /// Returns `false` (and changes nothing) if it was not tracked.
    pub fn unregister_dynamic(&mut self, object: NodeId) -> bool {
        match self.dynamic_objects.iter().position(|&o| o == object) {
            Some(index) => {
                self.dynamic_objects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Cell containing a world position
    pub fn cell_of(&self, position: Vec3) -> CellCoord {
        CellCoord::containing(position, self.config.cell_size)
    }

    /// Advance one simulation tick
    pub fn step<S: SceneGraph + ?Sized>(&mut self, scene: &S) -> StepReport {
        self.steps += 1;

        if !self.initialized {
            self.try_scan(scene);
        }

        if self.dynamic_objects.is_empty() {
            return StepReport {
                skipped: true,
                ..StepReport::default()
            };
        }

        std::mem::swap(&mut self.active_cells, &mut self.previous_cells);
        self.active_cells.clear();

        let radius = self.config.active_radius;
        for &object in &self.dynamic_objects {
            let Some(position) = scene.world_position(object) else {
                log::warn!("CollisionGrid: dynamic object {:?} no longer resolves", object);
                continue;
            };
            let center = CellCoord::containing(position, self.config.cell_size);
            self.active_cells.extend(center.neighborhood(radius));
        }

        let mut exited: Vec<CellCoord> = self.previous_cells.difference(&self.active_cells).copied().collect();
        let mut entered: Vec<CellCoord> = self.active_cells.difference(&self.previous_cells).copied().collect();
        exited.sort_unstable();
        entered.sort_unstable();

        let mut report = StepReport {
            cells_entered: entered.len(),
            cells_exited: exited.len(),
            ..StepReport::default()
        };

        for cell in &exited {
            report.colliders_disabled += self.set_cell_enabled(*cell, false);
        }
        for cell in &entered {
            report.colliders_enabled += self.set_cell_enabled(*cell, true);
        }

        if !report.is_empty() {
            log::debug!(
                "CollisionGrid: {} cells entered, {} exited ({} enabled, {} disabled)",
                report.cells_entered,
                report.cells_exited,
                report.colliders_enabled,
                report.colliders_disabled
            );
        }

        report
    }

    /// Scan the root subtree if the root resolves
    fn try_scan<S: SceneGraph + ?Sized>(&mut self, scene: &S) {
        let Some(root) = self.root else {
            return;
        };
        if scene.world_position(root).is_none() {
            log::warn!("CollisionGrid: scan root {:?} does not resolve, retrying next step", root);
            return;
        }

        self.scan(scene, root);
        self.initialized = true;

        // Cells activated before the scan saw empty buckets; forget them so
        // the next step with dynamic objects enters every active cell
        self.active_cells.clear();
        self.previous_cells.clear();
        log::info!(
            "CollisionGrid: scanned {} static colliders into {} cells",
            self.static_count,
            self.static_colliders.len()
        );
    }

    /// Depth-first walk bucketing every static collider and unregistering it
    fn scan<S: SceneGraph + ?Sized>(&mut self, scene: &S, root: NodeId) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let (Some(collider), Some(position)) = (scene.static_collider(node), scene.world_position(node)) {
                let cell = CellCoord::containing(position, self.config.cell_size);
                self.static_colliders.entry(cell).or_default().push(collider);
                self.static_count += 1;

                self.bridge.unregister(collider);
                self.registered.remove(&collider);
            }
            stack.extend(scene.children(node).iter().rev());
        }
    }

    /// Enable or disable every collider bucketed in `cell`; returns the
    /// number of bridge calls made
    fn set_cell_enabled(&mut self, cell: CellCoord, enabled: bool) -> usize {
        let Some(colliders) = self.static_colliders.get(&cell) else {
            return 0;
        };

        let mut calls = 0;
        for &collider in colliders {
            let changed = if enabled {
                Self::enable(&mut self.bridge, &mut self.registered, collider)
            } else {
                Self::disable(&mut self.bridge, &mut self.registered, collider)
            };
            if changed {
                calls += 1;
            }
        }
        calls
    }

    fn enable(bridge: &mut B, registered: &mut HashSet<ColliderHandle>, collider: ColliderHandle) -> bool {
        if !registered.insert(collider) {
            return false;
        }
        log::trace!("CollisionGrid: register {:?}", collider);
        bridge.register(collider);
        true
    }

    fn disable(bridge: &mut B, registered: &mut HashSet<ColliderHandle>, collider: ColliderHandle) -> bool {
        if !registered.remove(&collider) {
            return false;
        }
        log::trace!("CollisionGrid: unregister {:?}", collider);
        bridge.unregister(collider);
        true
    }

    /// Cells in the current active set
    pub fn active_cells(&self) -> &HashSet<CellCoord> {
        &self.active_cells
    }

    /// Check if a static collider is currently registered by this grid
    pub fn is_registered(&self, collider: ColliderHandle) -> bool {
        self.registered.contains(&collider)
    }

    /// Static colliders bucketed in `cell`
    pub fn colliders_in(&self, cell: CellCoord) -> &[ColliderHandle] {
        self.static_colliders.get(&cell).map_or(&[], Vec::as_slice)
    }

    /// Tracked dynamic objects, in registration order
    pub fn dynamic_objects(&self) -> &[NodeId] {
        &self.dynamic_objects
    }

    /// Check if the static scan has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The scan root, if set
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Grid configuration
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The registration bridge
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// The registration bridge, mutably
    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    /// Consume the grid and return its bridge
    pub fn into_bridge(self) -> B {
        self.bridge
    }

    /// Current occupancy numbers
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics {
            static_colliders: self.static_count,
            occupied_cells: self.static_colliders.len(),
            active_cells: self.active_cells.len(),
            registered_colliders: self.registered.len(),
            dynamic_objects: self.dynamic_objects.len(),
            steps: self.steps,
        }
    }
}

impl<B: RegistrationBridge + Default> Default for CollisionGrid<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: RegistrationBridge> std::fmt::Debug for CollisionGrid<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionGrid")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("metrics", &self.metrics())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BroadPhase;

    #[test]
    fn test_with_config_rejects_zero_cell_size() {
        let config = GridConfig::default().with_cell_size(Vec3::new(8.0, 0.0, 8.0));
        assert!(CollisionGrid::with_config(config, BroadPhase::new()).is_err());
    }

    #[test]
    fn test_cell_of_uses_config() {
        let config = GridConfig::new(2.0, 0);
        let grid = CollisionGrid::with_config(config, BroadPhase::new()).unwrap();
        assert_eq!(grid.cell_of(Vec3::new(3.0, -0.1, 4.0)), CellCoord::new(1, -1, 2));
    }

    #[test]
    fn test_step_report_is_empty() {
        assert!(StepReport::default().is_empty());
        let report = StepReport {
            cells_exited: 1,
            ..StepReport::default()
        };
        assert!(!report.is_empty());
    }
}
