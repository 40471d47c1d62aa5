//! # TestRig — headless integration-test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` for driving the crane without
//! a window or renderer: place loads, hold keys, advance ticks, and assert
//! on joint and transport state.

use bevy::app::App;
use bevy::input::InputPlugin;
use bevy::prelude::*;

use crate::controls::ControlState;
use crate::rig::{claw_world, load_bundle, ClawFinger, CraneRig, SkipLoadScatter};
use crate::transport::{Phase, Transport};
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
pub struct TestRig {
    app: App,
}

impl TestRig {
    /// Headless rig with no loads; place them with `with_load`.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin));

        // Insert the marker BEFORE SimulationPlugin so assembly skips the
        // random scatter.
        app.insert_resource(SkipLoadScatter);
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute and the rig exists.
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // Setup (builder pattern)
    // -----------------------------------------------------------------------

    /// Place a cube load of the given edge length resting at `pos`.
    pub fn with_load(mut self, pos: Vec3, size: f32) -> Self {
        self.app.world_mut().spawn(load_bundle(pos, size));
        self
    }

    /// Same as `with_load`, also returning the spawned entity id.
    pub fn with_load_entity(mut self, pos: Vec3, size: f32) -> (Self, Entity) {
        let entity = self.app.world_mut().spawn(load_bundle(pos, size)).id();
        (self, entity)
    }

    /// Override the drop target.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.app.world_mut().resource_mut::<Transport>().target = target;
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    pub fn tick(&mut self) {
        self.app.update();
    }

    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Start holding a key; it stays held until `release`.
    pub fn hold(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    // -----------------------------------------------------------------------
    // State accessors
    // -----------------------------------------------------------------------

    fn rig(&self) -> CraneRig {
        *self.app.world().resource::<CraneRig>()
    }

    fn transform(&self, entity: Entity) -> Transform {
        *self
            .app
            .world()
            .get::<Transform>(entity)
            .expect("rig entity has a transform")
    }

    pub fn car_x(&self) -> f32 {
        self.transform(self.rig().car).translation.x
    }

    pub fn claw_y(&self) -> f32 {
        self.transform(self.rig().claw_base).translation.y
    }

    pub fn boom_yaw(&self) -> f32 {
        crate::kinematics::boom_yaw(&self.transform(self.rig().boom_group))
    }

    /// Cable vertical scale and midpoint offset.
    pub fn cable_span(&self) -> (f32, f32) {
        let tf = self.transform(self.rig().cable);
        (tf.scale.y, tf.translation.y)
    }

    pub fn finger_angles(&self) -> [f32; 4] {
        let rig = self.rig();
        rig.fingers.map(|id| {
            self.app
                .world()
                .get::<ClawFinger>(id)
                .expect("finger entity exists")
                .angle
        })
    }

    pub fn phase(&self) -> Phase {
        self.app.world().resource::<Transport>().phase
    }

    pub fn grasped_load(&self) -> Option<Entity> {
        self.app.world().resource::<Transport>().load
    }

    pub fn controls(&self) -> ControlState {
        *self.app.world().resource::<ControlState>()
    }

    /// World position of the claw base, composed from the joint chain.
    pub fn claw_world_pos(&self) -> Vec3 {
        let rig = self.rig();
        claw_world(
            &self.transform(rig.boom_group),
            &self.transform(rig.car),
            &self.transform(rig.claw_base),
        )
        .translation
    }

    /// World position of a load, whether free or bound to the claw.
    pub fn load_world_pos(&self, load: Entity) -> Vec3 {
        let tf = self.transform(load);
        if self.load_is_attached(load) {
            let rig = self.rig();
            claw_world(
                &self.transform(rig.boom_group),
                &self.transform(rig.car),
                &self.transform(rig.claw_base),
            )
            .mul_transform(tf)
            .translation
        } else {
            tf.translation
        }
    }

    /// True while the load entity is parented under the claw base.
    pub fn load_is_attached(&self, load: Entity) -> bool {
        self.app
            .world()
            .get::<Parent>(load)
            .is_some_and(|parent| parent.get() == self.rig().claw_base)
    }
}
