// src/simulation/mod.rs
//! # Game simulation core
//!
//! One owned aggregate, [`GameCore`], holds the world, the verlet chain, the
//! magnet controller, the active attachment mode, and the input flags. All
//! simulation state changes happen inside its synchronous [`GameCore::tick`],
//! called once per display frame by the host loop; input handlers only flip
//! flags on [`InputState`] between ticks.

pub mod attachment;
pub mod chain;
pub mod magnet;

pub use attachment::AttachmentMode;
pub use chain::{ChainConfig, ChainLink, ChainSimulator};
pub use magnet::MagnetController;

use log::info;

use crate::input::InputState;
use crate::world::World;

/// The excavator game core
///
/// Owns its [`World`] and routes every mutation through it. `tick` never
/// panics and never returns an error; world-mutation failures are logged
/// and swallowed, since the loop runs indefinitely.
pub struct GameCore<W: World> {
    world: W,
    input: InputState,
    mode: AttachmentMode,
    chain: ChainSimulator,
    magnet: MagnetController,
}

impl<W: World> GameCore<W> {
    /// Creates a core over `world` with the bucket mounted
    pub fn new(world: W) -> Self {
        Self::with_chain_config(world, ChainConfig::default())
    }

    /// Creates a core with custom chain tuning
    pub fn with_chain_config(world: W, config: ChainConfig) -> Self {
        let anchor = world.chain_anchor_world();
        let mut core = Self {
            world,
            input: InputState::new(),
            mode: AttachmentMode::default(),
            chain: ChainSimulator::new(config, anchor),
            magnet: MagnetController::new(),
        };
        core.apply_visibility();
        core
    }

    /// Currently mounted attachment
    pub fn mode(&self) -> AttachmentMode {
        self.mode
    }

    /// Id of the object the magnet is holding, if any
    pub fn held_object(&self) -> Option<crate::world::ObjectId> {
        self.magnet.held()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Input flags for the host's key handlers
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Advances the game one frame
    ///
    /// Order matters: one-shot intents first (a mode switch this frame
    /// changes which behavior runs), then locomotion, then the active
    /// attachment's per-tick work.
    pub fn tick(&mut self) {
        if self.input.take_cycle_attachment() {
            self.cycle_attachment();
        }
        if self.input.take_magnet_action() && self.mode == AttachmentMode::Magnet {
            if self.magnet.held().is_some() {
                self.magnet.release(&mut self.world);
            } else {
                self.magnet.try_attract(&mut self.world);
            }
        }

        self.world.apply_drive(&self.input);

        match self.mode {
            AttachmentMode::Bucket => {}
            AttachmentMode::Magnet => self.magnet.track(&mut self.world),
            AttachmentMode::WreckingBall => self.step_chain(),
        }
    }

    /// Advances to the next attachment, releasing any held object first
    ///
    /// The release runs before the mode flag changes, so there is never a
    /// state where the mode is not Magnet while something is held.
    fn cycle_attachment(&mut self) {
        if self.magnet.held().is_some() {
            self.magnet.release(&mut self.world);
        }
        self.mode = self.mode.next();
        self.apply_visibility();
        info!("attachment mode -> {:?}", self.mode);
    }

    /// Shows the active attachment's visuals and hides the rest
    fn apply_visibility(&mut self) {
        for mode in AttachmentMode::ALL {
            self.world.set_attachment_visible(mode, mode == self.mode);
        }
    }

    /// One chain step plus the rendering handoff
    fn step_chain(&mut self) {
        let anchor = self.world.chain_anchor_world();
        self.chain.step(anchor);

        let locals: Vec<_> = self
            .chain
            .positions()
            .map(|p| self.world.world_to_chain_local(p))
            .collect();
        self.world.set_link_local_positions(&locals);
        self.world.set_ball_world_position(self.chain.ball_position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::test_support::FlatWorld;
    use cgmath::Point3;

    fn magnet_core(world: FlatWorld) -> GameCore<FlatWorld> {
        let mut core = GameCore::new(world);
        core.input_mut().press_cycle_attachment();
        core.tick();
        assert_eq!(core.mode(), AttachmentMode::Magnet);
        core
    }

    fn assert_exactly_one_visible(world: &FlatWorld, active: AttachmentMode) {
        for mode in AttachmentMode::ALL {
            assert_eq!(world.last_visibility(mode), Some(mode == active));
        }
    }

    #[test]
    fn test_starts_with_bucket_visible() {
        let core = GameCore::new(FlatWorld::new());
        assert_eq!(core.mode(), AttachmentMode::Bucket);
        assert_exactly_one_visible(core.world(), AttachmentMode::Bucket);
    }

    #[test]
    fn test_cycle_keeps_exactly_one_visible() {
        let mut core = GameCore::new(FlatWorld::new());
        let mut expected = AttachmentMode::Bucket;
        for _ in 0..4 {
            core.input_mut().press_cycle_attachment();
            core.tick();
            expected = expected.next();
            assert_eq!(core.mode(), expected);
            assert_exactly_one_visible(core.world(), expected);
        }
    }

    #[test]
    fn test_cycle_fires_once_per_press() {
        let mut core = GameCore::new(FlatWorld::new());
        core.input_mut().press_cycle_attachment();
        core.tick();
        core.tick();
        core.tick();
        assert_eq!(core.mode(), AttachmentMode::Magnet);
    }

    #[test]
    fn test_magnet_grab_and_carry() {
        let mut world = FlatWorld::new();
        world.head = Point3::new(0.0, 2.0, 0.0);
        let id = world.add_object(Point3::new(1.0, 0.5, 1.0));

        let mut core = magnet_core(world);
        core.input_mut().press_magnet_action();
        core.tick();
        assert_eq!(core.held_object(), Some(id));

        // While held, the object tracks the head with the carry offset
        core.world_mut().head = Point3::new(4.0, 6.0, -2.0);
        core.tick();
        assert_eq!(
            core.world().position_of(id),
            Some(Point3::new(4.0, 6.0 - magnet::CARRY_OFFSET, -2.0))
        );
    }

    #[test]
    fn test_magnet_action_toggles_release() {
        let mut world = FlatWorld::new();
        world.bin = Point3::new(50.0, 0.0, 0.0);
        let id = world.add_object(Point3::new(1.0, 0.5, 0.0));

        let mut core = magnet_core(world);
        core.input_mut().press_magnet_action();
        core.tick();
        assert_eq!(core.held_object(), Some(id));

        core.input_mut().press_magnet_action();
        core.tick();
        assert_eq!(core.held_object(), None);
        // Far from the bin: dropped back to the ground, not scrapped
        assert!(core.world().removed.is_empty());
        assert_eq!(
            core.world().position_of(id).map(|p| p.y),
            Some(magnet::GROUND_HEIGHT)
        );
    }

    #[test]
    fn test_magnet_action_ignored_outside_magnet_mode() {
        let mut world = FlatWorld::new();
        world.add_object(Point3::new(1.0, 0.0, 0.0));

        let mut core = GameCore::new(world);
        core.input_mut().press_magnet_action();
        core.tick();
        assert_eq!(core.held_object(), None);
    }

    #[test]
    fn test_mode_switch_forces_release() {
        let mut world = FlatWorld::new();
        world.bin = Point3::new(2.0, 0.0, 0.0);
        let id = world.add_object(Point3::new(0.5, 0.5, 0.0));

        let mut core = magnet_core(world);
        core.input_mut().press_magnet_action();
        core.tick();
        assert_eq!(core.held_object(), Some(id));

        // Held object is over the bin when the tool is swapped; the forced
        // release scraps it before the mode changes
        core.input_mut().press_cycle_attachment();
        core.tick();
        assert_eq!(core.mode(), AttachmentMode::WreckingBall);
        assert_eq!(core.held_object(), None);
        assert_eq!(core.world().removed, vec![id]);
    }

    #[test]
    fn test_wrecking_ball_tick_hands_off_chain() {
        let mut world = FlatWorld::new();
        world.head = Point3::new(0.0, 9.0, -18.0);

        let mut core = GameCore::new(world);
        core.input_mut().press_cycle_attachment();
        core.tick();
        core.input_mut().press_cycle_attachment();
        core.tick();
        assert_eq!(core.mode(), AttachmentMode::WreckingBall);

        for _ in 0..30 {
            core.tick();
        }
        let world = core.world();
        assert_eq!(world.link_locals.len(), 10);
        let ball = world.ball.expect("ball position was never handed off");
        assert!(ball.y < 9.0);
    }

    #[test]
    fn test_bucket_tick_leaves_world_alone() {
        let mut world = FlatWorld::new();
        let id = world.add_object(Point3::new(1.0, 0.5, 0.0));

        let mut core = GameCore::new(world);
        for _ in 0..10 {
            core.tick();
        }
        assert_eq!(
            core.world().position_of(id),
            Some(Point3::new(1.0, 0.5, 0.0))
        );
        assert!(core.world().ball.is_none());
    }
}
