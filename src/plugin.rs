//! Bevy integration for driving a [`Session`] from an app's update loop.
//!
//! [`SimulationPlugin`] builds the session up front and inserts it as the
//! [`SimulationSession`] resource. [`advance_session_system`] then ticks it
//! once per `Update` with the frame delta from [`Time`].

use bevy::prelude::*;
use log::error;

use crate::assets::TextureRegistry;
use crate::config::SimConfig;
use crate::sim_rng::DEFAULT_SEED;
use crate::world::{Session, TickReport};

/// Plugin that owns session setup.
#[derive(Debug, Clone)]
pub struct SimulationPlugin {
    /// Session configuration.
    pub config: SimConfig,
    /// Seed for terrain and NPC behaviour.
    pub seed: u64,
    /// Textures available to sprites.
    pub assets: TextureRegistry,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            seed: DEFAULT_SEED,
            assets: TextureRegistry::new(),
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let session = match Session::new(self.config.clone(), self.seed, &self.assets) {
            Ok(session) => session,
            Err(e) => {
                error!("failed to start session: {e}");
                return;
            }
        };
        app.insert_resource(SimulationSession::new(session));
        app.add_systems(Update, advance_session_system);
    }
}

/// Resource wrapping the running [`Session`].
#[derive(Resource, Debug)]
pub struct SimulationSession {
    session: Session,
    last_report: TickReport,
}

impl SimulationSession {
    /// Wraps an existing session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            last_report: TickReport::default(),
        }
    }

    /// The wrapped session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The wrapped session, for forwarding input.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Outcome of the most recent tick.
    #[must_use]
    pub const fn last_report(&self) -> &TickReport {
        &self.last_report
    }
}

/// Advances the session by the app's frame delta.
pub fn advance_session_system(time: Res<Time>, mut sim: ResMut<SimulationSession>) {
    let ms = time.delta_secs() * 1000.0;
    sim.last_report = sim.session.tick(ms);
}
