//! # Verlet chain simulator
//!
//! Position-based chain for the wrecking ball: no explicit velocity, just
//! current and previous positions per link, with iterative distance
//! constraint relaxation pulling adjacent links toward a fixed rest length.
//! Link 0 is the anchor and rigidly follows the stick tip every step; the
//! final link drives the ball.

use cgmath::{InnerSpace, Point3};

/// Denominator floor for the constraint solve; keeps coincident links from
/// producing NaN corrections.
const MIN_SEPARATION: f32 = 1e-6;

/// Chain tuning parameters
///
/// `gravity` is a flat per-step drop, not scaled by elapsed time: the chain
/// deliberately uses a constant-timestep model, so hosts wanting
/// frame-rate-independent motion should drive [`ChainSimulator::step`] from
/// a fixed-timestep accumulator.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Number of links including the anchor
    pub links: usize,
    /// Rest length between adjacent links
    pub link_length: f32,
    /// Per-step downward displacement applied to free links
    pub gravity: f32,
    /// Relaxation passes per step
    pub constraint_iterations: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            links: 10,
            link_length: 1.0,
            gravity: 0.15,
            constraint_iterations: 3,
        }
    }
}

/// One chain particle
#[derive(Debug, Clone, Copy)]
pub struct ChainLink {
    pub position: Point3<f32>,
    pub previous: Point3<f32>,
}

/// Verlet-integrated hanging chain
///
/// Created once with a fixed link count; the link set is never resized.
#[derive(Debug, Clone)]
pub struct ChainSimulator {
    links: Vec<ChainLink>,
    link_length: f32,
    gravity: f32,
    constraint_iterations: usize,
}

impl ChainSimulator {
    /// Creates a chain hanging straight down from `anchor`
    ///
    /// # Arguments
    /// * `config` - Chain tuning; `config.links` is clamped to at least 2
    /// * `anchor` - Initial world position of link 0
    pub fn new(config: ChainConfig, anchor: Point3<f32>) -> Self {
        let count = config.links.max(2);
        let links = (0..count)
            .map(|i| {
                let position = Point3::new(
                    anchor.x,
                    anchor.y - i as f32 * config.link_length,
                    anchor.z,
                );
                ChainLink {
                    position,
                    previous: position,
                }
            })
            .collect();

        Self {
            links,
            link_length: config.link_length,
            gravity: config.gravity,
            constraint_iterations: config.constraint_iterations,
        }
    }

    /// Advances the chain one step with the anchor pinned at `anchor`
    pub fn step(&mut self, anchor: Point3<f32>) {
        self.integrate(anchor);
        for _ in 0..self.constraint_iterations {
            self.relax();
        }
    }

    /// World-space link positions, anchor first
    pub fn positions(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.links.iter().map(|link| link.position)
    }

    /// World position of the free end, where the ball hangs
    pub fn ball_position(&self) -> Point3<f32> {
        // Construction guarantees at least two links.
        self.links[self.links.len() - 1].position
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Verlet step: implicit velocity from the position history, then the
    /// flat gravity drop. The anchor is overwritten, never integrated.
    fn integrate(&mut self, anchor: Point3<f32>) {
        self.links[0].position = anchor;
        for link in self.links.iter_mut().skip(1) {
            let current = link.position;
            let velocity = current - link.previous;
            link.position = current + velocity;
            link.position.y -= self.gravity;
            link.previous = current;
        }
    }

    /// One relaxation pass over all adjacent pairs
    ///
    /// Corrections split 50/50 between the pair, except the anchor never
    /// moves; its half of the correction is simply dropped.
    fn relax(&mut self) {
        for i in 0..self.links.len() - 1 {
            let a = self.links[i].position;
            let b = self.links[i + 1].position;
            let delta = b - a;
            let distance = delta.magnitude().max(MIN_SEPARATION);
            let error = (distance - self.link_length) / distance;
            let correction = delta * (0.5 * error);

            if i != 0 {
                self.links[i].position = a + correction;
            }
            self.links[i + 1].position = b - correction;
        }
    }

    /// Worst rest-length violation over all adjacent pairs
    #[cfg(test)]
    fn max_pair_error(&self) -> f32 {
        (0..self.links.len() - 1)
            .map(|i| {
                let d = (self.links[i + 1].position - self.links[i].position).magnitude();
                (d - self.link_length).abs()
            })
            .fold(0.0, f32::max)
    }

    /// Summed rest-length violation over all adjacent pairs
    #[cfg(test)]
    fn total_pair_error(&self) -> f32 {
        (0..self.links.len() - 1)
            .map(|i| {
                let d = (self.links[i + 1].position - self.links[i].position).magnitude();
                (d - self.link_length).abs()
            })
            .sum()
    }
}
