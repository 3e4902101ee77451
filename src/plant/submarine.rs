use nalgebra::Vector2;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Plant parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubmarineParams {
    pub mass: f64,
    pub drag: f64,          // linear drag coefficient on vertical velocity
    pub actuator_gain: f64, // force per unit control action
    pub dt: f64,            // integration step
    pub speed: f64,         // constant forward speed
}

impl Default for SubmarineParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            drag: 0.1,
            actuator_gain: 1.0,
            dt: 1.0,
            speed: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// 2-D point-mass UUV: constant forward speed, actuated vertical axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Submarine {
    pub params: SubmarineParams,
    pos: Vector2<f64>, // x = along-track, y = depth coordinate
    vel: Vector2<f64>,
}

impl Submarine {
    pub fn new(params: SubmarineParams) -> Self {
        Self {
            params,
            pos: Vector2::zeros(),
            vel: Vector2::new(params.speed, 0.0),
        }
    }

    /// Advance one step with explicit Euler: position first, then the
    /// vertical velocity under drag and actuator force.
    pub fn transition(&mut self, action: f64, disturbance: f64) {
        let p = &self.params;
        self.pos += self.vel * p.dt;

        let force_y = -p.drag * self.vel.y + p.actuator_gain * (action + disturbance);
        self.vel.y += force_y / p.mass * p.dt;
    }

    pub fn depth(&self) -> f64 {
        self.pos.y
    }

    pub fn position(&self) -> Vector2<f64> {
        self.pos
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.vel
    }

    pub fn dt(&self) -> f64 {
        self.params.dt
    }

    pub fn reset(&mut self) {
        self.pos = Vector2::zeros();
        self.vel = Vector2::new(self.params.speed, 0.0);
    }
}

impl Default for Submarine {
    fn default() -> Self {
        Self::new(SubmarineParams::default())
    }
}

// ---------------------------------------------------------------------------
// Submarine builder
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SubmarineBuilder {
    params: SubmarineParams,
}

impl SubmarineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mass(mut self, v: f64) -> Self { self.params.mass = v; self }
    pub fn drag(mut self, v: f64) -> Self { self.params.drag = v; self }
    pub fn actuator_gain(mut self, v: f64) -> Self { self.params.actuator_gain = v; self }
    pub fn dt(mut self, v: f64) -> Self { self.params.dt = v; self }
    pub fn speed(mut self, v: f64) -> Self { self.params.speed = v; self }

    pub fn build(self) -> Submarine {
        Submarine::new(self.params)
    }
}
