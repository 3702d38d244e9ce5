/// Horizontal travel direction of the moving square.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// The two animation accumulators: a bouncing x position and a cumulative
/// rotation angle in degrees.
///
/// The angle is never wrapped; it grows without bound at the angle rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    x: f32,
    direction: Direction,
    angle: f32,
    lo: f32,
    hi: f32,
}

impl Animation {
    /// Starts at `x` moving right, bouncing between `lo` and `hi`.
    pub fn new(x: f32, (lo, hi): (f32, f32)) -> Self {
        debug_assert!(lo <= hi);
        Self {
            x,
            direction: Direction::Right,
            angle: 0.0,
            lo,
            hi,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Advances both accumulators by `dt` seconds.
    ///
    /// The direction flips before moving, so the position overshoots a bound
    /// by at most one step of `velocity * dt`.
    pub fn advance(&mut self, dt: f32, velocity: f32, angle_rate: f32) {
        if self.x > self.hi {
            self.direction = Direction::Left;
        } else if self.x < self.lo {
            self.direction = Direction::Right;
        }

        self.x += self.direction.sign() * velocity * dt;
        self.angle += angle_rate * dt;
    }
}
