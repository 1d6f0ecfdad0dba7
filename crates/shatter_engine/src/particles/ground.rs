//! Terrain height queries for particle ground contact

/// Source of ground height under a point
pub trait GroundHeight {
    /// Terrain height at `(x, z)`, or `None` where no terrain exists
    fn height_at(&self, x: f32, z: f32) -> Option<f32>;
}

/// No terrain; particles fall to the configured floor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTerrain;

impl GroundHeight for NoTerrain {
    fn height_at(&self, _x: f32, _z: f32) -> Option<f32> {
        None
    }
}

/// Infinite flat ground at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround(pub f32);

impl GroundHeight for FlatGround {
    fn height_at(&self, _x: f32, _z: f32) -> Option<f32> {
        Some(self.0)
    }
}

impl<F> GroundHeight for F
where
    F: Fn(f32, f32) -> Option<f32>,
{
    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        self(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_terrain() {
        let slope = |x: f32, _z: f32| if x >= 0.0 { Some(x * 0.5) } else { None };
        assert_eq!(slope.height_at(4.0, 0.0), Some(2.0));
        assert_eq!(slope.height_at(-1.0, 0.0), None);
        assert_eq!(NoTerrain.height_at(0.0, 0.0), None);
        assert_eq!(FlatGround(-3.0).height_at(10.0, 10.0), Some(-3.0));
    }
}
