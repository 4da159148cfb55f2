use crate::math::Point3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Computes the tightest box around `points`, or `None` when there are none.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb.min = aabb.min.inf(p);
            aabb.max = aabb.max.sup(p);
        }
        Some(aabb)
    }

    /// Returns the bounds as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    #[must_use]
    pub fn to_bounds(&self) -> [f64; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn empty_points_have_no_box() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_is_degenerate_box() {
        let aabb = Aabb::from_points(&[p(1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn bounds_are_interleaved_per_axis() {
        let pts = [p(-1.0, 4.0, 0.5), p(2.0, -3.0, 7.0), p(0.0, 0.0, -2.0)];
        let bounds = Aabb::from_points(&pts).unwrap().to_bounds();
        let expected = [-1.0, 2.0, -3.0, 4.0, -2.0, 7.0];
        for (got, want) in bounds.iter().zip(expected) {
            assert_relative_eq!(*got, want);
        }
    }
}
