//! Affine frame changes for polyhedra.

use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// An affine change of coordinate frame, stored as a 4x4 homogeneous matrix.
///
/// Used to re-express a polyhedron measured in one frame (for example world or
/// detector coordinates) in another (for example voxel coordinates of an image).
///
/// # Example
///
/// ```
/// use star_polyhedron::Transform3D;
/// use nalgebra::Point3;
///
/// let world_to_voxel = Transform3D::translation(-10.0, 0.0, 0.0)
///     .then(&Transform3D::scale(2.0, 2.0, 0.5));
///
/// let voxel = world_to_voxel.transform_point(&Point3::new(11.0, 1.0, 4.0));
/// assert_eq!(voxel, Point3::new(2.0, 2.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    matrix: Matrix4<f64>,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Wrap a homogeneous 4x4 matrix. The bottom row is expected to be `[0, 0, 0, 1]`.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// The transform that leaves every point where it is.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Shift by `(tx, ty, tz)`.
    #[must_use]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self::from_translation(Vector3::new(tx, ty, tz))
    }

    /// Shift by a vector.
    #[must_use]
    pub fn from_translation(offset: Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// Scale all axes by the same factor.
    #[must_use]
    pub fn uniform_scale(factor: f64) -> Self {
        Self::scale(factor, factor, factor)
    }

    /// Scale each axis independently, e.g. by voxel size.
    #[must_use]
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)),
        }
    }

    /// Rotate by `angle` radians around the z axis.
    #[must_use]
    pub fn rotation_z(angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            cos_a, -sin_a, 0.0, 0.0,
            sin_a,  cos_a, 0.0, 0.0,
              0.0,    0.0, 1.0, 0.0,
              0.0,    0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// The underlying homogeneous matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Apply `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    /// The inverse frame change, or `None` for a singular matrix.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(Self::from_matrix)
    }

    /// Whether the linear (3x3) part can be inverted.
    ///
    /// Polyhedra can only be carried through invertible transforms: a singular
    /// linear part collapses lattice directions onto a plane or line.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        self.matrix
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .is_some()
    }

    /// Map a point (translation applies).
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let mapped = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(mapped.x, mapped.y, mapped.z)
    }

    /// Map a direction or offset (translation ignored).
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        let mapped = self.matrix * Vector4::new(vector.x, vector.y, vector.z, 0.0);
        Vector3::new(mapped.x, mapped.y, mapped.z)
    }
}
