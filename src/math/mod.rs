pub mod angle;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f32>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f32>;

/// 4D vector type, used for tangents with a handedness sign in `w`.
pub type Vector4 = nalgebra::Vector4<f32>;

/// Global tolerance for floating-point comparisons of lengths.
pub const TOLERANCE: f32 = 1e-5;

/// Tolerance for comparing angles in radians.
///
/// Boundary angles are rebuilt from sector indices through a few float
/// operations, so an exact comparison would reject angles sitting on a hole
/// edge.
pub const ANGLE_TOLERANCE: f32 = 1e-5;
