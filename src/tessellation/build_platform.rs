use std::f32::consts::FRAC_PI_2;

use tracing::{debug, warn};

use crate::error::{Result, TessellationError};
use crate::math::angle::{radial_dir, ring_point, rotate_about_vertical, sector_angle};
use crate::math::{Point3, Vector3};
use crate::platform::{HoleSpan, PlatformSpec, SectorMask};

use super::{MeshBuffer, MeshSections};

/// Index of the top hub vertex shared by every top cap triangle.
const TOP_HUB: u32 = 0;
/// Index of the bottom hub vertex shared by every bottom cap triangle.
const BOTTOM_HUB: u32 = 1;

/// Builds the perforated platform mesh for a [`PlatformSpec`].
///
/// The surface is made of two capped discs joined by the outer wall. Every
/// removed sector drops its cap and wall triangles, and every hole gets two
/// vertical patches sealing the cut faces at its boundaries. Cap and wall use
/// separate rim vertices so both can carry their own normals.
pub struct BuildPlatform<'a> {
    spec: &'a PlatformSpec,
}

impl<'a> BuildPlatform<'a> {
    /// Creates a new `BuildPlatform` operation.
    #[must_use]
    pub fn new(spec: &'a PlatformSpec) -> Self {
        Self { spec }
    }

    /// Executes the build, returning a freshly allocated mesh.
    ///
    /// Identical specs produce identical buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec fails [`PlatformSpec::validate`], or if
    /// the mesh would need more vertices than `u32` indices can address.
    pub fn execute(&self) -> Result<MeshBuffer> {
        let spec = self.spec;
        // Checked before validation, which must not see rings too large to
        // index.
        let vertex_count = required_vertices(spec);
        if vertex_count > u64::from(u32::MAX) {
            warn!(vertex_count, "platform mesh exceeds u32 indices");
            return Err(TessellationError::IndexOverflow(vertex_count).into());
        }
        if let Err(err) = spec.validate() {
            warn!(%err, "rejected platform spec");
            return Err(err);
        }

        #[allow(clippy::cast_possible_truncation)]
        let vertex_count = vertex_count as usize;

        let mask = SectorMask::new(spec.segment_count, &spec.holes);
        let triangle_count = 4 * mask.solid_count() + 4 * spec.holes.len();
        let mut mesh = MeshBuffer::with_capacity(vertex_count, triangle_count);

        let caps_start = mesh.triangle_count();
        emit_caps(&mut mesh, spec, &mask);
        let wall_start = mesh.triangle_count();
        let wall_base = 2 + 2 * spec.segment_count;
        emit_wall(&mut mesh, spec, &mask, wall_base);
        let patches_start = mesh.triangle_count();
        for hole in &spec.holes {
            emit_patches(&mut mesh, spec, hole);
        }

        mesh.sections = MeshSections {
            caps: caps_start..wall_start,
            wall: wall_start..patches_start,
            patches: patches_start..mesh.triangle_count(),
        };

        debug!(
            segments = spec.segment_count,
            holes = spec.holes.len(),
            solid_sectors = mask.solid_count(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "built platform mesh"
        );
        Ok(mesh)
    }
}

/// Vertex count of the finished mesh: two hubs, two rings of top and bottom
/// rim vertices, and eight patch vertices per hole.
fn required_vertices(spec: &PlatformSpec) -> u64 {
    let holes = u64::try_from(spec.holes.len()).unwrap_or(u64::MAX);
    holes
        .saturating_mul(8)
        .saturating_add(4 * u64::from(spec.segment_count) + 2)
}

/// Hubs, the flat-shaded rim ring, and the cap fans of solid sectors.
///
/// Rim vertices interleave top and bottom: sector `i` owns `2 + 2i` (top)
/// and `3 + 2i` (bottom).
fn emit_caps(mesh: &mut MeshBuffer, spec: &PlatformSpec, mask: &SectorMask) {
    let up = Vector3::y();
    let down = -Vector3::y();
    mesh.push_vertex(Point3::new(0.0, spec.height, 0.0), up);
    mesh.push_vertex(Point3::origin(), down);

    let n = spec.segment_count;
    let ring_len = 2 * n;
    for i in 0..n {
        let angle = sector_angle(i, n);
        mesh.push_vertex(ring_point(angle, spec.radius, spec.height), up);
        mesh.push_vertex(ring_point(angle, spec.radius, 0.0), down);

        if mask.is_solid(i as usize) {
            let top = 2 + 2 * i;
            let next_top = 2 + (2 * i + 2) % ring_len;
            mesh.push_triangle(next_top, top, TOP_HUB);

            let bottom = 2 + 2 * i + 1;
            let next_bottom = 2 + (2 * i + 3) % ring_len;
            mesh.push_triangle(BOTTOM_HUB, bottom, next_bottom);
        }
    }
}

/// The smooth-shaded wall ring and the wall quads of solid sectors, starting
/// at vertex index `base`.
fn emit_wall(mesh: &mut MeshBuffer, spec: &PlatformSpec, mask: &SectorMask, base: u32) {
    debug_assert_eq!(mesh.vertex_count(), base as usize);
    let n = spec.segment_count;
    let ring_len = 2 * n;
    for i in 0..n {
        let angle = sector_angle(i, n);
        let normal = radial_dir(angle);
        mesh.push_vertex(ring_point(angle, spec.radius, spec.height), normal);
        mesh.push_vertex(ring_point(angle, spec.radius, 0.0), normal);

        if mask.is_solid(i as usize) {
            let top = base + 2 * i;
            let bottom = base + 2 * i + 1;
            let next_top = base + (2 * i + 2) % ring_len;
            let next_bottom = base + (2 * i + 3) % ring_len;
            mesh.push_triangle(top, next_top, bottom);
            mesh.push_triangle(bottom, next_top, next_bottom);
        }
    }
}

/// Seals the two cut faces of `hole`.
///
/// Each patch spans from the vertical axis to the rim at one boundary angle
/// and faces into the opening: the start patch toward increasing angle, the
/// end patch back toward decreasing angle.
fn emit_patches(mesh: &mut MeshBuffer, spec: &PlatformSpec, hole: &HoleSpan) {
    let n = spec.segment_count;
    let start = sector_angle(hole.start_on_ring(n), n);
    let end = sector_angle(hole.end_segment(n), n);

    let start_base = emit_patch_quad(mesh, spec, start, -FRAC_PI_2);
    mesh.push_triangle(start_base, start_base + 1, start_base + 2);
    mesh.push_triangle(start_base + 2, start_base + 3, start_base);

    let end_base = emit_patch_quad(mesh, spec, end, FRAC_PI_2);
    mesh.push_triangle(end_base + 2, end_base + 1, end_base);
    mesh.push_triangle(end_base, end_base + 3, end_base + 2);
}

/// Pushes apex-top, apex-bottom, rim-bottom, rim-top at `angle` and returns
/// the index of the first one.
fn emit_patch_quad(mesh: &mut MeshBuffer, spec: &PlatformSpec, angle: f32, turn: f32) -> u32 {
    let normal = rotate_about_vertical(&radial_dir(angle), turn).normalize();
    let base = mesh.push_vertex(Point3::new(0.0, spec.height, 0.0), normal);
    mesh.push_vertex(Point3::origin(), normal);
    mesh.push_vertex(ring_point(angle, spec.radius, 0.0), normal);
    mesh.push_vertex(ring_point(angle, spec.radius, spec.height), normal);
    base
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::{ParameterError, PlatemeshError};
    use crate::math::angle::sector_step;

    fn stock() -> PlatformSpec {
        PlatformSpec::new(16, 0.5, 2.0)
    }

    #[test]
    fn solid_disc_has_four_triangles_per_sector() {
        let mesh = BuildPlatform::new(&stock()).execute().unwrap();
        assert_eq!(mesh.solid_triangle_count(), 4 * 16);
        assert_eq!(mesh.sections.caps.len(), 2 * 16);
        assert_eq!(mesh.sections.wall.len(), 2 * 16);
        assert_eq!(mesh.patch_triangle_count(), 0);
        assert_eq!(mesh.vertex_count(), 2 + 4 * 16);
    }

    #[test]
    fn parallel_arrays_match() {
        let spec = stock().with_hole(3, 4).with_hole(10, 2);
        let mesh = BuildPlatform::new(&spec).execute().unwrap();
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len(), mesh.tangents.len());
        assert_eq!(mesh.vertex_count(), 2 + 4 * 16 + 8 * 2);
        assert!(mesh.flat_indices().all(|i| (i as usize) < mesh.vertex_count()));
        assert_eq!(mesh.flat_indices().count() % 3, 0);
    }

    #[test]
    fn holes_drop_sector_triangles_and_add_patches() {
        let spec = stock().with_hole(3, 4).with_hole(10, 2);
        let mesh = BuildPlatform::new(&spec).execute().unwrap();
        let solid = 16 - 4 - 2;
        assert_eq!(mesh.solid_triangle_count(), 4 * solid);
        assert_eq!(mesh.patch_triangle_count(), 4 * 2);
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let spec = PlatformSpec::default().with_hole(26, 12);
        let a = BuildPlatform::new(&spec).execute().unwrap();
        let b = BuildPlatform::new(&spec).execute().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn full_ring_keeps_patches_only() {
        let spec = stock().with_hole(0, 16);
        let mesh = BuildPlatform::new(&spec).execute().unwrap();
        assert_eq!(mesh.solid_triangle_count(), 0);
        assert_eq!(mesh.patch_triangle_count(), 4);
    }

    #[test]
    fn winding_agrees_with_normals() {
        let spec = stock().with_hole(14, 5).with_hole(5, 3);
        let mesh = BuildPlatform::new(&spec).execute().unwrap();
        for (t, tri) in mesh.indices.iter().enumerate() {
            let [a, b, c] = mesh.triangle(t);
            let face = (b - a).cross(&(c - a));
            for &v in tri {
                let n = mesh.normals[v as usize];
                assert!(face.dot(&n) > 0.0, "triangle {t} faces away from vertex {v}");
            }
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let spec = stock().with_hole(7, 3);
        let mesh = BuildPlatform::new(&spec).execute().unwrap();
        for n in &mesh.normals {
            assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn patch_normals_face_into_hole() {
        let spec = stock().with_hole(4, 3);
        let mesh = BuildPlatform::new(&spec).execute().unwrap();
        let step = sector_step(16);
        let middle = radial_dir(5.5 * step);

        let first_patch = mesh.indices[mesh.sections.patches.start][0] as usize;
        for k in 0..8 {
            let n = mesh.normals[first_patch + k];
            assert_abs_diff_eq!(n.y, 0.0, epsilon = 1e-6);
            assert!(n.dot(&middle) > 0.0);
        }

        // start patch is perpendicular to the radial line at sector 4
        let start_normal = mesh.normals[first_patch];
        assert_abs_diff_eq!(start_normal.dot(&radial_dir(4.0 * step)), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn wrapping_hole_patches_sit_on_the_ring() {
        let spec = stock().with_hole(14, 4);
        let mesh = BuildPlatform::new(&spec).execute().unwrap();
        let base = mesh.indices[mesh.sections.patches.start][0] as usize;

        // end boundary is sector 2, reused from the cap ring
        let rim_top_2 = mesh.positions[2 + 2 * 2];
        assert_eq!(mesh.positions[base + 4 + 3], rim_top_2);
        let rim_bottom_14 = mesh.positions[3 + 2 * 14];
        assert_eq!(mesh.positions[base + 2], rim_bottom_14);
    }

    #[test]
    fn wall_ring_follows_cap_ring() {
        let mesh = BuildPlatform::new(&stock()).execute().unwrap();
        let first_wall = mesh.indices[mesh.sections.wall.start];
        assert_eq!(first_wall[0], 2 + 2 * 16);
        assert_eq!(mesh.normals[first_wall[0] as usize], radial_dir(0.0));
    }

    #[test]
    fn oversized_ring_is_rejected_without_allocating() {
        let spec = PlatformSpec::new(u32::MAX, 0.2, 5.0);
        let err = BuildPlatform::new(&spec).execute().unwrap_err();
        assert!(matches!(
            err,
            PlatemeshError::Tessellation(TessellationError::IndexOverflow(n))
                if n == 4 * u64::from(u32::MAX) + 2
        ));

        // 4n + 2 is exactly u32::MAX - 1; the patches push it over
        let spec = PlatformSpec::new((1 << 30) - 1, 0.2, 5.0).with_hole(0, 1);
        assert!(matches!(
            BuildPlatform::new(&spec).execute().unwrap_err(),
            PlatemeshError::Tessellation(TessellationError::IndexOverflow(_))
        ));
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let spec = PlatformSpec::new(2, 0.5, 1.0);
        let err = BuildPlatform::new(&spec).execute().unwrap_err();
        assert!(matches!(
            err,
            PlatemeshError::Parameter(ParameterError::TooFewSegments(2))
        ));

        let spec = stock().with_hole(0, 0);
        assert!(BuildPlatform::new(&spec).execute().is_err());
    }
}
