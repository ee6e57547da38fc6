//! # Primitive Shape Generation
//!
//! Builders for closed and flat primitives. Each appends to the buffers and
//! returns the index of the first vertex it wrote.

use super::basis::{circle_point, face_normal, random_basis, renormalize};
use super::{
    require_segments, Colour, ConeParams, Orientation, PolygonParams, RhomboParams, RingParams,
    SphereParams, TubeParams, VertexBuffers,
};
use crate::error::{VisualError, VisualResult};
use cgmath::Vector3;
use rand::Rng;
use std::f32::consts::PI;

impl VertexBuffers {
    /// Single triangle with a shared face normal
    pub fn triangle(
        &mut self,
        c1: Vector3<f32>,
        c2: Vector3<f32>,
        c3: Vector3<f32>,
        colour: Colour,
    ) -> u32 {
        let n = face_normal(c1, c2, c3);
        let base = self.push_vertex(c1, n, colour);
        self.push_vertex(c2, n, colour);
        self.push_vertex(c3, n, colour);
        self.push_triangle(base, base + 1, base + 2);
        base
    }

    /// Quad from four corners given clockwise, split into two triangles
    pub fn flat_quad(
        &mut self,
        c1: Vector3<f32>,
        c2: Vector3<f32>,
        c3: Vector3<f32>,
        c4: Vector3<f32>,
        colour: Colour,
    ) -> u32 {
        let n = face_normal(c1, c2, c3);
        let base = self.push_vertex(c1, n, colour);
        self.push_vertex(c2, n, colour);
        self.push_vertex(c3, n, colour);
        self.push_vertex(c4, n, colour);
        self.push_triangle(base, base + 1, base + 2);
        self.push_triangle(base, base + 2, base + 3);
        base
    }

    /// Flat polygon fan: centre plus `segments` perimeter points
    pub fn polygon(&mut self, params: &PolygonParams) -> VisualResult<u32> {
        require_segments("polygon", params.segments)?;
        let s = params.segments;
        let normal = -renormalize(params.uy.cross(params.ux));

        let base = self.push_vertex(params.centre, normal, params.colour);
        for j in 0..s {
            let t = params.rotation + j as f32 * 2.0 * PI / s as f32;
            let c = circle_point(params.ux, params.uy, t, params.radius);
            self.push_vertex(params.centre + c, normal, params.colour);
        }
        for j in 0..s {
            self.push_triangle(base, base + 1 + j, base + 1 + (j + 1) % s);
        }
        Ok(base)
    }

    /// Capped tube from `start` to `end`.
    ///
    /// Writes `4 * segments + 2` vertices: start centre, start cap ring,
    /// start collar, end collar, end cap ring, end centre. Cap vertices carry
    /// axial normals; collar vertices carry radial normals.
    pub fn tube<R: Rng + ?Sized>(
        &mut self,
        params: &TubeParams,
        rng: &mut R,
    ) -> VisualResult<u32> {
        require_segments("tube", params.segments)?;
        let s = params.segments;

        let (axis, ux, uy, phase) = match params.orientation {
            Orientation::Random => {
                let axis = renormalize(params.end - params.start);
                let (inplane, v_x_inplane) = random_basis(axis, rng);
                (axis, inplane, v_x_inplane, 0.0)
            }
            Orientation::Fixed { ux, uy, rotation } => {
                (renormalize(uy.cross(ux)), ux, uy, rotation)
            }
        };
        let ring: Vec<Vector3<f32>> = (0..s)
            .map(|j| {
                let t = phase + j as f32 * 2.0 * PI / s as f32;
                circle_point(ux, uy, t, params.radius)
            })
            .collect();

        let base = self.push_vertex(params.start, -axis, params.colour_start);
        for &c in &ring {
            self.push_vertex(params.start + c, -axis, params.colour_start);
        }
        for &c in &ring {
            self.push_vertex(params.start + c, renormalize(c), params.colour_start);
        }
        for &c in &ring {
            self.push_vertex(params.end + c, renormalize(c), params.colour_end);
        }
        for &c in &ring {
            self.push_vertex(params.end + c, axis, params.colour_end);
        }
        self.push_vertex(params.end, axis, params.colour_end);

        self.push_capped_body_indices(base, 4, s);
        log::trace!("tube: {} vertices from {}", self.cursor - base, base);
        Ok(base)
    }

    /// Flat ring band in the XY plane through `params.centre`
    pub fn ring(&mut self, params: &RingParams) -> VisualResult<u32> {
        require_segments("ring", params.segments)?;
        let s = params.segments;
        let inner = params.radius - params.thickness * 0.5;
        let outer = params.radius + params.thickness * 0.5;
        let at = |radius: f32, t: f32| {
            params.centre + Vector3::new(radius * t.cos(), radius * t.sin(), 0.0)
        };

        let base = self.cursor;
        for j in 0..s {
            let t = j as f32 * 2.0 * PI / s as f32;
            let tn = ((j + 1) % s) as f32 * 2.0 * PI / s as f32;
            self.flat_quad(
                at(inner, t),
                at(outer, t),
                at(outer, tn),
                at(inner, tn),
                params.colour,
            );
        }
        Ok(base)
    }

    /// UV sphere with poles on the z axis.
    ///
    /// `rings` latitude bands need `rings - 1` circles of `segments` vertices
    /// between the two pole vertices.
    pub fn sphere(&mut self, params: &SphereParams) -> VisualResult<u32> {
        require_segments("sphere", params.segments)?;
        if params.rings < 2 {
            return Err(VisualError::TooFewRings(params.rings));
        }
        let s = params.segments;
        let rings = params.rings;
        let pole_colour = params.pole_colour.unwrap_or(params.colour);

        let bottom = Vector3::new(0.0, 0.0, -1.0);
        let base = self.push_vertex(params.centre + bottom * params.radius, bottom, pole_colour);

        let first_ring = self.push_latitude(params, 1, pole_colour);
        for j in 0..s {
            self.push_triangle(base, first_ring + j, first_ring + (j + 1) % s);
        }

        let mut last_ring = first_ring;
        for i in 2..rings {
            let colour = if i == 2 || i > rings - 2 {
                pole_colour
            } else {
                params.colour
            };
            let ring = self.push_latitude(params, i, colour);
            for j in 0..s {
                let jn = (j + 1) % s;
                self.push_triangle(last_ring + j, ring + j, last_ring + jn);
                self.push_triangle(last_ring + jn, ring + j, ring + jn);
            }
            last_ring = ring;
        }

        let top = Vector3::new(0.0, 0.0, 1.0);
        let cap = self.push_vertex(params.centre + top * params.radius, top, pole_colour);
        for j in 0..s {
            self.push_triangle(cap, last_ring + j, last_ring + (j + 1) % s);
        }

        log::trace!("sphere: {} vertices from {}", self.cursor - base, base);
        Ok(base)
    }

    fn push_latitude(&mut self, params: &SphereParams, i: u32, colour: Colour) -> u32 {
        let lat = PI * (-0.5 + i as f32 / params.rings as f32);
        let z = lat.sin();
        let xy = lat.cos();
        let start = self.cursor;
        for j in 0..params.segments {
            let t = 2.0 * PI * j as f32 / params.segments as f32;
            let n = Vector3::new(t.cos() * xy, t.sin() * xy, z);
            self.push_vertex(params.centre + n * params.radius, n, colour);
        }
        start
    }

    /// Cone from a base centre to a tip with a random cross-section basis.
    ///
    /// Writes `3 * segments + 2` vertices: base centre, base ring, base
    /// collar, tip collar, tip. `ring_offset` slides the base ring and collar
    /// along the axis by that proportion of `tip - centre`; the base centre
    /// stays put, so a negative offset recesses the base cap into a shallow
    /// cone.
    pub fn cone<R: Rng + ?Sized>(
        &mut self,
        params: &ConeParams,
        rng: &mut R,
    ) -> VisualResult<u32> {
        require_segments("cone", params.segments)?;
        let s = params.segments;
        let axis = renormalize(params.tip - params.centre);
        let (inplane, v_x_inplane) = random_basis(axis, rng);
        let ring: Vec<Vector3<f32>> = (0..s)
            .map(|j| {
                let t = j as f32 * 2.0 * PI / s as f32;
                circle_point(inplane, v_x_inplane, t, params.radius)
            })
            .collect();
        let ring_centre = params.centre + (params.tip - params.centre) * params.ring_offset;

        let base = self.push_vertex(params.centre, -axis, params.colour);
        for &c in &ring {
            self.push_vertex(ring_centre + c, -axis, params.colour);
        }
        for &c in &ring {
            self.push_vertex(ring_centre + c, renormalize(c), params.colour);
        }
        for &c in &ring {
            self.push_vertex(params.tip, renormalize(c), params.colour);
        }
        self.push_vertex(params.tip, axis, params.colour);

        self.push_capped_body_indices(base, 3, s);
        Ok(base)
    }

    /// Parallelepiped with four vertices per face so each face is flat shaded
    pub fn rhombohedron(&mut self, params: &RhomboParams) -> u32 {
        let [e1, e2, e3] = params.edges;
        let o = params.origin;
        let n1 = renormalize(e1.cross(e2));
        let n2 = renormalize(e2.cross(e3));
        let n3 = renormalize(e1.cross(e3));

        let faces = [
            ([o, o + e1, o + e3, o + e1 + e3], n3),
            ([o + e3, o + e1 + e3, o + e2 + e3, o + e1 + e2 + e3], n1),
            ([o + e2 + e3, o + e1 + e2 + e3, o + e2, o + e1 + e2], -n3),
            ([o + e2, o + e1 + e2, o, o + e1], -n1),
            ([o + e2, o, o + e2 + e3, o + e3], -n2),
            ([o + e1, o + e1 + e2, o + e1 + e3, o + e1 + e2 + e3], n2),
        ];

        let base = self.cursor;
        for (corners, normal) in faces {
            let first = self.cursor;
            for corner in corners {
                self.push_vertex(corner, normal, params.colour);
            }
            self.push_triangle(first, first + 1, first + 2);
            self.push_triangle(first + 1, first + 2, first + 3);
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::colour;
    use cgmath::InnerSpace;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_indices_within(buffers: &VertexBuffers, from: u32) {
        buffers.validate().unwrap();
        for &i in buffers.indices() {
            assert!(i >= from && i < buffers.cursor(), "index {} out of range", i);
        }
    }

    fn normal_at(buffers: &VertexBuffers, i: usize) -> Vector3<f32> {
        let n = buffers.normals();
        Vector3::new(n[3 * i], n[3 * i + 1], n[3 * i + 2])
    }

    #[test]
    fn test_tube_generation() {
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(1);
        let base = buffers.tube(&TubeParams::default(), &mut rng).unwrap();

        assert_eq!(base, 0);
        assert_eq!(buffers.vertex_count(), 50);
        assert_eq!(buffers.index_count(), 288);
        assert_eq!(buffers.cursor(), 50);
        assert_indices_within(&buffers, 0);
    }

    #[test]
    fn test_tube_normals() {
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(2);
        buffers.tube(&TubeParams::default(), &mut rng).unwrap();

        // Start centre points back along the axis, end centre forward
        assert!((normal_at(&buffers, 0).z + 1.0).abs() < 1e-5);
        assert!((normal_at(&buffers, 49).z - 1.0).abs() < 1e-5);
        // Collar normals are radial
        for i in 13..37 {
            let n = normal_at(&buffers, i);
            assert!(n.z.abs() < 1e-5);
            assert!((n.magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_tube_chains_after_existing_vertices() {
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(3);
        buffers.tube(&TubeParams::default(), &mut rng).unwrap();
        let base = buffers.tube(&TubeParams::default(), &mut rng).unwrap();
        assert_eq!(base, 50);
        assert_eq!(buffers.cursor(), 100);
        for &i in &buffers.indices()[288..] {
            assert!((50..100).contains(&i));
        }
    }

    #[test]
    fn test_oriented_tube_is_deterministic() {
        let params = TubeParams {
            orientation: Orientation::Fixed {
                ux: Vector3::unit_x(),
                uy: Vector3::unit_y(),
                rotation: 0.25,
            },
            segments: 6,
            ..TubeParams::default()
        };
        let mut a = VertexBuffers::new();
        let mut b = VertexBuffers::new();
        a.tube(&params, &mut StdRng::seed_from_u64(10)).unwrap();
        b.tube(&params, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.vertex_count(), 26);

        // The first ring point sits `rotation` radians round from `uy`
        let p = a.positions();
        let first = Vector3::new(p[3], p[4], p[5]) - params.start;
        let expected = Vector3::new(0.25f32.sin(), 0.25f32.cos(), 0.0) * params.radius;
        assert!((first - expected).magnitude() < 1e-5);

        let unrotated = TubeParams {
            orientation: Orientation::Fixed {
                ux: Vector3::unit_x(),
                uy: Vector3::unit_y(),
                rotation: 0.0,
            },
            ..params
        };
        let mut c = VertexBuffers::new();
        c.tube(&unrotated, &mut StdRng::seed_from_u64(10)).unwrap();
        let q = c.positions();
        let first_unrotated = Vector3::new(q[3], q[4], q[5]) - params.start;
        assert!((first_unrotated - Vector3::unit_y() * params.radius).magnitude() < 1e-5);
        assert!((first - first_unrotated).magnitude() > 0.1 * params.radius);
    }

    #[test]
    fn test_tube_rejects_two_segments() {
        let mut buffers = VertexBuffers::new();
        let params = TubeParams {
            segments: 2,
            ..TubeParams::default()
        };
        let err = buffers.tube(&params, &mut rand::rng()).unwrap_err();
        assert_eq!(
            err,
            VisualError::TooFewSegments {
                shape: "tube",
                segments: 2
            }
        );
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_tube_colours_split_at_collars() {
        let mut buffers = VertexBuffers::new();
        let params = TubeParams {
            colour_start: colour::RED,
            colour_end: colour::BLUE,
            segments: 4,
            ..TubeParams::default()
        };
        buffers.tube(&params, &mut StdRng::seed_from_u64(5)).unwrap();
        let colours = buffers.colours();
        // 1 + 4 + 4 start vertices, 4 + 4 + 1 end vertices
        for i in 0..9 {
            assert_eq!(&colours[3 * i..3 * i + 3], &colour::RED);
        }
        for i in 9..18 {
            assert_eq!(&colours[3 * i..3 * i + 3], &colour::BLUE);
        }
    }

    #[test]
    fn test_flat_quad_unit_square() {
        let mut buffers = VertexBuffers::new();
        buffers.flat_quad(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            colour::GREEN,
        );
        assert_eq!(buffers.vertex_count(), 4);
        assert_eq!(buffers.indices(), &[0, 1, 2, 0, 2, 3]);
        for i in 0..4 {
            let n = normal_at(&buffers, i);
            assert_eq!((n.x, n.y), (0.0, 0.0));
            assert_eq!(n.z.abs(), 1.0);
        }
    }

    #[test]
    fn test_triangle_generation() {
        let mut buffers = VertexBuffers::new();
        buffers.push_vertex(Vector3::unit_x(), Vector3::unit_z(), colour::WHITE);
        let base = buffers.triangle(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            colour::RED,
        );
        assert_eq!(base, 1);
        assert_eq!(buffers.indices(), &[1, 2, 3]);
        assert!((normal_at(&buffers, 1).z.abs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_polygon_fan() {
        let mut buffers = VertexBuffers::new();
        let params = PolygonParams {
            segments: 6,
            ..PolygonParams::default()
        };
        buffers.polygon(&params).unwrap();
        assert_eq!(buffers.vertex_count(), 7);
        assert_eq!(buffers.triangle_count(), 6);
        assert_indices_within(&buffers, 0);
        // ux = x, uy = y gives -(y cross x) = +z
        assert_eq!(normal_at(&buffers, 0), Vector3::new(0.0, 0.0, 1.0));
        // Closing triangle wraps to the first perimeter vertex
        assert_eq!(&buffers.indices()[15..18], &[0, 6, 1]);
    }

    #[test]
    fn test_sphere_generation() {
        let mut buffers = VertexBuffers::new();
        buffers.sphere(&SphereParams::default()).unwrap();
        // 2 poles + 9 latitude circles of 12
        assert_eq!(buffers.vertex_count(), 110);
        // 12 + 8 * 24 + 12 triangles
        assert_eq!(buffers.triangle_count(), 216);
        assert_indices_within(&buffers, 0);
    }

    #[test]
    fn test_sphere_normals_are_radial() {
        let mut buffers = VertexBuffers::new();
        let params = SphereParams {
            centre: Vector3::new(1.0, 2.0, 3.0),
            radius: 2.0,
            rings: 6,
            segments: 8,
            ..SphereParams::default()
        };
        buffers.sphere(&params).unwrap();
        let p = buffers.positions();
        for i in 0..buffers.vertex_count() {
            let pos = Vector3::new(p[3 * i], p[3 * i + 1], p[3 * i + 2]);
            let radial = (pos - params.centre) / params.radius;
            let n = normal_at(&buffers, i);
            assert!((radial - n).magnitude() < 1e-5);
        }
    }

    #[test]
    fn test_two_colour_sphere_bands() {
        let mut buffers = VertexBuffers::new();
        let params = SphereParams {
            colour: colour::RED,
            pole_colour: Some(colour::BLUE),
            rings: 6,
            segments: 4,
            ..SphereParams::default()
        };
        buffers.sphere(&params).unwrap();
        let colours = buffers.colours();
        let colour_of = |i: usize| [colours[3 * i], colours[3 * i + 1], colours[3 * i + 2]];

        // Vertex 0 is the bottom pole, circle i starts at 1 + (i - 1) * 4
        assert_eq!(colour_of(0), colour::BLUE);
        assert_eq!(colour_of(1), colour::BLUE); // circle 1
        assert_eq!(colour_of(5), colour::BLUE); // circle 2
        assert_eq!(colour_of(9), colour::RED); // circle 3
        assert_eq!(colour_of(13), colour::RED); // circle 4
        assert_eq!(colour_of(17), colour::BLUE); // circle 5
        assert_eq!(colour_of(21), colour::BLUE); // top pole
    }

    #[test]
    fn test_sphere_rejects_single_ring() {
        let mut buffers = VertexBuffers::new();
        let params = SphereParams {
            rings: 1,
            ..SphereParams::default()
        };
        assert_eq!(buffers.sphere(&params), Err(VisualError::TooFewRings(1)));
    }

    #[test]
    fn test_cone_generation() {
        let mut buffers = VertexBuffers::new();
        let mut rng = StdRng::seed_from_u64(4);
        buffers.push_vertex(Vector3::unit_x(), Vector3::unit_z(), colour::WHITE);
        let base = buffers.cone(&ConeParams::default(), &mut rng).unwrap();
        assert_eq!(base, 1);
        assert_eq!(buffers.vertex_count(), 1 + 38);
        // 12 + 2 * 12 * 2 + 12 triangles
        assert_eq!(buffers.triangle_count(), 72);
        assert_indices_within(&buffers, 1);
    }

    #[test]
    fn test_cone_ring_offset_slides_ring_along_axis() {
        for ring_offset in [0.5f32, -0.25] {
            let mut buffers = VertexBuffers::new();
            let params = ConeParams {
                tip: Vector3::new(0.0, 0.0, 2.0),
                ring_offset,
                segments: 5,
                ..ConeParams::default()
            };
            buffers.cone(&params, &mut StdRng::seed_from_u64(8)).unwrap();
            let p = buffers.positions();
            // Base centre stays at the origin
            assert_eq!([p[0], p[1], p[2]], [0.0, 0.0, 0.0]);
            // Base ring and collar sit 2 * ring_offset up the axis, radius unchanged
            for i in 1..11 {
                let pos = Vector3::new(p[3 * i], p[3 * i + 1], p[3 * i + 2]);
                assert!((pos.z - 2.0 * ring_offset).abs() < 1e-5);
                assert!((pos.truncate().magnitude() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_ring_generation() {
        let mut buffers = VertexBuffers::new();
        let params = RingParams {
            segments: 8,
            ..RingParams::default()
        };
        buffers.ring(&params).unwrap();
        assert_eq!(buffers.vertex_count(), 32);
        assert_eq!(buffers.triangle_count(), 16);
        assert_indices_within(&buffers, 0);
        let p = buffers.positions();
        let r0 = Vector3::new(p[0], p[1], p[2]).magnitude();
        let r1 = Vector3::new(p[3], p[4], p[5]).magnitude();
        assert!((r0 - 0.95).abs() < 1e-5);
        assert!((r1 - 1.05).abs() < 1e-5);
    }

    #[test]
    fn test_rhombohedron_generation() {
        let mut buffers = VertexBuffers::new();
        buffers.rhombohedron(&RhomboParams::default());
        assert_eq!(buffers.vertex_count(), 24);
        assert_eq!(buffers.triangle_count(), 12);
        assert_eq!(&buffers.indices()[..6], &[0, 1, 2, 1, 2, 3]);
        assert_eq!(&buffers.indices()[30..], &[20, 21, 22, 21, 22, 23]);
        // Front face of the unit cube uses e1 x e3 = -y
        assert_eq!(normal_at(&buffers, 0), Vector3::new(0.0, -1.0, 0.0));
    }
}
