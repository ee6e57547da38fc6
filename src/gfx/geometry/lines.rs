//! # Line Generation
//!
//! Thick and flat lines between two points. Flat lines lie in the plane
//! whose normal is the `up` vector and every vertex carries that
//! normal. The thick line is an octagonal prism built with the same vertex
//! layout and index topology as a tube.

use super::basis::{circle_point, random_basis, renormalize};
use super::{
    require_segments, CircleOutlineParams, Colour, DashPattern, FlatLineParams, LineParams,
    VertexBuffers,
};
use crate::config::{ROUND_CAP_SEGMENTS, THICK_LINE_SEGMENTS};
use crate::error::{VisualError, VisualResult};
use cgmath::{InnerSpace, Vector3};
use rand::Rng;
use std::f32::consts::PI;

/// Line endpoints pulled in by `shorten`, plus the unit direction
fn shortened(
    start: Vector3<f32>,
    end: Vector3<f32>,
    shorten: f32,
) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let v = renormalize(end - start);
    if shorten > 0.0 {
        (start + v * shorten, end - v * shorten, v)
    } else {
        (start, end, v)
    }
}

impl VertexBuffers {
    /// Thick line: an octagonal prism `width` wide and `thickness` deep.
    ///
    /// Writes `4 * 8 + 2` vertices. Side faces are flat shaded with normals
    /// along the line's perpendicular and its `up` vector.
    pub fn line(&mut self, params: &LineParams) -> u32 {
        let s = THICK_LINE_SEGMENTS;
        let (start, end, v) = shortened(params.start, params.end, params.shorten);
        let up = renormalize(params.up);
        let vv = renormalize(v.cross(up));

        let half_w = params.width * 0.5;
        let half_d = params.thickness * 0.5;
        let r = (half_w * half_w + half_d * half_d).sqrt();
        let a0 = (half_w / r).acos();
        let angles = [a0, a0, PI - a0, PI - a0, PI + a0, PI + a0, 2.0 * PI - a0, 2.0 * PI - a0];
        let norms = [vv, up, up, -vv, -vv, -up, -up, vv];
        // vv plays the role of the first circle axis so angle 0 lies along it
        let ring = angles.map(|a| circle_point(up, vv, a, r));

        let base = self.push_vertex(start, -v, params.colour_start);
        for &c in &ring {
            self.push_vertex(start + c, -v, params.colour_start);
        }
        for (&c, &n) in ring.iter().zip(&norms) {
            self.push_vertex(start + c, n, params.colour_start);
        }
        for (&c, &n) in ring.iter().zip(&norms) {
            self.push_vertex(end + c, n, params.colour_end);
        }
        for &c in &ring {
            self.push_vertex(end + c, v, params.colour_end);
        }
        self.push_vertex(end, v, params.colour_end);

        self.push_capped_body_indices(base, 4, s);
        base
    }

    /// Flat rectangular line, `width` wide, with a single quad
    pub fn flat_line(&mut self, params: &FlatLineParams) -> u32 {
        let (start, end, v) = shortened(params.start, params.end, params.shorten);
        let vv = renormalize(v.cross(params.up));
        let ww = vv * params.width * 0.5;
        self.flat_quad_with_normal([start + ww, start - ww, end - ww, end + ww], params)
    }

    /// Flat line with optional round caps at either end.
    ///
    /// Each cap is a disc of diameter `width` centred on the line end, so
    /// consecutive rounded lines join without gaps.
    pub fn flat_line_rounded(
        &mut self,
        params: &FlatLineParams,
        start_cap: bool,
        end_cap: bool,
    ) -> u32 {
        let (start, end, v) = shortened(params.start, params.end, params.shorten);
        let vv = renormalize(v.cross(params.up));
        let ww = vv * params.width * 0.5;

        let base = self.cursor;
        if start_cap {
            self.round_cap(start, v, vv, params);
        }
        self.flat_quad_with_normal([start + ww, start - ww, end - ww, end + ww], params);
        if end_cap {
            self.round_cap(end, v, vv, params);
        }
        base
    }

    /// Flat line that mitres into its neighbours.
    ///
    /// At each end with a neighbour the offset direction is the mean of this
    /// segment's perpendicular and the neighbour's, so adjacent segments
    /// share their corner points. An end without a neighbour is square.
    pub fn flat_line_joined(
        &mut self,
        params: &FlatLineParams,
        prev: Option<Vector3<f32>>,
        next: Option<Vector3<f32>>,
    ) -> u32 {
        let start = params.start;
        let end = params.end;
        let perp = |d: Vector3<f32>| renormalize(renormalize(d).cross(params.up));
        let vv = perp(end - start);
        let half = params.width * 0.5;

        let w_start = match prev {
            Some(p) => (vv + perp(start - p)) * 0.5 * half,
            None => vv * half,
        };
        let w_end = match next {
            Some(n) => (vv + perp(n - end)) * 0.5 * half,
            None => vv * half,
        };
        self.flat_quad_with_normal(
            [start + w_start, start - w_start, end - w_end, end + w_end],
            params,
        )
    }

    /// Flat dashed line.
    ///
    /// Dashes of `dash_length` are separated by gaps of
    /// `dash_length * gap_proportion`; dashes stop once the end of the next
    /// dash would reach the (shortened) line length. A zero dash length
    /// writes nothing. Dash `k` starts `k * dash_length * (1 + gap_proportion)`
    /// along the line, so far-from-origin lines place dashes without
    /// accumulated rounding.
    ///
    /// Fails if the dash spacing is not a positive finite distance, or if the
    /// dashes would overflow the index range.
    pub fn flat_dashed_line(
        &mut self,
        params: &FlatLineParams,
        pattern: &DashPattern,
    ) -> VisualResult<u32> {
        let base = self.cursor;
        if pattern.dash_length == 0.0 {
            return Ok(base);
        }
        let step = pattern.dash_length * (1.0 + pattern.gap_proportion);
        if pattern.dash_length < 0.0 || !step.is_finite() || step <= 0.0 {
            return Err(VisualError::InvalidDashPattern {
                dash_length: pattern.dash_length,
                gap_proportion: pattern.gap_proportion,
            });
        }

        let (start, _, v) = shortened(params.start, params.end, params.shorten);
        let line_len = if params.shorten > 0.0 {
            (params.end - params.start).magnitude() - 2.0 * params.shorten
        } else {
            (params.end - params.start).magnitude()
        };
        let dashes = if line_len > pattern.dash_length {
            ((line_len - pattern.dash_length) / step).ceil() as u64
        } else {
            0
        };
        let vertices = dashes.saturating_mul(4);
        if vertices > u64::from(u32::MAX - self.cursor) {
            return Err(VisualError::TooManyVertices {
                shape: "dashed line",
                vertices,
            });
        }

        let vv = renormalize(v.cross(params.up));
        let ww = vv * params.width * 0.5;
        for k in 0..dashes {
            let along = k as f32 * step;
            let dash_s = start + v * along;
            let dash_e = start + v * (along + pattern.dash_length);
            let corners = [dash_s + ww, dash_s - ww, dash_e - ww, dash_e + ww];
            self.flat_quad_with_normal(corners, params);
        }
        log::trace!("dashed line: {} dashes", dashes);
        Ok(base)
    }

    /// Closed annulus in the plane normal to `params.normal`.
    ///
    /// Writes `2 * segments` vertices as inner/outer pairs and two triangles
    /// per segment, the last segment wrapping to the first pair.
    pub fn flat_circle_outline<R: Rng + ?Sized>(
        &mut self,
        params: &CircleOutlineParams,
        rng: &mut R,
    ) -> VisualResult<u32> {
        require_segments("circle outline", params.segments)?;
        let s = params.segments;
        let normal = renormalize(params.normal);
        let (inplane, n_x_inplane) = random_basis(normal, rng);
        let r_in = params.radius - params.line_width * 0.5;
        let r_out = params.radius + params.line_width * 0.5;

        let base = self.cursor;
        for j in 0..s {
            let t = j as f32 * 2.0 * PI / s as f32;
            let c_in = circle_point(inplane, n_x_inplane, t, r_in);
            let c_out = circle_point(inplane, n_x_inplane, t, r_out);
            self.push_vertex(params.centre + c_in, normal, params.colour);
            self.push_vertex(params.centre + c_out, normal, params.colour);
        }
        for j in 0..s {
            let jn = (j + 1) % s;
            self.push_triangle(base + 2 * j, base + 2 * jn, base + 2 * jn + 1);
            self.push_triangle(base + 2 * j, base + 2 * jn + 1, base + 2 * j + 1);
        }
        Ok(base)
    }

    fn round_cap(
        &mut self,
        centre: Vector3<f32>,
        v: Vector3<f32>,
        vv: Vector3<f32>,
        params: &FlatLineParams,
    ) {
        let s = ROUND_CAP_SEGMENTS;
        let r = params.width * 0.5;
        let up = renormalize(params.up);
        let mid = self.push_vertex(centre, up, params.colour);
        for j in 0..s {
            let t = j as f32 * 2.0 * PI / s as f32;
            self.push_vertex(centre + circle_point(v, vv, t, r), up, params.colour);
        }
        for j in 0..s {
            self.push_triangle(mid, mid + 1 + j, mid + 1 + (j + 1) % s);
        }
    }

    fn flat_quad_with_normal(
        &mut self,
        corners: [Vector3<f32>; 4],
        params: &FlatLineParams,
    ) -> u32 {
        let up = renormalize(params.up);
        let base = self.cursor;
        for corner in corners {
            self.push_vertex(corner, up, params.colour);
        }
        self.push_triangle(base, base + 1, base + 2);
        self.push_triangle(base, base + 2, base + 3);
        base
    }
}

/// Append a polyline as joined flat segments
pub fn polyline(
    buffers: &mut VertexBuffers,
    points: &[Vector3<f32>],
    up: Vector3<f32>,
    colour: Colour,
    width: f32,
) -> u32 {
    let base = buffers.cursor();
    for (i, pair) in points.windows(2).enumerate() {
        let params = FlatLineParams {
            start: pair[0],
            end: pair[1],
            up,
            colour,
            width,
            shorten: 0.0,
        };
        let prev = i.checked_sub(1).map(|p| points[p]);
        let next = points.get(i + 2).copied();
        buffers.flat_line_joined(&params, prev, next);
    }
    base
}
