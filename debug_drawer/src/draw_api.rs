//! Per-shape drawing functions.
//!
//! Every function takes a color and a [`DrawOptions`] and is a no-op when the
//! gate is closed. Shapes map onto the three request categories:
//!
//! - line-batch shapes: [`line`](DebugDraw::line), [`lines`](DebugDraw::lines),
//!   [`polyline`](DebugDraw::polyline), [`aabb`](DebugDraw::aabb),
//!   [`cross`](DebugDraw::cross), [`circle`](DebugDraw::circle),
//!   [`grid`](DebugDraw::grid), [`frustum`](DebugDraw::frustum);
//! - primitive-batch shapes: [`ray`](DebugDraw::ray), [`matrix`](DebugDraw::matrix),
//!   [`wire_arrow`](DebugDraw::wire_arrow), [`wire_quad`](DebugDraw::wire_quad),
//!   [`arc`](DebugDraw::arc), [`wire_arc`](DebugDraw::wire_arc);
//! - stamp shapes (mesh instances): everything else.

use dbgdraw_core::math::{
    Mat4, Quat, Vec3, mat4_axis, mat4_from_scale_rotation_translation, quat_from_axis_angle, rotation_from_up,
    signed_angle,
};
use dbgdraw_core::mesh::PrimitiveTopology;

use crate::drawer::DebugDraw;
use crate::geometry::PrimitiveKind;
use crate::pipeline_state::{CullMode, DepthTest, PipelineKey, Shading};
use crate::pool::PrimitiveBatchBuilder;
use crate::render_context::Color;

/// Axis colors used by [`DebugDraw::matrix`].
pub const X_AXIS_COLOR: Color = [219.0 / 255.0, 62.0 / 255.0, 29.0 / 255.0, 0.93];
pub const Y_AXIS_COLOR: Color = [154.0 / 255.0, 243.0 / 255.0, 72.0 / 255.0, 0.93];
pub const Z_AXIS_COLOR: Color = [58.0 / 255.0, 122.0 / 255.0, 248.0 / 255.0, 0.93];

const ARC_SEGMENTS: u32 = 24;
const CIRCLE_SEGMENTS: u32 = 32;

/// Lifetime and depth test of a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Seconds to stay visible. Zero draws for a single frame.
    pub duration: f32,
    /// Whether closer scene geometry hides the draw.
    pub depth_test: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            duration: 0.0,
            depth_test: true,
        }
    }
}

impl DrawOptions {
    /// Single frame, depth tested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible for `duration` seconds, depth tested.
    pub fn timed(duration: f32) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    /// Always drawn on top.
    pub fn without_depth_test(self) -> Self {
        self.with_depth_test(false)
    }

    fn key(&self, cull_mode: CullMode, shading: Shading) -> PipelineKey {
        PipelineKey::new(DepthTest::from(self.depth_test), cull_mode, shading)
    }
}

/// Angular range and radii of an arc, in degrees and world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// Direction the angles are measured from, in world space.
    pub from: Vec3,
    pub from_angle: f32,
    pub to_angle: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl ArcParams {
    /// A ring segment between two angles and two radii.
    pub fn ring(from: Vec3, from_angle: f32, to_angle: f32, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            from,
            from_angle,
            to_angle,
            inner_radius,
            outer_radius,
        }
    }

    /// A pie slice of `angle` degrees starting at `from`.
    pub fn sector(from: Vec3, angle: f32, radius: f32) -> Self {
        Self::ring(from, 0.0, angle, radius, radius)
    }

    /// Wrap angles into `(-360, 360)` and order them, clamp radii to zero
    /// and order them.
    pub fn normalized(self) -> Self {
        let wrap = |angle: f32| if angle != 0.0 { angle % 360.0 } else { angle };
        let (mut from_angle, mut to_angle) = (wrap(self.from_angle), wrap(self.to_angle));
        if from_angle > to_angle {
            std::mem::swap(&mut from_angle, &mut to_angle);
        }

        let mut inner_radius = self.inner_radius.max(0.0);
        let mut outer_radius = self.outer_radius.max(0.0);
        if inner_radius > outer_radius {
            std::mem::swap(&mut inner_radius, &mut outer_radius);
        }

        Self {
            from: self.from,
            from_angle,
            to_angle,
            inner_radius,
            outer_radius,
        }
    }

    /// Whether the inner and outer radius differ enough to draw both rims.
    fn has_inner_rim(&self) -> bool {
        (self.inner_radius - self.outer_radius).abs() > 0.001
    }
}

/// Point on the unit XZ circle at `theta` radians, growing towards -Z.
fn arc_direction(theta: f32) -> Vec3 {
    Vec3::new(theta.cos(), 0.0, -theta.sin())
}

/// Start angle and per-segment step in radians for an arc drawn with `transform`.
fn arc_sweep(transform: &Mat4, arc: &ArcParams) -> (f32, f32) {
    let starting = signed_angle(mat4_axis(transform, 0), arc.from, mat4_axis(transform, 1)).to_radians();
    let theta = starting + arc.from_angle.to_radians();
    let target = starting + arc.to_angle.to_radians();
    (theta, (target - theta) / ARC_SEGMENTS as f32)
}

fn trs(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    mat4_from_scale_rotation_translation(scale, rotation, position)
}

impl DebugDraw {
    fn line_key(options: &DrawOptions) -> PipelineKey {
        options.key(CullMode::Off, Shading::Colored)
    }

    fn primitive_batch(
        &mut self,
        topology: PrimitiveTopology,
        shading: Shading,
        options: &DrawOptions,
    ) -> Option<PrimitiveBatchBuilder<'_>> {
        self.begin_primitive_batch(topology, options.duration, options.key(CullMode::Off, shading))
    }

    fn stamp(
        &mut self,
        kind: PrimitiveKind,
        cull_mode: CullMode,
        shading: Shading,
        transform: Mat4,
        color: Color,
        options: &DrawOptions,
    ) {
        if let Some(mut builder) = self.begin_stamp(kind, options.duration, options.key(cull_mode, shading)) {
            builder.set_transform(transform).set_color(color);
            builder.commit();
        }
    }

    // Line-batch shapes

    /// Draw a single line segment.
    pub fn line(&mut self, start: Vec3, end: Vec3, color: Color, options: DrawOptions) {
        self.append_line(Self::line_key(&options), start, end, color, options.duration);
    }

    /// Draw independent segments from consecutive pairs of points. A trailing
    /// unpaired point is ignored.
    pub fn lines(&mut self, segments: &[Vec3], color: Color, options: DrawOptions) {
        if !self.is_active() {
            return;
        }
        let key = Self::line_key(&options);
        for pair in segments.chunks_exact(2) {
            self.append_line(key, pair[0], pair[1], color, options.duration);
        }
    }

    /// Draw a connected line through every point.
    pub fn polyline(&mut self, points: &[Vec3], color: Color, options: DrawOptions) {
        if !self.is_active() {
            return;
        }
        let key = Self::line_key(&options);
        for pair in points.windows(2) {
            self.append_line(key, pair[0], pair[1], color, options.duration);
        }
    }

    /// Draw an axis-aligned bounding box from min to max corners (12 edges).
    pub fn aabb(&mut self, min: Vec3, max: Vec3, color: Color, options: DrawOptions) {
        let c = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        self.box_edges(&c, color, options);
    }

    /// Draw a wireframe frustum from 8 corners.
    ///
    /// Corner order: near plane `[TL, TR, BR, BL]`, far plane `[TL, TR, BR, BL]`.
    pub fn frustum(&mut self, corners: &[Vec3; 8], color: Color, options: DrawOptions) {
        self.box_edges(corners, color, options);
    }

    fn box_edges(&mut self, c: &[Vec3; 8], color: Color, options: DrawOptions) {
        if !self.is_active() {
            return;
        }
        let key = Self::line_key(&options);
        for i in 0..4 {
            let next = (i + 1) % 4;
            self.append_line(key, c[i], c[next], color, options.duration);
            self.append_line(key, c[i + 4], c[next + 4], color, options.duration);
            self.append_line(key, c[i], c[i + 4], color, options.duration);
        }
    }

    /// Draw a cross marker at a point (3 axis-aligned lines).
    pub fn cross(&mut self, center: Vec3, size: f32, color: Color, options: DrawOptions) {
        if !self.is_active() {
            return;
        }
        let key = Self::line_key(&options);
        let half = size * 0.5;
        for axis in [Vec3::x(), Vec3::y(), Vec3::z()] {
            self.append_line(key, center - axis * half, center + axis * half, color, options.duration);
        }
    }

    /// Draw a circle in the plane spanned by two orthogonal axes.
    pub fn circle(&mut self, center: Vec3, radius: f32, axis_a: Vec3, axis_b: Vec3, color: Color, options: DrawOptions) {
        if !self.is_active() {
            return;
        }
        let key = Self::line_key(&options);
        let mut prev = center + axis_a * radius;
        for i in 1..=CIRCLE_SEGMENTS {
            let angle = i as f32 * std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
            let (sin, cos) = angle.sin_cos();
            let point = center + (axis_a * cos + axis_b * sin) * radius;
            self.append_line(key, prev, point, color, options.duration);
            prev = point;
        }
    }

    /// Draw a grid on the XZ plane with `2 * half_count` cells per side.
    pub fn grid(&mut self, center: Vec3, cell_size: f32, half_count: u32, color: Color, options: DrawOptions) {
        if !self.is_active() {
            return;
        }
        let key = Self::line_key(&options);
        let extent = cell_size * half_count as f32;
        let n = half_count as i32;
        for i in -n..=n {
            let offset = i as f32 * cell_size;
            self.append_line(
                key,
                center + Vec3::new(offset, 0.0, -extent),
                center + Vec3::new(offset, 0.0, extent),
                color,
                options.duration,
            );
            self.append_line(
                key,
                center + Vec3::new(-extent, 0.0, offset),
                center + Vec3::new(extent, 0.0, offset),
                color,
                options.duration,
            );
        }
    }

    // Primitive-batch shapes

    /// Draw a segment from `position` to `position + direction`.
    pub fn ray(&mut self, position: Vec3, direction: Vec3, color: Color, options: DrawOptions) {
        if let Some(mut batch) = self.primitive_batch(PrimitiveTopology::LineList, Shading::Colored, &options) {
            batch.add_vertex(position, color).add_vertex(position + direction, color);
            batch.commit();
        }
    }

    /// Draw the unit axes of a transform in X/Y/Z axis colors.
    pub fn matrix(&mut self, matrix: &Mat4, options: DrawOptions) {
        if let Some(mut batch) = self.primitive_batch(PrimitiveTopology::LineList, Shading::Colored, &options) {
            batch.set_transform(*matrix).use_vertex_color(true);
            for (axis, color) in [(Vec3::x(), X_AXIS_COLOR), (Vec3::y(), Y_AXIS_COLOR), (Vec3::z(), Z_AXIS_COLOR)] {
                batch.add_vertex(Vec3::zeros(), color).add_vertex(axis, color);
            }
            batch.commit();
        }
    }

    /// Draw an arrow head pointing along local +Z.
    pub fn wire_arrow(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        const S: f32 = 0.5;
        let tip = Vec3::z();
        if let Some(mut batch) = self.primitive_batch(PrimitiveTopology::LineStrip, Shading::Colored, &options) {
            batch.set_transform(trs(position, rotation, scale));
            for vertex in [
                tip,
                Vec3::new(S, 0.0, 0.0),
                Vec3::new(-S, 0.0, 0.0),
                tip,
                Vec3::new(0.0, S, 0.0),
                Vec3::new(0.0, -S, 0.0),
                tip,
            ] {
                batch.add_vertex(vertex, color);
            }
            batch.commit();
        }
    }

    /// Draw a unit quad outline in the local XZ plane.
    pub fn wire_quad(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        const S: f32 = 0.5;
        if let Some(mut batch) = self.primitive_batch(PrimitiveTopology::LineStrip, Shading::Colored, &options) {
            batch.set_transform(trs(position, rotation, scale));
            for (x, z) in [(-S, -S), (-S, S), (S, S), (S, -S), (-S, -S)] {
                batch.add_vertex(Vec3::new(x, 0.0, z), color);
            }
            batch.commit();
        }
    }

    /// Draw a filled ring segment in the local XZ plane.
    ///
    /// Angles and radii are normalized first, see [`ArcParams::normalized`].
    pub fn arc(&mut self, position: Vec3, rotation: Quat, arc: ArcParams, color: Color, options: DrawOptions) {
        let arc = arc.normalized();
        let transform = trs(position, rotation, Vec3::repeat(1.0));
        if let Some(mut batch) = self.primitive_batch(PrimitiveTopology::TriangleStrip, Shading::Shaded, &options) {
            batch.set_transform(transform).use_vertex_color(true);
            let (start, step) = arc_sweep(&transform, &arc);
            for i in 0..=ARC_SEGMENTS {
                let direction = arc_direction(start + step * i as f32);
                batch
                    .add_vertex(direction * arc.inner_radius, color)
                    .add_vertex(direction * arc.outer_radius, color);
            }
            batch.commit();
        }
    }

    /// Draw the outline of a ring segment in the local XZ plane.
    ///
    /// When the radii differ the outline runs along the outer rim and back
    /// along the inner rim.
    pub fn wire_arc(&mut self, position: Vec3, rotation: Quat, arc: ArcParams, color: Color, options: DrawOptions) {
        let arc = arc.normalized();
        let transform = trs(position, rotation, Vec3::repeat(1.0));
        if let Some(mut batch) = self.primitive_batch(PrimitiveTopology::LineStrip, Shading::Colored, &options) {
            batch.set_transform(transform).use_vertex_color(true);
            let (start, step) = arc_sweep(&transform, &arc);
            let inner_rim = arc.has_inner_rim();

            if inner_rim {
                batch.add_vertex(arc_direction(start) * arc.inner_radius, color);
            }
            for i in 0..=ARC_SEGMENTS {
                let theta = start + step * i as f32;
                batch.add_vertex(arc_direction(theta) * arc.outer_radius, color);
            }
            if inner_rim {
                for i in (0..=ARC_SEGMENTS).rev() {
                    let theta = start + step * i as f32;
                    batch.add_vertex(arc_direction(theta) * arc.inner_radius, color);
                }
            }
            batch.commit();
        }
    }

    // Stamp shapes

    /// Draw a solid box.
    pub fn cube(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, scale);
        self.stamp(PrimitiveKind::Cube, CullMode::Back, Shading::Shaded, transform, color, &options);
    }

    /// Draw a box outline.
    pub fn wire_cube(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, scale);
        self.stamp(PrimitiveKind::WireCube, CullMode::Off, Shading::Colored, transform, color, &options);
    }

    /// Draw a solid ellipsoid. `scale` is the diameter along each axis.
    pub fn sphere(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, scale);
        self.stamp(PrimitiveKind::Sphere, CullMode::Back, Shading::Shaded, transform, color, &options);
    }

    /// Draw an ellipsoid as three great circles.
    pub fn wire_sphere(&mut self, position: Vec3, rotation: Quat, size: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, size);
        self.stamp(PrimitiveKind::WireSphere, CullMode::Off, Shading::Colored, transform, color, &options);
    }

    /// Draw a solid square pyramid with its apex along +Y.
    pub fn pyramid(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, scale);
        self.stamp(PrimitiveKind::Pyramid, CullMode::Back, Shading::Shaded, transform, color, &options);
    }

    pub fn wire_pyramid(&mut self, position: Vec3, rotation: Quat, scale: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, scale);
        self.stamp(PrimitiveKind::WirePyramid, CullMode::Off, Shading::Colored, transform, color, &options);
    }

    /// Draw a filled circle in the local XZ plane.
    pub fn disc(&mut self, position: Vec3, rotation: Quat, radius: f32, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, Vec3::repeat(radius));
        self.stamp(PrimitiveKind::Disc, CullMode::Off, Shading::Shaded, transform, color, &options);
    }

    /// Draw an open cylinder along local Y.
    pub fn tube(&mut self, position: Vec3, rotation: Quat, size: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, size);
        self.stamp(PrimitiveKind::Tube, CullMode::Off, Shading::Shaded, transform, color, &options);
    }

    pub fn wire_tube(&mut self, position: Vec3, rotation: Quat, size: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, size);
        self.stamp(PrimitiveKind::WireTube, CullMode::Off, Shading::Colored, transform, color, &options);
    }

    /// Draw the upper half of a wire sphere.
    pub fn wire_hemisphere(&mut self, position: Vec3, rotation: Quat, size: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation, size);
        self.stamp(PrimitiveKind::WireHemisphere, CullMode::Back, Shading::Colored, transform, color, &options);
    }

    /// Draw a unit quad facing `normal`, with a small marker along the normal.
    pub fn plane(&mut self, normal: Vec3, position: Vec3, scale: Vec3, color: Color, options: DrawOptions) {
        let transform = trs(position, rotation_from_up(normal), scale);
        self.stamp(PrimitiveKind::Plane, CullMode::Off, Shading::Shaded, transform, color, &options);
    }

    /// Draw a capsule outline along local Y: a wire tube capped by two wire
    /// hemispheres. `height` includes the caps.
    pub fn wire_capsule(
        &mut self,
        position: Vec3,
        rotation: Quat,
        radius: f32,
        height: f32,
        color: Color,
        options: DrawOptions,
    ) {
        if !self.is_active() {
            return;
        }
        let diameter = radius.max(0.0) * 2.0;
        let body = (height - diameter).max(0.0);
        let offset = rotation * Vec3::new(0.0, body * 0.5, 0.0);
        let flipped = rotation * quat_from_axis_angle(Vec3::x(), 180.0);

        self.wire_hemisphere(position + offset, rotation, Vec3::repeat(diameter), color, options);
        self.wire_tube(position, rotation, Vec3::new(diameter, body, diameter), color, options);
        self.wire_hemisphere(position - offset, flipped, Vec3::repeat(diameter), color, options);
    }
}
