use glam::{Mat4, Vec3};
use prism_common::{Color, Primitive};

/// Immediate-mode graphics API the frame renderer and plugins draw through.
///
/// The host provides the real implementation bound to its graphics context.
/// All calls happen on the thread that owns that context.
pub trait GraphicsBackend {
    /// Open a new transform scope, duplicating the current matrix.
    fn push_matrix(&mut self);
    /// Close the innermost transform scope.
    fn pop_matrix(&mut self);
    /// Replace the current matrix.
    fn load_matrix(&mut self, matrix: &Mat4);
    /// Post-multiply the current matrix by a translation.
    fn translate(&mut self, offset: Vec3);
    /// Post-multiply the current matrix.
    fn mul_matrix(&mut self, matrix: &Mat4);
    fn begin(&mut self, primitive: Primitive);
    fn end(&mut self);
    fn vertex(&mut self, position: Vec3);
    fn color(&mut self, color: Color);
}

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    PushMatrix,
    PopMatrix,
    LoadMatrix(Mat4),
    Translate(Vec3),
    MulMatrix(Mat4),
    Begin(Primitive),
    End,
    Vertex(Vec3),
    Color(Color),
}

impl DrawCall {
    /// Whether the call emits something visible (a vertex or a color).
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCall::Begin(_) | DrawCall::End | DrawCall::Vertex(_) | DrawCall::Color(_)
        )
    }
}

/// Backend that records every call and tracks the matrix stack.
///
/// Used headless by the CLI and by tests; also a reference for hosts
/// writing a GPU-backed implementation.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    stack: Vec<Mat4>,
    /// Vertices transformed by the matrix current when they were emitted.
    transformed: Vec<Vec3>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            stack: vec![Mat4::IDENTITY],
            transformed: Vec::new(),
        }
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Matrix at the top of the stack.
    pub fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Current stack depth; 1 when every push has been matched by a pop.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transformed_vertices(&self) -> &[Vec3] {
        &self.transformed
    }

    /// Number of vertex calls recorded.
    pub fn vertex_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Vertex(_)))
            .count()
    }

    /// Drop recorded calls and reset the matrix stack, e.g. between frames.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        if self.stack.is_empty() {
            self.stack.push(Mat4::IDENTITY);
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

impl GraphicsBackend for RecordingBackend {
    fn push_matrix(&mut self) {
        let top = self.current();
        self.stack.push(top);
        self.calls.push(DrawCall::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        // the base matrix is never popped
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.calls.push(DrawCall::PopMatrix);
    }

    fn load_matrix(&mut self, matrix: &Mat4) {
        *self.top_mut() = *matrix;
        self.calls.push(DrawCall::LoadMatrix(*matrix));
    }

    fn translate(&mut self, offset: Vec3) {
        let top = self.top_mut();
        *top *= Mat4::from_translation(offset);
        self.calls.push(DrawCall::Translate(offset));
    }

    fn mul_matrix(&mut self, matrix: &Mat4) {
        let top = self.top_mut();
        *top *= *matrix;
        self.calls.push(DrawCall::MulMatrix(*matrix));
    }

    fn begin(&mut self, primitive: Primitive) {
        self.calls.push(DrawCall::Begin(primitive));
    }

    fn end(&mut self) {
        self.calls.push(DrawCall::End);
    }

    fn vertex(&mut self, position: Vec3) {
        let world = self.current().transform_point3(position);
        self.transformed.push(world);
        self.calls.push(DrawCall::Vertex(position));
    }

    fn color(&mut self, color: Color) {
        self.calls.push(DrawCall::Color(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_restores_matrix() {
        let mut gfx = RecordingBackend::new();
        gfx.load_matrix(&Mat4::from_scale(Vec3::splat(2.0)));
        gfx.push_matrix();
        gfx.translate(Vec3::X);
        assert_eq!(gfx.depth(), 2);
        gfx.pop_matrix();
        assert_eq!(gfx.depth(), 1);
        assert_eq!(gfx.current(), Mat4::from_scale(Vec3::splat(2.0)));
    }

    #[test]
    fn pop_on_base_keeps_identity() {
        let mut gfx = RecordingBackend::new();
        gfx.pop_matrix();
        assert_eq!(gfx.depth(), 1);
        assert_eq!(gfx.current(), Mat4::IDENTITY);
    }

    #[test]
    fn vertices_are_transformed_by_current_matrix() {
        let mut gfx = RecordingBackend::new();
        gfx.translate(Vec3::new(1.0, 0.0, 0.0));
        gfx.mul_matrix(&Mat4::from_scale(Vec3::splat(2.0)));
        gfx.vertex(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(gfx.transformed_vertices(), &[Vec3::new(3.0, 2.0, 2.0)]);
        assert_eq!(gfx.vertex_count(), 1);
    }

    #[test]
    fn draw_calls_classification() {
        assert!(DrawCall::Vertex(Vec3::ZERO).is_draw());
        assert!(DrawCall::Color(Color::RED).is_draw());
        assert!(!DrawCall::PushMatrix.is_draw());
        assert!(!DrawCall::Translate(Vec3::ZERO).is_draw());
    }
}
