//! Matrix accumulator for scene traversal
//!
//! Holds one working matrix plus the copies saved on group entry. Entering a
//! group pushes, leaving it pops, so transforms inside a group never leak to
//! the group's later siblings.

use crate::foundation::math::Mat4;

/// Concatenate a transform node's local matrix onto the parent matrix
///
/// Points reaching a leaf are mapped by the parent first-applied-last, i.e.
/// `child * p == parent * (local * p)`.
pub fn accumulate(parent: &Mat4, local: &Mat4) -> Mat4 {
    parent * local
}

/// Working matrix with save/restore discipline
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl MatrixStack {
    /// Stack starting at the identity matrix
    pub fn new() -> Self {
        Self::with_root(Mat4::identity())
    }

    /// Stack starting at an arbitrary root matrix
    pub fn with_root(root: Mat4) -> Self {
        Self {
            current: root,
            saved: Vec::new(),
        }
    }

    /// Matrix in effect at the current traversal position
    pub fn current(&self) -> &Mat4 {
        &self.current
    }

    /// Replace the working matrix
    pub fn set(&mut self, matrix: Mat4) {
        self.current = matrix;
    }

    /// Accumulate a local transform onto the working matrix
    pub fn apply(&mut self, local: &Mat4) {
        self.current = accumulate(&self.current, local);
    }

    /// Save the working matrix (group entry)
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last saved matrix (group exit)
    ///
    /// Returns `false` if nothing was saved.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(matrix) => {
                self.current = matrix;
                true
            }
            None => false,
        }
    }

    /// Number of saved matrices (group nesting depth)
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Pop until `depth` saved matrices remain
    pub fn unwind_to(&mut self, depth: usize) {
        while self.saved.len() > depth {
            self.pop();
        }
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
