/// Outcome of moving one particle along its velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    /// Where the particle ended up (the start if it did not move)
    pub x: i32,
    pub y: i32,
    pub moved: bool,
    /// The ray stopped before its target (blocker or grid edge)
    pub collided: bool,
    /// Cells visited by the raycast
    pub steps: u32,
}

impl MoveResult {
    #[inline]
    pub fn stay(x: i32, y: i32) -> Self {
        Self { x, y, moved: false, collided: false, steps: 0 }
    }
}
