//! # Attachment modes
//!
//! The three interchangeable tools and their cycle order. The active mode is
//! owned by the game core, which also enforces the exactly-one-visible rule
//! and the forced release when the magnet is swapped out mid-hold.

/// Tool currently mounted on the stick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentMode {
    Bucket,
    Magnet,
    WreckingBall,
}

impl AttachmentMode {
    /// Every mode, in cycle order
    pub const ALL: [AttachmentMode; 3] = [
        AttachmentMode::Bucket,
        AttachmentMode::Magnet,
        AttachmentMode::WreckingBall,
    ];

    /// Next mode in the Bucket -> Magnet -> WreckingBall -> Bucket cycle
    pub fn next(self) -> Self {
        match self {
            AttachmentMode::Bucket => AttachmentMode::Magnet,
            AttachmentMode::Magnet => AttachmentMode::WreckingBall,
            AttachmentMode::WreckingBall => AttachmentMode::Bucket,
        }
    }
}

impl Default for AttachmentMode {
    fn default() -> Self {
        AttachmentMode::Bucket
    }
}
