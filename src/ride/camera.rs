use crate::sim::{Float3, Frame};

/// Who drives the view.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// The host's own free camera; the ride does not emit a camera pose.
    #[default]
    Free,
    /// First-person: the camera sits on the bead and looks along the track.
    FollowBead,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Free => CameraMode::FollowBead,
            CameraMode::FollowBead => CameraMode::Free,
        }
    }
}

/// Camera placement derived from the bead frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Float3,
    pub forward: Float3,
    pub up: Float3,
}

impl CameraPose {
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            position: frame.origin,
            forward: frame.tangent,
            up: frame.normal,
        }
    }
}
