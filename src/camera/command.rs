//! Discrete requests the rig accepts through
//! [`CameraRig::execute`](super::CameraRig::execute).

/// A discrete camera command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraCommand {
    /// Lock onto the best visible candidate, or release the current lock.
    ToggleLock,
}
