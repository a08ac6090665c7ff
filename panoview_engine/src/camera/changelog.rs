/// Per-frame dirty tracking for camera angles.

use bitflags::bitflags;

bitflags! {
    /// Which camera values changed since the last `Camera::update()`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChangeFlags: u8 {
        const YAW   = 1 << 0;
        const PITCH = 1 << 1;
        const ROLL  = 1 << 2;
        const FOV   = 1 << 3;

        const ORIENTATION = Self::YAW.bits() | Self::PITCH.bits() | Self::ROLL.bits();
    }
}

impl ChangeFlags {
    pub fn orientation_changed(&self) -> bool {
        self.intersects(ChangeFlags::ORIENTATION)
    }

    pub fn fov_changed(&self) -> bool {
        self.contains(ChangeFlags::FOV)
    }
}
