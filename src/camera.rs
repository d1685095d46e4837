use glam::Vec3;

/// Camera position and orientation.
///
/// Only holds state. Nothing derives a view matrix from it yet; the render
/// loop draws with the projection matrix alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    position: Vec3,
    pitch: f32,
    yaw: f32,
    roll: f32,
}

impl Camera {
    /// A camera at the origin with no rotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the camera by the given offsets.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vec3::new(dx, dy, dz);
    }

    /// Adds the given angles to the current orientation.
    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32, d_roll: f32) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
        self.roll += d_roll;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }

    pub fn set_z(&mut self, z: f32) {
        self.position.z = z;
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn set_roll(&mut self, roll: f32) {
        self.roll = roll;
    }
}
