use glam::{Mat4, Vec2, Vec3};

const MAX_PITCH_DEG: f32 = 89.0;
const ORBIT_RANGE: (f32, f32) = (1.5, 30.0);
const SPEED_RANGE: (f32, f32) = (0.2, 20.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Free,
    Orbital,
}

pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,

    pub target: Vec3,
    pub orbital_distance: f32,

    pub mode: CameraMode,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            yaw: 45.0_f32.to_radians(),
            pitch: 25.0_f32.to_radians(),

            target: Vec3::ZERO,
            orbital_distance: 5.0,

            mode: CameraMode::Orbital,

            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.05,
            far: 100.0,

            move_speed: 2.0,
            mouse_sensitivity: 0.004,
            zoom_speed: 0.4,
        };
        camera.update_orbital_position();
        camera
    }
}

impl Camera {
    pub fn front(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        match self.mode {
            CameraMode::Free => {
                Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::Y)
            }
            CameraMode::Orbital => Mat4::look_at_rh(self.position, self.target, Vec3::Y),
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn process_keyboard(&mut self, forward: f32, right: f32, up: f32, dt: f32) {
        if self.mode != CameraMode::Free {
            return;
        }

        let speed = self.move_speed * dt;
        self.position += self.front() * forward * speed;
        self.position += self.right() * right * speed;
        self.position.y += up * speed;
    }

    /// Free mode looks around; orbital mode swings around the target.
    pub fn process_mouse_movement(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.mouse_sensitivity;
        self.pitch -= delta.y * self.mouse_sensitivity;

        let max_pitch = MAX_PITCH_DEG.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);

        if self.mode == CameraMode::Orbital {
            self.update_orbital_position();
        }
    }

    pub fn process_scroll(&mut self, delta: f32) {
        match self.mode {
            CameraMode::Free => {
                self.move_speed =
                    (self.move_speed + delta * self.zoom_speed).clamp(SPEED_RANGE.0, SPEED_RANGE.1);
            }
            CameraMode::Orbital => {
                self.orbital_distance = (self.orbital_distance - delta * self.zoom_speed)
                    .clamp(ORBIT_RANGE.0, ORBIT_RANGE.1);
                self.update_orbital_position();
            }
        }
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if self.mode == mode {
            return;
        }

        match mode {
            CameraMode::Free => {
                let dir = (self.target - self.position).normalize_or_zero();
                self.yaw = dir.z.atan2(dir.x);
                self.pitch = dir.y.clamp(-1.0, 1.0).asin();
            }
            CameraMode::Orbital => {
                self.orbital_distance = self
                    .position
                    .distance(self.target)
                    .clamp(ORBIT_RANGE.0, ORBIT_RANGE.1);
                let dir = (self.position - self.target).normalize_or_zero();
                self.yaw = dir.z.atan2(dir.x);
                self.pitch = dir.y.clamp(-1.0, 1.0).asin();
            }
        }
        self.mode = mode;
        if mode == CameraMode::Orbital {
            self.update_orbital_position();
        }
        tracing::debug!(?mode, "camera mode");
    }

    /// Back to the default orbit, keeping the current aspect ratio.
    pub fn reset(&mut self) {
        *self = Self {
            aspect: self.aspect,
            ..Self::default()
        };
    }

    fn update_orbital_position(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.orbital_distance * self.yaw.cos() * self.pitch.cos(),
                self.orbital_distance * self.pitch.sin(),
                self.orbital_distance * self.yaw.sin() * self.pitch.cos(),
            );
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn starts_orbiting_the_origin() {
        let camera = Camera::default();
        assert_eq!(camera.mode, CameraMode::Orbital);
        assert_abs_diff_eq!(camera.position.length(), 5.0, epsilon = 1e-5);
        assert!(camera.position.y > 0.0);
    }

    #[test]
    fn scroll_zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.process_scroll(1000.0);
        assert_abs_diff_eq!(camera.orbital_distance, ORBIT_RANGE.0);
        assert_abs_diff_eq!(camera.position.length(), ORBIT_RANGE.0, epsilon = 1e-5);
        camera.process_scroll(-1000.0);
        assert_abs_diff_eq!(camera.orbital_distance, ORBIT_RANGE.1);
    }

    #[test]
    fn orbiting_keeps_the_distance() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(Vec2::new(120.0, -300.0));
        assert_abs_diff_eq!(camera.position.length(), 5.0, epsilon = 1e-4);
        assert!(camera.pitch <= MAX_PITCH_DEG.to_radians());
    }

    #[test]
    fn switching_to_free_keeps_looking_at_the_target() {
        let mut camera = Camera::default();
        camera.set_mode(CameraMode::Free);
        let to_target = (camera.target - camera.position).normalize();
        assert_abs_diff_eq!(camera.front().dot(to_target), 1.0, epsilon = 1e-4);

        camera.process_keyboard(1.0, 0.0, 0.0, 0.5);
        camera.set_mode(CameraMode::Orbital);
        assert_abs_diff_eq!(camera.position.length(), 4.0, epsilon = 1e-3);
    }

    #[test]
    fn uniform_layout_is_tight() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
