use glam::{Mat4, Vec3};

/// Identity matrix with the translation column set.
pub fn translation(tr_x: f32, tr_y: f32, tr_z: f32) -> Mat4 {
    let mut mat = Mat4::IDENTITY;
    mat.w_axis.x = tr_x;
    mat.w_axis.y = tr_y;
    mat.w_axis.z = tr_z;
    mat
}

pub fn translation_vec(tr: Vec3) -> Mat4 {
    translation(tr.x, tr.y, tr.z)
}

/// Identity matrix with the diagonal scale entries set.
pub fn scaling(scale_x: f32, scale_y: f32, scale_z: f32) -> Mat4 {
    let mut mat = Mat4::IDENTITY;
    mat.x_axis.x = scale_x;
    mat.y_axis.y = scale_y;
    mat.z_axis.z = scale_z;
    mat
}

pub fn scaling_uniform(scale: f32) -> Mat4 {
    scaling(scale, scale, scale)
}

/// Rotation about the X axis. `angle` is in radians.
pub fn rotation_x(angle: f32) -> Mat4 {
    let mut mat = Mat4::IDENTITY;
    mat.y_axis.y = angle.cos();
    mat.y_axis.z = angle.sin();
    mat.z_axis.y = -angle.sin();
    mat.z_axis.z = angle.cos();
    mat
}

/// Rotation about the Y axis. `angle` is in radians.
pub fn rotation_y(angle: f32) -> Mat4 {
    let mut mat = Mat4::IDENTITY;
    mat.x_axis.x = angle.cos();
    mat.x_axis.z = -angle.sin();
    mat.z_axis.x = angle.sin();
    mat.z_axis.z = angle.cos();
    mat
}

/// Rotation about the Z axis. `angle` is in radians.
pub fn rotation_z(angle: f32) -> Mat4 {
    let mut mat = Mat4::IDENTITY;
    mat.x_axis.x = angle.cos();
    mat.x_axis.y = angle.sin();
    mat.y_axis.x = -angle.sin();
    mat.y_axis.y = angle.cos();
    mat
}

/// Rotation by the same angle about all three axes, composed in X·Y·Z order.
pub fn rotation(angle: f32) -> Mat4 {
    rotation_x(angle) * rotation_y(angle) * rotation_z(angle)
}

/// Per-axis rotation, composed in X·Y·Z order.
pub fn rotation_vec(angles: Vec3) -> Mat4 {
    rotation_x(angles.x) * rotation_y(angles.y) * rotation_z(angles.z)
}

/// Left-handed perspective projection. The field of view is in degrees.
pub fn perspective(fov_degrees: f32, near: f32, far: f32, aspect: f32) -> Mat4 {
    let fov_rad = fov_degrees.to_radians();
    let mut mat = Mat4::IDENTITY;
    mat.y_axis.y = 1.0 / (fov_rad * 0.5).tan();
    mat.x_axis.x = mat.y_axis.y / aspect;
    mat.z_axis.z = far / (far - near);
    mat.z_axis.w = 1.0;
    mat.w_axis.z = mat.z_axis.z * -near;
    mat.w_axis.w = 0.0;
    mat
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec4, Vec4Swizzles};

    #[test]
    fn translation_touches_only_the_last_column() {
        let mat = translation(1.5, -2.0, 3.25);
        assert_eq!(mat.x_axis, Vec4::X);
        assert_eq!(mat.y_axis, Vec4::Y);
        assert_eq!(mat.z_axis, Vec4::Z);
        assert_eq!(mat.w_axis, Vec4::new(1.5, -2.0, 3.25, 1.0));
    }

    #[test]
    fn translation_vec_matches_scalar_form() {
        let tr = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(translation_vec(tr), translation(4.0, 5.0, 6.0));
    }

    #[test]
    fn translation_moves_a_point() {
        let mat = translation(1.0, 2.0, 3.0);
        let moved = mat * Vec4::new(10.0, 20.0, 30.0, 1.0);
        assert_eq!(moved.xyz(), Vec3::new(11.0, 22.0, 33.0));
    }

    #[test]
    fn scaling_sets_the_diagonal() {
        let mat = scaling(2.0, 3.0, 4.0);
        assert_eq!(mat.x_axis, Vec4::new(2.0, 0.0, 0.0, 0.0));
        assert_eq!(mat.y_axis, Vec4::new(0.0, 3.0, 0.0, 0.0));
        assert_eq!(mat.z_axis, Vec4::new(0.0, 0.0, 4.0, 0.0));
        assert_eq!(mat.w_axis, Vec4::W);
    }

    #[test]
    fn scaling_uniform_scales_every_axis() {
        let mat = scaling_uniform(2.5);
        assert_eq!(mat, scaling(2.5, 2.5, 2.5));
        assert_eq!(mat.w_axis.w, 1.0);
    }

    #[test]
    fn zero_angle_rotations_are_identity() {
        assert_eq!(rotation_x(0.0), Mat4::IDENTITY);
        assert_eq!(rotation_y(0.0), Mat4::IDENTITY);
        assert_eq!(rotation_z(0.0), Mat4::IDENTITY);
        assert_eq!(rotation(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_x_turns_y_toward_z() {
        let angle = std::f32::consts::FRAC_PI_2;
        let rotated = rotation_x(angle) * Vec4::Y;
        assert!(rotated.abs_diff_eq(Vec4::Z, 1e-6));
    }

    #[test]
    fn rotation_y_turns_z_toward_x() {
        let angle = std::f32::consts::FRAC_PI_2;
        let rotated = rotation_y(angle) * Vec4::Z;
        assert!(rotated.abs_diff_eq(Vec4::X, 1e-6));
    }

    #[test]
    fn rotation_z_turns_x_toward_y() {
        let angle = std::f32::consts::FRAC_PI_2;
        let rotated = rotation_z(angle) * Vec4::X;
        assert!(rotated.abs_diff_eq(Vec4::Y, 1e-6));
    }

    #[test]
    fn rotation_vec_is_the_axis_product() {
        let angles = Vec3::new(0.3, -1.1, 2.4);
        let expected = rotation_x(angles.x) * rotation_y(angles.y) * rotation_z(angles.z);
        assert_eq!(rotation_vec(angles), expected);
    }

    #[test]
    fn rotation_scalar_matches_splat_vec() {
        assert_eq!(rotation(0.7), rotation_vec(Vec3::splat(0.7)));
    }

    #[test]
    fn rotations_preserve_length() {
        let v = Vec4::new(1.0, 2.0, 3.0, 0.0);
        let rotated = rotation_vec(Vec3::new(0.5, 1.2, -0.8)) * v;
        assert!((rotated.length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn perspective_matches_closed_form() {
        let (fov, near, far, aspect) = (60.0_f32, 0.3, 250.0, 1.5);
        let mat = perspective(fov, near, far, aspect);

        let y_scale = 1.0 / (fov.to_radians() * 0.5).tan();
        assert_eq!(mat.y_axis.y, y_scale);
        assert_eq!(mat.x_axis.x, y_scale / aspect);
        assert_eq!(mat.z_axis.z, far / (far - near));
        assert_eq!(mat.z_axis.w, 1.0);
        assert_eq!(mat.w_axis.z, far / (far - near) * -near);
        assert_eq!(mat.w_axis.w, 0.0);
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let (fov, near, far, aspect) = (45.0_f32, 0.1, 100.0, 1.0);
        let mat = perspective(fov, near, far, aspect);

        // A point on the near plane projects to depth 0, one on the far
        // plane to depth 1, after the perspective divide.
        let near_clip = mat * Vec4::new(0.0, 0.0, near, 1.0);
        assert!((near_clip.z / near_clip.w).abs() < 1e-6);

        let far_clip = mat * Vec4::new(0.0, 0.0, far, 1.0);
        assert!((far_clip.z / far_clip.w - 1.0).abs() < 1e-6);
    }
}
