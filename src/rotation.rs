use std::fmt;

use cgmath::{Deg, Rotation3};

use crate::math::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Reads the axis from the first letter of a channel word such as `Xrotation`.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }

    pub fn set(self, v: &mut Vec3, value: f64) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }

    fn quaternion(self, degrees: f64) -> Quat {
        match self {
            Axis::X => Quat::from_angle_x(Deg(degrees)),
            Axis::Y => Quat::from_angle_y(Deg(degrees)),
            Axis::Z => Quat::from_angle_z(Deg(degrees)),
        }
    }
}

/// Euler axis order. `Unspecified` leaves the choice to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationOrder {
    Xyz,
    Yzx,
    Zxy,
    Zyx,
    Yxz,
    Xzy,
    Unspecified,
}

impl Default for RotationOrder {
    fn default() -> Self {
        RotationOrder::Unspecified
    }
}

impl RotationOrder {
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::Xyz,
        RotationOrder::Yzx,
        RotationOrder::Zxy,
        RotationOrder::Zyx,
        RotationOrder::Yxz,
        RotationOrder::Xzy,
    ];

    /// Case-insensitive match on the three-letter code; anything else is `Unspecified`.
    pub fn from_code(s: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(RotationOrder::Unspecified)
    }

    pub fn as_str(self) -> &'static str {
        use RotationOrder::*;
        match self {
            Xyz => "xyz",
            Yzx => "yzx",
            Zxy => "zxy",
            Zyx => "zyx",
            Yxz => "yxz",
            Xzy => "xzy",
            Unspecified => "none",
        }
    }

    pub fn is_valid(self) -> bool {
        self != RotationOrder::Unspecified
    }

    /// The same three axes read back to front.
    pub fn reverse(self) -> Self {
        use RotationOrder::*;
        match self {
            Xyz => Zyx,
            Yzx => Xzy,
            Zxy => Yxz,
            Zyx => Xyz,
            Yxz => Zxy,
            Xzy => Yzx,
            Unspecified => Unspecified,
        }
    }

    pub fn axes(self) -> Option<[Axis; 3]> {
        use Axis::*;
        use RotationOrder::*;
        match self {
            Xyz => Some([X, Y, Z]),
            Yzx => Some([Y, Z, X]),
            Zxy => Some([Z, X, Y]),
            Zyx => Some([Z, Y, X]),
            Yxz => Some([Y, X, Z]),
            Xzy => Some([X, Z, Y]),
            Unspecified => None,
        }
    }

    /// Combines per-axis angles in degrees as the product of axis quaternions,
    /// leftmost axis first: `Xyz` gives `qx * qy * qz`.
    pub fn quaternion(self, degrees: Vec3) -> Option<Quat> {
        let angle = |axis: Axis| match axis {
            Axis::X => degrees.x,
            Axis::Y => degrees.y,
            Axis::Z => degrees.z,
        };
        self.axes().map(|axes| {
            axes.iter()
                .fold(Quat::new(1., 0., 0., 0.), |q, &a| q * a.quaternion(angle(a)))
        })
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math;
    use cgmath::InnerSpace;

    #[test]
    fn code_round_trip() {
        for &order in RotationOrder::ALL.iter() {
            assert_eq!(RotationOrder::from_code(order.as_str()), order);
        }
        assert_eq!(RotationOrder::from_code("ZxY"), RotationOrder::Zxy);
        assert_eq!(RotationOrder::from_code("XXY"), RotationOrder::Unspecified);
        assert_eq!(RotationOrder::from_code(""), RotationOrder::Unspecified);
        assert_eq!(RotationOrder::Unspecified.to_string(), "none");
    }

    #[test]
    fn reverse_reads_axes_backwards() {
        for &order in RotationOrder::ALL.iter() {
            let mut axes = order.axes().unwrap();
            axes.reverse();
            assert_eq!(order.reverse().axes().unwrap(), axes);
            assert_eq!(order.reverse().reverse(), order);
        }
        assert_eq!(RotationOrder::Unspecified.reverse(), RotationOrder::Unspecified);
    }

    #[test]
    fn xyz_matches_closed_form() {
        let deg = Vec3::new(10., 20., 30.);
        let q = RotationOrder::Xyz.quaternion(deg).unwrap();
        let closed = math::from_euler_xyz(math::vec_to_radians(deg));
        assert!((q - closed).magnitude() < 1e-9);
        assert_eq!(RotationOrder::Unspecified.quaternion(deg), None);
    }

    #[test]
    fn zxy_decomposes_back() {
        let deg = Vec3::new(15., -25., 40.);
        let q = RotationOrder::Zxy.quaternion(deg).unwrap();
        let back = math::vec_to_degrees(math::to_euler_zxy(q));
        assert!((back - deg).magnitude() < 1e-9);
    }

    #[test]
    fn axis_letters() {
        assert_eq!(Axis::from_letter('y'), Some(Axis::Y));
        assert_eq!(Axis::from_letter('W'), None);
        let mut v = math::ZERO;
        Axis::Z.set(&mut v, 2.5);
        assert_eq!(v, Vec3::new(0., 0., 2.5));
    }
}
