use ordered_float::NotNan;

//See https://pages.mtu.edu/~shene/COURSES/cs3621/NOTES/geometry/geo-tran.html

/// Proper rigid transformation in matrix form.
/// Footprints are always built by composing a rotation followed by a translation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformation {
    matrix: [[NotNan<f64>; 3]; 3],
}

impl Transformation {
    pub const fn empty() -> Self {
        Self {
            matrix: EMPTY_MATRIX,
        }
    }

    pub fn from_translation((tx, ty): (f64, f64)) -> Self {
        Self {
            matrix: transl_m((tx, ty)),
        }
    }

    /// Rotation by `angle` radians, counter-clockwise in a y-down pixel space.
    pub fn from_rotation(angle: f64) -> Self {
        Self {
            matrix: rot_m(angle),
        }
    }

    pub fn rotate(mut self, angle: f64) -> Self {
        self.matrix = dot_prod(&rot_m(angle), &self.matrix);
        self
    }

    pub fn translate(mut self, (tx, ty): (f64, f64)) -> Self {
        self.matrix = dot_prod(&transl_m((tx, ty)), &self.matrix);
        self
    }

    pub fn transform(mut self, other: &Self) -> Self {
        self.matrix = dot_prod(&other.matrix, &self.matrix);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.matrix == EMPTY_MATRIX
    }

    pub fn matrix(&self) -> &[[NotNan<f64>; 3]; 3] {
        &self.matrix
    }
}

const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
const _1: NotNan<f64> = unsafe { NotNan::new_unchecked(1.0) };

const EMPTY_MATRIX: [[NotNan<f64>; 3]; 3] = [[_1, _0, _0], [_0, _1, _0], [_0, _0, _1]];

fn rot_m(angle: f64) -> [[NotNan<f64>; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    let cos = NotNan::new(cos).expect("cos is NaN");
    let sin = NotNan::new(sin).expect("sin is NaN");

    [[cos, -sin, _0], [sin, cos, _0], [_0, _0, _1]]
}

fn transl_m((tx, ty): (f64, f64)) -> [[NotNan<f64>; 3]; 3] {
    let tx = NotNan::new(tx).expect("tx is NaN");
    let ty = NotNan::new(ty).expect("ty is NaN");

    [[_1, _0, tx], [_0, _1, ty], [_0, _0, _1]]
}

fn dot_prod(
    lhs: &[[NotNan<f64>; 3]; 3],
    rhs: &[[NotNan<f64>; 3]; 3],
) -> [[NotNan<f64>; 3]; 3] {
    let mut result = [[_0; 3]; 3];
    for (i, row) in result.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            for k in 0..3 {
                *cell += lhs[i][k] * rhs[k][j];
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Transformable;
    use crate::geometry::primitives::Point;
    use float_cmp::approx_eq;

    #[test]
    fn rotation_is_applied_before_translation() {
        let t = Transformation::from_rotation(std::f64::consts::FRAC_PI_2).translate((10.0, 0.0));
        let p = Point(1.0, 0.0).transform_clone(&t);
        assert!(approx_eq!(f64, p.0, 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, p.1, 1.0, epsilon = 1e-9));
    }

    #[test]
    fn empty_transformation_is_identity() {
        let t = Transformation::empty();
        assert!(t.is_empty());
        let p = Point(3.0, -4.0).transform_clone(&t);
        assert_eq!(p, Point(3.0, -4.0));
    }
}
