use std::f64::consts::PI;

/// Places `count` points evenly on a sphere of `radius` using a Fibonacci
/// lattice. Point `i` sits at height `y = 1 - 2(i + 0.5)/count`, turned by
/// the golden angle `π(3 - √5)` from its predecessor.
pub fn fibonacci_sphere(count: usize, radius: f64) -> Vec<[f64; 3]> {
    let golden_angle = PI * (3.0 - 5f64.sqrt());

    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f64;

            [theta.cos() * ring * radius, y * radius, theta.sin() * ring * radius]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(p: &[f64; 3]) -> f64 {
        (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
    }

    #[test]
    fn empty_lattice() {
        assert!(fibonacci_sphere(0, 1.0).is_empty());
    }

    #[test]
    fn points_lie_on_the_sphere() {
        for point in fibonacci_sphere(64, 2.5) {
            assert!((norm(&point) - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    fn single_point_on_equator() {
        let points = fibonacci_sphere(1, 3.0);
        assert_eq!(points.len(), 1);
        assert!(points[0][1].abs() < 1e-12);
        assert!((points[0][0] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn heights_descend_from_pole_to_pole() {
        let points = fibonacci_sphere(10, 1.0);
        assert!(points.windows(2).all(|w| w[0][1] > w[1][1]));
        assert!(points[0][1] < 1.0 && points[9][1] > -1.0);
    }
}
