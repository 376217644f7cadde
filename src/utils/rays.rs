use nalgebra::{Unit, Vector3};

pub fn reflect(incident: &Vector3<f64>, normal: &Vector3<f64>) -> Unit<Vector3<f64>> {
    Unit::new_normalize(incident - 2.0 * incident.dot(normal) * normal)
}

/// Mirrors `direction` about the `axis` line: the component along `axis` is kept
/// and the perpendicular part is flipped.
pub fn mirror(direction: &Unit<Vector3<f64>>, axis: &Unit<Vector3<f64>>) -> Unit<Vector3<f64>> {
    -reflect(direction, axis)
}

#[cfg(test)]
mod test {
    use super::*;
    use more_asserts::assert_lt;

    #[test]
    fn it_reflects_about_a_plane() {
        let incident = Vector3::new(1.0, -1.0, 0.0);
        let reflected = reflect(&incident, &Vector3::y());
        let expected = Vector3::new(1.0, 1.0, 0.0).normalize();

        assert_lt!((reflected.into_inner() - expected).norm(), 1e-12);
    }

    #[test]
    fn it_mirrors_about_an_axis() {
        let direction = Unit::new_normalize(Vector3::new(1.0, 1.0, 0.0));
        let mirrored = mirror(&direction, &Vector3::y_axis());
        let expected = Vector3::new(-1.0, 1.0, 0.0).normalize();

        assert_lt!((mirrored.into_inner() - expected).norm(), 1e-12);
    }
}
