use nalgebra::{Point3, Vector3};

/// Cosine of the angle between two vectors, or `0.0` when either has zero length.
pub fn cosine_angle(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    let x = v1.norm_squared() * v2.norm_squared();
    if x > 0.0 { v1.dot(v2) / x.sqrt() } else { 0.0 }
}

/// DSSP kappa angle in degrees at `center`, between the directions
/// `prev -> center` and `center -> next`.
///
/// Colinear points give 0 degrees and a full reversal 180 degrees. Texts that quote the
/// angle at `center` between `center -> prev` and `center -> next` report the supplement
/// (180 degrees for a straight backbone); neither reading makes a straight backbone a bend.
///
/// Returns `None` when `center` coincides with `prev` or `next`.
pub fn kappa_angle(prev: &Point3<f64>, center: &Point3<f64>, next: &Point3<f64>) -> Option<f64> {
    let incoming = center - prev;
    let outgoing = next - center;
    if incoming.norm() <= f64::EPSILON || outgoing.norm() <= f64::EPSILON {
        return None;
    }
    let c = cosine_angle(&incoming, &outgoing).clamp(-1.0, 1.0);
    Some((1.0 - c * c).max(0.0).sqrt().atan2(c).to_degrees())
}

/// Estimates the backbone amide hydrogen of a residue from its `N` and the carbonyl of
/// the preceding residue: one Angstrom from `N` along the `O -> C` direction.
///
/// Returns `None` when the preceding `C` and `O` coincide.
pub fn estimate_amide_hydrogen(
    n_pos: &Point3<f64>,
    prev_c_pos: &Point3<f64>,
    prev_o_pos: &Point3<f64>,
) -> Option<Point3<f64>> {
    (prev_c_pos - prev_o_pos)
        .try_normalize(f64::EPSILON)
        .map(|direction| n_pos + direction)
}
