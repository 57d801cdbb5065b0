//! Geometry and metric helpers — pure functions the core algebra never
//! calls itself, but that a [`crate::value::ValueSet`] built by a caller
//! commonly closes over (e.g. `value(euclid_metric_2d(grid2d(10), None))`).
//!
//! Ported from `geometry.py`, dropping its XML/NineML-facing `.inverse`
//! bookkeeping (out of scope; see `spec.md`'s non-goals) and keeping the
//! grid/random point-cloud generators and the distance metrics they feed.

use rand::Rng;

pub type Point2d = (f64, f64);
pub type Point3d = (f64, f64, f64);

/// A 2D regular grid laid out row-major over `width` columns, scaled into
/// `[x0, x0 + xScale) x [y0, y0 + yScale)`.
pub fn grid2d(width: u64, x_scale: f64, y_scale: f64, x0: f64, y0: f64) -> impl Fn(u64) -> Point2d {
    let xs = x_scale / width as f64;
    let ys = y_scale / width as f64;
    move |i| {
        let col = i % width;
        let row = i / width;
        (x0 + xs * col as f64, y0 + ys * row as f64)
    }
}

/// `n` points scattered uniformly in `[0, x_scale) x [0, y_scale)`.
pub fn random2d(n: u64, x_scale: f64, y_scale: f64) -> impl Fn(u64) -> Point2d {
    let mut rng = rand::thread_rng();
    let coords: Vec<Point2d> = (0..n)
        .map(|_| (rng.gen::<f64>() * x_scale, rng.gen::<f64>() * y_scale))
        .collect();
    move |i| coords[i as usize]
}

pub fn euclid_distance_2d(p1: Point2d, p2: Point2d) -> f64 {
    let dx = p1.0 - p2.0;
    let dy = p1.1 - p2.1;
    (dx * dx + dy * dy).sqrt()
}

/// Builds `(i, j) -> distance(g1(i), g2(j))`, the metric interface every
/// geometry-based mask/value-set consumes.
pub fn euclid_metric_2d<G1, G2>(g1: G1, g2: G2) -> impl Fn(u64, u64) -> f64
where
    G1: Fn(u64) -> Point2d,
    G2: Fn(u64) -> Point2d,
{
    move |i, j| euclid_distance_2d(g1(i), g2(j))
}

pub fn euclid_toroid_distance_2d(p1: Point2d, p2: Point2d, x_scale: f64, y_scale: f64) -> f64 {
    let ddx = (p1.0 - p2.0).abs();
    let ddy = (p1.1 - p2.1).abs();
    let dx = if ddx < x_scale / 2.0 { ddx } else { x_scale - ddx };
    let dy = if ddy < y_scale / 2.0 { ddy } else { y_scale - ddy };
    (dx * dx + dy * dy).sqrt()
}

pub fn euclid_toroid_metric_2d<G1, G2>(
    g1: G1,
    g2: G2,
    x_scale: f64,
    y_scale: f64,
) -> impl Fn(u64, u64) -> f64
where
    G1: Fn(u64) -> Point2d,
    G2: Fn(u64) -> Point2d,
{
    move |i, j| euclid_toroid_distance_2d(g1(i), g2(j), x_scale, y_scale)
}

pub fn grid3d(
    width: u64,
    x_scale: f64,
    y_scale: f64,
    z_scale: f64,
    x0: f64,
    y0: f64,
    z0: f64,
) -> impl Fn(u64) -> Point3d {
    let xs = x_scale / width as f64;
    let ys = y_scale / width as f64;
    let zs = z_scale / width as f64;
    move |i| {
        let plane = width * width;
        let x = i % width;
        let y = (i % plane) / width;
        let z = i / plane;
        (x0 + xs * x as f64, y0 + ys * y as f64, z0 + zs * z as f64)
    }
}

pub fn random3d(n: u64, x_scale: f64, y_scale: f64, z_scale: f64) -> impl Fn(u64) -> Point3d {
    let mut rng = rand::thread_rng();
    let coords: Vec<Point3d> = (0..n)
        .map(|_| {
            (
                rng.gen::<f64>() * x_scale,
                rng.gen::<f64>() * y_scale,
                rng.gen::<f64>() * z_scale,
            )
        })
        .collect();
    move |i| coords[i as usize]
}

pub fn euclid_distance_3d(p1: Point3d, p2: Point3d) -> f64 {
    let dx = p1.0 - p2.0;
    let dy = p1.1 - p2.1;
    let dz = p1.2 - p2.2;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

pub fn euclid_metric_3d<G1, G2>(g1: G1, g2: G2) -> impl Fn(u64, u64) -> f64
where
    G1: Fn(u64) -> Point3d,
    G2: Fn(u64) -> Point3d,
{
    move |i, j| euclid_distance_3d(g1(i), g2(j))
}
