//! Real roots of polynomials up to degree four.
//!
//! The slice based solvers take coefficients in ascending order: `coefficients[i]`
//! multiplies `t^i`, so `[c0, c1, c2]` is `c2 t² + c1 t + c0`. Leading coefficients
//! that are negligible compared to the largest one are dropped, which lowers the
//! degree of the equation instead of dividing by (almost) zero.
//!
//! Cubics and quartics are solved by isolation: the real roots of the derivative
//! split the line into intervals on which the polynomial is monotonic, and every
//! interval whose ends differ in sign holds exactly one root, refined with
//! bracketed Newton steps.

const LEADING_EPSILON: f64 = 1e-12;
/// Relative residual under which an extremum is taken to touch zero
const TANGENT_EPSILON: f64 = 1e-12;
const MAX_REFINE_ITERATIONS: usize = 100;

/// Up to four real roots, sorted in ascending order.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Roots {
    values: [f64; 4],
    len: usize,
}

impl Roots {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, root: f64) {
        if root.is_finite() && self.len < self.values.len() {
            self.values[self.len] = root;
            self.len += 1;
        }
    }

    fn sorted(mut self) -> Self {
        self.values[..self.len].sort_by(f64::total_cmp);
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }
}

impl FromIterator<f64> for Roots {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut roots = Roots::new();
        for root in iter {
            roots.push(root);
        }

        roots.sorted()
    }
}

/// Solves `a t² + b t + c = 0`, returning `(min, max)`.
///
/// A double root is returned twice. When `a` is zero the linear root `-c / b` is
/// returned twice instead, and `None` when `b` is zero as well.
pub fn quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        return if b == 0.0 {
            None
        } else {
            Some((-c / b, -c / b))
        };
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        None
    } else if discriminant == 0.0 {
        Some((-0.5 * b / a, -0.5 * b / a))
    } else {
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let r0 = q / a;
        let r1 = c / q;
        Some((r0.min(r1), r0.max(r1)))
    }
}

pub fn solve_linear(coefficients: &[f64; 2]) -> Roots {
    solve(coefficients)
}

pub fn solve_quadratic(coefficients: &[f64; 3]) -> Roots {
    solve(coefficients)
}

pub fn solve_cubic(coefficients: &[f64; 4]) -> Roots {
    solve(coefficients)
}

pub fn solve_quartic(coefficients: &[f64; 5]) -> Roots {
    solve(coefficients)
}

fn trim(coefficients: &[f64]) -> &[f64] {
    let scale = coefficients.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
    let mut len = coefficients.len();
    while len > 0 && coefficients[len - 1].abs() <= LEADING_EPSILON * scale {
        len -= 1;
    }

    &coefficients[..len]
}

fn solve(coefficients: &[f64]) -> Roots {
    real_roots(trim(coefficients))
}

/// Roots of a polynomial whose leading coefficient is not zero.
fn real_roots(coefficients: &[f64]) -> Roots {
    match coefficients.len() {
        0 | 1 => Roots::new(),
        2 => std::iter::once(-coefficients[0] / coefficients[1]).collect(),
        3 => match quadratic(coefficients[2], coefficients[1], coefficients[0]) {
            Some((r0, r1)) if r0 == r1 => std::iter::once(r0).collect(),
            Some((r0, r1)) => [r0, r1].into_iter().collect(),
            None => Roots::new(),
        },
        4 | 5 => isolated_roots(coefficients),
        _ => unreachable!("polynomials above degree four are not supported"),
    }
}

/// Evaluates the polynomial and its derivative at `t` with Horner's scheme.
fn evaluate(coefficients: &[f64], t: f64) -> (f64, f64) {
    coefficients
        .iter()
        .rev()
        .fold((0.0, 0.0), |(value, derivative), &c| {
            (value * t + c, derivative * t + value)
        })
}

fn relative_residual(coefficients: &[f64], t: f64) -> f64 {
    let (value, _) = evaluate(coefficients, t);
    let magnitude = coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * t.abs() + c.abs());

    if magnitude == 0.0 {
        0.0
    } else {
        value.abs() / magnitude
    }
}

/// Every root lies strictly inside `(-bound, bound)`.
fn root_bound(coefficients: &[f64]) -> f64 {
    let degree = coefficients.len() - 1;
    let leading = coefficients[degree];

    let bound = (1..=degree).fold(0.0_f64, |acc, k| {
        let ratio = (coefficients[degree - k] / leading).abs();
        acc.max(ratio.powf(1.0 / k as f64))
    });

    // Widened so that no root sits exactly on an end
    1.0 + 2.0 * bound
}

fn isolated_roots(coefficients: &[f64]) -> Roots {
    let degree = coefficients.len() - 1;
    let mut derivative = [0.0; 4];
    for (i, c) in coefficients.iter().enumerate().skip(1) {
        derivative[i - 1] = i as f64 * c;
    }
    let critical_points = real_roots(&derivative[..degree]);

    let bound = root_bound(coefficients);
    let ends = std::iter::once(-bound)
        .chain(critical_points.iter().filter(|t| t.abs() < bound))
        .chain(std::iter::once(bound));

    // Polynomial values at the interval ends, extrema touching zero count as roots
    let mut roots = Roots::new();
    let mut samples = [(0.0, 0.0); 5];
    let mut len = 0;
    for t in ends {
        let is_extremum = len != 0 && t != bound;
        let value = if is_extremum && relative_residual(coefficients, t) <= TANGENT_EPSILON {
            roots.push(t);
            0.0
        } else {
            evaluate(coefficients, t).0
        };

        samples[len] = (t, value);
        len += 1;
    }

    for pair in samples[..len].windows(2) {
        let ((lo, f_lo), (hi, f_hi)) = (pair[0], pair[1]);
        if f_lo == 0.0 || f_hi == 0.0 || f_lo.signum() == f_hi.signum() {
            continue;
        }

        roots.push(refine(coefficients, (lo, f_lo), hi));
    }

    let roots = roots.sorted();
    dedup(&roots)
}

/// Newton iteration kept inside a bracket `[lo, hi]` whose ends differ in sign,
/// falling back to bisection whenever a step leaves the bracket.
fn refine(coefficients: &[f64], (mut lo, f_lo): (f64, f64), mut hi: f64) -> f64 {
    let ascending = f_lo < 0.0;
    let mut t = 0.5 * (lo + hi);

    for _ in 0..MAX_REFINE_ITERATIONS {
        let (value, derivative) = evaluate(coefficients, t);
        if value == 0.0 {
            return t;
        }

        if (value < 0.0) == ascending {
            lo = t;
        } else {
            hi = t;
        }

        let newton = t - value / derivative;
        let next = if derivative != 0.0 && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };

        if (next - t).abs() <= f64::EPSILON * t.abs().max(f64::MIN_POSITIVE) || hi <= lo {
            return next;
        }
        t = next;
    }

    t
}

fn dedup(roots: &Roots) -> Roots {
    let mut unique = Roots::new();
    for root in roots.iter() {
        let is_duplicate = unique
            .as_slice()
            .last()
            .map_or(false, |&last| root - last <= f64::EPSILON * root.abs().max(last.abs()));
        if !is_duplicate {
            unique.push(root);
        }
    }

    unique
}
