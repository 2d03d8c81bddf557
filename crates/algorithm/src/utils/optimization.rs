//! Derivative-free optimization for parameter estimation
//!
//! The ARIMA conditional-sum-of-squares objective is cheap to evaluate but
//! has no usable gradient, so estimation runs on a bounded Nelder-Mead
//! simplex search.

use std::cmp::Ordering;

/// Tuning knobs for the simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the value spread and simplex size.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub reflection: f64,
    /// Expansion coefficient.
    pub expansion: f64,
    /// Contraction coefficient.
    pub contraction: f64,
    /// Shrink coefficient.
    pub shrink: f64,
    /// Relative step used to build the initial simplex.
    pub step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
            step: 0.05,
        }
    }
}

/// Outcome of a simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOutcome {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at that point.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the search converged within `max_iter`.
    pub converged: bool,
}

/// Minimize `objective` starting from `start`, optionally clamping every
/// candidate to per-dimension `(min, max)` bounds.
///
/// # Example
/// ```
/// use algorithm::utils::optimization::{minimize, SimplexOptions};
///
/// // Minimize (x-2)^2 + (y-3)^2
/// let outcome = minimize(
///     |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     SimplexOptions::default(),
/// );
///
/// assert!(outcome.converged);
/// assert!((outcome.point[0] - 2.0).abs() < 0.01);
/// assert!((outcome.point[1] - 3.0).abs() < 0.01);
/// ```
pub fn minimize<F>(
    objective: F,
    start: &[f64],
    bounds: Option<&[(f64, f64)]>,
    options: SimplexOptions,
) -> SimplexOutcome
where
    F: Fn(&[f64]) -> f64,
{
    let dim = start.len();
    if dim == 0 {
        return SimplexOutcome {
            point: vec![],
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let clamp = |mut point: Vec<f64>| -> Vec<f64> {
        if let Some(b) = bounds {
            for (i, v) in point.iter_mut().enumerate() {
                if i < b.len() {
                    *v = v.clamp(b[i].0, b[i].1);
                }
            }
        }
        point
    };

    // Simplex of dim + 1 vertices: the start plus one perturbation per axis.
    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    let origin = clamp(start.to_vec());
    let value = objective(&origin);
    simplex.push((origin, value));
    for i in 0..dim {
        let mut point = start.to_vec();
        point[i] += if start[i].abs() > 1e-10 {
            options.step * start[i].abs()
        } else {
            options.step
        };
        let point = clamp(point);
        let value = objective(&point);
        simplex.push((point, value));
    }

    let by_value =
        |a: &(Vec<f64>, f64), b: &(Vec<f64>, f64)| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);

    let mut iterations = 0;
    let mut converged = false;
    while iterations < options.max_iter {
        iterations += 1;
        simplex.sort_by(by_value);

        if simplex[dim].1 - simplex[0].1 < options.tolerance {
            converged = true;
            break;
        }

        // Centroid of every vertex except the worst.
        let mut centroid = vec![0.0; dim];
        for (point, _) in &simplex[..dim] {
            for (c, v) in centroid.iter_mut().zip(point) {
                *c += v;
            }
        }
        for c in &mut centroid {
            *c /= dim as f64;
        }

        let collapsed = simplex.iter().all(|(point, _)| {
            let dist: f64 = point
                .iter()
                .zip(&centroid)
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            dist < options.tolerance
        });
        if collapsed {
            converged = true;
            break;
        }

        // Move from the centroid towards (coeff > 0) or away from
        // (coeff < 0) a target vertex.
        let towards = |target: &[f64], coeff: f64| -> Vec<f64> {
            clamp(
                centroid
                    .iter()
                    .zip(target)
                    .map(|(c, t)| c + coeff * (t - c))
                    .collect(),
            )
        };

        let worst = simplex[dim].clone();
        let reflected = towards(&worst.0, -options.reflection);
        let reflected_value = objective(&reflected);

        if reflected_value < simplex[0].1 {
            let expanded = towards(&reflected, options.expansion);
            let expanded_value = objective(&expanded);
            simplex[dim] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
            continue;
        }

        if reflected_value < simplex[dim - 1].1 {
            simplex[dim] = (reflected, reflected_value);
            continue;
        }

        // Contract outside when reflection improved on the worst vertex,
        // inside otherwise.
        let (contracted, contracted_value) = if reflected_value < worst.1 {
            let point = towards(&reflected, options.contraction);
            let value = objective(&point);
            (point, value)
        } else {
            let point = towards(&worst.0, options.contraction);
            let value = objective(&point);
            (point, value)
        };
        if contracted_value < worst.1.min(reflected_value) {
            simplex[dim] = (contracted, contracted_value);
            continue;
        }

        // Everything failed: shrink the simplex towards the best vertex.
        let best = simplex[0].0.clone();
        for entry in simplex.iter_mut().skip(1) {
            let point = clamp(
                best.iter()
                    .zip(&entry.0)
                    .map(|(b, v)| b + options.shrink * (v - b))
                    .collect(),
            );
            let value = objective(&point);
            *entry = (point, value);
        }
    }

    simplex.sort_by(by_value);
    let (point, value) = simplex.swap_remove(0);
    SimplexOutcome {
        point,
        value,
        iterations,
        converged,
    }
}
