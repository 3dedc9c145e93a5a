//! IIR filter application with state management
//!
//! Implements the Direct Form II transposed structure, the most numerically
//! stable direct form:
//!
//! ```text
//! y[n]   = b[0]*x[n] + z[0]
//! z[i]   = b[i+1]*x[n] + z[i+1] - a[i+1]*y[n]
//! z[M-2] = b[M-1]*x[n]          - a[M-1]*y[n]
//! ```

use super::design::IirCoefficients;

/// Stateful IIR filter processor
///
/// Coefficients are normalized by `a[0]` and zero-padded to equal length on
/// construction. The carried state allows block-wise processing and
/// caller-supplied initial conditions.
pub struct IirFilter {
    /// Normalized numerator, padded to the filter length
    b: Vec<f64>,

    /// Normalized denominator, padded to the filter length
    a: Vec<f64>,

    /// Delay-line state z[i], length one less than the filter length
    state: Vec<f64>,
}

impl IirFilter {
    /// Create a filter from designed coefficients with zero initial state
    pub fn new(coeffs: &IirCoefficients) -> Self {
        let n = coeffs.b.len().max(coeffs.a.len());
        let a0 = coeffs.a[0];

        let mut b = vec![0.0; n];
        let mut a = vec![0.0; n];
        for (dst, &src) in b.iter_mut().zip(coeffs.b.iter()) {
            *dst = src / a0;
        }
        for (dst, &src) in a.iter_mut().zip(coeffs.a.iter()) {
            *dst = src / a0;
        }

        Self {
            b,
            a,
            state: vec![0.0; n - 1],
        }
    }

    /// Overwrite the delay-line state with caller-supplied initial conditions
    ///
    /// # Panics
    /// Panics when `state` does not match the filter's state length.
    pub fn set_state(&mut self, state: &[f64]) {
        assert_eq!(state.len(), self.state.len(), "state length mismatch");
        self.state.copy_from_slice(state);
    }

    /// Process a single sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let n = self.b.len();
        if n == 1 {
            return self.b[0] * input;
        }

        let output = self.b[0] * input + self.state[0];
        for i in 0..n - 2 {
            self.state[i] = self.b[i + 1] * input + self.state[i + 1] - self.a[i + 1] * output;
        }
        self.state[n - 2] = self.b[n - 1] * input - self.a[n - 1] * output;

        output
    }

    /// Process a block of samples
    ///
    /// # Returns
    /// Filtered output (same length as input)
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }

    /// Current delay-line state
    pub fn state(&self) -> &[f64] {
        &self.state
    }
}

/// Steady-state initial conditions for a step input
///
/// Returns the state `zi` for which a constant input `c` (with the state
/// scaled by `c`) produces a constant output from the very first sample.
/// Used by zero-phase filtering to suppress startup transients.
pub fn lfilter_zi(coeffs: &IirCoefficients) -> Vec<f64> {
    let n = coeffs.b.len().max(coeffs.a.len());
    if n < 2 {
        return Vec::new();
    }

    let a0 = coeffs.a[0];
    let mut b = vec![0.0; n];
    let mut a = vec![0.0; n];
    for (dst, &src) in b.iter_mut().zip(coeffs.b.iter()) {
        *dst = src / a0;
    }
    for (dst, &src) in a.iter_mut().zip(coeffs.a.iter()) {
        *dst = src / a0;
    }

    // Solve (I - Aᵀ) zi = B, with A the companion matrix of the denominator
    let m = n - 1;
    let mut matrix = vec![vec![0.0; m]; m];
    let mut rhs = vec![0.0; m];

    for i in 0..m {
        matrix[i][0] += a[i + 1];
        matrix[i][i] += 1.0;
        if i + 1 < m {
            matrix[i][i + 1] -= 1.0;
        }
        rhs[i] = b[i + 1] - a[i + 1] * b[0];
    }

    solve(matrix, rhs)
}

/// Gaussian elimination with partial pivoting for the small zi system
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Vec<f64> {
    let n = rhs.len();

    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if matrix[row][col].abs() > matrix[pivot][col].abs() {
                pivot = row;
            }
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        let pivot_row = matrix[col].clone();
        let pivot_rhs = rhs[col];
        let diag = pivot_row[col];

        for row in col + 1..n {
            let factor = matrix[row][col] / diag;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * pivot_row[k];
            }
            rhs[row] -= factor * pivot_rhs;
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for k in row + 1..n {
            acc -= matrix[row][k] * solution[k];
        }
        solution[row] = acc / matrix[row][row];
    }

    solution
}
