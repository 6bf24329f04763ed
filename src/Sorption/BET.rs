use crate::Sorption::isotherm::IsothermPoint;
use crate::Sorption::sorption_errors::SorptionError;
use log::info;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// SSA = V_m * (sigma_N2 * N_a) / V_0, this is (sigma_N2 * N_a) / V_0 with
/// sigma_N2 = 16.2 Å², N_a the Avogadro number, V_0 = 22400 cm³/mol (N2 at STP)
pub const N2_AREA_FACTOR: f64 = 4.35255551372;

/// relative pressure window of the BET fit, both bounds excluded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetWindow {
    pub min_pressure: f64,
    pub max_pressure: f64,
}

impl Default for BetWindow {
    fn default() -> Self {
        Self {
            min_pressure: 0.05,
            max_pressure: 0.3,
        }
    }
}

impl BetWindow {
    pub fn contains(&self, pressure: f64) -> bool {
        pressure > self.min_pressure && pressure < self.max_pressure
    }
}

/// result of the BET fit
#[derive(Debug, Clone, PartialEq)]
pub struct BetFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_value: f64,
    pub n_points: usize,
    pub slope_err: f64,
    pub intercept_err: f64,
    /// m²/g
    pub surface_area: f64,
    /// absolute error of the surface area, m²/g
    pub surface_area_err: f64,
    /// surface_area_err / surface_area
    pub relative_err: f64,
    /// relative pressures inside the window
    pub x: Vec<f64>,
    /// BET transform 1 / (q (1/x - 1))
    pub y: Vec<f64>,
    /// intercept + slope * x
    pub y_calc: Vec<f64>,
}

/// BET transform of the quantity adsorbed
pub fn bet_transform(point: &IsothermPoint) -> f64 {
    1.0 / (point.quantity * (1.0 / point.pressure - 1.0))
}

/// ordinary least squares of y on x: (slope, intercept, r)
fn linear_regression(x: &DVector<f64>, y: &DVector<f64>) -> Result<(f64, f64, f64), SorptionError> {
    let x_mean = x.mean();
    let y_mean = y.mean();
    let dx = x.add_scalar(-x_mean);
    let dy = y.add_scalar(-y_mean);
    let sxx = dx.dot(&dx);
    let syy = dy.dot(&dy);
    let sxy = dx.dot(&dy);
    if sxx <= f64::EPSILON * x.norm_squared() {
        return Err(SorptionError::DegenerateFit(
            "all relative pressures in the BET window are equal".to_string(),
        ));
    }
    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let r = if syy <= f64::EPSILON * y.norm_squared() {
        // exact horizontal line
        1.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };
    Ok((slope, intercept, r))
}

/// BET surface area and its error from the adsorption branch.
/// The order of the branch does not matter, only points inside the window are used.
pub fn calc_bet(branch: &[IsothermPoint], window: &BetWindow) -> Result<BetFit, SorptionError> {
    let windowed: Vec<&IsothermPoint> = branch
        .iter()
        .filter(|p| window.contains(p.pressure))
        .collect();
    let n = windowed.len();
    // n - 2 is in the denominator of the error propagation
    if n < 3 {
        return Err(SorptionError::InsufficientData {
            stage: "BET",
            found: n,
            required: 3,
        });
    }

    let x = DVector::from_iterator(n, windowed.iter().map(|p| p.pressure));
    let y = DVector::from_iterator(n, windowed.iter().map(|p| bet_transform(p)));
    if let Some(p) = windowed.iter().find(|p| !bet_transform(p).is_finite()) {
        return Err(SorptionError::DegenerateFit(format!(
            "BET transform is not finite at p/p° = {}, q = {}",
            p.pressure, p.quantity
        )));
    }
    let (slope, intercept, r_value) = linear_regression(&x, &y)?;

    let sum = slope + intercept;
    if !sum.is_finite() {
        return Err(SorptionError::DegenerateFit(
            "slope + intercept is not finite".to_string(),
        ));
    }
    if sum == 0.0 {
        return Err(SorptionError::DegenerateFit(
            "slope + intercept is zero".to_string(),
        ));
    }
    let scale = ((r_value.powi(-2) - 1.0) / (n as f64 - 2.0)).sqrt();
    let slope_err = slope * scale;
    let intercept_err = intercept * scale;

    let surface_area = N2_AREA_FACTOR / sum;
    let relative_err = 3.0 * (slope_err.powi(2) + intercept_err.powi(2)).sqrt() / sum;
    let surface_area_err = surface_area * relative_err;
    info!(
        "BET: {} points, slope {:.6e}, intercept {:.6e}, r {:.6}, area {:.4} ± {:.4} m²/g",
        n, slope, intercept, r_value, surface_area, surface_area_err
    );

    let y_calc = x.map(|xi| intercept + slope * xi);
    Ok(BetFit {
        slope,
        intercept,
        r_value,
        n_points: n,
        slope_err,
        intercept_err,
        surface_area,
        surface_area_err,
        relative_err,
        x: x.iter().copied().collect(),
        y: y.iter().copied().collect(),
        y_calc: y_calc.iter().copied().collect(),
    })
}
