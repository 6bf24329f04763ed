use crate::Sorption::isotherm::IsothermPoint;
use crate::Sorption::sorption_errors::SorptionError;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Kelvin equation constant for N2 at 77 K, nm
const KELVIN_CONSTANT: f64 = 0.415;
/// Harkins-Jura thickness equation constants
const HJ_NUMERATOR: f64 = 0.1399;
const HJ_OFFSET: f64 = 0.034;
/// conversion of gas volume at STP to liquid N2 volume, cm³ liquid per cm³ STP
const GAS_TO_LIQUID: f64 = 0.0015468;

/// pore diameters that define the user reporting window, nm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiameterWindow {
    pub start_diameter: f64,
    pub end_diameter: f64,
}

impl Default for DiameterWindow {
    fn default() -> Self {
        Self {
            start_diameter: 2.5,
            end_diameter: 90.0,
        }
    }
}

impl DiameterWindow {
    pub fn contains(&self, diameter: f64) -> bool {
        diameter >= self.start_diameter && diameter <= self.end_diameter
    }
}

/// Kelvin radius of the pore core, nm
pub fn kelvin_radius(pressure: f64) -> f64 {
    -KELVIN_CONSTANT / pressure.log10()
}

/// statistical thickness of the adsorbed layer on the pore wall, nm
pub fn wall_layer(pressure: f64) -> f64 {
    (HJ_NUMERATOR / (HJ_OFFSET - pressure.log10())).sqrt()
}

/// Series of the BJH calculation; index 0 of the recurrence is excluded, so every series
/// has one element less than the branch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BjhSeries {
    /// pore diameter, nm
    pub diameter: Vec<f64>,
    /// differential pore volume, cm³/g
    pub diff_volume: Vec<f64>,
    /// cumulative pore volume, cm³/g
    pub cum_volume: Vec<f64>,
    /// dV/dD, cm³/(nm·g)
    pub dv_dd: Vec<f64>,
    /// dV/dlog(D)
    pub dv_dlogd: Vec<f64>,
    /// differential pore area, m²/g
    pub diff_area: Vec<f64>,
    /// cumulative pore area, m²/g
    pub cum_area: Vec<f64>,
    /// dA/dD, m²/(nm·g)
    pub da_dd: Vec<f64>,
    /// dA/dlog(D)
    pub da_dlogd: Vec<f64>,
}

impl BjhSeries {
    fn with_capacity(n: usize) -> Self {
        Self {
            diameter: Vec::with_capacity(n),
            diff_volume: Vec::with_capacity(n),
            cum_volume: Vec::with_capacity(n),
            dv_dd: Vec::with_capacity(n),
            dv_dlogd: Vec::with_capacity(n),
            diff_area: Vec::with_capacity(n),
            cum_area: Vec::with_capacity(n),
            da_dd: Vec::with_capacity(n),
            da_dlogd: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.diameter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diameter.is_empty()
    }
}

/// Summary values of the BJH calculation. `_user` values are restricted to the diameter window
/// and are `None` when no step falls inside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BjhSummary {
    pub total_volume_user: Option<f64>,
    pub total_volume_full: f64,
    pub total_area_user: Option<f64>,
    pub total_area_full: f64,
    pub peak_diameter_user: Option<f64>,
    pub peak_diameter_full: f64,
    pub average_diameter_user: Option<f64>,
    pub average_diameter_full: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BjhResult {
    pub series: BjhSeries,
    pub summary: BjhSummary,
}

/// values carried from one step of the recurrence to the next
#[derive(Debug, Clone, Copy)]
struct StepState {
    helper: f64,
    radius: f64,
    wall_layer: f64,
    quantity: f64,
    cum_volume: f64,
    cum_area: f64,
    diff_area: f64,
}

/// Drops the points the Kelvin equation is not defined for and sorts the rest by descending pressure.
fn prepare_branch(branch: &[IsothermPoint]) -> Vec<IsothermPoint> {
    let mut points: Vec<IsothermPoint> = branch
        .iter()
        .filter(|p| p.pressure > 0.0 && p.pressure < 1.0)
        .copied()
        .collect();
    if points.len() < branch.len() {
        warn!(
            "BJH: {} point(s) with relative pressure outside (0, 1) dropped",
            branch.len() - points.len()
        );
    }
    points.sort_by(|a, b| b.pressure.total_cmp(&a.pressure));
    points
}

/// number of steps whose pressure equals the one before
pub(crate) fn repeated_pressures(points: &[IsothermPoint]) -> usize {
    points.windows(2).filter(|w| w[0].pressure == w[1].pressure).count()
}

/// max of the values whose diameter is inside the window
fn windowed_max(diameters: &[f64], values: &[f64], window: &DiameterWindow) -> Option<f64> {
    diameters
        .iter()
        .zip(values)
        .filter(|(d, _)| window.contains(**d))
        .map(|(_, v)| *v)
        .reduce(f64::max)
}

/// diameter at the first maximum of dV/dD among the selected steps
fn peak_diameter<'a>(steps: impl Iterator<Item = (&'a f64, &'a f64)>) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for (d, v) in steps {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, best_v)) if *v <= best_v => {}
            _ => best = Some((*d, *v)),
        }
    }
    best.map(|(d, _)| d)
}

/// volume weighted average diameter, Σ(D dV) / Σ(dV)
fn average_diameter<'a>(steps: impl Iterator<Item = (&'a f64, &'a f64)>) -> Option<f64> {
    let (weighted, total) = steps.fold((0.0, 0.0), |(w, t), (d, v)| (w + d * v, t + v));
    if total == 0.0 {
        None
    } else {
        Some(weighted / total)
    }
}

fn clamp_negative(values: &mut [f64]) {
    for v in values.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}

/// BJH pore size distribution of one isotherm branch.
/// The branch is sorted into descending pressure order before the calculation.
pub fn calc_bjh(
    branch: &[IsothermPoint],
    window: &DiameterWindow,
) -> Result<BjhResult, SorptionError> {
    let points = prepare_branch(branch);
    if points.len() < 2 {
        return Err(SorptionError::InsufficientData {
            stage: "BJH",
            found: points.len(),
            required: 2,
        });
    }

    let repeated = repeated_pressures(&points);
    if repeated > 0 {
        warn!(
            "BJH: {} step(s) repeat the previous relative pressure, their derivatives are set to zero",
            repeated
        );
    }

    let mut series = BjhSeries::with_capacity(points.len() - 1);
    let mut state = StepState {
        helper: 0.0,
        radius: kelvin_radius(points[0].pressure),
        wall_layer: wall_layer(points[0].pressure),
        quantity: points[0].quantity,
        cum_volume: 0.0,
        cum_area: 0.0,
        diff_area: 0.0,
    };

    // the steps depend on each other through the helper term, so this is a sequential fold
    for point in &points[1..] {
        let radius = kelvin_radius(point.pressure);
        let layer = wall_layer(point.pressure);
        let diameter = radius + state.radius + layer + state.wall_layer;

        let helper = state.diff_area / 1000.0 * (1.0 - layer / (diameter / 2.0)) + state.helper;
        let diff_volume = (diameter / (diameter / 2.0 - layer)).powi(2)
            * (GAS_TO_LIQUID * (state.quantity - point.quantity)
                - (state.wall_layer - layer) * helper)
            / 4.0;
        let cum_volume = state.cum_volume + diff_volume;
        let diff_area = 4000.0 * diff_volume / diameter;
        let cum_area = state.cum_area + diff_area;

        let d_diameter = state.radius + state.wall_layer - radius - layer;
        let d_log_diameter = (state.radius.log10() + state.wall_layer.log10()
            - radius.log10()
            - layer.log10())
            / 2.0;

        series.diameter.push(diameter);
        series.diff_volume.push(diff_volume);
        series.cum_volume.push(cum_volume);
        series.diff_area.push(diff_area);
        series.cum_area.push(cum_area);
        // same pressure as the previous step: the diameter increment is rounding noise
        if radius == state.radius {
            series.dv_dd.push(0.0);
            series.da_dd.push(0.0);
            series.dv_dlogd.push(0.0);
            series.da_dlogd.push(0.0);
        } else {
            series.dv_dd.push(diff_volume / d_diameter / 2.0);
            series.da_dd.push(diff_area / d_diameter / 2.0);
            series.dv_dlogd.push(diff_volume / d_log_diameter);
            series.da_dlogd.push(diff_area / d_log_diameter);
        }

        state = StepState {
            helper,
            radius,
            wall_layer: layer,
            quantity: point.quantity,
            cum_volume,
            cum_area,
            diff_area,
        };
    }

    // summary is taken before the derivatives are clamped; the sentinel step contributes zeros
    let d = &series.diameter;
    let summary = BjhSummary {
        total_volume_user: windowed_max(d, &series.cum_volume, window),
        total_volume_full: series.cum_volume.iter().copied().fold(0.0, f64::max),
        total_area_user: windowed_max(d, &series.cum_area, window),
        total_area_full: series.cum_area.iter().copied().fold(0.0, f64::max),
        peak_diameter_user: peak_diameter(
            d.iter()
                .zip(&series.dv_dd)
                .filter(|(di, _)| window.contains(**di)),
        ),
        peak_diameter_full: peak_diameter(
            std::iter::once((&0.0, &0.0)).chain(d.iter().zip(&series.dv_dd)),
        )
        .unwrap_or(0.0),
        average_diameter_user: average_diameter(
            d.iter()
                .zip(&series.diff_volume)
                .filter(|(di, _)| window.contains(**di)),
        ),
        average_diameter_full: average_diameter(d.iter().zip(&series.diff_volume)),
    };

    // negative derivatives are noise, cumulative series stay as accumulated
    clamp_negative(&mut series.dv_dd);
    clamp_negative(&mut series.da_dd);
    clamp_negative(&mut series.dv_dlogd);
    clamp_negative(&mut series.da_dlogd);

    info!(
        "BJH: {} steps, total volume {:.4} cm³/g, total area {:.4} m²/g",
        series.len(),
        summary.total_volume_full,
        summary.total_area_full
    );
    Ok(BjhResult { series, summary })
}
