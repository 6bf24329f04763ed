/// eng
/// Error taxonomy shared by every sorption stage: a missing table anchor (recoverable, the stage is
/// skipped), too few points for a statistically meaningful fit, and degenerate fits.
pub mod sorption_errors;
/// eng
/// Line scanner that locates a table in a TriStar text export by an ordered list of anchor phrases
/// and extracts the pairs of numbers that follow it. Both '.' and ',' are accepted as decimal separator.
pub mod table_scanner;
/// eng
/// Adsorption and desorption branches of the isotherm.
/// The raw branches are sorted (adsorption ascending, desorption descending), concatenated and split again
/// at the global maximum of the relative pressure, so that both branches meet at the same point.
/// Both corrected branches are returned in descending pressure order.
pub mod isotherm;
/// eng
/// BET surface area from the adsorption branch:
/// 1) only points with relative pressure inside the BET window (0.05 < p/p° < 0.3 by default) are used
/// 2) the quantity adsorbed is linearized by the BET transform y' = 1 / (q (1/x - 1))
/// 3) ordinary least squares of y' on x gives slope, intercept and r-value
/// 4) the surface area is 4.35255551372 / (slope + intercept), the error is propagated from the r-value
///
/// # Examples
/// ```
/// use PoroKit::Sorption::BET::{BetWindow, calc_bet};
/// use PoroKit::Sorption::isotherm::IsothermPoint;
/// let branch: Vec<IsothermPoint> = vec![(0.1, 50.0), (0.15, 55.0), (0.2, 60.0), (0.25, 66.0)]
///     .into_iter()
///     .map(IsothermPoint::from)
///     .collect();
/// let fit = calc_bet(&branch, &BetWindow::default()).unwrap();
/// assert!((fit.surface_area - 226.19056).abs() < 1e-4);
/// ```
#[allow(non_snake_case)]
pub mod BET;
/// eng
/// BJH pore size distribution for one isotherm branch.
/// Every step of the calculation depends on the previous one (the wall thinning correction is accumulated
/// step by step), so the branch is walked by an explicit loop from the highest pressure to the lowest.
/// Produces differential and cumulative pore volume and area, their derivatives by diameter and by log(diameter),
/// and summary values (total volume and area, peak and average pore diameter) for the full range
/// and for a user window of pore diameters.
#[allow(non_snake_case)]
pub mod BJH;
/// eng
/// Values computed by the instrument software itself: summary lines like "BET Surface Area: 123.45 m²/g"
/// and the BJH tables of the report. Used to collect the vendor numbers into the same spreadsheet layout.
pub mod vendor_report;
/// eng
/// The whole calculation for one sample: isotherm, BET on the adsorption branch, BJH on both branches.
/// A stage that fails keeps its error instead of a result, the other stages still run.
pub mod sample_calc;

#[allow(non_snake_case)]
mod Sorption_tests;
