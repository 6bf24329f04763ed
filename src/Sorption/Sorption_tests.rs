/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Sorption::BET::{BetWindow, bet_transform, calc_bet};
    use crate::Sorption::BJH::{DiameterWindow, calc_bjh, kelvin_radius, repeated_pressures, wall_layer};
    use crate::Sorption::isotherm::{Branch, Isotherm, IsothermPoint, parse_branch};
    use crate::Sorption::sorption_errors::SorptionError;
    use crate::Sorption::vendor_report::{VendorReport, VendorTable, parse_summary_value};
    use approx::assert_relative_eq;

    fn points(data: &[(f64, f64)]) -> Vec<IsothermPoint> {
        data.iter().copied().map(IsothermPoint::from).collect()
    }

    /// a shortened TriStar export with both branches and a few vendor values
    const EXPORT: &str = "\
Sample: S-17
Sample Mass: 0,1032 g

Summary Report
Surface Area
BET Surface Area: 245.1234 m²/g
BJH Desorption cumulative volume of pores
between 1.7000 nm and 300.0000 nm width: 0.451234 cm³/g
BJH Desorption average pore width (4V/A): 7.3521 nm

Isotherm Tabular Report

   -  Adsorption
Relative Pressure (p/p°)   Quantity Adsorbed (cm³/g STP)
   0.0601     50.3212
   0.1003     55.0011
   0.2007     61.1234
   0.4012     72.5000
   0.9902    310.1200

   -  Desorption
Relative Pressure (p/p°)   Quantity Adsorbed (cm³/g STP)
   0.9501    300.0000
   0.8003    210.0000
   0.6004    160.0000

BJH Desorption dV/dlog(w) Pore Volume
Halsey : Faas Correction
Pore Width (nm)   dV/dlog(w) Pore Volume (cm³/g·nm)
   30.1    0.4512
   15.7    0.6011
";

    #[test]
    fn test_parse_branches_sorted() {
        let ads = parse_branch(EXPORT, Branch::Adsorption).unwrap();
        assert_eq!(ads.len(), 5);
        assert!(ads.windows(2).all(|w| w[0].pressure <= w[1].pressure));
        let des = parse_branch(EXPORT, Branch::Desorption).unwrap();
        assert_eq!(des.len(), 3);
        assert!(des.windows(2).all(|w| w[0].pressure >= w[1].pressure));
        assert_eq!(des[0], IsothermPoint::new(0.9501, 300.0));
    }

    #[test]
    fn test_isotherm_from_text_splits_at_maximum() {
        let iso = Isotherm::from_text(EXPORT);
        // the maximum 0.9902 is the last adsorption point, desorption starts from it
        assert_eq!(iso.merged.len(), 8);
        assert_eq!(iso.adsorption.len(), 5);
        assert_eq!(iso.desorption.len(), 4);
        assert_eq!(iso.adsorption[0].pressure, 0.9902);
        assert_eq!(iso.desorption[0].pressure, 0.9902);
        assert!(iso
            .adsorption
            .windows(2)
            .all(|w| w[0].pressure >= w[1].pressure));
        assert!(iso
            .desorption
            .windows(2)
            .all(|w| w[0].pressure >= w[1].pressure));
    }

    #[test]
    fn test_missing_branch_gives_empty_placeholder() {
        let text = "   -  Adsorption\nRelative Pressure (p/p°)\n0.1 50\n0.2 60\n";
        let err = parse_branch(text, Branch::Desorption).unwrap_err();
        assert!(err.is_not_found());
        let iso = Isotherm::from_text(text);
        assert_eq!(iso.adsorption.len(), 2);
        // the adsorption maximum is shared with the (empty) desorption branch
        assert_eq!(iso.desorption, points(&[(0.2, 60.0)]));
        let empty = Isotherm::from_text("no tables at all");
        assert!(empty.is_empty());
        assert!(empty.adsorption.is_empty() && empty.desorption.is_empty());
    }

    #[test]
    fn test_split_is_idempotent_when_branches_meet() {
        let ads = points(&[(0.1, 50.0), (0.3, 70.0), (0.6, 150.0), (0.95, 300.0)]);
        let des = points(&[(0.95, 300.0), (0.7, 200.0), (0.5, 140.0)]);
        let iso = Isotherm::from_branches(&ads, &des);
        let mut ads_back = iso.adsorption.clone();
        ads_back.reverse();
        assert_eq!(ads_back, ads);
        assert_eq!(iso.desorption, des);
        // and once more from the corrected branches
        let again = Isotherm::from_branches(&iso.adsorption, &iso.desorption);
        assert_eq!(again, iso);
    }

    #[test]
    fn test_split_keeps_repeated_readings() {
        let ads = points(&[(0.1, 50.0), (0.2, 60.0), (0.2, 60.0), (0.9, 250.0)]);
        let des = points(&[(0.8, 200.0), (0.5, 140.0)]);
        let iso = Isotherm::from_branches(&ads, &des);
        assert_eq!(iso.adsorption.len(), 4);
        assert_eq!(iso.merged.len(), 6);
        assert_eq!(iso.desorption, points(&[(0.9, 250.0), (0.8, 200.0), (0.5, 140.0)]));
    }

    #[test]
    fn test_split_repairs_different_maxima() {
        let ads = points(&[(0.1, 50.0), (0.9, 250.0)]);
        let des = points(&[(0.97, 310.0), (0.5, 140.0)]);
        let iso = Isotherm::from_branches(&ads, &des);
        assert_eq!(iso.adsorption, points(&[(0.97, 310.0), (0.9, 250.0), (0.1, 50.0)]));
        assert_eq!(iso.desorption, points(&[(0.97, 310.0), (0.5, 140.0)]));
    }

    #[test]
    fn test_bet_recovers_exact_line() {
        let (a, b) = (0.012, 0.0004);
        let branch: Vec<IsothermPoint> = [0.06, 0.1, 0.15, 0.2, 0.25, 0.29]
            .iter()
            .map(|&x| {
                let y: f64 = a * x + b;
                IsothermPoint::new(x, 1.0 / (y * (1.0 / x - 1.0)))
            })
            .collect();
        let fit = calc_bet(&branch, &BetWindow::default()).unwrap();
        assert_eq!(fit.n_points, 6);
        assert_relative_eq!(fit.slope, a, max_relative = 1e-9);
        assert_relative_eq!(fit.intercept, b, max_relative = 1e-7);
        assert_relative_eq!(fit.r_value, 1.0, epsilon = 1e-12);
        assert!(fit.surface_area_err.is_finite());
        assert!(fit.surface_area_err < 1e-3);
        for (y, y_calc) in fit.y.iter().zip(&fit.y_calc) {
            assert_relative_eq!(*y, *y_calc, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_bet_reference_value() {
        let branch = points(&[(0.1, 50.0), (0.15, 55.0), (0.2, 60.0), (0.25, 66.0), (0.3, 74.0)]);
        let fit = calc_bet(&branch, &BetWindow::default()).unwrap();
        // 0.3 is outside the open window
        assert_eq!(fit.n_points, 4);
        assert_relative_eq!(fit.slope, 0.018885918003565063, max_relative = 1e-9);
        assert_relative_eq!(fit.intercept, 0.0003569518716577541, max_relative = 1e-7);
        assert_relative_eq!(fit.r_value, 0.9996937177073257, max_relative = 1e-9);
        assert_relative_eq!(fit.surface_area, 226.19056003306267, max_relative = 1e-7);
        assert_relative_eq!(fit.surface_area_err, 11.660099841262799, max_relative = 1e-6);
        assert_relative_eq!(
            fit.relative_err,
            fit.surface_area_err / fit.surface_area,
            max_relative = 1e-12
        );
        // order of the branch does not matter
        let mut reversed = branch.clone();
        reversed.reverse();
        let fit_rev = calc_bet(&reversed, &BetWindow::default()).unwrap();
        assert_relative_eq!(fit_rev.surface_area, fit.surface_area, max_relative = 1e-12);
    }

    #[test]
    fn test_bet_insufficient_data() {
        let branch = points(&[(0.02, 30.0), (0.1, 50.0), (0.2, 60.0), (0.5, 100.0)]);
        let err = calc_bet(&branch, &BetWindow::default()).unwrap_err();
        assert_eq!(
            err,
            SorptionError::InsufficientData {
                stage: "BET",
                found: 2,
                required: 3
            }
        );
        assert!(calc_bet(&[], &BetWindow::default()).is_err());
    }

    #[test]
    fn test_bet_degenerate_window() {
        let branch = points(&[(0.1, 50.0), (0.1, 51.0), (0.1, 52.0)]);
        match calc_bet(&branch, &BetWindow::default()) {
            Err(SorptionError::DegenerateFit(_)) => {}
            other => panic!("expected degenerate fit, got {:?}", other),
        }
    }

    #[test]
    fn test_bet_zero_quantity_is_degenerate() {
        let branch = points(&[(0.1, 0.0), (0.15, 55.0), (0.2, 60.0), (0.25, 66.0)]);
        match calc_bet(&branch, &BetWindow::default()) {
            Err(SorptionError::DegenerateFit(_)) => {}
            other => panic!("expected degenerate fit, got {:?}", other),
        }
    }

    #[test]
    fn test_bet_transform() {
        let y = bet_transform(&IsothermPoint::new(0.2, 60.0));
        assert_relative_eq!(y, 1.0 / (60.0 * 4.0), epsilon = 1e-15);
    }

    #[test]
    fn test_radius_and_layer_positive() {
        for p in [1e-4, 0.01, 0.05, 0.3, 0.5, 0.9, 0.999] {
            assert!(kelvin_radius(p) > 0.0);
            assert!(wall_layer(p) > 0.0);
        }
        let branch = points(&[(0.999, 400.0), (0.7, 200.0), (0.3, 100.0), (0.01, 20.0)]);
        let res = calc_bjh(&branch, &DiameterWindow::default()).unwrap();
        assert!(res.series.diameter.iter().all(|d| *d >= 0.0));
    }

    const BRANCH: [(f64, f64); 5] = [(0.95, 300.0), (0.9, 250.0), (0.8, 200.0), (0.6, 160.0), (0.4, 140.0)];

    #[test]
    fn test_bjh_reference_values() {
        let res = calc_bjh(&points(&BRANCH), &DiameterWindow::default()).unwrap();
        let s = &res.series;
        assert_eq!(s.len(), 4);
        for series in [
            &s.diameter,
            &s.diff_volume,
            &s.cum_volume,
            &s.dv_dd,
            &s.dv_dlogd,
            &s.diff_area,
            &s.cum_area,
            &s.da_dd,
            &s.da_dlogd,
        ] {
            assert_eq!(series.len(), 4);
        }
        let expected_d = [30.6002387043151, 15.710054998830353, 7.926197806112086, 4.222090119956466];
        for (d, e) in s.diameter.iter().zip(expected_d) {
            assert_relative_eq!(*d, e, max_relative = 1e-10);
        }
        let expected_v = [0.09269284471872022, 0.1911956617615388, 0.27095417423820933, 0.3096792920474748];
        for (v, e) in s.cum_volume.iter().zip(expected_v) {
            assert_relative_eq!(*v, e, max_relative = 1e-9);
        }
        assert_relative_eq!(s.cum_area[3], 114.13549427677411, max_relative = 1e-9);
        assert_relative_eq!(s.dv_dd[0], 0.004723294686967051, max_relative = 1e-9);
        assert_relative_eq!(s.dv_dlogd[0], 0.47737996732915083, max_relative = 1e-9);

        let sum = &res.summary;
        assert_relative_eq!(sum.total_volume_full, 0.3096792920474748, max_relative = 1e-9);
        assert_relative_eq!(sum.total_area_full, 114.13549427677411, max_relative = 1e-9);
        assert_relative_eq!(sum.peak_diameter_full, 4.222090119956466, max_relative = 1e-10);
        assert_relative_eq!(sum.average_diameter_full.unwrap(), 16.725659948135014, max_relative = 1e-9);
        // every diameter is inside the default window
        assert_eq!(sum.total_volume_user, Some(sum.total_volume_full));
        assert_eq!(sum.average_diameter_user, sum.average_diameter_full);
    }

    #[test]
    fn test_bjh_user_window() {
        let window = DiameterWindow {
            start_diameter: 5.0,
            end_diameter: 20.0,
        };
        let res = calc_bjh(&points(&BRANCH), &window).unwrap();
        let sum = &res.summary;
        assert_relative_eq!(sum.total_volume_user.unwrap(), 0.27095417423820933, max_relative = 1e-9);
        assert_relative_eq!(sum.total_area_user.unwrap(), 77.44739268820379, max_relative = 1e-9);
        assert_relative_eq!(sum.peak_diameter_user.unwrap(), 7.926197806112086, max_relative = 1e-10);
        assert_relative_eq!(sum.average_diameter_user.unwrap(), 12.227365440217097, max_relative = 1e-9);
        assert_relative_eq!(sum.peak_diameter_full, 4.222090119956466, max_relative = 1e-10);

        let empty = DiameterWindow {
            start_diameter: 100.0,
            end_diameter: 200.0,
        };
        let res = calc_bjh(&points(&BRANCH), &empty).unwrap();
        assert_eq!(res.summary.total_volume_user, None);
        assert_eq!(res.summary.peak_diameter_user, None);
        assert_eq!(res.summary.average_diameter_user, None);
    }

    #[test]
    fn test_bjh_peak_uses_window_indices() {
        let branch = points(&[(0.95, 300.0), (0.9, 250.0), (0.8, 240.0), (0.6, 160.0), (0.4, 140.0)]);
        let window = DiameterWindow {
            start_diameter: 10.0,
            end_diameter: 90.0,
        };
        let res = calc_bjh(&branch, &window).unwrap();
        // full maximum of dV/dD is at 7.93 nm, inside 10..90 nm it is at 30.6 nm
        assert_relative_eq!(res.summary.peak_diameter_full, 7.926197806112086, max_relative = 1e-10);
        assert_relative_eq!(
            res.summary.peak_diameter_user.unwrap(),
            30.6002387043151,
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_bjh_cumulative_monotonic() {
        let res = calc_bjh(&points(&BRANCH), &DiameterWindow::default()).unwrap();
        assert!(res.series.cum_volume.windows(2).all(|w| w[1] >= w[0]));
        assert!(res.series.cum_area.windows(2).all(|w| w[1] >= w[0]));
        assert!(res.series.cum_volume[0] >= 0.0);
    }

    #[test]
    fn test_bjh_clamps_derivatives_only() {
        // quantity grows while the pressure falls: negative increments
        let branch = points(&[(0.9, 250.0), (0.8, 260.0), (0.7, 200.0)]);
        let res = calc_bjh(&branch, &DiameterWindow::default()).unwrap();
        let s = &res.series;
        assert!(s.diff_volume[0] < 0.0);
        assert!(s.cum_volume[0] < 0.0);
        assert!(s.diff_area[0] < 0.0);
        assert_eq!(s.dv_dd[0], 0.0);
        assert_eq!(s.da_dd[0], 0.0);
        assert_eq!(s.dv_dlogd[0], 0.0);
        assert_eq!(s.da_dlogd[0], 0.0);
        // the un-clamped negative increment is kept in the running sum
        assert_relative_eq!(s.cum_volume[1], s.diff_volume[0] + s.diff_volume[1], max_relative = 1e-12);
    }

    #[test]
    fn test_bjh_sorts_branch() {
        let mut ascending = points(&BRANCH);
        ascending.reverse();
        let a = calc_bjh(&ascending, &DiameterWindow::default()).unwrap();
        let b = calc_bjh(&points(&BRANCH), &DiameterWindow::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bjh_repeated_pressure() {
        let branch = points(&[(0.9, 250.0), (0.8, 200.0), (0.8, 195.0), (0.6, 160.0)]);
        assert_eq!(repeated_pressures(&branch), 1);
        assert_eq!(repeated_pressures(&points(&BRANCH)), 0);
        // the step is kept with zero derivatives, so it can not become the peak
        let res = calc_bjh(&branch, &DiameterWindow::default()).unwrap();
        let s = &res.series;
        assert_eq!(s.len(), 3);
        assert!(s.cum_volume.iter().all(|v| v.is_finite()));
        assert!(s.diff_volume[1] > 0.0);
        assert_eq!(s.dv_dd[1], 0.0);
        assert_eq!(s.da_dlogd[1], 0.0);
        assert!(s.dv_dd[0] > 0.0 && s.dv_dd[0].is_finite());
        assert_ne!(res.summary.peak_diameter_full, s.diameter[1]);
    }

    #[test]
    fn test_bjh_insufficient_data() {
        let err = calc_bjh(&points(&[(0.5, 100.0)]), &DiameterWindow::default()).unwrap_err();
        assert_eq!(
            err,
            SorptionError::InsufficientData {
                stage: "BJH",
                found: 1,
                required: 2
            }
        );
        // points outside (0, 1) are dropped before the check
        let err = calc_bjh(&points(&[(1.0, 300.0), (0.5, 100.0)]), &DiameterWindow::default());
        assert!(err.is_err());
        let res = calc_bjh(&points(&[(0.9, 250.0), (0.8, 200.0)]), &DiameterWindow::default()).unwrap();
        assert_eq!(res.series.len(), 1);
    }

    #[test]
    fn test_vendor_summary_values() {
        let (area, unit) = parse_summary_value(EXPORT, "BET surface area").unwrap();
        assert_relative_eq!(area, 245.1234);
        assert_eq!(unit, "m²/g");
        let (mass, unit) = parse_summary_value(EXPORT, "Sample Mass").unwrap();
        assert_relative_eq!(mass, 0.1032);
        assert_eq!(unit, "g");
        let (volume, _) =
            parse_summary_value(EXPORT, "BJH Desorption cumulative volume of pores").unwrap();
        assert_relative_eq!(volume, 0.451234);
        let (pore, unit) = parse_summary_value(EXPORT, "BJH Desorption average pore").unwrap();
        assert_relative_eq!(pore, 7.3521);
        assert_eq!(unit, "nm");
        assert!(parse_summary_value(EXPORT, "Langmuir Surface Area").is_none());
    }

    #[test]
    fn test_vendor_report() {
        let report = VendorReport::from_text(EXPORT);
        assert_eq!(report.summary.len(), 8);
        assert_eq!(report.value("BET surface area"), Some(245.1234));
        assert_eq!(report.value("BJH Adsorption average pore"), None);
        assert_eq!(report.tables.len(), 8);
        let (table, rows) = &report.tables[0];
        assert_eq!(*table, VendorTable::DvDlogwPoreVolume(Branch::Desorption));
        assert_eq!(rows, &vec![(30.1, 0.4512), (15.7, 0.6011)]);
        assert!(report.tables[1..].iter().all(|(_, rows)| rows.is_empty()));
        assert_eq!(report.isotherm.merged.len(), 8);
    }
}
