use crate::Sorption::BET::{BetFit, BetWindow, calc_bet};
use crate::Sorption::BJH::{BjhResult, DiameterWindow, calc_bjh};
use crate::Sorption::isotherm::{Branch, Isotherm};
use crate::Sorption::sorption_errors::SorptionError;
use log::{info, warn};

/// all calculations for one sample; a failed stage keeps its error so the report can null-pad it
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCalculation {
    pub isotherm: Isotherm,
    pub bet: Result<BetFit, SorptionError>,
    pub bjh_desorption: Result<BjhResult, SorptionError>,
    pub bjh_adsorption: Result<BjhResult, SorptionError>,
}

impl SampleCalculation {
    pub fn from_isotherm(
        isotherm: Isotherm,
        bet_window: &BetWindow,
        diameters: &DiameterWindow,
    ) -> Self {
        info!("Calculating BET surface area...");
        let bet = calc_bet(&isotherm.adsorption, bet_window);
        info!("Calculating BJH pore size distribution...");
        let bjh_desorption = calc_bjh(&isotherm.desorption, diameters);
        let bjh_adsorption = calc_bjh(&isotherm.adsorption, diameters);

        for (stage, result) in [
            ("BET", bet.as_ref().err()),
            ("BJH Desorption", bjh_desorption.as_ref().err()),
            ("BJH Adsorption", bjh_adsorption.as_ref().err()),
        ] {
            if let Some(e) = result {
                warn!("{} skipped: {}", stage, e);
            }
        }

        Self {
            isotherm,
            bet,
            bjh_desorption,
            bjh_adsorption,
        }
    }

    pub fn from_text(text: &str, bet_window: &BetWindow, diameters: &DiameterWindow) -> Self {
        Self::from_isotherm(Isotherm::from_text(text), bet_window, diameters)
    }

    pub fn bjh(&self, branch: Branch) -> &Result<BjhResult, SorptionError> {
        match branch {
            Branch::Desorption => &self.bjh_desorption,
            Branch::Adsorption => &self.bjh_adsorption,
        }
    }
}
