use serde::{Deserialize, Serialize};

/// which calculation produces the quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Bet,
    Isotherm,
    Bjh,
}

/// Everything that can be written to a report. The serde names are the keys used in the
/// configuration file ("summary": ["bet_A", ...], "graphs": ["iso_p", ...]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "bet_A")]
    BetArea,
    #[serde(rename = "bet_A_err")]
    BetAreaErr,
    #[serde(rename = "bet_r")]
    BetR,
    #[serde(rename = "bet_x")]
    BetX,
    #[serde(rename = "bet_y")]
    BetY,
    #[serde(rename = "bet_y_calc")]
    BetYCalc,
    #[serde(rename = "iso_p")]
    IsoP,
    #[serde(rename = "iso_q")]
    IsoQ,
    #[serde(rename = "ads_p")]
    AdsP,
    #[serde(rename = "ads_q")]
    AdsQ,
    #[serde(rename = "des_p")]
    DesP,
    #[serde(rename = "des_q")]
    DesQ,
    #[serde(rename = "total_V_user")]
    TotalVolumeUser,
    #[serde(rename = "total_V_full")]
    TotalVolumeFull,
    #[serde(rename = "total_A_user")]
    TotalAreaUser,
    #[serde(rename = "total_A_full")]
    TotalAreaFull,
    #[serde(rename = "max_D_user")]
    MaxDiameterUser,
    #[serde(rename = "max_D_full")]
    MaxDiameterFull,
    #[serde(rename = "ave_D_user")]
    AverageDiameterUser,
    #[serde(rename = "ave_D_full")]
    AverageDiameterFull,
    #[serde(rename = "D")]
    Diameter,
    #[serde(rename = "dV")]
    DiffVolume,
    #[serde(rename = "V")]
    CumVolume,
    #[serde(rename = "dV_dD")]
    DvDd,
    #[serde(rename = "dV_dlogD")]
    DvDlogd,
    #[serde(rename = "dA")]
    DiffArea,
    #[serde(rename = "A")]
    CumArea,
    #[serde(rename = "dA_dD")]
    DaDd,
    #[serde(rename = "dA_dlogD")]
    DaDlogd,
}

impl Quantity {
    pub const ALL: [Quantity; 29] = [
        Quantity::BetArea,
        Quantity::BetAreaErr,
        Quantity::BetR,
        Quantity::BetX,
        Quantity::BetY,
        Quantity::BetYCalc,
        Quantity::IsoP,
        Quantity::IsoQ,
        Quantity::AdsP,
        Quantity::AdsQ,
        Quantity::DesP,
        Quantity::DesQ,
        Quantity::TotalVolumeUser,
        Quantity::TotalVolumeFull,
        Quantity::TotalAreaUser,
        Quantity::TotalAreaFull,
        Quantity::MaxDiameterUser,
        Quantity::MaxDiameterFull,
        Quantity::AverageDiameterUser,
        Quantity::AverageDiameterFull,
        Quantity::Diameter,
        Quantity::DiffVolume,
        Quantity::CumVolume,
        Quantity::DvDd,
        Quantity::DvDlogd,
        Quantity::DiffArea,
        Quantity::CumArea,
        Quantity::DaDd,
        Quantity::DaDlogd,
    ];

    pub fn key(&self) -> &'static str {
        use Quantity::*;
        match self {
            BetArea => "bet_A",
            BetAreaErr => "bet_A_err",
            BetR => "bet_r",
            BetX => "bet_x",
            BetY => "bet_y",
            BetYCalc => "bet_y_calc",
            IsoP => "iso_p",
            IsoQ => "iso_q",
            AdsP => "ads_p",
            AdsQ => "ads_q",
            DesP => "des_p",
            DesQ => "des_q",
            TotalVolumeUser => "total_V_user",
            TotalVolumeFull => "total_V_full",
            TotalAreaUser => "total_A_user",
            TotalAreaFull => "total_A_full",
            MaxDiameterUser => "max_D_user",
            MaxDiameterFull => "max_D_full",
            AverageDiameterUser => "ave_D_user",
            AverageDiameterFull => "ave_D_full",
            Diameter => "D",
            DiffVolume => "dV",
            CumVolume => "V",
            DvDd => "dV_dD",
            DvDlogd => "dV_dlogD",
            DiffArea => "dA",
            CumArea => "A",
            DaDd => "dA_dD",
            DaDlogd => "dA_dlogD",
        }
    }

    pub fn from_key(key: &str) -> Option<Quantity> {
        Self::ALL.iter().copied().find(|q| q.key() == key)
    }

    /// column title, the "Desorption "/"Adsorption " prefix of BJH values is added by the report
    pub fn title(&self) -> &'static str {
        use Quantity::*;
        match self {
            BetArea => "BET surface area",
            BetAreaErr => "BET surface area error",
            BetR => "BET fit r-value",
            BetX => "BET Relative Pressure",
            BetY => "BET Transform 1/(Q(p°/p - 1))",
            BetYCalc => "BET Linear Fit",
            IsoP | AdsP | DesP => "Relative Pressure",
            IsoQ | AdsQ | DesQ => "Quantity Adsorbed",
            TotalVolumeUser => "BJH Pore Volume User",
            TotalVolumeFull => "BJH Pore Volume",
            TotalAreaUser => "BJH Pore Area User",
            TotalAreaFull => "BJH Pore Area",
            MaxDiameterUser => "Max Pore Diameter User",
            MaxDiameterFull => "Max Pore Diameter",
            AverageDiameterUser => "Average Pore Diameter User",
            AverageDiameterFull => "Average Pore Diameter",
            Diameter => "Pore Width",
            DiffVolume => "Differential Pore Volume",
            CumVolume => "Cumulative Pore Volume",
            DvDd | DvDlogd => "Pore Volume",
            DiffArea => "Differential Pore Area",
            CumArea => "Cumulative Pore Area",
            DaDd | DaDlogd => "Pore Surface Area",
        }
    }

    pub fn unit(&self) -> &'static str {
        use Quantity::*;
        match self {
            BetArea | BetAreaErr => "m²/g",
            BetR => "",
            BetX | IsoP | AdsP | DesP => "p/p°",
            BetY | BetYCalc => "g/cm³",
            IsoQ | AdsQ | DesQ => "cm³/g",
            TotalVolumeUser | TotalVolumeFull => "cm³/g",
            TotalAreaUser | TotalAreaFull => "m²/g",
            MaxDiameterUser | MaxDiameterFull | AverageDiameterUser | AverageDiameterFull => "nm",
            Diameter => "nm",
            DiffVolume | CumVolume => "cm³/g",
            DvDd => "dV/dD cm³/(nm·g)",
            DvDlogd => "dV/dlog(D) cm³/(nm·g)",
            DiffArea | CumArea => "m²/g",
            DaDd => "dA/dD m²/(nm·g)",
            DaDlogd => "dA/dlog(D) m²/(nm·g)",
        }
    }

    pub fn source(&self) -> Source {
        use Quantity::*;
        match self {
            BetArea | BetAreaErr | BetR | BetX | BetY | BetYCalc => Source::Bet,
            IsoP | IsoQ | AdsP | AdsQ | DesP | DesQ => Source::Isotherm,
            _ => Source::Bjh,
        }
    }

    /// single number (summary) or a series (graph)
    pub fn is_scalar(&self) -> bool {
        use Quantity::*;
        matches!(
            self,
            BetArea
                | BetAreaErr
                | BetR
                | TotalVolumeUser
                | TotalVolumeFull
                | TotalAreaUser
                | TotalAreaFull
                | MaxDiameterUser
                | MaxDiameterFull
                | AverageDiameterUser
                | AverageDiameterFull
        )
    }
}
