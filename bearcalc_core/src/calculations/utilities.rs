//! # Electrical & Water Utility Calculators
//!
//! ## Voltage drop (single-phase, circular-mil method)
//! ```text
//! VD = 2 · K · I · L / CM
//! ```
//! - `K` = conductor resistivity (Ω·cmil/ft): copper 12.9, aluminum 21.2
//! - `I` = load current (A)
//! - `L` = one-way run length (ft)
//! - `CM` = conductor area (circular mils)
//!
//! ## Hydrant flow (pitot test)
//! ```text
//! Q = 29.84 · c · d² · √p
//! ```
//! - `c` = outlet discharge coefficient
//! - `d` = outlet diameter (in)
//! - `p` = pitot pressure (psi)

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{require_non_negative, require_non_zero, require_positive, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{fixed, percent, positive_or_sentinel, ReportLine, SENTINEL};
use crate::registry::CalculatorId;

/// Circular mils by AWG size.
pub const WIRE_CIRCULAR_MILS: [(&str, f64); 7] = [
    ("14", 4110.0),
    ("12", 6530.0),
    ("10", 10380.0),
    ("8", 16510.0),
    ("6", 26240.0),
    ("4", 41740.0),
    ("2", 66360.0),
];

/// Hydrant flow constant for gpm from inches and psi
pub const HYDRANT_FLOW_CONSTANT: f64 = 29.84;

/// Circular mils for an AWG size, if tabulated.
pub fn circular_mils(awg: &str) -> Option<f64> {
    let awg = awg.trim();
    WIRE_CIRCULAR_MILS
        .iter()
        .find(|(size, _)| *size == awg)
        .map(|(_, cm)| *cm)
}

// ============================================================================
// Voltage Drop
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conductor {
    #[default]
    Copper,
    Aluminum,
}

impl Conductor {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "copper" | "cu" => Some(Conductor::Copper),
            "aluminum" | "aluminium" | "al" => Some(Conductor::Aluminum),
            _ => None,
        }
    }

    /// Resistivity constant `K`
    pub fn k(&self) -> f64 {
        match self {
            Conductor::Copper => 12.9,
            Conductor::Aluminum => 21.2,
        }
    }
}

impl fmt::Display for Conductor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conductor::Copper => write!(f, "copper"),
            Conductor::Aluminum => write!(f, "aluminum"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoltageDropInput {
    pub material: Option<Conductor>,
    /// AWG size, one of [`WIRE_CIRCULAR_MILS`]
    pub wire_size: String,
    pub voltage: f64,
    pub current: f64,
    /// One-way distance (ft)
    pub distance_ft: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    /// Volts lost over the run
    pub drop: f64,
    /// Drop as a share of the source voltage (%)
    pub percent: f64,
}

impl Calculation for VoltageDropInput {
    type Output = VoltageDropResult;
    const ID: CalculatorId = CalculatorId::VoltageDrop;

    fn from_form(form: &FormState) -> Self {
        VoltageDropInput {
            material: Conductor::parse(form.text("material")),
            wire_size: form.text("wire_size").trim().to_string(),
            voltage: form.number("voltage"),
            current: form.number("current"),
            distance_ft: form.number("distance_ft"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        if self.material.is_none() {
            return Err(CalcError::invalid_input("material", "", "Expected 'copper' or 'aluminum'"));
        }
        if circular_mils(&self.wire_size).is_none() {
            return Err(CalcError::invalid_input(
                "wire_size",
                self.wire_size.clone(),
                "Supported sizes are 14, 12, 10, 8, 6, 4 and 2 AWG",
            ));
        }
        require_non_zero("voltage", self.voltage)?;
        require_non_negative("current", self.current)?;
        require_non_negative("distance_ft", self.distance_ft)?;
        Ok(())
    }

    fn compute(&self) -> VoltageDropResult {
        let (Some(material), Some(cm)) = (self.material, circular_mils(&self.wire_size)) else {
            return VoltageDropResult::default();
        };
        let drop = 2.0 * material.k() * self.current * self.distance_ft / cm;
        VoltageDropResult {
            drop,
            percent: drop / self.voltage * 100.0,
        }
    }
}

impl Report for VoltageDropResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let percent_line = if self.drop > 0.0 {
            percent(self.percent, 2)
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("Voltage Drop", format!("{} V", fixed(self.drop, 2))),
            ReportLine::new("Percentage Drop", percent_line),
        ]
    }
}

// ============================================================================
// Fire Hydrant Flow
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrantFlowInput {
    /// psi
    pub pitot_pressure: f64,
    /// inches
    pub nozzle_diameter: f64,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HydrantFlowResult {
    /// Gallons per minute
    pub flow_gpm: f64,
}

impl Calculation for HydrantFlowInput {
    type Output = HydrantFlowResult;
    const ID: CalculatorId = CalculatorId::HydrantFlow;

    fn from_form(form: &FormState) -> Self {
        HydrantFlowInput {
            pitot_pressure: form.number("pitot_pressure"),
            nozzle_diameter: form.number("nozzle_diameter"),
            coefficient: form.number("coefficient"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("pitot_pressure", self.pitot_pressure)?;
        require_positive("nozzle_diameter", self.nozzle_diameter)?;
        require_positive("coefficient", self.coefficient)?;
        Ok(())
    }

    fn compute(&self) -> HydrantFlowResult {
        let d = self.nozzle_diameter;
        HydrantFlowResult {
            flow_gpm: HYDRANT_FLOW_CONSTANT * self.coefficient * d * d * self.pitot_pressure.sqrt(),
        }
    }
}

impl Report for HydrantFlowResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let flow = positive_or_sentinel(self.flow_gpm, 0);
        let flow = if flow == SENTINEL { flow } else { format!("{flow} GPM") };
        vec![ReportLine::new("Flow Rate", flow)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copper_12() -> VoltageDropInput {
        VoltageDropInput {
            material: Some(Conductor::Copper),
            wire_size: "12".to_string(),
            voltage: 120.0,
            current: 15.0,
            distance_ft: 100.0,
        }
    }

    #[test]
    fn test_voltage_drop() {
        let result = copper_12().calculate().unwrap();
        assert!((result.drop - 5.9265).abs() < 1e-4);
        assert!((result.percent - 4.9387).abs() < 1e-4);
        let lines = result.report("$");
        assert_eq!(lines[0].value, "5.93 V");
        assert_eq!(lines[1].value, "4.94%");
    }

    #[test]
    fn test_aluminum_drops_more() {
        let copper = copper_12().calculate().unwrap();
        let mut input = copper_12();
        input.material = Some(Conductor::Aluminum);
        let aluminum = input.calculate().unwrap();
        assert!((aluminum.drop / copper.drop - 21.2 / 12.9).abs() < 1e-12);
    }

    #[test]
    fn test_voltage_drop_rejects_unknown_size_and_zero_volts() {
        let mut input = copper_12();
        input.wire_size = "3".into();
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate(), VoltageDropResult::default());

        let mut input = copper_12();
        input.voltage = 0.0;
        assert!(input.calculate().is_err());
    }

    #[test]
    fn test_wire_table_is_monotonic() {
        for pair in WIRE_CIRCULAR_MILS.windows(2) {
            assert!(pair[1].1 > pair[0].1);
        }
        assert_eq!(circular_mils(" 10 "), Some(10380.0));
    }

    #[test]
    fn test_hydrant_flow() {
        let result = HydrantFlowInput {
            pitot_pressure: 65.0,
            nozzle_diameter: 2.5,
            coefficient: 0.9,
        }
        .calculate()
        .unwrap();
        assert!((result.flow_gpm - 1353.25).abs() < 0.01);
        assert_eq!(result.report("$")[0].value, "1,353 GPM");
    }

    #[test]
    fn test_hydrant_zero_pressure() {
        let input = HydrantFlowInput {
            pitot_pressure: 0.0,
            nozzle_diameter: 2.5,
            coefficient: 0.9,
        };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate().report("$")[0].value, SENTINEL);
    }
}
