//! Pump family: variable-speed centrifugal and positive displacement.

use pf_core::formulas::{
    WATER_SPEC_GRAV, WATER_SPEC_WEIGHT, head_to_pressure, pressure_to_head, pump_power,
};

use crate::common::{check_finite, check_speed};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::FlowElement;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PumpKind {
    /// Flow and pressure scale with speed by the affinity laws.
    Centrifugal,
    /// Flow = speed × displacement (gal/rev); outlet pressure is held.
    PositiveDisplacement { displacement: f64 },
}

impl PumpKind {
    pub fn label(&self) -> &'static str {
        match self {
            PumpKind::Centrifugal => "centrifugal",
            PumpKind::PositiveDisplacement { .. } => "positive displacement",
        }
    }
}

/// Outlet requirement when starting a pump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutletPressure {
    Psi(f64),
    /// Feet of fluid head.
    Head(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PumpConfig {
    pub name: String,
    pub kind: PumpKind,
    /// rpm
    pub speed: u32,
    /// gpm
    pub flow: f64,
    /// Inlet head (ft).
    pub head_in: f64,
    /// Outlet pressure (psi).
    pub press_out: f64,
    pub spec_grav: f64,
}

impl PumpConfig {
    pub fn centrifugal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PumpKind::Centrifugal,
            speed: 0,
            flow: 0.0,
            head_in: 0.0,
            press_out: 0.0,
            spec_grav: WATER_SPEC_GRAV,
        }
    }

    pub fn positive_displacement(name: impl Into<String>, displacement: f64) -> Self {
        Self {
            kind: PumpKind::PositiveDisplacement { displacement },
            ..Self::centrifugal(name)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pump {
    name: String,
    kind: PumpKind,
    speed: u32,
    flow: f64,
    head_in: f64,
    press_out: f64,
    power: f64,
    spec_grav: f64,
}

impl Pump {
    pub fn new(config: PumpConfig) -> ComponentResult<Self> {
        check_finite(config.flow, "pump flow")?;
        check_finite(config.head_in, "pump inlet head")?;
        check_finite(config.press_out, "pump outlet pressure")?;
        check_finite(config.spec_grav, "specific gravity")?;
        if let PumpKind::PositiveDisplacement { displacement } = config.kind {
            check_finite(displacement, "pump displacement")?;
        }

        let mut pump = Self {
            name: config.name,
            kind: config.kind,
            speed: config.speed,
            flow: config.flow,
            head_in: config.head_in,
            press_out: config.press_out,
            power: 0.0,
            spec_grav: config.spec_grav,
        };
        pump.power = pump.power_at(pump.flow, pump.head_in, pump.press_out)?;
        Ok(pump)
    }

    /// Hydraulic power (kW) against the differential between outlet pressure
    /// and the pressure equivalent of the inlet head.
    fn power_at(&self, flow: f64, head_in: f64, press_out: f64) -> ComponentResult<f64> {
        let press_in = head_to_pressure(head_in, self.spec_grav)?;
        let diff = (press_out - press_in).abs();
        Ok(pump_power(flow, diff, WATER_SPEC_WEIGHT)?)
    }

    fn commit(&mut self, speed: u32, flow: f64, press_out: f64) -> ComponentResult<()> {
        let power = self.power_at(flow, self.head_in, press_out)?;
        self.flow = flow;
        self.press_out = press_out;
        self.power = power;
        self.speed = speed;
        Ok(())
    }

    /// Change speed following the pump's characteristic.
    ///
    /// Centrifugal: scale from the current speed (a stopped pump counts as
    /// 1 rpm), flow by n₂/n₁ and outlet pressure by (n₂/n₁)².
    /// Positive displacement: flow = speed × displacement.
    pub fn adjust_speed(&mut self, speed: i64) -> ComponentResult<()> {
        let n2 = check_speed(speed)?;
        match self.kind {
            PumpKind::Centrifugal => {
                let n1 = if self.speed == 0 { 1 } else { self.speed };
                let ratio = f64::from(n2) / f64::from(n1);
                self.commit(n2, self.flow * ratio, self.press_out * ratio.powi(2))
            }
            PumpKind::PositiveDisplacement { displacement } => {
                self.commit(n2, f64::from(n2) * displacement, self.press_out)
            }
        }
    }

    /// Store a new speed without affinity scaling.
    ///
    /// Stopping the pump zeroes its flow. A positive displacement pump always
    /// recomputes flow from displacement.
    pub fn set_speed(&mut self, speed: i64) -> ComponentResult<()> {
        let n = check_speed(speed)?;
        let flow = match self.kind {
            PumpKind::PositiveDisplacement { displacement } => f64::from(n) * displacement,
            PumpKind::Centrifugal if n == 0 => 0.0,
            PumpKind::Centrifugal => self.flow,
        };
        self.commit(n, flow, self.press_out)
    }

    /// Start a centrifugal pump at a known operating point.
    pub fn start_pump(
        &mut self,
        speed: i64,
        flow: f64,
        outlet: OutletPressure,
    ) -> ComponentResult<()> {
        if !matches!(self.kind, PumpKind::Centrifugal) {
            return Err(ComponentError::NotSupported {
                what: "start_pump applies to centrifugal pumps",
            });
        }
        let n = check_speed(speed)?;
        check_finite(flow, "pump flow")?;
        let press_out = match outlet {
            OutletPressure::Psi(p) => {
                check_finite(p, "pump outlet pressure")?;
                p
            }
            OutletPressure::Head(ft) => head_to_pressure(ft, self.spec_grav)?,
        };
        if press_out <= 0.0 {
            return Err(ComponentError::MissingOutletPressure);
        }
        self.commit(n, flow, press_out)
    }

    /// Set inlet head (ft) directly.
    pub fn set_inlet_head(&mut self, head_ft: f64) -> ComponentResult<()> {
        check_finite(head_ft, "pump inlet head")?;
        let power = self.power_at(self.flow, head_ft, self.press_out)?;
        self.head_in = head_ft;
        self.power = power;
        Ok(())
    }

    pub fn kind(&self) -> PumpKind {
        self.kind
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn flow(&self) -> f64 {
        self.flow
    }

    pub fn head_in(&self) -> f64 {
        self.head_in
    }

    pub fn press_out(&self) -> f64 {
        self.press_out
    }

    /// kW
    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn spec_grav(&self) -> f64 {
        self.spec_grav
    }
}

impl FlowElement for Pump {
    fn name(&self) -> &str {
        &self.name
    }

    fn outlet_pressure(&self) -> f64 {
        self.press_out
    }

    fn outlet_flow(&self) -> f64 {
        self.flow
    }

    fn is_passing(&self) -> bool {
        self.speed > 0
    }

    /// A running pump sets its discharge pressure whatever it is moving.
    fn is_delivering(&self) -> bool {
        self.is_passing()
    }

    /// Suction pressure sets the inlet head. Pumps produce their own flow, so
    /// the inlet flow is not used.
    fn update_inlet(&mut self, pressure: f64, _flow: f64) -> ComponentResult<()> {
        let head = pressure_to_head(pressure, self.spec_grav)?;
        self.set_inlet_head(head)
    }
}
