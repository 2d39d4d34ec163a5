//! Valve family: on/off gate, throttling globe, pressure-actuated relief.
//!
//! All three share one struct. The kind decides how the handle behaves and
//! whether inlet pressure actuates the valve.

use pf_core::formulas::{self, WATER_SPEC_GRAV};
use tracing::warn;

use crate::common::{CLOSED, FULL_OPEN, check_finite, check_position};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::FlowElement;

/// Which valve this is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValveKind {
    /// Fully open or fully closed.
    Gate,
    /// Any position 0..=100.
    Globe,
    /// Normally closed. Opens at `setpoint_open` psi, recloses at or below
    /// `setpoint_close` psi.
    Relief {
        setpoint_open: f64,
        setpoint_close: f64,
    },
}

impl ValveKind {
    pub fn label(&self) -> &'static str {
        match self {
            ValveKind::Gate => "gate",
            ValveKind::Globe => "globe",
            ValveKind::Relief { .. } => "relief",
        }
    }
}

/// Reported valve position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveState {
    Closed,
    Open,
    Throttled(u8),
}

/// Construction parameters for a [`Valve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValveConfig {
    pub name: String,
    pub kind: ValveKind,
    /// Position (%).
    pub position: u8,
    pub cv: f64,
    pub spec_grav: f64,
    /// Boundary inlet pressure (psi), used when nothing is wired upstream.
    pub press_in: f64,
    /// Boundary inlet flow (gpm).
    pub flow_in: f64,
}

impl ValveConfig {
    fn with_kind(name: impl Into<String>, kind: ValveKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: CLOSED,
            cv: 15.0 * 2.0 * 2.0,
            spec_grav: WATER_SPEC_GRAV,
            press_in: 0.0,
            flow_in: 0.0,
        }
    }

    /// Closed gate with the Cv of a 2 in bore.
    pub fn gate(name: impl Into<String>) -> Self {
        Self::with_kind(name, ValveKind::Gate)
    }

    pub fn globe(name: impl Into<String>) -> Self {
        Self::with_kind(name, ValveKind::Globe)
    }

    pub fn relief(name: impl Into<String>, setpoint_open: f64, setpoint_close: f64) -> Self {
        Self::with_kind(
            name,
            ValveKind::Relief {
                setpoint_open,
                setpoint_close,
            },
        )
    }

    pub fn with_cv(mut self, cv: f64) -> Self {
        self.cv = cv;
        self
    }

    pub fn with_position(mut self, position: u8) -> Self {
        self.position = position;
        self
    }

    pub fn with_spec_grav(mut self, spec_grav: f64) -> Self {
        self.spec_grav = spec_grav;
        self
    }

    pub fn with_inlet(mut self, press_in: f64, flow_in: f64) -> Self {
        self.press_in = press_in;
        self.flow_in = flow_in;
        self
    }
}

/// Outlet-side values, computed before anything is stored.
struct Outlet {
    flow: f64,
    delta_p: f64,
    press: f64,
}

impl Outlet {
    const ZERO: Outlet = Outlet {
        flow: 0.0,
        delta_p: 0.0,
        press: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct Valve {
    name: String,
    kind: ValveKind,
    position: u8,
    cv: f64,
    spec_grav: f64,
    press_in: f64,
    flow_in: f64,
    delta_p: f64,
    press_out: f64,
    flow_out: f64,
}

impl Valve {
    /// Create a valve and compute its outlet from the configured inlet.
    pub fn new(config: ValveConfig) -> ComponentResult<Self> {
        check_finite(config.cv, "valve coefficient")?;
        check_finite(config.spec_grav, "specific gravity")?;
        check_finite(config.press_in, "inlet pressure")?;
        check_finite(config.flow_in, "inlet flow")?;
        if config.cv <= 0.0 {
            return Err(ComponentError::Domain {
                what: "valve coefficient must be > 0",
            });
        }
        let position = check_position(i64::from(config.position))?;
        if config.kind == ValveKind::Gate && position != CLOSED && position != FULL_OPEN {
            return Err(ComponentError::PartialGatePosition {
                name: config.name,
                position: i64::from(position),
            });
        }
        if let ValveKind::Relief {
            setpoint_open,
            setpoint_close,
        } = config.kind
        {
            check_finite(setpoint_open, "relief open setpoint")?;
            check_finite(setpoint_close, "relief close setpoint")?;
        }

        let mut valve = Self {
            name: config.name,
            kind: config.kind,
            position,
            cv: config.cv,
            spec_grav: config.spec_grav,
            press_in: config.press_in,
            flow_in: config.flow_in,
            delta_p: 0.0,
            press_out: 0.0,
            flow_out: 0.0,
        };
        let outlet = valve.outlet_at(position, valve.press_in, valve.flow_in)?;
        valve.store(position, outlet);
        Ok(valve)
    }

    /// Outlet values for a position against the given inlet.
    fn outlet_at(&self, position: u8, press_in: f64, flow_in: f64) -> ComponentResult<Outlet> {
        if position == CLOSED {
            return Ok(Outlet::ZERO);
        }
        let flow = if position == FULL_OPEN {
            flow_in
        } else {
            flow_in * f64::from(position) / 100.0
        };
        let delta_p = formulas::pressure_drop(flow, self.cv, self.spec_grav)?;
        Ok(Outlet {
            flow,
            delta_p,
            press: press_in - delta_p,
        })
    }

    fn store(&mut self, position: u8, outlet: Outlet) {
        self.position = position;
        self.flow_out = outlet.flow;
        self.delta_p = outlet.delta_p;
        self.press_out = outlet.press;
    }

    fn move_to(&mut self, position: u8) -> ComponentResult<()> {
        let outlet = self.outlet_at(position, self.press_in, self.flow_in)?;
        self.store(position, outlet);
        Ok(())
    }

    /// Set Cv from the valve bore (`Cv = 15 d²`).
    ///
    /// A bore that yields Cv ≤ 0 is rejected and the old Cv kept.
    pub fn calc_coefficient(&mut self, diameter_in: f64) -> ComponentResult<f64> {
        let cv = formulas::valve_coefficient(diameter_in)?;
        self.set_cv(cv)?;
        Ok(cv)
    }

    /// Replace Cv and recompute the outlet.
    pub fn set_cv(&mut self, cv: f64) -> ComponentResult<()> {
        check_finite(cv, "valve coefficient")?;
        if cv <= 0.0 {
            return Err(ComponentError::Domain {
                what: "valve coefficient must be > 0",
            });
        }
        let old = self.cv;
        self.cv = cv;
        if let Err(e) = self.move_to(self.position) {
            self.cv = old;
            return Err(e);
        }
        Ok(())
    }

    /// Pressure drop (psi) at `flow` through this valve; stored as the valve ΔP.
    pub fn pressure_drop(&mut self, flow: f64) -> ComponentResult<f64> {
        let dp = formulas::pressure_drop(flow, self.cv, self.spec_grav)?;
        self.delta_p = dp;
        Ok(dp)
    }

    /// Flow (gpm) a valve with coefficient `cv` passes at `delta_p`.
    pub fn flow_from_coefficient(&self, cv: f64, delta_p: f64) -> ComponentResult<f64> {
        Ok(formulas::flow_from_coefficient(cv, delta_p, self.spec_grav)?)
    }

    /// Fully open: inlet flow passes through, ΔP from Cv.
    pub fn open(&mut self) -> ComponentResult<()> {
        self.move_to(FULL_OPEN)
    }

    /// Fully close: outlet flow, outlet pressure and ΔP drop to zero.
    pub fn close(&mut self) {
        self.store(CLOSED, Outlet::ZERO);
    }

    /// Operate the handle.
    ///
    /// Gates accept only 0 and 100; anything else is refused with a warning
    /// and leaves the valve as it was. Globes accept any 0..=100. Relief
    /// valves have no handle.
    pub fn turn_handle(&mut self, position: i64) -> ComponentResult<()> {
        match self.kind {
            ValveKind::Gate => match position {
                0 => {
                    self.close();
                    Ok(())
                }
                100 => self.open(),
                _ => {
                    warn!(valve = %self.name, position, "gate valves are on/off only; request ignored");
                    Err(ComponentError::PartialGatePosition {
                        name: self.name.clone(),
                        position,
                    })
                }
            },
            ValveKind::Globe => {
                let pct = check_position(position)?;
                if pct == CLOSED {
                    self.close();
                    Ok(())
                } else {
                    self.move_to(pct)
                }
            }
            ValveKind::Relief { .. } => Err(ComponentError::NotSupported {
                what: "relief valves are actuated by pressure",
            }),
        }
    }

    /// Store an inlet pressure and return the resulting outlet pressure.
    ///
    /// ΔP comes from the current outlet flow. A closed valve reports zero for
    /// outlet flow, outlet pressure and ΔP.
    pub fn get_outlet_pressure(&mut self, press_in: f64) -> ComponentResult<f64> {
        check_finite(press_in, "inlet pressure")?;
        let outlet = if self.position == CLOSED {
            Outlet::ZERO
        } else {
            let delta_p = formulas::pressure_drop(self.flow_out, self.cv, self.spec_grav)?;
            Outlet {
                flow: self.flow_out,
                delta_p,
                press: press_in - delta_p,
            }
        };
        self.press_in = press_in;
        self.store(self.position, outlet);
        Ok(self.press_out)
    }

    /// Relief actuation: open at or above the open setpoint, close at or below
    /// the close setpoint, otherwise hold. Returns the position afterwards.
    pub fn evaluate(&mut self, pressure: f64) -> ComponentResult<ValveState> {
        check_finite(pressure, "relief pressure")?;
        let ValveKind::Relief {
            setpoint_open,
            setpoint_close,
        } = self.kind
        else {
            return Err(ComponentError::NotSupported {
                what: "only relief valves evaluate setpoints",
            });
        };
        if pressure >= setpoint_open {
            self.open()?;
        } else if pressure <= setpoint_close {
            self.close();
        }
        Ok(self.state())
    }

    /// Change the relief opening setpoint (psi).
    pub fn set_open_pressure(&mut self, pressure: f64) -> ComponentResult<()> {
        check_finite(pressure, "relief open setpoint")?;
        match &mut self.kind {
            ValveKind::Relief { setpoint_open, .. } => {
                *setpoint_open = pressure;
                Ok(())
            }
            _ => Err(ComponentError::NotSupported {
                what: "only relief valves have setpoints",
            }),
        }
    }

    /// Change the relief reclosing setpoint (psi).
    pub fn set_blowdown(&mut self, pressure: f64) -> ComponentResult<()> {
        check_finite(pressure, "relief close setpoint")?;
        match &mut self.kind {
            ValveKind::Relief { setpoint_close, .. } => {
                *setpoint_close = pressure;
                Ok(())
            }
            _ => Err(ComponentError::NotSupported {
                what: "only relief valves have setpoints",
            }),
        }
    }

    pub fn state(&self) -> ValveState {
        match self.position {
            CLOSED => ValveState::Closed,
            FULL_OPEN => ValveState::Open,
            pct => ValveState::Throttled(pct),
        }
    }

    pub fn kind(&self) -> ValveKind {
        self.kind
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }

    pub fn spec_grav(&self) -> f64 {
        self.spec_grav
    }

    pub fn press_in(&self) -> f64 {
        self.press_in
    }

    pub fn flow_in(&self) -> f64 {
        self.flow_in
    }

    pub fn delta_p(&self) -> f64 {
        self.delta_p
    }

    pub fn press_out(&self) -> f64 {
        self.press_out
    }

    pub fn flow_out(&self) -> f64 {
        self.flow_out
    }
}

impl FlowElement for Valve {
    fn name(&self) -> &str {
        &self.name
    }

    fn outlet_pressure(&self) -> f64 {
        self.press_out
    }

    fn outlet_flow(&self) -> f64 {
        self.flow_out
    }

    fn is_passing(&self) -> bool {
        self.position > CLOSED
    }

    /// Store new inlet values, let a relief valve react to the pressure, then
    /// recompute the outlet from the current position.
    fn update_inlet(&mut self, pressure: f64, flow: f64) -> ComponentResult<()> {
        check_finite(pressure, "inlet pressure")?;
        check_finite(flow, "inlet flow")?;

        let mut position = self.position;
        if let ValveKind::Relief {
            setpoint_open,
            setpoint_close,
        } = self.kind
        {
            if pressure >= setpoint_open {
                position = FULL_OPEN;
            } else if pressure <= setpoint_close {
                position = CLOSED;
            }
        }

        let outlet = self.outlet_at(position, pressure, flow)?;
        self.press_in = pressure;
        self.flow_in = flow;
        self.store(position, outlet);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::numeric::{Tolerances, nearly_equal};

    fn tol() -> Tolerances {
        Tolerances::default()
    }

    fn line_gate() -> Valve {
        Valve::new(
            ValveConfig::gate("valve1")
                .with_cv(200.0)
                .with_inlet(6.0606060606060606, 319.28008077388426),
        )
        .unwrap()
    }

    #[test]
    fn gate_open_passes_flow() {
        let mut v = line_gate();
        assert_eq!(v.state(), ValveState::Closed);
        v.open().unwrap();
        assert_eq!(v.flow_out(), 319.28008077388426);
        assert!(nearly_equal(v.delta_p(), 2.5484942494744516, tol()));
        assert!(nearly_equal(v.press_out(), 3.512111811131609, tol()));
    }

    #[test]
    fn gate_rejects_partial_position() {
        let mut v = line_gate();
        v.open().unwrap();
        let before = (v.position(), v.flow_out(), v.press_out());
        let err = v.turn_handle(50).unwrap_err();
        assert!(matches!(err, ComponentError::PartialGatePosition { .. }));
        assert_eq!(before, (v.position(), v.flow_out(), v.press_out()));
    }

    #[test]
    fn gate_partial_config_is_rejected() {
        let err = Valve::new(ValveConfig::gate("g").with_position(40)).unwrap_err();
        assert!(matches!(err, ComponentError::PartialGatePosition { .. }));
    }

    #[test]
    fn closed_valve_outlet_is_zero() {
        let mut v = line_gate();
        v.open().unwrap();
        v.close();
        assert_eq!(v.get_outlet_pressure(50.0).unwrap(), 0.0);
        assert_eq!(v.flow_out(), 0.0);
        assert_eq!(v.delta_p(), 0.0);
        assert_eq!(v.press_in(), 50.0);
    }

    #[test]
    fn get_outlet_pressure_uses_current_flow() {
        let mut v = line_gate();
        v.open().unwrap();
        let out = v.get_outlet_pressure(10.0).unwrap();
        assert!(nearly_equal(out, 10.0 - 2.5484942494744516, tol()));
    }

    #[test]
    fn globe_throttles_flow() {
        let mut v = Valve::new(
            ValveConfig::globe("throttle1")
                .with_cv(21.0)
                .with_position(100)
                .with_inlet(16.0, 50.0),
        )
        .unwrap();
        assert!(nearly_equal(v.press_out(), 10.331065759637188, tol()));

        v.turn_handle(50).unwrap();
        assert_eq!(v.state(), ValveState::Throttled(50));
        assert_eq!(v.flow_out(), 25.0);
        assert!(nearly_equal(v.delta_p(), 1.417233560090703, tol()));
        assert!(nearly_equal(v.press_out(), 14.582766439909298, tol()));

        assert!(matches!(
            v.turn_handle(150),
            Err(ComponentError::InvalidPosition { position: 150 })
        ));
        assert_eq!(v.position(), 50);
    }

    #[test]
    fn open_is_idempotent() {
        let mut v = line_gate();
        v.open().unwrap();
        let once = (v.position(), v.flow_out(), v.delta_p(), v.press_out());
        v.open().unwrap();
        assert_eq!(once, (v.position(), v.flow_out(), v.delta_p(), v.press_out()));
    }

    #[test]
    fn relief_hysteresis_boundaries() {
        let mut v = Valve::new(ValveConfig::relief("relief1", 60.0, 55.0)).unwrap();
        assert_eq!(v.evaluate(57.0).unwrap(), ValveState::Closed);
        assert_eq!(v.evaluate(60.0).unwrap(), ValveState::Open);
        assert_eq!(v.evaluate(57.0).unwrap(), ValveState::Open);
        assert_eq!(v.evaluate(55.0).unwrap(), ValveState::Closed);
        assert!(v.turn_handle(100).is_err());
    }

    #[test]
    fn relief_setpoint_setters() {
        let mut v = Valve::new(ValveConfig::relief("r", 0.0, 0.0)).unwrap();
        v.set_open_pressure(120.0).unwrap();
        v.set_blowdown(100.0).unwrap();
        assert_eq!(
            v.kind(),
            ValveKind::Relief {
                setpoint_open: 120.0,
                setpoint_close: 100.0
            }
        );
        assert!(line_gate().set_blowdown(1.0).is_err());
    }

    #[test]
    fn zero_cv_is_domain_error() {
        let err = Valve::new(ValveConfig::gate("g").with_cv(0.0)).unwrap_err();
        assert_eq!(err.class(), pf_core::ErrorClass::Domain);

        let mut v = line_gate();
        assert!(v.calc_coefficient(0.0).is_err());
        assert_eq!(v.cv(), 200.0);
        assert_eq!(v.calc_coefficient(2.0).unwrap(), 60.0);
    }

    #[test]
    fn update_inlet_recomputes_from_position() {
        let mut v = line_gate();
        v.update_inlet(20.0, 100.0).unwrap();
        assert_eq!(v.flow_out(), 0.0);
        assert_eq!(v.flow_in(), 100.0);
        v.open().unwrap();
        assert!(nearly_equal(v.press_out(), 20.0 - 0.25, tol()));
    }
}
