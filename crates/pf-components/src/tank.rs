//! Storage tank with a gravity-drain outlet.

use pf_core::formulas::{
    DEFAULT_ROUGHNESS, WATER_DENSITY, WATER_SPEC_GRAV, gravity_flow_rate, static_pressure,
};

use crate::common::check_finite;
use crate::error::ComponentResult;
use crate::traits::FlowElement;

/// Construction parameters for a [`Tank`].
#[derive(Debug, Clone, PartialEq)]
pub struct TankConfig {
    pub name: String,
    /// Fluid level (ft).
    pub level: f64,
    /// Fluid density (slug/ft³).
    pub density: f64,
    pub spec_grav: f64,
    /// Outlet pipe diameter (in).
    pub outlet_diameter: f64,
    /// Outlet pipe slope (ft/ft).
    pub outlet_slope: f64,
    /// Hazen-Williams roughness coefficient of the outlet pipe.
    pub roughness: f64,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: 0.0,
            density: WATER_DENSITY,
            spec_grav: WATER_SPEC_GRAV,
            outlet_diameter: 2.0,
            outlet_slope: 0.0,
            roughness: DEFAULT_ROUGHNESS,
        }
    }
}

impl TankConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Tank whose outlet pressure and flow follow from its fluid level.
#[derive(Debug, Clone)]
pub struct Tank {
    name: String,
    level: f64,
    density: f64,
    spec_grav: f64,
    outlet_diameter: f64,
    outlet_slope: f64,
    roughness: f64,
    press: f64,
    flow: f64,
}

impl Tank {
    /// Create a tank and run the level setter once.
    pub fn new(config: TankConfig) -> ComponentResult<Self> {
        check_finite(config.density, "fluid density")?;
        check_finite(config.spec_grav, "specific gravity")?;

        let mut tank = Self {
            name: config.name,
            level: 0.0,
            density: config.density,
            spec_grav: config.spec_grav,
            outlet_diameter: config.outlet_diameter,
            outlet_slope: config.outlet_slope,
            roughness: config.roughness,
            press: 0.0,
            flow: 0.0,
        };
        tank.set_level(config.level)?;
        Ok(tank)
    }

    /// Set the fluid level (ft) and recompute pressure and outlet flow.
    ///
    /// A level at or below zero is stored as 0.0 and forces both derived
    /// values to zero. A non-finite level is rejected without touching state.
    pub fn set_level(&mut self, level: f64) -> ComponentResult<()> {
        check_finite(level, "tank level")?;
        let level = if level <= 0.0 { 0.0 } else { level };
        let (press, flow) = self.derive(level, self.outlet_diameter, self.outlet_slope, self.roughness)?;
        self.level = level;
        self.press = press;
        self.flow = flow;
        Ok(())
    }

    /// Reconfigure the outlet pipe and recompute outlet flow.
    pub fn set_outlet_pipe(
        &mut self,
        diameter: f64,
        slope: f64,
        roughness: f64,
    ) -> ComponentResult<()> {
        let (press, flow) = self.derive(self.level, diameter, slope, roughness)?;
        self.outlet_diameter = diameter;
        self.outlet_slope = slope;
        self.roughness = roughness;
        self.press = press;
        self.flow = flow;
        Ok(())
    }

    fn derive(
        &self,
        level: f64,
        diameter: f64,
        slope: f64,
        roughness: f64,
    ) -> ComponentResult<(f64, f64)> {
        if level == 0.0 {
            // Still validate the pipe so bad parameters never get stored.
            check_finite(diameter, "pipe diameter")?;
            check_finite(slope, "pipe slope")?;
            check_finite(roughness, "roughness coefficient")?;
            return Ok((0.0, 0.0));
        }
        let press = static_pressure(level, self.density)?;
        let flow = gravity_flow_rate(diameter, slope, roughness)?;
        Ok((press, flow))
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Hydrostatic pressure at the tank bottom (psi).
    pub fn static_pressure(&self) -> f64 {
        self.press
    }

    /// Gravity-drain outlet flow (gpm).
    pub fn outlet_flow(&self) -> f64 {
        self.flow
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn spec_grav(&self) -> f64 {
        self.spec_grav
    }

    /// Outlet pipe as (diameter in, slope, roughness).
    pub fn outlet_pipe(&self) -> (f64, f64, f64) {
        (self.outlet_diameter, self.outlet_slope, self.roughness)
    }
}

impl FlowElement for Tank {
    fn name(&self) -> &str {
        &self.name
    }

    fn outlet_pressure(&self) -> f64 {
        self.press
    }

    fn outlet_flow(&self) -> f64 {
        self.flow
    }

    fn is_passing(&self) -> bool {
        self.level > 0.0
    }

    /// Any fluid column holds pressure on the outlet, even with a flat
    /// drain line.
    fn is_delivering(&self) -> bool {
        self.is_passing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComponentError;
    use pf_core::numeric::{Tolerances, nearly_equal};

    fn fuel_tank(level: f64) -> Tank {
        Tank::new(TankConfig {
            name: "Tank 1".into(),
            level,
            density: 1.629869,
            spec_grav: 0.84,
            outlet_diameter: 16.0,
            outlet_slope: 0.25,
            roughness: 140.0,
        })
        .unwrap()
    }

    #[test]
    fn fuel_farm_tank_values() {
        let tank = fuel_tank(36.0);
        let tol = Tolerances::default();
        assert!(nearly_equal(tank.static_pressure(), 13.109851301499999, tol));
        assert!(nearly_equal(tank.outlet_flow(), 19542.86939891452, tol));
        assert!(tank.is_passing());
    }

    #[test]
    fn lowering_level_recomputes_pressure() {
        let mut tank = fuel_tank(36.0);
        tank.set_level(18.0).unwrap();
        assert!(nearly_equal(
            tank.static_pressure(),
            6.5549256507499996,
            Tolerances::default()
        ));
        assert!(nearly_equal(
            tank.outlet_flow(),
            19542.86939891452,
            Tolerances::default()
        ));
    }

    #[test]
    fn empty_tank_has_no_outputs() {
        let mut tank = fuel_tank(36.0);
        tank.set_level(-4.0).unwrap();
        assert_eq!(tank.level(), 0.0);
        assert_eq!(tank.static_pressure(), 0.0);
        assert_eq!(tank.outlet_flow(), 0.0);
        assert!(!tank.is_passing());
    }

    #[test]
    fn nan_level_leaves_state_alone() {
        let mut tank = fuel_tank(36.0);
        let err = tank.set_level(f64::NAN).unwrap_err();
        assert!(matches!(err, ComponentError::NonNumeric { .. }));
        assert_eq!(tank.level(), 36.0);
        assert!(tank.static_pressure() > 13.0);
    }

    #[test]
    fn default_tank_is_water_and_empty() {
        let tank = Tank::new(TankConfig::new("t")).unwrap();
        assert_eq!(tank.density(), WATER_DENSITY);
        assert_eq!(tank.outlet_pipe(), (2.0, 0.0, DEFAULT_ROUGHNESS));
        assert_eq!(tank.outlet_flow(), 0.0);
    }

    #[test]
    fn outlet_pipe_reconfiguration() {
        let mut tank = Tank::new(TankConfig {
            level: 10.0,
            ..TankConfig::new("t")
        })
        .unwrap();
        assert_eq!(tank.outlet_flow(), 0.0);
        tank.set_outlet_pipe(2.0, 1.67, 140.0).unwrap();
        assert!(nearly_equal(
            tank.outlet_flow(),
            319.28008077388426,
            Tolerances::default()
        ));
        assert!(tank.update_inlet(1.0, 1.0).is_err());
    }
}
