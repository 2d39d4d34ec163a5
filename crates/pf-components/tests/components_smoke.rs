//! Integration tests for pf-components.

use pf_components::{
    ComponentError, FlowElement, OutletPressure, Pump, PumpConfig, Tank, TankConfig, Valve,
    ValveConfig, ValveState,
};
use pf_core::numeric::{Tolerances, nearly_equal};
use proptest::prelude::*;

#[test]
fn tank_feeds_gate_by_hand() {
    let tank = Tank::new(TankConfig {
        level: 36.0,
        density: 1.629869,
        spec_grav: 0.84,
        outlet_diameter: 16.0,
        outlet_slope: 0.25,
        ..TankConfig::new("Tank 1")
    })
    .unwrap();

    let mut gate = Valve::new(ValveConfig::gate("Gate 1").with_cv(1.0e9).with_position(100)).unwrap();
    gate.update_inlet(tank.outlet_pressure(), tank.outlet_flow())
        .unwrap();

    let tol = Tolerances {
        abs: 1e-6,
        rel: 1e-9,
    };
    assert!(nearly_equal(gate.flow_out(), 19542.86939891452, tol));
    assert!(nearly_equal(gate.press_out(), 13.109851301499999, tol));
}

#[test]
fn every_valve_kind_closes_to_zero() {
    let configs = [
        ValveConfig::gate("g"),
        ValveConfig::globe("gl"),
        ValveConfig::relief("r", 10.0, 5.0),
    ];
    for cfg in configs {
        let mut v = Valve::new(cfg.with_position(100).with_inlet(30.0, 60.0)).unwrap();
        assert!(v.flow_out() > 0.0);
        v.close();
        v.get_outlet_pressure(30.0).unwrap();
        assert_eq!(v.state(), ValveState::Closed);
        assert_eq!(v.flow_out(), 0.0);
        assert_eq!(v.press_out(), 0.0);
        assert_eq!(v.delta_p(), 0.0);
    }
}

#[test]
fn relief_reacts_on_inlet_update() {
    let mut relief = Valve::new(ValveConfig::relief("relief1", 60.0, 55.0)).unwrap();
    relief.update_inlet(30.0, 28.8).unwrap();
    assert!(!relief.is_passing());
    relief.update_inlet(61.0, 28.8).unwrap();
    assert!(relief.is_passing());
    assert_eq!(relief.flow_out(), 28.8);
    // inside the dead band, stays open
    relief.update_inlet(57.0, 28.8).unwrap();
    assert!(relief.is_passing());
    relief.update_inlet(50.0, 28.8).unwrap();
    assert_eq!(relief.state(), ValveState::Closed);
}

#[test]
fn pump_rejects_non_numeric_inlet() {
    let mut pump = Pump::new(PumpConfig::centrifugal("p")).unwrap();
    pump.start_pump(1750, 50.0, OutletPressure::Psi(16.0))
        .unwrap();
    let power = pump.power();
    let err = pump.update_inlet(f64::NAN, 0.0).unwrap_err();
    assert!(matches!(err, ComponentError::NonNumeric { .. }));
    assert_eq!(pump.power(), power);
}

proptest! {
    #[test]
    fn non_positive_level_zeroes_tank(start in 0.1_f64..100.0, level in -1.0e6_f64..=0.0) {
        let mut tank = Tank::new(TankConfig {
            level: start,
            outlet_slope: 0.5,
            ..TankConfig::new("t")
        })
        .unwrap();
        prop_assert!(tank.static_pressure() > 0.0);

        tank.set_level(level).unwrap();
        prop_assert_eq!(tank.level(), 0.0);
        prop_assert_eq!(tank.static_pressure(), 0.0);
        prop_assert_eq!(tank.outlet_flow(), 0.0);
    }

    #[test]
    fn double_open_matches_single(pos in 0_u8..=100, p in 0.0_f64..500.0, q in 0.0_f64..5000.0) {
        let cfg = ValveConfig::globe("v").with_position(pos).with_inlet(p, q);
        let mut once = Valve::new(cfg.clone()).unwrap();
        let mut twice = Valve::new(cfg).unwrap();
        once.open().unwrap();
        twice.open().unwrap();
        twice.open().unwrap();
        prop_assert_eq!(once.flow_out(), twice.flow_out());
        prop_assert_eq!(once.press_out(), twice.press_out());
        prop_assert_eq!(once.delta_p(), twice.delta_p());
    }
}
