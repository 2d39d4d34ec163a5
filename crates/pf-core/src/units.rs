// pf-core/src/units.rs
//
// The engine computes in the imperial units the plant is instrumented in
// (psi, ft, gpm, kW). These helpers lift raw values into uom quantities so
// consumers that store metric data can convert without hand-written factors.

use uom::si::f64::{
    Length as UomLength, Power as UomPower, Pressure as UomPressure,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI storage, f64)
pub type Length = UomLength;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn gpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::gallon_per_minute;
    VolumeRate::new::<gallon_per_minute>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn to_pa(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn to_m(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

#[inline]
pub fn to_m3ps(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::cubic_meter_per_second;
    q.get::<cubic_meter_per_second>()
}

#[inline]
pub fn to_w(p: Power) -> f64 {
    use uom::si::power::watt;
    p.get::<watt>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psi_to_pa() {
        let pa = to_pa(psi(1.0));
        assert!((pa - 6_894.757).abs() < 1e-2);
    }

    #[test]
    fn feet_and_gallons() {
        assert!((to_m(ft(1.0)) - 0.3048).abs() < 1e-12);
        // 1 US gpm = 6.309e-5 m^3/s
        assert!((to_m3ps(gpm(1.0)) - 6.309_02e-5).abs() < 1e-8);
        assert!((to_w(kw(1.5)) - 1_500.0).abs() < 1e-9);
    }
}
