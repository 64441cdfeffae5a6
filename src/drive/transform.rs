/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of reduction-drive.
 *
 * reduction-drive is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * reduction-drive is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with reduction-drive. If not, see <https://www.gnu.org/licenses/>.
 */

use crate::curve::TorqueCurve;
use crate::error::{Error, Result};
use crate::part::{WheelDamage, WheelMotor};

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMotor {
    pub torque_curve: TorqueCurve,
    pub max_torque: f64,
    pub wheel_speed_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedTolerances {
    pub impact_tolerance: f64,
    pub stress_tolerance: f64,
    pub mass_delta: f64,
}

/// Remap the reference torque curve under a reduction ratio and geometric
/// scale ratio. Reduction compresses the speed axis and multiplies the
/// torque axis, preserving the curve's shape. The max torque scan runs over
/// the reference control points, not the transformed ones.
pub fn derive_torque_curve(reference: &WheelMotor,
                           reduction_ratio: f64,
                           scale_ratio: f64) -> Result<DerivedMotor> {
    if reduction_ratio == 0.0 {
        return Err(Error::InvalidParameter(
            String::from("reduction_ratio"),
            String::from("a zero ratio cannot remap the speed axis")));
    }

    let mut max_reference_torque = 0.0;
    let mut points = Vec::with_capacity(reference.torque_curve.num_points());
    for (time, value) in reference.torque_curve.points() {
        points.push((time / reduction_ratio, value * scale_ratio * reduction_ratio));
        max_reference_torque = if *value > max_reference_torque { *value } else { max_reference_torque };
    }

    Ok(DerivedMotor {
        torque_curve: TorqueCurve::new(points),
        max_torque: max_reference_torque * scale_ratio * reduction_ratio,
        wheel_speed_max: reference.wheel_speed_max * scale_ratio / reduction_ratio,
    })
}

/// Scale the structural limits off the reference snapshot. The mass delta is
/// incremental against the live current mass, not the snapshot mass.
pub fn derive_tolerances(reference: &WheelDamage,
                         current_mass: f64,
                         endurance_mass_modifier: f64,
                         scale_ratio: f64) -> DerivedTolerances {
    DerivedTolerances {
        impact_tolerance: reference.impact_tolerance * scale_ratio * endurance_mass_modifier,
        stress_tolerance: reference.stress_tolerance * scale_ratio * endurance_mass_modifier,
        mass_delta: current_mass * (endurance_mass_modifier - 1.0),
    }
}

#[cfg(test)]
mod tests {
    use crate::curve::TorqueCurve;
    use crate::drive::transform::{derive_tolerances, derive_torque_curve};
    use crate::error::Error;
    use crate::part::{WheelDamage, WheelMotor};

    fn reference_motor() -> WheelMotor {
        WheelMotor {
            torque_curve: TorqueCurve::new(vec![(0.0, 100.0), (1.0, 50.0)]),
            max_torque: 100.0,
            wheel_speed_max: 10.0,
        }
    }

    fn reference_damage() -> WheelDamage {
        WheelDamage { impact_tolerance: 50.0, stress_tolerance: 40.0 }
    }

    #[test]
    fn reduction_compresses_speed_and_multiplies_torque() {
        let derived = derive_torque_curve(&reference_motor(), 2.0, 1.0).unwrap();
        assert_eq!(derived.torque_curve.points(), &[(0.0, 200.0), (0.5, 100.0)]);
        assert_eq!(derived.max_torque, 200.0);
        assert_eq!(derived.wheel_speed_max, 5.0);
    }

    #[test]
    fn derived_curve_keeps_point_count_and_shape() {
        let reference = WheelMotor {
            torque_curve: TorqueCurve::new(vec![(0.0, 60.0), (0.25, 80.0), (0.5, 70.0), (1.0, 20.0)]),
            max_torque: 80.0,
            wheel_speed_max: 12.0,
        };
        let ratio = 0.5;
        let scale = 2.0;
        let derived = derive_torque_curve(&reference, ratio, scale).unwrap();
        assert_eq!(derived.torque_curve.num_points(), reference.torque_curve.num_points());
        for ((time, value), (ref_time, ref_value)) in
            derived.torque_curve.points().iter().zip(reference.torque_curve.points()) {
            assert_eq!(*time, ref_time / ratio);
            assert_eq!(*value, ref_value * scale * ratio);
        }
    }

    #[test]
    fn max_torque_comes_from_the_reference_curve_scan() {
        // The reference module's own max_torque field plays no part.
        let mut reference = reference_motor();
        reference.max_torque = 999.0;
        let derived = derive_torque_curve(&reference, 2.0, 1.0).unwrap();
        assert_eq!(derived.max_torque, 200.0);
    }

    #[test]
    fn neutral_parameters_reproduce_the_reference() {
        let reference = reference_motor();
        let derived = derive_torque_curve(&reference, 1.0, 1.0).unwrap();
        assert_eq!(derived.torque_curve, reference.torque_curve);
        assert_eq!(derived.max_torque, 100.0);
        assert_eq!(derived.wheel_speed_max, reference.wheel_speed_max);
    }

    #[test]
    fn geometric_scale_multiplies_torque_and_speed() {
        let derived = derive_torque_curve(&reference_motor(), 1.0, 8.0).unwrap();
        assert_eq!(derived.torque_curve.points(), &[(0.0, 800.0), (1.0, 400.0)]);
        assert_eq!(derived.max_torque, 800.0);
        assert_eq!(derived.wheel_speed_max, 80.0);
    }

    #[test]
    fn zero_reduction_ratio_is_rejected() {
        let result = derive_torque_curve(&reference_motor(), 0.0, 1.0);
        assert!(matches!(result, Err(Error::InvalidParameter(_, _))));
    }

    #[test]
    fn out_of_precondition_inputs_do_not_crash() {
        // Non-positive values are undefined but must not panic.
        let negative = derive_torque_curve(&reference_motor(), -2.0, 1.0).unwrap();
        assert_eq!(negative.torque_curve.num_points(), 2);
        let negative_scale = derive_torque_curve(&reference_motor(), 1.0, -1.0).unwrap();
        assert_eq!(negative_scale.torque_curve.num_points(), 2);
    }

    #[test]
    fn degenerate_reference_curves_transform_cleanly() {
        let empty = WheelMotor {
            torque_curve: TorqueCurve::empty(),
            max_torque: 0.0,
            wheel_speed_max: 10.0,
        };
        let derived = derive_torque_curve(&empty, 2.0, 1.0).unwrap();
        assert_eq!(derived.torque_curve.num_points(), 0);
        assert_eq!(derived.max_torque, 0.0);

        let single = WheelMotor {
            torque_curve: TorqueCurve::new(vec![(0.0, 30.0)]),
            max_torque: 30.0,
            wheel_speed_max: 10.0,
        };
        let derived = derive_torque_curve(&single, 2.0, 1.0).unwrap();
        assert_eq!(derived.torque_curve.points(), &[(0.0, 60.0)]);
    }

    #[test]
    fn tolerances_scale_off_the_reference_snapshot() {
        let derived = derive_tolerances(&reference_damage(), 50.0, 1.5, 1.0);
        assert_eq!(derived.impact_tolerance, 75.0);
        assert_eq!(derived.stress_tolerance, 60.0);
        assert_eq!(derived.mass_delta, 25.0);
    }

    #[test]
    fn mass_delta_uses_live_mass_not_reference_mass() {
        // The part has been rescaled since the snapshot; tolerances restart
        // from the reference values, the mass delta tracks the live mass.
        let derived = derive_tolerances(&reference_damage(), 80.0, 1.5, 8.0);
        assert_eq!(derived.impact_tolerance, 50.0 * 8.0 * 1.5);
        assert_eq!(derived.stress_tolerance, 40.0 * 8.0 * 1.5);
        assert_eq!(derived.mass_delta, 40.0);
    }

    #[test]
    fn neutral_endurance_has_no_mass_delta() {
        let derived = derive_tolerances(&reference_damage(), 50.0, 1.0, 1.0);
        assert_eq!(derived.impact_tolerance, 50.0);
        assert_eq!(derived.stress_tolerance, 40.0);
        assert_eq!(derived.mass_delta, 0.0);
    }
}
