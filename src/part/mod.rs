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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::TorqueCurve;
use crate::error::{Error, Result};
use crate::traits::{ScaleProvider, WheelPart};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelMotor {
    pub torque_curve: TorqueCurve,
    pub max_torque: f64,
    pub wheel_speed_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelDamage {
    pub impact_tolerance: f64,
    pub stress_tolerance: f64,
}

/// Read-once snapshot of the unscaled part definition. Never mutated after
/// it has been taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceProfile {
    pub motor: Option<WheelMotor>,
    pub damage: Option<WheelDamage>,
    pub base_mass: f64,
}

impl ReferenceProfile {
    pub fn snapshot_of(part: &dyn WheelPart) -> ReferenceProfile {
        ReferenceProfile {
            motor: part.motor().cloned(),
            damage: part.damage().cloned(),
            base_mass: part.mass(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<ReferenceProfile> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::FailedToLoad(path.display().to_string(), e.to_string())
        })
    }
}

/// Part instance that owns its sub-modules rather than living inside a host.
#[derive(Debug, Clone, Default)]
pub struct StandalonePart {
    pub motor: Option<WheelMotor>,
    pub damage: Option<WheelDamage>,
    pub mass: f64,
    pub scale: Option<FixedScale>,
}

impl StandalonePart {
    pub fn from_profile(profile: &ReferenceProfile) -> StandalonePart {
        StandalonePart {
            motor: profile.motor.clone(),
            damage: profile.damage.clone(),
            mass: profile.base_mass,
            scale: None,
        }
    }
}

impl WheelPart for StandalonePart {
    fn motor(&self) -> Option<&WheelMotor> {
        self.motor.as_ref()
    }
    fn mut_motor(&mut self) -> Option<&mut WheelMotor> {
        self.motor.as_mut()
    }
    fn damage(&self) -> Option<&WheelDamage> {
        self.damage.as_ref()
    }
    fn mut_damage(&mut self) -> Option<&mut WheelDamage> {
        self.damage.as_mut()
    }
    fn scale_provider(&self) -> Option<&dyn ScaleProvider> {
        self.scale.as_ref().map(|s| s as &dyn ScaleProvider)
    }
    fn mass(&self) -> f64 {
        self.mass
    }
}

/// Scale data held as plain fields, standing in for the host's rescale module.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedScale {
    pub current_scale: Option<f64>,
    pub default_scale: Option<f64>,
}

impl FixedScale {
    pub fn uniform(current: f64, default: f64) -> FixedScale {
        FixedScale {
            current_scale: Some(current),
            default_scale: Some(default),
        }
    }
}

impl ScaleProvider for FixedScale {
    fn current_scale(&self) -> Option<f64> {
        self.current_scale
    }
    fn default_scale(&self) -> Option<f64> {
        self.default_scale
    }
}
