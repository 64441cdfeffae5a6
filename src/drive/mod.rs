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

pub mod params;
pub mod scale;
pub mod transform;

use itertools::Itertools;
use tracing::{debug, info};
use utils::numeric::format_ratio;

use crate::error::{Error, Result};
use crate::events::EditorModifiedListener;
use crate::part::ReferenceProfile;
use crate::traits::WheelPart;
use self::params::{PersistedFields, TunableParameters};
use self::scale::geometric_scale_ratio;
use self::transform::{derive_tolerances, derive_torque_curve, DerivedMotor, DerivedTolerances};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunContext {
    Editor,
    Flight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    Uninitialized,
    Ready,
}

/// Situation the host is staging for when it queries the mass contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingContext {
    Current,
    Staged,
    Unstaged,
}

/// Mass changes are recognised at a fixed simulation tick boundary, not
/// continuously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassChangeWhen {
    Fixed,
    Constantly,
}

/// Synchronization controller for one part instance. Reconciles the editor
/// mirror against the authoritative tunables on each notification and
/// rewrites the live motor/damage sub-modules from the reference snapshot.
pub struct ReductionDrive {
    reference: ReferenceProfile,
    params: TunableParameters,
    state: DriveState,
}

impl ReductionDrive {
    pub fn new(reference: ReferenceProfile) -> ReductionDrive {
        ReductionDrive {
            reference,
            params: TunableParameters::default(),
            state: DriveState::Uninitialized,
        }
    }

    pub fn state(&self) -> DriveState {
        self.state
    }

    pub fn params(&self) -> &TunableParameters {
        &self.params
    }

    pub fn reference(&self) -> &ReferenceProfile {
        &self.reference
    }

    pub fn set_gui_reduction_ratio(&mut self, value: f64) {
        self.params.gui_reduction_ratio = value;
    }

    pub fn set_gui_endurance_mass_modifier(&mut self, value: f64) {
        self.params.gui_endurance_mass_modifier = value;
    }

    pub fn on_start(&mut self, part: &mut dyn WheelPart) -> Result<()> {
        self.params.gui_reduction_ratio = self.params.reduction_ratio;
        self.params.gui_endurance_mass_modifier = self.params.endurance_mass_modifier;
        self.setup_reductor(part)?;
        self.setup_endurance(part)?;
        self.state = DriveState::Ready;
        Ok(())
    }

    /// Persistence hook, called once the authoritative fields have been
    /// restored. Outside the editor the values are accepted but recomputation
    /// waits for the next trigger.
    pub fn on_load(&mut self,
                   fields: &PersistedFields,
                   context: RunContext,
                   part: &mut dyn WheelPart) -> Result<()> {
        self.params.restore(fields);
        if context == RunContext::Editor {
            self.params.gui_reduction_ratio = self.params.reduction_ratio;
            self.params.gui_endurance_mass_modifier = self.params.endurance_mass_modifier;
            self.setup_reductor(part)?;
            self.setup_endurance(part)?;
            self.state = DriveState::Ready;
        }
        Ok(())
    }

    /// Activation hook. Always re-derives, whether or not a tunable changed.
    pub fn on_activate(&mut self, part: &mut dyn WheelPart) -> Result<()> {
        self.setup_reductor(part)?;
        self.setup_endurance(part)?;
        self.state = DriveState::Ready;
        Ok(())
    }

    /// Editor modification notification. This is the commit point for slider
    /// edits: the endurance commit precedes its own comparison, so the
    /// tolerance transform is only ever refreshed via load or activation.
    pub fn on_editor_modified(&mut self, part: &mut dyn WheelPart) -> Result<()> {
        self.params.endurance_mass_modifier = self.params.gui_endurance_mass_modifier;
        if self.params.reduction_ratio != self.params.gui_reduction_ratio {
            self.params.reduction_ratio = self.params.gui_reduction_ratio;
            self.setup_reductor(part)?;
        }
        if self.params.endurance_mass_modifier != self.params.gui_endurance_mass_modifier {
            self.params.reduction_ratio = self.params.gui_reduction_ratio;
            self.setup_endurance(part)?;
        }
        Ok(())
    }

    /// Overwrite the live motor sub-module with the derived curve, max torque
    /// and max speed. Skips silently when the snapshot has no motor data.
    pub fn setup_reductor(&mut self, part: &mut dyn WheelPart) -> Result<()> {
        debug!("Reductor setup called");
        let reference_motor = match &self.reference.motor {
            None => return Ok(()),
            Some(motor) => motor,
        };
        self.params.gui_reduction_ratio = self.params.reduction_ratio;
        let scale_ratio = geometric_scale_ratio(part.scale_provider());

        for (time, value) in reference_motor.torque_curve.points() {
            debug!("Reference curve: {} -> {}", time, value);
        }
        let derived = derive_torque_curve(reference_motor,
                                          self.params.reduction_ratio,
                                          scale_ratio)?;
        for (time, value) in derived.torque_curve.points() {
            debug!("Derived curve: {} -> {}", time, value);
        }

        let motor = match part.mut_motor() {
            None => return Ok(()),
            Some(motor) => motor,
        };
        motor.torque_curve = derived.torque_curve;
        motor.wheel_speed_max = derived.wheel_speed_max;
        motor.max_torque = derived.max_torque;
        info!("Derived motor parameters; max torque={}, max speed={}",
              motor.max_torque, motor.wheel_speed_max);
        Ok(())
    }

    /// Overwrite the live damage sub-module with the derived tolerances.
    /// Skips silently when the snapshot has no damage data.
    pub fn setup_endurance(&mut self, part: &mut dyn WheelPart) -> Result<()> {
        debug!("Endurance setup called");
        let reference_damage = match &self.reference.damage {
            None => return Ok(()),
            Some(damage) => damage,
        };
        self.params.gui_endurance_mass_modifier = self.params.endurance_mass_modifier;
        let scale_ratio = geometric_scale_ratio(part.scale_provider());

        let derived = derive_tolerances(reference_damage,
                                        part.mass(),
                                        self.params.endurance_mass_modifier,
                                        scale_ratio);
        let damage = match part.mut_damage() {
            None => return Ok(()),
            Some(damage) => damage,
        };
        damage.impact_tolerance = derived.impact_tolerance;
        damage.stress_tolerance = derived.stress_tolerance;
        info!("Derived endurance parameters; impact={}, stress={}, mass delta={}",
              derived.impact_tolerance, derived.stress_tolerance, derived.mass_delta);
        Ok(())
    }

    /// Mass contribution the host adds on top of the part's default mass.
    pub fn module_mass_delta(&self, default_mass: f64, _situation: StagingContext) -> f64 {
        default_mass * (self.params.endurance_mass_modifier - 1.0)
    }

    pub fn mass_change_when(&self) -> MassChangeWhen {
        MassChangeWhen::Fixed
    }

    /// Read-only derivation for display tooling. Unlike the setup paths this
    /// reports a missing reference sub-module, since the caller asked for it.
    pub fn preview_motor(&self, part: &dyn WheelPart) -> Result<DerivedMotor> {
        let reference_motor = self.reference.motor.as_ref().ok_or_else(|| {
            Error::MissingReferenceData(String::from("motor torque curve"))
        })?;
        let scale_ratio = geometric_scale_ratio(part.scale_provider());
        derive_torque_curve(reference_motor, self.params.reduction_ratio, scale_ratio)
    }

    pub fn preview_tolerances(&self, part: &dyn WheelPart) -> Result<DerivedTolerances> {
        let reference_damage = self.reference.damage.as_ref().ok_or_else(|| {
            Error::MissingReferenceData(String::from("damage tolerances"))
        })?;
        let scale_ratio = geometric_scale_ratio(part.scale_provider());
        Ok(derive_tolerances(reference_damage,
                             part.mass(),
                             self.params.endurance_mass_modifier,
                             scale_ratio))
    }

    /// Debug dump of the live derived state.
    pub fn log_state(&self, part: &dyn WheelPart) {
        if let Some(motor) = part.motor() {
            let curve = motor.torque_curve.points().iter()
                .map(|(time, value)| format!("{} -> {}", time, value))
                .join(", ");
            debug!("Live curve: {}", curve);
            debug!("Max speed: {}, max torque: {}", motor.wheel_speed_max, motor.max_torque);
        }
        debug!("gui ratio={}, ratio={}, gui endurance={}, endurance={}",
               format_ratio(self.params.gui_reduction_ratio),
               format_ratio(self.params.reduction_ratio),
               format_ratio(self.params.gui_endurance_mass_modifier),
               format_ratio(self.params.endurance_mass_modifier));
    }
}

impl EditorModifiedListener for ReductionDrive {
    fn on_editor_modified(&mut self, part: &mut dyn WheelPart) -> Result<()> {
        ReductionDrive::on_editor_modified(self, part)
    }
}
