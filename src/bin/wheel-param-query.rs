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

use std::path::PathBuf;

use reduction_drive::drive::params::PersistedFields;
use reduction_drive::drive::{ReductionDrive, RunContext, StagingContext};
use reduction_drive::part::{FixedScale, ReferenceProfile, StandalonePart};
use utils::numeric::format_ratio;

const USAGE: &str = "Usage: wheel-param-query <profile.json> [params.json] [current_scale default_scale]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt().compact().finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to init logging. {}", e.to_string());
    }

    let mut args = std::env::args().skip(1);
    let profile_path = PathBuf::from(args.next().ok_or(USAGE)?);
    let profile = ReferenceProfile::load_from_path(&profile_path)?;

    let fields = match args.next() {
        Some(params_path) => {
            let bytes = std::fs::read(PathBuf::from(params_path))?;
            PersistedFields::from_json_bytes(&bytes)?
        }
        None => PersistedFields::default(),
    };

    let mut part = StandalonePart::from_profile(&profile);
    if let (Some(current), Some(default)) = (args.next(), args.next()) {
        part.scale = Some(FixedScale::uniform(current.parse()?, default.parse()?));
    }

    let mut drive = ReductionDrive::new(profile);
    drive.on_load(&fields, RunContext::Editor, &mut part)?;
    drive.log_state(&part);

    println!("reduction ratio: {}", format_ratio(drive.params().reduction_ratio));
    println!("endurance/mass:  {}", format_ratio(drive.params().endurance_mass_modifier));
    match part.motor.as_ref() {
        Some(motor) => {
            println!("max torque: {}", motor.max_torque);
            println!("max speed:  {}", motor.wheel_speed_max);
            println!("torque curve:");
            for (time, value) in motor.torque_curve.points() {
                println!("  {} -> {}", time, value);
            }
        }
        None => println!("no motor data in profile"),
    }
    match part.damage.as_ref() {
        Some(damage) => {
            println!("impact tolerance: {}", damage.impact_tolerance);
            println!("stress tolerance: {}", damage.stress_tolerance);
        }
        None => println!("no damage data in profile"),
    }
    println!("mass delta: {}", drive.module_mass_delta(part.mass, StagingContext::Current));
    Ok(())
}
