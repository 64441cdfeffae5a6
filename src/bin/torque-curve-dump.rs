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

use reduction_drive::drive::transform::derive_torque_curve;
use reduction_drive::part::ReferenceProfile;
use utils::numeric::format_ratio;

const RATIO_SWEEP: [f64; 6] = [0.3, 0.5, 1.0, 1.5, 2.0, 3.0];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt().compact().finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to init logging. {}", e.to_string());
    }

    let mut args = std::env::args().skip(1);
    let profile_path = PathBuf::from(
        args.next().ok_or("Usage: torque-curve-dump <profile.json> [out_dir]")?);
    let out_dir = args.next().map(PathBuf::from);

    let profile = ReferenceProfile::load_from_path(&profile_path)?;
    let reference_motor = profile.motor.ok_or("no motor data in profile")?;

    println!("ratio\tmax torque\tmax speed");
    for ratio in RATIO_SWEEP {
        let derived = derive_torque_curve(&reference_motor, ratio, 1.0)?;
        println!("{}\t{}\t{}", format_ratio(ratio), derived.max_torque, derived.wheel_speed_max);
        if let Some(dir) = &out_dir {
            let lut_path = dir.join(format!("torque_{}.lut", format_ratio(ratio)));
            derived.torque_curve.write_lut_to_path(&lut_path)?;
            println!("wrote {}", lut_path.display());
        }
    }
    Ok(())
}
