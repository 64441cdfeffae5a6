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

use crate::part::{WheelDamage, WheelMotor};

/// Live part instance as exposed by the host. A part may carry either,
/// both or neither of the motor and damage sub-modules.
pub trait WheelPart {
    fn motor(&self) -> Option<&WheelMotor>;
    fn mut_motor(&mut self) -> Option<&mut WheelMotor>;
    fn damage(&self) -> Option<&WheelDamage>;
    fn mut_damage(&mut self) -> Option<&mut WheelDamage>;
    fn scale_provider(&self) -> Option<&dyn ScaleProvider>;
    // current live mass, including any rescale already applied
    fn mass(&self) -> f64;
}

pub trait ScaleProvider {
    fn current_scale(&self) -> Option<f64>;
    fn default_scale(&self) -> Option<f64>;
}
