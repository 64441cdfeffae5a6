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

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Dual-copy tunable state. The plain fields are authoritative and survive a
/// save/reload cycle; the gui_ fields mirror whatever the editor sliders
/// currently hold and are only committed on a modification notification.
///
/// The transforms need every scalar strictly positive to produce
/// non-degenerate output. The core never clamps; bounding input is the
/// editing collaborator's job (see the range constants).
#[derive(Debug, Clone, PartialEq)]
pub struct TunableParameters {
    // reduction ratio is a torque multiplier (and speed de-multiplier)
    pub reduction_ratio: f64,
    pub endurance_mass_modifier: f64,
    pub gui_reduction_ratio: f64,
    pub gui_endurance_mass_modifier: f64,
}

impl TunableParameters {
    /// Editor slider bounds for the reduction ratio.
    pub const REDUCTION_RATIO_RANGE: RangeInclusive<f64> = 0.3..=3.0;
    /// Editor slider bounds for the endurance/mass modifier.
    pub const ENDURANCE_RANGE: RangeInclusive<f64> = 0.5..=3.0;
    /// Sliders display one decimal place ("0.0").
    pub const GUI_DECIMAL_PLACES: u32 = 1;

    pub fn save(&self) -> PersistedFields {
        PersistedFields {
            reduction_ratio: self.reduction_ratio,
            endurance_mass_modifier: self.endurance_mass_modifier,
        }
    }

    pub fn restore(&mut self, fields: &PersistedFields) {
        self.reduction_ratio = fields.reduction_ratio;
        self.endurance_mass_modifier = fields.endurance_mass_modifier;
    }
}

impl Default for TunableParameters {
    fn default() -> TunableParameters {
        TunableParameters {
            reduction_ratio: 1.0,
            endurance_mass_modifier: 1.0,
            gui_reduction_ratio: 1.0,
            gui_endurance_mass_modifier: 1.0,
        }
    }
}

/// The two named scalar fields the persistence collaborator stores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedFields {
    pub reduction_ratio: f64,
    pub endurance_mass_modifier: f64,
}

impl PersistedFields {
    pub fn from_json_bytes(bytes: &[u8]) -> Result<PersistedFields> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

impl Default for PersistedFields {
    fn default() -> PersistedFields {
        PersistedFields {
            reduction_ratio: 1.0,
            endurance_mass_modifier: 1.0,
        }
    }
}
