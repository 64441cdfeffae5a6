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

use tracing::debug;

use crate::traits::ScaleProvider;

/// Resolve the geometric scale ratio from the optional rescale collaborator.
/// Torque capacity scales with volume, so the linear scale ratio is cubed.
/// An absent provider, or one missing either value, resolves to a neutral 1.
pub fn geometric_scale_ratio(provider: Option<&dyn ScaleProvider>) -> f64 {
    let provider = match provider {
        None => return 1.0,
        Some(p) => p,
    };
    match (provider.current_scale(), provider.default_scale()) {
        (Some(current), Some(default)) => {
            let ratio = (current / default).powi(3);
            debug!("Found rescale data; current={}, default={}, scale ratio={}",
                   current, default, ratio);
            ratio
        }
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use crate::drive::scale::geometric_scale_ratio;
    use crate::part::FixedScale;
    use crate::traits::ScaleProvider;

    #[test]
    fn absent_provider_is_neutral() {
        assert_eq!(geometric_scale_ratio(None), 1.0);
    }

    #[test]
    fn partial_scale_data_is_neutral() {
        let missing_default = FixedScale { current_scale: Some(2.0), default_scale: None };
        assert_eq!(geometric_scale_ratio(Some(&missing_default as &dyn ScaleProvider)), 1.0);

        let missing_current = FixedScale { current_scale: None, default_scale: Some(1.0) };
        assert_eq!(geometric_scale_ratio(Some(&missing_current as &dyn ScaleProvider)), 1.0);
    }

    #[test]
    fn scale_ratio_follows_cube_law() {
        let doubled = FixedScale::uniform(2.0, 1.0);
        assert_eq!(geometric_scale_ratio(Some(&doubled as &dyn ScaleProvider)), 8.0);

        let enlarged = FixedScale::uniform(1.5, 1.0);
        assert_eq!(geometric_scale_ratio(Some(&enlarged as &dyn ScaleProvider)), 3.375);

        let unscaled = FixedScale::uniform(1.25, 1.25);
        assert_eq!(geometric_scale_ratio(Some(&unscaled as &dyn ScaleProvider)), 1.0);
    }
}
