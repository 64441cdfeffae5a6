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

use std::io;
use std::io::Cursor;
use std::path::Path;

use csv::Terminator;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Piecewise torque characteristic. Control points are
/// (speed fraction, torque value) pairs ordered by speed fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorqueCurve {
    points: Vec<(f64, f64)>
}

impl TorqueCurve {
    pub fn new(points: Vec<(f64, f64)>) -> TorqueCurve {
        TorqueCurve { points }
    }

    pub fn empty() -> TorqueCurve {
        TorqueCurve { points: Vec::new() }
    }

    pub fn from_lut_path(lut_path: &Path) -> Result<TorqueCurve, String> {
        let file = match std::fs::File::open(lut_path) {
            Ok(file) => { file }
            Err(e) => {
                return Err(format!("Failed to open {}: {}", lut_path.display(), e.to_string()));
            }
        };
        TorqueCurve::from_lut_reader(file)
    }

    pub fn from_lut_bytes(lut_bytes: &[u8]) -> Result<TorqueCurve, String> {
        TorqueCurve::from_lut_reader(Cursor::new(lut_bytes))
    }

    pub fn from_lut_reader<R: io::Read>(lut_reader: R) -> Result<TorqueCurve, String> {
        let mut points: Vec<(f64, f64)> = Vec::new();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'|')
            .terminator(Terminator::CRLF)
            .comment(Some(b';'))
            .from_reader(lut_reader);
        for result in rdr.records() {
            match result {
                Ok(record) => {
                    let key = parse_curve_element(&record, 0)?;
                    let value = parse_curve_element(&record, 1)?;
                    points.push((key, value));
                },
                _ => {}
            }
        }
        let curve = TorqueCurve { points };
        if !curve.is_monotonic() {
            return Err(String::from("Curve keys are not monotonic in speed fraction"));
        }
        Ok(curve)
    }

    pub fn write_lut_to_path(&self, path: &Path) -> Result<(), String> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).delimiter(b'|').from_path(path).map_err(
            |err| { format!("Couldn't write {}. {}", path.display(), err.to_string()) }
        )?;
        for (key, val) in &self.points {
            writer.write_record(&[key.to_string(), val.to_string()]).map_err(|err| {
                format!("Couldn't write {}. {}", path.display(), err.to_string())
            })?;
        }
        writer.flush().map_err(
            |err| { format!("Couldn't write {}. {}", path.display(), err.to_string()) }
        )?;
        Ok(())
    }

    pub fn to_lut_bytes(&self) -> Result<Vec<u8>, String> {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new().has_headers(false).delimiter(b'|').from_writer(&mut out);
            for (key, val) in &self.points {
                writer.write_record(&[key.to_string(), val.to_string()]).map_err(|err| {
                    format!("Couldn't write curve to buffer. {}", err.to_string())
                })?;
            }
        }
        Ok(out)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_monotonic(&self) -> bool {
        self.points.iter().tuple_windows().all(|(a, b)| a.0 <= b.0)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|(_, value)| *value).reduce(f64::max)
    }

    /// Sample the curve at `key` with linear interpolation between the two
    /// surrounding control points. Keys outside the covered range return None.
    pub fn value_at(&self, key: f64) -> Option<f64> {
        if self.points.is_empty() || key.is_nan() {
            return None;
        }
        if key < self.points[0].0 || key > self.points[self.points.len() - 1].0 {
            return None;
        }
        let idx = self.points.partition_point(|(k, _)| *k < key);
        if idx < self.points.len() && self.points[idx].0 == key {
            return Some(self.points[idx].1);
        }
        let (k1, v1) = self.points[idx - 1];
        let (k2, v2) = self.points[idx];
        let fraction = (key - k1) / (k2 - k1);
        Some(v1 + fraction * (v2 - v1))
    }
}

fn parse_curve_element(record: &csv::StringRecord, index: usize) -> Result<f64, String> {
    let record_opt = record.get(index);
    if record_opt.is_none() {
        return Err(format!("Cannot access index {} of curve record", index));
    }
    match record_opt.unwrap().trim().parse::<f64>() {
        Ok(v) => { Ok(v) },
        Err(e) => {
            let mut err_str = String::from("Invalid curve data");
            if let Some(pos) = record.position() {
                err_str.push_str(&format!(" at line {}", pos.line()));
            }
            Err(format!("{}. {:?}", err_str, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::curve::TorqueCurve;

    const WHEEL_TORQUE_LUT: &'static str = "; speed fraction|torque\n0|100\n0.5|80\n1|50\n";

    #[test]
    fn load_curve_from_lut() {
        let curve = TorqueCurve::from_lut_bytes(WHEEL_TORQUE_LUT.as_bytes()).unwrap();
        assert_eq!(curve.points(), &[(0.0, 100.0), (0.5, 80.0), (1.0, 50.0)]);
        assert_eq!(curve.num_points(), 3);
        assert!(curve.is_monotonic());
    }

    #[test]
    fn load_rejects_non_monotonic_curve() {
        let result = TorqueCurve::from_lut_bytes("1|50\n0|100\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn load_rejects_bad_data() {
        let result = TorqueCurve::from_lut_bytes("0|fast\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn max_value_scans_all_points() {
        let curve = TorqueCurve::new(vec![(0.0, 100.0), (0.5, 120.0), (1.0, 50.0)]);
        assert_eq!(curve.max_value(), Some(120.0));
        assert_eq!(TorqueCurve::empty().max_value(), None);
    }

    #[test]
    fn interpolator_test() {
        let curve = TorqueCurve::new(vec![
            (1.0, 2.0),
            (2.0, 4.0),
            (3.0, 6.0),
            (4.0, 8.0),
            (5.0, 10.0),
        ]);

        let test_keys =
            vec![0.5,  1.0,       1.5,       2.5,       3.5,       4.5,       5.0,        5.5];
        let expected_vals =
            vec![None, Some(2.0), Some(3.0), Some(5.0), Some(7.0), Some(9.0), Some(10.0), None];
        for (idx, key) in test_keys.iter().enumerate() {
            assert_eq!(curve.value_at(*key), expected_vals[idx]);
        }
    }

    #[test]
    fn degenerate_curves_are_valid() {
        let single = TorqueCurve::new(vec![(0.0, 100.0)]);
        assert_eq!(single.value_at(0.0), Some(100.0));
        assert_eq!(single.value_at(0.5), None);
        assert_eq!(TorqueCurve::empty().value_at(0.0), None);
    }

    #[test]
    fn curve_survives_lut_write() {
        let curve = TorqueCurve::new(vec![(0.0, 100.0), (0.5, 80.0)]);
        let bytes = curve.to_lut_bytes().unwrap();
        assert_eq!(TorqueCurve::from_lut_bytes(&bytes).unwrap(), curve);
    }
}
