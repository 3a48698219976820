use serde::{Serialize, Serializer};

/// Description of a single band, as printed by `insp band`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandInfo {
    /// 1-based band index.
    pub index: usize,
    pub dtype: String,
    #[serde(serialize_with = "serialize_nodata")]
    pub nodata: Option<f64>,
    pub description: String,
    pub color_interp: String,
    /// (width, height) of a block.
    pub block_size: (usize, usize),
    pub scale: Option<f64>,
    pub offset: Option<f64>,
    pub unit: String,
}

/// Statistics of the valid pixels of a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub count: usize,
}

/// Nodata as written in JSON.
///
/// Non finite values are written as the strings `"nan"`, `"inf"` and `"-inf"`,
/// an unset nodata is `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nodata(pub Option<f64>);

impl Serialize for Nodata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            None => serializer.serialize_none(),
            Some(value) if value.is_nan() => serializer.serialize_str("nan"),
            Some(value) if value == f64::INFINITY => serializer.serialize_str("inf"),
            Some(value) if value == f64::NEG_INFINITY => serializer.serialize_str("-inf"),
            Some(value) => serializer.serialize_f64(value),
        }
    }
}

pub(crate) fn serialize_nodata<S: Serializer>(
    nodata: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    Nodata(*nodata).serialize(serializer)
}

/// Running count, sum and extremes of the valid pixels of a band.
#[derive(Debug, Clone, Copy)]
pub struct StatsAccumulator {
    nodata: Option<f64>,
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl StatsAccumulator {
    pub fn new(nodata: Option<f64>) -> Self {
        Self {
            nodata,
            count: 0,
            sum: 0.,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn is_nodata(&self, value: f64) -> bool {
        match self.nodata {
            Some(nodata) if nodata.is_nan() => value.is_nan(),
            Some(nodata) => value == nodata,
            None => false,
        }
    }

    /// Pixels equal to nodata and non finite pixels are skipped.
    pub fn push(&mut self, values: &[f64]) {
        for &value in values {
            if !value.is_finite() || self.is_nodata(value) {
                continue;
            }
            self.count += 1;
            self.sum += value;
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    pub fn finish(self) -> BandStats {
        if self.count == 0 {
            return BandStats {
                min: None,
                max: None,
                mean: None,
                count: 0,
            };
        }
        BandStats {
            min: Some(self.min),
            max: Some(self.max),
            mean: Some(self.sum / self.count as f64),
            count: self.count,
        }
    }
}

impl BandStats {
    /// Pixels equal to `nodata` and non finite pixels are skipped.
    pub fn from_values(values: &[f64], nodata: Option<f64>) -> Self {
        let mut accumulator = StatsAccumulator::new(nodata);
        accumulator.push(values);
        accumulator.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stats_skip_nodata() {
        let stats = BandStats::from_values(&[0., 1., 2., 3., 0.], Some(0.));
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, Some(1.));
        assert_eq!(stats.max, Some(3.));
        assert_eq!(stats.mean, Some(2.));
    }

    #[rstest]
    fn stats_skip_nan_nodata() {
        let stats = BandStats::from_values(&[f64::NAN, 4., 6.], Some(f64::NAN));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, Some(5.));
    }

    #[rstest]
    fn stats_of_empty_band() {
        let stats = BandStats::from_values(&[7., 7.], Some(7.));
        assert_eq!(stats.count, 0);
        assert_eq!(stats.min, None);
        assert_eq!(stats.mean, None);
    }

    #[rstest]
    #[case(Some(f64::NAN), "\"nan\"")]
    #[case(Some(f64::INFINITY), "\"inf\"")]
    #[case(Some(f64::NEG_INFINITY), "\"-inf\"")]
    #[case(Some(-9999.), "-9999.0")]
    #[case(None, "null")]
    fn nodata_json(#[case] nodata: Option<f64>, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&Nodata(nodata)).unwrap(), expected);
    }

    #[rstest]
    fn nan_nodata_is_not_null_in_band_info() {
        let info = BandInfo {
            index: 1,
            dtype: "Float32".into(),
            nodata: Some(f64::NAN),
            description: String::new(),
            color_interp: "Gray".into(),
            block_size: (256, 256),
            scale: None,
            offset: None,
            unit: String::new(),
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["nodata"], "nan");
    }
}
