use crate::pipeline::utility::{mean, median};

/// Summary statistics for the values sharing one key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
}

impl GroupStats {
    /// Builds the statistics for a group's values, or `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Some(GroupStats {
            count: values.len(),
            mean: mean(values)?,
            median: median(values)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_empty() {
        assert_eq!(GroupStats::from_values(&[]), None);
    }

    #[test]
    fn test_from_values_single() {
        let stats = GroupStats::from_values(&[7.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.5);
        assert_eq!(stats.median, 7.5);
    }

    #[test]
    fn test_from_values_skewed() {
        let stats = GroupStats::from_values(&[1.0, 2.0, 3.0, 100.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 26.5);
        assert_eq!(stats.median, 2.5);
    }
}
