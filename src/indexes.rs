use std::{collections::HashSet, rc::Rc};

use itertools::Itertools;

use crate::errors::{Result, RioError};

/// Selection of 1-based band indexes.
///
/// With `drop` the selection lists the bands to leave out.
#[derive(Clone, Debug, PartialEq)]
pub struct Indexes {
    selection: Rc<[usize]>,
    drop: bool,
}

impl<const N: usize> From<([usize; N], bool)> for Indexes {
    fn from(value: ([usize; N], bool)) -> Self {
        let selection = Rc::from(value.0);
        let drop = value.1;
        Indexes { selection, drop }
    }
}

impl<const N: usize> From<[usize; N]> for Indexes {
    fn from(value: [usize; N]) -> Self {
        let selection = Rc::from(value);
        Indexes {
            selection,
            drop: false,
        }
    }
}

impl From<Vec<usize>> for Indexes {
    fn from(value: Vec<usize>) -> Self {
        Indexes {
            selection: Rc::from(value),
            drop: false,
        }
    }
}

impl Indexes {
    pub fn all() -> Self {
        Self {
            selection: Rc::from([]),
            drop: true,
        }
    }

    /// Selected indexes out of `count` bands, in selection order.
    pub fn indexes_from(&self, count: usize) -> Result<Rc<[usize]>> {
        if let Some(index) = self
            .selection
            .iter()
            .find(|index| **index == 0 || **index > count)
        {
            return Err(RioError::BandOutOfRange {
                index: *index,
                count,
            });
        }
        if self.drop {
            let drop_idxs: HashSet<&usize> = self.selection.iter().collect();
            Ok((1..=count)
                .filter(|idx| !drop_idxs.contains(idx))
                .collect())
        } else {
            Ok(self.selection.iter().copied().unique().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Indexes::all(), vec![1, 2, 3, 4])]
    #[case(Indexes::from([3, 1]), vec![3, 1])]
    #[case(Indexes::from([2, 2, 4]), vec![2, 4])]
    #[case(Indexes::from(([2, 3], true)), vec![1, 4])]
    fn selects_indexes(#[case] indexes: Indexes, #[case] expected: Vec<usize>) {
        assert_eq!(indexes.indexes_from(4).unwrap().as_ref(), expected.as_slice());
    }

    #[rstest]
    #[case(Indexes::from([0]))]
    #[case(Indexes::from([5]))]
    #[case(Indexes::from(([9], true)))]
    fn rejects_out_of_range(#[case] indexes: Indexes) {
        assert!(matches!(
            indexes.indexes_from(4),
            Err(RioError::BandOutOfRange { count: 4, .. })
        ));
    }
}
