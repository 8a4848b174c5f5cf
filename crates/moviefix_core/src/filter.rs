use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Active filters identifying one paging session.
///
/// Category ids are kept in a set, so two keys built from the same ids in a
/// different order compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterKey {
    year: Option<i32>,
    category_ids: BTreeSet<i64>,
}

impl FilterKey {
    pub fn new(year: Option<i32>, category_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            year,
            category_ids: category_ids.into_iter().collect(),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Selected category ids in ascending order.
    pub fn category_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.category_ids.iter().copied()
    }

    pub fn has_category(&self, id: i64) -> bool {
        self.category_ids.contains(&id)
    }

    pub fn with_year(&self, year: Option<i32>) -> Self {
        Self {
            year,
            category_ids: self.category_ids.clone(),
        }
    }

    /// Selects `id` if it is not selected yet, otherwise deselects it.
    pub fn toggle_category(&self, id: i64) -> Self {
        let mut category_ids = self.category_ids.clone();
        if !category_ids.remove(&id) {
            category_ids.insert(id);
        }
        Self {
            year: self.year,
            category_ids,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "year={year}")?,
            None => write!(f, "year=any")?,
        }
        write!(f, " categories=[")?;
        for (index, id) in self.category_ids.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "]")
    }
}
