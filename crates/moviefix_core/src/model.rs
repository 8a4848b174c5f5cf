use std::collections::HashMap;

use serde::Serialize;

/// One catalog entry as returned by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    /// ISO date (`YYYY-MM-DD`); may be empty or malformed.
    pub release_date: String,
    pub category_ids: Vec<i64>,
    /// Relative poster path; empty when the catalog has none.
    pub poster_path: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// The category vocabulary loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    ordered: Vec<Category>,
    by_id: HashMap<i64, usize>,
}

impl Categories {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut ordered = Vec::with_capacity(categories.len());
        let mut by_id = HashMap::with_capacity(categories.len());
        for category in categories {
            // First definition of an id wins; later duplicates are dropped.
            if by_id.contains_key(&category.id) {
                continue;
            }
            by_id.insert(category.id, ordered.len());
            ordered.push(category);
        }
        Self { ordered, by_id }
    }

    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.by_id
            .get(&id)
            .map(|&index| self.ordered[index].name.as_str())
    }

    pub fn contains(&self, id: i64) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl FromIterator<Category> for Categories {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
