use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Categories, Item};

/// Bucket key used for items whose release date has no usable year.
pub const INVALID_YEAR_KEY: &str = "<invalid>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearKey {
    Year(i32),
    Invalid,
}

impl YearKey {
    pub fn from_release_date(release_date: &str) -> Self {
        extract_year(release_date).map_or(YearKey::Invalid, YearKey::Year)
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Year(year) => write!(f, "{year}"),
            YearKey::Invalid => f.write_str(INVALID_YEAR_KEY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketItem {
    pub item: Item,
    /// Category names joined with `", "`.
    pub genre_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBucket {
    pub year: String,
    pub items: Vec<BucketItem>,
}

/// Calendar year of an ISO date string.
///
/// Accepts `YYYY`, `YYYY-MM` and `YYYY-MM-DD`, optionally followed by a time
/// part after `T` or a space. Month and day must be two digits and the date
/// must exist on the calendar. Surrounding whitespace is ignored.
pub fn extract_year(release_date: &str) -> Option<i32> {
    let date = release_date.trim();
    let bytes = date.as_bytes();
    let digits_at = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .is_some_and(|part| part.iter().all(u8::is_ascii_digit))
    };
    if !digits_at(0..4) {
        return None;
    }
    let year: i32 = date[..4].parse().ok()?;

    match bytes.len() {
        4 => Some(year),
        7 if bytes[4] == b'-' && digits_at(5..7) => {
            let month: u32 = date[5..7].parse().ok()?;
            (1..=12).contains(&month).then_some(year)
        }
        len if len >= 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && digits_at(5..7)
            && digits_at(8..10)
            && (len == 10 || matches!(bytes[10], b'T' | b' ')) =>
        {
            NaiveDate::parse_from_str(&date[..10], "%Y-%m-%d")
                .ok()
                .map(|_| year)
        }
        _ => None,
    }
}

/// Names of the known categories in `category_ids`, in that order.
pub fn genre_label(category_ids: &[i64], categories: &Categories) -> String {
    category_ids
        .iter()
        .filter_map(|&id| categories.name_of(id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Full poster URL, or `None` when the item has no poster.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> Option<String> {
    if poster_path.is_empty() {
        return None;
    }
    let base = image_base_url.trim_end_matches('/');
    let path = poster_path.trim_start_matches('/');
    Some(format!("{base}/{path}"))
}

/// Buckets `items` by release year, newest year first.
///
/// Items keep their relative order inside a bucket. Items without a usable
/// year land in a trailing [`INVALID_YEAR_KEY`] bucket.
pub fn group_by_year<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    categories: &Categories,
) -> Vec<YearBucket> {
    let mut keys: Vec<YearKey> = Vec::new();
    let mut grouped: Vec<Vec<BucketItem>> = Vec::new();
    let mut index_of: HashMap<YearKey, usize> = HashMap::new();

    for item in items {
        let key = YearKey::from_release_date(&item.release_date);
        let index = *index_of.entry(key).or_insert_with(|| {
            keys.push(key);
            grouped.push(Vec::new());
            keys.len() - 1
        });
        grouped[index].push(BucketItem {
            item: item.clone(),
            genre_label: genre_label(&item.category_ids, categories),
        });
    }

    let mut buckets: Vec<(YearKey, Vec<BucketItem>)> = keys.into_iter().zip(grouped).collect();
    buckets.sort_by_key(|(key, _)| match key {
        YearKey::Year(year) => (0, std::cmp::Reverse(*year)),
        YearKey::Invalid => (1, std::cmp::Reverse(i32::MIN)),
    });

    buckets
        .into_iter()
        .map(|(key, items)| YearBucket {
            year: key.to_string(),
            items,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{extract_year, poster_url};

    #[test]
    fn year_from_full_and_partial_dates() {
        assert_eq!(extract_year("2014-05-01"), Some(2014));
        assert_eq!(extract_year("1999"), Some(1999));
        assert_eq!(extract_year("2001-12"), Some(2001));
        assert_eq!(extract_year(" 2022-01-01 "), Some(2022));
        assert_eq!(extract_year("2021-05-01T12:00:00Z"), Some(2021));
        assert_eq!(extract_year("2021-05-01T00:00:00.000Z"), Some(2021));
        assert_eq!(extract_year("2019-11-20 18:30"), Some(2019));
    }

    #[test]
    fn unusable_dates_have_no_year() {
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("soon"), None);
        assert_eq!(extract_year("2021-02-30"), None);
        assert_eq!(extract_year("2021-13"), None);
        assert_eq!(extract_year("20x1-01-01"), None);
        assert_eq!(extract_year("2021/01/01"), None);
        assert_eq!(extract_year("20145-01-01"), None);
        assert_eq!(extract_year("2021-+1"), None);
        assert_eq!(extract_year("2021-1-5"), None);
        assert_eq!(extract_year("2021-05-+1"), None);
        assert_eq!(extract_year("2021-02-30T10:00:00Z"), None);
        assert_eq!(extract_year("2021-05-01X"), None);
    }

    #[test]
    fn poster_url_joins_single_slash() {
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500", "/abc.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500/", "abc.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(poster_url("https://image.tmdb.org/t/p/w500", ""), None);
    }
}
