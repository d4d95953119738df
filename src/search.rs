use crate::post::PostRecord;

/// Sort modes a listing can ask for at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Newest,
    Oldest,
    Title,
}

/// Case-insensitive substring match over title, author, and category.
/// An empty query keeps everything. The index itself is never mutated;
/// the result is a view in index order.
pub fn filter<'a>(records: &'a [PostRecord], query: &str) -> Vec<&'a PostRecord> {
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            record.title.to_lowercase().contains(&needle)
                || record.author.to_lowercase().contains(&needle)
                || record.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Reorders a filtered view. Stable, so posts with equal keys keep their
/// index order.
pub fn sort(posts: &mut [&PostRecord], mode: SortMode) {
    match mode {
        SortMode::Newest => posts.sort_by(|a, b| b.sort_date().cmp(&a.sort_date())),
        SortMode::Oldest => posts.sort_by(|a, b| a.sort_date().cmp(&b.sort_date())),
        SortMode::Title => {
            posts.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }
}
