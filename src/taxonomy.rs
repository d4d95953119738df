use std::collections::{BTreeMap, BTreeSet};

use crate::post::PostRecord;

/// Category names mapped to their (possibly empty) sets of subcategories.
/// BTree keeps both levels alphabetical for display.
pub type Taxonomy = BTreeMap<String, BTreeSet<String>>;

/// Derives the category tree from index records. Every category present in
/// the index gets a key, even when none of its posts has a subcategory.
pub fn derive_taxonomy(records: &[PostRecord]) -> Taxonomy {
    let mut taxonomy = Taxonomy::new();

    for record in records {
        let subcategories = taxonomy.entry(record.category.clone()).or_default();
        if let Some(ref sub) = record.subcategory {
            subcategories.insert(sub.clone());
        }
    }

    taxonomy
}
