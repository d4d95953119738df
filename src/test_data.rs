#[cfg(test)]
pub const POST_DATA: &str = "---
title: Growing a Garden
description: What a year of container gardening taught me
date: 2023-04-18
author: Ada Lovelace
---

Last spring I planted twelve pots on the balcony and kept notes on every one of them.

## What worked

Tomatoes and basil, mostly. The mint took over two pots on its own.

### Watering

Morning watering beat evening watering in every pot I compared.

## What did not

Carrots in shallow pots. Lesson learned.
";

/// Five records the way a freshly built index would hold them, newest
/// first. Categories: life, math, tech(react, svelte).
#[cfg(test)]
pub fn sample_records() -> Vec<crate::post::PostRecord> {
    fn record(
        title: &str,
        date: &str,
        category: &str,
        subcategory: Option<&str>,
        author: &str,
        word_count: usize,
        filepath: &str,
    ) -> crate::post::PostRecord {
        crate::post::PostRecord {
            title: title.to_string(),
            description: "".to_string(),
            date: date.to_string(),
            category: category.to_string(),
            subcategory: subcategory.map(str::to_string),
            slug: crate::text_utils::slugify(title),
            author: author.to_string(),
            image: "".to_string(),
            filepath: filepath.to_string(),
            word_count,
            toc: vec![],
        }
    }

    vec![
        record("A Note", "2024-02-01", "life", None, "Ada Lovelace", 120, "life/note.md"),
        record(
            "Linear Algebra",
            "2024-01-09",
            "math",
            Some("algebra"),
            "Unknown",
            980,
            "math/algebra/linear.md",
        ),
        record(
            "Svelte Stores",
            "2023-12-24",
            "tech",
            Some("svelte"),
            "Ada Lovelace",
            310,
            "tech/svelte/stores.md",
        ),
        record(
            "React Hooks",
            "2023-11-11",
            "tech",
            Some("react"),
            "Grace Hopper",
            450,
            "tech/react/hooks.md",
        ),
        record(
            "Old Entry",
            "2021-06-30",
            "tech",
            None,
            "Grace Hopper",
            200,
            "tech/old-entry.md",
        ),
    ]
}
