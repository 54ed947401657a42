// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Row-list upkeep shared by the structural quote edits.
//!
//! A product's rows always end in exactly one blank row, unless the list is a
//! single row. Edits that add, remove, clear or fill rows call
//! [`consolidate_empty_rows`] afterwards to put the tail back in that shape.

use crate::{ProductStrategy, Row};

/// Drops surplus trailing blank rows, then appends a fresh blank row if the
/// last remaining row carries dimensions. Running it twice is the same as
/// running it once.
pub fn consolidate_empty_rows(mut items: Vec<Row>, strategy: &dyn ProductStrategy) -> Vec<Row> {
    while let [.., second_last, last] = items.as_slice()
        && last.is_blank()
        && second_last.is_blank()
    {
        items.pop();
    }

    if items.last().is_some_and(Row::has_dimension) {
        items.push(strategy.initial_item_data());
    }
    items
}

/// Whether `items` is in the shape [`consolidate_empty_rows`] produces: not
/// empty, no dimensions on the last row, and never two blank rows at the end.
pub fn satisfies_tail_invariant(items: &[Row]) -> bool {
    match items {
        [] => false,
        [only] => !only.has_dimension(),
        [.., second_last, last] => {
            !last.has_dimension() && !(last.is_blank() && second_last.is_blank())
        }
    }
}
