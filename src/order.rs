//! Total orders over symbols for deterministic layout traversal and
//! diagnostic enumeration.

use std::cmp::Ordering;

use crate::symbol::SymbolId;
use crate::table::SymbolTable;

/// Source-position order: by the name's start offset, then end offset.
pub fn source_position_cmp(table: &SymbolTable, x: SymbolId, y: SymbolId) -> Ordering {
    let xs = table.symbol(x).source_name().span();
    let ys = table.symbol(y).source_name().span();
    xs.start
        .offset
        .cmp(&ys.start.offset)
        .then(xs.end.offset.cmp(&ys.end.offset))
}

/// Layout order. Members of common blocks sort before non-members; members
/// order by their blocks' source position, then offset ascending with ties
/// broken by size descending (the larger of two aliased objects leads).
/// Non-members compare by the same offset/size rule, falling back to source
/// position.
pub fn offset_cmp(table: &SymbolTable, x: SymbolId, y: SymbolId) -> Ordering {
    let x_common = table.common_block_containing(x);
    let y_common = table.common_block_containing(y);
    match (x_common, y_common) {
        (Some(xc), Some(yc)) => source_position_cmp(table, xc, yc)
            .then_with(|| offset_size_cmp(table, x, y))
            .then_with(|| source_position_cmp(table, x, y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => {
            offset_size_cmp(table, x, y).then_with(|| source_position_cmp(table, x, y))
        }
    }
}

fn offset_size_cmp(table: &SymbolTable, x: SymbolId, y: SymbolId) -> Ordering {
    let xs = table.symbol(x);
    let ys = table.symbol(y);
    xs.offset()
        .unwrap_or(0)
        .cmp(&ys.offset().unwrap_or(0))
        .then(ys.size().unwrap_or(0).cmp(&xs.size().unwrap_or(0)))
}

#[cfg(test)]
#[path = "tests/t_order.rs"]
mod tests;
