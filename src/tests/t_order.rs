use super::*;

use crate::details::{CommonBlockDetails, Details, ObjectEntityDetails};
use crate::diag::{Position, SourceName, Span};
use crate::scope::{ScopeId, ScopeKind};

fn sn(text: &str, offset: usize) -> SourceName {
    let start = Position {
        offset,
        line: 1,
        column: 1,
    };
    let end = Position {
        offset: offset + text.len(),
        line: 1,
        column: 1 + text.len(),
    };
    SourceName::new(text, Span::new(start, end))
}

fn common_block(table: &mut SymbolTable, scope: ScopeId, name: &str, offset: usize) -> SymbolId {
    let id = table.make_symbol(scope, sn(name, offset));
    table
        .set_details(id, Details::CommonBlock(CommonBlockDetails::new()))
        .unwrap();
    id
}

fn object(
    table: &mut SymbolTable,
    scope: ScopeId,
    name: &str,
    source_offset: usize,
    common: Option<SymbolId>,
    layout_offset: u64,
    size: u64,
) -> SymbolId {
    let id = table.make_symbol(scope, sn(name, source_offset));
    let mut details = ObjectEntityDetails::new();
    details.common_block = common;
    table
        .set_details(id, Details::ObjectEntity(details))
        .unwrap();
    table.symbol_mut(id).set_offset(layout_offset);
    table.symbol_mut(id).set_size(size);
    id
}

fn sorted(table: &SymbolTable, mut ids: Vec<SymbolId>) -> Vec<SymbolId> {
    ids.sort_by(|&x, &y| offset_cmp(table, x, y));
    ids
}

#[test]
fn test_common_members_sort_before_non_members() {
    let mut table = SymbolTable::new();
    let m = table.push_scope(table.global_scope(), ScopeKind::Module);
    let block = common_block(&mut table, m, "blk", 0);

    // A and B alias the same storage; C lives outside any common block.
    let a = object(&mut table, m, "a", 30, Some(block), 0, 8);
    let b = object(&mut table, m, "b", 20, Some(block), 0, 4);
    let c = object(&mut table, m, "c", 10, None, 0, 16);

    assert_eq!(sorted(&table, vec![c, b, a]), vec![a, b, c]);
    assert_eq!(offset_cmp(&table, a, b), Ordering::Less);
    assert_eq!(offset_cmp(&table, b, c), Ordering::Less);
    assert_eq!(offset_cmp(&table, c, a), Ordering::Greater);
}

#[test]
fn test_members_group_by_block_source_position() {
    let mut table = SymbolTable::new();
    let m = table.push_scope(table.global_scope(), ScopeKind::Module);
    // blk2 is declared before blk1 in the source.
    let blk1 = common_block(&mut table, m, "blk1", 100);
    let blk2 = common_block(&mut table, m, "blk2", 50);

    let x = object(&mut table, m, "x", 0, Some(blk1), 0, 4);
    let y = object(&mut table, m, "y", 10, Some(blk2), 0, 4);
    let z = object(&mut table, m, "z", 20, Some(blk1), 8, 4);

    assert_eq!(sorted(&table, vec![x, y, z]), vec![y, x, z]);
}

#[test]
fn test_non_members_order_by_offset_then_size_then_source() {
    let mut table = SymbolTable::new();
    let m = table.push_scope(table.global_scope(), ScopeKind::Module);

    let late = object(&mut table, m, "late", 0, None, 8, 4);
    let small = object(&mut table, m, "small", 10, None, 0, 4);
    let big = object(&mut table, m, "big", 20, None, 0, 8);
    // Same offset and size as `small`, declared earlier.
    let twin = object(&mut table, m, "twin", 5, None, 0, 4);

    // Offset ascending, then size descending, then source position.
    assert_eq!(
        sorted(&table, vec![late, small, big, twin]),
        vec![big, twin, small, late]
    );
}

#[test]
fn test_source_position_order() {
    let mut table = SymbolTable::new();
    let m1 = table.push_scope(table.global_scope(), ScopeKind::Module);
    let m2 = table.push_scope(table.global_scope(), ScopeKind::Module);

    let a = table.make_symbol(m1, sn("a", 10));
    let b = table.make_symbol(m1, sn("b", 20));
    assert_eq!(source_position_cmp(&table, a, b), Ordering::Less);
    assert_eq!(source_position_cmp(&table, b, a), Ordering::Greater);

    // Same start: the shorter (earlier-ending) name sorts first.
    let ab = table.make_symbol(m1, sn("ab", 30));
    let abc = table.make_symbol(m1, sn("abc", 30));
    assert_eq!(source_position_cmp(&table, ab, abc), Ordering::Less);

    // Identical spans compare equal even across scopes.
    let x1 = table.make_symbol(m1, sn("x", 40));
    let x2 = table.make_symbol(m2, sn("x", 40));
    assert_eq!(source_position_cmp(&table, x1, x2), Ordering::Equal);
}
