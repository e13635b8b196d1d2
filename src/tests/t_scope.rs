use super::*;

use crate::diag::{Position, SourceName, Span};
use crate::error::SymbolError;
use crate::table::SymbolTable;

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

#[test]
fn test_scope_tree_structure() {
    let mut table = SymbolTable::new();
    let global = table.global_scope();
    assert!(table.scope(global).is_top_level());
    assert_eq!(table.scope(global).kind(), ScopeKind::Global);

    let module = table.push_scope(global, ScopeKind::Module);
    let subprogram = table.push_scope(module, ScopeKind::Subprogram);

    assert_eq!(table.scope(module).parent(), Some(global));
    assert_eq!(table.scope(subprogram).parent(), Some(module));
    assert!(!table.scope(subprogram).is_top_level());
    assert_eq!(table.scope(global).children(), &[module]);
    assert_eq!(table.scope(module).children(), &[subprogram]);
}

#[test]
fn test_make_symbol_is_idempotent_per_name() {
    let mut table = SymbolTable::new();
    let module = table.push_scope(table.global_scope(), ScopeKind::Module);

    let first = table.make_symbol(module, sn("x", 0));
    let second = table.make_symbol(module, sn("x", 50));
    assert_eq!(first, second);
    // The original occurrence is kept.
    assert_eq!(table.symbol(first).source_name().span().start.offset, 0);

    let other = table.make_symbol(module, sn("y", 10));
    assert_ne!(first, other);
}

#[test]
fn test_same_name_in_different_scopes_is_distinct() {
    let mut table = SymbolTable::new();
    let m1 = table.push_scope(table.global_scope(), ScopeKind::Module);
    let m2 = table.push_scope(table.global_scope(), ScopeKind::Module);

    let x1 = table.make_symbol(m1, sn("x", 0));
    let x2 = table.make_symbol(m2, sn("x", 100));
    assert_ne!(x1, x2);
    assert_eq!(table.symbol(x1).owner(), m1);
    assert_eq!(table.symbol(x2).owner(), m2);
}

#[test]
fn test_symbols_iterate_in_declaration_order() {
    let mut table = SymbolTable::new();
    let module = table.push_scope(table.global_scope(), ScopeKind::Module);
    table.make_symbol(module, sn("c", 0));
    table.make_symbol(module, sn("a", 10));
    table.make_symbol(module, sn("b", 20));

    let names: Vec<&str> = table.scope(module).symbols().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_scope_symbol_links_both_directions() {
    let mut table = SymbolTable::new();
    let global = table.global_scope();
    let m = table.make_symbol(global, sn("m", 0));
    let module = table.push_scope(global, ScopeKind::Module);

    table.set_scope_symbol(module, m).unwrap();
    assert_eq!(table.scope(module).symbol(), Some(m));
    assert_eq!(table.symbol(m).scope(), Some(module));

    let other = table.make_symbol(global, sn("n", 10));
    assert_eq!(
        table.set_scope_symbol(module, other),
        Err(SymbolError::ScopeSymbolAlreadySet)
    );
}

#[test]
fn test_find_is_local_to_the_scope() {
    let mut table = SymbolTable::new();
    let module = table.push_scope(table.global_scope(), ScopeKind::Module);
    let block = table.push_scope(module, ScopeKind::Block);
    let x = table.make_symbol(module, sn("x", 0));

    assert_eq!(table.find(module, "x"), Some(x));
    assert_eq!(table.find(block, "x"), None);
}
