use std::fmt::Write;

use indoc::indoc;

use super::*;

use crate::derived::DerivedTypeDetails;
use crate::details::{
    AssocEntityDetails, CommonBlockDetails, HostAssocDetails, MainProgramDetails, MiscDetails,
    MiscKind, ModuleDetails, NamelistDetails, ObjectEntityDetails, ProcBindingDetails,
    ProcEntityDetails, SubprogramDetails, SubprogramKind, SubprogramNameDetails, TypeParamAttr,
    TypeParamDetails, UseDetails, UseErrorDetails, UserReductionDetails,
};
use crate::diag::{Position, SourceName, Span};
use crate::generic::{GenericDetails, GenericKind};
use crate::scope::ScopeKind;
use crate::symbol::Flag;
use crate::value::{ArraySpec, InitValue, ShapeSpec, TypeRef};

fn sn(text: &str, line: usize, column: usize) -> SourceName {
    let offset = (line - 1) * 100 + column - 1;
    let start = Position {
        offset,
        line,
        column,
    };
    let end = Position {
        offset: offset + text.len(),
        line,
        column: column + text.len(),
    };
    SourceName::new(text, Span::new(start, end))
}

fn table_with_module(name: &str) -> (SymbolTable, ScopeId) {
    let mut table = SymbolTable::new();
    let m = table.make_symbol(table.global_scope(), sn(name, 1, 1));
    table
        .set_details(m, Details::Module(ModuleDetails::default()))
        .unwrap();
    let scope = table.push_scope(table.global_scope(), ScopeKind::Module);
    table.set_scope_symbol(scope, m).unwrap();
    (table, scope)
}

fn dumped(table: &SymbolTable, id: SymbolId) -> String {
    table.dump(id).to_string()
}

#[test]
fn test_object_entity_dump() {
    let (mut table, m) = table_with_module("m");
    let x = table.make_symbol(m, sn("x", 2, 1));
    let mut object = ObjectEntityDetails::new();
    object.entity.is_dummy = true;
    object
        .set_shape(ArraySpec::new(vec![ShapeSpec::Explicit {
            lower: 1,
            upper: 10,
        }]))
        .unwrap();
    object.init = Some(InitValue::new("42"));
    table.set_details(x, Details::ObjectEntity(object)).unwrap();
    table.set_type(x, TypeRef(1)).unwrap();
    table.symbol_mut(x).set_size(8);
    table.symbol_mut(x).set_offset(0);

    assert_eq!(
        dumped(&table, x),
        "x size=8 offset=0: ObjectEntity dummy type: t1 shape: 1:10 init:42"
    );
}

#[test]
fn test_flags_and_unclassified_dump() {
    let (mut table, m) = table_with_module("m");
    let f = table.make_symbol(m, sn("f", 2, 1));
    table.symbol_mut(f).set_flag(Flag::Elemental);
    table.symbol_mut(f).set_flag(Flag::Dummy);

    assert_eq!(dumped(&table, f), "f (Dummy, Elemental): Unknown");
}

#[test]
fn test_entity_bind_name_dump() {
    let (mut table, m) = table_with_module("m");
    let x = table.make_symbol(m, sn("x", 2, 1));
    table
        .set_details(x, Details::Entity(EntityDetails::new()))
        .unwrap();
    table.set_bind_name(x, "c_x".to_string()).unwrap();
    table.set_is_c_defined(x, true).unwrap();

    assert_eq!(dumped(&table, x), "x: Entity bindName:c_x CDEFINED");
}

#[test]
fn test_subprogram_dump() {
    let (mut table, m) = table_with_module("m");
    let f = table.make_symbol(m, sn("f", 2, 1));
    let scope = table.push_scope(m, ScopeKind::Subprogram);
    let a = table.make_symbol(scope, sn("a", 2, 10));
    let r = table.make_symbol(scope, sn("r", 2, 20));

    let mut subprogram = SubprogramDetails::new();
    subprogram.is_interface = true;
    subprogram.add_dummy_arg(a);
    subprogram.add_alternate_return();
    subprogram.set_result(r).unwrap();
    subprogram.entry_scope = Some(scope);
    table.set_details(f, Details::Subprogram(subprogram)).unwrap();
    table.set_bind_name(f, "c_f".to_string()).unwrap();

    assert_eq!(
        dumped(&table, f),
        "f: Subprogram isInterface bindName:c_f result:r entry (a,*)"
    );

    let p = table.make_symbol(m, sn("p", 3, 1));
    table
        .set_details(
            p,
            Details::SubprogramName(SubprogramNameDetails {
                kind: SubprogramKind::Internal,
            }),
        )
        .unwrap();
    assert_eq!(dumped(&table, p), "p: SubprogramName Internal");
}

#[test]
fn test_use_dump_names_the_source_module() {
    let (mut table, m1) = table_with_module("m1");
    let x = table.make_symbol(m1, sn("x", 2, 1));
    table
        .set_details(x, Details::Entity(EntityDetails::new()))
        .unwrap();

    let m2 = table.push_scope(table.global_scope(), ScopeKind::Module);
    let m2_sym = table.make_symbol(table.global_scope(), sn("m2", 5, 1));
    table.set_scope_symbol(m2, m2_sym).unwrap();

    let u = table.make_symbol(m2, sn("x", 6, 1));
    table
        .set_details(
            u,
            Details::Use(UseDetails {
                location: sn("x", 6, 1),
                symbol: x,
            }),
        )
        .unwrap();

    assert_eq!(dumped(&table, u), "x: Use from x in m1");
}

#[test]
fn test_use_error_dump_lists_every_occurrence() {
    let (mut table, m1) = table_with_module("m1");
    let m2_sym = table.make_symbol(table.global_scope(), sn("m2", 5, 1));
    table
        .set_details(m2_sym, Details::Module(ModuleDetails::default()))
        .unwrap();
    let m2_scope = table.push_scope(table.global_scope(), ScopeKind::Module);
    table.set_scope_symbol(m2_scope, m2_sym).unwrap();

    let a = table.make_symbol(m1, sn("e", 1, 10));
    let b = table.make_symbol(m2_scope, sn("e", 1, 20));

    let local = table.push_scope(table.global_scope(), ScopeKind::Subprogram);
    let e = table.make_symbol(local, sn("e", 2, 5));
    let mut details = UseErrorDetails::default();
    details.add_occurrence(sn("e", 2, 5), a);
    details.add_occurrence(sn("e", 3, 5), b);
    table.set_details(e, Details::UseError(details)).unwrap();

    assert_eq!(
        dumped(&table, e),
        "e: UseError uses: from e at 2:5..2:6, from e at 3:5..3:6"
    );
}

#[test]
fn test_generic_dump() {
    let (mut table, m1) = table_with_module("m1");
    let p1 = table.make_symbol(m1, sn("p1", 2, 1));
    table
        .set_details(p1, Details::Subprogram(SubprogramDetails::new()))
        .unwrap();
    let p2 = table.make_symbol(m1, sn("p2", 3, 1));
    table
        .set_details(p2, Details::Subprogram(SubprogramDetails::new()))
        .unwrap();

    let g = table.make_symbol(m1, sn("g", 4, 1));
    let mut details = GenericDetails::new(GenericKind::Name);
    details.add_specific_proc(p1, sn("p1", 4, 10));
    details.add_specific_proc(p2, sn("p2", 4, 20));
    table.set_details(g, Details::Generic(details)).unwrap();
    let p0 = table.make_symbol(m1, sn("p0", 5, 1));
    table.set_generic_specific(g, p0).unwrap();

    assert_eq!(dumped(&table, g), "g: Generic Name (specific) procs: p1,p2");

    // A merged-in import is attributed to its ultimate symbol's module.
    let (mut table, m1) = table_with_module("m1");
    let src = table.make_symbol(m1, sn("g", 2, 1));
    table
        .set_details(src, Details::Generic(GenericDetails::new(GenericKind::Name)))
        .unwrap();

    let m2_sym = table.make_symbol(table.global_scope(), sn("m2", 5, 1));
    table
        .set_details(m2_sym, Details::Module(ModuleDetails::default()))
        .unwrap();
    let m2 = table.push_scope(table.global_scope(), ScopeKind::Module);
    table.set_scope_symbol(m2, m2_sym).unwrap();

    let u = table.make_symbol(m2, sn("g", 6, 1));
    table
        .set_details(
            u,
            Details::Use(UseDetails {
                location: sn("g", 6, 1),
                symbol: src,
            }),
        )
        .unwrap();
    let g = table.make_symbol(m2, sn("g_local", 7, 1));
    table
        .set_details(g, Details::Generic(GenericDetails::new(GenericKind::Name)))
        .unwrap();
    table.add_generic_use(g, u).unwrap();

    assert_eq!(
        dumped(&table, g),
        "g_local: Generic Name (uses: g->m1) procs:"
    );
}

#[test]
fn test_proc_entity_and_proc_binding_dump() {
    let (mut table, m) = table_with_module("m");
    let iface = table.make_symbol(m, sn("iface", 2, 1));
    table
        .set_details(iface, Details::Subprogram(SubprogramDetails::new()))
        .unwrap();

    let p = table.make_symbol(m, sn("p", 3, 1));
    let mut proc = ProcEntityDetails::default();
    proc.interface = Some(iface);
    proc.pass_name = Some("obj".to_string());
    proc.init = Some(None);
    table.set_details(p, Details::ProcEntity(proc)).unwrap();
    assert_eq!(dumped(&table, p), "p: ProcEntity iface passName:obj => NULL()");

    let target = table.make_symbol(m, sn("impl_proc", 4, 1));
    table
        .set_details(target, Details::Subprogram(SubprogramDetails::new()))
        .unwrap();
    let pb = table.make_symbol(m, sn("pb", 5, 1));
    let mut binding = ProcBindingDetails::new(target);
    binding.pass_name = Some("obj".to_string());
    binding.num_privates_not_overridden = 2;
    table.set_details(pb, Details::ProcBinding(binding)).unwrap();
    assert_eq!(
        dumped(&table, pb),
        "pb: ProcBinding => impl_proc passName:obj numPrivatesNotOverridden: 2"
    );
}

#[test]
fn test_assoc_entity_rank_dump() {
    let (mut table, m) = table_with_module("m");

    let a1 = table.make_symbol(m, sn("a1", 2, 1));
    let mut details = AssocEntityDetails::new();
    details.set_rank(2);
    details.expr = Some(InitValue::new("sel"));
    table.set_details(a1, Details::AssocEntity(details)).unwrap();
    assert_eq!(dumped(&table, a1), "a1: AssocEntity RANK(2) expr:sel");

    let a2 = table.make_symbol(m, sn("a2", 3, 1));
    let mut details = AssocEntityDetails::new();
    details.set_is_assumed_size();
    table.set_details(a2, Details::AssocEntity(details)).unwrap();
    assert_eq!(dumped(&table, a2), "a2: AssocEntity RANK(*)");

    let a3 = table.make_symbol(m, sn("a3", 4, 1));
    let mut details = AssocEntityDetails::new();
    details.set_is_assumed_rank();
    table.set_details(a3, Details::AssocEntity(details)).unwrap();
    assert_eq!(dumped(&table, a3), "a3: AssocEntity RANK DEFAULT");
}

#[test]
fn test_remaining_kind_dumps() {
    let (mut table, m) = table_with_module("m");

    let main = table.make_symbol(m, sn("main", 2, 1));
    table
        .set_details(main, Details::MainProgram(MainProgramDetails))
        .unwrap();
    assert_eq!(dumped(&table, main), "main: MainProgram");

    let sub = table.make_symbol(m, sn("sub", 3, 1));
    let mut module = ModuleDetails::default();
    module.is_submodule = true;
    module.is_default_private = true;
    table.set_details(sub, Details::Module(module)).unwrap();
    assert_eq!(dumped(&table, sub), "sub: Module (submodule) isDefaultPrivate");

    let x = table.make_symbol(m, sn("x", 4, 1));
    table
        .set_details(x, Details::Entity(EntityDetails::new()))
        .unwrap();
    let h = table.make_symbol(m, sn("h", 5, 1));
    table
        .set_details(h, Details::HostAssoc(HostAssocDetails { symbol: x }))
        .unwrap();
    assert_eq!(dumped(&table, h), "h: HostAssoc");

    let t = table.make_symbol(m, sn("t", 6, 1));
    let mut derived = DerivedTypeDetails::new();
    derived.sequence = true;
    derived.push_component("base".to_string());
    derived.push_component("a".to_string());
    table.set_details(t, Details::DerivedType(derived)).unwrap();
    assert_eq!(dumped(&table, t), "t: DerivedType sequence components: base,a");

    let k = table.make_symbol(m, sn("k", 7, 1));
    let mut type_param = TypeParamDetails::new();
    type_param.set_type(TypeRef(1)).unwrap();
    type_param.set_attr(TypeParamAttr::Kind).unwrap();
    type_param.init = Some(InitValue::new("1"));
    table.set_details(k, Details::TypeParam(type_param)).unwrap();
    assert_eq!(dumped(&table, k), "k: TypeParam type:t1 Kind init:1");

    let l = table.make_symbol(m, sn("l", 8, 1));
    table
        .set_details(l, Details::TypeParam(TypeParamDetails::new()))
        .unwrap();
    assert_eq!(dumped(&table, l), "l: TypeParam (no attr)");

    let blk = table.make_symbol(m, sn("blk", 9, 1));
    table
        .set_details(
            blk,
            Details::Misc(MiscDetails {
                kind: MiscKind::ConstructName,
            }),
        )
        .unwrap();
    assert_eq!(dumped(&table, blk), "blk: Misc ConstructName");

    let red = table.make_symbol(m, sn("red", 10, 1));
    let mut reduction = UserReductionDetails::default();
    reduction.add_type(TypeRef(1));
    reduction.add_type(TypeRef(2));
    table
        .set_details(red, Details::UserReduction(reduction))
        .unwrap();
    assert_eq!(dumped(&table, red), "red: UserReduction t1 t2");
}

#[test]
fn test_common_block_dump() {
    let (mut table, m) = table_with_module("m");
    let x = table.make_symbol(m, sn("x", 2, 1));
    let y = table.make_symbol(m, sn("y", 3, 1));

    let cb = table.make_symbol(m, sn("cb", 4, 1));
    let mut common = CommonBlockDetails::new();
    common.objects.push(x);
    common.objects.push(y);
    common.alignment = 16;
    table.set_details(cb, Details::CommonBlock(common)).unwrap();
    table.set_bind_name(cb, "c_cb".to_string()).unwrap();

    assert_eq!(
        dumped(&table, cb),
        "cb: CommonBlock bindName:c_cb alignment=16: x y"
    );

    let n = table.make_symbol(m, sn("n", 5, 1));
    table
        .set_details(
            n,
            Details::Namelist(NamelistDetails {
                objects: vec![x, y],
            }),
        )
        .unwrap();
    assert_eq!(dumped(&table, n), "n: Namelist: x,y");
}

#[test]
fn test_scope_paths_and_qualified_names() {
    let (mut table, m) = table_with_module("m");
    assert_eq!(table.scope_path(table.global_scope()).to_string(), "");
    assert_eq!(table.scope_path(m).to_string(), "/m");

    let block1 = table.push_scope(m, ScopeKind::Block);
    let implied = table.push_scope(m, ScopeKind::ImpliedDos);
    let block2 = table.push_scope(m, ScopeKind::Block);

    // Ordinals count same-kind siblings only.
    assert_eq!(table.scope_path(block1).to_string(), "/m/Block1");
    assert_eq!(table.scope_path(implied).to_string(), "/m/ImpliedDos1");
    assert_eq!(table.scope_path(block2).to_string(), "/m/Block2");

    let x = table.make_symbol(block2, sn("x", 2, 1));
    assert_eq!(table.qualified_name(x).to_string(), "/m/Block2/x");

    let g = table.make_symbol(table.global_scope(), sn("g", 3, 1));
    assert_eq!(table.qualified_name(g).to_string(), "/g");
}

#[test]
fn test_scope_listing() {
    let (mut table, m) = table_with_module("m");

    let x = table.make_symbol(m, sn("x", 2, 1));
    let mut object = ObjectEntityDetails::new();
    object
        .set_shape(ArraySpec::new(vec![ShapeSpec::Explicit {
            lower: 1,
            upper: 10,
        }]))
        .unwrap();
    table.set_details(x, Details::ObjectEntity(object)).unwrap();
    table.set_type(x, TypeRef(1)).unwrap();

    let s = table.make_symbol(m, sn("s", 3, 1));
    let mut subprogram = SubprogramDetails::new();
    subprogram.add_dummy_arg(x);
    table.set_details(s, Details::Subprogram(subprogram)).unwrap();

    let n = table.make_symbol(m, sn("n", 4, 1));
    table
        .set_details(n, Details::Namelist(NamelistDetails { objects: vec![x] }))
        .unwrap();

    let mut out = String::new();
    for (_, id) in table.scope(m).symbols() {
        writeln!(out, "{}", table.dump(id)).unwrap();
    }
    assert_eq!(
        out,
        indoc! {"
            x: ObjectEntity type: t1 shape: 1:10
            s: Subprogram (x)
            n: Namelist: x
        "}
    );
}
