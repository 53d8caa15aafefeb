//! Resolution benchmarks using criterion.
//!
//! Run with: cargo bench --bench resolve_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use withbind::symbols::{Constructor, FactoryMethod, Param, TypeDef, TypeDefKind, TypeParamDef};
use withbind::{
    ArgValue, Argument, AssemblyId, CallSite, CollectionTarget, InterfaceKind, MemoryUniverse,
    Resolver, Ty, WithElement,
};

fn pos(ty: Ty) -> Argument {
    Argument::positional(ArgValue::of(ty))
}

/// Builder-backed set with four factory overloads: items only, capacity,
/// comparer, and capacity plus comparer.
fn builder_universe() -> (MemoryUniverse, CollectionTarget, Ty) {
    let mut u = MemoryUniverse::new();
    let comparer = u.add_type(
        TypeDef::new("IEqualityComparer", AssemblyId(0), TypeDefKind::Interface)
            .with_type_params(vec![TypeParamDef::new("T")]),
    );
    let comparer_of_t = Ty::named(comparer, "IEqualityComparer", vec![Ty::param(0, "T")]);
    let comparer_of_string = Ty::named(comparer, "IEqualityComparer", vec![Ty::string()]);
    let myset = u.add_type(
        TypeDef::new("MySet", AssemblyId(0), TypeDefKind::Class)
            .with_type_params(vec![TypeParamDef::new("T")]),
    );
    let builder = u.add_type(TypeDef::new("MySetBuilder", AssemblyId(0), TypeDefKind::Class));
    let items = || Param::new("items", Ty::read_only_span_of(Ty::param(0, "T")));
    u.add_factory_method(
        builder,
        FactoryMethod::new("Create", vec![items()], 0)
            .with_type_params(vec![TypeParamDef::new("T")]),
    );
    u.add_factory_method(
        builder,
        FactoryMethod::new("Create", vec![Param::new("capacity", Ty::int()), items()], 1)
            .with_type_params(vec![TypeParamDef::new("T")]),
    );
    u.add_factory_method(
        builder,
        FactoryMethod::new(
            "Create",
            vec![Param::new("comparer", comparer_of_t.clone()), items()],
            1,
        )
        .with_type_params(vec![TypeParamDef::new("T")]),
    );
    u.add_factory_method(
        builder,
        FactoryMethod::new(
            "Create",
            vec![
                Param::new("capacity", Ty::int()),
                Param::new("comparer", comparer_of_t),
                items(),
            ],
            2,
        )
        .with_type_params(vec![TypeParamDef::new("T")]),
    );
    let target = CollectionTarget::BuilderBacked {
        ty: u.ty_of(myset, vec![Ty::string()]).expect("MySet is registered"),
        builder,
        method_name: "Create".into(),
    };
    (u, target, comparer_of_string)
}

fn bench_builder_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder_resolution");
    let (u, target, comparer_ty) = builder_universe();
    let site = CallSite::new(AssemblyId(0));
    let resolver = Resolver::new(&u);

    group.bench_function("no_args", |b| {
        b.iter(|| black_box(resolver.resolve(&target, None, &site)));
    });

    let capacity = WithElement::new(vec![pos(Ty::int())]);
    group.bench_function("capacity", |b| {
        b.iter(|| black_box(resolver.resolve(&target, Some(&capacity), &site)));
    });

    let both = WithElement::new(vec![pos(Ty::int()), pos(comparer_ty)]);
    group.bench_function("capacity_and_comparer", |b| {
        b.iter(|| black_box(resolver.resolve(&target, Some(&both), &site)));
    });

    group.finish();
}

fn bench_interface_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("interface_resolution");
    let mut u = MemoryUniverse::new();
    let comparer = u.add_type(
        TypeDef::new("IEqualityComparer", AssemblyId(0), TypeDefKind::Interface)
            .with_type_params(vec![TypeParamDef::new("T")]),
    );
    let list = u.add_type(
        TypeDef::new("List", AssemblyId(0), TypeDefKind::Class)
            .with_type_params(vec![TypeParamDef::new("T")])
            .with_constructors(vec![
                Constructor::new(vec![]),
                Constructor::new(vec![Param::new("capacity", Ty::int())]),
                Constructor::new(vec![Param::new(
                    "comparer",
                    Ty::named(comparer, "IEqualityComparer", vec![Ty::param(0, "T")]),
                )]),
            ]),
    );
    u.set_well_known_list(list);
    let dict = u.add_type(
        TypeDef::new("Dictionary", AssemblyId(0), TypeDefKind::Class)
            .with_type_params(vec![TypeParamDef::new("TKey"), TypeParamDef::new("TValue")])
            .with_constructors(vec![
                Constructor::new(vec![]),
                Constructor::new(vec![Param::new("capacity", Ty::int())]),
            ]),
    );
    u.set_well_known_dictionary(dict);
    let site = CallSite::new(AssemblyId(0));
    let resolver = Resolver::new(&u);

    let list_target =
        CollectionTarget::Interface { kind: InterfaceKind::List, args: vec![Ty::int()] };
    let named_capacity =
        WithElement::new(vec![Argument::named("capacity", ArgValue::of(Ty::int()))]);
    group.bench_function("list_named_capacity", |b| {
        b.iter(|| black_box(resolver.resolve(&list_target, Some(&named_capacity), &site)));
    });

    let dict_target = CollectionTarget::Interface {
        kind: InterfaceKind::Dictionary,
        args: vec![Ty::string(), Ty::int()],
    };
    let capacity = WithElement::new(vec![pos(Ty::int())]);
    group.bench_function("dictionary_capacity", |b| {
        b.iter(|| black_box(resolver.resolve(&dict_target, Some(&capacity), &site)));
    });

    group.finish();
}

fn bench_candidate_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_scan");

    // One constructor per arity; three supplied ints bind exactly one.
    for count in [4usize, 16, 64] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("constructors", count),
            &count,
            |b, &count| {
                let ctors: Vec<Constructor> = (0..count)
                    .map(|arity| {
                        Constructor::new(
                            (0..arity)
                                .map(|i| Param::new(format!("p{}", i), Ty::int()))
                                .collect(),
                        )
                    })
                    .collect();
                let mut u = MemoryUniverse::new();
                let bag = u.add_type(
                    TypeDef::new("Bag", AssemblyId(0), TypeDefKind::Class)
                        .with_constructors(ctors),
                );
                let target = CollectionTarget::UserDefined {
                    ty: u.ty_of(bag, vec![]).expect("Bag is registered"),
                };
                let site = CallSite::new(AssemblyId(0));
                let with =
                    WithElement::new(vec![pos(Ty::int()), pos(Ty::int()), pos(Ty::int())]);
                let resolver = Resolver::new(&u);
                b.iter(|| black_box(resolver.resolve(&target, Some(&with), &site)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_builder_resolution,
    bench_interface_resolution,
    bench_candidate_scan,
);
criterion_main!(benches);
