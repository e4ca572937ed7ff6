//! End-to-end resolution over a realistic hierarchy, through the public API.

use sable_resolve::checks::{
    check_extension_receiver, check_operator_operand, check_readonly_markers, ExtensionDecl,
    Operand, OperatorApp, OperatorKind,
};
use sable_resolve::graph::{GraphBuilder, MemberDecl, MemberKind};
use sable_resolve::hir::{
    BodyId, MemberSig, ParamSig, SigFlags, Type, TyVarId, TypeParamDecl,
};
use sable_resolve::span::Span;
use sable_resolve::{
    resolve_qualified, AmbiguityKind, ImplOrigin, ImplResolver, QualifiedCallError,
    ResolutionCache, ResolutionResult,
};

/// A small stream-processing hierarchy:
///
/// ```text
/// Source { pull() }           -- abstract slot
/// Buffered : Source           -- explicit impl of Source.pull
/// Compressed : Source         -- explicit impl of Source.pull
/// Archive : Buffered, Compressed
/// SealedArchive : Archive     -- explicit impl of Source.pull
/// class TapeArchive : Archive -- concrete pull()
/// ```
#[test]
fn stream_hierarchy_end_to_end() {
    let mut b = GraphBuilder::new();
    let pull = MemberSig::nullary(b.intern("pull"));

    let source = b.add_interface("Source", &[]);
    b.declare_abstract(source, pull.clone()).unwrap();

    let buffered = b.add_interface("Buffered", &[source]);
    b.declare_explicit(buffered, source, pull.clone(), BodyId::new(10)).unwrap();

    let compressed = b.add_interface("Compressed", &[source]);
    b.declare_explicit(compressed, source, pull.clone(), BodyId::new(20)).unwrap();

    let archive = b.add_interface("Archive", &[buffered, compressed]);

    let sealed = b.add_interface("SealedArchive", &[archive]);
    b.declare_explicit(sealed, source, pull.clone(), BodyId::new(30)).unwrap();

    let tape = b.add_class("TapeArchive", None, &[archive]);
    b.declare_concrete(tape, pull.clone(), BodyId::new(40)).unwrap();

    let graph = b.finish().unwrap();
    let resolver = ImplResolver::new(&graph);

    // Archive inherits two incomparable implementations of one slot.
    match resolver.resolve(archive, &pull) {
        ResolutionResult::Ambiguous(err) => {
            assert_eq!(err.kind, AmbiguityKind::Implementation { root: source });
            assert_eq!(err.competing_owners(), vec![buffered, compressed]);
            let msg = err.render(&graph);
            assert!(msg.contains("Buffered") && msg.contains("Compressed"));
        }
        other => panic!("expected Ambiguous, got {:?}", other),
    }

    // The sealed variant settles the diamond with its own record.
    let record = resolver.resolve(sealed, &pull).unique().cloned().unwrap();
    assert_eq!(record.owner, sealed);
    assert_eq!(record.origin, ImplOrigin::Explicit { target: source });

    // The class settles it by highjacking the slot.
    let record = resolver.resolve(tape, &pull).unique().cloned().unwrap();
    assert_eq!(record.owner, tape);
    assert_eq!(record.origin, ImplOrigin::ClassMember);
    assert_eq!(record.body, BodyId::new(40));

    // From inside SealedArchive's body, a qualified call reaches one arm
    // of the diamond without re-running resolution.
    let record = resolve_qualified(&graph, sealed, buffered, &pull, None).unwrap();
    assert_eq!(record.body, BodyId::new(10));

    // The abstract root owns no record; exactness over fallback.
    assert_eq!(
        resolve_qualified(&graph, sealed, source, &pull, None).unwrap_err(),
        QualifiedCallError::NoSuchImplementation { ancestor: source, sig: pull.clone() }
    );

    // Memoized and direct resolution agree across the whole hierarchy.
    let mut cache = ResolutionCache::new(&graph);
    for ty in [source, buffered, compressed, archive, sealed, tape] {
        assert_eq!(cache.resolve(ty, &pull), &resolver.resolve(ty, &pull));
    }
    assert_eq!(cache.len(), 6);
}

#[test]
fn retraction_splits_the_hierarchy() {
    let mut b = GraphBuilder::new();
    let flush = MemberSig::nullary(b.intern("flush"));

    let sink = b.add_interface("Sink", &[]);
    b.declare_default(sink, flush.clone(), BodyId::new(1)).unwrap();

    // UnbufferedSink retracts the inherited default; its subtree must
    // implement flush explicitly again.
    let unbuffered = b.add_interface("UnbufferedSink", &[sink]);
    b.declare_deimpl(unbuffered, flush.clone()).unwrap();

    let console = b.add_interface("ConsoleSink", &[unbuffered]);
    let file = b.add_interface("FileSink", &[sink]);
    let graph = b.finish().unwrap();

    let resolver = ImplResolver::new(&graph);
    assert_eq!(resolver.resolve(console, &flush), ResolutionResult::Unimplemented);
    assert_eq!(
        resolver.resolve(file, &flush).unique().map(|r| r.owner),
        Some(sink)
    );

    // A qualified call can still name the retracted default's owner.
    let record = resolve_qualified(&graph, console, sink, &flush, None).unwrap();
    assert_eq!(record.body, BodyId::new(1));
}

#[test]
fn compatibility_checks_are_independent_per_declaration() {
    let mut b = GraphBuilder::new();

    // A poisoned signature done right and one that drifted.
    let consistent = MemberDecl::new(
        MemberSig::method(b.intern("peek"), vec![ParamSig::readonly_ref(Type::i64())]),
        MemberKind::Default { body: BodyId::new(1) },
    )
    .with_flags(SigFlags::READONLY_REF | SigFlags::POISONED);

    let drifted = MemberDecl::new(
        MemberSig::method(b.intern("poke"), vec![ParamSig::readonly_ref(Type::i64())]),
        MemberKind::Default { body: BodyId::new(2) },
    )
    .with_flags(SigFlags::READONLY_REF | SigFlags::VIRTUAL);

    assert!(check_readonly_markers(&consistent).is_ok());
    assert!(check_readonly_markers(&drifted).is_err());
    // The drifted declaration does not taint the consistent one.
    assert!(check_readonly_markers(&consistent).is_ok());

    // Extension receivers are judged on declared shape alone.
    let t = TyVarId::new(0);
    let by_value = ExtensionDecl {
        name: "lines".to_string(),
        type_params: vec![TypeParamDecl::unconstrained("T", t)],
        receiver: ParamSig::value(Type::param(t)),
        span: Span::dummy(),
    };
    let by_ref = ExtensionDecl {
        name: "normalize".to_string(),
        type_params: vec![TypeParamDecl::unconstrained("T", t)],
        receiver: ParamSig::by_ref(Type::param(t)),
        span: Span::dummy(),
    };
    assert!(check_extension_receiver(&by_value).is_ok());
    assert!(check_extension_receiver(&by_ref).is_err());

    // Default-value operands are rejected even with one applicable
    // operator under the current type set.
    let app = OperatorApp::binary(
        OperatorKind::Add,
        Operand::Typed(Type::i32()),
        Operand::DefaultLiteral,
    );
    assert!(check_operator_operand(&app).is_err());
    let typed = OperatorApp::binary(
        OperatorKind::Add,
        Operand::Typed(Type::i32()),
        Operand::Typed(Type::i32()),
    );
    assert!(check_operator_operand(&typed).is_ok());
}
