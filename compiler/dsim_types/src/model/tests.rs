use dsim_ir::{ParamKind, ReturnKind};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn names_resolve_to_registered_types() {
    let mut m = Model::new();
    let base = m.interface("Base", &[]).unwrap();
    let a = m.class("A", &["Base"]).unwrap();

    assert_eq!(m.ty("Base"), Ok(base));
    assert_eq!(m.ty("A"), Ok(a));
    assert_eq!(m.render_type(a), "A");
    assert_eq!(m.graph().kind(base), Some(TypeKind::Interface));
    assert!(m.graph().is_subtype(a, base));
}

#[test]
fn members_need_a_registered_owner() {
    let mut m = Model::new();
    let err = m
        .member("Ghost", "run", &[], ReturnKind::Void, BodyKind::Concrete)
        .unwrap_err();
    assert_eq!(err, ModelError::UnknownName("Ghost".to_string()));
    assert!(m.catalog().is_empty());
}

#[test]
fn call_spells_casts_innermost_first() {
    let mut m = Model::new();
    m.interface("Root", &[]).unwrap();
    m.interface("Left", &["Root"]).unwrap();
    m.class("Leaf", &["Left"]).unwrap();

    let site = m
        .call("Left", "Leaf", &["Root", "Leaf"], "go", &[ParamKind::Int])
        .unwrap();
    assert_eq!(site.declared, m.ty("Left").unwrap());
    assert_eq!(site.runtime, m.ty("Leaf").unwrap());
    assert_eq!(
        site.casts.as_slice(),
        &[m.ty("Root").unwrap(), m.ty("Leaf").unwrap()]
    );
    assert_eq!(site.args.as_slice(), &[ParamKind::Int]);

    assert!(matches!(
        m.call("Left", "Nope", &[], "go", &[]),
        Err(ModelError::UnknownName(_))
    ));
}

#[test]
fn clones_share_names_but_not_graphs() {
    let mut m = Model::new();
    m.interface("Base", &[]).unwrap();
    let mut copy = m.clone();
    copy.class("Extra", &["Base"]).unwrap();

    assert_eq!(copy.graph().len(), 2);
    assert_eq!(m.graph().len(), 1);
    assert!(m.ty("Extra").is_err());
}
