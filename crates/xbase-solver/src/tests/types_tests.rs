use super::*;

#[test]
fn test_well_known_ids_match_names() {
    let types = TypeTable::new();
    assert_eq!(types.len(), TypeId::FIRST_USER as usize);
    assert_eq!(types.name(TypeId::INT32), "LONG");
    assert_eq!(types.name(TypeId::UINT16), "WORD");
    assert_eq!(types.name(TypeId::USUAL), "USUAL");
    assert_eq!(types.name(TypeId::USUAL_ARRAY), "USUAL[]");
    assert_eq!(types.name(TypeId::FORMAT_PROVIDER), "IFormatProvider");
    assert_eq!(types.name(TypeId::NULL), "NULL");
    assert_eq!(types.name(TypeId(10_000)), "<unknown>");
    assert!(TypeId::NULL.is_well_known());
    assert!(!TypeId(TypeId::FIRST_USER).is_well_known());
}

#[test]
fn test_pointer_size_follows_platform() {
    let narrow = TypeTable::with_pointer_size(4);
    assert_eq!(narrow.pointer_size(), 4);
    assert_eq!(narrow.get(TypeId::INTPTR).map(|d| d.size), Some(4));
    assert_eq!(narrow.get(TypeId::VOID_POINTER).map(|d| d.size), Some(4));

    let wide = TypeTable::new();
    assert_eq!(wide.get(TypeId::UINTPTR).map(|d| d.size), Some(8));
}

#[test]
fn test_register_deduplicates_name_and_shape() {
    let mut types = TypeTable::new();
    let first = types.register(TypeBuilder::class("Customer"));
    let second = types.register(TypeBuilder::class("Customer"));
    assert_eq!(first, second);

    // Same name, different shape.
    let other = types.register(TypeBuilder::interface("Customer"));
    assert_ne!(first, other);
    assert_eq!(types.lookup("Customer", TypeKind::Interface), Some(other));
}

#[test]
fn test_pointer_and_array_constructors_are_interned() {
    let mut types = TypeTable::new();
    let p1 = types.pointer_to(TypeId::INT32);
    let p2 = types.pointer_to(TypeId::INT32);
    assert_eq!(p1, p2);
    assert_eq!(types.name(p1), "LONG*");
    assert_eq!(
        types.get(p1).map(|d| d.kind),
        Some(TypeKind::Pointer {
            pointee: TypeId::INT32
        })
    );

    let arr = types.array_of(TypeId::STRING);
    assert_eq!(types.name(arr), "STRING[]");
    assert_eq!(types.get(arr).and_then(|d| d.base), Some(TypeId::OBJECT));
}

#[test]
fn test_usual_declares_only_incoming_operators() {
    let types = TypeTable::new();
    let usual = types.get(TypeId::USUAL).expect("USUAL is well known");
    assert!(!usual.operators.is_empty());
    assert!(usual.operators.iter().all(|op| op.result == TypeId::USUAL && op.is_implicit));
    assert!(usual.operators.iter().any(|op| {
        op.parameter == TypeId::OBJECT && op.symbol == well_known_operators::USUAL_FROM_OBJECT
    }));
}

#[test]
fn test_builder_collects_interfaces_once() {
    let mut types = TypeTable::new();
    let iface = types.register(TypeBuilder::interface("IPrintable"));
    let class = types.register(
        TypeBuilder::class("Report")
            .implements(iface)
            .implements(iface),
    );
    let data = types.get(class).expect("registered");
    assert_eq!(data.interfaces.len(), 1);
    assert_eq!(data.base, Some(TypeId::OBJECT));
    assert!(data.is_reference_type());
}
