//! Integration tests for declaration identities.

use std::collections::HashMap;

use bindex_foundation::DeclarationIdentity;

#[test]
fn identities_key_maps() {
    let mut map = HashMap::new();
    map.insert(DeclarationIdentity::new("c:@S@S"), 1u32);
    map.insert(DeclarationIdentity::new("c:@S@T"), 2u32);

    // A fresh identity with the same signature resolves to the same entry.
    assert_eq!(map.get(&DeclarationIdentity::new("c:@S@S")), Some(&1));
    assert_eq!(map.len(), 2);
}

#[test]
fn identity_is_opaque_but_displayable() {
    let id = DeclarationIdentity::new("c:@F@add");
    assert_eq!(id.as_str(), "c:@F@add");
    assert_eq!(format!("{id}"), "c:@F@add");
}

#[test]
fn distinct_signatures_never_collide() {
    let a = DeclarationIdentity::new("c:@S@S");
    let b = DeclarationIdentity::new("c:@U@S");
    assert_ne!(a, b);
}
