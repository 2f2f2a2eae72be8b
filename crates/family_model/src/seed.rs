//! Canonical seed dataset

use crate::{FamilyMember, PersonId, DEFAULT_PORTRAIT};
use std::sync::Arc;

/// The fixed three-generation starter tree: one root, two ancestors, one
/// of them with a further ancestor. Also the canonical test fixture.
pub fn seed_family() -> Arc<FamilyMember> {
    let father_rigby = Arc::new(
        FamilyMember::new(PersonId::new("p3"), "Father Rigby", "1899", DEFAULT_PORTRAIT)
            .with_relationship("Father"),
    );

    let eleanor = Arc::new(
        FamilyMember::new(PersonId::new("p1"), "Eleanor Rigby", "1925", DEFAULT_PORTRAIT)
            .with_relationship("Mother")
            .with_parents(vec![father_rigby]),
    );

    let arthur = Arc::new(
        FamilyMember::new(PersonId::new("p2"), "Arthur Legacy", "1928", DEFAULT_PORTRAIT)
            .with_relationship("Father"),
    );

    Arc::new(
        FamilyMember::new(PersonId::root(), "Samuel Legacy", "1955", DEFAULT_PORTRAIT)
            .with_parents(vec![eleanor, arthur]),
    )
}
