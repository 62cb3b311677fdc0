//! # neo-verify — Proofs for the Search Primitives
//!
//! Kani harnesses over the pieces of the executor whose behaviour must hold
//! for every input, not just sampled ones:
//!
//! - operator semantics: `>=` is exactly `>` or `=`,
//! - field resolution: a field is readable on precisely the kind it names,
//! - result shaping: truncation never exceeds the cap and never invents items.
//!
//! Run with `cargo kani --package neo-verify`.

extern crate neo_query;

#[cfg(kani)]
mod proofs {
    use core::cmp::Ordering;

    use neo_core::{EntityKind, NearEarthObject, OrbitPath};
    use neo_query::{take_limit, Comparison, Field, Filterable};

    fn any_ordering() -> Ordering {
        kani::any::<i8>().cmp(&0)
    }

    fn any_field() -> Field {
        match kani::any::<u8>() % 3 {
            0 => Field::Hazardous,
            1 => Field::Diameter,
            _ => Field::Distance,
        }
    }

    /// **Proof: `>=` is the union of `>` and `=`**
    #[kani::proof]
    fn verify_gte_is_gt_or_eq() {
        let o = any_ordering();
        assert_eq!(
            Comparison::Gte.accepts(o),
            Comparison::Gt.accepts(o) || Comparison::Eq.accepts(o)
        );
        assert!(!(Comparison::Gt.accepts(o) && Comparison::Eq.accepts(o)));
    }

    /// **Proof: a field reads only on the kind that declares it**
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_field_kind_resolution() {
        let field = any_field();
        let neo = NearEarthObject::new("1", "A", kani::any(), kani::any());
        let path = OrbitPath::new("A", chrono::NaiveDate::MIN, kani::any());

        assert_eq!(
            neo.field_value(field).is_some(),
            field.kind() == EntityKind::NearEarthObject
        );
        assert_eq!(
            path.field_value(field).is_some(),
            field.kind() == EntityKind::OrbitPath
        );
    }

    /// **Proof: truncation returns `min(len, limit)` leading items**
    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_take_limit() {
        let items: [u8; 4] = kani::any();
        let len: usize = kani::any();
        let limit: usize = kani::any();
        kani::assume(len <= 4);
        kani::assume(limit <= 5);

        let taken = take_limit(items[..len].to_vec(), limit);

        assert_eq!(taken.len(), len.min(limit));
        for i in 0..taken.len() {
            assert_eq!(taken[i], items[i]);
        }
    }
}
