//! Property coverage for the sizing invariant.

use proptest::prelude::*;
use shoal_core::domain::Side;
use shoal_core::strategy::sizing::{bounded, capacity};

proptest! {
    #[test]
    fn a_bounded_buy_never_breaches_the_limit(
        limit in 1i64..=250,
        offset in 0i64..=500,
        requested in 0i64..=500,
        shown in 0i64..=500,
    ) {
        let position = -limit + (offset % (2 * limit + 1));
        let qty = bounded(requested, capacity(Side::Bid, position, limit), shown);
        prop_assert!(qty >= 0);
        prop_assert!(qty <= shown);
        prop_assert!((position + qty).abs() <= limit);
    }

    #[test]
    fn a_bounded_sell_never_breaches_the_limit(
        limit in 1i64..=250,
        offset in 0i64..=500,
        requested in 0i64..=500,
        shown in 0i64..=500,
    ) {
        let position = -limit + (offset % (2 * limit + 1));
        let qty = bounded(requested, capacity(Side::Ask, position, limit), shown);
        prop_assert!(qty >= 0);
        prop_assert!(qty <= shown);
        prop_assert!((position - qty).abs() <= limit);
    }

    #[test]
    fn capacity_is_exact_at_the_boundary(limit in 1i64..=250) {
        prop_assert_eq!(capacity(Side::Bid, limit, limit), 0);
        prop_assert_eq!(capacity(Side::Ask, -limit, limit), 0);
        prop_assert_eq!(capacity(Side::Bid, -limit, limit), 2 * limit);
        prop_assert_eq!(capacity(Side::Ask, limit, limit), 2 * limit);
    }
}
