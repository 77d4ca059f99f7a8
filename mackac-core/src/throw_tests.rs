use std::cmp::Ordering;

use crate::chance::ChanceMode;
use crate::die::Die;
use crate::throw::{mackac_order, rank_index, Throw, ThrowError, CATALOG, CATALOG_SIZE};

fn throw(a: u8, b: u8) -> Throw {
    Throw::from_faces(a, b).unwrap()
}

fn catalog_throws() -> Vec<Throw> {
    CATALOG.iter().map(|&(a, b)| throw(a, b)).collect()
}

#[test]
fn die_starts_unrolled_and_rolls_in_range() {
    let mut die = Die::unrolled();
    assert_eq!(die.face(), None);

    let mut chance = ChanceMode::seeded(42);
    for _ in 0..100 {
        let face = die.roll(&mut chance).unwrap();
        assert!((1..=6).contains(&face));
        assert_eq!(die.face(), Some(face));
    }
}

#[test]
fn face_out_of_range_is_rejected() {
    assert_eq!(Throw::from_faces(0, 3), Err(ThrowError::FaceOutOfRange(0)));
    assert_eq!(Throw::from_faces(2, 7), Err(ThrowError::FaceOutOfRange(7)));
}

#[test]
fn from_dice_requires_rolled_faces() {
    let unrolled = Die::unrolled();
    let mut rolled = Die::unrolled();
    let mut chance = ChanceMode::scripted([4]);
    rolled.roll(&mut chance).unwrap();

    assert_eq!(Throw::from_dice(&unrolled, &rolled), Err(ThrowError::Unrolled));
    assert_eq!(Throw::from_dice(&rolled, &rolled), Ok(throw(4, 4)));
}

#[test]
fn classification_invariant() {
    for x in 1..=6u8 {
        let double = throw(x, x);
        assert!(double.is_double());
        assert_eq!(double.double_value(), Some(x));
        for y in 1..=6u8 {
            if x == y {
                continue;
            }
            let t = throw(x, y);
            assert!(!t.is_double());
            assert_eq!(t.double_value(), None);
            assert_eq!(t.pair_value(), x.max(y) * 10 + x.min(y));
        }
    }
}

#[test]
fn special_throw_is_two_one_only() {
    for x in 1..=6u8 {
        for y in 1..=6u8 {
            let expected = (x, y) == (2, 1) || (x, y) == (1, 2);
            assert_eq!(throw(x, y).is_special(), expected, "({},{})", x, y);
        }
    }
}

#[test]
fn die_order_within_throw_never_affects_rank() {
    for a in 1..=6u8 {
        for b in 1..=6u8 {
            let lhs = throw(a, b);
            let swapped = throw(b, a);
            assert_eq!(lhs, swapped);
            for c in 1..=6u8 {
                for d in 1..=6u8 {
                    let rhs = throw(c, d);
                    assert_eq!(mackac_order(&lhs, &rhs), mackac_order(&swapped, &rhs));
                }
            }
        }
    }
}

#[test]
fn total_order_over_catalog() {
    let throws = catalog_throws();

    // Irreflexive, and rank agrees with catalog position.
    for (i, t) in throws.iter().enumerate() {
        assert_eq!(mackac_order(t, t), Ordering::Equal);
        assert_eq!(rank_index(t), i);
    }

    // Antisymmetric, consistent with catalog position from both argument sides.
    for (i, t1) in throws.iter().enumerate() {
        for (j, t2) in throws.iter().enumerate() {
            let expected = i.cmp(&j);
            assert_eq!(mackac_order(t1, t2), expected, "{} vs {}", t1, t2);
            assert_eq!(mackac_order(t2, t1), expected.reverse(), "{} vs {}", t2, t1);
        }
    }

    // Transitive over all triples.
    for t1 in &throws {
        for t2 in &throws {
            for t3 in &throws {
                if mackac_order(t1, t2) == Ordering::Less
                    && mackac_order(t2, t3) == Ordering::Less
                {
                    assert_eq!(mackac_order(t1, t3), Ordering::Less);
                }
            }
        }
    }
}

#[test]
fn special_outranks_everything_from_both_argument_positions() {
    let special = throw(2, 1);
    for &(a, b) in CATALOG.iter() {
        let other = throw(a, b);
        if other == special {
            continue;
        }
        assert_eq!(mackac_order(&special, &other), Ordering::Greater);
        assert_eq!(mackac_order(&other, &special), Ordering::Less);
    }
}

#[test]
fn rank_scenarios() {
    // Non-doubles compare by pair value.
    assert_eq!(mackac_order(&throw(3, 1), &throw(6, 5)), Ordering::Less);
    // Any double beats any non-double.
    assert_eq!(mackac_order(&throw(1, 1), &throw(6, 5)), Ordering::Greater);
    // The Mačkáč beats the highest double.
    assert_eq!(mackac_order(&throw(2, 1), &throw(6, 6)), Ordering::Greater);
}

#[test]
fn rank_is_strictly_monotonic_along_catalog() {
    let throws = catalog_throws();
    for pair in throws.windows(2) {
        assert!(rank_index(&pair[0]) < rank_index(&pair[1]));
        assert_eq!(mackac_order(&pair[0], &pair[1]), Ordering::Less);
    }
    assert_eq!(rank_index(&Throw::lowest()), 0);
    assert_eq!(rank_index(&throw(2, 1)), CATALOG_SIZE - 1);
}

#[test]
fn atomic_roll_replaces_both_faces() {
    let mut chance = ChanceMode::scripted([3, 5]);
    let t = Throw::roll(&mut chance).unwrap();
    assert_eq!(t, throw(5, 3));
}

#[test]
fn display_follows_pair_value_reading() {
    assert_eq!(throw(3, 6).to_string(), "[3,6] = 63");
    assert_eq!(throw(4, 4).to_string(), "[4,4] = 4 natives");
    assert_eq!(throw(2, 1).to_string(), "[2,1] = MACKAC");
}
