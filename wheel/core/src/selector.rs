//! Selector
//!
//! Uniform random choice over a candidate list.

use rand::Rng;

use crate::catalog::BreakfastItem;

/// Pick one item uniformly at random
///
/// The candidate list must be non-empty (see [`crate::filter::candidates`]);
/// an empty list is a caller bug and yields `None`.
pub fn pick<'a, R: Rng + ?Sized>(
    candidates: &[&'a BreakfastItem],
    rng: &mut R,
) -> Option<&'a BreakfastItem> {
    debug_assert!(!candidates.is_empty(), "pick() called with no candidates");
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardMarkup, Catalog};
    use crate::filter::{candidates, filter};
    use crate::mood::Mood;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_single_candidate_always_wins() {
        let catalog = Catalog::from_markup(vec![
            CardMarkup::new("Pancakes", Some("comfort")),
            CardMarkup::new("Oats", Some("healthy")),
        ])
        .unwrap();
        let visible = filter(&catalog, &Mood::new("healthy"));
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            assert_eq!(pick(&visible, &mut rng).unwrap().name, "Oats");
        }
    }

    #[test]
    fn test_pick_over_fallback_never_fails() {
        let catalog = Catalog::from_markup(vec![CardMarkup::new("Pancakes", Some("comfort"))])
            .unwrap();
        let c = candidates(&catalog, &Mood::new("healthy"));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&c.items, &mut rng).unwrap().name, "Pancakes");
    }

    #[test]
    fn test_pick_is_uniform() {
        let cards = (0..5)
            .map(|i| CardMarkup::new(format!("Item {i}"), None))
            .collect();
        let catalog = Catalog::from_markup(cards).unwrap();
        let visible = filter(&catalog, &Mood::any());
        assert_eq!(visible.len(), 5);

        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 5];
        let trials = 10_000;
        for _ in 0..trials {
            let item = pick(&visible, &mut rng).unwrap();
            counts[item.id.index()] += 1;
        }

        for count in counts {
            let share = count as f64 / trials as f64;
            assert!((share - 0.2).abs() < 0.03, "share {share} outside 20% ± 3%");
        }
    }
}
