//! Placeholder box predictor.
//!
//! There is no model behind this: it emits one to three random boxes that
//! fit inside the unit square, labelled `ML_obj_1` to `ML_obj_10`.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::ports::BoxGenerator;

use super::{BoxDraft, ClassName};

/// Number of boxes produced per prediction.
pub const PREDICTED_BOX_COUNT: RangeInclusive<usize> = 1..=3;
/// Range for the normalised width and height of each box.
pub const PREDICTED_SIZE_RANGE: RangeInclusive<f64> = 0.10..=0.45;
/// Range of the numeric suffix in predicted class names.
pub const PREDICTED_CLASS_RANGE: RangeInclusive<u8> = 1..=10;

/// [`BoxGenerator`] backed by a freshly seeded small RNG per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomBoxGenerator;

impl BoxGenerator for RandomBoxGenerator {
    fn generate(&self) -> Vec<BoxDraft> {
        generate_boxes(&mut SmallRng::from_entropy())
    }
}

/// Draw a batch of boxes from `rng`.
///
/// Width and height come from [`PREDICTED_SIZE_RANGE`]; the origin is chosen
/// so that the box stays within `[0, 1]` on both axes.
pub fn generate_boxes<G: Rng>(rng: &mut G) -> Vec<BoxDraft> {
    let count = rng.gen_range(PREDICTED_BOX_COUNT);
    (0..count)
        .map(|_| {
            let w = rng.gen_range(PREDICTED_SIZE_RANGE);
            let h = rng.gen_range(PREDICTED_SIZE_RANGE);
            BoxDraft {
                x: rng.gen_range(0.0..=1.0 - w),
                y: rng.gen_range(0.0..=1.0 - h),
                w,
                h,
                class_name: ClassName::predicted(rng.gen_range(PREDICTED_CLASS_RANGE)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn seeded_batches_stay_within_bounds() {
        for seed in 0..500_u64 {
            let boxes = generate_boxes(&mut SmallRng::seed_from_u64(seed));

            assert!(PREDICTED_BOX_COUNT.contains(&boxes.len()), "seed {seed}");
            for draft in boxes {
                assert!(PREDICTED_SIZE_RANGE.contains(&draft.w), "seed {seed}");
                assert!(PREDICTED_SIZE_RANGE.contains(&draft.h), "seed {seed}");
                assert!(draft.x >= 0.0 && draft.x + draft.w <= 1.0 + f64::EPSILON);
                assert!(draft.y >= 0.0 && draft.y + draft.h <= 1.0 + f64::EPSILON);

                let suffix: u8 = draft
                    .class_name
                    .as_ref()
                    .strip_prefix("ML_obj_")
                    .and_then(|n| n.parse().ok())
                    .expect("predicted class names carry a numeric suffix");
                assert!(PREDICTED_CLASS_RANGE.contains(&suffix));
            }
        }
    }

    #[rstest]
    fn random_generator_produces_a_batch() {
        let boxes = RandomBoxGenerator.generate();
        assert!(PREDICTED_BOX_COUNT.contains(&boxes.len()));
    }

    #[rstest]
    fn identical_seeds_give_identical_batches() {
        let first = generate_boxes(&mut SmallRng::seed_from_u64(7));
        let second = generate_boxes(&mut SmallRng::seed_from_u64(7));
        assert_eq!(first, second);
    }
}
