use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use koten_detect::common::{Candidate, LayoutBox};
use koten_detect::{iou, nms};

fn random_box(rng: &mut StdRng) -> LayoutBox {
    let x1 = rng.gen_range(0.0..500.0f32);
    let y1 = rng.gen_range(0.0..500.0f32);
    LayoutBox::new(x1, y1, x1 + rng.gen_range(1.0..150.0), y1 + rng.gen_range(1.0..150.0))
}

/// Candidates with distinct confidences, so tie-breaking never matters.
fn random_candidates(rng: &mut StdRng, n: usize, classes: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            let confidence = 0.05 + 0.9 * (i as f32 / n as f32);
            Candidate::new(random_box(rng), confidence, rng.gen_range(0..classes))
        })
        .collect()
}

#[test]
fn iou_is_symmetric_and_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let (a, b) = (random_box(&mut rng), random_box(&mut rng));
        let (ab, ba) = (iou(&a, &b), iou(&b, &a));
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
        assert!((iou(&a, &a) - 1.0).abs() < 1e-5);
    }
}

#[test]
fn nms_never_grows_and_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..50 {
        let candidates = random_candidates(&mut rng, 60, 4);
        let threshold = [0.3, 0.45, 0.7][round % 3];

        let kept = nms(&candidates, threshold);
        assert!(kept.len() <= candidates.len());
        assert_eq!(nms(&kept, threshold), kept);
    }
}

#[test]
fn nms_keeps_each_class_maximum() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let candidates = random_candidates(&mut rng, 40, 3);
        let kept = nms(&candidates, 0.45);
        for class_id in 0..3 {
            let best = candidates
                .iter()
                .filter(|c| c.class_id == class_id)
                .max_by(|a, b| a.confidence.total_cmp(&b.confidence));
            if let Some(best) = best {
                assert!(kept.contains(best));
            }
        }
    }
}

#[test]
fn kept_boxes_of_a_class_do_not_overlap_beyond_threshold() {
    let mut rng = StdRng::seed_from_u64(11);
    let candidates = random_candidates(&mut rng, 200, 2);
    let kept = nms(&candidates, 0.45);
    for (i, a) in kept.iter().enumerate() {
        for b in &kept[i + 1..] {
            if a.class_id == b.class_id {
                assert!(a.bbox.iou(&b.bbox) < 0.45);
            }
        }
    }
}

#[test]
fn input_order_does_not_change_the_kept_set() {
    let mut rng = StdRng::seed_from_u64(5);
    let candidates = random_candidates(&mut rng, 80, 1);
    let mut reversed = candidates.clone();
    reversed.reverse();
    assert_eq!(nms(&candidates, 0.45), nms(&reversed, 0.45));
}
